//! Element hierarchy and drop-container lookup.
//!
//! Drop containers are found by capability, not by type: starting at the
//! element under the pointer, parent links are followed outward until a node
//! exposing [`Capabilities::DROP_CONTAINER`] is reached. The innermost match
//! wins.

use bitflags::bitflags;
use gridsnap_core::geometry::{Point, Rect};
use gridsnap_core::profiling::profile_function;
use indexmap::IndexMap;

/// Node identifier in an element hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

bitflags! {
    /// Capabilities a node exposes to the drag system.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Capabilities: u8 {
        const NONE           = 0;
        /// Accepts dropped elements and bounds their position.
        const DROP_CONTAINER = 1 << 0;
        /// Can be grabbed and dragged.
        const DRAGGABLE      = 1 << 1;
    }
}

/// Error types for hierarchy mutations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HierarchyError {
    /// Node not found in the tree.
    NodeNotFound(NodeId),
    /// A node cannot be its own parent.
    SelfParent(NodeId),
    /// Attaching would make a node its own ancestor.
    Cycle { node: NodeId, parent: NodeId },
}

impl std::fmt::Display for HierarchyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HierarchyError::NodeNotFound(id) => write!(f, "Node {:?} not found", id),
            HierarchyError::SelfParent(id) => write!(f, "Node {:?} cannot parent itself", id),
            HierarchyError::Cycle { node, parent } => {
                write!(f, "Attaching {:?} under {:?} would create a cycle", node, parent)
            }
        }
    }
}

impl std::error::Error for HierarchyError {}

/// Result type for hierarchy mutations.
pub type HierarchyResult<T> = Result<T, HierarchyError>;

/// Read-only view of a UI element hierarchy.
///
/// This is the seam between the drag system and whatever owns the real
/// elements. Implementors provide parent links, capabilities, geometry and
/// pointer hit-testing.
pub trait ContainerHierarchy {
    /// Parent of `node`, or `None` for roots and unknown nodes.
    fn parent(&self, node: NodeId) -> Option<NodeId>;

    /// Capabilities exposed by `node`. Unknown nodes expose none.
    fn capabilities(&self, node: NodeId) -> Capabilities;

    /// Bounding box of `node`, in the same space as pointer coordinates.
    fn bounds(&self, node: NodeId) -> Option<Rect>;

    /// Grid cell size of a drop container, if it defines one.
    fn cell_size(&self, _node: NodeId) -> Option<f32> {
        None
    }

    /// Deepest node under `point`.
    fn hit_test(&self, point: Point) -> Option<NodeId>;

    /// Upper bound on parent hops, used to stop walks over malformed
    /// (cyclic) hierarchies.
    fn depth_limit(&self) -> usize {
        usize::MAX
    }
}

/// A resolved drop target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DropTarget {
    /// The container node.
    pub container: NodeId,
    /// The container's bounds.
    pub bounds: Rect,
    /// The container's cell size, if it defines one.
    pub cell_size: Option<f32>,
}

/// Find the nearest drop container at or above `start`.
///
/// Returns `None` when no ancestor is a drop container, or when the nearest
/// one has no usable geometry (missing or zero-sized bounds).
pub fn find_drop_container<H>(hierarchy: &H, start: NodeId) -> Option<DropTarget>
where
    H: ContainerHierarchy + ?Sized,
{
    profile_function!();
    let mut current = Some(start);
    let mut hops = 0usize;

    while let Some(node) = current {
        if hierarchy
            .capabilities(node)
            .contains(Capabilities::DROP_CONTAINER)
        {
            let bounds = hierarchy.bounds(node)?;
            if bounds.is_empty() {
                tracing::trace!("Drop container {:?} has no area", node);
                return None;
            }
            return Some(DropTarget {
                container: node,
                bounds,
                cell_size: hierarchy.cell_size(node),
            });
        }

        hops += 1;
        if hops > hierarchy.depth_limit() {
            tracing::warn!("Parent walk from {:?} exceeded depth limit", start);
            return None;
        }
        current = hierarchy.parent(node);
    }

    None
}

/// Drop target under the pointer, if any.
pub fn is_valid_target<H>(pointer: Point, hierarchy: &H) -> Option<DropTarget>
where
    H: ContainerHierarchy + ?Sized,
{
    let hit = hierarchy.hit_test(pointer)?;
    find_drop_container(hierarchy, hit)
}

/// A node in an [`ElementTree`].
#[derive(Debug, Clone)]
pub struct ElementNode {
    /// Bounds in pointer space.
    pub bounds: Rect,
    pub capabilities: Capabilities,
    /// Grid cell size (drop containers only).
    pub cell_size: Option<f32>,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
}

/// Insertion-ordered element tree with parent links.
///
/// Later insertions paint above earlier ones, so hit-testing prefers the
/// most recently inserted node among equally deep candidates.
#[derive(Debug, Default)]
pub struct ElementTree {
    nodes: IndexMap<NodeId, ElementNode>,
    next_id: usize,
}

impl ElementTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a detached node.
    pub fn insert(&mut self, bounds: Rect, capabilities: Capabilities) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        self.nodes.insert(
            id,
            ElementNode {
                bounds: bounds.normalized(),
                capabilities,
                cell_size: None,
                parent: None,
                children: Vec::new(),
            },
        );
        id
    }

    /// Insert a drop container with an optional grid.
    pub fn insert_container(&mut self, bounds: Rect, cell_size: Option<f32>) -> NodeId {
        let id = self.insert(bounds, Capabilities::DROP_CONTAINER);
        if let Some(node) = self.nodes.get_mut(&id) {
            node.cell_size = cell_size;
        }
        id
    }

    /// Insert a draggable element.
    pub fn insert_draggable(&mut self, bounds: Rect) -> NodeId {
        self.insert(bounds, Capabilities::DRAGGABLE)
    }

    pub fn node(&self, id: NodeId) -> Option<&ElementNode> {
        self.nodes.get(&id)
    }

    fn node_mut(&mut self, id: NodeId) -> HierarchyResult<&mut ElementNode> {
        self.nodes.get_mut(&id).ok_or(HierarchyError::NodeNotFound(id))
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Make `child` a child of `parent`, detaching it from any previous parent.
    pub fn attach(&mut self, child: NodeId, parent: NodeId) -> HierarchyResult<()> {
        if !self.nodes.contains_key(&child) {
            return Err(HierarchyError::NodeNotFound(child));
        }
        if !self.nodes.contains_key(&parent) {
            return Err(HierarchyError::NodeNotFound(parent));
        }
        if child == parent {
            return Err(HierarchyError::SelfParent(child));
        }
        if self.ancestors(parent).any(|a| a == child) {
            return Err(HierarchyError::Cycle {
                node: child,
                parent,
            });
        }

        self.detach(child)?;
        self.node_mut(child)?.parent = Some(parent);
        self.node_mut(parent)?.children.push(child);
        Ok(())
    }

    /// Remove `node` from its parent. No-op for roots.
    pub fn detach(&mut self, node: NodeId) -> HierarchyResult<()> {
        let old_parent = self.node_mut(node)?.parent.take();
        if let Some(parent) = old_parent
            && let Some(parent_node) = self.nodes.get_mut(&parent)
        {
            parent_node.children.retain(|c| *c != node);
        }
        Ok(())
    }

    pub fn set_bounds(&mut self, node: NodeId, bounds: Rect) -> HierarchyResult<()> {
        self.node_mut(node)?.bounds = bounds.normalized();
        Ok(())
    }

    pub fn set_cell_size(&mut self, node: NodeId, cell_size: Option<f32>) -> HierarchyResult<()> {
        self.node_mut(node)?.cell_size = cell_size;
        Ok(())
    }

    pub fn set_capabilities(
        &mut self,
        node: NodeId,
        capabilities: Capabilities,
    ) -> HierarchyResult<()> {
        self.node_mut(node)?.capabilities = capabilities;
        Ok(())
    }

    /// Move `node` so its top-left corner sits at `position` (pointer space).
    pub fn move_to(&mut self, node: NodeId, position: Point) -> HierarchyResult<()> {
        let entry = self.node_mut(node)?;
        entry.bounds = entry.bounds.with_position(position);
        Ok(())
    }

    /// Strict ancestors of `node`, nearest first.
    pub fn ancestors(&self, node: NodeId) -> Ancestors<'_> {
        Ancestors {
            tree: self,
            next: self.parent(node),
        }
    }

    fn depth(&self, node: NodeId) -> usize {
        self.ancestors(node).count()
    }
}

impl ContainerHierarchy for ElementTree {
    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes.get(&node).and_then(|n| n.parent)
    }

    fn capabilities(&self, node: NodeId) -> Capabilities {
        self.nodes
            .get(&node)
            .map_or(Capabilities::NONE, |n| n.capabilities)
    }

    fn bounds(&self, node: NodeId) -> Option<Rect> {
        self.nodes.get(&node).map(|n| n.bounds)
    }

    fn cell_size(&self, node: NodeId) -> Option<f32> {
        self.nodes.get(&node).and_then(|n| n.cell_size)
    }

    fn hit_test(&self, point: Point) -> Option<NodeId> {
        profile_function!();
        let mut best: Option<(NodeId, usize)> = None;
        for (id, node) in &self.nodes {
            if !node.bounds.contains(point) {
                continue;
            }
            let depth = self.depth(*id);
            if best.is_none_or(|(_, d)| depth >= d) {
                best = Some((*id, depth));
            }
        }
        best.map(|(id, _)| id)
    }

    fn depth_limit(&self) -> usize {
        self.nodes.len()
    }
}

/// Iterator over a node's ancestors.
#[derive(Debug)]
pub struct Ancestors<'a> {
    tree: &'a ElementTree,
    next: Option<NodeId>,
}

impl Iterator for Ancestors<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.next?;
        self.next = self.tree.parent(current);
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridsnap_core::math::Vec2;

    fn board_with_tile() -> (ElementTree, NodeId, NodeId) {
        let mut tree = ElementTree::new();
        let board = tree.insert_container(Rect::new(0.0, 0.0, 300.0, 300.0), Some(50.0));
        let tile = tree.insert_draggable(Rect::new(100.0, 100.0, 50.0, 50.0));
        tree.attach(tile, board).unwrap();
        (tree, board, tile)
    }

    #[test]
    fn test_attach_and_ancestors() {
        let (tree, board, tile) = board_with_tile();
        assert_eq!(tree.ancestors(tile).collect::<Vec<_>>(), vec![board]);
        assert_eq!(tree.node(board).unwrap().children, vec![tile]);
    }

    #[test]
    fn test_attach_rejects_cycles() {
        let (mut tree, board, tile) = board_with_tile();
        assert_eq!(
            tree.attach(board, tile),
            Err(HierarchyError::Cycle {
                node: board,
                parent: tile
            })
        );
        assert_eq!(tree.attach(tile, tile), Err(HierarchyError::SelfParent(tile)));
        assert_eq!(
            tree.attach(tile, NodeId(99)),
            Err(HierarchyError::NodeNotFound(NodeId(99)))
        );
    }

    #[test]
    fn test_reattach_moves_child() {
        let (mut tree, board, tile) = board_with_tile();
        let other = tree.insert_container(Rect::new(400.0, 0.0, 100.0, 100.0), None);
        tree.attach(tile, other).unwrap();
        assert!(tree.node(board).unwrap().children.is_empty());
        assert_eq!(tree.parent(tile), Some(other));
    }

    #[test]
    fn test_hit_test_prefers_deepest() {
        let (tree, board, tile) = board_with_tile();
        assert_eq!(tree.hit_test(Vec2::new(120.0, 120.0)), Some(tile));
        assert_eq!(tree.hit_test(Vec2::new(10.0, 10.0)), Some(board));
        assert_eq!(tree.hit_test(Vec2::new(500.0, 500.0)), None);
    }

    #[test]
    fn test_drop_container_from_child() {
        let (tree, board, _) = board_with_tile();
        let target = is_valid_target(Vec2::new(120.0, 120.0), &tree).unwrap();
        assert_eq!(target.container, board);
        assert_eq!(target.cell_size, Some(50.0));
        assert_eq!(target.bounds, Rect::new(0.0, 0.0, 300.0, 300.0));
    }

    #[test]
    fn test_no_container_above_pointer() {
        let mut tree = ElementTree::new();
        let panel = tree.insert(Rect::new(0.0, 0.0, 100.0, 100.0), Capabilities::NONE);
        let label = tree.insert(Rect::new(10.0, 10.0, 20.0, 20.0), Capabilities::NONE);
        tree.attach(label, panel).unwrap();

        assert!(is_valid_target(Vec2::new(15.0, 15.0), &tree).is_none());
    }

    #[test]
    fn test_innermost_container_wins() {
        let mut tree = ElementTree::new();
        let outer = tree.insert_container(Rect::new(0.0, 0.0, 500.0, 500.0), Some(10.0));
        let inner = tree.insert_container(Rect::new(100.0, 100.0, 200.0, 200.0), Some(25.0));
        let leaf = tree.insert(Rect::new(120.0, 120.0, 10.0, 10.0), Capabilities::NONE);
        tree.attach(inner, outer).unwrap();
        tree.attach(leaf, inner).unwrap();

        let target = find_drop_container(&tree, leaf).unwrap();
        assert_eq!(target.container, inner);
        assert_eq!(target.cell_size, Some(25.0));
    }

    #[test]
    fn test_zero_sized_container_is_not_a_target() {
        let mut tree = ElementTree::new();
        let collapsed = tree.insert_container(Rect::new(0.0, 0.0, 0.0, 0.0), None);
        let child = tree.insert(Rect::new(10.0, 10.0, 20.0, 20.0), Capabilities::NONE);
        tree.attach(child, collapsed).unwrap();

        assert!(is_valid_target(Vec2::new(15.0, 15.0), &tree).is_none());
    }

    #[test]
    fn test_move_to_keeps_size() {
        let (mut tree, _, tile) = board_with_tile();
        tree.move_to(tile, Vec2::new(250.0, 0.0)).unwrap();
        assert_eq!(tree.bounds(tile), Some(Rect::new(250.0, 0.0, 50.0, 50.0)));
    }

    #[test]
    fn test_setters_update_lookup() {
        let (mut tree, board, tile) = board_with_tile();
        tree.set_cell_size(board, Some(25.0)).unwrap();
        tree.set_capabilities(tile, Capabilities::DRAGGABLE | Capabilities::DROP_CONTAINER)
            .unwrap();

        // The tile is now the innermost container under the pointer.
        let target = is_valid_target(Vec2::new(120.0, 120.0), &tree).unwrap();
        assert_eq!(target.container, tile);
        assert_eq!(target.cell_size, None);

        let target = is_valid_target(Vec2::new(10.0, 10.0), &tree).unwrap();
        assert_eq!(target.cell_size, Some(25.0));

        assert_eq!(
            tree.set_bounds(NodeId(77), Rect::default()),
            Err(HierarchyError::NodeNotFound(NodeId(77)))
        );
    }

    #[test]
    fn test_detach_root_is_noop() {
        let (mut tree, board, tile) = board_with_tile();
        tree.detach(board).unwrap();
        tree.detach(tile).unwrap();
        assert_eq!(tree.parent(tile), None);
        assert!(tree.node(board).unwrap().children.is_empty());
        assert_eq!(tree.len(), 2);
        assert!(!tree.is_empty());
    }

    #[test]
    fn test_error_display() {
        let err = HierarchyError::NodeNotFound(NodeId(3));
        assert_eq!(err.to_string(), "Node NodeId(3) not found");
    }
}
