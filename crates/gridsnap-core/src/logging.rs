//! `tracing` subscriber setup.

/// Default filter used by [`init`].
pub const DEFAULT_FILTER: &str = "info,gridsnap_drag=debug";

/// Install a fmt subscriber with the default filter.
///
/// `RUST_LOG` is not consulted; use [`init_with_filter`] to override.
pub fn init() {
    init_with_filter(DEFAULT_FILTER);
}

/// Install a fmt subscriber with a custom env-filter directive string.
///
/// Panics if a global subscriber is already set.
pub fn init_with_filter(filter: &str) {
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
