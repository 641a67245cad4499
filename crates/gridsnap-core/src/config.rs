//! Process-level configuration.

use crate::logging;
use crate::profiling::{self, ProfilingBackend};

/// Configuration for the ambient gridsnap services.
#[derive(Debug, Clone)]
pub struct Config {
    /// Env-filter directives for the `tracing` subscriber.
    pub log_filter: String,
    pub profiling: ProfilingMode,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            log_filter: logging::DEFAULT_FILTER.to_string(),
            profiling: ProfilingMode::Off,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProfilingMode {
    /// Profiling is disabled
    #[default]
    Off,
    /// Scopes are recorded in-process
    On,
    /// Scopes are recorded and served to 'puffin_viewer'
    #[cfg(feature = "profiling-server")]
    WithWebserver,
}

impl ProfilingMode {
    /// Backend to start for this mode, if any.
    pub fn backend(self) -> Option<ProfilingBackend> {
        match self {
            ProfilingMode::Off => None,
            ProfilingMode::On => Some(ProfilingBackend::InProcess),
            #[cfg(feature = "profiling-server")]
            ProfilingMode::WithWebserver => Some(ProfilingBackend::PuffinHttp),
        }
    }
}

impl Config {
    pub fn with_log_filter(mut self, filter: impl Into<String>) -> Self {
        self.log_filter = filter.into();
        self
    }

    pub fn with_profiling(mut self, mode: ProfilingMode) -> Self {
        self.profiling = mode;
        self
    }

    /// Install the logging subscriber and start profiling.
    ///
    /// Call once at startup.
    pub fn install(&self) {
        logging::init_with_filter(&self.log_filter);
        if let Some(backend) = self.profiling.backend() {
            profiling::init_profiling(backend);
        }
    }
}
