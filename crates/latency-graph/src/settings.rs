//! Tunable limits for latency-bounded path enumeration.

use serde::{Deserialize, Serialize};

/// Default investigation floor for the derived path queries.
pub const DEFAULT_MIN_PATHS_TO_INVESTIGATE: usize = 10;

/// Default number of iterations without a newly seen node before enumeration may stop.
pub const DEFAULT_IDLE_ITERATION_MARGIN: usize = 20;

/// Default hard cap on dequeued frontier entries per enumeration.
pub const DEFAULT_MAX_ITERATIONS: usize = 1_000_000;

/// Heuristic stopping parameters for path enumeration.
///
/// These are tuning values, not derived bounds. Graphs whose cheapest path is
/// hidden behind a long detour need a larger idle margin to be found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct TraversalSettings {
    /// Paths that must be recorded before enumeration may stop.
    ///
    /// Used by [`find_shortest_latency_for_path`] and [`count_paths_within_latency`].
    ///
    /// [`find_shortest_latency_for_path`]: crate::TraversalEngine::find_shortest_latency_for_path
    /// [`count_paths_within_latency`]: crate::TraversalEngine::count_paths_within_latency
    pub min_paths_to_investigate: usize,
    /// Iterations that must elapse after the last newly seen node.
    pub idle_iteration_margin: usize,
    /// Hard cap on iterations, reached only when the floor is unreachable.
    pub max_iterations: usize,
}

impl Default for TraversalSettings {
    fn default() -> Self {
        Self {
            min_paths_to_investigate: DEFAULT_MIN_PATHS_TO_INVESTIGATE,
            idle_iteration_margin: DEFAULT_IDLE_ITERATION_MARGIN,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

impl TraversalSettings {
    /// Set the investigation floor (builder pattern).
    #[must_use]
    pub const fn with_min_paths_to_investigate(mut self, min_paths: usize) -> Self {
        self.min_paths_to_investigate = min_paths;
        self
    }

    /// Set the idle iteration margin (builder pattern).
    #[must_use]
    pub const fn with_idle_iteration_margin(mut self, margin: usize) -> Self {
        self.idle_iteration_margin = margin;
        self
    }

    /// Set the iteration cap (builder pattern).
    #[must_use]
    pub const fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = TraversalSettings::default();
        assert_eq!(settings.min_paths_to_investigate, 10);
        assert_eq!(settings.idle_iteration_margin, 20);
        assert_eq!(settings.max_iterations, 1_000_000);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let settings: TraversalSettings = toml::from_str("idle-iteration-margin = 40").unwrap();
        assert_eq!(settings.idle_iteration_margin, 40);
        assert_eq!(settings.min_paths_to_investigate, 10);
    }

    #[test]
    fn test_builders() {
        let settings = TraversalSettings::default()
            .with_min_paths_to_investigate(3)
            .with_idle_iteration_margin(5)
            .with_max_iterations(100);
        assert_eq!(
            settings,
            TraversalSettings {
                min_paths_to_investigate: 3,
                idle_iteration_margin: 5,
                max_iterations: 100,
            }
        );
    }
}
