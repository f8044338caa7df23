//! Search statistics for diagnostics.

use serde::{Deserialize, Serialize};

/// Statistics collected by one iterative search.
///
/// Purely observational: nothing here feeds back into scoring.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchStats {
    /// Nodes added to the arena, root included.
    pub nodes_allocated: u32,

    /// Nodes whose children were generated.
    pub nodes_expanded: u32,

    /// Nodes resolved by terminal scoring.
    pub terminal_nodes: u32,

    /// Deepest ply reached.
    pub max_depth: u16,

    /// Largest work-list size observed.
    pub peak_frontier: usize,
}

impl SearchStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Average children per expanded node.
    #[must_use]
    pub fn branching_factor(&self) -> f64 {
        if self.nodes_expanded == 0 {
            0.0
        } else {
            // Every node but the root is some expanded node's child.
            f64::from(self.nodes_allocated.saturating_sub(1)) / f64::from(self.nodes_expanded)
        }
    }
}
