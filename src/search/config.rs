//! Proof-number search configuration.

/// Tunables of one top-level search.
#[derive(Clone, Debug, PartialEq)]
pub struct SearchConfig {
    /// Maximum nodes in the tree (and expansions) per top-level search.
    pub node_budget: usize,

    /// Fraction (0..=1) of the best candidate score a move needs to be
    /// expanded. Higher values give narrower, faster but less reliable trees.
    pub selector_cut: f32,

    /// Maximum attacker moves in a forced-win sequence.
    pub forced_win_depth: u8,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            node_budget: 300_000,
            selector_cut: 0.5,
            forced_win_depth: 10,
        }
    }
}

impl SearchConfig {
    pub fn with_node_budget(mut self, budget: usize) -> Self {
        self.node_budget = budget;
        self
    }

    pub fn with_selector_cut(mut self, cut: f32) -> Self {
        self.selector_cut = cut.clamp(0.0, 1.0);
        self
    }

    pub fn with_forced_win_depth(mut self, depth: u8) -> Self {
        self.forced_win_depth = depth;
        self
    }
}
