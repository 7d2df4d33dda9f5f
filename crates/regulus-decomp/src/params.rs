//! Driver parameters and statistics.

use std::time::Duration;

/// Knobs for a regularity run.
#[derive(Clone, Copy, Debug)]
pub struct RegularParams {
    /// Attempt direct graphicness tests even for matrices with more than
    /// three rows and columns. The direct test is an exact backtracking
    /// search, so this is only advisable for modest sizes.
    pub direct_graphicness: bool,
    /// Keep decomposing after the first definite irregularity instead of
    /// stopping early.
    pub complete_tree: bool,
}

impl Default for RegularParams {
    fn default() -> Self {
        Self {
            direct_graphicness: false,
            complete_tree: false,
        }
    }
}

/// Counters and accumulated wall time for one pipeline phase.
#[derive(Clone, Copy, Debug, Default)]
pub struct PhaseStats {
    /// Number of tester invocations.
    pub invocations: u64,
    /// Accumulated wall time.
    pub time: Duration,
}

impl PhaseStats {
    pub(crate) fn record(&mut self, elapsed: Duration) {
        self.invocations += 1;
        self.time += elapsed;
    }
}

/// Statistics of a regularity run.
#[derive(Clone, Copy, Debug, Default)]
pub struct RegularStats {
    /// Number of driver invocations.
    pub total_count: u64,
    /// Total wall time.
    pub total_time: Duration,
    /// 1-separation search.
    pub one_sum: PhaseStats,
    /// Direct graphicness tests.
    pub graphicness: PhaseStats,
    /// Direct cographicness tests.
    pub cographicness: PhaseStats,
    /// R10 recognition.
    pub r10: PhaseStats,
    /// Series-parallel reduction.
    pub series_parallel: PhaseStats,
    /// Nested minor sequence construction and walks.
    pub nested_sequence: PhaseStats,
    /// 3-separation search.
    pub three_separation: PhaseStats,
}
