//! Engine configuration.

/// Default cap on the iteration count of a single `loop`.
pub const DEFAULT_MAX_LOOP_COUNT: u32 = 10_000;

/// Tunable limits for an [`Interpreter`](crate::interpreter::Interpreter).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Largest iteration count accepted by `loop N`.
    ///
    /// Execution is synchronous and cannot be cancelled mid-line, so a
    /// runaway count would hang the host.
    pub max_loop_count: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_loop_count: DEFAULT_MAX_LOOP_COUNT,
        }
    }
}

impl Config {
    /// Override the loop cap.
    #[must_use]
    pub const fn with_max_loop_count(mut self, max_loop_count: u32) -> Self {
        self.max_loop_count = max_loop_count;
        self
    }
}
