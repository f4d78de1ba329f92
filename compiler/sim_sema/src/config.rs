//! Analyzer configuration.

/// What to do when a literal does not fit the integer type it is given.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub enum LiteralOverflow {
    /// Reject the literal with `LiteralOutOfRange`.
    #[default]
    Error,
    /// Truncate to the target width (two's complement) and log a warning.
    Wrap,
}

/// Configuration for semantic analysis.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct SemaConfig {
    /// Bit width of `isize` and `usize` on the target.
    pub pointer_width: u16,
    /// Narrowing rule for integer literals.
    pub literal_overflow: LiteralOverflow,
    /// Analyze function bodies on the rayon pool once package tables are
    /// frozen. The reported error is the same as in sequential mode.
    pub parallel_bodies: bool,
}

impl Default for SemaConfig {
    fn default() -> Self {
        SemaConfig {
            pointer_width: 64,
            literal_overflow: LiteralOverflow::Error,
            parallel_bodies: false,
        }
    }
}

impl SemaConfig {
    /// Configuration for a 32-bit target.
    pub fn target_32bit() -> Self {
        SemaConfig {
            pointer_width: 32,
            ..Self::default()
        }
    }
}
