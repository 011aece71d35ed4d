use thiserror::Error;

use optiviz_core::UnsupportedArity;

/// Errors detected before the descent loop starts.
///
/// Nothing has been rendered and no parameters have been built when one of
/// these is returned, so the caller can fix the arguments and retry.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The objective takes other than 1 or 2 free parameters.
    #[error(transparent)]
    Arity(#[from] UnsupportedArity),

    /// An argument's length disagrees with the objective's arity.
    #[error("objective takes {expected} free parameters but `{argument}` has length {found}")]
    DimensionMismatch {
        argument: &'static str,
        expected: usize,
        found: usize,
    },
}
