//! Error types returned by indicator construction, feeding and queries.

use thiserror::Error;

/// Errors raised by indicators.
///
/// All failures are local and synchronous: they are reported by the call
/// that caused them and leave the indicator state untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A configuration parameter is missing or out of range.
    ///
    /// Returned when building a config with a zero (or missing) length,
    /// a missing price source, or a zero first bar index, and when chaining
    /// indicators whose bar indices do not line up.
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter {
        /// Name of the offending parameter.
        name: &'static str,
        /// Why the value was rejected.
        reason: &'static str,
    },

    /// A tick arrived with a bar index that is not the immediate successor
    /// of the last accepted one.
    #[error("bar index {got} is out of sequence: expected {expected}")]
    OutOfSequence {
        /// The bar index the indicator was waiting for.
        expected: usize,
        /// The bar index that was delivered.
        got: usize,
    },

    /// A range query was made before the indicator emitted any value.
    #[error("empty stream: no values emitted yet")]
    EmptyStream,
}

/// Convenience alias for results carrying this crate's [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
