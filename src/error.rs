//! Canvas error types.

/// A result type returning canvas errors.
pub type Result<T> = std::result::Result<T, Error>;

/// An enumeration of canvas errors.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The referenced level does not exist.
    #[error("level {0} does not exist")]
    InvalidLevel(usize),
    /// An inserted block would break the ascending left-edge order of its level.
    #[error("block at x = {x} starts behind the tail of level {level}")]
    UnsortedInsert {
        /// The level the block was inserted into.
        level: usize,
        /// The left edge of the rejected block.
        x: i64,
    },
}
