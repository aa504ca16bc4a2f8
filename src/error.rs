use thiserror::Error;

/// Identifies one of the three link slots of a tree node.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum LinkSlot {
    Parent,
    Left,
    Right,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("key already present in the tree")]
    DuplicateKey,
    #[error("key not found")]
    KeyNotFound,
    #[error("{0:?} link is already set")]
    LinkAlreadySet(LinkSlot),
    #[error("offset {offset} is out of range for a buffer of length {len}")]
    OffsetOutOfRange { offset: usize, len: usize },
    #[error("buffer has room for {available} entries past the offset, {required} required")]
    InsufficientCapacity { required: usize, available: usize },
}

pub type Result<T> = core::result::Result<T, Error>;
