//! Error types for the sprig arena

use thiserror::Error;

/// Failures raised by [`Arena`](crate::arena::Arena) operations.
///
/// `AllocationExhausted` is a resource ceiling. Every other variant means a
/// handle or slot key was used against the allocator contract.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ArenaError {
    #[error("Arena exhausted: all {capacity} slots are occupied")]
    AllocationExhausted { capacity: usize },

    #[error("Use after free: slot {slot} is not live")]
    UseAfterFree { slot: usize },

    #[error("Double free: slot {slot} is already free")]
    DoubleFree { slot: usize },

    #[error("Slot {slot} is out of range for capacity {capacity}")]
    OutOfRange { slot: usize, capacity: usize },

    #[error("Slot {slot} is already populated")]
    AlreadyPopulated { slot: usize },

    #[error("Slot {slot} was reserved but never populated")]
    Unpopulated { slot: usize },

    #[error("Handle for slot {slot} belongs to a different arena")]
    ForeignHandle { slot: usize },
}

/// Discriminant of an [`ArenaError`], for matching without payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArenaErrorKind {
    AllocationExhausted,
    UseAfterFree,
    DoubleFree,
    OutOfRange,
    AlreadyPopulated,
    Unpopulated,
    ForeignHandle,
}

impl ArenaError {
    pub fn kind(&self) -> ArenaErrorKind {
        match self {
            ArenaError::AllocationExhausted { .. } => ArenaErrorKind::AllocationExhausted,
            ArenaError::UseAfterFree { .. } => ArenaErrorKind::UseAfterFree,
            ArenaError::DoubleFree { .. } => ArenaErrorKind::DoubleFree,
            ArenaError::OutOfRange { .. } => ArenaErrorKind::OutOfRange,
            ArenaError::AlreadyPopulated { .. } => ArenaErrorKind::AlreadyPopulated,
            ArenaError::Unpopulated { .. } => ArenaErrorKind::Unpopulated,
            ArenaError::ForeignHandle { .. } => ArenaErrorKind::ForeignHandle,
        }
    }

    /// True for the resource-ceiling class, false for contract violations.
    pub fn is_exhaustion(&self) -> bool {
        matches!(self, ArenaError::AllocationExhausted { .. })
    }
}

pub type Result<T> = std::result::Result<T, ArenaError>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
