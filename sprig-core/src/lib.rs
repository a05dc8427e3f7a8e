//! Core types and data structures for sprig
//!
//! This crate provides the storage half of the sprig front-end:
//! - Fixed-capacity slot arena with move-only handles
//! - Syntax tree value representation
//! - Resource limits
//! - Error types

pub mod arena;
pub mod error;
pub mod limits;
pub mod value;

pub use arena::{Arena, ArenaId, Handle, SlotId};
pub use error::{ArenaError, ArenaErrorKind, Result};
pub use limits::Limits;
pub use value::{Datum, Value, ValueArena, ValueKind};
