//! Command implementations for the sprig CLI

pub mod parse;
