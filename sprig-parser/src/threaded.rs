//! Parsing on a dedicated thread with a configurable stack size
//!
//! The grammar grows its stack in segments once nesting gets deep. Running
//! on a thread with a large stack keeps ordinary inputs on one segment. The
//! finished arena is handed back to the caller.

use crate::error::ParseError;
use crate::{parse_with_limits, Parsed};
use sprig_core::Limits;
use std::sync::mpsc;
use std::thread;
use tracing::debug;

/// Configuration for threaded parsing
#[derive(Debug, Clone)]
pub struct ThreadedParserConfig {
    /// Stack size in bytes for the parser thread
    pub stack_size: usize,
    pub limits: Limits,
    /// Thread name (for debugging)
    pub thread_name: String,
}

impl Default for ThreadedParserConfig {
    fn default() -> Self {
        Self {
            stack_size: 16 * 1024 * 1024,
            limits: Limits::default(),
            thread_name: "sprig-parser".to_string(),
        }
    }
}

impl ThreadedParserConfig {
    pub fn with_stack_size(mut self, size: usize) -> Self {
        self.stack_size = size;
        self
    }

    pub fn with_limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }

    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.limits.max_depth = depth;
        self
    }

    pub fn with_thread_name(mut self, name: impl Into<String>) -> Self {
        self.thread_name = name.into();
        self
    }
}

/// Parse a program on a separate thread with the configured stack size.
pub fn parse_threaded(source: String, config: ThreadedParserConfig) -> Result<Parsed, ParseError> {
    let (tx, rx) = mpsc::channel();

    debug!(
        stack_size = config.stack_size,
        thread = %config.thread_name,
        "spawning parser thread"
    );
    let limits = config.limits;
    let handle = thread::Builder::new()
        .name(config.thread_name)
        .stack_size(config.stack_size)
        .spawn(move || {
            let result = parse_with_limits(&source, limits);
            let _ = tx.send(result);
        })
        .map_err(|e| ParseError::Thread(format!("failed to spawn: {}", e)))?;

    handle
        .join()
        .map_err(|_| ParseError::Thread("parser thread panicked".to_string()))?;

    rx.recv()
        .map_err(|_| ParseError::Thread("no result from parser thread".to_string()))?
}

/// Convenience function for parsing with a specific stack size
pub fn parse_with_stack_size(source: &str, stack_size: usize) -> Result<Parsed, ParseError> {
    let config = ThreadedParserConfig::default().with_stack_size(stack_size);
    parse_threaded(source.to_string(), config)
}
