//! Resource limits for one parse

use serde::{Deserialize, Serialize};

/// Default arena capacity, in value slots.
pub const DEFAULT_MAX_NODES: usize = 0x10000;
/// Default maximum number of children in one list.
pub const DEFAULT_MAX_LIST_LEN: usize = 0x10000;
/// Default maximum list nesting depth.
pub const DEFAULT_MAX_DEPTH: usize = 1024;
/// Default maximum byte length of an atom or string body.
pub const DEFAULT_MAX_TEXT_LEN: usize = 1024;

/// Capacity ceilings applied while building a tree.
///
/// Every field has a default, so a partial `[limits]` table in a config file
/// only overrides what it names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Limits {
    #[serde(default = "default_max_nodes")]
    pub max_nodes: usize,

    #[serde(default = "default_max_list_len")]
    pub max_list_len: usize,

    #[serde(default = "default_max_depth")]
    pub max_depth: usize,

    #[serde(default = "default_max_text_len")]
    pub max_text_len: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_nodes: default_max_nodes(),
            max_list_len: default_max_list_len(),
            max_depth: default_max_depth(),
            max_text_len: default_max_text_len(),
        }
    }
}

impl Limits {
    pub fn with_max_nodes(mut self, max_nodes: usize) -> Self {
        self.max_nodes = max_nodes;
        self
    }

    pub fn with_max_list_len(mut self, max_list_len: usize) -> Self {
        self.max_list_len = max_list_len;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_max_text_len(mut self, max_text_len: usize) -> Self {
        self.max_text_len = max_text_len;
        self
    }
}

fn default_max_nodes() -> usize { DEFAULT_MAX_NODES }
fn default_max_list_len() -> usize { DEFAULT_MAX_LIST_LEN }
fn default_max_depth() -> usize { DEFAULT_MAX_DEPTH }
fn default_max_text_len() -> usize { DEFAULT_MAX_TEXT_LEN }
