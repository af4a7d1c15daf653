//! Post model and per-post options

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Flag that hides the comment form on a post.
pub const DISABLE_COMMENTS: &str = "disable_comments";

/// A blog post, reconstructed from its source file on every read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    /// Post title
    pub title: String,

    /// Post subtitle
    pub subtitle: String,

    /// Publication date (no timezone, as written in the source file)
    pub date: NaiveDateTime,

    /// URL-safe unique identifier
    pub slug: String,

    /// Optional header image reference
    pub image: Option<String>,

    /// Post author
    pub author: String,

    /// Per-post option flags
    pub options: PostOptions,

    /// Rendered HTML content
    pub content: String,
}

/// Sparse per-post option flags parsed from a comma-separated string.
///
/// Absent flags read as false; present flags are always true. The grammar
/// has no way to spell an explicit false.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PostOptions {
    flags: BTreeMap<String, bool>,
}

impl PostOptions {
    /// Parse a comma-separated options string. Empty input yields an
    /// empty flag set.
    pub fn parse(options_str: &str) -> Self {
        let mut flags = BTreeMap::new();
        for option in options_str.split(',') {
            let option = option.trim();
            if !option.is_empty() {
                flags.insert(option.to_string(), true);
            }
        }
        Self { flags }
    }

    /// Whether a flag is set.
    pub fn enabled(&self, name: &str) -> bool {
        self.flags.get(name).copied().unwrap_or(false)
    }

    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }
}
