//! Content module - post parsing, rendering and pagination

mod markdown;
pub mod parser;
mod post;
mod repository;

pub use markdown::MarkdownRenderer;
pub use parser::MalformedPost;
pub use post::{Post, PostOptions, DISABLE_COMMENTS};
pub use repository::{PostRepository, PAGE_SIZE};
