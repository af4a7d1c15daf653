//! Flat-file post parsing
//!
//! A post source is a plain text file whose first seven lines are
//! single-value headers (title, subtitle, date, slug, image, author,
//! options), each optionally wrapped in `#` heading markers. Everything
//! after the headers is the markdown body.

use chrono::NaiveDateTime;
use thiserror::Error;

use super::{MarkdownRenderer, Post, PostOptions};

/// Number of header lines at the top of every post source.
pub const HEADER_LINES: usize = 7;

/// Date format used in post headers (ISO-8601-like, no timezone).
pub const DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// A post source that cannot be turned into a [`Post`].
#[derive(Debug, Error)]
pub enum MalformedPost {
    #[error("expected {HEADER_LINES} header lines, found {0}")]
    TruncatedHeader(usize),

    #[error("invalid publish date {value:?}: {source}")]
    InvalidDate {
        value: String,
        source: chrono::ParseError,
    },
}

/// Parse a post source into a [`Post`].
///
/// Fails loudly on a truncated header or an unparseable date rather than
/// silently producing a half-filled post.
pub fn parse_post(source: &str, renderer: &MarkdownRenderer) -> Result<Post, MalformedPost> {
    let mut lines = source.lines();

    let mut headers = Vec::with_capacity(HEADER_LINES);
    for _ in 0..HEADER_LINES {
        match lines.next() {
            Some(line) => headers.push(strip_heading_marker(line)),
            None => return Err(MalformedPost::TruncatedHeader(headers.len())),
        }
    }

    let body = lines.collect::<Vec<_>>().join("\n");
    let content = renderer.render(&body);

    let [title, subtitle, date, slug, image, author, options]: [String; HEADER_LINES] = headers
        .try_into()
        .expect("header vector has exactly HEADER_LINES entries");

    let date = NaiveDateTime::parse_from_str(&date, DATE_FORMAT).map_err(|source| {
        MalformedPost::InvalidDate {
            value: date.clone(),
            source,
        }
    })?;

    let image = if image.is_empty() { None } else { Some(image) };

    Ok(Post {
        title,
        subtitle,
        date,
        slug,
        image,
        author,
        options: PostOptions::parse(&options),
        content,
    })
}

/// Strip surrounding whitespace and `#` heading markers from a header line.
fn strip_heading_marker(line: &str) -> String {
    line.trim().trim_matches('#').trim().to_string()
}
