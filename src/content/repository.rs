//! Post repository - discovers, parses, sorts and paginates posts
//!
//! Posts are re-read from disk on every call; there is no cache to
//! invalidate. The posts directory is expected to stay small enough for
//! that to be a non-issue.

use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};

use super::{parser, MarkdownRenderer, Post};

/// Number of posts per index page.
pub const PAGE_SIZE: usize = 5;

/// Reads posts from a flat directory of markdown sources.
pub struct PostRepository {
    posts_dir: PathBuf,
    renderer: MarkdownRenderer,
}

impl PostRepository {
    pub fn new<P: AsRef<Path>>(posts_dir: P) -> Self {
        Self {
            posts_dir: posts_dir.as_ref().to_path_buf(),
            renderer: MarkdownRenderer::new(),
        }
    }

    /// Load all posts, newest first.
    ///
    /// Sources that fail to parse are logged and skipped; equal dates keep
    /// discovery (file name) order because the sort is stable.
    pub fn list_posts(&self) -> Result<Vec<Post>> {
        let mut posts = Vec::new();

        for path in self.eligible_sources()? {
            let source = fs::read_to_string(&path)?;
            match parser::parse_post(&source, &self.renderer) {
                Ok(post) => posts.push(post),
                Err(e) => {
                    tracing::warn!("Failed to load post {:?}: {}", path, e);
                }
            }
        }

        posts.sort_by(|a, b| b.date.cmp(&a.date));

        Ok(posts)
    }

    /// Load one page of posts. Pages are 1-indexed; an out-of-range page
    /// yields an empty slice, range validation is the caller's job.
    pub fn list_posts_page(&self, page: usize) -> Result<Vec<Post>> {
        let start = page.saturating_sub(1).saturating_mul(PAGE_SIZE);
        let posts = self.list_posts()?;
        Ok(posts.into_iter().skip(start).take(PAGE_SIZE).collect())
    }

    /// Total page count, computed from the eligible source count rather
    /// than the successfully parsed count. A source that fails to parse
    /// still occupies a pagination slot.
    pub fn total_pages(&self) -> Result<usize> {
        let count = self.eligible_sources()?.len();
        Ok(count.div_ceil(PAGE_SIZE))
    }

    /// Find a post by its slug. When duplicate slugs exist the first match
    /// in sorted order wins.
    pub fn find_by_slug(&self, slug: &str) -> Result<Option<Post>> {
        Ok(self.list_posts()?.into_iter().find(|p| p.slug == slug))
    }

    /// List markdown sources in the posts directory, sorted by file name
    /// for a deterministic discovery order. A missing directory reads as
    /// an empty one.
    fn eligible_sources(&self) -> Result<Vec<PathBuf>> {
        if !self.posts_dir.exists() {
            return Ok(Vec::new());
        }

        let mut sources: Vec<PathBuf> = fs::read_dir(&self.posts_dir)?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.is_file() && is_markdown_file(path))
            .collect();
        sources.sort();

        Ok(sources)
    }
}

/// Check if a file is a markdown file
fn is_markdown_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e == "md" || e == "markdown")
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_post(dir: &Path, file: &str, title: &str, date: &str, slug: &str) {
        let source = format!("{title}\nSub\n{date}\n{slug}\n\nAuthor\n\nBody of {title}");
        fs::write(dir.join(file), source).unwrap();
    }

    fn fixture_dir(count: usize) -> TempDir {
        let dir = TempDir::new().unwrap();
        for i in 1..=count {
            write_post(
                dir.path(),
                &format!("post-{i}.md"),
                &format!("Title {i}"),
                &format!("2010-01-{i:02}T11:11:00"),
                &format!("slug-{i}"),
            );
        }
        dir
    }

    #[test]
    fn test_list_posts_sorted_newest_first() {
        let dir = fixture_dir(3);
        let repo = PostRepository::new(dir.path());
        let posts = repo.list_posts().unwrap();
        assert_eq!(posts.len(), 3);
        assert_eq!(posts[0].title, "Title 3");
        assert_eq!(posts[1].title, "Title 2");
        assert_eq!(posts[2].title, "Title 1");
    }

    #[test]
    fn test_list_posts_equal_dates_keep_discovery_order() {
        let dir = TempDir::new().unwrap();
        write_post(dir.path(), "a.md", "A", "2010-01-01T11:11:00", "a");
        write_post(dir.path(), "b.md", "B", "2010-01-01T11:11:00", "b");
        let repo = PostRepository::new(dir.path());
        let posts = repo.list_posts().unwrap();
        assert_eq!(posts[0].title, "A");
        assert_eq!(posts[1].title, "B");
    }

    #[test]
    fn test_list_posts_skips_non_markdown() {
        let dir = fixture_dir(2);
        fs::write(dir.path().join("notes.txt"), "not a post").unwrap();
        let repo = PostRepository::new(dir.path());
        assert_eq!(repo.list_posts().unwrap().len(), 2);
    }

    #[test]
    fn test_list_posts_skips_malformed() {
        let dir = fixture_dir(2);
        fs::write(dir.path().join("broken.md"), "only\ntwo lines").unwrap();
        let repo = PostRepository::new(dir.path());
        assert_eq!(repo.list_posts().unwrap().len(), 2);
    }

    #[test]
    fn test_malformed_source_still_counts_toward_pages() {
        let dir = fixture_dir(5);
        fs::write(dir.path().join("zz-broken.md"), "only\ntwo lines").unwrap();
        let repo = PostRepository::new(dir.path());
        assert_eq!(repo.total_pages().unwrap(), 2);
    }

    #[test]
    fn test_pagination_splits_at_page_size() {
        let dir = fixture_dir(6);
        let repo = PostRepository::new(dir.path());

        let first = repo.list_posts_page(1).unwrap();
        assert_eq!(first.len(), 5);
        assert_eq!(first[0].title, "Title 6");
        assert_eq!(first[4].title, "Title 2");

        let second = repo.list_posts_page(2).unwrap();
        assert_eq!(second.len(), 1);
        assert_eq!(second[0].title, "Title 1");
    }

    #[test]
    fn test_pagination_out_of_range_is_empty() {
        let dir = fixture_dir(2);
        let repo = PostRepository::new(dir.path());
        assert!(repo.list_posts_page(3).unwrap().is_empty());
        assert!(repo.list_posts_page(usize::MAX).unwrap().is_empty());
    }

    #[test]
    fn test_total_pages() {
        for (count, expected) in [(0, 0), (1, 1), (5, 1), (6, 2), (11, 3)] {
            let dir = fixture_dir(count);
            let repo = PostRepository::new(dir.path());
            assert_eq!(repo.total_pages().unwrap(), expected, "count = {count}");
        }
    }

    #[test]
    fn test_find_by_slug() {
        let dir = fixture_dir(3);
        let repo = PostRepository::new(dir.path());
        let post = repo.find_by_slug("slug-2").unwrap().unwrap();
        assert_eq!(post.title, "Title 2");
        assert!(repo.find_by_slug("missing").unwrap().is_none());
    }

    #[test]
    fn test_missing_directory_is_empty() {
        let repo = PostRepository::new("/nonexistent/posts");
        assert!(repo.list_posts().unwrap().is_empty());
        assert_eq!(repo.total_pages().unwrap(), 0);
    }
}
