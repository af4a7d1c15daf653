//! vellum: a small personal blog server
//!
//! Posts live as flat markdown files with a fixed header block; comments
//! and contact form submissions go into an embedded JSON document store.
//! Everything is re-read from disk on demand, so there is no cache to
//! invalidate and no deploy step beyond copying files.

pub mod config;
pub mod content;
pub mod server;
pub mod store;
pub mod templates;

use anyhow::Result;
use std::path::{Path, PathBuf};

use config::SiteConfig;
use content::PostRepository;

/// The main blog application handle
#[derive(Clone)]
pub struct Blog {
    /// Site configuration
    pub config: SiteConfig,
    /// Base directory
    pub base_dir: PathBuf,
    /// Directory holding flat-file post sources
    pub posts_dir: PathBuf,
    /// Directory served under /static
    pub static_dir: PathBuf,
}

impl Blog {
    /// Create a blog handle from a directory, loading `vellum.yml` when
    /// present.
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref();
        let config_path = base_dir.join("vellum.yml");

        let config = if config_path.exists() {
            SiteConfig::load(&config_path)?
        } else {
            SiteConfig::default()
        };

        Ok(Self::with_config(base_dir, config))
    }

    /// Create a blog handle with an explicit configuration.
    pub fn with_config<P: AsRef<Path>>(base_dir: P, config: SiteConfig) -> Self {
        let base_dir = base_dir.as_ref().to_path_buf();
        let posts_dir = base_dir.join(&config.posts_dir);
        let static_dir = base_dir.join(&config.static_dir);

        Self {
            config,
            base_dir,
            posts_dir,
            static_dir,
        }
    }

    /// A fresh repository over the posts directory.
    pub fn repository(&self) -> PostRepository {
        PostRepository::new(&self.posts_dir)
    }

    /// Location of the document store file.
    pub fn db_path(&self) -> PathBuf {
        self.base_dir.join(&self.config.db_name)
    }
}
