//! Site configuration (vellum.yml)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::Path;

/// Environment variable overriding the store file name.
pub const DB_NAME_ENV: &str = "VELLUM_DB_NAME";

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub subtitle: String,
    pub description: String,
    pub author: String,

    // Directories (relative to the base directory)
    pub posts_dir: String,
    pub static_dir: String,

    // Store
    pub db_name: String,
    pub memory_db: bool,

    // Form validation
    pub limits: FormLimits,
}

/// Maximum accepted lengths for submitted form fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FormLimits {
    pub name: usize,
    pub email: usize,
    pub message: usize,
}

impl Default for FormLimits {
    fn default() -> Self {
        Self {
            name: 100,
            email: 254,
            message: 1000,
        }
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Vellum".to_string(),
            subtitle: String::new(),
            description: String::new(),
            author: String::new(),

            posts_dir: "posts".to_string(),
            static_dir: "static".to_string(),

            db_name: env::var(DB_NAME_ENV).unwrap_or_else(|_| "vellum-db.json".to_string()),
            memory_db: false,

            limits: FormLimits::default(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }
}
