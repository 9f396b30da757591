//! folio-rs: a personal portfolio site served from a content store
//!
//! Pages are composed from structured records (`_content.yml` or the built-in
//! set) and Markdown blog files, rendered with embedded Tera templates, and
//! either served over HTTP or written out as static files.

pub mod commands;
pub mod config;
pub mod content;
pub mod generator;
pub mod helpers;
pub mod relay;
pub mod server;
pub mod templates;

use anyhow::Result;
use std::path::{Path, PathBuf};

use content::{ContentStore, FsContentWriter};

/// The main portfolio application
#[derive(Debug, Clone)]
pub struct Folio {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Content records
    pub store: ContentStore,
    /// Base directory
    pub base_dir: PathBuf,
    /// Content directory (holds `blogs/`)
    pub content_dir: PathBuf,
    /// Public (output) directory
    pub public_dir: PathBuf,
    /// Static asset directory
    pub static_dir: PathBuf,
}

impl Folio {
    /// Create a new instance from a directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("_config.yml");

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };

        let store = ContentStore::load(base_dir.join(content::store::STORE_FILE))?;

        let content_dir = base_dir.join(&config.content_dir);
        let public_dir = base_dir.join(&config.public_dir);
        let static_dir = base_dir.join(&config.static_dir);

        Ok(Self {
            config,
            store,
            base_dir,
            content_dir,
            public_dir,
            static_dir,
        })
    }

    /// Path of the content store file
    pub fn store_path(&self) -> PathBuf {
        self.base_dir.join(content::store::STORE_FILE)
    }

    /// Writer that persists new blog posts into this site
    pub fn writer(&self) -> FsContentWriter {
        FsContentWriter::new(&self.content_dir, self.store_path())
    }

    /// Generate the static site
    pub fn generate(&self) -> Result<()> {
        commands::generate::run(self)
    }

    /// Clean the public directory
    pub fn clean(&self) -> Result<()> {
        commands::clean::run(self)
    }

    /// Create a new blog post
    pub fn new_post(&self, title: &str, slug: Option<&str>) -> Result<PathBuf> {
        commands::new::create_post(self, title, slug)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_without_files() {
        let dir = TempDir::new().unwrap();
        let folio = Folio::new(dir.path()).unwrap();

        assert_eq!(folio.content_dir, dir.path().join("content"));
        assert_eq!(folio.public_dir, dir.path().join("public"));
        assert_eq!(folio.static_dir, dir.path().join("static"));
        assert!(folio.store.blog("autogen-building-future").is_some());
    }

    #[test]
    fn test_loads_config_dirs() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("_config.yml"),
            "name: Test Site\npublic_dir: dist\n",
        )
        .unwrap();

        let folio = Folio::new(dir.path()).unwrap();
        assert_eq!(folio.config.name, "Test Site");
        assert_eq!(folio.public_dir, dir.path().join("dist"));
        assert_eq!(folio.store_path(), dir.path().join("_content.yml"));
    }

    #[test]
    fn test_invalid_store_is_an_error() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("_content.yml"), "version: 99\n").unwrap();
        assert!(Folio::new(dir.path()).is_err());
    }
}
