//! Content writer - the write path used by editing tools
//!
//! A write stores the Markdown body under `<content_dir>/blogs/<slug>.md`
//! and upserts the record into `_content.yml`.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

use super::frontmatter::FrontMatter;
use super::loader::{is_safe_identifier, BLOGS_DIR};
use super::records::BlogPost;
use super::store::ContentStore;
use crate::config::ConfigError;

#[derive(Debug, Error)]
pub enum WriteError {
    #[error("invalid slug {0:?}")]
    InvalidSlug(String),

    #[error("failed to write {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Store(#[from] ConfigError),

    #[error("failed to serialize content: {0}")]
    Serialize(#[from] serde_yaml::Error),
}

/// Whether a write created a new post or replaced an existing one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    Created,
    Updated,
}

/// Write interface for blog content
pub trait ContentWriter {
    fn write_blog(&self, post: &BlogPost, body: &str) -> Result<WriteOutcome, WriteError>;
}

/// Writes content to the site directory on disk
pub struct FsContentWriter {
    content_dir: PathBuf,
    store_path: PathBuf,
}

impl FsContentWriter {
    pub fn new(content_dir: impl Into<PathBuf>, store_path: impl Into<PathBuf>) -> Self {
        Self {
            content_dir: content_dir.into(),
            store_path: store_path.into(),
        }
    }

    fn write_file(path: &Path, contents: &str) -> Result<(), WriteError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| WriteError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        fs::write(path, contents).map_err(|source| WriteError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}

impl ContentWriter for FsContentWriter {
    fn write_blog(&self, post: &BlogPost, body: &str) -> Result<WriteOutcome, WriteError> {
        if !is_safe_identifier(&post.slug) {
            return Err(WriteError::InvalidSlug(post.slug.clone()));
        }

        let mut store = ContentStore::load(&self.store_path)?;
        let outcome = if store.blog(&post.slug).is_some() {
            WriteOutcome::Updated
        } else {
            WriteOutcome::Created
        };

        let header = FrontMatter {
            title: Some(post.title.clone()),
            date: Some(post.date.clone()),
            description: Some(post.description.clone()).filter(|d| !d.is_empty()),
            tags: post.tags.clone(),
        }
        .to_header()?;

        let md_path = self
            .content_dir
            .join(BLOGS_DIR)
            .join(format!("{}.md", post.slug));
        Self::write_file(&md_path, &format!("{}{}", header, body))?;

        store.upsert_blog(post.clone());
        Self::write_file(&self.store_path, &store.to_yaml()?)?;

        tracing::info!("{:?} blog post {:?}", outcome, post.slug);
        Ok(outcome)
    }
}
