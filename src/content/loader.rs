//! Content loader - resolves blog slugs to records and their Markdown bodies
//!
//! Every call goes back to disk, so edits to a post show up on the next
//! request without a restart.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

use super::frontmatter::FrontMatter;
use super::records::BlogPost;
use super::store::ContentStore;

/// Directory under the content dir holding one Markdown file per blog slug
pub const BLOGS_DIR: &str = "blogs";

/// Why a lookup came back empty
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotFoundCause {
    /// No record with that identifier
    UnknownRecord,
    /// The record exists but its Markdown file is missing or unreadable
    MissingContent,
}

impl fmt::Display for NotFoundCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NotFoundCause::UnknownRecord => write!(f, "unknown record"),
            NotFoundCause::MissingContent => write!(f, "missing content"),
        }
    }
}

#[derive(Debug, Clone, Error)]
#[error("{slug:?} not found: {cause}")]
pub struct NotFound {
    pub slug: String,
    pub cause: NotFoundCause,
}

impl NotFound {
    fn new(slug: &str, cause: NotFoundCause) -> Self {
        Self {
            slug: slug.to_string(),
            cause,
        }
    }
}

/// A blog record together with its Markdown body (front-matter removed)
#[derive(Debug, Clone)]
pub struct LoadedBlog<'a> {
    pub post: &'a BlogPost,
    pub front_matter: FrontMatter,
    pub markdown: String,
}

/// An identifier is usable as a file stem: non-empty, no separators, no `..`
pub fn is_safe_identifier(id: &str) -> bool {
    !id.is_empty()
        && !id.contains(['/', '\\', '\0'])
        && !id.contains("..")
        && !id.starts_with('.')
}

/// Loads blog content from `<content_dir>/blogs`
pub struct ContentLoader<'a> {
    store: &'a ContentStore,
    blogs_dir: PathBuf,
}

impl<'a> ContentLoader<'a> {
    pub fn new(store: &'a ContentStore, content_dir: &Path) -> Self {
        Self {
            store,
            blogs_dir: content_dir.join(BLOGS_DIR),
        }
    }

    /// Path of the Markdown file backing `slug`
    pub fn blog_path(&self, slug: &str) -> PathBuf {
        self.blogs_dir.join(format!("{}.md", slug))
    }

    /// Resolve the record for `slug` without touching the filesystem
    pub fn resolve(&self, slug: &str) -> Result<&'a BlogPost, NotFound> {
        if !is_safe_identifier(slug) {
            tracing::debug!("Rejected unsafe blog identifier {:?}", slug);
            return Err(NotFound::new(slug, NotFoundCause::UnknownRecord));
        }
        self.store
            .blog(slug)
            .ok_or_else(|| NotFound::new(slug, NotFoundCause::UnknownRecord))
    }

    /// Load a blog post and its Markdown body
    pub fn load_blog(&self, slug: &str) -> Result<LoadedBlog<'a>, NotFound> {
        let post = self.resolve(slug)?;
        let path = self.blog_path(slug);
        let content = fs::read_to_string(&path);
        self.finish(post, &path, content)
    }

    /// Async variant of [`load_blog`](Self::load_blog) for request handlers
    pub async fn load_blog_async(&self, slug: &str) -> Result<LoadedBlog<'a>, NotFound> {
        let post = self.resolve(slug)?;
        let path = self.blog_path(slug);
        let content = tokio::fs::read_to_string(&path).await;
        self.finish(post, &path, content)
    }

    fn finish(
        &self,
        post: &'a BlogPost,
        path: &Path,
        content: io::Result<String>,
    ) -> Result<LoadedBlog<'a>, NotFound> {
        match content {
            Ok(content) => {
                let (front_matter, body) = FrontMatter::parse(&content);
                let markdown = body.to_string();
                Ok(LoadedBlog {
                    post,
                    front_matter,
                    markdown,
                })
            }
            Err(e) => {
                tracing::warn!("Failed to read blog content {:?}: {}", path, e);
                Err(NotFound::new(&post.slug, NotFoundCause::MissingContent))
            }
        }
    }
}
