//! Create a new blog post

use anyhow::Result;
use std::path::PathBuf;

use crate::content::{BlogPost, ContentLoader, ContentWriter};
use crate::Folio;

/// Create a new blog post record and its Markdown file
pub fn create_post(folio: &Folio, title: &str, slug: Option<&str>) -> Result<PathBuf> {
    let slug = match slug {
        Some(s) => s.to_string(),
        None => slug::slugify(title),
    };

    if folio.store.blog(&slug).is_some() {
        anyhow::bail!("Blog post already exists: {}", slug);
    }

    let date = chrono::Local::now().format("%d/%m/%Y").to_string();
    let post = BlogPost::new(&slug, title, "", &date);
    let body = format!("# {}\n\n", title);

    folio.writer().write_blog(&post, &body)?;

    let path = ContentLoader::new(&folio.store, &folio.content_dir).blog_path(&slug);
    println!("Created: {:?}", path);

    Ok(path)
}
