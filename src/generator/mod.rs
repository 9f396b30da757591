//! Generator module - writes the site as static HTML files

mod compose;
mod sitemap;

pub use compose::{ComposedPage, PageComposer, PageContent, PageMetadata};
pub use sitemap::build_sitemap;

use anyhow::Result;
use std::fs;
use std::path::Path;

use walkdir::WalkDir;

use crate::content::MarkdownRenderer;
use crate::helpers::encode_segment;
use crate::templates::TemplateRenderer;
use crate::Folio;

/// Static site generator
pub struct Generator {
    folio: Folio,
    markdown: MarkdownRenderer,
    renderer: TemplateRenderer,
}

impl Generator {
    /// Create a new generator
    pub fn new(folio: &Folio) -> Result<Self> {
        Ok(Self {
            folio: folio.clone(),
            markdown: MarkdownRenderer::from_config(&folio.config.highlight),
            renderer: TemplateRenderer::new(&folio.config)?,
        })
    }

    fn composer(&self) -> PageComposer<'_> {
        PageComposer::new(
            &self.folio.config,
            &self.folio.store,
            &self.folio.content_dir,
            &self.markdown,
        )
    }

    /// Generate the entire site, returning the number of pages written
    pub fn generate(&self) -> Result<usize> {
        fs::create_dir_all(&self.folio.public_dir)?;

        // Static assets first so generated pages win on conflicts
        self.copy_static_assets()?;

        let composer = self.composer();
        let mut written = 0;

        for (path, page) in [
            ("", composer.home()),
            ("blog", composer.blog_list()),
            ("projects", composer.projects()),
            ("skills", composer.skills()),
            ("contact", composer.contact()),
            ("cv", composer.cv()),
        ] {
            self.write_page(&Path::new(path).join("index.html"), &page)?;
            written += 1;
        }

        for post in self.folio.store.blogs() {
            let page = composer.blog_post(&post.slug);
            if page.is_not_found() {
                tracing::warn!("Skipping blog {:?}: no content", post.slug);
                continue;
            }
            let path = Path::new("blog")
                .join(encode_segment(&post.slug))
                .join("index.html");
            self.write_page(&path, &page)?;
            written += 1;
        }

        for project in self.folio.store.projects() {
            match composer.project(&project.id) {
                Ok(page) => {
                    let path = Path::new("projects")
                        .join(encode_segment(&project.id))
                        .join("index.html");
                    self.write_page(&path, &page)?;
                    written += 1;
                }
                Err(e) => tracing::warn!("Skipping project: {}", e),
            }
        }

        self.write_page(Path::new("404.html"), &composer.not_found())?;
        written += 1;

        let today = chrono::Local::now().date_naive();
        let sitemap = build_sitemap(
            &self.folio.config,
            &self.folio.store,
            &self.folio.content_dir,
            today,
        );
        fs::write(self.folio.public_dir.join("sitemap.xml"), sitemap)?;

        Ok(written)
    }

    fn write_page(&self, relative: &Path, page: &ComposedPage) -> Result<()> {
        let html = self.renderer.render_page(&self.folio.config, page)?;

        let output_path = self.folio.public_dir.join(relative);
        if let Some(parent) = output_path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| anyhow::anyhow!("Failed to create dir {:?}: {}", parent, e))?;
        }
        fs::write(&output_path, &html)
            .map_err(|e| anyhow::anyhow!("Failed to write {:?}: {}", output_path, e))?;
        tracing::debug!("Generated page: {:?}", output_path);
        Ok(())
    }

    /// Copy the static directory (images, CV, favicon) to the public directory
    fn copy_static_assets(&self) -> Result<()> {
        let static_dir = &self.folio.static_dir;
        if !static_dir.exists() {
            return Ok(());
        }

        for entry in WalkDir::new(static_dir).follow_links(true) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::warn!("Skipping static asset: {}", e);
                    continue;
                }
            };
            let path = entry.path();
            if !path.is_file() {
                continue;
            }

            let relative = path.strip_prefix(static_dir)?;
            let dest = self.folio.public_dir.join(relative);
            if let Some(parent) = dest.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(path, &dest)?;
        }

        Ok(())
    }
}
