//! `sitemap.xml` generation

use chrono::NaiveDate;
use std::path::Path;

use crate::config::SiteConfig;
use crate::content::{ContentLoader, ContentStore, PageId};
use crate::helpers::{encode_segment, full_url_for};

const DETAIL_PRIORITY: f32 = 0.6;

struct SitemapEntry {
    loc: String,
    priority: f32,
}

/// Build the sitemap: fixed pages, then blog and project detail pages.
/// Blogs without a Markdown file under `content_dir` are left out.
pub fn build_sitemap(
    config: &SiteConfig,
    store: &ContentStore,
    content_dir: &Path,
    lastmod: NaiveDate,
) -> String {
    let loader = ContentLoader::new(store, content_dir);
    let mut entries: Vec<SitemapEntry> = PageId::ALL
        .iter()
        .map(|id| SitemapEntry {
            loc: full_url_for(config, id.path()),
            priority: id.priority(),
        })
        .collect();

    entries.extend(
        store
            .blogs()
            .filter(|post| loader.blog_path(&post.slug).is_file())
            .map(|post| SitemapEntry {
                loc: full_url_for(config, &format!("blog/{}", encode_segment(&post.slug))),
                priority: DETAIL_PRIORITY,
            }),
    );
    entries.extend(store.projects().map(|project| SitemapEntry {
        loc: full_url_for(config, &format!("projects/{}", encode_segment(&project.id))),
        priority: DETAIL_PRIORITY,
    }));

    let lastmod = lastmod.format("%Y-%m-%d").to_string();
    let mut xml = String::new();
    xml.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
    xml.push('\n');
    xml.push_str(r#"<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">"#);
    xml.push('\n');
    for entry in entries {
        xml.push_str("  <url>\n");
        xml.push_str(&format!("    <loc>{}</loc>\n", escape_xml(&entry.loc)));
        xml.push_str(&format!("    <lastmod>{}</lastmod>\n", lastmod));
        xml.push_str("    <changefreq>monthly</changefreq>\n");
        xml.push_str(&format!("    <priority>{:.1}</priority>\n", entry.priority));
        xml.push_str("  </url>\n");
    }
    xml.push_str("</urlset>\n");
    xml
}

/// Escape XML special characters
fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
