//! Built-in site templates using the Tera template engine
//!
//! All templates are embedded directly in the binary.

use anyhow::Result;
use serde::Serialize;
use std::collections::HashMap;
use tera::{Context, Tera};

use crate::config::SiteConfig;
use crate::content::PageId;
use crate::generator::ComposedPage;
use crate::helpers::{escape_attr, favicon_tag, html_escape, meta_generator, open_graph, url_for};

/// Template renderer with the embedded site templates
pub struct TemplateRenderer {
    tera: Tera,
    site: SiteData,
}

impl TemplateRenderer {
    /// Create a new renderer with all templates loaded
    pub fn new(config: &SiteConfig) -> Result<Self> {
        let mut tera = Tera::default();

        // Escaping is explicit (`esc` filter) so URLs keep their slashes
        tera.autoescape_on(vec![]);

        tera.add_raw_templates(vec![
            ("layout.html", include_str!("site/layout.html")),
            ("macros.html", include_str!("site/macros.html")),
            ("home.html", include_str!("site/home.html")),
            ("blog_list.html", include_str!("site/blog_list.html")),
            ("blog_post.html", include_str!("site/blog_post.html")),
            ("projects.html", include_str!("site/projects.html")),
            ("project.html", include_str!("site/project.html")),
            ("skills.html", include_str!("site/skills.html")),
            ("contact.html", include_str!("site/contact.html")),
            ("cv.html", include_str!("site/cv.html")),
            ("404.html", include_str!("site/404.html")),
            // Partials
            ("partials/header.html", include_str!("site/partials/header.html")),
            ("partials/footer.html", include_str!("site/partials/footer.html")),
        ])?;

        let url_config = config.clone();
        tera.register_filter(
            "url_for",
            move |value: &tera::Value, _args: &HashMap<String, tera::Value>| {
                let path = tera::try_get_value!("url_for", "value", String, value);
                Ok(tera::Value::String(url_for(&url_config, &path)))
            },
        );
        tera.register_filter("esc", esc_filter);
        tera.register_filter("attr", attr_filter);
        tera.register_filter("strip_html", strip_html_filter);
        tera.register_filter("truncate_chars", truncate_chars_filter);

        Ok(Self {
            tera,
            site: SiteData::from_config(config),
        })
    }

    /// Render a template with given context
    pub fn render(&self, template_name: &str, context: &Context) -> Result<String> {
        Ok(self.tera.render(template_name, context)?)
    }

    /// Render a composed page through its template and the site layout
    pub fn render_page(&self, config: &SiteConfig, page: &ComposedPage) -> Result<String> {
        let mut context = Context::new();
        context.insert("site", &self.site);
        context.insert("nav", &nav_items(config, &page.meta.path));
        context.insert("page", page);
        context.insert("head", &head_tags(config, page));
        context.insert("json_ld", &json_ld(page)?);
        context.insert("current_year", &chrono::Local::now().format("%Y").to_string());
        self.render(page.template(), &context)
    }
}

/// Site-wide values available to every template as `site`
#[derive(Debug, Clone, Serialize)]
pub struct SiteData {
    pub name: String,
    pub author: String,
    pub username: String,
    pub job_title: String,
    pub description: String,
    pub keywords: String,
    pub url: String,
    pub logo: String,
    pub og_image: String,
    pub github: String,
    pub twitter: String,
    pub linkedin: String,
}

impl SiteData {
    fn from_config(config: &SiteConfig) -> Self {
        Self {
            name: config.name.clone(),
            author: config.author.clone(),
            username: config.username.clone(),
            job_title: config.job_title.clone(),
            description: config.description.clone(),
            keywords: config.keyword_list(),
            url: config.url.clone(),
            logo: url_for(config, &config.logo),
            og_image: url_for(config, &config.og_image),
            github: config.links.github.clone(),
            twitter: config.links.twitter.clone(),
            linkedin: config.links.linkedin.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MenuItem {
    pub name: &'static str,
    pub path: String,
    pub active: bool,
}

fn nav_items(config: &SiteConfig, current: &str) -> Vec<MenuItem> {
    [
        ("Home", PageId::Home),
        ("Skills", PageId::Skills),
        ("Projects", PageId::Projects),
        ("Blog", PageId::Blog),
        ("Contact", PageId::Contact),
        ("CV", PageId::Cv),
    ]
    .into_iter()
    .map(|(name, id)| {
        let path = url_for(config, id.path());
        let active = if id == PageId::Home {
            current == path
        } else {
            current == path || current.starts_with(&format!("{}/", path))
        };
        MenuItem { name, path, active }
    })
    .collect()
}

fn head_tags(config: &SiteConfig, page: &ComposedPage) -> String {
    [
        open_graph(
            config,
            &page.meta.title,
            &page.meta.description,
            &page.meta.canonical_url,
        ),
        favicon_tag(config),
        meta_generator(),
    ]
    .join("\n")
}

/// Serialize JSON-LD documents so they are safe inside `<script>`
fn json_ld(page: &ComposedPage) -> Result<Vec<String>> {
    page.structured_data
        .iter()
        .map(|doc| Ok(serde_json::to_string(doc)?.replace("</", "<\\/")))
        .collect()
}

/// Tera filter: escape HTML special characters
fn esc_filter(
    value: &tera::Value,
    _args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let s = tera::try_get_value!("esc", "value", String, value);
    Ok(tera::Value::String(html_escape(&s)))
}

/// Tera filter: escape a value placed inside a double-quoted attribute
fn attr_filter(
    value: &tera::Value,
    _args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let s = tera::try_get_value!("attr", "value", String, value);
    Ok(tera::Value::String(escape_attr(&s)))
}

/// Tera filter: strip HTML tags
fn strip_html_filter(
    value: &tera::Value,
    _args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let s = tera::try_get_value!("strip_html", "value", String, value);
    Ok(tera::Value::String(crate::helpers::strip_html(&s)))
}

/// Tera filter: truncate by character count
fn truncate_chars_filter(
    value: &tera::Value,
    args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let s = tera::try_get_value!("truncate_chars", "value", String, value);
    let length = match args.get("length") {
        Some(val) => tera::try_get_value!("truncate_chars", "length", usize, val),
        None => 150,
    };
    let omission = match args.get("omission") {
        Some(val) => tera::try_get_value!("truncate_chars", "omission", String, val),
        None => "...".to_string(),
    };
    Ok(tera::Value::String(crate::helpers::truncate(
        &s,
        length,
        Some(&omission),
    )))
}
