//! HTML helper functions

use super::url::{full_url_for, url_for};
use crate::config::SiteConfig;

/// Generate an anchor tag; external links open in a new tab
///
/// # Examples
/// ```ignore
/// link_to(&config, "/cv", "CV") // -> <a href="/cv">CV</a>
/// ```
pub fn link_to(config: &SiteConfig, path: &str, text: &str) -> String {
    let href = url_for(config, path);
    if super::url::is_external(path) {
        format!(
            r#"<a href="{}" target="_blank" rel="noopener noreferrer">{}</a>"#,
            html_escape(&href),
            html_escape(text)
        )
    } else {
        format!(r#"<a href="{}">{}</a>"#, html_escape(&href), html_escape(text))
    }
}

/// Generate a favicon link tag
pub fn favicon_tag(config: &SiteConfig) -> String {
    format!(
        r#"<link rel="icon" href="{}">"#,
        html_escape(&url_for(config, &config.icon))
    )
}

/// Generate Open Graph and Twitter card meta tags
pub fn open_graph(config: &SiteConfig, title: &str, description: &str, url: &str) -> String {
    let mut tags = vec![
        r#"<meta property="og:type" content="website">"#.to_string(),
        format!(
            r#"<meta property="og:title" content="{}">"#,
            html_escape(title)
        ),
        format!(r#"<meta property="og:url" content="{}">"#, html_escape(url)),
        format!(
            r#"<meta property="og:site_name" content="{}">"#,
            html_escape(&config.name)
        ),
        r#"<meta name="twitter:card" content="summary_large_image">"#.to_string(),
        format!(
            r#"<meta name="twitter:title" content="{}">"#,
            html_escape(title)
        ),
    ];

    if !description.is_empty() {
        tags.push(format!(
            r#"<meta property="og:description" content="{}">"#,
            html_escape(description)
        ));
        tags.push(format!(
            r#"<meta name="twitter:description" content="{}">"#,
            html_escape(description)
        ));
    }

    if !config.og_image.is_empty() {
        let image = html_escape(&full_url_for(config, &config.og_image));
        tags.push(format!(r#"<meta property="og:image" content="{}">"#, image));
        tags.push(format!(r#"<meta name="twitter:image" content="{}">"#, image));
    }

    tags.join("\n")
}

/// Generate meta generator tag
pub fn meta_generator() -> String {
    format!(
        r#"<meta name="generator" content="folio-rs {}">"#,
        env!("CARGO_PKG_VERSION")
    )
}

/// Escape HTML special characters
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Escape a value for a double-quoted attribute. URLs keep `/`, `'` and `>`.
pub fn escape_attr(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
}

/// Strip HTML tags from a string
pub fn strip_html(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut in_tag = false;

    for c in s.chars() {
        match c {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => result.push(c),
            _ => {}
        }
    }

    result
}

/// Truncate a string to a specified length
pub fn truncate(s: &str, length: usize, omission: Option<&str>) -> String {
    let omission = omission.unwrap_or("...");

    if s.chars().count() <= length {
        s.to_string()
    } else {
        let truncated: String = s
            .chars()
            .take(length.saturating_sub(omission.chars().count()))
            .collect();
        format!("{}{}", truncated.trim_end(), omission)
    }
}
