//! Markdown rendering with per-element display rules and syntax highlighting

use lazy_static::lazy_static;
use pulldown_cmark::{
    html, CodeBlockKind, CowStr, Event, HeadingLevel, Options, Parser, Tag, TagEnd,
};
use regex::Regex;
use serde::Serialize;
use syntect::highlighting::ThemeSet;
use syntect::html::highlighted_html_for_string;
use syntect::parsing::SyntaxSet;

use super::image::ImagePresentation;
use crate::config::HighlightConfig;
use crate::helpers::html_escape;

lazy_static! {
    /// `<div class="clearfix"></div>` in any quoting/spacing, or self-closed
    static ref CLEARFIX_RE: Regex =
        Regex::new(r#"(?is)<div\s+class\s*=\s*["']clearfix["']\s*(?:/>|>\s*</div\s*>)"#)
            .expect("valid clearfix regex");
}

const CLEARFIX_SPACER: &str = r#"<div class="clear-both h-0"></div>"#;

/// CSS classes applied to each element type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayRules {
    pub h1: String,
    pub h2: String,
    pub h3: String,
    pub paragraph: String,
    pub unordered_list: String,
    pub ordered_list: String,
    pub list_item: String,
    pub strong: String,
    pub emphasis: String,
    pub inline_code: String,
    pub code_block: String,
    pub blockquote: String,
}

impl Default for DisplayRules {
    fn default() -> Self {
        Self {
            h1: "text-3xl font-bold mb-4 mt-8 text-foreground clear-both".to_string(),
            h2: "text-2xl font-semibold mb-3 mt-6 text-foreground clear-both".to_string(),
            h3: "text-xl font-medium mb-2 mt-4 text-foreground clear-both".to_string(),
            paragraph: "mb-4 leading-relaxed text-foreground".to_string(),
            unordered_list: "list-disc list-inside mb-4 space-y-1 ml-4".to_string(),
            ordered_list: "list-decimal list-inside mb-4 space-y-1 ml-4".to_string(),
            list_item: "text-foreground".to_string(),
            strong: "font-semibold text-foreground".to_string(),
            emphasis: "italic text-foreground".to_string(),
            inline_code: "bg-muted px-1 py-0.5 rounded text-sm".to_string(),
            code_block: "bg-muted p-4 rounded-lg overflow-x-auto mb-4 clear-both".to_string(),
            blockquote: "border-l-4 border-muted-foreground pl-4 italic my-4 clear-both"
                .to_string(),
        }
    }
}

impl DisplayRules {
    fn heading(&self, level: HeadingLevel) -> Option<&str> {
        match level {
            HeadingLevel::H1 => Some(&self.h1),
            HeadingLevel::H2 => Some(&self.h2),
            HeadingLevel::H3 => Some(&self.h3),
            _ => None,
        }
    }
}

/// Output of a render: the HTML body plus what was decoded along the way
#[derive(Debug, Clone, Default, Serialize)]
pub struct RenderedDocument {
    pub html: String,
    pub images: Vec<ImagePresentation>,
}

/// Markdown renderer with syntax highlighting
pub struct MarkdownRenderer {
    syntax_set: SyntaxSet,
    theme_set: ThemeSet,
    theme_name: String,
    highlight: bool,
    line_numbers: bool,
    rules: DisplayRules,
}

impl MarkdownRenderer {
    /// Create a new markdown renderer
    pub fn new() -> Self {
        Self::from_config(&HighlightConfig::default())
    }

    /// Create with custom highlight settings
    pub fn from_config(config: &HighlightConfig) -> Self {
        Self {
            syntax_set: SyntaxSet::load_defaults_newlines(),
            theme_set: ThemeSet::load_defaults(),
            theme_name: config.theme.clone(),
            highlight: config.enable,
            line_numbers: config.line_number,
            rules: DisplayRules::default(),
        }
    }

    /// Replace the display rules
    pub fn with_rules(mut self, rules: DisplayRules) -> Self {
        self.rules = rules;
        self
    }

    pub fn rules(&self) -> &DisplayRules {
        &self.rules
    }

    /// Render markdown to HTML
    pub fn render(&self, markdown: &str) -> RenderedDocument {
        let options = Options::ENABLE_TABLES
            | Options::ENABLE_FOOTNOTES
            | Options::ENABLE_STRIKETHROUGH
            | Options::ENABLE_TASKLISTS
            | Options::ENABLE_HEADING_ATTRIBUTES
            | Options::ENABLE_GFM;
        let events: Vec<Event> = Parser::new_ext(markdown, options).collect();

        let mut out: Vec<Event> = Vec::with_capacity(events.len());
        let mut images = Vec::new();
        // (language, accumulated source) while inside a code block
        let mut code_block: Option<(Option<String>, String)> = None;
        let mut i = 0;

        while i < events.len() {
            let event = &events[i];

            if let Some((_, source)) = code_block.as_mut() {
                match event {
                    Event::Text(text) => source.push_str(text),
                    Event::End(TagEnd::CodeBlock) => {
                        if let Some((lang, source)) = code_block.take() {
                            let html = self.render_code_block(&source, lang.as_deref());
                            out.push(Event::Html(CowStr::from(html)));
                        }
                    }
                    _ => {}
                }
                i += 1;
                continue;
            }

            match event {
                Event::Start(Tag::Heading { level, id, .. }) => {
                    match self.rules.heading(*level) {
                        Some(class) => {
                            let id_attr = id
                                .as_ref()
                                .map(|id| format!(r#" id="{}""#, html_escape(id)))
                                .unwrap_or_default();
                            out.push(html_event(format!(
                                r#"<h{}{} class="{}">"#,
                                heading_number(*level),
                                id_attr,
                                class
                            )));
                        }
                        None => out.push(event.clone()),
                    }
                }
                Event::End(TagEnd::Heading(level)) => match self.rules.heading(*level) {
                    Some(_) => out.push(html_event(format!("</h{}>", heading_number(*level)))),
                    None => out.push(event.clone()),
                },

                Event::Start(Tag::Paragraph) => {
                    out.push(html_event(open_tag("p", &self.rules.paragraph)));
                }
                Event::End(TagEnd::Paragraph) => out.push(html_event("</p>\n".to_string())),

                Event::Start(Tag::List(None)) => {
                    out.push(html_event(open_tag("ul", &self.rules.unordered_list)));
                }
                Event::Start(Tag::List(Some(start))) => {
                    let start_attr = if *start == 1 {
                        String::new()
                    } else {
                        format!(r#" start="{}""#, start)
                    };
                    out.push(html_event(format!(
                        r#"<ol class="{}"{}>"#,
                        self.rules.ordered_list, start_attr
                    )));
                }
                Event::End(TagEnd::List(ordered)) => {
                    let tag = if *ordered { "</ol>\n" } else { "</ul>\n" };
                    out.push(html_event(tag.to_string()));
                }
                Event::Start(Tag::Item) => {
                    out.push(html_event(open_tag("li", &self.rules.list_item)));
                }
                Event::End(TagEnd::Item) => out.push(html_event("</li>\n".to_string())),

                Event::Start(Tag::Strong) => {
                    out.push(html_event(open_tag("strong", &self.rules.strong)));
                }
                Event::End(TagEnd::Strong) => out.push(html_event("</strong>".to_string())),
                Event::Start(Tag::Emphasis) => {
                    out.push(html_event(open_tag("em", &self.rules.emphasis)));
                }
                Event::End(TagEnd::Emphasis) => out.push(html_event("</em>".to_string())),

                Event::Start(Tag::BlockQuote { .. }) => {
                    out.push(html_event(open_tag("blockquote", &self.rules.blockquote)));
                }
                Event::End(TagEnd::BlockQuote { .. }) => {
                    out.push(html_event("</blockquote>\n".to_string()));
                }

                Event::Code(code) => {
                    out.push(html_event(format!(
                        r#"<code class="{}">{}</code>"#,
                        self.rules.inline_code,
                        html_escape(code)
                    )));
                }
                Event::Start(Tag::CodeBlock(kind)) => {
                    let lang = match kind {
                        CodeBlockKind::Fenced(lang) => {
                            // Only the first word names the language: ```rust,ignore
                            let lang = lang.split([' ', ',']).next().unwrap_or("").trim();
                            if lang.is_empty() {
                                None
                            } else {
                                Some(lang.to_string())
                            }
                        }
                        CodeBlockKind::Indented => None,
                    };
                    code_block = Some((lang, String::new()));
                }

                Event::Start(Tag::Image {
                    dest_url, title, ..
                }) => {
                    let end = find_image_end(&events, i);
                    let alt = plain_text(&events[i + 1..end]);
                    if dest_url.is_empty() {
                        tracing::debug!("Dropping image without a source (alt: {:?})", alt);
                    } else {
                        let presentation = ImagePresentation::from_title(Some(title.as_ref()));
                        out.push(html_event(presentation.render(dest_url, &alt)));
                        images.push(presentation);
                    }
                    i = end + 1;
                    continue;
                }

                Event::Html(_) | Event::InlineHtml(_) => {
                    let (raw, next) = collect_raw_html(&events, i);
                    let rewritten = CLEARFIX_RE.replace_all(&raw, CLEARFIX_SPACER).into_owned();
                    if matches!(event, Event::Html(_)) {
                        out.push(Event::Html(CowStr::from(rewritten)));
                    } else {
                        out.push(Event::InlineHtml(CowStr::from(rewritten)));
                    }
                    i = next;
                    continue;
                }

                _ => out.push(event.clone()),
            }

            i += 1;
        }

        let mut html_output = String::new();
        html::push_html(&mut html_output, out.into_iter());

        RenderedDocument {
            html: html_output,
            images,
        }
    }

    /// Render a fenced or indented code block
    fn render_code_block(&self, code: &str, lang: Option<&str>) -> String {
        if self.highlight {
            if let Some(highlighted) = lang.and_then(|lang| self.highlight_code(code, lang)) {
                return highlighted;
            }
        }

        let lang_class = lang
            .map(|lang| format!(r#" class="language-{}""#, html_escape(lang)))
            .unwrap_or_default();
        format!(
            "<pre class=\"{}\"><code{}>{}</code></pre>\n",
            self.rules.code_block,
            lang_class,
            html_escape(code)
        )
    }

    /// Highlight a code block; `None` when the language is unknown
    fn highlight_code(&self, code: &str, lang: &str) -> Option<String> {
        let syntax = self
            .syntax_set
            .find_syntax_by_token(lang)
            .or_else(|| self.syntax_set.find_syntax_by_extension(lang))?;

        let theme = self
            .theme_set
            .themes
            .get(&self.theme_name)
            .or_else(|| self.theme_set.themes.values().next())?;

        match highlighted_html_for_string(code, &self.syntax_set, syntax, theme) {
            Ok(highlighted) => {
                let highlighted = highlighted.replacen(
                    "<pre ",
                    &format!(r#"<pre class="{}" "#, self.rules.code_block),
                    1,
                );
                if self.line_numbers {
                    Some(self.add_line_numbers(&highlighted, lang))
                } else {
                    Some(highlighted)
                }
            }
            Err(e) => {
                tracing::debug!("Highlighting {} failed: {}", lang, e);
                None
            }
        }
    }

    /// Add line numbers to highlighted code
    fn add_line_numbers(&self, code: &str, lang: &str) -> String {
        let line_count = code.trim_end().lines().count().saturating_sub(1).max(1);
        let gutter: Vec<String> = (1..=line_count)
            .map(|n| format!(r#"<span class="line-number">{}</span>"#, n))
            .collect();

        format!(
            r#"<figure class="highlight {}"><table><tr><td class="gutter"><pre>{}</pre></td><td class="code">{}</td></tr></table></figure>"#,
            html_escape(lang),
            gutter.join("\n"),
            code
        )
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

fn html_event(html: String) -> Event<'static> {
    Event::Html(CowStr::from(html))
}

fn open_tag(tag: &str, class: &str) -> String {
    if class.is_empty() {
        format!("<{}>", tag)
    } else {
        format!(r#"<{} class="{}">"#, tag, class)
    }
}

fn heading_number(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

/// Index of the `End(Image)` matching the image opened at `start`
fn find_image_end(events: &[Event], start: usize) -> usize {
    let mut depth = 0;
    for (offset, event) in events[start..].iter().enumerate() {
        match event {
            Event::Start(Tag::Image { .. }) => depth += 1,
            Event::End(TagEnd::Image) => {
                depth -= 1;
                if depth == 0 {
                    return start + offset;
                }
            }
            _ => {}
        }
    }
    events.len() - 1
}

fn plain_text(events: &[Event]) -> String {
    let mut text = String::new();
    for event in events {
        match event {
            Event::Text(t) | Event::Code(t) => text.push_str(t),
            Event::SoftBreak | Event::HardBreak => text.push(' '),
            _ => {}
        }
    }
    text
}

/// Join a run of raw HTML events of the same kind; pulldown-cmark splits
/// HTML blocks per line and inline HTML per tag.
fn collect_raw_html(events: &[Event], start: usize) -> (String, usize) {
    let block = matches!(events[start], Event::Html(_));
    let mut raw = String::new();
    let mut i = start;
    while i < events.len() {
        match (&events[i], block) {
            (Event::Html(html), true) | (Event::InlineHtml(html), false) => raw.push_str(html),
            _ => break,
        }
        i += 1;
    }
    (raw, i)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::image::{ImageAlign, ImageSize};

    fn render(markdown: &str) -> RenderedDocument {
        MarkdownRenderer::new().render(markdown)
    }

    #[test]
    fn test_render_basic_markdown() {
        let doc = render("# Hello World\n\nThis is a test.");
        assert!(doc
            .html
            .contains(r#"<h1 class="text-3xl font-bold mb-4 mt-8 text-foreground clear-both">Hello World</h1>"#));
        assert!(doc
            .html
            .contains(r#"<p class="mb-4 leading-relaxed text-foreground">This is a test.</p>"#));
    }

    #[test]
    fn test_deep_headings_are_plain() {
        let doc = render("#### Deep");
        assert!(doc.html.contains("<h4>Deep</h4>"));
    }

    #[test]
    fn test_lists_and_inline_styles() {
        let doc = render("- **bold** and *em*\n- `code`\n\n3. three\n4. four\n");
        assert!(doc.html.contains(r#"<ul class="list-disc"#));
        assert!(doc.html.contains(r#"<li class="text-foreground">"#));
        assert!(doc
            .html
            .contains(r#"<strong class="font-semibold text-foreground">bold</strong>"#));
        assert!(doc.html.contains(r#"<em class="italic text-foreground">em</em>"#));
        assert!(doc.html.contains(r#"<code class="bg-muted px-1 py-0.5 rounded text-sm">code</code>"#));
        assert!(doc.html.contains(r#"start="3""#));
        assert!(doc.html.contains("</ol>"));
    }

    #[test]
    fn test_blockquote() {
        let doc = render("> quoted");
        assert!(doc.html.contains(r#"<blockquote class="border-l-4"#));
        assert!(doc.html.contains("</blockquote>"));
    }

    #[test]
    fn test_render_code_block() {
        let doc = render("```rust\nfn main() {}\n```");
        assert!(doc.html.contains("clear-both"));
        assert!(doc.html.contains("<pre"));
        assert!(doc.html.contains("main"));
    }

    #[test]
    fn test_unknown_language_is_escaped() {
        let doc = render("```nosuchlang\n<tag> & more\n```");
        assert!(doc.html.contains(r#"class="language-nosuchlang""#));
        assert!(doc.html.contains("&lt;tag&gt; &amp; more"));
    }

    #[test]
    fn test_highlighting_disabled() {
        let config = HighlightConfig {
            enable: false,
            ..Default::default()
        };
        let doc = MarkdownRenderer::from_config(&config).render("```rust\nlet x = 1;\n```");
        assert!(doc.html.contains(r#"<code class="language-rust">let x = 1;"#));
    }

    #[test]
    fn test_gfm_extensions() {
        let doc = render("| a | b |\n|---|---|\n| 1 | 2 |\n\n~~gone~~\n\n- [x] done\n");
        assert!(doc.html.contains("<table>"));
        assert!(doc.html.contains("<td>1</td>"));
        assert!(doc.html.contains("<del>gone</del>"));
        assert!(doc.html.contains(r#"type="checkbox""#));
    }

    #[test]
    fn test_clearfix_block() {
        let doc = render("Some text\n\n<div class=\"clearfix\"></div>\n\nMore text");
        assert!(doc.html.contains(CLEARFIX_SPACER));
        assert!(!doc.html.contains("clearfix"));
    }

    #[test]
    fn test_clearfix_split_across_lines() {
        let doc = render("<div class='clearfix'>\n</div>\n\nAfter");
        assert!(doc.html.contains(CLEARFIX_SPACER));
    }

    #[test]
    fn test_other_raw_html_passes_through() {
        let doc = render("<div class=\"note\">keep me</div>\n");
        assert!(doc.html.contains(r#"<div class="note">keep me</div>"#));
    }

    #[test]
    fn test_image_with_json_title() {
        let doc = render(r#"![alt](img.png '{"size":"small","caption":"Fig 1"}')"#);
        assert_eq!(doc.images.len(), 1);
        let image = &doc.images[0];
        assert_eq!(image.size, ImageSize::Small);
        assert_eq!(image.align, ImageAlign::Center);
        assert!(!image.wrap);
        assert!(image.rounded && image.shadow);
        assert_eq!(image.caption.as_deref(), Some("Fig 1"));
        assert!(doc.html.contains("w-48"));
        assert!(doc.html.contains(r#"alt="alt""#));
        assert!(!doc.html.contains("<img src=\"img.png\" alt=\"alt\" />"));
    }

    #[test]
    fn test_json_title_quoting_forms() {
        let escaped = render(r#"![alt](img.png "{\"size\":\"full\"}")"#);
        assert_eq!(escaped.images.len(), 1);
        assert_eq!(escaped.images[0].size, ImageSize::Full);

        let parens = render(r#"![alt](img.png ({"align":"right","wrap":true}))"#);
        assert_eq!(parens.images.len(), 1);
        assert_eq!(parens.images[0].align, ImageAlign::Right);
        assert!(parens.images[0].wrap);

        // Bare inner quotes end the title early, so no image is produced
        let bare = render(r#"![alt](img.png "{"size":"small"}")"#);
        assert!(bare.images.is_empty());
        assert!(!bare.html.contains("<img"));
    }

    #[test]
    fn test_image_with_plain_title_and_no_title() {
        let doc = render("![one](a.png \"A caption\")\n\n![two](b.png)");
        assert_eq!(doc.images.len(), 2);
        assert_eq!(doc.images[0].caption.as_deref(), Some("A caption"));
        assert_eq!(doc.images[1], ImagePresentation::default());
    }

    #[test]
    fn test_image_alt_from_formatted_text() {
        let doc = render("![a *fancy* `alt`](x.png)");
        assert!(doc.html.contains(r#"alt="a fancy alt""#));
    }

    #[test]
    fn test_custom_rules() {
        let rules = DisplayRules {
            paragraph: String::new(),
            ..Default::default()
        };
        let renderer = MarkdownRenderer::new().with_rules(rules);
        assert!(renderer.render("plain").html.contains("<p>plain</p>"));
    }
}
