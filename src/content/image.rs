//! Image presentation metadata decoded from the Markdown image title
//!
//! `![alt](src "title")` may carry either a plain caption or an inline JSON
//! object such as `{"size":"small","align":"right","wrap":true}`. Decoding is
//! total: every input yields a complete [`ImagePresentation`].
//!
//! A JSON title contains `"`, so in Markdown it must be wrapped in single
//! quotes or parentheses (`![alt](img.png '{"size":"small"}')`), or have its
//! inner quotes backslash-escaped. A double-quoted title with bare inner quotes
//! is not an image at all and renders as plain text.

use serde::{Deserialize, Serialize};

use crate::helpers::html_escape;

/// Display width of an image
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageSize {
    Small,
    Medium,
    #[default]
    Large,
    Full,
}

impl ImageSize {
    fn class(&self) -> &'static str {
        match self {
            ImageSize::Small => "w-48",
            ImageSize::Medium => "w-64",
            ImageSize::Large => "w-96",
            ImageSize::Full => "w-full",
        }
    }
}

/// Horizontal placement of an image
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageAlign {
    Left,
    #[default]
    Center,
    Right,
}

impl ImageAlign {
    fn block_class(&self) -> &'static str {
        match self {
            ImageAlign::Left => "mr-auto",
            ImageAlign::Center => "mx-auto",
            ImageAlign::Right => "ml-auto",
        }
    }

    fn float_class(&self) -> &'static str {
        match self {
            ImageAlign::Left => "float-left mr-4 mb-2",
            ImageAlign::Center => "block mx-auto mb-4",
            ImageAlign::Right => "float-right ml-4 mb-2",
        }
    }
}

/// How an image is laid out in the text flow
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageLayout {
    /// Stands on its own line
    Block(ImageAlign),
    /// Text wraps around it
    Float(ImageAlign),
}

/// Decoded display parameters for one embedded image
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImagePresentation {
    pub size: ImageSize,
    pub align: ImageAlign,
    pub wrap: bool,
    pub rounded: bool,
    pub shadow: bool,
    pub caption: Option<String>,
}

impl Default for ImagePresentation {
    fn default() -> Self {
        Self {
            size: ImageSize::default(),
            align: ImageAlign::default(),
            wrap: false,
            rounded: true,
            shadow: true,
            caption: None,
        }
    }
}

/// Fields that may appear in a JSON title; absent keys keep the defaults
#[derive(Debug, Default, Deserialize)]
struct TitleOverrides {
    size: Option<ImageSize>,
    align: Option<ImageAlign>,
    wrap: Option<bool>,
    rounded: Option<bool>,
    shadow: Option<bool>,
    caption: Option<String>,
}

impl ImagePresentation {
    /// Decode the presentation from an image title. Never fails.
    ///
    /// Any non-empty title that is not a JSON object, whitespace included,
    /// becomes the caption.
    pub fn from_title(title: Option<&str>) -> Self {
        let Some(title) = title.filter(|t| !t.is_empty()) else {
            return Self::default();
        };

        let trimmed = title.trim();
        if trimmed.starts_with('{') && trimmed.ends_with('}') {
            match serde_json::from_str::<TitleOverrides>(trimmed) {
                Ok(overrides) => return Self::default().merge(overrides),
                Err(e) => {
                    tracing::warn!("Invalid image metadata {:?}, using it as caption: {}", title, e);
                }
            }
        }

        Self::caption_only(title)
    }

    fn caption_only(caption: &str) -> Self {
        Self {
            caption: Some(caption.to_string()),
            ..Self::default()
        }
    }

    fn merge(self, overrides: TitleOverrides) -> Self {
        Self {
            size: overrides.size.unwrap_or(self.size),
            align: overrides.align.unwrap_or(self.align),
            wrap: overrides.wrap.unwrap_or(self.wrap),
            rounded: overrides.rounded.unwrap_or(self.rounded),
            shadow: overrides.shadow.unwrap_or(self.shadow),
            caption: overrides.caption.or(self.caption),
        }
    }

    /// Centered images cannot float, so `center + wrap` stays a block
    pub fn layout(&self) -> ImageLayout {
        if self.wrap && self.align != ImageAlign::Center {
            ImageLayout::Float(self.align)
        } else {
            ImageLayout::Block(self.align)
        }
    }

    /// Render the image element
    pub fn render(&self, src: &str, alt: &str) -> String {
        let img = self.img_tag(src, alt);
        let caption = self.caption_tag();

        match self.layout() {
            ImageLayout::Block(align) => format!(
                r#"<span class="block my-8 {align}"><span class="block {size} {align}">{img}{caption}</span></span>"#,
                align = align.block_class(),
                size = self.size.class(),
                img = img,
                caption = caption,
            ),
            ImageLayout::Float(align) => format!(
                r#"<span class="{} {}">{}{}</span>"#,
                self.size.class(),
                align.float_class(),
                img,
                caption
            ),
        }
    }

    fn img_tag(&self, src: &str, alt: &str) -> String {
        let mut classes = vec!["w-full", "h-auto"];
        if self.rounded {
            classes.push("rounded-lg");
        }
        if self.shadow {
            classes.push("shadow-lg hover:shadow-xl");
        }
        classes.push("transition-all duration-300 hover:scale-105");

        format!(
            r#"<img src="{}" alt="{}" class="{}" loading="lazy">"#,
            html_escape(src),
            html_escape(alt),
            classes.join(" ")
        )
    }

    fn caption_tag(&self) -> String {
        match &self.caption {
            Some(caption) if !caption.is_empty() => format!(
                r#"<span class="block text-sm text-muted-foreground text-center mt-2 italic">{}</span>"#,
                html_escape(caption)
            ),
            _ => String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_title_uses_defaults() {
        let p = ImagePresentation::from_title(None);
        assert_eq!(p, ImagePresentation::default());
        assert_eq!(p.size, ImageSize::Large);
        assert_eq!(p.align, ImageAlign::Center);
        assert!(!p.wrap && p.rounded && p.shadow);
        assert_eq!(p.caption, None);

        assert_eq!(ImagePresentation::from_title(Some("")), ImagePresentation::default());
    }

    #[test]
    fn test_plain_caption() {
        let p = ImagePresentation::from_title(Some("A cell under the microscope"));
        assert_eq!(p.caption.as_deref(), Some("A cell under the microscope"));
        assert_eq!(p.size, ImageSize::Large);
    }

    #[test]
    fn test_json_overrides_per_key() {
        let p = ImagePresentation::from_title(Some(r#"{"size":"small","caption":"Fig 1"}"#));
        assert_eq!(p.size, ImageSize::Small);
        assert_eq!(p.align, ImageAlign::Center);
        assert!(!p.wrap);
        assert!(p.rounded);
        assert!(p.shadow);
        assert_eq!(p.caption.as_deref(), Some("Fig 1"));
    }

    #[test]
    fn test_json_with_surrounding_whitespace() {
        let p = ImagePresentation::from_title(Some(r#"  {"align":"right","wrap":true}  "#));
        assert_eq!(p.align, ImageAlign::Right);
        assert_eq!(p.layout(), ImageLayout::Float(ImageAlign::Right));
        assert_eq!(p.caption, None);
    }

    #[test]
    fn test_malformed_json_becomes_caption() {
        let title = r#"{"size": small}"#;
        let p = ImagePresentation::from_title(Some(title));
        assert_eq!(p.caption.as_deref(), Some(title));
        assert_eq!(p.size, ImageSize::Large);
    }

    #[test]
    fn test_unknown_enum_value_becomes_caption() {
        let title = r#"{"size":"huge"}"#;
        let p = ImagePresentation::from_title(Some(title));
        assert_eq!(p.caption.as_deref(), Some(title));
        assert_eq!(p.size, ImageSize::Large);
    }

    #[test]
    fn test_unbalanced_braces_are_plain_captions() {
        let p = ImagePresentation::from_title(Some("{not json"));
        assert_eq!(p.caption.as_deref(), Some("{not json"));
    }

    #[test]
    fn test_decode_is_idempotent() {
        for title in ["", "caption", "{}", r#"{"rounded":false}"#, "{bad}", "}{"] {
            let a = ImagePresentation::from_title(Some(title));
            let b = ImagePresentation::from_title(Some(title));
            assert_eq!(a, b);
        }
        let empty_object = ImagePresentation::from_title(Some("{}"));
        assert_eq!(empty_object, ImagePresentation::default());
    }

    #[test]
    fn test_center_cannot_float() {
        let p = ImagePresentation::from_title(Some(r#"{"wrap":true}"#));
        assert_eq!(p.layout(), ImageLayout::Block(ImageAlign::Center));
        let html = p.render("a.png", "a");
        assert!(html.starts_with(r#"<span class="block my-8 mx-auto">"#));
        assert!(!html.contains("float-"));
    }

    #[test]
    fn test_whitespace_title_is_a_caption() {
        let p = ImagePresentation::from_title(Some("   "));
        assert_eq!(p.caption.as_deref(), Some("   "));
        assert_eq!(p.size, ImageSize::Large);
        assert_eq!(p.layout(), ImageLayout::Block(ImageAlign::Center));
    }

    #[test]
    fn test_render_block_image() {
        let p = ImagePresentation::from_title(Some(r#"{"size":"small","caption":"Fig 1"}"#));
        let html = p.render("img.png", "alt text");
        assert!(html.starts_with(r#"<span class="block my-8 mx-auto">"#));
        assert!(html.contains(r#"<span class="block w-48 mx-auto">"#));
        assert!(html.contains(r#"src="img.png""#));
        assert!(html.contains("rounded-lg"));
        assert!(html.contains("shadow-lg"));
        assert!(html.contains(">Fig 1</span>"));
    }

    #[test]
    fn test_render_floating_image_without_decorations() {
        let p = ImagePresentation::from_title(Some(
            r#"{"align":"left","wrap":true,"rounded":false,"shadow":false,"size":"medium"}"#,
        ));
        let html = p.render("img.png", "");
        assert!(html.starts_with(r#"<span class="w-64 float-left mr-4 mb-2">"#));
        assert!(!html.contains("rounded-lg"));
        assert!(!html.contains("shadow-lg"));
        assert!(!html.contains("italic"));
    }

    #[test]
    fn test_render_escapes_caption() {
        let p = ImagePresentation::from_title(Some("<b>bold</b>"));
        let html = p.render("x.png", "x");
        assert!(html.contains("&lt;b&gt;bold&lt;/b&gt;"));
    }
}
