//! Site configuration (_config.yml)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub name: String,
    pub author: String,
    pub username: String,
    pub job_title: String,
    pub description: String,
    pub keywords: Vec<String>,

    // URL
    pub url: String,
    pub root: String,
    #[serde(default)]
    pub links: LinksConfig,

    // Assets
    pub og_image: String,
    pub icon: String,
    pub logo: String,

    // Directory
    pub content_dir: String,
    pub public_dir: String,
    pub static_dir: String,

    // Writing
    #[serde(default)]
    pub highlight: HighlightConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            name: "Ahmed Ahmed | Developer Portfolio".to_string(),
            author: "Ahmed Ahmed".to_string(),
            username: "aahmeddev".to_string(),
            job_title: "Molecular Bioengineering Undergraduate Student".to_string(),
            description: "Ahmed Ahmed's portfolio".to_string(),
            keywords: vec![
                "Ahmed Ahmed".to_string(),
                "Molecular Bioengineering".to_string(),
                "Computational Biology".to_string(),
                "Bioinformatics".to_string(),
                "Python".to_string(),
                "Java".to_string(),
                "C++".to_string(),
                "GitHub portfolio".to_string(),
            ],

            url: "https://aahmeddev.github.io/".to_string(),
            root: "/".to_string(),
            links: LinksConfig::default(),

            og_image: "/profile-img.jpg".to_string(),
            icon: "/favicon.ico".to_string(),
            logo: "/logo.png".to_string(),

            content_dir: "content".to_string(),
            public_dir: "public".to_string(),
            static_dir: "static".to_string(),

            highlight: HighlightConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Comma-separated keywords for the `<meta name="keywords">` tag
    pub fn keyword_list(&self) -> String {
        self.keywords.join(", ")
    }
}

/// External profile links
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LinksConfig {
    pub github: String,
    pub twitter: String,
    pub linkedin: String,
}

impl Default for LinksConfig {
    fn default() -> Self {
        Self {
            github: "https://github.com/aahmeddev".to_string(),
            twitter: "https://x.com".to_string(),
            linkedin: "https://www.linkedin.com/in/ahmed-ahmed-37554021a/".to_string(),
        }
    }
}

/// Code highlighting configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    pub enable: bool,
    pub theme: String,
    pub line_number: bool,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            enable: true,
            theme: "base16-ocean.dark".to_string(),
            line_number: false,
        }
    }
}
