//! Content records: blog posts, projects, skills, social links and page metadata

use serde::{Deserialize, Serialize};

/// A blog post entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlogPost {
    /// Slug (URL-friendly name, also the Markdown file stem)
    pub slug: String,

    /// Post title
    pub title: String,

    /// Short description shown on cards and in metadata
    pub description: String,

    /// Publication date, free text (e.g. `10/09/2025`)
    pub date: String,

    /// Relative link to the post page
    #[serde(default)]
    pub link: String,

    /// Post tags
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

impl BlogPost {
    /// Create a new post with minimal required fields
    pub fn new(slug: &str, title: &str, description: &str, date: &str) -> Self {
        Self {
            slug: slug.to_string(),
            title: title.to_string(),
            description: description.to_string(),
            date: date.to_string(),
            link: format!("blog/{}", slug),
            tags: Vec::new(),
        }
    }

    /// Link to the post, falling back to `blog/<slug>`
    pub fn href(&self) -> String {
        if self.link.is_empty() {
            format!("blog/{}", self.slug)
        } else {
            self.link.clone()
        }
    }
}

/// Kind of experience a project came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExperienceType {
    #[serde(rename = "Personal Project")]
    PersonalProject,
    #[serde(rename = "Professional")]
    Professional,
}

impl ExperienceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExperienceType::PersonalProject => "Personal Project",
            ExperienceType::Professional => "Professional",
        }
    }
}

/// Long-form project description
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectDescription {
    pub paragraphs: Vec<String>,
    pub bullets: Vec<String>,
}

/// A feature section on a project detail page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubPage {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link_url: Option<String>,
}

/// A project / experience entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    pub company_name: String,
    pub short_description: String,
    pub start_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    pub experience_type: ExperienceType,
    #[serde(default)]
    pub category: Vec<String>,
    #[serde(default)]
    pub tech_stack: Vec<String>,
    #[serde(default)]
    pub logo_image: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github_link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website_link: Option<String>,
    #[serde(default)]
    pub description: ProjectDescription,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pages_info_title: Option<String>,
    #[serde(default)]
    pub pages: Vec<SubPage>,
}

impl Project {
    /// Heading of the feature section
    pub fn pages_heading(&self) -> &str {
        self.pages_info_title.as_deref().unwrap_or("Key Features")
    }
}

/// A skill with a 1-5 rating
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Skill {
    pub name: String,
    pub description: String,
    pub rating: u8,
    pub icon: String,
}

/// A social profile link
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SocialLink {
    pub name: String,
    pub username: String,
    pub icon: String,
    pub link: String,
}

/// Identifiers of the fixed site pages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageId {
    Home,
    Skills,
    Projects,
    Contact,
    Blog,
    Cv,
}

impl PageId {
    pub const ALL: [PageId; 6] = [
        PageId::Home,
        PageId::Skills,
        PageId::Projects,
        PageId::Contact,
        PageId::Blog,
        PageId::Cv,
    ];

    /// URL path of the page (without the site root)
    pub fn path(&self) -> &'static str {
        match self {
            PageId::Home => "/",
            PageId::Skills => "/skills",
            PageId::Projects => "/projects",
            PageId::Contact => "/contact",
            PageId::Blog => "/blog",
            PageId::Cv => "/cv",
        }
    }

    /// Sitemap priority
    pub fn priority(&self) -> f32 {
        match self {
            PageId::Home => 1.0,
            PageId::Skills | PageId::Projects | PageId::Blog => 0.8,
            PageId::Contact | PageId::Cv => 0.7,
        }
    }
}

/// Title/description pair used for document metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetaText {
    pub title: String,
    pub description: String,
}

/// Heading text and metadata of one site page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageConfig {
    pub title: String,
    pub description: String,
    pub metadata: MetaText,
}

impl PageConfig {
    pub fn new(title: &str, description: &str, meta_description: &str) -> Self {
        Self {
            title: title.to_string(),
            description: description.to_string(),
            metadata: MetaText {
                title: title.to_string(),
                description: meta_description.to_string(),
            },
        }
    }
}

/// Page configuration for every [`PageId`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pages {
    pub home: PageConfig,
    pub skills: PageConfig,
    pub projects: PageConfig,
    pub contact: PageConfig,
    pub blog: PageConfig,
    pub cv: PageConfig,
}

impl Pages {
    pub fn get(&self, id: PageId) -> &PageConfig {
        match id {
            PageId::Home => &self.home,
            PageId::Skills => &self.skills,
            PageId::Projects => &self.projects,
            PageId::Contact => &self.contact,
            PageId::Blog => &self.blog,
            PageId::Cv => &self.cv,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blog_href_fallback() {
        let mut post = BlogPost::new("hello", "Hello", "desc", "01/01/2025");
        assert_eq!(post.href(), "blog/hello");
        post.link.clear();
        assert_eq!(post.href(), "blog/hello");
    }

    #[test]
    fn test_experience_type_names() {
        let yaml = serde_yaml::to_string(&ExperienceType::PersonalProject).unwrap();
        assert_eq!(yaml.trim(), "Personal Project");
        let parsed: ExperienceType = serde_yaml::from_str("Professional").unwrap();
        assert_eq!(parsed, ExperienceType::Professional);
    }

    #[test]
    fn test_page_ids() {
        let id: PageId = serde_yaml::from_str("cv").unwrap();
        assert_eq!(id, PageId::Cv);
        assert_eq!(id.path(), "/cv");
        assert_eq!(PageId::Home.priority(), 1.0);
    }

    #[test]
    fn test_project_defaults() {
        let yaml = r#"
id: demo
company_name: Demo
short_description: A demo
start_date: 01/2025
experience_type: Personal Project
"#;
        let project: Project = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(project.pages_heading(), "Key Features");
        assert!(project.pages.is_empty());
        assert!(project.description.paragraphs.is_empty());
    }
}
