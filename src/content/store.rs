//! Content store - the immutable set of records the site is built from
//!
//! Records are read once at startup from a versioned `_content.yml`. When the
//! file does not exist the records compiled into the binary are used instead.
//! Lookups by identifier go through insertion-ordered maps, so list pages keep
//! declaration order.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use super::builtin;
use super::records::{BlogPost, PageConfig, PageId, Pages, Project, Skill, SocialLink};
use crate::config::ConfigError;

/// Content store file name, relative to the site base directory
pub const STORE_FILE: &str = "_content.yml";

/// Current `_content.yml` format version
pub const STORE_VERSION: u32 = 1;

const FEATURED_BLOGS: usize = 5;
const FEATURED_PROJECTS: usize = 3;
const FEATURED_SKILLS: usize = 6;

/// On-disk representation of the store
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoreFile {
    version: u32,
    #[serde(default)]
    blogs: Vec<BlogPost>,
    #[serde(default)]
    projects: Vec<Project>,
    #[serde(default)]
    skills: Vec<Skill>,
    #[serde(default)]
    socials: Vec<SocialLink>,
    #[serde(default = "builtin::pages")]
    pages: Pages,
}

/// Immutable in-memory table of all site records
#[derive(Debug, Clone)]
pub struct ContentStore {
    blogs: IndexMap<String, BlogPost>,
    projects: IndexMap<String, Project>,
    skills: Vec<Skill>,
    socials: Vec<SocialLink>,
    pages: Pages,
}

impl ContentStore {
    /// The records compiled into the binary
    pub fn builtin() -> Self {
        Self::from_parts(
            builtin::blogs(),
            builtin::projects(),
            builtin::skills(),
            builtin::socials(),
            builtin::pages(),
        )
        .expect("built-in records have unique identifiers")
    }

    /// Build a store from record lists, rejecting duplicate identifiers
    pub fn from_parts(
        blogs: Vec<BlogPost>,
        projects: Vec<Project>,
        skills: Vec<Skill>,
        socials: Vec<SocialLink>,
        pages: Pages,
    ) -> Result<Self, ConfigError> {
        let mut blog_map = IndexMap::with_capacity(blogs.len());
        for mut post in blogs {
            if post.link.is_empty() {
                post.link = format!("blog/{}", post.slug);
            }
            if blog_map.contains_key(&post.slug) {
                return Err(ConfigError::DuplicateId {
                    kind: "blog",
                    id: post.slug,
                });
            }
            blog_map.insert(post.slug.clone(), post);
        }

        let mut project_map = IndexMap::with_capacity(projects.len());
        for project in projects {
            if project_map.contains_key(&project.id) {
                return Err(ConfigError::DuplicateId {
                    kind: "project",
                    id: project.id,
                });
            }
            project_map.insert(project.id.clone(), project);
        }

        Ok(Self {
            blogs: blog_map,
            projects: project_map,
            skills,
            socials,
            pages,
        })
    }

    /// Load `_content.yml`, falling back to the built-in records if it is absent
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::debug!("No content store at {:?}, using built-in records", path);
            return Ok(Self::builtin());
        }

        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let file: StoreFile = serde_yaml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        let store = Self::from_file(file)?;
        tracing::info!(
            "Loaded content store: {} blogs, {} projects, {} skills",
            store.blogs.len(),
            store.projects.len(),
            store.skills.len()
        );
        Ok(store)
    }

    fn from_file(file: StoreFile) -> Result<Self, ConfigError> {
        if file.version != STORE_VERSION {
            return Err(ConfigError::UnsupportedStoreVersion {
                found: file.version,
                expected: STORE_VERSION,
            });
        }
        Self::from_parts(
            file.blogs,
            file.projects,
            file.skills,
            file.socials,
            file.pages,
        )
    }

    /// Serialize the store in `_content.yml` format
    pub fn to_yaml(&self) -> Result<String, serde_yaml::Error> {
        let file = StoreFile {
            version: STORE_VERSION,
            blogs: self.blogs.values().cloned().collect(),
            projects: self.projects.values().cloned().collect(),
            skills: self.skills.clone(),
            socials: self.socials.clone(),
            pages: self.pages.clone(),
        };
        serde_yaml::to_string(&file)
    }

    /// Insert a blog post or replace the one with the same slug, keeping its position
    pub fn upsert_blog(&mut self, post: BlogPost) {
        self.blogs.insert(post.slug.clone(), post);
    }

    pub fn blog(&self, slug: &str) -> Option<&BlogPost> {
        self.blogs.get(slug)
    }

    /// All blog posts in declaration order
    pub fn blogs(&self) -> impl Iterator<Item = &BlogPost> {
        self.blogs.values()
    }

    pub fn featured_blogs(&self) -> Vec<&BlogPost> {
        self.blogs().take(FEATURED_BLOGS).collect()
    }

    pub fn project(&self, id: &str) -> Option<&Project> {
        self.projects.get(id)
    }

    /// All projects in declaration order
    pub fn projects(&self) -> impl Iterator<Item = &Project> {
        self.projects.values()
    }

    pub fn featured_projects(&self) -> Vec<&Project> {
        self.projects().take(FEATURED_PROJECTS).collect()
    }

    /// Skills in declaration order
    pub fn skills_unsorted(&self) -> &[Skill] {
        &self.skills
    }

    /// Skills by rating, highest first. Equal ratings keep declaration order.
    pub fn skills(&self) -> Vec<&Skill> {
        let mut sorted: Vec<&Skill> = self.skills.iter().collect();
        // sort_by is stable
        sorted.sort_by(|a, b| b.rating.cmp(&a.rating));
        sorted
    }

    pub fn featured_skills(&self) -> Vec<&Skill> {
        let mut skills = self.skills();
        skills.truncate(FEATURED_SKILLS);
        skills
    }

    pub fn socials(&self) -> &[SocialLink] {
        &self.socials
    }

    pub fn page(&self, id: PageId) -> &PageConfig {
        self.pages.get(id)
    }

    pub fn pages(&self) -> &Pages {
        &self.pages
    }
}

impl Default for ContentStore {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn skill(name: &str, rating: u8) -> Skill {
        Skill {
            name: name.to_string(),
            description: String::new(),
            rating,
            icon: String::new(),
        }
    }

    #[test]
    fn test_builtin_store() {
        let store = ContentStore::builtin();
        assert!(store.blog("autogen-building-future").is_some());
        assert!(store.blog("missing-slug").is_none());
        assert_eq!(store.page(PageId::Blog).title, "Blog");
        assert_eq!(store.featured_skills().len(), 6);
    }

    #[test]
    fn test_skills_sorted_stably_by_rating() {
        let store = ContentStore::from_parts(
            Vec::new(),
            Vec::new(),
            vec![skill("a", 3), skill("b", 5), skill("c", 4), skill("d", 5)],
            Vec::new(),
            builtin::pages(),
        )
        .unwrap();

        let names: Vec<&str> = store.skills().into_iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["b", "d", "c", "a"]);
        // Declaration order is untouched
        assert_eq!(store.skills_unsorted()[0].name, "a");
    }

    #[test]
    fn test_skills_ratings_non_increasing() {
        let store = ContentStore::builtin();
        let ratings: Vec<u8> = store.skills().into_iter().map(|s| s.rating).collect();
        assert!(ratings.windows(2).all(|w| w[0] >= w[1]));

        let five_star: Vec<&str> = store
            .skills()
            .into_iter()
            .filter(|s| s.rating == 5)
            .map(|s| s.name.as_str())
            .collect();
        assert_eq!(five_star, vec!["Python", "MATLAB", "Java", "Git", "ImageJ"]);
    }

    #[test]
    fn test_duplicate_slug_rejected() {
        let post = BlogPost::new("dup", "Dup", "", "");
        let err = ContentStore::from_parts(
            vec![post.clone(), post],
            Vec::new(),
            Vec::new(),
            Vec::new(),
            builtin::pages(),
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::DuplicateId { kind: "blog", .. }));
    }

    #[test]
    fn test_missing_file_uses_builtin() {
        let dir = TempDir::new().unwrap();
        let store = ContentStore::load(dir.path().join(STORE_FILE)).unwrap();
        assert_eq!(store.blogs().count(), builtin::blogs().len());
    }

    #[test]
    fn test_yaml_round_trip_keeps_order() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(STORE_FILE);

        let mut store = ContentStore::builtin();
        store.upsert_blog(BlogPost::new("zeta", "Zeta", "Last one", "01/01/2026"));
        fs::write(&path, store.to_yaml().unwrap()).unwrap();

        let loaded = ContentStore::load(&path).unwrap();
        let slugs: Vec<&str> = loaded.blogs().map(|b| b.slug.as_str()).collect();
        assert_eq!(
            slugs,
            vec!["autogen-building-future", "creative-commons-navbar-fix", "zeta"]
        );
        assert_eq!(loaded.projects().count(), store.projects().count());
    }

    #[test]
    fn test_unsupported_version() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(STORE_FILE);
        fs::write(&path, "version: 7\n").unwrap();

        let err = ContentStore::load(&path).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::UnsupportedStoreVersion { found: 7, .. }
        ));
    }

    #[test]
    fn test_minimal_file_gets_default_pages() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(STORE_FILE);
        fs::write(
            &path,
            r#"
version: 1
blogs:
  - slug: only
    title: Only
    description: The only post
    date: 02/02/2025
"#,
        )
        .unwrap();

        let store = ContentStore::load(&path).unwrap();
        assert_eq!(store.blog("only").unwrap().href(), "blog/only");
        assert_eq!(store.page(PageId::Home).title, "Home");
        assert!(store.skills().is_empty());
    }
}
