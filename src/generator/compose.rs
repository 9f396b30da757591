//! Page composer - turns records and rendered Markdown into page models

use serde::Serialize;
use serde_json::{json, Value};
use std::path::Path;

use crate::config::SiteConfig;
use crate::content::{
    BlogPost, ContentLoader, ContentStore, LoadedBlog, MarkdownRenderer, NotFound,
    NotFoundCause, PageId, Pages, Project, Skill, SocialLink,
};
use crate::helpers::{encode_segment, full_url_for, url_for};

/// Document metadata for `<head>`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageMetadata {
    /// Full document title, `"<page title> | <site name>"`
    pub title: String,
    pub description: String,
    /// Site-relative path, e.g. `/blog/hello`
    pub path: String,
    pub canonical_url: String,
}

/// Page-specific records, tagged by page kind for the templates
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PageContent<'a> {
    Home {
        skills: Vec<&'a Skill>,
        projects: Vec<&'a Project>,
        blogs: Vec<&'a BlogPost>,
        socials: &'a [SocialLink],
        /// Section headings come from the other pages' configuration
        pages: &'a Pages,
    },
    BlogList {
        blogs: Vec<&'a BlogPost>,
    },
    BlogPost {
        post: &'a BlogPost,
        html: String,
    },
    ProjectList {
        projects: Vec<&'a Project>,
    },
    Project {
        project: &'a Project,
        /// Heading of the feature section
        pages_heading: &'a str,
    },
    Skills {
        skills: Vec<&'a Skill>,
    },
    Contact {
        socials: &'a [SocialLink],
    },
    Cv,
    NotFound,
}

impl PageContent<'_> {
    /// Template used to render this kind of page
    pub fn template(&self) -> &'static str {
        match self {
            PageContent::Home { .. } => "home.html",
            PageContent::BlogList { .. } => "blog_list.html",
            PageContent::BlogPost { .. } => "blog_post.html",
            PageContent::ProjectList { .. } => "projects.html",
            PageContent::Project { .. } => "project.html",
            PageContent::Skills { .. } => "skills.html",
            PageContent::Contact { .. } => "contact.html",
            PageContent::Cv => "cv.html",
            PageContent::NotFound => "404.html",
        }
    }
}

/// A fully assembled page, ready for the template renderer
#[derive(Debug, Clone, Serialize)]
pub struct ComposedPage<'a> {
    pub meta: PageMetadata,
    pub heading: String,
    pub intro: String,
    pub content: PageContent<'a>,
    /// JSON-LD documents emitted as `<script type="application/ld+json">`
    pub structured_data: Vec<Value>,
}

impl ComposedPage<'_> {
    pub fn is_not_found(&self) -> bool {
        matches!(self.content, PageContent::NotFound)
    }

    pub fn template(&self) -> &'static str {
        self.content.template()
    }
}

/// Assembles pages from the site config, content store and Markdown files
pub struct PageComposer<'a> {
    config: &'a SiteConfig,
    store: &'a ContentStore,
    loader: ContentLoader<'a>,
    markdown: &'a MarkdownRenderer,
}

impl<'a> PageComposer<'a> {
    pub fn new(
        config: &'a SiteConfig,
        store: &'a ContentStore,
        content_dir: &Path,
        markdown: &'a MarkdownRenderer,
    ) -> Self {
        Self {
            config,
            store,
            loader: ContentLoader::new(store, content_dir),
            markdown,
        }
    }

    fn metadata(&self, title: &str, description: &str, path: &str) -> PageMetadata {
        PageMetadata {
            title: format!("{} | {}", title, self.config.name),
            description: description.to_string(),
            path: url_for(self.config, path),
            canonical_url: full_url_for(self.config, path),
        }
    }

    /// Compose one of the fixed pages from its page configuration
    fn fixed_page(&self, id: PageId, content: PageContent<'a>) -> ComposedPage<'a> {
        let page = self.store.page(id);
        ComposedPage {
            meta: self.metadata(&page.metadata.title, &page.metadata.description, id.path()),
            heading: page.title.clone(),
            intro: page.description.clone(),
            content,
            structured_data: Vec::new(),
        }
    }

    pub fn home(&self) -> ComposedPage<'a> {
        let mut page = self.fixed_page(
            PageId::Home,
            PageContent::Home {
                skills: self.store.featured_skills(),
                projects: self.store.featured_projects(),
                blogs: self.store.featured_blogs(),
                socials: self.store.socials(),
                pages: self.store.pages(),
            },
        );
        page.structured_data = vec![self.person_schema(), self.software_schema()];
        page
    }

    pub fn blog_list(&self) -> ComposedPage<'a> {
        self.fixed_page(
            PageId::Blog,
            PageContent::BlogList {
                blogs: self.store.blogs().collect(),
            },
        )
    }

    pub fn projects(&self) -> ComposedPage<'a> {
        self.fixed_page(
            PageId::Projects,
            PageContent::ProjectList {
                projects: self.store.projects().collect(),
            },
        )
    }

    pub fn skills(&self) -> ComposedPage<'a> {
        self.fixed_page(
            PageId::Skills,
            PageContent::Skills {
                skills: self.store.skills(),
            },
        )
    }

    pub fn contact(&self) -> ComposedPage<'a> {
        self.fixed_page(
            PageId::Contact,
            PageContent::Contact {
                socials: self.store.socials(),
            },
        )
    }

    pub fn cv(&self) -> ComposedPage<'a> {
        self.fixed_page(PageId::Cv, PageContent::Cv)
    }

    /// Blog detail page; any lookup failure yields the "Blog Not Found" page
    pub fn blog_post(&self, slug: &str) -> ComposedPage<'a> {
        self.blog_outcome(self.loader.load_blog(slug))
    }

    /// Async variant of [`blog_post`](Self::blog_post) for request handlers
    pub async fn blog_post_async(&self, slug: &str) -> ComposedPage<'a> {
        self.blog_outcome(self.loader.load_blog_async(slug).await)
    }

    fn blog_outcome(&self, loaded: Result<LoadedBlog<'a>, NotFound>) -> ComposedPage<'a> {
        match loaded {
            Ok(LoadedBlog { post, markdown, .. }) => {
                let rendered = self.markdown.render(&markdown);
                ComposedPage {
                    meta: self.metadata(
                        &post.title,
                        &post.description,
                        &format!("blog/{}", encode_segment(&post.slug)),
                    ),
                    heading: post.title.clone(),
                    intro: post.description.clone(),
                    content: PageContent::BlogPost {
                        post,
                        html: rendered.html,
                    },
                    structured_data: Vec::new(),
                }
            }
            Err(e) => {
                match e.cause {
                    NotFoundCause::UnknownRecord => tracing::debug!("Blog lookup failed: {}", e),
                    NotFoundCause::MissingContent => tracing::warn!("Blog lookup failed: {}", e),
                }
                self.not_found_page(
                    "Blog Not Found",
                    "The blog post you are looking for does not exist.",
                )
            }
        }
    }

    /// Project detail page. Unknown ids are reported to the caller, which
    /// redirects to the project list.
    pub fn project(&self, id: &str) -> Result<ComposedPage<'a>, NotFound> {
        let project = self.store.project(id).ok_or_else(|| NotFound {
            slug: id.to_string(),
            cause: NotFoundCause::UnknownRecord,
        })?;

        Ok(ComposedPage {
            meta: self.metadata(
                &project.company_name,
                &project.short_description,
                &format!("projects/{}", encode_segment(&project.id)),
            ),
            heading: project.company_name.clone(),
            intro: project.short_description.clone(),
            content: PageContent::Project {
                project,
                pages_heading: project.pages_heading(),
            },
            structured_data: Vec::new(),
        })
    }

    /// Generic page for unmatched routes
    pub fn not_found(&self) -> ComposedPage<'a> {
        self.not_found_page("Page Not Found", "The page you are looking for does not exist.")
    }

    fn not_found_page(&self, title: &str, description: &str) -> ComposedPage<'a> {
        ComposedPage {
            meta: PageMetadata {
                title: title.to_string(),
                description: description.to_string(),
                path: String::new(),
                canonical_url: full_url_for(self.config, "/"),
            },
            heading: title.to_string(),
            intro: description.to_string(),
            content: PageContent::NotFound,
            structured_data: Vec::new(),
        }
    }

    fn person_schema(&self) -> Value {
        let links = &self.config.links;
        let same_as: Vec<&str> = [&links.github, &links.linkedin, &links.twitter]
            .into_iter()
            .filter(|link| !link.is_empty())
            .map(String::as_str)
            .collect();

        json!({
            "@context": "https://schema.org",
            "@type": "Person",
            "name": self.config.author,
            "url": self.config.url,
            "image": full_url_for(self.config, &self.config.og_image),
            "jobTitle": self.config.job_title,
            "sameAs": same_as,
        })
    }

    fn software_schema(&self) -> Value {
        json!({
            "@context": "https://schema.org",
            "@type": "SoftwareApplication",
            "name": format!("{} Portfolio", self.config.author),
            "applicationCategory": "DeveloperApplication",
            "operatingSystem": "Web",
            "offers": {
                "@type": "Offer",
                "price": "0",
                "priceCurrency": "USD",
            },
            "author": {
                "@type": "Person",
                "name": self.config.author,
                "url": self.config.url,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    struct Fixture {
        dir: TempDir,
        config: SiteConfig,
        store: ContentStore,
        markdown: MarkdownRenderer,
    }

    impl Fixture {
        fn new() -> Self {
            let dir = TempDir::new().unwrap();
            let blogs = dir.path().join("blogs");
            fs::create_dir_all(&blogs).unwrap();
            fs::write(
                blogs.join("autogen-building-future.md"),
                "# AutoGen\n\n![shot](gallery.png '{\"size\":\"small\"}')\n",
            )
            .unwrap();
            Self {
                dir,
                config: SiteConfig {
                    name: "Ahmed Ahmed".to_string(),
                    ..Default::default()
                },
                store: ContentStore::builtin(),
                markdown: MarkdownRenderer::new(),
            }
        }

        fn composer(&self) -> PageComposer<'_> {
            PageComposer::new(&self.config, &self.store, self.dir.path(), &self.markdown)
        }
    }

    #[test]
    fn test_home_page() {
        let fx = Fixture::new();
        let page = fx.composer().home();

        assert_eq!(page.meta.title, "Home | Ahmed Ahmed");
        assert_eq!(page.meta.canonical_url, "https://aahmeddev.github.io/");
        assert_eq!(page.template(), "home.html");
        assert_eq!(page.structured_data.len(), 2);
        assert_eq!(page.structured_data[0]["@type"], "Person");
        assert_eq!(page.structured_data[1]["@type"], "SoftwareApplication");

        match page.content {
            PageContent::Home { skills, projects, blogs, socials, .. } => {
                assert_eq!(skills.len(), 6);
                assert!(skills.windows(2).all(|w| w[0].rating >= w[1].rating));
                assert_eq!(projects.len(), 2);
                assert_eq!(blogs.len(), 2);
                assert_eq!(socials.len(), 2);
            }
            other => panic!("unexpected content {:?}", other),
        }
    }

    #[test]
    fn test_skills_page_sorted() {
        let fx = Fixture::new();
        let page = fx.composer().skills();
        assert_eq!(page.meta.title, "Skills | Ahmed Ahmed");
        let PageContent::Skills { skills } = page.content else {
            panic!("expected skills page");
        };
        assert_eq!(skills.len(), 9);
        assert_eq!(skills[0].name, "Python");
        assert_eq!(skills[5].name, "HTML5");
    }

    #[test]
    fn test_blog_post_renders_markdown() {
        let fx = Fixture::new();
        let page = fx.composer().blog_post("autogen-building-future");

        assert!(!page.is_not_found());
        assert_eq!(page.meta.title, "AutoGen: Building the Future | Ahmed Ahmed");
        assert_eq!(
            page.meta.canonical_url,
            "https://aahmeddev.github.io/blog/autogen-building-future"
        );
        let PageContent::BlogPost { html, .. } = page.content else {
            panic!("expected blog post");
        };
        assert!(html.contains("<h1 class=\"text-3xl"));
        assert!(html.contains("w-48"));
    }

    #[test]
    fn test_blog_not_found_is_identical_for_both_causes() {
        let fx = Fixture::new();
        let composer = fx.composer();

        let unknown = composer.blog_post("does-not-exist");
        let missing = composer.blog_post("creative-commons-navbar-fix");
        for page in [&unknown, &missing] {
            assert!(page.is_not_found());
            assert_eq!(page.meta.title, "Blog Not Found");
            assert_eq!(page.template(), "404.html");
        }
        assert_eq!(unknown.meta, missing.meta);
        assert_eq!(unknown.heading, missing.heading);
    }

    #[test]
    fn test_blog_image_with_json_title() {
        let mut fx = Fixture::new();
        fx.store.upsert_blog(BlogPost::new(
            "nanopore-basecalling",
            "Nanopore Basecalling",
            "Notes on the basecaller",
            "01/02/2025",
        ));
        fs::write(
            fx.dir.path().join("blogs").join("nanopore-basecalling.md"),
            "Signal plot:\n\n![alt](img.png '{\"size\":\"small\",\"caption\":\"Fig 1\"}')\n",
        )
        .unwrap();

        let page = fx.composer().blog_post("nanopore-basecalling");
        assert!(!page.is_not_found());
        let PageContent::BlogPost { html, .. } = page.content else {
            panic!("expected blog post");
        };

        let doc = fx
            .markdown
            .render(&fs::read_to_string(fx.dir.path().join("blogs/nanopore-basecalling.md")).unwrap());
        assert_eq!(doc.images.len(), 1);
        let image = &doc.images[0];
        assert_eq!(image.size, crate::content::ImageSize::Small);
        assert_eq!(image.align, crate::content::ImageAlign::Center);
        assert!(!image.wrap);
        assert!(image.rounded && image.shadow);
        assert_eq!(image.caption.as_deref(), Some("Fig 1"));

        assert!(html.contains(r#"<span class="block my-8 mx-auto"><span class="block w-48 mx-auto">"#));
        assert!(html.contains(r#"src="img.png""#));
        assert!(html.contains(">Fig 1</span>"));
        assert!(!html.contains("float-"));
    }

    #[tokio::test]
    async fn test_blog_post_async() {
        let fx = Fixture::new();
        let page = fx.composer().blog_post_async("autogen-building-future").await;
        assert!(!page.is_not_found());
        let page = fx.composer().blog_post_async("../etc/passwd").await;
        assert!(page.is_not_found());
    }

    #[test]
    fn test_project_detail() {
        let fx = Fixture::new();
        let composer = fx.composer();

        let page = composer.project("protein-stability-explorer").unwrap();
        assert_eq!(page.meta.title, "Protein Stability Explorer | Ahmed Ahmed");
        assert_eq!(page.meta.path, "/projects/protein-stability-explorer");

        let PageContent::Project { pages_heading, .. } = page.content else {
            panic!("expected project page");
        };
        assert_eq!(pages_heading, "Screens");
        let PageContent::Project { pages_heading, .. } =
            composer.project("nanopore-basecalling").unwrap().content
        else {
            panic!("expected project page");
        };
        assert_eq!(pages_heading, "Key Features");

        let err = composer.project("nope").unwrap_err();
        assert_eq!(err.cause, NotFoundCause::UnknownRecord);
    }

    #[test]
    fn test_lists_keep_declaration_order() {
        let fx = Fixture::new();
        let composer = fx.composer();

        let PageContent::BlogList { blogs } = composer.blog_list().content else {
            panic!("expected blog list");
        };
        assert_eq!(blogs[0].slug, "autogen-building-future");

        let PageContent::ProjectList { projects } = composer.projects().content else {
            panic!("expected project list");
        };
        assert_eq!(projects[0].id, "nanopore-basecalling");
    }

    #[test]
    fn test_content_serializes_with_kind_tag() {
        let fx = Fixture::new();
        let value = serde_json::to_value(&fx.composer().cv().content).unwrap();
        assert_eq!(value["kind"], "cv");
        let value = serde_json::to_value(&fx.composer().contact().content).unwrap();
        assert_eq!(value["kind"], "contact");
        assert_eq!(value["socials"][0]["name"], "Github");
    }
}
