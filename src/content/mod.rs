//! Content module - records, Markdown loading, rendering and writing

mod builtin;
mod frontmatter;
pub mod image;
pub mod loader;
mod markdown;
mod records;
pub mod store;
pub mod writer;

pub use frontmatter::FrontMatter;
pub use image::{ImageAlign, ImageLayout, ImagePresentation, ImageSize};
pub use loader::{ContentLoader, LoadedBlog, NotFound, NotFoundCause};
pub use markdown::{DisplayRules, MarkdownRenderer, RenderedDocument};
pub use records::{
    BlogPost, ExperienceType, MetaText, PageConfig, PageId, Pages, Project, ProjectDescription,
    Skill, SocialLink, SubPage,
};
pub use store::ContentStore;
pub use writer::{ContentWriter, FsContentWriter, WriteError, WriteOutcome};
