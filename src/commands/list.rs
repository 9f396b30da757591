//! List site content

use anyhow::Result;
use std::fmt::Write;

use crate::content::{ContentLoader, PageId};
use crate::Folio;

/// Print site content by type
pub fn run(folio: &Folio, content_type: &str) -> Result<()> {
    print!("{}", listing(folio, content_type)?);
    Ok(())
}

/// Format a content listing by type
pub fn listing(folio: &Folio, content_type: &str) -> Result<String> {
    let store = &folio.store;
    let mut out = String::new();

    match content_type {
        "blog" | "blogs" => {
            let loader = ContentLoader::new(store, &folio.content_dir);
            writeln!(out, "Blogs ({}):", store.blogs().count())?;
            for post in store.blogs() {
                let status = if loader.blog_path(&post.slug).exists() {
                    ""
                } else {
                    " (missing content)"
                };
                writeln!(out, "  {} - {} [{}]{}", post.date, post.title, post.slug, status)?;
            }
        }
        "project" | "projects" => {
            writeln!(out, "Projects ({}):", store.projects().count())?;
            for project in store.projects() {
                writeln!(
                    out,
                    "  {} - {} [{}]",
                    project.experience_type.as_str(),
                    project.company_name,
                    project.id
                )?;
            }
        }
        "skill" | "skills" => {
            let skills = store.skills();
            writeln!(out, "Skills ({}):", skills.len())?;
            for skill in skills {
                writeln!(out, "  {} ({}/5)", skill.name, skill.rating)?;
            }
        }
        "social" | "socials" => {
            writeln!(out, "Socials ({}):", store.socials().len())?;
            for social in store.socials() {
                writeln!(out, "  {} - {}", social.name, social.link)?;
            }
        }
        "page" | "pages" => {
            writeln!(out, "Pages ({}):", PageId::ALL.len())?;
            for id in PageId::ALL {
                writeln!(out, "  {} [{}]", store.page(id).title, id.path())?;
            }
        }
        _ => {
            anyhow::bail!(
                "Unknown type: {}. Available: blog, project, skill, social, page",
                content_type
            );
        }
    }

    Ok(out)
}
