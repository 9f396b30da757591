//! Initialize a new portfolio site

use anyhow::Result;
use std::fs;
use std::path::Path;

use crate::config::SiteConfig;
use crate::content::loader::BLOGS_DIR;
use crate::content::store::STORE_FILE;
use crate::content::{ContentStore, FrontMatter};

/// Initialize a new site in the given directory. Existing files are kept.
pub fn init_site(target_dir: &Path) -> Result<()> {
    let config = SiteConfig::default();

    let blogs_dir = target_dir.join(&config.content_dir).join(BLOGS_DIR);
    fs::create_dir_all(&blogs_dir)?;
    fs::create_dir_all(target_dir.join(&config.static_dir))?;

    let config_content = format!(
        "# Site configuration\n# Contact relay settings are read from the environment (.env)\n\n{}",
        serde_yaml::to_string(&config)?
    );
    write_if_missing(&target_dir.join("_config.yml"), &config_content)?;

    let store = ContentStore::builtin();
    write_if_missing(&target_dir.join(STORE_FILE), &store.to_yaml()?)?;

    // A starter Markdown file for every built-in post
    for post in store.blogs() {
        let header = FrontMatter {
            title: Some(post.title.clone()),
            date: Some(post.date.clone()),
            description: Some(post.description.clone()),
            tags: post.tags.clone(),
        }
        .to_header()?;
        let body = format!(
            "{}# {}\n\n{}\n\nEdit `{}/{}/{}.md` to write this post.\n",
            header, post.title, post.description, config.content_dir, BLOGS_DIR, post.slug
        );
        write_if_missing(&blogs_dir.join(format!("{}.md", post.slug)), &body)?;
    }

    let env_sample = "\
# Contact form relay
CONTACT_FORM_LINK=
CONTACT_FORM_FIELD_ID_NAME=
CONTACT_FORM_FIELD_ID_EMAIL=
CONTACT_FORM_FIELD_ID_MESSAGE=
CONTACT_FORM_FIELD_ID_SOCIAL=
# CONTACT_FORM_TIMEOUT_SECS=10
";
    write_if_missing(&target_dir.join(".env.example"), env_sample)?;

    Ok(())
}

fn write_if_missing(path: &Path, contents: &str) -> Result<()> {
    if path.exists() {
        tracing::warn!("Keeping existing {:?}", path);
        return Ok(());
    }
    fs::write(path, contents)?;
    tracing::debug!("Created {:?}", path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Folio;
    use tempfile::TempDir;

    #[test]
    fn test_init_creates_loadable_site() {
        let dir = TempDir::new().unwrap();
        init_site(dir.path()).unwrap();

        assert!(dir.path().join("_config.yml").exists());
        assert!(dir.path().join("_content.yml").exists());
        assert!(dir.path().join("static").is_dir());
        assert!(dir
            .path()
            .join("content/blogs/autogen-building-future.md")
            .exists());

        let folio = Folio::new(dir.path()).unwrap();
        assert_eq!(folio.config.name, SiteConfig::default().name);
        assert_eq!(
            folio.store.blogs().count(),
            ContentStore::builtin().blogs().count()
        );
    }

    #[test]
    fn test_init_keeps_existing_files() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("_config.yml"), "name: Mine\n").unwrap();
        init_site(dir.path()).unwrap();

        let content = fs::read_to_string(dir.path().join("_config.yml")).unwrap();
        assert_eq!(content, "name: Mine\n");
    }
}
