//! Generate static files

use anyhow::Result;

use crate::generator::Generator;
use crate::Folio;

/// Generate the static site
pub fn run(folio: &Folio) -> Result<()> {
    let start = std::time::Instant::now();

    tracing::info!(
        "Loaded {} blogs and {} projects",
        folio.store.blogs().count(),
        folio.store.projects().count()
    );

    let generator = Generator::new(folio)?;
    let written = generator.generate()?;

    let duration = start.elapsed();
    tracing::info!("Generated {} pages in {:.2}s", written, duration.as_secs_f64());

    Ok(())
}
