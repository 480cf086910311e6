//! @acp:module "Validate Command"
//! @acp:summary "Check page definitions without writing output"
//! @acp:domain cli
//! @acp:layer handler

use anyhow::{bail, Result};
use console::style;

use super::build::page_jobs;
use super::render::render_source;
use crate::config::SiteConfig;
use crate::page::PageRenderer;

/// Options for the validate command
#[derive(Debug, Clone, Default)]
pub struct ValidateOptions {
    /// Page definition paths or built-in names; empty validates the configured pages
    pub pages: Vec<String>,
}

/// Validate pages, returning `(source, error)` for each page that fails
pub fn validate_pages(sources: &[String], renderer: &PageRenderer) -> Vec<(String, crate::SiteError)> {
    sources
        .iter()
        .filter_map(|source| {
            render_source(source, renderer)
                .err()
                .map(|e| (source.clone(), e))
        })
        .collect()
}

/// Execute the validate command
pub fn execute_validate(options: ValidateOptions, config: &SiteConfig) -> Result<()> {
    let sources: Vec<String> = if options.pages.is_empty() {
        page_jobs(config).into_iter().map(|j| j.source).collect()
    } else {
        options.pages
    };

    let renderer = PageRenderer::with_options(config.chrome_options())?;
    let failures = validate_pages(&sources, &renderer);

    for source in &sources {
        match failures.iter().find(|(s, _)| s == source) {
            Some((_, err)) => eprintln!("{} {}: {}", style("✗").red(), source, err),
            None => println!("{} {} is valid", style("✓").green(), source),
        }
    }

    if !failures.is_empty() {
        bail!("{} of {} pages are invalid", failures.len(), sources.len());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtins_are_valid() {
        let renderer = PageRenderer::new().unwrap();
        let sources = vec!["fuse".to_string(), "libspectrum".to_string()];
        assert!(validate_pages(&sources, &renderer).is_empty());
    }

    #[test]
    fn test_reports_invalid_field() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(
            &path,
            r#"{ "title": "", "menuHeading": "Broken", "sections": [] }"#,
        )
        .unwrap();

        let renderer = PageRenderer::new().unwrap();
        let sources = vec![path.to_string_lossy().to_string(), "fuse".to_string()];
        let failures = validate_pages(&sources, &renderer);
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].1.field(), Some("title"));
    }
}
