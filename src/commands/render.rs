//! @acp:module "Render Command"
//! @acp:summary "Render a single page definition to HTML"
//! @acp:domain cli
//! @acp:layer handler

use std::path::PathBuf;

use anyhow::{Context, Result};
use console::style;

use crate::config::SiteConfig;
use crate::page::{load_page, PageRenderer};

/// Options for the render command
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Page definition path or built-in page name
    pub page: String,
    /// Write to this file instead of stdout
    pub output: Option<PathBuf>,
}

/// A rendered page and the name it was loaded under
#[derive(Debug, Clone)]
pub struct RenderedPage {
    pub name: String,
    pub sections: usize,
    pub html: String,
}

/// Load, resolve and render one page
pub fn render_source(source: &str, renderer: &PageRenderer) -> crate::Result<RenderedPage> {
    let page = load_page(source)?;
    let resolved = page.resolve(renderer)?;
    let html = renderer.render_page(&resolved.descriptor, &resolved.sections)?;
    Ok(RenderedPage {
        name: page.name,
        sections: resolved.sections.len(),
        html,
    })
}

/// Execute the render command
pub fn execute_render(options: RenderOptions, config: &SiteConfig) -> Result<()> {
    let renderer = PageRenderer::with_options(config.chrome_options())?;
    let rendered = render_source(&options.page, &renderer)
        .with_context(|| format!("Failed to render page {}", options.page))?;

    match options.output {
        Some(path) => {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() && !parent.exists() {
                    std::fs::create_dir_all(parent)?;
                }
            }
            std::fs::write(&path, &rendered.html)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            eprintln!(
                "{} Rendered {} ({} sections) to {}",
                style("✓").green(),
                rendered.name,
                rendered.sections,
                path.display()
            );
        }
        None => print!("{}", rendered.html),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_builtin_source() {
        let renderer = PageRenderer::new().unwrap();
        let rendered = render_source("libspectrum", &renderer).unwrap();
        assert_eq!(rendered.name, "libspectrum");
        assert_eq!(rendered.sections, 4);
        assert!(rendered.html.contains("<title>libspectrum - emulator support library</title>"));
    }

    #[test]
    fn test_execute_render_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("out").join("fuse.html");
        let options = RenderOptions {
            page: "fuse".to_string(),
            output: Some(output.clone()),
        };
        execute_render(options, &SiteConfig::default()).unwrap();

        let html = std::fs::read_to_string(output).unwrap();
        assert!(html.starts_with("<!DOCTYPE html>"));
    }
}
