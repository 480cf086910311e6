//! @acp:module "Page Loader"
//! @acp:summary "Load page definitions from JSON/YAML and resolve them into sections"
//! @acp:domain site
//! @acp:layer io

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::image::ImageReference;
use super::renderer::PageRenderer;
use super::types::{PageDescriptor, RelatedProject, Section};
use crate::error::{Result, SiteError};

/// Built-in page definitions, compiled into the binary
const BUILTIN_PAGES: &[(&str, &str)] = &[
    ("fuse", include_str!("../../pages/fuse.yaml")),
    ("libspectrum", include_str!("../../pages/libspectrum.yaml")),
];

/// On-disk page definition
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PageDefinition {
    pub title: String,

    #[serde(default)]
    pub show_subtitle: bool,

    pub menu_heading: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub related: Option<RelatedProject>,

    #[serde(default)]
    pub sections: Vec<SectionDefinition>,
}

/// One section of a page definition. Exactly one of `body` and `body_file`
/// must be set.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SectionDefinition {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub anchor: Option<String>,

    pub heading: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,

    /// Path to a markup fragment, relative to the definition file
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body_file: Option<PathBuf>,

    /// Screenshot placed before the body text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<ImageReference>,
}

/// Page data ready for the renderer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPage {
    pub descriptor: PageDescriptor,
    pub sections: Vec<Section>,
}

/// Serialization format of a page definition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefinitionFormat {
    Json,
    Yaml,
}

impl DefinitionFormat {
    pub fn from_path(path: &Path) -> Result<Self> {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .as_deref()
        {
            Some("json") => Ok(DefinitionFormat::Json),
            Some("yaml") | Some("yml") => Ok(DefinitionFormat::Yaml),
            _ => Err(SiteError::UnsupportedFormat(path.to_path_buf())),
        }
    }
}

/// A page definition together with the directory its body files live in
#[derive(Debug, Clone)]
pub struct LoadedPage {
    /// Page name, used for the output file name
    pub name: String,
    pub definition: PageDefinition,
    /// Directory `bodyFile` paths are resolved against; `None` for built-ins
    pub base_dir: Option<PathBuf>,
}

impl LoadedPage {
    pub fn resolve(&self, renderer: &PageRenderer) -> Result<ResolvedPage> {
        self.definition.resolve(self.base_dir.as_deref(), renderer)
    }
}

/// Parse a page definition from a string
pub fn parse_page_definition(content: &str, format: DefinitionFormat) -> Result<PageDefinition> {
    let definition = match format {
        DefinitionFormat::Json => serde_json::from_str(content)?,
        DefinitionFormat::Yaml => serde_yaml::from_str(content)?,
    };
    Ok(definition)
}

/// Read and parse a page definition file
pub fn load_page_definition(path: &Path) -> Result<PageDefinition> {
    let format = DefinitionFormat::from_path(path)?;
    let content = std::fs::read_to_string(path)?;
    tracing::debug!("Loaded page definition from {}", path.display());
    parse_page_definition(&content, format)
}

/// Names of the built-in pages
pub fn builtin_names() -> impl Iterator<Item = &'static str> {
    BUILTIN_PAGES.iter().map(|(name, _)| *name)
}

/// Parse a built-in page definition by name
pub fn builtin_page(name: &str) -> Result<PageDefinition> {
    let (_, content) = BUILTIN_PAGES
        .iter()
        .find(|(builtin, _)| *builtin == name)
        .ok_or_else(|| SiteError::UnknownPage(name.to_string()))?;
    parse_page_definition(content, DefinitionFormat::Yaml)
}

/// All built-in pages, in site order
pub fn builtin_pages() -> Result<Vec<LoadedPage>> {
    builtin_names()
        .map(|name| {
            Ok(LoadedPage {
                name: name.to_string(),
                definition: builtin_page(name)?,
                base_dir: None,
            })
        })
        .collect()
}

/// Name a page source resolves to: the file stem of a definition path, or
/// the source itself for a built-in page. Needs no file access.
pub fn page_name(source: &str) -> String {
    let path = Path::new(source);
    if DefinitionFormat::from_path(path).is_err() {
        return source.to_string();
    }
    path.file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| source.to_string())
}

/// Load a page from a definition file path or a built-in page name.
///
/// Anything with a known definition extension is treated as a path.
pub fn load_page(source: &str) -> Result<LoadedPage> {
    let path = Path::new(source);
    if DefinitionFormat::from_path(path).is_err() {
        return Ok(LoadedPage {
            name: source.to_string(),
            definition: builtin_page(source)?,
            base_dir: None,
        });
    }

    let definition = load_page_definition(path)?;
    let name = page_name(source);
    let base_dir = path
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));

    Ok(LoadedPage {
        name,
        definition,
        base_dir: Some(base_dir),
    })
}

impl PageDefinition {
    /// Validate the definition and build renderer input, preserving section
    /// order. Section images are rendered and placed before the body.
    pub fn resolve(&self, base_dir: Option<&Path>, renderer: &PageRenderer) -> Result<ResolvedPage> {
        let mut descriptor =
            PageDescriptor::new(&self.title, &self.menu_heading)?.with_subtitle(self.show_subtitle);
        if let Some(ref related) = self.related {
            descriptor = descriptor.with_related(&related.name, &related.link)?;
        }

        let sections = self
            .sections
            .iter()
            .map(|section| section.resolve(base_dir, renderer))
            .collect::<Result<Vec<_>>>()?;

        Ok(ResolvedPage {
            descriptor,
            sections,
        })
    }
}

impl SectionDefinition {
    fn resolve(&self, base_dir: Option<&Path>, renderer: &PageRenderer) -> Result<Section> {
        let text = match (&self.body, &self.body_file) {
            (Some(body), None) => body.clone(),
            (None, Some(file)) => {
                let base = base_dir.ok_or_else(|| {
                    SiteError::invalid("body_file", "not supported for built-in pages")
                })?;
                std::fs::read_to_string(base.join(file))?
            }
            (Some(_), Some(_)) => {
                return Err(SiteError::invalid(
                    "body",
                    format!("section {:?} sets both body and bodyFile", self.heading),
                ))
            }
            (None, None) => {
                return Err(SiteError::invalid(
                    "body",
                    format!("section {:?} needs a body or bodyFile", self.heading),
                ))
            }
        };

        let body = match self.image {
            Some(ref image) => format!("{}\n{}", renderer.render_image(image)?, text),
            None => text,
        };

        let section = Section::new(&self.heading, body)?;
        match self.anchor {
            Some(ref anchor) => section.with_anchor(anchor),
            None => Ok(section),
        }
    }
}
