//! @acp:module "Page Renderer"
//! @acp:summary "Assemble page chrome and sections into a single HTML document"
//! @acp:domain site
//! @acp:layer output
//!
//! Rendering is a single pure pass: title, menu heading, each section in
//! order, the related-project block (if any) and the footer. Section bodies
//! are trusted author markup and are inserted verbatim; nothing is escaped.

use std::collections::HashSet;

use handlebars::Handlebars;
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::image::ImageReference;
use super::types::{FooterOptions, PageDescriptor, Section};
use crate::error::{Result, SiteError};

const TITLE_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{{title}}</title>
{{#if stylesheet}}<link rel="stylesheet" type="text/css" href="{{stylesheet}}">
{{/if}}</head>
<body>
<div class="header">
<h1>{{title}}</h1>
{{#if tagline}}<p class="tagline">{{tagline}}</p>
{{/if}}</div>
"#;

const MENU_HEADING_TEMPLATE: &str = r#"<div class="menu">
<h2 class="menu-heading">{{text}}</h2>
</div>
"#;

const SECTION_TEMPLATE: &str = r##"<div class="section" id="{{anchor}}">
<h2><a href="#{{anchor}}">{{heading}}</a></h2>
{{body}}
</div>
"##;

const IMAGE_TEMPLATE: &str = r#"<img class="screenshot" src="{{path}}" width="{{width}}" height="{{height}}" alt="{{alt}}">"#;

const RELATED_TEMPLATE: &str = r#"<div class="related">
<p>See also: <a href="{{link}}">{{name}}</a></p>
</div>
"#;

const FOOTER_TEMPLATE: &str = r#"<div class="footer">
<p class="license">{{license}}</p>
<p class="timestamp">Last modified: {{timestamp}}</p>
</div>
</body>
</html>
"#;

fn default_tagline() -> String {
    "The Free Unix Spectrum Emulator".to_string()
}

/// Page chrome shared by every page of a site
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChromeOptions {
    /// Stylesheet linked from the document head
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stylesheet: Option<String>,

    /// Secondary tagline shown when a page asks for a subtitle
    #[serde(default = "default_tagline")]
    pub tagline: String,

    #[serde(default)]
    pub footer: FooterOptions,
}

impl Default for ChromeOptions {
    fn default() -> Self {
        Self {
            stylesheet: None,
            tagline: default_tagline(),
            footer: FooterOptions::default(),
        }
    }
}

/// Stateless page renderer. One instance can serve any number of pages,
/// from any number of threads.
pub struct PageRenderer {
    registry: Handlebars<'static>,
    options: ChromeOptions,
}

impl std::fmt::Debug for PageRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PageRenderer")
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl PageRenderer {
    /// Renderer with the default chrome
    pub fn new() -> Result<Self> {
        Self::with_options(ChromeOptions::default())
    }

    pub fn with_options(options: ChromeOptions) -> Result<Self> {
        let mut registry = Handlebars::new();
        registry.register_escape_fn(handlebars::no_escape);
        registry.register_template_string("title", TITLE_TEMPLATE)?;
        registry.register_template_string("menu_heading", MENU_HEADING_TEMPLATE)?;
        registry.register_template_string("section", SECTION_TEMPLATE)?;
        registry.register_template_string("image", IMAGE_TEMPLATE)?;
        registry.register_template_string("related", RELATED_TEMPLATE)?;
        registry.register_template_string("footer", FOOTER_TEMPLATE)?;
        Ok(Self { registry, options })
    }

    pub fn options(&self) -> &ChromeOptions {
        &self.options
    }

    /// Document head and title block
    pub fn render_title(&self, descriptor: &PageDescriptor) -> Result<String> {
        if descriptor.title().trim().is_empty() {
            return Err(SiteError::invalid("title", "must not be empty"));
        }
        let tagline = descriptor
            .show_subtitle()
            .then_some(self.options.tagline.as_str())
            .filter(|t| !t.is_empty());
        let data = json!({
            "title": descriptor.title(),
            "tagline": tagline,
            "stylesheet": self.options.stylesheet,
        });
        Ok(self.registry.render("title", &data)?)
    }

    /// Navigation section heading
    pub fn render_menu_heading(&self, text: &str) -> Result<String> {
        Ok(self.registry.render("menu_heading", &json!({ "text": text }))?)
    }

    /// Anchored heading followed by the body, verbatim
    pub fn render_section(&self, section: &Section) -> Result<String> {
        let anchor = section.effective_anchor();
        let data = json!({
            "anchor": anchor.as_str(),
            "heading": section.heading(),
            "body": section.body(),
        });
        Ok(self.registry.render("section", &data)?)
    }

    /// `<img>` tag with explicit, possibly downscaled, dimensions
    pub fn render_image(&self, image: &ImageReference) -> Result<String> {
        let (width, height) = image.display_size()?;
        let data = json!({
            "path": image.path,
            "width": width,
            "height": height,
            "alt": image.alt.as_deref().unwrap_or(""),
        });
        Ok(self.registry.render("image", &data)?)
    }

    /// Cross-link to a companion project
    pub fn render_related(&self, name: &str, link: &str) -> Result<String> {
        if name.trim().is_empty() {
            return Err(SiteError::invalid("related.name", "must not be empty"));
        }
        if link.trim().is_empty() {
            return Err(SiteError::invalid("related.link", "must not be empty"));
        }
        Ok(self
            .registry
            .render("related", &json!({ "name": name, "link": link }))?)
    }

    /// License notice, timestamp and closing tags
    pub fn render_footer(&self) -> Result<String> {
        let footer = &self.options.footer;
        let data = json!({
            "license": footer.license_notice,
            "timestamp": footer.timestamp(),
        });
        Ok(self.registry.render("footer", &data)?)
    }

    /// Render a complete document. Any invalid input aborts the whole page.
    ///
    /// Every section must resolve to a distinct anchor, explicit or derived.
    pub fn render_page(&self, descriptor: &PageDescriptor, sections: &[Section]) -> Result<String> {
        let mut anchors = HashSet::with_capacity(sections.len());
        for section in sections {
            let anchor = section.effective_anchor();
            if !anchors.insert(anchor.as_str().to_string()) {
                return Err(SiteError::invalid(
                    "anchor_id",
                    format!("{:?} is used by more than one section", anchor.as_str()),
                ));
            }
        }

        let mut output = self.render_title(descriptor)?;
        output.push_str(&self.render_menu_heading(descriptor.menu_heading())?);

        for section in sections {
            tracing::debug!(
                "Rendering section {:?} ({} bytes)",
                section.heading(),
                section.body().len()
            );
            output.push_str(&self.render_section(section)?);
        }

        if let Some(related) = descriptor.related() {
            output.push_str(&self.render_related(&related.name, &related.link)?);
        }

        output.push_str(&self.render_footer()?);

        tracing::debug!(
            "Rendered page {:?}: {} sections, {} bytes",
            descriptor.title(),
            sections.len(),
            output.len()
        );
        Ok(output)
    }
}
