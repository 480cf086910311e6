//! @acp:module "Page Types"
//! @acp:summary "Page descriptor, sections and footer options"
//! @acp:domain site
//! @acp:layer types

use serde::{Deserialize, Serialize};

use super::anchor::AnchorId;
use crate::error::{Result, SiteError};

/// Page-level metadata: title, navigation heading and optional cross-link
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageDescriptor {
    title: String,
    show_subtitle: bool,
    menu_heading: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    related: Option<RelatedProject>,
}

impl PageDescriptor {
    pub fn new(title: impl Into<String>, menu_heading: impl Into<String>) -> Result<Self> {
        let title = title.into();
        let menu_heading = menu_heading.into();
        if title.trim().is_empty() {
            return Err(SiteError::invalid("title", "must not be empty"));
        }
        if menu_heading.trim().is_empty() {
            return Err(SiteError::invalid("menu_heading", "must not be empty"));
        }
        Ok(Self {
            title,
            show_subtitle: false,
            menu_heading,
            related: None,
        })
    }

    /// Include the secondary tagline under the title
    pub fn with_subtitle(mut self, show: bool) -> Self {
        self.show_subtitle = show;
        self
    }

    /// Link to a companion project's page after the last section
    pub fn with_related(mut self, name: impl Into<String>, link: impl Into<String>) -> Result<Self> {
        self.related = Some(RelatedProject::new(name, link)?);
        Ok(self)
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn show_subtitle(&self) -> bool {
        self.show_subtitle
    }

    pub fn menu_heading(&self) -> &str {
        &self.menu_heading
    }

    pub fn related(&self) -> Option<&RelatedProject> {
        self.related.as_ref()
    }
}

/// Cross-link to a companion project's page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RelatedProject {
    pub name: String,
    pub link: String,
}

impl RelatedProject {
    pub fn new(name: impl Into<String>, link: impl Into<String>) -> Result<Self> {
        let related = Self {
            name: name.into(),
            link: link.into(),
        };
        related.validate()?;
        Ok(related)
    }

    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(SiteError::invalid("related.name", "must not be empty"));
        }
        if self.link.trim().is_empty() {
            return Err(SiteError::invalid("related.link", "must not be empty"));
        }
        Ok(())
    }
}

/// One titled block of page content. The body is trusted markup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    #[serde(skip_serializing_if = "Option::is_none")]
    anchor_id: Option<AnchorId>,
    heading: String,
    body: String,
}

impl Section {
    pub fn new(heading: impl Into<String>, body: impl Into<String>) -> Result<Self> {
        let heading = heading.into();
        if heading.trim().is_empty() {
            return Err(SiteError::invalid("heading", "must not be empty"));
        }
        Ok(Self {
            anchor_id: None,
            heading,
            body: body.into(),
        })
    }

    /// Use an explicit anchor instead of one derived from the heading
    pub fn with_anchor(mut self, anchor: &str) -> Result<Self> {
        self.anchor_id = Some(AnchorId::parse(anchor)?);
        Ok(self)
    }

    pub fn anchor_id(&self) -> Option<&AnchorId> {
        self.anchor_id.as_ref()
    }

    /// Explicit anchor if set, otherwise derived from the heading
    pub fn effective_anchor(&self) -> AnchorId {
        self.anchor_id
            .clone()
            .unwrap_or_else(|| AnchorId::derive(&self.heading))
    }

    pub fn heading(&self) -> &str {
        &self.heading
    }

    pub fn body(&self) -> &str {
        &self.body
    }
}

fn default_license_notice() -> String {
    "This page is distributed under the terms of the GNU General Public License, version 2 or later."
        .to_string()
}

fn default_timestamp_placeholder() -> String {
    "$Date$".to_string()
}

/// Footer content: license notice and last-modified stamp
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FooterOptions {
    #[serde(default = "default_license_notice")]
    pub license_notice: String,

    /// Shown as the timestamp; the placeholder is emitted when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<String>,

    #[serde(default = "default_timestamp_placeholder")]
    pub timestamp_placeholder: String,
}

impl Default for FooterOptions {
    fn default() -> Self {
        Self {
            license_notice: default_license_notice(),
            last_modified: None,
            timestamp_placeholder: default_timestamp_placeholder(),
        }
    }
}

impl FooterOptions {
    pub fn timestamp(&self) -> &str {
        self.last_modified
            .as_deref()
            .unwrap_or(&self.timestamp_placeholder)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descriptor_requires_title() {
        let err = PageDescriptor::new("", "Fuse").unwrap_err();
        assert_eq!(err.field(), Some("title"));
        let err = PageDescriptor::new("   ", "Fuse").unwrap_err();
        assert_eq!(err.field(), Some("title"));
    }

    #[test]
    fn test_descriptor_requires_menu_heading() {
        let err = PageDescriptor::new("Fuse", "").unwrap_err();
        assert_eq!(err.field(), Some("menu_heading"));
    }

    #[test]
    fn test_descriptor_builders() {
        let page = PageDescriptor::new("Fuse - the Free Unix Spectrum Emulator", "Fuse")
            .unwrap()
            .with_subtitle(true)
            .with_related("libspectrum", "libspectrum.php")
            .unwrap();
        assert!(page.show_subtitle());
        let related = page.related().unwrap();
        assert_eq!(related.name, "libspectrum");
        assert_eq!(related.link, "libspectrum.php");
    }

    #[test]
    fn test_related_requires_name_and_link() {
        let page = PageDescriptor::new("Fuse", "Fuse").unwrap();
        let err = page.clone().with_related("", "fuse.php").unwrap_err();
        assert_eq!(err.field(), Some("related.name"));
        let err = page.with_related("Fuse", "").unwrap_err();
        assert_eq!(err.field(), Some("related.link"));
    }

    #[test]
    fn test_section_anchor() {
        let derived = Section::new("What's new?", "<p>x</p>").unwrap();
        assert!(derived.anchor_id().is_none());
        assert_eq!(derived.effective_anchor().as_str(), "what-s-new");

        let explicit = Section::new("Which formats?", "")
            .unwrap()
            .with_anchor("Supported-formats")
            .unwrap();
        assert_eq!(explicit.effective_anchor().as_str(), "Supported-formats");
    }

    #[test]
    fn test_section_rejects_bad_anchor() {
        let err = Section::new("Features", "")
            .unwrap()
            .with_anchor("two words")
            .unwrap_err();
        assert_eq!(err.field(), Some("anchor_id"));
    }

    #[test]
    fn test_footer_timestamp() {
        let mut footer = FooterOptions::default();
        assert_eq!(footer.timestamp(), "$Date$");
        footer.last_modified = Some("2007-06-03".to_string());
        assert_eq!(footer.timestamp(), "2007-06-03");
    }
}
