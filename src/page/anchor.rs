//! @acp:module "Section Anchors"
//! @acp:summary "Validated HTML id tokens for section headings"
//! @acp:domain site
//! @acp:layer types

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{Result, SiteError};

/// HTML id token: a letter followed by letters, digits, `_`, `.`, `:` or `-`
static ANCHOR_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9_.:-]*$").unwrap());

/// Anchor id of a section heading, usable as both `id` and `#fragment`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct AnchorId(String);

impl AnchorId {
    /// Parse an author-supplied anchor id
    pub fn parse(raw: &str) -> Result<Self> {
        if raw.is_empty() {
            return Err(SiteError::invalid("anchor_id", "must not be empty"));
        }
        if !ANCHOR_PATTERN.is_match(raw) {
            return Err(SiteError::invalid(
                "anchor_id",
                format!(
                    "{:?} must start with a letter and contain only letters, digits, '_', '.', ':' or '-'",
                    raw
                ),
            ));
        }
        Ok(Self(raw.to_string()))
    }

    /// Derive an anchor from heading text.
    ///
    /// Lowercases ASCII letters, keeps ASCII alphanumerics and collapses every
    /// other run of characters into a single `-`.
    pub fn derive(heading: &str) -> Self {
        let mut slug = String::with_capacity(heading.len());
        let mut pending_dash = false;

        for c in heading.chars() {
            if c.is_ascii_alphanumeric() {
                if pending_dash && !slug.is_empty() {
                    slug.push('-');
                }
                pending_dash = false;
                slug.push(c.to_ascii_lowercase());
            } else {
                pending_dash = true;
            }
        }

        if slug.is_empty() {
            return Self("section".to_string());
        }
        if slug.starts_with(|c: char| c.is_ascii_digit()) {
            slug.insert_str(0, "s-");
        }
        Self(slug)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AnchorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for AnchorId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        AnchorId::parse(&raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_accepts_id_tokens() {
        assert_eq!(AnchorId::parse("Download").unwrap().as_str(), "Download");
        assert_eq!(
            AnchorId::parse("Supported-formats").unwrap().as_str(),
            "Supported-formats"
        );
        assert!(AnchorId::parse("v0.6.1:notes_2").is_ok());
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for raw in ["", "has space", "1st", "-lead", "quote\"", "<b>"] {
            let err = AnchorId::parse(raw).unwrap_err();
            assert_eq!(err.field(), Some("anchor_id"), "input {:?}", raw);
        }
    }

    #[test]
    fn test_derive_from_heading() {
        assert_eq!(AnchorId::derive("What's new?").as_str(), "what-s-new");
        assert_eq!(AnchorId::derive("What is it?").as_str(), "what-is-it");
        assert_eq!(AnchorId::derive("  Downloads  ").as_str(), "downloads");
        assert_eq!(AnchorId::derive("0.6.1").as_str(), "s-0-6-1");
        assert_eq!(AnchorId::derive("?!").as_str(), "section");
    }

    #[test]
    fn test_derived_anchor_is_valid() {
        for heading in ["What's lacking?", "Cristi\u{e1}n", "1.2.3", "", "a--b"] {
            let derived = AnchorId::derive(heading);
            assert!(AnchorId::parse(derived.as_str()).is_ok(), "{:?}", derived);
        }
    }

    #[test]
    fn test_deserialize_validates() {
        let ok: AnchorId = serde_json::from_str("\"Features\"").unwrap();
        assert_eq!(ok.as_str(), "Features");
        assert!(serde_json::from_str::<AnchorId>("\"two words\"").is_err());
    }
}
