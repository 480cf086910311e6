//! @acp:module "Image References"
//! @acp:summary "Screenshot references with optional integer downscaling"
//! @acp:domain site
//! @acp:layer types

use serde::{Deserialize, Serialize};

use crate::error::{Result, SiteError};

/// An image embedded in a section body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ImageReference {
    pub path: String,
    pub width: u32,
    pub height: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale_divisor: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
}

impl ImageReference {
    pub fn new(path: impl Into<String>, width: u32, height: u32) -> Result<Self> {
        let image = Self {
            path: path.into(),
            width,
            height,
            scale_divisor: None,
            alt: None,
        };
        image.validate()?;
        Ok(image)
    }

    /// Display the image at `1/divisor` of its natural size
    pub fn with_scale(mut self, divisor: u32) -> Result<Self> {
        self.scale_divisor = Some(divisor);
        self.validate()?;
        Ok(self)
    }

    pub fn with_alt(mut self, alt: impl Into<String>) -> Self {
        self.alt = Some(alt.into());
        self
    }

    /// Check dimensions and divisor. Deserialized references skip the
    /// constructors, so the renderer calls this again before use.
    pub fn validate(&self) -> Result<()> {
        if self.path.is_empty() {
            return Err(SiteError::invalid("image.path", "must not be empty"));
        }
        if self.width == 0 {
            return Err(SiteError::invalid("image.width", "must be greater than zero"));
        }
        if self.height == 0 {
            return Err(SiteError::invalid("image.height", "must be greater than zero"));
        }
        if self.scale_divisor == Some(0) {
            return Err(SiteError::invalid(
                "image.scale_divisor",
                "must be greater than zero",
            ));
        }
        Ok(())
    }

    /// Displayed `(width, height)`, floor-divided by the scale divisor
    pub fn display_size(&self) -> Result<(u32, u32)> {
        self.validate()?;
        let divisor = self.scale_divisor.unwrap_or(1);
        Ok((self.width / divisor, self.height / divisor))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unscaled_size() {
        let image = ImageReference::new("screens/f-awm.png", 330, 292).unwrap();
        assert_eq!(image.display_size().unwrap(), (330, 292));
    }

    #[test]
    fn test_scaled_size_floors() {
        let image = ImageReference::new("screens/f-large.png", 650, 532)
            .unwrap()
            .with_scale(4)
            .unwrap();
        assert_eq!(image.display_size().unwrap(), (162, 133));
    }

    #[test]
    fn test_rejects_zero_dimensions() {
        let err = ImageReference::new("x.png", 0, 10).unwrap_err();
        assert_eq!(err.field(), Some("image.width"));
        let err = ImageReference::new("x.png", 10, 0).unwrap_err();
        assert_eq!(err.field(), Some("image.height"));
        let err = ImageReference::new("x.png", 10, 10)
            .unwrap()
            .with_scale(0)
            .unwrap_err();
        assert_eq!(err.field(), Some("image.scale_divisor"));
    }

    #[test]
    fn test_deserialized_reference_is_checked_on_use() {
        let image: ImageReference =
            serde_json::from_str(r#"{"path": "x.png", "width": 0, "height": 5}"#).unwrap();
        assert!(image.display_size().is_err());
    }

    #[test]
    fn test_negative_dimensions_do_not_parse() {
        let parsed =
            serde_json::from_str::<ImageReference>(r#"{"path": "x.png", "width": -1, "height": 5}"#);
        assert!(parsed.is_err());
    }
}
