//! @acp:module "Configuration"
//! @acp:summary "Site configuration loading and defaults"
//! @acp:domain site
//! @acp:layer config

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::page::ChromeOptions;

/// Default config file name, looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = ".fuse-site.json";

fn default_output_dir() -> PathBuf {
    PathBuf::from("site")
}

/// @acp:summary "Main site configuration structure"
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteConfig {
    /// Directory generated pages are written to
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Pages to build; empty builds the built-in pages
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub pages: Vec<PageEntry>,

    /// Stylesheet, tagline and footer shared by all pages
    #[serde(default)]
    pub chrome: ChromeOptions,

    /// Fill the footer timestamp with today's date when none is configured
    #[serde(default)]
    pub stamp_date: bool,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            pages: Vec::new(),
            chrome: ChromeOptions::default(),
            stamp_date: false,
        }
    }
}

/// One page to build
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageEntry {
    /// Page definition path or built-in page name
    pub source: String,

    /// Output file name inside the output directory (default: `<name>.html`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<PathBuf>,
}

impl SiteConfig {
    /// @acp:summary "Load config from a .fuse-site.json file"
    pub fn load<P: AsRef<Path>>(path: P) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// @acp:summary "Save config to a file"
    pub fn save<P: AsRef<Path>>(&self, path: P) -> crate::Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Load the file if it exists, otherwise use defaults
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> crate::Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            Self::load(path)
        } else {
            tracing::debug!("No config at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Page chrome with the date stamp applied
    pub fn chrome_options(&self) -> ChromeOptions {
        let mut chrome = self.chrome.clone();
        if self.stamp_date && chrome.footer.last_modified.is_none() {
            chrome.footer.last_modified = Some(chrono::Utc::now().format("%Y-%m-%d").to_string());
        }
        chrome
    }

    /// Output path for a page
    pub fn output_path(&self, entry_output: Option<&Path>, page_name: &str) -> PathBuf {
        match entry_output {
            Some(output) => self.output_dir.join(output),
            None => self.output_dir.join(format!("{}.html", page_name)),
        }
    }
}
