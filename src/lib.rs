#![forbid(unsafe_code)]

//! @acp:module "fuse-site Library"
//! @acp:summary "Static page generator for the Fuse and libspectrum homepages"
//! @acp:domain site
//! @acp:layer api
//! @acp:stability stable
//!
//! # fuse-site
//!
//! Renders project homepages from a page descriptor and an ordered list of
//! titled sections.
//!
//! ## Features
//!
//! - **Pure rendering**: identical input gives byte-identical output
//! - **Typed input**: descriptors, sections and anchors validated at construction
//! - **Page definitions**: JSON or YAML files, or the built-in Fuse/libspectrum pages
//!
//! ## Example
//!
//! ```rust,no_run
//! use fuse_site::{PageDescriptor, PageRenderer, Section};
//!
//! fn main() -> fuse_site::Result<()> {
//!     let page = PageDescriptor::new("libspectrum - emulator support library", "libspectrum")?
//!         .with_related("Fuse", "fuse.html")?;
//!     let sections = vec![Section::new("What is it?", "<p>A support library.</p>")?];
//!
//!     let html = PageRenderer::new()?.render_page(&page, &sections)?;
//!     std::fs::write("libspectrum.html", html)?;
//!     Ok(())
//! }
//! ```

pub mod commands;
pub mod config;
pub mod error;
pub mod page;

// Re-exports
pub use config::SiteConfig;
pub use error::{Result, SiteError};
pub use page::{
    AnchorId, ChromeOptions, FooterOptions, ImageReference, PageDefinition, PageDescriptor,
    PageRenderer, RelatedProject, ResolvedPage, Section,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
