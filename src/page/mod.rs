//! @acp:module "Page"
//! @acp:summary "Page model, content loading and HTML rendering"
//! @acp:domain site
//! @acp:layer feature

pub mod anchor;
pub mod image;
pub mod loader;
pub mod renderer;
pub mod types;

pub use anchor::AnchorId;
pub use image::ImageReference;
pub use loader::{
    builtin_names, builtin_page, builtin_pages, load_page, load_page_definition, page_name,
    parse_page_definition, DefinitionFormat, LoadedPage, PageDefinition, ResolvedPage,
    SectionDefinition,
};
pub use renderer::{ChromeOptions, PageRenderer};
pub use types::*;
