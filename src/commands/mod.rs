//! @acp:module "Commands"
//! @acp:summary "CLI command implementations"
//! @acp:domain cli
//! @acp:layer handler
//!
//! Provides implementations for all CLI commands.
//! Each command is in its own submodule for maintainability.

pub mod build;
pub mod pages;
pub mod render;
pub mod validate;

pub use build::{
    build_site, execute_build, page_jobs, plan_outputs, BuildOptions, PageJob, PageOutcome, PageStatus,
};
pub use pages::execute_pages;
pub use render::{execute_render, render_source, RenderOptions, RenderedPage};
pub use validate::{execute_validate, validate_pages, ValidateOptions};
