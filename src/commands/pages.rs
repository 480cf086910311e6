//! @acp:module "Pages Command"
//! @acp:summary "List the built-in pages"
//! @acp:domain cli
//! @acp:layer handler

use anyhow::Result;
use console::style;

use crate::page::builtin_pages;

/// Execute the pages command
pub fn execute_pages() -> Result<()> {
    let pages = builtin_pages()?;
    println!("Built-in pages ({}):\n", pages.len());
    for page in pages {
        let related = page
            .definition
            .related
            .as_ref()
            .map(|r| format!(" (see also {})", r.name))
            .unwrap_or_default();
        println!(
            "  {:15} {:2} sections  {}{}",
            style(&page.name).bold(),
            page.definition.sections.len(),
            page.definition.title,
            related
        );
    }
    Ok(())
}
