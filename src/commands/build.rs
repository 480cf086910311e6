//! @acp:module "Build Command"
//! @acp:summary "Render every configured page into the output directory"
//! @acp:domain cli
//! @acp:layer handler
//!
//! Pages are independent, so they render in parallel. A failing page is
//! reported and never stops the others.

use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{bail, Result};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use similar::TextDiff;

use super::render::render_source;
use crate::config::SiteConfig;
use crate::page::{builtin_names, page_name, PageRenderer};

/// Options for the build command
#[derive(Debug, Clone, Default)]
pub struct BuildOptions {
    /// Compare against existing output instead of writing
    pub check: bool,
    /// Number of parallel workers
    pub jobs: Option<usize>,
}

/// A page scheduled for building
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageJob {
    pub source: String,
    pub output: Option<PathBuf>,
}

/// What happened to one page
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageStatus {
    Written,
    Unchanged,
    /// Existing output differs; holds a unified diff from old to new
    Stale(String),
    Missing,
    Failed(String),
}

#[derive(Debug, Clone)]
pub struct PageOutcome {
    pub source: String,
    pub output: Option<PathBuf>,
    pub status: PageStatus,
}

impl PageOutcome {
    pub fn is_ok(&self) -> bool {
        matches!(self.status, PageStatus::Written | PageStatus::Unchanged)
    }
}

/// Pages named by the config, or every built-in page when none are
pub fn page_jobs(config: &SiteConfig) -> Vec<PageJob> {
    if config.pages.is_empty() {
        return builtin_names()
            .map(|name| PageJob {
                source: name.to_string(),
                output: None,
            })
            .collect();
    }
    config
        .pages
        .iter()
        .map(|entry| PageJob {
            source: entry.source.clone(),
            output: entry.output.clone(),
        })
        .collect()
}

/// Output path of each job. When two jobs resolve to the same path the
/// later one gets an error naming the earlier, so no file is written twice.
pub fn plan_outputs(jobs: &[PageJob], config: &SiteConfig) -> Vec<std::result::Result<PathBuf, String>> {
    let mut claimed: HashMap<PathBuf, &str> = HashMap::new();
    jobs.iter()
        .map(|job| {
            let output = config.output_path(job.output.as_deref(), &page_name(&job.source));
            if let Some(owner) = claimed.get(&output) {
                tracing::warn!("Pages {} and {} both write {}", owner, job.source, output.display());
                return Err(format!("{} is already written by {}", output.display(), owner));
            }
            claimed.insert(output.clone(), &job.source);
            Ok(output)
        })
        .collect()
}

/// Render all pages; write them, or with `check` compare with what is on disk
pub fn build_site(config: &SiteConfig, check: bool, progress: &ProgressBar) -> Result<Vec<PageOutcome>> {
    let renderer = PageRenderer::with_options(config.chrome_options())?;
    let jobs = page_jobs(config);
    let outputs = plan_outputs(&jobs, config);

    let outcomes: Vec<PageOutcome> = jobs
        .par_iter()
        .zip(outputs.par_iter())
        .map(|(job, output)| {
            let outcome = match output {
                Ok(output) => build_page(job, output, &renderer, check),
                Err(reason) => PageOutcome {
                    source: job.source.clone(),
                    output: None,
                    status: PageStatus::Failed(reason.clone()),
                },
            };
            progress.inc(1);
            outcome
        })
        .collect();

    Ok(outcomes)
}

fn build_page(job: &PageJob, output: &Path, renderer: &PageRenderer, check: bool) -> PageOutcome {
    let rendered = match render_source(&job.source, renderer) {
        Ok(r) => r,
        Err(e) => {
            return PageOutcome {
                source: job.source.clone(),
                output: None,
                status: PageStatus::Failed(e.to_string()),
            }
        }
    };

    let status = if check {
        compare_output(output, &rendered.html)
    } else {
        write_output(output, &rendered.html)
    };
    tracing::debug!("{} -> {}: {:?}", job.source, output.display(), status);

    PageOutcome {
        source: job.source.clone(),
        output: Some(output.to_path_buf()),
        status,
    }
}

fn write_output(output: &Path, html: &str) -> PageStatus {
    let result = (|| -> std::io::Result<()> {
        if let Some(parent) = output.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(output, html)
    })();

    match result {
        Ok(()) => PageStatus::Written,
        Err(e) => PageStatus::Failed(format!("Failed to write {}: {}", output.display(), e)),
    }
}

fn compare_output(output: &Path, html: &str) -> PageStatus {
    match std::fs::read_to_string(output) {
        Ok(existing) if existing == html => PageStatus::Unchanged,
        Ok(existing) => {
            let path = output.display().to_string();
            let diff = TextDiff::from_lines(existing.as_str(), html)
                .unified_diff()
                .context_radius(3)
                .header(&path, &path)
                .to_string();
            PageStatus::Stale(diff)
        }
        Err(e) if e.kind() == ErrorKind::NotFound => PageStatus::Missing,
        Err(e) => PageStatus::Failed(format!("Failed to read {}: {}", output.display(), e)),
    }
}

/// Execute the build command
pub fn execute_build(options: BuildOptions, config: &SiteConfig) -> Result<()> {
    // Configure thread pool if workers specified
    if let Some(num_workers) = options.jobs {
        rayon::ThreadPoolBuilder::new()
            .num_threads(num_workers)
            .build_global()
            .ok(); // Ignore error if already initialized
    }

    let verb = if options.check { "Checking" } else { "Building" };
    println!(
        "{} {} site into {}...",
        style("→").cyan(),
        verb,
        config.output_dir.display()
    );

    let progress = ProgressBar::new(page_jobs(config).len() as u64);
    progress.set_style(
        ProgressStyle::with_template("{bar:30.cyan/blue} {pos}/{len} pages")?.progress_chars("##-"),
    );
    let outcomes = build_site(config, options.check, &progress)?;
    progress.finish_and_clear();

    let mut failures = 0;
    for outcome in &outcomes {
        let target = outcome
            .output
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_default();
        match &outcome.status {
            PageStatus::Written => {
                println!("{} {} -> {}", style("✓").green(), outcome.source, target)
            }
            PageStatus::Unchanged => {
                println!("{} {} is up to date", style("✓").green(), outcome.source)
            }
            PageStatus::Stale(diff) => {
                println!("{} {} is out of date", style("✗").red(), outcome.source);
                print!("{}", diff);
            }
            PageStatus::Missing => {
                println!("{} {} has not been built ({})", style("✗").red(), outcome.source, target)
            }
            PageStatus::Failed(reason) => {
                eprintln!("{} {}: {}", style("✗").red(), outcome.source, reason)
            }
        }
        if !outcome.is_ok() {
            failures += 1;
        }
    }

    if failures > 0 {
        bail!("{} of {} pages failed", failures, outcomes.len());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PageEntry;

    fn config_in(dir: &Path) -> SiteConfig {
        SiteConfig {
            output_dir: dir.join("site"),
            ..Default::default()
        }
    }

    #[test]
    fn test_default_jobs_are_builtins() {
        let jobs = page_jobs(&SiteConfig::default());
        let sources: Vec<_> = jobs.iter().map(|j| j.source.as_str()).collect();
        assert_eq!(sources, vec!["fuse", "libspectrum"]);
    }

    #[test]
    fn test_build_then_check() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path());

        let built = build_site(&config, false, &ProgressBar::hidden()).unwrap();
        assert!(built.iter().all(|o| o.status == PageStatus::Written));
        assert!(config.output_dir.join("fuse.html").exists());
        assert!(config.output_dir.join("libspectrum.html").exists());

        let checked = build_site(&config, true, &ProgressBar::hidden()).unwrap();
        assert!(checked.iter().all(|o| o.status == PageStatus::Unchanged));
    }

    #[test]
    fn test_check_reports_stale_and_missing() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path());
        std::fs::create_dir_all(&config.output_dir).unwrap();
        std::fs::write(config.output_dir.join("fuse.html"), "<html>old</html>\n").unwrap();

        let outcomes = build_site(&config, true, &ProgressBar::hidden()).unwrap();
        let fuse = outcomes.iter().find(|o| o.source == "fuse").unwrap();
        match &fuse.status {
            PageStatus::Stale(diff) => assert!(diff.contains("-<html>old</html>")),
            other => panic!("expected stale, got {:?}", other),
        }
        let lib = outcomes.iter().find(|o| o.source == "libspectrum").unwrap();
        assert_eq!(lib.status, PageStatus::Missing);
        assert!(!config.output_dir.join("libspectrum.html").exists());
    }

    #[test]
    fn test_failed_page_does_not_stop_others() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = config_in(dir.path());
        config.pages = vec![
            PageEntry {
                source: "no-such-page".to_string(),
                output: None,
            },
            PageEntry {
                source: "fuse".to_string(),
                output: Some(PathBuf::from("index.html")),
            },
        ];

        let outcomes = build_site(&config, false, &ProgressBar::hidden()).unwrap();
        assert!(matches!(outcomes[0].status, PageStatus::Failed(_)));
        assert_eq!(outcomes[1].status, PageStatus::Written);
        assert!(config.output_dir.join("index.html").exists());
    }

    #[test]
    fn test_shared_output_fails_later_page() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = config_in(dir.path());
        config.pages = vec![
            PageEntry {
                source: "fuse".to_string(),
                output: Some(PathBuf::from("index.html")),
            },
            PageEntry {
                source: "libspectrum".to_string(),
                output: Some(PathBuf::from("index.html")),
            },
        ];

        let outcomes = build_site(&config, false, &ProgressBar::hidden()).unwrap();
        assert_eq!(outcomes[0].status, PageStatus::Written);
        match &outcomes[1].status {
            PageStatus::Failed(reason) => assert!(reason.contains("already written by fuse")),
            other => panic!("expected failure, got {:?}", other),
        }
        assert_eq!(outcomes[1].output, None);

        let html = std::fs::read_to_string(config.output_dir.join("index.html")).unwrap();
        assert!(html.contains("<title>Fuse - the Free Unix Spectrum Emulator</title>"));
    }

    #[test]
    fn test_entry_output_collides_with_derived_name() {
        let config = SiteConfig {
            pages: vec![
                PageEntry {
                    source: "content/fuse.yaml".to_string(),
                    output: None,
                },
                PageEntry {
                    source: "libspectrum".to_string(),
                    output: Some(PathBuf::from("fuse.html")),
                },
            ],
            ..Default::default()
        };

        let outputs = plan_outputs(&page_jobs(&config), &config);
        assert_eq!(outputs[0], Ok(config.output_dir.join("fuse.html")));
        assert!(outputs[1].is_err());
    }
}
