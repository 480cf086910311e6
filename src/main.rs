#![forbid(unsafe_code)]
//! fuse-site Command Line Interface

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use fuse_site::commands::{
    execute_build, execute_pages, execute_render, execute_validate, BuildOptions, RenderOptions,
    ValidateOptions,
};
use fuse_site::config::{SiteConfig, DEFAULT_CONFIG_FILE};

#[derive(Parser)]
#[command(name = "fuse-site")]
#[command(about = "Static page generator for the Fuse and libspectrum homepages")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file path
    #[arg(short, long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Render one page to stdout or a file
    Render {
        /// Page definition file (.json, .yaml) or built-in page name
        page: String,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Render every configured page into the output directory
    Build {
        /// Only check that existing output is up to date
        #[arg(long)]
        check: bool,

        /// Number of parallel workers (default: number of CPUs)
        #[arg(short, long)]
        jobs: Option<usize>,

        /// Override the configured output directory
        #[arg(short, long)]
        output_dir: Option<PathBuf>,
    },

    /// Validate page definitions without writing anything
    Validate {
        /// Page definition files or built-in names (default: configured pages)
        pages: Vec<String>,
    },

    /// List the built-in pages
    Pages,
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut config = SiteConfig::load_or_default(&cli.config)?;

    match cli.command {
        Commands::Render { page, output } => {
            let options = RenderOptions { page, output };
            execute_render(options, &config)?;
        }

        Commands::Build { check, jobs, output_dir } => {
            if let Some(dir) = output_dir {
                config.output_dir = dir;
            }
            let options = BuildOptions { check, jobs };
            execute_build(options, &config)?;
        }

        Commands::Validate { pages } => {
            let options = ValidateOptions { pages };
            execute_validate(options, &config)?;
        }

        Commands::Pages => {
            execute_pages()?;
        }
    }

    Ok(())
}
