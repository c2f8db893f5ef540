//! `mdsite build` command implementation.

use std::path::PathBuf;

use clap::Args;
use mdsite_config::{CliSettings, Config};
use mdsite_site::{BuildConfig, SiteBuilder};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the build command.
#[derive(Args)]
pub(crate) struct BuildArgs {
    /// Path to configuration file (default: auto-discover mdsite.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Markdown content directory (overrides config).
    #[arg(long)]
    content_dir: Option<PathBuf>,

    /// Static assets directory (overrides config).
    #[arg(long)]
    static_dir: Option<PathBuf>,

    /// Page template (overrides config).
    #[arg(short, long)]
    template: Option<PathBuf>,

    /// Output directory for the generated site (overrides config).
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Number of worker threads for page generation.
    #[arg(short, long, env = "MDSITE_JOBS")]
    jobs: Option<usize>,

    /// Keep existing files in the output directory.
    #[arg(long)]
    no_clean: bool,
}

impl BuildArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            content_dir: self.content_dir,
            static_dir: self.static_dir,
            template: self.template,
            output_dir: self.output_dir,
            clean: self.no_clean.then_some(false),
            jobs: self.jobs,
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        let site = &config.site_resolved;

        output.info(&format!("Content: {}", site.content_dir.display()));
        output.info(&format!("Output: {}", site.output_dir.display()));

        let builder = SiteBuilder::new(BuildConfig {
            content_dir: site.content_dir.clone(),
            static_dir: site.static_dir.clone(),
            template: site.template.clone(),
            output_dir: site.output_dir.clone(),
            clean: config.build.clean,
            jobs: config.build.jobs,
        });
        let report = builder.build()?;

        output.success(&format!(
            "Generated {} pages ({} static files) in {}",
            report.pages.len(),
            report.static_files,
            site.output_dir.display()
        ));
        Ok(())
    }
}
