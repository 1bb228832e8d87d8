//! CLI module for the maintenance notice generator.
//!
//! Provides subcommands besides the preview server:
//! - `render` - Render a notice to stdout or a file
//! - `statuses` - List the available statuses
//! - `config check` - Validate configuration file

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::email::{MaintenanceForm, StatusKey};
use crate::templates::{describe, Assets, DEFAULT_STYLESHEET, DEFAULT_TEMPLATE};

/// CLI arguments structure
#[derive(Parser, Debug)]
#[command(name = "maintenance-preview")]
#[command(author, version, about = "Live preview generator for maintenance notification emails", long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(
        short,
        long,
        env = "MAINTENANCE_PREVIEW_CONFIG",
        default_value = "maintenance-preview.toml"
    )]
    pub config: PathBuf,

    /// Override log level
    #[arg(short, long)]
    pub log_level: Option<String>,

    /// Skip startup self-checks (for development only)
    #[arg(long)]
    pub skip_checks: bool,

    /// Subcommand to run (if none, starts the preview server)
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render a maintenance notice
    Render(RenderArgs),

    /// List maintenance statuses
    Statuses,

    /// Configuration management commands
    #[command(subcommand)]
    Config(ConfigCommands),
}

#[derive(clap::Args, Debug)]
pub struct RenderArgs {
    /// Notice title (defaults to the configured title)
    #[arg(short, long)]
    pub title: Option<String>,

    /// Status: scheduled, in-progress, completed or cancelled
    #[arg(short, long, default_value = "scheduled")]
    pub status: String,

    /// Notice description (defaults to the configured description)
    #[arg(short, long)]
    pub description: Option<String>,

    /// Start time, YYYY-MM-DDTHH:MM
    #[arg(long)]
    pub start: Option<String>,

    /// End time, YYYY-MM-DDTHH:MM
    #[arg(long)]
    pub end: Option<String>,

    /// Affected component (repeat for several, order is kept)
    #[arg(long = "component")]
    pub components: Vec<String>,

    /// Write to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Emit only the notice markup, without the stylesheet
    #[arg(long)]
    pub html_only: bool,
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Validate configuration file
    Check,
}

impl RenderArgs {
    pub fn to_form(&self, config: &Config) -> MaintenanceForm {
        MaintenanceForm {
            title: self
                .title
                .clone()
                .unwrap_or_else(|| config.form.default_title.clone()),
            status: StatusKey::from_key(&self.status),
            description: self
                .description
                .clone()
                .unwrap_or_else(|| config.form.default_description.clone()),
            start_time: self.start.clone(),
            end_time: self.end.clone(),
            components: self.components.clone(),
        }
    }
}

/// Run a CLI command with the outcome of loading `cli.config`
pub fn run_command(cli: &Cli, config: Result<Config>) -> Result<()> {
    match &cli.command {
        Some(Commands::Render(args)) => cmd_render(&config?, args),
        Some(Commands::Statuses) => cmd_statuses(),
        Some(Commands::Config(ConfigCommands::Check)) => cmd_config_check(&cli.config, config),
        None => {
            // No subcommand means start the server - this is handled in main.rs
            Ok(())
        }
    }
}

/// Render a notice for the given arguments
pub fn render_notice(config: &Config, args: &RenderArgs) -> Result<String> {
    let assets = Assets::load(&config.templates).context("Failed to load notice template")?;
    let preview = assets
        .render(&args.to_form(config))
        .context("Failed to render notice")?;

    Ok(if args.html_only {
        preview.html
    } else {
        preview.document()
    })
}

fn cmd_render(config: &Config, args: &RenderArgs) -> Result<()> {
    let output = render_notice(config, args)?;

    match &args.output {
        Some(path) => {
            std::fs::write(path, &output)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            tracing::info!(path = %path.display(), bytes = output.len(), "Notice written");
        }
        None => println!("{}", output),
    }

    Ok(())
}

fn cmd_statuses() -> Result<()> {
    println!("{:<14} {:<16} {}", "KEY", "LABEL", "END LABEL");
    for status in StatusKey::ALL {
        let meta = status.metadata();
        println!(
            "{:<14} {:<16} {}",
            status.as_str(),
            format!("{} {}", meta.icon, meta.label),
            meta.end_label
        );
    }
    Ok(())
}

/// Validate configuration file
fn cmd_config_check(config_path: &Path, loaded: Result<Config>) -> Result<()> {

    println!("Checking configuration file: {}", config_path.display());
    println!();

    if !config_path.exists() {
        println!(
            "[!!] Configuration file not found: {}",
            config_path.display()
        );
        println!();
        println!("A default configuration will be used when starting the server.");
        println!(
            "To create a custom configuration, copy maintenance-preview.example.toml to maintenance-preview.toml"
        );
        return Ok(());
    }

    match loaded {
        Ok(config) => {
            println!("[OK] Configuration file is valid!");
            println!();
            println!("=== Configuration Summary ===");
            println!();
            println!("Server:");
            println!("  Host:         {}", config.server.host);
            println!("  Port:         {}", config.server.port);
            println!();
            println!("Templates:");
            println!(
                "  Template:     {}",
                describe(config.templates.template_path.as_deref(), DEFAULT_TEMPLATE)
            );
            println!(
                "  Stylesheet:   {}",
                describe(
                    config.templates.stylesheet_path.as_deref(),
                    DEFAULT_STYLESHEET
                )
            );
            println!(
                "  Reload:       {}",
                if config.templates.reload {
                    "Every render"
                } else {
                    "Once at startup"
                }
            );
            println!();
            println!("Form:");
            println!("  Title:        {}", config.form.default_title);
            println!("  Components:   {}", config.form.components.join(", "));
            println!();

            let report = crate::startup::run_startup_checks(&config);
            let failed: Vec<_> = report.checks.iter().filter(|c| !c.passed).collect();
            if !failed.is_empty() {
                println!("Warnings:");
                for check in failed {
                    let severity = if check.critical { "CRITICAL" } else { "WARN" };
                    println!("  [!] {} ({}): {}", check.name, severity, check.message);
                    if let Some(details) = &check.details {
                        println!("      {}", details);
                    }
                }
                println!();
            }

            if !report.all_critical_passed {
                anyhow::bail!("{}", report.summary);
            }
            Ok(())
        }
        Err(e) => {
            println!("[!!] Configuration file is invalid!");
            println!();
            println!("Error: {:#}", e);
            println!();
            println!("Please check the configuration file syntax and try again.");
            anyhow::bail!("Invalid configuration file");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    #[test]
    fn test_no_subcommand_starts_server() {
        let cli = parse(&["maintenance-preview"]);
        assert!(cli.command.is_none());
        assert_eq!(cli.config, PathBuf::from("maintenance-preview.toml"));
    }

    #[test]
    fn test_render_args_keep_component_order() {
        let cli = parse(&[
            "maintenance-preview",
            "render",
            "--status",
            "in-progress",
            "--component",
            "Database",
            "--component",
            "API",
            "--component",
            "Database",
        ]);
        let Some(Commands::Render(args)) = cli.command else {
            panic!("Expected render command");
        };
        let form = args.to_form(&Config::default());
        assert_eq!(form.status, StatusKey::InProgress);
        assert_eq!(form.components, vec!["Database", "API", "Database"]);
        assert_eq!(form.title, "Server Maintenance");
    }

    #[test]
    fn test_render_notice() {
        let cli = parse(&[
            "maintenance-preview",
            "render",
            "--title",
            "DB Upgrade",
            "--status",
            "in-progress",
            "--start",
            "2024-06-01T09:00",
            "--component",
            "Database",
            "--html-only",
        ]);
        let Some(Commands::Render(args)) = cli.command else {
            panic!("Expected render command");
        };

        let html = render_notice(&Config::default(), &args).unwrap();
        assert!(!html.starts_with("<style>"));
        assert!(html.contains("DB Upgrade"));
        assert!(html.contains("Jun 01, 09:00 AM UTC"));
        assert!(html.contains("Expected completion"));
    }

    #[test]
    fn test_config_check_reports_invalid_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[server]\nport = \"x\"").unwrap();

        let cli = parse(&[
            "maintenance-preview",
            "--config",
            file.path().to_str().unwrap(),
            "config",
            "check",
        ]);
        let loaded = Config::load(&cli.config);
        assert!(loaded.is_err());

        let err = run_command(&cli, loaded).unwrap_err();
        assert_eq!(err.to_string(), "Invalid configuration file");
    }

    #[test]
    fn test_config_check_valid_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[server]\nport = 9000").unwrap();

        let loaded = Config::load(file.path());
        assert!(cmd_config_check(file.path(), loaded).is_ok());
    }

    #[test]
    fn test_statuses_ignores_broken_config() {
        let cli = parse(&["maintenance-preview", "statuses"]);
        assert!(run_command(&cli, Err(anyhow::anyhow!("broken"))).is_ok());
    }

    #[test]
    fn test_render_requires_loaded_config() {
        let cli = parse(&["maintenance-preview", "render"]);
        let err = run_command(&cli, Err(anyhow::anyhow!("broken"))).unwrap_err();
        assert_eq!(err.to_string(), "broken");
    }

    #[test]
    fn test_render_notice_invalid_time() {
        let cli = parse(&["maintenance-preview", "render", "--end", "later"]);
        let Some(Commands::Render(args)) = cli.command else {
            panic!("Expected render command");
        };

        let err = render_notice(&Config::default(), &args).unwrap_err();
        assert!(format!("{:#}", err).contains("end_time"));
    }
}
