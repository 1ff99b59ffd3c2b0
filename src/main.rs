//! grafana-dashboard-sync: structural diff of Grafana dashboards and data sources
//!
//! Compares the configuration of two Grafana servers, or of snapshots taken
//! from them, and reports every difference.

#![allow(clippy::needless_pass_by_value)]

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use grafana_dashboard_sync::{
    cli,
    config::{
        discover_config_file, generate_full_example_config, generate_json_schema,
        load_or_default, AppConfig, DashboardKey, DataSourceRefMode, DiffConfigBuilder,
        VariableCountPolicy, CONFIG_DIR_NAME, CONFIG_FILE_NAMES,
    },
    pipeline::{exit_codes, should_use_color},
    reports::{ReportFormat, ReportType},
};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "grafana-dashboard-sync")]
#[command(version)]
#[command(about = "Structural diff of Grafana dashboards and data sources", long_about = None)]
#[command(after_help = "EXIT CODES:
    0  No differences (or differences without --fail-on-change)
    1  Differences found with --fail-on-change
    2  Error occurred

EXAMPLES:
    # Compare two configured servers
    grafana-dashboard-sync diff prod staging

    # Only dashboards whose title starts with App, as JSON
    grafana-dashboard-sync diff prod staging --dashboard '^App' -o json

    # Capture a snapshot and compare against it later
    grafana-dashboard-sync snapshot prod -O prod.json
    grafana-dashboard-sync diff prod.json staging --fail-on-change")]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Disable colored output (also respects `NO_COLOR` env)
    #[arg(long, global = true)]
    no_color: bool,

    /// Path to configuration file
    #[arg(long, global = true, env = "GRAFANA_DASHBOARD_SYNC_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Arguments for the `diff` subcommand
#[derive(Parser)]
struct DiffArgs {
    /// Left side: configured server name or snapshot file
    left: String,

    /// Right side: configured server name or snapshot file
    right: String,

    /// Output format (auto detects TTY: table if interactive, summary otherwise)
    #[arg(short, long)]
    output: Option<ReportFormat>,

    /// Output file path (stdout if not specified)
    #[arg(short = 'O', long)]
    output_file: Option<PathBuf>,

    /// Collections to compare
    #[arg(long, default_value = "all")]
    reports: ReportType,

    /// Only compare dashboards whose title matches this regex
    #[arg(long, value_name = "REGEX")]
    dashboard: Option<String>,

    /// How to treat dashboards with different variable counts
    #[arg(long)]
    variable_policy: Option<VariableCountPolicy>,

    /// Compare panel and target data source references
    #[arg(long)]
    datasource_refs: Option<DataSourceRefMode>,

    /// Pair dashboards by title or by uid
    #[arg(long)]
    dashboard_key: Option<DashboardKey>,

    /// Exit with code 1 if differences are found
    #[arg(long)]
    fail_on_change: bool,
}

/// Arguments for the `list` subcommand
#[derive(Parser)]
struct ListArgs {
    /// Configured server name or snapshot file
    source: String,

    /// Only list dashboards whose title matches this regex
    #[arg(long, value_name = "REGEX")]
    dashboard: Option<String>,

    /// Print JSON instead of aligned text
    #[arg(long)]
    json: bool,
}

/// Arguments for the `snapshot` subcommand
#[derive(Parser)]
struct SnapshotArgs {
    /// Configured server name
    server: String,

    /// Output file path (stdout if not specified)
    #[arg(short = 'O', long)]
    output_file: Option<PathBuf>,

    /// Only capture dashboards whose title matches this regex
    #[arg(long, value_name = "REGEX")]
    dashboard: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Compare two Grafana configurations
    Diff(DiffArgs),
    /// List dashboards and data sources of one server
    List(ListArgs),
    /// Save one server's configuration to a snapshot file
    Snapshot(SnapshotArgs),
    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
    /// Generate JSON Schema for the config file format
    ConfigSchema {
        /// Write schema to file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Show, discover, or initialize configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Sub-subcommands for the `config` command
#[derive(Subcommand)]
enum ConfigAction {
    /// Print current effective configuration (merged from defaults + file)
    Show,
    /// Print config file search paths and discovered config file
    Path,
    /// Generate an example .grafana-dashboard-sync.yaml in the current directory
    Init,
}

fn main() {
    let code = match run() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {err:?}");
            exit_codes::ERROR
        }
    };
    if code != exit_codes::SUCCESS {
        std::process::exit(code);
    }
}

fn run() -> Result<i32> {
    let cli = Cli::parse();

    let (app, loaded_from) = load_or_default(cli.config.as_deref())?;
    let use_color = app.color && should_use_color(cli.no_color);

    // Initialize logging
    let log_level = if cli.verbose || app.debug {
        "debug"
    } else {
        "info"
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| log_level.to_string()),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(io::stderr)
                .with_target(false)
                .with_ansi(use_color),
        )
        .init();

    if let Some(path) = &loaded_from {
        tracing::debug!("Using configuration file {}", path.display());
    }

    // Dispatch to command handlers
    match cli.command {
        Commands::Diff(args) => {
            let config = DiffConfigBuilder::from_app_config(&app)
                .left(args.left)
                .right(args.right)
                .output_format(args.output.unwrap_or(app.output.format))
                .output_file(args.output_file)
                .report_type(args.reports)
                .dashboard_filter(args.dashboard)
                .variable_policy(args.variable_policy)
                .datasource_refs(args.datasource_refs)
                .dashboard_key(args.dashboard_key)
                .fail_on_change(args.fail_on_change)
                .quiet(cli.quiet)
                .color(use_color)
                .build()?;
            cli::run_diff(&app, config)
        }
        Commands::List(args) => {
            let config = cli::ListConfig {
                source: args.source,
                dashboard_filter: args.dashboard.or_else(|| app.diff.dashboard_filter.clone()),
                json: args.json,
            };
            cli::run_list(&app, &config)?;
            Ok(exit_codes::SUCCESS)
        }
        Commands::Snapshot(args) => {
            let config = cli::SnapshotConfig {
                source: args.server,
                output_file: args.output_file,
                dashboard_filter: args.dashboard.or_else(|| app.diff.dashboard_filter.clone()),
                quiet: cli.quiet,
            };
            cli::run_snapshot(&app, config)?;
            Ok(exit_codes::SUCCESS)
        }
        Commands::Completions { shell } => {
            generate(
                shell,
                &mut Cli::command(),
                "grafana-dashboard-sync",
                &mut io::stdout(),
            );
            Ok(exit_codes::SUCCESS)
        }
        Commands::ConfigSchema { output } => {
            let schema = generate_json_schema().context("failed to generate schema")?;
            match output {
                Some(path) => {
                    std::fs::write(&path, &schema)
                        .with_context(|| format!("failed to write {}", path.display()))?;
                    eprintln!("Schema written to {}", path.display());
                }
                None => {
                    println!("{schema}");
                }
            }
            Ok(exit_codes::SUCCESS)
        }
        Commands::Config { action } => {
            run_config_action(action, &app, loaded_from, cli.config)?;
            Ok(exit_codes::SUCCESS)
        }
    }
}

fn run_config_action(
    action: ConfigAction,
    app: &AppConfig,
    loaded_from: Option<PathBuf>,
    explicit: Option<PathBuf>,
) -> Result<()> {
    match action {
        ConfigAction::Show => {
            if let Some(path) = &loaded_from {
                eprintln!("# Loaded from: {}", path.display());
            } else {
                eprintln!("# No config file found; showing defaults");
            }
            let yaml = serde_yaml::to_string(&redacted(app)).context("failed to serialize config")?;
            print!("{yaml}");
        }
        ConfigAction::Path => {
            let search_paths: [Option<String>; 3] = [
                std::env::current_dir()
                    .ok()
                    .map(|p| p.display().to_string()),
                dirs::config_dir().map(|p| p.join(CONFIG_DIR_NAME).display().to_string()),
                dirs::home_dir().map(|p| p.display().to_string()),
            ];
            eprintln!("Config file search paths (in order):");
            for path in search_paths.into_iter().flatten() {
                eprintln!("  {path}");
            }
            eprintln!();
            eprintln!("Recognized file names:");
            for name in CONFIG_FILE_NAMES {
                eprintln!("  {name}");
            }
            eprintln!();
            match discover_config_file(explicit.as_deref()) {
                Some(path) => eprintln!("Active config file: {}", path.display()),
                None => eprintln!("No config file found."),
            }
        }
        ConfigAction::Init => {
            let target = std::env::current_dir()
                .context("cannot determine current directory")?
                .join(CONFIG_FILE_NAMES[0]);
            if target.exists() {
                anyhow::bail!(
                    "{} already exists. Remove it first to re-initialize.",
                    target.display()
                );
            }
            std::fs::write(&target, generate_full_example_config())
                .with_context(|| format!("failed to write {}", target.display()))?;
            eprintln!("Created {}", target.display());
        }
    }
    Ok(())
}

/// Copy of the configuration with bearer tokens masked
fn redacted(app: &AppConfig) -> AppConfig {
    let mut copy = app.clone();
    for server in copy.servers.values_mut() {
        if server.bearer.is_some() {
            server.bearer = Some("********".to_string());
        }
    }
    copy
}
