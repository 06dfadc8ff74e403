//! MIFIDPRU CLI - prudential calculations from the command line
//!
//! # Commands
//!
//! - `mifidpru init <name>` - Create a firm and select it
//! - `mifidpru calculate` - Run classification, K-factors, FOR, OFR and LATR
//! - `mifidpru stress` - Run stress scenarios
//! - `mifidpru monitor` - Compare resources held with the thresholds
//! - `mifidpru report` - Export a regulatory return
//! - `mifidpru document` - Write the ICARA document

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use mifidpru_cli::commands;
use mifidpru_cli::config::{build_config, CliArgs};
use mifidpru_cli::session::AppContext;
use mifidpru_core::profile::FirmActivity;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// MIFIDPRU prudential calculation engine
#[derive(Parser, Debug)]
#[command(name = "mifidpru")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Configuration file path (TOML format)
    #[arg(short, long, global = true, value_name = "FILE", env = "MIFIDPRU_CONFIG")]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Firm data file
    #[arg(long, global = true, value_name = "FILE")]
    data_file: Option<PathBuf>,

    /// Directory for reports, documents and exports
    #[arg(long, global = true, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// Output format (table, json)
    #[arg(short, long, global = true)]
    format: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    fn config_args(&self) -> CliArgs {
        CliArgs {
            config_file: self.config.clone(),
            log_level: self.log_level.clone(),
            data_file: self.data_file.clone(),
            output_dir: self.output_dir.clone(),
            output_format: self.format.clone(),
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create a firm and select it
    Init {
        /// Firm name
        name: String,

        /// Initial profile (JSON)
        #[arg(short, long)]
        profile: Option<PathBuf>,
    },

    /// List, select, rename or delete firms
    #[command(subcommand)]
    Firms(FirmsCommand),

    /// Show or edit the working profile
    #[command(subcommand)]
    Profile(ProfileCommand),

    /// Run the calculation pass
    Calculate {
        /// Save a snapshot under this name
        #[arg(short, long)]
        save: Option<String>,
    },

    /// Run stress scenarios
    Stress {
        /// Run one preset (market-downturn, operational-failure, key-client-loss)
        #[arg(short, long)]
        preset: Option<String>,

        /// Store the preset in the profile
        #[arg(long, requires = "preset")]
        record: bool,

        /// List the presets and exit
        #[arg(long)]
        list: bool,
    },

    /// Compare resources held with the threshold requirements
    Monitor {
        /// Show the monthly history of saved calculations
        #[arg(long)]
        history: bool,
    },

    /// Maintain the risk register
    #[command(subcommand)]
    Harm(HarmCommand),

    /// Record an exposure or assess concentration risk
    #[command(subcommand)]
    Exposure(ExposureCommand),

    /// Export a regulatory return
    Report {
        /// Report type (MIF001, MIF002, MIF005, ICARA)
        #[arg(short = 't', long, default_value = "MIF001")]
        report_type: String,

        /// File format (csv, xml, json)
        #[arg(long, default_value = "csv")]
        file_format: String,

        /// Reporting period end (YYYY-MM-DD)
        #[arg(short, long)]
        date: Option<String>,

        /// Output file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// List the report types and exit
        #[arg(long)]
        list: bool,
    },

    /// Write the ICARA document
    Document(DocumentArgs),

    /// Export the selected firm to JSON
    Export {
        /// Output file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Import a firm from an export file
    Import {
        /// Export file
        path: PathBuf,
    },
}

#[derive(Subcommand, Debug)]
enum FirmsCommand {
    /// List firms
    List,
    /// Select the current firm
    Select {
        /// Firm id
        id: String,
    },
    /// Rename the current firm
    Rename {
        /// New name
        name: String,
    },
    /// Delete a firm
    Delete {
        /// Firm id
        id: String,
    },
}

#[derive(Subcommand, Debug)]
enum ProfileCommand {
    /// Show the working profile
    Show,
    /// Replace the profile from a JSON file
    Load {
        /// Profile file
        path: PathBuf,
    },
    /// Set individual values
    Set {
        /// Own funds held
        #[arg(long)]
        own_funds: Option<f64>,
        /// Liquid assets held
        #[arg(long)]
        liquid_assets: Option<f64>,
        /// Wind-down period in months
        #[arg(long)]
        wind_down_months: Option<u32>,
        /// Activity (dealing, holdingClientMoney, other, local)
        #[arg(long)]
        activity: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
enum HarmCommand {
    /// Add a harm
    Add {
        /// Description
        description: String,
        /// Category (client, market, firm, other)
        #[arg(long, default_value = "other")]
        category: String,
        /// Likelihood, 1 to 5
        #[arg(short, long)]
        likelihood: u8,
        /// Impact, 1 to 5
        #[arg(short, long)]
        impact: u8,
        /// Existing controls
        #[arg(long)]
        controls: Option<String>,
        /// Additional own funds
        #[arg(long, default_value_t = 0.0)]
        own_funds: f64,
        /// Additional liquid assets
        #[arg(long, default_value_t = 0.0)]
        liquid_assets: f64,
    },
    /// List the register
    List,
    /// Remove a harm
    Remove {
        /// Harm id
        id: String,
    },
}

#[derive(Subcommand, Debug)]
enum ExposureCommand {
    /// Record an exposure
    Add {
        /// Counterparty name
        counterparty: String,
        /// Counterparty type (institution, retail, unregulated, group, exchange, clearinghouse)
        #[arg(short = 't', long, default_value = "unregulated")]
        counterparty_type: String,
        /// Exposure value
        #[arg(short, long)]
        value: f64,
        /// Collateral held
        #[arg(long, default_value_t = 0.0)]
        collateral: f64,
    },
    /// Assess concentration risk
    Assess,
}

#[derive(Args, Debug)]
struct DocumentArgs {
    /// Include the appendices
    #[arg(long)]
    appendices: bool,

    /// Leave out an optional section
    #[arg(long, value_name = "SECTION")]
    exclude: Vec<String>,

    /// Replace a section's text: SECTION=FILE
    #[arg(long, value_name = "SECTION=FILE", value_parser = parse_custom_section)]
    section: Vec<(String, PathBuf)>,

    /// Output file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// List the sections and exit
    #[arg(long)]
    list: bool,
}

fn parse_custom_section(s: &str) -> Result<(String, PathBuf), String> {
    s.split_once('=')
        .map(|(id, path)| (id.trim().to_string(), PathBuf::from(path.trim())))
        .ok_or_else(|| format!("expected SECTION=FILE, got '{}'", s))
}

fn init_tracing(log_level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = build_config(&cli.config_args())?;

    init_tracing(config.log_level.as_filter_str());
    info!(
        version = mifidpru_cli::VERSION,
        data_file = %config.data_file.display(),
        output_format = %config.output_format,
        "Configuration loaded"
    );

    let mut ctx = AppContext::open(config)?;
    let output = dispatch(&mut ctx, cli.command)?;
    if !output.is_empty() {
        println!("{}", output.trim_end());
    }
    ctx.persist()?;
    Ok(())
}

fn dispatch(ctx: &mut AppContext, command: Commands) -> mifidpru_cli::Result<String> {
    match command {
        Commands::Init { name, profile } => commands::init::run(ctx, &name, profile.as_deref()),
        Commands::Firms(cmd) => match cmd {
            FirmsCommand::List => commands::firms::list(ctx),
            FirmsCommand::Select { id } => commands::firms::select(ctx, &id),
            FirmsCommand::Rename { name } => commands::firms::rename(ctx, &name),
            FirmsCommand::Delete { id } => commands::firms::delete(ctx, &id),
        },
        Commands::Profile(cmd) => match cmd {
            ProfileCommand::Show => commands::profile::show(ctx),
            ProfileCommand::Load { path } => commands::profile::load(ctx, &path),
            ProfileCommand::Set {
                own_funds,
                liquid_assets,
                wind_down_months,
                activity,
            } => {
                let edits = commands::profile::ProfileEdits {
                    own_funds,
                    liquid_assets,
                    wind_down_months,
                    activity: activity
                        .as_deref()
                        .map(str::parse::<FirmActivity>)
                        .transpose()?,
                };
                commands::profile::set(ctx, edits)
            }
        },
        Commands::Calculate { save } => commands::calculate::run(ctx, save.as_deref()),
        Commands::Stress { list: true, .. } => Ok(commands::stress::list_presets()),
        Commands::Stress { preset, record, .. } => {
            commands::stress::run(ctx, preset.as_deref(), record)
        }
        Commands::Monitor { history: true } => commands::monitor::history(ctx),
        Commands::Monitor { history: false } => commands::monitor::run(ctx),
        Commands::Harm(cmd) => match cmd {
            HarmCommand::Add {
                description,
                category,
                likelihood,
                impact,
                controls,
                own_funds,
                liquid_assets,
            } => commands::harm::add(
                ctx,
                commands::harm::NewHarm {
                    description,
                    category,
                    likelihood,
                    impact,
                    controls,
                    own_funds,
                    liquid_assets,
                },
            ),
            HarmCommand::List => commands::harm::list(ctx),
            HarmCommand::Remove { id } => commands::harm::remove(ctx, &id),
        },
        Commands::Exposure(cmd) => match cmd {
            ExposureCommand::Add {
                counterparty,
                counterparty_type,
                value,
                collateral,
            } => commands::concentration::add_exposure(
                ctx,
                &counterparty,
                &counterparty_type,
                value,
                collateral,
            ),
            ExposureCommand::Assess => commands::concentration::run(ctx),
        },
        Commands::Report { list: true, .. } => Ok(commands::report::list_types()),
        Commands::Report {
            report_type,
            file_format,
            date,
            output,
            ..
        } => commands::report::run(
            ctx,
            &report_type,
            &file_format,
            date.as_deref(),
            output.as_deref(),
        )
        .map(|path| format!("Report written to {}", path.display())),
        Commands::Document(args) if args.list => Ok(commands::document::list_sections()),
        Commands::Document(args) => {
            let options = commands::document::DocumentOptions {
                appendices: args.appendices,
                exclude: args.exclude,
                custom: args.section,
                output: args.output,
            };
            commands::document::run(ctx, &options)
                .map(|path| format!("Document written to {}", path.display()))
        }
        Commands::Export { output } => commands::transfer::export(ctx, output.as_deref())
            .map(|path| format!("Firm exported to {}", path.display())),
        Commands::Import { path } => commands::transfer::import(ctx, &path),
    }
}
