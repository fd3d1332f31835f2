use anyhow::Result;
use clap::{Args, CommandFactory, Parser, Subcommand};
use famfund::core::log::init_logging;
use famfund::{PlanChanges, PlanCommand};

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Display holdings and asset class totals
    Summary,
    /// Display savings cash movements
    Savings,
    /// Compare current allocation against the target plan
    Alloc {
        /// Fund to report on, defaults to `default_fund`
        #[arg(short, long)]
        fund: Option<String>,
    },
    /// Show or change the target allocation plan
    #[command(subcommand)]
    Plan(PlanCommands),
}

#[derive(Subcommand)]
enum PlanCommands {
    /// Display the committed plan
    Show,
    /// Change percentages and commit; they must sum to 100
    Set(SetArgs),
    /// Commit the default plan
    Reset,
}

#[derive(Args)]
struct SetArgs {
    #[arg(long, value_parser = clap::value_parser!(u32).range(0..=100))]
    equities: Option<u32>,
    #[arg(long, value_parser = clap::value_parser!(u32).range(0..=100))]
    fixed_income: Option<u32>,
    #[arg(long, value_parser = clap::value_parser!(u32).range(0..=100))]
    alternatives: Option<u32>,
    #[arg(long, value_parser = clap::value_parser!(u32).range(0..=100))]
    cash: Option<u32>,
}

impl From<Commands> for famfund::AppCommand {
    fn from(cmd: Commands) -> famfund::AppCommand {
        match cmd {
            Commands::Summary => famfund::AppCommand::Summary,
            Commands::Savings => famfund::AppCommand::Savings,
            Commands::Alloc { fund } => famfund::AppCommand::Alloc { fund_id: fund },
            Commands::Plan(PlanCommands::Show) => famfund::AppCommand::Plan(PlanCommand::Show),
            Commands::Plan(PlanCommands::Reset) => famfund::AppCommand::Plan(PlanCommand::Reset),
            Commands::Plan(PlanCommands::Set(args)) => {
                famfund::AppCommand::Plan(PlanCommand::Set(PlanChanges {
                    equities: args.equities,
                    fixed_income: args.fixed_income,
                    alternatives: args.alternatives,
                    cash: args.cash,
                }))
            }
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose)?;

    let result = match cli.command {
        Some(Commands::Setup) => famfund::cli::setup::setup(),
        Some(cmd) => famfund::run_command(cmd.into(), cli.config_path.as_deref()).await,
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}
