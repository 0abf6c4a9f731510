use crate::demo::{run_deal_report, run_demo, run_market_report, DealArgs, DemoArgs, MarketArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use dealcommand::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Deal Command",
    about = "Score markets, analyze deals, and run the wholesaling pipeline service",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Score a market against the wholesaling checklist
    Market(MarketArgs),
    /// Analyze a deal and print flip and rental returns
    Deal(DealArgs),
    /// Walk a sample property from market check through outreach and KPIs
    Demo(DemoArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Market(args) => run_market_report(args),
        Command::Deal(args) => run_deal_report(args),
        Command::Demo(args) => run_demo(args),
    }
}
