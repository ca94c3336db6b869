use crate::demo::{run_demo, run_evaluation_report, DemoArgs, EvaluateArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use site_portal::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Site Portal",
    about = "Track data-center site acquisitions and evaluate candidate parcels",
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
    /// Evaluate sites from a JSON attribute bag or a CSV sheet
    Evaluate(EvaluateArgs),
    /// Walk sample sites through the pipeline and print their evaluations
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
        Command::Evaluate(args) => run_evaluation_report(args),
        Command::Demo(args) => run_demo(args),
    }
}
