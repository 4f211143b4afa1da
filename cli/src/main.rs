mod commands;
mod terminal;

use commands::{CommandLine, Commands, demo, history, scan, stats};
use terminal::{logging, print};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let commands = CommandLine::parse_args();

    logging::init_logging(commands.quiet);

    let cfg = commands.config();

    match commands.command {
        Commands::Scan(args) => {
            print::header("starting scanner", cfg.quiet);
            scan::scan(args, &cfg).await
        }
        Commands::History(args) => history::history(args, &cfg),
        Commands::Stats { json } => stats::stats(json, &cfg),
        Commands::Demo => {
            print::header("running demo shift", cfg.quiet);
            demo::demo(&cfg).await
        }
    }
}
