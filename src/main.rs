use clap::Parser;
use marketpulse::adapter::inbound::cli::command::{Cli, Commands, SubscribersCommand};
use marketpulse::adapter::inbound::cli::{output, run, subscribers};

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    output::configure(output::OutputConfig::new(cli.json, cli.quiet));

    let result = match &cli.command {
        Commands::Run(args) => run::execute_run(args).await,
        Commands::Once(args) => run::execute_once(args).await,
        Commands::Preview(args) => run::execute_preview(args).await,
        Commands::Subscribers(SubscribersCommand::List(args)) => subscribers::list(args).await,
        Commands::Subscribers(SubscribersCommand::Add(args)) => subscribers::add(args).await,
    };

    if let Err(e) = result {
        output::error(&e.to_string());
        std::process::exit(1);
    }
}
