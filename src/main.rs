use anyhow::Result;
use clap::Parser;
use lobbymap::cli::{Cli, Commands};
use lobbymap::commands;
use lobbymap::observability::{init_tracing, install_panic_hook};

fn main() -> Result<()> {
    install_panic_hook();
    let cli = Cli::parse();
    init_tracing(cli.verbosity);
    cli.color.from_env().apply();

    let config = cli.config.as_deref();
    match cli.command {
        Commands::Score(args) => commands::handle_score(config, args, cli.verbosity),
        Commands::Similar(args) => commands::handle_similar(config, args, cli.verbosity),
        Commands::Surge(args) => commands::handle_surge(config, args, cli.verbosity),
        Commands::Init { force } => commands::init_config(force),
        Commands::ValidateConfig => commands::validate_config_file(config),
    }
}
