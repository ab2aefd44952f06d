//! `halt` -- local alcohol-tracking log.
//!
//! This is the CLI entry point. It parses arguments with clap, resolves the
//! runtime context, and dispatches to command handlers.

mod cli;
mod commands;
mod context;

use clap::Parser;

use cli::{Cli, Commands};
use context::RuntimeContext;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();
    let ctx = RuntimeContext::from_global_args(&cli.global);

    // Set up logging based on verbosity.
    if ctx.verbose {
        tracing_subscriber::fmt()
            .with_env_filter("halt=debug,halt_core=debug,halt_storage=debug,halt_migrate=debug")
            .with_writer(std::io::stderr)
            .init();
    }

    let result = match cli.command {
        Some(Commands::Log(args)) => commands::log::run(&ctx, &args).await,
        Some(Commands::List(args)) => commands::list::run(&ctx, &args).await,
        Some(Commands::Stats) => commands::stats::run(&ctx).await,
        Some(Commands::Settings(args)) => commands::settings::run(&ctx, &args).await,
        Some(Commands::Export(args)) => commands::export::run(&ctx, &args).await,
        Some(Commands::Migrate) => commands::migrate::run(&ctx).await,
        Some(Commands::Delete(args)) => commands::delete::run(&ctx, &args).await,
        Some(Commands::Undo) => commands::undo::run(&ctx).await,
        Some(Commands::Wipe(args)) => commands::wipe::run(&ctx, &args).await,
        None => {
            // No subcommand -- print help.
            use clap::CommandFactory;
            Cli::command().print_help().ok();
            println!();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
