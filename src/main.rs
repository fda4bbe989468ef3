use anyhow::Result;
use clap::Parser;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

mod cache;
mod cli;
mod commands;
mod config;
mod exam;
mod models;
mod timer;

use cli::{Cli, Commands};
use config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = Config::load(cli.config.clone())?
        .with_cache_path(cli.cache.clone())
        .with_outbox_path(cli.outbox.clone());

    let file_appender = tracing_appender::rolling::daily(&config.log.dir, "examdesk.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    let file_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log.level));
    let stderr_level = if cli.verbose {
        LevelFilter::INFO
    } else {
        LevelFilter::WARN
    };

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_filter(file_filter),
        )
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_filter(stderr_level),
        )
        .init();

    match cli.command {
        Commands::Start(args) => commands::start::execute(args, config).await,
        Commands::Take(args) => commands::take::execute(args, config).await,
        Commands::Answer(args) => commands::answer::execute(args, config).await,
        Commands::Goto(args) => commands::goto::execute(args, config).await,
        Commands::Status => commands::status::execute(config).await,
        Commands::Submit(args) => commands::submit::execute(args, config).await,
        Commands::Clear => commands::clear::execute(config).await,
    }
}
