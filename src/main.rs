use clap::Parser;
use colored::Colorize;

use pomoguard::cli::args::{Cli, Commands};
use pomoguard::cli::commands;
use pomoguard::config::Config;
use pomoguard::error::StoreError;
use pomoguard::features::activity::ActivityStore;

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn init_tracing(verbose: u8) {
    use tracing_subscriber::EnvFilter;

    // Honor RUST_LOG if set, otherwise use verbosity flag
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        let level = match verbose {
            0 => "warn",
            1 => "debug",
            _ => "trace",
        };
        EnvFilter::new(format!("pomoguard={level}"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .init();
}

fn run(cli: Cli) -> Result<(), StoreError> {
    let mut config = match cli.config {
        Some(ref path) => Config::load_from_path(path)?,
        None => Config::load()?,
    };
    if let Some(db) = cli.db {
        config.storage.database = Some(db);
    }

    let store = ActivityStore::install(ActivityStore::open(&config)?)?;
    let format = cli.output;

    let output = match cli.command {
        Commands::Session(args) => commands::session(store, args.command, format)?,
        Commands::Cycle(args) => commands::cycle(store, args.command, format)?,
        Commands::Visit(args) => commands::visit(store, args.command, format)?,
        Commands::Limit(args) => commands::limit(store, args.command, format)?,
        Commands::Stats(args) => commands::stats(store, args.command, format)?,
        Commands::Export { file } => commands::export(store, &file, format)?,
    };

    if !output.is_empty() {
        println!("{output}");
    }
    Ok(())
}
