//! InstaPlot CLI - Command-line interface for the InstaPlot plot board.

use anyhow::Context;
use clap::Parser;
use instaplot_cli::commands;
use instaplot_cli::{Cli, Command, Config, Formatter};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config_path = match cli.config.clone() {
        Some(path) => path,
        None => Config::path()?,
    };
    let mut config = Config::load_from(&config_path)
        .with_context(|| format!("Failed to load config from {}", config_path.display()))?;

    init_tracing(&config.settings.log_level);

    let format = cli
        .format
        .map(Into::into)
        .unwrap_or(config.settings.format);
    let color_enabled = !cli.no_color && config.settings.color;
    let formatter = Formatter::new(format, color_enabled);

    let db_path = cli
        .db
        .clone()
        .unwrap_or_else(|| config.database_path(&config_path));
    let mut board = commands::open_board(&db_path, &config.board)
        .with_context(|| format!("Failed to open board database {}", db_path.display()))?;

    let result = match cli.command {
        Command::List => commands::execute_list(&board, &formatter),
        Command::Add(args) => commands::execute_add(args, &mut board, &formatter),
        Command::Edit(args) => commands::execute_edit(args, &mut board, &formatter),
        Command::Set(args) => commands::execute_set(args, &mut board, &formatter),
        Command::Delete(args) => commands::execute_delete(args, &mut board, &formatter),
        Command::Move(args) => commands::execute_move(args, &mut board, &formatter),
        Command::Select(args) => commands::execute_select(args, &mut board, &formatter),
        Command::Axis(args) => {
            commands::execute_axis(args, &mut board, &mut config, &config_path, &formatter)
        }
        Command::Organize => commands::execute_organize(&mut board, &formatter),
        Command::Import(args) => commands::execute_import(args, &mut board, &formatter),
        Command::Export(args) => commands::execute_export(args, &board, &formatter),
        Command::Buffer(args) => {
            let quiet = config.board.debounce();
            commands::execute_buffer(args, board, quiet, &formatter).await
        }
    };

    if let Err(e) = result {
        eprintln!("{}", formatter.error(&e.to_string()));
        std::process::exit(1);
    }
    Ok(())
}

/// Log to stderr; `RUST_LOG` takes precedence over the configured level.
fn init_tracing(default_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();
}
