//! Comic viewer CLI.

use std::io::{self, IsTerminal};

use clap::{ColorChoice, Parser};
use serde::Serialize;
use tracing::level_filters::LevelFilter;

use comic_cli::cli::{Cli, Command, LogFormatArg, LogLevelArg, OutputArg};
use comic_cli::commands::{
    load_config, load_store, run_favorites, run_list, run_modes, run_show, run_view,
};
use comic_cli::logging::{LogConfig, LogFormat, init_logging};
use comic_cli::summary::{print_comic, print_comics, print_modes, print_view};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }

    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
    {
        Ok(runtime) => runtime,
        Err(error) => {
            eprintln!("error: failed to start runtime: {error}");
            std::process::exit(1);
        }
    };

    let exit_code = match runtime.block_on(run(&cli)) {
        Ok(()) => 0,
        Err(error) => {
            eprintln!("error: {error:#}");
            1
        }
    };
    std::process::exit(exit_code);
}

async fn run(cli: &Cli) -> anyhow::Result<()> {
    match &cli.command {
        Command::Modes => emit(cli.output, &run_modes(), |modes| print_modes(modes)),
        Command::List(args) => {
            let store = load_store(&cli.catalog)?;
            let comics = run_list(&*store, args).await?;
            emit(cli.output, &comics, |comics| print_comics(comics))
        }
        Command::Show(args) => {
            let store = load_store(&cli.catalog)?;
            let comic = run_show(&*store, &args.id).await?;
            emit(cli.output, &comic, print_comic)
        }
        Command::Favorites(args) => {
            let store = load_store(&cli.catalog)?;
            let comics = run_favorites(&*store, args).await?;
            emit(cli.output, &comics, |comics| print_comics(comics))
        }
        Command::View(args) => {
            let config = load_config(cli.config.as_deref())?;
            let store = load_store(&cli.catalog)?;
            let report = run_view(store, &cli.catalog, args, &config).await?;
            emit(cli.output, &report, print_view)
        }
    }
}

fn emit<T>(output: OutputArg, value: &T, table: impl FnOnce(&T)) -> anyhow::Result<()>
where
    T: Serialize + ?Sized,
{
    match output {
        OutputArg::Table => table(value),
        OutputArg::Json => println!("{}", serde_json::to_string_pretty(value)?),
    }
    Ok(())
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        ..LogConfig::default()
    };
    config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    if let Some(level) = cli.log_level {
        config.level_filter = match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        };
    }
    config.format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    config.log_file = cli.log_file.clone();
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}
