//! Campaign Studio CLI.

use std::io::{self, IsTerminal, Write};

use anyhow::Result;
use campaign_cli::commands::{
    DateChange, load, run_dates, run_new, run_participants_add, run_participants_remove,
    run_participants_suggest, run_prompt, run_set,
};
use campaign_cli::describe::run_describe;
use campaign_cli::logging::{LogConfig, LogFormat, init_logging};
use campaign_cli::render::{campaign_table, error_report};
use campaign_cli::settings::Settings;
use campaign_model::PromptKind;
use clap::{ColorChoice, Parser};
use tracing::Level;

mod cli;

use crate::cli::{
    Cli, Command, DatesArgs, LogFormatArg, LogLevelArg, ParticipantsCommand, PromptKindArg,
};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let settings = Settings::load(cli.config.as_deref());
    let exit_code = match run(cli.command, &settings) {
        Ok(()) => 0,
        Err(error) => {
            eprintln!("{}", error_report(&error));
            1
        }
    };
    std::process::exit(exit_code);
}

fn run(command: Command, settings: &Settings) -> Result<()> {
    match command {
        Command::New(args) => {
            run_new(&args.path, args.empty, args.force)?;
            println!("Created {}", args.path.display());
        }
        Command::Show(args) => {
            println!("{}", campaign_table(&load(&args.path)?));
        }
        Command::Set(args) => {
            if !run_set(&args.path, args.field, &args.value)? {
                println!("Unchanged");
            }
        }
        Command::Dates(args) => {
            let (start, end) = date_changes(&args);
            if !run_dates(&args.path, start, end)? {
                println!("Unchanged");
            }
        }
        Command::Participants(ParticipantsCommand::Add { path, names }) => {
            let added = run_participants_add(&path, &names)?;
            println!("Invited {added} participant(s)");
        }
        Command::Participants(ParticipantsCommand::Remove { path, position }) => {
            let name = run_participants_remove(&path, position)?;
            println!("Removed {name}");
        }
        Command::Participants(ParticipantsCommand::Suggest { path, query }) => {
            for name in run_participants_suggest(&path, &query)? {
                println!("{name}");
            }
        }
        Command::Prompt(args) => {
            let kind = match args.kind {
                PromptKindArg::Interview => PromptKind::Interview,
                PromptKindArg::Outcome => PromptKind::Outcome,
            };
            let prompt = run_prompt(&args.path, kind, args.position)?;
            println!("{kind}: {prompt}");
        }
        Command::Describe(args) => {
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_time()
                .build()?;
            let input = tokio::io::BufReader::new(tokio::io::stdin());
            let mut out = io::stdout();
            runtime.block_on(run_describe(&args.path, settings.autosave, input, &mut out))?;
            out.flush()?;
        }
    }
    Ok(())
}

fn date_changes(args: &DatesArgs) -> (DateChange, DateChange) {
    let change = |date, clear| match (date, clear) {
        (Some(date), _) => DateChange::Set(date),
        (None, true) => DateChange::Clear,
        (None, false) => DateChange::Keep,
    };
    (
        change(args.start, args.clear_start),
        change(args.end, args.clear_end),
    )
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig {
        level: cli.verbosity.tracing_level().unwrap_or(Level::ERROR),
        log_data: cli.log_data,
        ..LogConfig::default()
    };
    config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    if let Some(level) = cli.log_level {
        config.level = match level {
            LogLevelArg::Error => Level::ERROR,
            LogLevelArg::Warn => Level::WARN,
            LogLevelArg::Info => Level::INFO,
            LogLevelArg::Debug => Level::DEBUG,
            LogLevelArg::Trace => Level::TRACE,
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
