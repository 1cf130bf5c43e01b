//! # Intent Loop
//!
//! Reads one line at a time, turns it into an [`Intent`], applies it to the
//! session and prints what changed. Interactive terminals get line editing and
//! history through rustyline; anything else (a pipe, a file) is read as plain
//! lines, so whole sessions can be scripted.
//!
//! Bad input never ends the loop: parse errors and rejected intents are shown
//! as warnings. Only I/O, config and render failures propagate to `main`.

use super::render::Renderer;
use super::setup::{parse_line, Cli, ReplCommand};
use super::styles::resolved_theme;
use clap::Parser;
use console::Term;
use log::{debug, info};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::io::{self, BufRead, IsTerminal, Write};
use userinfo::commands::CmdMessage;
use userinfo::config::{AppConfig, ColorChoice};
use userinfo::error::{Result, UserInfoError};
use userinfo::session::{Intent, Session};
use userinfo::store::memory::InMemoryStore;
use userinfo::store::DataStore;

enum Flow {
    Continue,
    Quit,
}

/// Where intent lines come from.
enum LineSource {
    Interactive { editor: DefaultEditor, prompt: String },
    Piped(io::Lines<io::StdinLock<'static>>),
}

impl LineSource {
    fn open(prompt: &str) -> Result<Self> {
        if io::stdin().is_terminal() {
            let editor = DefaultEditor::new().map_err(readline_error)?;
            Ok(LineSource::Interactive {
                editor,
                prompt: prompt.to_string(),
            })
        } else {
            Ok(LineSource::Piped(io::stdin().lock().lines()))
        }
    }

    fn next_line(&mut self) -> Result<Option<String>> {
        match self {
            LineSource::Interactive { editor, prompt } => match editor.readline(prompt) {
                Ok(line) => {
                    if !line.trim().is_empty() {
                        editor.add_history_entry(line.as_str()).map_err(readline_error)?;
                    }
                    Ok(Some(line))
                }
                Err(ReadlineError::Eof) | Err(ReadlineError::Interrupted) => Ok(None),
                Err(e) => Err(readline_error(e)),
            },
            LineSource::Piped(lines) => lines.next().transpose().map_err(UserInfoError::Io),
        }
    }
}

fn readline_error(e: ReadlineError) -> UserInfoError {
    match e {
        ReadlineError::Io(io) => UserInfoError::Io(io),
        other => UserInfoError::Io(io::Error::other(other.to_string())),
    }
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::default(),
    };
    init_logging(cli.verbose, &config.log_level);
    info!("starting userinfo {}", env!("CARGO_PKG_VERSION"));

    let color = cli.color.unwrap_or(config.color);
    let use_color = match color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => Term::stdout().features().colors_supported(),
    };
    debug!("color: {} (enabled: {})", color, use_color);

    let renderer = Renderer::new(resolved_theme(), use_color, config.max_cell_width)?;
    let mut session = Session::new(InMemoryStore::new());
    let mut input = LineSource::open(&config.prompt)?;

    print_out(&renderer.render_view(&session.view()?)?)?;

    while let Some(line) = input.next_line()? {
        if let Flow::Quit = handle_line(&mut session, &renderer, &line)? {
            break;
        }
    }

    info!("session ended with {} entries", session.api().count());
    Ok(())
}

/// `-v` flags win over the config's `log_level`; `RUST_LOG` wins over both.
fn init_logging(verbose: u8, configured: &str) {
    let filter = match verbose {
        0 => configured,
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let mut builder = env_logger::Builder::new();
    builder
        .parse_filters(filter)
        .parse_default_env()
        .target(env_logger::Target::Stderr)
        .format_timestamp(None);
    // A logger may already be installed (tests); keep it
    let _ = builder.try_init();
}

fn handle_line<S: DataStore>(
    session: &mut Session<S>,
    renderer: &Renderer,
    line: &str,
) -> Result<Flow> {
    let command = match parse_line(line) {
        Ok(Some(command)) => command,
        Ok(None) => return Ok(Flow::Continue),
        Err(e) => {
            let warning = CmdMessage::warning(format!("{} (type `help` for a list of intents)", e));
            print_out(&renderer.render_messages(&[warning])?)?;
            return Ok(Flow::Continue);
        }
    };

    let intent = match command {
        ReplCommand::Add => Intent::ToggleForm,
        ReplCommand::Set { field, value } => Intent::SetField(field, value.join(" ")),
        ReplCommand::Submit => Intent::Submit,
        ReplCommand::Edit { index } => Intent::Edit(index),
        ReplCommand::Delete { indexes } => Intent::Delete(indexes),
        ReplCommand::Search => Intent::ToggleSearch,
        ReplCommand::Query { text } => Intent::SetQuery(text.join(" ")),
        ReplCommand::Show => {
            print_out(&renderer.render_view(&session.view()?)?)?;
            return Ok(Flow::Continue);
        }
        ReplCommand::Dump => {
            let json = serde_json::to_string_pretty(&session.view()?)?;
            print_out(&format!("{}\n", json))?;
            return Ok(Flow::Continue);
        }
        ReplCommand::Help => {
            print_out(&renderer.render_help()?)?;
            return Ok(Flow::Continue);
        }
        ReplCommand::Quit => return Ok(Flow::Quit),
    };

    let messages = session.apply(intent)?;
    print_out(&renderer.render_messages(&messages)?)?;
    print_out(&renderer.render_view(&session.view()?)?)?;
    Ok(Flow::Continue)
}

fn print_out(text: &str) -> Result<()> {
    let mut stdout = io::stdout().lock();
    stdout.write_all(text.as_bytes())?;
    stdout.flush()?;
    Ok(())
}
