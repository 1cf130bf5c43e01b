use clap::{ArgAction, CommandFactory, Parser, Subcommand};
use std::path::PathBuf;
use userinfo::config::ColorChoice;
use userinfo::model::Field;

#[derive(Parser, Debug)]
#[command(name = "userinfo", bin_name = "userinfo", version)]
#[command(
    about = "Keep a table of user records: add, edit, delete and search them",
    long_about = None
)]
pub struct Cli {
    /// Read settings from this JSON file
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// When to use colors: auto, always or never
    #[arg(long, value_name = "WHEN")]
    pub color: Option<ColorChoice>,

    /// More log output on stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

/// One line typed at the prompt.
#[derive(Parser, Debug)]
#[command(
    name = "userinfo",
    no_binary_name = true,
    disable_help_flag = true,
    disable_help_subcommand = true,
    disable_version_flag = true
)]
pub struct ReplLine {
    #[command(subcommand)]
    pub command: ReplCommand,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    /// Open or close the entry form (Add New Entry / Cancel)
    Add,
    /// Type into a form field (name, age, email or phone)
    Set {
        field: Field,
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        value: Vec<String>,
    },
    /// Submit the form (Add / Update)
    Submit,
    /// Open the form on a row
    Edit { index: String },
    /// Delete rows (e.g. 2, or 1-3)
    Delete {
        #[arg(required = true)]
        indexes: Vec<String>,
    },
    /// Show or hide the search box
    Search,
    /// Set the search query; no text clears it
    Query {
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        text: Vec<String>,
    },
    /// Redraw the table and form
    Show,
    /// Print the current view as JSON
    Dump,
    /// List intents
    Help,
    /// Leave
    #[command(visible_alias = "exit")]
    Quit,
}

/// Parses an intent line, splitting words shell-style.
///
/// Returns `Ok(None)` for a blank line. Errors are one-line, user-facing strings.
pub fn parse_line(line: &str) -> Result<Option<ReplCommand>, String> {
    let words = shlex::split(line).ok_or_else(|| "Unbalanced quotes".to_string())?;
    if words.is_empty() {
        return Ok(None);
    }

    ReplLine::try_parse_from(words)
        .map(|parsed| Some(parsed.command))
        .map_err(|e| {
            let rendered = e.to_string();
            let first = rendered.lines().next().unwrap_or_default();
            first.trim_start_matches("error: ").to_string()
        })
}

/// Usage and description for every intent, in declaration order.
pub fn intent_help() -> Vec<(String, String)> {
    let cmd = ReplLine::command();
    cmd.get_subcommands()
        .filter(|sc| !sc.is_hide_set())
        .map(|sc| {
            let mut usage = sc.get_name().to_string();
            for alias in sc.get_visible_aliases() {
                usage.push_str(" | ");
                usage.push_str(alias);
            }
            for arg in sc.get_positionals() {
                let name = arg.get_id().as_str();
                let many = matches!(arg.get_action(), ArgAction::Append);
                let name = if many {
                    format!("{}...", name)
                } else {
                    name.to_string()
                };
                if arg.is_required_set() {
                    usage.push_str(&format!(" <{}>", name));
                } else {
                    usage.push_str(&format!(" [{}]", name));
                }
            }
            let description = sc.get_about().map(|a| a.to_string()).unwrap_or_default();
            (usage, description)
        })
        .collect()
}
