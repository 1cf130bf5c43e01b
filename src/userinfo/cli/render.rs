//! # Rendering Module
//!
//! Turns a session [`View`] and command messages into styled terminal text.
//!
//! Layout calculations (column widths, truncation, padding) stay in Rust
//! because they need Unicode-aware width handling. Templates handle the rest:
//! which blocks show, and which style name each piece gets.

use super::setup::intent_help;
use super::styles::{names, Theme};
use super::templates::{HELP_TEMPLATE, MESSAGES_TEMPLATE, VIEW_TEMPLATE};
use minijinja::{Environment, Value};
use serde::Serialize;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};
use userinfo::commands::{CmdMessage, MessageLevel};
use userinfo::error::{Result, UserInfoError};
use userinfo::form::FormMode;
use userinfo::model::Field;
use userinfo::search::is_blank;
use userinfo::session::{RowView, View};

const VIEW: &str = "view";
const MESSAGES: &str = "messages";
const HELP: &str = "help";

const INDEX_HEADER: &str = "#";
const ACTIONS_HEADER: &str = "Actions";

#[derive(Serialize)]
struct CellData {
    text: String,
    /// Spaces after the styled text, so highlights stop at the text.
    pad: String,
    style: &'static str,
}

#[derive(Serialize)]
struct FieldData {
    label: String,
    value: String,
    error: Option<&'static str>,
    error_indent: String,
}

#[derive(Serialize)]
struct ViewData {
    toggle_label: &'static str,
    search_toggle_label: &'static str,
    search_visible: bool,
    query: String,
    placeholder: &'static str,
    form_open: bool,
    form_title: &'static str,
    submit_label: &'static str,
    fields: Vec<FieldData>,
    header: Vec<CellData>,
    rows: Vec<Vec<CellData>>,
    empty_message: Option<&'static str>,
    summary: String,
}

#[derive(Serialize)]
struct MessageData {
    content: String,
    style: &'static str,
}

#[derive(Serialize)]
struct MessagesData {
    messages: Vec<MessageData>,
}

#[derive(Serialize)]
struct HelpItem {
    usage: String,
    description: String,
}

#[derive(Serialize)]
struct HelpData {
    items: Vec<HelpItem>,
}

/// Renderer with the client templates compiled once.
pub struct Renderer {
    env: Environment<'static>,
    max_cell_width: usize,
}

impl Renderer {
    pub fn new(theme: Theme, use_color: bool, max_cell_width: usize) -> Result<Self> {
        let mut env = Environment::new();
        env.set_trim_blocks(true);
        env.set_lstrip_blocks(true);
        env.set_keep_trailing_newline(true);
        env.add_filter("style", move |value: Value, name: String| -> String {
            theme.apply(&name, &value.to_string(), use_color)
        });

        for (name, source) in [
            (VIEW, VIEW_TEMPLATE),
            (MESSAGES, MESSAGES_TEMPLATE),
            (HELP, HELP_TEMPLATE),
        ] {
            env.add_template(name, source).map_err(render_error)?;
        }

        Ok(Self {
            env,
            max_cell_width,
        })
    }

    pub fn render_view(&self, view: &View) -> Result<String> {
        self.render(VIEW, &self.view_data(view))
    }

    pub fn render_messages(&self, messages: &[CmdMessage]) -> Result<String> {
        if messages.is_empty() {
            return Ok(String::new());
        }
        let data = MessagesData {
            messages: messages
                .iter()
                .map(|msg| MessageData {
                    content: msg.content.clone(),
                    style: message_style(msg.level),
                })
                .collect(),
        };
        self.render(MESSAGES, &data)
    }

    pub fn render_help(&self) -> Result<String> {
        let entries = intent_help();
        let usage_width = entries.iter().map(|(u, _)| u.width()).max().unwrap_or(0);
        let data = HelpData {
            items: entries
                .into_iter()
                .map(|(usage, description)| HelpItem {
                    usage: pad_to_width(&usage, usage_width),
                    description,
                })
                .collect(),
        };
        self.render(HELP, &data)
    }

    fn render<T: Serialize>(&self, name: &str, data: &T) -> Result<String> {
        let template = self.env.get_template(name).map_err(render_error)?;
        template.render(data).map_err(render_error)
    }

    fn view_data(&self, view: &View) -> ViewData {
        let label_width = view
            .form
            .fields
            .iter()
            .map(|f| f.label.width() + 1)
            .max()
            .unwrap_or(0)
            + 2;
        let fields = view
            .form
            .fields
            .iter()
            .map(|f| FieldData {
                label: pad_to_width(&format!("{}:", f.label), label_width),
                value: f.value.clone(),
                error: f.error,
                error_indent: " ".repeat(label_width),
            })
            .collect();

        let (header, rows) = self.table(&view.rows);

        let summary = if is_blank(&view.search.query) {
            entry_count(view.total)
        } else {
            format!("{} of {}", view.rows.len(), entry_count(view.total))
        };

        ViewData {
            toggle_label: view.toggle_label,
            search_toggle_label: view.search.toggle_label,
            search_visible: view.search.visible,
            query: view.search.query.clone(),
            placeholder: view.search.placeholder,
            form_open: view.form.open,
            form_title: match view.form.mode {
                FormMode::Edit(_) => "Edit Entry",
                _ => "New Entry",
            },
            submit_label: view.form.submit_label,
            fields,
            header,
            rows,
            empty_message: view.empty_message,
            summary,
        }
    }

    /// Lays out the header and rows with every column padded to its widest cell.
    fn table(&self, rows: &[RowView]) -> (Vec<CellData>, Vec<Vec<CellData>>) {
        let mut header: Vec<String> = vec![INDEX_HEADER.to_string()];
        header.extend(Field::ALL.iter().map(|f| f.label().to_string()));
        header.push(ACTIONS_HEADER.to_string());

        let body: Vec<Vec<(String, &'static str)>> = rows
            .iter()
            .map(|row| {
                let mut cells = vec![(row.index.to_string(), names::INDEX)];
                cells.extend(row.cells.iter().map(|cell| {
                    let style = if cell.matched {
                        names::HIGHLIGHT
                    } else {
                        names::REGULAR
                    };
                    (truncate_to_width(&cell.value, self.max_cell_width), style)
                }));
                cells.push((
                    format!("edit {} · delete {}", row.index, row.index),
                    names::ACTIONS,
                ));
                cells
            })
            .collect();

        let mut widths: Vec<usize> = header.iter().map(|h| h.width()).collect();
        for cells in &body {
            for (width, (text, _)) in widths.iter_mut().zip(cells) {
                *width = (*width).max(text.width());
            }
        }

        let last = widths.len() - 1;
        let pad = |col: usize, text: &str| -> String {
            // The last column is never padded, so lines carry no trailing spaces
            if col == last {
                String::new()
            } else {
                " ".repeat(widths[col].saturating_sub(text.width()))
            }
        };

        let header = header
            .iter()
            .enumerate()
            .map(|(col, text)| CellData {
                pad: pad(col, text),
                text: text.clone(),
                style: names::HEADER,
            })
            .collect();
        let rows = body
            .into_iter()
            .map(|cells| {
                cells
                    .into_iter()
                    .enumerate()
                    .map(|(col, (text, style))| CellData {
                        pad: pad(col, &text),
                        text,
                        style,
                    })
                    .collect()
            })
            .collect();

        (header, rows)
    }
}

fn render_error(e: minijinja::Error) -> UserInfoError {
    UserInfoError::Render(e.to_string())
}

fn message_style(level: MessageLevel) -> &'static str {
    match level {
        MessageLevel::Info => names::INFO,
        MessageLevel::Success => names::SUCCESS,
        MessageLevel::Warning => names::WARNING,
    }
}

fn entry_count(n: usize) -> String {
    if n == 1 {
        "1 entry".to_string()
    } else {
        format!("{} entries", n)
    }
}

fn pad_to_width(s: &str, width: usize) -> String {
    let padding = width.saturating_sub(s.width());
    format!("{}{}", s, " ".repeat(padding))
}

/// Truncates `s` to at most `max_width` columns, ending in `…` when cut.
pub fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let limit = max_width.saturating_sub(1);
    let mut result = String::new();
    let mut current_width = 0;

    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > limit {
            break;
        }
        result.push(c);
        current_width += char_width;
    }

    result.push('…');
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::styles::build_light_theme;
    use userinfo::session::{Intent, Session};
    use userinfo::store::memory::fixtures::StoreFixture;
    use userinfo::store::memory::InMemoryStore;

    fn renderer() -> Renderer {
        Renderer::new(build_light_theme(), false, 32).unwrap()
    }

    #[test]
    fn test_truncate_to_width() {
        assert_eq!(truncate_to_width("short", 10), "short");
        assert_eq!(truncate_to_width("exactly10!", 10), "exactly10!");
        assert_eq!(truncate_to_width("a longer value", 6), "a lon…");
        // Wide characters count as two columns
        assert_eq!(truncate_to_width("日本語テキスト", 5), "日本…");
    }

    #[test]
    fn test_empty_table_shows_message() {
        let session = Session::new(InMemoryStore::new());
        let out = renderer().render_view(&session.view().unwrap()).unwrap();

        assert!(out.contains("[Add New Entry]"));
        assert!(out.contains("[Search]"));
        assert!(out.contains("No matching entries found."));
        assert!(out.contains("0 entries"));
        assert!(!out.contains("(!?)"));
    }

    #[test]
    fn test_rows_are_aligned_with_actions() {
        let session = Session::new(StoreFixture::new().with_records(2).store);
        let out = renderer().render_view(&session.view().unwrap()).unwrap();

        let header = out.lines().find(|l| l.starts_with('#')).unwrap();
        let row = out.lines().find(|l| l.contains("User 2")).unwrap();
        assert!(header.contains("Email"));
        assert!(row.ends_with("edit 2 · delete 2"));
        assert_eq!(header.find("Name"), row.find("User 2"));
        assert!(out.lines().all(|l| !l.ends_with(' ')));
    }

    #[test]
    fn test_form_shows_touched_errors_and_labels() {
        let mut session = Session::new(InMemoryStore::new());
        session.apply(Intent::ToggleForm).unwrap();
        session
            .apply(Intent::SetField(Field::Email, "bad-email".to_string()))
            .unwrap();
        let out = renderer().render_view(&session.view().unwrap()).unwrap();

        assert!(out.contains("[Cancel]"));
        assert!(out.contains("New Entry"));
        assert!(out.contains("Email:  bad-email"));
        assert!(out.contains("Enter a valid email address"));
        assert!(!out.contains("Name is required"));
        assert!(out.contains("[Add]"));
    }

    #[test]
    fn test_search_box_and_filtered_summary() {
        let mut session = Session::new(StoreFixture::new().with_records(3).store);
        session.apply(Intent::ToggleSearch).unwrap();
        let out = renderer().render_view(&session.view().unwrap()).unwrap();
        assert!(out.contains("Search: Search by name, age, email or phone"));
        assert!(out.contains("[Close Search]"));

        session
            .apply(Intent::SetQuery("user3".to_string()))
            .unwrap();
        let out = renderer().render_view(&session.view().unwrap()).unwrap();
        assert!(out.contains("Search: user3"));
        assert!(out.contains("1 of 3 entries"));
        assert!(!out.contains("User 1"));
    }

    #[test]
    fn test_highlight_stops_before_column_padding() {
        let mut session = Session::new(InMemoryStore::new());
        for (name, email) in [("Al", "a@b.com"), ("Bartholomew", "b@b.com")] {
            session.apply(Intent::ToggleForm).unwrap();
            for (field, value) in Field::ALL.iter().zip([name, "30", email, "1"]) {
                session
                    .apply(Intent::SetField(*field, value.to_string()))
                    .unwrap();
            }
            session.apply(Intent::Submit).unwrap();
        }
        // Both names match, so the name column is as wide as "Bartholomew"
        session.apply(Intent::SetQuery("a".to_string())).unwrap();

        let colored = Renderer::new(build_light_theme(), true, 32).unwrap();
        let out = colored.render_view(&session.view().unwrap()).unwrap();
        let row = out.lines().find(|l| l.contains("Al")).unwrap();

        // Reset lands right after the text; the padding follows unstyled
        assert!(row.contains("Al\u{1b}[0m         "), "{:?}", row);
        assert!(!row.contains("Al "));
    }

    #[test]
    fn test_messages_render_one_per_line() {
        let out = renderer()
            .render_messages(&[
                CmdMessage::success("Entry added: Ann"),
                CmdMessage::warning("No entry at index 9 (1 in the list)"),
            ])
            .unwrap();
        assert_eq!(
            out,
            "Entry added: Ann\nNo entry at index 9 (1 in the list)\n"
        );
        assert_eq!(renderer().render_messages(&[]).unwrap(), "");
    }

    #[test]
    fn test_help_lists_intents() {
        let out = renderer().render_help().unwrap();
        assert!(out.starts_with("Intents:"));
        for intent in ["add", "set", "submit", "edit", "delete", "search", "query", "quit"] {
            assert!(out.contains(intent), "help is missing {}", intent);
        }
    }
}
