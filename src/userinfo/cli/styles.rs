//! Styles for the userinfo terminal client.
//!
//! Templates never name colors. They name what a piece of text *is* (an index,
//! a field label, an error) and the theme decides how that looks. Light and
//! dark terminals get different palettes for the same names; the palette is
//! picked once at startup with `dark-light`.
//!
//! The `style` filter registered by the renderer looks names up here. An
//! unknown name renders the text prefixed with `(!?)` so typos in templates
//! show up instead of silently losing their styling.

use console::Style;
use std::collections::HashMap;

const MISSING_STYLE_INDICATOR: &str = "(!?)";

/// Style identifiers shared between templates and renderers.
pub mod names {
    pub const REGULAR: &str = "regular";
    pub const MUTED: &str = "muted";
    pub const FAINT: &str = "faint";
    pub const HIGHLIGHT: &str = "highlight";
    pub const TITLE: &str = "title";
    pub const BUTTON: &str = "button";
    pub const LABEL: &str = "label";
    pub const ERROR: &str = "error";
    pub const WARNING: &str = "warning";
    pub const SUCCESS: &str = "success";
    pub const INFO: &str = "info";
    // Table
    pub const HEADER: &str = "header";
    pub const INDEX: &str = "index";
    pub const ACTIONS: &str = "actions";
    // Help
    pub const HELP_COMMAND: &str = "help-command";
    pub const HELP_DESC: &str = "help-desc";
}

/// A named collection of styles.
#[derive(Clone, Debug, Default)]
pub struct Theme {
    styles: HashMap<String, Style>,
}

impl Theme {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(mut self, name: &str, style: Style) -> Self {
        self.styles.insert(name.to_string(), style);
        self
    }

    /// Applies the named style, or returns plain text when `use_color` is off.
    pub fn apply(&self, name: &str, text: &str, use_color: bool) -> String {
        match self.styles.get(name) {
            Some(style) if use_color => style
                .clone()
                .force_styling(true)
                .apply_to(text)
                .to_string(),
            Some(_) => text.to_string(),
            None => format!("{} {}", MISSING_STYLE_INDICATOR, text),
        }
    }
}

/// Picks the palette matching the terminal's light or dark mode.
pub fn resolved_theme() -> Theme {
    match dark_light::detect() {
        dark_light::Mode::Light => build_light_theme(),
        dark_light::Mode::Dark => build_dark_theme(),
    }
}

/// Converts an RGB triplet to the nearest ANSI 256-color palette index.
pub fn rgb_to_ansi256((r, g, b): (u8, u8, u8)) -> u8 {
    if r == g && g == b {
        if r < 8 {
            16
        } else if r > 248 {
            231
        } else {
            232 + ((r as u16 - 8) * 24 / 247) as u8
        }
    } else {
        let red = (r as u16 * 5 / 255) as u8;
        let green = (g as u16 * 5 / 255) as u8;
        let blue = (b as u16 * 5 / 255) as u8;
        16 + 36 * red + 6 * green + blue
    }
}

pub fn build_light_theme() -> Theme {
    let regular = Style::new().black();
    let muted = Style::new().color256(rgb_to_ansi256((115, 115, 115)));
    let faint = Style::new().color256(rgb_to_ansi256((173, 173, 173)));
    let accent = Style::new().color256(rgb_to_ansi256((196, 140, 0)));
    let highlight = Style::new()
        .black()
        .on_color256(rgb_to_ansi256((255, 235, 59)));

    build_theme(regular, muted, faint, accent, highlight, (0, 128, 0))
}

pub fn build_dark_theme() -> Theme {
    let regular = Style::new().white();
    let muted = Style::new().color256(rgb_to_ansi256((180, 180, 180)));
    let faint = Style::new().color256(rgb_to_ansi256((110, 110, 110)));
    let accent = Style::new().color256(rgb_to_ansi256((255, 214, 10)));
    let highlight = Style::new()
        .black()
        .on_color256(rgb_to_ansi256((229, 185, 0)));

    build_theme(regular, muted, faint, accent, highlight, (144, 238, 144))
}

// Both palettes share the same presentation rules; only the base colors differ.
fn build_theme(
    regular: Style,
    muted: Style,
    faint: Style,
    accent: Style,
    highlight: Style,
    command_rgb: (u8, u8, u8),
) -> Theme {
    Theme::new()
        .add(names::REGULAR, regular.clone())
        .add(names::MUTED, muted.clone())
        .add(names::FAINT, faint.clone())
        .add(names::HIGHLIGHT, highlight)
        .add(names::TITLE, regular.clone().bold())
        .add(names::BUTTON, accent.clone().bold())
        .add(names::LABEL, muted.clone())
        .add(names::ERROR, Style::new().red().bold())
        .add(names::WARNING, Style::new().yellow().bold())
        .add(names::SUCCESS, Style::new().green())
        .add(names::INFO, muted.clone())
        .add(names::HEADER, regular.bold().underlined())
        .add(names::INDEX, accent)
        .add(names::ACTIONS, faint.italic())
        .add(
            names::HELP_COMMAND,
            Style::new().color256(rgb_to_ansi256(command_rgb)),
        )
        .add(names::HELP_DESC, muted)
}
