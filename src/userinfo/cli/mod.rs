//! # CLI Layer
//!
//! This is **one possible UI client** for userinfo, not the application itself.
//! It is the only place that knows about terminal I/O, colors, and line editing.
//!
//! Each line typed (or piped) is one intent:
//!
//! ```text
//! add                      open or close the form
//! set <field> <value...>   type into a form field
//! submit                   submit the form
//! edit <index>             open the form on a row
//! delete <index...>        delete rows (2, 1-3)
//! search                   show or hide the search box
//! query [text...]          set the search query
//! show | dump | help       redraw, print the view as JSON, list intents
//! quit | exit              leave
//! ```
//!
//! ## Module Structure
//!
//! - `commands`: The intent loop (called by `main.rs`)
//! - `setup`: Argument and intent-line parsing via clap
//! - `render`: View, message and help rendering
//! - `styles`: Named styles and the light/dark themes
//! - `templates`: Output templates

mod commands;
mod render;
mod setup;
mod styles;
mod templates;

pub use commands::run;
