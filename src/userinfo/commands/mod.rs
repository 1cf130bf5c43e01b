//! # Command Layer
//!
//! The **business logic** of userinfo. Each operation lives in its own
//! submodule as plain functions over a [`DataStore`](crate::store::DataStore).
//!
//! Commands:
//! - Operate on `Record`, `Entry` and `DisplayRecord`
//! - Return a structured [`CmdResult`] with affected rows and messages
//! - Never print, prompt, or exit
//!
//! Records are validated here, not only in the form: `add` and `update` refuse a
//! record that fails [`crate::validation::validate`] with
//! [`UserInfoError::Validation`](crate::error::UserInfoError::Validation), so no
//! client can put an invalid record in the store.
//!
//! ## Testing Strategy
//!
//! This is where most of the tests live. They run against `InMemoryStore` and
//! check both the returned `CmdResult` and the resulting store contents.
//!
//! ## Command Modules
//!
//! - [`add`]: Append a new record
//! - [`update`]: Replace an existing record
//! - [`delete`]: Remove records by display index
//! - [`list`]: List records, optionally filtered by a search query
//! - [`helpers`]: Index resolution shared by the above

use crate::index::DisplayRecord;
use serde::Serialize;

pub mod add;
pub mod delete;
pub mod helpers;
pub mod list;
pub mod update;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    /// Rows changed by the operation, with their post-operation index
    /// (pre-operation index for deletes).
    pub affected: Vec<DisplayRecord>,
    /// Rows to display.
    pub listed: Vec<DisplayRecord>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_listed(mut self, rows: Vec<DisplayRecord>) -> Self {
        self.listed = rows;
        self
    }
}
