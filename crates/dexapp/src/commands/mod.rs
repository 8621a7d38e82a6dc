//! # Command Layer
//!
//! This module contains the **operations** of dex. Each command lives in its
//! own submodule and drives the query engine and the history store.
//!
//! ## Role and Responsibilities
//!
//! Commands are where user intent turns into engine transitions:
//! - Decide which submissions are remembered in history
//! - Sequence history and engine calls
//! - Return structured [`CmdResult`] with the resulting view and messages
//! - Are completely UI-agnostic
//!
//! ## What Commands Do NOT Do
//!
//! - **Any terminal I/O**: No stdout, stderr or formatting
//! - **Argument parsing**: That's the CLI layer's job
//! - **Exit codes**: Return `Result`, let the caller decide
//!
//! ## Structured Returns
//!
//! [`CmdResult`] carries:
//! - `view`: the query view after the transition, if the command touched it
//! - `history`: history entries to display
//! - `detail`: a single creature record
//! - `types`: type tags to display
//! - `messages`: leveled messages (info, success, warning, error)
//!
//! A failed recomputation is not an `Err`: the engine stays usable, so the
//! failure travels as an error message next to the (empty) view.
//!
//! ## Command Modules
//!
//! - [`search`]: Submit new criteria
//! - [`page`]: Page transitions
//! - [`history`]: List, clear and replay past searches
//! - [`detail`]: Fetch one creature record
//! - [`types`]: List type tags
//! - [`reload`]: Re-run the current query

use crate::model::{CreatureDetail, HistoryEntry};
use crate::query::QueryView;
use serde::Serialize;

pub mod detail;
pub mod history;
pub mod page;
pub mod reload;
pub mod search;
pub mod types;

pub const NO_RESULTS_MESSAGE: &str = "No creatures found.";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
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

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default, Serialize)]
pub struct CmdResult {
    pub view: Option<QueryView>,
    pub history: Vec<HistoryEntry>,
    pub detail: Option<CreatureDetail>,
    pub types: Vec<String>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    /// Attaches `view`, adding an error message for a failed recomputation
    /// or an info message when nothing matched.
    pub fn with_view(mut self, view: QueryView) -> Self {
        if let Some(error) = &view.error {
            self.add_message(CmdMessage::error(error.clone()));
        } else if view.total_count == 0 {
            self.add_message(CmdMessage::info(NO_RESULTS_MESSAGE));
        }
        self.view = Some(view);
        self
    }

    pub fn with_history(mut self, entries: Vec<HistoryEntry>) -> Self {
        self.history = entries;
        self
    }

    pub fn with_detail(mut self, detail: CreatureDetail) -> Self {
        self.detail = Some(detail);
        self
    }

    pub fn with_types(mut self, types: Vec<String>) -> Self {
        self.types = types;
        self
    }

    /// True when any message is an error.
    pub fn has_errors(&self) -> bool {
        self.messages
            .iter()
            .any(|m| m.level == MessageLevel::Error)
    }
}
