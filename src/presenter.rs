//! Screen state for the updater window.
//!
//! The window is either waiting for the user (`Ready`), waiting for the
//! server (`Uploading`), showing what the server changed (`ResultShown`),
//! or showing why the upload failed (`Failed`). A failure is recoverable:
//! the error view offers the upload action again.

use crate::api::{Update, UpdateResponse};
use crate::error::UploadError;

pub const WINDOW_TITLE: &str = "Busse | Lots Updater";
pub const TITLE: &str = "Lot Updater";
pub const NOTICE: &str = "Make sure to run UPDATE.LOTS before running this program.";
pub const UPLOAD_ACTION: &str = "Upload Updated Lot File";
pub const NOTHING_TO_UPDATE: &str = "Nothing to update.";

/// Text shown once an upload succeeds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    pub updated: String,
    pub errors: String,
    pub lots: String,
    pub details: String,
    /// Shown under the details when something went wrong after the
    /// server had already applied the file.
    pub warning: Option<String>,
}

impl Summary {
    pub fn from_response(resp: &UpdateResponse) -> Self {
        let details = if resp.updates.is_empty() {
            NOTHING_TO_UPDATE.to_string()
        } else {
            resp.updates.iter().map(update_line).collect::<Vec<_>>().join("\n")
        };
        Summary {
            updated: format!("Updated {} lots", resp.updates.len()),
            errors: format!("Found {} errors", resp.errors_count),
            lots: format!("Found {} lots", resp.count),
            details,
            warning: None,
        }
    }
}

pub fn update_line(update: &Update) -> String {
    format!(
        "Lot: {}\tPart: {}\tExpiration: {}\tOn Hand: {}\tAllocated: {}",
        update.lot, update.part, update.expiration, update.on_hand, update.allocated
    )
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    Ready,
    Uploading,
    ResultShown(Summary),
    Failed { kind: &'static str, message: String },
}

#[derive(Debug)]
pub enum Event {
    /// The user pressed the upload action.
    Triggered,
    /// The upload returned.
    Completed(Result<UpdateResponse, UploadError>),
}

#[derive(Debug)]
pub struct Presenter {
    screen: Screen,
}

impl Default for Presenter {
    fn default() -> Self {
        Presenter::new()
    }
}

impl Presenter {
    pub fn new() -> Self {
        Presenter { screen: Screen::Ready }
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    /// Whether the upload action is offered on the current screen.
    pub fn can_upload(&self) -> bool {
        matches!(self.screen, Screen::Ready | Screen::Failed { .. })
    }

    /// Apply `event` and return the new screen. Events that make no sense
    /// in the current state leave it unchanged; `ResultShown` is final.
    pub fn handle(&mut self, event: Event) -> &Screen {
        let next = match (&self.screen, event) {
            (Screen::Ready, Event::Triggered) => Some(Screen::Uploading),
            (Screen::Failed { .. }, Event::Triggered) => Some(Screen::Uploading),
            (Screen::Uploading, Event::Completed(Ok(resp))) => {
                Some(Screen::ResultShown(Summary::from_response(&resp)))
            }
            (Screen::Uploading, Event::Completed(Err(err))) => Some(Screen::Failed {
                kind: err.kind(),
                message: err.to_string(),
            }),
            _ => None,
        };
        if let Some(screen) = next {
            log::debug!("screen {:?} -> {:?}", self.screen, screen);
            self.screen = screen;
        }
        &self.screen
    }

    /// Attach a warning to the result view. Ignored on any other screen.
    pub fn warn(&mut self, message: impl Into<String>) {
        if let Screen::ResultShown(summary) = &mut self.screen {
            summary.warning = Some(message.into());
        }
    }

    /// Lines making up the current view, top to bottom. An empty string
    /// stands for a spacer.
    pub fn render(&self) -> Vec<String> {
        match &self.screen {
            Screen::Ready => vec![TITLE.into(), String::new(), NOTICE.into(), String::new()],
            Screen::Uploading => vec!["Uploading...".into()],
            Screen::ResultShown(summary) => {
                let mut lines = vec![
                    summary.updated.clone(),
                    summary.errors.clone(),
                    summary.lots.clone(),
                    String::new(),
                    summary.details.clone(),
                ];
                if let Some(warning) = &summary.warning {
                    lines.push(String::new());
                    lines.push(warning.clone());
                }
                lines
            }
            Screen::Failed { kind, message } => vec![
                format!("{}: {}", kind, message),
                String::new(),
                NOTICE.into(),
                String::new(),
            ],
        }
    }
}
