//! Toast notifications
//!
//! Failed server actions and unexpected errors surface here, as a dismissible
//! toast. Validation errors never do; they stay inline on the form.

use serde::Serialize;

use crate::error::{ConsoleError, DisplayError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastKind {
    Success,
    Error,
    Info,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Toast {
    pub id: u64,
    pub kind: ToastKind,
    pub title: String,
    pub body: String,
}

/// Toasts currently on screen, oldest first.
#[derive(Debug, Clone, Default)]
pub struct ToastQueue {
    toasts: Vec<Toast>,
    next_id: u64,
}

/// Longest body shown before truncation.
const MAX_BODY_CHARS: usize = 140;

impl ToastQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(
        &mut self,
        kind: ToastKind,
        title: impl Into<String>,
        body: impl Into<String>,
    ) -> u64 {
        self.next_id += 1;
        let body: String = body.into();
        let body = if body.chars().count() > MAX_BODY_CHARS {
            let cut: String = body.chars().take(MAX_BODY_CHARS).collect();
            format!("{}...", cut)
        } else {
            body
        };
        self.toasts.push(Toast {
            id: self.next_id,
            kind,
            title: title.into(),
            body,
        });
        self.next_id
    }

    pub fn success(&mut self, title: impl Into<String>) -> u64 {
        self.push(ToastKind::Success, title, "")
    }

    /// Surface a failed operation. Returns `None` for inline (validation) errors.
    pub fn from_error(&mut self, title: &str, err: &ConsoleError) -> Option<u64> {
        let display = DisplayError::from(err);
        if err.is_inline() {
            return None;
        }
        Some(self.push(
            ToastKind::Error,
            title,
            format!("{} {}", display.message, display.recovery_suggestion),
        ))
    }

    pub fn dismiss(&mut self, id: u64) -> bool {
        let before = self.toasts.len();
        self.toasts.retain(|t| t.id != id);
        self.toasts.len() != before
    }

    pub fn toasts(&self) -> &[Toast] {
        &self.toasts
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }

    pub fn len(&self) -> usize {
        self.toasts.len()
    }
}
