//! Seams to the embedding environment (clipboard, notifications).

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Success, message: message.into() }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Error, message: message.into() }
    }
}

pub trait Host {
    /// Put `text` on the clipboard (or wherever output goes). Returns false
    /// when the host could not take it.
    fn copy_text(&mut self, text: &str) -> bool;

    fn notify(&mut self, notice: Notice);
}

/// Host that accepts everything and shows nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullHost;

impl Host for NullHost {
    fn copy_text(&mut self, _text: &str) -> bool {
        true
    }

    fn notify(&mut self, _notice: Notice) {}
}
