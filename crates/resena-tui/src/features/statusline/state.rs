//! Status line state.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub text: String,
    pub tone: Tone,
}

/// Holds at most one notice. Cleared by the next key press.
#[derive(Debug, Clone, Default)]
pub struct StatusLine {
    notice: Option<Notice>,
}

impl StatusLine {
    pub fn info(&mut self, text: impl Into<String>) {
        self.set(text.into(), Tone::Info);
    }

    pub fn success(&mut self, text: impl Into<String>) {
        self.set(text.into(), Tone::Success);
    }

    pub fn error(&mut self, text: impl Into<String>) {
        self.set(text.into(), Tone::Error);
    }

    pub fn clear(&mut self) {
        self.notice = None;
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    /// Text of the current notice, if any.
    pub fn text(&self) -> Option<&str> {
        self.notice.as_ref().map(|notice| notice.text.as_str())
    }

    fn set(&mut self, text: String, tone: Tone) {
        self.notice = Some(Notice { text, tone });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latest_notice_wins() {
        let mut status = StatusLine::default();
        status.info("uno");
        status.error("dos");
        assert_eq!(status.text(), Some("dos"));
        assert_eq!(status.notice().map(|n| n.tone), Some(Tone::Error));
        status.clear();
        assert!(status.notice().is_none());
    }
}
