use std::sync::Arc;

use parking_lot::Mutex;

/// Destination of the demo's log lines.
pub trait TextSink {
    fn append(&self, line: &str);
    fn clear(&self);
}

/// In-memory text view. Clones share the same buffer.
#[derive(Clone, Default)]
pub struct TextLog {
    lines: Arc<Mutex<Vec<String>>>,
}

impl TextLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Lines appended since the last clear.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().clone()
    }

    /// The whole buffer the way a text view shows it: every appended line is
    /// preceded by a newline.
    #[must_use]
    pub fn text(&self) -> String {
        self.lines
            .lock()
            .iter()
            .fold(String::new(), |mut text, line| {
                text.push('\n');
                text.push_str(line);
                text
            })
    }
}

impl TextSink for TextLog {
    fn append(&self, line: &str) {
        self.lines.lock().push(line.to_owned());
    }

    fn clear(&self) {
        self.lines.lock().clear();
    }
}
