//! Frame-deferred rendering with last-write-wins semantics.

use crate::compose::StyledText;
use crate::cursor::{write_preserving_caret, EditorSurface};

/// Holds at most one pending render until the next frame.
#[derive(Debug, Clone, Default)]
pub struct RenderScheduler {
    pending: Option<StyledText>,
    committed: Option<StyledText>,
}

impl RenderScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a render, replacing any render not yet flushed.
    pub fn schedule(&mut self, styled: StyledText) {
        self.pending = Some(styled);
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Drop any pending render and forget what was committed, so the next
    /// frame always writes.
    pub fn invalidate(&mut self) {
        self.pending = None;
        self.committed = None;
    }

    /// Take the pending render if it differs from the last committed one.
    pub fn take_frame(&mut self) -> Option<StyledText> {
        let pending = self.pending.take()?;
        if self.committed.as_ref() == Some(&pending) {
            return None;
        }
        self.committed = Some(pending.clone());
        Some(pending)
    }

    /// Run a frame against a surface. Returns whether anything was written.
    pub fn flush<S: EditorSurface + ?Sized>(&mut self, surface: &mut S) -> bool {
        match self.take_frame() {
            Some(styled) => {
                write_preserving_caret(surface, &styled);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compose::StyledRun;
    use crate::cursor::TextNodes;
    use crate::types::SegmentLabel;

    fn plain(text: &str) -> StyledText {
        StyledText {
            runs: vec![StyledRun {
                text: text.to_string(),
                label: SegmentLabel::Plain,
                error: false,
            }],
        }
    }

    #[test]
    fn latest_schedule_wins() {
        let mut scheduler = RenderScheduler::new();
        scheduler.schedule(plain("ge"));
        scheduler.schedule(plain("gel"));
        assert_eq!(scheduler.take_frame(), Some(plain("gel")));
        assert_eq!(scheduler.take_frame(), None);
    }

    #[test]
    fn identical_render_is_skipped() {
        let mut scheduler = RenderScheduler::new();
        let mut surface = TextNodes::new();
        scheduler.schedule(plain("gel"));
        assert!(scheduler.flush(&mut surface));
        scheduler.schedule(plain("gel"));
        assert!(!scheduler.flush(&mut surface));
        assert_eq!(surface.text(), "gel");
    }

    #[test]
    fn invalidate_forces_next_write() {
        let mut scheduler = RenderScheduler::new();
        let mut surface = TextNodes::new();
        scheduler.schedule(plain("gel"));
        scheduler.flush(&mut surface);
        scheduler.invalidate();
        scheduler.schedule(plain("gel"));
        assert!(scheduler.flush(&mut surface));
    }
}
