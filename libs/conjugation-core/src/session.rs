//! One learning card: owns the decomposition, progress and current text, and
//! runs the locate → classify → reduce → compose pipeline on every change.

use serde::Serialize;
use tracing::{debug, warn};

use crate::classifier::classify;
use crate::compose::{compose, StyledText};
use crate::cursor::{CaretSnapshot, EditorSurface};
use crate::error::LevelLookupError;
use crate::level::{LanguageLevel, LevelTable};
use crate::locator::{locate_with_path, MatchPath};
use crate::progress::{reduce, ProgressEvent, ProgressFlag, ProgressState, Transition};
use crate::render::RenderScheduler;
use crate::text::char_to_byte;
use crate::types::{Decomposition, Direction, TrainingExample, ViewMode};

/// What the card reports upward after a progress change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProgressReport {
    pub state: ProgressState,
    /// True only when typing (not a checkbox) completed the sentence.
    pub text_completion: bool,
}

/// Receiver of progress reports, typically scoring.
pub trait ProgressSink {
    fn report(&mut self, report: ProgressReport);
}

impl ProgressSink for Vec<ProgressReport> {
    fn report(&mut self, report: ProgressReport) {
        self.push(report);
    }
}

/// Discards reports.
impl ProgressSink for () {
    fn report(&mut self, _report: ProgressReport) {}
}

/// Everything a view needs to draw the card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CardView {
    pub prompt: String,
    pub text: String,
    pub caret: usize,
    pub styled: StyledText,
    pub path: MatchPath,
    pub progress: ProgressState,
    pub flags: Vec<ProgressFlag>,
    pub level: Option<LanguageLevel>,
    pub view_mode: ViewMode,
}

/// State for the card currently shown.
#[derive(Debug, Clone)]
pub struct CardSession {
    example: TrainingExample,
    view_mode: ViewMode,
    decomposition: Decomposition,
    progress: ProgressState,
    text: String,
    caret: usize,
    pending_caret: Option<usize>,
    level: Option<LanguageLevel>,
    scheduler: RenderScheduler,
}

impl CardSession {
    pub fn new(example: TrainingExample, view_mode: ViewMode) -> Self {
        let decomposition = example.decomposition(view_mode);
        let mut session = Self {
            example,
            view_mode,
            decomposition,
            progress: ProgressState::default(),
            text: String::new(),
            caret: 0,
            pending_caret: None,
            level: None,
            scheduler: RenderScheduler::new(),
        };
        session.schedule_render();
        session
    }

    pub fn example(&self) -> &TrainingExample {
        &self.example
    }

    pub fn decomposition(&self) -> &Decomposition {
        &self.decomposition
    }

    pub fn progress(&self) -> ProgressState {
        self.progress
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn caret(&self) -> usize {
        self.caret
    }

    pub fn level(&self) -> Option<LanguageLevel> {
        self.level
    }

    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    /// The learner edited the field; `caret` is in characters.
    pub fn input(&mut self, text: &str, caret: usize, sink: &mut dyn ProgressSink) {
        // a native edit replaced the styled nodes, so the next frame must write
        self.scheduler.invalidate();
        self.text = text.to_string();
        self.caret = caret.min(self.text.chars().count());
        let transition = reduce(self.progress, ProgressEvent::TextChanged(text), &self.decomposition);
        self.apply(transition, sink);
    }

    /// A checkbox was toggled; the field is rewritten from the flags.
    pub fn toggle(&mut self, flag: ProgressFlag, checked: bool, sink: &mut dyn ProgressSink) {
        debug!(?flag, checked, "progress checkbox toggled");
        let transition = reduce(
            self.progress,
            ProgressEvent::Toggled { flag, checked },
            &self.decomposition,
        );
        self.apply(transition, sink);
    }

    /// Switch translation direction. Progress is recomputed, not reset.
    pub fn set_direction(&mut self, direction: Direction, sink: &mut dyn ProgressSink) {
        self.set_view_mode(
            ViewMode {
                direction,
                ..self.view_mode
            },
            sink,
        );
    }

    /// Change the view. Progress is recomputed against the new target.
    pub fn set_view_mode(&mut self, view_mode: ViewMode, sink: &mut dyn ProgressSink) {
        if view_mode == self.view_mode {
            return;
        }
        self.view_mode = view_mode;
        self.decomposition = self.example.decomposition(view_mode);
        let transition = reduce(
            self.progress,
            ProgressEvent::Retargeted { text: &self.text },
            &self.decomposition,
        );
        self.apply(transition, sink);
    }

    /// Show a different card. Progress and text start over.
    pub fn replace_example(&mut self, example: TrainingExample, sink: &mut dyn ProgressSink) {
        self.example = example;
        self.decomposition = self.example.decomposition(self.view_mode);
        self.level = None;
        self.apply(
            Transition {
                state: ProgressState::default(),
                text: Some(String::new()),
                text_completion: false,
            },
            sink,
        );
    }

    /// Take the outcome of the level lookup. A failure only means no label.
    pub fn apply_levels(&mut self, levels: Result<&LevelTable, &LevelLookupError>) {
        self.level = match levels {
            Ok(table) => table.level_for(&self.example.turkish_verb.verb_tense),
            Err(err) => {
                warn!(%err, "continuing without level label");
                None
            }
        };
    }

    fn apply(&mut self, transition: Transition, sink: &mut dyn ProgressSink) {
        if let Some(text) = transition.text {
            self.caret = text.chars().count();
            self.pending_caret = Some(self.caret);
            self.text = text;
        }
        if transition.state != self.progress || transition.text_completion {
            sink.report(ProgressReport {
                state: transition.state,
                text_completion: transition.text_completion,
            });
        }
        self.progress = transition.state;
        self.schedule_render();
    }

    fn schedule_render(&mut self) {
        let styled = self.render().0;
        self.scheduler.schedule(styled);
    }

    /// Styled text for the current state, plus the matching path used.
    pub fn render(&self) -> (StyledText, MatchPath) {
        let located = locate_with_path(&self.text, &self.decomposition);
        let cursor = char_to_byte(&self.text, self.caret);
        let errors = classify(
            &self.text,
            &located.spans,
            &self.decomposition.target_sentence,
            Some(cursor),
            self.progress.full_sentence,
        );
        (compose(&self.text, &located.spans, &errors), located.path)
    }

    /// Run an animation frame: write the latest render (if it changed) and
    /// settle the caret. Returns whether the surface was written.
    pub fn frame(&mut self, surface: &mut dyn EditorSurface) -> bool {
        let wrote = self.scheduler.flush(surface);
        if let Some(offset) = self.pending_caret.take() {
            CaretSnapshot { offset }.restore(surface);
        }
        if let Some(offset) = surface.caret_offset() {
            self.caret = offset;
        }
        wrote
    }

    pub fn view(&self) -> CardView {
        let (styled, path) = self.render();
        CardView {
            prompt: self.example.prompt_sentence(self.view_mode).to_string(),
            text: self.text.clone(),
            caret: self.caret,
            styled,
            path,
            progress: self.progress,
            flags: ProgressFlag::ALL
                .into_iter()
                .filter(|flag| flag.applies_to(&self.decomposition))
                .collect(),
            level: self.level,
            view_mode: self.view_mode,
        }
    }
}
