//! Conjugation trainer core shared by the backend and any UI adapter.
//!
//! Provides:
//! - Segment locator for root / negative / tense / personal affixes
//! - Word error classifier with caret-aware leniency
//! - Render compositor and caret preservation
//! - Progress reducer and card session
//! - Card records, validation and the tense→level table

pub mod classifier;
pub mod compose;
pub mod cursor;
pub mod error;
pub mod level;
pub mod locator;
pub mod progress;
pub mod render;
pub mod session;
pub mod text;
pub mod types;
pub mod validation;

pub use classifier::classify;
pub use compose::{compose, StyledRun, StyledText};
pub use cursor::{CaretSnapshot, EditorSurface, TextNodes};
pub use error::{CardError, CaretError, LevelLookupError, Result};
pub use level::{LanguageLevel, LevelTable};
pub use locator::{locate, locate_with_path, MatchPath, SegmentSpan};
pub use progress::{reduce, ProgressEvent, ProgressFlag, ProgressState, Transition};
pub use session::{CardSession, CardView, ProgressReport, ProgressSink};
pub use types::{
    Decomposition, Direction, Polarity, SegmentLabel, SourceLanguage, TrainingExample,
    TurkishVerb, ViewMode,
};
pub use validation::{Severity, ValidationIssue};
