//! Caret preservation across re-renders.
//!
//! Rendering replaces the text nodes of the editable region, which drops the
//! caret. The offset (in characters over the plain text) is captured before the
//! write and mapped back onto the new node tree afterwards.

use tracing::debug;

use crate::compose::StyledText;
use crate::error::CaretError;

/// The rendering seam: anything that shows styled text with a caret.
pub trait EditorSurface {
    /// Caret offset in characters, or `None` when the caret is not inside
    /// the editable region.
    fn caret_offset(&self) -> Option<usize>;

    /// Place the caret at a character offset.
    fn set_caret_offset(&mut self, offset: usize) -> Result<(), CaretError>;

    /// Replace the rendered content.
    fn write(&mut self, styled: &StyledText);
}

/// Caret offset captured before a re-render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaretSnapshot {
    pub offset: usize,
}

impl CaretSnapshot {
    pub fn capture<S: EditorSurface + ?Sized>(surface: &S) -> Option<Self> {
        surface.caret_offset().map(|offset| Self { offset })
    }

    /// Put the caret back. A failure leaves the caret wherever the surface
    /// put it and is not reported as an error.
    pub fn restore<S: EditorSurface + ?Sized>(self, surface: &mut S) -> bool {
        match surface.set_caret_offset(self.offset) {
            Ok(()) => true,
            Err(err) => {
                debug!(%err, offset = self.offset, "caret not restored");
                false
            }
        }
    }
}

/// Write `styled` to the surface, keeping the caret at the same offset.
pub fn write_preserving_caret<S: EditorSurface + ?Sized>(surface: &mut S, styled: &StyledText) {
    let snapshot = CaretSnapshot::capture(surface);
    surface.write(styled);
    if let Some(snapshot) = snapshot {
        snapshot.restore(surface);
    }
}

/// Caret location inside a node tree: node index and char offset in that node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodePosition {
    pub node: usize,
    pub offset: usize,
}

/// Headless editable region: one text node per styled run.
#[derive(Debug, Clone, Default)]
pub struct TextNodes {
    nodes: Vec<String>,
    caret: Option<NodePosition>,
    detached: bool,
}

impl TextNodes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn nodes(&self) -> &[String] {
        &self.nodes
    }

    pub fn text(&self) -> String {
        self.nodes.concat()
    }

    pub fn caret(&self) -> Option<NodePosition> {
        self.caret
    }

    /// Place the caret directly, as a user click would.
    pub fn place_caret(&mut self, position: NodePosition) {
        self.caret = Some(position);
    }

    /// Simulate a native edit: the text is flattened into one node and the
    /// caret lands at `caret` (in characters).
    pub fn edit(&mut self, text: &str, caret: usize) {
        self.nodes = vec![text.to_string()];
        self.caret = self.position_of(caret);
    }

    /// Simulate the region being removed from the document.
    pub fn detach(&mut self) {
        self.detached = true;
    }

    /// Character offset of a node position, summing node lengths in order.
    pub fn offset_of(&self, position: NodePosition) -> Option<usize> {
        let node = self.nodes.get(position.node)?;
        if position.offset > node.chars().count() {
            return None;
        }
        let before: usize = self.nodes[..position.node]
            .iter()
            .map(|n| n.chars().count())
            .sum();
        Some(before + position.offset)
    }

    /// Node position for a character offset; offsets past the end clamp to it.
    pub fn position_of(&self, offset: usize) -> Option<NodePosition> {
        let mut walked = 0;
        for (idx, node) in self.nodes.iter().enumerate() {
            let len = node.chars().count();
            if walked + len >= offset {
                return Some(NodePosition {
                    node: idx,
                    offset: offset - walked,
                });
            }
            walked += len;
        }
        let last = self.nodes.len().checked_sub(1)?;
        Some(NodePosition {
            node: last,
            offset: self.nodes[last].chars().count(),
        })
    }
}

impl EditorSurface for TextNodes {
    fn caret_offset(&self) -> Option<usize> {
        if self.detached {
            return None;
        }
        self.caret.and_then(|position| self.offset_of(position))
    }

    fn set_caret_offset(&mut self, offset: usize) -> Result<(), CaretError> {
        if self.detached {
            return Err(CaretError::Detached);
        }
        let position = self
            .position_of(offset)
            .ok_or(CaretError::NoPosition { offset })?;
        self.caret = Some(position);
        Ok(())
    }

    fn write(&mut self, styled: &StyledText) {
        self.nodes = styled.runs.iter().map(|run| run.text.clone()).collect();
        // replacing the nodes drops the selection
        self.caret = None;
    }
}
