//! Builder for a frame's widget list.

use trellis_core::WidgetId;
use trellis_core::logging::targets;

use super::entry::FrameEntry;
use crate::error::Result;
use crate::widget::WidgetTree;

/// Records an ordered widget list and commits it into a frame.
///
/// Obtained from [`WidgetTree::begin_adding_widgets`]. The list is committed
/// by [`finish`](Self::finish), which reports errors, or else when the adder
/// is dropped. A failed commit on drop has no caller to report to, so it is
/// logged and then panics; nothing is committed while a panic is already
/// unwinding.
#[must_use = "the widget list is committed by `finish()` or when the adder is dropped"]
pub struct WidgetAdder<'a> {
    tree: &'a mut WidgetTree,
    frame: WidgetId,
    entries: Vec<FrameEntry>,
    spacer_count: usize,
    committed: bool,
}

impl<'a> WidgetAdder<'a> {
    pub(crate) fn new(tree: &'a mut WidgetTree, frame: WidgetId) -> Self {
        Self {
            tree,
            frame,
            entries: Vec::new(),
            spacer_count: 0,
            committed: false,
        }
    }

    /// Append a widget.
    pub fn add(mut self, widget: WidgetId) -> Self {
        self.entries.push(FrameEntry::Widget(widget));
        self
    }

    /// Append a horizontal spacer.
    pub fn add_horizontal_spacer(mut self) -> Self {
        self.entries.push(FrameEntry::HorizontalSpacer(self.spacer_count));
        self.spacer_count += 1;
        self
    }

    /// End the current line.
    pub fn add_line_separator(mut self) -> Self {
        self.entries.push(FrameEntry::LineSeparator);
        self
    }

    /// The entries recorded so far.
    pub fn entries(&self) -> &[FrameEntry] {
        &self.entries
    }

    /// Commit the list into the frame.
    pub fn finish(mut self) -> Result<()> {
        self.committed = true;
        self.commit()
    }

    fn commit(&mut self) -> Result<()> {
        let entries = std::mem::take(&mut self.entries);
        self.tree.finalize_widgets(self.frame, entries)
    }
}

impl Drop for WidgetAdder<'_> {
    fn drop(&mut self) {
        if self.committed || std::thread::panicking() {
            return;
        }
        self.committed = true;
        if let Err(err) = self.commit() {
            tracing::error!(target: targets::TREE, frame = ?self.frame, %err, "widget list commit failed");
            panic!("committing the widget list of {:?} failed: {err}", self.frame);
        }
    }
}
