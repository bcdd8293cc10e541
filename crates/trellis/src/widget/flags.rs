//! The geometry-update flag protocol.
//!
//! Widgets never hold a pointer to their owner. Instead they record what
//! they need in their own [`WidgetFlags`], and owners *pull* the request with
//! `take_update_request` once per tick. Requests raised between two polls
//! collapse into the highest [`GeometryUpdate`] level.

/// How much work a widget needs from its owner, ordered by cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum GeometryUpdate {
    /// Nothing changed.
    #[default]
    None,
    /// Only the appearance changed; geometry is untouched.
    Redraw,
    /// A local, non-resizing recompute (for example, a different page is
    /// shown). The widget guarantees its size stays the same.
    Individual,
    /// The widget's size may have changed: the whole frame family needs a
    /// sizing and placement pass.
    WholeFamily,
}

impl GeometryUpdate {
    /// Whether anything needs to be redrawn.
    #[inline]
    pub fn needs_redraw(self) -> bool {
        self >= Self::Redraw
    }

    /// Whether a sizing and placement pass is required.
    #[inline]
    pub fn needs_full_pass(self) -> bool {
        self == Self::WholeFamily
    }
}

/// Something that accepts update requests.
pub trait FlagsReceiver {
    /// A full sizing + placement pass is required.
    fn receive_whole_family_update_needed(&mut self);

    /// A local, size-preserving recompute is required.
    fn receive_individual_update_needed(&mut self);

    /// Only a redraw is required.
    fn receive_redraw_needed(&mut self);
}

/// Pending update requests of one widget, coalesced to the highest level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WidgetFlags {
    pending: GeometryUpdate,
}

impl WidgetFlags {
    /// Create flags with nothing pending.
    pub fn new() -> Self {
        Self::default()
    }

    /// The pending level, without resetting it.
    #[inline]
    pub fn pending(&self) -> GeometryUpdate {
        self.pending
    }

    /// Raise the pending level to at least `level`.
    #[inline]
    pub fn raise(&mut self, level: GeometryUpdate) {
        self.pending = self.pending.max(level);
    }

    /// Read and reset the pending level.
    #[inline]
    pub fn take(&mut self) -> GeometryUpdate {
        std::mem::take(&mut self.pending)
    }
}

impl FlagsReceiver for WidgetFlags {
    fn receive_whole_family_update_needed(&mut self) {
        self.raise(GeometryUpdate::WholeFamily);
    }

    fn receive_individual_update_needed(&mut self) {
        self.raise(GeometryUpdate::Individual);
    }

    fn receive_redraw_needed(&mut self) {
        self.raise(GeometryUpdate::Redraw);
    }
}
