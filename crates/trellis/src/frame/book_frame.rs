//! A container showing one of several equally sized pages.

use trellis_core::logging::{span_names, targets};
use trellis_core::{InstanceKey, WidgetId};
use trellis_render::{Point, Size, WidgetRenderer};
use trellis_style::StyleMap;

use crate::error::{Error, Result};
use crate::widget::{Container, Event, FlagsReceiver, GeometryUpdate, WidgetFlags, WidgetTree};

/// Shows exactly one page at a time.
///
/// Every page is sized to the largest natural page size, so flipping pages
/// never changes the book's size and only needs an individual update. Pages
/// must be containers that honor [`Container::force_size`]; a page that
/// reports a different size after being forced is an
/// [`Error::InvariantViolation`].
///
/// Hidden pages receive no events, no drawing and no placement, and are not
/// polled between passes: a sizing pass sizes every page and settles their
/// pending requests, and changes made to a hidden page are picked up when it
/// is shown. Styling reaches every page.
#[derive(Debug)]
pub struct BookFrame {
    instance: InstanceKey,
    pages: Vec<WidgetId>,
    current: usize,
    location: Point,
    size: Size,
    forced_size: Option<Size>,
    flags: WidgetFlags,
}

impl BookFrame {
    /// A book frame without pages.
    pub fn new() -> Self {
        let mut flags = WidgetFlags::new();
        flags.receive_whole_family_update_needed();
        Self {
            instance: InstanceKey::next(),
            pages: Vec::new(),
            current: 0,
            location: Point::ZERO,
            size: Size::ZERO,
            forced_size: None,
            flags,
        }
    }

    /// Replace the pages of the book stored under `book`.
    ///
    /// Shows the first page and schedules a whole-family pass. Every page
    /// must be a container and must not contain the book.
    pub fn set_pages(tree: &mut WidgetTree, book: WidgetId, pages: Vec<WidgetId>) -> Result<()> {
        tree.check_adoption(book, &pages)?;
        if let Some(&page) = pages.iter().find(|&&page| !tree.is_container(page)) {
            return Err(Error::WrongWidgetType {
                id: page,
                expected: "container page",
            });
        }
        let previous = tree.children(book)?;
        tree.container_mut::<BookFrame>(book)?.replace_pages(pages.clone());
        tree.adopt(book, &previous, &pages)
    }

    fn replace_pages(&mut self, pages: Vec<WidgetId>) {
        tracing::debug!(target: targets::BOOK, pages = pages.len(), "pages replaced");
        self.pages = pages;
        self.current = 0;
        self.flags.receive_whole_family_update_needed();
    }

    /// Show page `index`.
    pub fn flip_to_page(&mut self, index: usize) -> Result<()> {
        if index >= self.pages.len() {
            return Err(Error::PageOutOfRange {
                index,
                count: self.pages.len(),
            });
        }
        if index != self.current {
            tracing::debug!(target: targets::BOOK, from = self.current, to = index, "flipped page");
            self.current = index;
            self.flags.receive_individual_update_needed();
        }
        Ok(())
    }

    /// The page being shown.
    pub fn current_page(&self) -> Result<WidgetId> {
        self.pages.get(self.current).copied().ok_or(Error::NoPages)
    }

    #[inline]
    pub fn current_page_index(&self) -> usize {
        self.current
    }

    #[inline]
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    #[inline]
    pub fn pages(&self) -> &[WidgetId] {
        &self.pages
    }

    #[inline]
    pub fn instance(&self) -> InstanceKey {
        self.instance
    }

    fn visible_page(&self) -> Option<WidgetId> {
        self.pages.get(self.current).copied()
    }

    fn poll_visible_page(
        &mut self,
        tree: &mut WidgetTree,
        mut level: GeometryUpdate,
    ) -> Result<GeometryUpdate> {
        let Some(page) = self.visible_page() else {
            return Ok(level);
        };
        match tree.take_update_request(page)? {
            GeometryUpdate::Individual => {
                let before = tree.size(page)?;
                tree.update_geometry(page)?;
                let after = tree.size(page)?;
                if before != after {
                    let err = Error::invariant(format!(
                        "page {page:?} changed size from {before:?} to {after:?} in an individual update"
                    ));
                    tracing::error!(target: targets::BOOK, %err, "individual update failed");
                    return Err(err);
                }
                level = level.max(GeometryUpdate::Redraw);
            }
            other => level = level.max(other),
        }
        Ok(level)
    }

    fn run_geometry_pass(&mut self, tree: &mut WidgetTree) -> Result<()> {
        let span = tracing::debug_span!(span_names::GEOMETRY_PASS, instance = self.instance.as_raw());
        let _guard = span.enter();
        self.update_size(tree)?;
        self.set_location(tree, self.location)
    }
}

impl Default for BookFrame {
    fn default() -> Self {
        Self::new()
    }
}

impl Container for BookFrame {
    fn location(&self) -> Point {
        self.location
    }

    fn size(&self) -> Size {
        self.size
    }

    fn children(&self) -> Vec<WidgetId> {
        self.pages.clone()
    }

    fn set_location(&mut self, tree: &mut WidgetTree, location: Point) -> Result<()> {
        self.location = location;
        match self.visible_page() {
            Some(page) => tree.set_location(page, location),
            None => Ok(()),
        }
    }

    fn update_size(&mut self, tree: &mut WidgetTree) -> Result<()> {
        let floor = self.forced_size.unwrap_or(Size::ZERO);
        if self.pages.is_empty() {
            self.size = floor;
            return Ok(());
        }

        let mut largest = floor;
        for &page in &self.pages {
            tree.force_size(page, None)?;
            tree.update_size(page)?;
            largest = largest.max(tree.size(page)?);
        }

        for &page in &self.pages {
            tree.force_size(page, Some(largest))?;
            tree.update_size(page)?;
            let size = tree.size(page)?;
            if size != largest {
                let err = Error::invariant(format!(
                    "page {page:?} reports {size:?} after being forced to {largest:?}"
                ));
                tracing::error!(target: targets::BOOK, %err, "page size is unstable");
                return Err(err);
            }
        }

        // Hidden pages were just sized; whatever they asked for is settled.
        let visible = self.visible_page();
        for &page in &self.pages {
            if Some(page) != visible {
                tree.take_update_request(page)?;
            }
        }

        self.size = largest;
        tracing::debug!(target: targets::BOOK, size = ?largest, "book sized");
        Ok(())
    }

    fn update_geometry(&mut self, tree: &mut WidgetTree) -> Result<()> {
        self.set_location(tree, self.location)
    }

    fn force_size(&mut self, size: Option<Size>) {
        self.forced_size = size;
    }

    fn process_event(&mut self, tree: &mut WidgetTree, event: &Event) -> Result<()> {
        match self.visible_page() {
            Some(page) => tree.process_event(page, event),
            None => Ok(()),
        }
    }

    fn stylize(&mut self, tree: &mut WidgetTree, styles: &StyleMap) -> Result<()> {
        for &page in &self.pages {
            tree.stylize(page, styles)?;
        }
        self.flags.receive_whole_family_update_needed();
        Ok(())
    }

    fn take_update_request(&mut self, tree: &mut WidgetTree) -> Result<GeometryUpdate> {
        let level = self.flags.take();
        self.poll_visible_page(tree, level).inspect_err(|_| {
            // A taken flip or pass must survive the failure.
            self.flags.receive_whole_family_update_needed();
        })
    }

    fn draw(&self, tree: &WidgetTree, renderer: &mut dyn WidgetRenderer) -> Result<()> {
        match self.visible_page() {
            Some(page) => tree.draw(page, renderer),
            None => Ok(()),
        }
    }

    fn collect_focus_widgets(&self, tree: &WidgetTree, out: &mut Vec<WidgetId>) -> Result<()> {
        match self.visible_page() {
            Some(page) => tree.collect_focus_widgets(page, out),
            None => Ok(()),
        }
    }

    fn clear_focus_widgets(&mut self) {}

    fn check_for_geometry_updates(&mut self, tree: &mut WidgetTree) -> Result<GeometryUpdate> {
        let level = self.take_update_request(tree)?;
        let result = match level {
            GeometryUpdate::WholeFamily => self.run_geometry_pass(tree),
            GeometryUpdate::Individual => self.update_geometry(tree),
            GeometryUpdate::Redraw | GeometryUpdate::None => Ok(()),
        };
        if let Err(err) = result {
            self.flags.raise(level);
            return Err(err);
        }
        Ok(level)
    }
}

static_assertions::assert_impl_all!(BookFrame: Send, Sync);
