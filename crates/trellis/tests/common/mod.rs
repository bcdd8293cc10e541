//! Helpers shared by the integration tests.

#![allow(dead_code)]

use trellis::WidgetId;
use trellis::render::{MonospaceMetrics, Size, WidgetRenderer};
use trellis::style::{StyleMap, default_styles};
use trellis::widget::{FlagsReceiver, Widget, WidgetBase, WidgetTree};
use trellis::widget::widgets::TextArea;

/// Install a test subscriber once; honors `RUST_LOG`.
pub fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// The default theme around a monospace font (8px advance at size 16).
pub fn styles() -> StyleMap {
    default_styles(MonospaceMetrics::default().shared())
}

/// A text area pinned to `width` x `height`.
pub fn block(tree: &mut WidgetTree, width: i32, height: i32) -> WidgetId {
    let mut area = TextArea::new("");
    area.set_fixed_size(Some((width, height)))
        .expect("non-negative fixed size");
    tree.insert(area)
}

/// A 10x10 widget that grows in individual updates while `grows` is set.
#[derive(Default)]
pub struct Swelling {
    base: WidgetBase,
    pub grows: bool,
}

impl Swelling {
    pub fn request_individual_update(&mut self) {
        self.base.flags_mut().receive_individual_update_needed();
    }
}

impl Widget for Swelling {
    fn widget_base(&self) -> &WidgetBase {
        &self.base
    }

    fn widget_base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }

    fn stylize(&mut self, _styles: &StyleMap) -> trellis::Result<()> {
        Ok(())
    }

    fn update_size(&mut self) {
        self.base.resolve_size(Size::new(10, 10));
    }

    fn update_geometry(&mut self) {
        if self.grows {
            let size = self.base.size();
            self.base.resolve_size(Size::new(size.width + 1, size.height));
        }
    }

    fn draw(&self, _renderer: &mut dyn WidgetRenderer) {}
}
