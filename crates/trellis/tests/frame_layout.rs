//! Integration tests for frame sizing, spacer distribution and placement.

mod common;

use common::{Swelling, block, init_logging, styles};
use trellis::frame::layout::{self, LayoutItem};
use trellis::frame::{BareFrame, Frame, FrameEntry};
use trellis::render::{Point, Rect, Size, WidgetRenderer};
use trellis::style::StyleMap;
use trellis::widget::widgets::TextArea;
use trellis::widget::{Event, GeometryUpdate, MouseButton, Widget, WidgetBase, WidgetTree};
use trellis::{Error, WidgetId};

fn frame_with_width(tree: &mut WidgetTree, width: i32, padding: i32) -> WidgetId {
    let mut frame = BareFrame::new();
    frame.set_fixed_width(Some(width)).unwrap();
    frame.set_padding(padding).unwrap();
    tree.insert_container(frame)
}

#[test]
fn test_spacer_pushes_widget_to_the_right_edge() {
    init_logging();
    let mut tree = WidgetTree::new();
    let frame = frame_with_width(&mut tree, 300, 10);
    let name = block(&mut tree, 100, 20);
    let button = block(&mut tree, 60, 20);
    let second = block(&mut tree, 50, 20);

    tree.begin_adding_widgets(frame)
        .add(name)
        .add_horizontal_spacer()
        .add(button)
        .add_line_separator()
        .add(second)
        .finish()
        .unwrap();

    assert_eq!(
        tree.check_for_geometry_updates(frame),
        Ok(GeometryUpdate::WholeFamily)
    );

    let bare = tree.container::<BareFrame>(frame).unwrap();
    assert_eq!(bare.spacer_widths(), vec![100]);
    assert_eq!(bare.spacers()[0].location, Point::new(120, 10));
    assert_eq!(tree.size(frame).unwrap(), Size::new(300, 10 + (20 + 10) * 2));

    assert_eq!(tree.location(name).unwrap(), Point::new(10, 10));
    assert_eq!(tree.bounds(button).unwrap(), Rect::new(230, 10, 60, 20));
    assert_eq!(tree.bounds(button).unwrap().right(), 290);
    assert_eq!(tree.location(second).unwrap(), Point::new(10, 10 + 20 + 10));
}

#[test]
fn test_empty_frame() {
    let mut tree = WidgetTree::new();
    let frame = tree.insert_container(BareFrame::new());

    assert_eq!(
        tree.check_for_geometry_updates(frame),
        Ok(GeometryUpdate::WholeFamily)
    );
    assert_eq!(tree.size(frame).unwrap(), Size::ZERO);
    assert_eq!(tree.check_for_geometry_updates(frame), Ok(GeometryUpdate::None));
}

#[test]
fn test_unbounded_frame_fits_widest_line() {
    let mut tree = WidgetTree::new();
    let frame = tree.insert_container(BareFrame::new());
    tree.container_mut::<BareFrame>(frame)
        .unwrap()
        .set_padding(4)
        .unwrap();
    let a = block(&mut tree, 30, 10);
    let b = block(&mut tree, 40, 12);
    let c = block(&mut tree, 100, 8);
    tree.begin_adding_widgets(frame)
        .add(a)
        .add(b)
        .add_line_separator()
        .add(c)
        .finish()
        .unwrap();
    tree.check_for_geometry_updates(frame).unwrap();

    // Widest line is the second: 4 + 100 + 4.
    assert_eq!(tree.size(frame).unwrap(), Size::new(108, 4 + (12 + 4) + (8 + 4)));
    assert_eq!(tree.location(b).unwrap(), Point::new(38, 4));
    assert_eq!(tree.location(c).unwrap(), Point::new(4, 20));
}

#[test]
fn test_trailing_line_spacer_takes_leftover() {
    let mut tree = WidgetTree::new();
    let frame = frame_with_width(&mut tree, 300, 10);
    let first = block(&mut tree, 80, 20);
    let last = block(&mut tree, 50, 20);
    tree.begin_adding_widgets(frame)
        .add(first)
        .add_line_separator()
        .add(last)
        .add_horizontal_spacer()
        .finish()
        .unwrap();
    tree.check_for_geometry_updates(frame).unwrap();

    let bare = tree.container::<BareFrame>(frame).unwrap();
    // 290 available, 60 consumed by the widget and its padding.
    assert_eq!(bare.spacer_widths(), vec![290 - 60 - 10]);
}

#[test]
fn test_forced_size_is_a_lower_bound() {
    let mut tree = WidgetTree::new();
    let frame = tree.insert_container(BareFrame::new());
    let a = block(&mut tree, 20, 20);
    tree.begin_adding_widgets(frame).add(a).finish().unwrap();
    tree.force_size(frame, Some(Size::new(200, 10))).unwrap();
    tree.update_size(frame).unwrap();
    assert_eq!(tree.size(frame).unwrap(), Size::new(200, 20));
}

#[test]
fn test_own_minimum_survives_owner_clearing_its_bound() {
    let mut tree = WidgetTree::new();
    let frame = tree.insert_container(BareFrame::new());
    let a = block(&mut tree, 20, 20);
    tree.begin_adding_widgets(frame).add(a).finish().unwrap();
    tree.container_mut::<BareFrame>(frame)
        .unwrap()
        .set_forced_size(Some(Size::new(200, 10)));

    tree.force_size(frame, Some(Size::new(50, 300))).unwrap();
    tree.update_size(frame).unwrap();
    assert_eq!(tree.size(frame).unwrap(), Size::new(200, 300));

    tree.force_size(frame, None).unwrap();
    tree.update_size(frame).unwrap();
    assert_eq!(tree.size(frame).unwrap(), Size::new(200, 20));
}

/// Minimal xorshift so layouts vary without pulling in a random crate.
struct Xorshift(u32);

impl Xorshift {
    fn next(&mut self, bound: u32) -> i32 {
        self.0 ^= self.0 << 13;
        self.0 ^= self.0 >> 17;
        self.0 ^= self.0 << 5;
        (self.0 % bound) as i32
    }
}

fn random_items(rng: &mut Xorshift) -> (Vec<LayoutItem>, usize) {
    let mut items = Vec::new();
    let mut spacers = 0;
    for _ in 0..(4 + rng.next(12)) {
        match rng.next(6) {
            0 => items.push(LayoutItem::LineBreak),
            1 => {
                items.push(LayoutItem::Spacer(spacers));
                spacers += 1;
            }
            _ => items.push(LayoutItem::Widget(Size::new(
                5 + rng.next(120),
                5 + rng.next(30),
            ))),
        }
    }
    (items, spacers)
}

#[test]
fn test_all_passes_agree_on_lines() {
    let mut rng = Xorshift(0x2545_f491);
    for _ in 0..200 {
        let (items, spacers) = random_items(&mut rng);
        let padding = rng.next(12);
        let available = 40 + rng.next(300);

        let measured = layout::measure(&items, padding, Some(available));
        let distributed = layout::distribute_spacers(&items, padding, available, spacers);
        let placed = layout::place(&items, padding, available, &distributed.widths, Point::ZERO);

        assert_eq!(measured.line_starts, distributed.line_starts, "{items:?}");
        assert_eq!(measured.line_starts, placed.line_starts, "{items:?}");
    }
}

#[test]
fn test_spacers_never_overflow_a_fitting_line() {
    let mut rng = Xorshift(0x9e37_79b9);
    for _ in 0..200 {
        let (items, spacers) = random_items(&mut rng);
        let padding = rng.next(12);
        let available = 40 + rng.next(300);

        let distributed = layout::distribute_spacers(&items, padding, available, spacers);
        let placed = layout::place(&items, padding, available, &distributed.widths, Point::ZERO);

        let mut line_end = 0;
        let mut line_natural = 0;
        let mut line_widgets = 0;
        let check_line = |end: i32, natural: i32, widgets: i32| {
            if widgets > 0 && natural <= available {
                assert!(end <= available, "{items:?}: {end} > {available}");
            }
        };
        for (index, item) in items.iter().enumerate() {
            if placed.line_starts.contains(&index) && index > 0 {
                check_line(line_end, line_natural, line_widgets);
                line_end = 0;
                line_natural = 0;
                line_widgets = 0;
            }
            let Some(position) = placed.positions[index] else {
                continue;
            };
            match item {
                LayoutItem::Widget(size) => {
                    line_end = position.x + size.width + padding;
                    line_natural += size.width + padding;
                    line_widgets += 1;
                }
                LayoutItem::Spacer(spacer) => {
                    let width = distributed.widths[*spacer];
                    if width > 0 {
                        line_end = position.x + width + padding;
                    }
                }
                LayoutItem::LineBreak => {}
            }
        }
        check_line(line_end, line_natural, line_widgets);
    }
}

#[test]
fn test_frame_cannot_contain_itself() {
    let mut tree = WidgetTree::new();
    let frame = tree.insert_container(BareFrame::new());
    let result = tree.begin_adding_widgets(frame).add(frame).finish();
    assert_eq!(
        result,
        Err(Error::SelfContainment {
            frame,
            child: frame
        })
    );
}

#[test]
fn test_frame_cannot_contain_an_ancestor() {
    let mut tree = WidgetTree::new();
    let outer = tree.insert_container(BareFrame::new());
    let middle = tree.insert_container(BareFrame::new());
    let inner = tree.insert_container(BareFrame::new());
    tree.begin_adding_widgets(outer).add(middle).finish().unwrap();
    tree.begin_adding_widgets(middle).add(inner).finish().unwrap();

    let result = tree.begin_adding_widgets(inner).add(outer).finish();
    assert_eq!(
        result,
        Err(Error::SelfContainment {
            frame: inner,
            child: outer
        })
    );
    // Nothing was committed.
    assert!(tree.container::<BareFrame>(inner).unwrap().entries().is_empty());
    assert_eq!(tree.parent(outer), None);
}

#[test]
fn test_duplicate_widget_is_rejected() {
    let mut tree = WidgetTree::new();
    let frame = tree.insert_container(BareFrame::new());
    let a = block(&mut tree, 10, 10);
    let result = tree.begin_adding_widgets(frame).add(a).add(a).finish();
    assert!(matches!(result, Err(Error::InvalidArgument(_))));
}

#[test]
fn test_adder_commits_on_drop() {
    let mut tree = WidgetTree::new();
    let frame = tree.insert_container(BareFrame::new());
    let a = block(&mut tree, 10, 10);
    let b = block(&mut tree, 10, 10);

    let _ = tree
        .begin_adding_widgets(frame)
        .add(a)
        .add_line_separator()
        .add(b);

    let bare = tree.container::<BareFrame>(frame).unwrap();
    assert_eq!(
        bare.entries(),
        &[
            FrameEntry::Widget(a),
            FrameEntry::LineSeparator,
            FrameEntry::Widget(b)
        ]
    );
    assert_eq!(tree.parent(b), Some(frame));
}

#[test]
#[should_panic(expected = "committing the widget list")]
fn test_failed_commit_on_drop_panics() {
    let mut tree = WidgetTree::new();
    let frame = tree.insert_container(BareFrame::new());
    let _ = tree.begin_adding_widgets(frame).add(frame);
}

#[test]
fn test_recommitting_replaces_children() {
    let mut tree = WidgetTree::new();
    let frame = tree.insert_container(BareFrame::new());
    let a = block(&mut tree, 10, 10);
    let b = block(&mut tree, 10, 10);
    tree.begin_adding_widgets(frame).add(a).finish().unwrap();
    tree.begin_adding_widgets(frame).add(b).finish().unwrap();

    assert_eq!(tree.parent(a), None);
    assert_eq!(tree.parent(b), Some(frame));
    assert_eq!(tree.children(frame).unwrap(), vec![b]);
}

/// A widget that grows every time it is moved.
struct Restless {
    base: WidgetBase,
    moves: i32,
}

impl Widget for Restless {
    fn widget_base(&self) -> &WidgetBase {
        &self.base
    }

    fn widget_base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }

    fn set_location(&mut self, location: Point) {
        self.moves += 1;
        self.base.set_location(location);
        self.base.resolve_size(Size::new(10 + self.moves, 10));
    }

    fn stylize(&mut self, _styles: &StyleMap) -> trellis::Result<()> {
        Ok(())
    }

    fn update_size(&mut self) {
        self.base.resolve_size(Size::new(10, 10));
    }

    fn draw(&self, _renderer: &mut dyn WidgetRenderer) {}
}

#[test]
fn test_widget_resized_by_move_is_reported() {
    let mut tree = WidgetTree::new();
    let frame = tree.insert_container(BareFrame::new());
    let restless = tree.insert(Restless {
        base: WidgetBase::new(),
        moves: 0,
    });
    tree.begin_adding_widgets(frame).add(restless).finish().unwrap();

    assert!(matches!(
        tree.check_for_geometry_updates(frame),
        Err(Error::InvariantViolation(_))
    ));
    // The pass stays pending and fails again.
    assert!(matches!(
        tree.check_for_geometry_updates(frame),
        Err(Error::InvariantViolation(_))
    ));
}

#[test]
fn test_text_change_triggers_relayout() {
    let mut tree = WidgetTree::new();
    let frame = tree.insert_container(BareFrame::new());
    let label = tree.insert(TextArea::new("ab"));
    let after = block(&mut tree, 10, 10);
    tree.begin_adding_widgets(frame).add(label).add(after).finish().unwrap();
    tree.stylize(frame, &styles()).unwrap();
    tree.check_for_geometry_updates(frame).unwrap();
    // padding 5, "ab" is 16px wide.
    assert_eq!(tree.location(after).unwrap(), Point::new(5 + 16 + 5, 5));

    tree.widget_mut::<TextArea>(label).unwrap().set_string("abcd");
    assert_eq!(
        tree.check_for_geometry_updates(frame),
        Ok(GeometryUpdate::WholeFamily)
    );
    assert_eq!(tree.location(after).unwrap(), Point::new(5 + 32 + 5, 5));

    tree.widget_mut::<TextArea>(label).unwrap().set_string("wxyz");
    assert_eq!(tree.check_for_geometry_updates(frame), Ok(GeometryUpdate::Redraw));
}

#[test]
fn test_nested_frame_change_relayouts_the_root() {
    let mut tree = WidgetTree::new();
    let root = tree.insert_container(BareFrame::new());
    let nested = tree.insert_container(BareFrame::new());
    let inner = block(&mut tree, 30, 30);
    let sibling = block(&mut tree, 10, 10);
    tree.begin_adding_widgets(nested).add(inner).finish().unwrap();
    tree.begin_adding_widgets(root).add(nested).add(sibling).finish().unwrap();
    tree.check_for_geometry_updates(root).unwrap();
    assert_eq!(tree.location(sibling).unwrap(), Point::new(30, 0));

    tree.widget_mut::<TextArea>(inner)
        .unwrap()
        .set_fixed_size(Some((50, 30)))
        .unwrap();
    assert_eq!(
        tree.check_for_geometry_updates(root),
        Ok(GeometryUpdate::WholeFamily)
    );
    assert_eq!(tree.location(sibling).unwrap(), Point::new(50, 0));
}

#[test]
fn test_titled_frame_reserves_the_title_bar() {
    let mut tree = WidgetTree::new();
    let frame = tree.insert_container(Frame::with_title("Settings"));
    let label = tree.insert(TextArea::new("abc"));
    tree.begin_adding_widgets(frame).add(label).finish().unwrap();
    tree.stylize(frame, &styles()).unwrap();
    tree.check_for_geometry_updates(frame).unwrap();

    // Title bar: 16px line + 5px padding. The title (64px) sets the width.
    assert_eq!(tree.location(label).unwrap(), Point::new(5, 21 + 5));
    assert_eq!(tree.size(frame).unwrap(), Size::new(64 + 10, 21 + 5 + 16 + 5));
}

#[test]
fn test_dragging_the_title_bar_moves_the_family() {
    let mut tree = WidgetTree::new();
    let frame = tree.insert_container(Frame::with_title("Drag me"));
    let label = tree.insert(TextArea::new("content"));
    tree.begin_adding_widgets(frame).add(label).finish().unwrap();
    tree.container_mut::<Frame>(frame).unwrap().set_movable(true);
    tree.stylize(frame, &styles()).unwrap();
    tree.check_for_geometry_updates(frame).unwrap();
    let before = tree.location(label).unwrap();

    tree.process_event(frame, &Event::mouse_press(MouseButton::Left, (10, 5)))
        .unwrap();
    tree.process_event(frame, &Event::mouse_move((60, 45))).unwrap();
    tree.process_event(frame, &Event::mouse_release(MouseButton::Left, (60, 45)))
        .unwrap();

    assert_eq!(
        tree.check_for_geometry_updates(frame),
        Ok(GeometryUpdate::WholeFamily)
    );
    assert_eq!(tree.location(frame).unwrap(), Point::new(50, 40));
    assert_eq!(tree.location(label).unwrap(), before + Point::new(50, 40));
}

#[test]
fn test_individual_update_that_resizes_is_reported_and_retried() {
    init_logging();
    let mut tree = WidgetTree::new();
    let frame = tree.insert_container(BareFrame::new());
    let swelling = tree.insert(Swelling::default());
    let after = block(&mut tree, 10, 10);
    tree.begin_adding_widgets(frame).add(swelling).add(after).finish().unwrap();
    tree.check_for_geometry_updates(frame).unwrap();
    assert_eq!(tree.location(after).unwrap(), Point::new(10, 0));

    let widget = tree.widget_mut::<Swelling>(swelling).unwrap();
    widget.grows = true;
    widget.request_individual_update();
    assert!(matches!(
        tree.check_for_geometry_updates(frame),
        Err(Error::InvariantViolation(_))
    ));

    // A full pass stays pending and restores the layout.
    tree.widget_mut::<Swelling>(swelling).unwrap().grows = false;
    assert_eq!(
        tree.check_for_geometry_updates(frame),
        Ok(GeometryUpdate::WholeFamily)
    );
    assert_eq!(tree.size(swelling).unwrap(), Size::new(10, 10));
    assert_eq!(tree.location(after).unwrap(), Point::new(10, 0));
    assert_eq!(tree.check_for_geometry_updates(frame), Ok(GeometryUpdate::None));
}

#[test]
fn test_well_behaved_individual_update_only_redraws() {
    let mut tree = WidgetTree::new();
    let frame = tree.insert_container(BareFrame::new());
    let swelling = tree.insert(Swelling::default());
    tree.begin_adding_widgets(frame).add(swelling).finish().unwrap();
    tree.check_for_geometry_updates(frame).unwrap();

    tree.widget_mut::<Swelling>(swelling)
        .unwrap()
        .request_individual_update();
    assert_eq!(tree.check_for_geometry_updates(frame), Ok(GeometryUpdate::Redraw));
}
