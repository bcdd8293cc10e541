//! Contract tests shared by every widget kind.

use trellis_render::{MonospaceMetrics, Point, Size};
use trellis_style::{StyleMap, default_styles};

use super::widgets::{TextArea, TextButton};
use super::*;
use crate::error::Error;
use crate::frame::{BareFrame, BookFrame, Frame};

fn styles() -> StyleMap {
    default_styles(MonospaceMetrics::default().shared())
}

#[test]
fn test_moving_never_resizes_leaf_widgets() {
    let mut tree = WidgetTree::new();
    let area = tree.insert(TextArea::new("moving text"));
    let button = tree.insert(TextButton::new("Go"));
    let styles = styles();

    for id in [area, button] {
        tree.stylize(id, &styles).unwrap();
        tree.update_size(id).unwrap();
        let size = tree.size(id).unwrap();
        for location in [(0, 0), (37, 5), (-20, 400), (0, 0)] {
            tree.set_location(id, Point::from(location)).unwrap();
            assert_eq!(tree.size(id).unwrap(), size);
            assert_eq!(tree.location(id).unwrap(), Point::from(location));
        }
    }
}

#[test]
fn test_moving_never_resizes_frames() {
    let mut tree = WidgetTree::new();
    let frame = tree.insert_container(Frame::with_title("Settings"));
    let area = tree.insert(TextArea::new("label"));
    tree.begin_adding_widgets(frame).add(area).finish().unwrap();
    tree.stylize(frame, &styles()).unwrap();
    tree.check_for_geometry_updates(frame).unwrap();

    let size = tree.size(frame).unwrap();
    for location in [(10, 10), (250, -3), (0, 0)] {
        tree.set_location(frame, Point::from(location)).unwrap();
        assert_eq!(tree.size(frame).unwrap(), size);
    }
}

#[test]
fn test_typed_access_checks_the_type() {
    let mut tree = WidgetTree::new();
    let area = tree.insert(TextArea::new("a"));
    let frame = tree.insert_container(BareFrame::new());

    assert!(tree.widget::<TextArea>(area).is_ok());
    assert!(matches!(
        tree.widget::<TextButton>(area),
        Err(Error::WrongWidgetType { id, .. }) if id == area
    ));
    assert!(matches!(
        tree.widget_mut::<TextArea>(frame),
        Err(Error::WrongWidgetType { .. })
    ));
    assert!(matches!(
        tree.container::<BookFrame>(frame),
        Err(Error::WrongWidgetType { .. })
    ));
    assert!(tree.container_mut::<BareFrame>(frame).is_ok());
    assert!(matches!(
        tree.with_container(area, |_, _| Ok(())),
        Err(Error::WrongWidgetType { .. })
    ));
}

#[test]
fn test_checked_out_container_is_busy() {
    let mut tree = WidgetTree::new();
    let frame = tree.insert_container(BareFrame::new());
    let inner = tree
        .with_container(frame, |_, tree| Ok(tree.size(frame)))
        .unwrap();
    assert_eq!(inner, Err(Error::WidgetBusy(frame)));
    // Checked back in afterwards.
    assert_eq!(tree.size(frame), Ok(Size::ZERO));
}

#[test]
fn test_removed_widget_is_not_found() {
    let mut tree = WidgetTree::new();
    let frame = tree.insert_container(BareFrame::new());
    let area = tree.insert(TextArea::new("gone soon"));
    tree.begin_adding_widgets(frame).add(area).finish().unwrap();
    assert_eq!(tree.parent(area), Some(frame));

    tree.remove(area).unwrap();
    assert!(!tree.contains(area));
    assert_eq!(tree.parent(area), None);
    assert_eq!(tree.remove(area), Err(Error::WidgetNotFound(area)));
    assert_eq!(
        tree.check_for_geometry_updates(frame),
        Err(Error::WidgetNotFound(area))
    );
}

#[test]
fn test_removing_a_container_orphans_its_children() {
    let mut tree = WidgetTree::new();
    let frame = tree.insert_container(BareFrame::new());
    let area = tree.insert(TextArea::new("child"));
    tree.begin_adding_widgets(frame).add(area).finish().unwrap();

    tree.remove(frame).unwrap();
    assert_eq!(tree.parent(area), None);
    assert_eq!(tree.len(), 1);
}

#[test]
fn test_force_size_needs_a_container() {
    let mut tree = WidgetTree::new();
    let area = tree.insert(TextArea::new("leaf"));
    assert!(matches!(
        tree.force_size(area, Some(Size::new(5, 5))),
        Err(Error::WrongWidgetType { .. })
    ));
}

#[test]
fn test_only_focus_widgets_are_collected() {
    let mut tree = WidgetTree::new();
    let frame = tree.insert_container(BareFrame::new());
    let area = tree.insert(TextArea::new("not focusable"));
    let button = tree.insert(TextButton::new("focusable"));
    tree.begin_adding_widgets(frame)
        .add(area)
        .add(button)
        .finish()
        .unwrap();

    let mut found = Vec::new();
    tree.collect_focus_widgets(frame, &mut found).unwrap();
    assert_eq!(found, vec![button]);
    assert!(tree.focus_widget_mut(button).is_ok());
    assert!(tree.focus_widget_mut(area).is_err());
}
