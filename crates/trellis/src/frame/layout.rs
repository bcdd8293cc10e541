//! Line-wrapping flow layout.
//!
//! A frame lays its entries out left to right, starting a new line at every
//! line separator and whenever the next widget would overflow the available
//! width. Horizontal spacers absorb the space left over on their line.
//!
//! The three passes (sizing, spacer distribution, placement) are pure
//! functions over [`LayoutItem`]s. They all split lines with the same
//! routine and differ only in how far each item advances the cursor:
//!
//! | item        | natural advance (sizing, distribution) | placed advance        |
//! |-------------|----------------------------------------|-----------------------|
//! | widget      | `width + padding`                      | `width + padding`     |
//! | spacer      | `0`                                    | `w + padding` if `w > 0`, else `0` |
//! | separator   | ends the line                          | ends the line         |
//!
//! A widget breaks the line before itself only when the line already holds a
//! widget and `x + advance > available`; spacers never break a line. Because
//! distributed spacer widths never exceed a line's leftover space, the
//! placed advance of a line never overflows where the natural one fit, and
//! every pass reports the same line starts.

use trellis_render::{Point, Size};

/// One entry of a frame, reduced to what layout needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutItem {
    /// A regular widget of the given size.
    Widget(Size),
    /// The horizontal spacer with the given index into the frame's spacers.
    Spacer(usize),
    /// A line separator.
    LineBreak,
}

/// Result of the sizing pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Measurement {
    /// Natural advance sum of the widest line (includes the trailing padding
    /// of its last widget, which forms the right border).
    pub width: i32,
    /// Sum of `line height + padding` over all lines.
    pub height: i32,
    /// Index of the first item of every line.
    pub line_starts: Vec<usize>,
}

/// Result of the spacer distribution pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpacerDistribution {
    /// Assigned width per spacer index.
    pub widths: Vec<i32>,
    pub line_starts: Vec<usize>,
}

/// Result of the placement pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    /// Location of every item, aligned with the input; `None` for separators.
    pub positions: Vec<Option<Point>>,
    pub line_starts: Vec<usize>,
}

#[derive(Debug, Clone, Copy)]
struct Line {
    start: usize,
    end: usize,
    /// Advance sum of the line.
    width: i32,
    /// Tallest widget on the line.
    height: i32,
    has_widget: bool,
}

impl Line {
    fn starting_at(start: usize) -> Self {
        Self {
            start,
            end: start,
            width: 0,
            height: 0,
            has_widget: false,
        }
    }
}

/// Split `items` into lines using `advance` for every non-separator item.
///
/// Lines ended by a separator are kept even when empty; the final line is
/// kept when it holds any item.
fn split_lines(
    items: &[LayoutItem],
    available: i32,
    advance: impl Fn(&LayoutItem) -> i32,
) -> Vec<Line> {
    let mut lines = Vec::new();
    let mut line = Line::starting_at(0);

    for (index, item) in items.iter().enumerate() {
        match item {
            LayoutItem::LineBreak => {
                line.end = index;
                lines.push(line);
                line = Line::starting_at(index + 1);
            }
            LayoutItem::Widget(size) => {
                let step = advance(item);
                if line.has_widget && line.width.saturating_add(step) > available {
                    line.end = index;
                    lines.push(line);
                    line = Line::starting_at(index);
                }
                line.width = line.width.saturating_add(step);
                line.height = line.height.max(size.height);
                line.has_widget = true;
            }
            LayoutItem::Spacer(_) => {
                line.width = line.width.saturating_add(advance(item));
            }
        }
    }

    line.end = items.len();
    if line.start < line.end {
        lines.push(line);
    }
    lines
}

fn natural_advance(item: &LayoutItem, padding: i32) -> i32 {
    match item {
        LayoutItem::Widget(size) => size.width + padding,
        LayoutItem::Spacer(_) | LayoutItem::LineBreak => 0,
    }
}

fn placed_advance(item: &LayoutItem, padding: i32, spacer_widths: &[i32]) -> i32 {
    match item {
        LayoutItem::Widget(size) => size.width + padding,
        LayoutItem::Spacer(index) => match spacer_widths.get(*index).copied().unwrap_or(0) {
            width if width > 0 => width + padding,
            _ => 0,
        },
        LayoutItem::LineBreak => 0,
    }
}

/// Sizing pass: how much room the items need.
///
/// With `available = None` the pass is unbounded and lines only end at
/// separators.
pub fn measure(items: &[LayoutItem], padding: i32, available: Option<i32>) -> Measurement {
    let lines = split_lines(items, available.unwrap_or(i32::MAX), |item| {
        natural_advance(item, padding)
    });
    Measurement {
        width: lines.iter().map(|line| line.width).max().unwrap_or(0),
        height: lines.iter().map(|line| line.height + padding).sum(),
        line_starts: lines.iter().map(|line| line.start).collect(),
    }
}

/// Spacer distribution pass.
///
/// Each line's leftover space (`available` minus its natural advance,
/// floored at zero) is split evenly between the spacers on that line, and
/// every spacer gets `max(0, leftover / n - padding)`. The formula is the
/// same for every line, including a trailing line without a separator.
pub fn distribute_spacers(
    items: &[LayoutItem],
    padding: i32,
    available: i32,
    spacer_count: usize,
) -> SpacerDistribution {
    let lines = split_lines(items, available, |item| natural_advance(item, padding));
    let mut widths = vec![0; spacer_count];

    for line in &lines {
        let spacers: Vec<usize> = items[line.start..line.end]
            .iter()
            .filter_map(|item| match item {
                LayoutItem::Spacer(index) => Some(*index),
                _ => None,
            })
            .collect();
        if spacers.is_empty() {
            continue;
        }
        let leftover = (available - line.width).max(0);
        let count = i32::try_from(spacers.len()).unwrap_or(i32::MAX);
        let width = (leftover / count - padding).max(0);
        for index in spacers {
            if let Some(slot) = widths.get_mut(index) {
                *slot = width;
            }
        }
    }

    SpacerDistribution {
        widths,
        line_starts: lines.iter().map(|line| line.start).collect(),
    }
}

/// Placement pass: the location of every item, starting at `start`.
pub fn place(
    items: &[LayoutItem],
    padding: i32,
    available: i32,
    spacer_widths: &[i32],
    start: Point,
) -> Placement {
    let advance = |item: &LayoutItem| placed_advance(item, padding, spacer_widths);
    let lines = split_lines(items, available, &advance);
    let mut positions = vec![None; items.len()];
    let mut y = start.y;

    for line in &lines {
        let mut x = start.x;
        for index in line.start..line.end {
            let item = &items[index];
            if matches!(item, LayoutItem::LineBreak) {
                continue;
            }
            positions[index] = Some(Point::new(x, y));
            x += advance(item);
        }
        y += line.height + padding;
    }

    Placement {
        positions,
        line_starts: lines.iter().map(|line| line.start).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn widget(width: i32, height: i32) -> LayoutItem {
        LayoutItem::Widget(Size::new(width, height))
    }

    #[test]
    fn test_measure_unbounded_only_breaks_at_separators() {
        let items = [widget(100, 20), widget(200, 30), LayoutItem::LineBreak, widget(50, 10)];
        let m = measure(&items, 10, None);
        assert_eq!(m.width, 320);
        assert_eq!(m.height, (30 + 10) + (10 + 10));
        assert_eq!(m.line_starts, vec![0, 3]);
    }

    #[test]
    fn test_overflow_starts_new_line() {
        let items = [widget(100, 20), widget(100, 20), widget(100, 20)];
        // 110 + 110 fits in 230, the third widget does not.
        let m = measure(&items, 10, Some(230));
        assert_eq!(m.line_starts, vec![0, 2]);
        assert_eq!(m.width, 220);
    }

    #[test]
    fn test_oversized_widget_gets_its_own_line() {
        let items = [widget(500, 20), widget(10, 20)];
        let m = measure(&items, 5, Some(100));
        assert_eq!(m.line_starts, vec![0, 1]);
    }

    #[test]
    fn test_spacers_never_break_a_line() {
        let items = [widget(90, 10), LayoutItem::Spacer(0), widget(90, 10)];
        let d = distribute_spacers(&items, 10, 100, 1);
        assert_eq!(d.line_starts, vec![0, 2]);
        // The spacer stays on the first line and takes the leftover there.
        assert_eq!(d.widths, vec![0]);
    }

    #[test]
    fn test_spacer_split_between_spacers() {
        let items = [
            LayoutItem::Spacer(0),
            widget(40, 10),
            LayoutItem::Spacer(1),
        ];
        // available 200, consumed 50 -> leftover 150, 75 each, minus padding.
        let d = distribute_spacers(&items, 10, 200, 2);
        assert_eq!(d.widths, vec![65, 65]);
    }

    #[test]
    fn test_spacer_width_floors_at_zero() {
        let items = [widget(95, 10), LayoutItem::Spacer(0)];
        let d = distribute_spacers(&items, 10, 100, 1);
        assert_eq!(d.widths, vec![0]);
    }

    #[test]
    fn test_place_uses_assigned_spacer_width() {
        let items = [widget(100, 20), LayoutItem::Spacer(0), widget(60, 20)];
        let p = place(&items, 10, 290, &[100], Point::new(10, 10));
        assert_eq!(p.positions[0], Some(Point::new(10, 10)));
        assert_eq!(p.positions[1], Some(Point::new(120, 10)));
        assert_eq!(p.positions[2], Some(Point::new(230, 10)));
    }

    #[test]
    fn test_place_zero_width_spacer_takes_no_room() {
        let items = [widget(10, 5), LayoutItem::Spacer(0), widget(10, 5)];
        let p = place(&items, 4, 100, &[0], Point::ZERO);
        assert_eq!(p.positions[2], Some(Point::new(14, 0)));
    }

    #[test]
    fn test_place_resets_x_after_separator() {
        let items = [widget(30, 15), LayoutItem::LineBreak, widget(20, 5)];
        let p = place(&items, 10, 1000, &[], Point::new(10, 10));
        assert_eq!(p.positions[1], None);
        assert_eq!(p.positions[2], Some(Point::new(10, 10 + 15 + 10)));
    }

    #[test]
    fn test_empty_separator_lines_still_count() {
        let items = [widget(10, 10), LayoutItem::LineBreak, LayoutItem::LineBreak, widget(10, 10)];
        let m = measure(&items, 2, None);
        assert_eq!(m.line_starts, vec![0, 2, 3]);
        assert_eq!(m.height, (10 + 2) + (0 + 2) + (10 + 2));
    }
}
