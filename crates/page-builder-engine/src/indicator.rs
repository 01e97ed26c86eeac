//! Insertion indicator geometry.
//!
//! Stateless: every pointer move computes a fresh [`Guide`] (or none) from
//! the pointer position, the hovered section's box and the boxes of all
//! rendered leaves.

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Client-space bounding box
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Rect {
    pub fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub fn from_origin_size(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self::new(x, y, x + width, y + height)
    }

    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndicatorSettings {
    /// Height of the dead zone at the top and bottom of a section
    pub padding: f64,
    pub line_width: f64,
}

impl Default for IndicatorSettings {
    fn default() -> Self {
        Self {
            padding: 10.0,
            line_width: 2.0,
        }
    }
}

/// Right edge of the nearest leaf left of the pointer and left edge of the
/// nearest leaf right of it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbors {
    pub left_edge: f64,
    pub right_edge: f64,
}

impl Neighbors {
    pub fn midpoint(&self) -> f64 {
        (self.left_edge + self.right_edge) / 2.0
    }
}

/// Vertical guide line, positioned in client coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Guide {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Guide {
    /// Pointer cursor shown while a guide is visible
    pub const CURSOR: &'static str = "col-resize";

    pub fn center_x(&self) -> f64 {
        self.left + self.width / 2.0
    }
}

/// Scan `leaves` in order for the closest edge on each side of `x`.
///
/// Only strictly positive distances count, so a pointer exactly on an edge
/// does not pick that leaf. On equal distances the first leaf wins.
pub fn nearest_neighbors(x: f64, leaves: &[Rect]) -> Option<Neighbors> {
    let mut right: Option<(f64, f64)> = None;
    let mut left: Option<(f64, f64)> = None;

    for leaf in leaves {
        let to_right = leaf.left - x;
        let to_left = x - leaf.right;
        if to_right > 0.0 {
            if right.is_none_or(|(best, _)| to_right < best) {
                right = Some((to_right, leaf.left));
            }
        } else if to_left > 0.0 && left.is_none_or(|(best, _)| to_left < best) {
            left = Some((to_left, leaf.right));
        }
    }

    Some(Neighbors {
        left_edge: left?.1,
        right_edge: right?.1,
    })
}

/// Guide for a pointer inside `section`, or `None` when the pointer is in
/// the dead zone or has no leaf on one side
pub fn compute_guide(
    pointer: Point,
    section: Rect,
    leaves: &[Rect],
    settings: &IndicatorSettings,
) -> Option<Guide> {
    let padding = settings.padding;
    if pointer.y < section.top + padding || pointer.y > section.bottom - padding {
        return None;
    }
    let neighbors = nearest_neighbors(pointer.x, leaves)?;
    Some(Guide {
        left: neighbors.midpoint() - settings.line_width / 2.0,
        top: section.top + padding,
        width: settings.line_width,
        height: section.height() - 2.0 * padding,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    // two leaves side by side with a 10px gap between them
    fn leaves() -> Vec<Rect> {
        vec![
            Rect::new(10.0, 10.0, 200.0, 90.0),
            Rect::new(210.0, 10.0, 600.0, 90.0),
        ]
    }

    fn section() -> Rect {
        Rect::new(0.0, 0.0, 610.0, 100.0)
    }

    #[test]
    fn test_guide_centered_between_neighbors() {
        let guide = compute_guide(
            Point::new(205.0, 50.0),
            section(),
            &leaves(),
            &IndicatorSettings::default(),
        )
        .unwrap();

        assert_eq!(
            guide,
            Guide {
                left: 204.0,
                top: 10.0,
                width: 2.0,
                height: 80.0,
            }
        );
        assert_eq!(guide.center_x(), 205.0);
    }

    #[rstest]
    #[case::top_dead_zone(5.0, false)]
    #[case::just_below_top_padding(11.0, true)]
    #[case::top_padding_boundary(10.0, true)]
    #[case::bottom_dead_zone(95.0, false)]
    fn test_dead_zone(#[case] y: f64, #[case] expected: bool) {
        let guide = compute_guide(
            Point::new(205.0, y),
            section(),
            &leaves(),
            &IndicatorSettings::default(),
        );
        assert_eq!(guide.is_some(), expected);
    }

    #[rstest]
    #[case::left_of_everything(5.0)]
    #[case::right_of_everything(605.0)]
    #[case::over_a_leaf(100.0)]
    fn test_no_guide_without_both_neighbors(#[case] x: f64) {
        assert_eq!(nearest_neighbors(x, &leaves()), None);
    }

    #[test]
    fn test_pointer_on_edge_is_not_a_neighbor() {
        assert_eq!(nearest_neighbors(200.0, &leaves()), None);
    }

    #[test]
    fn test_nearest_edges_win() {
        let rects = vec![
            Rect::new(0.0, 0.0, 50.0, 10.0),
            Rect::new(60.0, 0.0, 100.0, 10.0),
            Rect::new(150.0, 0.0, 200.0, 10.0),
            Rect::new(120.0, 0.0, 140.0, 10.0),
        ];
        assert_eq!(
            nearest_neighbors(110.0, &rects),
            Some(Neighbors {
                left_edge: 100.0,
                right_edge: 120.0,
            })
        );
    }

    #[test]
    fn test_ties_keep_first_leaf() {
        // two leaves in different rows share the same right edge
        let rects = vec![
            Rect::new(0.0, 0.0, 100.0, 10.0),
            Rect::new(40.0, 20.0, 100.0, 30.0),
            Rect::new(120.0, 0.0, 200.0, 10.0),
        ];
        let neighbors = nearest_neighbors(110.0, &rects).unwrap();
        assert_eq!(neighbors.left_edge, 100.0);
        assert_eq!(neighbors.midpoint(), 110.0);
    }
}
