use macroquad::math::{vec2, Rect, Vec2};
use std::iter::Rev;
use std::ops::{Range, RangeInclusive};

/// Grid index ranges to visit for one layer.
///
/// Columns are half-open (`col_start..col_end`); rows are swept inclusively
/// from `row_end` down to `row_start`. `row_end` may equal the layer height,
/// which reads as an empty row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellBounds {
    pub col_start: i32,
    pub col_end: i32,
    pub row_start: i32,
    pub row_end: i32,
}

impl CellBounds {
    pub const EMPTY: CellBounds = CellBounds {
        col_start: 0,
        col_end: 0,
        row_start: 0,
        row_end: -1,
    };

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.col_start >= self.col_end || self.row_start > self.row_end
    }

    #[inline]
    pub fn cols(&self) -> Range<i32> {
        self.col_start..self.col_end
    }

    /// Rows top to bottom.
    #[inline]
    pub fn rows(&self) -> Rev<RangeInclusive<i32>> {
        (self.row_start..=self.row_end).rev()
    }
}

/// Visible region from two corners given in any order.
pub fn view_rect(view_min: Vec2, view_max: Vec2) -> Rect {
    let min = view_min.min(view_max);
    let max = view_min.max(view_max);
    Rect::new(min.x, min.y, max.x - min.x, max.y - min.y)
}

/// Index ranges of a `layer_w` x `layer_h` grid that intersect `view`.
///
/// `tile` and `offset` are in world units with y pointing up. The far edges
/// are padded by one tile so cells cut by the view border are kept. A view
/// that misses the layer's extent gives [`CellBounds::EMPTY`].
pub fn visible_cells(
    layer_w: usize,
    layer_h: usize,
    tile: Vec2,
    offset: Vec2,
    view: &Rect,
) -> CellBounds {
    if !(tile.x > 0.0 && tile.y > 0.0) {
        return CellBounds::EMPTY;
    }
    let extent = vec2(layer_w as f32 * tile.x, layer_h as f32 * tile.y);
    let overlaps = view.x < offset.x + extent.x
        && view.x + view.w > offset.x
        && view.y < offset.y + extent.y
        && view.y + view.h > offset.y;
    if !overlaps {
        return CellBounds::EMPTY;
    }

    let layer_w = i32::try_from(layer_w).unwrap_or(i32::MAX);
    let layer_h = i32::try_from(layer_h).unwrap_or(i32::MAX);

    let col_start = (((view.x - offset.x) / tile.x).floor() as i32).max(0);
    let col_end = layer_w.min(((view.x + view.w + tile.x - offset.x) / tile.x).floor() as i32);

    let row_start = (((view.y - offset.y) / tile.y).floor() as i32).max(0);
    let row_end = layer_h.min(((view.y + view.h + tile.y - offset.y) / tile.y).floor() as i32);

    CellBounds {
        col_start,
        col_end,
        row_start,
        row_end,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TILE: Vec2 = Vec2::new(32.0, 32.0);

    #[test]
    fn view_at_origin_pads_one_tile() {
        let b = visible_cells(10, 10, TILE, Vec2::ZERO, &Rect::new(0.0, 0.0, 64.0, 64.0));
        let expected = CellBounds {
            col_start: 0,
            col_end: 3,
            row_start: 0,
            row_end: 3,
        };
        assert_eq!(b, expected);
        assert_eq!(b.rows().collect::<Vec<_>>(), vec![3, 2, 1, 0]);
        assert_eq!(b.cols().collect::<Vec<_>>(), vec![0, 1, 2]);
    }

    #[test]
    fn far_edge_clamps_to_layer_size() {
        let view = Rect::new(250.0, 250.0, 500.0, 500.0);
        let b = visible_cells(10, 10, TILE, Vec2::ZERO, &view);
        assert_eq!((b.col_start, b.col_end), (7, 10));
        assert_eq!((b.row_start, b.row_end), (7, 10));
    }

    #[test]
    fn offset_shifts_the_window() {
        // layer spans x 64..384, y -32..288
        let view = Rect::new(0.0, 0.0, 96.0, 64.0);
        let b = visible_cells(10, 10, TILE, vec2(64.0, -32.0), &view);
        assert_eq!((b.col_start, b.col_end), (0, 2));
        assert_eq!((b.row_start, b.row_end), (1, 4));
    }

    #[test]
    fn views_outside_the_grid_are_empty() {
        let outside = [
            Rect::new(1000.0, 0.0, 64.0, 64.0),
            Rect::new(-500.0, 0.0, 100.0, 64.0),
            Rect::new(0.0, 1000.0, 64.0, 64.0),
            Rect::new(0.0, -500.0, 64.0, 100.0),
        ];
        for view in outside {
            let b = visible_cells(10, 10, TILE, Vec2::ZERO, &view);
            assert!(b.is_empty(), "{view:?} gave {b:?}");
        }
    }

    #[test]
    fn views_within_one_tile_of_the_grid_are_empty() {
        let near = [
            Rect::new(0.0, -40.0, 64.0, 20.0),
            Rect::new(-40.0, 0.0, 20.0, 64.0),
            Rect::new(-20.0, -20.0, 20.0, 20.0),
        ];
        for view in near {
            let b = visible_cells(10, 10, TILE, Vec2::ZERO, &view);
            assert_eq!(b, CellBounds::EMPTY, "{view:?}");
            assert_eq!(b.rows().count(), 0);
        }

        // a view touching a shifted layer's edge does not overlap it
        let shifted = vec2(64.0, -32.0);
        let below = Rect::new(64.0, -60.0, 64.0, 20.0);
        assert!(visible_cells(10, 10, TILE, shifted, &below).is_empty());
        let left = Rect::new(0.0, 0.0, 64.0, 64.0);
        assert!(visible_cells(10, 10, TILE, shifted, &left).is_empty());
    }

    #[test]
    fn views_are_empty_exactly_when_they_miss_the_grid() {
        for x in (-96..352).step_by(16) {
            for y in (-96..352).step_by(16) {
                let view = Rect::new(x as f32, y as f32, 48.0, 48.0);
                let b = visible_cells(10, 10, TILE, Vec2::ZERO, &view);
                let hits = x + 48 > 0 && x < 320 && y + 48 > 0 && y < 320;
                if hits {
                    assert!(!b.is_empty(), "{view:?} gave {b:?}");
                    assert!(b.col_start <= b.col_end, "{view:?} gave {b:?}");
                    assert!(b.row_start <= b.row_end, "{view:?} gave {b:?}");
                } else {
                    assert!(b.is_empty(), "{view:?} gave {b:?}");
                }
            }
        }
    }

    #[test]
    fn zero_sized_tiles_yield_nothing() {
        let view = Rect::new(0.0, 0.0, 64.0, 64.0);
        let b = visible_cells(10, 10, Vec2::ZERO, Vec2::ZERO, &view);
        assert!(b.is_empty());
        assert_eq!(b.rows().count(), 0);
    }

    #[test]
    fn view_rect_accepts_swapped_corners() {
        let r = view_rect(vec2(100.0, 50.0), vec2(0.0, 0.0));
        assert_eq!((r.x, r.y, r.w, r.h), (0.0, 0.0, 100.0, 50.0));
    }
}
