//! Tile mutation engine.
//!
//! Pure transitions `&EditorState -> Option<EditorState>`. `None` means the
//! operation was a no-op (precondition not met, nothing to change) and must
//! not reach the history.
//!
//! Every geometry result goes through the kernel's fail-soft wrappers, so a
//! failed boolean leaves the previous tile in place instead of erroring.

use crate::state::{BooleanOp, EditorState, Mode, SlideDirection, TileOp};
use std::sync::Arc;
use tessel_core::config::MIN_GRID_SIZE;
use tessel_core::kernel;
use tessel_core::{EditorConfig, Point, snap_to};

// ─── Apply ───────────────────────────────────────────────────────────────

/// Union or subtract the draft polygon with the tile.
pub fn apply_boolean(state: &EditorState, op: BooleanOp) -> Option<EditorState> {
    if !state.draft_is_usable() {
        log::debug!("apply {op:?}: draft has {} points, need 3", state.draft.len());
        return None;
    }
    let (w, h) = (state.tile_width, state.tile_height);
    let operand = kernel::points_to_shape(&state.draft);
    let current = kernel::clip_to_bounds(&state.tile, w, h);
    let tile = match op {
        BooleanOp::Add => kernel::union(&current, &operand, w, h),
        BooleanOp::Subtract => kernel::difference(&current, &operand, w, h),
    };
    Some(with_tile(state, tile))
}

/// Cut the draft region out of the tile and re-insert it one tile period
/// away in `direction`.
///
/// The draft polygon itself is translated, not the removed piece of tile,
/// so only the part of the cut lying outside the tile lands back inside
/// after the slide. Whatever ends up outside is clipped away without
/// complaint.
pub fn apply_cut_slide(state: &EditorState, direction: SlideDirection) -> Option<EditorState> {
    if !state.draft_is_usable() {
        log::debug!(
            "cut-slide {direction:?}: draft has {} points, need 3",
            state.draft.len()
        );
        return None;
    }
    let (w, h) = (state.tile_width, state.tile_height);
    let cut = kernel::points_to_shape(&state.draft);
    let carved = kernel::difference(&state.tile, &cut, w, h);
    let (dx, dy) = direction.offset(w, h);
    let slid = kernel::translate(&cut, dx, dy);
    let tile = kernel::union(&carved, &slid, w, h);
    Some(with_tile(state, tile))
}

/// Run the operation bound to the current mode.
pub fn apply_current_mode(state: &EditorState) -> Option<EditorState> {
    match state.mode.operation()? {
        TileOp::Boolean(op) => apply_boolean(state, op),
        TileOp::CutSlide(direction) => apply_cut_slide(state, direction),
    }
}

/// Replace the tile with a full rectangle and drop the draft.
pub fn reset_tile(state: &EditorState) -> EditorState {
    let mut next = state.clone();
    next.tile = Arc::new(kernel::rectangle(state.tile_width, state.tile_height));
    next.draft.clear();
    next
}

/// Resize the tile. Each dimension is clamped to the configured minimum and
/// the current shape is re-clipped to the new bounds; growing never adds
/// area.
pub fn set_tile_size(
    state: &EditorState,
    width: f64,
    height: f64,
    config: &EditorConfig,
) -> Option<EditorState> {
    if !width.is_finite() || !height.is_finite() {
        return None;
    }
    let w = width.max(config.min_tile_size);
    let h = height.max(config.min_tile_size);
    if w == state.tile_width && h == state.tile_height {
        return None;
    }
    let mut next = state.clone();
    next.tile_width = w;
    next.tile_height = h;
    next.tile = Arc::new(kernel::clip_to_bounds(&state.tile, w, h));
    Some(next)
}

fn with_tile(state: &EditorState, tile: tessel_core::Shape) -> EditorState {
    let mut next = state.clone();
    next.tile = Arc::new(tile);
    next.draft.clear();
    next
}

// ─── Draft editing ───────────────────────────────────────────────────────

/// Append a point to the draft, snapped to the minor grid when snapping is
/// on. A closed draft takes no more points.
pub fn add_draft_point(state: &EditorState, p: Point, config: &EditorConfig) -> Option<EditorState> {
    if !p.is_finite() || state.draft_is_closed() {
        return None;
    }
    let p = if state.snap {
        let step = config.draft_snap_step(state.grid_size);
        Point::new(snap_to(p.x, step), snap_to(p.y, step))
    } else {
        p
    };
    let mut next = state.clone();
    next.draft.push(p);
    Some(next)
}

/// Close the draft by re-appending its first point.
pub fn close_draft(state: &EditorState) -> Option<EditorState> {
    if !state.draft_is_usable() || state.draft_is_closed() {
        return None;
    }
    let mut next = state.clone();
    next.draft.push(state.draft[0]);
    Some(next)
}

pub fn clear_draft(state: &EditorState) -> Option<EditorState> {
    if state.draft.is_empty() {
        return None;
    }
    let mut next = state.clone();
    next.draft.clear();
    Some(next)
}

// ─── Settings ────────────────────────────────────────────────────────────

pub fn set_mode(state: &EditorState, mode: Mode) -> Option<EditorState> {
    (state.mode != mode).then(|| EditorState {
        mode,
        ..state.clone()
    })
}

pub fn set_snap(state: &EditorState, snap: bool) -> Option<EditorState> {
    (state.snap != snap).then(|| EditorState {
        snap,
        ..state.clone()
    })
}

pub fn set_grid_size(state: &EditorState, grid_size: f64) -> Option<EditorState> {
    if !grid_size.is_finite() {
        return None;
    }
    let grid_size = grid_size.max(MIN_GRID_SIZE);
    (state.grid_size != grid_size).then(|| EditorState {
        grid_size,
        ..state.clone()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn state() -> EditorState {
        EditorState::new(&EditorConfig::default())
    }

    fn with_draft(points: &[(f64, f64)]) -> EditorState {
        let mut s = state();
        s.draft = points.iter().copied().map(Point::from).collect();
        s
    }

    #[test]
    fn boolean_needs_three_points() {
        let s = with_draft(&[(0.0, 0.0), (10.0, 10.0)]);
        assert!(apply_boolean(&s, BooleanOp::Subtract).is_none());
        assert!(apply_cut_slide(&s, SlideDirection::LeftToRight).is_none());
    }

    #[test]
    fn subtract_removes_area_and_clears_draft() {
        let s = with_draft(&[(100.0, 60.0), (140.0, 60.0), (120.0, 100.0)]);
        let next = apply_boolean(&s, BooleanOp::Subtract).unwrap();
        assert!((next.tile.area() - (240.0 * 160.0 - 800.0)).abs() < 1e-6);
        assert!(next.draft.is_empty());
    }

    #[test]
    fn add_after_subtract_restores() {
        let s = with_draft(&[(100.0, 60.0), (140.0, 60.0), (120.0, 100.0)]);
        let mut cut = apply_boolean(&s, BooleanOp::Subtract).unwrap();
        cut.draft = s.draft.clone();
        let restored = apply_boolean(&cut, BooleanOp::Add).unwrap();
        assert!((restored.tile.area() - 240.0 * 160.0).abs() < 1e-6);
    }

    #[test]
    fn cut_slide_straddling_left_edge_moves_notch_to_right() {
        // 40x40 square straddling x=0: the inside half is removed, the
        // outside half reappears at x in [220, 240] (already filled).
        let s = with_draft(&[(-20.0, 40.0), (20.0, 40.0), (20.0, 80.0), (-20.0, 80.0)]);
        let next = apply_cut_slide(&s, SlideDirection::LeftToRight).unwrap();
        assert!(!next.tile.contains_point(Point::new(10.0, 60.0)));
        assert!(next.tile.contains_point(Point::new(230.0, 60.0)));
        assert!((next.tile.area() - (240.0 * 160.0 - 800.0)).abs() < 1e-6);
    }

    #[test]
    fn cut_slide_fills_gap_on_opposite_edge() {
        // Make a gap on the bottom edge, then slide a cut from the top edge
        // into it: area is conserved.
        let gap = with_draft(&[(100.0, 140.0), (140.0, 140.0), (140.0, 160.0), (100.0, 160.0)]);
        let mut s = apply_boolean(&gap, BooleanOp::Subtract).unwrap();
        let before = s.tile.area();
        s.draft = vec![
            Point::new(100.0, -20.0),
            Point::new(140.0, -20.0),
            Point::new(140.0, 20.0),
            Point::new(100.0, 20.0),
        ];
        let next = apply_cut_slide(&s, SlideDirection::TopToBottom).unwrap();
        assert!((next.tile.area() - before).abs() < 1e-6);
        assert!(next.tile.contains_point(Point::new(120.0, 150.0)));
        assert!(!next.tile.contains_point(Point::new(120.0, 10.0)));
    }

    #[test]
    fn apply_current_mode_dispatches() {
        let mut s = with_draft(&[(100.0, 60.0), (140.0, 60.0), (120.0, 100.0)]);
        s.mode = Mode::Draw;
        assert!(apply_current_mode(&s).is_none());
        s.mode = Mode::BooleanSub;
        let next = apply_current_mode(&s).unwrap();
        assert!(next.tile.area() < 240.0 * 160.0);
    }

    #[test]
    fn reset_tile_restores_rectangle() {
        let s = with_draft(&[(100.0, 60.0), (140.0, 60.0), (120.0, 100.0)]);
        let mut cut = apply_boolean(&s, BooleanOp::Subtract).unwrap();
        cut.draft = vec![Point::new(1.0, 1.0)];
        let reset = reset_tile(&cut);
        assert_eq!(*reset.tile, kernel::rectangle(240.0, 160.0));
        assert!(reset.draft.is_empty());
    }

    #[test]
    fn shrinking_truncates_and_growing_adds_nothing() {
        let config = EditorConfig::default();
        let s = state();
        let small = set_tile_size(&s, 100.0, 160.0, &config).unwrap();
        assert!((small.tile.area() - 100.0 * 160.0).abs() < 1e-6);
        let big = set_tile_size(&small, 300.0, 200.0, &config).unwrap();
        assert!((big.tile.area() - 100.0 * 160.0).abs() < 1e-6);
        assert_eq!((big.tile_width, big.tile_height), (300.0, 200.0));
    }

    #[test]
    fn tile_size_is_clamped_to_minimum() {
        let config = EditorConfig::default();
        let next = set_tile_size(&state(), 10.0, 500.0, &config).unwrap();
        assert_eq!((next.tile_width, next.tile_height), (40.0, 500.0));
        assert!(set_tile_size(&next, 5.0, 500.0, &config).is_none());
    }

    #[test]
    fn snapped_draft_point_uses_minor_grid() {
        let config = EditorConfig::default();
        let mut s = state();
        s.snap = true;
        s.grid_size = 16.0;
        let next = add_draft_point(&s, Point::new(23.0, 57.0), &config).unwrap();
        assert_eq!(next.draft, vec![Point::new(24.0, 56.0)]);
    }

    #[test]
    fn unsnapped_draft_point_is_raw() {
        let config = EditorConfig::default();
        let next = add_draft_point(&state(), Point::new(23.0, 57.0), &config).unwrap();
        assert_eq!(next.draft, vec![Point::new(23.0, 57.0)]);
    }

    #[test]
    fn close_draft_reappends_first_point_once() {
        let config = EditorConfig::default();
        let s = with_draft(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0)]);
        let closed = close_draft(&s).unwrap();
        assert_eq!(closed.draft.last(), Some(&Point::new(0.0, 0.0)));
        assert!(close_draft(&closed).is_none());
        assert!(add_draft_point(&closed, Point::new(5.0, 5.0), &config).is_none());
        // Applying a closed draft works the same as an open one.
        let applied = apply_boolean(&closed, BooleanOp::Subtract).unwrap();
        assert!((applied.tile.area() - (240.0 * 160.0 - 50.0)).abs() < 1e-6);
    }

    #[test]
    fn settings_are_no_ops_when_unchanged() {
        let s = state();
        assert!(set_mode(&s, Mode::Select).is_none());
        assert_eq!(set_mode(&s, Mode::Draw).unwrap().mode, Mode::Draw);
        assert!(set_snap(&s, false).is_none());
        assert!(set_grid_size(&s, 16.0).is_none());
        assert_eq!(set_grid_size(&s, 0.5).unwrap().grid_size, MIN_GRID_SIZE);
        assert!(clear_draft(&s).is_none());
    }
}
