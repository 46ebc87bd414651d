// Axis-aligned visibility tests against the viewport rectangle. Pure
// helpers used for recycle decisions and diagnostics; nothing here mutates
// entity state.

use crate::domain::state::SimEntity;
use crate::domain::viewport::Viewport;

/// True when the entity's world-space bounds intersect the visible
/// rectangle.
pub fn is_visible(e: &SimEntity, vp: &Viewport) -> bool {
    intersects(e, vp.min_x, vp.max_x, vp.min_y, vp.max_y)
}

/// True when the entity's bounds intersect the margin-expanded rectangle.
/// Drifters outside this region have fully left the scene.
pub fn is_within_margin_region(e: &SimEntity, vp: &Viewport) -> bool {
    let mx = vp.margin * (vp.max_x - vp.min_x);
    let my = vp.margin * (vp.max_y - vp.min_y);
    intersects(e, vp.min_x - mx, vp.max_x + mx, vp.min_y - my, vp.max_y + my)
}

/// True when the entity is moving away from the viewport center. Used to
/// tell a drifter that has crossed and left from one that has not yet
/// entered.
pub fn is_departing(e: &SimEntity, vp: &Viewport) -> bool {
    let (cx, cy) = vp.center();
    (e.x - cx) * e.dir_x + (e.y - cy) * e.dir_y > 0.0
}

fn intersects(e: &SimEntity, min_x: f32, max_x: f32, min_y: f32, max_y: f32) -> bool {
    e.x + e.half_extent >= min_x
        && e.x - e.half_extent <= max_x
        && e.y + e.half_extent >= min_y
        && e.y - e.half_extent <= max_y
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Viewport {
        Viewport::default().with_rect(-5.0, -5.0, 5.0, 5.0)
    }

    fn drifter_at(x: f32, y: f32, dir_x: f32, dir_y: f32) -> SimEntity {
        SimEntity::drifter(1, x, y, dir_x, dir_y, 1.0, 0.5)
    }

    #[test]
    fn entity_inside_the_rectangle_is_visible() {
        assert!(is_visible(&drifter_at(0.0, 0.0, 1.0, 0.0), &square()));
    }

    #[test]
    fn entity_overlapping_an_edge_is_still_visible() {
        // Center off-screen but bounds reach back across the edge.
        assert!(is_visible(&drifter_at(5.3, 0.0, 1.0, 0.0), &square()));
        assert!(!is_visible(&drifter_at(5.6, 0.0, 1.0, 0.0), &square()));
    }

    #[test]
    fn margin_region_extends_past_the_visible_edge() {
        let e = drifter_at(6.2, 0.0, 1.0, 0.0);
        assert!(!is_visible(&e, &square()));
        assert!(is_within_margin_region(&e, &square()));
        assert!(!is_within_margin_region(
            &drifter_at(6.4, 0.0, 1.0, 0.0),
            &square()
        ));
    }

    #[test]
    fn departing_distinguishes_leaving_from_approaching() {
        let vp = square();
        assert!(is_departing(&drifter_at(6.0, 0.0, 1.0, 0.0), &vp));
        assert!(!is_departing(&drifter_at(6.0, 0.0, -1.0, 0.0), &vp));
    }
}
