use crate::domain::state::{SimEntity, VelocityInput};
use crate::domain::viewport::Viewport;

/// Advances an entity by one Euler step and applies the toroidal wrap when
/// the entity has it enabled. `dt` is real elapsed seconds, always > 0 on a
/// live tick.
pub fn advance(e: &mut SimEntity, dt: f32, vp: &Viewport) {
    e.x += e.dir_x * e.speed * dt;
    e.y += e.dir_y * e.speed * dt;

    if e.wrap_enabled {
        wrap_if_needed(e, vp);
    }
}

/// Integrates the player entity from its input velocity and keeps it fully
/// inside the visible rectangle. The player never wraps.
pub fn advance_player(e: &mut SimEntity, vel: VelocityInput, dt: f32, vp: &Viewport) {
    e.x += vel.vx * dt;
    e.y += vel.vy * dt;
    clamp_to_viewport(e, vp);
}

pub fn clamp_to_viewport(e: &mut SimEntity, vp: &Viewport) {
    if vp.is_degenerate() {
        return;
    }
    e.x = e.x.clamp(vp.min_x + e.half_extent, vp.max_x - e.half_extent);
    e.y = e.y.clamp(vp.min_y + e.half_extent, vp.max_y - e.half_extent);
}

// Each axis wraps independently once its normalized coordinate leaves the
// margin-extended range, so the topology is a torus. Direction and speed
// are untouched.
fn wrap_if_needed(e: &mut SimEntity, vp: &Viewport) {
    let (mut nx, mut ny) = vp.world_to_normalized(e.x, e.y);
    let m = vp.margin;

    if nx > 1.0 + m {
        nx = -m;
    } else if nx < -m {
        nx = 1.0 + m;
    }
    if ny > 1.0 + m {
        ny = -m;
    } else if ny < -m {
        ny = 1.0 + m;
    }

    let (x, y) = vp.normalized_to_world(nx, ny);
    e.x = x;
    e.y = y;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::state::Rgb;

    fn square() -> Viewport {
        Viewport::default().with_rect(-5.0, -5.0, 5.0, 5.0)
    }

    fn wrapping_entity(x: f32, y: f32, dir_x: f32, dir_y: f32, speed: f32) -> SimEntity {
        let mut e = SimEntity::drifter(1, x, y, dir_x, dir_y, speed, 0.25);
        e.wrap_enabled = true;
        e
    }

    #[test]
    fn advance_moves_along_direction() {
        let vp = square();
        let mut e = wrapping_entity(0.0, 0.0, 1.0, 0.0, 2.0);
        advance(&mut e, 0.5, &vp);
        assert!((e.x - 1.0).abs() < 1e-6);
        assert_eq!(e.y, 0.0);
    }

    #[test]
    fn when_entity_crosses_margin_then_axis_wraps_to_opposite_margin() {
        let vp = square();
        // Margin 0.08 over the 10-unit extent: wrap threshold at world 5.8.
        let mut e = wrapping_entity(4.9, 0.0, 1.0, 0.0, 1.0);

        advance(&mut e, 0.5, &vp);
        // World 5.4, normalized 1.04: inside the margin band, no wrap yet.
        assert!((e.x - 5.4).abs() < 1e-5);

        advance(&mut e, 0.5, &vp);
        // World 5.9 crosses 1.08 and resets the axis to exactly -margin.
        let (nx, ny) = vp.world_to_normalized(e.x, e.y);
        assert!((nx - (-0.08)).abs() < 1e-5);
        assert!((ny - 0.5).abs() < 1e-5);
        assert!((e.x - (-5.8)).abs() < 1e-4);
    }

    #[test]
    fn wrap_preserves_direction_and_speed() {
        let vp = square();
        let mut e = wrapping_entity(5.7, 0.0, 1.0, 0.0, 3.0);
        advance(&mut e, 1.0, &vp);
        assert_eq!((e.dir_x, e.dir_y), (1.0, 0.0));
        assert_eq!(e.speed, 3.0);
    }

    #[test]
    fn axes_wrap_independently() {
        let vp = square();
        let inv = std::f32::consts::FRAC_1_SQRT_2;
        // Crosses the X margin but stays inside on Y.
        let mut e = wrapping_entity(5.5, 0.0, inv, inv, 1.0);
        advance(&mut e, 0.6, &vp);
        let (nx, ny) = vp.world_to_normalized(e.x, e.y);
        assert!((nx - (-0.08)).abs() < 1e-5);
        assert!(ny > 0.5 && ny < 1.08);
    }

    #[test]
    fn unwrapped_entity_travels_unbounded() {
        let vp = square();
        let mut e = wrapping_entity(5.0, 0.0, 1.0, 0.0, 10.0);
        e.wrap_enabled = false;
        advance(&mut e, 2.0, &vp);
        assert!((e.x - 25.0).abs() < 1e-4);
    }

    #[test]
    fn player_is_clamped_inside_the_rectangle() {
        let vp = square();
        let mut p = SimEntity::player(7, 4.9, 0.0, 0.5, Rgb::BLACK);
        advance_player(
            &mut p,
            VelocityInput { vx: 10.0, vy: 0.0 },
            1.0,
            &vp,
        );
        assert!((p.x - 4.5).abs() < 1e-6);
    }
}
