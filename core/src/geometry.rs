use std::f32::consts::{PI, TAU};

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Bearing in radians from `from` toward `to`, measured from the positive x axis.
#[must_use]
pub fn angle_to(from: Vec2, to: Vec2) -> f32 {
    let delta = to - from;
    delta.y.atan2(delta.x)
}

/// Wraps an angle into the half-open interval `(-π, π]`.
///
/// Non-finite input collapses to zero so a corrupted heading cannot spread
/// into position math.
#[must_use]
pub fn normalize_angle(angle: f32) -> f32 {
    if !angle.is_finite() {
        return 0.0;
    }

    let wrapped = angle.rem_euclid(TAU);
    if wrapped > PI {
        wrapped - TAU
    } else {
        wrapped
    }
}

/// Rotates `from` toward `to` by `weight` of the shortest arc between them.
#[must_use]
pub fn blend_angle(from: f32, to: f32, weight: f32) -> f32 {
    let difference = normalize_angle(to - from);
    normalize_angle(from + difference * weight)
}

/// Euclidean distance between two points.
#[must_use]
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    a.distance(b)
}

/// Unit vector pointing from `from` toward `to`, or `None` when the points coincide.
#[must_use]
pub fn direction_to(from: Vec2, to: Vec2) -> Option<Vec2> {
    (to - from).try_normalize()
}

/// Unit vector for the provided heading.
#[must_use]
pub fn heading(angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin())
}

/// Whether two circles strictly overlap.
#[must_use]
pub fn circles_overlap(a: Vec2, radius_a: f32, b: Vec2, radius_b: f32) -> bool {
    let reach = radius_a + radius_b;
    a.distance_squared(b) < reach * reach
}

/// Rectangular world the simulation plays out in.
///
/// The optional HUD offset reserves a strip along the top edge that ships may
/// not enter.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Playfield {
    width: f32,
    height: f32,
    hud_offset: f32,
}

impl Playfield {
    /// Creates a playfield with the provided dimensions.
    #[must_use]
    pub const fn new(width: f32, height: f32, hud_offset: f32) -> Self {
        Self {
            width,
            height,
            hud_offset,
        }
    }

    /// Horizontal extent in world units.
    #[must_use]
    pub const fn width(&self) -> f32 {
        self.width
    }

    /// Vertical extent in world units.
    #[must_use]
    pub const fn height(&self) -> f32 {
        self.height
    }

    /// Height of the strip reserved for the HUD along the top edge.
    #[must_use]
    pub const fn hud_offset(&self) -> f32 {
        self.hud_offset
    }

    /// Centre of the world rectangle.
    #[must_use]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width * 0.5, self.height * 0.5)
    }

    /// Clamps a point so a body of radius `margin` stays fully inside.
    #[must_use]
    pub fn clamp(&self, point: Vec2, margin: f32) -> Vec2 {
        let (min, max) = self.interior(margin);
        point.clamp(min, max)
    }

    /// Whether a body of radius `margin` centred at `point` is fully inside.
    #[must_use]
    pub fn contains(&self, point: Vec2, margin: f32) -> bool {
        let (min, max) = self.interior(margin);
        point.cmpge(min).all() && point.cmple(max).all()
    }

    fn interior(&self, margin: f32) -> (Vec2, Vec2) {
        let min = Vec2::new(margin, margin + self.hud_offset);
        let max = Vec2::new(self.width - margin, self.height - margin);
        (min, max.max(min))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalized_angles_stay_in_half_open_range() {
        for raw in [-7.0, -PI, -0.5, 0.0, 2.0, 3.0 * PI, 42.0] {
            let wrapped = normalize_angle(raw);
            assert!(wrapped > -PI && wrapped <= PI, "{raw} wrapped to {wrapped}");
        }
        assert!((normalize_angle(-0.5) + 0.5).abs() < 1e-6);
        assert!((normalize_angle(TAU + 1.0) - 1.0).abs() < 1e-5);
        assert_eq!(normalize_angle(f32::NAN), 0.0);
    }

    #[test]
    fn blending_across_the_wrap_takes_the_short_arc() {
        let blended = blend_angle(-3.0, 3.0, 0.5);

        assert!(blended.abs() > 3.1, "blend crossed zero: {blended}");
    }

    #[test]
    fn blending_full_weight_reaches_the_target() {
        let blended = blend_angle(0.25, -1.5, 1.0);

        assert!((blended + 1.5).abs() < 1e-5);
    }

    #[test]
    fn coincident_points_have_no_direction() {
        let point = Vec2::new(10.0, 10.0);

        assert!(direction_to(point, point).is_none());
        let east = direction_to(point, Vec2::new(20.0, 10.0)).expect("direction");
        assert!((east - Vec2::X).length() < 1e-6);
    }

    #[test]
    fn touching_circles_do_not_overlap() {
        assert!(!circles_overlap(Vec2::ZERO, 5.0, Vec2::new(10.0, 0.0), 5.0));
        assert!(circles_overlap(Vec2::ZERO, 5.0, Vec2::new(9.9, 0.0), 5.0));
    }

    #[test]
    fn clamping_respects_margin_and_hud_strip() {
        let field = Playfield::new(400.0, 300.0, 40.0);

        let clamped = field.clamp(Vec2::new(-10.0, 0.0), 12.0);

        assert_eq!(clamped, Vec2::new(12.0, 52.0));
        assert!(field.contains(clamped, 12.0));
        assert!(!field.contains(Vec2::new(200.0, 45.0), 12.0));
    }
}
