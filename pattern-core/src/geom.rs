//! 2D geometry kernel shared by every generator.
//!
//! All functions are pure. Angles follow the screen-space convention used
//! throughout the gallery: the y axis grows downward, and
//! [`theta_from_two_points`] / [`coord_with_angle_and_distance`] are
//! inverses of each other under that convention.

use glam::{Vec2, Vec3};
use rand::Rng;
use std::f32::consts::PI;

/// Slack applied to segment containment checks so intersections that land
/// exactly on an endpoint are not rejected by floating-point noise.
const BOUNDS_EPS: f32 = 1e-6;

/// Euclidean distance between two 2D points.
#[inline]
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    (a - b).length()
}

/// Euclidean distance between two 3D points.
///
/// Callers with flat data pass `z = 0.0` and get the same result as
/// [`distance`].
#[inline]
pub fn distance3(a: Vec3, b: Vec3) -> f32 {
    (a - b).length()
}

/// Angle of the segment `a -> b` in the screen-space convention.
///
/// Computed as `atan2(a.y - b.y, b.x - a.x)`: with y growing downward on
/// the canvas, the result is counter-clockwise-positive as seen on screen
/// and pairs with [`coord_with_angle_and_distance`].
///
/// This is NOT interchangeable with [`theta_from_two_points_raw`]; the two
/// conventions differ in vertical orientation and different patterns rely
/// on each.
#[inline]
pub fn theta_from_two_points(a: Vec2, b: Vec2) -> f32 {
    (a.y - b.y).atan2(b.x - a.x)
}

/// Angle of the segment `a -> b` as a plain `atan2` of the deltas.
///
/// Clockwise-positive as seen on a y-down canvas. Kept distinct from
/// [`theta_from_two_points`]; swapping the two flips vertical orientation.
#[inline]
pub fn theta_from_two_points_raw(a: Vec2, b: Vec2) -> f32 {
    (b.y - a.y).atan2(b.x - a.x)
}

/// Steps `dist` away from `start` at angle `theta` (screen-space
/// convention, so the y component is subtracted).
#[inline]
pub fn coord_with_angle_and_distance(start: Vec2, theta: f32, dist: f32) -> Vec2 {
    Vec2::new(start.x + dist * theta.cos(), start.y - dist * theta.sin())
}

/// Clamps `value` into `[min, max]`.
#[inline]
pub fn clamp(min: f32, max: f32, value: f32) -> f32 {
    value.max(min).min(max)
}

/// Linearly maps `value` from `domain` into `range`, clamping the result
/// to the range's bounds.
///
/// A degenerate domain (`domain[0] == domain[1]`) returns `range[0]`
/// instead of dividing by zero.
pub fn interpolate(domain: [f32; 2], range: [f32; 2], value: f32) -> f32 {
    let [x1, x2] = domain;
    let [y1, y2] = range;
    if x1 == x2 {
        return y1;
    }
    let mapped = y1 + (value - x1) * (y2 - y1) / (x2 - x1);
    clamp(y1.min(y2), y1.max(y2), mapped)
}

/// Like [`interpolate`] but eased along a half-sine curve.
///
/// Values outside the domain clamp to the exact nearest range endpoint
/// before the easing formula runs, so out-of-domain inputs can never wrap
/// around through the sine's periodicity.
pub fn interpolate_smooth(domain: [f32; 2], range: [f32; 2], value: f32) -> f32 {
    let [x1, x2] = domain;
    let [y1, y2] = range;
    if x1 == x2 {
        return y1;
    }
    let t = (value - x1) / (x2 - x1);
    if t <= 0.0 {
        return y1;
    }
    if t >= 1.0 {
        return y2;
    }
    let eased = 0.5 - 0.5 * (PI * t).cos();
    y1 + (y2 - y1) * eased
}

/// A line segment between two points.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment {
    pub a: Vec2,
    pub b: Vec2,
}

impl Segment {
    #[inline]
    pub fn new(a: Vec2, b: Vec2) -> Self {
        Self { a, b }
    }
}

/// Intersection point of two segments via the determinant method.
///
/// Returns `None` both for parallel lines (zero determinant) and when the
/// line-line intersection falls outside either segment's bounding box.
/// `None` is an expected outcome, not a failure.
pub fn intersection(s1: &Segment, s2: &Segment) -> Option<Vec2> {
    let (x1, y1, x2, y2) = (s1.a.x, s1.a.y, s1.b.x, s1.b.y);
    let (x3, y3, x4, y4) = (s2.a.x, s2.a.y, s2.b.x, s2.b.y);

    let denom = (x1 - x2) * (y3 - y4) - (y1 - y2) * (x3 - x4);
    if denom == 0.0 {
        return None;
    }

    let det1 = x1 * y2 - y1 * x2;
    let det2 = x3 * y4 - y3 * x4;
    let p = Vec2::new(
        (det1 * (x3 - x4) - (x1 - x2) * det2) / denom,
        (det1 * (y3 - y4) - (y1 - y2) * det2) / denom,
    );

    if within_segment_bounds(p, s1) && within_segment_bounds(p, s2) {
        Some(p)
    } else {
        None
    }
}

fn within_segment_bounds(p: Vec2, s: &Segment) -> bool {
    p.x >= s.a.x.min(s.b.x) - BOUNDS_EPS
        && p.x <= s.a.x.max(s.b.x) + BOUNDS_EPS
        && p.y >= s.a.y.min(s.b.y) - BOUNDS_EPS
        && p.y <= s.a.y.max(s.b.y) + BOUNDS_EPS
}

/// Even-odd ray-casting point-in-polygon test.
///
/// Each edge uses a half-open interval on y, so a ray passing exactly
/// through a vertex counts the vertex's two edges once, not twice.
pub fn within_polygon_bounds(p: Vec2, polygon: &[Vec2]) -> bool {
    if polygon.len() < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = polygon.len() - 1;
    for i in 0..polygon.len() {
        let (vi, vj) = (polygon[i], polygon[j]);
        if (vi.y > p.y) != (vj.y > p.y) {
            let x_cross = (vj.x - vi.x) * (p.y - vi.y) / (vj.y - vi.y) + vi.x;
            if p.x < x_cross {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

/// A point in polar coordinates around some external origin.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PolarCoord {
    pub theta: f32,
    pub len: f32,
}

impl PolarCoord {
    #[inline]
    pub fn new(theta: f32, len: f32) -> Self {
        Self { theta, len }
    }

    /// Cartesian position of this coordinate around `origin`, using the
    /// screen-space angle convention.
    #[inline]
    pub fn to_cartesian(self, origin: Vec2) -> Vec2 {
        coord_with_angle_and_distance(origin, self.theta, self.len)
    }
}

/// Uniform random value in `[min, max)`. Returns `min` when the bounds
/// coincide.
pub fn random_in_range(min: f32, max: f32, rng: &mut impl Rng) -> f32 {
    if min == max {
        return min;
    }
    rng.random_range(min..max)
}

/// Floored variant of [`random_in_range`].
pub fn random_int_in_range(min: f32, max: f32, rng: &mut impl Rng) -> i32 {
    random_in_range(min, max, rng).floor() as i32
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    const EPS: f32 = 1e-5;

    #[test]
    fn distance_is_symmetric_and_zero_on_self() {
        let a = Vec2::new(3.0, -4.5);
        let b = Vec2::new(-1.0, 2.0);

        assert_eq!(distance(a, b), distance(b, a));
        assert_eq!(distance(a, a), 0.0);

        // The 3D variant with z = 0 agrees with the 2D one.
        let d3 = distance3(a.extend(0.0), b.extend(0.0));
        assert!((d3 - distance(a, b)).abs() < EPS);
    }

    #[test]
    fn the_two_theta_conventions_differ_in_orientation() {
        let a = Vec2::new(0.0, 0.0);
        // On a y-down canvas this point sits below and to the right of `a`.
        let b = Vec2::new(1.0, 1.0);

        let screen = theta_from_two_points(a, b);
        let raw = theta_from_two_points_raw(a, b);

        assert!((screen - (-PI / 4.0)).abs() < EPS);
        assert!((raw - PI / 4.0).abs() < EPS);
        // Mirrored through the x axis.
        assert!((screen + raw).abs() < EPS);
    }

    #[test]
    fn coord_with_angle_inverts_screen_theta() {
        let points = [
            (Vec2::new(0.0, 0.0), Vec2::new(5.0, -3.0)),
            (Vec2::new(2.0, 7.0), Vec2::new(-4.0, 7.5)),
            (Vec2::new(-1.0, -1.0), Vec2::new(-1.0, 4.0)),
        ];

        for (a, b) in points {
            let theta = theta_from_two_points(a, b);
            let back = coord_with_angle_and_distance(a, theta, distance(a, b));
            assert!(
                (back - b).length() < EPS,
                "roundtrip mismatch: b={b:?}, back={back:?}"
            );
        }
    }

    #[test]
    fn interpolate_hits_range_endpoints_at_domain_bounds() {
        let domain = [2.0, 10.0];
        let range = [100.0, -50.0];

        assert_eq!(interpolate(domain, range, domain[0]), range[0]);
        assert_eq!(interpolate(domain, range, domain[1]), range[1]);

        // Out-of-domain values clamp to the range bounds.
        assert_eq!(interpolate(domain, range, -100.0), 100.0);
        assert_eq!(interpolate(domain, range, 100.0), -50.0);
    }

    #[test]
    fn interpolate_degenerate_domain_returns_lower_range_bound() {
        assert_eq!(interpolate([3.0, 3.0], [7.0, 9.0], 3.0), 7.0);
        assert_eq!(interpolate([3.0, 3.0], [7.0, 9.0], 100.0), 7.0);
    }

    #[test]
    fn interpolate_smooth_matches_endpoints_and_midpoint() {
        let domain = [0.0, 4.0];
        let range = [10.0, 20.0];

        assert_eq!(interpolate_smooth(domain, range, 0.0), 10.0);
        assert_eq!(interpolate_smooth(domain, range, 4.0), 20.0);

        // cos(pi/2) = 0, so the domain midpoint maps to the range midpoint.
        let mid = interpolate_smooth(domain, range, 2.0);
        assert!((mid - 15.0).abs() < EPS);

        // Outside the domain the exact endpoints come back, not a value
        // produced by the periodic formula.
        assert_eq!(interpolate_smooth(domain, range, -37.0), 10.0);
        assert_eq!(interpolate_smooth(domain, range, 1000.0), 20.0);
    }

    #[test]
    fn clamp_is_idempotent() {
        for x in [-10.0, -1.0, 0.0, 0.5, 1.0, 42.0] {
            let once = clamp(-1.0, 1.0, x);
            assert_eq!(clamp(-1.0, 1.0, once), once);
        }
    }

    #[test]
    fn intersection_finds_crossing_and_is_symmetric() {
        let s1 = Segment::new(Vec2::new(0.0, 0.0), Vec2::new(1.0, 1.0));
        let s2 = Segment::new(Vec2::new(0.0, 1.0), Vec2::new(1.0, 0.0));

        let p = intersection(&s1, &s2).expect("diagonals of a square cross");
        assert!((p - Vec2::new(0.5, 0.5)).length() < EPS);

        let q = intersection(&s2, &s1).expect("argument order must not matter");
        assert!((p - q).length() < EPS);
    }

    #[test]
    fn intersection_rejects_parallel_and_disjoint_segments() {
        let s1 = Segment::new(Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0));
        let parallel = Segment::new(Vec2::new(0.0, 1.0), Vec2::new(1.0, 1.0));
        assert_eq!(intersection(&s1, &parallel), None);

        // The underlying lines cross, but outside both segments.
        let far = Segment::new(Vec2::new(5.0, -1.0), Vec2::new(6.0, 1.0));
        assert_eq!(intersection(&s1, &far), None);
    }

    #[test]
    fn intersection_accepts_shared_endpoint() {
        let s1 = Segment::new(Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0));
        let s2 = Segment::new(Vec2::new(1.0, 0.0), Vec2::new(1.0, 1.0));

        let p = intersection(&s1, &s2).expect("endpoint contact is a hit");
        assert!((p - Vec2::new(1.0, 0.0)).length() < EPS);
    }

    #[test]
    fn polygon_contains_centroid_and_excludes_far_points() {
        let square = [
            Vec2::new(0.0, 0.0),
            Vec2::new(10.0, 0.0),
            Vec2::new(10.0, 10.0),
            Vec2::new(0.0, 10.0),
        ];

        assert!(within_polygon_bounds(Vec2::new(5.0, 5.0), &square));
        assert!(!within_polygon_bounds(Vec2::new(50.0, 5.0), &square));
        assert!(!within_polygon_bounds(Vec2::new(-0.1, 5.0), &square));

        // Degenerate polygons contain nothing.
        assert!(!within_polygon_bounds(Vec2::new(0.0, 0.0), &square[..2]));
    }

    #[test]
    fn polar_coord_maps_through_the_screen_convention() {
        let origin = Vec2::new(10.0, 10.0);
        let p = PolarCoord::new(PI / 2.0, 4.0);

        // Positive theta points up on a y-down canvas.
        let cart = p.to_cartesian(origin);
        assert!((cart - Vec2::new(10.0, 6.0)).length() < EPS);
    }

    #[test]
    fn random_in_range_stays_in_bounds() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..200 {
            let v = random_in_range(-3.0, 7.0, &mut rng);
            assert!((-3.0..7.0).contains(&v));

            let i = random_int_in_range(0.0, 5.0, &mut rng);
            assert!((0..5).contains(&i));
        }
        // Coinciding bounds are allowed.
        assert_eq!(random_in_range(2.5, 2.5, &mut rng), 2.5);
    }
}
