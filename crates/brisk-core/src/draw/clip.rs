use crate::geometry::{Axis, Rect, Vec2};

// A triangle cut by four half-planes has at most 7 corners.
const MAX_CLIP_POINTS: usize = 7;

/// Small fixed-capacity convex polygon used while clipping.
#[derive(Clone, Copy, Debug)]
pub struct ClipPolygon {
    points: [Vec2; MAX_CLIP_POINTS],
    len: usize,
}

impl ClipPolygon {
    pub fn new() -> Self {
        Self {
            points: [Vec2::ZERO; MAX_CLIP_POINTS],
            len: 0,
        }
    }

    pub fn from_points(points: &[Vec2]) -> Self {
        let mut poly = Self::new();
        for &p in points {
            poly.push(p);
        }
        poly
    }

    pub fn push(&mut self, p: Vec2) {
        assert!(self.len < MAX_CLIP_POINTS, "clip polygon overflow");
        self.points[self.len] = p;
        self.len += 1;
    }

    /// Push unless `p` coincides with the last point.
    fn push_distinct(&mut self, p: Vec2) {
        if self.points().last() != Some(&p) {
            self.push(p);
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn points(&self) -> &[Vec2] {
        &self.points[..self.len]
    }
}

impl Default for ClipPolygon {
    fn default() -> Self {
        Self::new()
    }
}

/// Keep the part of `input` on the inside of the line `p[axis] == line`.
///
/// Inside is `p[axis] < line`, or `>` when `flip` is set. A start point lying
/// exactly on the line counts as inside so that degenerate edges still
/// contribute their start point. Coincident points are merged, so the
/// output never repeats a corner.
pub fn clip_convex_polygon_to_half_space(
    axis: Axis,
    flip: bool,
    line: f32,
    input: &ClipPolygon,
) -> ClipPolygon {
    let other = axis.other();
    let pts = input.points();
    let mut out = ClipPolygon::new();
    for i in 0..pts.len() {
        let v0 = pts[i];
        let v1 = pts[(i + 1) % pts.len()];

        let starts_inside = ((v0[axis] < line) != flip) || v0[axis] == line;
        let ends_inside = (v1[axis] < line) != flip;
        if starts_inside {
            out.push_distinct(v0);
        }
        if starts_inside != ends_inside {
            let edge = v1[axis] - v0[axis];
            if edge != 0.0 {
                let t = (line - v0[axis]) / edge;
                let mut p = Vec2::ZERO;
                p[axis] = line;
                p[other] = t * v1[other] + (1.0 - t) * v0[other];
                out.push_distinct(p);
            }
        }
    }
    if out.len > 1 && out.points[0] == out.points[out.len - 1] {
        out.len -= 1;
    }
    out
}

/// Clip a triangle against the sides of `scissor` it actually crosses, in
/// right, bottom, left, top order. `bounds` is `[min_x, min_y, max_x, max_y]`.
pub(crate) fn clip_triangle_to_rect(tri: [Vec2; 3], scissor: &Rect, bounds: [f32; 4]) -> ClipPolygon {
    let [min_x, min_y, max_x, max_y] = bounds;
    let mut poly = ClipPolygon::from_points(&tri);
    if max_x > scissor.max.x {
        poly = clip_convex_polygon_to_half_space(Axis::X, false, scissor.max.x, &poly);
    }
    if max_y > scissor.max.y {
        poly = clip_convex_polygon_to_half_space(Axis::Y, false, scissor.max.y, &poly);
    }
    if min_x < scissor.min.x {
        poly = clip_convex_polygon_to_half_space(Axis::X, true, scissor.min.x, &poly);
    }
    if min_y < scissor.min.y {
        poly = clip_convex_polygon_to_half_space(Axis::Y, true, scissor.min.y, &poly);
    }
    poly
}

/// Barycentric weights (u, v, w) of `p` relative to triangle `a b c`.
pub(crate) fn barycentric(a: Vec2, b: Vec2, c: Vec2, p: Vec2) -> (f32, f32, f32) {
    let v0 = b - a;
    let v1 = c - a;
    let v2 = p - a;
    let d00 = v0.dot(v0);
    let d01 = v0.dot(v1);
    let d11 = v1.dot(v1);
    let d20 = v2.dot(v0);
    let d21 = v2.dot(v1);
    let denom = d00 * d11 - d01 * d01;
    if denom == 0.0 {
        return (1.0, 0.0, 0.0);
    }
    let v = (d11 * d20 - d01 * d21) / denom;
    let w = (d00 * d21 - d01 * d20) / denom;
    (1.0 - v - w, v, w)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_half_space_keeps_inside_part() {
        let square = ClipPolygon::from_points(&[
            Vec2::new(0.0, 0.0),
            Vec2::new(10.0, 0.0),
            Vec2::new(10.0, 10.0),
            Vec2::new(0.0, 10.0),
        ]);
        let cut = clip_convex_polygon_to_half_space(Axis::X, false, 4.0, &square);
        let xs: Vec<f32> = cut.points().iter().map(|p| p.x).collect();
        assert_eq!(cut.len(), 4);
        assert!(xs.iter().all(|&x| x <= 4.0));

        let flipped = clip_convex_polygon_to_half_space(Axis::X, true, 4.0, &square);
        assert!(flipped.points().iter().all(|p| p.x >= 4.0));
    }

    #[test]
    fn test_fully_outside_gives_empty() {
        let tri = ClipPolygon::from_points(&[Vec2::new(5.0, 0.0), Vec2::new(9.0, 0.0), Vec2::new(5.0, 3.0)]);
        let cut = clip_convex_polygon_to_half_space(Axis::X, false, 2.0, &tri);
        assert!(cut.is_empty());
    }

    #[test]
    fn test_vertex_on_line_is_not_repeated() {
        let tri = ClipPolygon::from_points(&[Vec2::new(10.0, 0.0), Vec2::new(20.0, 10.0), Vec2::new(10.0, 20.0)]);
        let cut = clip_convex_polygon_to_half_space(Axis::X, false, 10.0, &tri);
        assert_eq!(cut.points(), &[Vec2::new(10.0, 0.0), Vec2::new(10.0, 20.0)]);

        // Corners lying on the line are kept once.
        let tri = ClipPolygon::from_points(&[Vec2::new(4.0, 0.0), Vec2::new(0.0, 4.0), Vec2::new(0.0, 0.0)]);
        let cut = clip_convex_polygon_to_half_space(Axis::Y, true, 0.0, &tri);
        let pts = cut.points();
        for (i, p) in pts.iter().enumerate() {
            assert_ne!(*p, pts[(i + 1) % pts.len()]);
        }
    }

    #[test]
    fn test_corner_cut_stays_within_seven_points() {
        // Triangle poking out of every side of the square.
        let tri = [Vec2::new(-5.0, 5.0), Vec2::new(15.0, -5.0), Vec2::new(10.0, 20.0)];
        let square = Rect::new(Vec2::ZERO, Vec2::new(10.0, 10.0));
        let poly = clip_triangle_to_rect(tri, &square, [-5.0, -5.0, 15.0, 20.0]);
        assert!((3..=MAX_CLIP_POINTS).contains(&poly.len()));
        let eps = 1e-4;
        for p in poly.points() {
            assert!(p.x >= -eps && p.x <= 10.0 + eps && p.y >= -eps && p.y <= 10.0 + eps, "{p:?}");
        }
    }

    #[test]
    fn test_barycentric_corners() {
        let (a, b, c) = (Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0), Vec2::new(0.0, 1.0));
        assert_eq!(barycentric(a, b, c, a), (1.0, 0.0, 0.0));
        assert_eq!(barycentric(a, b, c, b), (0.0, 1.0, 0.0));
        assert_eq!(barycentric(a, b, c, c), (0.0, 0.0, 1.0));
    }
}
