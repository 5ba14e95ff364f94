//! # Polygon Triangulation
//!
//! Ear clipping for the contour caps. Traced outlines are usually concave,
//! so a plain fan would fold over itself.

use config::constants::EPSILON;
use glam::DVec2;
use tracing::warn;

/// Twice the signed area; positive for counter-clockwise polygons.
pub fn signed_area2(points: &[DVec2]) -> f64 {
    let n = points.len();
    (0..n)
        .map(|i| points[i].perp_dot(points[(i + 1) % n]))
        .sum()
}

/// Turn at `b` going from `a` to `c`; positive for a left (convex) turn.
#[inline]
fn turn(a: DVec2, b: DVec2, c: DVec2) -> f64 {
    (b - a).perp_dot(c - b)
}

/// Removes repeated points and points lying on the line through their
/// neighbors, including the wrap-around at the end of the ring.
pub fn drop_collinear(points: &[DVec2]) -> Vec<DVec2> {
    let mut ring: Vec<DVec2> = Vec::with_capacity(points.len());
    for &p in points {
        if ring.last() == Some(&p) {
            continue;
        }
        while let [.., a, b] = ring.as_slice() {
            if turn(*a, *b, p).abs() >= EPSILON {
                break;
            }
            ring.pop();
        }
        ring.push(p);
    }

    loop {
        let n = ring.len();
        if n < 3 {
            break;
        }
        if ring[n - 1] == ring[0] || turn(ring[n - 2], ring[n - 1], ring[0]).abs() < EPSILON {
            ring.pop();
        } else if turn(ring[n - 1], ring[0], ring[1]).abs() < EPSILON {
            ring.remove(0);
        } else {
            break;
        }
    }

    ring
}

fn point_in_triangle(p: DVec2, a: DVec2, b: DVec2, c: DVec2) -> bool {
    let d1 = (b - a).perp_dot(p - a);
    let d2 = (c - b).perp_dot(p - b);
    let d3 = (a - c).perp_dot(p - c);

    let has_neg = d1 < 0.0 || d2 < 0.0 || d3 < 0.0;
    let has_pos = d1 > 0.0 || d2 > 0.0 || d3 > 0.0;

    !(has_neg && has_pos)
}

fn is_ear(points: &[DVec2], remaining: &[usize], i: usize) -> bool {
    let n = remaining.len();
    let prev = remaining[(i + n - 1) % n];
    let curr = remaining[i];
    let next = remaining[(i + 1) % n];
    let (a, b, c) = (points[prev], points[curr], points[next]);

    if turn(a, b, c) <= EPSILON {
        return false;
    }

    remaining.iter().all(|&k| {
        if k == prev || k == curr || k == next {
            return true;
        }
        let p = points[k];
        // Touching a corner is fine; anything else inside or on the
        // triangle would be cut off.
        p == a || p == b || p == c || !point_in_triangle(p, a, b, c)
    })
}

/// Triangulates a counter-clockwise polygon by ear clipping.
///
/// Returned triangles index into `points` and are counter-clockwise. If no
/// ear can be found (self-intersecting input), the rest of the polygon is
/// fanned from its first remaining vertex.
///
/// # Example
///
/// ```rust
/// use glam::DVec2;
/// use sticker_mesh::assemble::triangulate::triangulate_polygon;
///
/// let square = [
///     DVec2::new(0.0, 0.0),
///     DVec2::new(1.0, 0.0),
///     DVec2::new(1.0, 1.0),
///     DVec2::new(0.0, 1.0),
/// ];
/// assert_eq!(triangulate_polygon(&square).len(), 2);
/// ```
pub fn triangulate_polygon(points: &[DVec2]) -> Vec<[u32; 3]> {
    let n = points.len();
    if n < 3 {
        return Vec::new();
    }

    let mut remaining: Vec<usize> = (0..n).collect();
    let mut triangles = Vec::with_capacity(n - 2);

    while remaining.len() > 3 {
        let Some(i) = (0..remaining.len()).find(|&i| is_ear(points, &remaining, i)) else {
            warn!(
                remaining = remaining.len(),
                "ear clipping stuck, using fan triangulation"
            );
            break;
        };

        let m = remaining.len();
        triangles.push([
            remaining[(i + m - 1) % m] as u32,
            remaining[i] as u32,
            remaining[(i + 1) % m] as u32,
        ]);
        remaining.remove(i);
    }

    for i in 1..remaining.len() - 1 {
        triangles.push([
            remaining[0] as u32,
            remaining[i] as u32,
            remaining[i + 1] as u32,
        ]);
    }

    triangles
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pts(coords: &[(f64, f64)]) -> Vec<DVec2> {
        coords.iter().map(|&(x, y)| DVec2::new(x, y)).collect()
    }

    fn area_of(points: &[DVec2], triangles: &[[u32; 3]]) -> f64 {
        triangles
            .iter()
            .map(|t| {
                let [a, b, c] = t.map(|i| points[i as usize]);
                turn(a, b, c) / 2.0
            })
            .sum()
    }

    #[test]
    fn test_signed_area_orientation() {
        let ccw = pts(&[(0.0, 0.0), (2.0, 0.0), (2.0, 1.0), (0.0, 1.0)]);
        assert_eq!(signed_area2(&ccw), 4.0);
        let cw: Vec<DVec2> = ccw.iter().rev().copied().collect();
        assert_eq!(signed_area2(&cw), -4.0);
    }

    #[test]
    fn test_drop_collinear_straight_runs() {
        let ring = pts(&[
            (0.0, 0.0),
            (1.0, 0.0),
            (2.0, 0.0),
            (2.0, 1.0),
            (2.0, 2.0),
            (1.0, 2.0),
            (0.0, 2.0),
            (0.0, 1.0),
        ]);
        let simplified = drop_collinear(&ring);
        assert_eq!(
            simplified,
            pts(&[(0.0, 0.0), (2.0, 0.0), (2.0, 2.0), (0.0, 2.0)])
        );
    }

    #[test]
    fn test_drop_collinear_wraps_around() {
        // Start point sits in the middle of the bottom edge
        let ring = pts(&[(1.0, 0.0), (2.0, 0.0), (2.0, 2.0), (0.0, 2.0), (0.0, 0.0)]);
        assert_eq!(drop_collinear(&ring).len(), 4);
    }

    #[test]
    fn test_drop_collinear_degenerate_line() {
        let ring = pts(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0), (3.0, 0.0)]);
        assert!(drop_collinear(&ring).len() < 3);
    }

    #[test]
    fn test_triangulate_concave_polygon() {
        // L shape, counter-clockwise
        let l = pts(&[
            (0.0, 0.0),
            (2.0, 0.0),
            (2.0, 1.0),
            (1.0, 1.0),
            (1.0, 2.0),
            (0.0, 2.0),
        ]);
        let triangles = triangulate_polygon(&l);
        assert_eq!(triangles.len(), 4);
        approx::assert_relative_eq!(area_of(&l, &triangles), 3.0);
        for t in &triangles {
            let [a, b, c] = t.map(|i| l[i as usize]);
            assert!(turn(a, b, c) > 0.0, "triangle {t:?} is not counter-clockwise");
        }
    }

    #[test]
    fn test_triangulate_too_few_points() {
        assert!(triangulate_polygon(&pts(&[(0.0, 0.0), (1.0, 0.0)])).is_empty());
    }
}
