//! # Boundary Construction Tests
//!
//! Grid edge scans and contour traces on small hand-built masks.

use super::*;
use crate::error::MeshError;
use glam::IVec2;

fn opaque(width: usize, height: usize) -> RgbaImage {
    RgbaImage::filled(width, height, [255, 255, 255, 255]).unwrap()
}

fn from_rows(rows: &[&str]) -> RgbaImage {
    let height = rows.len();
    let width = rows[0].len();
    RgbaImage::from_alpha_fn(width, height, |x, y| {
        if rows[y].as_bytes()[x] == b'#' {
            255
        } else {
            0
        }
    })
    .unwrap()
}

fn two_blocks() -> RgbaImage {
    RgbaImage::from_alpha_fn(12, 12, |x, y| {
        let first = x < 2 && y < 2;
        let second = (8..10).contains(&x) && (8..10).contains(&y);
        if first || second {
            255
        } else {
            0
        }
    })
    .unwrap()
}

fn checkerboard(width: usize, height: usize) -> RgbaImage {
    RgbaImage::from_alpha_fn(width, height, |x, y| if (x + y) % 2 == 0 { 255 } else { 0 }).unwrap()
}

fn disc() -> RgbaImage {
    RgbaImage::from_alpha_fn(13, 13, |x, y| {
        let (dx, dy) = (x as i32 - 6, y as i32 - 6);
        if dx * dx + dy * dy <= 20 {
            255
        } else {
            0
        }
    })
    .unwrap()
}

fn grid_of(image: &RgbaImage) -> GridBoundary {
    match build_boundary(image, 128, BoundaryStrategy::Grid).unwrap() {
        Boundary::Grid(grid) => grid,
        other => panic!("expected grid boundary, got {:?}", other.strategy()),
    }
}

fn contour_of(image: &RgbaImage) -> Contour {
    match build_boundary(image, 128, BoundaryStrategy::Contour).unwrap() {
        Boundary::Contour(contour) => contour,
        other => panic!("expected contour boundary, got {:?}", other.strategy()),
    }
}

// =============================================================================
// GRID EDGES
// =============================================================================

#[test]
fn test_grid_full_square_has_perimeter_edges() {
    let grid = grid_of(&opaque(4, 4));
    assert_eq!(grid.wall_count(), 16);

    for side in [EdgeSide::Left, EdgeSide::Right, EdgeSide::Top, EdgeSide::Bottom] {
        assert_eq!(grid.edges.iter().filter(|e| e.side == side).count(), 4);
    }
}

#[test]
fn test_grid_rectangle_counts() {
    for (w, h) in [(1, 1), (3, 2), (7, 1), (5, 9)] {
        let grid = grid_of(&opaque(w, h));
        assert_eq!(grid.wall_count(), 2 * (w + h), "{w}x{h}");
    }
}

#[test]
fn test_grid_transparent_image_has_no_edges() {
    let image = RgbaImage::filled(5, 3, [255, 0, 0, 0]).unwrap();
    assert!(grid_of(&image).edges.is_empty());
}

#[test]
fn test_grid_counts_every_component() {
    let grid = grid_of(&two_blocks());
    assert_eq!(grid.wall_count(), 8 + 8);
}

#[test]
fn test_grid_counts_hole_edges() {
    let image = from_rows(&["###", "#.#", "###"]);
    // Outer perimeter plus the four sides of the hole
    assert_eq!(grid_of(&image).wall_count(), 12 + 4);
}

#[test]
fn test_grid_edges_separate_solid_from_empty() {
    let image = from_rows(&["#..#", ".##.", "#.#.", "...#"]);
    let mask = OpacityMask::new(&image, 128, ThresholdMode::AtLeast);
    let grid = scan_edges(&mask, MAX_VERTICES).unwrap();

    assert!(!grid.edges.is_empty());
    for edge in &grid.edges {
        assert!(mask.is_solid(edge.solid.x as i64, edge.solid.y as i64));
        assert!(!mask.is_solid(edge.empty.x as i64, edge.empty.y as i64));
        assert_eq!((edge.solid - edge.empty).abs().element_sum(), 1);
    }
}

#[test]
fn test_edge_segments_are_unit_length() {
    let grid = grid_of(&from_rows(&[".#", "#."]));
    for edge in &grid.edges {
        let (a, b) = edge.segment();
        assert_eq!((b - a).abs().element_sum(), 1);
        assert_eq!(edge.is_vertical(), a.x == b.x);
    }
}

#[test]
fn test_right_edge_segment_on_image_border() {
    let grid = grid_of(&opaque(1, 1));
    let right = grid
        .edges
        .iter()
        .find(|e| e.side == EdgeSide::Right)
        .unwrap();
    assert_eq!(right.solid, IVec2::new(0, 0));
    assert_eq!(right.empty, IVec2::new(1, 0));
    assert_eq!(right.segment(), (IVec2::new(1, 0), IVec2::new(1, 1)));
}

// =============================================================================
// CONTOUR TRACING
// =============================================================================

#[test]
fn test_contour_full_square() {
    let contour = contour_of(&opaque(4, 4));
    assert!(contour.closed);
    // The walk visits each border pixel once: 12 for a 4x4 square, not 16
    assert_eq!(contour.len(), 12);
    assert_eq!(
        contour.bounds,
        BoundingBox {
            min_x: 0,
            min_y: 0,
            max_x: 3,
            max_y: 3
        }
    );
    assert_eq!(contour.points[0], IVec2::new(0, 0));
    assert_eq!(contour.points[1], IVec2::new(1, 0));
}

#[test]
fn test_bounding_box_serializes_as_plain_integers() {
    let contour = contour_of(&from_rows(&["....", ".##.", ".##."]));
    let json = serde_json::to_string(&contour.bounds).unwrap();
    assert_eq!(json, r#"{"minX":1,"minY":1,"maxX":2,"maxY":2}"#);
    let back: BoundingBox = serde_json::from_str(&json).unwrap();
    assert_eq!(back, contour.bounds);
}

#[test]
fn test_contour_walks_clockwise_on_screen() {
    let contour = contour_of(&opaque(3, 3));
    let expected: Vec<IVec2> = [
        (0, 0),
        (1, 0),
        (2, 0),
        (2, 1),
        (2, 2),
        (1, 2),
        (0, 2),
        (0, 1),
    ]
    .iter()
    .map(|&(x, y)| IVec2::new(x, y))
    .collect();
    assert_eq!(contour.points, expected);
    assert!(contour.closed);
}

#[test]
fn test_contour_traces_only_first_component() {
    let contour = contour_of(&two_blocks());
    assert!(contour.closed);
    // Each pixel of the 2x2 block is visited once, so 4 points rather than 8
    assert_eq!(contour.len(), 4);
    assert_eq!(
        contour.bounds,
        BoundingBox {
            min_x: 0,
            min_y: 0,
            max_x: 1,
            max_y: 1
        }
    );
}

#[test]
fn test_contour_of_convex_blob_closes_with_true_bounds() {
    let image = disc();
    let contour = contour_of(&image);
    assert!(contour.closed);

    let mask = OpacityMask::new(&image, 128, ThresholdMode::AtLeast);
    let solid: Vec<IVec2> = (0..13)
        .flat_map(|y| (0..13).map(move |x| IVec2::new(x, y)))
        .filter(|p| mask.is_solid(p.x as i64, p.y as i64))
        .collect();
    let min = solid.iter().fold(IVec2::MAX, |acc, p| acc.min(*p));
    let max = solid.iter().fold(IVec2::MIN, |acc, p| acc.max(*p));
    assert_eq!((contour.bounds.min_x, contour.bounds.min_y), (min.x, min.y));
    assert_eq!((contour.bounds.max_x, contour.bounds.max_y), (max.x, max.y));

    // Consecutive points are 8-neighbors, and the last one touches the start
    for pair in contour.points.windows(2) {
        let step = (pair[1] - pair[0]).abs();
        assert!(step.max_element() == 1, "jump from {} to {}", pair[0], pair[1]);
    }
    let last = *contour.points.last().unwrap();
    assert_eq!((last - contour.points[0]).abs().max_element(), 1);
}

#[test]
fn test_contour_points_are_unique() {
    let contour = contour_of(&disc());
    let mut seen = std::collections::HashSet::new();
    for p in &contour.points {
        assert!(seen.insert((p.x, p.y)), "{p} visited twice");
    }
}

#[test]
fn test_contour_empty_image() {
    let image = RgbaImage::filled(6, 4, [0, 0, 0, 10]).unwrap();
    let contour = contour_of(&image);
    assert!(contour.is_empty());
    assert!(!contour.closed);
    assert!(contour.bounds.is_empty());
    assert_eq!(contour.bounds, BoundingBox::empty(6, 4));
    assert_eq!((contour.bounds.min_x, contour.bounds.min_y), (6, 4));
    assert_eq!((contour.bounds.max_x, contour.bounds.max_y), (0, 0));
}

#[test]
fn test_contour_single_pixel_is_open() {
    let contour = contour_of(&from_rows(&["...", ".#.", "..."]));
    assert_eq!(contour.points, vec![IVec2::new(1, 1)]);
    assert!(!contour.closed);
    assert_eq!(contour.bounds.width(), 0);
}

#[test]
fn test_contour_thin_line_stops_open() {
    let contour = contour_of(&from_rows(&["####"]));
    assert_eq!(contour.len(), 4);
    assert!(!contour.closed);
}

// =============================================================================
// THRESHOLD OPERATORS
// =============================================================================

#[test]
fn test_threshold_operators_differ_per_strategy() {
    let image = opaque(2, 2);
    let grid = match build_boundary(&image, 255, BoundaryStrategy::Grid).unwrap() {
        Boundary::Grid(grid) => grid,
        _ => unreachable!(),
    };
    let contour = match build_boundary(&image, 255, BoundaryStrategy::Contour).unwrap() {
        Boundary::Contour(contour) => contour,
        _ => unreachable!(),
    };
    // alpha 255 >= 255, but not > 255
    assert_eq!(grid.wall_count(), 8);
    assert!(contour.is_empty());
}

#[test]
fn test_contour_binarization_does_not_touch_input() {
    let image = RgbaImage::filled(2, 2, [0, 0, 0, 130]).unwrap();
    let before = image.clone();
    let contour = contour_of(&image);
    assert_eq!(contour.len(), 4);
    assert_eq!(image, before);
}

// =============================================================================
// VERTEX LIMIT
// =============================================================================

#[test]
fn test_vertex_counts_match_assembly() {
    let grid = grid_of(&opaque(4, 4));
    assert_eq!(grid_vertex_count(grid.edges.len()), 4 * (16 + 2));
    let contour = contour_of(&opaque(4, 4));
    assert_eq!(contour_vertex_count(contour.len()), 4 * 12);
}

#[test]
fn test_grid_scan_stops_at_vertex_limit() {
    let image = checkerboard(16, 16);
    let mask = OpacityMask::new(&image, 128, ThresholdMode::AtLeast);
    let full = scan_edges(&mask, MAX_VERTICES).unwrap();
    // Every solid square is isolated
    assert_eq!(full.wall_count(), 4 * 128);

    let err = scan_edges(&mask, 40).unwrap_err();
    let MeshError::TooManyVertices { count, max } = err else {
        panic!("expected a vertex limit error, got {err:?}");
    };
    assert_eq!(max, 40);
    assert!(count > max);
    // Stopped after the first image row instead of scanning everything
    assert!(count < grid_vertex_count(full.wall_count()) / 4, "count {count}");
}

#[test]
fn test_grid_scan_at_exact_limit_succeeds() {
    let image = opaque(3, 2);
    let mask = OpacityMask::new(&image, 128, ThresholdMode::AtLeast);
    let limit = grid_vertex_count(10);
    assert_eq!(scan_edges(&mask, limit).unwrap().wall_count(), 10);
    assert!(scan_edges(&mask, limit - 1).is_err());
}

#[test]
fn test_contour_walk_stops_at_vertex_limit() {
    let image = disc();
    let mask = OpacityMask::new(&image, 128, ThresholdMode::Above);
    let full = trace_contour(&mask, MAX_VERTICES).unwrap();
    assert!(full.len() > 5);

    let err = trace_contour(&mask, contour_vertex_count(5)).unwrap_err();
    assert_eq!(
        err,
        MeshError::TooManyVertices {
            count: contour_vertex_count(6),
            max: contour_vertex_count(5),
        }
    );
}

#[test]
fn test_build_boundary_rejects_oversized_grid() {
    // 2·w·h edges, far more than MAX_VERTICES / 4
    let image = checkerboard(1200, 1200);
    let err = build_boundary(&image, 128, BoundaryStrategy::Grid).unwrap_err();
    let MeshError::TooManyVertices { count, max } = err else {
        panic!("expected a vertex limit error, got {err:?}");
    };
    assert_eq!(max, MAX_VERTICES);
    assert!(count > max);
}
