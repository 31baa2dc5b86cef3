use clustermap_rs::core::{Point, convex_hull};

fn p(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

fn hull_ids(hull: &[Point]) -> Vec<(i64, i64)> {
    hull.iter()
        .map(|point| (point.x.round() as i64, point.y.round() as i64))
        .collect()
}

#[test]
fn fewer_than_three_points_pass_through() {
    assert!(convex_hull(&[]).is_empty());

    let single = convex_hull(&[p(1.0, 2.0)]);
    assert_eq!(single.len(), 1);
    assert_eq!((single[0].x, single[0].y), (1.0, 2.0));

    let pair = convex_hull(&[p(1.0, 2.0), p(3.0, 4.0)]);
    assert_eq!(pair.len(), 2);
}

#[test]
fn square_with_interior_point_drops_the_interior() {
    let points = [
        p(0.0, 0.0),
        p(4.0, 0.0),
        p(4.0, 4.0),
        p(0.0, 4.0),
        p(2.0, 2.0),
    ];
    let hull = convex_hull(&points);
    assert_eq!(hull.len(), 4);
    assert!(!hull_ids(&hull).contains(&(2, 2)));
}

#[test]
fn wrap_starts_at_min_x_then_min_y() {
    let points = [p(3.0, 1.0), p(0.0, 5.0), p(0.0, 1.0), p(5.0, 5.0)];
    let hull = convex_hull(&points);
    assert_eq!((hull[0].x, hull[0].y), (0.0, 1.0));
}

#[test]
fn orientation_is_counter_clockwise() {
    let points = [p(0.0, 0.0), p(4.0, 0.0), p(4.0, 4.0), p(0.0, 4.0)];
    let hull = convex_hull(&points);

    // Signed area via the shoelace formula; positive means CCW.
    let mut doubled_area = 0.0;
    for i in 0..hull.len() {
        let a = hull[i];
        let b = hull[(i + 1) % hull.len()];
        doubled_area += a.x * b.y - b.x * a.y;
    }
    assert!(doubled_area > 0.0);
}

#[test]
fn collinear_edge_keeps_only_the_extremes() {
    // Three points on the bottom edge; the middle one must not be a vertex.
    let points = [
        p(0.0, 0.0),
        p(2.0, 0.0),
        p(4.0, 0.0),
        p(4.0, 3.0),
        p(0.0, 3.0),
    ];
    let hull = convex_hull(&points);
    assert_eq!(hull.len(), 4);
    assert!(!hull_ids(&hull).contains(&(2, 0)));
}

#[test]
fn all_collinear_points_terminate() {
    let points = [p(0.0, 0.0), p(1.0, 1.0), p(2.0, 2.0), p(3.0, 3.0)];
    let hull = convex_hull(&points);
    // Degenerate input; the guard stops the wrap without spinning.
    assert!(hull.len() <= points.len() + 1);
    assert!(hull_ids(&hull).contains(&(0, 0)));
    assert!(hull_ids(&hull).contains(&(3, 3)));
}

#[test]
fn duplicate_points_terminate() {
    let points = [p(1.0, 1.0), p(1.0, 1.0), p(1.0, 1.0)];
    let hull = convex_hull(&points);
    assert!(hull.len() <= points.len() + 1);
}

#[test]
fn triangle_is_its_own_hull() {
    let points = [p(0.0, 0.0), p(5.0, 0.0), p(2.0, 4.0)];
    let hull = convex_hull(&points);
    assert_eq!(hull.len(), 3);
    for point in &points {
        assert!(hull_ids(&hull).contains(&(point.x as i64, point.y as i64)));
    }
}
