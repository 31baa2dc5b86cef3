use serde::{Deserialize, Serialize};

/// Plot-space position used for cluster boundary geometry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Convex hull of `points` by gift wrapping (Jarvis march), counter-clockwise.
///
/// Contract:
/// - fewer than 3 input points are returned unchanged (no hull to draw)
/// - wrapping starts at the minimum-x point, ties broken by minimum y
/// - on exact collinearity the farther candidate wins, so hull edges are
///   maximal and interior collinear points never stall the wrap
/// - the loop stops on returning to the start, or once the hull would grow
///   past the input size (degenerate-input guard)
///
/// O(n·h) for h hull vertices; callers memoize per point set (see the view's
/// hull cache) because hulls are redrawn far more often than data changes.
#[must_use]
pub fn convex_hull(points: &[Point]) -> Vec<Point> {
    if points.len() < 3 {
        return points.to_vec();
    }

    let start = start_index(points);
    let mut hull = vec![start];
    let mut current = start;

    loop {
        let mut candidate = if current == 0 { 1 } else { 0 };
        for probe in 0..points.len() {
            if probe == current || probe == candidate {
                continue;
            }
            let turn = cross(points[current], points[candidate], points[probe]);
            if turn < 0.0
                || (turn == 0.0
                    && squared_distance(points[current], points[probe])
                        > squared_distance(points[current], points[candidate]))
            {
                candidate = probe;
            }
        }

        if candidate == start {
            break;
        }
        hull.push(candidate);
        current = candidate;
        if hull.len() > points.len() {
            break;
        }
    }

    hull.into_iter().map(|index| points[index]).collect()
}

// Leftmost point, lowest on ties; the wrap's fixed anchor.
fn start_index(points: &[Point]) -> usize {
    let mut best = 0;
    for (index, point) in points.iter().enumerate().skip(1) {
        let leader = points[best];
        if point.x < leader.x || (point.x == leader.x && point.y < leader.y) {
            best = index;
        }
    }
    best
}

// Cross product of (a - origin) x (b - origin); positive when `b` lies on the
// counter-clockwise side of origin->a.
fn cross(origin: Point, a: Point, b: Point) -> f64 {
    (a.x - origin.x) * (b.y - origin.y) - (a.y - origin.y) * (b.x - origin.x)
}

fn squared_distance(a: Point, b: Point) -> f64 {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    dx * dx + dy * dy
}
