use super::Point;

/// Radius around a path vertex that grabs its handle.
pub const HANDLE_RADIUS: f64 = 5.0;

/// Minimum half-width of the band around a stroke that counts as a hit, so
/// hairline shapes stay clickable.
pub const MIN_HIT_TOLERANCE: f64 = 4.0;

/// Calculate distance from a point to a line segment
pub fn distance_to_segment(point: Point, start: Point, end: Point) -> f64 {
    let segment = end - start;
    let length_sq = segment.dx * segment.dx + segment.dy * segment.dy;
    if length_sq == 0.0 {
        return point.distance(start);
    }

    let to_point = point - start;
    let t = ((to_point.dx * segment.dx + to_point.dy * segment.dy) / length_sq).clamp(0.0, 1.0);
    let projection = Point::new(start.x + segment.dx * t, start.y + segment.dy * t);
    point.distance(projection)
}

/// Distance from a point to an open polyline.
pub fn distance_to_polyline(point: Point, points: &[Point]) -> f64 {
    match points {
        [] => f64::INFINITY,
        [single] => point.distance(*single),
        _ => points
            .windows(2)
            .map(|pair| distance_to_segment(point, pair[0], pair[1]))
            .fold(f64::INFINITY, f64::min),
    }
}

/// Even-odd containment test for the polygon closing `points`.
pub fn polygon_contains(point: Point, points: &[Point]) -> bool {
    if points.len() < 3 {
        return false;
    }

    let mut inside = false;
    let mut j = points.len() - 1;
    for i in 0..points.len() {
        let (a, b) = (points[i], points[j]);
        if (a.y > point.y) != (b.y > point.y) {
            let x_cross = (b.x - a.x) * (point.y - a.y) / (b.y - a.y) + a.x;
            if point.x < x_cross {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

/// Approximate distance from a point to an ellipse outline, measured along
/// the ray from the center. Degenerate ellipses collapse to a segment.
pub fn distance_to_ellipse_outline(point: Point, center: Point, rx: f64, ry: f64) -> f64 {
    if rx == 0.0 || ry == 0.0 {
        let start = Point::new(center.x - rx, center.y - ry);
        let end = Point::new(center.x + rx, center.y + ry);
        return distance_to_segment(point, start, end);
    }

    let offset = point - center;
    let normalized = ((offset.dx / rx).powi(2) + (offset.dy / ry).powi(2)).sqrt();
    if normalized == 0.0 {
        return rx.min(ry);
    }
    let length = offset.length();
    (length - length / normalized).abs()
}

pub fn ellipse_contains(point: Point, center: Point, rx: f64, ry: f64) -> bool {
    if rx == 0.0 || ry == 0.0 {
        return false;
    }
    let offset = point - center;
    (offset.dx / rx).powi(2) + (offset.dy / ry).powi(2) <= 1.0
}

/// Index of the first handle within [`HANDLE_RADIUS`] of `pos`, preferring the
/// last-drawn handle when several overlap.
pub fn handle_at(pos: Point, handles: &[Point], radius: f64) -> Option<usize> {
    handles
        .iter()
        .enumerate()
        .rev()
        .find(|(_, handle)| handle.distance(pos) <= radius)
        .map(|(index, _)| index)
}
