use crate::draw::model::{Stroke, StrokeId, StrokeStore};

/// Id of the topmost stroke whose rendered path covers `point`.
pub fn stroke_at(store: &StrokeStore, point: (f64, f64)) -> Option<&StrokeId> {
    store
        .strokes()
        .iter()
        .rev()
        .find(|stroke| stroke_contains(stroke, point))
        .map(|stroke| &stroke.id)
}

pub fn stroke_contains(stroke: &Stroke, point: (f64, f64)) -> bool {
    let radius = stroke.width() / 2.0;
    let radius_sq = radius * radius;
    let mut pairs = stroke.point_pairs();
    let Some(first) = pairs.next() else {
        return false;
    };

    let mut previous = first;
    let mut segments = 0usize;
    for current in pairs {
        if point_segment_distance_sq(point, previous, current) <= radius_sq {
            return true;
        }
        previous = current;
        segments += 1;
    }

    segments == 0 && point_segment_distance_sq(point, first, first) <= radius_sq
}

fn point_segment_distance_sq(point: (f64, f64), start: (f64, f64), end: (f64, f64)) -> f64 {
    let (px, py) = point;
    let (x0, y0) = start;
    let vx = end.0 - x0;
    let vy = end.1 - y0;
    let wx = px - x0;
    let wy = py - y0;
    let len_sq = vx * vx + vy * vy;
    if len_sq <= f64::EPSILON {
        return wx * wx + wy * wy;
    }
    let t = ((wx * vx + wy * vy) / len_sq).clamp(0.0, 1.0);
    let dx = px - (x0 + vx * t);
    let dy = py - (y0 + vy * t);
    dx * dx + dy * dy
}
