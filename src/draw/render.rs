use crate::draw::model::{Stroke, StrokeTool};
use std::collections::HashMap;
use std::sync::{Mutex, OnceLock};

const TRANSPARENT: [u8; 4] = [0, 0, 0, 0];
const MAX_BRUSH_RADIUS: i64 = 512;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderSettings {
    /// Physical pixels per logical point.
    pub scale: f32,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self { scale: 1.0 }
    }
}

/// How a stroke affects the pixels under its brush.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Paint {
    /// Paints over what is below.
    Over([u8; 4]),
    /// Removes what is below.
    Erase,
}

impl Paint {
    fn for_stroke(stroke: &Stroke) -> Self {
        match stroke.tool {
            StrokeTool::Pen => Paint::Over(stroke.color.to_rgba_array()),
            StrokeTool::Eraser => Paint::Erase,
        }
    }

    fn rgba(self) -> [u8; 4] {
        match self {
            Paint::Over(color) => color,
            Paint::Erase => TRANSPARENT,
        }
    }
}

/// Rasterizes strokes in order onto a transparent RGBA buffer of `size` pixels.
pub fn render_strokes_to_rgba(
    strokes: &[Stroke],
    settings: RenderSettings,
    size: (u32, u32),
) -> Vec<u8> {
    let (width, height) = size;
    let mut pixels = vec![0u8; (width as usize) * (height as usize) * 4];
    let scale = if settings.scale.is_finite() && settings.scale > 0.0 {
        settings.scale as f64
    } else {
        1.0
    };
    for stroke in strokes {
        render_stroke_rgba(stroke, scale, &mut pixels, width, height);
    }
    pixels
}

fn render_stroke_rgba(stroke: &Stroke, scale: f64, pixels: &mut [u8], width: u32, height: u32) {
    let paint = Paint::for_stroke(stroke);
    let radius = brush_radius(stroke.width() * scale);
    let mask = get_brush_mask(radius);
    let mut canvas = Canvas {
        pixels,
        width,
        height,
    };
    let points: Vec<(f64, f64)> = stroke
        .point_pairs()
        .map(|(x, y)| (x * scale, y * scale))
        .filter(|(x, y)| x.is_finite() && y.is_finite())
        .collect();

    match points.as_slice() {
        [] => {}
        [only] => {
            if let Some(center) = clip_segment(*only, *only, radius, width, height) {
                draw_brush(center.0, paint, &mask, &mut canvas);
            }
        }
        _ => {
            for segment in points.windows(2) {
                let clipped = clip_segment(segment[0], segment[1], radius, width, height);
                if let Some((start, end)) = clipped {
                    draw_segment(start, end, paint, &mask, &mut canvas);
                }
            }
        }
    }
}

fn brush_radius(diameter: f64) -> i64 {
    ((diameter / 2.0).round() as i64).clamp(1, MAX_BRUSH_RADIUS)
}

struct Canvas<'a> {
    pixels: &'a mut [u8],
    width: u32,
    height: u32,
}

/// Clips a segment to the canvas grown by the brush radius and rounds the
/// remaining part to pixel coordinates. `None` when nothing is visible.
fn clip_segment(
    start: (f64, f64),
    end: (f64, f64),
    radius: i64,
    width: u32,
    height: u32,
) -> Option<((i64, i64), (i64, i64))> {
    let margin = radius as f64 + 1.0;
    let (min_x, max_x) = (-margin, width as f64 + margin);
    let (min_y, max_y) = (-margin, height as f64 + margin);
    let dx = end.0 - start.0;
    let dy = end.1 - start.1;
    if !dx.is_finite() || !dy.is_finite() {
        return None;
    }

    // Liang-Barsky
    let mut t0 = 0.0f64;
    let mut t1 = 1.0f64;
    for (p, q) in [
        (-dx, start.0 - min_x),
        (dx, max_x - start.0),
        (-dy, start.1 - min_y),
        (dy, max_y - start.1),
    ] {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let t = q / p;
        if p < 0.0 {
            t0 = t0.max(t);
        } else {
            t1 = t1.min(t);
        }
        if t0 > t1 {
            return None;
        }
    }

    // Far endpoints lose precision; pin results to the box.
    let at = |t: f64| {
        (
            (start.0 + dx * t).clamp(min_x, max_x).round() as i64,
            (start.1 + dy * t).clamp(min_y, max_y).round() as i64,
        )
    };
    Some((at(t0), at(t1)))
}

/// Stamps the round brush along the segment, which gives round caps and joins.
fn draw_segment(
    start: (i64, i64),
    end: (i64, i64),
    paint: Paint,
    mask: &BrushMask,
    canvas: &mut Canvas<'_>,
) {
    let (mut x0, mut y0) = start;
    let (x1, y1) = end;

    let dx = x1.saturating_sub(x0).saturating_abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = y1.saturating_sub(y0).saturating_abs().saturating_neg();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx.saturating_add(dy);

    loop {
        draw_brush((x0, y0), paint, mask, canvas);
        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = err.saturating_mul(2);
        if e2 >= dy {
            err = err.saturating_add(dy);
            x0 += sx;
        }
        if e2 <= dx {
            err = err.saturating_add(dx);
            y0 += sy;
        }
    }
}

#[derive(Clone)]
struct BrushMask {
    rows: Vec<BrushMaskRow>,
}

#[derive(Clone, Copy)]
struct BrushMaskRow {
    dy: i64,
    max_dx: i64,
}

fn brush_mask_cache() -> &'static Mutex<HashMap<i64, BrushMask>> {
    static CACHE: OnceLock<Mutex<HashMap<i64, BrushMask>>> = OnceLock::new();
    CACHE.get_or_init(|| Mutex::new(HashMap::new()))
}

fn get_brush_mask(radius: i64) -> BrushMask {
    let cache = brush_mask_cache();
    if let Ok(guard) = cache.lock() {
        if let Some(mask) = guard.get(&radius) {
            return mask.clone();
        }
    }

    let mut rows = Vec::with_capacity((radius * 2 + 1) as usize);
    for dy in -radius..=radius {
        let mut max_dx = radius;
        while max_dx >= 0 && max_dx * max_dx + dy * dy > radius * radius {
            max_dx -= 1;
        }
        if max_dx >= 0 {
            rows.push(BrushMaskRow { dy, max_dx });
        }
    }
    let mask = BrushMask { rows };
    if let Ok(mut guard) = cache.lock() {
        guard.insert(radius, mask.clone());
    }
    mask
}

fn draw_brush(center: (i64, i64), paint: Paint, mask: &BrushMask, canvas: &mut Canvas<'_>) {
    let rgba = paint.rgba();
    let (width, height) = (canvas.width as i64, canvas.height as i64);
    for row in &mask.rows {
        let y = center.1 + row.dy;
        if y < 0 || y >= height {
            continue;
        }
        let x0 = (center.0 - row.max_dx).max(0);
        let x1 = (center.0 + row.max_dx).min(width - 1);
        if x0 > x1 {
            continue;
        }
        let row_base = (y as usize) * (canvas.width as usize) * 4;
        for x in x0..=x1 {
            let idx = row_base + (x as usize) * 4;
            canvas.pixels[idx..idx + 4].copy_from_slice(&rgba);
        }
    }
}
