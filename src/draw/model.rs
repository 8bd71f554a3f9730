use anyhow::{anyhow, bail, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

pub const PEN_STROKE_WIDTH: f64 = 4.0;
pub const ERASER_STROKE_WIDTH: f64 = 12.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrokeTool {
    Pen,
    Eraser,
}

impl StrokeTool {
    pub fn width(self) -> f64 {
        match self {
            StrokeTool::Pen => PEN_STROKE_WIDTH,
            StrokeTool::Eraser => ERASER_STROKE_WIDTH,
        }
    }
}

/// Opaque RGB colour, serialized as `#rrggbb`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct StrokeColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl StrokeColor {
    pub const BLACK: StrokeColor = StrokeColor::rgb(0, 0, 0);
    pub const RED: StrokeColor = StrokeColor::rgb(255, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parses `#rgb` or `#rrggbb` (leading `#` optional).
    pub fn from_hex(text: &str) -> Result<Self> {
        let digits = text.trim().trim_start_matches('#');
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            bail!("invalid hex colour {text:?}");
        }
        match digits.len() {
            3 => {
                let mut channels = [0u8; 3];
                for (slot, c) in channels.iter_mut().zip(digits.chars()) {
                    let nibble = c
                        .to_digit(16)
                        .ok_or_else(|| anyhow!("invalid hex colour {text:?}"))?
                        as u8;
                    *slot = nibble * 17;
                }
                Ok(Self::rgb(channels[0], channels[1], channels[2]))
            }
            6 => {
                let channel = |range: std::ops::Range<usize>| {
                    u8::from_str_radix(&digits[range], 16)
                        .map_err(|e| anyhow!("invalid hex colour {text:?}: {e}"))
                };
                Ok(Self::rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?))
            }
            _ => bail!("invalid hex colour {text:?}"),
        }
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    pub fn to_rgba_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, 255]
    }
}

impl Default for StrokeColor {
    fn default() -> Self {
        Self::RED
    }
}

impl fmt::Display for StrokeColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl TryFrom<String> for StrokeColor {
    type Error = anyhow::Error;

    fn try_from(value: String) -> Result<Self> {
        Self::from_hex(&value)
    }
}

impl From<StrokeColor> for String {
    fn from(color: StrokeColor) -> Self {
        color.to_hex()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StrokeId(String);

impl StrokeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Random version 4 UUID in its canonical hyphenated text form.
    pub fn random() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StrokeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    pub id: StrokeId,
    /// Alternating x,y coordinates in logical canvas units.
    pub points: Vec<f64>,
    #[serde(rename = "fillColor")]
    pub color: StrokeColor,
    pub tool: StrokeTool,
}

impl Stroke {
    pub fn begin(tool: StrokeTool, color: StrokeColor, point: (f64, f64)) -> Self {
        Self {
            id: StrokeId::random(),
            points: vec![point.0, point.1],
            color,
            tool,
        }
    }

    pub fn width(&self) -> f64 {
        self.tool.width()
    }

    pub fn point_pairs(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.points.chunks_exact(2).map(|pair| (pair[0], pair[1]))
    }

    pub fn rescale(&mut self, scale_x: f64, scale_y: f64) {
        for (idx, value) in self.points.iter_mut().enumerate() {
            if idx % 2 == 0 {
                *value *= scale_x;
            } else {
                *value *= scale_y;
            }
        }
    }
}

/// Ordered strokes behind a copy-on-write snapshot.
///
/// Every mutation bumps `revision`; snapshots handed out earlier never change.
#[derive(Debug, Clone, Default)]
pub struct StrokeStore {
    strokes: Arc<Vec<Stroke>>,
    revision: u64,
}

impl StrokeStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_strokes(strokes: Vec<Stroke>) -> Result<Self> {
        validate_strokes(&strokes)?;
        Ok(Self {
            strokes: Arc::new(strokes),
            revision: 0,
        })
    }

    pub fn strokes(&self) -> &[Stroke] {
        &self.strokes
    }

    pub fn snapshot(&self) -> Arc<Vec<Stroke>> {
        Arc::clone(&self.strokes)
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn len(&self) -> usize {
        self.strokes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strokes.is_empty()
    }

    pub fn contains(&self, id: &StrokeId) -> bool {
        self.strokes.iter().any(|stroke| &stroke.id == id)
    }

    /// Appends `stroke` unless its id is already present.
    pub fn push(&mut self, stroke: Stroke) -> bool {
        if self.contains(&stroke.id) {
            return false;
        }
        self.mutate().push(stroke);
        true
    }

    pub fn extend_last(&mut self, point: (f64, f64)) -> bool {
        if self.strokes.is_empty() {
            return false;
        }
        if let Some(last) = self.mutate().last_mut() {
            last.points.extend_from_slice(&[point.0, point.1]);
        }
        true
    }

    pub fn pop(&mut self) -> Option<Stroke> {
        if self.strokes.is_empty() {
            return None;
        }
        self.mutate().pop()
    }

    pub fn remove_by_id(&mut self, id: &StrokeId) -> usize {
        if !self.contains(id) {
            return 0;
        }
        let strokes = self.mutate();
        let before = strokes.len();
        strokes.retain(|stroke| &stroke.id != id);
        before - strokes.len()
    }

    pub fn clear(&mut self) -> bool {
        if self.strokes.is_empty() {
            return false;
        }
        self.mutate().clear();
        true
    }

    pub fn rescale(&mut self, scale_x: f64, scale_y: f64) {
        if self.strokes.is_empty() {
            return;
        }
        for stroke in self.mutate().iter_mut() {
            stroke.rescale(scale_x, scale_y);
        }
    }

    fn mutate(&mut self) -> &mut Vec<Stroke> {
        self.revision = self.revision.wrapping_add(1);
        Arc::make_mut(&mut self.strokes)
    }
}

impl PartialEq for StrokeStore {
    fn eq(&self, other: &Self) -> bool {
        self.strokes == other.strokes
    }
}

pub fn validate_strokes(strokes: &[Stroke]) -> Result<()> {
    let mut seen = HashSet::with_capacity(strokes.len());
    for stroke in strokes {
        if !seen.insert(&stroke.id) {
            bail!("duplicate stroke id {}", stroke.id);
        }
        if stroke.points.len() % 2 != 0 {
            bail!(
                "stroke {} has an odd number of coordinates ({})",
                stroke.id,
                stroke.points.len()
            );
        }
    }
    Ok(())
}
