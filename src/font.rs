use std::collections::HashMap;

use anyhow::{bail, Context, Result};
use glam::Vec2;
use serde::Deserialize;

fn default_resolution() -> f32 {
    1000.0
}

/// Raw typeface.json font descriptor. Glyph outlines are stored as a
/// whitespace-separated command string in font units.
#[derive(Debug, Deserialize)]
pub struct FontData {
    pub glyphs: HashMap<String, GlyphData>,
    #[serde(default = "default_resolution")]
    pub resolution: f32,
    #[serde(default)]
    pub ascender: f32,
    #[serde(default)]
    pub descender: f32,
    #[serde(rename = "familyName", default)]
    pub family_name: String,
}

#[derive(Debug, Deserialize)]
pub struct GlyphData {
    /// Horizontal advance in font units
    pub ha: f32,
    #[serde(default)]
    pub o: String,
}

/// One outline command in font units
#[derive(Debug, Clone, Copy, PartialEq)]
enum PathCmd {
    MoveTo(Vec2),
    LineTo(Vec2),
    /// Quadratic bezier; the descriptor lists the endpoint first
    Quad { to: Vec2, ctrl: Vec2 },
    /// Cubic bezier; the descriptor lists the endpoint first
    Cubic { to: Vec2, ctrl1: Vec2, ctrl2: Vec2 },
}

/// A glyph scaled to world units: closed flattened contours plus the
/// horizontal advance to the next glyph
#[derive(Debug, Clone)]
pub struct Glyph {
    pub contours: Vec<Vec<Vec2>>,
    pub advance: f32,
}

/// Parsed font ready for text layout
#[derive(Debug)]
pub struct Font {
    data: FontData,
}

impl Font {
    pub fn parse(json: &str) -> Result<Self> {
        let data: FontData =
            serde_json::from_str(json).context("failed to parse typeface descriptor")?;
        if data.glyphs.is_empty() {
            bail!("typeface descriptor contains no glyphs");
        }
        Ok(Self { data })
    }

    pub fn family_name(&self) -> &str {
        &self.data.family_name
    }

    /// Outline of one character at the given size, with bezier segments
    /// flattened into `curve_segments` straight pieces each
    pub fn glyph(&self, c: char, size: f32, curve_segments: u32) -> Option<Result<Glyph>> {
        let data = self.data.glyphs.get(&c.to_string())?;
        let scale = size / self.data.resolution;
        Some(build_glyph(data, scale, curve_segments))
    }

    /// Flattened contours for a whole string, pen-advanced left to right.
    /// Characters missing from the font fall back to '?' or are skipped.
    pub fn layout(&self, text: &str, size: f32, curve_segments: u32) -> Result<Vec<Vec<Vec2>>> {
        let mut contours = Vec::new();
        let mut pen_x = 0.0;

        for c in text.chars() {
            let glyph = match self.glyph(c, size, curve_segments) {
                Some(glyph) => glyph?,
                None => match self.glyph('?', size, curve_segments) {
                    Some(glyph) => {
                        log::warn!("font has no glyph for {c:?}, substituting '?'");
                        glyph?
                    }
                    None => {
                        log::warn!("font has no glyph for {c:?}, skipping");
                        continue;
                    }
                },
            };

            for contour in glyph.contours {
                contours.push(
                    contour
                        .into_iter()
                        .map(|p| Vec2::new(p.x + pen_x, p.y))
                        .collect(),
                );
            }
            pen_x += glyph.advance;
        }

        Ok(contours)
    }
}

fn build_glyph(data: &GlyphData, scale: f32, curve_segments: u32) -> Result<Glyph> {
    let commands = parse_outline(&data.o)?;
    let contours = flatten(&commands, scale, curve_segments);
    Ok(Glyph {
        contours,
        advance: data.ha * scale,
    })
}

fn next_point<'a>(tokens: &mut impl Iterator<Item = &'a str>) -> Result<Vec2> {
    let mut coord = || -> Result<f32> {
        let token = tokens.next().context("outline command truncated")?;
        token
            .parse::<f32>()
            .with_context(|| format!("bad outline coordinate {token:?}"))
    };
    Ok(Vec2::new(coord()?, coord()?))
}

fn parse_outline(outline: &str) -> Result<Vec<PathCmd>> {
    let mut tokens = outline.split_whitespace();
    let mut commands = Vec::new();

    while let Some(cmd) = tokens.next() {
        match cmd {
            "m" => commands.push(PathCmd::MoveTo(next_point(&mut tokens)?)),
            "l" => commands.push(PathCmd::LineTo(next_point(&mut tokens)?)),
            "q" => {
                let to = next_point(&mut tokens)?;
                let ctrl = next_point(&mut tokens)?;
                commands.push(PathCmd::Quad { to, ctrl });
            }
            "b" => {
                let to = next_point(&mut tokens)?;
                let ctrl1 = next_point(&mut tokens)?;
                let ctrl2 = next_point(&mut tokens)?;
                commands.push(PathCmd::Cubic { to, ctrl1, ctrl2 });
            }
            other => bail!("unknown outline command {other:?}"),
        }
    }

    Ok(commands)
}

/// Turn outline commands into closed polylines in world units
fn flatten(commands: &[PathCmd], scale: f32, curve_segments: u32) -> Vec<Vec<Vec2>> {
    let segments = curve_segments.max(1);
    let mut contours: Vec<Vec<Vec2>> = Vec::new();
    let mut current: Vec<Vec2> = Vec::new();

    let mut close_current = |current: &mut Vec<Vec2>| {
        if current.len() >= 3 {
            // Drop an explicit closing point if present
            if let (Some(&first), Some(&last)) = (current.first(), current.last()) {
                if first.distance_squared(last) < f32::EPSILON {
                    current.pop();
                }
            }
            if current.len() >= 3 {
                contours.push(std::mem::take(current));
                return;
            }
        }
        current.clear();
    };

    for cmd in commands {
        match *cmd {
            PathCmd::MoveTo(p) => {
                close_current(&mut current);
                current.push(p * scale);
            }
            PathCmd::LineTo(p) => current.push(p * scale),
            PathCmd::Quad { to, ctrl } => {
                let from = current.last().copied().unwrap_or(Vec2::ZERO);
                for i in 1..=segments {
                    let t = i as f32 / segments as f32;
                    current.push(quadratic_point(from, ctrl * scale, to * scale, t));
                }
            }
            PathCmd::Cubic { to, ctrl1, ctrl2 } => {
                let from = current.last().copied().unwrap_or(Vec2::ZERO);
                for i in 1..=segments {
                    let t = i as f32 / segments as f32;
                    current.push(cubic_point(from, ctrl1 * scale, ctrl2 * scale, to * scale, t));
                }
            }
        }
    }
    close_current(&mut current);

    contours
}

fn quadratic_point(p0: Vec2, c: Vec2, p1: Vec2, t: f32) -> Vec2 {
    let s = 1.0 - t;
    p0 * (s * s) + c * (2.0 * s * t) + p1 * (t * t)
}

fn cubic_point(p0: Vec2, c1: Vec2, c2: Vec2, p1: Vec2, t: f32) -> Vec2 {
    let s = 1.0 - t;
    p0 * (s * s * s) + c1 * (3.0 * s * s * t) + c2 * (3.0 * s * t * t) + p1 * (t * t * t)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SQUARE_FONT: &str = r#"{
        "familyName": "Test",
        "resolution": 100,
        "ascender": 80,
        "descender": -20,
        "glyphs": {
            "a": { "ha": 120, "o": "m 0 0 l 100 0 l 100 100 l 0 100" },
            "q": { "ha": 100, "o": "m 0 0 q 100 0 50 -50" },
            " ": { "ha": 50, "o": "" },
            "?": { "ha": 100, "o": "m 0 0 l 10 0 l 10 10" }
        }
    }"#;

    fn font() -> Font {
        Font::parse(SQUARE_FONT).unwrap()
    }

    #[test]
    fn parses_descriptor_metadata() {
        let font = font();
        assert_eq!(font.family_name(), "Test");
    }

    #[test]
    fn square_glyph_scales_to_size() {
        let glyph = font().glyph('a', 1.0, 4).unwrap().unwrap();
        assert_eq!(glyph.contours.len(), 1);
        assert_eq!(glyph.contours[0].len(), 4);
        assert_eq!(glyph.contours[0][2], Vec2::new(1.0, 1.0));
        assert_eq!(glyph.advance, 1.2);
    }

    #[test]
    fn quadratic_lists_endpoint_before_control() {
        // "q 100 0 50 -50": end (100,0), control (50,-50)
        let glyph = font().glyph('q', 1.0, 2).unwrap().unwrap();
        let contour = &glyph.contours[0];
        // start, curve midpoint, curve end
        assert_eq!(contour.len(), 3);
        assert_eq!(contour[2], Vec2::new(1.0, 0.0));
        // midpoint of the bezier dips toward the control point
        assert!(contour[1].y < 0.0);
    }

    #[test]
    fn space_advances_without_contours() {
        let glyph = font().glyph(' ', 1.0, 4).unwrap().unwrap();
        assert!(glyph.contours.is_empty());
        assert_eq!(glyph.advance, 0.5);
    }

    #[test]
    fn layout_advances_pen_between_glyphs() {
        let contours = font().layout("aa", 1.0, 4).unwrap();
        assert_eq!(contours.len(), 2);
        // second glyph shifted by the first glyph's advance
        assert_eq!(contours[1][0], Vec2::new(1.2, 0.0));
    }

    #[test]
    fn missing_glyph_falls_back_to_question_mark() {
        let contours = font().layout("z", 1.0, 4).unwrap();
        assert_eq!(contours.len(), 1);
        assert_eq!(contours[0].len(), 3);
    }
}
