//! The finished, read-only metrics of one font variant.

use quire_types::BoundingBox;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// AFM metrics are expressed in thousandths of the em square.
pub const UNITS_PER_EM: f32 = 1000.0;

/// Width and ink box of one encoded glyph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlyphMetrics {
    pub width: i32,
    pub bbox: BoundingBox,
}

/// Glyph and kerning data for one font variant (e.g. `Times-Bold`).
///
/// Built by [`MetricsBuilder`](crate::MetricsBuilder) and immutable
/// afterwards, so a loaded table can be shared freely behind an `Arc`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FontVariantMetrics {
    pub(crate) name: String,
    pub(crate) underline_position: i32,
    pub(crate) underline_thickness: i32,
    pub(crate) glyphs: HashMap<u8, GlyphMetrics>,
    /// left code -> right code -> adjustment
    pub(crate) kerning: HashMap<u8, HashMap<u8, i32>>,
}

impl FontVariantMetrics {
    /// The PostScript name declared by `FontName`; empty if none was given.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn underline_position(&self) -> i32 {
        self.underline_position
    }

    pub fn underline_thickness(&self) -> i32 {
        self.underline_thickness
    }

    pub fn glyph(&self, code: u8) -> Option<&GlyphMetrics> {
        self.glyphs.get(&code)
    }

    pub fn contains(&self, code: u8) -> bool {
        self.glyphs.contains_key(&code)
    }

    /// Advance width of `code`, or 0 if the font has no glyph for it.
    pub fn width_of(&self, code: u8) -> i32 {
        self.glyphs.get(&code).map_or(0, |g| g.width)
    }

    pub fn bounding_box(&self, code: u8) -> Option<BoundingBox> {
        self.glyphs.get(&code).map(|g| g.bbox)
    }

    /// Kerning applied between `left` followed by `right`; 0 when the pair
    /// was not declared. Pairs are directional.
    pub fn kerning_between(&self, left: u8, right: u8) -> i32 {
        self.kerning
            .get(&left)
            .and_then(|row| row.get(&right))
            .copied()
            .unwrap_or(0)
    }

    pub fn glyph_count(&self) -> usize {
        self.glyphs.len()
    }

    pub fn kerning_pair_count(&self) -> usize {
        self.kerning.values().map(HashMap::len).sum()
    }

    /// Iterates encoded glyphs in code order.
    pub fn glyphs(&self) -> impl Iterator<Item = (u8, &GlyphMetrics)> {
        let mut codes: Vec<u8> = self.glyphs.keys().copied().collect();
        codes.sort_unstable();
        codes.into_iter().filter_map(|c| self.glyphs.get(&c).map(|g| (c, g)))
    }

    /// Advance of `text` in design units: the sum of glyph widths plus the
    /// kerning between each adjacent pair.
    pub fn text_width(&self, text: &[u8]) -> i64 {
        let advances: i64 = text.iter().map(|&c| i64::from(self.width_of(c))).sum();
        let kerning: i64 = text
            .windows(2)
            .map(|pair| i64::from(self.kerning_between(pair[0], pair[1])))
            .sum();
        advances + kerning
    }

    /// [`text_width`](Self::text_width) scaled to points at `font_size`.
    pub fn text_width_pt(&self, text: &[u8], font_size: f32) -> f32 {
        scale(self.text_width(text) as f32, font_size)
    }

    pub fn underline_position_pt(&self, font_size: f32) -> f32 {
        scale(self.underline_position as f32, font_size)
    }

    pub fn underline_thickness_pt(&self, font_size: f32) -> f32 {
        scale(self.underline_thickness as f32, font_size)
    }
}

fn scale(units: f32, font_size: f32) -> f32 {
    units * font_size / UNITS_PER_EM
}

/// Maps `text` onto the single-byte codes used by the standard fonts.
/// Characters above U+00FF have no code and become `?`.
pub fn encode_latin1(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| u8::try_from(u32::from(c)).unwrap_or(b'?'))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> FontVariantMetrics {
        let mut m = FontVariantMetrics {
            name: "Sample".to_string(),
            underline_position: -100,
            underline_thickness: 50,
            ..Default::default()
        };
        m.glyphs.insert(b'A', GlyphMetrics { width: 600, bbox: BoundingBox::new(10, 0, 590, 700) });
        m.glyphs.insert(b'V', GlyphMetrics { width: 700, bbox: BoundingBox::new(0, 0, 700, 700) });
        m.glyphs.insert(b' ', GlyphMetrics { width: 250, bbox: BoundingBox::default() });
        m.kerning.entry(b'A').or_default().insert(b'V', -80);
        m
    }

    #[test]
    fn test_lookups() {
        let m = sample();
        assert_eq!(m.width_of(b'A'), 600);
        assert_eq!(m.width_of(b'Z'), 0);
        assert_eq!(m.bounding_box(b'A'), Some(BoundingBox::new(10, 0, 590, 700)));
        assert_eq!(m.bounding_box(b'Z'), None);
        assert!(m.contains(b' '));
        assert_eq!(m.glyph_count(), 3);
        assert_eq!(m.kerning_pair_count(), 1);
    }

    #[test]
    fn test_kerning_is_directional() {
        let m = sample();
        assert_eq!(m.kerning_between(b'A', b'V'), -80);
        assert_eq!(m.kerning_between(b'V', b'A'), 0);
    }

    #[test]
    fn test_text_width_applies_kerning() {
        let m = sample();
        assert_eq!(m.text_width(b""), 0);
        assert_eq!(m.text_width(b"A"), 600);
        assert_eq!(m.text_width(b"AV"), 600 + 700 - 80);
        assert_eq!(m.text_width(b"VA"), 1300);
        assert_eq!(m.text_width(b"A V"), 600 + 250 + 700);
    }

    #[test]
    fn test_point_scaling() {
        let m = sample();
        assert!((m.text_width_pt(b"A", 10.0) - 6.0).abs() < f32::EPSILON);
        assert!((m.underline_position_pt(12.0) + 1.2).abs() < 1e-6);
        assert!((m.underline_thickness_pt(12.0) - 0.6).abs() < 1e-6);
    }

    #[test]
    fn test_glyphs_iterate_in_code_order() {
        let m = sample();
        let codes: Vec<u8> = m.glyphs().map(|(c, _)| c).collect();
        assert_eq!(codes, vec![b' ', b'A', b'V']);
    }

    #[test]
    fn test_encode_latin1() {
        assert_eq!(encode_latin1("AV"), b"AV".to_vec());
        assert_eq!(encode_latin1("é"), vec![0xE9]);
        assert_eq!(encode_latin1("€"), vec![b'?']);
    }

    #[test]
    fn test_json_cache_round_trip() {
        let m = sample();
        let json = serde_json::to_string(&m).unwrap();
        let back: FontVariantMetrics = serde_json::from_str(&json).unwrap();
        assert_eq!(back, m);
        assert_eq!(back.kerning_between(b'A', b'V'), -80);
    }
}
