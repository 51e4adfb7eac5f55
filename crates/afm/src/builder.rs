use crate::metrics::{FontVariantMetrics, GlyphMetrics};
use crate::tokenizer::{AfmLine, CharMetric, KernPair};
use std::collections::HashMap;

/// Accumulates parsed lines into a [`FontVariantMetrics`].
///
/// Kerning lines name glyphs rather than codes, so the builder remembers
/// which code each glyph name was declared under. That lookup only lives as
/// long as the builder; [`build`](Self::build) drops it.
#[derive(Debug, Default)]
pub struct MetricsBuilder {
    metrics: FontVariantMetrics,
    codes_by_name: HashMap<String, u8>,
}

impl MetricsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(&mut self, line: AfmLine<'_>) {
        match line {
            AfmLine::FontName(name) => self.metrics.name = name.to_string(),
            AfmLine::UnderlinePosition(v) => self.metrics.underline_position = v,
            AfmLine::UnderlineThickness(v) => self.metrics.underline_thickness = v,
            AfmLine::CharMetric(metric) => self.add_glyph(metric),
            AfmLine::KernPair(pair) => self.add_kern_pair(pair),
            AfmLine::Other => {}
        }
    }

    fn add_glyph(&mut self, metric: CharMetric<'_>) {
        let Some(code) = metric.code else {
            log::trace!("Skipping unencoded glyph '{}'", metric.name);
            return;
        };
        self.metrics.glyphs.insert(
            code,
            GlyphMetrics {
                width: metric.width,
                bbox: metric.bbox,
            },
        );
        self.codes_by_name.insert(metric.name.to_string(), code);
    }

    fn add_kern_pair(&mut self, pair: KernPair<'_>) {
        match (
            self.codes_by_name.get(pair.left),
            self.codes_by_name.get(pair.right),
        ) {
            (Some(&left), Some(&right)) => {
                self.metrics
                    .kerning
                    .entry(left)
                    .or_default()
                    .insert(right, pair.adjustment);
            }
            _ => log::trace!(
                "Dropping kerning pair {} {}: glyph not encoded",
                pair.left,
                pair.right
            ),
        }
    }

    pub fn build(self) -> FontVariantMetrics {
        self.metrics
    }
}
