//! Line classification for AFM text.
//!
//! Only the handful of keys needed for width, bounding-box and kerning
//! lookups are understood. Every other line comes back as
//! [`AfmLine::Other`] without being inspected further, so unusual header or
//! composite sections never cause a failure.

use crate::error::LineError;
use quire_types::BoundingBox;

/// Character code that marks a glyph with no position in the encoding.
const UNENCODED: i32 = -1;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AfmLine<'a> {
    FontName(&'a str),
    UnderlinePosition(i32),
    UnderlineThickness(i32),
    CharMetric(CharMetric<'a>),
    KernPair(KernPair<'a>),
    Other,
}

/// A `C` line: `C 65 ; WX 600 ; N A ; B 10 0 590 700 ;`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharMetric<'a> {
    /// `None` for glyphs declared with code `-1`.
    pub code: Option<u8>,
    pub width: i32,
    pub name: &'a str,
    pub bbox: BoundingBox,
}

impl AfmLine<'_> {
    /// The keyword of a line kind that has no closing delimiter, so a copy
    /// cut short inside its last token still parses. `None` for `C` lines,
    /// which end with `;`, and for lines that are never inspected.
    pub fn open_ended_keyword(&self) -> Option<&'static str> {
        match self {
            AfmLine::FontName(_) => Some("FontName"),
            AfmLine::UnderlinePosition(_) => Some("UnderlinePosition"),
            AfmLine::UnderlineThickness(_) => Some("UnderlineThickness"),
            AfmLine::KernPair(_) => Some("KPX"),
            AfmLine::CharMetric(_) | AfmLine::Other => None,
        }
    }
}

/// A `KPX` line: `KPX A V -80`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KernPair<'a> {
    pub left: &'a str,
    pub right: &'a str,
    pub adjustment: i32,
}

/// Classifies one line of an AFM description, validating the shape of
/// every line kind it recognizes.
pub fn parse_line(line: &str) -> Result<AfmLine<'_>, LineError> {
    let mut tokens = line.split_whitespace();
    let Some(keyword) = tokens.next() else {
        return Ok(AfmLine::Other);
    };

    match keyword {
        "FontName" => {
            let [name] = exact_args::<1>("FontName", tokens)?;
            Ok(AfmLine::FontName(name))
        }
        "UnderlinePosition" => {
            let [value] = exact_args::<1>("UnderlinePosition", tokens)?;
            Ok(AfmLine::UnderlinePosition(parse_int("UnderlinePosition", value)?))
        }
        "UnderlineThickness" => {
            let [value] = exact_args::<1>("UnderlineThickness", tokens)?;
            Ok(AfmLine::UnderlineThickness(parse_int("UnderlineThickness", value)?))
        }
        "C" => parse_char_metric(line).map(AfmLine::CharMetric),
        "KPX" => {
            let [left, right, adjustment] = exact_args::<3>("KPX", tokens)?;
            Ok(AfmLine::KernPair(KernPair {
                left,
                right,
                adjustment: parse_int("KPX adjustment", adjustment)?,
            }))
        }
        _ => Ok(AfmLine::Other),
    }
}

/// Splits a `C` line into its `;`-separated fields and picks out the ones
/// layout needs. Fields other than `C`, `WX`, `N` and `B` are ignored.
///
/// Every field is closed by `;`, so a line whose last field is not closed
/// was cut short, even if all required fields parsed.
fn parse_char_metric(line: &str) -> Result<CharMetric<'_>, LineError> {
    let mut code = None;
    let mut width = None;
    let mut name = None;
    let mut bbox = None;

    for field in line.split(';') {
        let mut tokens = field.split_whitespace();
        let Some(key) = tokens.next() else {
            continue;
        };
        match key {
            "C" => {
                let [value] = exact_args::<1>("C", tokens)?;
                code = Some(parse_code(value)?);
            }
            "WX" => {
                let [value] = exact_args::<1>("WX", tokens)?;
                width = Some(parse_int("WX", value)?);
            }
            "N" => {
                let [value] = exact_args::<1>("N", tokens)?;
                name = Some(value);
            }
            "B" => {
                let [l, b, r, t] = exact_args::<4>("B", tokens)?;
                bbox = Some(BoundingBox::new(
                    parse_int("B", l)?,
                    parse_int("B", b)?,
                    parse_int("B", r)?,
                    parse_int("B", t)?,
                ));
            }
            _ => {}
        }
    }

    let metric = CharMetric {
        code: code.ok_or(missing("C"))?,
        width: width.ok_or(missing("WX"))?,
        name: name.ok_or(missing("N"))?,
        bbox: bbox.ok_or(missing("B"))?,
    };
    if !line.trim_end().ends_with(';') {
        return Err(LineError::Unterminated { keyword: "C" });
    }
    Ok(metric)
}

fn missing(field: &'static str) -> LineError {
    LineError::MissingField {
        keyword: "C",
        field,
    }
}

fn exact_args<'a, const N: usize>(
    keyword: &'static str,
    tokens: impl Iterator<Item = &'a str>,
) -> Result<[&'a str; N], LineError> {
    let args: Vec<&str> = tokens.collect();
    let found = args.len();
    args.try_into().map_err(|_| LineError::Arity {
        keyword,
        expected: N,
        found,
    })
}

fn parse_int(field: &'static str, token: &str) -> Result<i32, LineError> {
    token.parse().map_err(|_| LineError::InvalidInteger {
        field,
        token: token.to_string(),
    })
}

fn parse_code(token: &str) -> Result<Option<u8>, LineError> {
    match parse_int("C", token)? {
        UNENCODED => Ok(None),
        code => u8::try_from(code)
            .map(Some)
            .map_err(|_| LineError::CodeOutOfRange(code)),
    }
}
