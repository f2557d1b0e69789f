//! Resolved cell styles.
//!
//! Styles arrive from the editor as strings of the form
//! `swimlane;horizontal=0;startSize=23`: bare entries name a stylesheet
//! style, `key=value` entries override individual keys.

use indexmap::IndexMap;
use nom::{
    bytes::complete::take_till,
    character::complete::char,
    combinator::{all_consuming, opt},
    multi::separated_list0,
    sequence::{pair, preceded},
    IResult,
};

use crate::errors::StyleError;

pub const STROKE_WIDTH: &str = "strokeWidth";
pub const HORIZONTAL: &str = "horizontal";
pub const START_SIZE: &str = "startSize";
pub const SHAPE: &str = "shape";
pub const SHAPE_SWIMLANE: &str = "swimlane";

/// Header size used by swimlanes that do not set `startSize`.
pub const DEFAULT_START_SIZE: f64 = 40.0;
/// Stroke width used by cells that do not set `strokeWidth`.
pub const DEFAULT_STROKE_WIDTH: f64 = 1.0;

/// Key/value style of a single cell, in declaration order.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellStyle {
    names: Vec<String>,
    values: IndexMap<String, String>,
}

impl CellStyle {
    /// Create an empty style.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a style string. Empty entries are skipped; later keys win.
    pub fn parse(input: &str) -> Result<Self, StyleError> {
        let (_, entries) = style_entries(input).map_err(|_| StyleError::InvalidEntry {
            entry: input.to_string(),
            offset: 0,
        })?;

        let mut style = CellStyle::new();
        for (key, value) in entries {
            let key_trimmed = key.trim();
            match value {
                Some(value) if key_trimmed.is_empty() => {
                    return Err(StyleError::InvalidEntry {
                        entry: format!("={}", value),
                        offset: offset_in(input, key),
                    });
                }
                Some(value) => {
                    style.values.insert(key_trimmed.to_string(), value.trim().to_string());
                }
                None if key_trimmed.is_empty() => {}
                None => style.names.push(key_trimmed.to_string()),
            }
        }

        Ok(style)
    }

    /// Set a key, returning the style.
    pub fn with(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.set(key, value);
        self
    }

    /// Add a named stylesheet entry, returning the style.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.names.push(name.into());
        self
    }

    /// Set a key.
    pub fn set(&mut self, key: impl Into<String>, value: impl ToString) {
        self.values.insert(key.into(), value.to_string());
    }

    /// Raw value of a key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Named stylesheet entries.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Numeric value of a key, or `default` when absent or not a number.
    pub fn get_number(&self, key: &str, default: f64) -> f64 {
        self.get(key)
            .and_then(|v| v.parse::<f64>().ok())
            .filter(|v| v.is_finite())
            .unwrap_or(default)
    }

    /// Boolean value of a key (`1`/`true`, `0`/`false`), or `default`.
    pub fn get_bool(&self, key: &str, default: bool) -> bool {
        match self.get(key) {
            Some("1") | Some("true") => true,
            Some("0") | Some("false") => false,
            _ => default,
        }
    }

    pub fn stroke_width(&self) -> f64 {
        self.get_number(STROKE_WIDTH, DEFAULT_STROKE_WIDTH)
    }

    /// Whether the cell draws a swimlane header.
    pub fn is_swimlane(&self) -> bool {
        self.get(SHAPE) == Some(SHAPE_SWIMLANE)
            || self.names.first().map(String::as_str) == Some(SHAPE_SWIMLANE)
    }

    /// Whether the header band runs along the top edge (as opposed to the left).
    pub fn is_horizontal(&self) -> bool {
        self.get_bool(HORIZONTAL, true)
    }

    /// Size of the swimlane header band.
    pub fn start_size(&self) -> f64 {
        self.get_number(START_SIZE, DEFAULT_START_SIZE)
    }
}

fn style_entry(input: &str) -> IResult<&str, (&str, Option<&str>)> {
    pair(
        take_till(|c| c == '=' || c == ';'),
        opt(preceded(char('='), take_till(|c| c == ';'))),
    )(input)
}

fn style_entries(input: &str) -> IResult<&str, Vec<(&str, Option<&str>)>> {
    all_consuming(separated_list0(char(';'), style_entry))(input)
}

fn offset_in(input: &str, slice: &str) -> usize {
    (slice.as_ptr() as usize).saturating_sub(input.as_ptr() as usize)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_style_string() {
        let style = CellStyle::parse("swimlane;horizontal=0;startSize=23;").unwrap();
        assert_eq!(style.names(), &["swimlane".to_string()]);
        assert_eq!(style.get(HORIZONTAL), Some("0"));
        assert!(style.is_swimlane());
        assert!(!style.is_horizontal());
        assert!((style.start_size() - 23.0).abs() < 0.001);
    }

    #[test]
    fn test_defaults() {
        let style = CellStyle::parse("").unwrap();
        assert!(!style.is_swimlane());
        assert!(style.is_horizontal());
        assert!((style.stroke_width() - DEFAULT_STROKE_WIDTH).abs() < 0.001);
        assert!((style.start_size() - DEFAULT_START_SIZE).abs() < 0.001);
    }

    #[test]
    fn test_shape_key_marks_swimlane() {
        let style = CellStyle::parse("rounded=1;shape=swimlane").unwrap();
        assert!(style.is_swimlane());
        assert!(style.get_bool("rounded", false));
    }

    #[test]
    fn test_later_keys_win() {
        let style = CellStyle::parse("strokeWidth=2;strokeWidth=5").unwrap();
        assert!((style.stroke_width() - 5.0).abs() < 0.001);
    }

    #[test]
    fn test_unparseable_number_falls_back() {
        let style = CellStyle::new().with(STROKE_WIDTH, "thick");
        assert!((style.stroke_width() - DEFAULT_STROKE_WIDTH).abs() < 0.001);
    }

    #[test]
    fn test_missing_key_is_error() {
        let err = CellStyle::parse("rounded=1;=3").unwrap_err();
        assert_eq!(
            err,
            StyleError::InvalidEntry {
                entry: "=3".to_string(),
                offset: 10,
            }
        );
    }
}
