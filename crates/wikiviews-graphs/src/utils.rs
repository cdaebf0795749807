//! Graph utility functions and helpers.

use plotters::style::RGBColor;
use std::ops::Range;

/// Utility functions for graph generation.
pub struct GraphUtils;

impl GraphUtils {
    /// Parses a `#rrggbb` color.
    pub fn parse_color(color: &str) -> Option<RGBColor> {
        let hex = color.strip_prefix('#')?;
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        Some(RGBColor(channel(0)?, channel(2)?, channel(4)?))
    }

    /// Parses a palette, skipping entries that are not `#rrggbb`. Falls back
    /// to black when nothing parses.
    pub fn palette(colors: &[String]) -> Vec<RGBColor> {
        let parsed: Vec<RGBColor> = colors.iter().filter_map(|c| Self::parse_color(c)).collect();
        if parsed.is_empty() {
            vec![RGBColor(0, 0, 0)]
        } else {
            parsed
        }
    }

    /// X range in days for points spanning `0..=span_days`, padded so that
    /// the first and last markers are not clipped.
    #[allow(clippy::cast_precision_loss)]
    pub fn day_range(span_days: i64) -> Range<f64> {
        let span = span_days.max(0) as f64;
        let padding = (span * 0.03).max(3.5);
        -padding..span + padding
    }

    /// Y range starting at zero with 10% headroom above `max`.
    #[allow(clippy::cast_precision_loss)]
    pub fn value_range(max: u64) -> Range<f64> {
        let top = (max as f64 * 1.1).max(1.0);
        0.0..top
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_parsing() {
        assert_eq!(GraphUtils::parse_color("#FF0000"), Some(RGBColor(255, 0, 0)));
        assert_eq!(GraphUtils::parse_color("#636efa"), Some(RGBColor(99, 110, 250)));
        assert_eq!(GraphUtils::parse_color("invalid"), None);
        assert_eq!(GraphUtils::parse_color("#ZZ0000"), None);
        assert_eq!(GraphUtils::parse_color("#ff00"), None);
    }

    #[test]
    fn test_palette_skips_bad_entries() {
        let colors = vec!["#000000".to_string(), "nope".to_string(), "#ffffff".to_string()];
        assert_eq!(
            GraphUtils::palette(&colors),
            vec![RGBColor(0, 0, 0), RGBColor(255, 255, 255)]
        );
        assert_eq!(GraphUtils::palette(&[]), vec![RGBColor(0, 0, 0)]);
    }

    #[test]
    fn test_single_week_gets_padding() {
        let range = GraphUtils::day_range(0);
        assert!(range.start < 0.0 && range.end > 0.0);

        let range = GraphUtils::day_range(700);
        assert!(range.start < 0.0 && range.end > 700.0);
    }

    #[test]
    fn test_value_range_has_headroom() {
        assert_eq!(GraphUtils::value_range(0), 0.0..1.0);
        let range = GraphUtils::value_range(100);
        assert!(range.end > 100.0);
    }
}
