// this_file: crates/glyphpack-core/src/charset.rs

//! Which code points to import
//!
//! Charsets are written as comma-separated hex ranges, each end optionally
//! prefixed with `U+`: `20-7E,U+00A0-U+00FF,20AC`.

use crate::{
    error::{ConfigError, Result},
    types::CodePoint,
};

/// Latin-1, Latin Extended-A and the punctuation and symbols Latin text
/// commonly needs
pub const DEFAULT_CHARSET: &str = "21-17F,3A9,3BC,3C0,2013-2014,20AC,20BF,2018-2022,2026,2030,\
2039-203A,2044,2122,2152,2202,2206,221A,221E,2248,2260,2264-2265,FB01-FB02";

const MAX_CODE_POINT: CodePoint = 0x10FFFF;

/// Parses a comma-separated charset specification
pub fn parse_charset_spec(spec: &str) -> Result<Vec<CodePoint>> {
    let items: Vec<&str> = spec.split(',').collect();
    parse_charset(&items)
}

/// Expands range items into code points, keeping the given order
pub fn parse_charset<S: AsRef<str>>(items: &[S]) -> Result<Vec<CodePoint>> {
    let mut code_points = Vec::new();
    for item in items {
        let item = item.as_ref().trim();
        let (start, end) = parse_range(item)?;
        code_points.extend(start..=end);
    }
    Ok(code_points)
}

fn parse_range(item: &str) -> Result<(CodePoint, CodePoint)> {
    let invalid = || ConfigError::InvalidCharsetRange(item.to_string());

    let (start, end) = match item.split_once('-') {
        Some((start, end)) => (
            parse_hex(start).ok_or_else(invalid)?,
            parse_hex(end).ok_or_else(invalid)?,
        ),
        None => {
            let single = parse_hex(item).ok_or_else(invalid)?;
            (single, single)
        },
    };

    if start > end || end > MAX_CODE_POINT {
        return Err(invalid().into());
    }
    Ok((start, end))
}

fn parse_hex(s: &str) -> Option<CodePoint> {
    let digits = s
        .strip_prefix("U+")
        .or_else(|| s.strip_prefix("u+"))
        .unwrap_or(s);
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    CodePoint::from_str_radix(digits, 16).ok()
}

/// Code points that never get a glyph: the renderer advances over them
pub fn is_whitespace(code_point: CodePoint) -> bool {
    matches!(
        code_point,
        0x0009..=0x000D
            | 0x0020
            | 0x00A0
            | 0x00AD
            | 0x1680
            | 0x180E
            | 0x2000..=0x200B
            | 0x2028
            | 0x2029
            | 0x205F
            | 0x3000
            | 0xFEFF
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_and_range() {
        let cps = parse_charset_spec("41-43,U+2026").unwrap();
        assert_eq!(cps, vec![0x41, 0x42, 0x43, 0x2026]);
    }

    #[test]
    fn test_prefixed_range_ends() {
        let cps = parse_charset(&["u+30-U+32"]).unwrap();
        assert_eq!(cps, vec![0x30, 0x31, 0x32]);
    }

    #[test]
    fn test_default_charset_parses() {
        let cps = parse_charset_spec(DEFAULT_CHARSET).unwrap();
        assert_eq!(cps[0], 0x21);
        assert!(cps.contains(&0x20AC));
        assert_eq!(*cps.last().unwrap(), 0xFB02);
    }

    #[test]
    fn test_invalid_items() {
        assert!(parse_charset_spec("").is_err());
        assert!(parse_charset_spec("xyz").is_err());
        assert!(parse_charset_spec("50-40").is_err());
        assert!(parse_charset_spec("41-").is_err());
        assert!(parse_charset_spec("110000").is_err());
    }

    #[test]
    fn test_whitespace() {
        assert!(is_whitespace(' ' as u32));
        assert!(is_whitespace(0x2003));
        assert!(is_whitespace(0xFEFF));
        assert!(!is_whitespace('a' as u32));
        assert!(!is_whitespace(0x2026));
    }
}
