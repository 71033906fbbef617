//! Line-oriented parsing helpers shared by the puzzle parsers.

use anyhow::{Context, anyhow};
use aoc_solver::ParseError;
use std::str::FromStr;

/// Convert any parser-side error into the framework's `ParseError`.
pub fn invalid(err: anyhow::Error) -> ParseError {
    ParseError::InvalidFormat(format!("{:#}", err))
}

/// Parse every line of the trimmed input with `f`.
///
/// Fails on the first bad line, reporting its 1-based number.
pub fn parse_lines<'a, T, F>(input: &'a str, f: F) -> Result<Vec<T>, ParseError>
where
    F: FnMut(&'a str) -> anyhow::Result<T>,
{
    try_parse_lines(input, f).map_err(invalid)
}

/// Like [`parse_lines`] but keeps the `anyhow` error for further context.
pub fn try_parse_lines<'a, T, F>(input: &'a str, mut f: F) -> anyhow::Result<Vec<T>>
where
    F: FnMut(&'a str) -> anyhow::Result<T>,
{
    input
        .trim()
        .lines()
        .enumerate()
        .map(|(idx, line)| f(line).with_context(|| format!("(line {}) {:?}", idx + 1, line)))
        .collect()
}

/// Parse numbers separated by whitespace and/or commas.
pub fn parse_numbers<T>(s: &str) -> anyhow::Result<Vec<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    s.split(|c: char| c.is_whitespace() || c == ',')
        .filter(|tok| !tok.is_empty())
        .map(|tok| tok.parse::<T>().with_context(|| format!("invalid number {:?}", tok)))
        .collect()
}

/// Split `s` once on `sep`, failing with a descriptive error.
pub fn split_once<'a>(s: &'a str, sep: &str) -> anyhow::Result<(&'a str, &'a str)> {
    s.split_once(sep)
        .ok_or_else(|| anyhow!("expected {:?} in {:?}", sep, s))
}

/// Split the trimmed input into blank-line separated sections.
pub fn sections(input: &str) -> Vec<&str> {
    input
        .trim()
        .split("\n\n")
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_lines_reports_line_number() {
        let err = parse_lines("1\n2\nx\n4", |l| Ok(l.parse::<u8>()?)).unwrap_err();
        let ParseError::InvalidFormat(msg) = err else {
            panic!("unexpected error variant");
        };
        assert!(msg.contains("(line 3)"), "{msg}");
    }

    #[test]
    fn test_parse_lines_trims_outer_whitespace() {
        let parsed = parse_lines("\n  7\n8\n\n", |l| Ok(l.trim().parse::<u8>()?)).unwrap();
        assert_eq!(parsed, vec![7, 8]);
    }

    #[test]
    fn test_parse_numbers_mixed_separators() {
        let nums: Vec<i64> = parse_numbers(" 1, -2  3,4 ").unwrap();
        assert_eq!(nums, vec![1, -2, 3, 4]);
        assert!(parse_numbers::<i64>("1 two").is_err());
    }

    #[test]
    fn test_sections() {
        assert_eq!(sections("a\nb\n\nc\n\n\nd\n"), vec!["a\nb", "c", "d"]);
    }
}
