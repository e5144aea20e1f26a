//! Output formatting for query results and diagnostics

use crate::query::PositionSet;
use crate::utils::printable;
use serde::Serialize;
use std::io::{self, Write};
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

/// How positions are printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// One offset per line
    #[default]
    Plain,
    /// A single JSON object
    Json,
}

#[derive(Serialize)]
struct JsonResult<'a> {
    query_len: usize,
    count: usize,
    positions: &'a PositionSet,
}

/// Write `positions` in the requested format
pub fn write_positions<W: Write>(
    out: &mut W,
    positions: &PositionSet,
    query_len: usize,
    format: OutputFormat,
) -> io::Result<()> {
    match format {
        OutputFormat::Plain => {
            for p in positions {
                writeln!(out, "{}", p)?;
            }
        }
        OutputFormat::Json => {
            let result = JsonResult {
                query_len,
                count: positions.len(),
                positions,
            };
            serde_json::to_writer(&mut *out, &result)?;
            writeln!(out)?;
        }
    }
    Ok(())
}

/// Print each position followed by its window, highlighting bytes that
/// differ from `query`
pub fn write_windows<W: WriteColor>(
    out: &mut W,
    positions: &PositionSet,
    reference: &[u8],
    query: &[u8],
) -> io::Result<()> {
    let width = reference.len().to_string().len();
    for &p in positions {
        let Some(window) = reference.get(p..p + query.len()) else {
            continue;
        };

        out.set_color(ColorSpec::new().set_fg(Some(Color::Green)))?;
        write!(out, "{:>width$}", p, width = width)?;
        out.reset()?;
        write!(out, ":")?;

        for (i, (&w, &q)) in window.iter().zip(query).enumerate() {
            let rendered = printable(&[w]);
            if w != q {
                out.set_color(ColorSpec::new().set_fg(Some(Color::Red)).set_bold(true))?;
                write!(out, "{}", rendered)?;
                out.reset()?;
            } else {
                write!(out, "{}", rendered)?;
            }
            // Block boundaries
            if (i + 1) % (query.len() / 4).max(1) == 0 && i + 1 < query.len() {
                write!(out, " ")?;
            }
        }
        writeln!(out)?;
    }
    Ok(())
}

/// Print positions to stdout
pub fn print_positions(positions: &PositionSet, query_len: usize, format: OutputFormat) -> io::Result<()> {
    let stdout = io::stdout();
    let mut lock = io::BufWriter::new(stdout.lock());
    write_positions(&mut lock, positions, query_len, format)?;
    lock.flush()
}

/// Print positions with their windows to stdout
pub fn print_windows(
    positions: &PositionSet,
    reference: &[u8],
    query: &[u8],
    color: ColorChoice,
) -> io::Result<()> {
    let mut stdout = StandardStream::stdout(color);
    write_windows(&mut stdout, positions, reference, query)
}

/// Print an error with a colored `error:` label to stderr
pub fn print_error(message: &dyn std::fmt::Display, color: ColorChoice) {
    let mut stderr = StandardStream::stderr(color);
    let _ = stderr.set_color(ColorSpec::new().set_fg(Some(Color::Red)).set_bold(true));
    let _ = write!(stderr, "error");
    let _ = stderr.reset();
    let _ = writeln!(stderr, ": {}", message);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::ResultMerger;
    use termcolor::NoColor;

    #[test]
    fn test_plain_one_per_line() {
        let set = ResultMerger::merge(vec![16, 0]);
        let mut out = Vec::new();
        write_positions(&mut out, &set, 16, OutputFormat::Plain).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "0\n16\n");
    }

    #[test]
    fn test_plain_empty_prints_nothing() {
        let mut out = Vec::new();
        write_positions(&mut out, &PositionSet::default(), 16, OutputFormat::Plain).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn test_json() {
        let set = ResultMerger::merge(vec![16, 0]);
        let mut out = Vec::new();
        write_positions(&mut out, &set, 16, OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["query_len"], 16);
        assert_eq!(value["count"], 2);
        assert_eq!(value["positions"], serde_json::json!([0, 16]));
    }

    #[test]
    fn test_windows_render() {
        let set = ResultMerger::merge(vec![0]);
        let mut out = NoColor::new(Vec::new());
        write_windows(&mut out, &set, b"AAAABBBBCCCCDDDD", b"AAAABBXXCCCCDDDD").unwrap();
        let text = String::from_utf8(out.into_inner()).unwrap();
        assert_eq!(text, " 0:AAAA BBBB CCCC DDDD\n");
    }

    #[test]
    fn test_windows_skip_out_of_range() {
        let set = ResultMerger::merge(vec![10]);
        let mut out = NoColor::new(Vec::new());
        write_windows(&mut out, &set, b"AAAABBBB", b"AAAA").unwrap();
        assert!(out.into_inner().is_empty());
    }
}
