use crate::domain::entities::{LocalPackage, SearchPackage};
use regex::Regex;
use std::sync::LazyLock;

// Winget prints tables as a header line, a full-width dash separator and
// left-aligned fixed-width rows:
//
//   Name             Id               Version  Available  Source
//   ------------------------------------------------------------
//   Mozilla Firefox  Mozilla.Firefox  127.0    128.0.2    winget
//
// Column boundaries are recovered from the header, then every data row is
// sliced at those offsets. Offsets and widths are character counts, not
// bytes; package names are not always ASCII.

static SEPARATOR_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^-+$").unwrap());
static COLUMN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\S+\s*").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnSpan {
    pub start: usize,
    pub width: usize,
}

/// Derive column spans from a header line. Each span covers one header
/// token plus its trailing whitespace, so spans are contiguous and ordered.
pub fn build_scheme(header: &str) -> Vec<ColumnSpan> {
    let mut spans = Vec::new();
    if header.trim().is_empty() {
        return spans;
    }

    let mut offset = 0;
    for column in COLUMN_RE.find_iter(header) {
        let width = column.as_str().chars().count();
        spans.push(ColumnSpan {
            start: offset,
            width,
        });
        offset += width;
    }
    spans
}

/// Parse `winget search` output. Returns an empty list for anything that
/// does not look like a search table; parsing never fails.
pub fn parse_search_output(output: &str) -> Vec<SearchPackage> {
    let mut packages = Vec::new();
    let lines = table_lines(output);
    let Some(separator) = find_separator(&lines) else {
        return packages;
    };

    let scheme = build_scheme(lines[separator - 1]);
    if scheme.len() <= 3 {
        return packages;
    }
    let min_width = row_width(&scheme);

    for line in &lines[separator + 1..] {
        let Some(row) = pad_row(line, min_width) else {
            continue;
        };
        // A fifth column means the table carries a "Match" column between
        // version and source; the source then lives one column further out.
        let source_span = if scheme.len() > 4 {
            scheme[4]
        } else {
            scheme[3]
        };
        packages.push(SearchPackage::new(
            slice_field(&row, scheme[0]),
            slice_field(&row, scheme[1]),
            slice_field(&row, scheme[2]),
            slice_field(&row, widened(source_span)),
        ));
    }

    packages
}

/// Parse `winget list` output. The last line is a summary footer and is
/// never treated as a data row.
pub fn parse_local_output(output: &str) -> Vec<LocalPackage> {
    let mut packages = Vec::new();
    let lines = table_lines(output);
    let Some(separator) = find_separator(&lines) else {
        return packages;
    };

    let scheme = build_scheme(lines[separator - 1]);
    if scheme.len() <= 4 {
        return packages;
    }
    let min_width = row_width(&scheme);

    // Everything between the separator and the trailing summary footer.
    let Some(rows) = lines.get(separator + 1..lines.len() - 1) else {
        return packages;
    };
    for line in rows {
        let Some(row) = pad_row(line, min_width) else {
            continue;
        };
        packages.push(LocalPackage {
            name: slice_field(&row, scheme[0]),
            id: slice_field(&row, scheme[1]),
            version: slice_field(&row, scheme[2]),
            available: slice_field(&row, scheme[3]),
            source: slice_field(&row, widened(scheme[4])),
        });
    }

    packages
}

fn table_lines(output: &str) -> Vec<&str> {
    output
        .split(['\r', '\n'])
        .filter(|line| !line.is_empty())
        .collect()
}

/// Index of the first all-dash separator line, if it has a header above it.
fn find_separator(lines: &[&str]) -> Option<usize> {
    let index = lines.iter().position(|line| SEPARATOR_RE.is_match(line))?;
    if index == 0 { None } else { Some(index) }
}

fn row_width(scheme: &[ColumnSpan]) -> usize {
    scheme.last().map(|span| span.start + span.width).unwrap_or(0)
}

/// The last column gets one extra character so that a row exactly as wide
/// as the table still yields its full source field after padding.
fn widened(span: ColumnSpan) -> ColumnSpan {
    ColumnSpan {
        start: span.start,
        width: span.width + 1,
    }
}

/// Rows narrower than the table are wrapped continuation text, not records.
/// Accepted rows get a single trailing space before slicing.
fn pad_row(line: &str, min_width: usize) -> Option<Vec<char>> {
    let mut chars: Vec<char> = line.chars().collect();
    if chars.len() < min_width {
        return None;
    }
    chars.push(' ');
    Some(chars)
}

fn slice_field(row: &[char], span: ColumnSpan) -> String {
    row.iter()
        .skip(span.start)
        .take(span.width)
        .collect::<String>()
        .trim()
        .to_string()
}
