//! Sampling of uploaded CSV data before it is sent to the model.

/// Number of data rows kept after the header.
pub const SAMPLE_ROWS: usize = 10;

/// Returns the header line plus at most [`SAMPLE_ROWS`] following lines,
/// joined with `\n`.
///
/// Carriage returns from CRLF files are stripped. Blank trailing lines are
/// dropped so a file ending in a newline does not produce an empty row.
pub fn sample_csv(text: &str) -> String {
    let lines: Vec<&str> = text
        .split('\n')
        .map(|line| line.trim_end_matches('\r'))
        .take(SAMPLE_ROWS + 1)
        .collect();

    let end = lines
        .iter()
        .rposition(|line| !line.trim().is_empty())
        .map_or(0, |i| i + 1);

    lines[..end].join("\n")
}
