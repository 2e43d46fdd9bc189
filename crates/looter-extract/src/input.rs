//! Target input parsing.
//!
//! Manual entry is one handle or profile link per line; CSV upload expects a
//! header with a `handle` or `link` column. Neither path validates the
//! identifiers themselves — any non-empty trimmed line is accepted.

use crate::error::ExtractError;

/// Parse freeform manual input into an ordered list of identifiers.
///
/// Splits on line boundaries, trims each line, drops empty lines, and strips
/// a single leading `@`. Input order is preserved and duplicates are kept.
#[must_use]
pub fn parse_handles(raw: &str) -> Vec<String> {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| line.strip_prefix('@').unwrap_or(line).trim().to_owned())
        .filter(|handle| !handle.is_empty())
        .collect()
}

/// Parse CSV input into an ordered list of identifiers.
///
/// The first non-empty line is the header. The target column is the first one
/// named `handle`, falling back to `link`, matched case-insensitively. Data
/// rows take that column's cell, strip surrounding quotes and one leading
/// `@`, and skip blanks. Rows shorter than the target column are skipped.
///
/// # Errors
///
/// Returns [`ExtractError::CsvMissingColumn`] when the header has neither a
/// `handle` nor a `link` column. Entirely empty input is not an error: it
/// yields an empty list, and the job runner treats that as a no-op.
pub fn parse_csv_targets(raw: &str) -> Result<Vec<String>, ExtractError> {
    let mut lines = raw.lines().map(str::trim).filter(|line| !line.is_empty());
    let Some(header) = lines.next() else {
        return Ok(Vec::new());
    };

    let columns = split_row(header);
    let target_idx = columns
        .iter()
        .position(|c| c.eq_ignore_ascii_case("handle"))
        .or_else(|| columns.iter().position(|c| c.eq_ignore_ascii_case("link")))
        .ok_or(ExtractError::CsvMissingColumn)?;

    let mut targets = Vec::new();
    for line in lines {
        let fields = split_row(line);
        let Some(cell) = fields.get(target_idx) else {
            continue;
        };
        let cell = cell.strip_prefix('@').unwrap_or(cell).trim();
        if !cell.is_empty() {
            targets.push(cell.to_owned());
        }
    }
    Ok(targets)
}

fn split_row(line: &str) -> Vec<String> {
    line.split(',')
        .map(|field| field.trim().trim_matches('"').trim().to_owned())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_only_input_yields_empty_sequence() {
        assert!(parse_handles("").is_empty());
        assert!(parse_handles("\n\n   \n\t\n").is_empty());
    }

    #[test]
    fn handles_preserve_input_order() {
        let handles = parse_handles("zoe\nalice\nbob");
        assert_eq!(handles, vec!["zoe", "alice", "bob"]);
    }

    #[test]
    fn leading_at_is_stripped_once() {
        assert_eq!(parse_handles("@bob"), vec!["bob"]);
        // Only the leading @ goes; interior ones are part of the identifier.
        assert_eq!(parse_handles("@@double"), vec!["@double"]);
        assert_eq!(parse_handles("user@domain"), vec!["user@domain"]);
    }

    #[test]
    fn whitespace_is_trimmed_around_handles() {
        assert_eq!(parse_handles("  carol  "), vec!["carol"]);
        assert_eq!(parse_handles(" @ dave "), vec!["dave"]);
    }

    #[test]
    fn bare_at_line_is_dropped() {
        assert!(parse_handles("@\n  @  ").is_empty());
    }

    #[test]
    fn duplicates_are_kept() {
        let handles = parse_handles("alice\nalice");
        assert_eq!(handles, vec!["alice", "alice"]);
    }

    #[test]
    fn mixed_input_matches_expected_identifiers() {
        let handles = parse_handles("alice\n@bob\n\n  carol  ");
        assert_eq!(handles, vec!["alice", "bob", "carol"]);
    }

    #[test]
    fn csv_extracts_handle_column() {
        let raw = "name,handle,notes\nAlice,@alice,vip\nBob,bob,\n";
        let targets = parse_csv_targets(raw).unwrap();
        assert_eq!(targets, vec!["alice", "bob"]);
    }

    #[test]
    fn csv_falls_back_to_link_column() {
        let raw = "name,link\nAlice,https://example.com/alice\n";
        let targets = parse_csv_targets(raw).unwrap();
        assert_eq!(targets, vec!["https://example.com/alice"]);
    }

    #[test]
    fn csv_prefers_handle_over_link() {
        let raw = "link,handle\nhttps://example.com/a,alice\n";
        let targets = parse_csv_targets(raw).unwrap();
        assert_eq!(targets, vec!["alice"]);
    }

    #[test]
    fn csv_header_match_is_case_insensitive() {
        let raw = "Name,HANDLE\nAlice,alice\n";
        let targets = parse_csv_targets(raw).unwrap();
        assert_eq!(targets, vec!["alice"]);
    }

    #[test]
    fn csv_without_target_column_is_an_error() {
        let raw = "name,followers\nAlice,120\n";
        let err = parse_csv_targets(raw).unwrap_err();
        assert!(matches!(err, ExtractError::CsvMissingColumn));
    }

    #[test]
    fn csv_empty_input_yields_empty_sequence() {
        assert!(parse_csv_targets("").unwrap().is_empty());
        assert!(parse_csv_targets("\n  \n").unwrap().is_empty());
    }

    #[test]
    fn csv_skips_short_rows_and_blank_cells() {
        let raw = "name,handle\nAlice\nBob,\nCarol,carol\n";
        let targets = parse_csv_targets(raw).unwrap();
        assert_eq!(targets, vec!["carol"]);
    }

    #[test]
    fn csv_strips_quotes_from_cells() {
        let raw = "handle\n\"@alice\"\n\"bob\"\n";
        let targets = parse_csv_targets(raw).unwrap();
        assert_eq!(targets, vec!["alice", "bob"]);
    }
}
