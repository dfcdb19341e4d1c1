//! Text codec for persisted blacklists
//!
//! One entry per line, `<hex digest>\t<prefix length>\n`, longest prefix
//! first. The descending order makes the file resemble a hash-keyed MRU list
//! rather than a sorted blacklist.
//!
//! On read, fields may be separated by any whitespace, surrounding
//! whitespace is ignored, and blank lines and `#` comments are skipped.
//! Comments do not survive a load/save cycle.

use super::digest::PrefixDigest;
use super::entry::BlacklistEntry;
use crate::error::FormatError;

const COMMENT_MARKER: char = '#';

/// Parse persisted content into sorted, deduplicated entries
///
/// Any malformed line rejects the whole input.
pub fn parse(text: &str) -> Result<Vec<BlacklistEntry>, FormatError> {
    let mut entries = Vec::new();

    for (index, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with(COMMENT_MARKER) {
            continue;
        }
        entries.push(parse_line(line).map_err(|e| e.at_line(index + 1))?);
    }

    entries.sort_unstable();
    entries.dedup();
    Ok(entries)
}

/// Parse raw bytes, rejecting content that is not UTF-8
pub fn parse_bytes(bytes: &[u8]) -> Result<Vec<BlacklistEntry>, FormatError> {
    let text = std::str::from_utf8(bytes).map_err(|_| FormatError::InvalidUtf8)?;
    parse(text)
}

fn parse_line(line: &str) -> Result<BlacklistEntry, FormatError> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    let [digest, prefix_len] = fields.as_slice() else {
        return Err(FormatError::FieldCount {
            line: 0,
            found: fields.len(),
        });
    };

    let digest = PrefixDigest::from_hex(digest)?;
    let prefix_len = prefix_len
        .parse::<usize>()
        .map_err(|_| FormatError::InvalidLength {
            line: 0,
            value: prefix_len.to_string(),
        })?;

    Ok(BlacklistEntry::new(prefix_len, digest))
}

/// Render entries in descending `(prefix_len, digest)` order
pub fn render<'a, I>(entries: I) -> String
where
    I: IntoIterator<Item = &'a BlacklistEntry>,
{
    let mut sorted: Vec<&BlacklistEntry> = entries.into_iter().collect();
    sorted.sort_unstable_by(|a, b| b.cmp(a));

    let mut out = String::with_capacity(sorted.len() * 48);
    for entry in sorted {
        out.push_str(&entry.digest().to_hex());
        out.push('\t');
        out.push_str(&entry.prefix_len().to_string());
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const BIN_SH: &str = "765e4c4a771b301deb2c65918ce0e599cf7049e8";

    #[test]
    fn test_parse_well_formed_line() {
        let entries = parse(&format!("{BIN_SH}\t14\n")).unwrap();
        assert_eq!(entries, vec![BlacklistEntry::from_prefix("file:///bin/sh")]);
    }

    #[test]
    fn test_parse_accepts_spaces_and_surrounding_whitespace() {
        let entries = parse(&format!("   {BIN_SH}   14  \r\n")).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].prefix_len(), 14);
    }

    #[test]
    fn test_parse_skips_comments_and_blank_lines() {
        let text = format!("# visit counts\n\n   \n  # indented comment\n{BIN_SH}\t14\n");
        assert_eq!(parse(&text).unwrap().len(), 1);
    }

    #[test]
    fn test_parse_empty_input() {
        assert!(parse("").unwrap().is_empty());
    }

    #[test]
    fn test_parse_deduplicates_and_sorts() {
        let text = format!("{BIN_SH}\t14\n{}\t1\n{BIN_SH}\t14\n", "a".repeat(40));
        let entries = parse(&text).unwrap();

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].prefix_len(), 1);
        assert_eq!(entries[1].prefix_len(), 14);
    }

    #[test]
    fn test_parse_keeps_same_digest_with_different_lengths() {
        let text = format!("{BIN_SH}\t14\n{BIN_SH}\t20\n");
        assert_eq!(parse(&text).unwrap().len(), 2);
    }

    #[test]
    fn test_parse_rejects_short_digest() {
        let text = format!("{}\t14\n", &BIN_SH[..39]);
        assert_eq!(
            parse(&text),
            Err(FormatError::DigestWidth {
                line: 1,
                expected: 40,
                found: 39
            })
        );
    }

    #[test]
    fn test_parse_rejects_non_integer_length() {
        let text = format!("{BIN_SH}\t14\n{BIN_SH} a\n");
        assert_eq!(
            parse(&text),
            Err(FormatError::InvalidLength {
                line: 2,
                value: "a".to_string()
            })
        );
    }

    #[test]
    fn test_parse_rejects_negative_length() {
        assert!(matches!(
            parse(&format!("{BIN_SH}\t-1\n")),
            Err(FormatError::InvalidLength { .. })
        ));
    }

    #[test]
    fn test_parse_rejects_wrong_field_count() {
        assert_eq!(
            parse(&format!("{BIN_SH}\n")),
            Err(FormatError::FieldCount { line: 1, found: 1 })
        );
        assert_eq!(
            parse(&format!("{BIN_SH} 14 1\n")),
            Err(FormatError::FieldCount { line: 1, found: 3 })
        );
    }

    #[test]
    fn test_parse_bytes_rejects_invalid_utf8() {
        assert_eq!(
            parse_bytes(&[0xff, 0xfe, b'\n']),
            Err(FormatError::InvalidUtf8)
        );
    }

    #[test]
    fn test_render_descending_without_comments() {
        let entries = [
            BlacklistEntry::from_prefix("a"),
            BlacklistEntry::from_prefix("ccc"),
            BlacklistEntry::from_prefix("bb"),
        ];
        let text = render(&entries);
        let lengths: Vec<&str> = text
            .lines()
            .map(|line| line.split('\t').nth(1).unwrap())
            .collect();

        assert_eq!(lengths, vec!["3", "2", "1"]);
        assert!(text.ends_with('\n'));
        assert!(!text.contains('#'));
    }

    #[test]
    fn test_render_line_layout() {
        let text = render(&[BlacklistEntry::from_prefix("file:///bin/sh")]);
        assert_eq!(text, format!("{BIN_SH}\t14\n"));
    }
}
