//! Interwiki map parsing: `<name> <url-template>` lines with `#` comments.

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use indexmap::IndexMap;
use regex::Regex;

use crate::error::Error;

/// Comment marker; everything from it to end of line is ignored.
const COMMENT: char = '#';

/// Line boundaries besides `\r\n`: LF, CR, VT, FF, the file, group and
/// record separators, NEL, and the Unicode line and paragraph separators.
const LINE_BREAKS: [char; 10] = [
    '\n', '\r', '\u{b}', '\u{c}', '\u{1c}', '\u{1d}', '\u{1e}', '\u{85}', '\u{2028}', '\u{2029}',
];

/// A name, a whitespace run, then the rest of the line as the URL.
#[allow(clippy::expect_used, reason = "pattern is a compile-time constant")]
static MAP_LINE: LazyLock<Regex> =
    LazyLock::new(|| return Regex::new(r"^\s*(\S+)\s+(\S.*)$").expect("valid regex"));

/// Wiki name to URL template table. Templates may embed `$PAGE`,
/// `$NAMESPACE`, and `$FIELD`. Iteration follows first appearance in the source.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InterwikiMap {
    /// Entries in first-insertion order.
    entries: IndexMap<String, String>,
}

impl InterwikiMap {
    /// Read and parse a map file. A leading `~` is expanded to the home directory.
    ///
    /// # Errors
    ///
    /// Returns `Error::InterwikiMapIo` if the file is missing or unreadable,
    /// or `Error::MalformedInterwikiMap` if any line is malformed.
    pub fn from_file(path: &Path) -> Result<Self, Error> {
        let expanded = PathBuf::from(shellexpand::tilde(&path.to_string_lossy()).into_owned());
        let content = std::fs::read_to_string(&expanded).map_err(|source| {
            return Error::InterwikiMapIo { path: expanded.clone(), source };
        })?;
        let map = Self::parse(&content)?;
        tracing::debug!(path = %expanded.display(), entries = map.len(), "loaded interwiki map");
        return Ok(map);
    }

    /// Parse map text. Later lines overwrite earlier entries of the same name
    /// without moving them.
    ///
    /// # Errors
    ///
    /// Returns `Error::MalformedInterwikiMap` for the first non-blank,
    /// non-comment line without a whitespace-separated name and URL. Nothing
    /// is returned from a failed parse.
    pub fn parse(source: &str) -> Result<Self, Error> {
        let mut entries = IndexMap::new();

        for (index, raw) in split_lines(source).enumerate() {
            let line = raw.split_once(COMMENT).map_or(raw, |(head, _)| return head).trim_end();
            if line.is_empty() {
                continue;
            }

            let Some(caps) = MAP_LINE.captures(line) else {
                return Err(Error::MalformedInterwikiMap {
                    line: line.to_string(),
                    line_number: index.saturating_add(1),
                });
            };
            let (Some(name), Some(url)) = (caps.get(1), caps.get(2)) else {
                return Err(Error::MalformedInterwikiMap {
                    line: line.to_string(),
                    line_number: index.saturating_add(1),
                });
            };
            entries.insert(name.as_str().to_string(), url.as_str().to_string());
        }

        return Ok(Self { entries });
    }

    /// The URL template registered for `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        return self.entries.get(name).map(String::as_str);
    }

    /// Whether `name` has an entry.
    pub fn contains(&self, name: &str) -> bool {
        return self.entries.contains_key(name);
    }

    /// Insert or overwrite one entry, keeping an existing entry's position.
    pub fn insert(&mut self, name: &str, url: &str) {
        self.entries.insert(name.to_string(), url.to_string());
    }

    /// Entries in source order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        return self.entries.iter().map(|(k, v)| return (k.as_str(), v.as_str()));
    }

    /// Registered wiki names in source order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        return self.entries.keys().map(String::as_str);
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        return self.entries.len();
    }

    /// Whether the map has no entries.
    pub fn is_empty(&self) -> bool {
        return self.entries.is_empty();
    }
}

/// Split on every line boundary, counting `\r\n` as one.
fn split_lines(source: &str) -> impl Iterator<Item = &str> {
    return source.split("\r\n").flat_map(|chunk| return chunk.split(LINE_BREAKS));
}

#[cfg(test)]
mod tests {
    use std::io::Write as _;

    use super::*;

    #[test]
    fn comments_and_blank_lines_are_skipped() {
        let map = InterwikiMap::parse("a http://x/$PAGE # comment\n\nb http://y/\n").unwrap();
        let entries: Vec<(&str, &str)> = map.iter().collect();
        assert_eq!(entries, vec![("a", "http://x/$PAGE"), ("b", "http://y/")]);
    }

    #[test]
    fn comment_only_lines() {
        let map = InterwikiMap::parse("# header\n   # indented\nMoinMoin https://moinmo.in/\n").unwrap();
        assert_eq!(map.len(), 1);
        assert_eq!(map.get("MoinMoin"), Some("https://moinmo.in/"));
    }

    #[test]
    fn single_token_line_is_rejected() {
        let err = InterwikiMap::parse("badline").unwrap_err();
        match err {
            Error::MalformedInterwikiMap { line, line_number } => {
                assert_eq!(line, "badline");
                assert_eq!(line_number, 1);
            },
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn error_reports_line_after_comment_removal() {
        let err = InterwikiMap::parse("ok http://ok/\nlonely   # no url here\n").unwrap_err();
        assert_eq!(err.to_string(), "malformed interwiki map string: lonely");
    }

    #[test]
    fn later_duplicate_wins_but_keeps_position() {
        let map = InterwikiMap::parse("a http://first/\nb http://b/\na http://second/\n").unwrap();
        let entries: Vec<(&str, &str)> = map.iter().collect();
        assert_eq!(entries, vec![("a", "http://second/"), ("b", "http://b/")]);
    }

    #[test]
    fn url_keeps_inner_whitespace() {
        let map = InterwikiMap::parse("  Wiki \t http://w/?q=$PAGE  &x=1  \n").unwrap();
        assert_eq!(map.get("Wiki"), Some("http://w/?q=$PAGE  &x=1"));
    }

    #[test]
    fn crlf_line_endings() {
        let map = InterwikiMap::parse("a http://x/\r\nb http://y/\r\n").unwrap();
        assert_eq!(map.get("a"), Some("http://x/"));
        assert_eq!(map.get("b"), Some("http://y/"));
    }

    #[test]
    fn bare_carriage_return_separates_lines() {
        let map = InterwikiMap::parse("a http://x/\rb http://y/\r").unwrap();
        assert_eq!(map.len(), 2);
        assert_eq!(map.get("a"), Some("http://x/"));
        assert_eq!(map.get("b"), Some("http://y/"));
    }

    #[test]
    fn unicode_line_separators() {
        let map = InterwikiMap::parse("a http://x/\u{2028}b http://y/\u{85}c http://z/\u{c}").unwrap();
        let names: Vec<&str> = map.names().collect();
        assert_eq!(names, vec!["a", "b", "c"]);
    }

    #[test]
    fn line_numbers_follow_mixed_breaks() {
        let err = InterwikiMap::parse("a http://x/\r\nb http://y/\rbroken\n").unwrap_err();
        match err {
            Error::MalformedInterwikiMap { line, line_number } => {
                assert_eq!(line, "broken");
                assert_eq!(line_number, 3);
            },
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn reads_map_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "# farm").unwrap();
        writeln!(file, "Other http://other.example/$PAGE").unwrap();
        let map = InterwikiMap::from_file(file.path()).unwrap();
        assert_eq!(map.get("Other"), Some("http://other.example/$PAGE"));
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = InterwikiMap::from_file(&dir.path().join("absent.txt")).unwrap_err();
        match err {
            Error::InterwikiMapIo { source, .. } => {
                assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
            },
            other => panic!("unexpected error: {other}"),
        }
    }
}
