//! freedesktop `recently-used.xbel` store
//!
//! Only `<bookmark>` elements are interpreted; everything else in the
//! document, comments and CDATA included, is carried through untouched. Removal cuts whole bookmark
//! elements (with their line) out of the text and rewrites the file through
//! a temp-file rename that keeps the original permission bits.

use std::ffi::OsString;
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::ops::Range;
use std::path::{Path, PathBuf};

use tracing::debug;
use url::Url;

use crate::domain::RecentItem;
use crate::error::ScrubError;
use crate::ports::RecentStore;

const OPEN_TAG: &str = "<bookmark";
const CLOSE_TAG: &str = "</bookmark>";

/// Sections whose contents are not markup, with their terminators
const OPAQUE_SECTIONS: [(&str, &str); 2] = [("<!--", "-->"), ("<![CDATA[", "]]>")];

/// Recent records kept in an XBEL bookmark file
#[derive(Clone, Debug)]
pub struct XbelRecentStore {
    path: PathBuf,
}

/// A `<bookmark>` element located in the document
#[derive(Debug, PartialEq, Eq)]
struct Bookmark {
    /// Byte range to cut when removing, including indentation and newline
    span: Range<usize>,
    uri: String,
    title: Option<String>,
}

impl XbelRecentStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    fn read_document(&self) -> Result<Option<String>, ScrubError> {
        match fs::read_to_string(&self.path) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(ScrubError::io(&self.path, e)),
        }
    }

    fn bookmarks(&self, doc: &str) -> Result<Vec<Bookmark>, ScrubError> {
        parse_bookmarks(doc).map_err(|reason| ScrubError::Malformed {
            path: self.path.clone(),
            reason: reason.to_string(),
        })
    }

    fn write_document(&self, doc: &str) -> Result<(), ScrubError> {
        let io_err = |e| ScrubError::io(&self.path, e);
        let permissions = fs::metadata(&self.path).map_err(io_err)?.permissions();

        let mut temp_name = self
            .path
            .file_name()
            .map(OsString::from)
            .unwrap_or_else(|| OsString::from("recently-used.xbel"));
        temp_name.push(".grms-tmp");
        let temp_path = self.path.with_file_name(temp_name);

        let result = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&temp_path)
            .and_then(|mut file| {
                file.write_all(doc.as_bytes())?;
                file.set_permissions(permissions)?;
                file.sync_all()
            })
            .and_then(|()| fs::rename(&temp_path, &self.path));

        if let Err(e) = result {
            let _ = fs::remove_file(&temp_path);
            return Err(io_err(e));
        }
        Ok(())
    }
}

impl RecentStore for XbelRecentStore {
    fn items(&self) -> Result<Vec<RecentItem>, ScrubError> {
        let Some(doc) = self.read_document()? else {
            debug!("No recent items file: {}", self.path.display());
            return Ok(Vec::new());
        };

        Ok(self
            .bookmarks(&doc)?
            .into_iter()
            .map(|bookmark| {
                let display_name = bookmark
                    .title
                    .filter(|title| !title.is_empty())
                    .unwrap_or_else(|| display_name_for(&bookmark.uri));
                RecentItem::new(bookmark.uri, display_name)
            })
            .collect())
    }

    fn remove(&mut self, uri: &str) -> Result<(), ScrubError> {
        let doc = self.read_document()?.ok_or(ScrubError::ItemNotFound)?;
        let bookmarks = self.bookmarks(&doc)?;

        let spans: Vec<&Range<usize>> = bookmarks
            .iter()
            .filter(|bookmark| bookmark.uri == uri)
            .map(|bookmark| &bookmark.span)
            .collect();
        if spans.is_empty() {
            return Err(ScrubError::ItemNotFound);
        }

        self.write_document(&cut_spans(&doc, spans))
    }

    fn purge(&mut self) -> Result<usize, ScrubError> {
        let Some(doc) = self.read_document()? else {
            return Ok(0);
        };
        let bookmarks = self.bookmarks(&doc)?;
        if bookmarks.is_empty() {
            return Ok(0);
        }

        self.write_document(&cut_spans(&doc, bookmarks.iter().map(|b| &b.span)))?;
        Ok(bookmarks.len())
    }

    fn path(&self) -> &Path {
        &self.path
    }
}

/// Locate every `<bookmark>` element in document order
fn parse_bookmarks(doc: &str) -> Result<Vec<Bookmark>, &'static str> {
    let mut bookmarks = Vec::new();
    let mut cursor = 0;

    while let Some(start) = next_open_tag(doc, cursor)? {
        let name_end = start + OPEN_TAG.len();

        // Skip `<bookmark:applications>` and friends.
        match doc[name_end..].chars().next() {
            Some(c) if c.is_whitespace() || c == '>' || c == '/' => {}
            _ => {
                cursor = name_end;
                continue;
            }
        }

        let tag_end = find_tag_end(doc, name_end).ok_or("unterminated <bookmark> tag")?;
        let attributes = &doc[name_end..tag_end];
        let self_closing = attributes.trim_end().ends_with('/');

        let (end, body) = if self_closing {
            (tag_end + 1, "")
        } else {
            let close = doc[tag_end..]
                .find(CLOSE_TAG)
                .ok_or("<bookmark> without </bookmark>")?;
            let close_start = tag_end + close;
            (close_start + CLOSE_TAG.len(), &doc[tag_end + 1..close_start])
        };

        let href = attribute(attributes, "href").ok_or("<bookmark> without href")?;
        bookmarks.push(Bookmark {
            span: line_span(doc, start, end),
            uri: decode_entities(href),
            title: element_text(body, "title").map(decode_entities),
        });
        cursor = end;
    }

    Ok(bookmarks)
}

/// Start of the next `<bookmark` at or after `from`, outside comments and
/// CDATA sections
fn next_open_tag(doc: &str, mut from: usize) -> Result<Option<usize>, &'static str> {
    loop {
        let Some(found) = doc[from..].find(OPEN_TAG) else {
            return Ok(None);
        };
        let candidate = from + found;

        let opaque = OPAQUE_SECTIONS
            .iter()
            .filter_map(|&(open, close)| {
                doc[from..candidate]
                    .find(open)
                    .map(|at| (from + at, open, close))
            })
            .min_by_key(|&(at, _, _)| at);

        let Some((at, open, close)) = opaque else {
            return Ok(Some(candidate));
        };
        let body = at + open.len();
        let end = doc[body..]
            .find(close)
            .ok_or("unterminated comment or CDATA section")?;
        from = body + end + close.len();
    }
}

/// Index of the `>` closing the tag whose attributes start at `from`
fn find_tag_end(doc: &str, from: usize) -> Option<usize> {
    let mut quote: Option<char> = None;
    for (offset, c) in doc[from..].char_indices() {
        match (quote, c) {
            (None, '"' | '\'') => quote = Some(c),
            (Some(open), _) if c == open => quote = None,
            (None, '>') => return Some(from + offset),
            _ => {}
        }
    }
    None
}

/// Raw value of attribute `name` in a tag's attribute text
fn attribute<'a>(attributes: &'a str, name: &str) -> Option<&'a str> {
    let mut rest = attributes;
    loop {
        rest = rest.trim_start_matches(|c: char| c.is_whitespace() || c == '/');
        if rest.is_empty() {
            return None;
        }

        let name_len = rest.find(|c: char| c == '=' || c.is_whitespace())?;
        let attr_name = &rest[..name_len];
        rest = rest[name_len..].trim_start();
        rest = rest.strip_prefix('=')?.trim_start();

        let quote = rest.chars().next().filter(|c| *c == '"' || *c == '\'')?;
        let value_len = rest[1..].find(quote)?;
        let value = &rest[1..1 + value_len];
        if attr_name == name {
            return Some(value);
        }
        rest = &rest[value_len + 2..];
    }
}

/// Text of the first `<name>...</name>` child in `body`
fn element_text<'a>(body: &'a str, name: &str) -> Option<&'a str> {
    let open = format!("<{name}>");
    let close = format!("</{name}>");
    let start = body.find(&open)? + open.len();
    let len = body[start..].find(&close)?;
    Some(&body[start..start + len])
}

/// Widen `start..end` to swallow the element's indentation and line break
/// when it sits on a line of its own
fn line_span(doc: &str, start: usize, end: usize) -> Range<usize> {
    let indent = doc[..start].trim_end_matches([' ', '\t']);
    let start = if indent.is_empty() || indent.ends_with('\n') {
        indent.len()
    } else {
        start
    };

    let trailing = &doc[end..];
    let after_blanks = trailing.trim_start_matches([' ', '\t']);
    let end = if let Some(rest) = after_blanks.strip_prefix("\r\n") {
        doc.len() - rest.len()
    } else if let Some(rest) = after_blanks.strip_prefix('\n') {
        doc.len() - rest.len()
    } else {
        end
    };

    start..end
}

/// Copy of `doc` without the given ascending, disjoint ranges
fn cut_spans<'a, I>(doc: &str, spans: I) -> String
where
    I: IntoIterator<Item = &'a Range<usize>>,
{
    let mut out = String::with_capacity(doc.len());
    let mut cursor = 0;
    for span in spans {
        out.push_str(&doc[cursor..span.start]);
        cursor = span.end;
    }
    out.push_str(&doc[cursor..]);
    out
}

/// Replace XML character and predefined entity references
fn decode_entities(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        rest = &rest[amp..];

        let decoded = rest
            .find(';')
            .and_then(|semi| decode_entity(&rest[1..semi]).map(|c| (c, semi + 1)));
        match decoded {
            Some((c, consumed)) => {
                out.push(c);
                rest = &rest[consumed..];
            }
            None => {
                out.push('&');
                rest = &rest[1..];
            }
        }
    }

    out.push_str(rest);
    out
}

fn decode_entity(name: &str) -> Option<char> {
    match name {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        _ => {
            let code = name.strip_prefix('#')?;
            let value = match code.strip_prefix(['x', 'X']) {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => code.parse().ok()?,
            };
            char::from_u32(value)
        }
    }
}

/// Fallback display name: the file name, or the last URI path segment
fn display_name_for(uri: &str) -> String {
    let Ok(url) = Url::parse(uri) else {
        return uri.to_string();
    };

    if url.scheme() == "file" {
        if let Some(name) = url
            .to_file_path()
            .ok()
            .and_then(|path| path.file_name().map(|n| n.to_string_lossy().into_owned()))
        {
            return name;
        }
    }

    url.path_segments()
        .and_then(|segments| segments.filter(|s| !s.is_empty()).last())
        .map(str::to_string)
        .or_else(|| url.host_str().map(str::to_string))
        .unwrap_or_else(|| uri.to_string())
}
