//! String literal discovery.
//!
//! Finds Flutter `Text('...')` widgets whose content can be moved into a
//! resource file: no `$` interpolation, no `\` escapes, not on a comment
//! line, not blank. All offsets are byte offsets into the scanned text.

use std::{ops::Range, sync::LazyLock};

use regex::Regex;

static TEXT_WIDGET_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"Text\s*\(\s*(?:'([^$\\]*?)'|"([^$\\]*?)")\s*[),]"#).unwrap()
});

static QUOTED_LITERAL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"'(?:[^'\\\r\n]|\\.)*'|"(?:[^"\\\r\n]|\\.)*""#).unwrap()
});

const COMMENT_PREFIXES: &[&str] = &["//", "/*", "*"];

/// A literal found in source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiteralMatch {
    /// Byte range of the literal, quotes included.
    pub range: Range<usize>,
    /// Content between the quotes.
    pub value: String,
    /// 1-based line of the opening quote.
    pub line: usize,
    /// 1-based column of the opening quote, in characters.
    pub col: usize,
    /// The full source line containing the literal.
    pub source_line: String,
}

/// One literal to extract from a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionRequest {
    pub raw_literal_text: String,
    pub source_range: Range<usize>,
    pub source_document_id: String,
}

impl ExtractionRequest {
    pub fn from_match(literal: &LiteralMatch, text: &str, document_id: &str) -> Self {
        Self {
            raw_literal_text: text[literal.range.clone()].to_string(),
            source_range: literal.range.clone(),
            source_document_id: document_id.to_string(),
        }
    }

    /// The literal without its delimiting quotes.
    pub fn value(&self) -> &str {
        strip_quotes(&self.raw_literal_text)
    }
}

/// Remove exactly one leading and one trailing character.
///
/// No escape processing: `'"Save"'` -> `Save`, `'it\'s'` -> `it\'s`.
pub fn strip_quotes(raw: &str) -> &str {
    let mut chars = raw.char_indices();
    let Some((_, first)) = chars.next() else {
        return "";
    };
    match chars.next_back() {
        Some((last_start, _)) => &raw[first.len_utf8()..last_start],
        None => "",
    }
}

/// Whether `text` is a single quoted literal on one line.
pub fn is_string_literal(text: &str) -> bool {
    let is_quote = |c: char| c == '\'' || c == '"';
    text.len() >= 2
        && text.starts_with(is_quote)
        && text.ends_with(is_quote)
        && !text.contains(['\n', '\r'])
}

/// Byte offsets where each line starts, for offset -> line lookups.
pub struct LineIndex<'a> {
    text: &'a str,
    starts: Vec<usize>,
}

impl<'a> LineIndex<'a> {
    pub fn new(text: &'a str) -> Self {
        let mut starts = vec![0];
        for (i, c) in text.char_indices() {
            if c == '\n' {
                starts.push(i + 1);
            }
        }
        Self { text, starts }
    }

    /// 0-based line containing `offset`.
    fn line_of(&self, offset: usize) -> usize {
        match self.starts.binary_search(&offset) {
            Ok(line) => line,
            Err(line) => line - 1,
        }
    }

    fn line_range(&self, line: usize) -> Range<usize> {
        let start = self.starts[line];
        let end = self
            .starts
            .get(line + 1)
            .map(|next| next - 1)
            .unwrap_or(self.text.len());
        let end = if self.text[start..end].ends_with('\r') {
            end - 1
        } else {
            end
        };
        start..end
    }

    /// The text of the line containing `offset`, without its line ending.
    pub fn line_text(&self, offset: usize) -> &'a str {
        &self.text[self.line_range(self.line_of(offset))]
    }

    /// 1-based (line, column) of `offset`, with the column counted in chars.
    pub fn position(&self, offset: usize) -> (usize, usize) {
        let line = self.line_of(offset);
        let col = self.text[self.starts[line]..offset].chars().count() + 1;
        (line + 1, col)
    }

    /// Byte offset of a 1-based (line, column) position, if it exists.
    pub fn offset(&self, line: usize, col: usize) -> Option<usize> {
        let line = line.checked_sub(1)?;
        if line >= self.starts.len() {
            return None;
        }
        let range = self.line_range(line);
        let line_text = &self.text[range.clone()];
        let col = col.checked_sub(1)?;
        if col == line_text.chars().count() {
            return Some(range.end);
        }
        line_text.char_indices().nth(col).map(|(i, _)| range.start + i)
    }

    fn literal(&self, range: Range<usize>) -> LiteralMatch {
        let (line, col) = self.position(range.start);
        LiteralMatch {
            value: strip_quotes(&self.text[range.clone()]).to_string(),
            source_line: self.line_text(range.start).to_string(),
            range,
            line,
            col,
        }
    }
}

fn is_comment_line(line: &str) -> bool {
    let trimmed = line.trim_start();
    COMMENT_PREFIXES.iter().any(|p| trimmed.starts_with(p))
}

/// Find extractable `Text()` literals, in document order.
///
/// Matches on comment lines and literals with blank content are skipped.
pub fn find_literals(text: &str) -> Vec<LiteralMatch> {
    let index = LineIndex::new(text);

    TEXT_WIDGET_REGEX
        .captures_iter(text)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let inner = caps.get(1).or_else(|| caps.get(2))?;
            if inner.as_str().trim().is_empty() {
                return None;
            }
            if is_comment_line(index.line_text(whole.start())) {
                return None;
            }
            // The quotes sit right outside the captured content.
            Some(index.literal(inner.start() - 1..inner.end() + 1))
        })
        .collect()
}

/// Whether a literal's content can be moved as-is: no `$` interpolation and
/// no `\` escapes.
pub fn is_plain_content(value: &str) -> bool {
    !value.contains(['$', '\\'])
}

/// The quoted literal under `offset`, searching only its line.
///
/// Escaped quotes stay inside the literal. Used when nothing is selected and
/// the cursor sits inside a literal.
pub fn literal_at(text: &str, offset: usize) -> Option<LiteralMatch> {
    if offset > text.len() || !text.is_char_boundary(offset) {
        return None;
    }
    let index = LineIndex::new(text);
    let line = index.line_range(index.line_of(offset));

    QUOTED_LITERAL_REGEX
        .find_iter(&text[line.clone()])
        .map(|m| line.start + m.start()..line.start + m.end())
        .find(|range| range.start <= offset && offset <= range.end)
        .map(|range| index.literal(range))
}
