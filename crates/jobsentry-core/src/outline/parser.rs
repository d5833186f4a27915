//! Best-effort segmentation of a roadmap document into sections.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::trace;

use super::inline::InlineFormatter;
use super::model::{Line, Outline, Section};

/// Title of the synthetic section holding text before the first header.
pub const INTRODUCTION_TITLE: &str = "Introduction";

/// A trimmed line starting with this prefix is a bullet item.
pub const BULLET_PREFIX: &str = "- ";

/// Longest header title still treated as a header.
pub const MAX_TITLE_CHARS: usize = 100;

static HASH_HEADER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^#{1,6}[ \t]*(?P<title>[^#\s].*?)(?:[ \t]+#+)?[ \t]*$")
        .expect("hash header pattern")
});

static BOLD_HEADER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\*\*[ \t]*(?P<title>.+?)[ \t]*\*\*$").expect("bold header pattern")
});

static ORDINAL_TITLE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(?:(?:section|step|phase|week|part|stage|module)\s+)?\d{1,3}\s*[.:)]\s*\S")
        .expect("ordinal title pattern")
});

/// A recognized header line.
#[derive(Debug, Clone, PartialEq, Eq)]
struct HeaderLine {
    title: String,
    line_index: usize,
    offset: usize,
}

/// Segments a document into titled [`Section`]s.
///
/// Headers are matched per whole line: either `### 1. Title` (one to six
/// `#`, optional closing `#`s after whitespace) or `**1. Title**`, where the title starts with
/// an ordinal, optionally preceded by a label such as `Step` or `Week`.
/// Everything else degrades to paragraphs and bullets; parsing never fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct DocumentOutlineParser {
    formatter: InlineFormatter,
}

impl DocumentOutlineParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn parse(&self, document: &str) -> Outline {
        let lines = split_lines(document);
        let headers = locate_headers(&lines);

        let Some(first) = headers.first() else {
            // No recognized structure: the whole document is the introduction.
            let body = self.body_lines(&lines);
            return Outline::new(vec![Section::new(INTRODUCTION_TITLE, body)]);
        };

        let mut sections = Vec::with_capacity(headers.len() + 1);

        let preamble = &lines[..first.line_index];
        if preamble.iter().any(|(_, text)| !text.trim().is_empty()) {
            sections.push(Section::new(
                INTRODUCTION_TITLE,
                self.body_lines(preamble),
            ));
        }

        for (index, header) in headers.iter().enumerate() {
            let end = headers
                .get(index + 1)
                .map_or(lines.len(), |next| next.line_index);
            let body = self.body_lines(&lines[header.line_index + 1..end]);
            trace!(
                title = %header.title,
                offset = header.offset,
                lines = body.len(),
                "outline section"
            );
            sections.push(Section::new(header.title.clone(), body));
        }

        Outline::new(sections)
    }

    /// Classifies one raw line. Blank lines yield `None`.
    pub fn classify_line(&self, raw: &str) -> Option<Line> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }

        match trimmed.strip_prefix(BULLET_PREFIX) {
            Some(item) => Some(Line::Bullet(self.formatter.format(item.trim_start()))),
            None => Some(Line::Paragraph(self.formatter.format(trimmed))),
        }
    }

    fn body_lines(&self, lines: &[(usize, &str)]) -> Vec<Line> {
        lines
            .iter()
            .filter_map(|(_, text)| self.classify_line(text))
            .collect()
    }
}

/// Returns the section title if `raw` is a header line.
pub(crate) fn header_title(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    let captures = HASH_HEADER
        .captures(trimmed)
        .or_else(|| BOLD_HEADER.captures(trimmed))?;
    let candidate = strip_wrapping_emphasis(captures.name("title")?.as_str());

    if candidate.contains("**") || !ORDINAL_TITLE.is_match(candidate) {
        return None;
    }

    let title = candidate.split_whitespace().collect::<Vec<_>>().join(" ");
    if title.chars().count() > MAX_TITLE_CHARS {
        return None;
    }
    Some(title)
}

/// `### **1. Skills**` carries the same title as `### 1. Skills`.
fn strip_wrapping_emphasis(title: &str) -> &str {
    title
        .strip_prefix("**")
        .and_then(|inner| inner.strip_suffix("**"))
        .map(str::trim)
        .unwrap_or(title)
}

/// Splits into `(byte offset, line)` pairs, with the same line breaks as
/// [`str::lines`].
fn split_lines(document: &str) -> Vec<(usize, &str)> {
    let mut offset = 0;
    document
        .split_inclusive('\n')
        .map(|chunk| {
            let start = offset;
            offset += chunk.len();
            let text = chunk.strip_suffix('\n').unwrap_or(chunk);
            let text = text.strip_suffix('\r').unwrap_or(text);
            (start, text)
        })
        .collect()
}

fn locate_headers(lines: &[(usize, &str)]) -> Vec<HeaderLine> {
    lines
        .iter()
        .enumerate()
        .filter_map(|(line_index, (offset, text))| {
            header_title(text).map(|title| HeaderLine {
                title,
                line_index,
                offset: *offset,
            })
        })
        .collect()
}
