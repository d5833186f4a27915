//! Section / Line / Run tree produced by the outline parser.

use serde::{Deserialize, Serialize};

/// Minimal span of text carrying a single emphasis flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Run {
    pub text: String,
    pub emphasized: bool,
}

impl Run {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            emphasized: false,
        }
    }

    pub fn emphasized(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            emphasized: true,
        }
    }
}

/// A rendering unit inside a section body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "runs", rename_all = "snake_case")]
pub enum Line {
    Paragraph(Vec<Run>),
    Bullet(Vec<Run>),
}

impl Line {
    pub fn runs(&self) -> &[Run] {
        match self {
            Line::Paragraph(runs) | Line::Bullet(runs) => runs,
        }
    }

    pub fn is_bullet(&self) -> bool {
        matches!(self, Line::Bullet(_))
    }

    /// The line's text with emphasis flags dropped.
    pub fn plain_text(&self) -> String {
        self.runs().iter().map(|run| run.text.as_str()).collect()
    }
}

/// Titled contiguous block of a parsed document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub title: String,
    pub body: Vec<Line>,
}

impl Section {
    pub fn new(title: impl Into<String>, body: Vec<Line>) -> Self {
        Self {
            title: title.into(),
            body,
        }
    }
}

/// Ordered sections of one document.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Outline {
    sections: Vec<Section>,
}

impl Outline {
    pub fn new(sections: Vec<Section>) -> Self {
        Self { sections }
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn titles(&self) -> impl Iterator<Item = &str> {
        self.sections.iter().map(|section| section.title.as_str())
    }

    pub fn into_sections(self) -> Vec<Section> {
        self.sections
    }
}
