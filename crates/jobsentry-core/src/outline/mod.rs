//! Outline extraction for generated roadmap documents.
//!
//! A roadmap arrives as loosely formatted text: numbered headings, free
//! paragraphs, `**bold**` spans and `- ` bullet lines. This module turns it
//! into a render-ready [`Outline`] without a full markdown grammar, and
//! provides a renderer seam so the tree can be drawn by any front-end.

mod inline;
mod model;
mod parser;
mod render;

pub use inline::{EMPHASIS_DELIMITER, InlineFormatter};
pub use model::{Line, Outline, Run, Section};
pub use parser::{BULLET_PREFIX, DocumentOutlineParser, INTRODUCTION_TITLE, MAX_TITLE_CHARS};
pub use render::{OutlineRenderer, PlainTextRenderer};
