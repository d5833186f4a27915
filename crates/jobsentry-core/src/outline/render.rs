//! Renderer seam for outlines.

use super::model::{Line, Outline, Run};

/// Maps an [`Outline`] to a concrete presentation format.
pub trait OutlineRenderer {
    fn render(&self, outline: &Outline) -> String;
}

/// Plain text with `*emphasis*`, underlined titles and `•` bullets.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTextRenderer;

impl PlainTextRenderer {
    fn render_runs(runs: &[Run], out: &mut String) {
        for run in runs {
            if run.emphasized {
                out.push('*');
                out.push_str(&run.text);
                out.push('*');
            } else {
                out.push_str(&run.text);
            }
        }
    }
}

impl OutlineRenderer for PlainTextRenderer {
    fn render(&self, outline: &Outline) -> String {
        let mut out = String::new();

        for (index, section) in outline.sections().iter().enumerate() {
            if index > 0 {
                out.push('\n');
            }
            out.push_str(&section.title);
            out.push('\n');
            out.push_str(&"=".repeat(section.title.chars().count()));
            out.push('\n');

            for line in &section.body {
                if let Line::Bullet(_) = line {
                    out.push_str("  • ");
                }
                Self::render_runs(line.runs(), &mut out);
                out.push('\n');
            }
        }

        out
    }
}
