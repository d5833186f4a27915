//! Inline emphasis splitting.

use super::model::Run;

/// Paired marker that opens and closes an emphasized span.
pub const EMPHASIS_DELIMITER: &str = "**";

/// Splits one line into plain and emphasized [`Run`]s.
///
/// Delimiters pair up left to right and never nest: a delimiter met inside
/// an emphasized span closes it. An opening delimiter with no partner is kept
/// as literal text together with everything after it. Adjacent plain text is
/// coalesced into a single run and empty spans (`****`) produce no run.
#[derive(Debug, Clone, Copy, Default)]
pub struct InlineFormatter;

impl InlineFormatter {
    pub fn new() -> Self {
        Self
    }

    pub fn format(&self, line: &str) -> Vec<Run> {
        let mut runs = Vec::new();
        let mut plain = String::new();
        let mut rest = line;

        while let Some(open) = rest.find(EMPHASIS_DELIMITER) {
            let after_open = &rest[open + EMPHASIS_DELIMITER.len()..];
            let Some(close) = after_open.find(EMPHASIS_DELIMITER) else {
                // Unterminated: the remainder, delimiter included, stays plain.
                break;
            };

            plain.push_str(&rest[..open]);
            let emphasized = &after_open[..close];
            if !emphasized.is_empty() {
                flush_plain(&mut plain, &mut runs);
                runs.push(Run::emphasized(emphasized));
            }
            rest = &after_open[close + EMPHASIS_DELIMITER.len()..];
        }

        plain.push_str(rest);
        flush_plain(&mut plain, &mut runs);
        runs
    }
}

fn flush_plain(plain: &mut String, runs: &mut Vec<Run>) {
    if !plain.is_empty() {
        runs.push(Run::plain(std::mem::take(plain)));
    }
}
