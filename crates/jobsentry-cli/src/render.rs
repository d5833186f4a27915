//! Terminal presentation of screen results.

use colored::Colorize;
use jobsentry_application::screens::NO_RESULTS_MESSAGE;
use jobsentry_application::{FraudReport, Verdict};
use jobsentry_core::insights::JobListing;
use jobsentry_core::outline::{Line, Outline, OutlineRenderer, Run};
use jobsentry_core::transcript::{ConversationTurn, MessageRole};

/// Colored titles, bold emphasis and yellow bullets.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnsiRenderer;

impl AnsiRenderer {
    fn render_runs(runs: &[Run], out: &mut String) {
        for run in runs {
            if run.emphasized {
                out.push_str(&run.text.bold().to_string());
            } else {
                out.push_str(&run.text);
            }
        }
    }
}

impl OutlineRenderer for AnsiRenderer {
    fn render(&self, outline: &Outline) -> String {
        let mut out = String::new();

        for (index, section) in outline.sections().iter().enumerate() {
            if index > 0 {
                out.push('\n');
            }
            out.push_str(&section.title.bright_cyan().bold().to_string());
            out.push('\n');

            for line in &section.body {
                match line {
                    Line::Bullet(runs) => {
                        out.push_str(&"  • ".yellow().to_string());
                        Self::render_runs(runs, &mut out);
                    }
                    Line::Paragraph(runs) => Self::render_runs(runs, &mut out),
                }
                out.push('\n');
            }
        }

        out
    }
}

pub fn render_report(report: &FraudReport, renderer: &dyn OutlineRenderer) -> String {
    let status = match report.verdict {
        Verdict::Suspicious => report.status.bright_red().bold(),
        Verdict::Genuine => report.status.bright_green().bold(),
    };
    let mut out = format!("{status}\n");

    if let Some(role) = &report.suggested_role {
        out.push_str(&format!("\n{} {role}\n", "Suggested role:".bright_black()));
    }
    if let Some(roadmap) = &report.roadmap {
        out.push('\n');
        out.push_str(&renderer.render(roadmap));
    }
    out
}

pub fn render_listings(listings: &[JobListing]) -> String {
    if listings.is_empty() {
        return format!("{}\n", NO_RESULTS_MESSAGE.bright_black());
    }

    let mut out = String::new();
    for listing in listings {
        out.push_str(&format!(
            "{}\n  {} · {}",
            listing.title.bright_cyan().bold(),
            listing.company,
            listing.location
        ));
        if let Some(posted) = &listing.posted_date {
            out.push_str(&format!(" · {posted}"));
        }
        out.push('\n');
        if !listing.description.is_empty() {
            out.push_str(&format!("  {}\n", listing.description));
        }
        out.push_str(&format!("  {}\n\n", listing.url.underline()));
    }
    out
}

pub fn render_turn(turn: &ConversationTurn) -> String {
    match turn.sender {
        MessageRole::User => format!("{} {}", "you>".green(), turn.text),
        MessageRole::Assistant => turn
            .text
            .lines()
            .map(|line| line.bright_blue().to_string())
            .collect::<Vec<_>>()
            .join("\n"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jobsentry_core::outline::DocumentOutlineParser;

    fn plain<T>(f: impl FnOnce() -> T) -> T {
        colored::control::set_override(false);
        f()
    }

    #[test]
    fn outline_without_color() {
        let outline = DocumentOutlineParser::new()
            .parse("### 1. Skills\n- learn **SQL**\nPractice daily");
        let text = plain(|| AnsiRenderer.render(&outline));
        assert_eq!(text, "1. Skills\n  • learn SQL\nPractice daily\n");
    }

    #[test]
    fn empty_listings_show_empty_state() {
        let text = plain(|| render_listings(&[]));
        assert_eq!(text, "No job results found.\n");
    }

    #[test]
    fn listing_includes_link_and_date() {
        let listing = JobListing {
            title: "Data Analyst".to_string(),
            company: "Acme".to_string(),
            location: "Pune".to_string(),
            posted_date: Some("2 days ago".to_string()),
            description: String::new(),
            url: "https://jobs.example.com/1".to_string(),
        };
        let text = plain(|| render_listings(&[listing]));
        assert_eq!(
            text,
            "Data Analyst\n  Acme · Pune · 2 days ago\n  https://jobs.example.com/1\n\n"
        );
    }

    #[test]
    fn report_lists_role_and_roadmap() {
        let report = FraudReport {
            status: "✅ Genuine".to_string(),
            verdict: Verdict::Genuine,
            suggested_role: Some("Backend Engineer".to_string()),
            roadmap: Some(DocumentOutlineParser::new().parse("Start with Rust")),
        };
        let text = plain(|| render_report(&report, &AnsiRenderer));
        assert_eq!(
            text,
            "✅ Genuine\n\nSuggested role: Backend Engineer\n\nIntroduction\nStart with Rust\n"
        );
    }
}
