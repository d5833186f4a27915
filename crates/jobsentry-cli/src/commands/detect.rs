use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use jobsentry_application::Dashboard;

use super::into_payload;
use crate::render::{AnsiRenderer, render_report};

pub async fn run(dashboard: &mut Dashboard, text: Option<String>, file: Option<PathBuf>) -> Result<()> {
    let description = match file {
        Some(path) => fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?,
        None => text.unwrap_or_default(),
    };

    let screen = &mut dashboard.detection;
    screen.set_description(description);
    screen.submit();
    let report = into_payload(screen.wait_settled().await)?;

    print!("{}", render_report(&report, &AnsiRenderer));
    Ok(())
}
