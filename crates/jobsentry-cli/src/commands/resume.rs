use std::path::Path;

use anyhow::Result;
use jobsentry_application::Dashboard;

use super::{into_payload, read_upload};
use crate::render::render_turn;

pub async fn run(dashboard: &mut Dashboard, path: &Path) -> Result<()> {
    let screen = &mut dashboard.resume;
    screen.select(read_upload(path)?);
    screen.submit();
    into_payload(screen.wait_settled().await)?;

    for turn in screen.transcript() {
        println!("{}", render_turn(&turn));
    }
    Ok(())
}
