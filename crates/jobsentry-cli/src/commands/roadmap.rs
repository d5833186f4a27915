use anyhow::Result;
use jobsentry_application::Dashboard;
use jobsentry_core::outline::OutlineRenderer;

use super::into_payload;
use crate::render::AnsiRenderer;

pub async fn run(dashboard: &mut Dashboard, job_title: String, time: String) -> Result<()> {
    let screen = &mut dashboard.roadmap;
    screen.set_job_title(job_title);
    screen.set_available_time(time);
    screen.submit();
    let outline = into_payload(screen.wait_settled().await)?;

    print!("{}", AnsiRenderer.render(&outline));
    Ok(())
}
