use anyhow::Result;
use jobsentry_application::Dashboard;

use super::into_payload;
use crate::render::render_listings;

pub async fn run(dashboard: &mut Dashboard, role: String, location: String) -> Result<()> {
    let screen = &mut dashboard.alternatives;
    screen.set_role(role);
    screen.set_location(location);
    screen.submit();
    let listings = into_payload(screen.wait_settled().await)?;

    print!("{}", render_listings(&listings));
    Ok(())
}
