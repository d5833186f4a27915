use anyhow::Result;
use colored::Colorize;
use jobsentry_core::config::AppConfig;
use jobsentry_infrastructure::ConfigService;

/// Prints the file location and the configuration after overrides.
pub fn show(service: &ConfigService, effective: &AppConfig) -> Result<()> {
    let path = service.config_path()?;
    let state = if path.exists() { "" } else { " (not created, using defaults)" };
    println!("{} {}{}", "#".bright_black(), path.display(), state.bright_black());
    print!("{}", toml::to_string_pretty(effective)?);
    Ok(())
}

pub fn init(service: &ConfigService) -> Result<()> {
    let path = service.config_path()?;
    if service.init()? {
        println!("{} {}", "Created".green(), path.display());
    } else {
        println!("{} {}", "Already exists:".bright_black(), path.display());
    }
    Ok(())
}
