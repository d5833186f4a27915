pub mod alternatives;
pub mod chat;
pub mod config;
pub mod detect;
pub mod resume;
pub mod roadmap;

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use jobsentry_core::insights::ResumeUpload;
use jobsentry_core::request::RequestState;

/// Unwraps a settled state, turning `Failed` into an error carrying its
/// user message.
pub fn into_payload<T>(state: RequestState<T>) -> Result<T> {
    match state {
        RequestState::Succeeded(payload) => Ok(payload),
        RequestState::Failed(message) => Err(anyhow!(message)),
        other => Err(anyhow!("request ended while {}", other.label())),
    }
}

/// Reads a résumé file into an upload named after the file.
pub fn read_upload(path: &Path) -> Result<ResumeUpload> {
    let bytes = fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    Ok(ResumeUpload::new(file_name, bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failed_state_becomes_error_message() {
        let err = into_payload(RequestState::<()>::Failed("Please enter a message.".into()))
            .unwrap_err();
        assert_eq!(err.to_string(), "Please enter a message.");

        assert_eq!(into_payload(RequestState::Succeeded(3)).unwrap(), 3);
        assert!(into_payload(RequestState::<()>::InFlight).is_err());
    }

    #[test]
    fn missing_resume_file_has_context() {
        let err = read_upload(Path::new("/definitely/not/here.pdf")).unwrap_err();
        assert!(err.to_string().contains("here.pdf"));
    }
}
