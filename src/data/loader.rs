use std::fs;
use std::path::Path;

use log::info;
use thiserror::Error;

use crate::api::quiz_from_body;
use crate::models::Quiz;

/// Error loading a quiz definition from disk.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: String,
        source: serde_json::Error,
    },
    #[error("{0} must contain at least one question")]
    Empty(String),
}

/// Loads a quiz from a JSON file shaped like the `GET /quiz/{id}` payload.
pub fn load_quiz_from_json<P: AsRef<Path>>(path: P) -> Result<Quiz, LoadError> {
    let path = path.as_ref();
    let display = path.display().to_string();

    let json_content = fs::read_to_string(path).map_err(|source| LoadError::Read {
        path: display.clone(),
        source,
    })?;

    let quiz = quiz_from_body(&json_content).map_err(|source| LoadError::Parse {
        path: display.clone(),
        source,
    })?;

    if quiz.questions.is_empty() {
        return Err(LoadError::Empty(display));
    }

    info!("Loaded quiz {} ({} questions) from {}", quiz.id, quiz.questions.len(), display);
    Ok(quiz)
}
