//! Command-line and environment configuration.

use std::path::PathBuf;
use std::str::FromStr;

use clap::Parser;
use thiserror::Error;

use crate::session::{QuestionPolicy, SessionOptions, DEFAULT_QUESTION_SECONDS};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("a quiz id is required (--quiz-id or WIZI_QUIZ_ID) unless --quiz-file is given")]
    MissingQuizId,
    #[error("an API url is required (--api-url or WIZI_API_URL) unless --quiz-file is given")]
    MissingApiUrl,
    #[error("invalid question counts '{0}': expected beginner,intermediate,advanced")]
    InvalidPolicy(String),
    #[error("--question-seconds must be at least 1")]
    ZeroQuestionSeconds,
}

#[derive(Parser, Debug)]
#[command(version, about = "Take a Wizi Learn quiz in the terminal", long_about = None)]
pub struct Args {
    /// Quiz to play
    #[arg(long, env = "WIZI_QUIZ_ID")]
    pub quiz_id: Option<String>,

    /// Base URL of the quiz API
    #[arg(long, env = "WIZI_API_URL")]
    pub api_url: Option<String>,

    /// Bearer token; enables resuming sessions stored on the server
    #[arg(long, env = "WIZI_API_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Play a quiz from a local JSON file and score it offline
    #[arg(long)]
    pub quiz_file: Option<PathBuf>,

    /// Directory where in-progress sessions are kept
    #[arg(long, env = "WIZI_STORAGE_DIR", default_value = ".wizi-sessions")]
    pub storage_dir: PathBuf,

    /// Countdown for each question, in seconds
    #[arg(long, default_value_t = DEFAULT_QUESTION_SECONDS)]
    pub question_seconds: u32,

    /// Questions drawn per level, as beginner,intermediate,advanced
    #[arg(long, default_value = "5,5,5")]
    pub questions_per_level: String,

    /// Write logs to this file (filtered by RUST_LOG)
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

/// Where the quiz comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Remote {
        api_url: String,
        token: Option<String>,
        quiz_id: String,
    },
    File(PathBuf),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub source: Source,
    pub storage_dir: PathBuf,
    pub session: SessionOptions,
    pub log_file: Option<PathBuf>,
}

impl TryFrom<Args> for Config {
    type Error = ConfigError;

    fn try_from(args: Args) -> Result<Self, Self::Error> {
        let source = match args.quiz_file {
            Some(path) => Source::File(path),
            None => Source::Remote {
                api_url: args.api_url.ok_or(ConfigError::MissingApiUrl)?,
                token: args.token,
                quiz_id: args.quiz_id.ok_or(ConfigError::MissingQuizId)?,
            },
        };

        if args.question_seconds == 0 {
            return Err(ConfigError::ZeroQuestionSeconds);
        }

        Ok(Self {
            source,
            storage_dir: args.storage_dir,
            session: SessionOptions {
                policy: parse_policy(&args.questions_per_level)?,
                question_seconds: args.question_seconds,
            },
            log_file: args.log_file,
        })
    }
}

fn parse_policy(raw: &str) -> Result<QuestionPolicy, ConfigError> {
    let counts: Vec<usize> = raw
        .split(',')
        .map(|part| usize::from_str(part.trim()))
        .collect::<Result<_, _>>()
        .map_err(|_| ConfigError::InvalidPolicy(raw.to_string()))?;

    match counts.as_slice() {
        [count] => Ok(QuestionPolicy::flat(*count)),
        [beginner, intermediate, advanced] => Ok(QuestionPolicy {
            beginner: *beginner,
            intermediate: *intermediate,
            advanced: *advanced,
        }),
        _ => Err(ConfigError::InvalidPolicy(raw.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Config, ConfigError> {
        let mut argv = vec!["wizi-quiz"];
        argv.extend_from_slice(args);
        Config::try_from(Args::parse_from(argv))
    }

    #[test]
    fn test_remote_config() {
        let config = parse(&[
            "--api-url",
            "https://api.example.test",
            "--quiz-id",
            "12",
            "--questions-per-level",
            "3, 5,8",
        ])
        .unwrap();

        assert!(matches!(config.source, Source::Remote { ref quiz_id, .. } if quiz_id == "12"));
        assert_eq!(config.session.policy.intermediate, 5);
        assert_eq!(config.session.policy.advanced, 8);
        assert_eq!(config.session.question_seconds, DEFAULT_QUESTION_SECONDS);
    }

    #[test]
    fn test_file_config_needs_no_api() {
        let config = parse(&["--quiz-file", "quiz.json", "--questions-per-level", "4"]).unwrap();
        assert_eq!(config.source, Source::File(PathBuf::from("quiz.json")));
        assert_eq!(config.session.policy, QuestionPolicy::flat(4));
    }

    #[test]
    fn test_invalid_values() {
        assert_eq!(
            parse(&["--quiz-file", "q.json", "--questions-per-level", "1,2"]),
            Err(ConfigError::InvalidPolicy("1,2".to_string()))
        );
        assert_eq!(
            parse(&["--quiz-file", "q.json", "--question-seconds", "0"]),
            Err(ConfigError::ZeroQuestionSeconds)
        );
    }
}
