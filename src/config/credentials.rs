//! API credentials file.
//!
//! The key lives in its own JSON file (`{"api_key": "..."}`) so the main
//! config can be committed while the secret stays out of version control.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

/// ECFS API credentials.
#[derive(Clone, Deserialize)]
pub struct Credentials {
    pub api_key: String,
}

// The key never reaches the logs.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &"<redacted>")
            .finish()
    }
}

/// Errors reading the credentials file.
#[derive(Debug, Error)]
pub enum CredentialsError {
    #[error("cannot read credentials file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed credentials file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("credentials file {0} has an empty api_key")]
    EmptyKey(PathBuf),
}

impl Credentials {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
        }
    }

    /// Read and check the credentials file. Called once at startup.
    pub fn load(path: &Path) -> Result<Self, CredentialsError> {
        let content = fs::read_to_string(path).map_err(|source| CredentialsError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let credentials: Credentials =
            serde_json::from_str(&content).map_err(|source| CredentialsError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        if credentials.api_key.trim().is_empty() {
            return Err(CredentialsError::EmptyKey(path.to_path_buf()));
        }

        Ok(credentials)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_valid_file() {
        let file = write_temp(r#"{"api_key": "abc123"}"#);
        let credentials = Credentials::load(file.path()).unwrap();
        assert_eq!(credentials.api_key, "abc123");
        assert!(!format!("{credentials:?}").contains("abc123"));
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Credentials::load(&dir.path().join("conf.json")).unwrap_err();
        assert!(matches!(err, CredentialsError::Io { .. }));
    }

    #[test]
    fn test_malformed_and_empty() {
        let file = write_temp("api_key = abc");
        assert!(matches!(
            Credentials::load(file.path()).unwrap_err(),
            CredentialsError::Parse { .. }
        ));

        let file = write_temp(r#"{"key": "abc"}"#);
        assert!(matches!(
            Credentials::load(file.path()).unwrap_err(),
            CredentialsError::Parse { .. }
        ));

        let file = write_temp(r#"{"api_key": ""}"#);
        assert!(matches!(
            Credentials::load(file.path()).unwrap_err(),
            CredentialsError::EmptyKey(_)
        ));
    }
}
