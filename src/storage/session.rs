use crate::error::Result;
use crate::storage::{read_json, write_json};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Identity record returned by the sign-in service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
struct SessionState {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    user: Option<User>,
}

/// Bearer token and user identity, persisted to a JSON file.
///
/// Owned by whoever opens it and passed to the code that needs it. Every
/// mutation is written through immediately.
#[derive(Debug)]
pub struct SessionStore {
    path: PathBuf,
    state: SessionState,
}

impl SessionStore {
    /// Loads the session at `path`, starting empty if the file is missing
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let state = read_json(&path)?.unwrap_or_default();
        debug!("Opened session store at {}", path.display());
        Ok(Self { path, state })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn token(&self) -> Option<&str> {
        self.state.token.as_deref()
    }

    pub fn set_token(&mut self, token: impl Into<String>) -> Result<()> {
        self.state.token = Some(token.into());
        self.persist()
    }

    pub fn clear_token(&mut self) -> Result<()> {
        self.state.token = None;
        self.persist()
    }

    pub fn user(&self) -> Option<&User> {
        self.state.user.as_ref()
    }

    pub fn set_user(&mut self, user: Option<User>) -> Result<()> {
        self.state.user = user;
        self.persist()
    }

    pub fn is_signed_in(&self) -> bool {
        self.state.token.is_some()
    }

    /// Forgets token and user and removes the backing file
    pub fn clear(&mut self) -> Result<()> {
        self.state = SessionState::default();
        match fs::remove_file(&self.path) {
            Ok(()) => {
                info!("Cleared session at {}", self.path.display());
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn persist(&self) -> Result<()> {
        write_json(&self.path, &self.state)
    }
}
