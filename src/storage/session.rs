//! Session repository
//!
//! Keeps the signed-in user between invocations.

use std::path::PathBuf;
use std::sync::RwLock;

use serde::{Deserialize, Serialize};

use crate::error::FintrackError;
use crate::models::User;

use super::file_io::{read_json, write_json_atomic};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct SessionData {
    #[serde(default)]
    user: Option<User>,
}

pub struct SessionRepository {
    path: PathBuf,
    user: RwLock<Option<User>>,
}

impl SessionRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            user: RwLock::new(None),
        }
    }

    pub fn load(&self) -> Result<(), FintrackError> {
        let file_data: SessionData = read_json(&self.path)?;
        let mut user = self
            .user
            .write()
            .map_err(|e| FintrackError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        *user = file_data.user;
        Ok(())
    }

    pub fn save(&self) -> Result<(), FintrackError> {
        let user = self
            .user
            .read()
            .map_err(|e| FintrackError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        write_json_atomic(&self.path, &SessionData { user: user.clone() })
    }

    pub fn current(&self) -> Result<Option<User>, FintrackError> {
        let user = self
            .user
            .read()
            .map_err(|e| FintrackError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        Ok(user.clone())
    }

    /// Replace the session user; `None` signs out
    pub fn set(&self, next: Option<User>) -> Result<Option<User>, FintrackError> {
        let mut user = self
            .user
            .write()
            .map_err(|e| FintrackError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        Ok(std::mem::replace(&mut *user, next))
    }
}
