// civic-client/src/session/storage.rs
// Session persistence - token, user (JSON) and role as plain files

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use shared::models::{Role, User};

use crate::error::{ClientError, ClientResult};

const TOKEN_FILE: &str = "token";
const USER_FILE: &str = "user";
const ROLE_FILE: &str = "role";

/// Everything persisted between runs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredSession {
    pub token: String,
    pub user: User,
    pub role: Role,
}

/// Credential store
///
/// Keeps the three session entries under fixed names in one directory. The
/// token is opaque; the user record is stored as JSON.
#[derive(Debug, Clone)]
pub struct CredentialStore {
    dir: PathBuf,
}

impl CredentialStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.join(name)
    }

    /// Write all three entries
    pub fn save(&self, session: &StoredSession) -> ClientResult<()> {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.path(TOKEN_FILE), &session.token)?;
        fs::write(
            self.path(USER_FILE),
            serde_json::to_string_pretty(&session.user)?,
        )?;
        fs::write(self.path(ROLE_FILE), session.role.as_str())?;
        tracing::debug!(dir = %self.dir.display(), "session saved");
        Ok(())
    }

    /// Load the persisted session.
    ///
    /// Returns `Ok(None)` when nothing (or only part of it) is stored. A user
    /// file that no longer parses is an error.
    pub fn load(&self) -> ClientResult<Option<StoredSession>> {
        let Some(token) = read_optional(&self.path(TOKEN_FILE))? else {
            return Ok(None);
        };
        let Some(user_json) = read_optional(&self.path(USER_FILE))? else {
            return Ok(None);
        };
        let user: User = serde_json::from_str(&user_json)?;

        // role falls back to the user record when the file is missing
        let role = match read_optional(&self.path(ROLE_FILE))? {
            Some(raw) => raw
                .trim()
                .parse::<Role>()
                .map_err(|e| ClientError::InvalidState(e.to_string()))?,
            None => user.role,
        };

        Ok(Some(StoredSession {
            token: token.trim().to_string(),
            user,
            role,
        }))
    }

    /// Whether a token is stored
    pub fn exists(&self) -> bool {
        self.path(TOKEN_FILE).exists()
    }

    /// Remove all three entries; missing files are fine
    pub fn clear(&self) -> ClientResult<()> {
        for name in [TOKEN_FILE, USER_FILE, ROLE_FILE] {
            match fs::remove_file(self.path(name)) {
                Ok(()) => {}
                Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                Err(e) => return Err(e.into()),
            }
        }
        tracing::debug!(dir = %self.dir.display(), "session cleared");
        Ok(())
    }
}

fn read_optional(path: &Path) -> io::Result<Option<String>> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e),
    }
}
