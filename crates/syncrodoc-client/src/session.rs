use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

use serde::{Deserialize, Serialize};

use syncrodoc_types::api::UserProfile;

use crate::error::ClientError;

/// A stored session: the bearer token plus the user profile the server
/// returned alongside it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionEntry {
    pub token: String,
    pub user: UserProfile,
}

enum Backing {
    /// Dropped with the process — the sessionStorage analogue.
    Memory(Mutex<Option<SessionEntry>>),
    /// JSON file that survives restarts — the localStorage analogue.
    Disk(PathBuf),
}

pub struct SessionCache {
    backing: Backing,
}

impl SessionCache {
    pub fn in_memory() -> Self {
        Self {
            backing: Backing::Memory(Mutex::new(None)),
        }
    }

    pub fn on_disk(path: impl Into<PathBuf>) -> Self {
        Self {
            backing: Backing::Disk(path.into()),
        }
    }

    pub fn save(&self, entry: &SessionEntry) -> Result<(), ClientError> {
        match &self.backing {
            Backing::Memory(slot) => {
                *slot.lock().unwrap_or_else(|e| e.into_inner()) = Some(entry.clone());
                Ok(())
            }
            Backing::Disk(path) => {
                let json = serde_json::to_string_pretty(entry)
                    .map_err(|e| ClientError::Cache(e.to_string()))?;
                fs::write(path, json).map_err(|e| ClientError::Cache(e.to_string()))
            }
        }
    }

    /// A missing, unreadable or corrupt record is simply no session; the
    /// caller re-authenticates.
    pub fn load(&self) -> Option<SessionEntry> {
        match &self.backing {
            Backing::Memory(slot) => slot.lock().unwrap_or_else(|e| e.into_inner()).clone(),
            Backing::Disk(path) => {
                let json = fs::read_to_string(path).ok()?;
                serde_json::from_str(&json).ok()
            }
        }
    }

    pub fn clear(&self) -> Result<(), ClientError> {
        match &self.backing {
            Backing::Memory(slot) => {
                *slot.lock().unwrap_or_else(|e| e.into_inner()) = None;
                Ok(())
            }
            Backing::Disk(path) => match fs::remove_file(path) {
                Ok(()) => Ok(()),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
                Err(e) => Err(ClientError::Cache(e.to_string())),
            },
        }
    }

    pub fn has_token(&self) -> bool {
        self.token().is_some()
    }

    pub fn token(&self) -> Option<String> {
        self.load()
            .map(|entry| entry.token)
            .filter(|token| !token.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(token: &str) -> SessionEntry {
        SessionEntry {
            token: token.into(),
            user: UserProfile {
                id: 1,
                username: "alice".into(),
                email: "a@x.com".into(),
                created_at: None,
            },
        }
    }

    #[test]
    fn memory_save_load_clear() {
        let cache = SessionCache::in_memory();
        assert!(cache.load().is_none());
        assert!(!cache.has_token());

        cache.save(&entry("tok")).unwrap();
        assert!(cache.has_token());
        assert_eq!(cache.load().unwrap(), entry("tok"));
        assert_eq!(cache.token().as_deref(), Some("tok"));

        cache.clear().unwrap();
        assert!(cache.load().is_none());
        assert!(!cache.has_token());
    }

    #[test]
    fn disk_persists_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");

        SessionCache::on_disk(&path).save(&entry("tok")).unwrap();

        let reopened = SessionCache::on_disk(&path);
        assert_eq!(reopened.load().unwrap(), entry("tok"));

        reopened.clear().unwrap();
        assert!(SessionCache::on_disk(&path).load().is_none());
    }

    #[test]
    fn disk_missing_file_is_no_session() {
        let dir = tempfile::tempdir().unwrap();
        let cache = SessionCache::on_disk(dir.path().join("absent.json"));
        assert!(cache.load().is_none());
        assert!(!cache.has_token());
        // Clearing an absent session is not an error.
        cache.clear().unwrap();
    }

    #[test]
    fn disk_corrupt_file_is_no_session() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, "{not json").unwrap();
        assert!(SessionCache::on_disk(&path).load().is_none());
    }

    #[test]
    fn empty_token_does_not_count() {
        let cache = SessionCache::in_memory();
        cache.save(&entry("")).unwrap();
        assert!(!cache.has_token());
        assert!(cache.token().is_none());
    }
}
