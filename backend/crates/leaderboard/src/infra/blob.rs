//! Blob Storage Repository
//!
//! Stores the leaderboard document as one JSON value and the session
//! pointer as a bare id string, each under its own key of a
//! [`BlobStorage`]. Which storage (files on disk, memory) is injected.

use kernel::id::UserId;
use platform::storage::{BlobStorage, StorageError};

use crate::application::config::LeaderboardConfig;
use crate::domain::document::LeaderboardDocument;
use crate::domain::repository::{DocumentRepository, SessionRepository};
use crate::error::LeaderboardResult;

pub struct BlobLeaderboardRepository<S>
where
    S: BlobStorage,
{
    storage: S,
    document_key: String,
    session_key: String,
}

impl<S> BlobLeaderboardRepository<S>
where
    S: BlobStorage,
{
    pub fn new(storage: S, config: &LeaderboardConfig) -> Self {
        Self {
            storage,
            document_key: config.document_key.clone(),
            session_key: config.session_key.clone(),
        }
    }

    /// Unreadable content counts as no content; the next save overwrites it
    fn start_empty(&self, error: &dyn std::error::Error) -> LeaderboardDocument {
        tracing::warn!(
            key = %self.document_key,
            error = %error,
            "Stored leaderboard document is corrupt, starting empty"
        );
        LeaderboardDocument::default()
    }
}

impl<S> DocumentRepository for BlobLeaderboardRepository<S>
where
    S: BlobStorage,
{
    fn load(&self) -> LeaderboardResult<LeaderboardDocument> {
        let raw = match self.storage.read(&self.document_key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Ok(LeaderboardDocument::default()),
            Err(e @ StorageError::Corrupt { .. }) => return Ok(self.start_empty(&e)),
            Err(e) => return Err(e.into()),
        };

        match serde_json::from_str::<LeaderboardDocument>(&raw) {
            Ok(document) => Ok(document),
            Err(e) => Ok(self.start_empty(&e)),
        }
    }

    fn save(&self, document: &LeaderboardDocument) -> LeaderboardResult<()> {
        let raw = serde_json::to_string(document)?;
        self.storage.write(&self.document_key, &raw)?;

        tracing::debug!(
            users = document.users.len(),
            submissions = document.submissions.len(),
            bytes = raw.len(),
            "Leaderboard document saved"
        );
        Ok(())
    }
}

impl<S> SessionRepository for BlobLeaderboardRepository<S>
where
    S: BlobStorage,
{
    fn last_active_user(&self) -> LeaderboardResult<Option<UserId>> {
        let raw = match self.storage.read(&self.session_key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Ok(None),
            Err(e @ StorageError::Corrupt { .. }) => {
                tracing::warn!(key = %self.session_key, error = %e, "Ignoring unreadable session pointer");
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };

        match raw.parse::<UserId>() {
            Ok(user_id) => Ok(Some(user_id)),
            Err(e) => {
                tracing::warn!(key = %self.session_key, error = %e, "Ignoring malformed session pointer");
                Ok(None)
            }
        }
    }

    fn set_last_active_user(&self, user_id: &UserId) -> LeaderboardResult<()> {
        self.storage.write(&self.session_key, &user_id.to_string())?;
        Ok(())
    }

    fn clear_last_active_user(&self) -> LeaderboardResult<()> {
        self.storage.remove(&self.session_key)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entity::{submission::Submission, user::User};
    use crate::domain::value_object::user_name::UserName;
    use chrono::{DateTime, Utc};
    use platform::storage::{FileStorage, MemoryStorage};

    fn sample_document() -> LeaderboardDocument {
        let at = DateTime::<Utc>::from_timestamp_millis(1_704_067_200_000).unwrap();
        let mut user = User::new(&UserName::new("Alice").unwrap(), at);
        user.record_submission();
        LeaderboardDocument {
            submissions: vec![Submission::new(user.id, at)],
            users: vec![user],
        }
    }

    #[test]
    fn test_absent_document_is_empty() {
        let repo = BlobLeaderboardRepository::new(MemoryStorage::new(), &LeaderboardConfig::default());
        assert_eq!(repo.load().unwrap(), LeaderboardDocument::default());
    }

    #[test]
    fn test_corrupt_document_is_empty() {
        let storage = MemoryStorage::new();
        storage.write("leaderboard_db", "{not json").unwrap();
        let repo = BlobLeaderboardRepository::new(storage, &LeaderboardConfig::default());
        assert_eq!(repo.load().unwrap(), LeaderboardDocument::default());
    }

    #[test]
    fn test_wrong_shape_is_empty() {
        let storage = MemoryStorage::new();
        storage
            .write("leaderboard_db", r#"{"users":[{"id":"x"}],"submissions":[]}"#)
            .unwrap();
        let repo = BlobLeaderboardRepository::new(storage, &LeaderboardConfig::default());
        assert_eq!(repo.load().unwrap(), LeaderboardDocument::default());
    }

    #[test]
    fn test_persisted_json_layout() {
        let storage = MemoryStorage::new();
        let repo = BlobLeaderboardRepository::new(storage.clone(), &LeaderboardConfig::default());
        let document = sample_document();
        repo.save(&document).unwrap();

        let raw = storage.read("leaderboard_db").unwrap().unwrap();
        let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(json["users"][0]["username"], "Alice");
        assert_eq!(json["users"][0]["total_submissions"], 1);
        assert_eq!(json["submissions"][0]["user_id"], json["users"][0]["id"]);
        assert_eq!(json["submissions"][0]["created_at"], 1_704_067_200_000_i64);
    }

    #[test]
    fn test_reload_from_disk_is_identical() {
        let dir = tempfile::tempdir().unwrap();
        let config = LeaderboardConfig::default();
        let document = sample_document();

        BlobLeaderboardRepository::new(FileStorage::open(dir.path()).unwrap(), &config)
            .save(&document)
            .unwrap();

        let reopened = BlobLeaderboardRepository::new(FileStorage::open(dir.path()).unwrap(), &config);
        assert_eq!(reopened.load().unwrap(), document);
    }

    #[test]
    fn test_non_utf8_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("leaderboard_db"), [0xff, 0xfe, 0x7b, 0x00]).unwrap();
        std::fs::write(dir.path().join("last_user_id"), [0xc3, 0x28]).unwrap();

        let repo = BlobLeaderboardRepository::new(
            FileStorage::open(dir.path()).unwrap(),
            &LeaderboardConfig::default(),
        );
        assert_eq!(repo.load().unwrap(), LeaderboardDocument::default());
        assert_eq!(repo.last_active_user().unwrap(), None);

        // The next save replaces the unreadable bytes
        let document = sample_document();
        repo.save(&document).unwrap();
        assert_eq!(repo.load().unwrap(), document);
    }

    #[test]
    fn test_session_pointer() {
        let repo = BlobLeaderboardRepository::new(MemoryStorage::new(), &LeaderboardConfig::default());
        assert_eq!(repo.last_active_user().unwrap(), None);

        let id = UserId::new();
        repo.set_last_active_user(&id).unwrap();
        assert_eq!(repo.last_active_user().unwrap(), Some(id));

        repo.clear_last_active_user().unwrap();
        assert_eq!(repo.last_active_user().unwrap(), None);
    }

    #[test]
    fn test_malformed_session_pointer_ignored() {
        let storage = MemoryStorage::new();
        storage.write("last_user_id", "garbage").unwrap();
        let repo = BlobLeaderboardRepository::new(storage, &LeaderboardConfig::default());
        assert_eq!(repo.last_active_user().unwrap(), None);
    }
}
