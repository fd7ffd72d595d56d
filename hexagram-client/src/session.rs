//! Session state: the token bundle and the selected room
//!
//! The bundle is persisted field by field under fixed keys and mirrored into
//! watch channels so any number of consumers can follow login, refresh and
//! forced logout as they happen.

use std::sync::Arc;

use hexagram_core::{RoomDesc, TokenBundle};
use tokio::sync::watch;

use crate::error::Result;
use crate::storage::{MemoryStorage, Storage};

pub const TOKEN_KEY: &str = "x-user-token";
pub const USER_ID_KEY: &str = "x-user-id";
pub const USER_NAME_KEY: &str = "x-user-name";
pub const CREATED_AT_KEY: &str = "x-user-id-created-at";

/// Every key the session writes
pub const SESSION_KEYS: [&str; 4] = [TOKEN_KEY, USER_ID_KEY, USER_NAME_KEY, CREATED_AT_KEY];

pub struct Session {
    storage: Arc<dyn Storage>,
    bundle: watch::Sender<Option<TokenBundle>>,
    room: watch::Sender<Option<RoomDesc>>,
}

impl Session {
    /// Restore the session persisted in `storage`, if complete
    pub fn load(storage: Arc<dyn Storage>) -> Self {
        let restored = read_bundle(storage.as_ref());
        match &restored {
            Some(bundle) => tracing::debug!("Restored session for user {}", bundle.user_id),
            None => tracing::debug!("No stored session"),
        }

        Self {
            storage,
            bundle: watch::Sender::new(restored),
            room: watch::Sender::new(None),
        }
    }

    /// Session kept only in memory
    pub fn in_memory() -> Self {
        Self::load(Arc::new(MemoryStorage::new()))
    }

    pub fn storage(&self) -> &Arc<dyn Storage> {
        &self.storage
    }

    pub fn bundle(&self) -> Option<TokenBundle> {
        self.bundle.borrow().clone()
    }

    pub fn token(&self) -> Option<String> {
        self.bundle.borrow().as_ref().map(|b| b.token.clone())
    }

    pub fn is_logged_in(&self) -> bool {
        self.bundle.borrow().is_some()
    }

    /// Follow token changes
    pub fn subscribe(&self) -> watch::Receiver<Option<TokenBundle>> {
        self.bundle.subscribe()
    }

    /// Persist a freshly issued bundle and publish it
    ///
    /// If any field fails to store, the fields already written are restored
    /// to their previous values and the published bundle is left unchanged.
    pub fn process_token(&self, bundle: &TokenBundle) -> Result<()> {
        let fields = [
            (TOKEN_KEY, bundle.token.clone()),
            (USER_ID_KEY, bundle.user_id.to_string()),
            (USER_NAME_KEY, bundle.user_name.clone()),
            (CREATED_AT_KEY, bundle.created_at.to_string()),
        ];
        let previous: Vec<Option<String>> =
            fields.iter().map(|(key, _)| self.storage.get(key)).collect();

        for (written, (key, value)) in fields.iter().enumerate() {
            if let Err(e) = self.storage.set(key, value) {
                tracing::error!("Failed to store {}, restoring previous session: {}", key, e);
                self.restore(&fields[..written], &previous);
                return Err(e);
            }
        }

        self.bundle.send_replace(Some(bundle.clone()));
        tracing::info!("Session stored for {} (id {})", bundle.user_name, bundle.user_id);
        Ok(())
    }

    fn restore(&self, written: &[(&str, String)], previous: &[Option<String>]) {
        for ((key, _), old) in written.iter().zip(previous) {
            let restored = match old {
                Some(value) => self.storage.set(key, value),
                None => self.storage.remove(key),
            };
            if let Err(e) = restored {
                tracing::error!("Failed to restore {}: {}", key, e);
            }
        }
    }

    /// Forget the identity, both persisted and in memory
    ///
    /// Every key is removed even if an earlier removal fails; the first
    /// failure is returned.
    pub fn clear(&self) -> Result<()> {
        // Observers learn about the logout even when storage fails.
        self.bundle.send_replace(None);

        let mut first_error = None;
        for key in SESSION_KEYS {
            if let Err(e) = self.storage.remove(key) {
                tracing::error!("Failed to remove {}: {}", key, e);
                first_error.get_or_insert(e);
            }
        }

        match first_error {
            Some(e) => Err(e),
            None => {
                tracing::info!("Session cleared");
                Ok(())
            }
        }
    }

    pub fn select_room(&self, room: RoomDesc) {
        self.room.send_replace(Some(room));
    }

    pub fn selected_room(&self) -> Option<RoomDesc> {
        self.room.borrow().clone()
    }

    pub fn watch_room(&self) -> watch::Receiver<Option<RoomDesc>> {
        self.room.subscribe()
    }
}

fn read_bundle(storage: &dyn Storage) -> Option<TokenBundle> {
    Some(TokenBundle {
        token: storage.get(TOKEN_KEY)?,
        user_id: storage.get(USER_ID_KEY)?.parse().ok()?,
        user_name: storage.get(USER_NAME_KEY)?,
        created_at: storage.get(CREATED_AT_KEY)?.parse().ok()?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Mutex;

    /// Memory storage that can be told to fail one write
    #[derive(Default)]
    struct FlakyStorage {
        inner: MemoryStorage,
        fail_set: Mutex<Option<&'static str>>,
        fail_next_remove: AtomicBool,
    }

    fn disk_error() -> crate::error::ClientError {
        std::io::Error::new(std::io::ErrorKind::Other, "disk unavailable").into()
    }

    impl Storage for FlakyStorage {
        fn get(&self, key: &str) -> Option<String> {
            self.inner.get(key)
        }

        fn set(&self, key: &str, value: &str) -> Result<()> {
            if *self.fail_set.lock().unwrap() == Some(key) {
                return Err(disk_error());
            }
            self.inner.set(key, value)
        }

        fn remove(&self, key: &str) -> Result<()> {
            if self.fail_next_remove.swap(false, Ordering::SeqCst) {
                return Err(disk_error());
            }
            self.inner.remove(key)
        }
    }

    fn alice() -> TokenBundle {
        TokenBundle {
            token: "tok-1".to_string(),
            created_at: 1_700_000_000_000,
            user_id: 4,
            user_name: "Alice".to_string(),
        }
    }

    #[test]
    fn test_process_token_persists_and_publishes() {
        let storage = Arc::new(MemoryStorage::new());
        let session = Session::load(storage.clone());
        let rx = session.subscribe();
        assert!(rx.borrow().is_none());

        session.process_token(&alice()).unwrap();

        assert_eq!(storage.get(TOKEN_KEY).as_deref(), Some("tok-1"));
        assert_eq!(storage.get(USER_ID_KEY).as_deref(), Some("4"));
        assert_eq!(storage.get(USER_NAME_KEY).as_deref(), Some("Alice"));
        assert_eq!(storage.get(CREATED_AT_KEY).as_deref(), Some("1700000000000"));
        assert_eq!(rx.borrow().as_ref(), Some(&alice()));
        assert_eq!(session.token().as_deref(), Some("tok-1"));
    }

    #[test]
    fn test_load_restores_bundle() {
        let storage = Arc::new(MemoryStorage::new());
        Session::load(storage.clone()).process_token(&alice()).unwrap();

        let restored = Session::load(storage);
        assert_eq!(restored.bundle(), Some(alice()));
    }

    #[test]
    fn test_partial_storage_is_not_a_session() {
        let storage = Arc::new(MemoryStorage::new());
        storage.set(TOKEN_KEY, "tok").unwrap();
        storage.set(USER_ID_KEY, "not-a-number").unwrap();
        assert!(!Session::load(storage).is_logged_in());
    }

    #[test]
    fn test_clear_removes_every_key() {
        let storage = Arc::new(MemoryStorage::new());
        let session = Session::load(storage.clone());
        session.process_token(&alice()).unwrap();
        let rx = session.subscribe();

        session.clear().unwrap();

        assert!(storage.is_empty());
        assert!(rx.borrow().is_none());
        assert!(!session.is_logged_in());
    }

    #[test]
    fn test_clear_keeps_going_after_failed_remove() {
        let storage = Arc::new(FlakyStorage::default());
        let session = Session::load(storage.clone());
        session.process_token(&alice()).unwrap();
        storage.fail_next_remove.store(true, Ordering::SeqCst);

        assert!(session.clear().is_err());

        assert!(!session.is_logged_in());
        assert_eq!(storage.get(USER_ID_KEY), None);
        assert_eq!(storage.get(USER_NAME_KEY), None);
        assert_eq!(storage.get(CREATED_AT_KEY), None);
        assert!(!Session::load(storage).is_logged_in());
    }

    #[test]
    fn test_failed_store_restores_previous_bundle() {
        let storage = Arc::new(FlakyStorage::default());
        let session = Session::load(storage.clone());
        session.process_token(&alice()).unwrap();

        *storage.fail_set.lock().unwrap() = Some(USER_NAME_KEY);
        let bob = TokenBundle {
            token: "tok-9".to_string(),
            created_at: 1_800_000_000_000,
            user_id: 9,
            user_name: "Bob".to_string(),
        };
        assert!(session.process_token(&bob).is_err());

        assert_eq!(storage.get(TOKEN_KEY).as_deref(), Some("tok-1"));
        assert_eq!(storage.get(USER_ID_KEY).as_deref(), Some("4"));
        assert_eq!(session.bundle(), Some(alice()));
        assert_eq!(Session::load(storage).bundle(), Some(alice()));
    }

    #[test]
    fn test_failed_first_store_leaves_nothing_behind() {
        let storage = Arc::new(FlakyStorage::default());
        *storage.fail_set.lock().unwrap() = Some(USER_ID_KEY);
        let session = Session::load(storage.clone());

        assert!(session.process_token(&alice()).is_err());

        assert!(storage.inner.is_empty());
        assert!(!session.is_logged_in());
    }
}
