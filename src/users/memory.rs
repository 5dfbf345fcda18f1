use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use time::OffsetDateTime;

use crate::users::{
    repo::UserStore,
    repo_types::{ProfileUpdate, User},
};

#[derive(Default)]
struct Inner {
    next_id: i64,
    by_username: HashMap<String, User>,
}

/// Process-local store. Every operation runs under one lock, so
/// check-and-insert is atomic.
#[derive(Default)]
pub struct MemoryUserStore {
    inner: Mutex<Inner>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Inner>, sqlx::Error> {
        self.inner
            .lock()
            .map_err(|_| sqlx::Error::Protocol("memory store lock poisoned".into()))
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, sqlx::Error> {
        Ok(self.lock()?.by_username.get(username).cloned())
    }

    async fn insert_if_absent(
        &self,
        username: &str,
        password_hash: &str,
    ) -> Result<Option<User>, sqlx::Error> {
        let mut inner = self.lock()?;
        if inner.by_username.contains_key(username) {
            return Ok(None);
        }
        inner.next_id += 1;
        let user = User {
            id: inner.next_id,
            username: username.to_string(),
            password_hash: password_hash.to_string(),
            grade: None,
            subject: None,
            tutor_name: None,
            created_at: OffsetDateTime::now_utc(),
        };
        inner.by_username.insert(user.username.clone(), user.clone());
        Ok(Some(user))
    }

    async fn update_profile(
        &self,
        username: &str,
        update: ProfileUpdate<'_>,
    ) -> Result<Option<User>, sqlx::Error> {
        let mut inner = self.lock()?;
        let Some(user) = inner.by_username.get_mut(username) else {
            return Ok(None);
        };
        user.grade = Some(update.grade.to_string());
        user.subject = Some(update.subject.to_string());
        user.tutor_name = Some(update.tutor_name.to_string());
        Ok(Some(user.clone()))
    }

    async fn ping(&self) -> Result<(), sqlx::Error> {
        self.lock().map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[tokio::test]
    async fn insert_assigns_increasing_ids_and_rejects_duplicates() {
        let store = MemoryUserStore::new();
        let a = store.insert_if_absent("alice", "h1").await.unwrap().unwrap();
        let b = store.insert_if_absent("bob", "h2").await.unwrap().unwrap();
        assert!(b.id > a.id);
        assert!(store.insert_if_absent("alice", "h3").await.unwrap().is_none());

        let stored = store.find_by_username("alice").await.unwrap().unwrap();
        assert_eq!(stored.password_hash, "h1");
    }

    #[tokio::test]
    async fn lookup_is_case_sensitive() {
        let store = MemoryUserStore::new();
        store.insert_if_absent("Alice", "h").await.unwrap();
        assert!(store.find_by_username("alice").await.unwrap().is_none());
        assert!(store.insert_if_absent("alice", "h").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn update_profile_sets_all_three_fields() {
        let store = MemoryUserStore::new();
        store.insert_if_absent("carol", "h").await.unwrap();
        let update = ProfileUpdate {
            grade: "7",
            subject: "physics",
            tutor_name: "Prof. James Wilson",
        };
        let user = store.update_profile("carol", update).await.unwrap().unwrap();
        assert_eq!(user.grade.as_deref(), Some("7"));
        assert_eq!(user.subject.as_deref(), Some("physics"));
        assert_eq!(user.tutor_name.as_deref(), Some("Prof. James Wilson"));

        assert!(store.update_profile("nobody", update).await.unwrap().is_none());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_inserts_of_one_username_yield_one_winner() {
        let store = Arc::new(MemoryUserStore::new());
        let mut handles = Vec::new();
        for i in 0..16 {
            let store = Arc::clone(&store);
            handles.push(tokio::spawn(async move {
                store
                    .insert_if_absent("dave", &format!("h{i}"))
                    .await
                    .unwrap()
                    .is_some()
            }));
        }
        let mut winners = 0;
        for h in handles {
            if h.await.unwrap() {
                winners += 1;
            }
        }
        assert_eq!(winners, 1);
    }
}
