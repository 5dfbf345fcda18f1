use async_trait::async_trait;
use sqlx::PgPool;

use crate::users::repo_types::{ProfileUpdate, User};

/// Persistence for user accounts, keyed by exact username.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, sqlx::Error>;

    /// Returns `None` when the username is already taken.
    async fn insert_if_absent(
        &self,
        username: &str,
        password_hash: &str,
    ) -> Result<Option<User>, sqlx::Error>;

    /// Returns `None` when no user has this username.
    async fn update_profile(
        &self,
        username: &str,
        update: ProfileUpdate<'_>,
    ) -> Result<Option<User>, sqlx::Error>;

    /// Cheap liveness check for `/health`.
    async fn ping(&self) -> Result<(), sqlx::Error>;
}

#[derive(Clone)]
pub struct PgUserStore {
    db: PgPool,
}

impl PgUserStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, password_hash, grade, subject, tutor_name, created_at
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.db)
        .await
    }

    async fn insert_if_absent(
        &self,
        username: &str,
        password_hash: &str,
    ) -> Result<Option<User>, sqlx::Error> {
        // The unique index arbitrates concurrent registrations.
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, password_hash)
            VALUES ($1, $2)
            ON CONFLICT (username) DO NOTHING
            RETURNING id, username, password_hash, grade, subject, tutor_name, created_at
            "#,
        )
        .bind(username)
        .bind(password_hash)
        .fetch_optional(&self.db)
        .await
    }

    async fn update_profile(
        &self,
        username: &str,
        update: ProfileUpdate<'_>,
    ) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            UPDATE users
               SET grade = $2, subject = $3, tutor_name = $4
             WHERE username = $1
            RETURNING id, username, password_hash, grade, subject, tutor_name, created_at
            "#,
        )
        .bind(username)
        .bind(update.grade)
        .bind(update.subject)
        .bind(update.tutor_name)
        .fetch_optional(&self.db)
        .await
    }

    async fn ping(&self) -> Result<(), sqlx::Error> {
        sqlx::query("SELECT 1").execute(&self.db).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[sqlx::test(migrations = "./migrations")]
    async fn duplicate_insert_returns_none(pool: PgPool) {
        let store = PgUserStore::new(pool);
        let first = store.insert_if_absent("alice", "h1").await.unwrap().unwrap();
        assert_eq!(first.username, "alice");
        assert!(first.grade.is_none() && first.subject.is_none() && first.tutor_name.is_none());

        assert!(store.insert_if_absent("alice", "h2").await.unwrap().is_none());

        let stored = store.find_by_username("alice").await.unwrap().unwrap();
        assert_eq!(stored.id, first.id);
        assert_eq!(stored.password_hash, "h1");
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn usernames_match_case_sensitively(pool: PgPool) {
        let store = PgUserStore::new(pool);
        store.insert_if_absent("Alice", "h").await.unwrap().unwrap();
        assert!(store.find_by_username("alice").await.unwrap().is_none());
        assert!(store.insert_if_absent("alice", "h").await.unwrap().is_some());
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn concurrent_inserts_have_one_winner(pool: PgPool) {
        let store = PgUserStore::new(pool);
        let (a, b) = tokio::join!(
            store.insert_if_absent("bob", "h1"),
            store.insert_if_absent("bob", "h2"),
        );
        let winners = [a.unwrap(), b.unwrap()]
            .iter()
            .filter(|u| u.is_some())
            .count();
        assert_eq!(winners, 1);
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn ids_increase_with_each_insert(pool: PgPool) {
        let store = PgUserStore::new(pool);
        let a = store.insert_if_absent("a", "h").await.unwrap().unwrap();
        let b = store.insert_if_absent("b", "h").await.unwrap().unwrap();
        assert!(b.id > a.id);
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn update_profile_writes_all_fields(pool: PgPool) {
        let store = PgUserStore::new(pool);
        store.insert_if_absent("carol", "h").await.unwrap();

        let update = ProfileUpdate {
            grade: "5",
            subject: "math",
            tutor_name: "Dr. Aisha Patel",
        };
        let user = store.update_profile("carol", update).await.unwrap().unwrap();
        assert_eq!(user.grade.as_deref(), Some("5"));
        assert_eq!(user.subject.as_deref(), Some("math"));
        assert_eq!(user.tutor_name.as_deref(), Some("Dr. Aisha Patel"));

        let reread = store.find_by_username("carol").await.unwrap().unwrap();
        assert_eq!(reread.tutor_name.as_deref(), Some("Dr. Aisha Patel"));
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn update_profile_unknown_user_returns_none(pool: PgPool) {
        let store = PgUserStore::new(pool);
        let update = ProfileUpdate {
            grade: "5",
            subject: "math",
            tutor_name: "Prof. James Wilson",
        };
        assert!(store.update_profile("ghost", update).await.unwrap().is_none());
        store.ping().await.unwrap();
    }
}
