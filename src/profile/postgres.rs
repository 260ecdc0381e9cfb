//! PostgreSQL-backed user documents (`sql/schema.sql`).

use async_trait::async_trait;
use sqlx::{Connection, PgPool, Row, postgres::PgPoolOptions};
use std::time::Duration;
use tracing::{Instrument, info_span};
use uuid::Uuid;

use super::{Profile, ProfileError, ProfileStore, UserDocument};
use crate::session::SessionContext;

#[derive(Clone, Debug)]
pub struct PgProfileStore {
    pool: PgPool,
}

impl PgProfileStore {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Open a small connection pool against `dsn`.
    ///
    /// # Errors
    /// Returns an error if the database is unreachable.
    pub async fn connect(dsn: &str) -> Result<Self, ProfileError> {
        let pool = PgPoolOptions::new()
            .min_connections(1)
            .max_connections(5)
            .max_lifetime(Duration::from_secs(60 * 2))
            .test_before_acquire(true)
            .connect(dsn)
            .await?;
        Ok(Self::new(pool))
    }
}

#[async_trait]
impl ProfileStore for PgProfileStore {
    fn backend(&self) -> &'static str {
        "postgresql"
    }

    async fn ping(&self) -> Result<(), ProfileError> {
        let acquire_span = info_span!(
            "db.acquire",
            db.system = "postgresql",
            db.operation = "ACQUIRE"
        );
        let mut conn = self.pool.acquire().instrument(acquire_span).await?;
        let ping_span = info_span!("db.ping", db.system = "postgresql", db.operation = "PING");
        conn.ping().instrument(ping_span).await?;
        Ok(())
    }

    async fn create_user(&self, session: &SessionContext) -> Result<(), ProfileError> {
        let query = r"
            INSERT INTO users (id, email)
            VALUES ($1, $2)
            ON CONFLICT (email) DO NOTHING
        ";
        let span = info_span!(
            "db.query",
            db.system = "postgresql",
            db.operation = "INSERT",
            db.statement = query
        );
        sqlx::query(query)
            .bind(Uuid::new_v4())
            .bind(&session.email)
            .execute(&self.pool)
            .instrument(span)
            .await?;
        Ok(())
    }

    async fn current_user(
        &self,
        session: &SessionContext,
    ) -> Result<Option<UserDocument>, ProfileError> {
        let query = "SELECT id, email, profile::text AS profile FROM users WHERE email = $1";
        let span = info_span!(
            "db.query",
            db.system = "postgresql",
            db.operation = "SELECT",
            db.statement = query
        );
        let row = sqlx::query(query)
            .bind(&session.email)
            .fetch_optional(&self.pool)
            .instrument(span)
            .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let profile_json: Option<String> = row.try_get("profile")?;
        let profile = profile_json
            .map(|json| serde_json::from_str::<Profile>(&json))
            .transpose()?;

        Ok(Some(UserDocument {
            id: row.try_get("id")?,
            email: row.try_get("email")?,
            profile,
        }))
    }

    async fn initialize_profile(
        &self,
        session: &SessionContext,
        profile: &Profile,
    ) -> Result<(), ProfileError> {
        let payload = serde_json::to_string(profile)?;
        let query = r"
            UPDATE users
            SET profile = $2::jsonb, updated_at = NOW()
            WHERE email = $1
        ";
        let span = info_span!(
            "db.query",
            db.system = "postgresql",
            db.operation = "UPDATE",
            db.statement = query
        );
        let result = sqlx::query(query)
            .bind(&session.email)
            .bind(payload)
            .execute(&self.pool)
            .instrument(span)
            .await?;

        if result.rows_affected() == 0 {
            return Err(ProfileError::NotFound(session.email.clone()));
        }
        Ok(())
    }
}
