use anyhow::Context;
use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

use super::{ContentStore, StoreError};
use crate::domain::{Devotional, Subscriber};

#[derive(Clone)]
pub struct PgContentStore {
    pool: PgPool,
}

impl PgContentStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[tracing::instrument(name = "Running database migrations", skip(self))]
    pub async fn migrate(&self) -> Result<(), anyhow::Error> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .context("Failed to migrate the database")
    }
}

#[async_trait::async_trait]
impl ContentStore for PgContentStore {
    #[tracing::instrument(name = "Get active subscribers", skip(self))]
    async fn active_subscribers(&self) -> Result<Vec<Subscriber>, StoreError> {
        sqlx::query_as::<_, Subscriber>(
            r#"
            SELECT id, email, subscribed_at, active
            FROM newsletter_subscribers
            WHERE active = true
            ORDER BY subscribed_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .context("Failed to query active subscribers")
        .map_err(StoreError::SubscribersUnavailable)
    }

    #[tracing::instrument(name = "Get published devotional by id", skip(self))]
    async fn published_devotional(&self, id: Uuid) -> Result<Option<Devotional>, StoreError> {
        sqlx::query_as::<_, Devotional>(
            r#"
            SELECT id, title, content, scripture_reference, date, published, created_at
            FROM devotionals
            WHERE id = $1 AND published = true
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to query devotional by id")
        .map_err(StoreError::DevotionalsUnavailable)
    }

    #[tracing::instrument(name = "Get published devotional by date", skip(self))]
    async fn published_devotional_for(
        &self,
        date: NaiveDate,
    ) -> Result<Option<Devotional>, StoreError> {
        sqlx::query_as::<_, Devotional>(
            r#"
            SELECT id, title, content, scripture_reference, date, published, created_at
            FROM devotionals
            WHERE date = $1 AND published = true
            ORDER BY created_at DESC
            LIMIT 1
            "#,
        )
        .bind(date)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to query devotional by date")
        .map_err(StoreError::DevotionalsUnavailable)
    }
}
