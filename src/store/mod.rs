//! Read access to the hosted relational store.
//!
//! Handlers only ever see [`ContentStore`], so the Postgres implementation
//! can be swapped for an in-memory one in tests.

mod memory;
mod postgres;

use chrono::NaiveDate;
use uuid::Uuid;

use crate::domain::{Devotional, Subscriber};
use crate::routes::error_chain_fmt;

pub use memory::InMemoryContentStore;
pub use postgres::PgContentStore;

#[derive(thiserror::Error)]
pub enum StoreError {
    #[error("Error fetching subscribers")]
    SubscribersUnavailable(#[source] anyhow::Error),
    #[error("Error fetching devotional")]
    DevotionalsUnavailable(#[source] anyhow::Error),
}

impl std::fmt::Debug for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

#[async_trait::async_trait]
pub trait ContentStore: Send + Sync {
    /// Every subscriber with `active = true`, newest first.
    async fn active_subscribers(&self) -> Result<Vec<Subscriber>, StoreError>;

    /// The devotional with this id, provided it is published.
    async fn published_devotional(&self, id: Uuid) -> Result<Option<Devotional>, StoreError>;

    /// The published devotional scheduled for `date`, if any.
    async fn published_devotional_for(
        &self,
        date: NaiveDate,
    ) -> Result<Option<Devotional>, StoreError>;
}
