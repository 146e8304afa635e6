use std::sync::atomic::{AtomicBool, Ordering};

use chrono::{NaiveDate, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{ContentStore, StoreError};
use crate::domain::{Devotional, Subscriber};

/// Process-local store, queried with the same filters as the database.
#[derive(Default)]
pub struct InMemoryContentStore {
    subscribers: RwLock<Vec<Subscriber>>,
    devotionals: RwLock<Vec<Devotional>>,
    unavailable: AtomicBool,
}

impl InMemoryContentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn add_subscriber(&self, email: &str, active: bool) -> Subscriber {
        let subscriber = Subscriber {
            id: Uuid::new_v4(),
            email: email.to_string(),
            subscribed_at: Utc::now(),
            active,
        };
        self.subscribers.write().await.push(subscriber.clone());
        subscriber
    }

    pub async fn add_devotional(&self, devotional: Devotional) {
        self.devotionals.write().await.push(devotional);
    }

    /// Makes every subsequent read fail, as an unreachable database would.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn check_available(&self, to_error: fn(anyhow::Error) -> StoreError) -> Result<(), StoreError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(to_error(anyhow::anyhow!("The in-memory store is unavailable")));
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl ContentStore for InMemoryContentStore {
    async fn active_subscribers(&self) -> Result<Vec<Subscriber>, StoreError> {
        self.check_available(StoreError::SubscribersUnavailable)?;
        let mut active: Vec<Subscriber> = self
            .subscribers
            .read()
            .await
            .iter()
            .filter(|s| s.active)
            .cloned()
            .collect();
        active.sort_by(|a, b| b.subscribed_at.cmp(&a.subscribed_at));
        Ok(active)
    }

    async fn published_devotional(&self, id: Uuid) -> Result<Option<Devotional>, StoreError> {
        self.check_available(StoreError::DevotionalsUnavailable)?;
        Ok(self
            .devotionals
            .read()
            .await
            .iter()
            .find(|d| d.id == id && d.published)
            .cloned())
    }

    async fn published_devotional_for(
        &self,
        date: NaiveDate,
    ) -> Result<Option<Devotional>, StoreError> {
        self.check_available(StoreError::DevotionalsUnavailable)?;
        Ok(self
            .devotionals
            .read()
            .await
            .iter()
            .filter(|d| d.date == date && d.published)
            .max_by_key(|d| d.created_at)
            .cloned())
    }
}
