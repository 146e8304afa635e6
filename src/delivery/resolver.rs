use chrono::NaiveDate;
use uuid::Uuid;

use crate::domain::Devotional;
use crate::routes::error_chain_fmt;
use crate::store::{ContentStore, StoreError};

#[derive(Debug, Clone)]
pub enum ResolvedDevotional {
    Found(Devotional),
    /// No id was requested and nothing is published for today.
    NothingToSend,
}

#[derive(thiserror::Error)]
pub enum ResolveError {
    #[error("Devotional not found")]
    NotFound,
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl std::fmt::Debug for ResolveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

/// Picks the devotional to send.
///
/// An explicit id must point at a published devotional. Without one, the
/// devotional published for `today` is used, and its absence is not an error.
#[tracing::instrument(name = "Resolving devotional", skip(store))]
pub async fn resolve_devotional(
    store: &dyn ContentStore,
    devotional_id: Option<&str>,
    today: NaiveDate,
) -> Result<ResolvedDevotional, ResolveError> {
    match devotional_id.map(str::trim).filter(|id| !id.is_empty()) {
        Some(id) => {
            let id = Uuid::parse_str(id).map_err(|_| ResolveError::NotFound)?;
            store
                .published_devotional(id)
                .await?
                .map(ResolvedDevotional::Found)
                .ok_or(ResolveError::NotFound)
        }
        None => Ok(store
            .published_devotional_for(today)
            .await?
            .map_or(ResolvedDevotional::NothingToSend, ResolvedDevotional::Found)),
    }
}
