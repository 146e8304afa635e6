use crate::store::{ContentStore, StoreError};

/// Addresses to contact in one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Recipients {
    None,
    Active(Vec<String>),
}

impl Recipients {
    pub fn len(&self) -> usize {
        match self {
            Recipients::None => 0,
            Recipients::Active(emails) => emails.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Snapshot of the active subscriber list at the moment of the read.
#[tracing::instrument(name = "Resolving active recipients", skip(store))]
pub async fn active_recipients(store: &dyn ContentStore) -> Result<Recipients, StoreError> {
    let emails: Vec<String> = store
        .active_subscribers()
        .await?
        .into_iter()
        .filter(|s| s.active)
        .map(|s| s.email)
        .collect();

    tracing::info!(count = emails.len(), "Resolved active subscribers");

    if emails.is_empty() {
        Ok(Recipients::None)
    } else {
        Ok(Recipients::Active(emails))
    }
}
