//! Recently viewed products bound to the visitor session.

use stride_core::ProductId;
use stride_core::catalog::RecentlyViewed;
use tower_sessions::Session;

use crate::models::session_keys;

/// Read the tracker from the session. A missing or unreadable entry is empty.
pub async fn load(session: &Session) -> RecentlyViewed {
    match session
        .get::<Vec<ProductId>>(session_keys::RECENTLY_VIEWED)
        .await
    {
        Ok(Some(ids)) => RecentlyViewed::from_ids(ids),
        Ok(None) => RecentlyViewed::new(),
        Err(e) => {
            tracing::debug!(error = %e, "Discarding unreadable recently viewed entry");
            RecentlyViewed::new()
        }
    }
}

/// Record a product view and store the tracker back when it changed.
///
/// # Errors
///
/// Returns an error if the session cannot be written.
pub async fn track(
    session: &Session,
    id: ProductId,
) -> Result<RecentlyViewed, tower_sessions::session::Error> {
    let mut recent = load(session).await;
    if recent.track(id) {
        session
            .insert(session_keys::RECENTLY_VIEWED, recent.ids())
            .await?;
    }
    Ok(recent)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use tower_sessions::MemoryStore;

    use super::*;

    fn session() -> Session {
        Session::new(None, Arc::new(MemoryStore::default()), None)
    }

    fn ids(recent: &RecentlyViewed) -> Vec<i32> {
        recent.ids().iter().map(ProductId::as_i32).collect()
    }

    #[tokio::test]
    async fn test_track_keeps_three_most_recent() {
        let session = session();
        for id in 1..=4 {
            track(&session, ProductId::new(id)).await.unwrap();
        }

        assert_eq!(ids(&load(&session).await), vec![4, 3, 2]);
    }

    #[tokio::test]
    async fn test_revisit_does_not_reorder() {
        let session = session();
        for id in [1, 2, 3, 1] {
            track(&session, ProductId::new(id)).await.unwrap();
        }

        assert_eq!(ids(&load(&session).await), vec![3, 2, 1]);
    }

    #[tokio::test]
    async fn test_unreadable_entry_is_empty() {
        let session = session();
        session
            .insert(session_keys::RECENTLY_VIEWED, "not a list")
            .await
            .unwrap();

        assert!(load(&session).await.is_empty());

        track(&session, ProductId::new(9)).await.unwrap();
        assert_eq!(ids(&load(&session).await), vec![9]);
    }
}
