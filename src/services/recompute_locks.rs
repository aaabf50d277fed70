use std::{
    collections::HashMap,
    sync::{Arc, Mutex, PoisonError},
};

use tokio::sync::OwnedMutexGuard;

/// Serialises recomputations per edition. Two recomputes of the same edition
/// never interleave their fetch and write; different editions proceed in
/// parallel.
#[derive(Clone, Default)]
pub struct RecomputeLocks(Arc<Mutex<HashMap<u32, Arc<tokio::sync::Mutex<()>>>>>);

impl RecomputeLocks {
    pub async fn acquire(&self, edition_id: u32) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.0.lock().unwrap_or_else(PoisonError::into_inner);
            locks.entry(edition_id).or_default().clone()
        };
        tracing::debug!("waiting for recompute lock of edition {}", edition_id);
        lock.lock_owned().await
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[tokio::test]
    async fn test_same_edition_waits() {
        let locks = RecomputeLocks::default();
        let guard = locks.acquire(1).await;
        let contender = locks.clone();
        let waiting = tokio::spawn(async move {
            let _guard = contender.acquire(1).await;
        });
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(!waiting.is_finished());
        drop(guard);
        waiting.await.expect("second recompute ran");
    }

    #[tokio::test]
    async fn test_other_editions_do_not_wait() {
        let locks = RecomputeLocks::default();
        let _first = locks.acquire(1).await;
        let _second = tokio::time::timeout(Duration::from_millis(100), locks.acquire(2))
            .await
            .expect("edition 2 is not blocked by edition 1");
    }
}
