//! Cross-slot duplicate tracking for one load.

use std::collections::HashSet;

use tokio::sync::Mutex;

/// Urls already accepted by some slot of the current load.
///
/// `claim` is the only way in: check and insert happen under one lock, so
/// two slots racing on the same url cannot both win.
#[derive(Debug, Default)]
pub struct ClaimedUrls {
    urls: Mutex<HashSet<String>>,
}

impl ClaimedUrls {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `url` if absent. Returns false when another slot holds it.
    pub async fn claim(&self, url: &str) -> bool {
        let mut urls = self.urls.lock().await;
        if urls.contains(url) {
            return false;
        }
        urls.insert(url.to_owned())
    }

    pub async fn len(&self) -> usize {
        self.urls.lock().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[tokio::test]
    async fn first_claim_wins() {
        let claimed = ClaimedUrls::new();
        assert!(claimed.claim("https://cataas.com/cat/a").await);
        assert!(!claimed.claim("https://cataas.com/cat/a").await);
        assert!(claimed.claim("https://cataas.com/cat/b").await);
        assert_eq!(claimed.len().await, 2);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_claims_have_one_winner() {
        let claimed = Arc::new(ClaimedUrls::new());
        let joins: Vec<_> = (0..16)
            .map(|_| {
                let claimed = Arc::clone(&claimed);
                tokio::spawn(async move { claimed.claim("https://cataas.com/cat/same").await })
            })
            .collect();

        let mut winners = 0;
        for join in joins {
            if join.await.unwrap() {
                winners += 1;
            }
        }
        assert_eq!(winners, 1);
    }
}
