//! Cache Module
//!
//! Redis-backed cache for conversation state. The cache is an accelerator,
//! never a source of truth: every operation degrades to the database path
//! when Redis is unavailable, and failures are logged at warn level.

use bson::oid::ObjectId;
use redis::aio::ConnectionManager;
use redis::{AsyncCommands, Client};
use tracing::{info, warn};

/// Seconds a cached summary stays valid without being refreshed.
const SUMMARY_TTL_SECS: u64 = 3600;

/// Cache key prefixes.
pub mod keys {
    /// Prefix for rolling conversation summaries (e.g. "conversation:summary:user_id")
    pub const CONVERSATION_SUMMARY: &str = "conversation:summary:";

    /// Generates a summary key for a user
    #[inline]
    pub fn summary(user_id: impl std::fmt::Display) -> String {
        format!("{}{}", CONVERSATION_SUMMARY, user_id)
    }
}

/// Conversation summary cache.
///
/// Holds an optional connection manager: when Redis cannot be reached at
/// startup the cache runs disabled and every lookup is a miss.
#[derive(Clone)]
pub struct ConversationCache {
    conn: Option<ConnectionManager>,
}

impl ConversationCache {
    /// Connect to Redis at the configured URL.
    ///
    /// A connection failure downgrades the cache to a no-op rather than
    /// failing the boot; the companion works without it, just slower.
    pub async fn connect(url: &str) -> Self {
        let conn = match Client::open(url) {
            Ok(client) => match ConnectionManager::new(client).await {
                Ok(conn) => {
                    info!("Redis connection established");
                    Some(conn)
                }
                Err(e) => {
                    warn!(url = %url, error = %e, "Redis unreachable; conversation cache disabled");
                    None
                }
            },
            Err(e) => {
                warn!(url = %url, error = %e, "Invalid Redis URL; conversation cache disabled");
                None
            }
        };

        Self { conn }
    }

    /// A cache that never hits, for tests and cache-less deployments.
    pub fn disabled() -> Self {
        Self { conn: None }
    }

    /// Fetch the cached summary for a user, treating any failure as a miss.
    pub async fn get_summary(&self, user_id: ObjectId) -> Option<String> {
        let mut conn = self.conn.clone()?;
        match conn.get::<_, Option<String>>(keys::summary(user_id)).await {
            Ok(summary) => summary,
            Err(e) => {
                warn!(error = %e, "Conversation cache read failed");
                None
            }
        }
    }

    /// Store a user's summary with a bounded TTL.
    pub async fn put_summary(&self, user_id: ObjectId, summary: &str) {
        let Some(mut conn) = self.conn.clone() else {
            return;
        };
        if let Err(e) = conn
            .set_ex::<_, _, ()>(keys::summary(user_id), summary, SUMMARY_TTL_SECS)
            .await
        {
            warn!(error = %e, "Conversation cache write failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_keys_are_prefixed_per_user() {
        let user_id = ObjectId::new();
        let key = keys::summary(user_id);
        assert!(key.starts_with(keys::CONVERSATION_SUMMARY));
        assert!(key.ends_with(&user_id.to_hex()));
    }

    #[tokio::test]
    async fn disabled_cache_always_misses() {
        let cache = ConversationCache::disabled();
        let user_id = ObjectId::new();

        cache.put_summary(user_id, "summary").await;
        assert_eq!(cache.get_summary(user_id).await, None);
    }
}
