//! Authenticated sessions.
//!
//! A [`SessionContext`] is what the identity provider hands back after a successful
//! login or signup. It is passed explicitly to every collaborator call. The
//! [`SessionRegistry`] maps the opaque bearer token given to the UI onto that context.

use secrecy::SecretString;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use tracing::debug;
use ulid::Ulid;

pub const DEFAULT_SESSION_TTL_SECONDS: u64 = 12 * 60 * 60;

#[derive(Debug, Clone)]
pub struct SessionContext {
    pub email: String,
    /// Provider-issued id token, never logged.
    pub id_token: SecretString,
}

impl SessionContext {
    #[must_use]
    pub fn new(email: impl Into<String>, id_token: SecretString) -> Self {
        Self {
            email: email.into(),
            id_token,
        }
    }
}

struct SessionEntry {
    context: Arc<SessionContext>,
    created_at: Instant,
}

pub struct SessionRegistry {
    ttl: Duration,
    sessions: RwLock<HashMap<Ulid, SessionEntry>>,
}

impl SessionRegistry {
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// Register a session and return its bearer token.
    pub async fn insert(&self, context: SessionContext) -> Ulid {
        let token = Ulid::new();
        let entry = SessionEntry {
            context: Arc::new(context),
            created_at: Instant::now(),
        };
        self.sessions.write().await.insert(token, entry);
        token
    }

    /// Look up a live session. Expired entries are evicted on the way.
    pub async fn get(&self, token: &Ulid) -> Option<Arc<SessionContext>> {
        {
            let sessions = self.sessions.read().await;
            let entry = sessions.get(token)?;
            if entry.created_at.elapsed() < self.ttl {
                return Some(entry.context.clone());
            }
        }

        debug!("session {} expired", token);
        self.sessions.write().await.remove(token);
        None
    }

    pub async fn remove(&self, token: &Ulid) -> bool {
        self.sessions.write().await.remove(token).is_some()
    }

    /// Drop every expired session and return their tokens.
    pub async fn purge_expired(&self) -> Vec<Ulid> {
        let mut expired = Vec::new();
        self.sessions.write().await.retain(|token, entry| {
            let live = entry.created_at.elapsed() < self.ttl;
            if !live {
                expired.push(*token);
            }
            live
        });
        expired
    }

    pub async fn tokens(&self) -> HashSet<Ulid> {
        self.sessions.read().await.keys().copied().collect()
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl Default for SessionRegistry {
    fn default() -> Self {
        Self::new(Duration::from_secs(DEFAULT_SESSION_TTL_SECONDS))
    }
}
