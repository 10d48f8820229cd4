//! Login sessions.
//!
//! A session maps an opaque token to a user id. Sessions expire after a
//! fixed idle period; every successful lookup slides the expiry forward.

use std::collections::HashMap;
use std::sync::Arc;

use aaharsetu_common::{AppError, AppResult, IdGenerator};
use aaharsetu_db::{entities::user, repositories::UserRepository};
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use fred::clients::Client as RedisClient;
use fred::interfaces::KeysInterface;
use fred::types::Expiration;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

/// Server-side session record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionData {
    pub user_id: String,
    pub created_at: DateTime<Utc>,
}

/// Backing store for sessions. Operations are atomic per token.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Insert a session that expires after `ttl_secs`.
    async fn put(&self, token: &str, data: &SessionData, ttl_secs: i64) -> AppResult<()>;

    /// Fetch a live session and push its expiry `ttl_secs` into the future.
    async fn touch(&self, token: &str, ttl_secs: i64) -> AppResult<Option<SessionData>>;

    /// Remove a session. Removing an unknown token is not an error.
    async fn remove(&self, token: &str) -> AppResult<()>;
}

/// Redis-backed session store.
#[derive(Clone)]
pub struct RedisSessionStore {
    redis: Arc<RedisClient>,
    prefix: String,
}

impl RedisSessionStore {
    /// Create a new Redis session store. Keys are namespaced by `prefix`.
    #[must_use]
    pub fn new(redis: Arc<RedisClient>, prefix: impl Into<String>) -> Self {
        Self {
            redis,
            prefix: prefix.into(),
        }
    }

    fn key(&self, token: &str) -> String {
        format!("{}session:{token}", self.prefix)
    }
}

#[async_trait]
impl SessionStore for RedisSessionStore {
    async fn put(&self, token: &str, data: &SessionData, ttl_secs: i64) -> AppResult<()> {
        let json = serde_json::to_string(data).map_err(|e| AppError::Internal(e.to_string()))?;

        self.redis
            .set::<(), _, _>(self.key(token), json, Some(Expiration::EX(ttl_secs)), None, false)
            .await
            .map_err(|e| AppError::Redis(e.to_string()))
    }

    async fn touch(&self, token: &str, ttl_secs: i64) -> AppResult<Option<SessionData>> {
        let key = self.key(token);

        let raw: Option<String> = self
            .redis
            .get(key.clone())
            .await
            .map_err(|e| AppError::Redis(e.to_string()))?;

        let Some(raw) = raw else {
            return Ok(None);
        };

        self.redis
            .expire::<(), _>(key, ttl_secs, None)
            .await
            .map_err(|e| AppError::Redis(e.to_string()))?;

        match serde_json::from_str(&raw) {
            Ok(data) => Ok(Some(data)),
            Err(e) => {
                warn!(error = %e, "Discarding unreadable session record");
                Ok(None)
            }
        }
    }

    async fn remove(&self, token: &str) -> AppResult<()> {
        self.redis
            .del::<(), _>(self.key(token))
            .await
            .map_err(|e| AppError::Redis(e.to_string()))
    }
}

/// In-process session store, used when Redis is not configured.
#[derive(Default)]
pub struct MemorySessionStore {
    entries: RwLock<HashMap<String, (SessionData, DateTime<Utc>)>>,
}

impl MemorySessionStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live sessions.
    pub async fn len(&self) -> usize {
        let now = Utc::now();
        self.entries
            .read()
            .await
            .values()
            .filter(|(_, expires_at)| *expires_at > now)
            .count()
    }

    /// Whether no live session exists.
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn put(&self, token: &str, data: &SessionData, ttl_secs: i64) -> AppResult<()> {
        let expires_at = Utc::now() + Duration::seconds(ttl_secs);
        let mut entries = self.entries.write().await;
        entries.retain(|_, (_, exp)| *exp > Utc::now());
        entries.insert(token.to_string(), (data.clone(), expires_at));
        Ok(())
    }

    async fn touch(&self, token: &str, ttl_secs: i64) -> AppResult<Option<SessionData>> {
        let now = Utc::now();
        let mut entries = self.entries.write().await;

        match entries.get_mut(token) {
            Some((data, expires_at)) if *expires_at > now => {
                *expires_at = now + Duration::seconds(ttl_secs);
                Ok(Some(data.clone()))
            }
            Some(_) => {
                entries.remove(token);
                Ok(None)
            }
            None => Ok(None),
        }
    }

    async fn remove(&self, token: &str) -> AppResult<()> {
        self.entries.write().await.remove(token);
        Ok(())
    }
}

/// Session lifecycle: login creates, every request resolves, logout destroys.
#[derive(Clone)]
pub struct SessionService {
    store: Arc<dyn SessionStore>,
    user_repo: UserRepository,
    id_gen: IdGenerator,
    ttl_secs: i64,
}

impl SessionService {
    /// Create a new session service.
    #[must_use]
    pub fn new(store: Arc<dyn SessionStore>, user_repo: UserRepository, ttl_secs: i64) -> Self {
        Self {
            store,
            user_repo,
            id_gen: IdGenerator::new(),
            ttl_secs,
        }
    }

    /// Session lifetime in seconds.
    #[must_use]
    pub const fn ttl_secs(&self) -> i64 {
        self.ttl_secs
    }

    /// Start a new session for a user. Existing sessions stay valid.
    pub async fn create(&self, user: &user::Model) -> AppResult<String> {
        let token = self.id_gen.generate_token();
        let data = SessionData {
            user_id: user.id.clone(),
            created_at: Utc::now(),
        };

        self.store.put(&token, &data, self.ttl_secs).await?;
        info!(user_id = %user.id, "Session created");

        Ok(token)
    }

    /// Resolve a token to its user, sliding the session expiry.
    ///
    /// Returns `None` for unknown or expired tokens and for sessions whose
    /// user no longer exists.
    pub async fn resolve(&self, token: &str) -> AppResult<Option<user::Model>> {
        let Some(data) = self.store.touch(token, self.ttl_secs).await? else {
            debug!("Session not found or expired");
            return Ok(None);
        };

        let user = self.user_repo.find_by_id(&data.user_id).await?;
        if user.is_none() {
            warn!(user_id = %data.user_id, "Session refers to missing user");
            self.store.remove(token).await?;
        }

        Ok(user)
    }

    /// End a session. Idempotent.
    pub async fn destroy(&self, token: &str) -> AppResult<()> {
        self.store.remove(token).await?;
        debug!("Session destroyed");
        Ok(())
    }
}
