//! Typed records over a `KvStore` with a side index of ids.
//!
//! Records live under `<entity>:<id>`. The index key `index:<name>` holds the
//! ordered list of ids and is the source of truth for enumeration.

use super::{KvStore, StoreError, StoreResult};
use crate::models::{Expert, Ticket};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::marker::PhantomData;
use std::sync::Arc;

/// A record type that can be kept in an `IndexedStore`
pub trait Entity: Serialize + DeserializeOwned + Send + Sync {
    /// Key prefix for individual records
    const ENTITY_NAME: &'static str;
    /// Name of the id index
    const INDEX_NAME: &'static str;

    fn id(&self) -> &str;

    /// Record-level invariants. Violations are logged on load, not rejected.
    fn check_invariants(&self) -> Result<(), String> {
        Ok(())
    }
}

impl Entity for Ticket {
    const ENTITY_NAME: &'static str = "ticket";
    const INDEX_NAME: &'static str = "tickets";

    fn id(&self) -> &str {
        &self.id
    }

    fn check_invariants(&self) -> Result<(), String> {
        self.validate().map_err(|e| e.to_string())
    }
}

impl Entity for Expert {
    const ENTITY_NAME: &'static str = "expert";
    const INDEX_NAME: &'static str = "experts";

    fn id(&self) -> &str {
        &self.id
    }
}

/// Indexed entity store parameterized by record type
pub struct IndexedStore<T> {
    kv: Arc<dyn KvStore>,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Clone for IndexedStore<T> {
    fn clone(&self) -> Self {
        Self {
            kv: Arc::clone(&self.kv),
            _marker: PhantomData,
        }
    }
}

impl<T: Entity> IndexedStore<T> {
    pub fn new(kv: Arc<dyn KvStore>) -> Self {
        Self {
            kv,
            _marker: PhantomData,
        }
    }

    fn record_key(id: &str) -> String {
        format!("{}:{}", T::ENTITY_NAME, id)
    }

    fn index_key() -> String {
        format!("index:{}", T::INDEX_NAME)
    }

    fn decode<D: DeserializeOwned>(key: &str, value: Value) -> StoreResult<D> {
        serde_json::from_value(value).map_err(|e| StoreError::Corrupt {
            key: key.to_string(),
            reason: e.to_string(),
        })
    }

    fn encode<E: Serialize>(key: &str, value: &E) -> StoreResult<Value> {
        serde_json::to_value(value).map_err(|e| StoreError::Corrupt {
            key: key.to_string(),
            reason: e.to_string(),
        })
    }

    /// All ids in index order
    pub async fn ids(&self) -> StoreResult<Vec<String>> {
        let key = Self::index_key();
        match self.kv.get(&key).await? {
            Some(value) => Self::decode(&key, value),
            None => Ok(Vec::new()),
        }
    }

    pub async fn count(&self) -> StoreResult<usize> {
        Ok(self.ids().await?.len())
    }

    /// Get record by id
    pub async fn get(&self, id: &str) -> StoreResult<Option<T>> {
        let key = Self::record_key(id);
        let Some(value) = self.kv.get(&key).await? else {
            return Ok(None);
        };
        let record: T = Self::decode(&key, value)?;
        if let Err(reason) = record.check_invariants() {
            tracing::warn!(entity = T::ENTITY_NAME, %id, %reason, "stored record violates invariants");
        }
        Ok(Some(record))
    }

    pub async fn exists(&self, id: &str) -> StoreResult<bool> {
        Ok(self.kv.get(&Self::record_key(id)).await?.is_some())
    }

    /// Write a record and append its id to the index if new
    pub async fn put(&self, record: &T) -> StoreResult<()> {
        let key = Self::record_key(record.id());
        self.kv.put(&key, Self::encode(&key, record)?).await?;

        let mut ids = self.ids().await?;
        if !ids.iter().any(|id| id == record.id()) {
            ids.push(record.id().to_string());
            let index_key = Self::index_key();
            self.kv.put(&index_key, Self::encode(&index_key, &ids)?).await?;
        }
        Ok(())
    }

    /// All records in index order. Ids whose record is missing are skipped.
    pub async fn list(&self) -> StoreResult<Vec<T>> {
        let ids = self.ids().await?;
        let mut records = Vec::with_capacity(ids.len());
        for id in &ids {
            match self.get(id).await? {
                Some(record) => records.push(record),
                None => tracing::warn!(entity = T::ENTITY_NAME, %id, "indexed record missing"),
            }
        }
        Ok(records)
    }

    /// Populate the store from `records` if the index is empty.
    ///
    /// Returns `true` when this call wrote the seed. Concurrent callers may
    /// both seed; the data is identical so the last write wins harmlessly.
    pub async fn ensure_seed(&self, records: &[T]) -> StoreResult<bool> {
        if !self.ids().await?.is_empty() {
            return Ok(false);
        }

        for record in records {
            let key = Self::record_key(record.id());
            self.kv.put(&key, Self::encode(&key, record)?).await?;
        }
        let ids: Vec<&str> = records.iter().map(|r| r.id()).collect();
        let index_key = Self::index_key();
        self.kv.put(&index_key, Self::encode(&index_key, &ids)?).await?;

        tracing::info!(entity = T::ENTITY_NAME, count = records.len(), "seeded store");
        Ok(true)
    }

    /// Like `ensure_seed`, building the records only when the store is empty
    pub async fn ensure_seed_with<F>(&self, records: F) -> StoreResult<bool>
    where
        F: FnOnce() -> Vec<T> + Send,
    {
        if !self.ids().await?.is_empty() {
            return Ok(false);
        }
        self.ensure_seed(&records()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryKv;
    use serde_json::json;

    fn expert(id: &str) -> Expert {
        Expert {
            id: id.into(),
            name: format!("Expert {id}"),
            avatar_url: format!("https://example.com/{id}.png"),
        }
    }

    #[tokio::test]
    async fn test_put_get_list() {
        let store = IndexedStore::<Expert>::new(Arc::new(MemoryKv::new()));

        store.put(&expert("b")).await.unwrap();
        store.put(&expert("a")).await.unwrap();
        store.put(&expert("b")).await.unwrap();

        assert_eq!(store.ids().await.unwrap(), vec!["b", "a"]);
        assert_eq!(store.get("a").await.unwrap(), Some(expert("a")));
        assert_eq!(store.get("z").await.unwrap(), None);
        assert!(store.exists("b").await.unwrap());
        assert!(!store.exists("z").await.unwrap());

        let names: Vec<_> = store.list().await.unwrap().into_iter().map(|e| e.id).collect();
        assert_eq!(names, vec!["b", "a"]);
    }

    #[tokio::test]
    async fn test_ensure_seed_idempotent() {
        let store = IndexedStore::<Expert>::new(Arc::new(MemoryKv::new()));
        let seed = vec![expert("exp1"), expert("exp2")];

        assert!(store.ensure_seed(&seed).await.unwrap());
        assert!(!store.ensure_seed(&[expert("other")]).await.unwrap());
        assert_eq!(store.count().await.unwrap(), 2);
        assert!(!store.exists("other").await.unwrap());
        assert!(!store.ensure_seed_with(|| unreachable!()).await.unwrap());
    }

    #[tokio::test]
    async fn test_list_skips_dangling_ids() {
        let kv = Arc::new(MemoryKv::new());
        kv.put("index:experts", json!(["exp1", "ghost"])).await.unwrap();
        kv.put("expert:exp1", serde_json::to_value(expert("exp1")).unwrap())
            .await
            .unwrap();

        let store = IndexedStore::<Expert>::new(kv);
        assert_eq!(store.list().await.unwrap(), vec![expert("exp1")]);
    }

    #[tokio::test]
    async fn test_invalid_ticket_still_loads() {
        let kv = Arc::new(MemoryKv::new());
        kv.put("index:tickets", json!(["TKT-1"])).await.unwrap();
        kv.put(
            "ticket:TKT-1",
            json!({
                "id": "TKT-1",
                "viberQuery": "cannot log in",
                "platform": "API",
                "issueType": "Login",
                "status": "Resolved",
                "expertId": "exp1",
                "createdAt": "2024-06-01T10:00:00Z",
                "satisfactionScore": 0
            }),
        )
        .await
        .unwrap();

        let store = IndexedStore::<Ticket>::new(kv);
        let tickets = store.list().await.unwrap();
        assert_eq!(tickets.len(), 1);
        assert!(tickets[0].check_invariants().is_err());
        assert!(expert("exp1").check_invariants().is_ok());
    }

    #[tokio::test]
    async fn test_corrupt_record() {
        let kv = Arc::new(MemoryKv::new());
        kv.put("index:tickets", json!(["TKT-1"])).await.unwrap();
        kv.put("ticket:TKT-1", json!({"id": "TKT-1", "createdAt": "yesterday"}))
            .await
            .unwrap();

        let store = IndexedStore::<Ticket>::new(kv);
        assert!(matches!(
            store.list().await,
            Err(StoreError::Corrupt { ref key, .. }) if key == "ticket:TKT-1"
        ));
    }
}
