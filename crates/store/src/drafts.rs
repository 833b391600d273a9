use async_trait::async_trait;
use tracing::debug;

use packfit_core::{ApplicationError, DraftStore, SessionDraft};

use crate::kv::KeyValueStore;

/// The one storage key every session shares. Concurrent tabs race on it
/// with last-writer-wins semantics; that hazard is accepted, not mitigated.
pub const DRAFT_KEY: &str = "packfit.session_draft";

/// Binds the core's draft port to a key-value store. Unreadable payloads
/// load as "no draft" so a corrupt store can never strand a visitor.
pub struct DraftRepository<S> {
    store: S,
}

impl<S> DraftRepository<S>
where
    S: KeyValueStore,
{
    pub fn new(store: S) -> Self {
        Self { store }
    }
}

#[async_trait]
impl<S> DraftStore for DraftRepository<S>
where
    S: KeyValueStore,
{
    async fn save(&self, draft: &SessionDraft) -> Result<(), ApplicationError> {
        let payload = serde_json::to_string(draft)
            .map_err(|error| ApplicationError::Persistence(error.to_string()))?;
        self.store
            .set(DRAFT_KEY, &payload)
            .await
            .map_err(|error| ApplicationError::Persistence(error.to_string()))
    }

    async fn load(&self) -> Result<Option<SessionDraft>, ApplicationError> {
        let payload = self
            .store
            .get(DRAFT_KEY)
            .await
            .map_err(|error| ApplicationError::Persistence(error.to_string()))?;
        let Some(payload) = payload else {
            return Ok(None);
        };
        match serde_json::from_str(&payload) {
            Ok(draft) => Ok(Some(draft)),
            Err(error) => {
                debug!(%error, "stored draft is unreadable; treating as absent");
                Ok(None)
            }
        }
    }

    async fn discard(&self) -> Result<(), ApplicationError> {
        self.store
            .remove(DRAFT_KEY)
            .await
            .map_err(|error| ApplicationError::Persistence(error.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use uuid::Uuid;

    use packfit_core::{
        AnswerSet, BillingMode, Contact, DraftStore, Phase, SessionDraft,
    };

    use crate::kv::{KeyValueStore, MemoryStore};

    use super::{DraftRepository, DRAFT_KEY};

    fn draft() -> SessionDraft {
        SessionDraft {
            session_id: Uuid::new_v4(),
            contact: Contact {
                company: "Harbor Dental".to_owned(),
                name: "Dana Reyes".to_owned(),
                email: "dana@harbordental.com".to_owned(),
                phone: "+1 415 555 0134".to_owned(),
            },
            answers: AnswerSet::new(),
            step: 3,
            phase: Phase::Questionnaire,
            selected_offering_names: vec!["Call Desk".to_owned()],
            billing_mode: BillingMode::Annual,
            saved_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn save_load_round_trips_the_draft() {
        let repository = DraftRepository::new(MemoryStore::new());
        let original = draft();

        repository.save(&original).await.expect("save");
        let loaded = repository.load().await.expect("load").expect("present");

        assert_eq!(loaded, original);
    }

    #[tokio::test]
    async fn discard_leaves_no_draft_behind() {
        let repository = DraftRepository::new(MemoryStore::new());

        repository.save(&draft()).await.expect("save");
        repository.discard().await.expect("discard");

        assert_eq!(repository.load().await.expect("load"), None);
    }

    #[tokio::test]
    async fn corrupt_payload_loads_as_absent() {
        let store = MemoryStore::new();
        store.set(DRAFT_KEY, "{not json").await.expect("seed corrupt payload");
        let repository = DraftRepository::new(store);

        assert_eq!(repository.load().await.expect("load"), None);
    }

    #[tokio::test]
    async fn missing_draft_loads_as_absent() {
        let repository = DraftRepository::new(MemoryStore::new());
        assert_eq!(repository.load().await.expect("load"), None);
    }
}
