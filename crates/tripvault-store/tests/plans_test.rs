//! Integration tests for the ordered plan collection.
//!
//! Everything runs against the in-memory document store; the
//! [`RecordingStore`] wrapper additionally captures committed batches so
//! tests can assert on batch shape, not just end state.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use tripvault_core::SwapRequest;
use tripvault_store::{
    DocumentStore, Fields, InMemoryDocumentStore, PlansError, PlansRepository, StoreError,
    WriteBatch, WriteOp,
};
use tripvault_test_utils::{dated_schedule, document_store, plan, plan_with_schedules};

/// Store double that records every committed batch before delegating.
struct RecordingStore {
    inner: InMemoryDocumentStore,
    batches: Mutex<Vec<WriteBatch>>,
}

impl RecordingStore {
    fn new() -> Self {
        Self {
            inner: InMemoryDocumentStore::new(),
            batches: Mutex::new(Vec::new()),
        }
    }

    fn take_batches(&self) -> Vec<WriteBatch> {
        std::mem::take(&mut *self.batches.lock().expect("batch log poisoned"))
    }
}

#[async_trait]
impl DocumentStore for RecordingStore {
    async fn list(&self, collection: &str) -> Result<Vec<(String, Fields)>, StoreError> {
        self.inner.list(collection).await
    }

    async fn list_nested(
        &self,
        collection: &str,
        document: &str,
        subcollection: &str,
    ) -> Result<Vec<(String, Fields)>, StoreError> {
        self.inner.list_nested(collection, document, subcollection).await
    }

    async fn count(&self, collection: &str) -> Result<usize, StoreError> {
        self.inner.count(collection).await
    }

    async fn commit(&self, batch: WriteBatch) -> Result<(), StoreError> {
        self.batches
            .lock()
            .expect("batch log poisoned")
            .push(batch.clone());
        self.inner.commit(batch).await
    }
}

#[tokio::test]
async fn upload_and_read_round_trip() {
    let repo = PlansRepository::new(document_store());

    let mut seoul = plan_with_schedules("Seoul", 2);
    seoul.schedules[0] = dated_schedule("Gyeongbokgung", (2023, 2, 18), (2023, 2, 19));
    repo.upload(0, &seoul).await.expect("upload should succeed");

    let plans = repo.read().await.expect("read should succeed");
    assert_eq!(plans, vec![seoul]);
}

#[tokio::test]
async fn overwriting_a_position_drops_the_old_schedules() {
    let store = document_store();
    let repo = PlansRepository::new(store.clone());

    repo.upload(0, &plan_with_schedules("big", 3))
        .await
        .expect("first upload should succeed");
    let replacement = plan_with_schedules("small", 1);
    repo.upload(0, &replacement)
        .await
        .expect("overwrite should succeed");

    let plans = repo.read().await.expect("read should succeed");
    assert_eq!(plans, vec![replacement]);
    assert_eq!(plans[0].schedules.len(), 1);
    assert_eq!(
        store
            .list_nested("plans", "0", "schedules")
            .await
            .expect("list")
            .len(),
        1
    );
}

#[tokio::test]
async fn read_is_idempotent() {
    let repo = PlansRepository::new(document_store());
    repo.upload(0, &plan_with_schedules("Seoul", 1))
        .await
        .expect("upload");
    repo.upload(1, &plan("Busan")).await.expect("upload");

    let first = repo.read().await.expect("first read");
    let second = repo.read().await.expect("second read");
    assert_eq!(first, second);
}

#[tokio::test]
async fn read_orders_numerically_past_position_nine() {
    let repo = PlansRepository::new(document_store());
    for position in 0..12 {
        repo.upload(position, &plan(&format!("plan {position}")))
            .await
            .expect("upload should succeed");
    }

    let titles: Vec<String> = repo
        .read()
        .await
        .expect("read should succeed")
        .into_iter()
        .map(|plan| plan.title)
        .collect();

    // Lexicographic key order would put "plan 10" right after "plan 1".
    let expected: Vec<String> = (0..12).map(|position| format!("plan {position}")).collect();
    assert_eq!(titles, expected);
}

#[tokio::test]
async fn delete_shifts_later_plans_down() {
    let store = document_store();
    let repo = PlansRepository::new(store.clone());

    let current = vec![
        plan("A"),
        plan("B"),
        plan_with_schedules("C", 1),
        plan_with_schedules("D", 3),
    ];
    for (position, plan) in current.iter().enumerate() {
        repo.upload(position, plan).await.expect("upload");
    }

    repo.delete_and_reindex(1, &current)
        .await
        .expect("delete should succeed");

    let plans = repo.read().await.expect("read should succeed");
    assert_eq!(plans.len(), 3);
    assert_eq!(plans[0], current[0]);
    assert_eq!(plans[1], current[2]);
    assert_eq!(plans[2], current[3]);
    assert_eq!(plans[2].schedules.len(), 3);

    // The slot that held D was copied down and must not survive as a stale
    // duplicate.
    assert_eq!(store.count("plans").await.expect("count"), 3);
    let keys: Vec<String> = store
        .list("plans")
        .await
        .expect("list")
        .into_iter()
        .map(|(key, _)| key)
        .collect();
    assert_eq!(keys, ["0", "1", "2"]);
}

#[tokio::test]
async fn deleting_the_last_position_issues_a_single_delete() {
    let store = Arc::new(RecordingStore::new());
    let repo = PlansRepository::new(store.clone());

    let current = vec![plan("A"), plan("B"), plan_with_schedules("C", 2)];
    for (position, plan) in current.iter().enumerate() {
        repo.upload(position, plan).await.expect("upload");
    }
    store.take_batches();

    repo.delete_and_reindex(2, &current)
        .await
        .expect("delete should succeed");

    let batches = store.take_batches();
    assert_eq!(batches.len(), 1);
    assert_eq!(batches[0].len(), 1);
    assert!(matches!(
        &batches[0][0],
        WriteOp::Delete { path } if path.to_string() == "plans/2"
    ));
}

#[tokio::test]
async fn delete_rejects_a_stale_snapshot() {
    let store = document_store();
    let repo = PlansRepository::new(store.clone());

    repo.upload(0, &plan("A")).await.expect("upload");
    repo.upload(1, &plan("B")).await.expect("upload");

    // Snapshot claims three plans; the store holds two.
    let stale = vec![plan("A"), plan("B"), plan("C")];
    let err = repo
        .delete_and_reindex(1, &stale)
        .await
        .expect_err("delete should be rejected");
    assert!(matches!(
        err,
        PlansError::Delete(StoreError::StaleSnapshot {
            snapshot: 3,
            stored: 2,
        })
    ));

    // Nothing was written.
    assert_eq!(store.count("plans").await.expect("count"), 2);
}

#[tokio::test]
async fn delete_rejects_a_position_outside_the_collection() {
    let repo = PlansRepository::new(document_store());
    let err = repo
        .delete_and_reindex(0, &[])
        .await
        .expect_err("delete from empty collection should fail");
    assert!(matches!(err, PlansError::Delete(StoreError::NotFound(_))));
}

#[tokio::test]
async fn swap_exchanges_plans_with_their_schedules() {
    let store = document_store();
    let repo = PlansRepository::new(store.clone());

    let first = plan_with_schedules("A", 2);
    let second = plan_with_schedules("B", 1);
    repo.upload(0, &first).await.expect("upload");
    repo.upload(1, &second).await.expect("upload");

    repo.swap(&SwapRequest {
        source_key: 0,
        destination_key: 1,
        source_plan: first.clone(),
        destination_plan: second.clone(),
    })
    .await
    .expect("swap should succeed");

    let plans = repo.read().await.expect("read should succeed");
    assert_eq!(plans, vec![second, first]);
    // B brought one schedule into slot 0; A's second schedule must not
    // survive there.
    assert_eq!(plans[0].schedules.len(), 1);
    assert_eq!(plans[1].schedules.len(), 2);
}

#[tokio::test]
async fn positions_stay_dense_across_mixed_operations() {
    let store = document_store();
    let repo = PlansRepository::new(store.clone());

    for (position, title) in ["A", "B", "C", "D"].into_iter().enumerate() {
        repo.upload(position, &plan_with_schedules(title, position))
            .await
            .expect("upload");
    }

    let current = repo.read().await.expect("read");
    repo.delete_and_reindex(1, &current).await.expect("delete");

    let current = repo.read().await.expect("read");
    repo.swap(&SwapRequest {
        source_key: 0,
        destination_key: 2,
        source_plan: current[0].clone(),
        destination_plan: current[2].clone(),
    })
    .await
    .expect("swap");

    let keys: Vec<String> = store
        .list("plans")
        .await
        .expect("list")
        .into_iter()
        .map(|(key, _)| key)
        .collect();
    assert_eq!(keys, ["0", "1", "2"]);

    let titles: Vec<String> = repo
        .read()
        .await
        .expect("read")
        .into_iter()
        .map(|plan| plan.title)
        .collect();
    assert_eq!(titles, ["D", "C", "A"]);
}
