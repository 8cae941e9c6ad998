//! Positional persistence for the ordered plan collection.
//!
//! The backing store is a flat keyed namespace with no notion of an array,
//! so positional semantics are simulated here: plans live in the `plans`
//! collection at decimal-string keys, schedules nest under each plan keyed
//! by their index, and the repository maintains the invariant that occupied
//! positions form the dense range `0..count-1`. Every structural mutation
//! (delete with reindex, swap) rewrites all affected slots in one atomic
//! batch so a partial failure can never be observed.

use std::sync::Arc;

use tracing::debug;

use tripvault_core::{Plan, SwapRequest};

use crate::client::{DocumentStore, WriteBatch, WriteOp};
use crate::document::{DocumentPath, Fields};
use crate::dto;
use crate::error::{PlansError, StoreError};
use crate::paths;

/// Repository for the ordered plan collection.
///
/// Concurrent structural mutations against overlapping positions can race
/// and corrupt the dense-key invariant; callers that mutate from several
/// tasks must serialise those calls themselves.
pub struct PlansRepository {
    store: Arc<dyn DocumentStore>,
}

impl PlansRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    fn plan_path(position: usize) -> DocumentPath {
        DocumentPath::new(paths::PLANS, position.to_string())
    }

    fn schedule_path(position: usize, index: usize) -> DocumentPath {
        Self::plan_path(position).child(paths::SCHEDULES, index.to_string())
    }

    /// Append the writes that place `plan` at `position`: the scalar
    /// document plus one nested document per schedule.
    fn push_set_ops(position: usize, plan: &Plan, batch: &mut WriteBatch) {
        batch.push(WriteOp::Set {
            path: Self::plan_path(position),
            fields: dto::plan_fields(plan),
        });
        for (index, schedule) in plan.schedules.iter().enumerate() {
            batch.push(WriteOp::Set {
                path: Self::schedule_path(position, index),
                fields: dto::schedule_fields(schedule),
            });
        }
    }

    /// Create or overwrite the plan at `position`, schedules included, as
    /// one atomic batch: on failure the store is left fully unchanged.
    ///
    /// The slot is deleted before being rewritten, like every other slot
    /// write in this repository; otherwise overwriting an occupant that had
    /// more schedules would leave its extra sub-documents behind.
    pub async fn upload(&self, position: usize, plan: &Plan) -> Result<(), PlansError> {
        let mut batch = WriteBatch::new();
        batch.push(WriteOp::Delete {
            path: Self::plan_path(position),
        });
        Self::push_set_ops(position, plan, &mut batch);

        debug!(position, operations = batch.len(), "uploading plan");
        self.store.commit(batch).await.map_err(PlansError::Upload)
    }

    /// Read every plan in positional order, schedules included.
    ///
    /// The store scans in string-key order, where `"10"` sorts before
    /// `"2"`, so both the top-level documents and each schedule
    /// sub-collection are sorted numerically by key before decoding.
    pub async fn read(&self) -> Result<Vec<Plan>, PlansError> {
        let mut documents = self
            .store
            .list(paths::PLANS)
            .await
            .map_err(PlansError::Read)?;
        sort_by_position(&mut documents);

        let mut plans = Vec::with_capacity(documents.len());
        for (key, fields) in &documents {
            let mut schedule_docs = self
                .store
                .list_nested(paths::PLANS, key, paths::SCHEDULES)
                .await
                .map_err(PlansError::Read)?;
            sort_by_position(&mut schedule_docs);

            let mut schedules = Vec::with_capacity(schedule_docs.len());
            for (schedule_key, schedule_fields) in &schedule_docs {
                let path = DocumentPath::new(paths::PLANS, key.clone())
                    .child(paths::SCHEDULES, schedule_key.clone());
                schedules.push(
                    dto::schedule_from_fields(&path.to_string(), schedule_fields)
                        .map_err(PlansError::Read)?,
                );
            }

            let path = DocumentPath::new(paths::PLANS, key.clone());
            plans.push(
                dto::plan_from_fields(&path.to_string(), fields, schedules)
                    .map_err(PlansError::Read)?,
            );
        }

        debug!(count = plans.len(), "read plan collection");
        Ok(plans)
    }

    /// Delete the plan at `position` and shift every later plan down one
    /// slot, keeping the occupied positions dense.
    ///
    /// `current` must be the pre-delete state of the whole collection; it
    /// supplies the content rewritten into the shifted slots. A snapshot
    /// whose length disagrees with a fresh store count is rejected before
    /// any write. All deletes and overwrites go out as one atomic batch;
    /// the slot that held the final plan is deleted outright, since its
    /// content has been copied down. Deleting the last position needs no
    /// reindexing and issues a single delete.
    pub async fn delete_and_reindex(
        &self,
        position: usize,
        current: &[Plan],
    ) -> Result<(), PlansError> {
        let stored = self
            .store
            .count(paths::PLANS)
            .await
            .map_err(PlansError::Delete)?;
        if stored != current.len() {
            return Err(PlansError::Delete(StoreError::StaleSnapshot {
                snapshot: current.len(),
                stored,
            }));
        }
        if position >= current.len() {
            return Err(PlansError::Delete(StoreError::NotFound(
                Self::plan_path(position).to_string(),
            )));
        }

        let last = current.len() - 1;
        let mut batch = WriteBatch::new();
        // Each shifted slot is deleted before being rewritten; a plain
        // overwrite would leave stale schedule sub-documents behind when the
        // incoming plan has fewer schedules than the old occupant.
        for slot in position..last {
            batch.push(WriteOp::Delete {
                path: Self::plan_path(slot),
            });
            Self::push_set_ops(slot, &current[slot + 1], &mut batch);
        }
        batch.push(WriteOp::Delete {
            path: Self::plan_path(last),
        });

        debug!(
            position,
            shifted = last - position,
            operations = batch.len(),
            "deleting plan with reindex"
        );
        self.store.commit(batch).await.map_err(PlansError::Delete)
    }

    /// Atomically exchange the plans at the request's two slots, schedules
    /// included.
    ///
    /// Both slots are deleted before being rewritten for the same reason as
    /// in reindexing: overwriting scalar fields alone would strand schedule
    /// sub-documents when the incoming plan has fewer schedules.
    pub async fn swap(&self, request: &SwapRequest) -> Result<(), PlansError> {
        let mut batch = WriteBatch::new();
        batch.push(WriteOp::Delete {
            path: Self::plan_path(request.source_key),
        });
        batch.push(WriteOp::Delete {
            path: Self::plan_path(request.destination_key),
        });
        Self::push_set_ops(request.source_key, &request.destination_plan, &mut batch);
        Self::push_set_ops(request.destination_key, &request.source_plan, &mut batch);

        debug!(
            source = request.source_key,
            destination = request.destination_key,
            operations = batch.len(),
            "swapping plans"
        );
        self.store.commit(batch).await.map_err(PlansError::Swap)
    }
}

/// Sort `(key, fields)` pairs numerically by their decimal position key.
/// Keys that are not decimal positions sort after all real positions.
fn sort_by_position(documents: &mut [(String, Fields)]) {
    documents.sort_by_key(|(key, _)| key.parse::<usize>().unwrap_or(usize::MAX));
}
