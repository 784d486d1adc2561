//! The merge orchestrator: runs a parsed spec through the full fan-in →
//! collapse → fan-in → group-and-update state machine.
//!
//! Grounded directly on the original engine's `execute`: two temporary
//! collections carry intermediate state. `T1` accumulates child-row and
//! parent-row pairs keyed by `merge_id` for every "one" relation; it's
//! collapsed into `T2`, keyed by `parent_id`, which then also receives the
//! "many" relations' rows directly (they need no merge-key join — the child
//! documents already carry the parent's `_id`). A final aggregation over
//! `T2` produces one accumulated document per parent, which is `$set` back
//! onto the parent collection.

use std::time::{Duration, Instant};

use tracing::info;

use crate::client::{CollectionDropper, MergeClient};
use crate::error::MergeResult;
use crate::pipeline::{
    Accumulators, Projectors, child_by_merge_key, copy_many_with_parent_id, group_and_update_pipeline,
    merge_one_all, parent_child_merge_key, record_many_entry, record_one_entry,
};
use crate::spec::MergeSpec;
use crate::transport::agg_copy;
use crate::writer::group_and_update;

/// Summary of one completed merge run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MergeReport {
    /// Number of parent documents that received a `$set` update.
    pub parents_updated: u64,
    /// Wall-clock time spent running the merge.
    pub duration: Duration,
}

/// Runs merge specs against a connected client.
pub struct MergeOrchestrator {
    client: MergeClient,
}

impl MergeOrchestrator {
    /// Build an orchestrator over an already-connected client.
    pub fn new(client: MergeClient) -> Self {
        Self { client }
    }

    fn temp_one_name(parent_name: &str) -> String {
        format!("{parent_name}_merge_temp_one")
    }

    fn temp_name(parent_name: &str) -> String {
        format!("{parent_name}_merge_temp")
    }

    /// Drop both temporary collections. Run once at the start of every merge
    /// so stale state from a prior failed run never leaks into a new one.
    async fn drop_both_temps<D: CollectionDropper>(
        dropper: &D,
        t1_name: &str,
        t2_name: &str,
    ) -> MergeResult<()> {
        dropper.drop_collection(t1_name).await?;
        dropper.drop_collection(t2_name).await?;
        Ok(())
    }

    /// Parse `spec_strings` against `parent_name` and run the full merge.
    pub async fn execute(
        &self,
        parent_name: &str,
        spec_strings: &[impl AsRef<str>],
    ) -> MergeResult<MergeReport> {
        let started = Instant::now();
        let spec = MergeSpec::parse(parent_name, spec_strings)?;

        let parent = self.client.collection(parent_name);
        let t1_name = Self::temp_one_name(parent_name);
        let t2_name = Self::temp_name(parent_name);
        let t1 = self.client.collection(&t1_name);
        let t2 = self.client.collection(&t2_name);

        Self::drop_both_temps(&self.client, &t1_name, &t2_name).await?;

        let mut all_accumulators = Accumulators::new();
        let mut one_accumulators = Accumulators::new();
        let mut projectors = Projectors::new();

        for entry in spec.one_entries() {
            let child = self.client.collection(&entry.child_name);

            agg_copy(
                &child,
                &t1,
                child_by_merge_key(&entry.parent_key, &entry.child_name, &entry.child_key),
            )
            .await?;
            agg_copy(
                &parent,
                &t1,
                parent_child_merge_key(&entry.parent_key, &entry.child_name, &entry.child_key),
            )
            .await?;

            record_one_entry(entry, &mut all_accumulators, &mut one_accumulators, &mut projectors);
        }

        agg_copy(&t1, &t2, merge_one_all(&one_accumulators, &projectors)).await?;
        CollectionDropper::drop_collection(&self.client, &t1_name).await?;

        for entry in spec.many_entries() {
            let child = self.client.collection(&entry.child_name);
            agg_copy(
                &child,
                &t2,
                copy_many_with_parent_id(&entry.parent_key, &entry.child_key),
            )
            .await?;

            record_many_entry(entry, &mut all_accumulators);
        }

        let parents_updated =
            group_and_update(&t2, &parent, group_and_update_pipeline(&all_accumulators)).await?;
        CollectionDropper::drop_collection(&self.client, &t2_name).await?;

        let report = MergeReport {
            parents_updated,
            duration: started.elapsed(),
        };
        info!(
            parent = %parent_name,
            entries = spec.len(),
            parents_updated = report.parents_updated,
            duration_ms = report.duration.as_millis() as u64,
            "merge complete"
        );

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;

    #[test]
    fn temp_collection_names_are_derived_from_parent() {
        assert_eq!(
            MergeOrchestrator::temp_one_name("people"),
            "people_merge_temp_one"
        );
        assert_eq!(MergeOrchestrator::temp_name("people"), "people_merge_temp");
    }

    #[derive(Default)]
    struct FakeDropper {
        calls: Mutex<Vec<String>>,
    }

    impl FakeDropper {
        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl CollectionDropper for FakeDropper {
        async fn drop_collection(&self, name: &str) -> MergeResult<()> {
            self.calls.lock().unwrap().push(name.to_string());
            Ok(())
        }
    }

    /// Mirrors `execute`'s drop-call order: both temps up front, T1 again
    /// after the one-relation collapse, T2 once the parent update completes.
    #[tokio::test]
    async fn temp_collection_hygiene_follows_the_documented_sequence() {
        let dropper = FakeDropper::default();
        let t1_name = MergeOrchestrator::temp_one_name("people");
        let t2_name = MergeOrchestrator::temp_name("people");

        MergeOrchestrator::drop_both_temps(&dropper, &t1_name, &t2_name)
            .await
            .unwrap();
        CollectionDropper::drop_collection(&dropper, &t1_name)
            .await
            .unwrap();
        CollectionDropper::drop_collection(&dropper, &t2_name)
            .await
            .unwrap();

        assert_eq!(
            dropper.calls(),
            vec![
                t1_name.clone(),
                t2_name.clone(),
                t1_name,
                t2_name,
            ]
        );
    }
}
