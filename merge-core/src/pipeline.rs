//! Aggregation pipeline builders.
//!
//! Every function here is pure: given a spec entry's fields, it returns the
//! stage list for one aggregation pipeline. None of them touch the network;
//! [`crate::transport::agg_copy`] is what actually runs a pipeline.

use bson::{Document, doc};

use crate::spec::MergeEntry;

/// Builder-style accumulation of named `$group`/`$project` sub-expressions,
/// one entry per `parent_key` seen so far. Used to build the collapse
/// (`merge_one_all`) and final (`group_and_update_pipeline`) stages
/// incrementally as entries are processed, mirroring the original engine's
/// running `accumulators`/`projectors` documents.
#[derive(Debug, Clone, Default)]
pub struct Accumulators(Document);

impl Accumulators {
    /// An empty accumulator set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a `$max` accumulator for a "one" `parent_key`.
    pub fn push_max(&mut self, parent_key: &str) -> &mut Self {
        self.0.insert(
            parent_key,
            doc! { "$max": format!("${parent_key}") },
        );
        self
    }

    /// Add a `$push` accumulator for a "many" `parent_key`.
    pub fn push_array(&mut self, parent_key: &str) -> &mut Self {
        self.0.insert(
            parent_key,
            doc! { "$push": format!("${parent_key}") },
        );
        self
    }

    /// The accumulated document, suitable for splicing into a `$group` stage.
    pub fn as_document(&self) -> &Document {
        &self.0
    }
}

/// Builder-style accumulation of pass-through projections used in the
/// phase-2 collapse.
#[derive(Debug, Clone, Default)]
pub struct Projectors(Document);

impl Projectors {
    /// An empty projector set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a pass-through projection for a `parent_key`.
    pub fn push(&mut self, parent_key: &str) -> &mut Self {
        self.0.insert(parent_key, format!("${parent_key}"));
        self
    }

    /// The accumulated document, suitable for splicing into a `$project` stage.
    pub fn as_document(&self) -> &Document {
        &self.0
    }
}

/// Reads from the child collection `C_child_name`, emitting rows keyed by
/// `merge_id` for the phase-2 collapse.
///
/// ```text
/// [ { $project: { _id: 0,
///                 child_name: { $literal: child_name },
///                 merge_id:   "$<child_key>",
///                 <parent_key>: "$$ROOT" } } ]
/// ```
pub fn child_by_merge_key(parent_key: &str, child_name: &str, child_key: &str) -> Vec<Document> {
    vec![doc! {
        "$project": {
            "_id": 0,
            "child_name": { "$literal": child_name },
            "merge_id": format!("${child_key}"),
            parent_key: "$$ROOT",
        }
    }]
}

/// Reads from the parent collection `P`, emitting rows keyed by `merge_id`
/// for the phase-2 collapse. A parent may hold either the raw scalar
/// reference or a document already containing the child key; `$ifNull`
/// selects whichever is present.
///
/// ```text
/// [ { $project: { _id: 0,
///                 child_name: { $literal: child_name },
///                 merge_id:   { $ifNull: [ "$<parent_key>.<child_key>",
///                                          "$<parent_key>" ] },
///                 parent_id:  "$_id" } } ]
/// ```
pub fn parent_child_merge_key(parent_key: &str, child_name: &str, child_key: &str) -> Vec<Document> {
    vec![doc! {
        "$project": {
            "_id": 0,
            "child_name": { "$literal": child_name },
            "merge_id": {
                "$ifNull": [
                    format!("${parent_key}.{child_key}"),
                    format!("${parent_key}"),
                ]
            },
            "parent_id": "$_id",
        }
    }]
}

/// Reads `T1`, writes `T2`: collapses the child-row/parent-row pairs sharing
/// a `(child_name, merge_id)` down to one document per `parent_id`.
///
/// ```text
/// [ { $group:  { _id: { child_name: "$child_name", merge_id: "$merge_id" },
///                parent_id: { $push: "$parent_id" },
///                <...accumulators> } },
///   { $unwind: "$parent_id" },
///   { $group:  { _id: "$parent_id", <...accumulators> } },
///   { $project:{ _id: 0, parent_id: "$_id", <...projectors> } } ]
/// ```
pub fn merge_one_all(accumulators: &Accumulators, projectors: &Projectors) -> Vec<Document> {
    let mut first_group = doc! {
        "_id": { "child_name": "$child_name", "merge_id": "$merge_id" },
        "parent_id": { "$push": "$parent_id" },
    };
    first_group.extend(accumulators.as_document().clone());

    let mut second_group = doc! { "_id": "$parent_id" };
    second_group.extend(accumulators.as_document().clone());

    let mut project = doc! { "_id": 0, "parent_id": "$_id" };
    project.extend(projectors.as_document().clone());

    vec![
        doc! { "$group": first_group },
        doc! { "$unwind": "$parent_id" },
        doc! { "$group": second_group },
        doc! { "$project": project },
    ]
}

/// Reads from the child collection, emitting rows keyed by `parent_id`
/// straight into `T2` for a "many" relation.
///
/// ```text
/// [ { $match:  { <child_key>: { $ne: null } } },
///   { $project:{ _id: 0,
///                parent_id: "$<child_key>",
///                <parent_key>: "$$ROOT" } } ]
/// ```
pub fn copy_many_with_parent_id(parent_key: &str, child_key: &str) -> Vec<Document> {
    vec![
        doc! { "$match": { child_key: { "$ne": bson::Bson::Null } } },
        doc! {
            "$project": {
                "_id": 0,
                "parent_id": format!("${child_key}"),
                parent_key: "$$ROOT",
            }
        },
    ]
}

/// Reads `T2`, grouping by `parent_id` to produce one accumulated document
/// per parent.
///
/// ```text
/// [ { $group: { _id: "$parent_id", <...all_accumulators> } } ]
/// ```
pub fn group_and_update_pipeline(all_accumulators: &Accumulators) -> Vec<Document> {
    let mut group = doc! { "_id": "$parent_id" };
    group.extend(all_accumulators.as_document().clone());
    vec![doc! { "$group": group }]
}

/// Append the accumulator/projector entries implied by a resolved
/// [`MergeEntry`], matching the orchestrator's bookkeeping at each fan-in step.
pub fn record_one_entry(entry: &MergeEntry, all: &mut Accumulators, one: &mut Accumulators, proj: &mut Projectors) {
    all.push_max(&entry.parent_key);
    one.push_max(&entry.parent_key);
    proj.push(&entry.parent_key);
}

/// Append the accumulator entry implied by a resolved "many" [`MergeEntry`].
pub fn record_many_entry(entry: &MergeEntry, all: &mut Accumulators) {
    all.push_array(&entry.parent_key);
}
