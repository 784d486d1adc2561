//! Merge spec parsing — turns compact textual specs into resolved
//! [`MergeEntry`] records.
//!
//! Grammar (single entry):
//!
//! ```text
//! spec       := parent_key [ ":" child_part ]
//! child_part := simple | many
//! simple     := [ child_name ] [ "." child_key ]
//! many       := "[" [ child_name ] [ "." child_key ] "]"
//! ```

use thiserror::Error;

/// Reserved field names a `parent_key` may never shadow — they're used
/// internally by the pipelines built in [`crate::pipeline`].
const RESERVED_NAMES: [&str; 4] = ["_id", "parent_id", "child_name", "merge_id"];

/// Whether a relation embeds a single document or attaches an array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Relation {
    /// One-to-one: embed a single referenced child document.
    One,
    /// One-to-many: attach an array of dependent child documents.
    Many,
}

/// A single resolved merge-spec entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeEntry {
    /// The relation kind.
    pub relation: Relation,
    /// The field on the parent document that receives the embedded value(s).
    pub parent_key: String,
    /// The child collection name.
    pub child_name: String,
    /// The field on the child document (or back-reference field, for
    /// "many") used to join.
    pub child_key: String,
}

/// An ordered, resolved merge spec.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeSpec(Vec<MergeEntry>);

/// Errors that can occur while parsing a merge spec string.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SpecError {
    /// The `parent_key` portion (or the whole string, if there's no `:`) was empty.
    #[error("empty parent_key in spec entry {index}: {raw:?}")]
    EmptyParentKey {
        /// Index of the offending entry within the input list.
        index: usize,
        /// The raw spec string.
        raw: String,
    },

    /// A `[...]` relation wasn't terminated, or had trailing characters after `]`.
    #[error("unterminated or malformed `[...]` in spec entry {index}: {raw:?}")]
    UnterminatedBracket {
        /// Index of the offending entry.
        index: usize,
        /// The raw spec string.
        raw: String,
    },

    /// A resolved segment (parent_key, child_name, or child_key) contained
    /// characters illegal for a BSON field name in this engine's usage, or
    /// was itself empty where a default could not apply.
    #[error("illegal field name {segment:?} in spec entry {index}: {raw:?}")]
    IllegalFieldName {
        /// Index of the offending entry.
        index: usize,
        /// The raw spec string.
        raw: String,
        /// The offending segment's resolved value.
        segment: String,
    },

    /// A resolved `parent_key` collided with a name reserved by the pipeline
    /// builders (`_id`, `parent_id`, `child_name`, `merge_id`).
    #[error("parent_key {parent_key:?} is reserved in spec entry {index}: {raw:?}")]
    ReservedFieldName {
        /// Index of the offending entry.
        index: usize,
        /// The raw spec string.
        raw: String,
        /// The offending parent_key.
        parent_key: String,
    },

    /// Two entries resolved to the same `parent_key`.
    #[error("duplicate parent_key {parent_key:?} (entries {first} and {second})")]
    DuplicateParentKey {
        /// The repeated key.
        parent_key: String,
        /// Index of the first entry using this key.
        first: usize,
        /// Index of the second entry using this key.
        second: usize,
    },
}

fn is_legal_field_name(segment: &str) -> bool {
    !segment.is_empty()
        && segment
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Parse one spec string into a resolved entry, per spec §4.1's resolution
/// rules. `parent_name` is the name of the parent collection, used as the
/// default `child_key` for "many" relations.
fn parse_entry(index: usize, raw: &str, parent_name: &str) -> Result<MergeEntry, SpecError> {
    let (parent_key, child_part) = match raw.split_once(':') {
        Some((p, c)) => (p, c),
        None => (raw, ""),
    };

    if parent_key.is_empty() {
        return Err(SpecError::EmptyParentKey {
            index,
            raw: raw.to_string(),
        });
    }

    let (relation, inner) = if let Some(stripped) = child_part.strip_prefix('[') {
        if !stripped.ends_with(']') {
            return Err(SpecError::UnterminatedBracket {
                index,
                raw: raw.to_string(),
            });
        }
        (Relation::Many, &stripped[..stripped.len() - 1])
    } else {
        (Relation::One, child_part)
    };

    let (child_name, child_key) = match inner.split_once('.') {
        Some((name, key)) => (name, Some(key)),
        None => (inner, None),
    };

    let child_name = if child_name.is_empty() {
        parent_key
    } else {
        child_name
    };

    let child_key = match (relation, child_key) {
        (_, Some(key)) if !key.is_empty() => key,
        (Relation::One, _) => "_id",
        (Relation::Many, _) => parent_name,
    };

    for segment in [parent_key, child_name, child_key] {
        if !is_legal_field_name(segment) {
            return Err(SpecError::IllegalFieldName {
                index,
                raw: raw.to_string(),
                segment: segment.to_string(),
            });
        }
    }

    if RESERVED_NAMES.contains(&parent_key) {
        return Err(SpecError::ReservedFieldName {
            index,
            raw: raw.to_string(),
            parent_key: parent_key.to_string(),
        });
    }

    Ok(MergeEntry {
        relation,
        parent_key: parent_key.to_string(),
        child_name: child_name.to_string(),
        child_key: child_key.to_string(),
    })
}

impl MergeSpec {
    /// Parse an ordered list of spec strings against a parent collection name.
    ///
    /// Order is preserved — it defines phase ordering *within* a relation,
    /// but phases run all "one" entries before any "many" entry (see
    /// [`crate::orchestrator`]).
    pub fn parse(parent_name: &str, specs: &[impl AsRef<str>]) -> Result<Self, SpecError> {
        let mut entries = Vec::with_capacity(specs.len());
        for (index, raw) in specs.iter().enumerate() {
            entries.push(parse_entry(index, raw.as_ref(), parent_name)?);
        }

        for i in 0..entries.len() {
            for j in (i + 1)..entries.len() {
                if entries[i].parent_key == entries[j].parent_key {
                    return Err(SpecError::DuplicateParentKey {
                        parent_key: entries[i].parent_key.clone(),
                        first: i,
                        second: j,
                    });
                }
            }
        }

        Ok(MergeSpec(entries))
    }

    /// All entries, in input order.
    pub fn entries(&self) -> &[MergeEntry] {
        &self.0
    }

    /// Entries with `relation == Relation::One`, in input order.
    pub fn one_entries(&self) -> impl Iterator<Item = &MergeEntry> {
        self.0.iter().filter(|e| e.relation == Relation::One)
    }

    /// Entries with `relation == Relation::Many`, in input order.
    pub fn many_entries(&self) -> impl Iterator<Item = &MergeEntry> {
        self.0.iter().filter(|e| e.relation == Relation::Many)
    }

    /// Whether the spec has no entries.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.0.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(relation: Relation, parent_key: &str, child_name: &str, child_key: &str) -> MergeEntry {
        MergeEntry {
            relation,
            parent_key: parent_key.to_string(),
            child_name: child_name.to_string(),
            child_key: child_key.to_string(),
        }
    }

    #[test]
    fn defaults_bare_key_to_one_with_id() {
        // S3: "gender" -> {one, gender, gender, _id}
        let spec = MergeSpec::parse("people", &["gender"]).unwrap();
        assert_eq!(
            spec.entries(),
            &[entry(Relation::One, "gender", "gender", "_id")]
        );
    }

    #[test]
    fn defaults_many_brackets_to_parent_name_key() {
        // S3: "pet:[]" with parent "owner" -> {many, pet, pet, owner}
        let spec = MergeSpec::parse("owner", &["pet:[]"]).unwrap();
        assert_eq!(
            spec.entries(),
            &[entry(Relation::Many, "pet", "pet", "owner")]
        );
    }

    #[test]
    fn resolves_explicit_one_child_name_and_key() {
        // S3: "a:b.c" -> {one, a, b, c}
        let spec = MergeSpec::parse("p", &["a:b.c"]).unwrap();
        assert_eq!(spec.entries(), &[entry(Relation::One, "a", "b", "c")]);
    }

    #[test]
    fn resolves_explicit_many_child_name_and_key() {
        // S3: "a:[b.c]" -> {many, a, b, c}
        let spec = MergeSpec::parse("p", &["a:[b.c]"]).unwrap();
        assert_eq!(spec.entries(), &[entry(Relation::Many, "a", "b", "c")]);
    }

    #[test]
    fn empty_child_name_defaults_to_parent_key() {
        let spec = MergeSpec::parse("p", &["gender:.foo"]).unwrap();
        assert_eq!(
            spec.entries(),
            &[entry(Relation::One, "gender", "gender", "foo")]
        );
    }

    #[test]
    fn rejects_empty_parent_key() {
        let err = MergeSpec::parse("p", &[":foo"]).unwrap_err();
        assert!(matches!(err, SpecError::EmptyParentKey { .. }));
    }

    #[test]
    fn rejects_trailing_junk_after_bracket() {
        let err = MergeSpec::parse("p", &["a:[b]x"]).unwrap_err();
        assert!(matches!(err, SpecError::UnterminatedBracket { .. }));
    }

    #[test]
    fn rejects_unterminated_bracket() {
        let err = MergeSpec::parse("p", &["a:[b"]).unwrap_err();
        assert!(matches!(err, SpecError::UnterminatedBracket { .. }));
    }

    #[test]
    fn rejects_illegal_field_name_characters() {
        let err = MergeSpec::parse("p", &["a:b-c.d"]).unwrap_err();
        assert!(matches!(err, SpecError::IllegalFieldName { .. }));
    }

    #[test]
    fn rejects_reserved_parent_key() {
        let err = MergeSpec::parse("p", &["_id"]).unwrap_err();
        assert!(matches!(err, SpecError::ReservedFieldName { .. }));
    }

    #[test]
    fn rejects_duplicate_parent_keys() {
        let err = MergeSpec::parse("p", &["gender", "gender:other"]).unwrap_err();
        assert!(matches!(err, SpecError::DuplicateParentKey { .. }));
    }

    #[test]
    fn preserves_input_order_and_splits_by_relation() {
        let spec = MergeSpec::parse("p", &["a", "b:[]", "c", "d:[]"]).unwrap();
        let ones: Vec<_> = spec.one_entries().map(|e| e.parent_key.as_str()).collect();
        let manys: Vec<_> = spec.many_entries().map(|e| e.parent_key.as_str()).collect();
        assert_eq!(ones, vec!["a", "c"]);
        assert_eq!(manys, vec!["b", "d"]);
    }

    #[test]
    fn s1_people_gender_alias_spec() {
        let spec = MergeSpec::parse("people", &["gender", "alias"]).unwrap();
        assert_eq!(
            spec.entries(),
            &[
                entry(Relation::One, "gender", "gender", "_id"),
                entry(Relation::One, "alias", "alias", "_id"),
            ]
        );
    }

    #[test]
    fn s2_many_pet_alias_spec() {
        let spec = MergeSpec::parse("owner", &["pet:[]", "alias:[]"]).unwrap();
        assert_eq!(
            spec.entries(),
            &[
                entry(Relation::Many, "pet", "pet", "owner"),
                entry(Relation::Many, "alias", "alias", "owner"),
            ]
        );
    }
}
