use std::collections::HashSet;

use serde::Serialize;
use serde_json::{Map, Value};

use super::{Identity, KeySpec, Record};

/// Added, removed and shared entries between two snapshots of a keyed
/// collection.
///
/// Records are matched on their key fields only. Two records with the same
/// key but different values elsewhere are the same entry, so neither shows
/// up in `added` or `removed`. `shared` carries just the key fields of the
/// common entries for that reason: the rest may differ between snapshots.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CollectionDiff<R = Value> {
    /// Records of the newer snapshot whose key is absent from the older one
    pub added: Vec<R>,
    /// Records of the older snapshot whose key is absent from the newer one
    pub removed: Vec<R>,
    /// Key projections present in both, deduplicated, in older snapshot order
    pub shared: Vec<Map<String, Value>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiffSummary {
    pub added: usize,
    pub removed: usize,
    pub shared: usize,
}

fn identities<R: Record>(records: &[R], key: &KeySpec) -> HashSet<Identity> {
    records.iter().map(|r| key.identity_of(r)).collect()
}

fn difference<R: Record + Clone>(from: &[R], other: &HashSet<Identity>, key: &KeySpec) -> Vec<R> {
    from.iter()
        .filter(|r| !other.contains(&key.identity_of(*r)))
        .cloned()
        .collect()
}

impl<R: Record + Clone> CollectionDiff<R> {
    /// Compares `older` against `newer` on `key`.
    ///
    /// Duplicate keys within one snapshot are not collapsed in `added` or
    /// `removed`. A record lacking a key field still gets an identity, with
    /// that component marked missing.
    pub fn from_compare(older: &[R], newer: &[R], key: &KeySpec) -> Self {
        let older_ids = identities(older, key);
        let newer_ids = identities(newer, key);
        log::trace!(
            "comparing {} older / {} newer records on key {}",
            older.len(),
            newer.len(),
            key
        );

        let added = difference(newer, &older_ids, key);
        let removed = difference(older, &newer_ids, key);

        let mut seen = HashSet::new();
        let shared = older
            .iter()
            .filter_map(|r| {
                let id = key.identity_of(r);
                (newer_ids.contains(&id) && seen.insert(id)).then(|| key.project(r))
            })
            .collect();

        Self {
            added,
            removed,
            shared,
        }
    }
}

impl<R> CollectionDiff<R> {
    /// True when both snapshots hold the same set of keys.
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }

    pub fn summary(&self) -> DiffSummary {
        DiffSummary {
            added: self.added.len(),
            removed: self.removed.len(),
            shared: self.shared.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::test::create_test_records;
    use serde_json::json;

    fn values(v: Value) -> Vec<Value> {
        match v {
            Value::Array(items) => items,
            _ => panic!("expected array"),
        }
    }

    fn projections(v: Value) -> Vec<Map<String, Value>> {
        values(v)
            .into_iter()
            .map(|p| match p {
                Value::Object(map) => map,
                _ => panic!("expected object"),
            })
            .collect()
    }

    fn key_set(records: &[Value], key: &KeySpec) -> HashSet<Identity> {
        identities(records, key)
    }

    #[test]
    fn test_single_key_ignores_other_fields() {
        let older = values(json!([{"id": 1, "x": "a"}]));
        let newer = values(json!([{"id": 1, "x": "b"}, {"id": 2, "x": "c"}]));
        let diff = CollectionDiff::from_compare(&older, &newer, &KeySpec::default());
        assert_eq!(diff.added, values(json!([{"id": 2, "x": "c"}])));
        assert!(diff.removed.is_empty());
        assert_eq!(diff.shared, projections(json!([{"id": 1}])));
    }

    #[test]
    fn test_composite_key() {
        let older = values(json!([
            { "id": 1, "type": 1, "title": "Caco" },
            { "id": 1, "type": 7, "title": "Dada" },
            { "id": 2, "type": 1, "title": "Ludu" },
            { "id": 3, "type": 2, "title": "Mambo" },
        ]));
        let newer = values(json!([
            { "id": 1, "type": 7, "title": "Coco" },
            { "id": 4, "type": 3, "title": "Midaa" },
            { "id": 2, "type": 1, "title": "Ludu" },
            { "id": 3, "type": 2, "title": "Mambo" },
            { "id": 3, "type": 1, "title": "Ratonga" },
        ]));
        let key = KeySpec::composite(["id", "type"]);
        let diff = CollectionDiff::from_compare(&older, &newer, &key);
        assert_eq!(
            diff.added,
            values(json!([
                { "id": 4, "type": 3, "title": "Midaa" },
                { "id": 3, "type": 1, "title": "Ratonga" },
            ]))
        );
        assert_eq!(
            diff.removed,
            values(json!([{ "id": 1, "type": 1, "title": "Caco" }]))
        );
        assert_eq!(
            diff.shared,
            projections(json!([
                { "id": 1, "type": 7 },
                { "id": 2, "type": 1 },
                { "id": 3, "type": 2 },
            ]))
        );
    }

    #[test]
    fn test_integral_float_key_is_same_entry() {
        let older = values(json!([{"id": 1, "x": "a"}]));
        let newer = values(json!([{"id": 1.0, "x": "a"}, {"id": 1.5}]));
        let diff = CollectionDiff::from_compare(&older, &newer, &KeySpec::default());
        assert_eq!(diff.added, values(json!([{"id": 1.5}])));
        assert!(diff.removed.is_empty());
        assert_eq!(diff.shared, projections(json!([{"id": 1}])));
    }

    #[test]
    fn test_composite_key_no_join_collision() {
        let older = values(json!([{ "a": "1-2", "b": "3" }]));
        let newer = values(json!([{ "a": "1", "b": "2-3" }]));
        let key = KeySpec::composite(["a", "b"]);
        let diff = CollectionDiff::from_compare(&older, &newer, &key);
        assert_eq!(diff.added, newer);
        assert_eq!(diff.removed, older);
        assert!(diff.shared.is_empty());
    }

    #[test]
    fn test_empty_inputs() {
        let some = values(json!([{"id": 1}, {"id": 2}]));
        let key = KeySpec::default();

        let diff = CollectionDiff::<Value>::from_compare(&[], &[], &key);
        assert!(diff.added.is_empty() && diff.removed.is_empty() && diff.shared.is_empty());

        let diff = CollectionDiff::from_compare(&[], &some, &key);
        assert_eq!(diff.added, some);
        assert!(diff.removed.is_empty() && diff.shared.is_empty());

        let diff = CollectionDiff::from_compare(&some, &[], &key);
        assert_eq!(diff.removed, some);
        assert!(diff.added.is_empty() && diff.shared.is_empty());
    }

    #[test]
    fn test_missing_key_field() {
        let older = values(json!([{"name": "a"}, {"id": null}]));
        let newer = values(json!([{"name": "b"}]));
        let diff = CollectionDiff::from_compare(&older, &newer, &KeySpec::default());
        assert!(diff.added.is_empty());
        assert_eq!(diff.removed, values(json!([{"id": null}])));
        assert_eq!(diff.shared, vec![Map::new()]);
    }

    #[test]
    fn test_duplicates_kept_in_added_removed() {
        let older = values(json!([{"id": 1, "v": 1}, {"id": 1, "v": 2}, {"id": 2}]));
        let newer = values(json!([{"id": 2}, {"id": 3, "v": 1}, {"id": 3, "v": 2}]));
        let diff = CollectionDiff::from_compare(&older, &newer, &KeySpec::default());
        assert_eq!(diff.added.len(), 2);
        assert_eq!(diff.removed.len(), 2);
        assert_eq!(diff.shared, projections(json!([{"id": 2}])));
    }

    #[test]
    fn test_shared_deduplicated_in_older_order() {
        let older = values(json!([{"id": 3}, {"id": 1}, {"id": 3}, {"id": 2}]));
        let newer = values(json!([{"id": 1}, {"id": 2}, {"id": 3}]));
        let diff = CollectionDiff::from_compare(&older, &newer, &KeySpec::default());
        assert_eq!(
            diff.shared,
            projections(json!([{"id": 3}, {"id": 1}, {"id": 2}]))
        );
    }

    #[test]
    fn test_borrowed_records() {
        let older = values(json!([{"id": 1}, {"id": 2}]));
        let newer = values(json!([{"id": 2}, {"id": 3}]));
        let older: Vec<&Value> = older.iter().collect();
        let newer: Vec<&Value> = newer.iter().collect();
        let diff = CollectionDiff::from_compare(&older, &newer, &KeySpec::default());
        assert_eq!(diff.added, vec![&json!({"id": 3})]);
        assert_eq!(diff.removed, vec![&json!({"id": 1})]);
    }

    #[test]
    fn test_serialize_shape() {
        let older = values(json!([{"id": 1}]));
        let newer = values(json!([{"id": 2}]));
        let diff = CollectionDiff::from_compare(&older, &newer, &KeySpec::default());
        assert_eq!(
            serde_json::to_value(&diff).unwrap(),
            json!({"added": [{"id": 2}], "removed": [{"id": 1}], "shared": []})
        );
        assert_eq!(
            diff.summary(),
            DiffSummary {
                added: 1,
                removed: 1,
                shared: 0
            }
        );
        assert!(!diff.is_empty());
    }

    #[test]
    fn test_idempotence() {
        let key = KeySpec::composite(["id", "type"]);
        let mut iter = create_test_records(114514);
        for _ in 0..1_000 {
            let a = iter.next().unwrap();
            let diff = CollectionDiff::from_compare(&a, &a, &key);
            assert!(diff.is_empty(), "a: {:?}", a);
            let unique: HashSet<Identity> = key_set(&a, &key);
            assert_eq!(diff.shared.len(), unique.len(), "a: {:?}", a);
        }
    }

    #[test]
    fn test_symmetry_and_disjointness() {
        let key = KeySpec::composite(["id", "type"]);
        let mut a_iter = create_test_records(1919810);
        let mut b_iter = create_test_records(19260817);
        for _ in 0..1_000 {
            let a = a_iter.next().unwrap();
            let b = b_iter.next().unwrap();
            let ab = CollectionDiff::from_compare(&a, &b, &key);
            let ba = CollectionDiff::from_compare(&b, &a, &key);
            assert_eq!(key_set(&ab.added, &key), key_set(&ba.removed, &key));
            assert_eq!(key_set(&ab.removed, &key), key_set(&ba.added, &key));

            let added = key_set(&ab.added, &key);
            let removed = key_set(&ab.removed, &key);
            assert!(added.is_disjoint(&removed), "a: {:?}; b: {:?}", a, b);
            assert!(added.is_disjoint(&key_set(&a, &key)));
            assert!(removed.is_disjoint(&key_set(&b, &key)));

            let shared: HashSet<Identity> =
                ab.shared.iter().map(|p| key.identity_of(p)).collect();
            let both: HashSet<Identity> = key_set(&a, &key)
                .intersection(&key_set(&b, &key))
                .cloned()
                .collect();
            assert_eq!(shared, both, "a: {:?}; b: {:?}", a, b);
        }
    }
}
