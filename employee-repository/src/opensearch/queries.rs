//! OpenSearch query builders.
//!
//! Every lookup in this service is either "everything" or "the document with
//! this `_id`", so the builders are small.

use serde_json::{json, Value};

/// Build a `match_all` search returning at most `limit` documents.
pub fn build_match_all_query(limit: usize) -> Value {
    json!({
        "query": {
            "match_all": {}
        },
        "size": limit
    })
}

/// Build the term filter matching a single document identifier.
///
/// Matches on the `_id` metadata field rather than the `id` source field so
/// documents indexed without an `id` in their body are still addressable.
fn build_id_filter(id: &str) -> Value {
    json!({
        "bool": {
            "must": [
                { "term": { "_id": id } }
            ]
        }
    })
}

/// Build a search for the document with the given identifier.
pub fn build_id_query(id: &str) -> Value {
    json!({
        "query": build_id_filter(id),
        "size": 1
    })
}

/// Build a delete-by-query body removing documents with the given identifier.
pub fn build_delete_by_id_query(id: &str) -> Value {
    json!({
        "query": build_id_filter(id)
    })
}
