//! OpenSearch index configuration and mappings.
//!
//! This module defines the index settings and mappings for the employee index.

use serde_json::{json, Value};

/// Get the index settings and mappings for the employee index.
///
/// Identifiers and email addresses are keywords for exact lookups. Names and
/// place are analyzed text with a `raw` keyword sub-field for sorting.
pub fn get_index_settings() -> Value {
    json!({
        "settings": {
            "number_of_shards": 1,
            "number_of_replicas": 1
        },
        "mappings": {
            "properties": {
                "id": {
                    "type": "keyword"
                },
                "first_name": {
                    "type": "text",
                    "fields": {
                        "raw": { "type": "keyword" }
                    }
                },
                "last_name": {
                    "type": "text",
                    "fields": {
                        "raw": { "type": "keyword" }
                    }
                },
                "place": {
                    "type": "text",
                    "fields": {
                        "raw": { "type": "keyword" }
                    }
                },
                "email_id": {
                    "type": "keyword"
                }
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_settings_structure() {
        let settings = get_index_settings();

        assert!(settings["settings"]["number_of_shards"].is_number());
        assert!(settings["settings"]["number_of_replicas"].is_number());

        let properties = &settings["mappings"]["properties"];
        assert_eq!(properties["id"]["type"], "keyword");
        assert_eq!(properties["email_id"]["type"], "keyword");
        assert_eq!(properties["first_name"]["type"], "text");
        assert_eq!(properties["last_name"]["fields"]["raw"]["type"], "keyword");
        assert_eq!(properties["place"]["type"], "text");
    }
}
