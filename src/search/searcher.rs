//! Search facade

use super::catalog::NamedQuery;
use crate::elastic::{ElasticClient, SearchError};
use crate::types::Record;
use serde_json::{json, Value};
use tracing::debug;

/// Runs named queries against the index and returns deserialized records.
pub struct Searcher {
    client: ElasticClient,
}

impl Searcher {
    pub fn new(client: ElasticClient) -> Self {
        Self { client }
    }

    /// Execute `query`, returning at most `max_results` records.
    pub fn search(
        &self,
        query: &NamedQuery,
        max_results: usize,
    ) -> Result<Vec<Record>, SearchError> {
        let body = json!({
            "query": query.body,
            "size": max_results,
        });

        let response = self.client.search(&body)?;
        let records = extract_hits(&response, max_results);
        debug!("query '{}' returned {} records", query.name, records.len());
        Ok(records)
    }
}

/// Pull the `_source` documents out of a search response. The `size`
/// parameter already bounds the fetch; the cap here just guards against a
/// backend that returns more than asked.
fn extract_hits(response: &Value, max_results: usize) -> Vec<Record> {
    response
        .get("hits")
        .and_then(|h| h.get("hits"))
        .and_then(Value::as_array)
        .map(|hits| {
            hits.iter()
                .filter_map(|hit| hit.get("_source").cloned().map(Record))
                .take(max_results)
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_response() -> Value {
        json!({
            "took": 3,
            "hits": {
                "total": { "value": 2 },
                "hits": [
                    { "_id": "1", "_source": { "text": "first", "id_str": "1" } },
                    { "_id": "2", "_source": { "text": "second", "id_str": "2" } }
                ]
            }
        })
    }

    #[test]
    fn extract_hits_unpacks_sources() {
        let records = extract_hits(&sample_response(), 10);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].text(), Some("first"));
        assert_eq!(records[1].id(), Some("2".to_string()));
    }

    #[test]
    fn extract_hits_respects_the_cap() {
        let records = extract_hits(&sample_response(), 1);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].text(), Some("first"));
    }

    #[test]
    fn extract_hits_tolerates_empty_and_malformed_responses() {
        assert!(extract_hits(&json!({}), 10).is_empty());
        assert!(extract_hits(&json!({ "hits": {} }), 10).is_empty());
        assert!(extract_hits(&json!({ "hits": { "hits": [] } }), 10).is_empty());
    }
}
