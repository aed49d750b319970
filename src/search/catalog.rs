//! Named query catalog
//!
//! The set of search expressions a caller can run is fixed and declared
//! here, each with a short selector name, a human-readable description, and
//! the Elasticsearch query body it expands to.

use serde_json::{json, Value};

/// One selectable search expression.
#[derive(Debug, Clone)]
pub struct NamedQuery {
    /// Short name used to select the query
    pub name: &'static str,
    /// Human-readable description
    pub description: &'static str,
    /// Elasticsearch query DSL body
    pub body: Value,
}

/// The full query catalog, in display order.
pub fn catalog() -> Vec<NamedQuery> {
    vec![
        NamedQuery {
            name: "all",
            description: "All tweets",
            body: json!({ "match_all": {} }),
        },
        NamedQuery {
            name: "links",
            description: "Tweets containing links",
            body: json!({ "exists": { "field": "entities.urls.expanded_url" } }),
        },
        NamedQuery {
            name: "replies",
            description: "Replies to other tweets",
            body: json!({ "exists": { "field": "in_reply_to_status_id" } }),
        },
        NamedQuery {
            name: "retweets",
            description: "Retweets",
            body: json!({ "exists": { "field": "retweeted_status" } }),
        },
    ]
}

/// Look a query up by its selector name.
pub fn find(name: &str) -> Option<NamedQuery> {
    catalog().into_iter().find(|q| q.name == name)
}
