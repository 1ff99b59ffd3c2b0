//! Grafana HTTP API response types.

use serde::{Deserialize, Serialize};

/// One entry of `/api/search?type=dash-db`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchHit {
    #[serde(default)]
    pub id: Option<i64>,
    pub uid: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub url: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(rename = "folderTitle", default, skip_serializing_if = "Option::is_none")]
    pub folder_title: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl SearchHit {
    /// Whether the hit is a dashboard (folders share the search endpoint)
    #[must_use]
    pub fn is_dashboard(&self) -> bool {
        self.kind.is_empty() || self.kind == "dash-db"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_hit_parsing() {
        let json = r#"[
            {"id":3,"uid":"c0be4e42","title":"App Debug","uri":"db/app-debug",
             "url":"/d/c0be4e42/app-debug","slug":"","type":"dash-db","tags":[],
             "isStarred":false,"sortMeta":0},
            {"id":4,"uid":"f1","title":"Infra","type":"dash-folder"}
        ]"#;
        let hits: Vec<SearchHit> = serde_json::from_str(json).expect("valid search response");

        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].title, "App Debug");
        assert!(hits[0].is_dashboard());
        assert!(!hits[1].is_dashboard());
    }
}
