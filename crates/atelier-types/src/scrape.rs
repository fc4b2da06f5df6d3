use serde::{Deserialize, Serialize};

/// One endpoint extracted from an API documentation page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrapedEndpoint {
    pub method: String,
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Result of scraping an API documentation URL.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrapedDocs {
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_title: Option<String>,
    pub endpoints: Vec<ScrapedEndpoint>,
    pub total_count: usize,
}
