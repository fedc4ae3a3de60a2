use serde::{Deserialize, Serialize};

use super::HttpMethod;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiEndpoint {
    pub method: HttpMethod,
    pub path: String,
    pub description: String,
    pub parameters: Vec<ApiParameter>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiParameter {
    pub name: String,
    #[serde(rename = "type")]
    pub param_type: String,
    pub required: bool,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Authentication {
    #[serde(rename = "type")]
    pub auth_type: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrapedDocumentation {
    pub url: String,
    pub title: String,
    pub base_url: String,
    pub endpoints: Vec<ApiEndpoint>,
    pub authentication: Authentication,
    pub rate_limit: String,
    pub scraped_at: chrono::DateTime<chrono::Utc>,
}
