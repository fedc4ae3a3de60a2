use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::error::WhispererError;

/// Query parameters, kept in the order the caller gave them.
pub type QueryParams = IndexMap<String, String>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
    Patch,
}

impl HttpMethod {
    pub const ALL: [HttpMethod; 5] = [
        HttpMethod::Get,
        HttpMethod::Post,
        HttpMethod::Put,
        HttpMethod::Delete,
        HttpMethod::Patch,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Patch => "PATCH",
        }
    }

    /// Whether a request body is sent for this method.
    pub fn allows_body(&self) -> bool {
        matches!(self, HttpMethod::Post | HttpMethod::Put | HttpMethod::Patch)
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HttpMethod {
    type Err = WhispererError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        HttpMethod::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| WhispererError::validation(format!("Invalid HTTP method: {}", s)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Python,
    Javascript,
    Go,
    Rust,
    Curl,
    Php,
    Java,
    Csharp,
}

impl Language {
    pub const ALL: [Language; 8] = [
        Language::Python,
        Language::Javascript,
        Language::Go,
        Language::Rust,
        Language::Curl,
        Language::Php,
        Language::Java,
        Language::Csharp,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Language::Python => "python",
            Language::Javascript => "javascript",
            Language::Go => "go",
            Language::Rust => "rust",
            Language::Curl => "curl",
            Language::Php => "php",
            Language::Java => "java",
            Language::Csharp => "csharp",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Language {
    type Err = WhispererError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Language::ALL
            .into_iter()
            .find(|l| l.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| WhispererError::validation(format!("Unknown language: {}", s)))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthType {
    Bearer,
    Apikey,
    Basic,
    #[default]
    None,
}

impl FromStr for AuthType {
    type Err = WhispererError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "bearer" => Ok(AuthType::Bearer),
            "apikey" => Ok(AuthType::Apikey),
            "basic" => Ok(AuthType::Basic),
            "none" => Ok(AuthType::None),
            other => Err(WhispererError::validation(format!("Unknown auth type: {}", other))),
        }
    }
}

/// Description of a call to an API endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EndpointRequest {
    pub method: HttpMethod,
    /// Path such as `/v1/customers`
    pub endpoint: String,
    pub base_url: String,
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
    #[serde(default)]
    pub body: Option<Map<String, Value>>,
    /// Query parameters
    #[serde(default, alias = "queryParams")]
    pub parameters: Option<QueryParams>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeGenRequest {
    pub language: Language,
    #[serde(default)]
    pub auth_type: AuthType,
    #[serde(flatten)]
    pub request: EndpointRequest,
}

/// What would have been sent had the tester not been in simulation mode.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreparedRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: BTreeMap<String, String>,
    pub body: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MockResponseData {
    pub message: String,
    pub endpoint: String,
    pub method: HttpMethod,
    pub timestamp: String,
    pub parameters: QueryParams,
    pub body: Option<Map<String, Value>>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MockResponse {
    pub status: u16,
    pub status_text: String,
    pub data: MockResponseData,
    pub headers: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EndpointTestResult {
    pub success: bool,
    /// Always true: no request ever leaves the process.
    pub simulated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request: Option<PreparedRequest>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response: Option<MockResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub formatted_response: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeGenResult {
    pub success: bool,
    pub language: Language,
    pub code: String,
    pub formatted_response: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocSearchRequest {
    pub query: String,
    pub api_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocTopic {
    pub title: String,
    pub content: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub examples: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocSearchResult {
    pub success: bool,
    pub query: String,
    pub result: DocTopic,
    pub formatted_response: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkspaceAction {
    Create,
    Update,
    Get,
    List,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkspaceRequest {
    pub action: WorkspaceAction,
    #[serde(default)]
    pub workspace_name: Option<String>,
    #[serde(default)]
    pub api_url: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkspaceRecord {
    pub id: String,
    pub name: Option<String>,
    pub api_url: Option<String>,
    pub description: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkspaceSummary {
    pub name: String,
    pub description: String,
    pub last_used: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkspaceResult {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workspace: Option<WorkspaceRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workspaces: Option<Vec<WorkspaceSummary>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub formatted_response: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn endpoint_request_reads_camel_case_wire_names() {
        let req: EndpointRequest = serde_json::from_value(json!({
            "method": "POST",
            "endpoint": "/v1/customers",
            "baseUrl": "https://api.example.com",
            "body": {"email": "a@b.c"},
            "queryParams": {"limit": "10"}
        }))
        .unwrap();

        assert_eq!(req.method, HttpMethod::Post);
        assert!(req.headers.is_empty());
        assert_eq!(req.parameters.unwrap()["limit"], "10");
    }

    #[test]
    fn unknown_method_is_rejected() {
        let result: Result<EndpointRequest, _> = serde_json::from_value(json!({
            "method": "TRACE",
            "endpoint": "/",
            "baseUrl": "https://api.example.com"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn code_gen_request_defaults_auth_to_none() {
        let req: CodeGenRequest = serde_json::from_value(json!({
            "language": "go",
            "method": "GET",
            "endpoint": "/v1/charges",
            "baseUrl": "https://api.example.com"
        }))
        .unwrap();

        assert_eq!(req.language, Language::Go);
        assert_eq!(req.auth_type, AuthType::None);
        assert_eq!(req.request.endpoint, "/v1/charges");
    }

    #[test]
    fn parses_cli_style_names() {
        assert_eq!("patch".parse::<HttpMethod>().unwrap(), HttpMethod::Patch);
        assert_eq!("CSharp".parse::<Language>().unwrap(), Language::Csharp);
        assert_eq!("Bearer".parse::<AuthType>().unwrap(), AuthType::Bearer);
        assert!("cobol".parse::<Language>().is_err());
    }

    #[test]
    fn only_body_methods_allow_body() {
        let with_body: Vec<_> = HttpMethod::ALL.into_iter().filter(|m| m.allows_body()).collect();
        assert_eq!(with_body, vec![HttpMethod::Post, HttpMethod::Put, HttpMethod::Patch]);
    }
}
