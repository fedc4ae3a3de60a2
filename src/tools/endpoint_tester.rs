use chrono::{SecondsFormat, Utc};
use std::collections::BTreeMap;
use tracing::{info, warn};
use url::Url;

use crate::error::WhispererError;
use crate::models::{
    EndpointRequest, EndpointTestResult, MockResponse, MockResponseData, PreparedRequest,
};

/// Tests an endpoint in simulation mode: the request is fully prepared but
/// never sent, and a fixed 200 response echoing the request is returned.
pub fn test_endpoint(request: &EndpointRequest) -> EndpointTestResult {
    let prepared = match prepare_request(request) {
        Ok(prepared) => prepared,
        Err(e) => {
            warn!(endpoint = %request.endpoint, error = %e, "Endpoint test failed");
            return EndpointTestResult {
                success: false,
                simulated: true,
                request: None,
                response: None,
                error: Some(e.to_string()),
                formatted_response: format!("❌ **API Test Failed**\n\nError: {}", e),
            };
        }
    };

    info!(
        method = %request.method,
        url = %prepared.url,
        "Simulating endpoint call, no request sent"
    );

    let response = mock_response(request);
    let pretty_data = serde_json::to_string_pretty(&response.data).unwrap_or_default();

    EndpointTestResult {
        success: true,
        simulated: true,
        formatted_response: format!(
            "✅ **{} {}** - Status: {}\n\n```json\n{}\n```",
            request.method, request.endpoint, response.status, pretty_data
        ),
        request: Some(prepared),
        response: Some(response),
        error: None,
    }
}

/// Resolves the endpoint against the base URL and assembles what a real
/// client would send.
fn prepare_request(request: &EndpointRequest) -> Result<PreparedRequest, WhispererError> {
    let base = Url::parse(&request.base_url)?;
    let mut url = base.join(&request.endpoint)?;

    if let Some(params) = request.parameters.as_ref().filter(|p| !p.is_empty()) {
        let mut pairs = url.query_pairs_mut();
        for (key, value) in params {
            pairs.append_pair(key, value);
        }
    }

    let mut headers = BTreeMap::from([(
        "Content-Type".to_string(),
        "application/json".to_string(),
    )]);
    headers.extend(request.headers.clone());

    let body = match &request.body {
        Some(body) if request.method.allows_body() => Some(
            serde_json::to_string(body).map_err(|e| WhispererError::simulation(e.to_string()))?,
        ),
        _ => None,
    };

    Ok(PreparedRequest {
        method: request.method,
        url: url.to_string(),
        headers,
        body,
    })
}

fn mock_response(request: &EndpointRequest) -> MockResponse {
    MockResponse {
        status: 200,
        status_text: "OK".to_string(),
        data: MockResponseData {
            message: "Mock API response for demo".to_string(),
            endpoint: request.endpoint.clone(),
            method: request.method,
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            parameters: request.parameters.clone().unwrap_or_default(),
            body: request.body.clone(),
        },
        headers: BTreeMap::from([
            ("content-type".to_string(), "application/json".to_string()),
            ("x-ratelimit-remaining".to_string(), "99".to_string()),
        ]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{HttpMethod, QueryParams};
    use serde_json::json;

    fn request(method: HttpMethod, endpoint: &str) -> EndpointRequest {
        EndpointRequest {
            method,
            endpoint: endpoint.to_string(),
            base_url: "https://api.example.com".to_string(),
            headers: BTreeMap::new(),
            body: None,
            parameters: None,
        }
    }

    #[test]
    fn echoes_method_and_endpoint() {
        for method in HttpMethod::ALL {
            let result = test_endpoint(&request(method, "/v1/customers"));
            assert!(result.success);
            assert!(result.simulated);
            let data = &result.response.unwrap().data;
            assert_eq!(data.endpoint, "/v1/customers");
            assert_eq!(data.method, method);
        }
    }

    #[test]
    fn formats_markdown_summary() {
        let result = test_endpoint(&request(HttpMethod::Get, "/v1/charges"));
        assert!(result.formatted_response.starts_with("✅ **GET /v1/charges** - Status: 200"));
        assert!(result.formatted_response.contains("```json\n{"));
        assert!(result.formatted_response.contains("\"message\": \"Mock API response for demo\""));
    }

    #[test]
    fn builds_query_string_and_merges_headers() {
        let mut req = request(HttpMethod::Get, "/v1/customers");
        req.parameters = Some(QueryParams::from([
            ("limit".to_string(), "10".to_string()),
            ("q".to_string(), "a b".to_string()),
        ]));
        req.headers.insert("X-Trace".to_string(), "1".to_string());

        let prepared = prepare_request(&req).unwrap();
        assert_eq!(prepared.url, "https://api.example.com/v1/customers?limit=10&q=a+b");
        assert_eq!(prepared.headers["Content-Type"], "application/json");
        assert_eq!(prepared.headers["X-Trace"], "1");
    }

    #[test]
    fn keeps_caller_parameter_order() {
        let req: EndpointRequest = serde_json::from_value(json!({
            "method": "GET",
            "endpoint": "/v1/customers",
            "baseUrl": "https://api.example.com",
            "parameters": {"starting_after": "cus_1", "limit": "10"}
        }))
        .unwrap();

        let result = test_endpoint(&req);
        assert_eq!(
            result.request.unwrap().url,
            "https://api.example.com/v1/customers?starting_after=cus_1&limit=10"
        );
        let echoed: Vec<_> = result.response.unwrap().data.parameters.into_keys().collect();
        assert_eq!(echoed, ["starting_after", "limit"]);
    }

    #[test]
    fn body_only_attached_for_body_methods() {
        let body = json!({"email": "a@b.c"}).as_object().cloned();

        let mut get = request(HttpMethod::Get, "/v1/customers");
        get.body = body.clone();
        assert!(prepare_request(&get).unwrap().body.is_none());

        let mut post = request(HttpMethod::Post, "/v1/customers");
        post.body = body;
        assert_eq!(prepare_request(&post).unwrap().body.unwrap(), r#"{"email":"a@b.c"}"#);
    }

    #[test]
    fn echoes_body_as_null_when_absent() {
        let result = test_endpoint(&request(HttpMethod::Delete, "/v1/customers/1"));
        let value = serde_json::to_value(result.response.unwrap().data).unwrap();
        assert_eq!(value["body"], serde_json::Value::Null);
        assert_eq!(value["parameters"], json!({}));
    }

    #[test]
    fn malformed_base_url_yields_failure_result() {
        let mut req = request(HttpMethod::Get, "/v1/customers");
        req.base_url = "not a url".to_string();

        let result = test_endpoint(&req);
        assert!(!result.success);
        assert!(result.response.is_none());
        let error = result.error.unwrap();
        assert!(result.formatted_response.starts_with("❌ **API Test Failed**\n\nError: "));
        assert!(result.formatted_response.ends_with(&error));
    }
}
