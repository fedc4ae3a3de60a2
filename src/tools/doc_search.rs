use tracing::debug;

use crate::models::{DocSearchRequest, DocSearchResult, DocTopic};

pub fn search_docs(request: &DocSearchRequest) -> DocSearchResult {
    let api_name = &request.api_name;
    let result = lookup_topic(&request.query, api_name).unwrap_or_else(|| DocTopic {
        title: "Search Results".to_string(),
        content: format!(
            "Found information about \"{}\" in the {} API documentation. Here are the key points:\n\n\
             • Check the main documentation for detailed information\n\
             • Look for examples in the API reference\n\
             • Consider checking the SDK documentation for your language",
            request.query, api_name
        ),
        examples: Vec::new(),
    });

    debug!(query = %request.query, title = %result.title, "Doc search");

    let mut formatted = format!("📚 **{}** ({} API)\n\n{}", result.title, api_name, result.content);
    if !result.examples.is_empty() {
        let examples: Vec<String> = result.examples.iter().map(|ex| format!("`{}`", ex)).collect();
        formatted.push_str("\n\n**Examples:**\n");
        formatted.push_str(&examples.join("\n"));
    }

    DocSearchResult {
        success: true,
        query: request.query.clone(),
        result,
        formatted_response: formatted,
    }
}

/// Canned documentation for the three known topics. Matching is exact after
/// lowercasing; there is no index behind this.
fn lookup_topic(query: &str, api_name: &str) -> Option<DocTopic> {
    let topic = match query.to_lowercase().as_str() {
        "authentication" => DocTopic {
            title: "Authentication".to_string(),
            content: format!(
                "The {} API uses Bearer token authentication. Include your API key in the Authorization header:\n\n\
                 `Authorization: Bearer sk_live_...`\n\n\
                 You can find your API keys in your dashboard under the API section.",
                api_name
            ),
            examples: vec![
                r#"curl -H "Authorization: Bearer sk_live_..." https://api.example.com/v1/endpoint"#.to_string(),
            ],
        },
        "rate limits" => DocTopic {
            title: "Rate Limits".to_string(),
            content: format!(
                "The {} API enforces rate limits to ensure fair usage:\n\n\
                 • **Standard**: 100 requests per minute\n\
                 • **Premium**: 1000 requests per minute\n\
                 • **Enterprise**: Custom limits\n\n\
                 Rate limit information is included in response headers:\n\
                 • `X-RateLimit-Limit`: Maximum requests allowed\n\
                 • `X-RateLimit-Remaining`: Requests remaining in current window",
                api_name
            ),
            examples: Vec::new(),
        },
        "pagination" => DocTopic {
            title: "Pagination".to_string(),
            content: format!(
                "{} API uses cursor-based pagination for list endpoints:\n\n\
                 **Parameters:**\n\
                 • `limit`: Number of items to return (max 100)\n\
                 • `starting_after`: Cursor for pagination\n\n\
                 **Response includes:**\n\
                 • `has_more`: Boolean indicating if more data exists\n\
                 • `data`: Array of objects",
                api_name
            ),
            examples: vec!["GET /v1/customers?limit=10&starting_after=cus_abc123".to_string()],
        },
        _ => return None,
    };
    Some(topic)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn search(query: &str, api_name: &str) -> DocSearchResult {
        search_docs(&DocSearchRequest {
            query: query.to_string(),
            api_name: api_name.to_string(),
        })
    }

    #[test]
    fn authentication_matches_in_any_case() {
        for query in ["authentication", "Authentication", "AUTHENTICATION"] {
            for api in ["Stripe", "OpenAI", ""] {
                assert_eq!(search(query, api).result.title, "Authentication");
            }
        }
    }

    #[test]
    fn every_topic_resolves() {
        for key in ["authentication", "rate limits", "pagination"] {
            assert!(lookup_topic(key, "Stripe").is_some(), "{key}");
        }
        assert_eq!(search("Rate Limits", "Stripe").result.title, "Rate Limits");
        assert_eq!(search("pagination", "Stripe").result.title, "Pagination");
    }

    #[test]
    fn no_partial_matching() {
        assert_eq!(search("auth", "Stripe").result.title, "Search Results");
        assert_eq!(search(" pagination ", "Stripe").result.title, "Search Results");
    }

    #[test]
    fn fallback_names_api_verbatim() {
        let result = search("webhooks", "Acme Payments v2");
        assert_eq!(result.result.title, "Search Results");
        assert!(result
            .result
            .content
            .starts_with("Found information about \"webhooks\" in the Acme Payments v2 API documentation."));
        assert!(result.result.examples.is_empty());
        assert!(!result.formatted_response.contains("**Examples:**"));
    }

    #[test]
    fn formatted_response_lists_examples() {
        let result = search("pagination", "Stripe");
        assert_eq!(
            result.formatted_response,
            format!(
                "📚 **Pagination** (Stripe API)\n\n{}\n\n**Examples:**\n`GET /v1/customers?limit=10&starting_after=cus_abc123`",
                result.result.content
            )
        );
    }
}
