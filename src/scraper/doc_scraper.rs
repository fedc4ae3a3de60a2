use regex::Regex;
use std::sync::LazyLock;
use std::time::Duration;
use tracing::info;

use crate::error::WhispererError;
use crate::models::{ApiEndpoint, ApiParameter, Authentication, HttpMethod, ScrapedDocumentation};

static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));
static NON_SLUG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^a-z0-9-]").expect("valid regex"));

/// Stand-in for a documentation crawler. No page is fetched: every URL
/// yields the same three endpoints, with the title and base URL guessed
/// from the URL itself.
pub struct DocScraper {
    delay: Duration,
}

impl DocScraper {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    pub async fn scrape(&self, url: &str) -> Result<ScrapedDocumentation, WhispererError> {
        if url.trim().is_empty() {
            return Err(WhispererError::validation("Documentation URL is required"));
        }

        info!(url, "Simulating documentation scrape");
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        let title = if url.contains("stripe") {
            "Stripe API"
        } else if url.contains("openai") {
            "OpenAI API"
        } else {
            "API Documentation"
        };
        let base_url = if url.contains("stripe") {
            "https://api.stripe.com"
        } else {
            "https://api.example.com"
        };

        let endpoints = sample_endpoints();
        info!(title, endpoints = endpoints.len(), "Extracted endpoints");

        Ok(ScrapedDocumentation {
            url: url.to_string(),
            title: title.to_string(),
            base_url: base_url.to_string(),
            endpoints,
            authentication: Authentication {
                auth_type: "Bearer Token".to_string(),
                description: "Include your secret key in the Authorization header".to_string(),
            },
            rate_limit: "100 requests per second".to_string(),
            scraped_at: chrono::Utc::now(),
        })
    }
}

/// URL slug a workspace for this documentation would live under.
pub fn workspace_slug(title: &str) -> String {
    let lower = title.to_lowercase();
    let dashed = WHITESPACE.replace_all(&lower, "-");
    NON_SLUG.replace_all(&dashed, "").into_owned()
}

fn param(name: &str, param_type: &str, required: bool, description: &str) -> ApiParameter {
    ApiParameter {
        name: name.to_string(),
        param_type: param_type.to_string(),
        required,
        description: description.to_string(),
    }
}

fn sample_endpoints() -> Vec<ApiEndpoint> {
    vec![
        ApiEndpoint {
            method: HttpMethod::Post,
            path: "/v1/customers".to_string(),
            description: "Create a new customer".to_string(),
            parameters: vec![
                param("email", "string", true, "Customer email address"),
                param("name", "string", false, "Customer name"),
                param("metadata", "object", false, "Additional customer data"),
            ],
        },
        ApiEndpoint {
            method: HttpMethod::Get,
            path: "/v1/customers/{id}".to_string(),
            description: "Retrieve a customer".to_string(),
            parameters: vec![param("id", "string", true, "Customer ID")],
        },
        ApiEndpoint {
            method: HttpMethod::Post,
            path: "/v1/charges".to_string(),
            description: "Create a charge".to_string(),
            parameters: vec![
                param("amount", "integer", true, "Amount in cents"),
                param("currency", "string", true, "Currency code"),
                param("customer", "string", false, "Customer ID"),
            ],
        },
    ]
}
