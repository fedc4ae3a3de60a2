use crate::config::Config;
use crate::error::WhispererError;
use crate::llm::SimulatedAssistant;
use crate::models::{
    CodeGenRequest, DocSearchRequest, EndpointRequest, ScrapedDocumentation, WorkspaceRequest,
};
use crate::scraper::{workspace_slug, DocScraper};
use crate::tools;
use crate::translate::{translate, TranslationRequest};
use anyhow::Result;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use std::convert::Infallible;
use std::net::SocketAddr;
use tracing::{error, info};
use warp::http::StatusCode;
use warp::{Filter, Rejection, Reply};

const MAX_BODY_BYTES: u64 = 64 * 1024;

/// Shared, read-only state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self { config }
    }
}

#[derive(Debug, Deserialize)]
struct ScrapeRequest {
    url: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ScrapeResponse {
    #[serde(flatten)]
    documentation: ScrapedDocumentation,
    workspace_slug: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChatRequest {
    message: String,
    #[serde(default = "default_api_context")]
    api_context: String,
}

fn default_api_context() -> String {
    "this".to_string()
}

#[derive(Debug, Serialize)]
struct ChatResponse {
    reply: String,
    simulated: bool,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
    code: &'static str,
}

pub async fn run_server(config: Config) -> Result<()> {
    let addr = SocketAddr::new(config.host, config.port);
    let state = AppState::new(config);

    info!(address = %addr, "Server running (all backends simulated)");
    warp::serve(routes(state)).run(addr).await;

    Ok(())
}

pub fn routes(state: AppState) -> impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone {
    let health_route = warp::path("health")
        .and(warp::path::end())
        .and(warp::get())
        .map(|| warp::reply::json(&serde_json::json!({"status": "healthy"})));

    let translate_route = warp::path!("api" / "translate")
        .and(warp::post())
        .and(json_body::<TranslationRequest>())
        .and(with_state(state.clone()))
        .and_then(translate_handler);

    let scrape_route = warp::path!("api" / "scrape")
        .and(warp::post())
        .and(json_body::<ScrapeRequest>())
        .and(with_state(state.clone()))
        .and_then(scrape_handler);

    let chat_route = warp::path!("api" / "chat")
        .and(warp::post())
        .and(json_body::<ChatRequest>())
        .and(with_state(state))
        .and_then(chat_handler);

    let catalog_route = warp::path!("api" / "tools")
        .and(warp::get())
        .map(|| warp::reply::json(&tools::catalog()));

    let tester_route = warp::path!("api" / "tools" / "endpoint-tester")
        .and(warp::post())
        .and(json_body::<EndpointRequest>())
        .map(|req: EndpointRequest| warp::reply::json(&tools::test_endpoint(&req)));

    let codegen_route = warp::path!("api" / "tools" / "code-generator")
        .and(warp::post())
        .and(json_body::<CodeGenRequest>())
        .map(|req: CodeGenRequest| warp::reply::json(&tools::generate_code(&req)));

    let search_route = warp::path!("api" / "tools" / "doc-search")
        .and(warp::post())
        .and(json_body::<DocSearchRequest>())
        .map(|req: DocSearchRequest| warp::reply::json(&tools::search_docs(&req)));

    let workspace_route = warp::path!("api" / "tools" / "workspace-manager")
        .and(warp::post())
        .and(json_body::<WorkspaceRequest>())
        .map(|req: WorkspaceRequest| warp::reply::json(&tools::manage_workspace(&req)));

    health_route
        .or(translate_route)
        .or(scrape_route)
        .or(chat_route)
        .or(catalog_route)
        .or(tester_route)
        .or(codegen_route)
        .or(search_route)
        .or(workspace_route)
        .recover(handle_rejection)
        .with(warp::cors().allow_any_origin())
        .with(warp::trace::request())
}

fn with_state(state: AppState) -> impl Filter<Extract = (AppState,), Error = Infallible> + Clone {
    warp::any().map(move || state.clone())
}

fn json_body<T: DeserializeOwned + Send>() -> impl Filter<Extract = (T,), Error = Rejection> + Clone {
    warp::body::content_length_limit(MAX_BODY_BYTES).and(warp::body::json())
}

async fn translate_handler(
    request: TranslationRequest,
    state: AppState,
) -> Result<impl Reply, Rejection> {
    let response = translate(request, state.config.simulated_delay())
        .await
        .map_err(warp::reject::custom)?;
    Ok(warp::reply::json(&response))
}

async fn scrape_handler(request: ScrapeRequest, state: AppState) -> Result<impl Reply, Rejection> {
    let scraper = DocScraper::new(state.config.simulated_delay());
    let documentation = scraper
        .scrape(&request.url)
        .await
        .map_err(warp::reject::custom)?;
    let workspace_slug = workspace_slug(&documentation.title);

    Ok(warp::reply::json(&ScrapeResponse {
        documentation,
        workspace_slug,
    }))
}

async fn chat_handler(request: ChatRequest, state: AppState) -> Result<impl Reply, Rejection> {
    if request.message.trim().is_empty() {
        return Err(warp::reject::custom(WhispererError::validation(
            "Message is required",
        )));
    }

    let assistant = SimulatedAssistant::new(state.config.simulated_delay());
    let reply = assistant
        .generate_answer(&request.message, &request.api_context)
        .await;

    Ok(warp::reply::json(&ChatResponse {
        reply,
        simulated: true,
    }))
}

async fn handle_rejection(err: Rejection) -> Result<impl Reply, Infallible> {
    let (status, message, code) = if let Some(e) = err.find::<WhispererError>() {
        (e.status(), e.to_string(), e.code())
    } else if let Some(e) = err.find::<warp::filters::body::BodyDeserializeError>() {
        (StatusCode::BAD_REQUEST, e.to_string(), "INVALID_REQUEST")
    } else if err.find::<warp::reject::PayloadTooLarge>().is_some() {
        (
            StatusCode::PAYLOAD_TOO_LARGE,
            "Request body too large".to_string(),
            "INVALID_REQUEST",
        )
    } else if err.find::<warp::reject::UnsupportedMediaType>().is_some() {
        (
            StatusCode::UNSUPPORTED_MEDIA_TYPE,
            "Expected a JSON body".to_string(),
            "INVALID_REQUEST",
        )
    } else if err.find::<warp::reject::LengthRequired>().is_some() {
        (
            StatusCode::LENGTH_REQUIRED,
            "A JSON body with a content-length is required".to_string(),
            "INVALID_REQUEST",
        )
    } else if err.is_not_found() {
        (StatusCode::NOT_FOUND, "Not found".to_string(), "NOT_FOUND")
    } else if err.find::<warp::reject::MethodNotAllowed>().is_some() {
        (
            StatusCode::METHOD_NOT_ALLOWED,
            "Method not allowed".to_string(),
            "METHOD_NOT_ALLOWED",
        )
    } else {
        error!(rejection = ?err, "Unhandled rejection");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Internal server error".to_string(),
            "UNKNOWN",
        )
    };

    let body = warp::reply::json(&ErrorResponse {
        error: message,
        code,
    });
    Ok(warp::reply::with_status(body, status))
}
