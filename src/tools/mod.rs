//! The assistant's tools. Each is a pure function of its request; none of
//! them touches the network or any store.

mod code_generator;
mod doc_search;
mod endpoint_tester;
mod workspace_manager;

pub use code_generator::{generate_code, has_template};
pub use doc_search::search_docs;
pub use endpoint_tester::test_endpoint;
pub use workspace_manager::manage_workspace;

use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct ToolInfo {
    pub name: &'static str,
    pub description: &'static str,
    pub route: &'static str,
}

pub fn catalog() -> Vec<ToolInfo> {
    vec![
        ToolInfo {
            name: "api_endpoint_tester",
            description: "Test an API endpoint with parameters and return the response (simulation mode)",
            route: "/api/tools/endpoint-tester",
        },
        ToolInfo {
            name: "code_generator",
            description: "Generate code snippets for API integration in various programming languages",
            route: "/api/tools/code-generator",
        },
        ToolInfo {
            name: "api_doc_search",
            description: "Search through API documentation to find specific information about endpoints, authentication, or parameters",
            route: "/api/tools/doc-search",
        },
        ToolInfo {
            name: "workspace_manager",
            description: "Manage API workspaces - create, update, or get information about workspaces",
            route: "/api/tools/workspace-manager",
        },
    ]
}
