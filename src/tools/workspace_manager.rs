use rand::Rng;
use tracing::{info, warn};

use crate::error::WhispererError;
use crate::models::{
    WorkspaceAction, WorkspaceRecord, WorkspaceRequest, WorkspaceResult, WorkspaceSummary,
};

const ID_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const ID_SUFFIX_LEN: usize = 9;

/// Mock workspace management. Nothing is stored: `create` builds a fresh
/// record per call and `list` always answers with the same two entries.
pub fn manage_workspace(request: &WorkspaceRequest) -> WorkspaceResult {
    match dispatch(request) {
        Ok(result) => result,
        Err(e) => {
            warn!(action = ?request.action, error = %e, "Workspace action failed");
            WorkspaceResult {
                success: false,
                workspace: None,
                workspaces: None,
                error: Some(e.to_string()),
                formatted_response: "❌ Invalid workspace action specified.".to_string(),
            }
        }
    }
}

fn dispatch(request: &WorkspaceRequest) -> Result<WorkspaceResult, WhispererError> {
    match request.action {
        WorkspaceAction::Create => Ok(create(request)),
        WorkspaceAction::List => Ok(list()),
        // Declared actions without an implementation.
        WorkspaceAction::Update | WorkspaceAction::Get => {
            Err(WhispererError::unsupported("Invalid action"))
        }
    }
}

fn generate_workspace_id() -> String {
    let mut rng = rand::thread_rng();
    let suffix: String = (0..ID_SUFFIX_LEN)
        .map(|_| ID_ALPHABET[rng.gen_range(0..ID_ALPHABET.len())] as char)
        .collect();
    format!("ws_{}", suffix)
}

fn create(request: &WorkspaceRequest) -> WorkspaceResult {
    let workspace = WorkspaceRecord {
        id: generate_workspace_id(),
        name: request.workspace_name.clone(),
        api_url: request.api_url.clone(),
        description: request.description.clone(),
        created_at: chrono::Utc::now(),
    };
    info!(id = %workspace.id, "Created workspace (not persisted)");

    let formatted_response = format!(
        "✅ **Workspace Created Successfully**\n\n📁 **{}**\n{}\n\n🔗 API: {}\n\nYou can now start chatting about this API and testing endpoints!",
        workspace.name.as_deref().unwrap_or_default(),
        workspace.description.as_deref().unwrap_or_default(),
        workspace.api_url.as_deref().unwrap_or_default(),
    );

    WorkspaceResult {
        success: true,
        workspace: Some(workspace),
        workspaces: None,
        error: None,
        formatted_response,
    }
}

fn list() -> WorkspaceResult {
    let workspaces = vec![
        WorkspaceSummary {
            name: "Stripe API".to_string(),
            description: "Payment processing".to_string(),
            last_used: "2 days ago".to_string(),
        },
        WorkspaceSummary {
            name: "OpenAI API".to_string(),
            description: "AI and machine learning".to_string(),
            last_used: "1 week ago".to_string(),
        },
    ];

    let lines: Vec<String> = workspaces
        .iter()
        .map(|ws| format!("• **{}** - {} ({})", ws.name, ws.description, ws.last_used))
        .collect();

    WorkspaceResult {
        success: true,
        formatted_response: format!(
            "📂 **Your API Workspaces**\n\n{}\n\nClick on any workspace to open it and start working with that API.",
            lines.join("\n")
        ),
        workspace: None,
        workspaces: Some(workspaces),
        error: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(action: WorkspaceAction) -> WorkspaceRequest {
        WorkspaceRequest {
            action,
            workspace_name: Some("Test".to_string()),
            api_url: Some("https://x.com".to_string()),
            description: Some("d".to_string()),
        }
    }

    #[test]
    fn create_returns_generated_record() {
        let result = manage_workspace(&request(WorkspaceAction::Create));
        assert!(result.success);

        let ws = result.workspace.unwrap();
        assert!(ws.id.starts_with("ws_"));
        assert_eq!(ws.id.len(), 3 + ID_SUFFIX_LEN);
        assert_eq!(ws.name.as_deref(), Some("Test"));
        assert_eq!(ws.api_url.as_deref(), Some("https://x.com"));
        assert!(result.formatted_response.contains("📁 **Test**\nd\n\n🔗 API: https://x.com"));
    }

    #[test]
    fn ids_use_lowercase_base36() {
        let id = generate_workspace_id();
        assert!(id[3..].bytes().all(|b| ID_ALPHABET.contains(&b)));
    }

    #[test]
    fn list_is_fixed() {
        let result = manage_workspace(&WorkspaceRequest {
            action: WorkspaceAction::List,
            workspace_name: None,
            api_url: None,
            description: None,
        });
        let names: Vec<_> = result.workspaces.unwrap().into_iter().map(|w| w.name).collect();
        assert_eq!(names, vec!["Stripe API", "OpenAI API"]);
        assert!(result
            .formatted_response
            .contains("• **Stripe API** - Payment processing (2 days ago)"));
    }

    #[test]
    fn update_and_get_fail_explicitly() {
        for action in [WorkspaceAction::Update, WorkspaceAction::Get] {
            let result = manage_workspace(&request(action));
            assert!(!result.success);
            assert_eq!(result.error.as_deref(), Some("Invalid action"));
            assert_eq!(result.formatted_response, "❌ Invalid workspace action specified.");
        }
    }
}
