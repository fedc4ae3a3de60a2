use serde_json::{Map, Value};
use tracing::info;

use crate::models::{AuthType, CodeGenRequest, CodeGenResult, HttpMethod, Language, QueryParams};

const BEARER_PLACEHOLDER: &str = "Bearer YOUR_API_KEY";

/// Inputs shared by every template.
struct Snippet<'a> {
    method: HttpMethod,
    url: String,
    bearer: bool,
    params: Option<&'a QueryParams>,
    body: Option<&'a Map<String, Value>>,
}

pub fn generate_code(request: &CodeGenRequest) -> CodeGenResult {
    let req = &request.request;
    let snippet = Snippet {
        method: req.method,
        url: format!("{}{}", req.base_url, req.endpoint),
        bearer: request.auth_type == AuthType::Bearer,
        params: req.parameters.as_ref().filter(|p| !p.is_empty()),
        body: req.body.as_ref(),
    };

    let code = render(request.language, &snippet);
    info!(language = %request.language, method = %req.method, "Generated code snippet");

    CodeGenResult {
        success: true,
        language: request.language,
        formatted_response: format!(
            "🚀 **Generated {} code for {} {}**\n\n```{}\n{}\n```\n\n_Copy this code and replace YOUR_API_KEY with your actual API key._",
            request.language.as_str().to_uppercase(),
            req.method,
            req.endpoint,
            request.language,
            code
        ),
        code,
    }
}

/// Languages with a real template. The rest get a placeholder.
pub fn has_template(language: Language) -> bool {
    matches!(
        language,
        Language::Python | Language::Javascript | Language::Curl | Language::Go
    )
}

fn render(language: Language, snippet: &Snippet<'_>) -> String {
    match language {
        Language::Python => python(snippet),
        Language::Javascript => javascript(snippet),
        Language::Curl => curl(snippet),
        Language::Go => go(snippet),
        other => format!("# Code generation for {} not yet implemented", other),
    }
}

fn python(s: &Snippet<'_>) -> String {
    let auth = if s.bearer {
        format!(",\n    \"Authorization\": \"{}\"", BEARER_PLACEHOLDER)
    } else {
        String::new()
    };
    let params_block = s
        .params
        .map(|p| format!("# Query parameters\nparams = {}", python_dict(p)))
        .unwrap_or_default();
    let body_block = s
        .body
        .map(|b| format!("\n# Request body\nbody = {}", python_literal(&Value::Object(b.clone()))))
        .unwrap_or_default();
    let params_arg = if s.params.is_some() { ",\n    params=params" } else { "" };
    let body_arg = if s.body.is_some() { ",\n    json=body" } else { "" };

    format!(
        r#"import requests
import json

# API configuration
url = {url}
headers = {{
    "Content-Type": "application/json"{auth}
}}

{params_block}
{body_block}

# Make the request
response = requests.{method}(
    url{params_arg}{body_arg},
    headers=headers
)

# Handle the response
if response.status_code == 200:
    data = response.json()
    print(json.dumps(data, indent=2))
else:
    print(f"Error: {{response.status_code}} - {{response.text}}")"#,
        url = quoted(&s.url),
        method = s.method.as_str().to_lowercase(),
    )
}

fn javascript(s: &Snippet<'_>) -> String {
    let auth = if s.bearer {
        format!(",\n    \"Authorization\": \"{}\"", BEARER_PLACEHOLDER)
    } else {
        String::new()
    };
    let params_block = s
        .params
        .map(|p| format!("// Query parameters\nconst params = new URLSearchParams({});", pretty_json(p)))
        .unwrap_or_default();
    let body_block = s
        .body
        .map(|b| format!("\n// Request body\nconst body = {};", pretty_json(b)))
        .unwrap_or_default();
    let query = if s.params.is_some() { "?${params}" } else { "" };
    let body_opt = if s.body.is_some() {
        ",\n            body: JSON.stringify(body)"
    } else {
        ""
    };

    format!(
        r#"// API configuration
const url = {url};
const headers = {{
    "Content-Type": "application/json"{auth}
}};

{params_block}
{body_block}

// Make the request
async function apiCall() {{
    try {{
        const response = await fetch(`${{url}}{query}`, {{
            method: "{method}",
            headers: headers{body_opt}
        }});

        if (response.ok) {{
            const data = await response.json();
            console.log(data);
        }} else {{
            console.error(`Error: ${{response.status}} - ${{response.statusText}}`);
        }}
    }} catch (error) {{
        console.error("Request failed:", error);
    }}
}}

apiCall();"#,
        url = quoted(&s.url),
        method = s.method,
    )
}

fn curl(s: &Snippet<'_>) -> String {
    let query = s
        .params
        .map(|p| {
            let encoded = url::form_urlencoded::Serializer::new(String::new())
                .extend_pairs(p)
                .finish();
            format!("?{}", encoded)
        })
        .unwrap_or_default();
    let auth = if s.bearer {
        format!(" \\\n  -H \"Authorization: {}\"", BEARER_PLACEHOLDER)
    } else {
        String::new()
    };
    let data = s
        .body
        .map(|b| {
            let compact = serde_json::to_string(b).unwrap_or_default();
            format!(" \\\n  -d {}", shell_quoted(&compact))
        })
        .unwrap_or_default();

    format!(
        "curl -X {} \\\n  {} \\\n  -H \"Content-Type: application/json\"{}{}",
        s.method,
        shell_quoted(&format!("{}{}", s.url, query)),
        auth,
        data
    )
}

/// Single-quoted POSIX shell word. Nothing inside is expanded.
fn shell_quoted(s: &str) -> String {
    format!("'{}'", s.replace('\'', r"'\''"))
}

fn go(s: &Snippet<'_>) -> String {
    let mut imports = Vec::new();
    if s.body.is_some() {
        imports.push("bytes");
    }
    imports.extend(["fmt", "io", "net/http"]);
    if s.params.is_some() {
        imports.extend(["net/url", "strings"]);
    }
    let imports: String = imports
        .iter()
        .map(|pkg| format!("    \"{}\"\n", pkg))
        .collect();

    let params_block = s
        .params
        .map(|p| {
            // url.Values.Encode sorts by key, so pairs are joined by hand.
            let pairs: String = p
                .iter()
                .map(|(k, v)| {
                    format!(
                        "        url.QueryEscape({}) + \"=\" + url.QueryEscape({}),\n",
                        quoted(k),
                        quoted(v)
                    )
                })
                .collect();
            format!(
                "\n    // Add query parameters\n    query := []string{{\n{}    }}\n    baseURL += \"?\" + strings.Join(query, \"&\")\n",
                pairs
            )
        })
        .unwrap_or_default();
    let body_block = s
        .body
        .map(|b| {
            let compact = serde_json::to_string(b).unwrap_or_default();
            format!("\n    // Request body\n    bodyBytes := []byte({})\n", quoted(&compact))
        })
        .unwrap_or_default();
    let reader = if s.body.is_some() { "bytes.NewBuffer(bodyBytes)" } else { "nil" };
    let auth = if s.bearer {
        format!("    req.Header.Set(\"Authorization\", \"{}\")\n", BEARER_PLACEHOLDER)
    } else {
        String::new()
    };

    format!(
        r#"package main

import (
{imports})

func main() {{
    // API configuration
    baseURL := {url}
{params_block}{body_block}
    // Create request
    req, err := http.NewRequest("{method}", baseURL, {reader})
    if err != nil {{
        panic(err)
    }}

    // Set headers
    req.Header.Set("Content-Type", "application/json")
{auth}
    // Make request
    client := &http.Client{{}}
    resp, err := client.Do(req)
    if err != nil {{
        panic(err)
    }}
    defer resp.Body.Close()

    // Read response
    responseBody, _ := io.ReadAll(resp.Body)
    fmt.Printf("Status: %s\n", resp.Status)
    fmt.Printf("Response: %s\n", string(responseBody))
}}"#,
        url = quoted(&s.url),
        method = s.method,
    )
}

/// Double-quoted literal valid in Python, JavaScript and Go.
fn quoted(s: &str) -> String {
    serde_json::to_string(s).unwrap_or_else(|_| format!("\"{}\"", s))
}

fn pretty_json<T: serde::Serialize>(value: &T) -> String {
    let mut out = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut out, formatter);
    if value.serialize(&mut ser).is_err() {
        return "{}".to_string();
    }
    String::from_utf8(out).unwrap_or_default()
}

fn python_dict(params: &QueryParams) -> String {
    let map: Map<String, Value> = params
        .iter()
        .map(|(k, v)| (k.clone(), Value::String(v.clone())))
        .collect();
    python_literal(&Value::Object(map))
}

/// Renders JSON as a Python literal, laid out like a 4-space pretty print.
fn python_literal(value: &Value) -> String {
    let mut out = String::new();
    write_python(value, 0, &mut out);
    out
}

fn write_python(value: &Value, depth: usize, out: &mut String) {
    let pad = "    ".repeat(depth + 1);
    let close = "    ".repeat(depth);
    match value {
        Value::Null => out.push_str("None"),
        Value::Bool(true) => out.push_str("True"),
        Value::Bool(false) => out.push_str("False"),
        Value::Number(n) => out.push_str(&n.to_string()),
        Value::String(s) => out.push_str(&quoted(s)),
        Value::Array(items) if items.is_empty() => out.push_str("[]"),
        Value::Array(items) => {
            out.push_str("[\n");
            for (i, item) in items.iter().enumerate() {
                out.push_str(&pad);
                write_python(item, depth + 1, out);
                if i + 1 < items.len() {
                    out.push(',');
                }
                out.push('\n');
            }
            out.push_str(&close);
            out.push(']');
        }
        Value::Object(map) if map.is_empty() => out.push_str("{}"),
        Value::Object(map) => {
            out.push_str("{\n");
            for (i, (key, item)) in map.iter().enumerate() {
                out.push_str(&pad);
                out.push_str(&quoted(key));
                out.push_str(": ");
                write_python(item, depth + 1, out);
                if i + 1 < map.len() {
                    out.push(',');
                }
                out.push('\n');
            }
            out.push_str(&close);
            out.push('}');
        }
    }
}
