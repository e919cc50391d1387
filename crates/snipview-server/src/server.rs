//! Editor and live preview server.

use std::net::SocketAddr;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        Path as UrlPath, State,
    },
    http::StatusCode,
    response::{Html, IntoResponse},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tower_http::services::ServeDir;

use snipview_compile::compile_preview;
use snipview_compile::escape::html_escape;
use snipview_detect::{detect, editor_language, resolve_dependencies, Classification, CompilationType};
use snipview_gallery::{discover_snippets, Snippet};

use crate::pages::{editor_page, snippet_page};
use crate::watcher::{FileWatcher, WatchEvent};
use crate::websocket::{live_client_script, LiveHub, LiveMessage};

/// Configuration for the development server.
#[derive(Debug, Clone)]
pub struct DevServerConfig {
    /// Directory containing snippet files
    pub snippets_dir: PathBuf,

    /// Port to listen on
    pub port: u16,

    /// Host to bind to
    pub host: String,

    /// Open browser on start
    pub open: bool,

    /// Quiet period before recompiling, for the editor and the file watcher
    pub debounce_ms: u64,
}

impl Default for DevServerConfig {
    fn default() -> Self {
        Self {
            snippets_dir: PathBuf::from("snippets"),
            port: 7777,
            host: "127.0.0.1".to_string(),
            open: true,
            debounce_ms: 300,
        }
    }
}

/// Errors that can occur with the server.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Invalid listen address: {0}")]
    InvalidAddress(String),

    #[error("Failed to bind to {0}: {1}")]
    BindError(SocketAddr, String),

    #[error("File watch error: {0}")]
    WatchError(String),
}

/// Shared server state.
pub struct ServerState {
    config: DevServerConfig,
    live: LiveHub,
}

pub type SharedState = Arc<RwLock<ServerState>>;

impl ServerState {
    pub fn new(config: DevServerConfig) -> SharedState {
        Arc::new(RwLock::new(Self {
            config,
            live: LiveHub::new(),
        }))
    }
}

/// Development server.
pub struct DevServer {
    config: DevServerConfig,
}

impl DevServer {
    /// Create a new development server.
    pub fn new(config: DevServerConfig) -> Self {
        Self { config }
    }

    /// Start the development server.
    pub async fn start(self) -> Result<(), ServerError> {
        let addr: SocketAddr = format!("{}:{}", self.config.host, self.config.port)
            .parse()
            .map_err(|_| {
                ServerError::InvalidAddress(format!("{}:{}", self.config.host, self.config.port))
            })?;

        let state = ServerState::new(self.config.clone());

        if self.config.snippets_dir.exists() {
            let root = std::fs::canonicalize(&self.config.snippets_dir)
                .unwrap_or_else(|_| self.config.snippets_dir.clone());

            let (watcher, mut rx) = FileWatcher::new(
                std::slice::from_ref(&root),
                Duration::from_millis(self.config.debounce_ms),
            )
            .map_err(|e| ServerError::WatchError(e.to_string()))?;

            let state_clone = Arc::clone(&state);
            tokio::spawn(async move {
                while let Some(event) = rx.recv().await {
                    handle_watch_event(&state_clone, &root, event).await;
                }
                // Keep watcher alive
                drop(watcher);
            });

            tracing::info!("Watching {}", self.config.snippets_dir.display());
        } else {
            tracing::warn!(
                "Snippets directory {} not found, live previews disabled",
                self.config.snippets_dir.display()
            );
        }

        let app = router(state, &self.config.snippets_dir);

        tracing::info!("Starting dev server at http://{}", addr);

        if self.config.open {
            let url = format!("http://{}", addr);
            let _ = open::that(&url);
        }

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| ServerError::BindError(addr, e.to_string()))?;

        axum::serve(listener, app)
            .await
            .map_err(|e| ServerError::BindError(addr, e.to_string()))?;

        Ok(())
    }
}

/// Build the application router.
pub fn router(state: SharedState, snippets_dir: &Path) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/api/detect", post(detect_handler))
        .route("/api/compile", post(compile_handler))
        .route("/api/dependencies/{compilation_type}", get(dependencies_handler))
        .route("/api/snippets", get(snippets_handler))
        .route("/snippets/{*path}", get(snippet_handler))
        .route("/__live", get(ws_handler))
        .route("/__live.js", get(live_script_handler))
        .nest_service("/raw", ServeDir::new(snippets_dir))
        .with_state(state)
}

/// Recompile a changed snippet and broadcast the result.
async fn handle_watch_event(state: &SharedState, root: &Path, event: WatchEvent) {
    let state = state.read().await;
    let key = relative_key(root, event.path());

    match event {
        WatchEvent::Changed(path) => match Snippet::load(root, &path) {
            Ok(snippet) => {
                let preview = compile_preview(&snippet.code, None);
                tracing::info!(
                    "{} changed ({})",
                    key,
                    preview.classification.compilation_type
                );
                state.live.send(LiveMessage::Preview {
                    path: key,
                    classification: preview.classification,
                    html: preview.html,
                });
            }
            Err(e) => tracing::warn!("Failed to reload snippet: {}", e),
        },

        WatchEvent::Removed(_) => {
            tracing::info!("{} removed", key);
            state.live.send(LiveMessage::Removed { path: key });
        }
    }
}

/// Path relative to the snippets directory with forward slashes.
fn relative_key(root: &Path, path: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .to_string_lossy()
        .replace('\\', "/")
}

/// Request body for `/api/detect`.
#[derive(Debug, Deserialize)]
pub struct DetectRequest {
    pub code: String,
}

/// Request body for `/api/compile`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompileRequest {
    pub code: String,

    /// Skip detection and use this classification
    #[serde(default)]
    pub classification: Option<Classification>,

    /// Force a compilation type; wins over `classification`
    #[serde(default)]
    pub compilation_type: Option<CompilationType>,
}

/// Response body for `/api/compile`.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompileResponse {
    pub classification: Classification,
    pub html: String,
    pub dependencies: Vec<String>,
    pub component_name: Option<String>,
    pub editor_language: String,
}

/// A snippet file listed by `/api/snippets`.
#[derive(Debug, Serialize, Deserialize)]
pub struct SnippetSummary {
    pub path: String,
    pub slug: String,
    pub title: String,
    pub category: String,
    pub url: String,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

fn error_response(status: StatusCode, message: impl Into<String>) -> (StatusCode, Json<ErrorBody>) {
    (
        status,
        Json(ErrorBody {
            error: message.into(),
        }),
    )
}

/// Handler for the editor page.
async fn index_handler(State(state): State<SharedState>) -> Html<String> {
    let state = state.read().await;
    Html(editor_page(state.config.debounce_ms))
}

/// Handler for snippet classification.
async fn detect_handler(Json(request): Json<DetectRequest>) -> Json<Classification> {
    Json(detect(&request.code))
}

/// Handler for snippet compilation.
async fn compile_handler(Json(request): Json<CompileRequest>) -> Json<CompileResponse> {
    let classification = request
        .compilation_type
        .map(Classification::for_compilation_type)
        .or(request.classification);

    let preview = compile_preview(&request.code, classification.as_ref());

    Json(CompileResponse {
        editor_language: editor_language(preview.classification.compilation_type).to_string(),
        classification: preview.classification,
        html: preview.html,
        dependencies: preview.dependencies,
        component_name: preview.component_name,
    })
}

/// Handler for the dependency list of a compilation type.
async fn dependencies_handler(
    UrlPath(tag): UrlPath<String>,
) -> Result<Json<Vec<&'static str>>, (StatusCode, Json<ErrorBody>)> {
    let compilation_type: CompilationType = tag
        .parse()
        .map_err(|e: snipview_detect::ParseTypeError| {
            error_response(StatusCode::BAD_REQUEST, e.to_string())
        })?;

    Ok(Json(resolve_dependencies(compilation_type).to_vec()))
}

/// Handler listing the snippet files.
async fn snippets_handler(State(state): State<SharedState>) -> Json<Vec<SnippetSummary>> {
    let state = state.read().await;
    let root = &state.config.snippets_dir;

    let summaries = discover_snippets(root)
        .into_iter()
        .filter_map(|path| match Snippet::load(root, &path) {
            Ok(snippet) => {
                let key = relative_key(root, &path);
                Some(SnippetSummary {
                    url: format!("/snippets/{}", key),
                    path: key,
                    slug: snippet.slug,
                    title: snippet.title,
                    category: snippet.category,
                })
            }
            Err(e) => {
                tracing::warn!("Skipping snippet: {}", e);
                None
            }
        })
        .collect();

    Json(summaries)
}

/// Handler for the live host page of one snippet.
async fn snippet_handler(
    State(state): State<SharedState>,
    UrlPath(path): UrlPath<String>,
) -> Result<Html<String>, (StatusCode, Html<String>)> {
    let state = state.read().await;
    let root = &state.config.snippets_dir;
    let relative = Path::new(&path);

    let not_found = || {
        (
            StatusCode::NOT_FOUND,
            Html(format!("<h1>Not found</h1><p>No snippet at {}</p>", html_escape(&path))),
        )
    };

    // Only plain relative paths inside the snippets directory
    if !relative.components().all(|c| matches!(c, Component::Normal(_))) {
        return Err(not_found());
    }

    let file = root.join(relative);
    if !file.is_file() {
        return Err(not_found());
    }

    let snippet = Snippet::load(root, &file).map_err(|e| {
        (
            StatusCode::UNPROCESSABLE_ENTITY,
            Html(format!(
                "<h1>Invalid snippet</h1><pre>{}</pre>",
                html_escape(&e.to_string())
            )),
        )
    })?;

    let preview = compile_preview(&snippet.code, None);

    Ok(Html(snippet_page(
        &relative_key(root, &file),
        &snippet.title,
        preview.classification.compilation_type.as_str(),
        &preview.html,
    )))
}

/// Handler for the live WebSocket endpoint.
async fn ws_handler(ws: WebSocketUpgrade, State(state): State<SharedState>) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_ws(socket, state))
}

/// Forward live messages to one WebSocket client.
async fn handle_ws(mut socket: WebSocket, state: SharedState) {
    let mut rx = {
        let state = state.read().await;
        state.live.subscribe()
    };

    if send_json(&mut socket, &LiveMessage::Connected).await.is_err() {
        return;
    }

    loop {
        match rx.recv().await {
            Ok(msg) => {
                if send_json(&mut socket, &msg).await.is_err() {
                    break;
                }
            }
            Err(tokio::sync::broadcast::error::RecvError::Lagged(skipped)) => {
                tracing::debug!("Live client lagged, skipped {} messages", skipped);
            }
            Err(tokio::sync::broadcast::error::RecvError::Closed) => break,
        }
    }
}

async fn send_json(socket: &mut WebSocket, msg: &LiveMessage) -> Result<(), ()> {
    let json = serde_json::to_string(msg).map_err(|e| {
        tracing::warn!("Failed to encode live message: {}", e);
    })?;

    socket.send(Message::Text(json.into())).await.map_err(|_| ())
}

/// Handler for the live client script.
async fn live_script_handler() -> impl IntoResponse {
    ([("content-type", "application/javascript")], live_client_script())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use snipview_detect::Dialect;
    use std::fs;
    use tempfile::tempdir;

    fn state_for(dir: &Path) -> SharedState {
        ServerState::new(DevServerConfig {
            snippets_dir: dir.to_path_buf(),
            open: false,
            ..Default::default()
        })
    }

    #[test]
    fn creates_server_with_default_config() {
        let server = DevServer::new(DevServerConfig::default());
        assert_eq!(server.config.port, 7777);
        assert_eq!(server.config.debounce_ms, 300);
    }

    #[test]
    fn builds_router() {
        let temp = tempdir().unwrap();
        let _router = router(state_for(temp.path()), temp.path());
    }

    #[tokio::test]
    async fn detect_returns_classification() {
        let Json(classification) = detect_handler(Json(DetectRequest {
            code: "$primary: #333;\n.btn { color: $primary; }".to_string(),
        }))
        .await;

        assert_eq!(classification, Classification::stylesheet(Dialect::Scss));
    }

    #[tokio::test]
    async fn compile_returns_preview() {
        let Json(response) = compile_handler(Json(CompileRequest {
            code: "export default function Foo() {\n  return (<div>Hello</div>);\n}".to_string(),
            classification: None,
            compilation_type: None,
        }))
        .await;

        assert_eq!(response.classification, Classification::REACT);
        assert_eq!(response.component_name.as_deref(), Some("Foo"));
        assert_eq!(response.editor_language, "javascript");
        assert_eq!(response.dependencies.len(), 3);
        assert!(response.html.contains("<!DOCTYPE html>"));
    }

    #[tokio::test]
    async fn compile_honors_forced_type() {
        let Json(response) = compile_handler(Json(CompileRequest {
            code: "<div>Hi</div>".to_string(),
            classification: Some(Classification::REACT),
            compilation_type: Some(CompilationType::JavaScript),
        }))
        .await;

        assert_eq!(response.classification.compilation_type, CompilationType::JavaScript);
        assert!(response.html.contains("<title>JavaScript Preview</title>"));
    }

    #[test]
    fn compile_request_accepts_camel_case() {
        let request: CompileRequest =
            serde_json::from_str(r#"{"code":"x","compilationType":"scss"}"#).unwrap();

        assert_eq!(request.compilation_type, Some(CompilationType::Scss));
        assert!(request.classification.is_none());
    }

    #[tokio::test]
    async fn dependencies_for_known_type() {
        let Json(deps) = dependencies_handler(UrlPath("vue-compiler".to_string()))
            .await
            .unwrap();

        assert_eq!(deps, vec!["https://unpkg.com/vue@3/dist/vue.global.js"]);
    }

    #[tokio::test]
    async fn dependencies_rejects_unknown_type() {
        let result = dependencies_handler(UrlPath("cobol".to_string())).await;

        let (status, Json(body)) = result.unwrap_err();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body.error.contains("cobol"));
    }

    #[tokio::test]
    async fn lists_snippets() {
        let temp = tempdir().unwrap();
        fs::create_dir_all(temp.path().join("react")).unwrap();
        fs::write(temp.path().join("react/Card.jsx"), "---\ntitle: Card\n---\nconst a = 1;").unwrap();
        fs::write(temp.path().join("broken.js"), "---\ntitle: [x\n---\n").unwrap();

        let Json(list) = snippets_handler(State(state_for(temp.path()))).await;

        assert_eq!(list.len(), 1);
        assert_eq!(list[0].path, "react/Card.jsx");
        assert_eq!(list[0].title, "Card");
        assert_eq!(list[0].url, "/snippets/react/Card.jsx");
    }

    #[tokio::test]
    async fn serves_snippet_page() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join("hello.html"), "<p>Hello</p>").unwrap();

        let Html(page) = snippet_handler(State(state_for(temp.path())), UrlPath("hello.html".to_string()))
            .await
            .unwrap();

        assert!(page.contains("<title>hello - Snipview</title>"));
        assert!(page.contains("&lt;p&gt;Hello&lt;/p&gt;"));
        assert!(page.contains(r#"window.__SNIPVIEW_PATH = "hello.html";"#));
    }

    #[tokio::test]
    async fn snippet_page_rejects_escapes_and_missing_files() {
        let temp = tempdir().unwrap();
        let state = state_for(temp.path());

        let (status, _) = snippet_handler(State(Arc::clone(&state)), UrlPath("../secret.js".to_string()))
            .await
            .unwrap_err();
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = snippet_handler(State(state), UrlPath("missing.js".to_string()))
            .await
            .unwrap_err();
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn watch_events_broadcast_previews() {
        let temp = tempdir().unwrap();
        let file = temp.path().join("card.css");
        fs::write(&file, ".card { color: red; }").unwrap();
        let state = state_for(temp.path());
        let mut rx = state.read().await.live.subscribe();

        handle_watch_event(&state, temp.path(), WatchEvent::Changed(file.clone())).await;
        handle_watch_event(&state, temp.path(), WatchEvent::Removed(file)).await;

        match rx.try_recv().unwrap() {
            LiveMessage::Preview {
                path,
                classification,
                html,
            } => {
                assert_eq!(path, "card.css");
                assert_eq!(classification, Classification::stylesheet(Dialect::Css));
                assert!(html.contains(".card { color: red; }"));
            }
            other => panic!("Expected preview, got {:?}", other),
        }
        assert_eq!(
            rx.try_recv().unwrap(),
            LiveMessage::Removed {
                path: "card.css".to_string()
            }
        );
    }

    #[test]
    fn relative_keys_use_forward_slashes() {
        assert_eq!(
            relative_key(Path::new("/s"), Path::new("/s/react/Card.jsx")),
            "react/Card.jsx"
        );
    }
}
