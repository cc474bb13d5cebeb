//! HTTP endpoints

use std::sync::Arc;

use agro_advisor_agent::{SessionControls, SessionState, SubmitOutcome};
use agro_advisor_core::{ChatMessage, Language, RecognitionEvent, VoiceInfo};
use agro_advisor_knowledge::QuickQuestionView;
use axum::{
    extract::{Json, Path, Query, State},
    http::{HeaderValue, Method, StatusCode},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::metrics::{metrics_handler, track_session};
use crate::platform::Directive;
use crate::session::{Capabilities, ClientSession};
use crate::state::AppState;
use crate::ServerError;

const DEFAULT_ORIGIN: &str = "http://localhost:3000";

pub fn create_router(state: AppState) -> Router {
    let cors_layer = build_cors_layer(
        &state.config.server.cors_origins,
        state.config.server.cors_enabled,
    );

    Router::new()
        .route("/api/sessions", post(create_session))
        .route("/api/sessions/:id", get(get_session).delete(delete_session))
        .route("/api/sessions/:id/messages", post(post_message))
        .route("/api/sessions/:id/quick/:index", post(post_quick_question))
        .route("/api/sessions/:id/voices", post(update_voices))
        .route("/api/sessions/:id/recognition/start", post(start_recognition))
        .route("/api/sessions/:id/recognition/event", post(recognition_event))
        .route("/api/sessions/:id/speech/stop", post(stop_speech))
        .route("/api/quick-questions", get(list_quick_questions))
        .route("/health", get(health_check))
        .route("/metrics", get(metrics_handler))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer)
        .with_state(state)
}

/// Origins from configuration; permissive when CORS is disabled
fn build_cors_layer(origins: &[String], enabled: bool) -> CorsLayer {
    if !enabled {
        tracing::warn!("CORS is disabled, allowing all origins");
        return CorsLayer::permissive();
    }

    let mut parsed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| {
            origin.parse::<HeaderValue>().ok().or_else(|| {
                tracing::warn!(origin = %origin, "Invalid CORS origin");
                None
            })
        })
        .collect();

    if parsed.is_empty() {
        tracing::info!(origin = DEFAULT_ORIGIN, "No usable CORS origins configured");
        parsed.push(HeaderValue::from_static(DEFAULT_ORIGIN));
    }

    CorsLayer::new()
        .allow_origin(parsed)
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers(Any)
}

fn find_session(state: &AppState, id: &str) -> Result<Arc<ClientSession>, ServerError> {
    state
        .sessions
        .get(id)
        .ok_or_else(|| ServerError::SessionNotFound(id.to_string()))
}

fn parse_language(code: Option<&str>) -> Result<Option<Language>, ServerError> {
    code.map(|code| {
        Language::from_code(code)
            .ok_or_else(|| ServerError::InvalidRequest(format!("unsupported language '{}'", code)))
    })
    .transpose()
}

#[derive(Debug, Default, Deserialize)]
struct CreateSessionRequest {
    #[serde(default)]
    language: Option<String>,
    #[serde(default)]
    capabilities: Capabilities,
}

#[derive(Debug, Serialize)]
struct CreateSessionResponse {
    session_id: String,
    language: Language,
    greeting: Vec<ChatMessage>,
    controls: SessionControls,
    quick_questions: Vec<QuickQuestionView>,
}

/// `POST /api/sessions`
async fn create_session(
    State(state): State<AppState>,
    request: Option<Json<CreateSessionRequest>>,
) -> Result<(StatusCode, Json<CreateSessionResponse>), ServerError> {
    let request = request.map(|Json(request)| request).unwrap_or_default();
    let language = parse_language(request.language.as_deref())?;

    let session = state.sessions.create(language, request.capabilities)?;
    tokio::spawn(track_session(session.dialogue.subscribe()));
    let greeting = session.dialogue.open();

    Ok((
        StatusCode::CREATED,
        Json(CreateSessionResponse {
            session_id: session.id.clone(),
            language: session.dialogue.language(),
            greeting,
            controls: session.dialogue.controls(),
            quick_questions: session.dialogue.quick_questions(),
        }),
    ))
}

#[derive(Debug, Serialize)]
struct SessionView {
    session_id: String,
    language: Language,
    state: SessionState,
    messages: Vec<ChatMessage>,
    controls: SessionControls,
}

/// `GET /api/sessions/:id`
async fn get_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SessionView>, ServerError> {
    let session = find_session(&state, &id)?;

    Ok(Json(SessionView {
        session_id: session.id.clone(),
        language: session.dialogue.language(),
        state: session.dialogue.state(),
        messages: session.transcript.messages(),
        controls: session.dialogue.controls(),
    }))
}

/// `DELETE /api/sessions/:id`
async fn delete_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ServerError> {
    if state.sessions.remove(&id) {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ServerError::SessionNotFound(id))
    }
}

/// Reply to anything that may have produced speech directives
///
/// `directives` only ever holds what this request produced.
#[derive(Debug, Serialize)]
struct TurnResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    outcome: Option<SubmitOutcome>,
    directives: Vec<Directive>,
    controls: SessionControls,
}

impl TurnResponse {
    fn turn(session: &ClientSession, outcome: SubmitOutcome) -> Self {
        Self {
            directives: Directive::for_outcome(&outcome),
            outcome: Some(outcome),
            controls: session.dialogue.controls(),
        }
    }

    fn directives(session: &ClientSession, directives: Vec<Directive>) -> Self {
        Self {
            outcome: None,
            directives,
            controls: session.dialogue.controls(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct MessageRequest {
    text: String,
}

/// `POST /api/sessions/:id/messages`
async fn post_message(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<MessageRequest>,
) -> Result<Json<TurnResponse>, ServerError> {
    let session = find_session(&state, &id)?;

    let outcome = session.dialogue.submit(&request.text).await;
    Ok(Json(TurnResponse::turn(&session, outcome)))
}

/// `POST /api/sessions/:id/quick/:index`
async fn post_quick_question(
    State(state): State<AppState>,
    Path((id, index)): Path<(String, usize)>,
) -> Result<Json<TurnResponse>, ServerError> {
    let session = find_session(&state, &id)?;

    let outcome = session.dialogue.submit_quick(index).await?;
    Ok(Json(TurnResponse::turn(&session, outcome)))
}

/// `POST /api/sessions/:id/voices`
async fn update_voices(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(voices): Json<Vec<VoiceInfo>>,
) -> Result<StatusCode, ServerError> {
    let session = find_session(&state, &id)?;
    session.update_voices(voices)?;
    Ok(StatusCode::NO_CONTENT)
}

/// `POST /api/sessions/:id/recognition/start`
async fn start_recognition(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<TurnResponse>, ServerError> {
    let session = find_session(&state, &id)?;
    let directives = session.start_listening()?;
    Ok(Json(TurnResponse::directives(&session, directives)))
}

/// Either a final transcript or a platform error code; neither means "ended"
#[derive(Debug, Default, Deserialize)]
struct RecognitionEventRequest {
    #[serde(default)]
    transcript: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

impl From<RecognitionEventRequest> for RecognitionEvent {
    fn from(request: RecognitionEventRequest) -> Self {
        match (request.transcript, request.error) {
            (_, Some(code)) => RecognitionEvent::Error { code },
            (Some(transcript), None) => RecognitionEvent::Result { transcript },
            (None, None) => RecognitionEvent::End,
        }
    }
}

/// `POST /api/sessions/:id/recognition/event`
async fn recognition_event(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<RecognitionEventRequest>,
) -> Result<Json<TurnResponse>, ServerError> {
    let session = find_session(&state, &id)?;

    let response = match session
        .dialogue
        .handle_recognition_event(request.into())
        .await
    {
        Some(outcome) => TurnResponse::turn(&session, outcome),
        None => TurnResponse::directives(&session, Vec::new()),
    };
    Ok(Json(response))
}

/// `POST /api/sessions/:id/speech/stop`
async fn stop_speech(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<TurnResponse>, ServerError> {
    let session = find_session(&state, &id)?;
    let directives = session.stop_speaking();
    Ok(Json(TurnResponse::directives(&session, directives)))
}

#[derive(Debug, Deserialize)]
struct QuickQuestionsQuery {
    language: Option<String>,
}

/// `GET /api/quick-questions?language=hi`
async fn list_quick_questions(
    State(state): State<AppState>,
    Query(query): Query<QuickQuestionsQuery>,
) -> Result<Json<Vec<QuickQuestionView>>, ServerError> {
    let language = parse_language(query.language.as_deref())?.unwrap_or_default();
    Ok(Json(
        state.sessions.knowledge_base().quick_question_views(language),
    ))
}

/// `GET /health`
async fn health_check(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
        "sessions": state.sessions.count(),
        "responder": state.sessions.responder_name(),
        "crops": state.sessions.knowledge_base().crops().len(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use agro_advisor_config::Settings;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use tower::ServiceExt;

    fn router() -> Router {
        create_router(AppState::new(Settings::default()).unwrap())
    }

    async fn call(
        router: &Router,
        method: Method,
        uri: &str,
        body: Option<serde_json::Value>,
    ) -> (StatusCode, serde_json::Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                builder = builder.header("content-type", "application/json");
                Body::from(json.to_string())
            },
            None => Body::empty(),
        };
        let response = router
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = if bytes.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }

    async fn create(router: &Router, body: serde_json::Value) -> String {
        let (status, json) = call(router, Method::POST, "/api/sessions", Some(body)).await;
        assert_eq!(status, StatusCode::CREATED);
        json["session_id"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn test_session_greets_on_create() {
        let router = router();
        let (status, json) = call(
            &router,
            Method::POST,
            "/api/sessions",
            Some(serde_json::json!({ "language": "hi" })),
        )
        .await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(json["language"], "hi");
        assert_eq!(json["greeting"].as_array().unwrap().len(), 2);
        assert_eq!(json["quick_questions"].as_array().unwrap().len(), 6);
        assert_eq!(json["controls"]["voice_input"]["enabled"], true);
    }

    #[tokio::test]
    async fn test_message_turn_returns_speech_directives() {
        let router = router();
        let id = create(&router, serde_json::json!({})).await;

        let (status, json) = call(
            &router,
            Method::POST,
            &format!("/api/sessions/{}/messages", id),
            Some(serde_json::json!({ "text": "Is rice ok at pH 7.8?" })),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["outcome"]["status"], "answered");
        assert_eq!(json["outcome"]["intent"], "crop_ph_query");
        assert_eq!(json["outcome"]["crop"], "rice");
        let directives = json["directives"].as_array().unwrap();
        assert_eq!(directives[0]["action"], "cancel_speech");
        assert_eq!(directives[1]["action"], "speak");
        assert_eq!(directives[1]["utterance"]["target"]["kind"], "language");
        assert_eq!(directives[1]["utterance"]["target"]["tag"], "en-IN");
    }

    #[tokio::test]
    async fn test_later_requests_do_not_replay_turn_speech() {
        let router = router();
        let id = create(&router, serde_json::json!({})).await;

        let (_, json) = call(
            &router,
            Method::POST,
            &format!("/api/sessions/{}/messages", id),
            Some(serde_json::json!({ "text": "pH 5.0" })),
        )
        .await;
        assert_eq!(json["directives"].as_array().unwrap().len(), 2);

        let (_, json) = call(
            &router,
            Method::POST,
            &format!("/api/sessions/{}/speech/stop", id),
            None,
        )
        .await;
        let directives = json["directives"].as_array().unwrap();
        assert_eq!(directives.len(), 1);
        assert_eq!(directives[0]["action"], "cancel_speech");

        let (_, json) = call(
            &router,
            Method::POST,
            &format!("/api/sessions/{}/recognition/start", id),
            None,
        )
        .await;
        let directives = json["directives"].as_array().unwrap();
        assert_eq!(directives.len(), 1);
        assert_eq!(directives[0]["action"], "start_recognition");
    }

    #[tokio::test]
    async fn test_blank_message_is_ignored() {
        let router = router();
        let id = create(&router, serde_json::json!({})).await;

        let (_, json) = call(
            &router,
            Method::POST,
            &format!("/api/sessions/{}/messages", id),
            Some(serde_json::json!({ "text": "  " })),
        )
        .await;
        assert_eq!(json["outcome"]["status"], "ignored");
        assert!(json["directives"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_voices_then_recognition_round_trip() {
        let router = router();
        let id = create(&router, serde_json::json!({})).await;

        let (status, _) = call(
            &router,
            Method::POST,
            &format!("/api/sessions/{}/voices", id),
            Some(serde_json::json!([{ "name": "Heera", "lang": "en-IN" }])),
        )
        .await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (_, json) = call(
            &router,
            Method::POST,
            &format!("/api/sessions/{}/recognition/start", id),
            None,
        )
        .await;
        assert_eq!(json["directives"][0]["action"], "start_recognition");
        assert_eq!(json["controls"]["voice_input"]["enabled"], true);

        let (_, json) = call(
            &router,
            Method::POST,
            &format!("/api/sessions/{}/recognition/event", id),
            Some(serde_json::json!({ "transcript": "pH 6.5" })),
        )
        .await;
        assert_eq!(json["outcome"]["intent"], "generic_ph");
        assert_eq!(json["directives"][1]["utterance"]["target"]["voice"]["name"], "Heera");
    }

    #[tokio::test]
    async fn test_recognition_unavailable_is_rejected() {
        let router = router();
        let id = create(
            &router,
            serde_json::json!({ "capabilities": { "synthesis": true, "recognition": false } }),
        )
        .await;

        let (status, json) = call(
            &router,
            Method::POST,
            &format!("/api/sessions/{}/recognition/start", id),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(json["error"].as_str().unwrap().contains("unavailable"));
    }

    #[tokio::test]
    async fn test_quick_question_and_transcript() {
        let router = router();
        let id = create(&router, serde_json::json!({})).await;

        let (status, json) = call(
            &router,
            Method::POST,
            &format!("/api/sessions/{}/quick/0", id),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["outcome"]["status"], "answered");

        let (status, _) = call(
            &router,
            Method::POST,
            &format!("/api/sessions/{}/quick/42", id),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (_, json) = call(&router, Method::GET, &format!("/api/sessions/{}", id), None).await;
        assert_eq!(json["state"], "idle");
        // two greeting lines plus one question and its answer
        assert_eq!(json["messages"].as_array().unwrap().len(), 4);
    }

    #[tokio::test]
    async fn test_delete_and_unknown_session() {
        let router = router();
        let id = create(&router, serde_json::json!({})).await;

        let uri = format!("/api/sessions/{}", id);
        let (status, _) = call(&router, Method::DELETE, &uri, None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, _) = call(&router, Method::GET, &uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_quick_questions_by_language() {
        let router = router();

        let (status, json) = call(&router, Method::GET, "/api/quick-questions?language=hi", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json.as_array().unwrap().len(), 6);

        let (status, _) = call(&router, Method::GET, "/api/quick-questions?language=fr", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_metrics_disabled_without_recorder() {
        let router = router();
        let (status, _) = call(&router, Method::GET, "/metrics", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, json) = call(&router, Method::GET, "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["crops"], 15);
        assert_eq!(json["responder"], "rules");
    }
}
