use axum::extract::State;
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use solace_core::Error;
use tracing::info;

use crate::state::{
    AppState, ChatRequest, ChatResponse, HistoryResponse, LoginRequest, LoginResponse,
    StatusResponse,
};

/// Error payload returned by all endpoints
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl From<Error> for ApiError {
    fn from(e: Error) -> Self {
        let status = match &e {
            Error::InvalidIdentity(_) | Error::InvalidMessage(_) => StatusCode::BAD_REQUEST,
            Error::NoActiveSession => StatusCode::UNAUTHORIZED,
            Error::GenerationUnavailable(_) => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self {
            status,
            message: e.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(serde_json::json!({ "error": self.message })),
        )
            .into_response()
    }
}

/// Extract the session handle from the Authorization header
fn bearer_token(headers: &HeaderMap) -> Result<&str, ApiError> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| ApiError::from(Error::NoActiveSession))
}

pub async fn login_handler(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let token = state.sessions.login(&payload.username)?;
    let username = state.sessions.resolve(&token)?;
    info!("User {} logged in", username);

    Ok(Json(LoginResponse {
        token,
        message: format!("Welcome {}!", username),
    }))
}

pub async fn logout_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Json<StatusResponse> {
    // Invalidating an invalid or missing handle is not an error
    if let Ok(token) = bearer_token(&headers) {
        state.sessions.logout(token);
    }
    Json(StatusResponse {
        message: "Logged out.".to_string(),
    })
}

pub async fn chat_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, ApiError> {
    let token = bearer_token(&headers)?;
    let response = state.chat.submit_turn(token, &payload.message).await?;
    Ok(Json(ChatResponse { response }))
}

pub async fn history_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<HistoryResponse>, ApiError> {
    let token = bearer_token(&headers)?;
    let (username, history) = state.chat.history(token).await?;
    Ok(Json(HistoryResponse { username, history }))
}
