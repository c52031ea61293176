use axum::{
    extract::{rejection::JsonRejection, State},
    http::{
        header::{CACHE_CONTROL, CONNECTION, HOST},
        HeaderMap, HeaderName, HeaderValue, StatusCode,
    },
    response::{
        sse::{Event, Sse},
        IntoResponse, Response,
    },
    Json,
};
use futures::StreamExt;
use std::convert::Infallible;
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;

use crate::constants::{DEFAULT_BACKEND_PATH, FALLBACK_HOST};
use crate::models::{App, ChatCompletionRequest};
use crate::services::{authorize, spawn_drive, translate_request, Frame};
use crate::utils::origin_from_host;

/// Bare liveness probe answered on the completion route itself
pub async fn liveness() -> &'static str {
    "ok"
}

/// Backend endpoint: the configured URL, or one derived from the request Host
fn resolve_endpoint(app: &App, headers: &HeaderMap) -> String {
    if let Some(url) = &app.backend_url {
        return url.clone();
    }
    let host = headers
        .get(HOST)
        .and_then(|h| h.to_str().ok())
        .filter(|h| !h.trim().is_empty())
        .unwrap_or(FALLBACK_HOST);
    format!("{}{}", origin_from_host(host), DEFAULT_BACKEND_PATH)
}

pub async fn chat_completions(
    State(app): State<App>,
    headers: HeaderMap,
    payload: Result<Json<ChatCompletionRequest>, JsonRejection>,
) -> Result<Response, (StatusCode, &'static str)> {
    // Auth runs before the body is interpreted
    authorize(&headers, app.api_key.as_deref()).map_err(|e| (StatusCode::UNAUTHORIZED, e.code()))?;

    let Json(request) = payload.map_err(|e| {
        log::warn!("❌ Invalid request body: {}", e.body_text());
        (e.status(), "invalid_request_body")
    })?;

    log::info!(
        "📨 Request: model={}, action={:?}, messages={}, stream={}",
        request.model,
        request.action,
        request.messages.len(),
        request.stream.unwrap_or(false)
    );

    let call = translate_request(&request).map_err(|e| (StatusCode::BAD_REQUEST, e.code()))?;
    let endpoint = resolve_endpoint(&app, &headers);
    let stream = call.stream;

    // The driver owns the call from here on; its report is only logged
    let (rx, handle) = spawn_drive(app.backend.clone(), endpoint, call);
    tokio::spawn(async move {
        match handle.await {
            Ok(report) => log::info!(
                "✅ Request finished: outcome={:?}, frames={}, answer={} chars",
                report.outcome,
                report.frames_written,
                report.final_text.chars().count()
            ),
            Err(e) => log::error!("❌ Stream driver task failed: {}", e),
        }
    });

    if stream {
        Ok(sse_response(rx))
    } else {
        aggregate_response(rx).await
    }
}

fn sse_response(rx: mpsc::Receiver<Frame>) -> Response {
    let mut headers = HeaderMap::new();
    headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-cache"));
    headers.insert(CONNECTION, HeaderValue::from_static("keep-alive"));
    headers.insert(HeaderName::from_static("x-accel-buffering"), HeaderValue::from_static("no"));

    let stream = ReceiverStream::new(rx).map(|frame| Ok::<Event, Infallible>(frame.to_sse_event()));
    (headers, Sse::new(stream)).into_response()
}

async fn aggregate_response(mut rx: mpsc::Receiver<Frame>) -> Result<Response, (StatusCode, &'static str)> {
    while let Some(frame) = rx.recv().await {
        if !frame.is_terminal() {
            continue;
        }
        if let Frame::Aggregate(body) = frame {
            log::debug!("📤 Aggregate reply: {} chars", body.content().chars().count());
            return Ok(Json(body).into_response());
        }
        break;
    }
    log::error!("❌ Driver finished without an aggregate reply");
    Err((StatusCode::BAD_GATEWAY, "no_reply"))
}
