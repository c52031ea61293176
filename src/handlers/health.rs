use axum::{
    extract::State,
    response::Json,
};
use serde_json::{json, Value};
use crate::models::App;

/// Health check endpoint
pub async fn health_check(State(app): State<App>) -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "backend": app.backend_url.as_deref().unwrap_or("derived from Host header"),
        "auth_required": app.api_key.is_some()
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::test_support::ScriptedBackend;
    use std::sync::Arc;

    #[tokio::test]
    async fn reports_configuration_without_secrets() {
        let app = App::new(Arc::new(ScriptedBackend::default()))
            .with_api_key(Some("secret".into()))
            .with_backend_url(Some("http://backend:9000/chat".into()));
        let Json(body) = health_check(State(app)).await;
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["backend"], "http://backend:9000/chat");
        assert_eq!(body["auth_required"], true);
        assert!(!body.to_string().contains("secret"));
    }
}
