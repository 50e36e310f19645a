// civic-client/src/client/http_oneshot.rs
// Oneshot HTTP client - in-process calls into an axum Router

use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use http::{Method, Request};
use serde::de::DeserializeOwned;
use tokio::sync::RwLock;
use tower::ServiceExt;

use crate::error::{ClientError, ClientResult};

use super::http::HttpClient;

/// Oneshot HTTP client (in-memory calls)
///
/// Drives a `Router` through Tower's `oneshot`, so an in-process backend
/// (an embedded server, or a stand-in router in tests) is reached with the
/// exact same request shapes and error mapping as the network transport.
///
/// # Example
///
/// ```ignore
/// use axum::Router;
/// use civic_client::OneshotHttpClient;
///
/// let router: Router = build_backend();
/// let client = OneshotHttpClient::new(router);
/// let summary: CitizenSummary = client.get("/my/summary").await?;
/// ```
#[derive(Debug, Clone)]
pub struct OneshotHttpClient {
    router: Router,
    token: Arc<RwLock<Option<String>>>,
}

impl OneshotHttpClient {
    pub fn new(router: Router) -> Self {
        Self {
            router,
            token: Arc::new(RwLock::new(None)),
        }
    }

    fn uri(path: &str) -> String {
        format!("/{}", path.trim_start_matches('/'))
    }

    async fn build_request(
        &self,
        method: Method,
        path: &str,
        body: Body,
    ) -> ClientResult<Request<Body>> {
        let mut builder = Request::builder().method(method).uri(Self::uri(path));

        if let Some(token) = self.token.read().await.as_ref() {
            builder = builder.header(http::header::AUTHORIZATION, format!("Bearer {}", token));
        }

        builder
            .header(http::header::CONTENT_TYPE, "application/json")
            .body(body)
            .map_err(|e| ClientError::Internal(format!("Failed to build request: {}", e)))
    }

    async fn build_request_with_body<B: serde::Serialize>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> ClientResult<Request<Body>> {
        let body_bytes = serde_json::to_vec(body)?;
        self.build_request(method, path, Body::from(body_bytes)).await
    }

    async fn execute<T: DeserializeOwned>(&self, request: Request<Body>) -> ClientResult<T> {
        let method = request.method().clone();
        let path = request.uri().path().to_string();
        tracing::debug!(%method, %path, "in-process request");

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .map_err(|e| ClientError::Internal(format!("Oneshot call failed: {}", e)))?;

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .map_err(|e| ClientError::Internal(format!("Failed to read body: {}", e)))?;

        if !status.is_success() {
            let text = String::from_utf8_lossy(&body_bytes);
            let err = ClientError::from_status(status.as_u16(), &text);
            tracing::warn!(
                %method,
                %path,
                status = status.as_u16(),
                error = %err,
                "request failed"
            );
            return Err(err);
        }

        serde_json::from_slice(&body_bytes)
            .map_err(|e| ClientError::InvalidResponse(format!("JSON parse error: {}", e)))
    }
}

#[async_trait]
impl HttpClient for OneshotHttpClient {
    async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let request = self.build_request(Method::GET, path, Body::empty()).await?;
        self.execute(request).await
    }

    async fn post<T: DeserializeOwned, B: serde::Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let request = self.build_request_with_body(Method::POST, path, body).await?;
        self.execute(request).await
    }

    async fn put<T: DeserializeOwned, B: serde::Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let request = self.build_request_with_body(Method::PUT, path, body).await?;
        self.execute(request).await
    }

    async fn delete<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let request = self.build_request(Method::DELETE, path, Body::empty()).await?;
        self.execute(request).await
    }

    async fn set_token(&self, token: Option<String>) {
        *self.token.write().await = token;
    }

    async fn token(&self) -> Option<String> {
        self.token.read().await.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::Json;
    use axum::http::{HeaderMap, StatusCode};
    use axum::routing::get;

    #[tokio::test]
    async fn test_bearer_token_reaches_router() {
        let router = Router::new().route(
            "/echo-auth",
            get(|headers: HeaderMap| async move {
                let auth = headers
                    .get("authorization")
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or_default()
                    .to_string();
                Json(serde_json::json!({ "auth": auth }))
            }),
        );
        let client = OneshotHttpClient::new(router);
        client.set_token(Some("tok".into())).await;

        let body: serde_json::Value = client.get("echo-auth").await.unwrap();
        assert_eq!(body["auth"], "Bearer tok");
    }

    #[tokio::test]
    async fn test_error_status_maps_to_client_error() {
        let router = Router::new().route(
            "/gone",
            get(|| async {
                (
                    StatusCode::NOT_FOUND,
                    Json(serde_json::json!({ "message": "Complaint not found" })),
                )
            }),
        );
        let client = OneshotHttpClient::new(router);

        let err = client.get::<serde_json::Value>("/gone").await.unwrap_err();
        assert!(matches!(err, ClientError::NotFound(ref m) if m == "Complaint not found"));
    }
}
