//! `ApiClient` -- typed wrapper over the Sebrae assistant HTTP API.
//!
//! Every call goes through one request helper that injects the bearer
//! token when present and maps non-2xx statuses onto [`ApiError`]:
//! 401 is terminal for the session, 403 is a privilege denial, anything
//! else surfaces the HTTP status text. No retry, no backoff.
//!
//! The token is wrapped in [`secrecy::SecretString`] and never logged
//! or included in `Debug` output.

use std::time::Duration;

use reqwest::multipart::{Form, Part};
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use secrecy::{ExposeSecret, SecretString};

use sebrae_types::chat::{ChatRequest, ChatResponse};
use sebrae_types::document::DocumentList;
use sebrae_types::knowledge::{
    BaseStats, Metrics, ProcessReport, SystemStatus, UploadReport, WipeReport,
};
use sebrae_types::user::{LoginRequest, LoginResponse, UserProfile};

use crate::error::ApiError;

/// A file staged for multipart upload.
#[derive(Debug, Clone)]
pub struct UploadFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

/// Typed client for the assistant backend.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<SecretString>,
}

impl ApiClient {
    /// Create a client against the given base URL, unauthenticated.
    pub fn new(base_url: impl Into<String>) -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(300))
            .build()
            .expect("failed to create reqwest client");

        Self {
            http,
            base_url: base_url.into(),
            token: None,
        }
    }

    /// Attach a bearer token; all subsequent requests carry it.
    pub fn with_token(mut self, token: SecretString) -> Self {
        self.token = Some(token);
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{path}", self.base_url);
        let mut builder = self.http.request(method, url);
        if let Some(token) = &self.token {
            builder = builder.bearer_auth(token.expose_secret());
        }
        builder
    }

    /// Map non-2xx statuses onto the error taxonomy.
    fn check(resp: Response) -> Result<Response, ApiError> {
        match resp.status() {
            s if s.is_success() => Ok(resp),
            StatusCode::UNAUTHORIZED => Err(ApiError::Unauthorized),
            StatusCode::FORBIDDEN => Err(ApiError::Forbidden),
            s => Err(ApiError::Api {
                status: s.as_u16(),
                message: s.canonical_reason().unwrap_or("unknown").to_string(),
            }),
        }
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let resp = self.request(Method::GET, path).send().await?;
        Ok(Self::check(resp)?.json().await?)
    }

    /// `GET /api/auth/me` -- current user profile.
    pub async fn me(&self) -> Result<UserProfile, ApiError> {
        self.get_json("/api/auth/me").await
    }

    /// `POST /api/auth/login` -- exchange email/password for a token.
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, ApiError> {
        let body = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let resp = self
            .request(Method::POST, "/api/auth/login")
            .json(&body)
            .send()
            .await?;
        Ok(Self::check(resp)?.json().await?)
    }

    /// `GET /api/status` -- system status and model info.
    pub async fn system_status(&self) -> Result<SystemStatus, ApiError> {
        self.get_json("/api/status").await
    }

    /// `GET /api/metricas` -- dashboard metrics.
    pub async fn metrics(&self) -> Result<Metrics, ApiError> {
        self.get_json("/api/metricas").await
    }

    /// `GET /api/documentos` -- knowledge-base document listing.
    pub async fn documents(&self) -> Result<DocumentList, ApiError> {
        self.get_json("/api/documentos").await
    }

    /// `POST /api/chat` -- send the newest user message, receive the answer
    /// envelope. No multi-turn context is transmitted.
    pub async fn chat(&self, mensagem: &str) -> Result<ChatResponse, ApiError> {
        let body = ChatRequest {
            mensagem: mensagem.to_string(),
        };
        let resp = self
            .request(Method::POST, "/api/chat")
            .json(&body)
            .send()
            .await?;
        Ok(Self::check(resp)?.json().await?)
    }

    /// `GET /api/base/estatisticas` -- knowledge-base statistics.
    pub async fn base_stats(&self) -> Result<BaseStats, ApiError> {
        self.get_json("/api/base/estatisticas").await
    }

    /// `POST /api/base/processar-diretorio` -- incremental directory
    /// processing. 403 when the user is not an administrator.
    pub async fn process_directory(&self) -> Result<ProcessReport, ApiError> {
        let resp = self
            .request(Method::POST, "/api/base/processar-diretorio")
            .send()
            .await?;
        Ok(Self::check(resp)?.json().await?)
    }

    /// `DELETE /api/base/limpar` -- wipe the knowledge base. 403 when the
    /// user is not an administrator.
    pub async fn wipe_base(&self) -> Result<WipeReport, ApiError> {
        let resp = self
            .request(Method::DELETE, "/api/base/limpar")
            .send()
            .await?;
        Ok(Self::check(resp)?.json().await?)
    }

    /// `POST /api/upload` -- multipart upload, one `files` part per file.
    pub async fn upload(&self, files: Vec<UploadFile>) -> Result<UploadReport, ApiError> {
        let mut form = Form::new();
        for file in files {
            let part = Part::bytes(file.bytes).file_name(file.name);
            form = form.part("files", part);
        }
        let resp = self
            .request(Method::POST, "/api/upload")
            .multipart(form)
            .send()
            .await?;
        Ok(Self::check(resp)?.json().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> ApiClient {
        ApiClient::new(server.uri()).with_token(SecretString::from("tok-123"))
    }

    #[tokio::test]
    async fn me_sends_bearer_token() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/auth/me"))
            .and(header("authorization", "Bearer tok-123"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": 1, "email": "ana@example.com", "nome": "Ana", "is_admin": false
            })))
            .expect(1)
            .mount(&server)
            .await;

        let profile = client_for(&server).me().await.unwrap();
        assert_eq!(profile.nome, "Ana");
    }

    #[tokio::test]
    async fn unauthenticated_client_sends_no_auth_header() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/status"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "status": "online"
            })))
            .mount(&server)
            .await;

        let client = ApiClient::new(server.uri());
        let status = client.system_status().await.unwrap();
        assert!(status.is_online());

        let received = server.received_requests().await.unwrap();
        assert!(!received[0].headers.contains_key("authorization"));
    }

    #[tokio::test]
    async fn status_401_maps_to_unauthorized() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/auth/me"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let err = client_for(&server).me().await.unwrap_err();
        assert!(err.is_unauthorized());
    }

    #[tokio::test]
    async fn status_403_maps_to_forbidden() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/api/base/limpar"))
            .respond_with(ResponseTemplate::new(403))
            .mount(&server)
            .await;

        let err = client_for(&server).wipe_base().await.unwrap_err();
        assert!(matches!(err, ApiError::Forbidden));
    }

    #[tokio::test]
    async fn other_failures_carry_status_text() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/metricas"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let err = client_for(&server).metrics().await.unwrap_err();
        match err {
            ApiError::Api { status, message } => {
                assert_eq!(status, 503);
                assert_eq!(message, "Service Unavailable");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn chat_posts_single_message_and_decodes_envelope() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/chat"))
            .and(body_json(serde_json::json!({"mensagem": "1 como abrir MEI?"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "resposta": "Para abrir um MEI...",
                "consultores": [{"nome": "João", "area_principal": "Formalização"}],
                "documentos": ["Guia_MEI.pdf"],
                "fonte": "base_local",
                "usado_internet": false
            })))
            .mount(&server)
            .await;

        let resp = client_for(&server).chat("1 como abrir MEI?").await.unwrap();
        assert_eq!(resp.consultores.len(), 1);
        assert_eq!(resp.documentos, vec!["Guia_MEI.pdf"]);
        assert!(!resp.usado_internet);
    }

    #[tokio::test]
    async fn upload_decodes_incremental_report() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/upload"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "total_novos": 2, "total_pulados": 1
            })))
            .mount(&server)
            .await;

        let files = vec![UploadFile {
            name: "ficha.pdf".to_string(),
            bytes: b"%PDF-1.4".to_vec(),
        }];
        let report = client_for(&server).upload(files).await.unwrap();
        assert!(matches!(
            report,
            UploadReport::Incremental { total_novos: 2, total_pulados: 1 }
        ));
    }
}
