use gloo::net::http::{Request, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use shared::reports::encode_segment;
use shared::{
    CreateStudentRequest, LoginRequest, LoginResponse, ReportKind, Session, SessionPayload,
    Student, UpdateStudentRequest,
};
use thiserror::Error;

use crate::services::config::AppConfig;
use crate::services::storage::{AuthToken, CredentialStore};

/// Why a request failed. Views treat every variant the same way; the
/// distinction only shows up in logs.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("failed to serialize request: {0}")]
    Encode(String),
    #[error("network error: {0}")]
    Network(String),
    #[error("server error {status}: {body}")]
    Status { status: u16, body: String },
    #[error("failed to parse response: {0}")]
    Decode(String),
}

enum Verb {
    Get,
    Post,
    Put,
    Delete,
}

/// HTTP client for the Iqra REST API.
///
/// The credential is supplied at construction; the client never reads
/// storage on its own.
#[derive(Clone, PartialEq)]
pub struct ApiClient {
    base_url: String,
    token: Option<AuthToken>,
}

impl ApiClient {
    /// Client for the configured server, authenticated with the stored token
    pub fn new() -> Self {
        let config = AppConfig::from_env();
        Self {
            token: CredentialStore::new(&config).load(),
            base_url: config.api_base_url,
        }
    }

    /// Create a new API client with a custom base URL and no credential
    pub fn with_base_url(base_url: String) -> Self {
        Self {
            base_url,
            token: None,
        }
    }

    pub fn with_token(mut self, token: Option<AuthToken>) -> Self {
        self.token = token;
        self
    }

    fn request(&self, verb: Verb, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        let builder = match verb {
            Verb::Get => Request::get(&url),
            Verb::Post => Request::post(&url),
            Verb::Put => Request::put(&url),
            Verb::Delete => Request::delete(&url),
        };
        match &self.token {
            Some(token) => builder.header("Authorization", &token.header_value()),
            None => builder,
        }
    }

    async fn send(builder: RequestBuilder) -> Result<Response, ApiError> {
        let response = builder
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        Self::check(response).await
    }

    async fn send_json<B: Serialize>(builder: RequestBuilder, body: &B) -> Result<Response, ApiError> {
        let request = builder
            .json(body)
            .map_err(|e| ApiError::Encode(e.to_string()))?;
        let response = request
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        Self::check(response).await
    }

    async fn check(response: Response) -> Result<Response, ApiError> {
        if response.ok() {
            Ok(response)
        } else {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            Err(ApiError::Status { status, body })
        }
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// Exchange credentials for a bearer token
    pub async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, ApiError> {
        let response = Self::send_json(self.request(Verb::Post, "/login"), request).await?;
        Self::decode(response).await
    }

    pub async fn list_students(&self) -> Result<Vec<Student>, ApiError> {
        let response = Self::send(self.request(Verb::Get, "/students")).await?;
        Self::decode(response).await
    }

    /// Returns the created student, including its server-assigned id
    pub async fn create_student(&self, request: &CreateStudentRequest) -> Result<Student, ApiError> {
        let response = Self::send_json(self.request(Verb::Post, "/students"), request).await?;
        Self::decode(response).await
    }

    pub async fn update_student(&self, id: &str, request: &UpdateStudentRequest) -> Result<(), ApiError> {
        let path = format!("/students/{}", encode_segment(id));
        Self::send_json(self.request(Verb::Put, &path), request).await?;
        Ok(())
    }

    /// The server also deletes the student's sessions
    pub async fn delete_student(&self, id: &str) -> Result<(), ApiError> {
        let path = format!("/students/{}", encode_segment(id));
        Self::send(self.request(Verb::Delete, &path)).await?;
        Ok(())
    }

    pub async fn list_sessions(&self) -> Result<Vec<Session>, ApiError> {
        let response = Self::send(self.request(Verb::Get, "/session")).await?;
        Self::decode(response).await
    }

    /// Sessions joined to a student by name
    pub async fn student_sessions(&self, student_name: &str) -> Result<Vec<Session>, ApiError> {
        let path = format!("/session/student/{}", encode_segment(student_name));
        let response = Self::send(self.request(Verb::Get, &path)).await?;
        Self::decode(response).await
    }

    pub async fn create_session(&self, payload: &SessionPayload) -> Result<(), ApiError> {
        Self::send_json(self.request(Verb::Post, "/session"), payload).await?;
        Ok(())
    }

    /// Full-record replace
    pub async fn update_session(&self, id: &str, payload: &SessionPayload) -> Result<(), ApiError> {
        let path = format!("/session/{}", encode_segment(id));
        Self::send_json(self.request(Verb::Put, &path), payload).await?;
        Ok(())
    }

    pub async fn delete_session(&self, id: &str) -> Result<(), ApiError> {
        let path = format!("/session/{}", encode_segment(id));
        Self::send(self.request(Verb::Delete, &path)).await?;
        Ok(())
    }

    /// Raw bytes of a generated PDF report
    pub async fn download_report(&self, kind: &ReportKind) -> Result<Vec<u8>, ApiError> {
        let query = kind.query();
        let builder = self.request(Verb::Get, &kind.path());
        let builder = if query.is_empty() {
            builder
        } else {
            builder.query(query.iter().map(|(key, value)| (*key, value.as_str())))
        };
        let response = Self::send(builder).await?;
        response
            .binary()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}
