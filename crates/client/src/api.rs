//! REST client for the `/api/projects` endpoint.
//!
//! Wraps the collection endpoint using [`reqwest`] and unwraps the
//! `{ projects }` / `{ project }` / `{ success }` envelopes.

use async_trait::async_trait;
use portfolio_core::project::{CreateProject, Project, UpdateProject};
use serde::Deserialize;

/// Errors from the projects client.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The HTTP request itself failed (connection, DNS, TLS, body decode).
    #[error("HTTP request failed: {0}")]
    Network(#[from] reqwest::Error),

    /// The service answered with a non-2xx status.
    #[error("Projects API error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// The `error` field of the response body, or the raw body.
        message: String,
    },

    /// `save` was called on an editor session that is no longer open.
    #[error("Editor session is already closed")]
    SessionClosed,
}

impl ClientError {
    /// HTTP status of an API error, if the service answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Operations the dashboard needs from the record service.
///
/// [`ProjectsApi`] is the HTTP implementation; tests substitute in-memory
/// fakes.
#[async_trait]
pub trait ProjectService: Send + Sync {
    async fn list(&self) -> Result<Vec<Project>, ClientError>;
    async fn create(&self, input: &CreateProject) -> Result<Project, ClientError>;
    async fn update(&self, id: &str, input: &UpdateProject) -> Result<Project, ClientError>;
    async fn delete(&self, id: &str) -> Result<(), ClientError>;
}

#[derive(Deserialize)]
struct ListEnvelope {
    projects: Vec<Project>,
}

#[derive(Deserialize)]
struct ProjectEnvelope {
    project: Project,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: String,
}

/// HTTP client for one projects service.
#[derive(Debug, Clone)]
pub struct ProjectsApi {
    client: reqwest::Client,
    base_url: String,
}

impl ProjectsApi {
    /// Create a client for the service at `base_url`, e.g.
    /// `http://localhost:3000`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    fn collection_url(&self) -> String {
        format!("{}/api/projects", self.base_url)
    }

    // ---- private helpers ----

    /// Ensure the response has a success status code. On failure the
    /// `error` field of the JSON body (or the raw body) becomes the message.
    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, ClientError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "<unreadable body>".to_string());
        let message = serde_json::from_str::<ErrorEnvelope>(&body)
            .map(|e| e.error)
            .unwrap_or(body);

        Err(ClientError::Api {
            status: status.as_u16(),
            message,
        })
    }

    async fn parse_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ClientError> {
        let response = Self::ensure_success(response).await?;
        Ok(response.json::<T>().await?)
    }
}

#[async_trait]
impl ProjectService for ProjectsApi {
    /// `GET /api/projects`
    async fn list(&self) -> Result<Vec<Project>, ClientError> {
        let response = self.client.get(self.collection_url()).send().await?;
        let envelope: ListEnvelope = Self::parse_response(response).await?;
        Ok(envelope.projects)
    }

    /// `POST /api/projects`
    async fn create(&self, input: &CreateProject) -> Result<Project, ClientError> {
        let response = self
            .client
            .post(self.collection_url())
            .json(input)
            .send()
            .await?;
        let envelope: ProjectEnvelope = Self::parse_response(response).await?;
        Ok(envelope.project)
    }

    /// `PUT /api/projects?id={id}`
    async fn update(&self, id: &str, input: &UpdateProject) -> Result<Project, ClientError> {
        let response = self
            .client
            .put(self.collection_url())
            .query(&[("id", id)])
            .json(input)
            .send()
            .await?;
        let envelope: ProjectEnvelope = Self::parse_response(response).await?;
        Ok(envelope.project)
    }

    /// `DELETE /api/projects?id={id}`
    async fn delete(&self, id: &str) -> Result<(), ClientError> {
        let response = self
            .client
            .delete(self.collection_url())
            .query(&[("id", id)])
            .send()
            .await?;
        Self::ensure_success(response).await?;
        Ok(())
    }
}
