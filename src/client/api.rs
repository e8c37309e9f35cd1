use reqwest::{header, Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde_json::json;
use thiserror::Error;

use crate::models::dto::{
    BallotRecord, CandidatesResponse, CheckTokenResponse, ErrorResponse, GenerateTokensResponse,
    LoginResponse, OkResponse,
};

use super::session::AdminSession;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error("{message} (HTTP {status})")]
    Api { status: u16, message: String },
}

impl ClientError {
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Http(e) => e.status().map(|s| s.as_u16()),
        }
    }
}

/// Client HTTP de l'API de vote et d'administration
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api{}", self.base_url, path)
    }

    fn authorized(&self, builder: RequestBuilder, session: &AdminSession) -> RequestBuilder {
        builder.header(header::AUTHORIZATION, session.bearer())
    }

    // ---- vote ----

    pub async fn candidates(&self) -> Result<CandidatesResponse, ClientError> {
        let response = self.http.get(self.url("/candidates")).send().await?;
        read(response).await
    }

    pub async fn check_token(&self, code: &str) -> Result<bool, ClientError> {
        let response = self
            .http
            .get(self.url("/vote/check"))
            .query(&[("token", code)])
            .send()
            .await?;

        let body: CheckTokenResponse = read(response).await?;
        Ok(body.valid)
    }

    pub async fn submit_ballot(&self, code: &str, ballot: &[String]) -> Result<(), ClientError> {
        let response = self
            .http
            .post(self.url("/vote"))
            .json(&json!({ "token": code, "ballot": ballot }))
            .send()
            .await?;

        let _: OkResponse = read(response).await?;
        Ok(())
    }

    // ---- admin ----

    pub async fn login(&self, email: &str, password: &str) -> Result<AdminSession, ClientError> {
        let response = self
            .http
            .post(self.url("/admin/login"))
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await?;

        let body: LoginResponse = read(response).await?;
        Ok(AdminSession {
            email: email.to_string(),
            credential: body.token,
        })
    }

    pub async fn list_votes(&self, session: &AdminSession) -> Result<Vec<BallotRecord>, ClientError> {
        let request = self.authorized(self.http.get(self.url("/admin/votes")), session);
        read(request.send().await?).await
    }

    pub async fn generate_tokens(
        &self,
        session: &AdminSession,
        count: u32,
    ) -> Result<Vec<String>, ClientError> {
        let request = self
            .authorized(self.http.post(self.url("/tokens/generate")), session)
            .json(&json!({ "count": count }));

        let body: GenerateTokensResponse = read(request.send().await?).await?;
        Ok(body.codes)
    }
}

/// Corps JSON si succès, sinon le message {"error": ...} du serveur
async fn read<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response.json().await?);
    }

    let message = match response.json::<ErrorResponse>().await {
        Ok(body) => body.error,
        Err(_) => status.canonical_reason().unwrap_or("Request failed").to_string(),
    };

    Err(ClientError::Api {
        status: status.as_u16(),
        message,
    })
}
