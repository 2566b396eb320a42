use async_trait::async_trait;
use recital_core::editor::TokenExchange;
use recital_core::{CoreError, CoreResult};
use recital_shared::Masked;
use serde::Serialize;
use serde_json::Value;

/// GitHub OAuth code exchange for the content editor login.
pub struct GithubTokenExchange {
    client: reqwest::Client,
    token_url: String,
    client_id: String,
    client_secret: Masked<String>,
}

#[derive(Serialize)]
struct TokenRequest<'a> {
    client_id: &'a str,
    client_secret: &'a str,
    code: &'a str,
}

impl GithubTokenExchange {
    pub fn new(
        client: reqwest::Client,
        token_url: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: Masked<String>,
    ) -> Self {
        Self {
            client,
            token_url: token_url.into(),
            client_id: client_id.into(),
            client_secret,
        }
    }
}

#[async_trait]
impl TokenExchange for GithubTokenExchange {
    async fn exchange(&self, code: &str) -> CoreResult<Value> {
        self.client
            .post(&self.token_url)
            .header(reqwest::header::ACCEPT, "application/json")
            .json(&TokenRequest {
                client_id: &self.client_id,
                client_secret: self.client_secret.expose(),
                code,
            })
            .send()
            .await
            .map_err(|e| CoreError::Upstream(format!("oauth token exchange: {}", e)))?
            .json()
            .await
            .map_err(|e| CoreError::Upstream(format!("oauth token reply: {}", e)))
    }
}
