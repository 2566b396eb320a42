pub mod app_config;
pub mod document;
pub mod front_matter;
pub mod content_repo;
pub mod sheet;
pub mod mailer;
pub mod editor_oauth;

pub use content_repo::FileContentStore;
pub use document::Document;
pub use sheet::WebhookSheet;
pub use mailer::Web3FormsMailer;
pub use editor_oauth::GithubTokenExchange;

/// Shared outbound HTTP client. No timeout beyond reqwest's defaults.
pub fn http_client() -> reqwest::Client {
    reqwest::Client::new()
}
