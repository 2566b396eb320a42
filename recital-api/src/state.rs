use chrono::Duration;
use recital_core::desk::BookingDesk;
use recital_core::editor::TokenExchange;
use recital_core::repository::ContentRepository;
use recital_shared::Masked;
use recital_store::app_config::Config;
use recital_store::{FileContentStore, GithubTokenExchange, Web3FormsMailer, WebhookSheet};
use std::sync::Arc;

use crate::middleware::SessionCodec;

#[derive(Clone)]
pub struct AuthConfig {
    pub admin_password: Option<Masked<String>>,
    pub session: SessionCodec,
}

#[derive(Clone)]
pub struct AppState {
    pub content: Arc<dyn ContentRepository>,
    pub desk: Arc<BookingDesk>,
    pub editor: Option<Arc<dyn TokenExchange>>,
    pub auth: AuthConfig,
}

impl AppState {
    /// Wires the file store and outbound clients described by `config`.
    /// Channels whose settings are absent are left out.
    pub fn from_config(config: &Config) -> Self {
        let http = recital_store::http_client();

        let mut desk = BookingDesk::new(
            config.booking.whatsapp_number.clone(),
            config.booking.email_from_name.clone(),
        );
        match &config.booking.sheet_webhook_url {
            Some(url) => desk = desk.with_sheet(Arc::new(WebhookSheet::new(http.clone(), url.clone()))),
            None => tracing::warn!("GOOGLE_SHEETS_WEBHOOK_URL not set, spreadsheet forwarding disabled"),
        }
        match &config.booking.email_access_key {
            Some(key) => {
                desk = desk.with_mailer(Arc::new(Web3FormsMailer::new(
                    http.clone(),
                    config.booking.email_endpoint.clone(),
                    key.clone(),
                    config.booking.email_recipient.clone(),
                )))
            }
            None => tracing::warn!("WEB3FORMS_ACCESS_KEY not set, booking emails disabled"),
        }

        let editor = match (&config.editor_oauth.client_id, &config.editor_oauth.client_secret) {
            (Some(id), Some(secret)) => Some(Arc::new(GithubTokenExchange::new(
                http,
                config.editor_oauth.token_url.clone(),
                id.clone(),
                secret.clone(),
            )) as Arc<dyn TokenExchange>),
            _ => None,
        };

        if !config.admin_enabled() {
            tracing::warn!("ADMIN_PASSWORD or SESSION_SECRET not set, admin login disabled");
        }

        AppState {
            content: Arc::new(FileContentStore::new(&config.content.data_dir)),
            desk: Arc::new(desk),
            editor,
            auth: AuthConfig {
                admin_password: config.auth.admin_password.clone(),
                session: SessionCodec::new(
                    config.auth.session_secret.clone(),
                    config.auth.cookie_name.clone(),
                    Duration::seconds(config.auth.session_lifetime_seconds),
                    config.server.production,
                ),
            },
        }
    }
}
