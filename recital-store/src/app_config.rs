use recital_shared::Masked;
use serde::Deserialize;
use std::env;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub content: ContentConfig,
    pub auth: AuthConfig,
    pub booking: BookingConfig,
    #[serde(default)]
    pub editor_oauth: EditorOAuthConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
    /// Marks the session cookie `Secure`.
    #[serde(default)]
    pub production: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ContentConfig {
    pub data_dir: PathBuf,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AuthConfig {
    pub admin_password: Option<Masked<String>>,
    pub session_secret: Option<Masked<String>>,
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,
    #[serde(default = "default_session_lifetime")]
    pub session_lifetime_seconds: i64,
}

fn default_cookie_name() -> String {
    "admin_session".to_string()
}

fn default_session_lifetime() -> i64 {
    recital_core::session::SESSION_LIFETIME_SECS
}

#[derive(Debug, Deserialize, Clone)]
pub struct BookingConfig {
    pub whatsapp_number: String,
    pub sheet_webhook_url: Option<String>,
    pub email_access_key: Option<Masked<String>>,
    #[serde(default = "default_email_endpoint")]
    pub email_endpoint: String,
    pub email_recipient: String,
    pub email_from_name: String,
}

fn default_email_endpoint() -> String {
    "https://api.web3forms.com/submit".to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct EditorOAuthConfig {
    pub client_id: Option<String>,
    pub client_secret: Option<Masked<String>>,
    #[serde(default = "default_token_url")]
    pub token_url: String,
}

impl Default for EditorOAuthConfig {
    fn default() -> Self {
        Self {
            client_id: None,
            client_secret: None,
            token_url: default_token_url(),
        }
    }
}

fn default_token_url() -> String {
    "https://github.com/login/oauth/access_token".to_string()
}

/// Deployment variable names the site has always used, mapped onto config keys.
const LEGACY_ENV: [(&str, &str); 6] = [
    ("ADMIN_PASSWORD", "auth.admin_password"),
    ("SESSION_SECRET", "auth.session_secret"),
    ("GOOGLE_SHEETS_WEBHOOK_URL", "booking.sheet_webhook_url"),
    ("WEB3FORMS_ACCESS_KEY", "booking.email_access_key"),
    ("GITHUB_OAUTH_CLIENT_ID", "editor_oauth.client_id"),
    ("GITHUB_OAUTH_CLIENT_SECRET", "editor_oauth.client_secret"),
];

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from(Path::new("config"))
    }

    pub fn load_from(dir: &Path) -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let mut builder = config::Config::builder()
            .add_source(config::File::from(dir.join("default")))
            .add_source(config::File::from(dir.join(&run_mode)).required(false))
            // Not checked in
            .add_source(config::File::from(dir.join("local")).required(false))
            // RECITAL__SERVER__PORT=8080 sets server.port
            .add_source(config::Environment::with_prefix("RECITAL").separator("__"));

        for (var, key) in LEGACY_ENV {
            builder = builder.set_override_option(key, env::var(var).ok())?;
        }

        let config: Config = builder.build()?.try_deserialize()?;
        Ok(config.normalized())
    }

    /// Blank secrets and URLs count as absent.
    fn normalized(mut self) -> Self {
        self.auth.admin_password = Masked::non_empty(self.auth.admin_password.map(Masked::into_inner));
        self.auth.session_secret = Masked::non_empty(self.auth.session_secret.map(Masked::into_inner));
        self.booking.email_access_key =
            Masked::non_empty(self.booking.email_access_key.map(Masked::into_inner));
        self.booking.sheet_webhook_url = self.booking.sheet_webhook_url.filter(|u| !u.trim().is_empty());
        self.editor_oauth.client_id = self.editor_oauth.client_id.filter(|id| !id.trim().is_empty());
        self.editor_oauth.client_secret =
            Masked::non_empty(self.editor_oauth.client_secret.map(Masked::into_inner));
        self
    }

    /// Admin login needs both a password and a signing secret.
    pub fn admin_enabled(&self) -> bool {
        self.auth.admin_password.is_some() && self.auth.session_secret.is_some()
    }
}
