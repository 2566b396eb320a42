use serde::Serialize;

/// Body returned by every successful write.
#[derive(Debug, Serialize)]
pub struct Saved {
    pub success: bool,
    pub message: &'static str,
}

impl Saved {
    pub fn new(message: &'static str) -> Self {
        Self { success: true, message }
    }
}
