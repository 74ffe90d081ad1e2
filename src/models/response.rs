use serde::{Deserialize, Serialize};

/// Body returned by `POST /sendmail`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse {
    pub status: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect: Option<String>,
}

impl ApiResponse {
    pub fn success(message: impl Into<String>, redirect: impl Into<String>) -> Self {
        Self {
            status: "success".to_string(),
            message: message.into(),
            redirect: Some(redirect.into()),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: "error".to_string(),
            message: message.into(),
            redirect: None,
        }
    }
}
