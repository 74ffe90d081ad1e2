use crate::models::response::ApiResponse;
use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use std::fmt;

#[derive(Debug)]
pub enum SiteError {
    InvalidPayload(String),
    ValidationError(Vec<String>),
    TemplateError(String),
    InternalError(String),
}

impl fmt::Display for SiteError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SiteError::InvalidPayload(msg) => write!(f, "{}", msg),
            SiteError::ValidationError(messages) => write!(f, "{}", messages.join(" | ")),
            SiteError::TemplateError(msg) => write!(f, "Template error: {}", msg),
            SiteError::InternalError(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for SiteError {}

impl From<askama::Error> for SiteError {
    fn from(err: askama::Error) -> Self {
        SiteError::TemplateError(err.to_string())
    }
}

impl ResponseError for SiteError {
    fn error_response(&self) -> HttpResponse {
        let message = match self {
            SiteError::InvalidPayload(_) | SiteError::ValidationError(_) => self.to_string(),
            // Template and internal details stay in the log.
            SiteError::TemplateError(_) | SiteError::InternalError(_) => {
                log::error!("{}", self);
                "An internal error occurred.".to_string()
            }
        };
        HttpResponse::build(self.status_code()).json(ApiResponse::error(message))
    }

    fn status_code(&self) -> StatusCode {
        match self {
            SiteError::InvalidPayload(_) => StatusCode::BAD_REQUEST,
            SiteError::ValidationError(_) => StatusCode::BAD_REQUEST,
            SiteError::TemplateError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            SiteError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Client-side validation failures. The `Display` text is what the
/// applicant is shown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    MissingRequired { fields: Vec<String> },
    Underage { field: String, minimum: u32 },
    InvalidAge { field: String },
}

impl ValidationError {
    /// Names of the fields that should be highlighted.
    pub fn fields(&self) -> Vec<&str> {
        match self {
            ValidationError::MissingRequired { fields } => {
                fields.iter().map(String::as_str).collect()
            }
            ValidationError::Underage { field, .. } | ValidationError::InvalidAge { field } => {
                vec![field.as_str()]
            }
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ValidationError::MissingRequired { .. } => {
                write!(f, "Please fill in all required fields marked with *")
            }
            ValidationError::Underage { minimum, .. } => {
                write!(f, "You must be at least {} years old to apply", minimum)
            }
            ValidationError::InvalidAge { .. } => write!(f, "Please enter a valid age"),
        }
    }
}

impl std::error::Error for ValidationError {}

#[derive(Debug)]
pub enum FormError {
    /// Input was rejected locally; nothing was sent.
    Validation(ValidationError),
    /// The endpoint answered with a non-2xx status.
    Server { status: u16, message: String },
    /// The request never completed or its body could not be decoded.
    Transport(String),
    /// Another submission from this controller is still outstanding.
    InFlight,
    /// The application was accepted and the page is about to navigate away.
    AlreadySubmitted,
}

impl fmt::Display for FormError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            FormError::Validation(err) => write!(f, "Validation error: {}", err),
            FormError::Server { status, message } => {
                write!(f, "Server error ({}): {}", status, message)
            }
            FormError::Transport(reason) => write!(f, "Transport error: {}", reason),
            FormError::InFlight => write!(f, "A submission is already in progress"),
            FormError::AlreadySubmitted => write!(f, "The application was already submitted"),
        }
    }
}

impl std::error::Error for FormError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FormError::Validation(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ValidationError> for FormError {
    fn from(err: ValidationError) -> Self {
        FormError::Validation(err)
    }
}
