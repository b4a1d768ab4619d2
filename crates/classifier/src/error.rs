use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid endpoint: {0}")]
    InvalidEndpoint(String),

    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("HTTP {status}{}", format_detail(.detail))]
    Http { status: u16, detail: Option<String> },

    #[error("Malformed response: {0}")]
    MalformedResponse(String),
}

impl ApiError {
    /// Text shown to the user. Every request failure maps to the same text.
    pub fn user_message(&self) -> &'static str {
        match self {
            ApiError::InvalidEndpoint(_) => "Classifier endpoint is not configured correctly.",
            ApiError::Transport(_) | ApiError::Http { .. } | ApiError::MalformedResponse(_) => {
                "Error uploading file"
            }
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            ApiError::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

fn format_detail(detail: &Option<String>) -> String {
    detail
        .as_deref()
        .map(|d| format!(": {d}"))
        .unwrap_or_default()
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_failures_share_one_user_message() {
        let http = ApiError::Http {
            status: 400,
            detail: Some("Only CSV files are supported".to_string()),
        };
        let malformed = ApiError::MalformedResponse("expected value".to_string());

        assert_eq!(http.user_message(), malformed.user_message());
        assert_eq!(http.user_message(), "Error uploading file");
    }

    #[test]
    fn http_error_display_includes_detail_when_present() {
        let with_detail = ApiError::Http {
            status: 400,
            detail: Some("Only CSV files are supported".to_string()),
        };
        let without = ApiError::Http {
            status: 502,
            detail: None,
        };

        assert_eq!(with_detail.to_string(), "HTTP 400: Only CSV files are supported");
        assert_eq!(without.to_string(), "HTTP 502");
        assert_eq!(without.status(), Some(502));
    }
}
