//! Resource services.
//!
//! Each operation maps one domain action to one HTTP call and returns the
//! decoded envelope untouched. Transport failures never escape as-is: they
//! are collapsed into `Error::Service` carrying a single display message.

mod ai;
mod auth;
mod documents;

pub use ai::AiService;
pub use auth::AuthService;
pub use documents::DocumentService;

use zhimo_core::Error;

use crate::transport::TransportError;

/// Collapse a transport failure into a display message.
///
/// Precedence: the server's `message` field, then the transport error's own
/// text, then `fallback`.
pub fn normalize(err: TransportError, fallback: &str) -> Error {
    let message = match err.server_message() {
        Some(message) => message.to_string(),
        None => {
            let own = err.to_string();
            if own.trim().is_empty() {
                fallback.to_string()
            } else {
                own
            }
        }
    };
    Error::Service(message)
}

/// `/documents/{id}{suffix}` with `id` percent-encoded as one path segment.
pub(crate) fn document_path(id: &str, suffix: &str) -> String {
    format!("/documents/{}{}", urlencoding::encode(id), suffix)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_path_encodes_id_segment() {
        assert_eq!(
            document_path("6884458e48a6db663e5ed260", ""),
            "/documents/6884458e48a6db663e5ed260"
        );
        assert_eq!(document_path("a/b", "/markdown"), "/documents/a%2Fb/markdown");
        assert_eq!(document_path("x?y#z", ""), "/documents/x%3Fy%23z");
    }

    #[test]
    fn test_normalize_prefers_server_message() {
        let err = TransportError::Status {
            status: 409,
            message: Some("Username already taken".to_string()),
        };
        let normalized = normalize(err, "Registration failed");
        assert!(matches!(&normalized, Error::Service(_)));
        assert_eq!(normalized.to_string(), "Username already taken");
    }

    #[test]
    fn test_normalize_falls_back_to_error_text() {
        let err = TransportError::Status {
            status: 502,
            message: None,
        };
        assert_eq!(
            normalize(err, "Login failed").to_string(),
            "Request failed with status code 502"
        );
    }

    #[test]
    fn test_normalize_decode_error() {
        let err = TransportError::Decode("missing field `success`".to_string());
        assert_eq!(
            normalize(err, "Login failed").to_string(),
            "Unexpected response body: missing field `success`"
        );
    }
}
