use thiserror::Error;

#[derive(Error, Debug)]
pub enum ImagenError {
    /// A required form field is empty at submit time.
    #[error("{0}")]
    Validation(String),

    #[error("API key is missing. Set GEMINI_API_KEY (or API_KEY) in the environment.")]
    MissingApiKey,

    #[error("{message}")]
    Service {
        message: String,
        #[source]
        source: Option<reqwest::Error>,
    },

    /// The service answered but produced no image, only explanatory text.
    #[error("Generation failed: {0}")]
    Refused(String),

    #[error("Invalid API response: {0}")]
    InvalidResponse(String),

    #[error("A generation is already in progress")]
    Busy,

    #[error("Image processing error: {0}")]
    Image(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ImagenError {
    /// Whether the failure happened before anything was sent over the wire.
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            ImagenError::Validation(_) | ImagenError::MissingApiKey | ImagenError::Busy
        )
    }
}

/// Render an error and every cause below it as `outer: inner: ...`
pub fn error_chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !message.ends_with(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }
    message
}

impl From<reqwest::Error> for ImagenError {
    fn from(err: reqwest::Error) -> Self {
        ImagenError::Service {
            message: error_chain(&err),
            source: Some(err),
        }
    }
}

impl From<base64::DecodeError> for ImagenError {
    fn from(err: base64::DecodeError) -> Self {
        ImagenError::Image(format!("invalid base64 payload: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_refusal_message_is_prefixed() {
        let err = ImagenError::Refused("content policy violation".to_string());
        assert_eq!(err.to_string(), "Generation failed: content policy violation");
    }

    #[test]
    fn test_service_message_passes_through() {
        let err = ImagenError::Service {
            message: "quota exceeded".to_string(),
            source: None,
        };
        assert_eq!(err.to_string(), "quota exceeded");
        assert!(!err.is_local());
    }

    #[derive(Debug, Error)]
    #[error("error sending request")]
    struct Outer(#[source] Middle);

    #[derive(Debug, Error)]
    #[error("tcp connect error")]
    struct Middle(#[source] std::io::Error);

    #[test]
    fn test_error_chain_includes_causes() {
        let err = Outer(Middle(std::io::Error::new(
            std::io::ErrorKind::ConnectionRefused,
            "Connection refused",
        )));
        assert_eq!(
            error_chain(&err),
            "error sending request: tcp connect error: Connection refused"
        );
    }

    #[test]
    fn test_error_chain_skips_repeated_text() {
        let err = Middle(std::io::Error::new(std::io::ErrorKind::Other, "tcp connect error"));
        assert_eq!(error_chain(&err), "tcp connect error");
    }

    #[test]
    fn test_local_errors() {
        assert!(ImagenError::MissingApiKey.is_local());
        assert!(ImagenError::Validation("x".into()).is_local());
        assert!(!ImagenError::Refused("x".into()).is_local());
    }
}
