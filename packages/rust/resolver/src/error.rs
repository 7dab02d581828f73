//! Lookup failure taxonomy.

/// Whether a transport failure is worth another attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureClass {
    /// Connection refused, DNS resolution failure, or timeout.
    Transient,
    /// Anything else the transport reports.
    Permanent,
}

/// Map a transport error to its retry class.
///
/// reqwest reports refused connections and failed name resolution as
/// connect errors, so those plus timeouts cover the retryable set.
pub fn classify(err: &reqwest::Error) -> FailureClass {
    if err.is_connect() || err.is_timeout() {
        FailureClass::Transient
    } else {
        FailureClass::Permanent
    }
}

/// Why an oEmbed lookup produced no embed.
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    /// Retryable transport failure.
    #[error("{url}: transient network failure: {message}")]
    Transient { url: String, message: String },

    /// Non-retryable transport failure.
    #[error("{url}: network failure: {message}")]
    Permanent { url: String, message: String },

    /// The endpoint answered with a non-success status.
    #[error("{url}: HTTP {status}")]
    HttpStatus { url: String, status: u16 },

    /// The body is not an oEmbed JSON object with an `html` member.
    #[error("{url}: malformed oEmbed response: {message}")]
    Malformed { url: String, message: String },
}

impl ResolveError {
    /// Build the variant matching `err`'s retry class.
    pub fn from_transport(url: &str, err: &reqwest::Error) -> Self {
        let url = url.to_string();
        let message = err.to_string();
        match classify(err) {
            FailureClass::Transient => Self::Transient { url, message },
            FailureClass::Permanent => Self::Permanent { url, message },
        }
    }

    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Transient { .. })
    }
}
