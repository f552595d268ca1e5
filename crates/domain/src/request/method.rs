//! Request methods the harness can issue

use std::fmt;
use std::str::FromStr;

use crate::error::DomainError;

/// Request method of an [`OutgoingRequest`](super::OutgoingRequest).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
    Head,
    Options,
}

impl HttpMethod {
    const ALL: [Self; 7] = [
        Self::Get,
        Self::Post,
        Self::Put,
        Self::Patch,
        Self::Delete,
        Self::Head,
        Self::Options,
    ];

    /// Canonical upper-case token, as sent on the request line.
    #[must_use]
    pub const fn token(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
            Self::Head => "HEAD",
            Self::Options => "OPTIONS",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// Case-insensitive; anything outside [`HttpMethod`] is
/// [`DomainError::UnsupportedMethod`].
impl FromStr for HttpMethod {
    type Err = DomainError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|method| method.token().eq_ignore_ascii_case(name.trim()))
            .ok_or_else(|| DomainError::UnsupportedMethod(name.to_string()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_ignores_case() {
        assert_eq!("delete".parse::<HttpMethod>().unwrap(), HttpMethod::Delete);
        assert_eq!(" Options ".parse::<HttpMethod>().unwrap(), HttpMethod::Options);
    }

    #[test]
    fn test_unknown_method_is_rejected() {
        assert_eq!(
            "PROPFIND".parse::<HttpMethod>(),
            Err(DomainError::UnsupportedMethod("PROPFIND".to_string()))
        );
    }

    #[test]
    fn test_display_is_token() {
        assert_eq!(HttpMethod::Patch.to_string(), "PATCH");
    }
}
