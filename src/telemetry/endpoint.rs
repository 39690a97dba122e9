//! Collector endpoint parsing.
//!
//! The scheme prefix selects the transport:
//! - `unix://<path>`: gRPC over a Unix domain socket
//! - `http://host:port`, `https://host:port`: gRPC over TCP

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use thiserror::Error;
use url::Url;

const SCHEME_SEPARATOR: &str = "://";

/// A parsed collector endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
    /// Local socket path.
    UnixSocket(PathBuf),
    /// Network target.
    Grpc(Url),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EndpointError {
    #[error("endpoint is empty")]
    Empty,

    #[error("endpoint {0:?} has no scheme (expected unix://, http:// or https://)")]
    MissingScheme(String),

    #[error("unsupported endpoint scheme {0:?}")]
    UnsupportedScheme(String),

    #[error("unix endpoint has no socket path")]
    EmptySocketPath,

    #[error("invalid network endpoint: {0}")]
    InvalidUrl(String),
}

impl Endpoint {
    /// Scheme name for logging.
    pub fn scheme(&self) -> &str {
        match self {
            Endpoint::UnixSocket(_) => "unix",
            Endpoint::Grpc(url) => url.scheme(),
        }
    }
}

impl FromStr for Endpoint {
    type Err = EndpointError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(EndpointError::Empty);
        }

        let (scheme, rest) = raw
            .split_once(SCHEME_SEPARATOR)
            .ok_or_else(|| EndpointError::MissingScheme(raw.to_string()))?;

        match scheme.to_ascii_lowercase().as_str() {
            "unix" => {
                if rest.is_empty() {
                    return Err(EndpointError::EmptySocketPath);
                }
                Ok(Endpoint::UnixSocket(PathBuf::from(rest)))
            }
            "http" | "https" => {
                let url = Url::parse(raw).map_err(|e| EndpointError::InvalidUrl(e.to_string()))?;
                if url.host_str().map_or(true, str::is_empty) {
                    return Err(EndpointError::InvalidUrl(format!("{raw:?} has no host")));
                }
                Ok(Endpoint::Grpc(url))
            }
            "" => Err(EndpointError::MissingScheme(raw.to_string())),
            other => Err(EndpointError::UnsupportedScheme(other.to_string())),
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endpoint::UnixSocket(path) => write!(f, "unix://{}", path.display()),
            Endpoint::Grpc(url) => write!(f, "{url}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_unix_socket() {
        let endpoint: Endpoint = "unix:///var/run/collector.sock".parse().unwrap();
        assert_eq!(endpoint, Endpoint::UnixSocket(PathBuf::from("/var/run/collector.sock")));
        assert_eq!(endpoint.scheme(), "unix");
        assert_eq!(endpoint.to_string(), "unix:///var/run/collector.sock");
    }

    #[test]
    fn parses_network_targets() {
        let endpoint: Endpoint = "http://127.0.0.1:4317".parse().unwrap();
        match endpoint {
            Endpoint::Grpc(url) => {
                assert_eq!(url.host_str(), Some("127.0.0.1"));
                assert_eq!(url.port(), Some(4317));
            }
            other => panic!("unexpected endpoint: {other:?}"),
        }

        let endpoint: Endpoint = "HTTPS://collector.internal:4317".parse().unwrap();
        assert_eq!(endpoint.scheme(), "https");
    }

    #[test]
    fn rejects_empty() {
        assert_eq!("".parse::<Endpoint>(), Err(EndpointError::Empty));
        assert_eq!("   ".parse::<Endpoint>(), Err(EndpointError::Empty));
    }

    #[test]
    fn rejects_missing_scheme() {
        assert!(matches!(
            "/var/run/collector.sock".parse::<Endpoint>(),
            Err(EndpointError::MissingScheme(_))
        ));
        assert!(matches!(
            "://collector".parse::<Endpoint>(),
            Err(EndpointError::MissingScheme(_))
        ));
    }

    #[test]
    fn rejects_unknown_scheme() {
        assert_eq!(
            "ftp://collector:21".parse::<Endpoint>(),
            Err(EndpointError::UnsupportedScheme("ftp".to_string()))
        );
    }

    #[test]
    fn rejects_unix_without_path() {
        assert_eq!("unix://".parse::<Endpoint>(), Err(EndpointError::EmptySocketPath));
    }

    #[test]
    fn rejects_network_without_host() {
        assert!(matches!(
            "http://".parse::<Endpoint>(),
            Err(EndpointError::InvalidUrl(_))
        ));
    }
}
