//! # Versión del protocolo
//! src/http/protocol.rs
//!
//! El token de versión aparece en la request line (`GET / HTTP/1.1`) y en
//! la status line de la respuesta (`HTTP/1.1 200 OK`).

use super::HttpError;
use std::fmt;
use std::str::FromStr;

/// Versiones HTTP soportadas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Protocol {
    /// HTTP/1.0 (RFC 1945)
    Http10,

    /// HTTP/1.1, la versión usada en las respuestas por defecto
    #[default]
    Http11,
}

impl Protocol {
    pub fn as_str(&self) -> &'static str {
        match self {
            Protocol::Http10 => "HTTP/1.0",
            Protocol::Http11 => "HTTP/1.1",
        }
    }
}

impl FromStr for Protocol {
    type Err = HttpError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "HTTP/1.0" => Ok(Protocol::Http10),
            "HTTP/1.1" => Ok(Protocol::Http11),
            _ => Err(HttpError::UnsupportedProtocol(s.to_string())),
        }
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
