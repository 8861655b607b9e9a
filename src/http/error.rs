//! # Errores del protocolo HTTP
//! src/http/error.rs
//!
//! Errores que pueden ocurrir mientras se lee y parsea un request.
//! Cada error sabe con qué código de estado debe responder el servidor.

use super::StatusCode;
use thiserror::Error;

/// Errores que pueden ocurrir durante el parsing
#[derive(Debug, Error)]
pub enum HttpError {
    /// Conexión cerrada antes de recibir la request line
    #[error("Empty request")]
    EmptyRequest,

    /// Formato inválido de la request line
    #[error("Invalid request line format: {0}")]
    InvalidRequestLine(String),

    /// Método HTTP no soportado
    #[error("Unsupported HTTP method: {0}")]
    UnsupportedMethod(String),

    /// Versión HTTP no soportada (solo HTTP/1.0 y HTTP/1.1)
    #[error("Unsupported HTTP version: {0}")]
    UnsupportedProtocol(String),

    /// Header malformado
    #[error("Invalid header: {0}")]
    InvalidHeader(String),

    /// Content-Length no numérico
    #[error("Invalid Content-Length: {0}")]
    InvalidContentLength(String),

    /// El body anunciado supera el límite configurado
    #[error("Body of {length} bytes exceeds the limit of {limit} bytes")]
    BodyTooLarge { length: usize, limit: usize },

    /// La conexión terminó antes de entregar todo el body
    #[error("Incomplete body: expected {expected} bytes, got {read}")]
    IncompleteBody { expected: usize, read: usize },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl HttpError {
    /// Código de estado con el que el servidor responde a este error
    ///
    /// # Ejemplo
    /// ```
    /// use webserver::http::{HttpError, StatusCode};
    ///
    /// let error = HttpError::InvalidContentLength("abc".to_string());
    /// assert_eq!(error.status(), StatusCode::BadRequest);
    /// ```
    pub fn status(&self) -> StatusCode {
        match self {
            HttpError::EmptyRequest
            | HttpError::InvalidRequestLine(_)
            | HttpError::InvalidHeader(_)
            | HttpError::InvalidContentLength(_)
            | HttpError::IncompleteBody { .. } => StatusCode::BadRequest,
            HttpError::UnsupportedMethod(_) => StatusCode::NotImplemented,
            HttpError::UnsupportedProtocol(_) => StatusCode::HttpVersionNotSupported,
            HttpError::BodyTooLarge { .. } => StatusCode::PayloadTooLarge,
            HttpError::Io(_) => StatusCode::InternalServerError,
        }
    }
}
