//! # Códigos de Estado HTTP
//! src/http/status.rs
//!
//! Este módulo define los códigos de estado que usa el servidor y la
//! status line completa (`HTTP/1.1 302 Found`). Según el RFC 9110, los
//! códigos se agrupan en 5 categorías:
//!
//! - **1xx**: Informacional (no se usan)
//! - **2xx**: Éxito (200, 201, 204)
//! - **3xx**: Redirección (302 tras un formulario, 303, 304)
//! - **4xx**: Error del cliente (400, 401, 403, 404, 405, 411, 413)
//! - **5xx**: Error del servidor (500, 501, 505)

use super::Protocol;
use std::fmt;

/// Representa los códigos de estado HTTP que soporta nuestro servidor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCode {
    /// 200 OK - La petición fue exitosa
    Ok = 200,

    /// 201 Created
    Created = 201,

    /// 204 No Content - Petición exitosa sin contenido en el body
    NoContent = 204,

    /// 302 Found - Redirección usada después de procesar un formulario
    Found = 302,

    /// 303 See Other
    SeeOther = 303,

    /// 304 Not Modified
    NotModified = 304,

    /// 400 Bad Request - Parámetros inválidos o request malformado
    BadRequest = 400,

    /// 401 Unauthorized
    Unauthorized = 401,

    /// 403 Forbidden - Por ejemplo, un path que intenta salir del web root
    Forbidden = 403,

    /// 404 Not Found - Ni un controller ni un recurso estático atendieron el request
    NotFound = 404,

    /// 405 Method Not Allowed
    MethodNotAllowed = 405,

    /// 411 Length Required
    LengthRequired = 411,

    /// 413 Payload Too Large - El body supera el límite configurado
    PayloadTooLarge = 413,

    /// 500 Internal Server Error - Error interno del servidor
    InternalServerError = 500,

    /// 501 Not Implemented - Método HTTP desconocido
    NotImplemented = 501,

    /// 505 HTTP Version Not Supported
    HttpVersionNotSupported = 505,
}

impl StatusCode {
    /// Convierte el código a su valor numérico
    ///
    /// # Ejemplo
    /// ```
    /// use webserver::http::StatusCode;
    /// assert_eq!(StatusCode::Found.as_u16(), 302);
    /// ```
    pub fn as_u16(&self) -> u16 {
        *self as u16
    }

    /// Retorna el texto de razón (reason phrase) asociado al código
    ///
    /// # Ejemplo
    /// ```
    /// use webserver::http::StatusCode;
    /// assert_eq!(StatusCode::Ok.reason_phrase(), "OK");
    /// assert_eq!(StatusCode::NotFound.reason_phrase(), "Not Found");
    /// ```
    pub fn reason_phrase(&self) -> &'static str {
        match self {
            StatusCode::Ok => "OK",
            StatusCode::Created => "Created",
            StatusCode::NoContent => "No Content",
            StatusCode::Found => "Found",
            StatusCode::SeeOther => "See Other",
            StatusCode::NotModified => "Not Modified",
            StatusCode::BadRequest => "Bad Request",
            StatusCode::Unauthorized => "Unauthorized",
            StatusCode::Forbidden => "Forbidden",
            StatusCode::NotFound => "Not Found",
            StatusCode::MethodNotAllowed => "Method Not Allowed",
            StatusCode::LengthRequired => "Length Required",
            StatusCode::PayloadTooLarge => "Payload Too Large",
            StatusCode::InternalServerError => "Internal Server Error",
            StatusCode::NotImplemented => "Not Implemented",
            StatusCode::HttpVersionNotSupported => "HTTP Version Not Supported",
        }
    }

    /// Verifica si el código indica éxito (2xx)
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.as_u16())
    }

    /// Verifica si el código indica redirección (3xx)
    pub fn is_redirection(&self) -> bool {
        (300..400).contains(&self.as_u16())
    }

    /// Verifica si el código indica error del cliente (4xx)
    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.as_u16())
    }

    /// Verifica si el código indica error del servidor (5xx)
    pub fn is_server_error(&self) -> bool {
        (500..600).contains(&self.as_u16())
    }
}

impl fmt::Display for StatusCode {
    /// Formato: "200 OK"
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.as_u16(), self.reason_phrase())
    }
}

/// Status line de una respuesta: versión + código
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Status {
    protocol: Protocol,
    code: StatusCode,
}

impl Status {
    pub fn new(protocol: Protocol, code: StatusCode) -> Self {
        Self { protocol, code }
    }

    pub fn ok() -> Self {
        Self::new(Protocol::Http11, StatusCode::Ok)
    }

    pub fn found() -> Self {
        Self::new(Protocol::Http11, StatusCode::Found)
    }

    pub fn bad_request() -> Self {
        Self::new(Protocol::Http11, StatusCode::BadRequest)
    }

    pub fn not_found() -> Self {
        Self::new(Protocol::Http11, StatusCode::NotFound)
    }

    pub fn protocol(&self) -> Protocol {
        self.protocol
    }

    pub fn code(&self) -> StatusCode {
        self.code
    }
}

impl From<StatusCode> for Status {
    fn from(code: StatusCode) -> Self {
        Self::new(Protocol::Http11, code)
    }
}

impl fmt::Display for Status {
    /// Formato: "HTTP/1.1 200 OK"
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.protocol, self.code)
    }
}
