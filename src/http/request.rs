//! # Requests HTTP
//! src/http/request.rs
//!
//! Modelo de un request ya separado en sus partes.
//!
//! ## Formato de un Request HTTP/1.1
//!
//! ```text
//! POST /user/create?source=form HTTP/1.1\r\n
//! Host: localhost:8080\r\n
//! Content-Type: application/x-www-form-urlencoded\r\n
//! Content-Length: 27\r\n
//! \r\n
//! userId=jordy&password=1234
//! ```
//!
//! ## Componentes
//!
//! 1. **Request Line**: `METHOD /path?query HTTP/1.1` → [`RequestLine`]
//! 2. **Headers**: Pares `Name: Value` → [`Headers`]
//! 3. **Body**: lo lee la capa de transporte (`server::reader`) usando
//!    [`Request::has_contents`] y [`Request::content_length`], y lo agrega
//!    como parámetros con [`Request::add_parameters`]

use super::{Charset, Headers, HttpError, Parameters, Protocol, RequestCookies, Uri};
use std::fmt;
use std::str::FromStr;

/// Métodos HTTP soportados
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    GET,
    HEAD,
    POST,
    PUT,
    DELETE,
    PATCH,
    OPTIONS,
}

impl Method {
    /// Convierte el método a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::GET => "GET",
            Method::HEAD => "HEAD",
            Method::POST => "POST",
            Method::PUT => "PUT",
            Method::DELETE => "DELETE",
            Method::PATCH => "PATCH",
            Method::OPTIONS => "OPTIONS",
        }
    }
}

impl FromStr for Method {
    type Err = HttpError;

    /// Los métodos distinguen mayúsculas: `get` no es `GET`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "GET" => Ok(Method::GET),
            "HEAD" => Ok(Method::HEAD),
            "POST" => Ok(Method::POST),
            "PUT" => Ok(Method::PUT),
            "DELETE" => Ok(Method::DELETE),
            "PATCH" => Ok(Method::PATCH),
            "OPTIONS" => Ok(Method::OPTIONS),
            _ => Err(HttpError::UnsupportedMethod(s.to_string())),
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Primera línea del request: método, URI y versión
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestLine {
    method: Method,
    uri: Uri,
    protocol: Protocol,
}

impl RequestLine {
    pub fn new(method: Method, uri: Uri, protocol: Protocol) -> Self {
        Self {
            method,
            uri,
            protocol,
        }
    }

    /// Parsea la request line
    ///
    /// Formato: `GET /path?query HTTP/1.1`
    ///
    /// # Ejemplo
    /// ```
    /// use webserver::http::{Method, RequestLine};
    ///
    /// let line = RequestLine::parse("GET /index.html?lang=es HTTP/1.1").unwrap();
    /// assert_eq!(line.method(), Method::GET);
    /// assert_eq!(line.path(), "/index.html");
    /// assert_eq!(line.parameter("lang"), Some("es"));
    /// ```
    pub fn parse(line: &str) -> Result<Self, HttpError> {
        let parts: Vec<&str> = line.split_whitespace().collect();

        // Debe tener exactamente 3 partes: METHOD TARGET VERSION
        let [method, target, protocol] = parts.as_slice() else {
            return Err(HttpError::InvalidRequestLine(line.to_string()));
        };

        let method = method.parse()?;
        let protocol = protocol.parse()?;

        Ok(Self::new(method, Uri::parse(target), protocol))
    }

    pub fn method(&self) -> Method {
        self.method
    }

    pub fn has_method(&self, method: Method) -> bool {
        self.method == method
    }

    pub fn uri(&self) -> &Uri {
        &self.uri
    }

    pub fn path(&self) -> &str {
        self.uri.path()
    }

    pub fn protocol(&self) -> Protocol {
        self.protocol
    }

    pub fn parameter(&self, key: &str) -> Option<&str> {
        self.uri.parameter(key)
    }

    pub fn add_parameters(&mut self, parameters: Parameters) {
        self.uri.add_parameters(parameters);
    }

    pub fn decode_character(&mut self, charset: Charset) {
        self.uri.decode_character(charset);
    }
}

impl fmt::Display for RequestLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.method, self.uri.path(), self.protocol)
    }
}

/// Representa un request HTTP parseado
#[derive(Debug, Clone)]
pub struct Request {
    request_line: RequestLine,
    headers: Headers,
    cookies: RequestCookies,
}

impl Request {
    pub fn new(request_line: RequestLine, headers: Headers) -> Self {
        let cookies = headers.cookies();
        Self {
            request_line,
            headers,
            cookies,
        }
    }

    /// Parsea la cabecera de un request (request line + headers)
    ///
    /// Lo que venga después de la línea vacía se ignora; el body lo maneja
    /// la capa de transporte.
    ///
    /// # Ejemplo
    /// ```
    /// use webserver::http::{Method, Request};
    ///
    /// let request = Request::parse("GET /user/list HTTP/1.1\r\nCookie: logined=true\r\n\r\n").unwrap();
    /// assert!(request.has_method(Method::GET));
    /// assert!(request.has_path("/user/list"));
    /// assert_eq!(request.cookie("logined"), Some("true"));
    /// ```
    pub fn parse(head: &str) -> Result<Self, HttpError> {
        if head.trim().is_empty() {
            return Err(HttpError::EmptyRequest);
        }

        let mut lines = head.split("\r\n");
        let request_line = RequestLine::parse(lines.next().unwrap_or_default())?;
        let headers = Headers::from_lines(lines.take_while(|line| !line.is_empty()))?;

        Ok(Self::new(request_line, headers))
    }

    pub fn request_line(&self) -> &RequestLine {
        &self.request_line
    }

    pub fn method(&self) -> Method {
        self.request_line.method()
    }

    pub fn has_method(&self, method: Method) -> bool {
        self.request_line.has_method(method)
    }

    pub fn path(&self) -> &str {
        self.request_line.path()
    }

    /// Comparación exacta del path
    pub fn has_path(&self, path: &str) -> bool {
        self.path() == path
    }

    pub fn protocol(&self) -> Protocol {
        self.request_line.protocol()
    }

    /// Primer valor del parámetro `key` (query o body)
    pub fn parameter(&self, key: &str) -> Option<&str> {
        self.request_line.parameter(key)
    }

    pub fn parameters(&self) -> &Parameters {
        self.request_line.uri().parameters()
    }

    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.value(name)
    }

    pub fn has_content_type(&self, content_type: &str) -> bool {
        self.headers.has_content_type(content_type)
    }

    pub fn cookie(&self, name: &str) -> Option<&str> {
        self.cookies.get(name)
    }

    /// Charset declarado en el Content-Type (UTF-8 si no hay)
    pub fn charset(&self) -> Charset {
        self.headers.charset().unwrap_or_default()
    }

    /// Indica si el request anuncia un body con Content-Length
    pub fn has_contents(&self) -> bool {
        self.headers.contains_content_length()
    }

    pub fn content_length(&self) -> Result<usize, HttpError> {
        self.headers.content_length()
    }

    /// Une parámetros leídos del body a los de la query
    pub fn add_parameters(&mut self, parameters: Parameters) {
        self.request_line.add_parameters(parameters);
    }

    /// Decodifica los parámetros guardados usando `charset`
    pub fn decode_character(&mut self, charset: Charset) {
        self.request_line.decode_character(charset);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_get() {
        let request = Request::parse("GET / HTTP/1.1\r\n\r\n").unwrap();

        assert_eq!(request.method(), Method::GET);
        assert_eq!(request.path(), "/");
        assert_eq!(request.protocol(), Protocol::Http11);
        assert!(request.parameters().is_empty());
    }

    #[test]
    fn test_parse_with_query_params() {
        let request = Request::parse("GET /user/list?page=2&page=3 HTTP/1.0\r\n\r\n").unwrap();

        assert!(request.has_path("/user/list"));
        assert!(!request.has_path("/user/list?page=2"));
        assert_eq!(request.parameter("page"), Some("2"));
        assert_eq!(request.parameters().get_all("page"), ["2", "3"]);
    }

    #[test]
    fn test_parse_with_headers() {
        let raw = "GET / HTTP/1.1\r\nHost: localhost:8080\r\nUser-Agent: test\r\n\r\n";
        let request = Request::parse(raw).unwrap();

        assert_eq!(request.header("Host"), Some("localhost:8080"));
        assert_eq!(request.header("user-agent"), Some("test"));
        assert_eq!(request.header("Accept"), None);
    }

    #[test]
    fn test_parse_ignores_body() {
        let raw = "POST /user/create HTTP/1.1\r\nContent-Length: 3\r\n\r\nabc";
        let request = Request::parse(raw).unwrap();

        assert!(request.has_contents());
        assert_eq!(request.content_length().unwrap(), 3);
    }

    #[test]
    fn test_has_method() {
        let request = Request::parse("POST /user/create HTTP/1.1\r\n\r\n").unwrap();
        assert!(request.has_method(Method::POST));
        assert!(!request.has_method(Method::GET));
    }

    #[test]
    fn test_cookie() {
        let raw = "GET / HTTP/1.1\r\nCookie: logined=true; theme=dark\r\n\r\n";
        let request = Request::parse(raw).unwrap();

        assert_eq!(request.cookie("logined"), Some("true"));
        assert_eq!(request.cookie("missing"), None);
    }

    #[test]
    fn test_no_contents() {
        let request = Request::parse("GET / HTTP/1.1\r\n\r\n").unwrap();
        assert!(!request.has_contents());
    }

    #[test]
    fn test_content_length_invalid() {
        let raw = "POST / HTTP/1.1\r\nContent-Length: ten\r\n\r\n";
        let request = Request::parse(raw).unwrap();
        assert!(matches!(request.content_length(), Err(HttpError::InvalidContentLength(_))));
    }

    #[test]
    fn test_has_content_type() {
        let raw = "POST / HTTP/1.1\r\nContent-Type: application/x-www-form-urlencoded\r\n\r\n";
        let request = Request::parse(raw).unwrap();
        assert!(request.has_content_type("application/x-www-form-urlencoded"));
    }

    #[test]
    fn test_charset_default_and_declared() {
        let plain = Request::parse("GET / HTTP/1.1\r\n\r\n").unwrap();
        assert_eq!(plain.charset(), Charset::Utf8);

        let raw = "POST / HTTP/1.1\r\nContent-Type: text/plain; charset=ISO-8859-1\r\n\r\n";
        let latin = Request::parse(raw).unwrap();
        assert_eq!(latin.charset(), Charset::Iso8859_1);
    }

    #[test]
    fn test_add_parameters_and_decode() {
        let mut request = Request::parse("POST /user/create?from=%2Fhome HTTP/1.1\r\n\r\n").unwrap();
        request.add_parameters(Parameters::parse("name=%EC%A1%B0%EB%94%94&from=body"));
        request.decode_character(Charset::Utf8);

        assert_eq!(request.parameter("name"), Some("조디"));
        assert_eq!(request.parameters().get_all("from"), ["/home", "body"]);
    }

    #[test]
    fn test_invalid_method() {
        let result = Request::parse("BREW /pot HTTP/1.1\r\n\r\n");
        assert!(matches!(result, Err(HttpError::UnsupportedMethod(m)) if m == "BREW"));
    }

    #[test]
    fn test_invalid_version() {
        let result = Request::parse("GET / HTTP/2.0\r\n\r\n");
        assert!(matches!(result, Err(HttpError::UnsupportedProtocol(_))));
    }

    #[test]
    fn test_empty_request() {
        assert!(matches!(Request::parse(""), Err(HttpError::EmptyRequest)));
    }

    #[test]
    fn test_invalid_request_line() {
        let result = Request::parse("GET\r\n\r\n");
        assert!(matches!(result, Err(HttpError::InvalidRequestLine(_))));

        let result = Request::parse("GET / HTTP/1.1 extra\r\n\r\n");
        assert!(matches!(result, Err(HttpError::InvalidRequestLine(_))));
    }

    #[test]
    fn test_invalid_header() {
        let result = Request::parse("GET / HTTP/1.1\r\nbroken header\r\n\r\n");
        assert!(matches!(result, Err(HttpError::InvalidHeader(_))));
    }

    #[test]
    fn test_request_line_display() {
        let line = RequestLine::parse("POST /user/create?x=1 HTTP/1.0").unwrap();
        assert_eq!(line.to_string(), "POST /user/create HTTP/1.0");
    }

    #[test]
    fn test_method_round_trip_names() {
        for name in ["GET", "HEAD", "POST", "PUT", "DELETE", "PATCH", "OPTIONS"] {
            assert_eq!(name.parse::<Method>().unwrap().as_str(), name);
        }
        assert!("get".parse::<Method>().is_err());
    }
}
