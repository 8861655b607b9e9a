//! # Lectura de Requests
//! src/server/reader.rs
//!
//! Lee un request completo desde un stream:
//!
//! 1. Request line
//! 2. Headers hasta la línea vacía
//! 3. Body de exactamente `Content-Length` bytes (si el header existe)
//! 4. Si el body es un formulario urlencoded, sus campos se unen a los
//!    parámetros de la query
//! 5. Decodificación de parámetros con el charset del Content-Type

use crate::http::{ContentType, Headers, HttpError, Parameters, Request, RequestLine};
use percent_encoding::{percent_encode, CONTROLS};
use std::io::{BufRead, Read};

/// Máximo de líneas de header aceptadas
const MAX_HEADERS: usize = 100;

/// Largo máximo de la request line o de una línea de header (con `\r\n`)
const MAX_LINE_BYTES: usize = 8192;

/// Lee y parsea un request desde `reader`
///
/// # Errores
///
/// - `EmptyRequest` si la conexión se cierra antes de la request line
/// - `InvalidRequestLine`/`InvalidHeader` si una línea supera `MAX_LINE_BYTES`
/// - `InvalidContentLength` si el Content-Length no es numérico
/// - `BodyTooLarge` si el body anunciado supera `max_body`
/// - `IncompleteBody` si el stream termina antes del body completo
pub fn read_request<R: BufRead>(reader: &mut R, max_body: usize) -> Result<Request, HttpError> {
    let request_line = loop {
        match next_line(reader, HttpError::InvalidRequestLine)? {
            None => return Err(HttpError::EmptyRequest),
            // Se toleran líneas vacías antes de la request line
            Some(line) if line.is_empty() => continue,
            Some(line) => break RequestLine::parse(&line)?,
        }
    };

    let mut header_lines = Vec::new();
    while let Some(line) = next_line(reader, HttpError::InvalidHeader)? {
        if line.is_empty() {
            break;
        }
        if header_lines.len() == MAX_HEADERS {
            return Err(HttpError::InvalidHeader(format!("more than {} headers", MAX_HEADERS)));
        }
        header_lines.push(line);
    }

    let headers = Headers::from_lines(header_lines.iter().map(String::as_str))?;
    let mut request = Request::new(request_line, headers);

    if request.has_contents() {
        let body = read_body(reader, request.content_length()?, max_body)?;

        if request.has_content_type(ContentType::FormUrlEncoded.mime()) {
            request.add_parameters(form_parameters(&body));
        }
    }

    let charset = request.charset();
    request.decode_character(charset);

    Ok(request)
}

/// Lee una línea sin el `\r\n` final (`None` en EOF)
fn next_line<R: BufRead>(
    reader: &mut R,
    invalid: fn(String) -> HttpError,
) -> Result<Option<String>, HttpError> {
    let mut buffer = Vec::new();
    let read = (&mut *reader)
        .take(MAX_LINE_BYTES as u64 + 1)
        .read_until(b'\n', &mut buffer)?;

    if read == 0 {
        return Ok(None);
    }
    if read > MAX_LINE_BYTES {
        return Err(invalid(format!("line longer than {} bytes", MAX_LINE_BYTES)));
    }

    while matches!(buffer.last(), Some(b'\n' | b'\r')) {
        buffer.pop();
    }

    String::from_utf8(buffer)
        .map(Some)
        .map_err(|e| invalid(String::from_utf8_lossy(e.as_bytes()).into_owned()))
}

fn read_body<R: BufRead>(reader: &mut R, length: usize, max_body: usize) -> Result<Vec<u8>, HttpError> {
    if length > max_body {
        return Err(HttpError::BodyTooLarge {
            length,
            limit: max_body,
        });
    }

    let mut body = Vec::with_capacity(length);
    (&mut *reader).take(length as u64).read_to_end(&mut body)?;

    if body.len() < length {
        return Err(HttpError::IncompleteBody {
            expected: length,
            read: body.len(),
        });
    }

    Ok(body)
}

/// Parámetros de un body `application/x-www-form-urlencoded`
///
/// Los bytes no ASCII se re-escapan como `%XX` para que la decodificación
/// con el charset del request los trate igual que a los ya escapados.
fn form_parameters(body: &[u8]) -> Parameters {
    let escaped = percent_encode(body, CONTROLS).to_string();
    Parameters::parse(&escaped)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::{Charset, Method};
    use std::io::Cursor;

    fn read(raw: &[u8]) -> Result<Request, HttpError> {
        read_request(&mut Cursor::new(raw.to_vec()), 1024)
    }

    #[test]
    fn test_read_simple_get() {
        let request = read(b"GET /index.html HTTP/1.1\r\nHost: localhost\r\n\r\n").unwrap();

        assert!(request.has_method(Method::GET));
        assert!(request.has_path("/index.html"));
        assert_eq!(request.header("Host"), Some("localhost"));
    }

    #[test]
    fn test_read_query_is_decoded() {
        let request = read(b"GET /search?q=hello%20world&q=a+b HTTP/1.1\r\n\r\n").unwrap();
        assert_eq!(request.parameters().get_all("q"), ["hello world", "a b"]);
    }

    #[test]
    fn test_read_form_body() {
        let raw = b"POST /user/create?source=form HTTP/1.1\r\n\
            Content-Type: application/x-www-form-urlencoded\r\n\
            Content-Length: 39\r\n\
            \r\n\
            userId=jordy&name=%EC%A1%B0%EB%94%94&e=";
        let request = read(raw).unwrap();

        assert_eq!(request.parameter("source"), Some("form"));
        assert_eq!(request.parameter("userId"), Some("jordy"));
        assert_eq!(request.parameter("name"), Some("조디"));
        assert_eq!(request.parameter("e"), Some(""));
    }

    #[test]
    fn test_read_form_body_latin1_raw_bytes() {
        let mut raw = b"POST /f HTTP/1.1\r\n\
            Content-Type: application/x-www-form-urlencoded; charset=ISO-8859-1\r\n\
            Content-Length: 7\r\n\
            \r\n"
            .to_vec();
        raw.extend_from_slice(&[b'c', b'i', b't', b'y', b'=', 0xFC, b'x']);

        let request = read(&raw).unwrap();
        assert_eq!(request.charset(), Charset::Iso8859_1);
        assert_eq!(request.parameter("city"), Some("üx"));
    }

    #[test]
    fn test_non_form_body_is_not_parsed() {
        let raw = b"POST /api HTTP/1.1\r\nContent-Type: application/json\r\nContent-Length: 7\r\n\r\n{\"a\":1}";
        let request = read(raw).unwrap();
        assert!(request.parameters().is_empty());
    }

    #[test]
    fn test_body_is_read_exactly() {
        let raw = b"POST /f HTTP/1.1\r\n\
            Content-Type: application/x-www-form-urlencoded\r\n\
            Content-Length: 3\r\n\
            \r\n\
            a=1&b=2";
        let request = read(raw).unwrap();

        assert_eq!(request.parameter("a"), Some("1"));
        assert_eq!(request.parameter("b"), None);
    }

    #[test]
    fn test_bare_lf_line_endings() {
        let request = read(b"GET / HTTP/1.0\nHost: x\n\n").unwrap();
        assert_eq!(request.header("Host"), Some("x"));
    }

    #[test]
    fn test_leading_empty_lines_are_skipped() {
        let request = read(b"\r\n\r\nGET / HTTP/1.1\r\n\r\n").unwrap();
        assert!(request.has_path("/"));
    }

    #[test]
    fn test_empty_stream() {
        assert!(matches!(read(b""), Err(HttpError::EmptyRequest)));
    }

    #[test]
    fn test_invalid_content_length_is_fatal() {
        let result = read(b"POST / HTTP/1.1\r\nContent-Length: ten\r\n\r\nabc");
        assert!(matches!(result, Err(HttpError::InvalidContentLength(_))));
    }

    #[test]
    fn test_signed_content_length_is_fatal() {
        let result = read(b"POST / HTTP/1.1\r\n\
            Content-Type: application/x-www-form-urlencoded\r\n\
            Content-Length: +3\r\n\
            \r\n\
            a=1");
        assert!(matches!(result, Err(HttpError::InvalidContentLength(v)) if v == "+3"));
    }

    #[test]
    fn test_body_too_large() {
        let result = read(b"POST / HTTP/1.1\r\nContent-Length: 4096\r\n\r\n");
        assert!(matches!(
            result,
            Err(HttpError::BodyTooLarge { length: 4096, limit: 1024 })
        ));
    }

    #[test]
    fn test_incomplete_body() {
        let result = read(b"POST / HTTP/1.1\r\nContent-Length: 10\r\n\r\nabc");
        assert!(matches!(
            result,
            Err(HttpError::IncompleteBody { expected: 10, read: 3 })
        ));
    }

    #[test]
    fn test_invalid_utf8_request_line() {
        let result = read(b"GET /\xFF HTTP/1.1\r\n\r\n");
        assert!(matches!(result, Err(HttpError::InvalidRequestLine(_))));
    }

    #[test]
    fn test_too_many_headers() {
        let mut raw = b"GET / HTTP/1.1\r\n".to_vec();
        for i in 0..=MAX_HEADERS {
            raw.extend_from_slice(format!("X-H{}: v\r\n", i).as_bytes());
        }
        raw.extend_from_slice(b"\r\n");

        assert!(matches!(read(&raw), Err(HttpError::InvalidHeader(_))));
    }

    #[test]
    fn test_line_too_long() {
        let mut raw = b"GET / HTTP/1.1\r\nX-Big: ".to_vec();
        raw.extend(std::iter::repeat(b'a').take(16 * 1024 * 1024));
        raw.extend_from_slice(b"\r\n\r\n");
        assert!(matches!(read(&raw), Err(HttpError::InvalidHeader(_))));

        let mut raw = b"GET /".to_vec();
        raw.extend(std::iter::repeat(b'a').take(MAX_LINE_BYTES));
        raw.extend_from_slice(b" HTTP/1.1\r\n\r\n");
        assert!(matches!(read(&raw), Err(HttpError::InvalidRequestLine(_))));
    }

    #[test]
    fn test_line_at_limit_is_accepted() {
        let prefix = b"X-Fit: ";
        let mut raw = b"GET / HTTP/1.1\r\n".to_vec();
        raw.extend_from_slice(prefix);
        raw.extend(std::iter::repeat(b'a').take(MAX_LINE_BYTES - prefix.len() - 2));
        raw.extend_from_slice(b"\r\n\r\n");

        let request = read(&raw).unwrap();
        assert_eq!(request.header("X-Fit").map(str::len), Some(MAX_LINE_BYTES - prefix.len() - 2));
    }
}
