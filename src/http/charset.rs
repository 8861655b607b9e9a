//! # Juegos de caracteres
//! src/http/charset.rs
//!
//! Los parámetros de query y de formularios llegan como bytes escapados
//! con `%XX`. El juego de caracteres que indica el header `Content-Type`
//! determina cómo se interpretan esos bytes una vez decodificados.

use std::fmt;

/// Juegos de caracteres que el servidor sabe decodificar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Charset {
    #[default]
    Utf8,

    /// Latin-1: cada byte es directamente un code point
    Iso8859_1,

    /// Bytes fuera de 0..128 se reemplazan por U+FFFD
    UsAscii,
}

impl Charset {
    /// Busca un charset por su etiqueta (sin distinguir mayúsculas)
    ///
    /// # Ejemplo
    /// ```
    /// use webserver::http::Charset;
    ///
    /// assert_eq!(Charset::from_label("UTF-8"), Some(Charset::Utf8));
    /// assert_eq!(Charset::from_label("latin1"), Some(Charset::Iso8859_1));
    /// assert_eq!(Charset::from_label("klingon"), None);
    /// ```
    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim().trim_matches('"').to_ascii_lowercase();
        match label.as_str() {
            "utf-8" | "utf8" => Some(Charset::Utf8),
            "iso-8859-1" | "iso8859-1" | "latin1" | "l1" => Some(Charset::Iso8859_1),
            "us-ascii" | "ascii" => Some(Charset::UsAscii),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Charset::Utf8 => "UTF-8",
            Charset::Iso8859_1 => "ISO-8859-1",
            Charset::UsAscii => "US-ASCII",
        }
    }

    /// Interpreta bytes crudos según este charset
    pub fn decode(&self, bytes: &[u8]) -> String {
        match self {
            Charset::Utf8 => String::from_utf8_lossy(bytes).into_owned(),
            Charset::Iso8859_1 => bytes.iter().map(|&b| b as char).collect(),
            Charset::UsAscii => bytes
                .iter()
                .map(|&b| if b.is_ascii() { b as char } else { char::REPLACEMENT_CHARACTER })
                .collect(),
        }
    }
}

impl fmt::Display for Charset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_utf8() {
        let bytes = "밸류".as_bytes();
        assert_eq!(Charset::Utf8.decode(bytes), "밸류");
    }

    #[test]
    fn test_decode_latin1() {
        assert_eq!(Charset::Iso8859_1.decode(&[0x63, 0x61, 0x66, 0xE9]), "café");
    }

    #[test]
    fn test_decode_ascii_replaces_high_bytes() {
        assert_eq!(Charset::UsAscii.decode(&[0x61, 0xE9]), "a\u{FFFD}");
    }

    #[test]
    fn test_from_label_quoted() {
        assert_eq!(Charset::from_label("\"utf-8\""), Some(Charset::Utf8));
    }
}
