//! # Cookies
//! src/http/cookie.rs
//!
//! Dos direcciones distintas:
//!
//! - **Entrantes**: el header `Cookie: a=1; b=2` del request se parsea en
//!   un mapa nombre → valor ([`RequestCookies`]).
//! - **Salientes**: cada [`Cookie`] agregada a una respuesta se serializa en
//!   su propia línea `Set-Cookie`, con los atributos en orden fijo:
//!
//! ```text
//! Set-Cookie: logined=true; Path=/; Max-Age=300; Expires=Fri, 14 Jul 2017 02:40:00 GMT; Domain=localhost; SameSite=Strict; Secure
//! ```

use indexmap::IndexMap;
use std::fmt;
use std::time::SystemTime;

/// Valor del atributo SameSite
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SameSite {
    Strict,
    Lax,
    None,
}

impl SameSite {
    pub fn as_str(&self) -> &'static str {
        match self {
            SameSite::Strict => "Strict",
            SameSite::Lax => "Lax",
            SameSite::None => "None",
        }
    }
}

/// Cookie saliente con sus atributos opcionales
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cookie {
    name: String,
    value: String,
    domain: Option<String>,
    path: Option<String>,
    same_site: Option<SameSite>,
    max_age: Option<i64>,
    expires: Option<SystemTime>,
    secure: bool,
}

impl Cookie {
    /// Cookie con solo nombre y valor
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            domain: None,
            path: None,
            same_site: None,
            max_age: None,
            expires: None,
            secure: false,
        }
    }

    /// Empieza a construir una cookie con atributos
    ///
    /// # Ejemplo
    /// ```
    /// use webserver::http::{Cookie, SameSite};
    ///
    /// let cookie = Cookie::builder("logined", "true")
    ///     .path("/")
    ///     .same_site(SameSite::Lax)
    ///     .build();
    ///
    /// assert_eq!(cookie.to_string(), "logined=true; Path=/; SameSite=Lax");
    /// ```
    pub fn builder(name: impl Into<String>, value: impl Into<String>) -> CookieBuilder {
        CookieBuilder {
            cookie: Self::new(name, value),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &str {
        &self.value
    }
}

impl fmt::Display for Cookie {
    /// Formato del valor de `Set-Cookie`; los atributos ausentes se omiten
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.name, self.value)?;

        if let Some(path) = &self.path {
            write!(f, "; Path={}", path)?;
        }
        if let Some(max_age) = self.max_age {
            write!(f, "; Max-Age={}", max_age)?;
        }
        if let Some(expires) = self.expires {
            write!(f, "; Expires={}", httpdate::fmt_http_date(expires))?;
        }
        if let Some(domain) = &self.domain {
            write!(f, "; Domain={}", domain)?;
        }
        if let Some(same_site) = self.same_site {
            write!(f, "; SameSite={}", same_site.as_str())?;
        }
        if self.secure {
            f.write_str("; Secure")?;
        }

        Ok(())
    }
}

/// Builder de [`Cookie`]
#[derive(Debug, Clone)]
pub struct CookieBuilder {
    cookie: Cookie,
}

impl CookieBuilder {
    pub fn domain(mut self, domain: impl Into<String>) -> Self {
        self.cookie.domain = Some(domain.into());
        self
    }

    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.cookie.path = Some(path.into());
        self
    }

    pub fn same_site(mut self, same_site: SameSite) -> Self {
        self.cookie.same_site = Some(same_site);
        self
    }

    /// Max-Age en segundos (0 o negativo expira la cookie)
    pub fn max_age(mut self, seconds: i64) -> Self {
        self.cookie.max_age = Some(seconds);
        self
    }

    pub fn expires(mut self, expires: SystemTime) -> Self {
        self.cookie.expires = Some(expires);
        self
    }

    pub fn secure(mut self, secure: bool) -> Self {
        self.cookie.secure = secure;
        self
    }

    pub fn build(self) -> Cookie {
        self.cookie
    }
}

/// Cookies que una respuesta va a enviar
///
/// Se indexan por nombre: agregar otra cookie con el mismo nombre reemplaza
/// la anterior manteniendo su posición.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cookies {
    cookies: IndexMap<String, Cookie>,
}

impl Cookies {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, cookie: Cookie) {
        self.cookies.insert(cookie.name.clone(), cookie);
    }

    pub fn get(&self, name: &str) -> Option<&Cookie> {
        self.cookies.get(name)
    }

    pub fn len(&self) -> usize {
        self.cookies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cookies.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Cookie> {
        self.cookies.values()
    }

    /// Un valor de `Set-Cookie` por cookie, en orden de inserción
    pub fn set_cookie_values(&self) -> Vec<String> {
        self.iter().map(|cookie| cookie.to_string()).collect()
    }
}

/// Cookies recibidas en el header `Cookie` de un request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestCookies {
    values: IndexMap<String, String>,
}

impl RequestCookies {
    /// Parsea el valor del header `Cookie`
    ///
    /// Cada segmento separado por `;` se divide en el primer `=`. Un segmento
    /// sin `=` queda como cookie con valor vacío.
    pub fn parse(header: &str) -> Self {
        let mut values = IndexMap::new();

        for segment in header.split(';') {
            let segment = segment.trim();
            if segment.is_empty() {
                continue;
            }

            let (name, value) = segment.split_once('=').unwrap_or((segment, ""));
            values.insert(name.trim().to_string(), value.trim().to_string());
        }

        Self { values }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(|value| value.as_str())
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, UNIX_EPOCH};

    #[test]
    fn test_full_cookie_serialization() {
        let cookie = Cookie::builder("logined", "true")
            .domain("localhost")
            .path("/path")
            .same_site(SameSite::Strict)
            .max_age(300)
            .expires(UNIX_EPOCH + Duration::from_secs(1_500_000_000))
            .secure(true)
            .build();

        assert_eq!(
            cookie.to_string(),
            "logined=true; Path=/path; Max-Age=300; Expires=Fri, 14 Jul 2017 02:40:00 GMT; Domain=localhost; SameSite=Strict; Secure"
        );
    }

    #[test]
    fn test_minimal_cookie() {
        assert_eq!(Cookie::new("a", "1").to_string(), "a=1");
    }

    #[test]
    fn test_secure_false_is_omitted() {
        let cookie = Cookie::builder("a", "1").secure(false).domain("x").build();
        assert_eq!(cookie.to_string(), "a=1; Domain=x");
    }

    #[test]
    fn test_attribute_order_is_fixed() {
        let cookie = Cookie::builder("a", "1")
            .secure(true)
            .domain("d")
            .max_age(0)
            .path("/")
            .build();
        assert_eq!(cookie.to_string(), "a=1; Path=/; Max-Age=0; Domain=d; Secure");
    }

    #[test]
    fn test_cookies_last_added_wins() {
        let mut cookies = Cookies::new();
        cookies.add(Cookie::new("logined", "false"));
        cookies.add(Cookie::new("theme", "dark"));
        cookies.add(Cookie::new("logined", "true"));

        assert_eq!(cookies.len(), 2);
        assert_eq!(cookies.get("logined").map(Cookie::value), Some("true"));
        assert_eq!(cookies.set_cookie_values(), vec!["logined=true", "theme=dark"]);
    }

    #[test]
    fn test_parse_request_cookies() {
        let cookies = RequestCookies::parse("logined=true; JSESSIONID=abc=def");
        assert_eq!(cookies.get("logined"), Some("true"));
        assert_eq!(cookies.get("JSESSIONID"), Some("abc=def"));
        assert_eq!(cookies.get("missing"), None);
    }

    #[test]
    fn test_parse_request_cookies_lenient() {
        let cookies = RequestCookies::parse("a=1;b=2;; flag");
        assert_eq!(cookies.len(), 3);
        assert_eq!(cookies.get("b"), Some("2"));
        assert_eq!(cookies.get("flag"), Some(""));
    }

    #[test]
    fn test_parse_empty_header() {
        assert!(RequestCookies::parse("").is_empty());
    }
}
