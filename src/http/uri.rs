//! # URI y parámetros
//! src/http/uri.rs
//!
//! Separa el request target en path y query string, y modela los
//! parámetros multi-valor que llegan por query o por un formulario
//! `application/x-www-form-urlencoded`.
//!
//! ```text
//! /user/create?userId=jordy&hobby=a&hobby=b
//! └────┬─────┘ └────────────┬─────────────┘
//!     path            parameters
//! ```
//!
//! Los valores se guardan tal cual llegaron (con escapes `%XX`). La
//! decodificación se aplica una sola vez con [`Parameters::decode`], cuando
//! los headers ya indicaron el charset.

use super::Charset;
use indexmap::IndexMap;
use percent_encoding::percent_decode_str;

/// Parámetros multi-valor: cada key mapea a una lista de valores
///
/// Las keys conservan el orden de inserción y los valores el orden en que
/// aparecieron.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Parameters {
    values: IndexMap<String, Vec<String>>,
}

impl Parameters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parsea una query string (o un body de formulario)
    ///
    /// - Cada segmento `key=value` separado por `&` agrega un valor
    /// - Un segmento sin `=` o con valor vacío agrega `""`
    /// - Los segmentos vacíos (`a=1&&b=2`) no agregan ninguna key
    /// - Las keys repetidas acumulan valores
    ///
    /// # Ejemplo
    /// ```
    /// use webserver::http::Parameters;
    ///
    /// let params = Parameters::parse("a=1&a=2&debug");
    /// assert_eq!(params.get("a"), Some("1"));
    /// assert_eq!(params.get_all("a"), ["1", "2"]);
    /// assert_eq!(params.get("debug"), Some(""));
    /// ```
    pub fn parse(query: &str) -> Self {
        let mut params = Self::new();

        for pair in query.split('&') {
            if pair.is_empty() {
                continue;
            }

            match pair.split_once('=') {
                Some((key, value)) => params.push(key, value),
                None => params.push(pair, ""),
            }
        }

        params
    }

    /// Agrega un valor al final de la lista de `key`
    pub fn push(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.entry(key.into()).or_default().push(value.into());
    }

    /// Registra `key` con una lista de valores completa (que puede ser vacía)
    pub fn insert(&mut self, key: impl Into<String>, values: Vec<String>) {
        self.values.insert(key.into(), values);
    }

    /// Primer valor de `key`
    ///
    /// Retorna `None` tanto si la key no existe como si su lista está vacía.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values
            .get(key)
            .and_then(|values| values.first())
            .map(|value| value.as_str())
    }

    /// Todos los valores de `key` (vacío si no existe)
    pub fn get_all(&self, key: &str) -> &[String] {
        self.values.get(key).map(|values| values.as_slice()).unwrap_or(&[])
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Une otros parámetros a estos: primero los valores existentes,
    /// después los agregados
    pub fn add(&mut self, other: Parameters) {
        for (key, values) in other.values {
            self.values.entry(key).or_default().extend(values);
        }
    }

    /// Decodifica keys y valores (`%XX` y `+`) usando `charset`
    ///
    /// Si dos keys quedan iguales tras decodificar, sus valores se unen en
    /// el orden en que estaban.
    pub fn decode(&mut self, charset: Charset) {
        let raw = std::mem::take(&mut self.values);

        for (key, values) in raw {
            let decoded: Vec<String> = values
                .iter()
                .map(|value| decode_component(value, charset))
                .collect();
            self.values
                .entry(decode_component(&key, charset))
                .or_default()
                .extend(decoded);
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.values.iter().map(|(key, values)| (key.as_str(), values.as_slice()))
    }
}

/// Decodifica un componente de query/form: `+` es espacio y `%XX` un byte
fn decode_component(raw: &str, charset: Charset) -> String {
    let spaced = raw.replace('+', " ");
    let bytes: Vec<u8> = percent_decode_str(&spaced).collect();
    charset.decode(&bytes)
}

/// Request target parseado: path sin query + parámetros
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Uri {
    path: String,
    parameters: Parameters,
}

impl Uri {
    /// URI sin parámetros
    pub fn new(path: impl Into<String>) -> Self {
        Self::with_parameters(path, Parameters::new())
    }

    pub fn with_parameters(path: impl Into<String>, parameters: Parameters) -> Self {
        Self {
            path: path.into(),
            parameters,
        }
    }

    /// Parsea un request target separando en el primer `?`
    ///
    /// # Ejemplo
    /// ```
    /// use webserver::http::Uri;
    ///
    /// let uri = Uri::parse("/hello?name=jordy");
    /// assert_eq!(uri.path(), "/hello");
    /// assert_eq!(uri.parameter("name"), Some("jordy"));
    /// ```
    pub fn parse(target: &str) -> Self {
        match target.split_once('?') {
            Some((path, query)) => Self::with_parameters(path, Parameters::parse(query)),
            None => Self::new(target),
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    pub fn parameter(&self, key: &str) -> Option<&str> {
        self.parameters.get(key)
    }

    pub fn add_parameters(&mut self, parameters: Parameters) {
        self.parameters.add(parameters);
    }

    pub fn decode_character(&mut self, charset: Charset) {
        self.parameters.decode(charset);
    }
}

impl From<&str> for Uri {
    fn from(target: &str) -> Self {
        Self::parse(target)
    }
}
