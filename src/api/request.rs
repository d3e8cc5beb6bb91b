use super::error::map_serialization_error;
use super::ClientError;
use indexmap::IndexMap;
use serde_json::Value;

pub const CONTENT_ENCODING: &str = "Content-Encoding";
pub const CONTENT_TYPE: &str = "Content-Type";
pub const ACCEPT: &str = "Accept";

pub const JSON_DATA: &str = "application/json";
pub const FORM_URLENCODE_DATA: &str = "application/x-www-form-urlencoded";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BodyFormat {
    #[default]
    FormUrlEncoded,
    RawJson,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Charset {
    #[default]
    Utf8,
    Gbk,
}

impl Charset {
    pub fn as_str(&self) -> &'static str {
        match self {
            Charset::Utf8 => "UTF-8",
            Charset::Gbk => "GBK",
        }
    }

    /// Matches a charset label such as `GBK` or `utf-8`, ignoring case.
    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim().trim_matches('"');
        if label.eq_ignore_ascii_case("gbk") || label.eq_ignore_ascii_case("gb2312") {
            Some(Charset::Gbk)
        } else if label.eq_ignore_ascii_case("utf-8") || label.eq_ignore_ascii_case("utf8") {
            Some(Charset::Utf8)
        } else {
            None
        }
    }

    pub fn encode(&self, text: &str) -> Vec<u8> {
        match self {
            Charset::Utf8 => text.as_bytes().to_vec(),
            Charset::Gbk => {
                let (bytes, _, had_errors) = encoding_rs::GBK.encode(text);
                if had_errors {
                    crate::warn!("text contains characters GBK cannot represent");
                }
                bytes.into_owned()
            }
        }
    }

    pub fn decode(&self, bytes: &[u8]) -> String {
        match self {
            Charset::Utf8 => String::from_utf8_lossy(bytes).into_owned(),
            Charset::Gbk => encoding_rs::GBK.decode(bytes).0.into_owned(),
        }
    }
}

/// Accumulates everything a single API call sends: body fields, headers, query
/// params and the target path. Built fresh for every call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AipRequest {
    pub body: IndexMap<String, Value>,
    pub headers: IndexMap<String, String>,
    pub params: IndexMap<String, String>,
    pub uri: String,
    pub body_format: BodyFormat,
}

impl AipRequest {
    pub fn new() -> Self {
        Default::default()
    }

    /// Inserts a field. Overwriting an existing key keeps its position.
    pub fn add_body<K: Into<String>, V: Into<Value>>(&mut self, key: K, value: V) -> &mut Self {
        self.body.insert(key.into(), value.into());
        self
    }

    pub fn add_body_map<'a, I>(&mut self, map: I) -> &mut Self
    where
        I: IntoIterator<Item = (&'a String, &'a Value)>,
    {
        for (key, value) in map {
            self.body.insert(key.clone(), value.clone());
        }
        self
    }

    pub fn add_header<K: Into<String>, V: Into<String>>(&mut self, name: K, value: V) -> &mut Self {
        let name = name.into();
        // Header names are case-insensitive on the wire
        if let Some(existing) = self
            .headers
            .keys()
            .find(|k| k.eq_ignore_ascii_case(&name))
            .cloned()
        {
            self.headers.insert(existing, value.into());
        } else {
            self.headers.insert(name, value.into());
        }
        self
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn add_param<K: Into<String>, V: Into<String>>(&mut self, name: K, value: V) -> &mut Self {
        self.params.insert(name.into(), value.into());
        self
    }

    pub fn set_uri<S: Into<String>>(&mut self, uri: S) -> &mut Self {
        self.uri = uri.into();
        self
    }

    pub fn set_body_format(&mut self, body_format: BodyFormat) -> &mut Self {
        self.body_format = body_format;
        self
    }

    /// Charset declared through the `Content-Encoding` header, UTF-8 when absent.
    pub fn content_encoding(&self) -> Charset {
        self.header(CONTENT_ENCODING)
            .and_then(Charset::from_label)
            .unwrap_or_default()
    }

    pub fn body_str(&self) -> Result<String, ClientError> {
        match self.body_format {
            BodyFormat::RawJson => serde_json::to_string(&self.body).map_err(map_serialization_error),
            BodyFormat::FormUrlEncoded => {
                let mut serializer = url::form_urlencoded::Serializer::new(String::new());
                for (key, value) in &self.body {
                    match value {
                        Value::String(s) => serializer.append_pair(key, s),
                        other => serializer.append_pair(key, &other.to_string()),
                    };
                }
                Ok(serializer.finish())
            }
        }
    }

    /// The rendered body, encoded in the declared charset.
    pub fn body_bytes(&self) -> Result<Vec<u8>, ClientError> {
        let body = self.body_str()?;
        crate::trace!("Serialized request to {}: {}", self.uri, body);
        Ok(self.content_encoding().encode(&body))
    }
}
