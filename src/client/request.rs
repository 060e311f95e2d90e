use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use reqwest::Method;
use serde::Serialize;
use uuid::Uuid;

/// One field of a `multipart/form-data` body.
#[derive(Debug, Clone)]
pub enum FormPart {
    Text {
        name: String,
        value: String,
    },
    File {
        name: String,
        filename: String,
        content_type: String,
        bytes: Vec<u8>,
    },
}

impl FormPart {
    pub fn text(name: impl Into<String>, value: impl Into<String>) -> Self {
        FormPart::Text {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Method, headers and body of a request routed through `AuthClient`.
///
/// The body is kept as bytes so the same request can be sent a second time
/// after a token refresh.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    pub method: Method,
    pub headers: HeaderMap,
    pub body: Option<Vec<u8>>,
}

impl RequestOptions {
    pub fn new(method: Method) -> Self {
        RequestOptions {
            method,
            ..Default::default()
        }
    }

    pub fn get() -> Self {
        Self::new(Method::GET)
    }

    pub fn post() -> Self {
        Self::new(Method::POST)
    }

    pub fn put() -> Self {
        Self::new(Method::PUT)
    }

    pub fn patch() -> Self {
        Self::new(Method::PATCH)
    }

    pub fn delete() -> Self {
        Self::new(Method::DELETE)
    }

    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    pub fn body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Serializes `value` as the body and sets `Content-Type: application/json`.
    pub fn json<T: Serialize + ?Sized>(self, value: &T) -> Result<Self, serde_json::Error> {
        let body = serde_json::to_vec(value)?;
        Ok(self
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
            .body(body))
    }
}

impl RequestOptions {
    /// Encodes `parts` as a `multipart/form-data` body. The body is kept as
    /// bytes like any other, so a retry after a refresh resends it unchanged.
    pub fn multipart(self, parts: &[FormPart]) -> Self {
        let boundary = format!("zerowaste-{}", Uuid::new_v4().simple());
        let mut body = Vec::new();
        for part in parts {
            body.extend_from_slice(format!("--{}\r\n", boundary).as_bytes());
            match part {
                FormPart::Text { name, value } => {
                    body.extend_from_slice(
                        format!("Content-Disposition: form-data; name=\"{}\"\r\n\r\n", name)
                            .as_bytes(),
                    );
                    body.extend_from_slice(value.as_bytes());
                }
                FormPart::File {
                    name,
                    filename,
                    content_type,
                    bytes,
                } => {
                    body.extend_from_slice(
                        format!(
                            "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: {}\r\n\r\n",
                            name, filename, content_type
                        )
                        .as_bytes(),
                    );
                    body.extend_from_slice(bytes);
                }
            }
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{}--\r\n", boundary).as_bytes());

        let content_type = format!("multipart/form-data; boundary={}", boundary);
        match HeaderValue::from_str(&content_type) {
            Ok(value) => self.header(CONTENT_TYPE, value).body(body),
            // The boundary is plain ASCII, so this arm is never taken.
            Err(_) => self.body(body),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_sets_body_and_content_type() {
        let options = RequestOptions::post()
            .json(&serde_json::json!({"quantity": 2}))
            .unwrap();

        assert_eq!(options.method, Method::POST);
        assert_eq!(options.headers[CONTENT_TYPE], "application/json");
        assert_eq!(options.body.as_deref(), Some(br#"{"quantity":2}"#.as_slice()));
    }

    #[test]
    fn test_default_is_get_without_body() {
        let options = RequestOptions::default();
        assert_eq!(options.method, Method::GET);
        assert!(options.headers.is_empty());
        assert!(options.body.is_none());
    }

    #[test]
    fn test_multipart_layout() {
        let options = RequestOptions::post().multipart(&[
            FormPart::text("title", "Beach cleanup"),
            FormPart::File {
                name: "image".to_string(),
                filename: "beach.png".to_string(),
                content_type: "image/png".to_string(),
                bytes: b"PNG".to_vec(),
            },
        ]);

        let content_type = options.headers[CONTENT_TYPE].to_str().unwrap().to_string();
        let boundary = content_type
            .strip_prefix("multipart/form-data; boundary=")
            .expect("multipart content type");
        let body = String::from_utf8(options.body.unwrap()).unwrap();

        assert_eq!(
            body,
            format!(
                "--{b}\r\nContent-Disposition: form-data; name=\"title\"\r\n\r\nBeach cleanup\r\n\
                 --{b}\r\nContent-Disposition: form-data; name=\"image\"; filename=\"beach.png\"\r\n\
                 Content-Type: image/png\r\n\r\nPNG\r\n--{b}--\r\n",
                b = boundary
            )
        );
    }
}
