use serde::Serialize;
use serde_json::Value;

pub const CONTENT_TYPE_JSON: &str = "application/json;charset=UTF-8";
pub const CONTENT_TYPE_TEXT: &str = "text/plain;charset=UTF-8";

#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    Text(String),
    Json(Value),
}

/// Handler output, converted into a `worker::Response` at the edge
#[derive(Debug, Clone, PartialEq)]
pub struct RelayResponse {
    pub status: u16,
    pub body: ResponseBody,
    pub headers: Vec<(String, String)>,
}

impl RelayResponse {
    pub fn text(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: ResponseBody::Text(body.into()),
            headers: vec![("content-type".to_string(), CONTENT_TYPE_TEXT.to_string())],
        }
    }

    pub fn json<T: Serialize>(status: u16, body: &T) -> Self {
        let value = serde_json::to_value(body).unwrap_or(Value::Null);
        Self {
            status,
            body: ResponseBody::Json(value),
            headers: vec![("content-type".to_string(), CONTENT_TYPE_JSON.to_string())],
        }
    }

    pub fn ok_text(body: impl Into<String>) -> Self {
        Self::text(200, body)
    }

    pub fn not_found() -> Self {
        Self::text(404, "Not Found")
    }

    /// Bare `error` body used by the device endpoints
    pub fn internal_error() -> Self {
        Self::text(500, "error")
    }

    pub fn with_header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers.push((name.to_ascii_lowercase(), value.into()));
        self
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        let name = name.to_ascii_lowercase();
        self.headers
            .iter()
            .find(|(k, _)| *k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn body_text(&self) -> String {
        match &self.body {
            ResponseBody::Text(text) => text.clone(),
            ResponseBody::Json(value) => value.to_string(),
        }
    }

    pub fn body_json(&self) -> Option<&Value> {
        match &self.body {
            ResponseBody::Json(value) => Some(value),
            ResponseBody::Text(_) => None,
        }
    }

    pub fn into_worker_response(self) -> worker::Result<worker::Response> {
        let mut response = worker::Response::ok(self.body_text())?.with_status(self.status);
        let headers = response.headers_mut();
        for (name, value) in &self.headers {
            headers.set(name, value)?;
        }
        Ok(response)
    }
}
