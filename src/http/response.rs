/// HTTP status codes the file server can send.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCode {
    /// 200 OK
    Ok,
    /// 404 Not Found
    NotFound,
    /// 413 Payload Too Large
    PayloadTooLarge,
}

impl StatusCode {
    /// Returns the numeric HTTP status code.
    ///
    /// # Example
    ///
    /// ```
    /// # use docserve::http::response::StatusCode;
    /// assert_eq!(StatusCode::Ok.as_u16(), 200);
    /// assert_eq!(StatusCode::NotFound.as_u16(), 404);
    /// ```
    pub fn as_u16(&self) -> u16 {
        match self {
            StatusCode::Ok => 200,
            StatusCode::NotFound => 404,
            StatusCode::PayloadTooLarge => 413,
        }
    }

    /// Returns the standard HTTP reason phrase for this status code.
    pub fn reason_phrase(&self) -> &'static str {
        match self {
            StatusCode::Ok => "OK",
            StatusCode::NotFound => "Not Found",
            StatusCode::PayloadTooLarge => "Payload Too Large",
        }
    }
}

pub const NOT_FOUND_BODY: &[u8] = b"<html><body><h1>404 Not Found</h1></body></html>";
pub const TOO_LARGE_BODY: &[u8] = b"<html><body><h1>413 Payload Too Large</h1></body></html>";

/// A response head plus an optional in-memory body.
///
/// File responses carry no body here; their bytes are streamed after the
/// head by [`crate::http::writer::stream_body`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: StatusCode,
    /// Headers in the order they go on the wire.
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

/// Builder for constructing responses in a fluent style.
///
/// # Example
///
/// ```
/// # use docserve::http::response::{ResponseBuilder, StatusCode};
/// let response = ResponseBuilder::new(StatusCode::Ok)
///     .header("Content-Type", "text/css")
///     .build();
/// assert_eq!(response.header("Content-Type"), Some("text/css"));
/// ```
pub struct ResponseBuilder {
    status: StatusCode,
    headers: Vec<(String, String)>,
    body: Vec<u8>,
}

impl ResponseBuilder {
    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: Vec::new(),
        }
    }

    /// Appends a header. Headers are emitted in insertion order.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((key.into(), value.into()));
        self
    }

    pub fn body(mut self, body: Vec<u8>) -> Self {
        self.body = body;
        self
    }

    pub fn build(self) -> Response {
        Response {
            status: self.status,
            headers: self.headers,
            body: self.body,
        }
    }
}

impl Response {
    /// Head of a 200 response for a file of `content_length` bytes.
    /// The connection stays open afterwards.
    pub fn file_ok(mime: &str, content_length: u64) -> Self {
        ResponseBuilder::new(StatusCode::Ok)
            .header("Content-Type", mime)
            .header("Content-Length", content_length.to_string())
            .header("Connection", "keep-alive")
            .build()
    }

    /// The fixed 404 page. Always announces `Connection: close` and carries
    /// no Content-Length; the body is delimited by closing the connection.
    pub fn not_found() -> Self {
        ResponseBuilder::new(StatusCode::NotFound)
            .header("Content-Type", "text/html")
            .header("Connection", "close")
            .body(NOT_FOUND_BODY.to_vec())
            .build()
    }

    /// Sent when a request head exceeds the configured limit.
    pub fn payload_too_large() -> Self {
        ResponseBuilder::new(StatusCode::PayloadTooLarge)
            .header("Content-Type", "text/html")
            .header("Content-Length", TOO_LARGE_BODY.len().to_string())
            .header("Connection", "close")
            .body(TOO_LARGE_BODY.to_vec())
            .build()
    }

    /// First header value named `key`, compared case-insensitively.
    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }
}
