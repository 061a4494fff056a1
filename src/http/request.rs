/// A request as seen by the file server: the first two whitespace-delimited
/// tokens of the request head.
///
/// Nothing else in the head is interpreted. Headers such as
/// `Connection: close` are read off the socket but never inspected.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Request {
    /// Request method token (e.g. "GET"). Not validated.
    pub method: String,
    /// Request target (e.g. "/index.html"). Empty if the head had one token.
    pub target: String,
}

impl Request {
    pub fn new(method: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            target: target.into(),
        }
    }
}
