use crate::http::request::Request;

#[derive(Debug, PartialEq, Eq)]
pub enum ParseError {
    /// No end-of-head marker yet; read more.
    Incomplete,
    /// The head grew past `limit` bytes.
    TooLarge { limit: usize },
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::Incomplete => write!(f, "incomplete request head"),
            ParseError::TooLarge { limit } => {
                write!(f, "request head exceeds {} bytes", limit)
            }
        }
    }
}

impl std::error::Error for ParseError {}

/// Parses one request head out of `buf`.
///
/// Returns the request and the number of bytes it occupied, terminator
/// included. Heads longer than `limit` are rejected rather than truncated.
pub fn parse_request_head(buf: &[u8], limit: usize) -> Result<(Request, usize), ParseError> {
    let Some(head_end) = find_head_end(buf) else {
        if buf.len() > limit {
            return Err(ParseError::TooLarge { limit });
        }
        return Err(ParseError::Incomplete);
    };

    if head_end > limit {
        return Err(ParseError::TooLarge { limit });
    }

    Ok((tokenize(&buf[..head_end]), head_end))
}

/// Parses whatever is buffered once the client has stopped sending, even
/// without an end-of-head marker. Returns `None` if only whitespace is left.
pub fn parse_request_at_eof(buf: &[u8]) -> Option<Request> {
    if buf.iter().all(u8::is_ascii_whitespace) {
        return None;
    }
    Some(tokenize(buf))
}

fn tokenize(head: &[u8]) -> Request {
    let head = String::from_utf8_lossy(head);
    let mut tokens = head.split_whitespace();

    Request {
        method: tokens.next().unwrap_or_default().to_string(),
        target: tokens.next().unwrap_or_default().to_string(),
    }
}

/// Index one past the blank line ending the head. Accepts bare `\n\n`
/// as well as `\r\n\r\n`, whichever comes first.
pub fn find_head_end(buf: &[u8]) -> Option<usize> {
    let crlf = buf
        .windows(4)
        .position(|w| w == b"\r\n\r\n")
        .map(|p| p + 4);
    let lf = buf
        .windows(2)
        .position(|w| w == b"\n\n")
        .map(|p| p + 2);

    match (crlf, lf) {
        (Some(a), Some(b)) => Some(a.min(b)),
        (a, b) => a.or(b),
    }
}
