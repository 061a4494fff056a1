#![allow(dead_code)]

use std::path::Path;

use tokio::io::{AsyncRead, AsyncReadExt};

/// One response read off the wire: raw head text and exact body bytes.
#[derive(Debug)]
pub struct RawResponse {
    pub head: String,
    pub body: Vec<u8>,
}

impl RawResponse {
    pub fn status_line(&self) -> &str {
        self.head.lines().next().unwrap_or("")
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.head.lines().skip(1).find_map(|line| {
            let (k, v) = line.split_once(':')?;
            k.trim().eq_ignore_ascii_case(name).then(|| v.trim())
        })
    }

    pub fn content_length(&self) -> Option<usize> {
        self.header("Content-Length").and_then(|v| v.parse().ok())
    }
}

/// Reads one response. With a Content-Length the body is read exactly;
/// without one it runs to end of stream.
pub async fn read_response<R: AsyncRead + Unpin>(stream: &mut R) -> RawResponse {
    let mut buf = Vec::new();
    let mut byte = [0u8; 1];

    while !buf.ends_with(b"\r\n\r\n") {
        let n = stream.read(&mut byte).await.unwrap();
        assert!(n > 0, "stream closed inside response head: {:?}", String::from_utf8_lossy(&buf));
        buf.push(byte[0]);
    }

    let head = String::from_utf8(buf).unwrap();
    let mut response = RawResponse {
        head,
        body: Vec::new(),
    };

    match response.content_length() {
        Some(len) => {
            let mut body = vec![0u8; len];
            stream.read_exact(&mut body).await.unwrap();
            response.body = body;
        }
        None => {
            stream.read_to_end(&mut response.body).await.unwrap();
        }
    }

    response
}

pub fn write_file(dir: &Path, name: &str, contents: &[u8]) {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(path, contents).unwrap();
}
