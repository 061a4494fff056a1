//! Content-type lookup by file extension.

pub const DEFAULT_MIME_TYPE: &str = "application/octet-stream";

const MIME_TYPES: &[(&str, &str)] = &[
    (".html", "text/html"),
    (".jpg", "image/jpeg"),
    (".jpeg", "image/jpeg"),
    (".png", "image/png"),
    (".css", "text/css"),
    (".js", "application/javascript"),
];

/// Maps everything from the last `.` of `filename` onward to a content type.
///
/// Matching is exact and case-sensitive: `.HTML` is not `.html`. Names with
/// no dot, or an unknown extension, get `application/octet-stream`.
pub fn mime_type(filename: &str) -> &'static str {
    let Some(dot) = filename.rfind('.') else {
        return DEFAULT_MIME_TYPE;
    };
    let ext = &filename[dot..];

    MIME_TYPES
        .iter()
        .find(|(known, _)| *known == ext)
        .map(|(_, mime)| *mime)
        .unwrap_or(DEFAULT_MIME_TYPE)
}
