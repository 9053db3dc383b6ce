//! Percent-encoding for URL path segments.

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};

/// Characters that must be escaped inside a single path segment.
///
/// `CONTROLS` plus the characters that would otherwise terminate or split
/// a segment.
const PATH_SEGMENT_ENCODE_SET: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'<')
    .add(b'>')
    .add(b'`')
    .add(b'#')
    .add(b'?')
    .add(b'{')
    .add(b'}')
    .add(b'/')
    .add(b'%');

/// Encode a value for use as one URL path segment.
///
/// ```
/// use pulsar_client::endpoints::url_encoding::encode_path_segment;
///
/// assert_eq!(encode_path_segment("plain"), "plain");
/// assert_eq!(encode_path_segment("a/b"), "a%2Fb");
/// assert_eq!(encode_path_segment("50%"), "50%25");
/// ```
pub fn encode_path_segment(segment: &str) -> String {
    utf8_percent_encode(segment, PATH_SEGMENT_ENCODE_SET).to_string()
}
