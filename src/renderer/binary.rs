use crate::constants::BINARY_SNIFF_LEN;

/// Returns true when `bytes` should be copied verbatim instead of rendered.
///
/// Content is binary when a NUL byte appears in the first
/// `BINARY_SNIFF_LEN` bytes, or when it is not valid UTF-8.
pub fn is_binary(bytes: &[u8]) -> bool {
    let head = &bytes[..bytes.len().min(BINARY_SNIFF_LEN)];
    head.contains(&0) || std::str::from_utf8(bytes).is_err()
}
