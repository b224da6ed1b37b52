pub mod url_validator;

/// 短码长度限制
pub const MIN_CODE_LENGTH: usize = 3;
pub const MAX_CODE_LENGTH: usize = 12;

pub fn generate_random_code(length: usize) -> String {
    use std::iter;

    // 随机选择字母和数字
    let chars = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

    // 生成指定长度的随机字符串
    iter::repeat_with(|| chars[rand::random_range(0..chars.len())] as char)
        .take(length)
        .collect()
}

/// Validate short code format: 3-12 chars from `[0-9a-zA-Z-_]`.
pub fn is_valid_short_code(code: &str) -> bool {
    if code.len() < MIN_CODE_LENGTH || code.len() > MAX_CODE_LENGTH {
        return false;
    }
    code.bytes()
        .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
}

/// Strip characters outside the short code alphabet.
///
/// Internal utility only. User-supplied custom codes are rejected on
/// format violations, never silently rewritten.
pub fn sanitize_short_code(code: &str) -> String {
    code.chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == '_')
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_random_code_length() {
        for len in [3, 6, 12] {
            let code = generate_random_code(len);
            assert_eq!(code.len(), len);
            assert!(code.bytes().all(|b| b.is_ascii_alphanumeric()));
        }
    }

    #[test]
    fn test_generated_codes_pass_validation() {
        for _ in 0..100 {
            assert!(is_valid_short_code(&generate_random_code(3)));
        }
    }

    #[test]
    fn test_valid_short_codes() {
        assert!(is_valid_short_code("abc"));
        assert!(is_valid_short_code("my-link_01"));
        assert!(is_valid_short_code("ABCdef123xyz")); // 12 chars
    }

    #[test]
    fn test_invalid_short_codes() {
        assert!(!is_valid_short_code("ab")); // too short
        assert!(!is_valid_short_code("abcdefghijklm")); // 13 chars
        assert!(!is_valid_short_code(""));
        assert!(!is_valid_short_code("has space"));
        assert!(!is_valid_short_code("slash/code"));
        assert!(!is_valid_short_code("dot.code"));
        assert!(!is_valid_short_code("héllo"));
    }

    #[test]
    fn test_sanitize_short_code() {
        assert_eq!(sanitize_short_code("a b/c.d"), "abcd");
        assert_eq!(sanitize_short_code("my-link_01"), "my-link_01");
        assert_eq!(sanitize_short_code("///"), "");
    }
}
