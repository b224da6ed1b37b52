//! CSRF token issuance
//!
//! Double-submit pattern: the token goes out both as a cookie and in the
//! response body; mutating requests must echo it in the X-CSRF-Token
//! header for `CsrfGuard` to compare.

use actix_web::cookie::time::Duration as CookieDuration;
use actix_web::cookie::{Cookie, SameSite};
use actix_web::{HttpResponse, Responder};
use serde::{Deserialize, Serialize};

use crate::api::constants;
use crate::api::response::success_response;

#[derive(Debug, Serialize, Deserialize)]
pub struct CsrfToken {
    pub token: String,
}

pub struct TokenService {}

impl TokenService {
    /// GET /api/csrf — issue a fresh token.
    pub async fn issue_csrf() -> impl Responder {
        let token = generate_token();

        let cookie = Cookie::build(constants::CSRF_COOKIE_NAME, token.clone())
            .path("/")
            .same_site(SameSite::Lax)
            .max_age(CookieDuration::seconds(constants::CSRF_TOKEN_MAX_AGE_SECS))
            .finish();

        let mut resp = success_response(CsrfToken { token });
        if let Err(e) = resp.add_cookie(&cookie) {
            tracing::error!("Failed to attach CSRF cookie: {}", e);
            return HttpResponse::InternalServerError().finish();
        }
        resp
    }
}

/// 32 字节随机 token，十六进制编码
fn generate_token() -> String {
    use rand::Rng;

    let mut bytes = [0u8; 32];
    rand::rng().fill_bytes(&mut bytes);
    bytes.iter().fold(String::with_capacity(64), |mut acc, b| {
        use std::fmt::Write;
        let _ = write!(acc, "{:02x}", b);
        acc
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_is_64_hex_chars() {
        let token = generate_token();
        assert_eq!(token.len(), 64);
        assert!(token.bytes().all(|b| b.is_ascii_hexdigit()));
    }

    #[test]
    fn test_tokens_are_unique() {
        assert_ne!(generate_token(), generate_token());
    }
}
