//! Best-effort bearer token inspection.
//!
//! Decodes the claims segment of a structured (JWT-shaped) token without
//! verifying its signature. The local check only avoids firing doomed
//! requests and drives proactive logout; the server's 401 stays the
//! authoritative expiry signal, and nothing else may gate access control
//! on this result.

use std::time::{SystemTime, UNIX_EPOCH};

use base64::Engine;
use base64::engine::general_purpose::{STANDARD, URL_SAFE, URL_SAFE_NO_PAD};
use serde::Deserialize;

/// Claims carried in the middle segment of a structured token.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TokenClaims {
    /// Expiry instant, seconds since epoch.
    pub exp: Option<u64>,
    /// Subject employee id, when the backend includes one.
    pub employee_id: Option<i64>,
    pub email: Option<String>,
    pub role: Option<String>,
}

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// Decodes the claims of a three-segment structured token.
///
/// Returns `None` for opaque tokens and for undecodable segments.
pub fn decode_claims(credential: &str) -> Option<TokenClaims> {
    let mut segments = credential.split('.');
    let (Some(_), Some(payload), Some(_), None) = (
        segments.next(),
        segments.next(),
        segments.next(),
        segments.next(),
    ) else {
        return None;
    };
    let bytes = decode_segment(payload)?;
    serde_json::from_slice(&bytes).ok()
}

/// Tolerant base64 decode: spec-conformant tokens use the url-safe
/// alphabet without padding, but some issuers pad or use the standard
/// alphabet. All three must decode rather than fail open.
fn decode_segment(payload: &str) -> Option<Vec<u8>> {
    URL_SAFE_NO_PAD
        .decode(payload)
        .or_else(|_| URL_SAFE.decode(payload))
        .or_else(|_| STANDARD.decode(payload))
        .ok()
}

/// Returns true when the credential is locally known to be expired.
///
/// An absent credential counts as expired. Opaque (non-structured) and
/// undecodable tokens fail open: the client treats them as non-expiring
/// and lets the server validate them.
pub fn is_expired(credential: Option<&str>) -> bool {
    let Some(credential) = credential else {
        return true;
    };
    let Some(claims) = decode_claims(credential) else {
        return false;
    };
    match claims.exp {
        Some(exp) => exp < now_secs(),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn structured_token(claims: &serde_json::Value) -> String {
        let payload = URL_SAFE_NO_PAD.encode(claims.to_string());
        format!("header.{payload}.signature")
    }

    #[test]
    fn absent_credential_is_expired() {
        assert!(is_expired(None));
    }

    #[test]
    fn past_exp_is_expired() {
        let token = structured_token(&serde_json::json!({ "exp": 1_000_000 }));
        assert!(is_expired(Some(&token)));
    }

    #[test]
    fn future_exp_is_not_expired() {
        let exp = now_secs() + 3600;
        let token = structured_token(&serde_json::json!({ "exp": exp }));
        assert!(!is_expired(Some(&token)));
    }

    #[test]
    fn missing_exp_claim_is_not_expired() {
        let token = structured_token(&serde_json::json!({ "email": "a@b.c" }));
        assert!(!is_expired(Some(&token)));
    }

    #[test]
    fn opaque_token_defers_to_server() {
        assert!(!is_expired(Some("opaque-session-token")));
        assert!(!is_expired(Some("two.segments")));
        assert!(!is_expired(Some("four.seg.men.ts")));
    }

    #[test]
    fn padded_and_standard_alphabet_payloads_still_decode() {
        // length chosen so standard encoding needs "=" padding
        let claims = r#"{"exp":1000,"email":"a@b.c"}"#;

        let padded = STANDARD.encode(claims);
        assert!(padded.ends_with('='));
        assert!(is_expired(Some(&format!("h.{padded}.s"))));

        let padded_url_safe = URL_SAFE.encode(claims);
        assert!(is_expired(Some(&format!("h.{padded_url_safe}.s"))));
    }

    #[test]
    fn undecodable_payload_fails_open() {
        assert!(!is_expired(Some("header.!!!not-base64!!!.signature")));
        let not_json = URL_SAFE_NO_PAD.encode("plain text");
        assert!(!is_expired(Some(&format!("header.{not_json}.signature"))));
    }

    #[test]
    fn decode_claims_exposes_subject_fields() {
        let token = structured_token(&serde_json::json!({
            "exp": 99,
            "employee_id": 7,
            "email": "admin@company.com",
            "role": "Admin",
        }));
        let claims = decode_claims(&token).unwrap();
        assert_eq!(claims.exp, Some(99));
        assert_eq!(claims.employee_id, Some(7));
        assert_eq!(claims.role.as_deref(), Some("Admin"));
    }
}
