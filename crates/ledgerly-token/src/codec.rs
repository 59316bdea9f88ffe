//! Turning a credential string into [`Claims`] and judging its freshness.
//!
//! The format is the usual compact token:
//!
//! ```text
//! base64url(header) . base64url(payload JSON) . signature
//! ```
//!
//! Only the payload is read. The header and signature must be present (so
//! the token has the expected shape) but are never interpreted.

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};

use crate::{Claims, TokenError};

/// Decodes the claims from `token` without verifying its signature.
///
/// # Errors
/// Returns [`TokenError::Malformed`] if:
/// - the token doesn't have exactly three `.`-separated segments,
/// - the header or payload segment is empty,
/// - the payload isn't valid base64url (trailing `=` padding is tolerated),
/// - the payload isn't a JSON object with at least a numeric `exp`.
///
/// Other claims in unexpected shapes don't fail the decode; see [`Claims`].
///
/// Rejections are logged at `debug` with the reason, never the token.
pub fn decode(token: &str) -> Result<Claims, TokenError> {
    decode_claims(token)
        .inspect_err(|err| tracing::debug!(error = %err, "credential rejected"))
}

fn decode_claims(token: &str) -> Result<Claims, TokenError> {
    let mut segments = token.split('.');
    let (Some(header), Some(payload), Some(_signature), None) = (
        segments.next(),
        segments.next(),
        segments.next(),
        segments.next(),
    ) else {
        return Err(TokenError::malformed("expected three dot-separated segments"));
    };

    if header.is_empty() || payload.is_empty() {
        return Err(TokenError::malformed("empty header or payload segment"));
    }

    let bytes = URL_SAFE_NO_PAD
        .decode(payload.trim_end_matches('='))
        .map_err(|e| TokenError::malformed(format!("payload is not base64url: {e}")))?;

    // Go through `Value` first: serde would otherwise happily accept a JSON
    // array as a struct in field order.
    let value: serde_json::Value = serde_json::from_slice(&bytes)
        .map_err(|e| TokenError::malformed(format!("payload is not JSON: {e}")))?;
    if !value.is_object() {
        return Err(TokenError::malformed("payload is not a JSON object"));
    }
    serde_json::from_value(value)
        .map_err(|e| TokenError::malformed(format!("payload claims invalid: {e}")))
}

/// Returns `true` if `claims` are no longer valid at `now` (epoch seconds).
///
/// The expiry instant itself counts as expired: `now == exp` → `true`.
pub fn is_expired(claims: &Claims, now: u64) -> bool {
    now >= claims.exp
}

/// Decodes `token` and rejects it if it has expired at `now`.
///
/// # Errors
/// - [`TokenError::Malformed`] — see [`decode`]
/// - [`TokenError::Expired`] — structurally fine, but `now >= exp`
pub fn validate(token: &str, now: u64) -> Result<Claims, TokenError> {
    let claims = decode(token)?;
    if is_expired(&claims, now) {
        return Err(TokenError::Expired {
            exp: claims.exp,
            now,
        });
    }
    Ok(claims)
}

/// Builds an **unsigned** token (`alg: none`) carrying `claims`.
///
/// The result decodes with [`decode`] but would be rejected by any server.
/// It exists so tests and local demos can mint credentials with chosen
/// expiry and authorities.
pub fn encode_unsigned(claims: &Claims) -> String {
    const HEADER: &[u8] = br#"{"alg":"none","typ":"JWT"}"#;
    let payload = serde_json::json!({
        "sub": claims.sub,
        "authorities": claims.authorities,
        "iat": claims.iat,
        "exp": claims.exp,
    });
    format!(
        "{}.{}.",
        URL_SAFE_NO_PAD.encode(HEADER),
        URL_SAFE_NO_PAD.encode(payload.to_string())
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Role;

    fn b64(text: &str) -> String {
        URL_SAFE_NO_PAD.encode(text.as_bytes())
    }

    fn token_with_payload(payload_json: &str) -> String {
        format!("{}.{}.sig", b64(r#"{"alg":"HS256"}"#), b64(payload_json))
    }

    // =====================================================================
    // decode()
    // =====================================================================

    #[test]
    fn test_decode_valid_token_returns_claims() {
        let token = token_with_payload(
            r#"{"sub":"owner@example.com","authorities":["ROLE_OWNER"],"iat":100,"exp":200}"#,
        );

        let claims = decode(&token).expect("should decode");

        assert_eq!(claims.sub, "owner@example.com");
        assert_eq!(claims.authorities, vec!["ROLE_OWNER".to_string()]);
        assert_eq!(claims.iat, 100);
        assert_eq!(claims.exp, 200);
    }

    #[test]
    fn test_decode_ignores_unknown_claims() {
        let token = token_with_payload(r#"{"exp":200,"shopId":7,"tenant":"acme"}"#);

        assert_eq!(decode(&token).unwrap().exp, 200);
    }

    #[test]
    fn test_decode_tolerates_padding() {
        let payload = base64::engine::general_purpose::URL_SAFE.encode(br#"{"exp":10}"#);
        assert!(payload.ends_with('='), "fixture should be padded");
        let token = format!("{}.{payload}.sig", b64("{}"));

        assert_eq!(decode(&token).unwrap().exp, 10);
    }

    #[test]
    fn test_decode_wrong_segment_count_is_malformed() {
        for token in ["", "invalid-token", "a.b", "a.b.c.d", "...."] {
            assert!(
                matches!(decode(token), Err(TokenError::Malformed(_))),
                "{token:?} should be malformed"
            );
        }
    }

    #[test]
    fn test_decode_empty_payload_is_malformed() {
        assert!(matches!(
            decode(&format!("{}..sig", b64("{}"))),
            Err(TokenError::Malformed(_))
        ));
    }

    #[test]
    fn test_decode_bad_base64_is_malformed() {
        let token = format!("{}.not*base64!.sig", b64("{}"));

        assert!(matches!(decode(&token), Err(TokenError::Malformed(_))));
    }

    #[test]
    fn test_decode_non_json_payload_is_malformed() {
        assert!(matches!(
            decode(&token_with_payload("not-json")),
            Err(TokenError::Malformed(_))
        ));
    }

    #[test]
    fn test_decode_json_array_payload_is_malformed() {
        assert!(matches!(
            decode(&token_with_payload(r#"["sub",[],0,10]"#)),
            Err(TokenError::Malformed(_))
        ));
    }

    #[test]
    fn test_decode_missing_or_non_numeric_exp_is_malformed() {
        for payload in [r#"{"sub":"x"}"#, r#"{"exp":"soon"}"#, r#"{"exp":null}"#] {
            assert!(
                matches!(decode(&token_with_payload(payload)), Err(TokenError::Malformed(_))),
                "{payload} should be malformed"
            );
        }
    }

    #[test]
    fn test_decode_odd_claim_shapes_still_decode() {
        let payloads = [
            r#"{"exp":4000000000,"authorities":null}"#,
            r#"{"exp":4000000000,"authorities":[{"authority":"ROLE_ADMIN"}]}"#,
            r#"{"exp":4000000000,"sub":42}"#,
            r#"{"exp":4000000000,"iat":1.5}"#,
            r#"{"exp":4000000000.0}"#,
        ];
        for payload in payloads {
            let claims = decode(&token_with_payload(payload))
                .unwrap_or_else(|e| panic!("{payload} should decode: {e}"));
            assert_eq!(claims.exp, 4_000_000_000, "{payload}");
            assert_eq!(crate::role_from_claims(&claims), None, "{payload}");
        }
    }

    #[test]
    fn test_validate_negative_exp_is_expired() {
        let token = token_with_payload(r#"{"exp":-5}"#);
        assert_eq!(validate(&token, 0), Err(TokenError::Expired { exp: 0, now: 0 }));
    }

    // =====================================================================
    // is_expired() / validate()
    // =====================================================================

    #[test]
    fn test_is_expired_boundary_counts_as_expired() {
        let claims = Claims::for_role("u", Role::Staff, 0, 1_000);

        assert!(!is_expired(&claims, 999));
        assert!(is_expired(&claims, 1_000));
        assert!(is_expired(&claims, 1_001));
    }

    #[test]
    fn test_validate_fresh_token_returns_claims() {
        let token = encode_unsigned(&Claims::for_role("u", Role::Admin, 0, 50));

        let claims = validate(&token, 49).expect("fresh");

        assert_eq!(claims.exp, 50);
    }

    #[test]
    fn test_validate_expired_token_returns_expired() {
        let token = encode_unsigned(&Claims::for_role("u", Role::Admin, 0, 50));

        assert_eq!(
            validate(&token, 50),
            Err(TokenError::Expired { exp: 50, now: 50 })
        );
    }

    #[test]
    fn test_validate_malformed_token_returns_malformed() {
        assert!(matches!(
            validate("garbage", 0),
            Err(TokenError::Malformed(_))
        ));
    }

    // =====================================================================
    // encode_unsigned()
    // =====================================================================

    #[test]
    fn test_encode_unsigned_decodes_back() {
        let claims = Claims::for_role("staff@example.com", Role::Staff, 10, 20);

        let token = encode_unsigned(&claims);

        assert_eq!(token.split('.').count(), 3);
        assert!(token.ends_with('.'), "signature segment should be empty");
        assert_eq!(decode(&token).unwrap(), claims);
    }
}
