//! Session token claim decoding.
//!
//! Reads the payload segment of a three-part token. The payload is
//! base64url-encoded JSON; padding is accepted but not required. Only a
//! JSON object is accepted as a payload.

use base64::Engine as _;
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use serde::Deserialize;
use serde_json::{Map, Value};
use thiserror::Error;

const PAYLOAD_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Claims this crate reads from the token payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Claims {
    /// The role the bearer was granted, as synchronized from the role store.
    #[serde(default)]
    pub user_role: Option<String>,
}

/// Why a token's claims could not be read.
#[derive(Debug, Error)]
pub enum ClaimsError {
    /// The token is not `header.payload.signature`.
    #[error("expected 3 dot-separated segments, found {0}")]
    Segments(usize),

    /// The payload segment is not valid base64url.
    #[error("payload is not base64url: {0}")]
    Encoding(#[from] base64::DecodeError),

    /// The decoded payload is not a JSON object of the expected shape.
    #[error("payload is not a claims object: {0}")]
    Json(#[from] serde_json::Error),
}

/// Decode the claims carried by `token`.
///
/// The token must have exactly three segments. The signature segment is
/// ignored; see [`Session`](crate::Session) for the trust boundary.
///
/// The payload is read as a JSON object before the claims are taken from
/// it. A bare array such as `["admin"]` would otherwise fill `user_role`
/// positionally.
pub fn decode_claims(token: &str) -> Result<Claims, ClaimsError> {
    let segments: Vec<&str> = token.split('.').collect();
    let [_, payload, _] = segments[..] else {
        return Err(ClaimsError::Segments(segments.len()));
    };
    let bytes = PAYLOAD_ENGINE.decode(payload)?;
    let object: Map<String, Value> = serde_json::from_slice(&bytes)?;
    Ok(serde_json::from_value(Value::Object(object))?)
}

/// Test helper: build an unsigned token around a JSON payload.
#[cfg(test)]
pub(crate) fn token_with_payload(payload: &str) -> String {
    use base64::engine::general_purpose::URL_SAFE_NO_PAD;
    format!(
        "{}.{}.sig",
        URL_SAFE_NO_PAD.encode(r#"{"alg":"HS256","typ":"JWT"}"#),
        URL_SAFE_NO_PAD.encode(payload)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_role() {
        let token = token_with_payload(r#"{"sub":"u1","user_role":"admin"}"#);
        let claims = decode_claims(&token).unwrap();
        assert_eq!(claims.user_role.as_deref(), Some("admin"));
    }

    #[test]
    fn test_decode_missing_role() {
        let token = token_with_payload(r#"{"sub":"u1"}"#);
        assert_eq!(decode_claims(&token).unwrap(), Claims::default());
    }

    #[test]
    fn test_decode_null_role() {
        let token = token_with_payload(r#"{"user_role":null}"#);
        assert!(decode_claims(&token).unwrap().user_role.is_none());
    }

    #[test]
    fn test_decode_padded_payload() {
        use base64::engine::general_purpose::URL_SAFE;
        let token = format!("h.{}.s", URL_SAFE.encode(r#"{"user_role":"viewer"}"#));
        let claims = decode_claims(&token).unwrap();
        assert_eq!(claims.user_role.as_deref(), Some("viewer"));
    }

    #[test]
    fn test_decode_url_safe_alphabet() {
        let token = token_with_payload(r#"{"user_role":"admin","n":"??>>"}"#);
        let payload = token.split('.').nth(1).unwrap();
        assert!(payload.contains('_') && payload.contains('-'));
        let claims = decode_claims(&token).unwrap();
        assert_eq!(claims.user_role.as_deref(), Some("admin"));
    }

    #[test]
    fn test_segment_count_must_be_three() {
        let token = token_with_payload(r#"{"user_role":"admin"}"#);
        let (header, rest) = token.split_once('.').unwrap();
        let payload = rest.split('.').next().unwrap();

        for (bad, count) in [
            ("opaque".to_string(), 1),
            (format!("{header}.{payload}"), 2),
            (format!("{token}.extra"), 4),
        ] {
            assert!(
                matches!(decode_claims(&bad), Err(ClaimsError::Segments(n)) if n == count),
                "{bad}"
            );
        }
    }

    #[test]
    fn test_bad_encoding() {
        assert!(matches!(
            decode_claims("h.!!!not-base64!!!.s"),
            Err(ClaimsError::Encoding(_))
        ));
    }

    #[test]
    fn test_bad_json() {
        let token = token_with_payload("not json");
        assert!(matches!(decode_claims(&token), Err(ClaimsError::Json(_))));
    }

    #[test]
    fn test_non_string_role_is_rejected() {
        let token = token_with_payload(r#"{"user_role":42}"#);
        assert!(matches!(decode_claims(&token), Err(ClaimsError::Json(_))));
    }

    #[test]
    fn test_json_array_is_rejected() {
        for payload in [r#"["admin"]"#, r#"["admin", 1]"#, "[]"] {
            let token = token_with_payload(payload);
            assert!(
                matches!(decode_claims(&token), Err(ClaimsError::Json(_))),
                "{payload}"
            );
        }
    }

    #[test]
    fn test_json_scalar_is_rejected() {
        for payload in ["\"admin\"", "42", "null", "true"] {
            let token = token_with_payload(payload);
            assert!(decode_claims(&token).is_err(), "{payload}");
        }
    }
}
