use hmac::{Hmac, Mac};
use sha2::Sha256;
use thiserror::Error;

type HmacSha256 = Hmac<Sha256>;

/// Header carrying the provider-issued signature token.
pub const SIGNATURE_HEADER: &str = "stripe-signature";

#[derive(Error, Debug)]
pub enum SignatureError {
    #[error("missing {SIGNATURE_HEADER} header")]
    MissingHeader,

    #[error("malformed signature header: {0}")]
    MalformedHeader(&'static str),

    #[error("signature timestamp {timestamp} outside tolerance window of {tolerance_seconds}s")]
    StaleTimestamp {
        timestamp: i64,
        tolerance_seconds: i64,
    },

    #[error("signature mismatch")]
    Mismatch,
}

/// Parsed `Stripe-Signature` header: `t=<unix ts>,v1=<hex mac>[,v1=...]`.
struct SignatureHeader {
    timestamp: i64,
    candidates: Vec<String>,
}

fn parse_header(header: &str) -> Result<SignatureHeader, SignatureError> {
    let mut timestamp: Option<i64> = None;
    let mut candidates = Vec::new();

    for part in header.split(',') {
        match part.trim().split_once('=') {
            Some(("t", value)) => timestamp = value.parse().ok(),
            Some(("v1", value)) => candidates.push(value.to_string()),
            // Unknown schemes (v0, ...) are ignored.
            _ => {}
        }
    }

    let timestamp =
        timestamp.ok_or(SignatureError::MalformedHeader("missing or invalid timestamp"))?;
    if candidates.is_empty() {
        return Err(SignatureError::MalformedHeader("no v1 signature"));
    }

    Ok(SignatureHeader {
        timestamp,
        candidates,
    })
}

/// Hex HMAC-SHA256 over `"{timestamp}.{payload}"`, the provider's signed
/// payload format. Exposed so tests can build valid signature headers.
pub fn sign_payload(payload: &[u8], secret: &str, timestamp: i64) -> String {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes()).expect("valid key");
    mac.update(timestamp.to_string().as_bytes());
    mac.update(b".");
    mac.update(payload);
    hex::encode(mac.finalize().into_bytes())
}

/// Verifies a signature header against the exact raw body bytes. `now` is a
/// unix timestamp passed in by the caller so the tolerance check is testable.
pub fn verify(
    payload: &[u8],
    header: &str,
    secret: &str,
    tolerance_seconds: i64,
    now: i64,
) -> Result<(), SignatureError> {
    let parsed = parse_header(header)?;

    if (now - parsed.timestamp).abs() > tolerance_seconds {
        return Err(SignatureError::StaleTimestamp {
            timestamp: parsed.timestamp,
            tolerance_seconds,
        });
    }

    let expected = sign_payload(payload, secret, parsed.timestamp);
    let valid = parsed
        .candidates
        .iter()
        .any(|candidate| constant_time_eq(expected.as_bytes(), candidate.as_bytes()));

    if valid {
        Ok(())
    } else {
        Err(SignatureError::Mismatch)
    }
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b.iter()).fold(0, |acc, (x, y)| acc | (x ^ y)) == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "whsec_test";
    const BODY: &[u8] = br#"{"type":"payment_intent.succeeded"}"#;

    fn header_for(body: &[u8], secret: &str, timestamp: i64) -> String {
        format!("t={},v1={}", timestamp, sign_payload(body, secret, timestamp))
    }

    #[test]
    fn accepts_valid_signature() {
        let now = 1_700_000_000;
        let header = header_for(BODY, SECRET, now);
        assert!(verify(BODY, &header, SECRET, 300, now).is_ok());
    }

    #[test]
    fn accepts_signature_within_tolerance() {
        let now = 1_700_000_000;
        let header = header_for(BODY, SECRET, now - 299);
        assert!(verify(BODY, &header, SECRET, 300, now).is_ok());
    }

    #[test]
    fn rejects_stale_timestamp() {
        let now = 1_700_000_000;
        let header = header_for(BODY, SECRET, now - 301);
        assert!(matches!(
            verify(BODY, &header, SECRET, 300, now),
            Err(SignatureError::StaleTimestamp { .. })
        ));
    }

    #[test]
    fn rejects_wrong_secret() {
        let now = 1_700_000_000;
        let header = header_for(BODY, "whsec_other", now);
        assert!(matches!(
            verify(BODY, &header, SECRET, 300, now),
            Err(SignatureError::Mismatch)
        ));
    }

    #[test]
    fn rejects_tampered_body() {
        let now = 1_700_000_000;
        let header = header_for(BODY, SECRET, now);
        assert!(matches!(
            verify(br#"{"type":"charge.refunded"}"#, &header, SECRET, 300, now),
            Err(SignatureError::Mismatch)
        ));
    }

    #[test]
    fn accepts_any_matching_v1_candidate() {
        let now = 1_700_000_000;
        let good = sign_payload(BODY, SECRET, now);
        let header = format!("t={},v1={},v1={}", now, "0".repeat(64), good);
        assert!(verify(BODY, &header, SECRET, 300, now).is_ok());
    }

    #[test]
    fn rejects_header_without_timestamp() {
        let header = format!("v1={}", "0".repeat(64));
        assert!(matches!(
            verify(BODY, &header, SECRET, 300, 1_700_000_000),
            Err(SignatureError::MalformedHeader(_))
        ));
    }

    #[test]
    fn rejects_header_without_v1() {
        assert!(matches!(
            verify(BODY, "t=1700000000,v0=abc", SECRET, 300, 1_700_000_000),
            Err(SignatureError::MalformedHeader(_))
        ));
    }
}
