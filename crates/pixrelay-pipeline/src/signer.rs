//! AWS Signature V4 request signing for the outbound forward.
//!
//! Implements the standard signing process: canonical request →
//! string to sign → HMAC-SHA256 key chain. The scope binds method, path,
//! headers, and the SHA-256 body hash; any mutation after signing
//! invalidates the signature. Signing is a pure function of its inputs,
//! including the timestamp.
//!
//! Based on: <https://docs.aws.amazon.com/general/latest/gr/signature-version-4.html>

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use sha2::{Digest, Sha256};

use pixrelay_core::{Credentials, StoredObject};

type HmacSha256 = Hmac<Sha256>;

const ALGORITHM: &str = "AWS4-HMAC-SHA256";

/// RFC 3986: everything outside A-Z a-z 0-9 `-` `_` `.` `~` is encoded.
const STRICT_ENCODE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Endpoint the forwarder signs against.
#[derive(Debug, Clone)]
pub struct SigningEndpoint {
    pub host: String,
    pub path: String,
    pub region: String,
    pub service: String,
}

/// A fully signed outbound request, used once and discarded.
///
/// Header names are lowercase and in canonical (sorted) order. The transport
/// may only drop the `host` and `content-length` entries it computes itself;
/// any other change invalidates the signature.
#[derive(Debug, Clone)]
pub struct SignedRequest {
    pub method: String,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: bytes::Bytes,
}

/// Sign a POST of the object bytes to the endpoint at `now`.
pub fn sign_request(
    object: &StoredObject,
    credentials: &Credentials,
    endpoint: &SigningEndpoint,
    now: DateTime<Utc>,
) -> SignedRequest {
    let timestamp = now.format("%Y%m%dT%H%M%SZ").to_string();
    let date = now.format("%Y%m%d").to_string();

    let payload_hash = hex::encode(Sha256::digest(&object.body));

    // BTreeMap keeps the canonical (sorted, lowercase) header order.
    let mut headers: BTreeMap<String, String> = BTreeMap::new();
    headers.insert("content-length".to_string(), object.content_length.to_string());
    headers.insert("content-type".to_string(), object.content_type.clone());
    headers.insert("host".to_string(), endpoint.host.clone());
    headers.insert("x-amz-date".to_string(), timestamp.clone());

    let signed_headers = headers.keys().cloned().collect::<Vec<_>>().join(";");
    let canonical_headers = headers
        .iter()
        .map(|(name, value)| format!("{}:{}", name, normalize_header_value(value)))
        .collect::<Vec<_>>()
        .join("\n");

    let canonical_request = format!(
        "{}\n{}\n{}\n{}\n\n{}\n{}",
        "POST",
        canonicalize_uri(&endpoint.path),
        "", // no query string on the ingest route
        canonical_headers,
        signed_headers,
        payload_hash
    );

    let credential_scope = format!(
        "{}/{}/{}/aws4_request",
        date, endpoint.region, endpoint.service
    );
    let string_to_sign = format!(
        "{}\n{}\n{}\n{:x}",
        ALGORITHM,
        timestamp,
        credential_scope,
        Sha256::digest(canonical_request.as_bytes())
    );

    let signing_key = calculate_signing_key(
        &credentials.secret_key,
        &date,
        &endpoint.region,
        &endpoint.service,
    );
    let signature = hex::encode(hmac_sha256(&signing_key, string_to_sign.as_bytes()));

    let authorization = format!(
        "{} Credential={}/{}, SignedHeaders={}, Signature={}",
        ALGORITHM, credentials.access_key, credential_scope, signed_headers, signature
    );

    let mut out: Vec<(String, String)> = headers.into_iter().collect();
    out.push(("authorization".to_string(), authorization));

    SignedRequest {
        method: "POST".to_string(),
        url: format!("https://{}{}", endpoint.host, endpoint.path),
        headers: out,
        body: object.body.clone(),
    }
}

/// Canonicalizes the URI path: each segment percent-encoded, `/` preserved.
fn canonicalize_uri(path: &str) -> String {
    if path.is_empty() {
        return "/".to_string();
    }

    let encoded = path
        .split('/')
        .map(|segment| utf8_percent_encode(segment, STRICT_ENCODE).to_string())
        .collect::<Vec<_>>()
        .join("/");

    if encoded.starts_with('/') {
        encoded
    } else {
        format!("/{}", encoded)
    }
}

/// Trim and collapse internal whitespace, per the canonical header rules.
fn normalize_header_value(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Calculates the signing key using the HMAC-SHA256 chain.
///
/// kSecret = "AWS4" + secret access key
/// kDate = HMAC(kSecret, date), kRegion = HMAC(kDate, region),
/// kService = HMAC(kRegion, service), kSigning = HMAC(kService, "aws4_request")
fn calculate_signing_key(secret_key: &str, date: &str, region: &str, service: &str) -> Vec<u8> {
    let k_secret = format!("AWS4{}", secret_key);
    let k_date = hmac_sha256(k_secret.as_bytes(), date.as_bytes());
    let k_region = hmac_sha256(&k_date, region.as_bytes());
    let k_service = hmac_sha256(&k_region, service.as_bytes());
    hmac_sha256(&k_service, b"aws4_request")
}

fn hmac_sha256(key: &[u8], data: &[u8]) -> Vec<u8> {
    let mut mac = HmacSha256::new_from_slice(key).expect("HMAC can take key of any size");
    mac.update(data);
    mac.finalize().into_bytes().to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;
    use chrono::TimeZone;
    use std::collections::HashMap;

    fn object(body: &'static [u8]) -> StoredObject {
        StoredObject {
            body: Bytes::from_static(body),
            content_type: "image/jpeg".to_string(),
            content_length: body.len() as u64,
            metadata: HashMap::new(),
            version_id: Some("v-1".to_string()),
        }
    }

    fn credentials() -> Credentials {
        Credentials {
            access_key: "AKIAEXAMPLE".to_string(),
            secret_key: "example-secret".to_string(),
        }
    }

    fn endpoint() -> SigningEndpoint {
        SigningEndpoint {
            host: "api.example.com".to_string(),
            path: "/v1/ingest/image".to_string(),
            region: "eu-west-1".to_string(),
            service: "execute-api".to_string(),
        }
    }

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 8, 5, 12, 0, 0).unwrap()
    }

    fn header<'a>(request: &'a SignedRequest, name: &str) -> Option<&'a str> {
        request
            .headers
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    #[test]
    fn signs_with_credential_scope_and_header_list() {
        let request = sign_request(&object(b"bytes"), &credentials(), &endpoint(), fixed_now());

        let authorization = header(&request, "authorization").unwrap();
        assert!(authorization.starts_with(
            "AWS4-HMAC-SHA256 Credential=AKIAEXAMPLE/20260805/eu-west-1/execute-api/aws4_request, "
        ));
        assert!(authorization
            .contains("SignedHeaders=content-length;content-type;host;x-amz-date, Signature="));
    }

    #[test]
    fn carries_object_headers_and_body() {
        let request = sign_request(&object(b"bytes"), &credentials(), &endpoint(), fixed_now());

        assert_eq!(request.method, "POST");
        assert_eq!(request.url, "https://api.example.com/v1/ingest/image");
        assert_eq!(header(&request, "content-type"), Some("image/jpeg"));
        assert_eq!(header(&request, "content-length"), Some("5"));
        assert_eq!(header(&request, "host"), Some("api.example.com"));
        assert_eq!(header(&request, "x-amz-date"), Some("20260805T120000Z"));
        assert_eq!(request.body.as_ref(), b"bytes");
    }

    #[test]
    fn signing_is_deterministic() {
        let first = sign_request(&object(b"bytes"), &credentials(), &endpoint(), fixed_now());
        let second = sign_request(&object(b"bytes"), &credentials(), &endpoint(), fixed_now());

        assert_eq!(
            header(&first, "authorization"),
            header(&second, "authorization")
        );
    }

    #[test]
    fn scope_binds_the_body() {
        let first = sign_request(&object(b"bytes"), &credentials(), &endpoint(), fixed_now());
        let second = sign_request(&object(b"other"), &credentials(), &endpoint(), fixed_now());

        assert_ne!(
            header(&first, "authorization"),
            header(&second, "authorization")
        );
    }

    #[test]
    fn scope_binds_the_path() {
        let other = SigningEndpoint {
            path: "/v1/ingest/video".to_string(),
            ..endpoint()
        };
        let first = sign_request(&object(b"bytes"), &credentials(), &endpoint(), fixed_now());
        let second = sign_request(&object(b"bytes"), &credentials(), &other, fixed_now());

        assert_ne!(
            header(&first, "authorization"),
            header(&second, "authorization")
        );
    }

    #[test]
    fn canonical_uri_encodes_segments() {
        assert_eq!(canonicalize_uri(""), "/");
        assert_eq!(canonicalize_uri("/v1/ingest"), "/v1/ingest");
        assert_eq!(canonicalize_uri("/with space"), "/with%20space");
        assert_eq!(canonicalize_uri("relative"), "/relative");
    }

    #[test]
    fn header_values_are_normalized() {
        assert_eq!(normalize_header_value("  a   b  "), "a b");
    }
}
