use webprint_canonical::{
    canonicalizer::Canonicalizer, decode_url_safe, encode_url_safe, CanonicalizationError,
    DigestAlg, DigestError, DigestProvider, EncodedId, HashId, ProfileId, Sha256Digest,
    UnavailableDigest,
};
use serde_json::json;

fn canonicalizer() -> Canonicalizer {
    Canonicalizer::new(ProfileId::parse("webprint-canonical-v1").unwrap())
}

#[test]
fn digest_alg_serializes_to_golden_json() {
    assert_eq!(
        serde_json::to_string(&DigestAlg::Sha256).unwrap(),
        r#""sha-256""#
    );
}

#[test]
fn canonicalizer_produces_ordered_bytes() {
    let value = json!({"b": 1, "a": {"nested": 2}});
    let result = canonicalizer().canonicalize(&value).unwrap();
    assert_eq!(result.bytes, br#"{"a":{"nested":2},"b":1}"#.to_vec());
    assert_eq!(result.profile_id.as_str(), "webprint-canonical-v1");
}

#[test]
fn canonicalizer_orders_keys_at_every_depth() {
    let value = json!({
        "zeta": [{"y": true, "x": false}],
        "alpha": {"Beta": null, "alpha": "a"}
    });
    let result = canonicalizer().canonicalize(&value).unwrap();
    assert_eq!(
        result.as_str().unwrap(),
        r#"{"alpha":{"Beta":null,"alpha":"a"},"zeta":[{"x":false,"y":true}]}"#
    );
}

#[test]
fn canonicalizer_keeps_array_order() {
    let value = json!(["b", "a", "c"]);
    let result = canonicalizer().canonicalize(&value).unwrap();
    assert_eq!(result.as_str().unwrap(), r#"["b","a","c"]"#);
}

#[test]
fn canonicalize_serializable_matches_value_path() {
    #[derive(serde::Serialize)]
    struct Screen {
        width: u32,
        height: u32,
    }

    let via_struct = canonicalizer()
        .with_stringified_numbers()
        .canonicalize_serializable(&Screen {
            width: 1920,
            height: 1080,
        })
        .unwrap();
    let via_value = canonicalizer()
        .with_stringified_numbers()
        .canonicalize(&json!({"width": 1920, "height": 1080}))
        .unwrap();
    assert_eq!(via_struct, via_value);
    assert_eq!(
        via_struct.as_str().unwrap(),
        r#"{"height":"1080","width":"1920"}"#
    );
}

#[test]
fn non_json_values_are_rejected() {
    let mut bad = std::collections::HashMap::new();
    bad.insert(vec![1u8], 1u8);
    let err = canonicalizer().canonicalize_serializable(&bad).unwrap_err();
    assert!(matches!(err, CanonicalizationError::InvalidStructure(_)));
}

#[test]
fn non_finite_fields_serialize_as_null() {
    #[derive(serde::Serialize)]
    struct Ratio {
        dpr: f64,
    }

    let result = canonicalizer()
        .with_stringified_numbers()
        .canonicalize_serializable(&Ratio { dpr: f64::NAN })
        .unwrap();
    assert_eq!(result.as_str().unwrap(), r#"{"dpr":null}"#);
}

#[test]
fn encoded_id_round_trips_canonical_text() {
    let text = r#"{"a":"ü/+?"}"#;
    let id = EncodedId::parse(encode_url_safe(text)).unwrap();
    assert!(!id.as_str().contains('='));
    assert_eq!(id.decode_utf8().unwrap(), text);
    assert_eq!(decode_url_safe(id.as_str()).unwrap(), text.as_bytes());
}

#[tokio::test]
async fn sha256_matches_known_vectors() {
    let provider = Sha256Digest;
    let empty = provider.digest_hex(b"").await.unwrap();
    assert_eq!(
        empty.as_str(),
        "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
    );
    let abc = provider.digest_hex(b"abc").await.unwrap();
    assert_eq!(
        abc.as_str(),
        "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
    );
    assert_eq!(
        hex::encode(provider.digest(b"abc").await.unwrap()),
        abc.as_str()
    );
}

#[tokio::test]
async fn single_character_change_changes_hash() {
    let provider = Sha256Digest;
    let a = provider.digest_hex(br#"{"a":"1"}"#).await.unwrap();
    let b = provider.digest_hex(br#"{"a":"2"}"#).await.unwrap();
    assert_ne!(a, b);
    assert!(HashId::parse(a.as_str()).is_ok());
}

#[tokio::test]
async fn unavailable_provider_reports_missing_primitive() {
    let err = UnavailableDigest.digest_hex(b"abc").await.unwrap_err();
    assert!(matches!(err, DigestError::CryptographicUnavailable));
}

#[derive(Debug)]
struct ShortDigest;

#[async_trait::async_trait]
impl DigestProvider for ShortDigest {
    fn algorithm(&self) -> DigestAlg {
        DigestAlg::Sha256
    }

    async fn digest(&self, _data: &[u8]) -> Result<Vec<u8>, DigestError> {
        Ok(vec![0u8; 20])
    }
}

#[tokio::test]
async fn wrong_length_digest_is_rejected() {
    let err = ShortDigest.digest_hex(b"abc").await.unwrap_err();
    assert!(matches!(
        err,
        DigestError::InvalidLength {
            expected: 32,
            actual: 20
        }
    ));
}
