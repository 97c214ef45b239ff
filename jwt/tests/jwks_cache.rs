//! JWKS cache behavior against a mocked keys endpoint.

use pingone_jwt::{JwksCache, VerifyError};
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TEST_RSA_N: &str = "yDoZsPmPV3fUTenfL8dW8NTKHN0HdPVaGxstkYutHkuvv33NgK-J9aiBHi0ctKs-XRwvF93gpMR3d7M27mpLs5S3Qy3B4X3pn5ogzZ9LCgIj9uXztECFiTgT-FFSyNy5xCvb2kCPCRlvBT1uJC-wiym-gkPJfwvLwg2DB5_uF_r_TYzfMJhnnwPLNphKtCLUJaqn15fXkeeuuLBSkpEHkCuubqcL7aqPmtSENHLYboBm3VB3l5MXq8bhinxL2K8NBZYqbdpeIbZhbCesQOSMC5HbGKL3YZz5J1TfYgg14G6ciJzsppNNNuuVkMlnhhKCSkmCIpLkHY72dKb8qI476w";

fn cache_for(server: &MockServer) -> JwksCache {
    JwksCache::new(
        format!("{}/keys", server.uri()),
        Duration::from_secs(3600),
        reqwest::Client::new(),
    )
}

#[tokio::test]
async fn non_rsa_keys_are_skipped() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/keys"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "keys": [
                { "kty": "EC", "kid": "ec-key", "crv": "P-256", "x": "abc", "y": "def" },
                { "kty": "RSA", "kid": "rsa-key", "n": TEST_RSA_N, "e": "AQAB" }
            ]
        })))
        .mount(&server)
        .await;

    let cache = cache_for(&server);
    cache.get_key("rsa-key").await.unwrap();
    assert_eq!(cache.key_count().await, 1);

    let err = cache.get_key("ec-key").await.map(|_| ()).unwrap_err();
    assert!(matches!(err, VerifyError::KeyNotFound(_)));
}

#[tokio::test]
async fn repeated_lookups_within_ttl_fetch_once() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/keys"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "keys": [{ "kty": "RSA", "kid": "rsa-key", "n": TEST_RSA_N, "e": "AQAB" }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let cache = cache_for(&server);
    cache.get_key("rsa-key").await.unwrap();
    cache.get_key("rsa-key").await.unwrap();
}

#[tokio::test]
async fn invalid_jwks_body_is_a_jwks_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/keys"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let cache = cache_for(&server);
    let err = cache.get_key("rsa-key").await.map(|_| ()).unwrap_err();
    assert!(matches!(err, VerifyError::Jwks(_)));
}
