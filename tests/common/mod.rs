/*
 * Shared helpers for integration tests: throwaway RSA identities published
 * as a JWKS document over loopback HTTP, and RS256 token signing.
 */
#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::AtomicUsize;

use axum::{Json, Router, http::StatusCode, routing::get};
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use openssl::asn1::Asn1Time;
use openssl::bn::BigNum;
use openssl::hash::MessageDigest;
use openssl::pkey::{PKey, Private};
use openssl::rsa::Rsa;
use openssl::x509::{X509, X509NameBuilder};

pub struct TestIdentity {
    pub private_key_pem: String,
    pub leaf_cert_b64: String,
}

pub fn generate_identity() -> TestIdentity {
    let rsa = Rsa::generate(2048).expect("rsa keygen");
    let private_key_pem =
        String::from_utf8(rsa.private_key_to_pem().expect("private key pem")).expect("utf8 pem");

    let pkey = PKey::from_rsa(rsa).expect("pkey");
    let cert = self_signed_cert(&pkey);
    let leaf_cert_b64 = BASE64_STANDARD.encode(cert.to_der().expect("cert der"));

    TestIdentity {
        private_key_pem,
        leaf_cert_b64,
    }
}

pub fn jwks_document(kid: &str, identity: &TestIdentity) -> serde_json::Value {
    serde_json::json!({
        "keys": [
            {
                "kid": kid,
                "use": "sig",
                "kty": "RSA",
                "alg": "RS256",
                "x5c": [identity.leaf_cert_b64]
            }
        ]
    })
}

pub fn sign_token(identity: &TestIdentity, kid: &str, sub: &str, exp: u64) -> String {
    let mut header = Header::new(Algorithm::RS256);
    header.kid = Some(kid.to_string());

    let key = EncodingKey::from_rsa_pem(identity.private_key_pem.as_bytes()).expect("encoding key");
    jsonwebtoken::encode(&header, &serde_json::json!({"sub": sub, "exp": exp}), &key)
        .expect("sign token")
}

pub fn future_exp() -> u64 {
    chrono::Utc::now().timestamp() as u64 + 300
}

/// Serve `body` with `status` at a loopback JWKS endpoint, counting hits.
/// Returns the endpoint URL.
pub async fn spawn_jwks_server(
    status: StatusCode,
    body: serde_json::Value,
    hits: Arc<AtomicUsize>,
) -> String {
    let app = Router::new().route(
        "/.well-known/jwks.json",
        get(move || {
            let body = body.clone();
            let hits = hits.clone();
            async move {
                hits.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
                (status, Json(body))
            }
        }),
    );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind loopback");
    let addr = listener.local_addr().expect("local addr");

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve jwks");
    });

    format!("http://{addr}/.well-known/jwks.json")
}

fn self_signed_cert(pkey: &PKey<Private>) -> X509 {
    let mut name = X509NameBuilder::new().expect("name builder");
    name.append_entry_by_text("CN", "todo-authorizer tests")
        .expect("cn entry");
    let name = name.build();

    let mut builder = X509::builder().expect("x509 builder");
    builder.set_version(2).expect("version");
    let serial = BigNum::from_u32(1)
        .and_then(|bn| bn.to_asn1_integer())
        .expect("serial");
    builder.set_serial_number(&serial).expect("serial number");
    builder.set_subject_name(&name).expect("subject");
    builder.set_issuer_name(&name).expect("issuer");
    builder.set_pubkey(pkey).expect("pubkey");
    builder
        .set_not_before(&Asn1Time::days_from_now(0).expect("not before"))
        .expect("not before");
    builder
        .set_not_after(&Asn1Time::days_from_now(1).expect("not after"))
        .expect("not after");
    builder.sign(pkey, MessageDigest::sha256()).expect("sign cert");

    builder.build()
}
