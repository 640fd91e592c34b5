/*
 * Test helpers: throwaway RSA identities with self-signed leaf certificates,
 * shaped the way the identity provider publishes them (x5c base64 DER).
 */
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use openssl::asn1::Asn1Time;
use openssl::bn::BigNum;
use openssl::hash::MessageDigest;
use openssl::pkey::{PKey, Private};
use openssl::rsa::Rsa;
use openssl::x509::{X509, X509NameBuilder};

use super::jwks::SigningKey;

pub(crate) struct TestIdentity {
    pub private_key_pem: String,
    /// Base64 DER of the self-signed leaf certificate, as it would appear
    /// in a key-set entry's `x5c[0]`.
    pub leaf_cert_b64: String,
}

pub(crate) fn generate_identity() -> TestIdentity {
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

pub(crate) fn rsa_sig_key(kid: &str, x5c: Vec<String>) -> SigningKey {
    SigningKey {
        kid: kid.to_string(),
        key_use: "sig".to_string(),
        kty: "RSA".to_string(),
        x5c,
        nbf: None,
    }
}

pub(crate) fn sign_token(
    private_key_pem: &str,
    kid: Option<&str>,
    claims: &serde_json::Value,
) -> String {
    let mut header = Header::new(Algorithm::RS256);
    header.kid = kid.map(str::to_string);

    let key = EncodingKey::from_rsa_pem(private_key_pem.as_bytes()).expect("encoding key");
    jsonwebtoken::encode(&header, claims, &key).expect("sign token")
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
