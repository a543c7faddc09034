//! Per-request RSA signature over a throwaway certificate request.
//!
//! Every call generates a fresh key pair, builds a PKCS#10 request for a fixed
//! subject, and signs the request's DER bytes with RSASSA-PKCS1-v1_5/SHA-256.
//! The signed bytes are unrelated to the served payload and no verifying key
//! is published.

use crate::services::error::PayloadError;
use der::Encode;
use rsa::pkcs1v15::{Signature, SigningKey};
use rsa::signature::{SignatureEncoding, Signer};
use rsa::RsaPrivateKey;
use sha2::Sha256;
use std::str::FromStr;
use x509_cert::builder::{Builder, RequestBuilder};
use x509_cert::name::Name;

pub const DEFAULT_KEY_BITS: usize = 2048;
pub const MIN_KEY_BITS: usize = 1024;
/// Larger keys take minutes to generate and would pin a blocking thread per request.
pub const MAX_KEY_BITS: usize = 4096;
pub const DEFAULT_SUBJECT: &str = "CN=Notifier";

#[derive(Debug, Clone)]
pub struct CsrSigner {
    key_bits: usize,
    subject: Name,
}

/// A DER-encoded certificate request and the signature over those bytes.
#[derive(Debug, Clone)]
pub struct SignedRequest {
    pub csr_der: Vec<u8>,
    pub signature: Vec<u8>,
}

impl CsrSigner {
    pub fn new(key_bits: usize, subject: &str) -> Result<Self, PayloadError> {
        let subject = Name::from_str(subject).map_err(|source| PayloadError::Subject {
            subject: subject.to_string(),
            source,
        })?;

        Ok(Self { key_bits, subject })
    }

    pub fn key_bits(&self) -> usize {
        self.key_bits
    }

    pub fn subject(&self) -> &Name {
        &self.subject
    }

    /// Generate a fresh key and return the lowercase hex signature over a new
    /// certificate request.
    pub fn sign(&self) -> Result<String, PayloadError> {
        let mut rng = rand::thread_rng();
        let private_key =
            RsaPrivateKey::new(&mut rng, self.key_bits).map_err(PayloadError::KeyGeneration)?;
        let signing_key = SigningKey::<Sha256>::new(private_key);

        let signed = sign_request(&signing_key, &self.subject)?;
        tracing::debug!(
            key_bits = self.key_bits,
            csr_len = signed.csr_der.len(),
            "Signed certificate request"
        );

        Ok(hex::encode(signed.signature))
    }
}

/// Build a certificate request for `subject` with `signing_key` and sign its
/// DER encoding with the same key.
pub fn sign_request(
    signing_key: &SigningKey<Sha256>,
    subject: &Name,
) -> Result<SignedRequest, PayloadError> {
    let builder = RequestBuilder::new(subject.clone(), signing_key)?;
    let csr = builder.build::<Signature>()?;
    let csr_der = csr.to_der().map_err(PayloadError::Encoding)?;

    let signature = signing_key.try_sign(&csr_der)?;

    Ok(SignedRequest {
        csr_der,
        signature: signature.to_vec(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use der::Decode;
    use rsa::signature::{Keypair, Verifier};
    use x509_cert::request::CertReq;

    fn test_key(bits: usize) -> SigningKey<Sha256> {
        let private_key = RsaPrivateKey::new(&mut rand::thread_rng(), bits).unwrap();
        SigningKey::<Sha256>::new(private_key)
    }

    #[test]
    fn test_default_signer_uses_2048_bit_notifier_subject() {
        let signer = CsrSigner::new(DEFAULT_KEY_BITS, DEFAULT_SUBJECT).unwrap();
        assert_eq!(signer.key_bits(), 2048);
        assert_eq!(signer.subject().to_string(), "CN=Notifier");
    }

    #[test]
    fn test_invalid_subject_is_rejected() {
        let err = CsrSigner::new(2048, "not a distinguished name").unwrap_err();
        assert!(matches!(err, PayloadError::Subject { .. }));
    }

    #[test]
    fn test_signature_is_512_lowercase_hex_chars() {
        let signature = CsrSigner::new(DEFAULT_KEY_BITS, DEFAULT_SUBJECT)
            .unwrap()
            .sign()
            .unwrap();

        assert!(!signature.is_empty());
        assert_eq!(signature.len() % 2, 0);
        assert_eq!(signature.len(), 512);
        assert!(signature
            .chars()
            .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
    }

    #[test]
    fn test_consecutive_signatures_differ() {
        let signer = CsrSigner::new(MIN_KEY_BITS, DEFAULT_SUBJECT).unwrap();
        let first = signer.sign().unwrap();
        let second = signer.sign().unwrap();

        assert_eq!(first.len(), 256);
        assert_ne!(first, second);
    }

    #[test]
    fn test_signature_verifies_over_request_der() {
        let signing_key = test_key(MIN_KEY_BITS);
        let subject = Name::from_str(DEFAULT_SUBJECT).unwrap();
        let signed = sign_request(&signing_key, &subject).unwrap();

        let signature = Signature::try_from(signed.signature.as_slice()).unwrap();
        let verifying_key = signing_key.verifying_key();
        assert!(verifying_key.verify(&signed.csr_der, &signature).is_ok());
        assert!(verifying_key.verify(b"some other payload", &signature).is_err());
    }

    #[test]
    fn test_request_carries_configured_subject() {
        let signing_key = test_key(MIN_KEY_BITS);
        let subject = Name::from_str("CN=Dashboard,O=Example").unwrap();
        let signed = sign_request(&signing_key, &subject).unwrap();

        let request = CertReq::from_der(&signed.csr_der).unwrap();
        assert_eq!(request.info.subject, subject);
    }
}
