//! Traffic key derivation for both key-schedule generations.
//!
//! TLS 1.3 expands per-direction traffic secrets with HKDF-Expand-Label
//! (RFC 8446 section 7.3). Everything earlier runs the version's PRF over the
//! master secret to produce one key block, which [`KeyBlockParser`] then
//! slices (RFC 5246 section 6.3).

use crate::{
    algorithms::{self, CipherFamily, HkdfAlgorithm, PrfAlgorithm},
    context::NegotiationContext,
    error::CryptoError,
    keys::{KeyBlockParser, KeySet, GCM_IV_LENGTH},
};
use aws_lc_rs::{hkdf, hmac};

const KEY_EXPANSION_LABEL: &[u8] = b"key expansion";

struct OutputLength(usize);

impl hkdf::KeyType for OutputLength {
    fn len(&self) -> usize {
        self.0
    }
}

fn hkdf_primitive(algorithm: HkdfAlgorithm) -> hkdf::Algorithm {
    match algorithm {
        HkdfAlgorithm::Sha256 => hkdf::HKDF_SHA256,
        HkdfAlgorithm::Sha384 => hkdf::HKDF_SHA384,
    }
}

fn hmac_primitive(algorithm: PrfAlgorithm) -> Result<hmac::Algorithm, CryptoError> {
    match algorithm {
        // no MD5 HMAC in the primitive library
        PrfAlgorithm::LegacyMd5Sha1 => {
            Err(CryptoError::UnsupportedAlgorithm("md5/sha1 combined prf"))
        }
        PrfAlgorithm::Sha256 => Ok(hmac::HMAC_SHA256),
        PrfAlgorithm::Sha384 => Ok(hmac::HMAC_SHA384),
    }
}

/// HKDF-Expand-Label from RFC 8446 section 7.1.
pub fn hkdf_expand_label(
    algorithm: HkdfAlgorithm,
    secret: &[u8],
    label: &[u8],
    context: &[u8],
    output_length: usize,
) -> Result<Vec<u8>, CryptoError> {
    let prk = hkdf::Prk::new_less_safe(hkdf_primitive(algorithm), secret);

    let output_length_bytes = (output_length as u16).to_be_bytes();
    let label = {
        let mut label_builder = Vec::new();
        label_builder.extend_from_slice(b"tls13 ");
        label_builder.extend_from_slice(label);
        label_builder
    };
    let info = [
        output_length_bytes.as_slice(),
        &[label.len() as u8],
        &label,
        &[context.len() as u8],
        context,
    ];

    let mut output = vec![0; output_length];
    prk.expand(&info, OutputLength(output_length))
        .and_then(|okm| okm.fill(&mut output))
        .map_err(|_| CryptoError::UnsupportedAlgorithm("hkdf output length"))?;
    Ok(output)
}

/// The TLS 1.2 PRF (RFC 5246 section 5): P_hash over `label || seed`.
pub fn prf(
    algorithm: PrfAlgorithm,
    secret: &[u8],
    label: &[u8],
    seed: &[u8],
    output_length: usize,
) -> Result<Vec<u8>, CryptoError> {
    let key = hmac::Key::new(hmac_primitive(algorithm)?, secret);

    let mut label_and_seed = Vec::with_capacity(label.len() + seed.len());
    label_and_seed.extend_from_slice(label);
    label_and_seed.extend_from_slice(seed);

    let mut output = Vec::with_capacity(output_length);
    // a = A(i), starting from A(1) = HMAC(secret, label || seed)
    let mut a = hmac::sign(&key, &label_and_seed);
    while output.len() < output_length {
        let mut chunk_input = a.as_ref().to_vec();
        chunk_input.extend_from_slice(&label_and_seed);
        output.extend_from_slice(hmac::sign(&key, &chunk_input).as_ref());
        a = hmac::sign(&key, a.as_ref());
    }
    output.truncate(output_length);
    Ok(output)
}

fn expand_traffic_keys(
    algorithm: HkdfAlgorithm,
    secret: &[u8],
    key_size: usize,
) -> Result<(Vec<u8>, Vec<u8>), CryptoError> {
    let key = hkdf_expand_label(algorithm, secret, b"key", &[], key_size)?;
    let iv = hkdf_expand_label(algorithm, secret, b"iv", &[], GCM_IV_LENGTH)?;
    Ok((key, iv))
}

/// Derive the full [`KeySet`] for the context's negotiated version and suite.
///
/// On TLS 1.3 a pending key update makes this one call derive from the
/// application traffic secrets instead of the handshake secrets, and clears
/// the request. The flag read and the secret selection happen under a single
/// lock acquisition, so two racing generations cannot both consume one
/// request.
pub fn generate_key_set(context: &NegotiationContext) -> Result<KeySet, CryptoError> {
    let profile = algorithms::resolve(context.cipher_suite)?;

    if context.version.is_tls13() {
        let (client_secret, server_secret) = context.with_secrets(|secrets| {
            let use_updated = std::mem::take(&mut secrets.pending_key_update);
            if use_updated {
                (
                    secrets.client_application_traffic_secret.clone(),
                    secrets.server_application_traffic_secret.clone(),
                )
            } else {
                (
                    secrets.client_handshake_traffic_secret.clone(),
                    secrets.server_handshake_traffic_secret.clone(),
                )
            }
        });
        let client_secret = client_secret.ok_or(CryptoError::MissingSecret("client traffic"))?;
        let server_secret = server_secret.ok_or(CryptoError::MissingSecret("server traffic"))?;

        let algorithm = profile.hkdf_algorithm;
        let (client_write_key, client_write_iv) =
            expand_traffic_keys(algorithm, &client_secret, profile.key_size)?;
        let (server_write_key, server_write_iv) =
            expand_traffic_keys(algorithm, &server_secret, profile.key_size)?;
        tracing::debug!(
            client_key = hex::encode(&client_write_key),
            server_key = hex::encode(&server_write_key),
            "derived traffic keys"
        );

        return Ok(KeySet {
            client_write_key,
            server_write_key,
            client_write_iv,
            server_write_iv,
            client_write_mac_key: None,
            server_write_mac_key: None,
        });
    }

    let prf_algorithm = algorithms::prf_algorithm(context.version, context.cipher_suite);
    let key_block_size = crate::keys::secret_set_size(context.version, context.cipher_suite)?;

    // RFC 5246 section 6.3: the expansion seed is server random then client
    // random, the reverse of the master-secret derivation
    let mut seed = Vec::with_capacity(context.server_random.len() + context.client_random.len());
    seed.extend_from_slice(&context.server_random);
    seed.extend_from_slice(&context.client_random);

    let key_block = prf(
        prf_algorithm,
        &context.master_secret,
        KEY_EXPANSION_LABEL,
        &seed,
        key_block_size,
    )?;
    tracing::debug!(key_block = hex::encode(&key_block), "expanded key block");

    let mut parser = KeyBlockParser::new(&key_block);
    match profile.cipher_family {
        CipherFamily::Aead => parser.parse_aead(profile.key_size),
        family @ (CipherFamily::Block | CipherFamily::Stream) => parser.parse_mac_and_keys(
            context.version,
            family,
            profile.key_size,
            profile.block_size,
            profile.mac_length(),
        ),
    }
}
