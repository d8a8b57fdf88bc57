//! Connection-level negotiation state consumed by key derivation.
//!
//! The context mirrors what a handshake has established so far. Fields are
//! plain data that the record layer and message handlers fill in; the traffic
//! secrets live behind a mutex because key derivation and key-update
//! scheduling can race from different threads of a test harness.

use crate::iana::{CipherSuite, ProtocolVersion};
use std::sync::Mutex;

pub const RANDOM_LENGTH: usize = 32;

/// The TLS 1.3 secret schedule state, plus the key-update request flag.
///
/// `pending_key_update` is consumed by key generation: when set, the next
/// generation derives from the application traffic secrets and clears the
/// flag, all under the same lock acquisition.
#[derive(Debug, Default)]
pub struct TrafficSecrets {
    pub client_handshake_traffic_secret: Option<Vec<u8>>,
    pub server_handshake_traffic_secret: Option<Vec<u8>>,
    pub client_application_traffic_secret: Option<Vec<u8>>,
    pub server_application_traffic_secret: Option<Vec<u8>>,
    pub pending_key_update: bool,
}

#[derive(Debug)]
pub struct NegotiationContext {
    pub version: ProtocolVersion,
    pub cipher_suite: CipherSuite,
    pub client_random: [u8; RANDOM_LENGTH],
    pub server_random: [u8; RANDOM_LENGTH],
    /// Legacy (pre-1.3) master secret, 48 bytes once established.
    pub master_secret: Vec<u8>,
    secrets: Mutex<TrafficSecrets>,
}

impl NegotiationContext {
    pub fn new(version: ProtocolVersion, cipher_suite: CipherSuite) -> Self {
        Self {
            version,
            cipher_suite,
            client_random: [0; RANDOM_LENGTH],
            server_random: [0; RANDOM_LENGTH],
            master_secret: Vec::new(),
            secrets: Mutex::new(TrafficSecrets::default()),
        }
    }

    /// Run `f` with exclusive access to the traffic secrets.
    ///
    /// Key generation uses a single closure invocation to both read the
    /// pending-update flag and clear it, which keeps concurrent generations
    /// from consuming the same key-update request twice.
    pub fn with_secrets<T>(&self, f: impl FnOnce(&mut TrafficSecrets) -> T) -> T {
        let mut secrets = self.secrets.lock().unwrap_or_else(|e| e.into_inner());
        f(&mut secrets)
    }

    /// Request that the next key generation use the updated (application)
    /// secrets. Takes effect exactly once.
    pub fn schedule_key_update(&self) {
        self.with_secrets(|secrets| secrets.pending_key_update = true);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::iana::constants;

    #[test]
    fn key_update_flag_is_consumed_once() {
        let context =
            NegotiationContext::new(ProtocolVersion::TLSv1_3, constants::TLS_AES_128_GCM_SHA256);
        context.schedule_key_update();

        let first = context.with_secrets(|s| std::mem::take(&mut s.pending_key_update));
        let second = context.with_secrets(|s| std::mem::take(&mut s.pending_key_update));
        assert!(first);
        assert!(!second);
    }
}
