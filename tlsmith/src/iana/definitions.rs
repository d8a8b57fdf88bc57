use std::fmt::{Debug, Display};

use super::constants;

/// A cipher suite identifier.
///
/// Unlike the enums in this module, suites are a value + description pair
/// rather than a closed enum: attacker-crafted handshakes routinely carry
/// suite values we have no table entry for, and those still need to be
/// representable. The algorithm resolver decides what is actually supported.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct CipherSuite {
    pub value: [u8; 2],
    pub description: &'static str,
}

impl CipherSuite {
    pub fn from_value(value: [u8; 2]) -> Option<CipherSuite> {
        constants::ALL_SUITES
            .iter()
            .find(|suite| suite.value == value)
            .copied()
    }

    pub fn from_description(description: &str) -> Option<CipherSuite> {
        constants::ALL_SUITES
            .iter()
            .find(|suite| suite.description == description)
            .copied()
    }
}

impl Debug for CipherSuite {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.description)
    }
}

impl Display for CipherSuite {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.description)
    }
}
