//! Named constants for the cipher suites the algorithm tables know about.
//!
//! Values are from the IANA TLS Cipher Suites registry,
//! https://www.iana.org/assignments/tls-parameters/tls-parameters.xhtml#tls-parameters-4

use super::CipherSuite;

macro_rules! suite {
    ($name:ident, $hi:literal, $lo:literal) => {
        pub const $name: CipherSuite = CipherSuite {
            value: [$hi, $lo],
            description: stringify!($name),
        };
    };
}

// TLS 1.3
suite!(TLS_AES_128_GCM_SHA256, 0x13, 0x01);
suite!(TLS_AES_256_GCM_SHA384, 0x13, 0x02);
suite!(TLS_CHACHA20_POLY1305_SHA256, 0x13, 0x03);

// AEAD
suite!(TLS_RSA_WITH_AES_128_GCM_SHA256, 0x00, 0x9C);
suite!(TLS_RSA_WITH_AES_256_GCM_SHA384, 0x00, 0x9D);
suite!(TLS_ECDHE_RSA_WITH_AES_128_GCM_SHA256, 0xC0, 0x2F);
suite!(TLS_ECDHE_RSA_WITH_AES_256_GCM_SHA384, 0xC0, 0x30);
suite!(TLS_ECDHE_ECDSA_WITH_AES_128_GCM_SHA256, 0xC0, 0x2B);
suite!(TLS_ECDHE_ECDSA_WITH_AES_256_GCM_SHA384, 0xC0, 0x2C);
suite!(TLS_ECDHE_RSA_WITH_CHACHA20_POLY1305_SHA256, 0xCC, 0xA8);
suite!(TLS_ECDHE_ECDSA_WITH_CHACHA20_POLY1305_SHA256, 0xCC, 0xA9);

// Block (CBC)
suite!(TLS_RSA_WITH_3DES_EDE_CBC_SHA, 0x00, 0x0A);
suite!(TLS_RSA_WITH_AES_128_CBC_SHA, 0x00, 0x2F);
suite!(TLS_RSA_WITH_AES_256_CBC_SHA, 0x00, 0x35);
suite!(TLS_RSA_WITH_AES_128_CBC_SHA256, 0x00, 0x3C);
suite!(TLS_RSA_WITH_AES_256_CBC_SHA256, 0x00, 0x3D);
suite!(TLS_ECDHE_RSA_WITH_AES_128_CBC_SHA, 0xC0, 0x13);
suite!(TLS_ECDHE_RSA_WITH_AES_256_CBC_SHA, 0xC0, 0x14);
suite!(TLS_ECDHE_RSA_WITH_AES_128_CBC_SHA256, 0xC0, 0x27);
suite!(TLS_ECDHE_RSA_WITH_AES_256_CBC_SHA384, 0xC0, 0x28);

// Stream
suite!(TLS_RSA_WITH_RC4_128_MD5, 0x00, 0x04);
suite!(TLS_RSA_WITH_RC4_128_SHA, 0x00, 0x05);
suite!(TLS_ECDHE_RSA_WITH_RC4_128_SHA, 0xC0, 0x11);

// NULL bulk cipher, kept so the resolver can report a useful error
suite!(TLS_RSA_WITH_NULL_SHA, 0x00, 0x02);
suite!(TLS_RSA_WITH_NULL_SHA256, 0x00, 0x3B);

pub static ALL_SUITES: &[CipherSuite] = &[
    TLS_AES_128_GCM_SHA256,
    TLS_AES_256_GCM_SHA384,
    TLS_CHACHA20_POLY1305_SHA256,
    TLS_RSA_WITH_AES_128_GCM_SHA256,
    TLS_RSA_WITH_AES_256_GCM_SHA384,
    TLS_ECDHE_RSA_WITH_AES_128_GCM_SHA256,
    TLS_ECDHE_RSA_WITH_AES_256_GCM_SHA384,
    TLS_ECDHE_ECDSA_WITH_AES_128_GCM_SHA256,
    TLS_ECDHE_ECDSA_WITH_AES_256_GCM_SHA384,
    TLS_ECDHE_RSA_WITH_CHACHA20_POLY1305_SHA256,
    TLS_ECDHE_ECDSA_WITH_CHACHA20_POLY1305_SHA256,
    TLS_RSA_WITH_3DES_EDE_CBC_SHA,
    TLS_RSA_WITH_AES_128_CBC_SHA,
    TLS_RSA_WITH_AES_256_CBC_SHA,
    TLS_RSA_WITH_AES_128_CBC_SHA256,
    TLS_RSA_WITH_AES_256_CBC_SHA256,
    TLS_ECDHE_RSA_WITH_AES_128_CBC_SHA,
    TLS_ECDHE_RSA_WITH_AES_256_CBC_SHA,
    TLS_ECDHE_RSA_WITH_AES_128_CBC_SHA256,
    TLS_ECDHE_RSA_WITH_AES_256_CBC_SHA384,
    TLS_RSA_WITH_RC4_128_MD5,
    TLS_RSA_WITH_RC4_128_SHA,
    TLS_ECDHE_RSA_WITH_RC4_128_SHA,
    TLS_RSA_WITH_NULL_SHA,
    TLS_RSA_WITH_NULL_SHA256,
];
