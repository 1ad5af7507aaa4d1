//! Numeric tables carried verbatim from the source this schema is modeled
//! on: the full cipher-suite and compression-method sets, exposed both as
//! named constants (for autocompletion the way the original's
//! `TLSCipherSuite` class offered it) and as enum maps for presentation.

use crate::field::EnumMap;

#[allow(non_snake_case, dead_code)]
pub mod TlsCipherSuite {
    pub const NULL_WITH_NULL_NULL: u16 = 0x0000;
    pub const RSA_WITH_NULL_MD5: u16 = 0x0001;
    pub const RSA_WITH_NULL_SHA1: u16 = 0x0002;
    pub const RSA_WITH_RC4_128_MD5: u16 = 0x0004;
    pub const RSA_WITH_RC4_128_SHA: u16 = 0x0005;
    pub const RSA_WITH_IDEA_CBC_SHA: u16 = 0x0007;
    pub const RSA_EXPORT_WITH_DES40_CBC_SHA: u16 = 0x0008;
    pub const RSA_WITH_DES_CBC_SHA: u16 = 0x0009;
    pub const RSA_WITH_3DES_EDE_CBC_SHA: u16 = 0x000a;
    pub const DHE_DSS_WITH_DES_CBC_SHA: u16 = 0x0012;
    pub const DHE_DSS_WITH_3DES_EDE_CBC_SHA: u16 = 0x0013;
    pub const DHE_RSA_EXPORT_WITH_DES40_CBC_SHA: u16 = 0x0014;
    pub const DHE_RSA_WITH_DES_CBC_SHA: u16 = 0x0015;
    pub const DHE_RSA_WITH_3DES_EDE_CBC_SHA: u16 = 0x0016;
    pub const DHE_DSS_EXPORT_WITH_DES40_CBC_SHA: u16 = 0x0011;
    pub const RSA_EXPORT1024_WITH_RC4_56_MD5: u16 = 0x0060;
    pub const RSA_EXPORT1024_WITH_RC2_CBC_56_MD5: u16 = 0x0061;
    pub const RSA_EXPORT1024_WITH_DES_CBC_SHA: u16 = 0x0062;
    pub const DHE_DSS_EXPORT1024_WITH_DES_CBC_SHA: u16 = 0x0063;
    pub const RSA_EXPORT1024_WITH_RC4_56_SHA: u16 = 0x0064;
    pub const DHE_DSS_EXPORT1024_WITH_RC4_56_SHA: u16 = 0x0065;
    pub const DHE_DSS_WITH_RC4_128_SHA: u16 = 0x0066;
    pub const RSA_WITH_AES_128_CBC_SHA: u16 = 0x002f;
    pub const DHE_DSS_WITH_AES_128_CBC_SHA: u16 = 0x0032;
    pub const DHE_RSA_WITH_AES_128_CBC_SHA: u16 = 0x0033;
    pub const RSA_WITH_NULL_SHA256: u16 = 0x003b;
    pub const RSA_WITH_AES_256_CBC_SHA: u16 = 0x0035;
    pub const DHE_DSS_WITH_AES_256_CBC_SHA: u16 = 0x0038;
    pub const DHE_RSA_WITH_AES_256_CBC_SHA: u16 = 0x0039;
    pub const RSA_WITH_CAMELLIA_256_CBC_SHA: u16 = 0x0084;
    pub const DHE_DSS_WITH_CAMELLIA_256_CBC_SHA: u16 = 0x0087;
    pub const DHE_RSA_WITH_CAMELLIA_256_CBC_SHA: u16 = 0x0088;
    pub const ECDH_ECDSA_WITH_AES_256_CBC_SHA: u16 = 0xc005;
    pub const ECDHE_ECDSA_WITH_AES_256_CBC_SHA: u16 = 0xc00a;
    pub const ECDH_RSA_WITH_AES_256_CBC_SHA: u16 = 0xc00f;
    pub const ECDHE_RSA_WITH_AES_256_CBC_SHA: u16 = 0xc014;
    pub const SRP_SHA_RSA_WITH_AES_256_CBC_SHA: u16 = 0xc021;
    pub const SRP_SHA_DSS_WITH_AES_256_CBC_SHA: u16 = 0xc022;
    /// RFC 7507 inter-operable fallback signal.
    pub const TLS_FALLBACK_SCSV: u16 = 0x5600;
}

pub const CIPHER_SUITES: EnumMap = &[
    (0x0000, "NULL_WITH_NULL_NULL"),
    (0x0001, "RSA_WITH_NULL_MD5"),
    (0x0002, "RSA_WITH_NULL_SHA1"),
    (0x0004, "RSA_WITH_RC4_128_MD5"),
    (0x0005, "RSA_WITH_RC4_128_SHA"),
    (0x0007, "RSA_WITH_IDEA_CBC_SHA"),
    (0x0008, "RSA_EXPORT_WITH_DES40_CBC_SHA"),
    (0x0009, "RSA_WITH_DES_CBC_SHA"),
    (0x000a, "RSA_WITH_3DES_EDE_CBC_SHA"),
    (0x0011, "DHE_DSS_EXPORT_WITH_DES40_CBC_SHA"),
    (0x0012, "DHE_DSS_WITH_DES_CBC_SHA"),
    (0x0013, "DHE_DSS_WITH_3DES_EDE_CBC_SHA"),
    (0x0014, "DHE_RSA_EXPORT_WITH_DES40_CBC_SHA"),
    (0x0015, "DHE_RSA_WITH_DES_CBC_SHA"),
    (0x0016, "DHE_RSA_WITH_3DES_EDE_CBC_SHA"),
    (0x002f, "RSA_WITH_AES_128_CBC_SHA"),
    (0x0032, "DHE_DSS_WITH_AES_128_CBC_SHA"),
    (0x0033, "DHE_RSA_WITH_AES_128_CBC_SHA"),
    (0x0035, "RSA_WITH_AES_256_CBC_SHA"),
    (0x0038, "DHE_DSS_WITH_AES_256_CBC_SHA"),
    (0x0039, "DHE_RSA_WITH_AES_256_CBC_SHA"),
    (0x003b, "RSA_WITH_NULL_SHA256"),
    (0x0060, "RSA_EXPORT1024_WITH_RC4_56_MD5"),
    (0x0061, "RSA_EXPORT1024_WITH_RC2_CBC_56_MD5"),
    (0x0062, "RSA_EXPORT1024_WITH_DES_CBC_SHA"),
    (0x0063, "DHE_DSS_EXPORT1024_WITH_DES_CBC_SHA"),
    (0x0064, "RSA_EXPORT1024_WITH_RC4_56_SHA"),
    (0x0065, "DHE_DSS_EXPORT1024_WITH_RC4_56_SHA"),
    (0x0066, "DHE_DSS_WITH_RC4_128_SHA"),
    (0x0084, "RSA_WITH_CAMELLIA_256_CBC_SHA"),
    (0x0087, "DHE_DSS_WITH_CAMELLIA_256_CBC_SHA"),
    (0x0088, "DHE_RSA_WITH_CAMELLIA_256_CBC_SHA"),
    (0x5600, "TLS_FALLBACK_SCSV"),
    (0xc005, "ECDH_ECDSA_WITH_AES_256_CBC_SHA"),
    (0xc00a, "ECDHE_ECDSA_WITH_AES_256_CBC_SHA"),
    (0xc00f, "ECDH_RSA_WITH_AES_256_CBC_SHA"),
    (0xc014, "ECDHE_RSA_WITH_AES_256_CBC_SHA"),
    (0xc021, "SRP_SHA_RSA_WITH_AES_256_CBC_SHA"),
    (0xc022, "SRP_SHA_DSS_WITH_AES_256_CBC_SHA"),
];

#[allow(non_snake_case, dead_code)]
pub mod TlsCompressionMethod {
    pub const NULL: u8 = 0x00;
    pub const DEFLATE: u8 = 0x01;
}

pub const COMPRESSION_METHODS: EnumMap = &[(0x00, "NULL"), (0x01, "DEFLATE")];
