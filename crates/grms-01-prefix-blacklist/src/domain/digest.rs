//! Prefix digest
//!
//! SHA-1 over the UTF-8 bytes of a prefix. The algorithm is part of on-disk
//! format version 1; every saved blacklist depends on it.

use std::fmt;

use sha1::{Digest, Sha1};

use crate::error::FormatError;

/// Digest width in bytes
pub const DIGEST_LEN: usize = 20;

/// Digest width in lowercase hex characters
pub const DIGEST_HEX_LEN: usize = DIGEST_LEN * 2;

/// One-way digest standing in for a plaintext prefix
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PrefixDigest([u8; DIGEST_LEN]);

impl PrefixDigest {
    /// Digest of an arbitrary byte string
    pub fn of(bytes: &[u8]) -> Self {
        let hashed = Sha1::digest(bytes);
        let mut out = [0u8; DIGEST_LEN];
        out.copy_from_slice(&hashed);
        Self(out)
    }

    /// Parse a 40-character hex digest
    ///
    /// Line numbers are left at 0; the codec fills them in.
    pub fn from_hex(text: &str) -> Result<Self, FormatError> {
        if text.len() != DIGEST_HEX_LEN {
            return Err(FormatError::DigestWidth {
                line: 0,
                expected: DIGEST_HEX_LEN,
                found: text.len(),
            });
        }

        let mut out = [0u8; DIGEST_LEN];
        hex::decode_to_slice(text, &mut out).map_err(|_| FormatError::DigestNotHex { line: 0 })?;
        Ok(Self(out))
    }

    /// Lowercase hex encoding
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    pub fn as_bytes(&self) -> &[u8; DIGEST_LEN] {
        &self.0
    }
}

impl fmt::Display for PrefixDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for PrefixDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PrefixDigest({})", self.to_hex())
    }
}

/// Hash `prefix`, truncated to its first `limit` bytes
///
/// Truncation counts bytes of the UTF-8 encoding, not characters, and may
/// cut a multibyte character in half. Returns the digest and the number of
/// bytes actually hashed.
pub fn hash_prefix(prefix: &str, limit: Option<usize>) -> (PrefixDigest, usize) {
    let bytes = prefix.as_bytes();
    let effective = limit.map_or(bytes.len(), |limit| limit.min(bytes.len()));
    (PrefixDigest::of(&bytes[..effective]), effective)
}
