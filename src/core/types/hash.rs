use serde::Serialize;
use sha2::{Digest, Sha256};

/// SHA-256 fingerprint of a test-suite file's contents
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Hash(#[serde(serialize_with = "serialize_hash")] [u8; 32]);

fn serialize_hash<S>(hash: &[u8; 32], serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_str(&hex::encode(hash))
}

impl Hash {
    pub fn digest(input: &[u8]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(input);
        let result = hasher.finalize();
        let mut array = [0u8; 32];
        array.copy_from_slice(&result);
        Hash(array)
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// First 12 hex digits, enough to tell suites apart in logs
    pub fn short(&self) -> String {
        self.to_hex()[..12].to_string()
    }
}
