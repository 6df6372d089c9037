use crate::serializer::{Serializer, Writer};
use blake3::hash as blake3_hash;
use serde::de::Error as SerdeError;
use serde::{Deserialize, Serialize};
use std::{
    convert::TryInto,
    fmt::{Display, Error, Formatter},
    hash::Hasher,
    str::FromStr,
};

use super::CryptoError;

pub const HASH_SIZE: usize = 32; // 32 bytes / 256 bits

#[derive(Eq, PartialEq, PartialOrd, Ord, Clone, Debug)]
pub struct Hash([u8; HASH_SIZE]);

impl Hash {
    pub const fn new(bytes: [u8; HASH_SIZE]) -> Self {
        Hash(bytes)
    }

    pub const fn zero() -> Self {
        Hash::new([0; HASH_SIZE])
    }

    pub fn as_bytes(&self) -> &[u8; HASH_SIZE] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    // First bytes of the hash in hex, enough to tell events apart in logs
    pub fn short_hex(&self) -> String {
        hex::encode(&self.0[..4])
    }
}

impl FromStr for Hash {
    type Err = CryptoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = hex::decode(s).map_err(|e| CryptoError::InvalidHex(e.to_string()))?;
        let len = bytes.len();
        let bytes: [u8; HASH_SIZE] = bytes
            .try_into()
            .map_err(|_| CryptoError::InvalidHashLength { len, expected: HASH_SIZE })?;
        Ok(Hash::new(bytes))
    }
}

// Hash a byte array using the blake3 algorithm
#[inline(always)]
pub fn hash(value: &[u8]) -> Hash {
    let result: [u8; HASH_SIZE] = blake3_hash(value).into();
    Hash(result)
}

impl Serializer for Hash {
    fn write(&self, writer: &mut Writer) {
        writer.write_hash(self);
    }

    fn size(&self) -> usize {
        HASH_SIZE
    }
}

impl std::hash::Hash for Hash {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.hash(state);
    }
}

impl Display for Hash {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        write!(f, "{}", &self.to_hex())
    }
}

impl Serialize for Hash {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'a> Deserialize<'a> for Hash {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'a>,
    {
        let hex = String::deserialize(deserializer)?;
        if hex.len() != HASH_SIZE * 2 {
            return Err(SerdeError::custom("Invalid hex length"));
        }

        let decoded_hex = hex::decode(hex).map_err(SerdeError::custom)?;
        let bytes: [u8; 32] = decoded_hex
            .try_into()
            .map_err(|_| SerdeError::custom("Could not transform hex to bytes array for Hash"))?;
        Ok(Hash::new(bytes))
    }
}

pub trait Hashable: Serializer {
    #[inline(always)]
    fn hash(&self) -> Hash {
        let bytes = self.to_bytes();
        hash(&bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_hex_roundtrip() {
        let h = hash(b"hashgraph");
        let parsed = Hash::from_str(&h.to_hex()).unwrap();
        assert_eq!(h, parsed);
        assert_eq!(h.to_string(), h.to_hex());
    }

    #[test]
    fn test_hash_from_str_rejects_bad_input() {
        assert!(matches!(Hash::from_str("zz"), Err(CryptoError::InvalidHex(_))));
        assert_eq!(
            Hash::from_str("abcd"),
            Err(CryptoError::InvalidHashLength { len: 2, expected: HASH_SIZE })
        );
    }

    #[test]
    fn test_hash_serde_as_hex_string() {
        let h = Hash::new([7u8; HASH_SIZE]);
        let json = serde_json::to_string(&h).unwrap();
        assert_eq!(json, format!("\"{}\"", h.to_hex()));

        let back: Hash = serde_json::from_str(&json).unwrap();
        assert_eq!(back, h);

        assert!(serde_json::from_str::<Hash>("\"abcd\"").is_err());
    }

    #[test]
    fn test_short_hex() {
        let h = Hash::new([0xab; HASH_SIZE]);
        assert_eq!(h.short_hex(), "abababab");
    }
}
