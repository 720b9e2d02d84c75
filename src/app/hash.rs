//! Hash algorithms for artifact verification
//!
//! The cache identifies content exclusively by digest, so this module is the
//! single place that knows how to turn a file's bytes into a lowercase hex
//! digest string. Digests are computed by streaming the file through a fixed
//! buffer rather than loading it into memory, since engine bundles can be
//! tens of megabytes.

use std::fmt;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use std::str::FromStr;

use sha2::Digest;

use crate::constants::hash::DIGEST_BUFFER_SIZE;
use crate::errors::CacheError;

/// Digest algorithm used to verify downloaded artifacts
///
/// The algorithm is named by the server alongside the expected hash, so the
/// enum parses from and displays as the conventional algorithm name
/// (`"MD5"`, `"SHA-256"`), case insensitively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HashAlgorithm {
    /// MD5 (legacy servers still publish MD5 checksums)
    Md5,
    /// SHA-256
    Sha256,
}

impl HashAlgorithm {
    /// Canonical name of the algorithm
    pub fn name(&self) -> &'static str {
        match self {
            HashAlgorithm::Md5 => "MD5",
            HashAlgorithm::Sha256 => "SHA-256",
        }
    }

    /// Compute the digest of a file's bytes as a lowercase hex string
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the file cannot be opened or read.
    pub fn digest_file(&self, path: &Path) -> std::io::Result<String> {
        let mut reader = BufReader::new(File::open(path)?);
        match self {
            HashAlgorithm::Md5 => {
                let mut context = md5::Context::new();
                stream_into(&mut reader, |chunk| context.consume(chunk))?;
                Ok(to_hex(&context.compute().0))
            }
            HashAlgorithm::Sha256 => {
                let mut hasher = sha2::Sha256::new();
                stream_into(&mut reader, |chunk| hasher.update(chunk))?;
                Ok(to_hex(hasher.finalize().as_slice()))
            }
        }
    }

    /// Compute the digest of an in-memory byte slice as a lowercase hex string
    pub fn digest_bytes(&self, bytes: &[u8]) -> String {
        match self {
            HashAlgorithm::Md5 => to_hex(&md5::compute(bytes).0),
            HashAlgorithm::Sha256 => to_hex(sha2::Sha256::digest(bytes).as_slice()),
        }
    }
}

fn stream_into<R: Read>(reader: &mut R, mut consume: impl FnMut(&[u8])) -> std::io::Result<()> {
    let mut buffer = vec![0u8; DIGEST_BUFFER_SIZE];
    loop {
        let n = reader.read(&mut buffer)?;
        if n == 0 {
            return Ok(());
        }
        consume(&buffer[..n]);
    }
}

fn to_hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for HashAlgorithm {
    type Err = CacheError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "MD5" => Ok(HashAlgorithm::Md5),
            "SHA-256" | "SHA256" => Ok(HashAlgorithm::Sha256),
            _ => Err(CacheError::UnsupportedAlgorithm {
                name: s.to_string(),
            }),
        }
    }
}

// Transparent serialization - the algorithm travels as its name string
impl serde::Serialize for HashAlgorithm {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.name())
    }
}

impl<'de> serde::Deserialize<'de> for HashAlgorithm {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let name = String::deserialize(deserializer)?;
        name.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_md5_known_digest() {
        assert_eq!(
            HashAlgorithm::Md5.digest_bytes(b"hello"),
            "5d41402abc4b2a76b9719d911017c592"
        );
    }

    #[test]
    fn test_sha256_known_digest() {
        assert_eq!(
            HashAlgorithm::Sha256.digest_bytes(b"hello"),
            "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824"
        );
    }

    #[test]
    fn test_digest_file_matches_digest_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("payload.bin");
        let content = b"some artifact content\n".repeat(1000);
        std::fs::write(&path, &content).unwrap();

        for algorithm in [HashAlgorithm::Md5, HashAlgorithm::Sha256] {
            assert_eq!(
                algorithm.digest_file(&path).unwrap(),
                algorithm.digest_bytes(&content)
            );
        }
    }

    #[test]
    fn test_digest_empty_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty");
        std::fs::write(&path, b"").unwrap();

        assert_eq!(
            HashAlgorithm::Md5.digest_file(&path).unwrap(),
            "d41d8cd98f00b204e9800998ecf8427e"
        );
    }

    #[test]
    fn test_parse_algorithm_names() {
        assert_eq!("MD5".parse::<HashAlgorithm>().unwrap(), HashAlgorithm::Md5);
        assert_eq!("md5".parse::<HashAlgorithm>().unwrap(), HashAlgorithm::Md5);
        assert_eq!(
            "SHA-256".parse::<HashAlgorithm>().unwrap(),
            HashAlgorithm::Sha256
        );
        assert_eq!(
            "sha256".parse::<HashAlgorithm>().unwrap(),
            HashAlgorithm::Sha256
        );

        let err = "SHA-512".parse::<HashAlgorithm>().unwrap_err();
        assert!(matches!(err, CacheError::UnsupportedAlgorithm { name } if name == "SHA-512"));
    }

    #[test]
    fn test_display_roundtrip() {
        for algorithm in [HashAlgorithm::Md5, HashAlgorithm::Sha256] {
            let name = algorithm.to_string();
            assert_eq!(name.parse::<HashAlgorithm>().unwrap(), algorithm);
        }
    }

    #[test]
    fn test_serde_as_name_string() {
        let json = serde_json::to_string(&HashAlgorithm::Sha256).unwrap();
        assert_eq!(json, "\"SHA-256\"");

        let parsed: HashAlgorithm = serde_json::from_str("\"md5\"").unwrap();
        assert_eq!(parsed, HashAlgorithm::Md5);

        assert!(serde_json::from_str::<HashAlgorithm>("\"crc32\"").is_err());
    }
}
