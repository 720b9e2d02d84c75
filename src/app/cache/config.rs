//! Cache configuration types and defaults

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Configuration for the content-addressed cache
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Root directory for cache storage (OS-specific location if None)
    pub cache_root: Option<PathBuf>,
}

impl CacheConfig {
    /// Create a cache configuration with an explicit cache root
    pub fn with_cache_root(cache_root: PathBuf) -> Self {
        Self {
            cache_root: Some(cache_root),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = CacheConfig::default();
        assert_eq!(config.cache_root, None);
    }

    #[test]
    fn test_explicit_root() {
        let root = PathBuf::from("/tmp/engine-cache");
        let config = CacheConfig::with_cache_root(root.clone());
        assert_eq!(config.cache_root, Some(root));
    }
}
