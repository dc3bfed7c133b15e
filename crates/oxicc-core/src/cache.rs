//! Content-addressed profile cache
//!
//! Profiles are keyed by a 128-bit BLAKE2b digest of their bytes and held
//! weakly. The cache never keeps a profile alive on its own: once the last
//! caller drops it, the next lookup for the same bytes parses again.
//! Reclaimed entries are swept whenever a new profile is inserted.
//!
//! Two threads missing on the same bytes at once may both parse. Whichever
//! inserts first wins and the other returns the winner's profile.

use std::collections::HashMap;
use std::sync::{Arc, LazyLock, PoisonError, RwLock, Weak};

use blake2::digest::consts::U16;
use blake2::{Blake2b, Digest};
use tracing::trace;

use crate::icc::parse;
use crate::profile::ColorProfile;

type Blake2b128 = Blake2b<U16>;

/// Digest of a profile's bytes
pub type ProfileKey = [u8; 16];

static GLOBAL: LazyLock<ProfileCache> = LazyLock::new(ProfileCache::new);

fn profile_key(data: &[u8]) -> ProfileKey {
    let mut key = ProfileKey::default();
    key.copy_from_slice(&Blake2b128::digest(data));
    key
}

/// A map from content digest to live parsed profiles
#[derive(Debug, Default)]
pub struct ProfileCache {
    entries: RwLock<HashMap<ProfileKey, Weak<ColorProfile>>>,
}

impl ProfileCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide cache
    pub fn global() -> &'static Self {
        &GLOBAL
    }

    /// Return the live profile parsed from identical bytes, or parse and insert
    pub fn get_or_add(&self, data: &[u8]) -> Arc<ColorProfile> {
        let key = profile_key(data);

        let cached = self
            .entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&key)
            .and_then(Weak::upgrade);
        if let Some(profile) = cached {
            trace!(len = data.len(), "profile cache hit");
            return profile;
        }

        let parsed = parse(data);
        trace!(len = data.len(), valid = parsed.is_valid(), "profile cache miss");

        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(existing) = entries.get(&key).and_then(Weak::upgrade) {
            return existing;
        }
        entries.retain(|_, weak| weak.strong_count() > 0);
        entries.insert(key, Arc::downgrade(&parsed));
        parsed
    }

    /// Number of entries whose profile is still alive
    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .filter(|weak| weak.strong_count() > 0)
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop entries whose profile has been reclaimed, returning how many
    pub fn purge(&self) -> usize {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        let before = entries.len();
        entries.retain(|_, weak| weak.strong_count() > 0);
        let purged = before - entries.len();
        if purged > 0 {
            trace!(purged, "purged profile cache");
        }
        purged
    }
}
