// Type-safe sprite handles

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

/// Unique identifier for an asset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AssetId(pub(crate) u64);

impl AssetId {
    /// Derive an ID from an asset name such as `"alice/happy"`
    pub fn from_path(path: &str) -> Self {
        let mut hasher = DefaultHasher::new();
        path.hash(&mut hasher);
        Self(hasher.finish())
    }

    /// Get the raw u64 value
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

/// Handle to an asset owned by the host.
///
/// The `T` parameter keeps sprite handles from being mixed up with other
/// asset kinds. The stage never dereferences a handle; it only hands it
/// back to the host.
#[derive(Debug)]
pub struct AssetHandle<T> {
    id: AssetId,
    _phantom: PhantomData<fn() -> T>,
}

// Manual impls so the marker type needn't be Clone/PartialEq/Hash
impl<T> Clone for AssetHandle<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for AssetHandle<T> {}

impl<T> PartialEq for AssetHandle<T> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<T> Eq for AssetHandle<T> {}

impl<T> Hash for AssetHandle<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl<T> AssetHandle<T> {
    pub fn new(id: AssetId) -> Self {
        Self {
            id,
            _phantom: PhantomData,
        }
    }

    /// Shorthand for `AssetHandle::new(AssetId::from_path(path))`
    pub fn from_path(path: &str) -> Self {
        Self::new(AssetId::from_path(path))
    }

    /// Get the underlying asset ID
    pub fn id(&self) -> AssetId {
        self.id
    }
}

/// Marker type for character sprites
#[derive(Debug)]
pub struct SpriteAsset;

pub type SpriteHandle = AssetHandle<SpriteAsset>;
