// Asset handles
//
// The stage only ever passes sprite handles through to the host, so this
// module is a thin naming layer: handles plus a registry to look them up.

mod handle;
mod manager;

pub use handle::{AssetHandle, AssetId, SpriteAsset, SpriteHandle};
pub use manager::SpriteLibrary;

/// Asset lookup errors
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("Asset not found: {0}")]
    NotFound(String),

    #[error("Asset already loaded: {0}")]
    AlreadyLoaded(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_asset_error_display() {
        let err = AssetError::NotFound("alice/happy".to_string());
        assert_eq!(err.to_string(), "Asset not found: alice/happy");

        let err = AssetError::AlreadyLoaded("alice/happy".to_string());
        assert_eq!(err.to_string(), "Asset already loaded: alice/happy");
    }
}
