//! Select-screen portrait loading contract

use spar_core::Result;
use std::path::Path;
use std::sync::Arc;

/// Sprite group holding select-screen portraits.
pub const PORTRAIT_GROUP: u16 = 9000;

/// Image index of the small (grid cell) portrait.
pub const SMALL_PORTRAIT: u16 = 0;

/// Image index of the large (selected) portrait.
pub const LARGE_PORTRAIT: u16 = 1;

/// A decoded portrait image.
#[derive(Clone, Debug)]
pub struct Portrait {
    width: u32,
    height: u32,
    pixels: Arc<[u8]>,
}

impl Portrait {
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        Self {
            width,
            height,
            pixels: pixels.into(),
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }
}

/// Sprite-asset loader contract: decode one image out of a sprite
/// container. Decoding itself is external to this core.
pub trait PortraitLoader: Send + Sync {
    fn load(&self, sprite: &Path, group: u16, image: u16) -> Result<Portrait>;
}
