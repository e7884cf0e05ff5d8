//! Image manifest and loading.
//!
//! Images are requested up front and drawn once they finish decoding;
//! until then (or if a file is missing) the renderer falls back to flat
//! placeholder shapes. Audio is handled by `audio::WebAudio`.

use std::collections::HashMap;

use web_sys::HtmlImageElement;

use crate::config::GameConfig;
use crate::error::GameError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ImageKey {
    Title,
    Sky,
    Ground,
    Dude,
    Boss1,
    Boss2,
    Boss3,
}

/// Every image the game draws, with its source path.
pub const IMAGES: &[(ImageKey, &str)] = &[
    (ImageKey::Title, "boss-battle-game.png"),
    (ImageKey::Sky, "https://labs.phaser.io/assets/skies/space3.png"),
    (ImageKey::Ground, "https://labs.phaser.io/assets/sprites/platform.png"),
    (ImageKey::Dude, "https://labs.phaser.io/assets/sprites/dude.png"),
    (ImageKey::Boss1, "https://labs.phaser.io/assets/sprites/mushroom2.png"),
    (ImageKey::Boss2, "boss-2.png"),
    (ImageKey::Boss3, "boss-3.png"),
];

/// Player sprite sheet frame size.
pub const DUDE_FRAME: (f64, f64) = (32.0, 48.0);

impl ImageKey {
    /// Map a boss sprite key (`boss1`..`boss3`) to its image.
    pub fn for_boss(sprite: &str) -> Option<ImageKey> {
        match sprite {
            "boss1" => Some(ImageKey::Boss1),
            "boss2" => Some(ImageKey::Boss2),
            "boss3" => Some(ImageKey::Boss3),
            _ => None,
        }
    }
}

pub struct Assets {
    images: HashMap<ImageKey, HtmlImageElement>,
}

impl Assets {
    pub fn load(cfg: &GameConfig) -> Result<Self, GameError> {
        let mut images = HashMap::with_capacity(IMAGES.len());
        for &(key, path) in IMAGES {
            let img = HtmlImageElement::new()?;
            img.set_src(&cfg.asset_url(path));
            images.insert(key, img);
        }
        log::debug!("requested {} images", images.len());
        Ok(Self { images })
    }

    /// The image, once it has decoded successfully.
    pub fn image(&self, key: ImageKey) -> Option<&HtmlImageElement> {
        self.images
            .get(&key)
            .filter(|img| img.complete() && img.natural_width() > 0)
    }
}
