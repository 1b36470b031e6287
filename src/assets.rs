//! Sprites and the load barrier
//!
//! Images are requested by [`AssetKey`] from an [`ImageProvider`]. The game
//! loop starts only after [`load_all`] has every sprite in hand.

use std::collections::HashMap;

use anyhow::{Context, Result};
use log::info;

use crate::render::Rgb;

/// The fixed set of sprites the game draws
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetKey {
    Flyer,
    Background,
    Ground,
    Obstacle,
}

impl AssetKey {
    pub const ALL: [AssetKey; 4] = [
        AssetKey::Flyer,
        AssetKey::Background,
        AssetKey::Ground,
        AssetKey::Obstacle,
    ];
}

/// A bitmap with fully transparent pixels stored as `None`
#[derive(Debug, Clone, PartialEq)]
pub struct Image {
    w: usize,
    h: usize,
    px: Vec<Option<Rgb>>,
}

impl Image {
    pub fn from_fn(w: usize, h: usize, f: impl Fn(usize, usize) -> Option<Rgb>) -> Self {
        let mut px = Vec::with_capacity(w * h);
        for y in 0..h {
            for x in 0..w {
                px.push(f(x, y));
            }
        }
        Self { w, h, px }
    }

    pub fn width(&self) -> usize {
        self.w
    }

    pub fn height(&self) -> usize {
        self.h
    }

    pub fn get(&self, x: usize, y: usize) -> Option<Rgb> {
        if x < self.w && y < self.h {
            self.px[y * self.w + x]
        } else {
            None
        }
    }
}

/// Source of sprite images
#[allow(async_fn_in_trait)]
pub trait ImageProvider {
    async fn load(&self, key: AssetKey) -> Result<Image>;
}

/// Every sprite, ready to draw
#[derive(Debug, Clone)]
pub struct Sprites {
    pub flyer: Image,
    pub background: Image,
    pub ground: Image,
    pub obstacle: Image,
}

/// Request every asset and wait until all of them have arrived.
///
/// There is no timeout: a provider that never completes keeps the game from
/// starting.
pub async fn load_all<P: ImageProvider>(provider: &P) -> Result<Sprites> {
    let total = AssetKey::ALL.len();
    let pending: Vec<_> = AssetKey::ALL
        .iter()
        .map(|&key| async move { (key, provider.load(key).await) })
        .collect();

    let mut loaded = HashMap::with_capacity(total);
    for request in pending {
        let (key, image) = request.await;
        let image = image.with_context(|| format!("failed to load {key:?} sprite"))?;
        info!(
            "Loaded {key:?} sprite {}x{} ({}/{total})",
            image.width(),
            image.height(),
            loaded.len() + 1
        );
        loaded.insert(key, image);
    }

    let mut take = |key: AssetKey| {
        loaded
            .remove(&key)
            .with_context(|| format!("{key:?} sprite missing after load"))
    };
    let sprites = Sprites {
        flyer: take(AssetKey::Flyer)?,
        background: take(AssetKey::Background)?,
        ground: take(AssetKey::Ground)?,
        obstacle: take(AssetKey::Obstacle)?,
    };
    info!("All {total} sprites loaded");
    Ok(sprites)
}

// ── Procedural sprites ──────────────────────────────────────────────────────

const SKY_TOP: Rgb = Rgb(70, 180, 200);
const SKY_BOT: Rgb = Rgb(190, 232, 245);
const CLOUD: Rgb = Rgb(235, 248, 250);
const HILL_FAR: Rgb = Rgb(120, 195, 75);
const HILL_NEAR: Rgb = Rgb(95, 175, 55);
const GRASS: Rgb = Rgb(84, 168, 55);
const GRASS_LIGHT: Rgb = Rgb(110, 200, 70);
const DIRT: Rgb = Rgb(210, 185, 110);
const DIRT_DARK: Rgb = Rgb(185, 160, 90);
const PIPE_L: Rgb = Rgb(74, 122, 26);
const PIPE_M: Rgb = Rgb(100, 170, 40);
const PIPE_R: Rgb = Rgb(115, 191, 46);
const PIPE_HI: Rgb = Rgb(145, 215, 62);
const CAP_DARK: Rgb = Rgb(60, 100, 20);
const BIRD_Y: Rgb = Rgb(245, 200, 66);
const BIRD_HI: Rgb = Rgb(255, 225, 100);
const BIRD_WING: Rgb = Rgb(215, 165, 35);
const BIRD_EYE: Rgb = Rgb(255, 255, 255);
const BIRD_PUPIL: Rgb = Rgb(20, 20, 20);
const BIRD_BEAK: Rgb = Rgb(225, 75, 35);
const BIRD_BEAK_HI: Rgb = Rgb(240, 110, 50);

/// Sprites drawn in code, available immediately
#[derive(Debug, Clone, Copy, Default)]
pub struct ProceduralImages;

impl ImageProvider for ProceduralImages {
    async fn load(&self, key: AssetKey) -> Result<Image> {
        Ok(match key {
            AssetKey::Flyer => flyer(),
            AssetKey::Background => background(),
            AssetKey::Ground => ground(),
            AssetKey::Obstacle => obstacle(),
        })
    }
}

fn background() -> Image {
    const W: usize = 320;
    const H: usize = 480;
    // Hills sit on the ground line; the ground sprite covers the rest
    let base = 368.0;
    Image::from_fn(W, H, |x, y| {
        let xf = x as f32;
        let yf = y as f32;

        let near = ((xf * 0.05).sin() * 10.0 + (xf * 0.11).sin() * 5.0) + 24.0;
        if yf >= base - near {
            return Some(HILL_NEAR);
        }
        let far = ((xf * 0.025).sin() * 18.0 + (xf * 0.07).sin() * 8.0) + 52.0;
        if yf >= base - far {
            return Some(HILL_FAR);
        }

        // Puffy cloud band above the hills
        let cloud = ((xf * 0.045).sin() * 9.0 + (xf * 0.13).cos() * 5.0) + 96.0;
        if yf >= base - cloud && yf < base - far + 10.0 {
            return Some(CLOUD);
        }

        let t = (y * 256 / H) as u16;
        Some(Rgb::lerp(SKY_TOP, SKY_BOT, t))
    })
}

fn ground() -> Image {
    Image::from_fn(320, 112, |x, y| {
        Some(match y {
            0..4 => {
                if (x / 10) % 2 == 0 {
                    GRASS
                } else {
                    GRASS_LIGHT
                }
            }
            4..8 => GRASS,
            8..10 => DIRT_DARK,
            _ => {
                // Diagonal stripes, period divides the half-width so tiles join up
                if (x + y * 2) % 20 < 10 {
                    DIRT
                } else {
                    DIRT_DARK
                }
            }
        })
    })
}

fn obstacle() -> Image {
    const W: usize = 52;
    const CAP_H: usize = 24;
    Image::from_fn(W, 400, |x, y| {
        if y == 0 || y == CAP_H - 1 {
            return Some(CAP_DARK);
        }
        if y < CAP_H {
            // Cap is a touch brighter than the body
            return Some(Rgb::lerp(pipe_shade(x as i32, W as i32), PIPE_HI, 64));
        }
        if x == 0 || x == W - 1 {
            return Some(CAP_DARK);
        }
        Some(pipe_shade(x as i32, W as i32))
    })
}

fn flyer() -> Image {
    Image::from_fn(34, 24, |x, y| {
        let (xf, yf) = (x as f32 + 0.5, y as f32 + 0.5);

        // Beak juts out to the right of the body
        if (26.0..34.0).contains(&xf) && (11.0..18.0).contains(&yf) {
            return Some(if yf < 14.5 { BIRD_BEAK_HI } else { BIRD_BEAK });
        }

        // Body ellipse centered a little left of the sprite center
        let dx = (xf - 15.0) / 14.0;
        let dy = (yf - 12.0) / 11.0;
        if dx * dx + dy * dy > 1.0 {
            return None;
        }

        // Eye
        let ex = xf - 22.0;
        let ey = yf - 7.0;
        if ex * ex + ey * ey <= 16.0 {
            return Some(if ex > 0.5 && ey.abs() < 2.0 { BIRD_PUPIL } else { BIRD_EYE });
        }

        // Wing
        let wx = (xf - 9.0) / 7.0;
        let wy = (yf - 14.0) / 4.0;
        if wx * wx + wy * wy <= 1.0 {
            return Some(BIRD_WING);
        }

        if yf < 6.0 {
            return Some(BIRD_HI);
        }
        Some(BIRD_Y)
    })
}

fn pipe_shade(x: i32, total_w: i32) -> Rgb {
    if total_w <= 1 {
        return PIPE_M;
    }
    let t = (x as f64 / (total_w - 1) as f64 * 256.0) as u16;
    if t < 64 {
        Rgb::lerp(PIPE_L, PIPE_M, (t * 4).min(256))
    } else if t < 100 {
        Rgb::lerp(PIPE_M, PIPE_HI, ((t - 64) * 7).min(256))
    } else if t < 160 {
        Rgb::lerp(PIPE_HI, PIPE_R, ((t - 100) * 4).min(256))
    } else {
        Rgb::lerp(PIPE_R, PIPE_L, ((t - 160) * 3).min(256))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_load_all_procedural() {
        let sprites = pollster::block_on(load_all(&ProceduralImages)).expect("sprites");
        assert_eq!((sprites.flyer.width(), sprites.flyer.height()), (34, 24));
        assert_eq!((sprites.background.width(), sprites.background.height()), (320, 480));
        assert_eq!((sprites.ground.width(), sprites.ground.height()), (320, 112));
        assert_eq!((sprites.obstacle.width(), sprites.obstacle.height()), (52, 400));
    }

    #[test]
    fn test_flyer_has_transparent_corners() {
        let flyer = flyer();
        assert_eq!(flyer.get(0, 0), None);
        assert_eq!(flyer.get(33, 23), None);
        assert!(flyer.get(15, 12).is_some());
    }

    #[test]
    fn test_ground_tiles_seamlessly() {
        let ground = ground();
        for y in 0..ground.height() {
            assert_eq!(ground.get(0, y), ground.get(160, y), "row {y}");
        }
    }

    struct Counting {
        calls: Cell<usize>,
        fail_on: Option<AssetKey>,
    }

    impl ImageProvider for Counting {
        async fn load(&self, key: AssetKey) -> Result<Image> {
            self.calls.set(self.calls.get() + 1);
            if Some(key) == self.fail_on {
                anyhow::bail!("unreachable host");
            }
            Ok(Image::from_fn(1, 1, |_, _| None))
        }
    }

    #[test]
    fn test_barrier_requests_every_key_once() {
        let provider = Counting {
            calls: Cell::new(0),
            fail_on: None,
        };
        pollster::block_on(load_all(&provider)).expect("sprites");
        assert_eq!(provider.calls.get(), AssetKey::ALL.len());
    }

    #[test]
    fn test_failed_asset_names_the_key() {
        let provider = Counting {
            calls: Cell::new(0),
            fail_on: Some(AssetKey::Ground),
        };
        let err = pollster::block_on(load_all(&provider)).expect_err("ground fails");
        assert!(format!("{err:#}").contains("Ground"));
    }
}
