//! Random placement of planets and background stars

use glam::DVec2;
use rand::Rng;

use super::state::{Celestial, Star};
use crate::catalog::Catalog;
use crate::consts::STAR_MAX_ANGLE;
use crate::error::LayoutError;
use crate::settings::Settings;

/// Two centers are stacked when they are closer than `separation` on both
/// axes. This is a box test, not a circular distance.
#[inline]
pub fn is_stacked(a: DVec2, b: DVec2, separation: f64) -> bool {
    (a.x - b.x).abs() < separation && (a.y - b.y).abs() < separation
}

/// Scatter decorative stars inside the star margin
pub fn scatter_stars<R: Rng>(settings: &Settings, rng: &mut R) -> Vec<Star> {
    let lo = settings.star_margin;
    let hi = settings.space_size - settings.star_margin;
    (0..settings.star_count())
        .map(|_| Star {
            pos: DVec2::new(rng.random_range(lo..hi), rng.random_range(lo..hi)),
            angle: rng.random_range(0.0..STAR_MAX_ANGLE),
        })
        .collect()
}

/// Rejection-sample a position for every catalog entry, in order, so that no
/// two celestials are stacked. Gives up on the first entry that exhausts
/// `placement_attempts`.
pub fn place_celestials<R: Rng>(
    settings: &Settings,
    catalog: &Catalog,
    rng: &mut R,
) -> Result<Vec<Celestial>, LayoutError> {
    let (lo, hi) = settings.placement_range();
    let mut placed: Vec<Celestial> = Vec::with_capacity(catalog.len());

    for (index, def) in catalog.entries().iter().enumerate() {
        let mut spot = None;
        for attempt in 0..settings.placement_attempts {
            let candidate = DVec2::new(rng.random_range(lo.x..hi.x), rng.random_range(lo.y..hi.y));
            if placed
                .iter()
                .all(|c| !is_stacked(candidate, c.body.pos, settings.placement_separation))
            {
                spot = Some(candidate);
                break;
            }
            log::debug!("{}: candidate {candidate:?} stacked (attempt {})", def.name, attempt + 1);
        }

        let Some(pos) = spot else {
            return Err(LayoutError::Infeasible {
                index,
                name: def.name.clone(),
                attempts: settings.placement_attempts,
            });
        };

        let image = def
            .image
            .clone()
            .unwrap_or_else(|| format!("planets/planet{}.png", index + 1));
        placed.push(Celestial::new(pos, &def.name, &def.description, image, settings));
    }

    Ok(placed)
}
