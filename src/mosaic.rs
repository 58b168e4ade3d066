//! Mosaic segmentation: nearest-seed regions flattened to their mean color.
//!
//! Algorithm
//! - Draw uniformly random positions, rejecting duplicates, until `num_seeds`
//!   distinct seeds are collected. Seed order is draw order.
//! - Assign each pixel to the seed with the strictly smallest Euclidean
//!   distance; on ties the earlier seed wins.
//! - Replace each pixel with the floor average of its region, per channel.
//!
//! The random source is a parameter; pass a seeded `StdRng` for reproducible
//! output.
//!
//! Complexity: O(W·H·S) distance evaluations for S seeds, pixel-parallel.
use crate::error::{Error, Result};
use crate::picture::Picture;
use crate::pixel::{Pixel, Position};
use log::debug;
use rand::Rng;
use rayon::prelude::*;
use std::collections::HashSet;

/// Mosaic of `picture` with `num_seeds` regions.
///
/// Fails with `InvalidArgument` unless `1 <= num_seeds <= width·height`.
pub fn mosaic<R: Rng>(picture: &Picture, num_seeds: usize, rng: &mut R) -> Result<Picture> {
    let seeds = pick_seeds(picture.width(), picture.height(), num_seeds, rng)?;
    mosaic_with_seeds(picture, &seeds)
}

/// `num_seeds` distinct random positions inside a `width × height` grid.
pub fn pick_seeds<R: Rng>(
    width: usize,
    height: usize,
    num_seeds: usize,
    rng: &mut R,
) -> Result<Vec<Position>> {
    let capacity = width.saturating_mul(height);
    if num_seeds == 0 || num_seeds > capacity {
        return Err(Error::invalid_argument(format!(
            "seed count must be in 1..={capacity}, got {num_seeds}"
        )));
    }
    let mut seen = HashSet::with_capacity(num_seeds);
    let mut seeds = Vec::with_capacity(num_seeds);
    while seeds.len() < num_seeds {
        let p = Position::new(rng.gen_range(0..width), rng.gen_range(0..height));
        if seen.insert(p) {
            seeds.push(p);
        }
    }
    debug!("mosaic: picked {num_seeds} seeds in {width}×{height}");
    Ok(seeds)
}

/// Index of the seed closest to `p`; earlier seeds win ties.
///
/// `seeds` must be non-empty.
pub(crate) fn nearest_seed(p: Position, seeds: &[Position]) -> usize {
    let mut best = 0;
    let mut best_d = p.distance_sq(seeds[0]);
    for (i, seed) in seeds.iter().enumerate().skip(1) {
        let d = p.distance_sq(*seed);
        if d < best_d {
            best = i;
            best_d = d;
        }
    }
    best
}

/// Flatten the regions induced by `seeds`.
///
/// Fails with `InvalidArgument` if `seeds` is empty or a seed lies outside
/// the picture.
pub fn mosaic_with_seeds(picture: &Picture, seeds: &[Position]) -> Result<Picture> {
    if seeds.is_empty() {
        return Err(Error::invalid_argument("mosaic needs at least one seed"));
    }
    if let Some(bad) = seeds.iter().find(|p| picture.pixel(p.x, p.y).is_none()) {
        return Err(Error::invalid_argument(format!(
            "seed {bad:?} is outside {}×{}",
            picture.width(),
            picture.height()
        )));
    }
    let assignment: Vec<usize> = picture
        .pixels()
        .par_iter()
        .map(|px| nearest_seed(px.position(), seeds))
        .collect();

    let mut sums = vec![[0u64; 3]; seeds.len()];
    let mut counts = vec![0u64; seeds.len()];
    for (px, &region) in picture.pixels().iter().zip(&assignment) {
        for (acc, v) in sums[region].iter_mut().zip(px.rgb()) {
            *acc += u64::from(v);
        }
        counts[region] += 1;
    }
    let means: Vec<[i64; 3]> = sums
        .iter()
        .zip(&counts)
        .map(|(sum, &n)| {
            let n = n.max(1);
            [
                (sum[0] / n) as i64,
                (sum[1] / n) as i64,
                (sum[2] / n) as i64,
            ]
        })
        .collect();

    let pixels: Vec<Pixel> = picture
        .pixels()
        .iter()
        .zip(&assignment)
        .map(|(px, &region)| {
            let mut out = *px;
            out.set_rgb(means[region]);
            out
        })
        .collect();
    Ok(Picture::from_pixels(
        picture.width(),
        picture.height(),
        picture.max_val(),
        pixels,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn ramp(w: usize, h: usize) -> Picture {
        Picture::from_fn(w, h, 255, |p| {
            let v = (p.y * w + p.x) as i64 * 10;
            [v, 255 - v, 7]
        })
        .unwrap()
    }

    #[test]
    fn seed_count_is_validated() {
        let mut rng = StdRng::seed_from_u64(1);
        let pic = ramp(2, 2);
        assert!(matches!(mosaic(&pic, 0, &mut rng), Err(Error::InvalidArgument(_))));
        assert!(matches!(mosaic(&pic, 5, &mut rng), Err(Error::InvalidArgument(_))));
    }

    #[test]
    fn seeds_are_distinct_and_in_bounds() {
        let mut rng = StdRng::seed_from_u64(42);
        let seeds = pick_seeds(4, 3, 12, &mut rng).unwrap();
        let unique: HashSet<_> = seeds.iter().copied().collect();
        assert_eq!(unique.len(), 12);
        assert!(seeds.iter().all(|p| p.x < 4 && p.y < 3));
    }

    #[test]
    fn one_seed_per_pixel_is_identity() {
        let pic = ramp(4, 3);
        let mut rng = StdRng::seed_from_u64(7);
        assert_eq!(mosaic(&pic, 12, &mut rng).unwrap(), pic);
    }

    #[test]
    fn single_seed_flattens_to_floor_mean() {
        let pic = ramp(2, 2); // red 0,10,20,30 -> 15; green 255,245,235,225 -> 240
        let out = mosaic_with_seeds(&pic, &[Position::new(1, 1)]).unwrap();
        for px in out.pixels() {
            assert_eq!(px.rgb(), [15, 240, 7]);
        }

        let pic = Picture::from_fn(3, 1, 255, |p| [p.x as i64, 0, 0]).unwrap();
        let out = mosaic_with_seeds(&pic, &[Position::new(0, 0)]).unwrap();
        assert_eq!(out.pixel(2, 0).unwrap().rgb(), [1, 0, 0]);
    }

    #[test]
    fn explicit_seeds_are_validated() {
        let pic = ramp(3, 2);
        assert!(matches!(
            mosaic_with_seeds(&pic, &[]),
            Err(Error::InvalidArgument(_))
        ));
        assert!(matches!(
            mosaic_with_seeds(&pic, &[Position::new(0, 0), Position::new(3, 0)]),
            Err(Error::InvalidArgument(_))
        ));
        assert!(mosaic_with_seeds(&pic, &[Position::new(2, 1)]).is_ok());
    }

    #[test]
    fn ties_go_to_the_earlier_seed() {
        let seeds = [Position::new(0, 0), Position::new(2, 0)];
        assert_eq!(nearest_seed(Position::new(1, 0), &seeds), 0);
        let swapped = [Position::new(2, 0), Position::new(0, 0)];
        assert_eq!(nearest_seed(Position::new(1, 0), &swapped), 0);
        assert_eq!(nearest_seed(Position::new(0, 1), &swapped), 1);
    }

    #[test]
    fn same_rng_seed_gives_same_mosaic() {
        let pic = ramp(6, 5);
        let a = mosaic(&pic, 4, &mut StdRng::seed_from_u64(99)).unwrap();
        let b = mosaic(&pic, 4, &mut StdRng::seed_from_u64(99)).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.dimensions(), pic.dimensions());
    }
}
