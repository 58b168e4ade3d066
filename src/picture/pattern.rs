//! Procedurally generated pictures.
use super::Picture;
use crate::error::{Error, Result};
use log::debug;

const WHITE: [i64; 3] = [255, 255, 255];
const BLACK: [i64; 3] = [0, 0, 0];

/// Square checkerboard of `num_tiles × num_tiles` tiles, each `tile_size`
/// pixels wide, with a white tile at the origin. `max_val` is 255.
pub fn checkerboard(tile_size: usize, num_tiles: usize) -> Result<Picture> {
    if tile_size == 0 || num_tiles == 0 {
        return Err(Error::invalid_argument(format!(
            "tile size and tile count must be positive, got {tile_size} and {num_tiles}"
        )));
    }
    let side = tile_size
        .checked_mul(num_tiles)
        .ok_or_else(|| Error::invalid_argument("checkerboard side overflows"))?;
    debug!("checkerboard: {num_tiles}×{num_tiles} tiles of {tile_size}px ({side}×{side})");

    Picture::from_fn(side, side, 255, |p| {
        if (p.x / tile_size + p.y / tile_size) % 2 == 0 {
            WHITE
        } else {
            BLACK
        }
    })
}
