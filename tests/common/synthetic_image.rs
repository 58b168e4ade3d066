use layered_image::Picture;

/// Two-tone checkerboard with `cell`-pixel cells, dark in the top-left cell.
pub fn checkerboard(width: usize, height: usize, cell: usize) -> Picture {
    assert!(cell > 0, "cell size must be positive");
    Picture::from_fn(width, height, 255, |p| {
        let val = if (p.x / cell + p.y / cell) & 1 == 0 { 32 } else { 220 };
        [val, val, val]
    })
    .expect("checkerboard dimensions must be positive")
}

/// Horizontal red ramp, vertical green ramp, constant blue.
pub fn gradient(width: usize, height: usize) -> Picture {
    Picture::from_fn(width, height, 255, |p| {
        [
            (p.x * 255 / (width - 1).max(1)) as i64,
            (p.y * 255 / (height - 1).max(1)) as i64,
            128,
        ]
    })
    .expect("gradient dimensions must be positive")
}

/// Every pixel set to `rgb`.
pub fn uniform(width: usize, height: usize, rgb: [i64; 3]) -> Picture {
    Picture::filled(width, height, 255, rgb).expect("uniform dimensions must be positive")
}
