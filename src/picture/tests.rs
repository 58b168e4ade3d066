use super::*;

fn uniform(width: usize, height: usize, rgb: [i64; 3]) -> Picture {
    Picture::filled(width, height, 255, rgb).unwrap()
}

fn ramp(width: usize, height: usize) -> Picture {
    Picture::from_fn(width, height, 255, |p| {
        let v = (p.y * width + p.x) as i64;
        [v, v * 2, v * 3]
    })
    .unwrap()
}

#[test]
fn construction_checks_grid_shape() {
    assert!(matches!(
        Picture::new(2, 2, 255, vec![vec![]]),
        Err(Error::InvalidArgument(_))
    ));
    assert!(Picture::filled(0, 3, 255, [0, 0, 0]).is_err());

    let rows = vec![vec![
        Pixel::new(Position::new(1, 0), 255, 1, 1, 1),
        Pixel::new(Position::new(0, 0), 255, 1, 1, 1),
    ]];
    assert!(matches!(
        Picture::new(2, 1, 255, rows),
        Err(Error::InvalidArgument(_))
    ));
}

#[test]
fn construction_rejects_mismatched_max_val() {
    let rows = vec![vec![Pixel::new(Position::new(0, 0), 15, 1, 1, 1)]];
    assert!(Picture::new(1, 1, 255, rows).is_err());
}

#[test]
fn rows_round_trip_through_constructor() {
    let pic = ramp(3, 2);
    let rebuilt = Picture::new(3, 2, 255, pic.to_rows()).unwrap();
    assert_eq!(pic, rebuilt);
}

#[test]
fn channel_plane_is_row_major() {
    let pic = ramp(3, 2);
    assert_eq!(pic.channel_plane(Channel::Red), vec![vec![0, 1, 2], vec![3, 4, 5]]);
    assert_eq!(pic.channel_plane(Channel::Blue)[1], vec![9, 12, 15]);
}

#[test]
fn window_is_zero_padded_at_corner() {
    let pic = ramp(3, 3);
    let window = pic
        .windowed_subset(3, Position::new(0, 0), Channel::Red)
        .unwrap();
    assert_eq!(window, vec![vec![0, 0, 0], vec![0, 0, 1], vec![0, 3, 4]]);
}

#[test]
fn window_validates_dimension_and_center() {
    let pic = ramp(3, 3);
    assert!(matches!(
        pic.windowed_subset(2, Position::new(1, 1), Channel::Red),
        Err(Error::InvalidArgument(_))
    ));
    assert!(pic.windowed_subset(0, Position::new(1, 1), Channel::Red).is_err());
    assert!(pic.windowed_subset(3, Position::new(3, 0), Channel::Red).is_err());
    let single = pic
        .windowed_subset(1, Position::new(2, 2), Channel::Green)
        .unwrap();
    assert_eq!(single, vec![vec![16]]);
}

#[test]
fn blur_of_small_uniform_picture_darkens_from_padding() {
    let pic = uniform(2, 2, [16, 32, 64]);
    let blurred = pic.filter(&Kernel::blur());
    for px in blurred.pixels() {
        assert_eq!(px.rgb(), [9, 18, 36]);
    }
}

#[test]
fn filter_leaves_source_untouched() {
    let pic = ramp(4, 4);
    let copy = pic.clone();
    let _ = pic.filter(&Kernel::sharpen());
    let _ = pic.color_transform(&ColorMatrix::sepia());
    assert_eq!(pic, copy);
}

#[test]
fn identity_kernel_is_a_no_op() {
    let pic = ramp(4, 3);
    let identity = Kernel::from_rows(&[[0.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 0.0]]).unwrap();
    assert_eq!(pic.filter(&identity), pic);
}

#[test]
fn filter_truncates_and_clamps() {
    let pic = uniform(1, 1, [10, 200, 3]);
    let scale = Kernel::from_rows(&[[1.55]]).unwrap();
    let out = pic.filter(&scale);
    // 15.5 -> 15, 310 -> 255, 4.65 -> 4
    assert_eq!(out.pixel(0, 0).unwrap().rgb(), [15, 255, 4]);

    let negate = Kernel::from_rows(&[[-1.0]]).unwrap();
    assert_eq!(pic.filter(&negate).pixel(0, 0).unwrap().rgb(), [0, 0, 0]);
}

#[test]
fn sharpen_keeps_interior_of_flat_region_bright() {
    let pic = uniform(7, 7, [100, 100, 100]);
    let out = pic.filter(&Kernel::sharpen());
    // Centre pixel sees the full 5×5 window: 16·(-0.125) + 8·0.25 + 1 = 1.
    assert_eq!(out.pixel(3, 3).unwrap().rgb(), [100, 100, 100]);
    // Corner sees only part of the negative ring: 0.25·3 + 1 - 0.125·5 = 1.125
    assert_eq!(out.pixel(0, 0).unwrap().rgb(), [112, 112, 112]);
}

#[test]
fn monochrome_and_sepia_match_reference_values() {
    let pic = uniform(1, 1, [100, 75, 50]);
    let mono = pic.color_transform(&ColorMatrix::monochrome());
    assert_eq!(mono.pixel(0, 0).unwrap().rgb(), [78, 78, 78]);
    let sepia = pic.color_transform(&ColorMatrix::sepia());
    assert_eq!(sepia.pixel(0, 0).unwrap().rgb(), [106, 94, 73]);
}

#[test]
fn sepia_clamps_bright_pixels() {
    let pic = uniform(2, 1, [255, 255, 255]);
    let sepia = pic.color_transform(&ColorMatrix::sepia());
    // 0.393+0.769+0.189 > 1 and 0.349+0.686+0.168 > 1, 0.272+0.534+0.131 < 1
    assert_eq!(sepia.pixel(1, 0).unwrap().rgb(), [255, 255, 238]);
}

#[test]
fn rows_iterator_matches_height() {
    let pic = ramp(5, 4);
    assert_eq!(pic.rows().len(), 4);
    assert!(pic.rows().all(|r| r.len() == 5));
    assert_eq!(GridView::len(&pic), 20);
}
