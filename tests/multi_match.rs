use sentinel::{
    build_response_surface, ImageView, MatchConfig, Matcher, OwnedImage, SentinelError, Template,
    CLIP_FLOOR,
};

/// Binary 0/255 pattern from a xorshift32 stream. Shifted copies of such a
/// pattern correlate at about 0.5, far below the surface clip.
fn binary_template(width: usize, height: usize, seed: u32) -> Vec<u8> {
    let mut state = seed;
    (0..width * height)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            if state & 1 == 1 {
                255
            } else {
                0
            }
        })
        .collect()
}

/// Smooth radial blob; its correlation peak is several pixels wide.
fn gaussian_template(size: usize, sigma: f64) -> Vec<u8> {
    let c = (size - 1) as f64 / 2.0;
    let mut data = Vec::with_capacity(size * size);
    for y in 0..size {
        for x in 0..size {
            let d2 = (x as f64 - c).powi(2) + (y as f64 - c).powi(2);
            data.push((255.0 * (-d2 / (2.0 * sigma * sigma)).exp()).round() as u8);
        }
    }
    data
}

fn plant(width: usize, height: usize, template: &Template, locs: &[(usize, usize)]) -> OwnedImage {
    let mut image = OwnedImage::filled(width, height, 0).unwrap();
    for &(x, y) in locs {
        image.blit(template.view(), x, y);
    }
    image
}

fn sorted_locations(roi: ImageView<'_, u8>, matcher: &Matcher<'_>) -> Vec<(usize, usize)> {
    let mut locs: Vec<_> = matcher
        .match_all(roi)
        .unwrap()
        .iter()
        .map(|c| c.location())
        .collect();
    locs.sort();
    locs
}

#[test]
fn two_planted_copies_are_both_found() {
    let template = Template::new(binary_template(12, 10, 0x9E37_79B9), 12, 10).unwrap();
    let planted = [(10, 5), (90, 7)];
    let roi = plant(142, 25, &template, &planted);
    let matcher = Matcher::new(&template);
    assert_eq!(sorted_locations(roi.view(), &matcher), planted.to_vec());
}

#[test]
fn touching_copies_stay_distinct() {
    let template = Template::new(binary_template(12, 10, 0x9E37_79B9), 12, 10).unwrap();
    let planted = [(5, 8), (17, 8)];
    let roi = plant(64, 32, &template, &planted);
    let matcher = Matcher::new(&template);
    assert_eq!(sorted_locations(roi.view(), &matcher), planted.to_vec());
}

#[test]
fn three_copies_yield_three_candidates() {
    let template = Template::new(binary_template(12, 10, 0x9E37_79B9), 12, 10).unwrap();
    let planted = [(5, 3), (60, 5), (110, 4)];
    let roi = plant(142, 25, &template, &planted);
    let matcher = Matcher::new(&template);
    assert_eq!(sorted_locations(roi.view(), &matcher), planted.to_vec());
}

#[test]
fn repeated_runs_are_identical() {
    let template = Template::new(binary_template(12, 10, 0x1234_5678), 12, 10).unwrap();
    let roi = plant(142, 25, &template, &[(3, 2), (70, 12)]);
    let matcher = Matcher::new(&template);
    let first = matcher.match_all(roi.view()).unwrap();
    let second = matcher.match_all(roi.view()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn broad_peak_yields_single_candidate() {
    let template = Template::new(gaussian_template(15, 3.5), 15, 15).unwrap();
    let roi = plant(60, 40, &template, &[(20, 12)]);

    let surface = build_response_surface(roi.view(), &template).unwrap();
    let above_clip = surface.as_slice().iter().filter(|&&v| v > 0.0).count();
    assert!(above_clip > 9, "peak region should be broad, got {above_clip}");

    let matcher = Matcher::new(&template);
    assert_eq!(sorted_locations(roi.view(), &matcher), vec![(20, 12)]);
}

#[test]
fn low_threshold_is_floored_by_surface_clip() {
    let template = Template::new(gaussian_template(15, 3.5), 15, 15).unwrap();
    let roi = plant(60, 40, &template, &[(20, 12)]);
    let surface = build_response_surface(roi.view(), &template).unwrap();
    assert!(surface
        .as_slice()
        .iter()
        .all(|&v| v == 0.0 || v > CLIP_FLOOR));

    let permissive = Matcher::new(&template).with_config(MatchConfig { threshold: 0.0 });
    let found = permissive.match_all(roi.view()).unwrap();
    assert_eq!(found.len(), 1);
    assert!(found[0].score > CLIP_FLOOR);
}

#[test]
fn threshold_above_one_rejects_everything() {
    let template = Template::new(binary_template(12, 10, 0x9E37_79B9), 12, 10).unwrap();
    let roi = plant(64, 32, &template, &[(5, 8)]);
    let strict = Matcher::new(&template).with_config(MatchConfig { threshold: 1.01 });
    assert!(strict.match_all(roi.view()).unwrap().is_empty());
}

#[test]
fn blank_roi_has_no_candidates() {
    let template = Template::new(binary_template(8, 8, 7), 8, 8).unwrap();
    let roi = OwnedImage::filled(40, 20, 0).unwrap();
    assert!(Matcher::new(&template)
        .match_all(roi.view())
        .unwrap()
        .is_empty());
}

#[test]
fn template_larger_than_roi_fails() {
    let template = Template::new(binary_template(12, 10, 3), 12, 10).unwrap();
    let roi = OwnedImage::filled(20, 9, 0).unwrap();
    let err = Matcher::new(&template).match_all(roi.view()).unwrap_err();
    assert_eq!(
        err,
        SentinelError::InvalidDimensions {
            width: 20,
            height: 9
        }
    );
}

#[test]
fn all_black_template_is_degenerate() {
    let err = Template::new(vec![0; 16], 4, 4).unwrap_err();
    assert!(matches!(err, SentinelError::DegenerateTemplate { .. }));
}

/// Paints `mask` pixels with `on` and the rest black, as an RGB template.
fn colour_template(mask: &[u8], width: usize, height: usize, on: [u8; 3]) -> Template {
    let data = mask
        .iter()
        .flat_map(|&m| if m > 0 { on } else { [0; 3] })
        .collect();
    Template::from_image(OwnedImage::interleaved(data, width, height, 3).unwrap()).unwrap()
}

#[test]
fn hue_only_copy_is_not_a_match() {
    let mask = binary_template(12, 10, 0x9E37_79B9);
    let red = colour_template(&mask, 12, 10, [255, 0, 0]);
    // Same luma as the red pattern, different hue.
    let gray = colour_template(&mask, 12, 10, [54, 54, 54]);

    let mut roi = OwnedImage::interleaved(vec![0; 142 * 25 * 3], 142, 25, 3).unwrap();
    roi.blit(red.view(), 10, 5);
    roi.blit(gray.view(), 90, 7);

    let matcher = Matcher::new(&red);
    assert_eq!(sorted_locations(roi.view(), &matcher), vec![(10, 5)]);
}
