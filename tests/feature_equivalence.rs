#![cfg(any(feature = "rayon", feature = "simd"))]

use sentinel::kernel::scalar::NccScalar;
use sentinel::kernel::Kernel;
use sentinel::{build_response_surface, Matcher, OwnedImage, Template, CLIP_FLOOR};

fn make_texture(width: usize, height: usize) -> Vec<u8> {
    let mut data = Vec::with_capacity(width * height);
    for y in 0..height {
        for x in 0..width {
            let value = ((x * 11) ^ (y * 3) ^ (x * y)) & 0xFF;
            data.push(value as u8);
        }
    }
    data
}

#[test]
fn surface_agrees_with_scalar_reference() {
    let tpl_width = 21;
    let tpl_height = 13;
    let template = Template::new(make_texture(tpl_width, tpl_height), tpl_width, tpl_height)
        .unwrap();

    let background = make_texture(150, 40);
    let mut roi = OwnedImage::new(background.iter().map(|v| v / 2).collect(), 150, 40).unwrap();
    roi.blit(template.view(), 17, 9);
    roi.blit(template.view(), 101, 22);

    let surface = build_response_surface(roi.view(), &template).unwrap();
    assert_eq!(surface.width(), 150 - tpl_width + 1);
    assert_eq!(surface.height(), 40 - tpl_height + 1);

    for y in 0..surface.height() {
        for x in 0..surface.width() {
            let reference = NccScalar::score_at(roi.view(), template.plan(), x, y);
            let got = surface.get(x, y).unwrap();
            if got > 0.0 {
                assert!(
                    (got - reference).abs() < 1e-4,
                    "({x}, {y}): {got} vs {reference}"
                );
            } else {
                // Only scores within float noise of the floor may flip.
                assert!(reference <= CLIP_FLOOR + 1e-4, "({x}, {y}): {reference}");
            }
        }
    }
}

#[test]
fn matcher_finds_planted_copies() {
    let template = Template::new(make_texture(21, 13), 21, 13).unwrap();
    let mut roi = OwnedImage::filled(150, 40, 0).unwrap();
    roi.blit(template.view(), 17, 9);
    roi.blit(template.view(), 101, 22);

    let mut found: Vec<_> = Matcher::new(&template)
        .match_all(roi.view())
        .unwrap()
        .iter()
        .map(|c| c.location())
        .collect();
    found.sort();
    assert_eq!(found, vec![(17, 9), (101, 22)]);
}
