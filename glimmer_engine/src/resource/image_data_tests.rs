/// Tests for ImageData

use super::*;
use image::{DynamicImage, ImageFormat, RgbaImage};
use std::io::Cursor;

const RED: [u8; 4] = [255, 0, 0, 255];
const BLUE: [u8; 4] = [0, 0, 255, 255];

/// Encode a 1x2 PNG whose top row is red and bottom row is blue
fn red_over_blue_png() -> Vec<u8> {
    let mut raw = Vec::new();
    raw.extend_from_slice(&RED);
    raw.extend_from_slice(&BLUE);
    let img = RgbaImage::from_raw(1, 2, raw).unwrap();

    let mut encoded = Vec::new();
    DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut encoded), ImageFormat::Png)
        .unwrap();
    encoded
}

#[test]
fn test_from_rgba8_accepts_exact_length() {
    let data = ImageData::from_rgba8(2, 2, vec![0u8; 16]).unwrap();
    assert_eq!(data.width(), 2);
    assert_eq!(data.height(), 2);
    assert_eq!(data.pixels().len(), 16);
}

#[test]
fn test_from_rgba8_rejects_wrong_length() {
    let result = ImageData::from_rgba8(2, 2, vec![0u8; 15]);
    assert!(matches!(result, Err(Error::InvalidResource(_))));
}

#[test]
fn test_from_rgba8_rejects_zero_dimension() {
    let result = ImageData::from_rgba8(0, 4, Vec::new());
    assert!(matches!(result, Err(Error::InvalidResource(_))));
}

#[test]
fn test_from_memory_flips_to_bottom_left_origin() {
    let data = ImageData::from_memory(&red_over_blue_png()).unwrap();

    assert_eq!((data.width(), data.height()), (1, 2));
    // Bottom row (blue in the file) comes first
    assert_eq!(data.texel(0, 0), Some(BLUE));
    assert_eq!(data.texel(0, 1), Some(RED));
    assert_eq!(data.texel(0, 2), None);
}

#[test]
fn test_from_memory_garbage_is_resource_not_found() {
    let result = ImageData::from_memory(b"definitely not a png");
    assert!(matches!(result, Err(Error::ResourceNotFound(_))));
}

#[test]
fn test_load_roundtrips_through_file() {
    let path = std::env::temp_dir().join(format!("glimmer_image_{}.png", std::process::id()));
    std::fs::write(&path, red_over_blue_png()).unwrap();

    let data = ImageData::load(&path).unwrap();
    std::fs::remove_file(&path).ok();

    assert_eq!(data.texel(0, 0), Some(BLUE));
}

#[test]
fn test_load_missing_file_names_path() {
    match ImageData::load("res/textures/missing.png") {
        Err(Error::ResourceNotFound(msg)) => assert!(msg.contains("missing.png")),
        other => panic!("expected ResourceNotFound, got {:?}", other.map(|_| ())),
    }
}
