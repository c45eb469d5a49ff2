//! Integration tests for hashing images stored on disk.
//!
//! These tests verify end-to-end behavior including:
//! - Decoding and hashing files through every algorithm
//! - The pinned average-hash reference value
//! - Batch scanning of a directory tree
//! - Corrupt and missing files

use assert_fs::prelude::*;
use image::{DynamicImage, GrayImage, Luma, Rgb, RgbImage};
use image_fingerprint::core::hasher::{HashAlgorithm, HashAlgorithmKind, HasherConfig};
use image_fingerprint::core::scanner::{ImageScanner, ScanConfig, WalkDirScanner};
use image_fingerprint::error::HashError;
use predicates::prelude::*;
use std::path::Path;

/// Frozen 8x8 reference image
fn reference_image() -> GrayImage {
    GrayImage::from_fn(8, 8, |x, y| {
        Luma([((x * 37 + y * 91 + ((x * y) % 7) * 13) % 256) as u8])
    })
}

fn photo(seed: u32) -> RgbImage {
    RgbImage::from_fn(160, 120, |x, y| {
        let v = ((x * (3 + seed) + y * (5 + seed)) % 256) as u8;
        Rgb([v, 255 - v, v / 2])
    })
}

fn hasher(kind: HashAlgorithmKind) -> Box<dyn HashAlgorithm> {
    HasherConfig::new().algorithm(kind).build().unwrap()
}

#[test]
fn reference_png_matches_golden_average_hash() {
    let temp = assert_fs::TempDir::new().unwrap();
    let file = temp.child("reference.png");
    reference_image().save(file.path()).unwrap();
    file.assert(predicate::path::is_file());

    let fingerprint = hasher(HashAlgorithmKind::Average)
        .hash_file(file.path())
        .unwrap();

    assert_eq!(fingerprint.to_hex(), "0e72c73c608f7c71");
}

#[test]
fn every_algorithm_yields_sixteen_hex_digits() {
    let temp = assert_fs::TempDir::new().unwrap();
    let file = temp.child("photo.png");
    photo(1).save(file.path()).unwrap();

    let hex_64 = predicate::str::is_match("^[0-9a-f]{16}$").unwrap();
    for kind in HashAlgorithmKind::ALL {
        let fingerprint = hasher(kind).hash_file(file.path()).unwrap();
        let hex = fingerprint.to_hex();
        assert!(hex_64.eval(hex.as_str()), "{}: {}", kind, hex);
    }
}

#[test]
fn file_and_memory_hashes_agree() {
    let temp = assert_fs::TempDir::new().unwrap();
    let file = temp.child("photo.png");
    let image = photo(2);
    image.save(file.path()).unwrap();

    let hasher = hasher(HashAlgorithmKind::Perceptual);
    let from_file = hasher.hash_file(file.path()).unwrap();
    let from_memory = hasher.hash_image(&DynamicImage::ImageRgb8(image)).unwrap();

    assert_eq!(from_file, from_memory);
}

#[test]
fn jpeg_copy_stays_close_to_png_original() {
    let temp = assert_fs::TempDir::new().unwrap();
    let png = temp.child("photo.png");
    let jpg = temp.child("photo.jpg");
    let image = photo(3);
    image.save(png.path()).unwrap();
    image.save(jpg.path()).unwrap();

    let hasher = hasher(HashAlgorithmKind::Perceptual);
    let original = hasher.hash_file(png.path()).unwrap();
    let compressed = hasher.hash_file(jpg.path()).unwrap();

    let distance = original.distance(&compressed).unwrap();
    assert!(distance <= 10, "distance {}", distance);
}

#[test]
fn corrupt_file_reports_decode_error() {
    let temp = assert_fs::TempDir::new().unwrap();
    let file = temp.child("corrupt.jpg");
    file.write_binary(b"this is not a valid image file").unwrap();

    let result = hasher(HashAlgorithmKind::Average).hash_file(file.path());

    match result {
        Err(HashError::DecodeError { path, reason }) => {
            assert_eq!(path, file.path());
            assert!(!reason.is_empty());
        }
        other => panic!("expected decode error, got {:?}", other),
    }
}

#[test]
fn missing_file_is_an_error() {
    let result = hasher(HashAlgorithmKind::Difference).hash_file(Path::new("/nonexistent/a.png"));
    assert!(result.is_err());
}

#[test]
fn scanner_feeds_batch_hashing() {
    let temp = assert_fs::TempDir::new().unwrap();
    temp.child("nested").create_dir_all().unwrap();
    photo(4).save(temp.child("a.png").path()).unwrap();
    photo(4).save(temp.child("nested/b.png").path()).unwrap();
    temp.child("notes.txt").write_str("not an image").unwrap();

    let scan = WalkDirScanner::new(ScanConfig::default()).scan(&[temp.path().to_path_buf()]);
    assert_eq!(scan.images.len(), 2);
    assert!(scan.errors.is_empty());

    let hasher = hasher(HashAlgorithmKind::Difference);
    let hashes: Vec<_> = scan
        .images
        .iter()
        .map(|image| hasher.hash_file(&image.path).unwrap())
        .collect();

    // Same pixels in both files
    assert_eq!(hashes[0].distance(&hashes[1]).unwrap(), 0);
}
