use std::fs;
use std::path::Path;

use image::{DynamicImage, GenericImageView, Rgb, RgbImage};
use tempfile::TempDir;
use tokio_util::sync::CancellationToken;

use half_split::mocks::RecordingSink;
use half_split::{SplitDirection, SplitEngine};

/// Writes a PNG whose red channel encodes the column index.
fn write_gradient_png(path: &Path, width: u32, height: u32) {
    DynamicImage::ImageRgb8(RgbImage::from_fn(width, height, |x, _| {
        Rgb([x as u8, 0, 255])
    }))
    .save(path)
    .unwrap();
}

fn first_column(path: &Path) -> u8 {
    image::open(path).unwrap().to_rgb8().get_pixel(0, 0)[0]
}

fn run(inputs: &[String], direction: SplitDirection) -> RecordingSink {
    let mut sink = RecordingSink::new();
    SplitEngine::new(direction).run(inputs, &mut sink, &CancellationToken::new());
    sink
}

#[test]
fn test_directory_right_to_left() {
    let temp_dir = TempDir::new().unwrap();
    let scans = temp_dir.path().join("scans");
    fs::create_dir_all(&scans).unwrap();
    write_gradient_png(&scans.join("a.png"), 100, 50);
    fs::write(scans.join("b.txt"), b"not an image").unwrap();

    let sink = run(&[scans.display().to_string()], SplitDirection::RightToLeft);

    let half = scans.join("half");
    let part_a = half.join("a_a.png");
    let part_b = half.join("a_b.png");
    assert_eq!(image::open(&part_a).unwrap().dimensions(), (50, 50));
    assert_eq!(image::open(&part_b).unwrap().dimensions(), (50, 50));
    assert_eq!(first_column(&part_a), 50);
    assert_eq!(first_column(&part_b), 0);
    assert!(!half.join("b_a.txt").exists());
    assert_eq!(sink.progress(), vec![1.0]);
    assert_eq!(sink.done(), vec![true]);
}

#[test]
fn test_corrupt_file_does_not_stop_run() {
    let temp_dir = TempDir::new().unwrap();
    let corrupt = temp_dir.path().join("corrupt.png");
    fs::write(&corrupt, b"\x00\x01 these are not image bytes").unwrap();
    let valid = temp_dir.path().join("valid.png");
    write_gradient_png(&valid, 40, 20);

    let sink = run(
        &[corrupt.display().to_string(), valid.display().to_string()],
        SplitDirection::LeftToRight,
    );

    let errors: Vec<_> = sink
        .statuses()
        .into_iter()
        .filter(|s| s.starts_with("Error"))
        .collect();
    assert_eq!(errors.len(), 1);
    assert!(errors[0].contains("corrupt.png"));
    assert!(errors[0].contains("decode"));

    let half = temp_dir.path().join("half");
    assert_eq!(image::open(half.join("valid_a.png")).unwrap().dimensions(), (20, 20));
    assert_eq!(image::open(half.join("valid_b.png")).unwrap().dimensions(), (20, 20));
    assert_eq!(first_column(&half.join("valid_a.png")), 0);
    assert_eq!(first_column(&half.join("valid_b.png")), 20);
    assert!(!half.join("corrupt_a.png").exists());

    assert_eq!(sink.progress(), vec![0.5, 1.0]);
    assert_eq!(sink.done(), vec![true]);
}

#[test]
fn test_empty_input() {
    let sink = run(&[], SplitDirection::RightToLeft);

    assert_eq!(
        sink.statuses().last().map(String::as_str),
        Some(half_split::engine::STATUS_NO_IMAGES)
    );
    assert_eq!(sink.done(), vec![false]);
    assert!(sink.progress().is_empty());
}

#[test]
fn test_missing_inputs_create_no_directory() {
    let temp_dir = TempDir::new().unwrap();
    let inputs = vec![
        String::new(),
        temp_dir.path().join("missing.png").display().to_string(),
        temp_dir.path().join("missing_dir").display().to_string(),
    ];

    let sink = run(&inputs, SplitDirection::LeftToRight);

    assert_eq!(sink.done(), vec![false]);
    assert!(!temp_dir.path().join("half").exists());
}

#[test]
fn test_rerun_overwrites_with_identical_output() {
    let temp_dir = TempDir::new().unwrap();
    let page = temp_dir.path().join("page.png");
    write_gradient_png(&page, 31, 7);
    let inputs = [page.display().to_string()];

    run(&inputs, SplitDirection::RightToLeft);
    let first_a = fs::read(temp_dir.path().join("half/page_a.png")).unwrap();
    let first_b = fs::read(temp_dir.path().join("half/page_b.png")).unwrap();

    let sink = run(&inputs, SplitDirection::RightToLeft);
    assert_eq!(sink.done(), vec![true]);
    assert_eq!(fs::read(temp_dir.path().join("half/page_a.png")).unwrap(), first_a);
    assert_eq!(fs::read(temp_dir.path().join("half/page_b.png")).unwrap(), first_b);
}

#[test]
fn test_direction_swaps_labels_not_pixels() {
    let temp_dir = TempDir::new().unwrap();
    let page = temp_dir.path().join("page.png");
    write_gradient_png(&page, 11, 3);
    let inputs = [page.display().to_string()];
    let half = temp_dir.path().join("half");

    run(&inputs, SplitDirection::LeftToRight);
    let ltr_a = image::open(half.join("page_a.png")).unwrap().to_rgb8();
    let ltr_b = image::open(half.join("page_b.png")).unwrap().to_rgb8();

    run(&inputs, SplitDirection::RightToLeft);
    let rtl_a = image::open(half.join("page_a.png")).unwrap().to_rgb8();
    let rtl_b = image::open(half.join("page_b.png")).unwrap().to_rgb8();

    assert_eq!(ltr_a, rtl_b);
    assert_eq!(ltr_b, rtl_a);
    // odd width: the extra column lands in the right half
    assert_eq!(ltr_a.dimensions(), (5, 3));
    assert_eq!(ltr_b.dimensions(), (6, 3));
}

#[test]
fn test_single_output_directory_for_mixed_sources() {
    let temp_dir = TempDir::new().unwrap();
    let first = temp_dir.path().join("vol1");
    let second = temp_dir.path().join("vol2");
    fs::create_dir_all(&first).unwrap();
    fs::create_dir_all(&second).unwrap();
    write_gradient_png(&first.join("p1.png"), 4, 2);
    write_gradient_png(&second.join("p2.png"), 4, 2);

    let sink = run(
        &[first.display().to_string(), second.display().to_string()],
        SplitDirection::RightToLeft,
    );

    assert_eq!(sink.done(), vec![true]);
    assert!(first.join("half/p1_a.png").exists());
    assert!(first.join("half/p2_b.png").exists());
    assert!(!second.join("half").exists());
}

#[test]
fn test_nested_directory_outputs_beside_first_file() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path().join("root");
    let nested = root.join("chapter");
    fs::create_dir_all(&nested).unwrap();
    write_gradient_png(&nested.join("deep.png"), 4, 2);
    write_gradient_png(&root.join("cover.png"), 4, 2);

    let sink = run(&[root.display().to_string()], SplitDirection::RightToLeft);

    assert_eq!(sink.done(), vec![true]);
    assert!(root.join("half/cover_a.png").exists());
    assert!(root.join("half/deep_a.png").exists());
    assert!(!nested.join("half").exists());
}

#[test]
fn test_preserves_format_by_extension() {
    let temp_dir = TempDir::new().unwrap();
    let page = temp_dir.path().join("page.BMP");
    DynamicImage::ImageRgb8(RgbImage::new(6, 4))
        .save_with_format(&page, image::ImageFormat::Bmp)
        .unwrap();

    let sink = run(&[page.display().to_string()], SplitDirection::LeftToRight);

    assert_eq!(sink.done(), vec![true]);
    let output = temp_dir.path().join("half/page_a.BMP");
    let format = image::ImageReader::open(&output)
        .unwrap()
        .with_guessed_format()
        .unwrap()
        .format();
    assert_eq!(format, Some(image::ImageFormat::Bmp));
}
