//! Embedded image and text extraction against lopdf-built documents.

mod common;

use common::*;
use pdfharvest::extract::{extract_text, ImageExtractor};
use pdfharvest::{PixelMode, SilentObserver};

#[test]
fn test_counter_spans_pages() {
    let dir = tempfile::tempdir().unwrap();
    let pdf = write_pdf(
        dir.path(),
        "mixed.pdf",
        &build_pdf(vec![
            FixturePage::text("one")
                .with_image(rgb_image(4, 3))
                .with_image(gray_image(5, 5)),
            FixturePage::text("two").with_image(cmyk_image(2, 2)),
        ]),
    );
    let images_dir = dir.path().join("images");

    let extraction = ImageExtractor::new(&images_dir, "mixed")
        .extract(&pdf, &mut SilentObserver)
        .unwrap();

    let names: Vec<_> = extraction.extracted().map(|i| i.filename.clone()).collect();
    assert_eq!(
        names,
        vec![
            "mixed_page1_img0.png",
            "mixed_page1_img1.png",
            "mixed_page2_img2.png"
        ]
    );
    for name in &names {
        assert!(images_dir.join(name).exists());
    }

    let modes: Vec<_> = extraction.extracted().map(|i| i.mode).collect();
    assert_eq!(modes, vec![PixelMode::Rgb, PixelMode::Gray, PixelMode::Cmyk]);

    let first = image::open(images_dir.join("mixed_page1_img0.png")).unwrap();
    assert_eq!((first.width(), first.height()), (4, 3));
}

#[test]
fn test_failed_image_does_not_advance_counter() {
    let dir = tempfile::tempdir().unwrap();
    let pdf = write_pdf(
        dir.path(),
        "spot.pdf",
        &build_pdf(vec![FixturePage::text("spot")
            .with_image(separation_image())
            .with_image(rgb_image(2, 2))]),
    );
    let images_dir = dir.path().join("images");

    let extraction = ImageExtractor::new(&images_dir, "spot")
        .extract(&pdf, &mut SilentObserver)
        .unwrap();

    assert_eq!(extraction.extracted_count(), 1);
    assert_eq!(extraction.failed_count(), 1);
    let failure = extraction.failures().next().unwrap();
    assert_eq!(failure.page, 1);
    assert_eq!(failure.name, "Im1");
    assert!(images_dir.join("spot_page1_img0.png").exists());
}

#[test]
fn test_oversized_image_is_recorded_as_failure() {
    let dir = tempfile::tempdir().unwrap();
    let pdf = write_pdf(
        dir.path(),
        "huge.pdf",
        &build_pdf(vec![FixturePage::text("huge")
            .with_image(oversized_image())
            .with_image(rgb_image(2, 2))]),
    );
    let images_dir = dir.path().join("images");

    let extraction = ImageExtractor::new(&images_dir, "huge")
        .extract(&pdf, &mut SilentObserver)
        .unwrap();

    assert_eq!(extraction.failed_count(), 1);
    assert_eq!(extraction.failures().next().unwrap().name, "Im1");
    assert_eq!(extraction.extracted_count(), 1);
    assert!(images_dir.join("huge_page1_img0.png").exists());
}

#[test]
fn test_indexed_palette_expanded() {
    let dir = tempfile::tempdir().unwrap();
    let pdf = write_pdf(
        dir.path(),
        "palette.pdf",
        &build_pdf(vec![FixturePage::text("p").with_image(indexed_image())]),
    );
    let images_dir = dir.path().join("images");

    let extraction = ImageExtractor::new(&images_dir, "palette")
        .extract(&pdf, &mut SilentObserver)
        .unwrap();
    assert_eq!(extraction.extracted_count(), 1);

    let png = image::open(images_dir.join("palette_page1_img0.png"))
        .unwrap()
        .into_rgb8();
    assert_eq!(png.get_pixel(0, 0).0, [0, 0, 255]);
    assert_eq!(png.get_pixel(1, 0).0, [0, 255, 0]);
}

#[test]
fn test_jpeg_stream_decoded() {
    let dir = tempfile::tempdir().unwrap();
    let pdf = write_pdf(
        dir.path(),
        "photo.pdf",
        &build_pdf(vec![FixturePage::text("photo").with_image(jpeg_image(16, 8))]),
    );
    let images_dir = dir.path().join("images");

    let extraction = ImageExtractor::new(&images_dir, "photo")
        .extract(&pdf, &mut SilentObserver)
        .unwrap();

    let image = extraction.extracted().next().unwrap();
    assert_eq!(image.mode, PixelMode::Jpeg);
    assert_eq!((image.width, image.height), (16, 8));
    assert!(image.path.exists());
}

#[test]
fn test_no_images_no_directory() {
    let dir = tempfile::tempdir().unwrap();
    let pdf = write_pdf(
        dir.path(),
        "plain.pdf",
        &build_pdf(vec![FixturePage::text("just words")]),
    );
    let images_dir = dir.path().join("images");

    let extraction = ImageExtractor::new(&images_dir, "plain")
        .extract(&pdf, &mut SilentObserver)
        .unwrap();

    assert_eq!(extraction.extracted_count(), 0);
    assert!(!images_dir.exists());
}

#[test]
fn test_text_per_page() {
    let dir = tempfile::tempdir().unwrap();
    let pdf = write_pdf(
        dir.path(),
        "letters.pdf",
        &build_pdf(vec![
            FixturePage::text("Alpha"),
            FixturePage::default(),
            FixturePage::text("Gamma"),
        ]),
    );

    let doc = extract_text(&pdf, &mut SilentObserver).unwrap();

    assert_eq!(doc.filename, "letters.pdf");
    assert_eq!(doc.pages, 3);
    assert_eq!(doc.content.len(), 3);
    let numbers: Vec<_> = doc.content.iter().map(|p| p.page).collect();
    assert_eq!(numbers, vec![1, 2, 3]);
    assert!(doc.content[0].text.contains("Alpha"));
    assert!(doc.content[1].text.trim().is_empty());
    assert!(doc.content[2].text.contains("Gamma"));
}

#[test]
fn test_text_rejects_non_pdf() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notes.pdf");
    std::fs::write(&path, "these are notes").unwrap();

    assert!(extract_text(&path, &mut SilentObserver).is_err());
}
