use std::fs;

use qrsave::{
    Error, ErrorCorrection, QrDecoder, QrPayload, RenderOptions, generate, generate_verified,
    verify_file,
};

#[test]
fn written_png_decodes_to_payload() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("out.png");

    let report = generate("https://example.com/file", &path, RenderOptions::default())
        .expect("generate png");

    assert_eq!(report.human(), format!("QR code saved to {}", path.display()));
    assert_eq!(report.format, "png");
    assert_eq!(report.ecc, ErrorCorrection::M);
    assert_eq!(report.byte_length as u64, fs::metadata(&path).unwrap().len());

    let decoded = QrDecoder::new().decode_file(&path).expect("decode");
    assert_eq!(decoded.as_str(), Some("https://example.com/file"));
}

#[test]
fn rerun_overwrites_with_identical_bytes() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("out.png");

    generate("same input", &path, RenderOptions::default()).expect("first run");
    let first = fs::read(&path).unwrap();
    generate("same input", &path, RenderOptions::default()).expect("second run");
    let second = fs::read(&path).unwrap();

    assert_eq!(first, second);
}

#[test]
fn rerun_replaces_previous_content() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("out.png");

    generate("first", &path, RenderOptions::default()).expect("first run");
    generate("second", &path, RenderOptions::default()).expect("second run");

    let decoded = QrDecoder::new().decode_file(&path).expect("decode");
    assert_eq!(decoded.as_str(), Some("second"));
}

#[test]
fn missing_directory_fails_without_creating_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("nope").join("out.png");

    let err = generate("payload", &path, RenderOptions::default()).unwrap_err();

    assert!(matches!(err, Error::OutputDirMissing(_)));
    assert!(!path.exists());
    assert!(!dir.path().join("nope").exists());
}

#[test]
fn oversized_payload_fails_without_creating_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("big.png");
    let payload = "x".repeat(5000);

    let err = generate(payload, &path, RenderOptions::default()).unwrap_err();

    assert!(matches!(err, Error::DataTooLong { .. }));
    assert!(err.is_encoding());
    assert!(!path.exists());
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn capacity_depends_on_error_correction() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("cap.png");
    // Fits in version 40-L (2953 bytes) but not 40-H (1273 bytes).
    let payload = vec![0x42u8; 2000];

    let low = RenderOptions {
        ecc: ErrorCorrection::L,
        module_size: 1,
        ..RenderOptions::default()
    };
    let high = RenderOptions {
        ecc: ErrorCorrection::H,
        ..low
    };

    assert!(matches!(
        generate(payload.clone(), &path, high),
        Err(Error::DataTooLong { .. })
    ));
    assert!(!path.exists());

    let report = generate(payload, &path, low).expect("fits at L");
    assert!((30..=40).contains(&report.version));
}

#[test]
fn unknown_extension_is_rejected() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("out.unknown");

    let err = generate("payload", &path, RenderOptions::default()).unwrap_err();
    assert!(matches!(err, Error::UnsupportedFormat(_)));
    assert!(!path.exists());
}

#[test]
fn svg_output_is_written_and_verifiable() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("out.svg");

    let report = generate_verified("vector", &path, RenderOptions::default()).expect("svg");

    assert!(report.verified);
    assert_eq!(report.format, "svg");
    let contents = fs::read_to_string(&path).unwrap();
    assert!(contents.contains("<svg"));
}

#[test]
fn verified_generation_for_other_raster_formats() {
    let dir = tempfile::tempdir().expect("tempdir");

    for name in ["out.bmp", "out.jpg", "out.tiff"] {
        let path = dir.path().join(name);
        let report =
            generate_verified("https://example.com/file", &path, RenderOptions::default())
                .unwrap_or_else(|e| panic!("{name}: {e}"));
        assert!(report.verified, "{name}");
    }
}

#[test]
fn verify_detects_mismatch() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("out.png");

    generate("actual", &path, RenderOptions::default()).expect("generate");

    let err = verify_file(
        &path,
        &QrPayload::from("expected"),
        RenderOptions::default(),
    )
    .unwrap_err();
    assert!(matches!(err, Error::VerifyMismatch { .. }));
}

#[test]
fn no_temporary_file_left_behind() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("out.png");

    generate("tidy", &path, RenderOptions::default()).expect("generate");

    let names: Vec<_> = fs::read_dir(dir.path())
        .unwrap()
        .map(|entry| entry.unwrap().file_name())
        .collect();
    assert_eq!(names, vec![std::ffi::OsString::from("out.png")]);
}

#[test]
fn verify_rejects_tampered_svg() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("out.svg");

    generate("vector", &path, RenderOptions::default()).expect("generate svg");
    fs::write(&path, b"garbage, not an svg").unwrap();

    let err = verify_file(&path, &QrPayload::from("vector"), RenderOptions::default())
        .unwrap_err();
    assert!(matches!(err, Error::VerifyMismatch { .. }));
}

#[test]
fn verify_rejects_svg_for_other_payload() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("out.svg");

    generate("actual", &path, RenderOptions::default()).expect("generate svg");

    let err = verify_file(&path, &QrPayload::from("expected"), RenderOptions::default())
        .unwrap_err();
    assert!(matches!(err, Error::VerifyMismatch { .. }));
}

#[test]
fn verify_missing_svg_is_read_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("never-written.svg");

    let err = verify_file(&path, &QrPayload::from("vector"), RenderOptions::default())
        .unwrap_err();
    assert!(matches!(err, Error::Read { .. }));
}

#[test]
fn destination_that_is_a_directory_fails_cleanly() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("out.png");
    fs::create_dir(&path).unwrap();

    let err = generate("payload", &path, RenderOptions::default()).unwrap_err();

    assert!(matches!(err, Error::Write { .. }));
    assert!(path.is_dir());
    assert!(!dir.path().join("out.png.part").exists());
}

#[test]
fn huge_module_size_is_an_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("huge.png");
    let options = RenderOptions {
        module_size: u32::MAX / 8,
        ..RenderOptions::default()
    };

    let err = generate("hi", &path, options).unwrap_err();

    assert!(matches!(err, Error::ImageTooLarge { .. }));
    assert!(!path.exists());
}
