use std::fs;

use chrono::NaiveDate;
use tempfile::tempdir;

use ianimate_core::archive::structured_search;
use ianimate_core::timebase::{canonicalize, TimeToken};

fn token(y: i32, mo: u32, d: u32, h: u32) -> TimeToken {
    canonicalize(
        NaiveDate::from_ymd_opt(y, mo, d)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap(),
    )
}

fn at(root: &std::path::Path, year: &str, month: &str) -> std::path::PathBuf {
    let dir = root.join(year).join(month);
    fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn finds_one_file_per_token_across_months() {
    let root = tempdir().unwrap();
    let january = at(root.path(), "2024", "January");
    let march = at(root.path(), "2024", "March");
    fs::write(january.join("ips_20240110-0300UT.png"), b"x").unwrap();
    fs::write(january.join("ips_20240110-0900UT.png"), b"x").unwrap();
    fs::write(march.join("ips_20240305-1500UT.png"), b"x").unwrap();

    let times = vec![
        token(2024, 1, 10, 3),
        token(2024, 1, 10, 9),
        token(2024, 3, 5, 15),
    ];
    let matched = structured_search(root.path(), &times, ".png");
    assert_eq!(matched.len(), 3);
    assert!(matched[0].starts_with(&january));
    assert!(matched[2].starts_with(&march));
}

#[test]
fn missing_month_directory_is_skipped_without_aborting() {
    let root = tempdir().unwrap();
    let january = at(root.path(), "2024", "January");
    fs::write(january.join("ips_20240110-0300UT.png"), b"x").unwrap();
    // No February directory at all.
    let march = at(root.path(), "2024", "March");
    fs::write(march.join("ips_20240305-1500UT.png"), b"x").unwrap();

    let times = vec![
        token(2024, 1, 10, 3),
        token(2024, 2, 10, 3),
        token(2024, 2, 10, 9),
        token(2024, 3, 5, 15),
    ];
    let matched = structured_search(root.path(), &times, ".png");
    assert_eq!(matched.len(), 2, "February tokens contribute nothing");
}

#[test]
fn duplicate_tokens_deplete_the_cached_listing() {
    let root = tempdir().unwrap();
    let january = at(root.path(), "2024", "January");
    fs::write(january.join("a_20240110-0300UT.png"), b"x").unwrap();
    fs::write(january.join("b_20240110-0300UT.png"), b"x").unwrap();

    let times = vec![
        token(2024, 1, 10, 3),
        token(2024, 1, 10, 3),
        token(2024, 1, 10, 3),
    ];
    let matched = structured_search(root.path(), &times, ".png");
    assert_eq!(matched.len(), 2, "two files, three tokens, no reuse");
    assert_ne!(matched[0], matched[1]);
}

#[test]
fn format_suffix_is_required_in_the_archive_too() {
    let root = tempdir().unwrap();
    let january = at(root.path(), "2024", "January");
    fs::write(january.join("ips_20240110-0300UT.jpg"), b"x").unwrap();

    let matched = structured_search(root.path(), &[token(2024, 1, 10, 3)], ".png");
    assert!(matched.is_empty());
}
