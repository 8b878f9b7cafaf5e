//! End-to-end tests of the `generate`, `resolve`, and `events` subcommands
//! against a temp data directory.

use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use std::fs;

mod common;
use common::{
    fm, seed_basic_inputs, setup_data_dir, setup_output_dir, write_event, write_floor_plan,
    write_json,
};

#[test]
fn test_generate_requires_employee_feed() {
    let data_dir = setup_data_dir("gen_missing_inputs");
    let output_dir = setup_output_dir("gen_missing_inputs");

    fm()
        .args([
            "--data-dir",
            data_dir.to_str().unwrap(),
            "--output-dir",
            output_dir.to_str().unwrap(),
            "generate",
        ])
        .assert()
        .failure()
        .stderr(contains("Missing input"));
}

#[test]
fn test_generate_display_override_short_circuits() {
    let data_dir = setup_data_dir("gen_override");
    let output_dir = setup_output_dir("gen_override");
    seed_basic_inputs(&data_dir);
    write_floor_plan(&data_dir);
    write_json(
        &data_dir.join("display_overrides.json"),
        r#"{"2026-01-22": {"image": "assets/party.png", "name": "Party Slide"}}"#,
    );
    let slide = image::RgbaImage::from_pixel(32, 32, image::Rgba([255, 0, 0, 255]));
    slide.save(data_dir.join("assets/party.png")).unwrap();

    fm()
        .args([
            "--data-dir",
            data_dir.to_str().unwrap(),
            "--output-dir",
            output_dir.to_str().unwrap(),
            "--date",
            "2026-01-22",
            "generate",
        ])
        .assert()
        .code(0)
        .stdout(contains("Party Slide"));

    assert!(output_dir.join("tv/party.png").exists());
    assert!(
        !output_dir.join("map.json").exists(),
        "override run must not produce a map document"
    );
    assert!(!output_dir.join("tv/all_staff_map_tv.png").exists());
}

#[test]
fn test_generate_document_only() {
    let data_dir = setup_data_dir("gen_document");
    let output_dir = setup_output_dir("gen_document");
    seed_basic_inputs(&data_dir);

    fm()
        .args([
            "--data-dir",
            data_dir.to_str().unwrap(),
            "--output-dir",
            output_dir.to_str().unwrap(),
            "--date",
            "2026-03-03",
            "generate",
            "--skip-tv",
        ])
        .assert()
        .code(0);

    let raw = fs::read_to_string(output_dir.join("map.json")).unwrap();
    let doc: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(doc["generated_for"], "2026-03-03");
    assert_eq!(doc["stats"]["placed"], 1);
    assert_eq!(doc["stats"]["positionless"], 1);

    let employees = doc["employees"].as_array().unwrap();
    assert_eq!(employees.len(), 2);
    let erik = employees
        .iter()
        .find(|e| e["person_id"] == "p2")
        .unwrap();
    assert!(erik["x"].is_null(), "positionless coords must be null");
    assert!(erik["y"].is_null());
}

#[test]
fn test_generate_renders_tv_canvases() {
    let data_dir = setup_data_dir("gen_tv");
    let output_dir = setup_output_dir("gen_tv");
    seed_basic_inputs(&data_dir);
    write_floor_plan(&data_dir);

    fm()
        .args([
            "--data-dir",
            data_dir.to_str().unwrap(),
            "--output-dir",
            output_dir.to_str().unwrap(),
            "--date",
            "2026-03-03",
            "--seed",
            "7",
            "generate",
        ])
        .assert()
        .code(0);

    let all = output_dir.join("tv/all_staff_map_tv.png");
    assert!(all.exists());
    assert!(output_dir.join("tv/ACT_map_tv.png").exists());
    assert!(output_dir.join("tv/IDEAL_map_tv.png").exists());

    let img = image::open(&all).unwrap();
    assert_eq!(img.width(), 3840);
    assert_eq!(img.height(), 2160);
}

#[test]
fn test_generate_single_unit_filter() {
    let data_dir = setup_data_dir("gen_unit");
    let output_dir = setup_output_dir("gen_unit");
    seed_basic_inputs(&data_dir);
    write_floor_plan(&data_dir);

    fm()
        .args([
            "--data-dir",
            data_dir.to_str().unwrap(),
            "--output-dir",
            output_dir.to_str().unwrap(),
            "--date",
            "2026-03-03",
            "--seed",
            "7",
            "generate",
            "--unit",
            "ACT",
        ])
        .assert()
        .code(0);

    assert!(output_dir.join("tv/ACT_map_tv.png").exists());
    assert!(!output_dir.join("tv/all_staff_map_tv.png").exists());
    assert!(!output_dir.join("tv/IDEAL_map_tv.png").exists());
}

#[test]
fn test_generate_is_deterministic_with_seed() {
    let data_dir = setup_data_dir("gen_seeded");
    seed_basic_inputs(&data_dir);
    write_floor_plan(&data_dir);
    write_event(
        &data_dir,
        "spring",
        r#"{
            "start_month": 3, "start_day": 1,
            "end_month": 3, "end_day": 31,
            "assets": [
                {"type": "message", "texts": ["Hello", "Hej", "Hola"],
                 "position": "top_left", "padding": 60}
            ]
        }"#,
    );

    let run = |out: &std::path::Path| {
        fm()
            .args([
                "--data-dir",
                data_dir.to_str().unwrap(),
                "--output-dir",
                out.to_str().unwrap(),
                "--date",
                "2026-03-15",
                "--seed",
                "42",
                "generate",
            ])
            .assert()
            .code(0);
    };

    let out_a = setup_output_dir("gen_seeded_a");
    let out_b = setup_output_dir("gen_seeded_b");
    run(&out_a);
    run(&out_b);

    let doc_a = fs::read(out_a.join("map.json")).unwrap();
    let doc_b = fs::read(out_b.join("map.json")).unwrap();
    assert_eq!(doc_a, doc_b);

    let png_a = fs::read(out_a.join("tv/all_staff_map_tv.png")).unwrap();
    let png_b = fs::read(out_b.join("tv/all_staff_map_tv.png")).unwrap();
    assert_eq!(png_a, png_b, "seeded runs must be byte-identical");
}

#[test]
fn test_generate_composites_panel_decor() {
    let data_dir = setup_data_dir("gen_panel");
    let output_dir = setup_output_dir("gen_panel");
    seed_basic_inputs(&data_dir);
    write_floor_plan(&data_dir);

    let qr = image::RgbaImage::from_pixel(8, 8, image::Rgba([255, 0, 0, 255]));
    qr.save(data_dir.join("assets/qr_fix_location.png")).unwrap();
    let logo = image::RgbaImage::from_pixel(100, 50, image::Rgba([0, 0, 255, 255]));
    logo.save(data_dir.join("assets/logo.png")).unwrap();

    fm()
        .args([
            "--data-dir",
            data_dir.to_str().unwrap(),
            "--output-dir",
            output_dir.to_str().unwrap(),
            "--date",
            "2026-03-03",
            "--seed",
            "1",
            "generate",
            "--unit",
            "ACT",
        ])
        .assert()
        .code(0);

    let img = image::open(output_dir.join("tv/ACT_map_tv.png"))
        .unwrap()
        .into_rgba8();

    // QR is pasted 500px square at (3190, 250); sample its middle.
    let qr_pixel = img.get_pixel(3440, 500);
    assert!(qr_pixel.0[0] > 200 && qr_pixel.0[2] < 50, "QR area: {:?}", qr_pixel);

    // Logo is 700x350 at the panel bottom; sample its middle.
    let logo_pixel = img.get_pixel(3440, 1885);
    assert!(
        logo_pixel.0[2] > 200 && logo_pixel.0[0] < 50,
        "logo area: {:?}",
        logo_pixel
    );
}

#[test]
fn test_generate_survives_failing_profile_processor() {
    let data_dir = setup_data_dir("gen_processor_fallback");
    let output_dir = setup_output_dir("gen_processor_fallback");
    seed_basic_inputs(&data_dir);
    write_floor_plan(&data_dir);

    let picture = image::RgbaImage::from_pixel(40, 40, image::Rgba([0, 128, 255, 255]));
    picture.save(data_dir.join("profile_pictures/p1.png")).unwrap();

    // The event names the overlay processor but ships no overlay.png, so
    // every transform fails and the original picture must be used instead.
    write_event(
        &data_dir,
        "spring",
        r#"{
            "start_month": 3, "start_day": 1,
            "end_month": 3, "end_day": 31,
            "profile_processor": "overlay"
        }"#,
    );

    fm()
        .args([
            "--data-dir",
            data_dir.to_str().unwrap(),
            "--output-dir",
            output_dir.to_str().unwrap(),
            "--date",
            "2026-03-15",
            "--seed",
            "1",
            "generate",
        ])
        .assert()
        .code(0)
        .stdout(contains("Profile processor 'overlay' failed"));

    assert!(output_dir.join("tv/all_staff_map_tv.png").exists());
}

#[test]
fn test_resolve_applies_location_overrides() {
    let data_dir = setup_data_dir("resolve_overrides");
    seed_basic_inputs(&data_dir);
    write_json(
        &data_dir.join("location_overrides.json"),
        r#"{
            "_comment": "person_id keyed relocations",
            "p2": {"room": "66109", "unit": "ACT"}
        }"#,
    );

    let output = fm()
        .args(["--data-dir", data_dir.to_str().unwrap(), "resolve"])
        .assert()
        .code(0)
        .get_output()
        .stdout
        .clone();

    let doc: serde_json::Value = serde_json::from_slice(&output).unwrap();
    let employees = doc["employees"].as_array().unwrap();
    let erik = employees
        .iter()
        .find(|e| e["person_id"] == "p2")
        .unwrap();
    assert_eq!(erik["room"], "66109");
    assert_eq!(erik["units"], serde_json::json!(["ACT"]));
    assert!(erik["x"].is_number(), "override room 66109 has a placement");
    assert_eq!(doc["stats"]["placed"], 2);
}

#[test]
fn test_events_skips_malformed_folder() {
    let data_dir = setup_data_dir("events_malformed");
    write_event(&data_dir, "broken", r#"{"start_month": "not a number"#);
    write_event(
        &data_dir,
        "summer",
        r#"{"start_month": 6, "start_day": 1, "end_month": 8, "end_day": 31}"#,
    );

    fm()
        .args([
            "--data-dir",
            data_dir.to_str().unwrap(),
            "--date",
            "2026-07-10",
            "events",
        ])
        .assert()
        .code(0)
        .stdout(contains("summer").and(contains("selected")))
        .stdout(contains("Skipping event 'broken'"))
        .stdout(predicates::str::is_match(r"(?m)^broken").unwrap().not());
}
