/// End-to-end checks against the bundled demo artifact.
///
/// Run with: cargo test --test integration_tests -- --nocapture
use std::path::PathBuf;

use aqi_predictor::{
    evaluate, load, AqiValue, Category, Country, DisplayState, InputCollector, ModelHandle, Predictor, Session,
};

fn demo_model_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("models/dt_pipeline.json")
}

fn demo_predictor() -> std::sync::Arc<dyn Predictor> {
    match load(demo_model_path()) {
        ModelHandle::Ready(p) => p,
        ModelHandle::Unavailable { reason, .. } => panic!("demo model failed to load: {reason}"),
    }
}

#[test]
fn test_demo_artifact_loads() {
    println!("\n=== Test: Demo Artifact Loads ===");
    let handle = load(demo_model_path());
    assert!(handle.is_ready(), "bundled artifact should load");
    assert_eq!(handle.name(), Some("dt_pipeline"));
    println!("✓ Loaded {:?}", handle);
}

#[test]
fn test_every_country_predicts_a_known_category() {
    println!("\n=== Test: Every Country Predicts ===");
    let p = demo_predictor();
    let mut c = InputCollector::new();
    let mut seen = 0;
    for country in Country::all() {
        c.set_country(country);
        let result = evaluate(&c.request(), p.as_ref()).expect("valid request should predict");
        assert!(Category::ALL.contains(&result.category));
        seen += 1;
    }
    assert_eq!(seen, 175);
    println!("✓ {} countries predicted", seen);
}

#[test]
fn test_aqi_bands() {
    println!("\n=== Test: AQI Bands ===");
    let p = demo_predictor();
    let cases = [
        (6, Category::Good),
        (50, Category::Good),
        (51, Category::Moderate),
        (100, Category::Moderate),
        (101, Category::UnhealthyForSensitiveGroups),
        (151, Category::Unhealthy),
        (201, Category::VeryUnhealthy),
        (300, Category::VeryUnhealthy),
        (301, Category::Hazardous),
        (500, Category::Hazardous),
    ];
    let mut c = InputCollector::new();
    for (aqi, expected) in cases {
        c.set_aqi_value(AqiValue::new(aqi).unwrap());
        let result = evaluate(&c.request(), p.as_ref()).unwrap();
        println!("  AQI {:>3} -> {}", aqi, result.category);
        assert_eq!(result.category, expected, "AQI {aqi}");
    }
    println!("✓ All bands match");
}

#[test]
fn test_default_form_session() {
    println!("\n=== Test: Default Form Session ===");
    let p = demo_predictor();
    let mut session = Session::new();
    assert_eq!(session.display(), &DisplayState::Empty);

    let first = session.submit(p.as_ref()).clone();
    let second = session.submit(p.as_ref()).clone();
    assert_eq!(first, second, "same inputs, same predictor, same output");

    let result = first.result().expect("default inputs should predict");
    assert_eq!(result.category, Category::Good);
    assert_eq!(
        result.info.description,
        "Air quality is satisfactory, and air pollution poses little or no risk."
    );
    println!("✓ Default inputs -> {}", result.category);
}

#[test]
fn test_missing_artifact() {
    println!("\n=== Test: Missing Artifact ===");
    let tmp = tempfile::tempdir().expect("tmpdir");
    let handle = load(tmp.path().join("dt_pipeline.json"));
    assert!(!handle.is_ready());
    assert!(handle.predictor().is_none());
    println!("✓ {:?}", handle);
}
