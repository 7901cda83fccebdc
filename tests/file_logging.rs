//! End-to-end bootstrap through the real tracing backend.
//!
//! The tracing subscriber is process-global, so everything runs in a
//! single test function as sequential phases, re-initializing between
//! phases the way a restarting host would.

use bootlog::{
    LogLevel, LoggingInitializer, LoggingSystem, MapPropertySource, PropertySources, TracingSystem,
};
use std::collections::HashMap;
use std::fs;

fn sources_with(key: &str, value: &str) -> PropertySources {
    let mut sources = PropertySources::new();
    sources.add_first(Box::new(MapPropertySource::single("manual", key, value)));
    sources
}

#[test]
fn resolves_and_routes_output_through_tracing() {
    // The backend lets RUST_LOG win over resolved directives; clear it so
    // the phases below see only what they configured.
    // SAFETY: single-threaded at this point, nothing else reads the
    // environment concurrently.
    unsafe { std::env::remove_var("RUST_LOG") };

    let dir = tempfile::TempDir::new().unwrap();
    let mut system = TracingSystem::install();
    let mut initializer = LoggingInitializer::new();

    // logging.file routes records to exactly that file.
    let out = dir.path().join("out.log");
    initializer
        .initialize(&sources_with("logging.file", out.to_str().unwrap()), &mut system)
        .unwrap();
    tracing::info!("hello world");
    tracing::debug!("below the configured level");
    let contents = fs::read_to_string(&out).unwrap();
    assert!(contents.contains("hello world"), "wrong output:\n{contents}");
    assert!(
        !contents.contains("below the configured level"),
        "wrong output:\n{contents}"
    );

    // Missing parent directories of the output target are created on
    // demand.
    let nested = dir.path().join("nested/sub/out.log");
    initializer
        .initialize(
            &sources_with("logging.file", nested.to_str().unwrap()),
            &mut system,
        )
        .unwrap();
    tracing::info!("deep in a fresh directory");
    let contents = fs::read_to_string(&nested).unwrap();
    assert!(
        contents.contains("deep in a fresh directory"),
        "wrong output:\n{contents}"
    );

    // logging.path routes records to <path>/spring.log.
    let path_arg = format!("{}/", dir.path().display());
    initializer
        .initialize(&sources_with("logging.path", &path_arg), &mut system)
        .unwrap();
    tracing::info!("into the path target");
    let contents = fs::read_to_string(dir.path().join("spring.log")).unwrap();
    assert!(
        contents.contains("into the path target"),
        "wrong output:\n{contents}"
    );

    // --trace raises only the bootstrap target, not everything else.
    let mut flagged = LoggingInitializer::new();
    flagged.initialize_from_args(["--trace"]);
    flagged
        .initialize(&sources_with("logging.path", &path_arg), &mut system)
        .unwrap();
    tracing::trace!(target: "bootlog", "bootstrap trace line");
    tracing::trace!("unrelated trace line");
    let contents = fs::read_to_string(dir.path().join("spring.log")).unwrap();
    assert!(
        contents.contains("bootstrap trace line"),
        "wrong output:\n{contents}"
    );
    assert!(
        !contents.contains("unrelated trace line"),
        "wrong output:\n{contents}"
    );

    // A missing override leaves the active configuration in place.
    let mut initializer = LoggingInitializer::new();
    initializer
        .initialize(&sources_with("logging.config", "doesnotexist.toml"), &mut system)
        .unwrap();
    tracing::info!("still routed to the previous target");
    let contents = fs::read_to_string(dir.path().join("spring.log")).unwrap();
    assert!(
        contents.contains("still routed to the previous target"),
        "wrong output:\n{contents}"
    );

    // set_level through a freshly installed handle composes on the
    // active directives rather than reverting them to the defaults.
    let warn_settings = dir.path().join("warn.toml");
    fs::write(&warn_settings, "root = \"warn\"\n").unwrap();
    let warn_log = dir.path().join("warn.log");
    let mut values = HashMap::new();
    values.insert(
        "logging.config".to_string(),
        warn_settings.to_str().unwrap().to_string(),
    );
    values.insert(
        "logging.file".to_string(),
        warn_log.to_str().unwrap().to_string(),
    );
    let mut sources = PropertySources::new();
    sources.add_first(Box::new(MapPropertySource::new("manual", values)));
    initializer.initialize(&sources, &mut system).unwrap();

    let mut second = TracingSystem::install();
    second.set_level("bootlog", LogLevel::Trace).unwrap();
    tracing::info!("root info through second handle");
    tracing::trace!(target: "bootlog", "bootstrap trace through second handle");
    let contents = fs::read_to_string(&warn_log).unwrap();
    assert!(
        !contents.contains("root info through second handle"),
        "wrong output:\n{contents}"
    );
    assert!(
        contents.contains("bootstrap trace through second handle"),
        "wrong output:\n{contents}"
    );
}
