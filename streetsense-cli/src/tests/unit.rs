//! Focused unit tests covering analyse CLI configuration.

use super::*;
use crate::analyse::{AnalyseArgs, AnalyseConfig, config_from_layers_for_test};
use camino::Utf8PathBuf;
use ortho_config::MergeComposer;
use rstest::{fixture, rstest};
use serde_json::json;
use std::time::Duration;
use streetsense_core::BoundingRegion;

#[fixture]
fn complete_args() -> AnalyseArgs {
    AnalyseArgs {
        api_key: Some("key".to_owned()),
        detector_url: Some("http://localhost:8000/detect".to_owned()),
        ..AnalyseArgs::default()
    }
}

#[rstest]
fn defaults_cover_the_standard_survey(complete_args: AnalyseArgs) {
    let config = AnalyseConfig::try_from(complete_args).expect("config should build");
    assert_eq!(config.region, BoundingRegion::SEATTLE);
    assert_eq!(config.step, 0.005);
    assert_eq!(config.output_dir, Utf8PathBuf::from("outputs"));
    assert_eq!(config.publish_dir, None);
    assert_eq!(config.concurrency.get(), 4);
    assert_eq!(config.timeout, Duration::from_secs(30));
    assert!(config.streetview_url.starts_with("https://"));
}

#[rstest]
#[case(None)]
#[case(Some(String::new()))]
#[case(Some("  ".to_owned()))]
fn missing_credential_is_fatal(complete_args: AnalyseArgs, #[case] key: Option<String>) {
    let args = AnalyseArgs {
        api_key: key,
        ..complete_args
    };
    let err = AnalyseConfig::try_from(args).expect_err("credential required");
    match err {
        CliError::MissingCredential { field, env, fallback } => {
            assert_eq!(field, ARG_API_KEY);
            assert_eq!(env, ENV_API_KEY);
            assert_eq!(fallback, ENV_FALLBACK_API_KEY);
        }
        other => panic!("expected MissingCredential, found {other:?}"),
    }
}

#[rstest]
fn missing_detector_is_reported(complete_args: AnalyseArgs) {
    let args = AnalyseArgs {
        detector_url: None,
        ..complete_args
    };
    match AnalyseConfig::try_from(args).expect_err("detector required") {
        CliError::MissingArgument { field, env } => {
            assert_eq!(field, ARG_DETECTOR_URL);
            assert_eq!(env, ENV_DETECTOR_URL);
        }
        other => panic!("expected MissingArgument, found {other:?}"),
    }
}

#[rstest]
#[case(Some(0), None, ARG_CONCURRENCY)]
#[case(None, Some(0), ARG_TIMEOUT_SECS)]
fn zero_limits_are_rejected(
    complete_args: AnalyseArgs,
    #[case] concurrency: Option<usize>,
    #[case] timeout_secs: Option<u64>,
    #[case] expected: &'static str,
) {
    let args = AnalyseArgs {
        concurrency,
        timeout_secs,
        ..complete_args
    };
    match AnalyseConfig::try_from(args).expect_err("zero is invalid") {
        CliError::InvalidArgument { field, .. } => assert_eq!(field, expected),
        other => panic!("expected InvalidArgument, found {other:?}"),
    }
}

#[rstest]
fn debug_output_redacts_key(complete_args: AnalyseArgs) {
    let config = AnalyseConfig::try_from(complete_args).expect("config should build");
    let rendered = format!("{config:?}");
    assert!(rendered.contains("<redacted>"));
    assert!(!rendered.contains("\"key\""));
}

#[rstest]
fn negative_longitudes_parse_from_flags() {
    let cli = Cli::try_parse_from([
        "streetsense",
        "analyse",
        "--lon-min",
        "-122.35",
        "--lon-max",
        "-122.33",
    ])
    .expect("flags should parse");
    let Command::Analyse(args) = cli.command;
    assert_eq!(args.lon_min, Some(-122.35));
    assert_eq!(args.lon_max, Some(-122.33));
}

#[rstest]
fn merge_layers_maps_configuration_errors() {
    let mut composer = MergeComposer::new();
    composer.push_cli(json!({ "step": "wide" }));

    let err = config_from_layers_for_test(composer.layers(), &[])
        .expect_err("invalid config layer should map to CliError::Configuration");
    match err {
        CliError::Configuration(_) => {}
        other => panic!("expected CliError::Configuration, found {other:?}"),
    }
}

#[rstest]
fn merge_layers_honours_precedence() {
    let mut composer = MergeComposer::new();
    composer.push_file(
        json!({
            "step": 0.01,
            "detector_url": "http://from-file/detect",
            "output_dir": "from-file",
        }),
        None,
    );
    composer.push_environment(json!({
        "api_key": "from-env",
        "output_dir": "from-env",
    }));
    composer.push_cli(json!({
        "output_dir": "from-cli",
        "lat_min": 47.6,
    }));

    let config = config_from_layers_for_test(composer.layers(), &[])
        .expect("merged config should build");
    assert_eq!(config.api_key, "from-env");
    assert_eq!(config.detector_url, "http://from-file/detect");
    assert_eq!(config.output_dir, Utf8PathBuf::from("from-cli"));
    assert_eq!(config.step, 0.01);
    assert_eq!(config.region.lat_min, 47.6);
    assert_eq!(config.region.lat_max, BoundingRegion::SEATTLE.lat_max);
}

#[rstest]
#[case(None, "from-fallback")]
#[case(Some("from-env"), "from-env")]
fn fallback_key_fills_only_a_missing_key(
    #[case] primary: Option<&'static str>,
    #[case] expected: &str,
) {
    let mut composer = MergeComposer::new();
    composer.push_file(json!({ "detector_url": "http://from-file/detect" }), None);
    if let Some(key) = primary {
        composer.push_environment(json!({ "api_key": key }));
    }

    let config = config_from_layers_for_test(
        composer.layers(),
        &[(ENV_FALLBACK_API_KEY, "from-fallback"), ("UNRELATED", "ignored")],
    )
    .expect("key should resolve");
    assert_eq!(config.api_key, expected);
}

#[rstest]
fn blank_fallback_key_is_still_missing() {
    let mut composer = MergeComposer::new();
    composer.push_file(json!({ "detector_url": "http://from-file/detect" }), None);

    let err = config_from_layers_for_test(composer.layers(), &[(ENV_FALLBACK_API_KEY, " ")])
        .expect_err("blank fallback should not count");
    assert!(matches!(err, CliError::MissingCredential { .. }));
}
