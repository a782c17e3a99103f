//! File-level report export and hand-off.

use camino::{Utf8Path, Utf8PathBuf};
use rstest::{fixture, rstest};
use streetsense_core::{Coordinate, FactorScores, LocationRecord};
use streetsense_data::{PUBLISHED_REPORT_NAME, publish_report, write_report_file};
use tempfile::TempDir;

struct Workspace {
    _guard: TempDir,
    root: Utf8PathBuf,
}

#[fixture]
fn workspace() -> Workspace {
    let guard = TempDir::new().expect("temp dir");
    let root = Utf8Path::from_path(guard.path())
        .expect("utf-8 temp dir")
        .to_owned();
    Workspace {
        _guard: guard,
        root,
    }
}

fn scored(lat: f64, lon: f64, overall: f64, normalized: f64) -> LocationRecord {
    LocationRecord {
        coordinate: Coordinate::new(lat, lon),
        factors: Some(FactorScores::new(overall, overall, overall, overall, overall)),
        overall_discomfort: Some(overall),
        normalized_discomfort: Some(normalized),
        samples: 4,
        image_ids: vec![format!("{lat:.4}_{lon:.4}_0.jpg")],
    }
}

#[rstest]
fn report_file_is_created_with_parents(workspace: Workspace) {
    let path = workspace.root.join("outputs/seattle_analysis_20240101_000000.csv");
    let records = [scored(47.5, -122.4, 1.0, 0.0), scored(47.5, -122.395, 3.0, 1.0)];

    write_report_file(&path, &records).expect("write report");

    let contents = std::fs::read_to_string(&path).expect("read report");
    assert_eq!(contents.lines().count(), 3);
    assert!(contents.lines().nth(2).is_some_and(|line| line.starts_with("47.5,-122.395,3.0,1.0,")));
}

#[rstest]
fn publish_copies_into_existing_directory(workspace: Workspace) {
    let report = workspace.root.join("report.csv");
    write_report_file(&report, &[scored(47.6, -122.3, 2.0, 0.5)]).expect("write report");
    let data_dir = workspace.root.join("backend/data");
    std::fs::create_dir_all(&data_dir).expect("create data dir");

    let published = publish_report(&report, &data_dir)
        .expect("publish")
        .expect("directory exists");

    assert_eq!(published, data_dir.join(PUBLISHED_REPORT_NAME));
    assert_eq!(
        std::fs::read_to_string(&published).expect("read copy"),
        std::fs::read_to_string(&report).expect("read original")
    );
}

#[rstest]
fn publish_skips_missing_directory(workspace: Workspace) {
    let report = workspace.root.join("report.csv");
    write_report_file(&report, &[]).expect("write report");

    let published = publish_report(&report, &workspace.root.join("absent")).expect("skip");

    assert!(published.is_none());
}
