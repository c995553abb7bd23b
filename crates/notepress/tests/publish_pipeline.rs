use chrono::{NaiveDate, NaiveDateTime};
use notepress::config::NotepressConfig;
use notepress::init::initialize_with;
use notepress::source::{ExportFileSource, JsonSource};
use notepress::store::PostStore;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn at() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 3, 5)
        .unwrap()
        .and_hms_opt(9, 30, 0)
        .unwrap()
}

fn list(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

#[test]
fn test_export_with_malformed_fragment_publishes_one_post() {
    let site = TempDir::new().unwrap();
    let export = site.path().join("export.txt");
    fs::write(
        &export,
        "name:Trip Notes, body:• Pack #bag, attachments:\nname:Broken, attachments:\n",
    )
    .unwrap();

    let mut ctx = initialize_with(site.path(), NotepressConfig::default()).unwrap();
    let result = ctx
        .api
        .publish(&ExportFileSource::new(export).with_timestamp(at()));

    assert_eq!(result.written_count(), 1);
    assert_eq!(list(&site.path().join("_posts")), vec!["2024-03-05-trip-notes.md"]);

    let post = fs::read_to_string(site.path().join("_posts/2024-03-05-trip-notes.md")).unwrap();
    assert_eq!(
        post,
        "---\nlayout: post\ntitle: \"Trip Notes\"\ndate: 2024-03-05 09:30:00\ntags: [bag]\n---\n\n* Pack bag\n"
    );
}

#[test]
fn test_identical_attachment_bytes_land_once_across_notes_and_runs() {
    let site = TempDir::new().unwrap();
    let pics = TempDir::new().unwrap();
    let a = pics.path().join("a.png");
    let b = pics.path().join("b.PNG");
    fs::write(&a, b"\x89PNG same bytes").unwrap();
    fs::write(&b, b"\x89PNG same bytes").unwrap();

    let export = site.path().join("export.txt");
    fs::write(
        &export,
        format!(
            "name:One, body:first, attachments:{}\nname:Two, body:second, attachments:file://{}\n",
            a.display(),
            b.display()
        ),
    )
    .unwrap();

    let mut ctx = initialize_with(site.path(), NotepressConfig::default()).unwrap();
    for _ in 0..2 {
        let source = ExportFileSource::new(export.clone()).with_timestamp(at());
        let result = ctx.api.publish(&source);
        assert_eq!(result.written_count(), 2);
    }

    let assets = list(&site.path().join("assets/images"));
    assert_eq!(assets.len(), 1);
    assert!(assets[0].ends_with(".png"));

    let one = ctx.api.store().read_post("2024-03-05-one.md").unwrap().unwrap();
    assert!(one.ends_with(&format!("first\n\n![image](/assets/images/{})\n", assets[0])));
}

#[test]
fn test_missing_attachment_is_dropped_from_post() {
    let site = TempDir::new().unwrap();
    let export = site.path().join("export.txt");
    fs::write(
        &export,
        "name:Gone, body:text, attachments:/definitely/missing.png\n",
    )
    .unwrap();

    let mut ctx = initialize_with(site.path(), NotepressConfig::default()).unwrap();
    let result = ctx
        .api
        .publish(&ExportFileSource::new(export).with_timestamp(at()));

    assert_eq!(result.written_count(), 1);
    let post = ctx.api.store().read_post("2024-03-05-gone.md").unwrap().unwrap();
    assert!(post.ends_with("\n\ntext\n"));
    assert!(list(&site.path().join("assets/images")).is_empty());
}

#[test]
fn test_json_source_with_marker_text_in_body() {
    let site = TempDir::new().unwrap();
    let json = site.path().join("notes.json");
    fs::write(
        &json,
        r#"[{"title": "Markers", "body": "name: and body: are fine here _really_", "modified_at": "2024-03-05T09:30:00"}]"#,
    )
    .unwrap();

    let mut ctx = initialize_with(site.path(), NotepressConfig::default()).unwrap();
    let result = ctx.api.publish(&JsonSource::new(json));

    assert_eq!(result.written_count(), 1);
    let post = ctx.api.store().read_post("2024-03-05-markers.md").unwrap().unwrap();
    assert!(post.contains("name: and body: are fine here *really*"));
}

#[test]
fn test_fetch_failure_writes_nothing() {
    let site = TempDir::new().unwrap();
    let mut ctx = initialize_with(site.path(), NotepressConfig::default()).unwrap();

    let result = ctx
        .api
        .publish(&ExportFileSource::new(site.path().join("missing.txt")));

    assert_eq!(result.written_count(), 0);
    assert!(list(&site.path().join("_posts")).is_empty());
}

#[test]
fn test_unique_filenames_keep_same_day_duplicates() {
    let site = TempDir::new().unwrap();
    let json = site.path().join("notes.json");
    fs::write(
        &json,
        r#"[
            {"title": "Daily", "body": "morning", "modified_at": "2024-03-05T08:00:00"},
            {"title": "Daily", "body": "evening", "modified_at": "2024-03-05T20:00:00"}
        ]"#,
    )
    .unwrap();

    let config = NotepressConfig {
        unique_filenames: true,
        ..Default::default()
    };
    let mut ctx = initialize_with(site.path(), config).unwrap();
    ctx.api.publish(&JsonSource::new(json));

    let posts = list(&site.path().join("_posts"));
    assert_eq!(posts.len(), 2);
    assert!(posts.iter().all(|p| p.starts_with("2024-03-05-daily-")));
}
