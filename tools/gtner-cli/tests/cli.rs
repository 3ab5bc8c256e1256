use std::fs;

use assert_cmd::Command;

const MANIFEST: &str = r#"{"source":"John Smith flew to New York City.","ner":{"annotations":{"entities":[{"startOffset":0,"endOffset":10,"label":"person"},{"startOffset":19,"endOffset":32,"label":"city"}],"labels":[{"label":"person","shortDisplayName":"PER"},{"label":"city","shortDisplayName":"LOC"}]}},"ner-metadata":{"entities":[{"confidence":0.9},{"confidence":0.7}]}}"#;

fn gtner() -> Command {
    let mut cmd = Command::cargo_bin("gtner").unwrap();
    cmd.env_remove("GTNER_CODEC")
        .env_remove("GTNER_ATTR")
        .env_remove("GTNER_STORE_ROOT");
    cmd
}

#[test]
fn conll_converts_local_object() {
    let root = tempfile::tempdir().unwrap();
    let job = root.path().join("bucket/job");
    fs::create_dir_all(&job).unwrap();
    fs::write(job.join("output.manifest"), format!("{MANIFEST}\n")).unwrap();

    let assert = gtner()
        .args(["conll", "s3://bucket/job/output.manifest", "--root"])
        .arg(root.path())
        .assert()
        .success();

    let response: serde_json::Value = serde_json::from_slice(&assert.get_output().stdout).unwrap();
    assert_eq!(response["files"]["output_file"], "s3://bucket/job/output.iob");

    let iob = fs::read_to_string(job.join("output.iob")).unwrap();
    assert_eq!(
        iob,
        "John _ _ B-PER\nSmith _ _ L-PER\nflew _ _ O\nto _ _ O\n\
         New _ _ B-LOC\nYork _ _ I-LOC\nCity _ _ L-LOC\n. _ _ O\n\n"
    );
}

#[test]
fn comprehend_exports_local_object() {
    let root = tempfile::tempdir().unwrap();
    fs::create_dir_all(root.path().join("bucket")).unwrap();
    fs::write(root.path().join("bucket/output.manifest"), MANIFEST).unwrap();

    gtner()
        .args(["comprehend", "s3://bucket/output.manifest", "--root"])
        .arg(root.path())
        .assert()
        .success();

    let ann = fs::read_to_string(root.path().join("bucket/comprehend/annotations/output.csv")).unwrap();
    assert_eq!(
        ann,
        "File,Line,Begin Offset,End Offset,Type\noutput.txt,0,0,10,PERSON\noutput.txt,0,19,32,CITY\n"
    );
    assert!(root.path().join("bucket/comprehend/documents/output.txt").is_file());
}

#[test]
fn missing_manifest_fails() {
    let root = tempfile::tempdir().unwrap();
    let assert = gtner()
        .args(["conll", "s3://bucket/absent.manifest", "--root"])
        .arg(root.path())
        .assert()
        .failure();

    let stderr = String::from_utf8_lossy(&assert.get_output().stderr).into_owned();
    assert!(stderr.contains("failed to convert s3://bucket/absent.manifest"), "{stderr}");
}

#[test]
fn split_bio_and_labels() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("all.iob");
    fs::write(
        &input,
        "A _ _ U-PER\n\nB _ _ O\n\nC _ _ B-LOC\nD _ _ L-LOC\n\nE _ _ O\n",
    )
    .unwrap();

    let train = dir.path().join("train.txt");
    let test = dir.path().join("test.txt");
    gtner()
        .arg("split")
        .arg(&input)
        .arg("--train")
        .arg(&train)
        .arg("--test")
        .arg(&test)
        .assert()
        .success();
    assert_eq!(fs::read_to_string(&train).unwrap(), "A _ _ U-PER\n\nB _ _ O\n\nE _ _ O\n\n");
    assert_eq!(fs::read_to_string(&test).unwrap(), "C _ _ B-LOC\nD _ _ L-LOC\n\n");

    let bio = dir.path().join("test.bio");
    gtner()
        .arg("bio")
        .arg(&test)
        .arg("-o")
        .arg(&bio)
        .assert()
        .success();
    assert_eq!(fs::read_to_string(&bio).unwrap(), "C _ _ B-LOC\nD _ _ I-LOC\n\n");

    gtner()
        .arg("labels")
        .arg(&input)
        .assert()
        .success()
        .stdout("B-LOC\nL-LOC\nO\nU-PER\n");
}
