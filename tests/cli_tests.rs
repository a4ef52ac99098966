use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const MEDIAINFO_DUMP: &str = r#"{
  "creatingLibrary": {"name": "MediaLib", "version": "24.01"},
  "media": {
    "@ref": "The.Boys.S04E01.mkv",
    "track": [
      {"@type": "General", "Format": "Matroska"},
      {"@type": "Video", "Width": "1920", "Height": "1080"},
      {"@type": "Audio", "Language": "es", "Title": "Latino"},
      {"@type": "Audio", "Language_String3": "eng"},
      {"@type": "Text", "Language": "Spanish"}
    ]
  }
}"#;

/// Command with no ambient configuration or API keys
fn releasepost(temp: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("releasepost").unwrap();
    cmd.arg("--config")
        .arg(temp.path().join("config.toml"))
        .env_remove("TMDB_API_KEY")
        .env_remove("GEMINI_API_KEY")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_version() {
    let mut cmd = Command::cargo_bin("releasepost").unwrap();
    cmd.arg("--version");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("releasepost"));
}

#[test]
fn test_post_help() {
    let mut cmd = Command::cargo_bin("releasepost").unwrap();
    cmd.args(["post", "--help"]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("--caption"))
        .stdout(predicate::str::contains("--mediainfo"));
}

#[test]
fn test_fields_lists_placeholders() {
    let mut cmd = Command::cargo_bin("releasepost").unwrap();
    cmd.arg("fields");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("{episodes_count}"))
        .stdout(predicate::str::contains("{audio_tracks}"));
}

#[test]
fn test_tracks_from_mediainfo_dump() {
    let temp = TempDir::new().unwrap();
    let dump = temp.path().join("mediainfo.json");
    std::fs::write(&dump, MEDIAINFO_DUMP).unwrap();

    let mut cmd = releasepost(&temp);
    cmd.args(["tracks", "The.Boys.S04E01.mkv", "--json", "--mediainfo"])
        .arg(&dump);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("\"resolution\": \"1920x1080\""))
        .stdout(predicate::str::contains("\"eng\""))
        .stdout(predicate::str::contains("\"esp\""));
}

#[test]
fn test_tracks_uses_extra_language_synonyms() {
    let temp = TempDir::new().unwrap();
    let dump = temp.path().join("mediainfo.json");
    std::fs::write(
        &dump,
        r#"{"media": {"track": [{"@type": "Audio", "Language": "Euskera"}]}}"#,
    )
    .unwrap();
    std::fs::write(
        temp.path().join("config.toml"),
        "[languages]\neuskera = \"eus\"\n",
    )
    .unwrap();

    let mut cmd = releasepost(&temp);
    cmd.args(["tracks", "x.mkv", "--mediainfo"]).arg(&dump);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("eus"))
        .stdout(predicate::str::contains("N/A"));
}

#[test]
fn test_tracks_missing_file_fails() {
    let temp = TempDir::new().unwrap();
    let mut cmd = releasepost(&temp);
    cmd.args(["tracks", "/nonexistent/file.mkv"]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("File not found"));
}

#[test]
fn test_tracks_invalid_dump_fails() {
    let temp = TempDir::new().unwrap();
    let dump = temp.path().join("broken.json");
    std::fs::write(&dump, "not json").unwrap();

    let mut cmd = releasepost(&temp);
    cmd.args(["tracks", "x.mkv", "--mediainfo"]).arg(&dump);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Invalid MediaInfo JSON"));
}

#[test]
fn test_post_without_api_keys_fails() {
    let temp = TempDir::new().unwrap();
    let mut cmd = releasepost(&temp);
    cmd.args(["post", "El.Contador.2.(2025).1080p.mkv", "--no-probe"]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("GEMINI_API_KEY"));
}

#[test]
fn test_invalid_config_is_reported() {
    let temp = TempDir::new().unwrap();
    std::fs::write(temp.path().join("config.toml"), "[tmdb\n").unwrap();

    let mut cmd = releasepost(&temp);
    cmd.args(["identify", "x.mkv"]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse"));
}

#[test]
fn test_post_all_rejects_missing_directory() {
    let temp = TempDir::new().unwrap();
    let mut cmd = releasepost(&temp);
    cmd.args(["post-all", "/nonexistent/dir"]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Not a directory"));
}

#[test]
fn test_init_refuses_to_overwrite() {
    let temp = TempDir::new().unwrap();
    std::fs::write(temp.path().join("config.toml"), "").unwrap();

    let mut cmd = releasepost(&temp);
    cmd.arg("init");
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Config already exists"));
}
