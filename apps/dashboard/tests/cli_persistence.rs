use std::{path::Path, process::Command};

fn dashboard(config_dir: &Path, database_url: &str, args: &[&str]) -> (bool, String, String) {
    let output = Command::new(env!("CARGO_BIN_EXE_dashboard"))
        .arg("--config")
        .arg(config_dir.join("absent.toml"))
        .arg("--database-url")
        .arg(database_url)
        .args(args)
        .env_remove("DATABASE_URL")
        .env_remove("APP__DATABASE_URL")
        .env_remove("APP__SEED_DEMO_DATA")
        .env("APP__LOG_FILTER", "warn")
        .output()
        .expect("run dashboard");
    (
        output.status.success(),
        String::from_utf8_lossy(&output.stdout).into_owned(),
        String::from_utf8_lossy(&output.stderr).into_owned(),
    )
}

#[test]
fn seeded_directory_persists_deletions_and_additions() {
    let temp = tempfile::tempdir().expect("tempdir");
    let db_path = temp.path().join("data").join("dashboard.db");
    let database_url = db_path.to_string_lossy().into_owned();

    let (ok, stdout, stderr) = dashboard(temp.path(), &database_url, &["list"]);
    assert!(ok, "list failed: {stderr}");
    assert!(stdout.contains("Showing 4 of 4 clients"), "{stdout}");

    let (ok, stdout, _) = dashboard(temp.path(), &database_url, &["delete", "2"]);
    assert!(ok);
    assert!(stdout.contains("Are you absolutely sure?"));
    assert!(stdout.contains("Re-run with --yes to delete."));

    let (ok, stdout, stderr) = dashboard(temp.path(), &database_url, &["delete", "2", "--yes"]);
    assert!(ok, "delete failed: {stderr}");
    assert!(stdout.contains("[Client deleted]"));

    let (ok, stdout, stderr) = dashboard(
        temp.path(),
        &database_url,
        &[
            "add",
            "--first-name",
            "Ada",
            "--last-name",
            "Lovelace",
            "--email",
            "ada@example.com",
            "--company",
            "Analytical Engines",
            "--id",
            "ada",
        ],
    );
    assert!(ok, "add failed: {stderr}");
    assert!(stdout.contains("created client ada"));

    let (ok, stdout, _) = dashboard(temp.path(), &database_url, &["list", "--json"]);
    assert!(ok);
    let snapshot: serde_json::Value = serde_json::from_str(&stdout).expect("json");
    assert_eq!(snapshot["total_count"], 4);
    let ids: Vec<_> = snapshot["rows"]
        .as_array()
        .expect("rows")
        .iter()
        .map(|row| row["id"].as_str().expect("id").to_string())
        .collect();
    assert_eq!(ids, vec!["1", "3", "4", "ada"]);
}

#[test]
fn duplicate_id_fails_the_add_command() {
    let temp = tempfile::tempdir().expect("tempdir");
    let database_url = temp.path().join("dup.db").to_string_lossy().into_owned();

    let (ok, _, stderr) = dashboard(
        temp.path(),
        &database_url,
        &[
            "add",
            "--first-name",
            "Jane",
            "--last-name",
            "Again",
            "--email",
            "jane@again.com",
            "--id",
            "1",
        ],
    );
    assert!(!ok);
    assert!(stderr.contains("client id '1' is already in use"), "{stderr}");
}

#[test]
fn filtered_json_listing() {
    let temp = tempfile::tempdir().expect("tempdir");
    let database_url = temp.path().join("query.db").to_string_lossy().into_owned();

    let (ok, stdout, _) = dashboard(
        temp.path(),
        &database_url,
        &["list", "--query", "apple", "--json"],
    );
    assert!(ok);
    let snapshot: serde_json::Value = serde_json::from_str(&stdout).expect("json");
    assert_eq!(snapshot["visible_count"], 1);
    assert_eq!(snapshot["rows"][0]["company"], "Apple Inc.");
}

#[test]
fn deleting_an_unknown_id_offers_no_confirmation() {
    let temp = tempfile::tempdir().expect("tempdir");
    let database_url = temp.path().join("unknown.db").to_string_lossy().into_owned();

    let (ok, stdout, _) = dashboard(temp.path(), &database_url, &["delete", "99"]);
    assert!(ok);
    assert!(stdout.contains("No client with id '99'."));
    assert!(!stdout.contains("Re-run with --yes"));
    assert!(!stdout.contains("Are you absolutely sure?"));
}
