//! Shared test helpers for integration tests

#![allow(dead_code)]

use assert_cmd::cargo;
use assert_cmd::Command;
use rusqlite::Connection;
use std::path::PathBuf;
use tempfile::TempDir;

/// People table template used across CLI tests
pub const PEOPLE_TEMPLATE: &str = r#"{% autosort rows %}<tr><th>{% anchor name %}</th><th>{% anchor born "Born" desc %}</th></tr>
{% for row in rows %}{{ row.name }};{% endfor %}
"#;

/// Helper to get a tsort command
pub fn tsort() -> Command {
    let mut cmd = Command::new(cargo::cargo_bin!("tsort"));
    cmd.env_remove("SORTING_CONFIG")
        .env_remove("SORTING_SORT_UP_ICON")
        .env_remove("SORTING_SORT_DOWN_ICON")
        .env_remove("SORTING_INVALID_FIELD_RAISES_404");
    cmd
}

/// Helper to write a file into the temp directory
pub fn write_file(tmp: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = tmp.path().join(name);
    std::fs::write(&path, content).unwrap();
    path
}

/// Helper to create a people database with three rows
pub fn create_people_db(tmp: &TempDir) -> PathBuf {
    let path = tmp.path().join("people.db");
    let conn = Connection::open(&path).unwrap();
    conn.execute_batch(
        "CREATE TABLE people (name TEXT, born INTEGER);
         INSERT INTO people VALUES ('Grace', 1906);
         INSERT INTO people VALUES ('Ada', 1815);
         INSERT INTO people VALUES ('Linus', 1969);",
    )
    .unwrap();
    path
}

/// Helper to create a YAML context with the same people as `create_people_db`
pub fn create_people_data(tmp: &TempDir) -> PathBuf {
    write_file(
        tmp,
        "people.yaml",
        r#"rows:
  - name: Grace
    born: 1906
  - name: Ada
    born: 1815
  - name: Linus
    born: 1969
"#,
    )
}
