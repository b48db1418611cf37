use std::fs::read_to_string;

use assert_cmd::Command;
use httpmock::Method::GET;
use httpmock::MockServer;
use predicates::prelude::*;
use tempfile::TempDir;

#[test]
/// --test-connection against a live server reports success on stdout
fn main_test_connection_against_live_server() {
    let srv = MockServer::start();

    let mock = srv.mock(|when, then| {
        when.method(GET).path("/");
        then.status(200).body("<html></html>");
    });

    Command::cargo_bin("pagesift")
        .unwrap()
        .arg("--url")
        .arg(srv.url("/"))
        .arg("--test-connection")
        .assert()
        .success()
        .stdout(predicate::str::contains("Successfully connected."));

    mock.assert_hits(1);
}

#[test]
/// --test-connection against a dead endpoint reports the failure without
/// raising; the probe never escalates to an error exit
fn main_test_connection_against_dead_endpoint() {
    Command::cargo_bin("pagesift")
        .unwrap()
        .arg("--url")
        .arg("http://127.0.0.1:1/")
        .arg("--test-connection")
        .assert()
        .success()
        .stderr(predicate::str::contains(
            "Connection could not be established.",
        ));
}

#[test]
/// the default operation probes the target, scrapes links, and saves them
fn main_default_operation_scrapes_links_to_file() {
    let srv = MockServer::start();

    let mock = srv.mock(|when, then| {
        when.method(GET).path("/");
        then.status(200)
            .body(r#"<html><body><a href="/docs">docs</a></body></html>"#);
    });

    let tmp_dir = TempDir::new().unwrap();
    let outfile = tmp_dir.path().join("links.txt");

    Command::cargo_bin("pagesift")
        .unwrap()
        .arg("--url")
        .arg(srv.url("/"))
        .arg("--output")
        .arg(&outfile)
        .arg("--quiet")
        .assert()
        .success();

    // one hit for the probe, one for the scrape
    mock.assert_hits(2);

    let contents = read_to_string(&outfile).unwrap();
    assert_eq!(contents, "<a href=\"/docs\">docs</a>, docs\n");
}

#[test]
/// --titles extracts headings with a custom selector left unset
fn main_titles_operation_writes_headings() {
    let srv = MockServer::start();

    srv.mock(|when, then| {
        when.method(GET).path("/");
        then.status(200)
            .body("<html><body><h1>Header 1</h1><p>skip</p></body></html>");
    });

    let tmp_dir = TempDir::new().unwrap();
    let outfile = tmp_dir.path().join("titles.txt");

    Command::cargo_bin("pagesift")
        .unwrap()
        .arg("--url")
        .arg(srv.url("/"))
        .arg("--titles")
        .arg("--output")
        .arg(&outfile)
        .assert()
        .success()
        .stdout(predicate::str::contains("<h1>Header 1</h1>, Header 1"));

    let contents = read_to_string(&outfile).unwrap();
    assert_eq!(contents, "<h1>Header 1</h1>, Header 1\n");
}

#[test]
/// a scrape whose attempts all fail exits nonzero and reports the exhaustion
fn main_scrape_against_dead_endpoint_fails() {
    Command::cargo_bin("pagesift")
        .unwrap()
        .arg("--url")
        .arg("http://127.0.0.1:1/")
        .arg("--titles")
        .arg("--delay")
        .arg("10")
        .assert()
        .failure()
        .stderr(predicate::str::contains("ERROR"));
}

#[test]
/// --url is required; omitting it is a usage error
fn main_requires_a_url() {
    Command::cargo_bin("pagesift")
        .unwrap()
        .arg("--titles")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--url"));
}
