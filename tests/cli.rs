#![allow(deprecated)] // cargo_bin deprecation - still works fine

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::io::{Read, Write};
use std::net::TcpListener;
use std::thread;

fn wikidata_stats() -> Command {
    Command::cargo_bin("wikidata-stats").unwrap()
}

/// Serves a single HTTP response on a loopback port and returns the endpoint URL.
fn serve_once(status: &'static str, body: &str) -> (String, thread::JoinHandle<()>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let url = format!("http://{}/w/api.php", listener.local_addr().unwrap());
    let response = format!(
        "HTTP/1.1 {status}\r\nContent-Type: application/json\r\n\
         Content-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    );
    let server = thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let mut request = Vec::new();
        let mut buf = [0u8; 1024];
        while !request.windows(4).any(|w| w == b"\r\n\r\n") {
            let n = stream.read(&mut buf).unwrap();
            if n == 0 {
                break;
            }
            request.extend_from_slice(&buf[..n]);
        }
        stream.write_all(response.as_bytes()).unwrap();
    });
    (url, server)
}

#[test]
fn empty_username_exits_with_code_one() {
    wikidata_stats()
        .write_stdin("\n")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Username cannot be empty."));
}

#[test]
fn closed_input_exits_with_code_one() {
    wikidata_stats()
        .write_stdin("Example\n2\n2023-10-15\n")
        .assert()
        .code(1);
}

#[test]
fn invalid_endpoint_is_rejected_before_prompting() {
    wikidata_stats()
        .args(["--endpoint", "ftp://example.org/w/api.php"])
        .write_stdin("Example\n1\n2023-10\n")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Enter your Wikidata username").not());
}

#[test]
fn unreachable_api_ends_run_without_report() {
    let dir = tempfile::tempdir().unwrap();

    wikidata_stats()
        .args(["--endpoint", "http://127.0.0.1:9/w/api.php", "--output-dir"])
        .arg(dir.path())
        .write_stdin("Example\n3\n1\n2023-10\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Invalid choice. Please enter 1 or 2."))
        .stdout(predicate::str::contains("Fetching contributions for 'Example'..."))
        .stdout(predicate::str::contains("Could not retrieve contributions. Exiting."));

    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn successful_run_prints_and_saves_report() {
    let dir = tempfile::tempdir().unwrap();
    let body = r#"{"batchcomplete": true, "query": {"usercontribs": [
        {"ns": 0, "title": "Q1", "parentid": 0, "revid": 10, "timestamp": "2023-10-02T08:00:00Z"},
        {"ns": 0, "title": "Q1", "parentid": 10, "revid": 11, "timestamp": "2023-10-02T09:00:00Z"},
        {"ns": 0, "title": "Q2", "parentid": 3, "revid": 12, "timestamp": "2023-10-03T10:00:00Z"},
        {"ns": 1, "title": "Talk:Q2", "parentid": 0, "revid": 13, "timestamp": "2023-10-03T11:00:00Z"}
    ]}}"#;
    let (url, server) = serve_once("200 OK", body);
    let expected = "User: Example\nPeriod: 2023-10-01 to 2023-10-31\nEdited: 1\nCreated: 1\n";
    let file_name = "wikidata_stats-Example-2023-10-01_to_2023-10-31.txt";

    wikidata_stats()
        .current_dir(dir.path())
        .args(["--endpoint", url.as_str()])
        .write_stdin("Example\n1\n2023-10\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Total contributions found in period: 4"))
        .stdout(predicate::str::contains(expected))
        .stdout(predicate::str::contains(format!(
            "Report successfully saved to '{file_name}'"
        )));
    server.join().unwrap();

    assert_eq!(fs::read_to_string(dir.path().join(file_name)).unwrap(), expected);
}

#[test]
fn server_error_status_ends_run_without_report() {
    let dir = tempfile::tempdir().unwrap();
    let (url, server) = serve_once("503 Service Unavailable", "busy");

    wikidata_stats()
        .current_dir(dir.path())
        .args(["--endpoint", url.as_str()])
        .write_stdin("Example\n2\n2023-10-01\n2023-10-31\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("HTTP 503"))
        .stdout(predicate::str::contains("Could not retrieve contributions. Exiting."));
    server.join().unwrap();

    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
}
