use std::process::{Command, Output};

use httpmock::prelude::*;

const CATALOG_PATH: &str = "/releases/streams/v1/com.ubuntu.cloud:released:download.json";

const CATALOG: &str = r#"{
    "content_id": "com.ubuntu.cloud:released:download",
    "products": {
        "com.ubuntu.cloud:server:20.04:amd64": {
            "arch": "amd64",
            "release": "focal",
            "release_codename": "Focal Fossa",
            "release_title": "20.04 LTS",
            "supported": true,
            "version": "20.04",
            "versions": {
                "20240102": {"items": {"disk1.img": {"ftype": "disk1.img", "path": "server/focal.img", "sha256": "abc123"}}}
            }
        },
        "com.ubuntu.cloud:server:22.04:amd64": {
            "arch": "amd64",
            "release": "jammy",
            "release_codename": "Jammy Jellyfish",
            "release_title": "22.04 LTS",
            "supported": true,
            "version": "22.04",
            "versions": {
                "20240220": {"items": {"disk1.img": {"ftype": "disk1.img", "path": "server/jammy.img", "sha256": "def456"}}}
            }
        }
    }
}"#;

fn run(server: &MockServer, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_ubuntu-image-fetcher"))
        .args(args)
        .arg("--catalog-url")
        .arg(server.url(CATALOG_PATH))
        .env_remove("RUST_LOG")
        .output()
        .expect("binary should run")
}

fn serve(server: &MockServer, status: u16, body: &str) {
    server.mock(|when, then| {
        when.method(GET).path(CATALOG_PATH);
        then.status(status).body(body);
    });
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn lists_supported_releases() {
    let server = MockServer::start();
    serve(&server, 200, CATALOG);

    let output = run(&server, &["--releases"]);

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stdout(&output), "Supported Ubuntu Releases:\n20.04 LTS\n22.04 LTS\n");
}

#[test]
fn prints_the_current_lts() {
    let server = MockServer::start();
    serve(&server, 200, CATALOG);

    let output = run(&server, &["--lts"]);

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stdout(&output), "Current LTS Version: 22.04 LTS\n");
}

#[test]
fn prints_a_checksum_by_codename() {
    let server = MockServer::start();
    serve(&server, 200, CATALOG);

    let output = run(&server, &["--sha256", "jammy"]);

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stdout(&output), "SHA256 for jammy: def456\n");
}

#[test]
fn unknown_release_exits_with_failure() {
    let server = MockServer::start();
    serve(&server, 200, CATALOG);

    let output = run(&server, &["--sha256", "Ubuntu 99.10"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).is_empty());
    assert!(stderr(&output).contains("Ubuntu 99.10"));
}

#[test]
fn missing_products_exits_with_failure() {
    let server = MockServer::start();
    serve(&server, 200, r#"{"format": "products:1.0"}"#);

    let output = run(&server, &["--releases"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("'products' field not found"));
}

#[test]
fn http_errors_exit_with_failure() {
    let server = MockServer::start();
    serve(&server, 500, "oops");

    for args in [&["--releases"][..], &["--lts"][..], &["--sha256", "22.04"][..]] {
        let output = run(&server, args);
        assert_eq!(output.status.code(), Some(1));
        assert!(stderr(&output).contains("could not fetch catalog"));
        assert!(stderr(&output).contains("HTTP 500"));
    }
}

#[test]
fn malformed_catalog_exits_with_failure() {
    let server = MockServer::start();
    serve(&server, 200, "{\"products\": ");

    let output = run(&server, &["--lts"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("could not parse catalog"));
    assert!(stderr(&output).contains("malformed catalog"));
}

#[test]
fn usage_errors_exit_with_failure() {
    let output = Command::new(env!("CARGO_BIN_EXE_ubuntu-image-fetcher"))
        .output()
        .expect("binary should run");

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Usage"));
}

#[test]
fn help_exits_with_success() {
    let output = Command::new(env!("CARGO_BIN_EXE_ubuntu-image-fetcher"))
        .arg("--help")
        .output()
        .expect("binary should run");

    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).contains("--sha256"));
}

#[test]
fn checksum_without_products_names_the_release() {
    let server = MockServer::start();
    serve(&server, 200, r#"{"format": "products:1.0"}"#);

    let output = run(&server, &["--sha256", "Ubuntu 22.04 LTS"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("SHA256 not found for release Ubuntu 22.04 LTS"));
}

#[test]
fn checksum_for_a_missing_architecture_mentions_it() {
    let server = MockServer::start();
    serve(&server, 200, CATALOG);

    let output = run(&server, &["--sha256", "jammy", "--arch", "riscv64"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("architecture 'riscv64'"));
}
