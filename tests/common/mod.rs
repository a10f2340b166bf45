#![allow(dead_code)]

use std::io::{Cursor, Write};
use std::path::Path;
use std::time::Duration;

use twic_fetch::{Config, Identifier};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};
use zip::write::SimpleFileOptions;

pub const TEST_USER_AGENT: &str = "twic-fetch-tests/1.0";

pub fn zip_with(entries: &[(&str, &str)]) -> Vec<u8> {
    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    for (name, body) in entries {
        writer
            .start_file(*name, SimpleFileOptions::default())
            .unwrap();
        writer.write_all(body.as_bytes()).unwrap();
    }
    writer.finish().unwrap().into_inner()
}

pub fn pgn_body(id: u32) -> String {
    format!("[Event \"TWIC {id}\"]\n[Round \"1\"]\n\n1. d4 d5 2. c4 *\n")
}

/// Archive laid out like the upstream ones: a single `twic{id}.pgn` entry.
pub fn twic_zip(id: u32) -> Vec<u8> {
    let entry = Identifier(id).entry_name();
    zip_with(&[(entry.as_str(), pgn_body(id).as_str())])
}

pub fn archive_path(id: u32) -> String {
    format!("/zips/{}", Identifier(id).archive_name())
}

pub async fn serve_archive(server: &MockServer, id: u32) {
    Mock::given(method("GET"))
        .and(path(archive_path(id)))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(twic_zip(id)))
        .mount(server)
        .await;
}

pub async fn serve_status(server: &MockServer, id: u32, status: u16) {
    Mock::given(method("GET"))
        .and(path(archive_path(id)))
        .respond_with(ResponseTemplate::new(status))
        .mount(server)
        .await;
}

pub fn test_config(server: &MockServer, output_dir: &Path) -> Config {
    Config {
        base_url: format!("{}/zips/", server.uri()),
        user_agent: TEST_USER_AGENT.to_string(),
        workers: 4,
        request_timeout: Duration::from_secs(5),
        connect_timeout: Duration::from_secs(2),
        max_redirects: 3,
        output_dir: output_dir.to_path_buf(),
    }
}

pub fn files_with_extension(dir: &Path, ext: &str) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().path())
        .filter(|p| p.extension().map(|e| e == ext).unwrap_or(false))
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}
