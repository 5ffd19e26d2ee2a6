use dircatalog::routes::dispatch;
use dircatalog::server;
use serde_json::{json, Value};
use std::io::{Read, Write};
use std::net::TcpStream;
use std::sync::Arc;
use std::thread;

use crate::integration::support::*;

#[test]
fn html_views_confirm_existence() {
    let fixture = Fixture::new();
    let catalog = fixture.catalog();
    let cases = [
        ("/", 200, "<h1>Directory Catalog</h1>"),
        ("/repositories", 200, "All Repositories"),
        ("/repositories/1", 200, "Repository 1"),
        ("/repositories/99999", 404, "Not Found"),
        ("/collections", 200, "All Collections"),
        ("/collections/1", 200, "Collection 1"),
        ("/file_groups/1", 200, "File group 1"),
        ("/cfs_directories/30193726375172", 200, "Directory 30193726375172"),
        ("/cfs_files/240067872391336", 200, "File 240067872391336"),
        ("/cfs_files/99999", 404, "Not Found"),
    ];
    for (path, status, body) in cases {
        let response = dispatch(&catalog, path);
        assert_eq!(response.status, status, "{}", path);
        assert_eq!(response.body, body, "{}", path);
    }
}

#[test]
fn json_views_return_records() {
    let fixture = Fixture::new();
    let catalog = fixture.catalog();

    let response = dispatch(&catalog, "/repositories.json");
    assert_eq!(response.content_type, Some("application/json"));
    let repositories: Value = serde_json::from_str(&response.body).unwrap();
    assert_eq!(repositories.as_array().unwrap().len(), 2);

    let response = dispatch(&catalog, "/cfs_files/240067872391336.json");
    let file: Value = serde_json::from_str(&response.body).unwrap();
    assert_eq!(file["name"], "escher_lego.jpg");
    assert_eq!(file["directory"]["path"], "/cfs_directories/30193726375172");

    let response = dispatch(&catalog, "/file_groups/1.json?ignored=1");
    let file_group: Value = serde_json::from_str(&response.body).unwrap();
    assert_eq!(file_group["cfs_directory"]["id"], ROOT_DIR_ID);
}

#[test]
fn json_misses_use_error_shape() {
    let fixture = Fixture::new();
    let catalog = fixture.catalog();
    for path in [
        "/repositories/99999.json",
        "/collections/99999.json",
        "/file_groups/99999.json",
        "/cfs_directories/99999.json",
        "/cfs_directories/99999/show_tree.json",
        "/cfs_files/99999.json",
        "/uuids/00000000-0000-0000-0000-000000000000.json",
    ] {
        let response = dispatch(&catalog, path);
        assert_eq!(response.status, 404, "{}", path);
        let body: Value = serde_json::from_str(&response.body).unwrap();
        assert_eq!(body, json!({"status": 404, "error": "Not Found"}));
    }
}

#[test]
fn tree_requires_structured_format() {
    let fixture = Fixture::new();
    let catalog = fixture.catalog();
    assert_eq!(
        dispatch(&catalog, "/cfs_directories/30193726375172/show_tree").status,
        406
    );
    let response = dispatch(&catalog, "/cfs_directories/30193726375172/show_tree.json");
    assert_eq!(response.status, 200);
    let tree: Value = serde_json::from_str(&response.body).unwrap();
    assert_eq!(tree["parent_type"], "FileGroup");
}

#[test]
fn uuid_redirect_preserves_format() {
    let fixture = Fixture::new();
    let catalog = fixture.catalog();

    let response = dispatch(&catalog, &format!("/uuids/{}", REPOSITORY_UUID));
    assert_eq!(response.status, 302);
    assert_eq!(response.location.as_deref(), Some("/repositories/1"));

    let response = dispatch(&catalog, &format!("/uuids/{}.json", REPOSITORY_UUID));
    assert_eq!(response.location.as_deref(), Some("/repositories/1.json"));

    let response = dispatch(&catalog, &format!("/uuids/{}", IMAGE_UUID));
    assert_eq!(response.location.as_deref(), Some("/cfs_files/240067872391336"));

    let response = dispatch(&catalog, "/uuids/00000000-0000-0000-0000-000000000000");
    assert_eq!(response.status, 404);
    assert_eq!(response.body, "Not Found");
}

fn request(port: u16, raw: &str) -> String {
    let mut stream = TcpStream::connect(("127.0.0.1", port)).unwrap();
    stream.write_all(raw.as_bytes()).unwrap();
    let mut response = String::new();
    stream.read_to_string(&mut response).unwrap();
    response
}

#[test]
fn server_answers_over_http() {
    let fixture = Fixture::new();
    let catalog = Arc::new(fixture.catalog());
    let http = Arc::new(server::bind("127.0.0.1:0").unwrap());
    let port = http.server_addr().to_ip().unwrap().port();
    {
        let http = Arc::clone(&http);
        thread::spawn(move || server::run(http, catalog, 2));
    }

    let response = request(
        port,
        &format!(
            "GET /uuids/{}.json HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n",
            IMAGE_UUID
        ),
    );
    assert!(response.starts_with("HTTP/1.1 302"), "{}", response);
    assert!(response.contains("Location: /cfs_files/240067872391336.json"));

    let response = request(
        port,
        "GET /collections.json HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n",
    );
    assert!(response.starts_with("HTTP/1.1 200"), "{}", response);
    assert!(response.contains(COLLECTION_UUID));

    let response = request(
        port,
        "POST /collections.json HTTP/1.1\r\nHost: localhost\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
    );
    assert!(response.starts_with("HTTP/1.1 405"), "{}", response);
}
