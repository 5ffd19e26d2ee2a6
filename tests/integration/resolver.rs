use dircatalog::identity::{derive_id, derive_uuid};
use dircatalog::overlay::{Metadata, MetadataOverlay};
use dircatalog::Catalog;
use serde_json::{json, Value};
use std::fs;
use std::path::Path;
use std::sync::Arc;

use crate::integration::support::*;

#[test]
fn repository_listing_hides_admin_domain() {
    let fixture = Fixture::new();
    let repositories = fixture.catalog().repositories();
    assert_eq!(repositories.len(), 2);

    let first = repositories.iter().find(|r| r.id == 1).unwrap();
    assert_eq!(
        to_value(first),
        json!({
            "title": "Test Repository",
            "url": "https://example.org/repository",
            "notes": "This repository contains test content.",
            "address_1": "123 Anywhere St.",
            "address_2": "Room 422",
            "city": "Urbana",
            "state": "IL",
            "zip": 61820,
            "phone_number": "(555) 555-5555",
            "contact_email": "curator@example.org",
            "email": "curator@example.org",
            "ldap_admin_group": "Some Group",
            "id": 1,
            "uuid": REPOSITORY_UUID
        })
    );
}

#[test]
fn repository_detail_hides_contact_fields_and_lists_collections() {
    let fixture = Fixture::new();
    let repository = fixture.catalog().repository(1).unwrap();
    assert_eq!(
        to_value(&repository),
        json!({
            "title": "Test Repository",
            "url": "https://example.org/repository",
            "contact_email": "curator@example.org",
            "email": "curator@example.org",
            "ldap_admin_domain": "example",
            "ldap_admin_group": "Some Group",
            "id": 1,
            "uuid": REPOSITORY_UUID,
            "collections": [
                {"title": "Test Collection", "id": 1, "path": "/collections/1.json"}
            ]
        })
    );
}

#[test]
fn repository_without_sidecar_has_only_derived_fields() {
    let fixture = Fixture::new();
    fs::create_dir_all(fixture.path("repositories/3")).unwrap();
    let repository = fixture.catalog().repository(3).unwrap();
    assert_eq!(
        to_value(&repository),
        json!({"id": 3, "uuid": derive_uuid("/repositories/3"), "collections": []})
    );
}

#[test]
fn collection_listing() {
    let fixture = Fixture::new();
    let collections = to_value(&fixture.catalog().collections());
    assert_eq!(
        unordered(collections),
        unordered(json!([
            {"id": 1, "uuid": COLLECTION_UUID, "path": "/collections/1"},
            {"id": 2, "uuid": derive_uuid("/repositories/2/collections/2"), "path": "/collections/2"}
        ]))
    );
}

#[test]
fn collection_detail() {
    let fixture = Fixture::new();
    let collection = fixture.catalog().collection(1).unwrap();
    let expected = json!({
        "title": "Test Collection",
        "description": "This collection contains test content.",
        "access_url": "https://example.org/",
        "physical_collection_url": null,
        "publish": true,
        "external_id": null,
        "id": 1,
        "uuid": COLLECTION_UUID,
        "repository_path": "/repositories/1",
        "repository_title": "Test Repository",
        "repository_uuid": REPOSITORY_UUID,
        "file_groups": [
            {"title": "Content", "storage_level": "bit_level", "id": 1, "path": "/file_groups/1.json"},
            {"title": "External Content", "storage_level": "external", "id": 2, "path": "/file_groups/2.json"}
        ]
    });
    assert_eq!(unordered(to_value(&collection)), unordered(expected));
}

#[test]
fn on_disk_file_group_references_its_root() {
    let fixture = Fixture::new();
    let file_group = fixture.catalog().file_group(1).unwrap();
    assert_eq!(file_group.storage_level(), Some("bit_level"));
    assert_eq!(
        to_value(&file_group),
        json!({
            "title": "Content",
            "external_file_location": null,
            "storage_level": "bit_level",
            "id": 1,
            "uuid": FILE_GROUP_UUID,
            "collection_id": 1,
            "cfs_directory": {
                "id": ROOT_DIR_ID,
                "name": "root",
                "path": "/cfs_directories/30193726375172.json",
                "uuid": ROOT_DIR_UUID
            }
        })
    );
}

#[test]
fn external_file_group_has_no_directory() {
    let fixture = Fixture::new();
    let file_group = fixture.catalog().file_group(2).unwrap();
    assert_eq!(
        to_value(&file_group),
        json!({
            "title": "External Content",
            "external_file_location": r"\\example.org\Files",
            "storage_level": "external",
            "id": 2,
            "uuid": EXTERNAL_FILE_GROUP_UUID,
            "collection_id": 1
        })
    );
}

#[test]
fn content_root_directory_has_no_parent() {
    let fixture = Fixture::new();
    let directory = fixture.catalog().directory(ROOT_DIR_ID).unwrap();
    let expected = json!({
        "id": ROOT_DIR_ID,
        "uuid": ROOT_DIR_UUID,
        "name": "root",
        "relative_pathname": CONTENT_ROOT,
        "subdirectories": [
            {
                "id": EMPTY_DIR_ID,
                "uuid": EMPTY_DIR_UUID,
                "name": "empty_dir",
                "path": "/cfs_directories/175789411019744.json"
            },
            {
                "id": SUBDIR_ID,
                "uuid": SUBDIR_UUID,
                "name": "subdir",
                "path": "/cfs_directories/118181527816155.json"
            }
        ],
        "files": [
            {
                "id": IMAGE_ID,
                "name": "escher_lego.jpg",
                "md5_sum": "00000000000000000000000000000000",
                "uuid": IMAGE_UUID,
                "content_type": "unknown/unknown",
                "size": IMAGE_SIZE,
                "mtime": "2020-01-01T10:05:30Z",
                "path": "/cfs_files/240067872391336.json",
                "relative_pathname": format!("{}/escher_lego.jpg", CONTENT_ROOT)
            }
        ]
    });
    assert_eq!(unordered(to_value(&directory)), unordered(expected));
}

#[test]
fn empty_directory_skips_housekeeping_files() {
    let fixture = Fixture::new();
    let directory = fixture.catalog().directory(EMPTY_DIR_ID).unwrap();
    assert_eq!(
        to_value(&directory),
        json!({
            "id": EMPTY_DIR_ID,
            "uuid": EMPTY_DIR_UUID,
            "name": "empty_dir",
            "relative_pathname": format!("{}/empty_dir", CONTENT_ROOT),
            "subdirectories": [],
            "files": [],
            "parent_directory": {
                "id": ROOT_DIR_ID,
                "name": "root",
                "path": "/cfs_directories/30193726375172",
                "uuid": ROOT_DIR_UUID
            }
        })
    );
}

#[test]
fn file_detail_references_its_directory() {
    let fixture = Fixture::new();
    let file = fixture.catalog().file(IMAGE_ID).unwrap();
    assert_eq!(
        to_value(&file),
        json!({
            "id": IMAGE_ID,
            "name": "escher_lego.jpg",
            "md5_sum": "00000000000000000000000000000000",
            "uuid": IMAGE_UUID,
            "content_type": "unknown/unknown",
            "size": IMAGE_SIZE,
            "mtime": "2020-01-01T10:05:30Z",
            "relative_pathname": format!("{}/escher_lego.jpg", CONTENT_ROOT),
            "directory": {
                "id": ROOT_DIR_ID,
                "name": "root",
                "path": "/cfs_directories/30193726375172",
                "uuid": ROOT_DIR_UUID
            }
        })
    );
}

#[test]
fn nested_file_resolves() {
    let fixture = Fixture::new();
    let file = fixture.catalog().file(HELLO3_ID).unwrap();
    assert_eq!(file.name, "hello3.txt");
    assert_eq!(file.size, 21);
    assert_eq!(file.directory.unwrap().id, SUB_SUBDIR_ID);
}

#[test]
fn unknown_ids_are_not_found() {
    let fixture = Fixture::new();
    let catalog = fixture.catalog();
    assert!(catalog.repository(99999).unwrap_err().is_not_found());
    assert!(catalog.collection(99999).unwrap_err().is_not_found());
    assert!(catalog.file_group(99999).unwrap_err().is_not_found());
    assert!(catalog.directory(99999).unwrap_err().is_not_found());
    assert!(catalog.file(99999).unwrap_err().is_not_found());
    assert_eq!(
        catalog.file(999999999).unwrap_err().to_string(),
        "File not found: 999999999"
    );
}

#[test]
fn nested_directory_points_back_to_root() {
    let fixture = Fixture::new();
    let subdir = fixture.catalog().directory(SUBDIR_ID).unwrap();
    let parent = subdir.parent_directory.unwrap();
    assert_eq!(parent.id, ROOT_DIR_ID);
    assert_eq!(parent.name, "root");
    assert_eq!(subdir.subdirectories.len(), 1);
    assert_eq!(subdir.files.len(), 2);
}

#[test]
fn kinds_do_not_cross_resolve() {
    let fixture = Fixture::new();
    let catalog = fixture.catalog();
    assert!(catalog.file(ROOT_DIR_ID).unwrap_err().is_not_found());
    assert!(catalog.directory(IMAGE_ID).unwrap_err().is_not_found());
}

#[test]
fn ignored_and_hidden_files_never_resolve() {
    let fixture = Fixture::new();
    write(fixture.root(), &format!("{}/.hidden", CONTENT_ROOT), "secret");
    write(fixture.root(), &format!("{}/Thumbs.db", CONTENT_ROOT), "thumbs");
    let catalog = fixture.catalog();

    for name in [".keep", ".hidden", "Thumbs.db"] {
        let relative = format!("/{}/{}", CONTENT_ROOT, name);
        assert!(catalog.file(derive_id(&relative)).unwrap_err().is_not_found());
    }
    let keep = format!("/{}/empty_dir/.keep", CONTENT_ROOT);
    assert!(catalog.file(derive_id(&keep)).unwrap_err().is_not_found());

    let root = catalog.directory(ROOT_DIR_ID).unwrap();
    assert_eq!(root.files.len(), 1);
}

#[test]
fn identifiers_are_stable_across_instances() {
    let fixture = Fixture::new();
    let first = to_value(&fixture.catalog().directory(SUBDIR_ID).unwrap());
    let second = to_value(&Catalog::new(fixture.root()).directory(SUBDIR_ID).unwrap());
    assert_eq!(first, second);
}

#[test]
fn lookups_reflect_the_tree_as_it_is_now() {
    let fixture = Fixture::new();
    let catalog = fixture.catalog();
    let relative = format!("{}/late.txt", CONTENT_ROOT);
    let id = derive_id(&format!("/{}", relative));

    assert!(catalog.file(id).unwrap_err().is_not_found());
    write(fixture.root(), &relative, "late");
    assert_eq!(catalog.file(id).unwrap().size, 4);
    fs::remove_file(fixture.path(&relative)).unwrap();
    assert!(catalog.file(id).unwrap_err().is_not_found());
}

#[test]
fn non_numeric_entity_directories_are_skipped() {
    let fixture = Fixture::new();
    fs::create_dir_all(fixture.path("repositories/drafts/collections/1")).unwrap();
    let catalog = fixture.catalog();
    assert_eq!(catalog.repositories().len(), 2);
    let ids: Vec<u64> = catalog.collections().iter().map(|c| c.id).collect();
    assert_eq!(ids.len(), 2);
}

#[test]
fn missing_root_yields_empty_listings() {
    let catalog = Catalog::new("/nonexistent/catalog/root");
    assert!(catalog.repositories().is_empty());
    assert!(catalog.collections().is_empty());
    assert!(catalog.directory(ROOT_DIR_ID).unwrap_err().is_not_found());
}

#[test]
fn malformed_sidecar_is_empty_metadata() {
    let fixture = Fixture::new();
    write(fixture.root(), "repositories/2/info.yml", "title: [unterminated");
    let repository = fixture.catalog().repository(2).unwrap();
    let value = to_value(&repository);
    assert_eq!(value.get("title"), None);
    assert_eq!(value["id"], Value::from(2));
}

#[test]
fn zero_padded_directories_are_not_entities() {
    let fixture = Fixture::new();
    fs::create_dir_all(fixture.path("repositories/01")).unwrap();
    let catalog = fixture.catalog();
    let ids: Vec<u64> = catalog.repositories().iter().map(|r| r.id).collect();
    assert_eq!(unordered(json!(ids)), unordered(json!([1, 2])));
    let repository = catalog.repository(1).unwrap();
    assert_eq!(repository.uuid, REPOSITORY_UUID);
    assert!(catalog
        .path_for_uuid(&derive_uuid("/repositories/01"))
        .unwrap_err()
        .is_not_found());
}

#[cfg(unix)]
#[test]
fn non_utf8_names_are_left_out_of_every_view() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let fixture = Fixture::new();
    let odd = fixture.path(CONTENT_ROOT).join(OsStr::from_bytes(b"caf\xe9"));
    fs::create_dir_all(&odd).unwrap();
    fs::write(odd.join("a.txt"), "x").unwrap();
    fs::write(fixture.path(CONTENT_ROOT).join(OsStr::from_bytes(b"\xff.txt")), "x").unwrap();
    fs::create_dir_all(fixture.path("repositories").join(OsStr::from_bytes(b"\xfe"))).unwrap();
    let catalog = fixture.catalog();

    let root = catalog.directory(ROOT_DIR_ID).unwrap();
    assert_eq!(root.subdirectories.len(), 2);
    assert_eq!(root.files.len(), 1);

    let tree = catalog.directory_tree(ROOT_DIR_ID).unwrap();
    assert_eq!(tree.subdirectories.len(), 2);
    assert_eq!(tree.files.len(), 1);

    assert_eq!(catalog.repositories().len(), 2);
    assert_eq!(catalog.collections().len(), 2);
    assert_eq!(catalog.collection(1).unwrap().file_groups.len(), 2);

    let lossy = format!("/{}/caf\u{fffd}", CONTENT_ROOT);
    assert!(catalog.directory(derive_id(&lossy)).unwrap_err().is_not_found());
}

struct FixedTitle;

impl MetadataOverlay for FixedTitle {
    fn load(&self, _dir: &Path) -> Metadata {
        let mut metadata = Metadata::new();
        metadata.insert("title".to_string(), json!("Injected"));
        metadata.insert("notes".to_string(), json!("private"));
        metadata.insert("id".to_string(), json!(42));
        metadata
    }
}

#[test]
fn injected_overlay_replaces_sidecars() {
    let fixture = Fixture::new();
    let catalog = Catalog::new(fixture.root()).with_overlay(Arc::new(FixedTitle));

    let repository = to_value(&catalog.repository(1).unwrap());
    assert_eq!(repository["title"], json!("Injected"));
    assert_eq!(repository["id"], json!(1));
    assert_eq!(repository.get("notes"), None);
    assert_eq!(repository["collections"][0]["title"], json!("Injected"));

    let listed = catalog.repositories();
    let first = to_value(listed.iter().find(|r| r.id == 1).unwrap());
    assert_eq!(first["notes"], json!("private"));
}
