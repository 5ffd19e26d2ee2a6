//! Request routing
//!
//! Maps a request path onto a catalog call and renders the outcome. A `.json`
//! suffix selects the structured body; otherwise a short HTML line is
//! returned. The mapping is pure: no I/O beyond what the catalog performs.

use crate::catalog::Catalog;
use crate::error::CatalogError;
use crate::layout::parse_literal_id;
use crate::types::{EntityId, EntityKind};
use serde::Serialize;
use serde_json::json;
use tracing::{debug, warn};

const JSON_SUFFIX: &str = ".json";
const JSON_CONTENT_TYPE: &str = "application/json";
const HTML_CONTENT_TYPE: &str = "text/html;charset=utf-8";
const LANDING_PAGE: &str = "<h1>Directory Catalog</h1>";
const NOT_FOUND: &str = "Not Found";
const INTERNAL_ERROR: &str = "Internal Server Error";

/// Response body flavour selected by the path suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Html,
    Json,
}

/// A recognised request path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Landing,
    Repositories,
    Collections,
    Entity(EntityKind, EntityId),
    DirectoryTree(EntityId),
    Uuid(String),
}

impl Route {
    /// Parse a request target. The query string is ignored.
    pub fn parse(target: &str) -> Option<(Route, Format)> {
        let path = target.split(['?', '#']).next().unwrap_or("");
        let path = path.strip_prefix('/')?;
        let (path, format) = match path.strip_suffix(JSON_SUFFIX) {
            Some(stripped) => (stripped, Format::Json),
            None => (path, Format::Html),
        };
        let segments: Vec<&str> = path.split('/').collect();

        let route = match segments.as_slice() {
            [""] if format == Format::Html => Route::Landing,
            ["repositories"] => Route::Repositories,
            ["collections"] => Route::Collections,
            ["cfs_directories", id, "show_tree"] => Route::DirectoryTree(parse_literal_id(id)?),
            ["uuids", uuid] if is_uuid_like(uuid) => Route::Uuid(uuid.to_string()),
            [segment, id] => Route::Entity(entity_kind(segment)?, parse_literal_id(id)?),
            _ => return None,
        };
        Some((route, format))
    }
}

fn entity_kind(segment: &str) -> Option<EntityKind> {
    [
        EntityKind::Repository,
        EntityKind::Collection,
        EntityKind::FileGroup,
        EntityKind::Directory,
        EntityKind::File,
    ]
    .into_iter()
    .find(|kind| kind.route_segment() == segment)
}

fn is_uuid_like(candidate: &str) -> bool {
    !candidate.is_empty()
        && candidate
            .bytes()
            .all(|b| b == b'-' || b.is_ascii_digit() || b.is_ascii_lowercase())
}

/// Rendered response, independent of the HTTP library.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: u16,
    pub content_type: Option<&'static str>,
    pub body: String,
    pub location: Option<String>,
}

impl Response {
    fn html(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            content_type: Some(HTML_CONTENT_TYPE),
            body: body.into(),
            location: None,
        }
    }

    fn json<T: Serialize>(value: &T) -> Self {
        match serde_json::to_string(value) {
            Ok(body) => Self {
                status: 200,
                content_type: Some(JSON_CONTENT_TYPE),
                body,
                location: None,
            },
            Err(e) => {
                warn!(error = %e, "Failed to serialize response");
                Self::error(500, INTERNAL_ERROR, Format::Json)
            }
        }
    }

    /// `{"status": ..., "error": ...}` for structured requests, the bare
    /// message otherwise.
    fn error(status: u16, message: &str, format: Format) -> Self {
        match format {
            Format::Html => Self::html(status, message),
            Format::Json => Self {
                status,
                content_type: Some(JSON_CONTENT_TYPE),
                body: json!({"status": status, "error": message}).to_string(),
                location: None,
            },
        }
    }

    fn not_acceptable() -> Self {
        Self {
            status: 406,
            content_type: None,
            body: String::new(),
            location: None,
        }
    }

    fn redirect(location: String) -> Self {
        Self {
            status: 302,
            content_type: None,
            body: String::new(),
            location: Some(location),
        }
    }
}

/// Answer one request path.
pub fn dispatch(catalog: &Catalog, target: &str) -> Response {
    let Some((route, format)) = Route::parse(target) else {
        debug!(target, "No route");
        return Response::error(404, NOT_FOUND, Format::Html);
    };
    let response = match route {
        Route::Landing => Ok(Response::html(200, LANDING_PAGE)),
        Route::Repositories => Ok(match format {
            Format::Html => Response::html(200, "All Repositories"),
            Format::Json => Response::json(&catalog.repositories()),
        }),
        Route::Collections => Ok(match format {
            Format::Html => Response::html(200, "All Collections"),
            Format::Json => Response::json(&catalog.collections()),
        }),
        Route::Entity(kind, id) => entity(catalog, kind, id, format),
        Route::DirectoryTree(id) => match format {
            Format::Html => Ok(Response::not_acceptable()),
            Format::Json => catalog.directory_tree(id).map(|tree| Response::json(&tree)),
        },
        Route::Uuid(uuid) => catalog.path_for_uuid(&uuid).map(|path| match format {
            Format::Html => Response::redirect(path),
            Format::Json => Response::redirect(format!("{}{}", path, JSON_SUFFIX)),
        }),
    };
    response.unwrap_or_else(|e| render_error(&e, format))
}

fn entity(
    catalog: &Catalog,
    kind: EntityKind,
    id: EntityId,
    format: Format,
) -> Result<Response, CatalogError> {
    let json = match kind {
        EntityKind::Repository => Response::json(&catalog.repository(id)?),
        EntityKind::Collection => Response::json(&catalog.collection(id)?),
        EntityKind::FileGroup => Response::json(&catalog.file_group(id)?),
        EntityKind::Directory => Response::json(&catalog.directory(id)?),
        EntityKind::File => Response::json(&catalog.file(id)?),
    };
    // The HTML view only confirms the entity exists.
    Ok(match format {
        Format::Html => Response::html(200, format!("{} {}", kind, id)),
        Format::Json => json,
    })
}

fn render_error(error: &CatalogError, format: Format) -> Response {
    if error.is_not_found() {
        debug!(error = %error, "Lookup missed");
        Response::error(404, NOT_FOUND, format)
    } else {
        warn!(error = %error, "Request failed");
        Response::error(500, INTERNAL_ERROR, format)
    }
}
