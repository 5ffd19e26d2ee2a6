//! HTTP server
//!
//! A blocking `tiny_http` listener drained by a fixed pool of worker
//! threads. Every worker shares one [`Catalog`]; lookups hold no state, so
//! no locking is needed.

use crate::catalog::Catalog;
use crate::config::ServerConfig;
use crate::error::CatalogError;
use crate::routes;
use std::io::Cursor;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::thread;
use tiny_http::{Header, Method, Request, Response, Server};
use tracing::{debug, error, info, warn};

/// Bind to the configured address and serve until the listener fails.
pub fn serve(catalog: Arc<Catalog>, config: &ServerConfig) -> Result<(), CatalogError> {
    let server = Arc::new(bind(&config.bind)?);
    info!(bind = %config.bind, workers = config.workers, root = %catalog.root().display(), "Serving catalog");
    run(server, catalog, config.workers)
}

pub fn bind(addr: &str) -> Result<Server, CatalogError> {
    Server::http(addr)
        .map_err(|e| CatalogError::ServerError(format!("Failed to bind {}: {}", addr, e)))
}

/// Drain `server` on `workers` threads (at least one). Returns once every
/// worker has stopped receiving.
pub fn run(server: Arc<Server>, catalog: Arc<Catalog>, workers: usize) -> Result<(), CatalogError> {
    let handles = (0..workers.max(1))
        .map(|index| {
            let server = Arc::clone(&server);
            let catalog = Arc::clone(&catalog);
            thread::Builder::new()
                .name(format!("dircatalog-worker-{}", index))
                .spawn(move || worker_loop(&server, &catalog))
                .map_err(|e| CatalogError::ServerError(format!("Failed to spawn worker: {}", e)))
        })
        .collect::<Result<Vec<_>, _>>()?;

    for handle in handles {
        if handle.join().is_err() {
            warn!("Worker thread panicked");
        }
    }
    Ok(())
}

fn worker_loop(server: &Server, catalog: &Catalog) {
    loop {
        match server.recv() {
            Ok(request) => handle(catalog, request),
            Err(e) => {
                debug!(error = %e, "Worker stopping");
                break;
            }
        }
    }
}

fn handle(catalog: &Catalog, request: Request) {
    let method = request.method().clone();
    let url = request.url().to_string();
    let response = match method {
        Method::Get | Method::Head => guarded(&url, || routes::dispatch(catalog, &url)),
        _ => routes::Response {
            status: 405,
            content_type: None,
            body: String::new(),
            location: None,
        },
    };
    info!(method = %method, url = %url, status = response.status, "Request");
    if let Err(e) = request.respond(to_http(response)) {
        warn!(url = %url, error = %e, "Failed to write response");
    }
}

/// Run a handler, turning a panic into a 500 so the worker keeps serving.
fn guarded<F>(url: &str, handler: F) -> routes::Response
where
    F: FnOnce() -> routes::Response,
{
    panic::catch_unwind(AssertUnwindSafe(handler)).unwrap_or_else(|_| {
        error!(url = %url, "Handler panicked");
        routes::Response {
            status: 500,
            content_type: None,
            body: "Internal Server Error".to_string(),
            location: None,
        }
    })
}

/// Convert a routed response into a `tiny_http` response.
pub fn to_http(response: routes::Response) -> Response<Cursor<Vec<u8>>> {
    let mut http = Response::from_string(response.body).with_status_code(response.status);
    if let Some(content_type) = response.content_type {
        if let Ok(header) = Header::from_bytes(&b"Content-Type"[..], content_type.as_bytes()) {
            http = http.with_header(header);
        }
    }
    if let Some(location) = response.location {
        match Header::from_bytes(&b"Location"[..], location.as_bytes()) {
            Ok(header) => http = http.with_header(header),
            Err(()) => warn!(location = %location, "Dropping invalid Location header"),
        }
    }
    http
}
