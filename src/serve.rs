//! On-demand HTTP server.
//!
//! Pages are rendered per request from the site sources with the same
//! [`Renderer`] the builder uses, so nothing has to be built first.
//!
//! # Routing
//!
//! | Request                | Source                                        |
//! |------------------------|-----------------------------------------------|
//! | `/assets/<path>`       | `assets/<path>` verbatim (if `assets/` exists) |
//! | `/`                    | `pages/index.<ext>`                           |
//! | `/<path>` or `/<path>/`| `pages/<path>.<ext>`                          |
//!
//! `<ext>` is tried in [`ServeConfig::extensions`] order; the first existing
//! file wins. Anything else is a 404.
//!
//! ```text
//! ┌──────────────┐     ┌──────────────┐
//! │   Worker 1   │ ... │   Worker N   │   (one per CPU)
//! └──────┬───────┘     └──────┬───────┘
//!        └─────────┬──────────┘
//!                  ▼
//!       shared listener + Renderer (read-only)
//! ```

use crate::{
    build::PAGES_DIR,
    config::ServeConfig,
    log,
    render::{RenderError, Renderer, context::ASSETS_DIR},
    utils::{mime::guess_content_type, path::is_contained},
};
use std::{
    fs::File,
    io::{self, Cursor},
    num::NonZeroUsize,
    path::{Path, PathBuf},
    thread,
};
use thiserror::Error;
use tiny_http::{Header, Request, Response, ResponseBox, StatusCode};

const HTML_CONTENT_TYPE: &str = "text/html; charset=utf-8";

/// Worker count when the CPU count cannot be determined.
const FALLBACK_WORKERS: usize = 4;

#[derive(Debug, Error)]
pub enum ServeError {
    #[error("failed to start server: {0}")]
    ServerStartError(String),

    #[error(transparent)]
    Renderer(#[from] RenderError),
}

/// Outcome of routing a single request.
#[derive(Debug, PartialEq, Eq)]
pub enum Reply {
    /// Rendered page HTML.
    Page(String),
    /// Asset file to stream verbatim.
    Asset(PathBuf),
    NotFound,
    Internal,
}

pub struct Server {
    source: PathBuf,
    renderer: Renderer,
    config: ServeConfig,
    serve_assets: bool,
}

impl Server {
    pub fn new(source: impl Into<PathBuf>, renderer: Renderer, config: ServeConfig) -> Self {
        let source = source.into();
        let serve_assets = source.join(ASSETS_DIR).is_dir();
        Self {
            source,
            renderer,
            config,
            serve_assets,
        }
    }

    /// Bind the listener and handle requests until the process exits.
    pub fn start(&self) -> Result<(), ServeError> {
        let listener = tiny_http::Server::http(self.config.address())
            .map_err(|err| ServeError::ServerStartError(err.to_string()))?;

        let workers = thread::available_parallelism()
            .map(NonZeroUsize::get)
            .unwrap_or(FALLBACK_WORKERS);

        log!("serve"; "{} at http://{}", self.renderer.config().title, self.config.address());

        thread::scope(|scope| {
            for _ in 0..workers {
                scope.spawn(|| {
                    for request in listener.incoming_requests() {
                        if let Err(err) = self.handle(request) {
                            log!("error"; "failed to send response: {err}");
                        }
                    }
                });
            }
        });

        Ok(())
    }

    fn handle(&self, request: Request) -> io::Result<()> {
        let reply = self.route(request.url());
        request.respond(into_response(reply)?)
    }

    /// Map a raw request URL to a reply.
    pub fn route(&self, url: &str) -> Reply {
        // Strip query string (e.g., ?t=123456) before decoding the path
        let raw_path = url.split(['?', '#']).next().unwrap_or(url);
        let decoded = urlencoding::decode(raw_path)
            .map(std::borrow::Cow::into_owned)
            .unwrap_or_else(|_| raw_path.to_owned());
        let path = match decoded.trim_end_matches('/') {
            "" => "/".to_owned(),
            trimmed => trimmed.to_owned(),
        };

        if self.serve_assets && path.starts_with(&format!("/{ASSETS_DIR}/")) {
            return self.route_asset(&path);
        }

        let Some(file) = self.find_page(&path) else {
            log!("serve"; "no page found for {path}");
            return Reply::NotFound;
        };

        match self.renderer.render(&file, &path) {
            Ok(html) => {
                log!("serve"; "{path} -> {}", display_relative(&file, &self.source));
                Reply::Page(html)
            }
            Err(err) if err.is_not_found() => {
                log!("serve"; "{path}: {err}");
                Reply::NotFound
            }
            Err(err) => {
                log!("error"; "{path}: {:#}", anyhow::Error::from(err));
                Reply::Internal
            }
        }
    }

    fn route_asset(&self, path: &str) -> Reply {
        let relative = Path::new(path.trim_start_matches('/'));
        let file = self.source.join(relative);
        if is_contained(relative) && file.is_file() {
            log!("serve"; "asset {path}");
            Reply::Asset(file)
        } else {
            log!("serve"; "no asset found for {path}");
            Reply::NotFound
        }
    }

    /// First `pages/<path>.<ext>` that exists, trying extensions in order.
    pub fn find_page(&self, path: &str) -> Option<PathBuf> {
        let relative = match path.trim_matches('/') {
            "" => "index",
            relative => relative,
        };
        if !is_contained(Path::new(relative)) {
            return None;
        }

        let pages = self.source.join(PAGES_DIR);
        self.config
            .extensions
            .iter()
            .map(|ext| pages.join(format!("{relative}.{ext}")))
            .find(|candidate| candidate.is_file())
    }
}

/// Load the renderer for `source` and serve it.
pub fn serve_site(source: &Path, config: ServeConfig) -> Result<(), ServeError> {
    let renderer = Renderer::new(source)?;
    Server::new(source, renderer, config).start()
}

fn into_response(reply: Reply) -> io::Result<ResponseBox> {
    Ok(match reply {
        Reply::Page(html) => Response::from_string(html)
            .with_header(header("Content-Type", HTML_CONTENT_TYPE)?)
            .boxed(),
        Reply::Asset(path) => match File::open(&path) {
            // from_file sets Content-Length from the file metadata
            Ok(file) => Response::from_file(file)
                .with_header(header("Content-Type", guess_content_type(&path))?)
                .boxed(),
            Err(err) if err.kind() == io::ErrorKind::NotFound => status_response(404, "404 Not Found")?,
            Err(err) => return Err(err),
        },
        Reply::NotFound => status_response(404, "404 Not Found")?,
        Reply::Internal => status_response(500, "500 Internal Server Error")?,
    })
}

fn status_response(code: u16, body: &'static str) -> io::Result<ResponseBox> {
    Ok(Response::new(
        StatusCode(code),
        vec![header("Content-Type", "text/plain; charset=utf-8")?],
        Cursor::new(body.as_bytes()),
        Some(body.len()),
        None,
    )
    .boxed())
}

fn header(name: &str, value: &str) -> io::Result<Header> {
    Header::from_bytes(name, value)
        .map_err(|()| io::Error::new(io::ErrorKind::InvalidInput, format!("invalid header {name}")))
}

fn display_relative(path: &Path, root: &Path) -> String {
    path.strip_prefix(root).unwrap_or(path).display().to_string()
}
