use crate::handler::RequestHandler;
use crate::handlers::empty_response;
use crate::{HandlerError, RequestContext};
use async_trait::async_trait;
use bytes::Bytes;
use http::{Method, Response, StatusCode, header};
use std::io;
use std::path::{Component, Path, PathBuf};
use tracing::{info, warn};

/// `GET|POST /files/{name}`: downloads or uploads `{name}` inside the serving
/// directory.
///
/// `{name}` must be a relative path made only of normal components. Anything
/// that could leave the directory (`..`, a root, a drive prefix) is answered
/// with 404 and never reaches the file system.
#[derive(Debug, Clone)]
pub struct FileHandler {
    directory: PathBuf,
}

impl FileHandler {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self { directory: directory.into() }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Joins `name` onto the directory component by component, so separators
    /// in `name` (a trailing `/` included) never reach the file system as-is.
    fn resolve(&self, name: &str) -> Option<PathBuf> {
        let mut path = self.directory.clone();
        let mut joined = 0;

        for component in Path::new(name).components() {
            let Component::Normal(part) = component else {
                return None;
            };
            path.push(part);
            joined += 1;
        }

        (joined > 0).then_some(path)
    }

    async fn download(&self, path: PathBuf) -> Result<Response<Bytes>, HandlerError> {
        let content = match tokio::fs::read(&path).await {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                info!(path = %path.display(), "file not found");
                return Ok(empty_response(StatusCode::NOT_FOUND));
            }
            Err(e) => return Err(HandlerError::storage(path, e)),
        };

        let response = Response::builder()
            .status(StatusCode::OK)
            .header(header::CONTENT_TYPE, mime::APPLICATION_OCTET_STREAM.as_ref())
            .header(header::CONTENT_LENGTH, content.len())
            .body(Bytes::from(content))?;

        Ok(response)
    }

    async fn upload(&self, path: PathBuf, content: Bytes) -> Result<Response<Bytes>, HandlerError> {
        tokio::fs::write(&path, &content).await.map_err(|e| HandlerError::storage(&path, e))?;
        info!(path = %path.display(), size = content.len(), "file written");
        Ok(empty_response(StatusCode::CREATED))
    }
}

#[async_trait]
impl RequestHandler for FileHandler {
    async fn invoke<'req>(&self, req: &RequestContext<'req>, req_body: Bytes) -> Result<Response<Bytes>, HandlerError> {
        let Some(path) = self.resolve(req.path_param()) else {
            warn!(name = req.path_param(), "rejected file name");
            return Ok(empty_response(StatusCode::NOT_FOUND));
        };

        match *req.method() {
            Method::GET => self.download(path).await,
            Method::POST => self.upload(path, req_body).await,
            _ => Ok(empty_response(StatusCode::NOT_FOUND)),
        }
    }
}
