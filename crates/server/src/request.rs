//! Per-request view handed to filters and handlers.

use http::{HeaderMap, Method, Uri, Version};
use mini_http::protocol::RequestHeader;

/// The decoded request header plus the part of the path captured by the
/// matched route (the `{value}` of `/echo/{value}`, the `{name}` of
/// `/files/{name}`; empty for exact routes).
#[derive(Debug)]
pub struct RequestContext<'req> {
    request_header: &'req RequestHeader,
    path_param: &'req str,
}

impl<'req> RequestContext<'req> {
    pub fn new(request_header: &'req RequestHeader, path_param: &'req str) -> Self {
        Self { request_header, path_param }
    }

    pub fn request_header(&self) -> &RequestHeader {
        self.request_header
    }

    pub fn method(&self) -> &Method {
        self.request_header.method()
    }

    pub fn uri(&self) -> &Uri {
        self.request_header.uri()
    }

    pub fn version(&self) -> Version {
        self.request_header.version()
    }

    pub fn headers(&self) -> &HeaderMap {
        self.request_header.headers()
    }

    /// Raw remainder of the path after the route prefix, never percent-decoded.
    pub fn path_param(&self) -> &'req str {
        self.path_param
    }
}
