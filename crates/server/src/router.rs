//! Ordered route table: the first item whose path pattern and filter both
//! match the request wins.

use crate::filter::{AllFilter, Filter};
use crate::handler::RequestHandler;
use crate::{RequestContext, filter};

use mini_http::protocol::RequestHeader;
use std::fmt;

type RouterFilter = dyn Filter + Send + Sync + 'static;

pub struct Router {
    items: Vec<RouterItem>,
}

/// How a route matches the raw request path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathPattern {
    /// The whole path must equal the pattern; captures nothing.
    Exact(String),
    /// The path must start with the pattern; captures the remainder.
    Prefix(String),
}

pub fn exact(path: impl Into<String>) -> PathPattern {
    PathPattern::Exact(path.into())
}

pub fn prefix(path: impl Into<String>) -> PathPattern {
    PathPattern::Prefix(path.into())
}

impl PathPattern {
    /// Returns the captured path parameter when `path` matches.
    pub fn capture<'req>(&self, path: &'req str) -> Option<&'req str> {
        match self {
            PathPattern::Exact(exact) => (exact == path).then_some(""),
            PathPattern::Prefix(prefix) => path.strip_prefix(prefix.as_str()),
        }
    }
}

pub struct RouterItem {
    pattern: PathPattern,
    filter: Box<RouterFilter>,
    handler: Box<dyn RequestHandler>,
}

pub struct RouteResult<'router, 'req> {
    handler: &'router dyn RequestHandler,
    path_param: &'req str,
}

impl Router {
    pub fn builder() -> RouterBuilder {
        RouterBuilder::new()
    }

    pub fn at<'router, 'req>(&'router self, header: &'req RequestHeader) -> Option<RouteResult<'router, 'req>> {
        let path = header.uri().path();

        self.items.iter().find_map(|item| {
            let path_param = item.pattern.capture(path)?;
            let request_context = RequestContext::new(header, path_param);
            item.filter.check(&request_context).then(|| RouteResult { handler: item.handler.as_ref(), path_param })
        })
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl fmt::Debug for Router {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.items.iter().map(|item| &item.pattern)).finish()
    }
}

impl<'router, 'req> RouteResult<'router, 'req> {
    pub fn handler(&self) -> &'router dyn RequestHandler {
        self.handler
    }

    pub fn path_param(&self) -> &'req str {
        self.path_param
    }
}

pub struct RouterBuilder {
    items: Vec<RouterItem>,
}

impl RouterBuilder {
    fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Appends a route; routes are tried in the order they were added.
    pub fn route(mut self, pattern: PathPattern, item_builder: RouterItemBuilder) -> Self {
        self.items.push(item_builder.build(pattern));
        self
    }

    pub fn build(self) -> Router {
        Router { items: self.items }
    }
}

macro_rules! method_router_filter {
    ($method:ident, $method_name:ident) => {
        pub fn $method<H: RequestHandler + 'static>(handler: H) -> RouterItemBuilder {
            let mut filters = filter::all_filter();
            filters.and(filter::$method_name());
            RouterItemBuilder { filters, handler: Box::new(handler) }
        }
    };
}

method_router_filter!(get, get_method);
method_router_filter!(post, post_method);

pub struct RouterItemBuilder {
    filters: AllFilter,
    handler: Box<dyn RequestHandler>,
}

impl RouterItemBuilder {
    fn build(self, pattern: PathPattern) -> RouterItem {
        RouterItem { pattern, filter: Box::new(self.filters), handler: self.handler }
    }
}
