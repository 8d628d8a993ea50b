use crate::RequestContext;
use http::Method;

pub trait Filter: Send + Sync {
    fn check(&self, req: &RequestContext) -> bool;
}

pub fn all_filter() -> AllFilter {
    AllFilter::new()
}

/// compose filters with *AND* logic, the whole [`AllFilter`] succeeds only if every inner filter succeeds
pub struct AllFilter {
    filters: Vec<Box<dyn Filter>>,
}

impl AllFilter {
    fn new() -> Self {
        Self { filters: vec![] }
    }

    pub fn and<F: Filter + 'static>(&mut self, filter: F) -> &mut Self {
        self.filters.push(Box::new(filter));
        self
    }
}

impl Filter for AllFilter {
    fn check(&self, req: &RequestContext) -> bool {
        self.filters.iter().all(|filter| filter.check(req))
    }
}

impl std::fmt::Debug for AllFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AllFilter").field("filters", &self.filters.len()).finish()
    }
}

#[derive(Debug)]
pub struct MethodFilter(Method);

impl Filter for MethodFilter {
    fn check(&self, req: &RequestContext) -> bool {
        self.0.eq(req.method())
    }
}

macro_rules! method_filter {
    ($method:ident, $upper_case_method:ident) => {
        #[inline]
        pub fn $method() -> MethodFilter {
            MethodFilter(Method::$upper_case_method)
        }
    };
}

method_filter!(get_method, GET);
method_filter!(post_method, POST);
