//! Navigation collaborator.
//!
//! Storefront links never carry raw paths. Each store-relative path goes
//! through a [`Navigator`], which scopes it under the host's routing
//! namespace for the store.

pub trait Navigator {
    /// URL the host serves a store-relative path at
    fn resolve(&self, path: &str) -> String;
}

/// Prefixes paths with `<route prefix>/<store id>`
#[derive(Debug, Clone)]
pub struct StoreNavigator {
    prefix: String,
}

impl StoreNavigator {
    pub fn new(route_prefix: &str, store_id: &str) -> Self {
        let route_prefix = route_prefix.trim_end_matches('/');
        Self {
            prefix: format!("{}/{}", route_prefix, store_id),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }
}

impl Navigator for StoreNavigator {
    fn resolve(&self, path: &str) -> String {
        let path = path.trim();
        if is_external(path) {
            return path.to_string();
        }

        if path.is_empty() {
            format!("{}/", self.prefix)
        } else if path.starts_with('/') {
            format!("{}{}", self.prefix, path)
        } else {
            format!("{}/{}", self.prefix, path)
        }
    }
}

/// Leaves paths untouched
#[derive(Debug, Clone, Copy, Default)]
pub struct PassThroughNavigator;

impl Navigator for PassThroughNavigator {
    fn resolve(&self, path: &str) -> String {
        path.to_string()
    }
}

/// Links that leave the store. Surrounding whitespace and scheme case are
/// ignored, matching how [`StoreNavigator::resolve`] reads the path.
pub fn is_external(path: &str) -> bool {
    let path = path.trim().to_ascii_lowercase();
    path.starts_with("http://")
        || path.starts_with("https://")
        || path.starts_with("mailto:")
        || path.starts_with("tel:")
        || path.starts_with("//")
        || path.starts_with('#')
}
