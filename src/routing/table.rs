//! Route table storage.
//!
//! # Responsibilities
//! - Store compiled entries keyed by (method, host, path)
//! - Reject a second registration of the same key
//! - Exact-match lookup for the dispatcher
//!
//! # Design Decisions
//! - Two structures: `hostless[path][method]` and `hosted[host][path][method]`
//! - One `RwLock` guards both; registration takes it exclusively, lookup shared
//! - Intermediate map levels are only created under the exclusive lock, so a
//!   reader never observes a partially built level
//! - Append-only: nothing removes an entry

use axum::http::Method;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::routing::chain::Handler;
use crate::routing::error::MuxError;
use crate::routing::pattern::RoutePattern;

/// Which registration served a request.
///
/// Inserted into request extensions before the middleware chain runs when
/// route metadata is enabled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMetadata {
    pub method: String,
    pub host: String,
    pub path: String,
    /// The literal registration string.
    pub pattern: String,
}

impl RouteMetadata {
    pub fn new(route: &RoutePattern, pattern: &str) -> Self {
        Self {
            method: route.method.to_string(),
            host: route.host.clone(),
            path: route.path.clone(),
            pattern: pattern.to_string(),
        }
    }
}

/// One compiled route.
#[derive(Debug)]
pub struct MuxEntry {
    route: RoutePattern,
    pattern: String,
    handler: Handler,
}

impl MuxEntry {
    pub fn new(route: RoutePattern, pattern: impl Into<String>, handler: Handler) -> Self {
        Self {
            route,
            pattern: pattern.into(),
            handler,
        }
    }

    pub fn route(&self) -> &RoutePattern {
        &self.route
    }

    /// The literal registration string, for diagnostics.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// The fully composed handler.
    pub fn handler(&self) -> &Handler {
        &self.handler
    }
}

type MethodMap = HashMap<Method, Arc<MuxEntry>>;
type PathMap = HashMap<String, MethodMap>;

#[derive(Default)]
struct Tables {
    hostless: PathMap,
    hosted: HashMap<String, PathMap>,
}

impl Tables {
    fn get(&self, method: &Method, host: &str, path: &str) -> Option<&Arc<MuxEntry>> {
        let paths = if host.is_empty() {
            &self.hostless
        } else {
            self.hosted.get(host)?
        };
        paths.get(path)?.get(method)
    }
}

/// Registered routes, shared between the registration phase and serving.
#[derive(Default)]
pub struct RouteTable {
    tables: RwLock<Tables>,
}

impl RouteTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a new entry.
    ///
    /// Fails with [`MuxError::DuplicateRoute`] when the key is taken; the
    /// error names the pattern already in the table.
    pub fn register(&self, entry: MuxEntry) -> Result<Arc<MuxEntry>, MuxError> {
        let mut tables = self.tables.write().expect("route table lock poisoned");
        let key = entry.route.clone();

        if let Some(existing) = tables.get(&key.method, &key.host, &key.path) {
            return Err(MuxError::DuplicateRoute {
                method: key.method.to_string(),
                host: key.host,
                path: key.path,
                existing: existing.pattern.clone(),
                attempted: entry.pattern,
            });
        }

        let paths = if key.is_hostless() {
            &mut tables.hostless
        } else {
            tables.hosted.entry(key.host).or_default()
        };

        let entry = Arc::new(entry);
        paths
            .entry(key.path)
            .or_default()
            .insert(key.method, entry.clone());

        Ok(entry)
    }

    /// Exact-match lookup. An empty `host` queries the hostless table.
    pub fn lookup(&self, method: &Method, host: &str, path: &str) -> Option<Arc<MuxEntry>> {
        let tables = self.tables.read().expect("route table lock poisoned");
        tables.get(method, host, path).cloned()
    }

    /// Number of registered entries.
    pub fn len(&self) -> usize {
        let tables = self.tables.read().expect("route table lock poisoned");
        let count = |paths: &PathMap| paths.values().map(HashMap::len).sum::<usize>();
        count(&tables.hostless) + tables.hosted.values().map(count).sum::<usize>()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Registration strings of every entry, sorted.
    pub fn patterns(&self) -> Vec<String> {
        let tables = self.tables.read().expect("route table lock poisoned");
        let mut patterns: Vec<String> = tables
            .hostless
            .values()
            .chain(tables.hosted.values().flat_map(|paths| paths.values()))
            .flat_map(|methods| methods.values())
            .map(|entry| entry.pattern.clone())
            .collect();
        patterns.sort();
        patterns
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(pattern: &str) -> MuxEntry {
        let route = RoutePattern::parse(pattern).unwrap();
        MuxEntry::new(route, pattern, Handler::from_fn(|_req| async { "ok" }))
    }

    #[test]
    fn test_exact_lookup() {
        let table = RouteTable::new();
        table.register(entry("GET /users")).unwrap();

        assert!(table.lookup(&Method::GET, "", "/users").is_some());
        assert!(table.lookup(&Method::POST, "", "/users").is_none());
        assert!(table.lookup(&Method::GET, "", "/users/").is_none());
        assert!(table.lookup(&Method::GET, "", "/").is_none());
        assert!(table.lookup(&Method::GET, "example.com", "/users").is_none());
    }

    #[test]
    fn test_host_qualified_lookup() {
        let table = RouteTable::new();
        table.register(entry("GET example.com/status")).unwrap();

        let found = table.lookup(&Method::GET, "example.com", "/status").unwrap();
        assert_eq!(found.pattern(), "GET example.com/status");
        assert!(table.lookup(&Method::GET, "", "/status").is_none());
        assert!(table.lookup(&Method::GET, "other.com", "/status").is_none());
    }

    #[test]
    fn test_duplicate_names_both_patterns() {
        let table = RouteTable::new();
        table.register(entry("GET example.com/status")).unwrap();

        let err = table.register(entry("GET EXAMPLE.com/status")).unwrap_err();
        assert_eq!(
            err,
            MuxError::DuplicateRoute {
                method: "GET".into(),
                host: "example.com".into(),
                path: "/status".into(),
                existing: "GET example.com/status".into(),
                attempted: "GET EXAMPLE.com/status".into(),
            }
        );
        assert!(err.to_string().contains("\"GET example.com/status\""));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_same_path_different_method_or_host_is_allowed() {
        let table = RouteTable::new();
        table.register(entry("GET /items")).unwrap();
        table.register(entry("POST /items")).unwrap();
        table.register(entry("GET a.example.com/items")).unwrap();
        table.register(entry("GET b.example.com/items")).unwrap();

        assert_eq!(table.len(), 4);
        assert_eq!(
            table.patterns(),
            vec![
                "GET /items",
                "GET a.example.com/items",
                "GET b.example.com/items",
                "POST /items",
            ]
        );
    }

    #[test]
    fn test_empty_table() {
        let table = RouteTable::new();
        assert!(table.is_empty());
        assert!(table.lookup(&Method::GET, "", "/").is_none());
    }
}
