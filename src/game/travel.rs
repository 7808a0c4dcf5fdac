//! Travel times between alibi locations
//!
//! Minimum hours needed to get from one location to another. Routes are
//! stored as directed pairs; a lookup tries the requested direction first
//! and falls back to the reverse one.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A known route and its minimum travel time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    pub from: String,
    pub to: String,
    pub hours: u8,
}

impl Route {
    pub fn new(from: &str, to: &str, hours: u8) -> Self {
        Self {
            from: from.to_string(),
            to: to.to_string(),
            hours,
        }
    }
}

/// What the table knows about a pair of locations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Adjacency {
    /// No route on record; any travel time is assumed possible
    Unconstrained,
    /// At least this many hours are needed
    Requires(u8),
}

impl Adjacency {
    /// Whether the trip fits in the given number of hours
    pub fn fits_in(&self, hours: u8) -> bool {
        match self {
            Adjacency::Unconstrained => true,
            Adjacency::Requires(required) => *required <= hours,
        }
    }
}

/// Location adjacency: from -> to -> minimum hours
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TravelTable {
    routes: HashMap<String, HashMap<String, u8>>,
}

impl TravelTable {
    /// A table with no routes (everything reachable)
    pub fn empty() -> Self {
        Self {
            routes: HashMap::new(),
        }
    }

    /// The built-in city map
    pub fn builtin() -> Self {
        Self::empty()
            .with_route("downtown", "suburbs", 2)
            .with_route("office", "home", 1)
            .with_route("apartment", "bridge", 1)
    }

    pub fn with_route(mut self, from: &str, to: &str, hours: u8) -> Self {
        self.insert(Route::new(from, to, hours));
        self
    }

    /// Add or replace a route
    pub fn insert(&mut self, route: Route) {
        self.routes
            .entry(route.from)
            .or_default()
            .insert(route.to, route.hours);
    }

    /// Minimum travel time between two locations, either direction
    pub fn adjacency(&self, from: &str, to: &str) -> Adjacency {
        self.lookup(from, to)
            .or_else(|| self.lookup(to, from))
            .map_or(Adjacency::Unconstrained, Adjacency::Requires)
    }

    fn lookup(&self, from: &str, to: &str) -> Option<u8> {
        self.routes.get(from)?.get(to).copied()
    }

    pub fn len(&self) -> usize {
        self.routes.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for TravelTable {
    fn default() -> Self {
        Self::builtin()
    }
}

impl Extend<Route> for TravelTable {
    fn extend<I: IntoIterator<Item = Route>>(&mut self, routes: I) {
        for route in routes {
            self.insert(route);
        }
    }
}
