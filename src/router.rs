//! Location routing between the list and detail views.
//!
//! Locations use the same path form as the web app they mirror: `/` for the
//! list and `/task/{id}` for a task's detail page.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::storage::KeyValueStore;
use crate::store::TaskStore;
use crate::task::Task;

/// Maximum number of previous locations remembered for `back`.
const MAX_HISTORY: usize = 10;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RouteError {
    #[error("unknown location '{0}', expected '/' or '/task/<id>'")]
    Unknown(String),
}

/// A logical view identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Location {
    List,
    Detail(u64),
}

impl Location {
    /// Parse `/` or `/task/{id}`. A single trailing slash is accepted.
    pub fn parse(path: &str) -> Result<Self, RouteError> {
        let trimmed = path.trim();
        let normalized = trimmed.strip_suffix('/').unwrap_or(trimmed);
        if normalized.is_empty() {
            return Ok(Location::List);
        }
        normalized
            .strip_prefix("/task/")
            .filter(|id| !id.is_empty() && id.chars().all(|c| c.is_ascii_digit()))
            .and_then(|id| id.parse::<u64>().ok())
            .map(Location::Detail)
            .ok_or_else(|| RouteError::Unknown(path.to_string()))
    }
}

impl FromStr for Location {
    type Err = RouteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Location::parse(s)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::List => write!(f, "/"),
            Location::Detail(id) => write!(f, "/task/{id}"),
        }
    }
}

/// What the current location resolves to against the task collection.
#[derive(Debug, PartialEq, Eq)]
pub enum View<'a> {
    List,
    Detail(&'a Task),
    NotFound(u64),
}

/// Tracks the current location plus a short back-history.
#[derive(Debug, Clone)]
pub struct Router {
    current: Location,
    history: Vec<Location>,
}

impl Default for Router {
    fn default() -> Self {
        Router::new(Location::List)
    }
}

impl Router {
    pub fn new(start: Location) -> Self {
        Router {
            current: start,
            history: Vec::new(),
        }
    }

    pub fn current(&self) -> Location {
        self.current
    }

    /// Move to `location`, remembering where we came from.
    pub fn navigate(&mut self, location: Location) {
        if location == self.current {
            return;
        }
        self.history.push(self.current);
        if self.history.len() > MAX_HISTORY {
            self.history.remove(0);
        }
        self.current = location;
    }

    /// Return to the previous location, or to the list when there is none.
    pub fn back(&mut self) -> Location {
        self.current = self.history.pop().unwrap_or(Location::List);
        self.current
    }

    /// Resolve the current location. A detail id without a task is `NotFound`.
    pub fn resolve<'a, S: KeyValueStore>(&self, store: &'a TaskStore<S>) -> View<'a> {
        match self.current {
            Location::List => View::List,
            Location::Detail(id) => match store.get(id) {
                Some(task) => View::Detail(task),
                None => View::NotFound(id),
            },
        }
    }
}
