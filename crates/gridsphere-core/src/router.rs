//! Hash router: the single subscription point for location changes.
//!
//! Navigation only writes the location. The current [`Route`] changes when
//! the location's change notification is dispatched, so programmatic
//! navigation, manual edits and back/forward all take the same path.

use crate::route::{Route, parse_route};
use std::collections::VecDeque;
use std::fmt;
use tracing::debug;

/// A location-change notification (the browser's `hashchange`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HashChange {
    pub old_fragment: String,
    pub new_fragment: String,
}

/// The browser location seam.
pub trait Location {
    /// Current raw fragment, including any leading `#`.
    fn fragment(&self) -> String;

    /// Point the location at `fragment`. Notification is deferred.
    fn set_fragment(&mut self, fragment: &str);

    /// Drain notifications queued since the last call, oldest first.
    fn take_changes(&mut self) -> Vec<HashChange>;
}

/// In-process location with a browser-style history stack.
#[derive(Debug, Clone)]
pub struct MemoryHistory {
    entries: Vec<String>,
    cursor: usize,
    pending: VecDeque<HashChange>,
}

impl MemoryHistory {
    /// A history whose only entry is `initial`.
    #[must_use]
    pub fn new(initial: impl Into<String>) -> Self {
        Self {
            entries: vec![normalize(&initial.into())],
            cursor: 0,
            pending: VecDeque::new(),
        }
    }

    /// Step back one entry. Returns `false` at the start of history.
    pub fn back(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.move_to(self.cursor - 1);
        true
    }

    /// Step forward one entry. Returns `false` at the end of history.
    pub fn forward(&mut self) -> bool {
        if self.cursor + 1 >= self.entries.len() {
            return false;
        }
        self.move_to(self.cursor + 1);
        true
    }

    /// Overwrite the current entry, as when the user edits the address bar
    /// and the browser replaces rather than pushes.
    pub fn replace_fragment(&mut self, fragment: &str) {
        let next = normalize(fragment);
        let old = std::mem::replace(&mut self.entries[self.cursor], next.clone());
        if old != next {
            self.pending.push_back(HashChange {
                old_fragment: old,
                new_fragment: next,
            });
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub const fn position(&self) -> usize {
        self.cursor
    }

    fn move_to(&mut self, index: usize) {
        let old = self.entries[self.cursor].clone();
        self.cursor = index;
        let new = self.entries[self.cursor].clone();
        if old != new {
            self.pending.push_back(HashChange {
                old_fragment: old,
                new_fragment: new,
            });
        }
    }
}

impl Default for MemoryHistory {
    fn default() -> Self {
        Self::new("")
    }
}

impl Location for MemoryHistory {
    fn fragment(&self) -> String {
        self.entries[self.cursor].clone()
    }

    fn set_fragment(&mut self, fragment: &str) {
        let next = normalize(fragment);
        let current = &self.entries[self.cursor];
        if *current == next {
            return;
        }
        let old = current.clone();
        self.entries.truncate(self.cursor + 1);
        self.entries.push(next.clone());
        self.cursor += 1;
        self.pending.push_back(HashChange {
            old_fragment: old,
            new_fragment: next,
        });
    }

    fn take_changes(&mut self) -> Vec<HashChange> {
        self.pending.drain(..).collect()
    }
}

/// Assigning `location.hash` always yields a value starting with `#`
/// (or the empty string).
fn normalize(fragment: &str) -> String {
    if fragment.is_empty() || fragment.starts_with('#') {
        fragment.to_string()
    } else {
        format!("#{fragment}")
    }
}

/// A dispatched transition between two routes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteChange {
    pub from: Route,
    pub to: Route,
}

type Listener = Box<dyn FnMut(&Route)>;

/// Owns the location and republishes its changes as canonical [`Route`]s.
pub struct Router<L> {
    location: L,
    current: Route,
    listeners: Vec<Listener>,
}

impl<L: Location> Router<L> {
    /// Wrap `location`; the initial route is derived from its fragment.
    pub fn new(location: L) -> Self {
        let current = parse_route(&location.fragment());
        Self {
            location,
            current,
            listeners: Vec::new(),
        }
    }

    /// The route as of the last dispatched notification.
    #[must_use]
    pub const fn current(&self) -> &Route {
        &self.current
    }

    /// Register a callback invoked with every new route.
    pub fn subscribe(&mut self, listener: impl FnMut(&Route) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Set the location fragment. The route updates on the next
    /// [`dispatch_pending`](Self::dispatch_pending).
    pub fn navigate(&mut self, fragment: &str) {
        debug!(fragment, "navigate");
        self.location.set_fragment(fragment);
    }

    /// Process queued location notifications.
    ///
    /// Each notification re-derives the route from its new fragment. Listeners
    /// are called only when the route actually changes.
    pub fn dispatch_pending(&mut self) -> Vec<RouteChange> {
        let mut changes = Vec::new();
        for change in self.location.take_changes() {
            let next = parse_route(&change.new_fragment);
            if next == self.current {
                continue;
            }
            debug!(from = %self.current, to = %next, "route changed");
            let from = std::mem::replace(&mut self.current, next);
            for listener in &mut self.listeners {
                listener(&self.current);
            }
            changes.push(RouteChange {
                from,
                to: self.current.clone(),
            });
        }
        changes
    }

    #[must_use]
    pub const fn location(&self) -> &L {
        &self.location
    }

    /// Direct access for history operations (back, forward, manual edits).
    pub fn location_mut(&mut self) -> &mut L {
        &mut self.location
    }
}

impl<L: fmt::Debug> fmt::Debug for Router<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Router")
            .field("location", &self.location)
            .field("current", &self.current)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
