//! Read-side contracts for content sources and tracking services.
//!
//! The backup engine never talks to the network directly. It asks a
//! [`SourceResolver`] for the installed [`Source`] behind a numeric id and
//! a [`TrackerSessions`] implementation whether a tracking service is
//! usable, so the embedding application decides what is installed and
//! logged in.

pub mod error;
#[cfg(any(test, feature = "mock"))]
mod mock;
mod registry;
mod source;
mod throttle;
mod tracker;

#[cfg(any(test, feature = "mock"))]
pub use crate::mock::MockSource;
pub use crate::registry::{SourceRegistry, SourceResolver};
pub use crate::source::{Source, SourceHandle};
pub use crate::throttle::Throttle;
pub use crate::tracker::{ActiveSessions, TrackerSessions};
