//! Track metadata: the `Track` value and the resolver that builds it.
//!
//! Tagged containers report their duration in embedded metadata; plain PCM
//! containers are decoded once and their frames counted.

mod model;
mod resolve;

pub use model::Track;
pub use resolve::resolve;

#[cfg(test)]
use resolve::{Probe, probe_for};
