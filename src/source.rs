//! Track source: turns command-line arguments into candidate audio paths.
//!
//! Files are taken as given when their extension is accepted; directories
//! are walked. Nothing is probed here, the metadata resolver does that when
//! a candidate is actually loaded.

mod scan;

pub use scan::collect;

#[cfg(test)]
use scan::is_audio_file;
