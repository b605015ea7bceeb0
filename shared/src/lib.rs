//! Types shared between the match engine and anything that consumes its frame feed
//! (renderers, recorders, analysis tools).

pub mod config;
pub mod protocol;
pub mod vec2;
