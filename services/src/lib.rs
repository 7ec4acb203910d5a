pub use hot100_core::*;

pub mod matcher;
pub mod playlist;
pub mod service;

pub use matcher::find_tracks;
pub use playlist::create_playlist;

#[cfg(test)]
mod testing;
