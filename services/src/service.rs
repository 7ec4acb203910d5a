mod billboard;
mod spotify;

pub use billboard::*;
pub use spotify::*;
