mod interface;
mod sha1_hash;

pub use interface::*;
pub use sha1_hash::*;
