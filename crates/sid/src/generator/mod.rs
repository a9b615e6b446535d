mod basic;
mod interface;
mod lock;
mod mutex;
mod state;

pub use basic::*;
pub use interface::*;
pub use lock::*;
pub use state::{DIGEST_INPUT_LEN, SALT_LEN};
