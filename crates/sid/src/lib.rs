//! # sid
//!
//! Compact, time-sortable identifiers that are unique across a fleet of
//! machines without any coordination between them.
//!
//! Every [`Sid`] is 24 bytes, rendered as 32 URL-safe base64 characters:
//!
//! ```text
//!   56 bits  100ns ticks since the epoch
//! + 12 bits  process tag (reduced process id)
//! + 12 bits  sequence within a tick
//! + 48 bits  node tag (hardware address)
//! + 64 bits  integrity field (rotating salt or a salted SHA-1 digest)
//! ```
//!
//! ```
//! use sid::{LockSidGenerator, Sha1Hash, SystemClock, ThreadRandom};
//!
//! let generator = LockSidGenerator::new(SystemClock::default(), ThreadRandom, Sha1Hash);
//! let a = generator.next_string();
//! let b = generator.next_string();
//!
//! assert_eq!(a.len(), 32);
//! assert_ne!(a, b);
//! ```
//!
//! For the common case a process-wide generator is available through
//! [`sid()`] and [`sid_string()`].
#![cfg_attr(docsrs, feature(doc_cfg))]

mod config;
mod error;
mod generator;
mod global;
mod hash;
mod id;
mod identity;
mod rand;
#[cfg(feature = "serde")]
mod serde;
mod time;

pub use crate::config::*;
pub use crate::error::*;
pub use crate::generator::*;
pub use crate::global::*;
pub use crate::hash::*;
pub use crate::id::*;
pub use crate::identity::*;
pub use crate::rand::*;
#[cfg_attr(docsrs, doc(cfg(feature = "serde")))]
#[cfg(feature = "serde")]
pub use crate::serde::*;
pub use crate::time::*;
