#![doc = include_str!("../README.md")]
#![no_std]

extern crate alloc;

pub mod error;
pub mod eth;
pub mod frame;
pub mod mac;

pub use error::{ErrorKind, FrameError};
pub use eth::{EthHdr, EtherType};
pub use frame::{EtherFrame, FrameOptions};
pub use mac::MacAddr;

/// Length of an untagged Ethernet II header: two hardware addresses and the
/// protocol code.
pub const HEADER_LEN: usize = 2 * MacAddr::LEN + 2;
