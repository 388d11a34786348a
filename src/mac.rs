use core::{fmt, str::FromStr};

use alloc::string::ToString;

use crate::error::{check_bounds, FrameError};

/// 48-bit hardware (MAC) address.
///
/// The text form is six hex octets separated by colons, printed upper-case
/// (`AA:BB:CC:DD:EE:FF`). Parsing also accepts lower-case digits and `-`
/// separators.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct MacAddr([u8; 6]);

impl MacAddr {
    /// Length of a hardware address in bytes.
    pub const LEN: usize = 6;

    /// The all-zero address, used when no address is given.
    pub const ZERO: MacAddr = MacAddr([0; 6]);

    pub const BROADCAST: MacAddr = MacAddr([0xff; 6]);

    #[inline]
    pub const fn new(octets: [u8; 6]) -> Self {
        MacAddr(octets)
    }

    #[inline]
    pub const fn octets(&self) -> [u8; 6] {
        self.0
    }

    /// Reads an address from `buf` starting at `offset`.
    pub fn from_buffer(buf: &[u8], offset: usize) -> Result<Self, FrameError> {
        check_bounds(buf.len(), offset, Self::LEN)?;
        let mut octets = [0u8; 6];
        octets.copy_from_slice(&buf[offset..offset + Self::LEN]);
        Ok(MacAddr(octets))
    }

    /// Writes the address into `buf` starting at `offset`.
    pub fn to_buffer(&self, buf: &mut [u8], offset: usize) -> Result<(), FrameError> {
        check_bounds(buf.len(), offset, Self::LEN)?;
        buf[offset..offset + Self::LEN].copy_from_slice(&self.0);
        Ok(())
    }
}

impl From<[u8; 6]> for MacAddr {
    fn from(octets: [u8; 6]) -> Self {
        MacAddr(octets)
    }
}

impl From<MacAddr> for [u8; 6] {
    fn from(addr: MacAddr) -> Self {
        addr.0
    }
}

impl fmt::Display for MacAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d, e, g] = self.0;
        write!(f, "{a:02X}:{b:02X}:{c:02X}:{d:02X}:{e:02X}:{g:02X}")
    }
}

impl FromStr for MacAddr {
    type Err = FrameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || FrameError::InvalidAddress(s.to_string());

        let sep = if s.contains('-') { '-' } else { ':' };
        let mut octets = [0u8; 6];
        let mut parts = s.split(sep);
        for octet in octets.iter_mut() {
            let part = parts.next().ok_or_else(invalid)?;
            if part.is_empty() || part.len() > 2 || !part.bytes().all(|b| b.is_ascii_hexdigit()) {
                return Err(invalid());
            }
            *octet = u8::from_str_radix(part, 16).map_err(|_| invalid())?;
        }
        if parts.next().is_some() {
            return Err(invalid());
        }
        Ok(MacAddr(octets))
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for MacAddr {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for MacAddr {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = <alloc::string::String as serde::Deserialize>::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
