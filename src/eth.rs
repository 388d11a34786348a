use core::{fmt, mem, str::FromStr};

use alloc::string::ToString;

use crate::{
    error::{check_bounds, FrameError},
    HEADER_LEN,
};

/// Raw Ethernet II header, laid out exactly as it appears on the wire.
///
/// Unlike [`EtherFrame`](crate::EtherFrame), it can carry any protocol code;
/// converting it into a frame validates the code.
#[repr(C, packed)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(::serde::Serialize, ::serde::Deserialize))]
pub struct EthHdr {
    /// Destination MAC address.
    pub dst_addr: [u8; 6],
    /// Source MAC address.
    pub src_addr: [u8; 6],
    /// Protocol which is encapsulated in the payload of the frame, in network
    /// byte order.
    pub ether_type: [u8; 2],
}

impl EthHdr {
    pub const LEN: usize = mem::size_of::<EthHdr>();

    /// Copies the header out of the first [`EthHdr::LEN`] bytes of `buf`.
    pub fn from_bytes(buf: &[u8]) -> Result<Self, FrameError> {
        check_bounds(buf.len(), 0, Self::LEN)?;
        let mut hdr = EthHdr::default();
        hdr.dst_addr.copy_from_slice(&buf[..6]);
        hdr.src_addr.copy_from_slice(&buf[6..12]);
        hdr.ether_type.copy_from_slice(&buf[12..Self::LEN]);
        Ok(hdr)
    }

    /// Returns the header in wire format.
    pub fn to_bytes(&self) -> [u8; EthHdr::LEN] {
        let mut bytes = [0u8; EthHdr::LEN];
        bytes[..6].copy_from_slice(&self.dst_addr);
        bytes[6..12].copy_from_slice(&self.src_addr);
        bytes[12..].copy_from_slice(&self.ether_type);
        bytes
    }

    /// Returns the protocol code in host byte order.
    #[inline]
    pub fn ether_type(&self) -> u16 {
        u16::from_be_bytes(self.ether_type)
    }

    /// Sets the protocol code, given in host byte order.
    #[inline]
    pub fn set_ether_type(&mut self, code: u16) {
        self.ether_type = code.to_be_bytes();
    }

    /// Returns the protocol encapsulated in the payload.
    ///
    /// # Errors
    /// [`FrameError::UnknownTypeCode`] if the code is not supported.
    #[inline]
    pub fn protocol(&self) -> Result<EtherType, FrameError> {
        let code = self.ether_type();
        EtherType::from_code(code).ok_or(FrameError::UnknownTypeCode(code))
    }
}

const _: () = assert!(EthHdr::LEN == HEADER_LEN);

/// Protocol which is encapsulated in the payload of the Ethernet frame.
///
/// Each variant maps to exactly one code and one symbolic tag, and back.
#[repr(u16)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(::serde::Serialize, ::serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum EtherType {
    /// IPv4, tag `ip`.
    #[default]
    Ip = 0x0800,
    /// Address Resolution Protocol, tag `arp`.
    Arp = 0x0806,
}

impl EtherType {
    /// Every supported protocol type.
    pub const ALL: [EtherType; 2] = [EtherType::Ip, EtherType::Arp];

    /// Looks up the type for a protocol code.
    pub const fn from_code(code: u16) -> Option<Self> {
        match code {
            0x0800 => Some(EtherType::Ip),
            0x0806 => Some(EtherType::Arp),
            _ => None,
        }
    }

    /// Looks up the type for a symbolic tag.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "ip" => Some(EtherType::Ip),
            "arp" => Some(EtherType::Arp),
            _ => None,
        }
    }

    /// Returns the 16-bit code carried on the wire.
    #[inline]
    pub const fn code(self) -> u16 {
        self as u16
    }

    /// Returns the symbolic tag.
    pub const fn as_str(self) -> &'static str {
        match self {
            EtherType::Ip => "ip",
            EtherType::Arp => "arp",
        }
    }
}

impl fmt::Display for EtherType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EtherType {
    type Err = FrameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EtherType::from_tag(s).ok_or_else(|| FrameError::UnsupportedType(s.to_string()))
    }
}

impl TryFrom<u16> for EtherType {
    type Error = FrameError;

    fn try_from(code: u16) -> Result<Self, Self::Error> {
        EtherType::from_code(code).ok_or(FrameError::UnsupportedTypeCode(code))
    }
}

impl From<EtherType> for u16 {
    fn from(ty: EtherType) -> Self {
        ty.code()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use memoffset::offset_of;

    #[test]
    fn test_ethhdr_layout() {
        assert_eq!(EthHdr::LEN, 14);
        assert_eq!(offset_of!(EthHdr, dst_addr), 0);
        assert_eq!(offset_of!(EthHdr, src_addr), 6);
        assert_eq!(offset_of!(EthHdr, ether_type), 12);
    }

    #[test]
    fn test_ether_type_byte_order() {
        let mut hdr = EthHdr::default();
        hdr.set_ether_type(0x0806);
        assert_eq!(hdr.ether_type, [0x08, 0x06]);
        assert_eq!(hdr.ether_type(), 0x0806);
        assert_eq!(hdr.protocol(), Ok(EtherType::Arp));

        hdr.set_ether_type(0x86DD);
        assert_eq!(hdr.protocol(), Err(FrameError::UnknownTypeCode(0x86DD)));
    }

    #[test]
    fn test_bytes() {
        let bytes = [1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 0x08, 0x06, 0xff];
        let hdr = EthHdr::from_bytes(&bytes).unwrap();
        assert_eq!(hdr.dst_addr, [1, 2, 3, 4, 5, 6]);
        assert_eq!(hdr.src_addr, [7, 8, 9, 10, 11, 12]);
        assert_eq!(hdr.ether_type(), 0x0806);
        assert_eq!(hdr.to_bytes(), bytes[..14]);
        assert!(EthHdr::from_bytes(&bytes[..13]).is_err());
    }

    #[test]
    fn test_lookup_tables_agree() {
        for ty in EtherType::ALL {
            assert_eq!(EtherType::from_code(ty.code()), Some(ty));
            assert_eq!(EtherType::from_tag(ty.as_str()), Some(ty));
        }
        assert_eq!(EtherType::Ip.code(), 0x0800);
        assert_eq!(EtherType::Arp.code(), 0x0806);
        assert_eq!(u16::from(EtherType::Arp), 0x0806);
    }

    #[test]
    fn test_unknown_type() {
        assert_eq!(
            "foo".parse::<EtherType>(),
            Err(FrameError::UnsupportedType("foo".to_string()))
        );
        // Tags are case-sensitive.
        assert!("IP".parse::<EtherType>().is_err());
        assert_eq!(
            EtherType::try_from(0x9999),
            Err(FrameError::UnsupportedTypeCode(0x9999))
        );
    }

    #[test]
    #[cfg(feature = "serde")]
    fn test_serialize() {
        use bincode::{
            config::standard,
            serde::{decode_from_slice, encode_to_vec},
        };

        let options = standard().with_fixed_int_encoding().with_big_endian();

        let bytes = encode_to_vec(EtherType::Arp, options).unwrap();
        let (ty, _): (EtherType, usize) = decode_from_slice(&bytes, options).unwrap();
        assert_eq!(ty, EtherType::Arp);

        let mut hdr = EthHdr::default();
        hdr.set_ether_type(0x0800);
        encode_to_vec(hdr, options).unwrap();
    }
}
