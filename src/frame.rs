use core::fmt;

use alloc::{string::String, vec, vec::Vec};
use memoffset::offset_of;
use tracing::trace;

use crate::{
    error::{check_bounds, FrameError},
    eth::{EthHdr, EtherType},
    mac::MacAddr,
    HEADER_LEN,
};

/// Options for building an [`EtherFrame`] with [`EtherFrame::from_options`].
///
/// Every field is optional. Missing addresses default to
/// [`MacAddr::ZERO`], a missing type to [`EtherType::Ip`] and a missing
/// length to [`HEADER_LEN`].
///
/// When both `ty` and `type_code` are set, `ty` wins and `type_code` is
/// ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(::serde::Serialize, ::serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct FrameOptions {
    /// Source address in text form.
    pub src: Option<String>,
    /// Destination address in text form.
    pub dst: Option<String>,
    /// Symbolic protocol tag, such as `ip` or `arp`.
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub ty: Option<String>,
    /// Numeric protocol code, such as `0x0806`.
    pub type_code: Option<u16>,
    /// Expected header length.
    pub length: Option<usize>,
}

impl FrameOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn src(mut self, src: impl Into<String>) -> Self {
        self.src = Some(src.into());
        self
    }

    pub fn dst(mut self, dst: impl Into<String>) -> Self {
        self.dst = Some(dst.into());
        self
    }

    pub fn ty(mut self, ty: impl Into<String>) -> Self {
        self.ty = Some(ty.into());
        self
    }

    pub fn type_code(mut self, code: u16) -> Self {
        self.type_code = Some(code);
        self
    }

    pub fn length(mut self, length: usize) -> Self {
        self.length = Some(length);
        self
    }
}

/// Decoded Ethernet II header.
///
/// A value of this type always carries a supported protocol type, and its
/// header is always [`HEADER_LEN`] bytes long. It is built either from
/// [`FrameOptions`] or by decoding bytes, and is not modified afterwards.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(::serde::Serialize, ::serde::Deserialize))]
pub struct EtherFrame {
    dst: MacAddr,
    src: MacAddr,
    ether_type: EtherType,
}

impl EtherFrame {
    /// Length of the encoded header in bytes.
    pub const LEN: usize = HEADER_LEN;

    pub const fn new(dst: MacAddr, src: MacAddr, ether_type: EtherType) -> Self {
        EtherFrame {
            dst,
            src,
            ether_type,
        }
    }

    /// Builds a frame from caller-supplied options, filling in defaults.
    ///
    /// # Errors
    /// - [`FrameError::InvalidAddress`] if `src` or `dst` is not a valid
    ///   hardware address.
    /// - [`FrameError::UnsupportedType`] or
    ///   [`FrameError::UnsupportedTypeCode`] if the protocol is unknown.
    /// - [`FrameError::UnsupportedLength`] if `length` is anything but 14.
    pub fn from_options(opts: &FrameOptions) -> Result<Self, FrameError> {
        let src = opts.src.as_deref().map(str::parse::<MacAddr>).transpose()?;
        let dst = opts.dst.as_deref().map(str::parse::<MacAddr>).transpose()?;

        let ether_type = match (&opts.ty, opts.type_code) {
            (Some(ty), _) => ty.parse::<EtherType>()?,
            (None, Some(code)) => EtherType::try_from(code)?,
            (None, None) => EtherType::Ip,
        };

        Self::validated(
            dst.unwrap_or(MacAddr::ZERO),
            src.unwrap_or(MacAddr::ZERO),
            ether_type,
            opts.length.unwrap_or(HEADER_LEN),
        )
    }

    fn validated(
        dst: MacAddr,
        src: MacAddr,
        ether_type: EtherType,
        length: usize,
    ) -> Result<Self, FrameError> {
        if length != HEADER_LEN {
            return Err(FrameError::UnsupportedLength(length));
        }
        Ok(EtherFrame::new(dst, src, ether_type))
    }

    /// Decodes a header from the start of `buf`.
    ///
    /// See [`EtherFrame::from_buffer_at`].
    pub fn from_buffer(buf: &[u8]) -> Result<Self, FrameError> {
        Self::from_buffer_at(buf, 0)
    }

    /// Decodes the header stored in `buf[offset..offset + 14]`.
    ///
    /// Bytes outside of that range are neither read nor validated.
    ///
    /// # Errors
    /// - [`FrameError::BufferTooShort`] if `buf` ends before the header does.
    /// - [`FrameError::UnknownTypeCode`] if the protocol code is unsupported.
    pub fn from_buffer_at(buf: &[u8], offset: usize) -> Result<Self, FrameError> {
        check_bounds(buf.len(), offset, EthHdr::LEN)?;

        let dst = MacAddr::from_buffer(buf, offset + offset_of!(EthHdr, dst_addr))?;
        let src = MacAddr::from_buffer(buf, offset + offset_of!(EthHdr, src_addr))?;

        let code_off = offset + offset_of!(EthHdr, ether_type);
        let code = u16::from_be_bytes([buf[code_off], buf[code_off + 1]]);
        let ether_type = EtherType::from_code(code).ok_or(FrameError::UnknownTypeCode(code))?;

        let consumed = code_off + 2 - offset;
        let frame = Self::validated(dst, src, ether_type, consumed)?;
        trace!(offset, ether_type = %ether_type, "decoded ethernet header");
        Ok(frame)
    }

    /// Encodes the header into `buf` starting at `offset`.
    ///
    /// Returns the offset of the first byte after the header, where the
    /// payload starts.
    ///
    /// # Errors
    /// [`FrameError::BufferTooShort`] if the header does not fit. The buffer
    /// is left untouched in that case.
    pub fn to_buffer(&self, buf: &mut [u8], offset: usize) -> Result<usize, FrameError> {
        check_bounds(buf.len(), offset, EthHdr::LEN)?;

        self.dst
            .to_buffer(buf, offset + offset_of!(EthHdr, dst_addr))?;
        self.src
            .to_buffer(buf, offset + offset_of!(EthHdr, src_addr))?;
        let code_off = offset + offset_of!(EthHdr, ether_type);
        buf[code_off..code_off + 2].copy_from_slice(&self.protocol_code().to_be_bytes());

        trace!(offset, ether_type = %self.ether_type, "encoded ethernet header");
        Ok(offset + EthHdr::LEN)
    }

    /// Encodes the header into a newly allocated buffer of exactly 14 bytes.
    pub fn to_vec(&self) -> Vec<u8> {
        self.to_vec_at(0)
    }

    /// Encodes the header into a newly allocated, zero-filled buffer of
    /// `offset + 14` bytes, with the header at the end.
    pub fn to_vec_at(&self, offset: usize) -> Vec<u8> {
        let mut buf = vec![0u8; offset + EthHdr::LEN];
        buf[offset..].copy_from_slice(&EthHdr::from(self).to_bytes());
        buf
    }

    #[inline]
    pub fn destination(&self) -> MacAddr {
        self.dst
    }

    #[inline]
    pub fn source(&self) -> MacAddr {
        self.src
    }

    #[inline]
    pub fn protocol_type(&self) -> EtherType {
        self.ether_type
    }

    /// Returns the protocol code as written on the wire.
    #[inline]
    pub fn protocol_code(&self) -> u16 {
        self.ether_type.code()
    }

    /// Always [`HEADER_LEN`].
    #[inline]
    pub fn header_len(&self) -> usize {
        Self::LEN
    }
}

impl fmt::Display for EtherFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} > {}, {} ({:#06x})",
            self.src,
            self.dst,
            self.ether_type,
            self.protocol_code()
        )
    }
}

impl TryFrom<&[u8]> for EtherFrame {
    type Error = FrameError;

    fn try_from(buf: &[u8]) -> Result<Self, Self::Error> {
        EtherFrame::from_buffer(buf)
    }
}

impl TryFrom<EthHdr> for EtherFrame {
    type Error = FrameError;

    fn try_from(hdr: EthHdr) -> Result<Self, Self::Error> {
        Ok(EtherFrame::new(
            hdr.dst_addr.into(),
            hdr.src_addr.into(),
            hdr.protocol()?,
        ))
    }
}

impl From<&EtherFrame> for EthHdr {
    fn from(frame: &EtherFrame) -> Self {
        EthHdr {
            dst_addr: frame.dst.octets(),
            src_addr: frame.src.octets(),
            ether_type: frame.protocol_code().to_be_bytes(),
        }
    }
}
