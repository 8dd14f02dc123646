//! Packet framing used over the air.
//!
//! An outbound frame is laid out as
//!
//! | offset | field |
//! |-------:|:------|
//! | 0 | length (address byte + payload) |
//! | 1 | destination address |
//! | 2.. | payload |
//!
//! An inbound frame, as drained from the RX FIFO, carries the same length and
//! address fields followed by the 2 byte [`StatusTrailer`].

use core::fmt::{Display, Formatter, Result as FmtResult};

use crate::types::StatusTrailer;

/// Offset of the length field.
pub const LENGTH_FIELD: usize = 0;
/// Offset of the address field.
pub const ADDRESS_FIELD: usize = 1;
/// Offset of the first payload byte.
pub const DATA_FIELD: usize = 2;

/// Size of each of the CC2500's FIFOs.
pub const FIFO_SIZE: usize = 64;
/// The largest value the length field may hold.
///
/// One FIFO's worth of bytes minus the length byte and the appended status.
pub const MAX_PACKET_LENGTH: u8 = (FIFO_SIZE - 1 - StatusTrailer::LENGTH) as u8;
/// Capacity of the transmit buffer (length byte plus the largest packet).
pub const FRAME_CAPACITY: usize = MAX_PACKET_LENGTH as usize + 1;
/// The largest payload that fits in a frame.
pub const MAX_PAYLOAD_LENGTH: usize = FRAME_CAPACITY - DATA_FIELD;
/// Capacity of the receive buffer (largest packet plus the appended status).
pub const RX_BUFFER_LENGTH: usize = MAX_PACKET_LENGTH as usize + StatusTrailer::LENGTH;

/// Reasons a frame could not be built or parsed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FrameError {
    /// The payload does not fit in the given buffer.
    TooLarge {
        /// The number of bytes the frame would need.
        required: usize,
        /// The number of bytes available.
        capacity: usize,
    },
    /// The length field exceeds the accepted maximum.
    Oversized(u8),
    /// Fewer bytes than the length field announces.
    Truncated,
}

#[cfg(feature = "defmt")]
impl defmt::Format for FrameError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            FrameError::TooLarge { required, capacity } => {
                defmt::write!(fmt, "frame needs {} bytes, {} available", required, capacity)
            }
            FrameError::Oversized(len) => defmt::write!(fmt, "oversized length field {}", len),
            FrameError::Truncated => defmt::write!(fmt, "truncated frame"),
        }
    }
}

impl Display for FrameError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            FrameError::TooLarge { required, capacity } => {
                write!(f, "frame needs {required} bytes, {capacity} available")
            }
            FrameError::Oversized(len) => write!(f, "oversized length field {len}"),
            FrameError::Truncated => write!(f, "truncated frame"),
        }
    }
}

/// A view of an outbound frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Frame<'a> {
    bytes: &'a [u8],
}

impl<'a> Frame<'a> {
    /// Write a frame for `payload` addressed to `destination` into `buffer`.
    ///
    /// The length field is set to `payload.len() + 1` to account for the address byte.
    /// Fails with [`FrameError::TooLarge`] if `payload.len() + 2` exceeds
    /// `buffer.len()` or the length field would not fit in a byte; `buffer`
    /// is left untouched in that case.
    pub fn build(
        buffer: &'a mut [u8],
        payload: &[u8],
        destination: u8,
    ) -> Result<Frame<'a>, FrameError> {
        let required = payload.len() + DATA_FIELD;
        if required > buffer.len() || payload.len() >= u8::MAX as usize {
            return Err(FrameError::TooLarge {
                required,
                capacity: buffer.len(),
            });
        }
        buffer[LENGTH_FIELD] = payload.len() as u8 + 1;
        buffer[ADDRESS_FIELD] = destination;
        buffer[DATA_FIELD..required].copy_from_slice(payload);
        Ok(Frame {
            bytes: &buffer[..required],
        })
    }

    /// The value of the length field.
    pub fn length(&self) -> u8 {
        self.bytes[LENGTH_FIELD]
    }

    /// The destination address.
    pub fn address(&self) -> u8 {
        self.bytes[ADDRESS_FIELD]
    }

    /// The payload (without length or address bytes).
    pub fn payload(&self) -> &'a [u8] {
        &self.bytes[DATA_FIELD..]
    }

    /// The frame's bytes in the order they are written to the TX FIFO.
    pub fn as_bytes(&self) -> &'a [u8] {
        self.bytes
    }

    /// The total number of bytes in the frame.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// A frame always holds at least its length and address bytes.
    pub fn is_empty(&self) -> bool {
        false
    }
}

/// A view of an inbound frame as it was drained from the RX FIFO.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ReceivedFrame<'a> {
    packet: &'a [u8],
    trailer: StatusTrailer,
}

impl<'a> ReceivedFrame<'a> {
    /// Parse `raw` bytes (length byte, packet, 2 status bytes).
    ///
    /// A length field greater than `max_length` is rejected with
    /// [`FrameError::Oversized`] before any packet byte is looked at.
    pub fn parse(raw: &'a [u8], max_length: u8) -> Result<ReceivedFrame<'a>, FrameError> {
        let length = *raw.get(LENGTH_FIELD).ok_or(FrameError::Truncated)?;
        if length > max_length {
            return Err(FrameError::Oversized(length));
        }
        let end = 1 + length as usize;
        if raw.len() < end + StatusTrailer::LENGTH {
            return Err(FrameError::Truncated);
        }
        Ok(Self {
            packet: &raw[1..end],
            trailer: StatusTrailer::from_bytes([raw[end], raw[end + 1]]),
        })
    }

    /// The value of the length field (address byte + payload).
    pub fn length(&self) -> u8 {
        self.packet.len() as u8
    }

    /// The address byte, if the packet is not empty.
    pub fn address(&self) -> Option<u8> {
        self.packet.first().copied()
    }

    /// The payload (without the address byte).
    pub fn payload(&self) -> &'a [u8] {
        self.packet.get(1..).unwrap_or(&[])
    }

    /// The address byte followed by the payload.
    pub fn packet(&self) -> &'a [u8] {
        self.packet
    }

    /// The status bytes appended by the chip.
    pub fn trailer(&self) -> StatusTrailer {
        self.trailer
    }

    /// Shortcut for [`StatusTrailer::crc_ok()`].
    pub fn crc_ok(&self) -> bool {
        self.trailer.crc_ok()
    }
}

#[cfg(test)]
mod test {
    extern crate std;
    use super::{
        Frame, FrameError, ReceivedFrame, FRAME_CAPACITY, MAX_PACKET_LENGTH, MAX_PAYLOAD_LENGTH,
        RX_BUFFER_LENGTH,
    };
    use std::vec::Vec;

    #[test]
    fn capacities() {
        assert_eq!(MAX_PACKET_LENGTH, 61);
        assert_eq!(FRAME_CAPACITY, 62);
        assert_eq!(MAX_PAYLOAD_LENGTH, 60);
        assert_eq!(RX_BUFFER_LENGTH, 63);
    }

    #[test]
    fn build_small_frame() {
        let mut buf = [0u8; FRAME_CAPACITY];
        let frame = Frame::build(&mut buf, &[0x01, 0x02, 0x03], 0x05).unwrap();
        assert_eq!(frame.as_bytes(), &[0x04, 0x05, 0x01, 0x02, 0x03]);
        assert_eq!(frame.len(), 5);
        assert_eq!(frame.length(), 4);
        assert_eq!(frame.address(), 5);
        assert_eq!(frame.payload(), &[1, 2, 3]);
    }

    #[test]
    fn build_empty_payload() {
        let mut buf = [0u8; 2];
        let frame = Frame::build(&mut buf, &[], 0xAA).unwrap();
        assert_eq!(frame.as_bytes(), &[0x01, 0xAA]);
        assert!(frame.payload().is_empty());
    }

    #[test]
    fn build_at_capacity() {
        let payload = [0x5Au8; MAX_PAYLOAD_LENGTH];
        let mut buf = [0u8; FRAME_CAPACITY];
        let frame = Frame::build(&mut buf, &payload, 1).unwrap();
        assert_eq!(frame.len(), FRAME_CAPACITY);
        assert_eq!(frame.length(), MAX_PACKET_LENGTH);
    }

    #[test]
    fn build_too_large() {
        let payload = [0u8; MAX_PAYLOAD_LENGTH + 1];
        let mut buf = [0xEEu8; FRAME_CAPACITY];
        assert_eq!(
            Frame::build(&mut buf, &payload, 1),
            Err(FrameError::TooLarge {
                required: FRAME_CAPACITY + 1,
                capacity: FRAME_CAPACITY
            })
        );
        // nothing was written
        assert!(buf.iter().all(|b| *b == 0xEE));
    }

    #[test]
    fn build_then_parse() {
        for len in [0usize, 1, 7, 31, MAX_PAYLOAD_LENGTH] {
            let payload: Vec<u8> = (0..len as u8).map(|b| b.wrapping_mul(3)).collect();
            let mut buf = [0u8; FRAME_CAPACITY];
            let frame = Frame::build(&mut buf, &payload, 0x42).unwrap();

            // what the RX FIFO would hold for this frame
            let mut raw = Vec::from(frame.as_bytes());
            raw.extend_from_slice(&[0x30, 0x80]);

            let received = ReceivedFrame::parse(&raw, MAX_PACKET_LENGTH).unwrap();
            assert_eq!(received.address(), Some(0x42));
            assert_eq!(received.payload(), payload.as_slice());
            assert_eq!(received.length() as usize, len + 1);
            assert!(received.crc_ok());
        }
    }

    #[test]
    fn parse_rejects_oversized_length() {
        let mut raw = [0u8; 24];
        raw[0] = 20;
        assert_eq!(
            ReceivedFrame::parse(&raw, 16),
            Err(FrameError::Oversized(20))
        );
    }

    #[test]
    fn parse_bad_crc() {
        let raw = [0x02, 0x07, 0x99, 0x10, 0x2F];
        let received = ReceivedFrame::parse(&raw, MAX_PACKET_LENGTH).unwrap();
        assert!(!received.crc_ok());
        assert_eq!(received.trailer().lqi(), 0x2F);
        assert_eq!(received.payload(), &[0x99]);
    }

    #[test]
    fn parse_truncated() {
        assert_eq!(
            ReceivedFrame::parse(&[], MAX_PACKET_LENGTH),
            Err(FrameError::Truncated)
        );
        // missing the second status byte
        assert_eq!(
            ReceivedFrame::parse(&[0x02, 0x07, 0x99, 0x10], MAX_PACKET_LENGTH),
            Err(FrameError::Truncated)
        );
    }

    #[test]
    fn parse_empty_packet() {
        let received = ReceivedFrame::parse(&[0x00, 0x10, 0x80], MAX_PACKET_LENGTH).unwrap();
        assert_eq!(received.address(), None);
        assert!(received.payload().is_empty());
    }
}
