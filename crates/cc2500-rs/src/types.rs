//! This module defines types used by various traits.
//! These types describe the bytes clocked out of the CC2500.

use core::{
    fmt::{Display, Formatter, Result},
    write,
};

use bitfield_struct::bitfield;

/// The RSSI offset (in dB) of the CC2500 as specified by the datasheet.
pub(crate) const RSSI_OFFSET: i16 = 72;

/// Convert a raw RSSI reading (2's complement, 0.5 dB steps) into dBm.
pub const fn rssi_to_dbm(raw: u8) -> i16 {
    (raw as i8 as i16) / 2 - RSSI_OFFSET
}

/// The main radio control state machine's state, as reported
/// by the chip status byte.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RadioState {
    /// Idle state (also reported for some transitional states).
    Idle,
    /// Receive mode.
    Rx,
    /// Transmit mode.
    Tx,
    /// Fast TX ready.
    FastTxReady,
    /// Frequency synthesizer calibration is running.
    Calibrate,
    /// PLL is settling.
    Settling,
    /// RX FIFO has overflowed. Read out any useful data, then flush the FIFO.
    RxFifoOverflow,
    /// TX FIFO has underflowed. Acknowledge with a TX FIFO flush.
    TxFifoUnderflow,
}

impl RadioState {
    pub(crate) const fn into_bits(self) -> u8 {
        match self {
            RadioState::Idle => 0,
            RadioState::Rx => 1,
            RadioState::Tx => 2,
            RadioState::FastTxReady => 3,
            RadioState::Calibrate => 4,
            RadioState::Settling => 5,
            RadioState::RxFifoOverflow => 6,
            RadioState::TxFifoUnderflow => 7,
        }
    }

    pub(crate) const fn from_bits(value: u8) -> Self {
        match value & 7 {
            1 => RadioState::Rx,
            2 => RadioState::Tx,
            3 => RadioState::FastTxReady,
            4 => RadioState::Calibrate,
            5 => RadioState::Settling,
            6 => RadioState::RxFifoOverflow,
            7 => RadioState::TxFifoUnderflow,
            _ => RadioState::Idle,
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for RadioState {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            RadioState::Idle => defmt::write!(fmt, "IDLE"),
            RadioState::Rx => defmt::write!(fmt, "RX"),
            RadioState::Tx => defmt::write!(fmt, "TX"),
            RadioState::FastTxReady => defmt::write!(fmt, "FSTXON"),
            RadioState::Calibrate => defmt::write!(fmt, "CALIBRATE"),
            RadioState::Settling => defmt::write!(fmt, "SETTLING"),
            RadioState::RxFifoOverflow => defmt::write!(fmt, "RXFIFO_OVERFLOW"),
            RadioState::TxFifoUnderflow => defmt::write!(fmt, "TXFIFO_UNDERFLOW"),
        }
    }
}

impl Display for RadioState {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            RadioState::Idle => write!(f, "IDLE"),
            RadioState::Rx => write!(f, "RX"),
            RadioState::Tx => write!(f, "TX"),
            RadioState::FastTxReady => write!(f, "FSTXON"),
            RadioState::Calibrate => write!(f, "CALIBRATE"),
            RadioState::Settling => write!(f, "SETTLING"),
            RadioState::RxFifoOverflow => write!(f, "RXFIFO_OVERFLOW"),
            RadioState::TxFifoUnderflow => write!(f, "TXFIFO_UNDERFLOW"),
        }
    }
}

/// The chip status byte that the CC2500 clocks out with every header byte.
///
/// The driver caches this from every SPI transaction.
#[bitfield(u8, order = Msb)]
#[derive(PartialEq, Eq)]
pub struct ChipStatus {
    /// Stays high until the crystal oscillator is stable.
    #[bits(1, access = RO)]
    pub chip_not_ready: bool,

    /// The current state of the main radio control state machine.
    #[bits(3, access = RO)]
    pub state: RadioState,

    /// Free bytes in the TX FIFO (for write access) or
    /// available bytes in the RX FIFO (for read access), saturated at 15.
    #[bits(4, access = RO)]
    pub fifo_bytes_available: u8,
}

#[cfg(feature = "defmt")]
impl defmt::Format for ChipStatus {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(
            fmt,
            "ChipStatus ready: {}, state: {}, fifo: {}",
            !self.chip_not_ready(),
            self.state(),
            self.fifo_bytes_available()
        )
    }
}

impl Display for ChipStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(
            f,
            "ChipStatus ready: {}, state: {}, fifo: {}",
            !self.chip_not_ready(),
            self.state(),
            self.fifo_bytes_available()
        )
    }
}

/// The RXBYTES status register.
#[bitfield(u8, order = Msb)]
pub(crate) struct RxBytes {
    #[bits(1, access = RO)]
    pub overflow: bool,

    #[bits(7, access = RO)]
    pub num_bytes: u8,
}

/// The second byte of the status appended to every received packet.
#[bitfield(u8, order = Msb)]
#[derive(PartialEq, Eq)]
pub(crate) struct LinkQuality {
    #[bits(1, access = RO)]
    pub crc_ok: bool,

    #[bits(7, access = RO)]
    pub lqi: u8,
}

/// The 2 status bytes the CC2500 appends after a received payload
/// (when `PKTCTRL1.APPEND_STATUS` is enabled).
///
/// Payload bytes are only trustworthy if [`StatusTrailer::crc_ok()`] is `true`.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct StatusTrailer {
    rssi: u8,
    link: LinkQuality,
}

impl StatusTrailer {
    /// The number of bytes appended to a received payload.
    pub const LENGTH: usize = 2;

    /// Interpret the 2 bytes (RSSI first) read after a payload.
    pub const fn from_bytes(bytes: [u8; 2]) -> Self {
        Self {
            rssi: bytes[0],
            link: LinkQuality::from_bits(bytes[1]),
        }
    }

    /// The trailer as it appears in the RX FIFO.
    pub const fn into_bytes(self) -> [u8; 2] {
        [self.rssi, self.link.into_bits()]
    }

    /// Did the chip's CRC check pass for this packet?
    pub const fn crc_ok(&self) -> bool {
        self.link.crc_ok()
    }

    /// The Link Quality Indicator (lower means better).
    pub const fn lqi(&self) -> u8 {
        self.link.lqi()
    }

    /// The raw RSSI byte.
    pub const fn rssi_raw(&self) -> u8 {
        self.rssi
    }

    /// The RSSI converted to dBm.
    pub const fn rssi_dbm(&self) -> i16 {
        rssi_to_dbm(self.rssi)
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for StatusTrailer {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(
            fmt,
            "StatusTrailer rssi: {} dBm, lqi: {}, crc_ok: {}",
            self.rssi_dbm(),
            self.lqi(),
            self.crc_ok()
        )
    }
}

impl Display for StatusTrailer {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(
            f,
            "StatusTrailer rssi: {} dBm, lqi: {}, crc_ok: {}",
            self.rssi_dbm(),
            self.lqi(),
            self.crc_ok()
        )
    }
}
