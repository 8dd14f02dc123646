use core::fmt::{Display, Formatter, Result as FmtResult};

use embedded_hal::{delay::DelayNs, spi::SpiDevice};
mod constants;
mod fifo;
mod init;
pub(crate) mod power;
mod radio;
mod settings;
mod status;
pub use constants::{commands, mnemonics, registers, status_registers};

use super::prelude::{NoopHandler, PacketHandler, SignalLine};
use crate::{
    frame::{FrameError, FIFO_SIZE},
    types::ChipStatus,
};

/// The time (in microseconds) to wait after a reset strobe before talking to the chip.
pub const RESET_SETTLE_US: u32 = 1000;

/// The interval (in microseconds) at which GDO0 is polled while transmitting.
pub const TX_POLL_INTERVAL_US: u32 = 10;

/// A collection of error types to describe hardware malfunctions and dropped packets.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Cc2500Error<SPI, GPI> {
    /// Represents a SPI transaction error.
    Spi(SPI),
    /// Represents a DigitalInput error (reading the GDO0 level).
    Gpi(GPI),
    /// Represents a corruption of binary data (as it was transferred over the SPI bus' MISO).
    ///
    /// [`RadioInit::init()`](fn@crate::radio::prelude::RadioInit::init) returns this
    /// if the chip does not identify itself as a CC2500.
    BinaryCorruption,
    /// The received packet failed the chip's CRC check. Its payload was discarded.
    CrcMismatch,
    /// The length byte of the received packet exceeds the available buffer.
    /// The RX FIFO was flushed.
    OversizedPacket(u8),
    /// The RX FIFO holds no packet.
    NoPacketPending,
    /// The chip reported an RX FIFO overflow. The RX FIFO was flushed and RX mode resumed.
    RxFifoOverflow,
    /// GDO0 did not toggle within [`Cc2500::tx_timeout_us`].
    /// The TX FIFO was flushed and RX mode resumed.
    TransmitTimeout,
    /// The outbound frame does not fit in the TX FIFO.
    /// Nothing was sent to the chip.
    FrameTooLarge,
    /// The outbound frame holds no bytes, so the chip would never finish sending it.
    /// Nothing was sent to the chip.
    EmptyFrame,
}

impl<SPI, GPI> Cc2500Error<SPI, GPI> {
    /// Is this a receive-side failure that only means a packet was dropped?
    ///
    /// These are absorbed by
    /// [`PacketRadio::service_interrupt()`](fn@crate::radio::prelude::PacketRadio::service_interrupt).
    pub fn is_dropped_packet(&self) -> bool {
        matches!(
            self,
            Cc2500Error::CrcMismatch
                | Cc2500Error::OversizedPacket(_)
                | Cc2500Error::NoPacketPending
                | Cc2500Error::RxFifoOverflow
        )
    }
}

impl<SPI, GPI> From<FrameError> for Cc2500Error<SPI, GPI> {
    fn from(value: FrameError) -> Self {
        match value {
            FrameError::TooLarge { .. } => Cc2500Error::FrameTooLarge,
            FrameError::Oversized(len) => Cc2500Error::OversizedPacket(len),
            FrameError::Truncated => Cc2500Error::BinaryCorruption,
        }
    }
}

#[cfg(feature = "defmt")]
impl<SPI, GPI> defmt::Format for Cc2500Error<SPI, GPI> {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Cc2500Error::Spi(_) => defmt::write!(fmt, "SPI transaction error"),
            Cc2500Error::Gpi(_) => defmt::write!(fmt, "GDO0 read error"),
            Cc2500Error::BinaryCorruption => defmt::write!(fmt, "binary corruption"),
            Cc2500Error::CrcMismatch => defmt::write!(fmt, "CRC mismatch"),
            Cc2500Error::OversizedPacket(len) => defmt::write!(fmt, "oversized packet ({})", len),
            Cc2500Error::NoPacketPending => defmt::write!(fmt, "no packet pending"),
            Cc2500Error::RxFifoOverflow => defmt::write!(fmt, "RX FIFO overflow"),
            Cc2500Error::TransmitTimeout => defmt::write!(fmt, "transmit timeout"),
            Cc2500Error::FrameTooLarge => defmt::write!(fmt, "frame too large"),
            Cc2500Error::EmptyFrame => defmt::write!(fmt, "empty frame"),
        }
    }
}

impl<SPI, GPI> Display for Cc2500Error<SPI, GPI> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Cc2500Error::Spi(_) => write!(f, "SPI transaction error"),
            Cc2500Error::Gpi(_) => write!(f, "GDO0 read error"),
            Cc2500Error::BinaryCorruption => write!(f, "binary corruption"),
            Cc2500Error::CrcMismatch => write!(f, "CRC mismatch"),
            Cc2500Error::OversizedPacket(len) => write!(f, "oversized packet ({len})"),
            Cc2500Error::NoPacketPending => write!(f, "no packet pending"),
            Cc2500Error::RxFifoOverflow => write!(f, "RX FIFO overflow"),
            Cc2500Error::TransmitTimeout => write!(f, "transmit timeout"),
            Cc2500Error::FrameTooLarge => write!(f, "frame too large"),
            Cc2500Error::EmptyFrame => write!(f, "empty frame"),
        }
    }
}

/// This struct implements the [`Radio*` traits](mod@crate::radio::prelude)
/// for the CC2500 transceiver.
///
/// The driver owns its transfer buffer and the registered [`PacketHandler`],
/// so no packet ever needs an allocation. Use
/// [`SharedRadio`](crate::shared::SharedRadio) to reach the one instance
/// from both the main loop and the GDO0 interrupt.
pub struct Cc2500<SPI, GDO, DELAY, H = NoopHandler> {
    /// The longest time (in microseconds) that
    /// [`PacketRadio::transmit()`](fn@crate::radio::prelude::PacketRadio::transmit)
    /// waits for each GDO0 edge (sync word sent, then end of packet).
    ///
    /// Defaults to 500 milliseconds. At 250 kBaud, a full FIFO takes about 2 milliseconds on air.
    pub tx_timeout_us: u32,
    _spi: SPI,
    /// The GDO0 signal line of the radio.
    ///
    /// This is only exposed so the interrupt can be configured by the application.
    /// Masking and clearing is otherwise done by the driver.
    pub gdo0: GDO,
    _delay_impl: DELAY,
    /// Header byte followed by up to one FIFO's worth of data.
    _buf: [u8; FIFO_SIZE + 1],
    _status: ChipStatus,
    _handler: H,
    _address: u8,
    _channel: u8,
    _power_level: Option<u8>,
}

impl<SPI, GDO, DELAY> Cc2500<SPI, GDO, DELAY>
where
    SPI: SpiDevice,
    GDO: SignalLine,
    DELAY: DelayNs,
{
    /// Instantiate a [`Cc2500`] object for use on the specified
    /// `spi` bus with the given `gdo0` signal line.
    ///
    /// The radio's CSn pin (aka Chip Select pin) shall be defined
    /// when instantiating the [`SpiDevice`](trait@embedded_hal::spi::SpiDevice)
    /// object (passed to the `spi` parameter).
    ///
    /// Received packets are ignored until a handler is registered with
    /// [`Cc2500::with_handler()`].
    pub fn new(spi: SPI, gdo0: GDO, delay_impl: DELAY) -> Cc2500<SPI, GDO, DELAY> {
        Cc2500 {
            tx_timeout_us: 500_000,
            _spi: spi,
            gdo0,
            _delay_impl: delay_impl,
            _buf: [0u8; FIFO_SIZE + 1],
            _status: ChipStatus::from_bits(0),
            _handler: NoopHandler,
            _address: 0,
            _channel: 0,
            _power_level: None,
        }
    }
}

impl<SPI, GDO, DELAY, H> Cc2500<SPI, GDO, DELAY, H>
where
    SPI: SpiDevice,
    GDO: SignalLine,
    DELAY: DelayNs,
    H: PacketHandler,
{
    /// Register the `handler` called for every packet that passes the CRC check.
    ///
    /// This consumes the radio because the handler's type is part of the radio's type.
    /// ```ignore
    /// let mut radio = Cc2500::new(spi, gdo0, delay).with_handler(|packet: &[u8]| {
    ///     // packet[0] is the address byte
    ///     0u8
    /// });
    /// ```
    pub fn with_handler<NewHandler: PacketHandler>(
        self,
        handler: NewHandler,
    ) -> Cc2500<SPI, GDO, DELAY, NewHandler> {
        Cc2500 {
            tx_timeout_us: self.tx_timeout_us,
            _spi: self._spi,
            gdo0: self.gdo0,
            _delay_impl: self._delay_impl,
            _buf: self._buf,
            _status: self._status,
            _handler: handler,
            _address: self._address,
            _channel: self._channel,
            _power_level: self._power_level,
        }
    }

    /// Replace the registered handler with another of the same type.
    pub fn set_handler(&mut self, handler: H) {
        self._handler = handler;
    }

    /// Get a reference to the registered handler.
    pub fn handler(&self) -> &H {
        &self._handler
    }

    fn spi_transfer(&mut self, len: usize) -> Result<(), Cc2500Error<SPI::Error, GDO::Error>> {
        self._spi
            .transfer_in_place(&mut self._buf[..len])
            .map_err(Cc2500Error::Spi)?;
        self._status = ChipStatus::from_bits(self._buf[0]);
        Ok(())
    }

    /// Clock out `len` bytes after the `header` byte.
    ///
    /// The header must already carry the read (and burst) bits.
    fn spi_read(
        &mut self,
        len: usize,
        header: u8,
    ) -> Result<(), Cc2500Error<SPI::Error, GDO::Error>> {
        self._buf[0] = header;
        self._buf[1..=len].fill(0);
        self.spi_transfer(len + 1)
    }

    /// Send a command strobe. The chip status is cached as usual.
    fn spi_strobe(&mut self, command: u8) -> Result<(), Cc2500Error<SPI::Error, GDO::Error>> {
        self._buf[0] = command;
        self.spi_transfer(1)
    }

    fn spi_write_byte(
        &mut self,
        address: u8,
        byte: u8,
    ) -> Result<(), Cc2500Error<SPI::Error, GDO::Error>> {
        self._buf[0] = address;
        self._buf[1] = byte;
        self.spi_transfer(2)
    }

    /// Burst write `buf` starting at `address`.
    fn spi_write_buf(
        &mut self,
        address: u8,
        buf: &[u8],
    ) -> Result<(), Cc2500Error<SPI::Error, GDO::Error>> {
        self._buf[0] = address | mnemonics::BURST;
        let buf_len = buf.len();
        self._buf[1..(buf_len + 1)].copy_from_slice(buf);
        self.spi_transfer(buf_len + 1)
    }

    /// Read a status register (PARTNUM through RXBYTES).
    ///
    /// Status registers share their addresses with the command strobes,
    /// so the burst bit is always set.
    fn read_status(&mut self, address: u8) -> Result<u8, Cc2500Error<SPI::Error, GDO::Error>> {
        self.spi_read(1, address | mnemonics::READ | mnemonics::BURST)?;
        Ok(self._buf[1])
    }

    /// Read the current value of a configuration register.
    pub fn read_register(
        &mut self,
        address: u8,
    ) -> Result<u8, Cc2500Error<SPI::Error, GDO::Error>> {
        self.spi_read(1, address | mnemonics::READ)?;
        Ok(self._buf[1])
    }

    /// Write a single configuration register.
    ///
    /// <div class="warning">
    ///
    /// This bypasses the driver's cached settings. Use
    /// [`RadioSettings`](trait@crate::radio::prelude::RadioSettings) to change the
    /// address or channel.
    ///
    /// </div>
    pub fn write_register(
        &mut self,
        address: u8,
        value: u8,
    ) -> Result<(), Cc2500Error<SPI::Error, GDO::Error>> {
        self.spi_write_byte(address, value)
    }
}

/////////////////////////////////////////////////////////////////////////////////
/// unit tests
#[cfg(test)]
mod test {
    extern crate std;
    use super::{mnemonics, registers, status_registers, Cc2500Error};
    use crate::{
        frame::FrameError,
        radio::prelude::{PacketHandler, RadioStatus},
        spi_test_expects,
        test::mk_radio,
        types::RadioState,
    };
    use embedded_hal_mock::eh1::spi::Transaction as SpiTransaction;
    use std::{format, string::String, vec};

    type Error = Cc2500Error<(), ()>;

    #[test]
    fn dropped_packets() {
        assert!(Error::CrcMismatch.is_dropped_packet());
        assert!(Error::OversizedPacket(99).is_dropped_packet());
        assert!(Error::NoPacketPending.is_dropped_packet());
        assert!(Error::RxFifoOverflow.is_dropped_packet());
        assert!(!Error::Spi(()).is_dropped_packet());
        assert!(!Error::TransmitTimeout.is_dropped_packet());
        assert!(!Error::FrameTooLarge.is_dropped_packet());
        assert!(!Error::EmptyFrame.is_dropped_packet());
    }

    #[test]
    fn frame_errors() {
        let err: Error = FrameError::TooLarge {
            required: 70,
            capacity: 62,
        }
        .into();
        assert_eq!(err, Error::FrameTooLarge);
        let err: Error = FrameError::Oversized(70).into();
        assert_eq!(err, Error::OversizedPacket(70));
        assert_eq!(format!("{err}"), String::from("oversized packet (70)"));
    }

    #[test]
    fn read_register() {
        let spi_expectations = spi_test_expects![
            (
                vec![registers::MCSM1 | mnemonics::READ, 0u8],
                vec![0x1Fu8, 0x3Fu8],
            ),
        ];
        let mocks = mk_radio(&[], &spi_expectations);
        let (mut radio, mut spi, mut pin) = (mocks.0, mocks.1, mocks.2);
        assert_eq!(radio.read_register(registers::MCSM1).unwrap(), 0x3F);
        // status byte is cached from every transaction
        assert_eq!(radio.chip_status().state(), RadioState::Rx);
        assert_eq!(radio.chip_status().fifo_bytes_available(), 15);
        spi.done();
        pin.done();
    }

    #[test]
    fn write_register() {
        let spi_expectations = spi_test_expects![
            (vec![registers::FIFOTHR, 0x0Fu8], vec![0x0Fu8, 0u8]),
            (
                vec![status_registers::VERSION | 0xC0, 0u8],
                vec![0x0Fu8, 0x03u8],
            ),
        ];
        let mocks = mk_radio(&[], &spi_expectations);
        let (mut radio, mut spi, mut pin) = (mocks.0, mocks.1, mocks.2);
        radio.write_register(registers::FIFOTHR, 0x0F).unwrap();
        assert_eq!(radio.read_status(status_registers::VERSION).unwrap(), 3);
        spi.done();
        pin.done();
    }

    fn count_bytes(packet: &[u8]) -> u8 {
        packet.len() as u8
    }

    fn ignore(_packet: &[u8]) -> u8 {
        0
    }

    #[test]
    fn swap_handler() {
        let mocks = mk_radio(&[], &[]);
        let (radio, mut spi, mut pin) = (mocks.0, mocks.1, mocks.2);
        let mut radio = radio.with_handler(count_bytes as fn(&[u8]) -> u8);
        assert_eq!(radio._handler.handle(&[1, 2, 3]), 3);
        radio.set_handler(ignore);
        assert_eq!(radio._handler.handle(&[1, 2, 3]), 0);
        spi.done();
        pin.done();
    }
}
