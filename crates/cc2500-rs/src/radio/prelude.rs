//! This module defines the generic traits that may
//! need to imported to use radio implementations.
//!
//! Since rustc only compiles objects that are used,
//! it is convenient to import these traits with the `*` syntax.
//!
//! ```
//! use cc2500::radio::prelude::*;
//! ```

use embedded_hal::digital::InputPin;

use crate::types::ChipStatus;

use super::RadioConfig;

/// The GDO0 signal line of the CC2500.
///
/// With the library's default configuration (`IOCFG0 = 0x06`), the chip asserts
/// GDO0 when a sync word has been sent or received and de-asserts it at the end
/// of the packet. The MCU is expected to route a falling edge of this line to an
/// interrupt that calls [`PacketRadio::service_interrupt()`].
///
/// Reading the line's level comes from [`InputPin`]. The interrupt control
/// is platform specific, so a board support layer implements the rest.
pub trait SignalLine: InputPin {
    /// Unmask the line's edge interrupt.
    fn enable_interrupt(&mut self);

    /// Mask the line's edge interrupt.
    fn disable_interrupt(&mut self);

    /// Is the line's interrupt flag set?
    fn is_interrupt_pending(&mut self) -> bool;

    /// Clear the line's interrupt flag.
    fn clear_interrupt(&mut self);
}

/// Something to do with every packet that passed the CRC check.
///
/// The `packet` slice holds exactly the number of bytes announced by the
/// packet's length field: the address byte followed by the payload.
///
/// <div class="warning">
///
/// This is called from [`PacketRadio::service_interrupt()`], thus
/// (normally) in interrupt context. Keep it short and never block.
///
/// </div>
///
/// Any `FnMut(&[u8]) -> u8` closure is a handler.
pub trait PacketHandler {
    /// Handle a validated packet. The returned status is reserved for future use.
    fn handle(&mut self, packet: &[u8]) -> u8;
}

impl<F> PacketHandler for F
where
    F: FnMut(&[u8]) -> u8,
{
    fn handle(&mut self, packet: &[u8]) -> u8 {
        self(packet)
    }
}

/// The handler used until another one is registered. It ignores every packet.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopHandler;

impl PacketHandler for NoopHandler {
    fn handle(&mut self, _packet: &[u8]) -> u8 {
        0
    }
}

/// A trait to represent bringing up the radio.
pub trait RadioInit {
    type ConfigErrorType;

    /// Reset the radio, verify it answers as a CC2500, then apply the
    /// default [`RadioConfig`] and enter RX mode.
    fn init(&mut self) -> Result<(), Self::ConfigErrorType>;

    /// Apply a [`RadioConfig`] and enter RX mode.
    ///
    /// This can be used instead of [`RadioInit::init()`] after the radio was reset.
    fn with_config(&mut self, config: &RadioConfig) -> Result<(), Self::ConfigErrorType>;
}

/// A trait to represent the packet exchange of the transceiver.
pub trait PacketRadio {
    type RadioErrorType;

    /// Frame the given `payload` for `destination` and transmit it.
    ///
    /// This blocks until the chip signals the end of the packet.
    /// A payload that does not fit in a frame is rejected before the
    /// radio is touched.
    fn send(&mut self, payload: &[u8], destination: u8) -> Result<(), Self::RadioErrorType>;

    /// Transmit an already framed buffer.
    ///
    /// The radio's packet interrupt is masked for the duration of this call.
    /// An empty frame is rejected before the radio is touched.
    fn transmit(&mut self, frame: &[u8]) -> Result<(), Self::RadioErrorType>;

    /// Drain one packet from the RX FIFO into `buf`.
    ///
    /// The last 2 bytes of `buf` are reserved for the appended status bytes,
    /// so the largest accepted packet is `buf.len() - 2` bytes.
    /// On success, the packet length (address byte + payload) is returned and
    /// `buf[len..len + 2]` holds the [`StatusTrailer`](crate::StatusTrailer).
    fn receive_packet(&mut self, buf: &mut [u8]) -> Result<u8, Self::RadioErrorType>;

    /// The body of the radio's interrupt service routine.
    ///
    /// If the signal line flagged an interrupt, a packet is fetched and, if it
    /// passed the CRC check, given to the registered [`PacketHandler`].
    /// Packets that are dropped (bad CRC, too big, nothing pending) are not errors here.
    ///
    /// Returns `Ok(true)` if a packet was delivered.
    /// The interrupt flag is cleared last, after the handler returned.
    fn service_interrupt(&mut self) -> Result<bool, Self::RadioErrorType>;
}

/// A trait to represent the device settings that can change at runtime.
pub trait RadioSettings {
    type SettingsErrorType;

    /// Set the device address used for the address filter.
    fn set_address(&mut self, address: u8) -> Result<(), Self::SettingsErrorType>;

    /// Get the device address.
    fn get_address(&self) -> u8;

    /// Set the channel number.
    ///
    /// The frequency is the base frequency plus the channel number
    /// multiplied by the channel spacing.
    fn set_channel(&mut self, channel: u8) -> Result<(), Self::SettingsErrorType>;

    /// Get the channel number.
    fn get_channel(&self) -> u8;
}

/// A trait to represent manipulation of the transmit power.
pub trait RadioPower {
    type PowerErrorType;

    /// Set the transmit power level in range [0, 17].
    ///
    /// Levels out of range are clamped to the highest level (17).
    fn set_power(&mut self, level: u8) -> Result<(), Self::PowerErrorType>;

    /// Get the configured power level.
    ///
    /// This is `None` until a level was set, because the radio is brought up
    /// with a PATABLE value that is not one of the levels' entries.
    fn get_power(&self) -> Option<u8>;
}

/// A trait to represent manipulation of RX and TX FIFOs.
pub trait RadioFifo {
    type FifoErrorType;

    /// Flush the radio's RX FIFO.
    fn flush_rx(&mut self) -> Result<(), Self::FifoErrorType>;

    /// Flush the radio's TX FIFO.
    fn flush_tx(&mut self) -> Result<(), Self::FifoErrorType>;
}

/// A trait to represent the radio's state machine and status.
pub trait RadioStatus {
    type StatusErrorType;

    /// Get the [`ChipStatus`] cached from the latest SPI transaction.
    fn chip_status(&self) -> ChipStatus;

    /// Refresh the cached [`ChipStatus`].
    fn update(&mut self) -> Result<(), Self::StatusErrorType>;

    /// Put the radio in RX mode.
    fn start_listening(&mut self) -> Result<(), Self::StatusErrorType>;

    /// Put the radio in IDLE mode.
    fn idle(&mut self) -> Result<(), Self::StatusErrorType>;

    /// Put the radio in power down mode. It wakes up when the SPI chip select
    /// is asserted, so follow with [`RadioStatus::start_listening()`].
    fn power_down(&mut self) -> Result<(), Self::StatusErrorType>;

    /// Get the current RSSI in dBm.
    fn rssi_dbm(&mut self) -> Result<i16, Self::StatusErrorType>;

    /// Get the chip's part number and version.
    fn part_info(&mut self) -> Result<(u8, u8), Self::StatusErrorType>;
}
