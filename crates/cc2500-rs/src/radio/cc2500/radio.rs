use super::{
    commands, mnemonics, registers, status_registers, Cc2500, Cc2500Error, TX_POLL_INTERVAL_US,
};
use crate::{
    frame::{Frame, ReceivedFrame, FIFO_SIZE, FRAME_CAPACITY, RX_BUFFER_LENGTH},
    radio::prelude::{PacketHandler, PacketRadio, RadioFifo, RadioStatus, SignalLine},
    types::{RxBytes, StatusTrailer},
};
use embedded_hal::{delay::DelayNs, spi::SpiDevice};

impl<SPI, GDO, DELAY, H> PacketRadio for Cc2500<SPI, GDO, DELAY, H>
where
    SPI: SpiDevice,
    GDO: SignalLine,
    DELAY: DelayNs,
    H: PacketHandler,
{
    type RadioErrorType = Cc2500Error<SPI::Error, GDO::Error>;

    /// See [`PacketRadio::send()`] for implementation-agnostic detail.
    ///
    /// The frame is built directly in the driver's transfer buffer.
    /// Payloads longer than [`MAX_PAYLOAD_LENGTH`](crate::frame::MAX_PAYLOAD_LENGTH)
    /// are rejected with [`Cc2500Error::FrameTooLarge`].
    fn send(&mut self, payload: &[u8], destination: u8) -> Result<(), Self::RadioErrorType> {
        let len = Frame::build(&mut self._buf[1..=FRAME_CAPACITY], payload, destination)?.len();
        self.transmit_staged(len)
    }

    /// See [`PacketRadio::transmit()`] for implementation-agnostic detail.
    ///
    /// An empty `frame` is rejected with [`Cc2500Error::EmptyFrame`], and a `frame`
    /// longer than the TX FIFO with [`Cc2500Error::FrameTooLarge`].
    ///
    /// <div class="warning">
    ///
    /// This blocks until GDO0 goes high (sync word sent) and then low (end of packet),
    /// each phase bounded by [`Cc2500::tx_timeout_us`]. On timeout, the chip is
    /// forced back to RX mode with an empty TX FIFO.
    ///
    /// </div>
    fn transmit(&mut self, frame: &[u8]) -> Result<(), Self::RadioErrorType> {
        let len = frame.len();
        if len == 0 {
            return Err(Cc2500Error::EmptyFrame);
        }
        if len > FIFO_SIZE {
            return Err(Cc2500Error::FrameTooLarge);
        }
        // to avoid an extra buffer, stage the frame after the header byte
        self._buf[1..=len].copy_from_slice(frame);
        self.transmit_staged(len)
    }

    /// See [`PacketRadio::receive_packet()`] for implementation-agnostic detail.
    ///
    /// The `buf` is only written if the packet fits. A packet that fails the
    /// CRC check is still copied into `buf` before [`Cc2500Error::CrcMismatch`]
    /// is returned, so the [`StatusTrailer`] can be inspected.
    fn receive_packet(&mut self, buf: &mut [u8]) -> Result<u8, Self::RadioErrorType> {
        let (length, crc_ok) = self.fetch_packet(buf.len())?;
        let end = length as usize + StatusTrailer::LENGTH;
        buf[..end].copy_from_slice(&self._buf[1..=end]);
        if crc_ok {
            Ok(length)
        } else {
            Err(Cc2500Error::CrcMismatch)
        }
    }

    fn service_interrupt(&mut self) -> Result<bool, Self::RadioErrorType> {
        if !self.gdo0.is_interrupt_pending() {
            return Ok(false);
        }
        let result = match self.fetch_packet(RX_BUFFER_LENGTH) {
            Ok((length, true)) => {
                self._handler.handle(&self._buf[1..=length as usize]);
                Ok(true)
            }
            Ok((_length, false)) => {
                #[cfg(feature = "defmt")]
                defmt::debug!("dropped packet of {} bytes: CRC mismatch", _length);
                Ok(false)
            }
            Err(e) if e.is_dropped_packet() => {
                #[cfg(feature = "defmt")]
                defmt::debug!("dropped packet: {}", e);
                Ok(false)
            }
            Err(e) => Err(e),
        };
        // only after the handler returned, so the ISR is never re-entered
        self.gdo0.clear_interrupt();
        result
    }
}

impl<SPI, GDO, DELAY, H> Cc2500<SPI, GDO, DELAY, H>
where
    SPI: SpiDevice,
    GDO: SignalLine,
    DELAY: DelayNs,
    H: PacketHandler,
{
    /// Send the `len` bytes staged at `self._buf[1..]`.
    ///
    /// GDO0's interrupt stays masked for the whole exchange, and
    /// is cleared and unmasked again no matter how it ends.
    fn transmit_staged(
        &mut self,
        len: usize,
    ) -> Result<(), Cc2500Error<SPI::Error, GDO::Error>> {
        self.gdo0.disable_interrupt();
        let result = match self.start_tx(len) {
            Err(Cc2500Error::TransmitTimeout) => {
                #[cfg(feature = "defmt")]
                defmt::warn!(
                    "GDO0 did not toggle within {} us, flushing TX FIFO",
                    self.tx_timeout_us
                );
                self.recover_tx().and(Err(Cc2500Error::TransmitTimeout))
            }
            other => other,
        };
        self.gdo0.clear_interrupt();
        self.gdo0.enable_interrupt();
        result
    }

    fn start_tx(&mut self, len: usize) -> Result<(), Cc2500Error<SPI::Error, GDO::Error>> {
        self._buf[0] = registers::FIFO | mnemonics::BURST;
        self.spi_transfer(len + 1)?;
        self.spi_strobe(commands::STX)?;
        // sync word sent
        self.wait_for_signal(true)?;
        // end of packet
        self.wait_for_signal(false)
    }

    /// Poll GDO0 until it reads `level`, for at most [`Cc2500::tx_timeout_us`].
    fn wait_for_signal(
        &mut self,
        level: bool,
    ) -> Result<(), Cc2500Error<SPI::Error, GDO::Error>> {
        let mut waited = 0u32;
        while self.gdo0.is_high().map_err(Cc2500Error::Gpi)? != level {
            if waited >= self.tx_timeout_us {
                return Err(Cc2500Error::TransmitTimeout);
            }
            self._delay_impl.delay_us(TX_POLL_INTERVAL_US);
            waited = waited.saturating_add(TX_POLL_INTERVAL_US);
        }
        Ok(())
    }

    fn recover_tx(&mut self) -> Result<(), Cc2500Error<SPI::Error, GDO::Error>> {
        self.idle()?;
        self.flush_tx()?;
        self.start_listening()
    }

    fn recover_rx(&mut self) -> Result<(), Cc2500Error<SPI::Error, GDO::Error>> {
        self.idle()?;
        self.flush_rx()?;
        self.start_listening()
    }

    /// Drain one packet from the RX FIFO into `self._buf[1..]`.
    ///
    /// A packet is only read if it fits in `capacity` bytes along with its
    /// status trailer. Returns the packet length and the trailer's CRC flag.
    fn fetch_packet(
        &mut self,
        capacity: usize,
    ) -> Result<(u8, bool), Cc2500Error<SPI::Error, GDO::Error>> {
        let rx_bytes = RxBytes::from_bits(self.read_status(status_registers::RXBYTES)?);
        if rx_bytes.overflow() {
            self.recover_rx()?;
            return Err(Cc2500Error::RxFifoOverflow);
        }
        if rx_bytes.num_bytes() == 0 {
            return Err(Cc2500Error::NoPacketPending);
        }

        let length = self.read_register(registers::FIFO)?;
        let required = length as usize + StatusTrailer::LENGTH;
        if required > capacity.min(RX_BUFFER_LENGTH) {
            self.recover_rx()?;
            return Err(Cc2500Error::OversizedPacket(length));
        }

        self.spi_read(required, registers::FIFO | mnemonics::READ | mnemonics::BURST)?;
        // the status byte is cached; put the length byte back in front of the packet
        self._buf[0] = length;
        let frame = ReceivedFrame::parse(&self._buf[..=required], length)?;
        Ok((length, frame.crc_ok()))
    }
}
