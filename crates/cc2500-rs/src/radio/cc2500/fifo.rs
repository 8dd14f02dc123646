use embedded_hal::{delay::DelayNs, spi::SpiDevice};

use crate::radio::prelude::{PacketHandler, RadioFifo, SignalLine};

use super::{commands, Cc2500, Cc2500Error};

impl<SPI, GDO, DELAY, H> RadioFifo for Cc2500<SPI, GDO, DELAY, H>
where
    SPI: SpiDevice,
    GDO: SignalLine,
    DELAY: DelayNs,
    H: PacketHandler,
{
    type FifoErrorType = Cc2500Error<SPI::Error, GDO::Error>;

    /// Use this to discard everything in the radio's RX FIFO.
    ///
    /// The chip only accepts this in IDLE state or after an RX FIFO overflow.
    fn flush_rx(&mut self) -> Result<(), Self::FifoErrorType> {
        self.spi_strobe(commands::SFRX)
    }

    /// Use this to discard everything in the radio's TX FIFO.
    ///
    /// The chip only accepts this in IDLE state or after a TX FIFO underflow.
    fn flush_tx(&mut self) -> Result<(), Self::FifoErrorType> {
        self.spi_strobe(commands::SFTX)
    }
}
