use embedded_hal::{delay::DelayNs, spi::SpiDevice};

use super::{commands, status_registers, Cc2500, Cc2500Error};
use crate::{
    radio::prelude::{PacketHandler, RadioStatus, SignalLine},
    types::{rssi_to_dbm, ChipStatus},
};

impl<SPI, GDO, DELAY, H> RadioStatus for Cc2500<SPI, GDO, DELAY, H>
where
    SPI: SpiDevice,
    GDO: SignalLine,
    DELAY: DelayNs,
    H: PacketHandler,
{
    type StatusErrorType = Cc2500Error<SPI::Error, GDO::Error>;

    fn chip_status(&self) -> ChipStatus {
        self._status
    }

    fn update(&mut self) -> Result<(), Self::StatusErrorType> {
        self.spi_strobe(commands::SNOP)
    }

    fn start_listening(&mut self) -> Result<(), Self::StatusErrorType> {
        self.spi_strobe(commands::SRX)
    }

    fn idle(&mut self) -> Result<(), Self::StatusErrorType> {
        self.spi_strobe(commands::SIDLE)
    }

    /// The chip only enters power down from IDLE, so this strobes both.
    fn power_down(&mut self) -> Result<(), Self::StatusErrorType> {
        self.idle()?;
        self.spi_strobe(commands::SPWD)
    }

    /// The reading is only valid in RX mode.
    fn rssi_dbm(&mut self) -> Result<i16, Self::StatusErrorType> {
        Ok(rssi_to_dbm(self.read_status(status_registers::RSSI)?))
    }

    fn part_info(&mut self) -> Result<(u8, u8), Self::StatusErrorType> {
        let part_number = self.read_status(status_registers::PARTNUM)?;
        let version = self.read_status(status_registers::VERSION)?;
        Ok((part_number, version))
    }
}
