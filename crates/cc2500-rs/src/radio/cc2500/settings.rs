use embedded_hal::{delay::DelayNs, spi::SpiDevice};

use super::{registers, Cc2500, Cc2500Error};
use crate::radio::prelude::{PacketHandler, RadioSettings, SignalLine};

impl<SPI, GDO, DELAY, H> RadioSettings for Cc2500<SPI, GDO, DELAY, H>
where
    SPI: SpiDevice,
    GDO: SignalLine,
    DELAY: DelayNs,
    H: PacketHandler,
{
    type SettingsErrorType = Cc2500Error<SPI::Error, GDO::Error>;

    /// The chip drops packets addressed to neither this address nor the
    /// broadcast address (`0x00`), per the default `PKTCTRL1` setting.
    fn set_address(&mut self, address: u8) -> Result<(), Self::SettingsErrorType> {
        self.spi_write_byte(registers::ADDR, address)?;
        self._address = address;
        Ok(())
    }

    fn get_address(&self) -> u8 {
        self._address
    }

    fn set_channel(&mut self, channel: u8) -> Result<(), Self::SettingsErrorType> {
        self.spi_write_byte(registers::CHANNR, channel)?;
        self._channel = channel;
        Ok(())
    }

    fn get_channel(&self) -> u8 {
        self._channel
    }
}

/////////////////////////////////////////////////////////////////////////////////
/// unit tests
#[cfg(test)]
mod test {
    extern crate std;
    use super::{registers, RadioSettings};
    use crate::{spi_test_expects, test::mk_radio};
    use embedded_hal_mock::eh1::spi::Transaction as SpiTransaction;
    use std::vec;

    #[test]
    fn set_address() {
        let spi_expectations = spi_test_expects![
            (vec![registers::ADDR, 0x42u8], vec![0x0Fu8, 0u8]),
        ];
        let mocks = mk_radio(&[], &spi_expectations);
        let (mut radio, mut spi, mut pin) = (mocks.0, mocks.1, mocks.2);
        radio.set_address(0x42).unwrap();
        assert_eq!(radio.get_address(), 0x42);
        spi.done();
        pin.done();
    }

    #[test]
    fn set_channel() {
        let spi_expectations = spi_test_expects![
            (vec![registers::CHANNR, 200u8], vec![0x0Fu8, 0u8]),
        ];
        let mocks = mk_radio(&[], &spi_expectations);
        let (mut radio, mut spi, mut pin) = (mocks.0, mocks.1, mocks.2);
        radio.set_channel(200).unwrap();
        assert_eq!(radio.get_channel(), 200);
        spi.done();
        pin.done();
    }
}
