use embedded_hal::{delay::DelayNs, spi::SpiDevice};

use super::{registers, Cc2500, Cc2500Error};
use crate::radio::prelude::{PacketHandler, RadioPower, SignalLine};

/// The highest power level accepted by
/// [`RadioPower::set_power()`](fn@crate::radio::prelude::RadioPower::set_power).
pub const MAX_POWER_LEVEL: u8 = 17;

/// PATABLE values for each power level, from -55 dBm to +1 dBm.
const POWER_TABLE: [u8; MAX_POWER_LEVEL as usize + 1] = [
    0x00, 0x50, 0x44, 0xC0, 0x84, 0x81, 0x46, 0x93, 0x55, 0x8D, 0xC6, 0x97, 0x6E, 0x7F, 0xA9, 0xBB,
    0xFE, 0xFF,
];

/// Nominal output power (in dBm) of each entry in [`POWER_TABLE`].
const POWER_TABLE_DBM: [i8; MAX_POWER_LEVEL as usize + 1] = [
    -55, -30, -28, -26, -24, -22, -20, -18, -16, -14, -12, -10, -8, -6, -4, -2, 0, 1,
];

pub(crate) const fn clamp_level(level: u8) -> u8 {
    if level > MAX_POWER_LEVEL {
        MAX_POWER_LEVEL
    } else {
        level
    }
}

pub(crate) const fn patable_value(level: u8) -> u8 {
    POWER_TABLE[clamp_level(level) as usize]
}

/// The nominal output power (in dBm) for a power `level`.
///
/// Levels out of range are clamped to [`MAX_POWER_LEVEL`].
/// ```
/// use cc2500::radio::power_level_dbm;
///
/// assert_eq!(power_level_dbm(0), -55);
/// assert_eq!(power_level_dbm(17), 1);
/// assert_eq!(power_level_dbm(200), 1);
/// ```
pub const fn power_level_dbm(level: u8) -> i8 {
    POWER_TABLE_DBM[clamp_level(level) as usize]
}

impl<SPI, GDO, DELAY, H> RadioPower for Cc2500<SPI, GDO, DELAY, H>
where
    SPI: SpiDevice,
    GDO: SignalLine,
    DELAY: DelayNs,
    H: PacketHandler,
{
    type PowerErrorType = Cc2500Error<SPI::Error, GDO::Error>;

    fn set_power(&mut self, level: u8) -> Result<(), Self::PowerErrorType> {
        let level = clamp_level(level);
        self.spi_write_buf(registers::PATABLE, &[patable_value(level)])?;
        self._power_level = Some(level);
        Ok(())
    }

    fn get_power(&self) -> Option<u8> {
        self._power_level
    }
}

/////////////////////////////////////////////////////////////////////////////////
/// unit tests
#[cfg(test)]
mod test {
    extern crate std;
    use super::{power_level_dbm, registers, RadioPower, POWER_TABLE};
    use crate::{radio::cc2500::mnemonics, spi_test_expects, test::mk_radio};
    use embedded_hal_mock::eh1::spi::Transaction as SpiTransaction;
    use std::vec;

    const PATABLE_BURST: u8 = registers::PATABLE | mnemonics::BURST;

    #[test]
    fn table() {
        assert_eq!(POWER_TABLE[0], 0x00);
        assert_eq!(POWER_TABLE[17], 0xFF);
        assert_eq!(power_level_dbm(8), -16);
    }

    #[test]
    fn set_power() {
        let spi_expectations = spi_test_expects![
            (vec![PATABLE_BURST, 0x00u8], vec![0x0Fu8, 0u8]),
            (vec![PATABLE_BURST, 0x55u8], vec![0x0Fu8, 0u8]),
        ];
        let mocks = mk_radio(&[], &spi_expectations);
        let (mut radio, mut spi, mut pin) = (mocks.0, mocks.1, mocks.2);
        assert_eq!(radio.get_power(), None);
        radio.set_power(0).unwrap();
        assert_eq!(radio.get_power(), Some(0));
        radio.set_power(8).unwrap();
        assert_eq!(radio.get_power(), Some(8));
        spi.done();
        pin.done();
    }

    #[test]
    fn set_power_clamped() {
        // the highest level and anything above it write the same value
        let spi_expectations = spi_test_expects![
            (vec![PATABLE_BURST, 0xFFu8], vec![0x0Fu8, 0u8]),
            (vec![PATABLE_BURST, 0xFFu8], vec![0x0Fu8, 0u8]),
            (vec![PATABLE_BURST, 0xFFu8], vec![0x0Fu8, 0u8]),
        ];
        let mocks = mk_radio(&[], &spi_expectations);
        let (mut radio, mut spi, mut pin) = (mocks.0, mocks.1, mocks.2);
        radio.set_power(17).unwrap();
        radio.set_power(18).unwrap();
        radio.set_power(255).unwrap();
        assert_eq!(radio.get_power(), Some(17));
        spi.done();
        pin.done();
    }
}
