use super::{
    commands, mnemonics, registers, status_registers, Cc2500, Cc2500Error, RESET_SETTLE_US,
};
use crate::radio::{
    prelude::{PacketHandler, RadioFifo, RadioInit, RadioStatus, SignalLine},
    RadioConfig,
};
use embedded_hal::{delay::DelayNs, spi::SpiDevice};

impl<SPI, GDO, DELAY, H> RadioInit for Cc2500<SPI, GDO, DELAY, H>
where
    SPI: SpiDevice,
    GDO: SignalLine,
    DELAY: DelayNs,
    H: PacketHandler,
{
    type ConfigErrorType = Cc2500Error<SPI::Error, GDO::Error>;

    /// Initialize the radio's hardware using the [`SpiDevice`] and [`SignalLine`] given
    /// to [`Cc2500::new()`].
    ///
    /// The chip is reset, identified by its part number, then configured with
    /// [`RadioConfig::default()`] and left in RX mode.
    fn init(&mut self) -> Result<(), Self::ConfigErrorType> {
        self.spi_strobe(commands::SRES)?;
        self._delay_impl.delay_us(RESET_SETTLE_US);

        // a floating or miswired MISO line will not produce the right part number
        if self.read_status(status_registers::PARTNUM)? != mnemonics::PARTNUM_CC2500 {
            return Err(Cc2500Error::BinaryCorruption);
        }
        self.with_config(&RadioConfig::default())
    }

    fn with_config(&mut self, config: &RadioConfig) -> Result<(), Self::ConfigErrorType> {
        self.idle()?;

        // every configuration register in one burst, starting at IOCFG2
        self.spi_write_buf(registers::IOCFG2, config.rf_settings())?;
        self._address = config.address();
        self._channel = config.channel();

        self.spi_write_buf(registers::PATABLE, &[config.patable()])?;
        self._power_level = config.power_level();

        self.flush_rx()?;
        self.flush_tx()?;
        self.start_listening()
    }
}

/////////////////////////////////////////////////////////////////////////////////
/// unit tests
#[cfg(test)]
mod test {
    extern crate std;
    use super::{commands, mnemonics, registers, status_registers, RadioConfig, RadioInit};
    use crate::{
        radio::prelude::{RadioPower, RadioSettings},
        radio::Cc2500Error,
        spi_test_expects,
        test::mk_radio,
    };
    use embedded_hal_mock::eh1::spi::Transaction as SpiTransaction;
    use std::{vec, vec::Vec};

    const PARTNUM_READ: u8 = status_registers::PARTNUM | mnemonics::READ | mnemonics::BURST;

    fn config_expectations(config: &RadioConfig) -> Vec<SpiTransaction<u8>> {
        let mut settings = vec![registers::IOCFG2 | mnemonics::BURST];
        settings.extend_from_slice(config.rf_settings());
        let settings_len = settings.len();
        spi_test_expects![
            (vec![commands::SIDLE], vec![0x0Fu8]),
            (settings, vec![0x0Fu8; settings_len]),
            (
                vec![registers::PATABLE | mnemonics::BURST, config.patable()],
                vec![0x0Fu8, 0u8],
            ),
            (vec![commands::SFRX], vec![0x0Fu8]),
            (vec![commands::SFTX], vec![0x0Fu8]),
            (vec![commands::SRX], vec![0x0Fu8]),
        ]
        .to_vec()
    }

    #[test]
    fn init() {
        let mut spi_expectations = spi_test_expects![
            (vec![commands::SRES], vec![0x8Fu8]),
            (vec![PARTNUM_READ, 0u8], vec![0x0Fu8, 0x80u8]),
        ]
        .to_vec();
        spi_expectations.extend(config_expectations(&RadioConfig::default()));
        let mocks = mk_radio(&[], &spi_expectations);
        let (mut radio, mut spi, mut pin) = (mocks.0, mocks.1, mocks.2);
        radio.init().unwrap();
        assert_eq!(radio.get_address(), 1);
        assert_eq!(radio.get_channel(), 0);
        assert_eq!(radio.get_power(), None);
        spi.done();
        pin.done();
    }

    #[test]
    fn init_bin_corrupt() {
        let spi_expectations = spi_test_expects![
            (vec![commands::SRES], vec![0xFFu8]),
            // !!! expectations stop here if the part number is wrong
            (vec![PARTNUM_READ, 0u8], vec![0xFFu8, 0xFFu8]),
        ];
        let mocks = mk_radio(&[], &spi_expectations);
        let (mut radio, mut spi, mut pin) = (mocks.0, mocks.1, mocks.2);
        let result = radio.init();
        assert!(matches!(result, Err(Cc2500Error::BinaryCorruption)));
        spi.done();
        pin.done();
    }

    #[test]
    fn with_custom_config() {
        let config = RadioConfig::default()
            .with_address(0x33)
            .with_channel(12)
            .with_power_level(16)
            .with_register(registers::MCSM1, 0x30);
        let spi_expectations = config_expectations(&config);
        let mocks = mk_radio(&[], &spi_expectations);
        let (mut radio, mut spi, mut pin) = (mocks.0, mocks.1, mocks.2);
        radio.with_config(&config).unwrap();
        assert_eq!(radio.get_address(), 0x33);
        assert_eq!(radio.get_channel(), 12);
        assert_eq!(radio.get_power(), Some(16));
        spi.done();
        pin.done();
    }
}
