use super::cc2500::{power, registers};

/// The number of configuration registers (`IOCFG2` through `TEST0`).
pub const RF_SETTINGS_LENGTH: usize = registers::TEST0 as usize + 1;

/// The PATABLE value written at bring-up when no power level was configured.
pub const DEFAULT_PATABLE: u8 = 0xFB;

/// An object to configure the radio.
///
/// This struct follows a builder pattern. Since all fields are private, users should
/// start with the [`RadioConfig::default`] constructor, then mutate the object accordingly.
/// ```
/// use cc2500::radio::RadioConfig;
///
/// let config = RadioConfig::default().with_channel(3).with_address(0x12);
/// assert_eq!(config.channel(), 3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RadioConfig {
    rf_settings: [u8; RF_SETTINGS_LENGTH],
    power_level: Option<u8>,
}

impl Default for RadioConfig {
    /// Instantiate a [`RadioConfig`] object with library defaults.
    ///
    /// The register values are a 250 kBaud MSK profile for a 26 MHz crystal
    /// (2433 MHz base frequency).
    ///
    /// | feature | default value |
    /// |--------:|:--------------|
    /// | [`RadioConfig::address()`] | `0x01` |
    /// | [`RadioConfig::channel()`] | `0` |
    /// | [`RadioConfig::power_level()`] | `None` (PATABLE = `0xFB`) |
    /// | GDO0 (`IOCFG0`) | `0x06`: asserts on sync word, de-asserts at end of packet |
    /// | max packet length (`PKTLEN`) | `61` |
    /// | packet control (`PKTCTRL1`) | append status, address check with `0x00` broadcast |
    /// | packet control (`PKTCTRL0`) | CRC enabled, variable packet length |
    /// | state machine (`MCSM1`) | stay in RX after receiving or transmitting |
    fn default() -> Self {
        Self {
            rf_settings: [
                0x29, // IOCFG2: CHIP_RDYn
                0x2E, // IOCFG1: high impedance
                0x06, // IOCFG0: sync word / end of packet
                0x07, // FIFOTHR
                0xD3, // SYNC1
                0x91, // SYNC0
                0x3D, // PKTLEN
                0x06, // PKTCTRL1
                0x05, // PKTCTRL0
                0x01, // ADDR
                0x00, // CHANNR
                0x07, // FSCTRL1
                0x00, // FSCTRL0
                0x5D, // FREQ2
                0x93, // FREQ1
                0xB1, // FREQ0
                0x2D, // MDMCFG4
                0x3B, // MDMCFG3
                0x73, // MDMCFG2
                0x22, // MDMCFG1
                0xF8, // MDMCFG0
                0x00, // DEVIATN
                0x07, // MCSM2
                0x3F, // MCSM1
                0x18, // MCSM0
                0x1D, // FOCCFG
                0x1C, // BSCFG
                0xC7, // AGCCTRL2
                0x00, // AGCCTRL1
                0xB2, // AGCCTRL0
                0x87, // WOREVT1
                0x6B, // WOREVT0
                0xF8, // WORCTRL
                0xB6, // FREND1
                0x10, // FREND0
                0xEA, // FSCAL3
                0x0A, // FSCAL2
                0x00, // FSCAL1
                0x11, // FSCAL0
                0x41, // RCCTRL1
                0x00, // RCCTRL0
                0x59, // FSTEST
                0x7F, // PTEST
                0x3F, // AGCTEST
                0x88, // TEST2
                0x31, // TEST1
                0x0B, // TEST0
            ],
            power_level: None,
        }
    }
}

impl RadioConfig {
    /// Returns the value set by [`RadioConfig::with_address()`].
    pub const fn address(&self) -> u8 {
        self.rf_settings[registers::ADDR as usize]
    }

    /// The device address used by the chip's address filter.
    pub fn with_address(self, address: u8) -> Self {
        self.with_register(registers::ADDR, address)
    }

    /// Returns the value set by [`RadioConfig::with_channel()`].
    pub const fn channel(&self) -> u8 {
        self.rf_settings[registers::CHANNR as usize]
    }

    /// Set the channel number.
    ///
    /// The radio's frequency is determined by the following equation:
    /// ```text
    /// frequency = base frequency + channel * channel spacing
    /// ```
    pub fn with_channel(self, channel: u8) -> Self {
        self.with_register(registers::CHANNR, channel)
    }

    /// Returns the value set by [`RadioConfig::with_power_level()`].
    pub const fn power_level(&self) -> Option<u8> {
        self.power_level
    }

    /// The transmit power level in range [0, 17].
    ///
    /// Levels out of range are clamped to 17.
    pub fn with_power_level(self, level: u8) -> Self {
        Self {
            power_level: Some(power::clamp_level(level)),
            ..self
        }
    }

    /// The PATABLE value written when this config is applied.
    pub fn patable(&self) -> u8 {
        match self.power_level {
            Some(level) => power::patable_value(level),
            None => DEFAULT_PATABLE,
        }
    }

    /// Get the value of a configuration register.
    ///
    /// Returns `None` for addresses that are not configuration registers.
    pub fn register(&self, address: u8) -> Option<u8> {
        self.rf_settings.get(address as usize).copied()
    }

    /// Override the value of a configuration register.
    ///
    /// Addresses that are not configuration registers are ignored.
    pub fn with_register(self, address: u8, value: u8) -> Self {
        let mut rf_settings = self.rf_settings;
        if let Some(reg) = rf_settings.get_mut(address as usize) {
            *reg = value;
        }
        Self {
            rf_settings,
            ..self
        }
    }

    /// All configuration register values, starting with `IOCFG2`.
    pub const fn rf_settings(&self) -> &[u8; RF_SETTINGS_LENGTH] {
        &self.rf_settings
    }
}

#[cfg(test)]
mod test {
    use super::{RadioConfig, DEFAULT_PATABLE, RF_SETTINGS_LENGTH};
    use crate::radio::cc2500::registers;

    #[test]
    fn defaults() {
        let config = RadioConfig::default();
        assert_eq!(RF_SETTINGS_LENGTH, 47);
        assert_eq!(config.address(), 1);
        assert_eq!(config.channel(), 0);
        assert_eq!(config.power_level(), None);
        assert_eq!(config.patable(), DEFAULT_PATABLE);
        assert_eq!(config.register(registers::IOCFG0), Some(0x06));
        assert_eq!(config.register(registers::PKTLEN), Some(61));
        assert_eq!(config.register(registers::TEST0), Some(0x0B));
    }

    #[test]
    fn address_and_channel() {
        let config = RadioConfig::default().with_address(0x42).with_channel(200);
        assert_eq!(config.address(), 0x42);
        assert_eq!(config.channel(), 200);
        assert_eq!(config.rf_settings()[registers::ADDR as usize], 0x42);
        assert_eq!(config.rf_settings()[registers::CHANNR as usize], 200);
    }

    #[test]
    fn power_level() {
        let config = RadioConfig::default().with_power_level(0);
        assert_eq!(config.power_level(), Some(0));
        assert_eq!(config.patable(), 0x00);
        let config = config.with_power_level(99);
        assert_eq!(config.power_level(), Some(17));
        assert_eq!(config.patable(), 0xFF);
    }

    #[test]
    fn register_overrides() {
        let config = RadioConfig::default()
            .with_register(registers::MCSM1, 0x30)
            .with_register(registers::PATABLE, 0x55);
        assert_eq!(config.register(registers::MCSM1), Some(0x30));
        // not a configuration register
        assert_eq!(config.register(registers::PATABLE), None);
        let expected = RadioConfig::default().with_register(registers::MCSM1, 0x30);
        assert_eq!(config.rf_settings(), expected.rf_settings());
    }
}
