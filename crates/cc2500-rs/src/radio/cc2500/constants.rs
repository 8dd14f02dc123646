/// A module encapsulating configuration register addresses for the CC2500.
pub mod registers {
    pub const IOCFG2: u8 = 0x00;
    pub const IOCFG1: u8 = 0x01;
    pub const IOCFG0: u8 = 0x02;
    pub const FIFOTHR: u8 = 0x03;
    pub const SYNC1: u8 = 0x04;
    pub const SYNC0: u8 = 0x05;
    pub const PKTLEN: u8 = 0x06;
    pub const PKTCTRL1: u8 = 0x07;
    pub const PKTCTRL0: u8 = 0x08;
    pub const ADDR: u8 = 0x09;
    pub const CHANNR: u8 = 0x0A;
    pub const FSCTRL1: u8 = 0x0B;
    pub const FSCTRL0: u8 = 0x0C;
    pub const FREQ2: u8 = 0x0D;
    pub const FREQ1: u8 = 0x0E;
    pub const FREQ0: u8 = 0x0F;
    pub const MDMCFG4: u8 = 0x10;
    pub const MDMCFG3: u8 = 0x11;
    pub const MDMCFG2: u8 = 0x12;
    pub const MDMCFG1: u8 = 0x13;
    pub const MDMCFG0: u8 = 0x14;
    pub const DEVIATN: u8 = 0x15;
    pub const MCSM2: u8 = 0x16;
    pub const MCSM1: u8 = 0x17;
    pub const MCSM0: u8 = 0x18;
    pub const FOCCFG: u8 = 0x19;
    pub const BSCFG: u8 = 0x1A;
    pub const AGCCTRL2: u8 = 0x1B;
    pub const AGCCTRL1: u8 = 0x1C;
    pub const AGCCTRL0: u8 = 0x1D;
    pub const WOREVT1: u8 = 0x1E;
    pub const WOREVT0: u8 = 0x1F;
    pub const WORCTRL: u8 = 0x20;
    pub const FREND1: u8 = 0x21;
    pub const FREND0: u8 = 0x22;
    pub const FSCAL3: u8 = 0x23;
    pub const FSCAL2: u8 = 0x24;
    pub const FSCAL1: u8 = 0x25;
    pub const FSCAL0: u8 = 0x26;
    pub const RCCTRL1: u8 = 0x27;
    pub const RCCTRL0: u8 = 0x28;
    pub const FSTEST: u8 = 0x29;
    pub const PTEST: u8 = 0x2A;
    pub const AGCTEST: u8 = 0x2B;
    pub const TEST2: u8 = 0x2C;
    pub const TEST1: u8 = 0x2D;
    pub const TEST0: u8 = 0x2E;
    pub const PATABLE: u8 = 0x3E;
    pub const FIFO: u8 = 0x3F;
}

/// A module encapsulating status register addresses for the CC2500.
///
/// These share their addresses with the command strobes,
/// so they can only be read with the burst bit set.
pub mod status_registers {
    pub const PARTNUM: u8 = 0x30;
    pub const VERSION: u8 = 0x31;
    pub const FREQEST: u8 = 0x32;
    pub const LQI: u8 = 0x33;
    pub const RSSI: u8 = 0x34;
    pub const MARCSTATE: u8 = 0x35;
    pub const WORTIME1: u8 = 0x36;
    pub const WORTIME0: u8 = 0x37;
    pub const PKTSTATUS: u8 = 0x38;
    pub const VCO_VC_DAC: u8 = 0x39;
    pub const TXBYTES: u8 = 0x3A;
    pub const RXBYTES: u8 = 0x3B;
}

/// A module encapsulating command strobes for the CC2500.
pub mod commands {
    pub const SRES: u8 = 0x30;
    pub const SFSTXON: u8 = 0x31;
    pub const SXOFF: u8 = 0x32;
    pub const SCAL: u8 = 0x33;
    pub const SRX: u8 = 0x34;
    pub const STX: u8 = 0x35;
    pub const SIDLE: u8 = 0x36;
    pub const SWOR: u8 = 0x38;
    pub const SPWD: u8 = 0x39;
    pub const SFRX: u8 = 0x3A;
    pub const SFTX: u8 = 0x3B;
    pub const SWORRST: u8 = 0x3C;
    pub const SNOP: u8 = 0x3D;
}

/// A module to encapsulate bit mnemonics.
pub mod mnemonics {
    /// Header bit to request a read access.
    pub const READ: u8 = 0x80;
    /// Header bit to request a burst access.
    pub const BURST: u8 = 0x40;
    /// The value of PARTNUM for a genuine CC2500.
    pub const PARTNUM_CC2500: u8 = 0x80;
}
