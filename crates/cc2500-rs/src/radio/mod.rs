//! A module to encapsulate all things related to radio operation.
pub mod prelude;

mod cc2500;
pub use cc2500::power::{power_level_dbm, MAX_POWER_LEVEL};
pub use cc2500::{
    commands, mnemonics, registers, status_registers, Cc2500, Cc2500Error, RESET_SETTLE_US,
    TX_POLL_INTERVAL_US,
};

mod config;
pub use config::{RadioConfig, DEFAULT_PATABLE, RF_SETTINGS_LENGTH};
