#![doc = include_str!("../README.md")]
//!
//! ## Basic API
//!
//! - [`Cc2500::new()`](fn@crate::radio::Cc2500::new)
//! - [`Cc2500::with_handler()`](fn@crate::radio::Cc2500::with_handler)
//! - [`Cc2500::init()`](radio/struct.Cc2500.html#method.init)
//! - [`Cc2500::send()`](radio/struct.Cc2500.html#method.send)
//! - [`Cc2500::service_interrupt()`](radio/struct.Cc2500.html#method.service_interrupt)
//! - [`Cc2500::set_address()`](radio/struct.Cc2500.html#method.set_address)
//! - [`Cc2500::get_address()`](radio/struct.Cc2500.html#method.get_address)
//! - [`Cc2500::set_channel()`](radio/struct.Cc2500.html#method.set_channel)
//! - [`Cc2500::get_channel()`](radio/struct.Cc2500.html#method.get_channel)
//! - [`Cc2500::set_power()`](radio/struct.Cc2500.html#method.set_power)
//! - [`Cc2500::get_power()`](radio/struct.Cc2500.html#method.get_power)
//! - [`SharedRadio`](struct@crate::shared::SharedRadio)
//!
//! ## Advanced API
//!
//! - [`Cc2500::transmit()`](radio/struct.Cc2500.html#method.transmit)
//! - [`Cc2500::receive_packet()`](radio/struct.Cc2500.html#method.receive_packet)
//! - [`Cc2500::set_handler()`](fn@crate::radio::Cc2500::set_handler)
//! - [`Cc2500::flush_rx()`](radio/struct.Cc2500.html#method.flush_rx)
//! - [`Cc2500::flush_tx()`](radio/struct.Cc2500.html#method.flush_tx)
//! - [`Cc2500::chip_status()`](radio/struct.Cc2500.html#method.chip_status)
//! - [`Cc2500::update()`](radio/struct.Cc2500.html#method.update)
//! - [`Cc2500::start_listening()`](radio/struct.Cc2500.html#method.start_listening)
//! - [`Cc2500::idle()`](radio/struct.Cc2500.html#method.idle)
//! - [`Cc2500::power_down()`](radio/struct.Cc2500.html#method.power_down)
//! - [`Cc2500::rssi_dbm()`](radio/struct.Cc2500.html#method.rssi_dbm)
//! - [`Cc2500::part_info()`](radio/struct.Cc2500.html#method.part_info)
//! - [`Cc2500::read_register()`](fn@crate::radio::Cc2500::read_register)
//! - [`Cc2500::write_register()`](fn@crate::radio::Cc2500::write_register)
//! - [`Cc2500::tx_timeout_us`](value@crate::radio::Cc2500::tx_timeout_us)
//! - [`Frame`](struct@crate::frame::Frame)
//! - [`ReceivedFrame`](struct@crate::frame::ReceivedFrame)
//!
//! ## Configuration API
//!
//! - [`Cc2500::with_config()`](radio/struct.Cc2500.html#method.with_config)
//! - [`RadioConfig`](struct@crate::radio::RadioConfig)
//!
#![no_std]

mod types;
pub use types::{rssi_to_dbm, ChipStatus, RadioState, StatusTrailer};
pub mod frame;
pub mod radio;
pub mod shared;
