//! Sharing one radio between the main loop and the GDO0 interrupt.
//!
//! ```ignore
//! use cc2500::{radio::prelude::*, shared::SharedRadio};
//!
//! static RADIO: SharedRadio<MyRadio> = SharedRadio::new();
//!
//! fn main() {
//!     let mut radio = Cc2500::new(spi, gdo0, delay).with_handler(on_packet);
//!     radio.init().unwrap();
//!     RADIO.install(radio);
//!     loop {
//!         RADIO.with(|radio| radio.send(b"ping", 0x02));
//!     }
//! }
//!
//! #[interrupt]
//! fn EXTI0() {
//!     RADIO.on_interrupt();
//! }
//! ```

use core::cell::RefCell;

use critical_section::Mutex;

use crate::radio::prelude::PacketRadio;

/// A radio behind a critical section, suitable for a `static`.
///
/// Every access runs with interrupts disabled, so the interrupt handler can
/// never observe the radio in the middle of a transmission.
pub struct SharedRadio<R> {
    inner: Mutex<RefCell<Option<R>>>,
}

impl<R> SharedRadio<R> {
    /// Create an empty handle. Use [`SharedRadio::install()`] to give it a radio.
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(RefCell::new(None)),
        }
    }

    /// Store the `radio`, returning the one previously installed (if any).
    pub fn install(&self, radio: R) -> Option<R> {
        critical_section::with(|cs| self.inner.borrow_ref_mut(cs).replace(radio))
    }

    /// Remove the radio from the handle.
    pub fn take(&self) -> Option<R> {
        critical_section::with(|cs| self.inner.borrow_ref_mut(cs).take())
    }

    /// Run `f` with exclusive access to the radio.
    ///
    /// Returns `None` if no radio is installed.
    pub fn with<T>(&self, f: impl FnOnce(&mut R) -> T) -> Option<T> {
        critical_section::with(|cs| self.inner.borrow_ref_mut(cs).as_mut().map(f))
    }
}

impl<R: PacketRadio> SharedRadio<R> {
    /// Call this from the GDO0 interrupt handler.
    ///
    /// See [`PacketRadio::service_interrupt()`]. Returns `None` if no radio is installed.
    pub fn on_interrupt(&self) -> Option<Result<bool, R::RadioErrorType>> {
        self.with(|radio| radio.service_interrupt())
    }
}

impl<R> Default for SharedRadio<R> {
    fn default() -> Self {
        Self::new()
    }
}
