//! Session application services.

mod observer;

pub use observer::SessionProgressObserver;
