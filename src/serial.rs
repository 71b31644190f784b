//! `log` backend writing to COM1.

use core::fmt::Write;

use log::{LevelFilter, Log, Metadata, Record};
use spin::Mutex;
use uart_16550::SerialPort;
use x86_64::instructions::interrupts;

use crate::constants::serial::COM1_BASE;

pub static SERIAL1: Mutex<SerialPort> = Mutex::new(unsafe { SerialPort::new(COM1_BASE) });

pub struct SerialLogger;

impl Log for SerialLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        // The keyboard interrupt logs too, keep it out while we hold the port.
        interrupts::without_interrupts(|| {
            let mut serial = SERIAL1.lock();
            let _ = writeln!(serial, "[{}] {}: {}", record.level(), record.target(), record.args());
        });
    }

    fn flush(&self) {}
}

static LOGGER: SerialLogger = SerialLogger;

/// Bring up COM1 and route the `log` macros to it.
pub fn init(level: LevelFilter) {
    SERIAL1.lock().init();
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(level);
    }
}
