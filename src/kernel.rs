//! Bring-up sequence: screen, IDT, PICs, keyboard line, then idle.

use spin::{Mutex, Once};
use crate::idt::{Lidt, TableImage, TableLoader, TablePointer};
use crate::interrupts;
use crate::port::{HardwarePorts, PortIo};
use crate::vga_buffer::{Console, CONSOLE};

pub const BANNER: [&str; 7] = [
    "########  ######  ##     ##  #######   ######\n",
    "##       ##    ## ##     ## ##     ## ##    ##\n",
    "##       ##       ##     ## ##     ## ##\n",
    "######   ##       ######### ##     ##  ######\n",
    "##       ##       ##     ## ##     ##       ##\n",
    "##       ##    ## ##     ## ##     ## ##    ##\n",
    "########  ######  ##     ##  #######   ######\n",
];

/// The real machine: port I/O plus `lidt`.
pub struct Machine {
    ports: HardwarePorts,
    loader: Lidt,
}

impl Machine {
    pub const fn new() -> Machine {
        Machine {
            ports: HardwarePorts,
            loader: Lidt,
        }
    }
}

impl PortIo for Machine {
    fn read(&mut self, port: u16) -> u8 {
        self.ports.read(port)
    }

    fn write(&mut self, port: u16, value: u8) {
        self.ports.write(port, value)
    }
}

impl TableLoader for Machine {
    unsafe fn load(&mut self, pointer: &TablePointer) {
        self.loader.load(pointer)
    }
}

/// Clear the screen, print `banner`, then leave two blank lines.
pub fn print_banner(console: &mut Console, banner: &[&str]) {
    console.clear();
    for line in banner {
        console.write_string(line);
    }
    console.new_line();
    console.new_line();
}

/// Everything up to, but not including, enabling interrupts. Must run with
/// interrupts disabled.
pub fn bring_up<M: PortIo + TableLoader>(
    console: &Mutex<Console>,
    machine: &mut M,
    idt_slot: &'static Once<TableImage>,
) {
    print_banner(&mut console.lock(), &BANNER);
    log::info!("console ready");

    interrupts::init_idt(idt_slot, machine);
    log::info!("IDT installed");

    interrupts::init_pics(machine);
    interrupts::enable_keyboard(machine);
    log::info!("PICs initialized, keyboard line open");
}

/// Bring the machine up and idle forever; keystrokes are echoed from the
/// keyboard interrupt.
pub fn run() -> ! {
    let mut machine = Machine::new();
    bring_up(&CONSOLE, &mut machine, &interrupts::IDT);

    x86_64::instructions::interrupts::enable();
    log::info!("interrupts enabled, idling");
    hlt_loop()
}

pub fn hlt_loop() -> ! {
    loop {
        x86_64::instructions::hlt();
    }
}
