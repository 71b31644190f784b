use x86_64::instructions::port::Port;

/// Byte-wide access to x86 I/O ports.
///
/// Everything that talks to the PIC or the keyboard controller goes through
/// this trait so the exact sequence of port accesses can be checked in tests.
pub trait PortIo {
    fn read(&mut self, port: u16) -> u8;
    fn write(&mut self, port: u16, value: u8);
}

/// Real `in`/`out` instructions.
pub struct HardwarePorts;

impl PortIo for HardwarePorts {
    fn read(&mut self, port: u16) -> u8 {
        let mut port = Port::<u8>::new(port);
        unsafe { port.read() }
    }

    fn write(&mut self, port: u16, value: u8) {
        let mut port = Port::<u8>::new(port);
        unsafe { port.write(value) }
    }
}
