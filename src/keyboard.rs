use crate::constants::keyboard::{
    DATA_PORT, ENTER_KEY_CODE, RELEASE_BIT, STATUS_COMMAND_PORT, STATUS_OUTPUT_BUFFER_FULL,
};
use crate::pic::ChainedPics;
use crate::port::PortIo;
use crate::vga_buffer::Console;

/// What one keyboard interrupt did to the console.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Status said the output buffer was empty
    BufferEmpty,
    /// Key release, discarded
    Released(u8),
    Newline,
    Echoed(u8),
}

/// Body of the keyboard interrupt: acknowledge, fetch the scan code and echo
/// it to the console.
pub fn handle_interrupt<P: PortIo>(
    ports: &mut P,
    pics: &ChainedPics,
    console: &mut Console,
    keymap: &[u8; 128],
) -> Outcome {
    // EOI first, or the controller stops delivering IRQ1
    pics.notify_end_of_interrupt(ports);

    let status = ports.read(STATUS_COMMAND_PORT);
    if status & STATUS_OUTPUT_BUFFER_FULL == 0 {
        return Outcome::BufferEmpty;
    }

    let scancode = ports.read(DATA_PORT);
    let outcome = if scancode & RELEASE_BIT != 0 {
        Outcome::Released(scancode)
    } else if scancode == ENTER_KEY_CODE {
        console.new_line();
        Outcome::Newline
    } else {
        let byte = keymap[usize::from(scancode)];
        console.write_char(byte);
        Outcome::Echoed(byte)
    };

    log::trace!("scancode {:#04x}: {:?}", scancode, outcome);
    outcome
}
