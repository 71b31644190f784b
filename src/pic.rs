//! Programming of the two cascaded 8259 interrupt controllers.
//!
//! The initialization handshake is stateful on the chip side: each
//! controller expects ICW1, ICW2, ICW3 and ICW4 in that order after the
//! begin-init command. Nothing here is read back.

use crate::constants::pic::{
    END_OF_INTERRUPT, ICW1_INIT, ICW3_PRIMARY, ICW3_SECONDARY, ICW4_8086, MASK_ALL, PRIMARY_COMMAND,
    PRIMARY_DATA, SECONDARY_COMMAND, SECONDARY_DATA,
};
use crate::constants::interrupts::{PIC_1_OFFSET, PIC_2_OFFSET};
use crate::port::PortIo;

/// One 8259 chip.
#[derive(Debug, Clone, Copy)]
struct Pic {
    offset: u8,
    command: u16,
    data: u16,
}

/// The primary/secondary pair found on every PC.
#[derive(Debug, Clone, Copy)]
pub struct ChainedPics {
    primary: Pic,
    secondary: Pic,
}

impl ChainedPics {
    pub const fn new(primary_offset: u8, secondary_offset: u8) -> ChainedPics {
        ChainedPics {
            primary: Pic {
                offset: primary_offset,
                command: PRIMARY_COMMAND,
                data: PRIMARY_DATA,
            },
            secondary: Pic {
                offset: secondary_offset,
                command: SECONDARY_COMMAND,
                data: SECONDARY_DATA,
            },
        }
    }

    /// Run the four-word init sequence on both chips in lock-step, then mask
    /// every line.
    pub fn initialize<P: PortIo>(&self, ports: &mut P) {
        // ICW1: begin initialization
        ports.write(self.primary.command, ICW1_INIT);
        ports.write(self.secondary.command, ICW1_INIT);

        // ICW2: vector base, moved past the CPU exception range
        ports.write(self.primary.data, self.primary.offset);
        ports.write(self.secondary.data, self.secondary.offset);

        // ICW3: cascade wiring
        ports.write(self.primary.data, ICW3_PRIMARY);
        ports.write(self.secondary.data, ICW3_SECONDARY);

        // ICW4: mode
        ports.write(self.primary.data, ICW4_8086);
        ports.write(self.secondary.data, ICW4_8086);

        self.mask_all(ports);
        log::debug!(
            "PICs remapped to {:#04x}/{:#04x}, all lines masked",
            self.primary.offset,
            self.secondary.offset
        );
    }

    pub fn mask_all<P: PortIo>(&self, ports: &mut P) {
        ports.write(self.primary.data, MASK_ALL);
        ports.write(self.secondary.data, MASK_ALL);
    }

    /// Enable exactly one line of the primary controller; every other
    /// primary line is masked.
    pub fn unmask_only<P: PortIo>(&self, ports: &mut P, line: u8) {
        debug_assert!(line < 8);
        let mask = MASK_ALL & !(1 << line);
        ports.write(self.primary.data, mask);
        log::debug!("PIC1 mask set to {:#04x}", mask);
    }

    /// Acknowledge an interrupt raised by the primary controller.
    pub fn notify_end_of_interrupt<P: PortIo>(&self, ports: &mut P) {
        ports.write(self.primary.command, END_OF_INTERRUPT);
    }
}

/// The controllers as wired on this machine.
pub const PICS: ChainedPics = ChainedPics::new(PIC_1_OFFSET, PIC_2_OFFSET);
