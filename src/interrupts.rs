use spin::Once;
use x86_64::structures::idt::InterruptStackFrame;
use crate::constants::interrupts::PIC_1_OFFSET;
use crate::idt::{self, DescriptorTable, TableImage, TableLoader};
use crate::pic::PICS;
use crate::port::{HardwarePorts, PortIo};
use crate::scancodes::KEYBOARD_MAP;
use crate::vga_buffer::CONSOLE;

/// Hardware interrupt numbers (after remapping)
#[derive(Debug, Clone, Copy)]
#[repr(u8)]
pub enum InterruptIndex {
    Keyboard = PIC_1_OFFSET + 1,
}

impl InterruptIndex {
    pub fn as_u8(self) -> u8 {
        self as u8
    }
}

/// Backing storage of the live IDT. Written once by [`init_idt`].
pub static IDT: Once<TableImage> = Once::new();

/// The table this kernel runs with: one gate for the keyboard vector.
pub fn descriptor_table(keyboard_entry: u64) -> DescriptorTable {
    let mut table = DescriptorTable::new();
    table.set_handler(InterruptIndex::Keyboard.as_u8(), keyboard_entry);
    table
}

/// Address of the keyboard entry trampoline, as stored in its gate.
pub fn keyboard_entry() -> u64 {
    keyboard_interrupt_handler as *const () as usize as u64
}

/// Build the IDT into `slot` and load it into the CPU.
pub fn init_idt<L: TableLoader>(slot: &'static Once<TableImage>, loader: &mut L) -> &'static TableImage {
    let table = descriptor_table(keyboard_entry());
    idt::install(&table, slot, loader)
}

/// Remap both PICs with every line masked.
pub fn init_pics<P: PortIo>(ports: &mut P) {
    PICS.initialize(ports);
}

/// Open IRQ1, leaving every other primary line masked.
pub fn enable_keyboard<P: PortIo>(ports: &mut P) {
    use crate::constants::keyboard::IRQ_LINE;

    PICS.unmask_only(ports, IRQ_LINE);
}

// Hardware interrupt handlers
extern "x86-interrupt" fn keyboard_interrupt_handler(_stack_frame: InterruptStackFrame) {
    // Foreground code only takes this lock with interrupts disabled.
    let mut console = CONSOLE.lock();
    crate::keyboard::handle_interrupt(&mut HardwarePorts, &PICS, &mut console, &KEYBOARD_MAP);
}
