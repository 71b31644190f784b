//! Construction and loading of the interrupt descriptor table.
//!
//! The table is described as 256 [`Entry`] values and turned into the
//! hardware image in one go. The image is published through a
//! [`spin::Once`] and only then handed to `lidt`, so the CPU can never see a
//! half-built table.

use core::mem::size_of;

use spin::Once;
use x86_64::instructions::tables::lidt;
use x86_64::structures::DescriptorTablePointer;
use x86_64::VirtAddr;

use crate::constants::gdt::KERNEL_CODE_SELECTOR;
use crate::constants::interrupts::{IDT_SIZE, INTERRUPT_GATE};

/// Hardware layout of one long-mode gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(C)]
pub struct GateDescriptor {
    pub offset_low: u16,
    pub selector: u16,
    pub reserved: u8,
    pub type_attributes: u8,
    /// bits 16..32 of the handler address
    pub offset_high: u16,
    /// bits 32..64 of the handler address
    pub offset_upper: u32,
    pub reserved_high: u32,
}

impl GateDescriptor {
    /// An all-zero gate. The present bit is clear, so the CPU treats the
    /// vector as having no handler.
    pub const fn missing() -> GateDescriptor {
        GateDescriptor {
            offset_low: 0,
            selector: 0,
            reserved: 0,
            type_attributes: 0,
            offset_high: 0,
            offset_upper: 0,
            reserved_high: 0,
        }
    }

    /// A present ring-0 interrupt gate into the kernel code segment.
    pub const fn interrupt_gate(handler: u64) -> GateDescriptor {
        GateDescriptor {
            offset_low: (handler & 0xffff) as u16,
            selector: KERNEL_CODE_SELECTOR,
            reserved: 0,
            type_attributes: INTERRUPT_GATE,
            offset_high: ((handler >> 16) & 0xffff) as u16,
            offset_upper: (handler >> 32) as u32,
            reserved_high: 0,
        }
    }

    pub fn handler_address(&self) -> u64 {
        u64::from(self.offset_low)
            | u64::from(self.offset_high) << 16
            | u64::from(self.offset_upper) << 32
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entry {
    Unhandled,
    Gate(GateDescriptor),
}

/// Logical view of the table: which vectors have a handler.
pub struct DescriptorTable {
    entries: [Entry; IDT_SIZE],
}

impl DescriptorTable {
    pub const fn new() -> DescriptorTable {
        DescriptorTable {
            entries: [Entry::Unhandled; IDT_SIZE],
        }
    }

    pub fn set_handler(&mut self, vector: u8, handler: u64) {
        self.entries[usize::from(vector)] = Entry::Gate(GateDescriptor::interrupt_gate(handler));
    }

    pub fn entry(&self, vector: u8) -> &Entry {
        &self.entries[usize::from(vector)]
    }

    /// Encode every entry into the layout the CPU reads.
    pub fn image(&self) -> TableImage {
        let mut gates = [GateDescriptor::missing(); IDT_SIZE];
        for (gate, entry) in gates.iter_mut().zip(self.entries.iter()) {
            if let Entry::Gate(descriptor) = entry {
                *gate = *descriptor;
            }
        }
        TableImage { gates }
    }
}

impl Default for DescriptorTable {
    fn default() -> Self {
        Self::new()
    }
}

/// The table exactly as the CPU reads it.
#[repr(C, align(16))]
pub struct TableImage {
    gates: [GateDescriptor; IDT_SIZE],
}

impl TableImage {
    pub fn gate(&self, vector: u8) -> &GateDescriptor {
        &self.gates[usize::from(vector)]
    }
}

/// Operand of `lidt`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TablePointer {
    /// Offset of the last valid byte of the table
    pub limit: u16,
    pub base: u64,
}

impl TablePointer {
    /// `limit` is the table size minus one, not the size itself: `lidt`
    /// takes the offset of the last valid byte.
    pub fn for_image(image: &TableImage) -> TablePointer {
        TablePointer {
            limit: (size_of::<TableImage>() - 1) as u16,
            base: image as *const TableImage as u64,
        }
    }
}

/// Makes a table active on the CPU.
pub trait TableLoader {
    /// # Safety
    ///
    /// `pointer` must describe a complete table that stays valid for as long
    /// as interrupts can be delivered.
    unsafe fn load(&mut self, pointer: &TablePointer);
}

/// Loads through the `lidt` instruction.
pub struct Lidt;

impl TableLoader for Lidt {
    unsafe fn load(&mut self, pointer: &TablePointer) {
        let pointer = DescriptorTablePointer {
            limit: pointer.limit,
            base: VirtAddr::new(pointer.base),
        };
        lidt(&pointer);
    }
}

/// Encode `table` into `slot` and load it. Only the first call builds and
/// loads anything; later calls return the image that is already live.
pub fn install<L: TableLoader>(
    table: &DescriptorTable,
    slot: &'static Once<TableImage>,
    loader: &mut L,
) -> &'static TableImage {
    if let Some(image) = slot.get() {
        log::warn!("IDT already installed, ignoring second install");
        return image;
    }

    let image = slot.call_once(|| table.image());
    let pointer = TablePointer::for_image(image);
    // The image lives in a static that is never written again.
    unsafe { loader.load(&pointer) };
    log::debug!(
        "IDT loaded: base {:#x}, limit {:#x}",
        pointer.base,
        pointer.limit
    );
    image
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEYBOARD_VECTOR: u8 = 0x21;
    const HANDLER: u64 = 0x1234_5678_9abc_def0;

    #[derive(Default)]
    struct RecordingLoader {
        loads: Vec<TablePointer>,
    }

    impl TableLoader for RecordingLoader {
        unsafe fn load(&mut self, pointer: &TablePointer) {
            self.loads.push(*pointer);
        }
    }

    fn fresh_slot() -> &'static Once<TableImage> {
        Box::leak(Box::new(Once::new()))
    }

    #[test]
    fn gate_splits_handler_address() {
        let gate = GateDescriptor::interrupt_gate(HANDLER);
        assert_eq!(gate.offset_low, 0xdef0);
        assert_eq!(gate.offset_high, 0x9abc);
        assert_eq!(gate.offset_upper, 0x1234_5678);
        assert_eq!(gate.selector, 0x08);
        assert_eq!(gate.reserved, 0);
        assert_eq!(gate.type_attributes, 0x8e);
        assert_eq!(gate.handler_address(), HANDLER);
    }

    #[test]
    fn gate_has_hardware_byte_layout() {
        assert_eq!(size_of::<GateDescriptor>(), 16);

        let gate = GateDescriptor::interrupt_gate(0x0000_0000_0010_2030);
        let bytes = unsafe {
            core::slice::from_raw_parts(&gate as *const GateDescriptor as *const u8, 16)
        };
        assert_eq!(
            bytes,
            &[0x30, 0x20, 0x08, 0x00, 0x00, 0x8e, 0x10, 0x00, 0, 0, 0, 0, 0, 0, 0, 0]
        );
    }

    #[test]
    fn only_the_populated_vector_is_a_gate() {
        let mut table = DescriptorTable::new();
        table.set_handler(KEYBOARD_VECTOR, HANDLER);

        for vector in 0..=255u8 {
            match table.entry(vector) {
                Entry::Gate(gate) => {
                    assert_eq!(vector, KEYBOARD_VECTOR);
                    assert_eq!(gate.handler_address(), HANDLER);
                }
                Entry::Unhandled => assert_ne!(vector, KEYBOARD_VECTOR),
            }
        }
    }

    #[test]
    fn unhandled_entries_encode_as_missing_gates() {
        let mut table = DescriptorTable::new();
        table.set_handler(KEYBOARD_VECTOR, HANDLER);
        let image = table.image();

        assert_eq!(*image.gate(KEYBOARD_VECTOR), GateDescriptor::interrupt_gate(HANDLER));
        assert_eq!(*image.gate(0x20), GateDescriptor::missing());
        assert_eq!(*image.gate(0xff), GateDescriptor::missing());
    }

    #[test]
    fn pointer_covers_whole_table() {
        let image = DescriptorTable::new().image();
        let pointer = TablePointer::for_image(&image);
        assert_eq!(pointer.limit, 256 * 16 - 1);
        assert_eq!(pointer.base, &image as *const TableImage as u64);
    }

    #[test]
    fn install_loads_the_built_image_once() {
        let mut table = DescriptorTable::new();
        table.set_handler(KEYBOARD_VECTOR, HANDLER);
        let slot = fresh_slot();
        let mut loader = RecordingLoader::default();

        let image = install(&table, slot, &mut loader);

        assert_eq!(loader.loads, vec![TablePointer::for_image(image)]);
        assert_eq!(image.gate(KEYBOARD_VECTOR).handler_address(), HANDLER);
    }

    #[test]
    fn second_install_is_ignored() {
        let mut first = DescriptorTable::new();
        first.set_handler(KEYBOARD_VECTOR, HANDLER);
        let mut second = DescriptorTable::new();
        second.set_handler(KEYBOARD_VECTOR, 0xdead);
        let slot = fresh_slot();
        let mut loader = RecordingLoader::default();

        let a = install(&first, slot, &mut loader);
        let b = install(&second, slot, &mut loader);

        assert!(core::ptr::eq(a, b));
        assert_eq!(loader.loads.len(), 1);
        assert_eq!(b.gate(KEYBOARD_VECTOR).handler_address(), HANDLER);
    }
}
