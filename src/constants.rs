/// System-wide constants to avoid magic numbers

/// VGA text mode constants
pub mod vga {
    /// VGA text buffer physical address
    pub const BUFFER_ADDR: usize = 0xb8000;

    /// VGA text mode dimensions
    pub const BUFFER_HEIGHT: usize = 25;
    pub const BUFFER_WIDTH: usize = 80;

    /// Each cell is a character byte followed by an attribute byte
    pub const BYTES_PER_CELL: usize = 2;

    /// Light grey on black
    pub const NORMAL_ATTRIBUTE: u8 = 0x07;

    /// Glyph written in place of bytes that are not printable ASCII
    pub const PLACEHOLDER_GLYPH: u8 = 0xfe;
}

/// PS/2 Keyboard controller constants
pub mod keyboard {
    /// PS/2 keyboard data port
    pub const DATA_PORT: u16 = 0x60;

    /// PS/2 keyboard status/command port
    pub const STATUS_COMMAND_PORT: u16 = 0x64;

    /// Status register bit flags
    pub const STATUS_OUTPUT_BUFFER_FULL: u8 = 0x01;

    /// Set 1 scan codes with this bit set are key releases
    pub const RELEASE_BIT: u8 = 0x80;

    pub const ENTER_KEY_CODE: u8 = 0x1c;

    /// IRQ line of the keyboard on the primary controller
    pub const IRQ_LINE: u8 = 1;
}

/// 8259 PIC ports and initialization words
pub mod pic {
    pub const PRIMARY_COMMAND: u16 = 0x20;
    pub const PRIMARY_DATA: u16 = 0x21;
    pub const SECONDARY_COMMAND: u16 = 0xa0;
    pub const SECONDARY_DATA: u16 = 0xa1;

    /// ICW1: edge triggered, cascade mode, ICW4 follows
    pub const ICW1_INIT: u8 = 0x11;
    /// ICW3: cascade wiring, left unwired on both controllers
    pub const ICW3_PRIMARY: u8 = 0x00;
    pub const ICW3_SECONDARY: u8 = 0x00;
    /// ICW4: 8086/88 mode
    pub const ICW4_8086: u8 = 0x01;

    pub const MASK_ALL: u8 = 0xff;
    pub const END_OF_INTERRUPT: u8 = 0x20;
}

/// Interrupt constants
pub mod interrupts {
    /// PIC (Programmable Interrupt Controller) offset
    /// We remap PIC interrupts to start at 32 to avoid conflicts with CPU exceptions
    pub const PIC_1_OFFSET: u8 = 32;
    pub const PIC_2_OFFSET: u8 = PIC_1_OFFSET + 8;

    /// Number of entries in the interrupt descriptor table
    pub const IDT_SIZE: usize = 256;

    /// Present, ring 0, interrupt gate
    pub const INTERRUPT_GATE: u8 = 0x8e;
}

/// Segment constants
pub mod gdt {
    /// Selector of the kernel code segment (GDT index 1, ring 0)
    pub const KERNEL_CODE_SELECTOR: u16 = 0x08;
}

/// Serial logging constants
pub mod serial {
    /// COM1
    pub const COM1_BASE: u16 = 0x3f8;
}
