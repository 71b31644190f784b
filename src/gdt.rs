use x86_64::structures::gdt::{Descriptor, GlobalDescriptorTable, SegmentSelector};
use lazy_static::lazy_static;
use crate::constants::gdt::KERNEL_CODE_SELECTOR;

lazy_static! {
    static ref GDT: (GlobalDescriptorTable, SegmentSelector) = {
        let mut gdt = GlobalDescriptorTable::new();
        // First entry after the null descriptor, so the selector is 0x08
        let code_selector = gdt.append(Descriptor::kernel_code_segment());
        (gdt, code_selector)
    };
}

/// Load a GDT whose kernel code segment sits at the selector the IDT gates
/// point to, and reload CS with it.
pub fn init() {
    use x86_64::instructions::segmentation::{Segment, CS};

    GDT.0.load();
    unsafe {
        CS::set_reg(GDT.1);
    }
    debug_assert_eq!(GDT.1.0, KERNEL_CODE_SELECTOR);
    log::debug!("GDT loaded, CS = {:#04x}", GDT.1.0);
}
