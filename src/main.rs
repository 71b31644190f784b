#![no_std]
#![no_main]

use core::panic::PanicInfo;
use echos::vga_buffer::{self, CONSOLE};
use echos::{gdt, kernel, serial};
use log::LevelFilter;

#[panic_handler]
fn panic(info: &PanicInfo) -> ! {
    log::error!("{}", info);
    // The panic may have hit while the keyboard handler held the console.
    vga_buffer::try_print(&CONSOLE, format_args!("{}\n", info));
    kernel::hlt_loop()
}

#[no_mangle]
pub extern "C" fn _start() -> ! {
    serial::init(LevelFilter::Debug);
    log::info!("echos starting");

    // Kernel code segment at the selector the IDT gates use
    gdt::init();

    kernel::run()
}
