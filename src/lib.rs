#![cfg_attr(not(test), no_std)]
#![feature(abi_x86_interrupt)]

pub mod constants;
pub mod port;
pub mod vga_buffer;
pub mod pic;
pub mod idt;
pub mod scancodes;
pub mod keyboard;
pub mod gdt;
pub mod serial;
pub mod interrupts;
pub mod kernel;

#[cfg(test)]
mod testing;
