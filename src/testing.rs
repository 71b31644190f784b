//! Host-side fixtures shared by the unit tests.

use std::collections::VecDeque;

use crate::port::PortIo;
use crate::vga_buffer::{Buffer, Console};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortOp {
    Read(u16),
    Write(u16, u8),
}

/// Records every port access and answers reads from a per-port script.
#[derive(Default)]
pub struct RecordingPorts {
    pub ops: Vec<PortOp>,
    replies: Vec<(u16, VecDeque<u8>)>,
}

impl RecordingPorts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `value` as the next byte returned when `port` is read.
    pub fn reply(&mut self, port: u16, value: u8) -> &mut Self {
        match self.replies.iter_mut().find(|(p, _)| *p == port) {
            Some((_, queue)) => queue.push_back(value),
            None => self.replies.push((port, VecDeque::from(vec![value]))),
        }
        self
    }

    pub fn writes(&self) -> Vec<(u16, u8)> {
        self.ops
            .iter()
            .filter_map(|op| match *op {
                PortOp::Write(port, value) => Some((port, value)),
                PortOp::Read(_) => None,
            })
            .collect()
    }
}

impl PortIo for RecordingPorts {
    fn read(&mut self, port: u16) -> u8 {
        self.ops.push(PortOp::Read(port));
        self.replies
            .iter_mut()
            .find(|(p, _)| *p == port)
            .and_then(|(_, queue)| queue.pop_front())
            .unwrap_or(0)
    }

    fn write(&mut self, port: u16, value: u8) {
        self.ops.push(PortOp::Write(port, value));
    }
}

/// A zeroed video buffer on the heap, leaked so it can stand in for the
/// `'static` VGA region.
pub fn leaked_buffer() -> &'static mut Buffer {
    let bytes = vec![0u8; core::mem::size_of::<Buffer>()].into_boxed_slice();
    let ptr = Box::leak(bytes).as_mut_ptr();
    // Buffer is a plain array of byte pairs, so any byte pattern is valid.
    unsafe { &mut *(ptr as *mut Buffer) }
}

pub fn test_console() -> Console {
    Console::new(leaked_buffer())
}
