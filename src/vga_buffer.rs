use core::fmt;
use volatile::Volatile;
use spin::Mutex;
use lazy_static::lazy_static;
use crate::constants::vga::{
    BUFFER_ADDR, BUFFER_HEIGHT, BUFFER_WIDTH, NORMAL_ATTRIBUTE, PLACEHOLDER_GLYPH,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(transparent)]
pub struct ColorCode(u8);

impl ColorCode {
    pub const fn normal() -> ColorCode {
        ColorCode(NORMAL_ATTRIBUTE)
    }
}

/// One character cell of the text display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(C)]
pub struct ScreenChar {
    pub ascii_character: u8,
    pub color_code: ColorCode,
}

impl ScreenChar {
    pub const fn blank() -> ScreenChar {
        ScreenChar {
            ascii_character: b' ',
            color_code: ColorCode::normal(),
        }
    }
}

#[repr(transparent)]
pub struct Buffer {
    chars: [[Volatile<ScreenChar>; BUFFER_WIDTH]; BUFFER_HEIGHT],
}

/// Cursor position. `column` runs from 0 to `BUFFER_WIDTH`; `line` only
/// ever grows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cursor {
    pub column: usize,
    pub line: usize,
}

/// The text console: cursor state plus the video buffer it draws into.
pub struct Console {
    cursor: Cursor,
    color_code: ColorCode,
    buffer: &'static mut Buffer,
}

impl Console {
    pub fn new(buffer: &'static mut Buffer) -> Console {
        Console {
            cursor: Cursor::default(),
            color_code: ColorCode::normal(),
            buffer,
        }
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// Read back a cell, `None` when it lies outside the visible screen.
    pub fn cell(&self, line: usize, column: usize) -> Option<ScreenChar> {
        self.buffer
            .chars
            .get(line)
            .and_then(|row| row.get(column))
            .map(|cell| cell.read())
    }

    /// Fill the whole screen with blanks. The cursor is left where it is.
    pub fn clear(&mut self) {
        for line in 0..BUFFER_HEIGHT {
            self.clear_line(line);
        }
    }

    fn clear_line(&mut self, line: usize) {
        let blank = ScreenChar {
            ascii_character: b' ',
            color_code: self.color_code,
        };
        for column in 0..BUFFER_WIDTH {
            self.buffer.chars[line][column].write(blank);
        }
    }

    pub fn new_line(&mut self) {
        self.cursor.line += 1;
        self.cursor.column = 0;
    }

    pub fn write_char(&mut self, byte: u8) {
        match byte {
            b'\n' => self.new_line(),
            _ => {
                if self.cursor.column >= BUFFER_WIDTH {
                    self.new_line();
                }
                self.put(byte);
                self.cursor.column += 1;
            }
        }
    }

    fn put(&mut self, byte: u8) {
        let Cursor { line, column } = self.cursor;
        let screen_char = ScreenChar {
            ascii_character: byte,
            color_code: self.color_code,
        };
        match self.buffer.chars.get_mut(line) {
            Some(row) => row[column].write(screen_char),
            None => log::warn!(
                "console line {} is past the last screen line, dropping {:#04x}",
                line,
                byte
            ),
        }
    }

    /// Write every byte of `s`, substituting a placeholder for anything that
    /// is neither printable ASCII nor a newline.
    pub fn write_string(&mut self, s: &str) {
        self.write_bytes(s.as_bytes());
    }

    pub fn write_bytes(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            match byte {
                0x20..=0x7e | b'\n' => self.write_char(byte),
                _ => self.write_char(PLACEHOLDER_GLYPH),
            }
        }
    }
}

lazy_static! {
    pub static ref CONSOLE: Mutex<Console> = Mutex::new(Console::new(
        unsafe { &mut *(BUFFER_ADDR as *mut Buffer) },
    ));
}

impl fmt::Write for Console {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.write_string(s);
        Ok(())
    }
}

#[macro_export]
macro_rules! print {
    ($($arg:tt)*) => ($crate::vga_buffer::_print(format_args!($($arg)*)));
}

#[macro_export]
macro_rules! println {
    () => ($crate::print!("\n"));
    ($($arg:tt)*) => ($crate::print!("{}\n", format_args!($($arg)*)));
}

/// Write to `console` only if nobody holds it. Used on the panic path, where
/// the lock may belong to the interrupted code.
pub fn try_print(console: &Mutex<Console>, args: fmt::Arguments) -> bool {
    use core::fmt::Write;

    match console.try_lock() {
        Some(mut console) => console.write_fmt(args).is_ok(),
        None => false,
    }
}

#[doc(hidden)]
pub fn _print(args: fmt::Arguments) {
    use core::fmt::Write;
    use x86_64::instructions::interrupts;

    // The keyboard interrupt takes the same lock.
    interrupts::without_interrupts(|| {
        let _ = CONSOLE.lock().write_fmt(args);
    });
}
