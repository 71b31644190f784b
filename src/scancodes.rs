/// Scan code set 1 to ASCII, US layout, unshifted. Keys without a character
/// (modifiers, function keys, arrows) map to 0.
pub const KEYBOARD_MAP: [u8; 128] = {
    let mut map = [0u8; 128];
    let keys: &[(usize, u8)] = &[
        (0x01, 0x1b), // Escape
        (0x02, b'1'),
        (0x03, b'2'),
        (0x04, b'3'),
        (0x05, b'4'),
        (0x06, b'5'),
        (0x07, b'6'),
        (0x08, b'7'),
        (0x09, b'8'),
        (0x0a, b'9'),
        (0x0b, b'0'),
        (0x0c, b'-'),
        (0x0d, b'='),
        (0x0e, 0x08), // Backspace
        (0x0f, b'\t'),
        (0x10, b'q'),
        (0x11, b'w'),
        (0x12, b'e'),
        (0x13, b'r'),
        (0x14, b't'),
        (0x15, b'y'),
        (0x16, b'u'),
        (0x17, b'i'),
        (0x18, b'o'),
        (0x19, b'p'),
        (0x1a, b'['),
        (0x1b, b']'),
        (0x1c, b'\n'),
        (0x1e, b'a'),
        (0x1f, b's'),
        (0x20, b'd'),
        (0x21, b'f'),
        (0x22, b'g'),
        (0x23, b'h'),
        (0x24, b'j'),
        (0x25, b'k'),
        (0x26, b'l'),
        (0x27, b';'),
        (0x28, b'\''),
        (0x29, b'`'),
        (0x2b, b'\\'),
        (0x2c, b'z'),
        (0x2d, b'x'),
        (0x2e, b'c'),
        (0x2f, b'v'),
        (0x30, b'b'),
        (0x31, b'n'),
        (0x32, b'm'),
        (0x33, b','),
        (0x34, b'.'),
        (0x35, b'/'),
        (0x37, b'*'), // keypad
        (0x39, b' '),
        (0x4a, b'-'), // keypad
        (0x4e, b'+'), // keypad
    ];
    let mut i = 0;
    while i < keys.len() {
        map[keys[i].0] = keys[i].1;
        i += 1;
    }
    map
};

#[cfg(test)]
mod tests {
    use super::KEYBOARD_MAP;
    use pc_keyboard::{layouts, DecodedKey, HandleControl, Keyboard, ScancodeSet1};

    fn decode(scancode: u8) -> Option<char> {
        let mut keyboard = Keyboard::new(
            ScancodeSet1::new(),
            layouts::Us104Key,
            HandleControl::Ignore,
        );
        match keyboard.add_byte(scancode) {
            Ok(Some(event)) => match keyboard.process_keyevent(event) {
                Some(DecodedKey::Unicode(c)) => Some(c),
                _ => None,
            },
            _ => None,
        }
    }

    #[test]
    fn printable_entries_match_reference_decoder() {
        let printable = (0x02..=0x0d).chain(0x10..=0x1b).chain(0x1e..=0x29).chain(0x2b..=0x35);
        for scancode in printable.chain(core::iter::once(0x39)) {
            let expected = decode(scancode).map(|c| c as u8);
            assert_eq!(
                Some(KEYBOARD_MAP[usize::from(scancode)]),
                expected,
                "scancode {:#04x}",
                scancode
            );
        }
    }

    #[test]
    fn modifiers_and_function_keys_map_to_nothing() {
        // ctrl, left shift, right shift, alt, caps lock, F1..F10, F11, F12
        let silent = [0x1d, 0x2a, 0x36, 0x38, 0x3a, 0x3b, 0x44, 0x57, 0x58];
        for scancode in silent {
            assert_eq!(KEYBOARD_MAP[scancode], 0, "scancode {:#04x}", scancode);
        }
    }

    #[test]
    fn upper_half_is_empty() {
        assert!(KEYBOARD_MAP[0x59..].iter().all(|&b| b == 0));
    }
}
