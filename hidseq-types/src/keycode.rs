use serde::{Deserialize, Serialize};
use strum::FromRepr;

use crate::modifier::HidModifiers;

/// Usage codes of the HID keyboard/keypad page (0x07).
///
/// Only the keys a keyboard report can carry are listed: the boot keyboard
/// range up to `Application` and the eight modifiers.
#[repr(u8)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize, PartialOrd, Ord, FromRepr)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HidKeyCode {
    /// Reserved, no-key.
    No = 0x00,
    /// Keyboard roll over error, too many keys are pressed simultaneously, not a physical key.
    /// NKRO: n-key rollover.
    ErrorRollover = 0x01,
    /// Keyboard post fail error, not a physical key.
    PostFail = 0x02,
    /// An undefined error, not a physical key.
    ErrorUndefined = 0x03,
    /// `a` and `A`
    A = 0x04,
    /// `b` and `B`
    B = 0x05,
    /// `c` and `C`
    C = 0x06,
    /// `d` and `D`
    D = 0x07,
    /// `e` and `E`
    E = 0x08,
    /// `f` and `F`
    F = 0x09,
    /// `g` and `G`
    G = 0x0A,
    /// `h` and `H`
    H = 0x0B,
    /// `i` and `I`
    I = 0x0C,
    /// `j` and `J`
    J = 0x0D,
    /// `k` and `K`
    K = 0x0E,
    /// `l` and `L`
    L = 0x0F,
    /// `m` and `M`
    M = 0x10,
    /// `n` and `N`
    N = 0x11,
    /// `o` and `O`
    O = 0x12,
    /// `p` and `P`
    P = 0x13,
    /// `q` and `Q`
    Q = 0x14,
    /// `r` and `R`
    R = 0x15,
    /// `s` and `S`
    S = 0x16,
    /// `t` and `T`
    T = 0x17,
    /// `u` and `U`
    U = 0x18,
    /// `v` and `V`
    V = 0x19,
    /// `w` and `W`
    W = 0x1A,
    /// `x` and `X`
    X = 0x1B,
    /// `y` and `Y`
    Y = 0x1C,
    /// `z` and `Z`
    Z = 0x1D,
    /// `1` and `!`
    Kc1 = 0x1E,
    /// `2` and `@`
    Kc2 = 0x1F,
    /// `3` and `#`
    Kc3 = 0x20,
    /// `4` and `$`
    Kc4 = 0x21,
    /// `5` and `%`
    Kc5 = 0x22,
    /// `6` and `^`
    Kc6 = 0x23,
    /// `7` and `&`
    Kc7 = 0x24,
    /// `8` and `*`
    Kc8 = 0x25,
    /// `9` and `(`
    Kc9 = 0x26,
    /// `0` and `)`
    Kc0 = 0x27,
    /// `Enter`
    Enter = 0x28,
    /// `Esc`
    Escape = 0x29,
    /// `Backspace`
    Backspace = 0x2A,
    /// `Tab`
    Tab = 0x2B,
    /// `Space`
    Space = 0x2C,
    /// `-` and `_`
    Minus = 0x2D,
    /// `=` and `+`
    Equal = 0x2E,
    /// `[` and `{`
    LeftBracket = 0x2F,
    /// `]` and `}`
    RightBracket = 0x30,
    /// `\` and `|`
    Backslash = 0x31,
    /// Non-US `#` and `~`
    NonusHash = 0x32,
    /// `;` and `:`
    Semicolon = 0x33,
    /// `'` and `"`
    Quote = 0x34,
    /// `~` and `\``
    Grave = 0x35,
    /// `,` and `<`
    Comma = 0x36,
    /// `.` and `>`
    Dot = 0x37,
    /// `/` and `?`
    Slash = 0x38,
    /// `CapsLock`
    CapsLock = 0x39,
    /// `F1`
    F1 = 0x3A,
    /// `F2`
    F2 = 0x3B,
    /// `F3`
    F3 = 0x3C,
    /// `F4`
    F4 = 0x3D,
    /// `F5`
    F5 = 0x3E,
    /// `F6`
    F6 = 0x3F,
    /// `F7`
    F7 = 0x40,
    /// `F8`
    F8 = 0x41,
    /// `F9`
    F9 = 0x42,
    /// `F10`
    F10 = 0x43,
    /// `F11`
    F11 = 0x44,
    /// `F12`
    F12 = 0x45,
    /// Print Screen
    PrintScreen = 0x46,
    /// Scroll Lock
    ScrollLock = 0x47,
    /// Pause
    Pause = 0x48,
    /// Insert
    Insert = 0x49,
    /// Home
    Home = 0x4A,
    /// Page Up
    PageUp = 0x4B,
    /// Delete
    Delete = 0x4C,
    /// End
    End = 0x4D,
    /// Page Down
    PageDown = 0x4E,
    /// Right arrow
    Right = 0x4F,
    /// Left arrow
    Left = 0x50,
    /// Down arrow
    Down = 0x51,
    /// Up arrow
    Up = 0x52,
    /// Nums Lock
    NumLock = 0x53,
    /// `/` on keypad
    KpSlash = 0x54,
    /// `*` on keypad
    KpAsterisk = 0x55,
    /// `-` on keypad
    KpMinus = 0x56,
    /// `+` on keypad
    KpPlus = 0x57,
    /// `Enter` on keypad
    KpEnter = 0x58,
    /// `1` on keypad
    Kp1 = 0x59,
    /// `2` on keypad
    Kp2 = 0x5A,
    /// `3` on keypad
    Kp3 = 0x5B,
    /// `4` on keypad
    Kp4 = 0x5C,
    /// `5` on keypad
    Kp5 = 0x5D,
    /// `6` on keypad
    Kp6 = 0x5E,
    /// `7` on keypad
    Kp7 = 0x5F,
    /// `8` on keypad
    Kp8 = 0x60,
    /// `9` on keypad
    Kp9 = 0x61,
    /// `0` on keypad
    Kp0 = 0x62,
    /// `.` on keypad
    KpDot = 0x63,
    /// Non-US `\` or `|`
    NonusBackslash = 0x64,
    /// `Application`
    Application = 0x65,
    /// Left Control
    LCtrl = 0xE0,
    /// Left Shift
    LShift = 0xE1,
    /// Left Alt
    LAlt = 0xE2,
    /// Left GUI, the Super/Windows/Command key
    LGui = 0xE3,
    /// Right Control
    RCtrl = 0xE4,
    /// Right Shift
    RShift = 0xE5,
    /// Right Alt
    RAlt = 0xE6,
    /// Right GUI
    RGui = 0xE7,
}

impl HidKeyCode {
    /// Returns `true` if the keycode is a modifier keycode
    pub const fn is_modifier(self) -> bool {
        self as u8 >= HidKeyCode::LCtrl as u8 && self as u8 <= HidKeyCode::RGui as u8
    }

    /// Returns `true` for the reserved and error codes, which never go into a report slot
    pub const fn is_reserved(self) -> bool {
        self as u8 <= HidKeyCode::ErrorUndefined as u8
    }

    /// Returns the modifier bit of this keycode, empty for non-modifier keys.
    pub fn to_hid_modifiers(self) -> HidModifiers {
        match self {
            HidKeyCode::LCtrl => HidModifiers::new().with_left_ctrl(true),
            HidKeyCode::LShift => HidModifiers::new().with_left_shift(true),
            HidKeyCode::LAlt => HidModifiers::new().with_left_alt(true),
            HidKeyCode::LGui => HidModifiers::new().with_left_gui(true),
            HidKeyCode::RCtrl => HidModifiers::new().with_right_ctrl(true),
            HidKeyCode::RShift => HidModifiers::new().with_right_shift(true),
            HidKeyCode::RAlt => HidModifiers::new().with_right_alt(true),
            HidKeyCode::RGui => HidModifiers::new().with_right_gui(true),
            _ => HidModifiers::new(),
        }
    }
}

/// A key as macros name it: either a printable character, typed the way an
/// en-US layout produces it, or a named HID key.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum KeyCode {
    /// A printable character. Shift is applied by the device when the character needs it.
    Char(char),
    /// A named key from the HID keyboard page
    Hid(HidKeyCode),
}

impl KeyCode {
    pub const RETURN: KeyCode = KeyCode::Hid(HidKeyCode::Enter);
    pub const ESCAPE: KeyCode = KeyCode::Hid(HidKeyCode::Escape);
    pub const TAB: KeyCode = KeyCode::Hid(HidKeyCode::Tab);
    pub const SPACE: KeyCode = KeyCode::Hid(HidKeyCode::Space);
    pub const F4: KeyCode = KeyCode::Hid(HidKeyCode::F4);
    pub const LEFT_CTRL: KeyCode = KeyCode::Hid(HidKeyCode::LCtrl);
    pub const LEFT_SHIFT: KeyCode = KeyCode::Hid(HidKeyCode::LShift);
    pub const LEFT_ALT: KeyCode = KeyCode::Hid(HidKeyCode::LAlt);
    pub const LEFT_GUI: KeyCode = KeyCode::Hid(HidKeyCode::LGui);

    /// Resolve the key into its HID usage code and whether Shift must be held with it.
    ///
    /// Returns `None` for characters the en-US layout cannot type.
    pub fn resolve(self) -> Option<(HidKeyCode, bool)> {
        match self {
            KeyCode::Hid(k) => Some((k, false)),
            KeyCode::Char(c) if c.is_ascii() => from_ascii(c as u8),
            KeyCode::Char(_) => None,
        }
    }

    /// Returns `true` if the key is one of the eight modifiers
    pub fn is_modifier(self) -> bool {
        matches!(self, KeyCode::Hid(k) if k.is_modifier())
    }
}

impl From<char> for KeyCode {
    fn from(c: char) -> Self {
        KeyCode::Char(c)
    }
}

impl From<HidKeyCode> for KeyCode {
    fn from(k: HidKeyCode) -> Self {
        KeyCode::Hid(k)
    }
}

/// Convert an ascii char to keycode, the bool is `true` when Shift is needed.
///
/// Assumes en-us keyboard mapping.
pub fn from_ascii(ascii: u8) -> Option<(HidKeyCode, bool)> {
    let mapped = match ascii {
        b'a'..=b'z' => (letter(ascii - b'a')?, false),
        b'A'..=b'Z' => (letter(ascii - b'A')?, true),
        b'1'..=b'9' => (HidKeyCode::from_repr(HidKeyCode::Kc1 as u8 + (ascii - b'1'))?, false),
        b'0' => (HidKeyCode::Kc0, false),
        b'!' => (HidKeyCode::Kc1, true),
        b'@' => (HidKeyCode::Kc2, true),
        b'#' => (HidKeyCode::Kc3, true),
        b'$' => (HidKeyCode::Kc4, true),
        b'%' => (HidKeyCode::Kc5, true),
        b'^' => (HidKeyCode::Kc6, true),
        b'&' => (HidKeyCode::Kc7, true),
        b'*' => (HidKeyCode::Kc8, true),
        b'(' => (HidKeyCode::Kc9, true),
        b')' => (HidKeyCode::Kc0, true),
        b'-' => (HidKeyCode::Minus, false),
        b'_' => (HidKeyCode::Minus, true),
        b'=' => (HidKeyCode::Equal, false),
        b'+' => (HidKeyCode::Equal, true),
        b'[' => (HidKeyCode::LeftBracket, false),
        b'{' => (HidKeyCode::LeftBracket, true),
        b']' => (HidKeyCode::RightBracket, false),
        b'}' => (HidKeyCode::RightBracket, true),
        b'\\' => (HidKeyCode::Backslash, false),
        b'|' => (HidKeyCode::Backslash, true),
        b';' => (HidKeyCode::Semicolon, false),
        b':' => (HidKeyCode::Semicolon, true),
        b'\'' => (HidKeyCode::Quote, false),
        b'"' => (HidKeyCode::Quote, true),
        b'`' => (HidKeyCode::Grave, false),
        b'~' => (HidKeyCode::Grave, true),
        b',' => (HidKeyCode::Comma, false),
        b'<' => (HidKeyCode::Comma, true),
        b'.' => (HidKeyCode::Dot, false),
        b'>' => (HidKeyCode::Dot, true),
        b'/' => (HidKeyCode::Slash, false),
        b'?' => (HidKeyCode::Slash, true),
        b' ' => (HidKeyCode::Space, false),
        b'\n' => (HidKeyCode::Enter, false),
        b'\t' => (HidKeyCode::Tab, false),
        b'\x08' => (HidKeyCode::Backspace, false),
        b'\x1B' => (HidKeyCode::Escape, false),
        b'\x7F' => (HidKeyCode::Delete, false),
        _ => return None,
    };
    Some(mapped)
}

fn letter(offset: u8) -> Option<HidKeyCode> {
    HidKeyCode::from_repr(HidKeyCode::A as u8 + offset)
}
