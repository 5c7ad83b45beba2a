// src/keys.rs

//! Keyboard symbols, actions and modifier bits as delivered to the key
//! callback, with decoding from the native key-event integers.

use crate::ffi;
use bitflags::bitflags;
use libc::c_int;
use serde::{Deserialize, Serialize};

bitflags! {
    /// Modifier bits attached to a key event.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct Modifiers: u8 {
        const SHIFT = 1 << 0;
        const CONTROL = 1 << 1;
        const ALT = 1 << 2;
        const SUPER = 1 << 3;
    }
}

impl Modifiers {
    /// Decodes the native modifier bitmask. Unknown bits are ignored.
    pub fn from_native(mods: c_int) -> Self {
        let mut modifiers = Modifiers::empty();
        if (mods & ffi::MOD_SHIFT) != 0 {
            modifiers.insert(Modifiers::SHIFT);
        }
        if (mods & ffi::MOD_CONTROL) != 0 {
            modifiers.insert(Modifiers::CONTROL);
        }
        if (mods & ffi::MOD_ALT) != 0 {
            modifiers.insert(Modifiers::ALT);
        }
        if (mods & ffi::MOD_SUPER) != 0 {
            modifiers.insert(Modifiers::SUPER);
        }
        modifiers
    }
}

/// What happened to the key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyAction {
    Release,
    Press,
    Repeat,
}

impl KeyAction {
    pub fn from_native(action: c_int) -> Option<Self> {
        match action {
            ffi::RELEASE => Some(KeyAction::Release),
            ffi::PRESS => Some(KeyAction::Press),
            ffi::REPEAT => Some(KeyAction::Repeat),
            _ => None,
        }
    }
}

/// Physical key identity, independent of layout-produced text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Key {
    // Printable keys
    Space,
    Apostrophe,
    Comma,
    Minus,
    Period,
    Slash,
    Num0,
    Num1,
    Num2,
    Num3,
    Num4,
    Num5,
    Num6,
    Num7,
    Num8,
    Num9,
    Semicolon,
    Equal,
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
    I,
    J,
    K,
    L,
    M,
    N,
    O,
    P,
    Q,
    R,
    S,
    T,
    U,
    V,
    W,
    X,
    Y,
    Z,
    LeftBracket,
    Backslash,
    RightBracket,
    GraveAccent,
    World1,
    World2,

    // Function keys
    Escape,
    Enter,
    Tab,
    Backspace,
    Insert,
    Delete,
    Right,
    Left,
    Down,
    Up,
    PageUp,
    PageDown,
    Home,
    End,
    CapsLock,
    ScrollLock,
    NumLock,
    PrintScreen,
    Pause,
    F1,
    F2,
    F3,
    F4,
    F5,
    F6,
    F7,
    F8,
    F9,
    F10,
    F11,
    F12,
    F13,
    F14,
    F15,
    F16,
    F17,
    F18,
    F19,
    F20,
    F21,
    F22,
    F23,
    F24,
    F25,

    // Keypad
    Keypad0,
    Keypad1,
    Keypad2,
    Keypad3,
    Keypad4,
    Keypad5,
    Keypad6,
    Keypad7,
    Keypad8,
    Keypad9,
    KeypadDecimal,
    KeypadDivide,
    KeypadMultiply,
    KeypadSubtract,
    KeypadAdd,
    KeypadEnter,
    KeypadEqual,

    // Modifier keys
    LeftShift,
    LeftControl,
    LeftAlt,
    LeftSuper,
    RightShift,
    RightControl,
    RightAlt,
    RightSuper,
    Menu,

    /// Anything the native layer could not identify (including its own -1).
    #[default]
    Unknown,
}

impl Key {
    /// Decodes a native key code into its symbol.
    ///
    /// Codes outside the published table (and the native "unknown" value -1)
    /// map to [`Key::Unknown`] rather than being dropped, so callers still
    /// see the scancode alongside.
    pub fn from_native(code: c_int) -> Key {
        match code {
            32 => Key::Space,
            39 => Key::Apostrophe,
            44 => Key::Comma,
            45 => Key::Minus,
            46 => Key::Period,
            47 => Key::Slash,
            48 => Key::Num0,
            49 => Key::Num1,
            50 => Key::Num2,
            51 => Key::Num3,
            52 => Key::Num4,
            53 => Key::Num5,
            54 => Key::Num6,
            55 => Key::Num7,
            56 => Key::Num8,
            57 => Key::Num9,
            59 => Key::Semicolon,
            61 => Key::Equal,
            65 => Key::A,
            66 => Key::B,
            67 => Key::C,
            68 => Key::D,
            69 => Key::E,
            70 => Key::F,
            71 => Key::G,
            72 => Key::H,
            73 => Key::I,
            74 => Key::J,
            75 => Key::K,
            76 => Key::L,
            77 => Key::M,
            78 => Key::N,
            79 => Key::O,
            80 => Key::P,
            81 => Key::Q,
            82 => Key::R,
            83 => Key::S,
            84 => Key::T,
            85 => Key::U,
            86 => Key::V,
            87 => Key::W,
            88 => Key::X,
            89 => Key::Y,
            90 => Key::Z,
            91 => Key::LeftBracket,
            92 => Key::Backslash,
            93 => Key::RightBracket,
            96 => Key::GraveAccent,
            161 => Key::World1,
            162 => Key::World2,
            256 => Key::Escape,
            257 => Key::Enter,
            258 => Key::Tab,
            259 => Key::Backspace,
            260 => Key::Insert,
            261 => Key::Delete,
            262 => Key::Right,
            263 => Key::Left,
            264 => Key::Down,
            265 => Key::Up,
            266 => Key::PageUp,
            267 => Key::PageDown,
            268 => Key::Home,
            269 => Key::End,
            280 => Key::CapsLock,
            281 => Key::ScrollLock,
            282 => Key::NumLock,
            283 => Key::PrintScreen,
            284 => Key::Pause,
            290 => Key::F1,
            291 => Key::F2,
            292 => Key::F3,
            293 => Key::F4,
            294 => Key::F5,
            295 => Key::F6,
            296 => Key::F7,
            297 => Key::F8,
            298 => Key::F9,
            299 => Key::F10,
            300 => Key::F11,
            301 => Key::F12,
            302 => Key::F13,
            303 => Key::F14,
            304 => Key::F15,
            305 => Key::F16,
            306 => Key::F17,
            307 => Key::F18,
            308 => Key::F19,
            309 => Key::F20,
            310 => Key::F21,
            311 => Key::F22,
            312 => Key::F23,
            313 => Key::F24,
            314 => Key::F25,
            320 => Key::Keypad0,
            321 => Key::Keypad1,
            322 => Key::Keypad2,
            323 => Key::Keypad3,
            324 => Key::Keypad4,
            325 => Key::Keypad5,
            326 => Key::Keypad6,
            327 => Key::Keypad7,
            328 => Key::Keypad8,
            329 => Key::Keypad9,
            330 => Key::KeypadDecimal,
            331 => Key::KeypadDivide,
            332 => Key::KeypadMultiply,
            333 => Key::KeypadSubtract,
            334 => Key::KeypadAdd,
            335 => Key::KeypadEnter,
            336 => Key::KeypadEqual,
            340 => Key::LeftShift,
            341 => Key::LeftControl,
            342 => Key::LeftAlt,
            343 => Key::LeftSuper,
            344 => Key::RightShift,
            345 => Key::RightControl,
            346 => Key::RightAlt,
            347 => Key::RightSuper,
            348 => Key::Menu,
            _ => Key::Unknown,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn modifier_mask_decodes() {
        assert_eq!(Modifiers::from_native(0), Modifiers::empty());
        assert_eq!(Modifiers::from_native(0x0001), Modifiers::SHIFT);
        assert_eq!(
            Modifiers::from_native(0x0003),
            Modifiers::SHIFT | Modifiers::CONTROL
        );
        assert_eq!(Modifiers::from_native(0x0008), Modifiers::SUPER);
        // Unknown high bits are ignored.
        assert_eq!(Modifiers::from_native(0x0101), Modifiers::SHIFT);
    }

    #[test]
    fn key_actions_decode() {
        assert_eq!(KeyAction::from_native(0), Some(KeyAction::Release));
        assert_eq!(KeyAction::from_native(1), Some(KeyAction::Press));
        assert_eq!(KeyAction::from_native(2), Some(KeyAction::Repeat));
        assert_eq!(KeyAction::from_native(3), None);
    }

    #[test]
    fn printable_keys_decode() {
        assert_eq!(Key::from_native(32), Key::Space);
        assert_eq!(Key::from_native(65), Key::A);
        assert_eq!(Key::from_native(90), Key::Z);
        assert_eq!(Key::from_native(48), Key::Num0);
    }

    #[test]
    fn special_keys_decode() {
        assert_eq!(Key::from_native(256), Key::Escape);
        assert_eq!(Key::from_native(257), Key::Enter);
        assert_eq!(Key::from_native(290), Key::F1);
        assert_eq!(Key::from_native(314), Key::F25);
        assert_eq!(Key::from_native(348), Key::Menu);
    }

    #[test]
    fn unknown_codes_map_to_unknown() {
        assert_eq!(Key::from_native(-1), Key::Unknown);
        assert_eq!(Key::from_native(0), Key::Unknown);
        assert_eq!(Key::from_native(10_000), Key::Unknown);
    }
}
