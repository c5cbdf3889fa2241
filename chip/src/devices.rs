use crate::{definitions::keyboard, framebuffer::Framebuffer};

#[cfg_attr(test, mockall::automock)]
/// The traits responsible for the presentation of the chipset
pub trait DisplayCommands {
    /// Will render the current state of the framebuffer
    fn refresh(&mut self, framebuffer: &Framebuffer);
    /// Will play a single beep
    fn beep(&mut self);
    /// Checks if the user asked for the emulation to stop
    fn close_requested(&mut self) -> bool;
}

#[cfg_attr(test, mockall::automock)]
/// The trait responsible for reading the keyboard data
pub trait KeyboardCommands {
    /// Returns the key code (`0x0` - `0xF`) that is currently pressed, if any.
    fn pressed_key(&self) -> Option<u8>;
}

/// Will store the last change to the given keybord
/// and represent the internal keyboard as well
///
/// Input is done with a hex keyboard that has 16 keys ranging `0-F`. The `8`, `4`, `6`, and
/// `2` keys are typically used for directional input. Three opcodes are used to detect input.
/// One skips an instruction if a specific key is pressed, while another does the same if a
/// specific key is not pressed. The third waits for a key press, and then stores it in one of
/// the data registers.
#[derive(Default, Debug, Clone)]
pub struct Keyboard {
    keys: [bool; keyboard::SIZE],
    /// the key that was pressed last and is still held down
    last: Option<u8>,
}

impl Keyboard {
    pub fn new() -> Self {
        Keyboard::default()
    }

    /// Flips the state of the given key, keys outside of `0x0` - `0xF` are ignored.
    pub fn toggle_key(&mut self, key: usize) {
        if let Some(&state) = self.keys.get(key) {
            self.set_key(key, !state)
        }
    }

    /// Presses or releases the given key, keys outside of `0x0` - `0xF` are ignored.
    pub fn set_key(&mut self, key: usize, to: bool) {
        if key >= keyboard::SIZE {
            log::debug!("ignoring unknown key {:#X}", key);
            return;
        }
        self.keys[key] = to;

        if to {
            self.last = Some(key as u8);
        } else if self.last == Some(key as u8) {
            // fall back to any other key that is still held down
            self.last = self.lowest_pressed();
        }
    }

    pub fn set_mult(&mut self, keys: &[bool]) {
        assert!(keys.len() == self.keys.len());
        self.keys.copy_from_slice(keys);
        self.last = self.lowest_pressed();
    }

    pub fn release_all(&mut self) {
        self.keys = [false; keyboard::SIZE];
        self.last = None;
    }

    pub fn get_keys(&self) -> &[bool] {
        &self.keys
    }

    fn lowest_pressed(&self) -> Option<u8> {
        self.keys.iter().position(|&key| key).map(|key| key as u8)
    }
}

impl KeyboardCommands for Keyboard {
    fn pressed_key(&self) -> Option<u8> {
        self.last
    }
}
