//! Global keyboard capture via evdev.
//!
//! The compositor never delivers keys to a layer surface that refuses
//! keyboard focus, so key presses are read straight from the kernel input
//! devices instead. The hook opens every device that looks like a keyboard,
//! tracks modifier and caps-lock state from the raw event stream, and emits
//! one [`KeyEvent`] per press or auto-repeat.
//!
//! Reads are non-blocking: the event loop tick calls [`KeyHook::drain`],
//! which polls the device file descriptors with a zero timeout and fetches
//! only from those with data pending.

use std::collections::HashSet;
use std::io;
use std::os::unix::io::AsRawFd;

use evdev::{Device, EventType, InputEventKind, Key, LedType};
use log::{debug, info, warn};
use thiserror::Error;

use crate::input::KeyEvent;
use crate::keymap;

// EV_KEY event values.
const KEY_RELEASE: i32 = 0;
const KEY_PRESS: i32 = 1;
const KEY_REPEAT: i32 = 2;

// QWERTY row plus SPACE, A, Z. A device exposing all of these is treated
// as a keyboard; mice, lid switches, and media remotes fail the check.
const QWERTY_CODES: &[u16] = &[16, 17, 18, 19, 20, 21];
const A_Z_SPACE_CODES: &[u16] = &[57, 30, 44];

const CTRL_CODES: &[u16] = &[29, 97];
const ALT_CODES: &[u16] = &[56, 100];
const SHIFT_CODES: &[u16] = &[42, 54];
const META_CODES: &[u16] = &[125, 126];

/// Errors opening or reading the input devices.
#[derive(Debug, Error)]
pub enum HookError {
    #[error("no readable keyboard devices found (is the user in the 'input' group?)")]
    NoKeyboards,

    #[error("input device error: {0}")]
    Io(#[from] io::Error),
}

/// What the hook observed during one drain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HookSignal {
    /// A key press or auto-repeat to classify and display.
    Key(KeyEvent),
    /// Escape was pressed while reposition mode was active.
    ExitReposition,
}

/// Keyboard device summary for `--list-devices`.
#[derive(Debug, Clone)]
pub struct KeyboardInfo {
    pub path: String,
    pub name: String,
}

/// Reads key events from all attached keyboards.
pub struct KeyHook {
    devices: Vec<Device>,
    poll_fds: Vec<libc::pollfd>,
    held: HashSet<u16>,
    caps_lock_on: bool,
    reposition_active: bool,
}

impl KeyHook {
    /// Opens every readable keyboard device.
    ///
    /// The initial caps-lock state is seeded from the first device that
    /// reports its LED state; after that the toggle is tracked from the
    /// key stream itself.
    pub fn open() -> Result<Self, HookError> {
        let devices = find_keyboards()?;
        for device in &devices {
            info!(
                "Capturing keyboard: {}",
                device.name().unwrap_or("Unknown")
            );
        }

        let caps_lock_on = devices.iter().find_map(read_caps_led).unwrap_or(false);
        debug!("Initial caps-lock state: {}", caps_lock_on);

        let poll_fds = devices
            .iter()
            .map(|d| libc::pollfd {
                fd: d.as_raw_fd(),
                events: libc::POLLIN,
                revents: 0,
            })
            .collect();

        Ok(Self {
            devices,
            poll_fds,
            held: HashSet::new(),
            caps_lock_on,
            reposition_active: false,
        })
    }

    /// Lists keyboard devices without opening a capture session.
    pub fn list_devices() -> Result<Vec<KeyboardInfo>, HookError> {
        let mut infos = Vec::new();
        for (path, device) in evdev::enumerate() {
            if is_keyboard(&device) {
                infos.push(KeyboardInfo {
                    path: path.display().to_string(),
                    name: device.name().unwrap_or("Unknown").to_string(),
                });
            }
        }
        if infos.is_empty() {
            return Err(HookError::NoKeyboards);
        }
        Ok(infos)
    }

    /// While active, ordinary presses are swallowed and only Escape is
    /// reported, as the exit signal.
    pub fn set_reposition_active(&mut self, active: bool) {
        self.reposition_active = active;
    }

    /// Drains all pending key events without blocking.
    ///
    /// Called from the event loop tick. Release events only update the
    /// modifier held-set; presses and auto-repeats produce signals.
    pub fn drain(&mut self) -> Result<Vec<HookSignal>, HookError> {
        let mut signals = Vec::new();

        let ready = unsafe {
            libc::poll(self.poll_fds.as_mut_ptr(), self.poll_fds.len() as libc::nfds_t, 0)
        };
        if ready < 0 {
            let err = io::Error::last_os_error();
            // EINTR behaves like an empty poll.
            if err.raw_os_error() == Some(libc::EINTR) {
                return Ok(signals);
            }
            return Err(HookError::Io(err));
        }
        if ready == 0 {
            return Ok(signals);
        }

        for (i, device) in self.devices.iter_mut().enumerate() {
            if self.poll_fds[i].revents & libc::POLLIN == 0 {
                continue;
            }
            let device_name = device.name().unwrap_or("Unknown").to_string();
            let events = match device.fetch_events() {
                Ok(events) => events,
                Err(err) if err.kind() == io::ErrorKind::WouldBlock => continue,
                Err(err) => {
                    warn!("Failed to read from {}: {}", device_name, err);
                    continue;
                }
            };

            for event in events {
                let InputEventKind::Key(key) = event.kind() else {
                    continue;
                };
                let code = key.code();

                match event.value() {
                    KEY_RELEASE => {
                        self.held.remove(&code);
                    }
                    KEY_PRESS | KEY_REPEAT => {
                        if is_modifier_code(code) {
                            self.held.insert(code);
                        }
                        if code == keymap::CAPS_LOCK && event.value() == KEY_PRESS {
                            self.caps_lock_on = !self.caps_lock_on;
                        }

                        if self.reposition_active {
                            if code == keymap::ESCAPE && event.value() == KEY_PRESS {
                                signals.push(HookSignal::ExitReposition);
                            }
                            continue;
                        }

                        signals.push(HookSignal::Key(KeyEvent {
                            code,
                            ctrl: any_held(&self.held, CTRL_CODES),
                            alt: any_held(&self.held, ALT_CODES),
                            shift: any_held(&self.held, SHIFT_CODES),
                            meta: any_held(&self.held, META_CODES),
                            caps_lock_on: self.caps_lock_on,
                        }));
                    }
                    _ => {}
                }
            }
        }

        Ok(signals)
    }

}

fn any_held(held: &HashSet<u16>, codes: &[u16]) -> bool {
    codes.iter().any(|code| held.contains(code))
}

fn find_keyboards() -> Result<Vec<Device>, HookError> {
    let mut keyboards = Vec::new();
    for (path, device) in evdev::enumerate() {
        if is_keyboard(&device) {
            debug!(
                "Found keyboard at {}: {}",
                path.display(),
                device.name().unwrap_or("Unknown")
            );
            keyboards.push(device);
        }
    }
    if keyboards.is_empty() {
        return Err(HookError::NoKeyboards);
    }
    Ok(keyboards)
}

/// A device counts as a keyboard when it reports EV_KEY and carries the
/// whole QWERTY row plus A, Z, and Space.
fn is_keyboard(device: &Device) -> bool {
    if !device.supported_events().contains(EventType::KEY) {
        return false;
    }
    let Some(keys) = device.supported_keys() else {
        return false;
    };

    let qwerty = QWERTY_CODES.iter().all(|code| keys.contains(Key::new(*code)));
    let az_space = A_Z_SPACE_CODES.iter().all(|code| keys.contains(Key::new(*code)));
    qwerty && az_space
}

fn read_caps_led(device: &Device) -> Option<bool> {
    device
        .get_led_state()
        .ok()
        .map(|leds| leds.contains(LedType::LED_CAPSL))
}

fn is_modifier_code(code: u16) -> bool {
    CTRL_CODES.contains(&code)
        || ALT_CODES.contains(&code)
        || SHIFT_CODES.contains(&code)
        || META_CODES.contains(&code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn modifier_codes_cover_both_sides() {
        for code in [29, 97, 56, 100, 42, 54, 125, 126] {
            assert!(is_modifier_code(code), "code {code} should be a modifier");
        }
        assert!(!is_modifier_code(30)); // A
        assert!(!is_modifier_code(keymap::CAPS_LOCK));
    }
}
