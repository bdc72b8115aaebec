//! Global key source backed by rdev
//!
//! `rdev::listen` is a blocking OS-level hook that never returns while
//! the process is alive, so each subscription runs it on a dedicated
//! thread. Stopping a subscription silences the callback via its stop
//! flag; rdev has no unhook API, so the hook thread itself cannot be
//! joined and the bounded join upstream abandons it.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{mpsc as std_mpsc, Arc};
use std::thread;
use std::time::Duration;

use tokio::sync::mpsc;

use crate::application::ports::{KeyEventSource, KeySourceError, KeySubscription};
use crate::domain::hotkey::KeyEvent;

/// How long to wait for the OS hook to fail fast before assuming it is live
const STARTUP_PROBE: Duration = Duration::from_millis(300);

/// Global key-event source using rdev
pub struct RdevKeySource;

impl RdevKeySource {
    /// Create a new rdev key source
    pub fn new() -> Self {
        Self
    }
}

impl Default for RdevKeySource {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyEventSource for RdevKeySource {
    fn subscribe(&self, tx: mpsc::Sender<KeyEvent>) -> Result<KeySubscription, KeySourceError> {
        let stop = Arc::new(AtomicBool::new(false));
        let stop_for_thread = Arc::clone(&stop);
        let (failed_tx, failed_rx) = std_mpsc::channel::<String>();

        let handle = thread::Builder::new()
            .name("clipforge-keys".to_string())
            .spawn(move || {
                let result = rdev::listen(move |event| {
                    if stop_for_thread.load(Ordering::SeqCst) {
                        return;
                    }
                    let key_event = match event.event_type {
                        rdev::EventType::KeyPress(key) => KeyEvent::down(key_token(key)),
                        rdev::EventType::KeyRelease(key) => KeyEvent::up(key_token(key)),
                        _ => return,
                    };
                    // The OS hook must never block; a full channel means
                    // the listener is wedged and the event is expendable
                    let _ = tx.try_send(key_event);
                });
                if let Err(e) = result {
                    let _ = failed_tx.send(format!("{e:?}"));
                }
            })
            .map_err(|e| KeySourceError::ThreadSpawn(e.to_string()))?;

        // listen() only returns on failure (missing permissions, no
        // display); give it a moment to fail fast so denial surfaces here
        // instead of as silence
        if let Ok(reason) = failed_rx.recv_timeout(STARTUP_PROBE) {
            let _ = handle.join();
            return Err(KeySourceError::SubscriptionDenied(reason));
        }

        Ok(KeySubscription::new(stop, Some(handle)))
    }
}

/// Normalize an rdev key to a lowercase token.
///
/// Modifier variants keep their side ("ctrl_l", "ctrl_r"); letters and
/// digits become single characters; keypad digits stay distinct from the
/// top row. Keys without a mapping fall back to a raw lowercase token so
/// normalization can never fail.
fn key_token(key: rdev::Key) -> String {
    use rdev::Key::*;

    let token = match key {
        ControlLeft => "ctrl_l",
        ControlRight => "ctrl_r",
        Alt => "alt_l",
        AltGr => "alt_r",
        ShiftLeft => "shift_l",
        ShiftRight => "shift_r",
        MetaLeft => "meta_l",
        MetaRight => "meta_r",

        F1 => "f1",
        F2 => "f2",
        F3 => "f3",
        F4 => "f4",
        F5 => "f5",
        F6 => "f6",
        F7 => "f7",
        F8 => "f8",
        F9 => "f9",
        F10 => "f10",
        F11 => "f11",
        F12 => "f12",

        KeyA => "a",
        KeyB => "b",
        KeyC => "c",
        KeyD => "d",
        KeyE => "e",
        KeyF => "f",
        KeyG => "g",
        KeyH => "h",
        KeyI => "i",
        KeyJ => "j",
        KeyK => "k",
        KeyL => "l",
        KeyM => "m",
        KeyN => "n",
        KeyO => "o",
        KeyP => "p",
        KeyQ => "q",
        KeyR => "r",
        KeyS => "s",
        KeyT => "t",
        KeyU => "u",
        KeyV => "v",
        KeyW => "w",
        KeyX => "x",
        KeyY => "y",
        KeyZ => "z",

        Num0 => "0",
        Num1 => "1",
        Num2 => "2",
        Num3 => "3",
        Num4 => "4",
        Num5 => "5",
        Num6 => "6",
        Num7 => "7",
        Num8 => "8",
        Num9 => "9",

        Kp0 => "kp0",
        Kp1 => "kp1",
        Kp2 => "kp2",
        Kp3 => "kp3",
        Kp4 => "kp4",
        Kp5 => "kp5",
        Kp6 => "kp6",
        Kp7 => "kp7",
        Kp8 => "kp8",
        Kp9 => "kp9",

        Return => "enter",
        Space => "space",
        Escape => "esc",
        Tab => "tab",
        Backspace => "backspace",
        Delete => "delete",
        Insert => "insert",
        Home => "home",
        End => "end",
        PageUp => "page_up",
        PageDown => "page_down",
        UpArrow => "up",
        DownArrow => "down",
        LeftArrow => "left",
        RightArrow => "right",
        CapsLock => "caps_lock",
        NumLock => "num_lock",
        ScrollLock => "scroll_lock",
        PrintScreen => "print_screen",
        Pause => "pause",

        Minus => "-",
        Equal => "=",
        LeftBracket => "[",
        RightBracket => "]",
        SemiColon => ";",
        Quote => "'",
        BackQuote => "`",
        BackSlash => "\\",
        Comma => ",",
        Dot => ".",
        Slash => "/",

        Unknown(code) => return format!("0x{code:x}"),
        other => return format!("{other:?}").to_lowercase(),
    };

    token.to_string()
}
