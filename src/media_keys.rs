//! Media key injection for X11-based systems.
//!
//! Actions are delivered as XF86 media key presses synthesized through the
//! XTEST extension, so whatever the desktop binds to those keys (player
//! controls, volume OSD) reacts as if a multimedia keyboard was used.

use crate::{
    action::ActionClass,
    dispatch::CommandDispatcher,
    error::{Error, Result},
};
use log::{debug, info, warn};
use std::collections::HashMap;
use x11rb::{
    connection::{Connection, RequestConnection},
    protocol::{
        xproto::{self, ConnectionExt as _, Screen},
        xtest::{self, ConnectionExt as _},
    },
    rust_connection::RustConnection,
};

/// XF86 keysyms for the media keys
pub mod keysyms {
    pub const XF86_AUDIO_LOWER_VOLUME: u32 = 0x1008_FF11;
    pub const XF86_AUDIO_MUTE: u32 = 0x1008_FF12;
    pub const XF86_AUDIO_RAISE_VOLUME: u32 = 0x1008_FF13;
    pub const XF86_AUDIO_PLAY: u32 = 0x1008_FF14;
    pub const XF86_AUDIO_PREV: u32 = 0x1008_FF16;
    pub const XF86_AUDIO_NEXT: u32 = 0x1008_FF17;
}

/// Keysym a given action is delivered as
#[must_use]
pub const fn keysym_for(action: ActionClass) -> u32 {
    match action {
        ActionClass::NextTrack => keysyms::XF86_AUDIO_NEXT,
        ActionClass::PrevTrack => keysyms::XF86_AUDIO_PREV,
        ActionClass::PlayPause => keysyms::XF86_AUDIO_PLAY,
        ActionClass::Mute => keysyms::XF86_AUDIO_MUTE,
        ActionClass::VolumeUp => keysyms::XF86_AUDIO_RAISE_VOLUME,
        ActionClass::VolumeDown => keysyms::XF86_AUDIO_LOWER_VOLUME,
    }
}

/// Find the first keycode whose mapping row contains `keysym`.
///
/// `keysyms` is the flat table returned by `GetKeyboardMapping`, with
/// `per_keycode` entries per keycode starting at `min_keycode`.
#[must_use]
pub fn keycode_for(keysym: u32, min_keycode: u8, per_keycode: u8, keysyms: &[u32]) -> Option<u8> {
    if per_keycode == 0 {
        return None;
    }
    keysyms
        .chunks(usize::from(per_keycode))
        .position(|row| row.contains(&keysym))
        .and_then(|offset| u8::try_from(offset).ok())
        .and_then(|offset| min_keycode.checked_add(offset))
}

/// Media key injector backed by an X11 connection
pub struct X11MediaKeys {
    connection: RustConnection,
    screen: Screen,
    keycodes: HashMap<ActionClass, u8>,
}

impl X11MediaKeys {
    /// Connect to the X server and resolve media keycodes
    ///
    /// # Errors
    ///
    /// Returns `Error::Dispatch` if the display is unreachable, XTEST is
    /// missing, or the keyboard mapping cannot be read
    pub fn new() -> Result<Self> {
        info!("Initializing X11 media key dispatcher");

        let (connection, screen_num) = RustConnection::connect(None)
            .map_err(|e| Error::Dispatch(format!("Failed to connect to X11: {e}")))?;

        let screen = connection
            .setup()
            .roots
            .get(screen_num)
            .ok_or_else(|| Error::Dispatch("Failed to get screen".to_string()))?
            .clone();

        let has_xtest = connection
            .extension_information(xtest::X11_EXTENSION_NAME)
            .map_err(|e| Error::Dispatch(format!("Failed to query XTEST: {e}")))?
            .is_some();
        if !has_xtest {
            return Err(Error::Dispatch("X server lacks the XTEST extension".to_string()));
        }

        let keycodes = Self::resolve_keycodes(&connection)?;

        info!("Connected to X11 display, {} media keys mapped", keycodes.len());

        Ok(Self {
            connection,
            screen,
            keycodes,
        })
    }

    fn resolve_keycodes(connection: &RustConnection) -> Result<HashMap<ActionClass, u8>> {
        let setup = connection.setup();
        let min_keycode = setup.min_keycode;
        let count = setup.max_keycode.saturating_sub(min_keycode).saturating_add(1);

        let mapping = connection
            .get_keyboard_mapping(min_keycode, count)
            .map_err(|e| Error::Dispatch(format!("Failed to request keyboard mapping: {e}")))?
            .reply()
            .map_err(|e| Error::Dispatch(format!("Failed to read keyboard mapping: {e}")))?;

        let mut keycodes = HashMap::new();
        for action in ActionClass::ALL {
            match keycode_for(keysym_for(action), min_keycode, mapping.keysyms_per_keycode, &mapping.keysyms) {
                Some(code) => {
                    keycodes.insert(action, code);
                }
                None => warn!("No keycode mapped for {action}; it will not be delivered"),
            }
        }
        Ok(keycodes)
    }

    /// Keycode used for an action, if the keyboard map has one
    #[must_use]
    pub fn keycode(&self, action: ActionClass) -> Option<u8> {
        self.keycodes.get(&action).copied()
    }

    fn fake_key(&self, event: u8, keycode: u8) -> Result<()> {
        self.connection
            .xtest_fake_input(event, keycode, x11rb::CURRENT_TIME, self.screen.root, 0, 0, 0)
            .map_err(|e| Error::Dispatch(format!("Failed to send fake input: {e}")))?;
        Ok(())
    }
}

impl CommandDispatcher for X11MediaKeys {
    fn dispatch(&mut self, action: ActionClass) -> Result<()> {
        let keycode = self
            .keycode(action)
            .ok_or_else(|| Error::Dispatch(format!("No keycode mapped for {action}")))?;

        debug!("Pressing keycode {} for {}", keycode, action);

        self.fake_key(xproto::KEY_PRESS_EVENT, keycode)?;
        self.fake_key(xproto::KEY_RELEASE_EVENT, keycode)?;

        self.connection
            .flush()
            .map_err(|e| Error::Dispatch(format!("Failed to flush connection: {e}")))?;

        Ok(())
    }

    fn name(&self) -> &str {
        "x11"
    }
}
