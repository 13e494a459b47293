//! Player settings and preferences
//!
//! Persisted in LocalStorage as JSON.

use serde::{Deserialize, Serialize};

use crate::platform::DEFAULT_JOYSTICK_RADIUS;
use crate::tuning::{GameTuning, VehicleVariant};

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Which vehicle to drive
    pub variant: VehicleVariant,
    /// Joystick travel for full steering (pixels)
    pub joystick_radius: f32,
    /// Show FPS counter
    pub show_fps: bool,
    /// Release all controls when the window loses focus
    pub release_on_blur: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            variant: VehicleVariant::Car,
            joystick_radius: DEFAULT_JOYSTICK_RADIUS,
            show_fps: false,
            release_on_blur: true,
        }
    }
}

impl Settings {
    /// Tuning for the selected variant
    pub fn tuning(&self) -> GameTuning {
        GameTuning::for_variant(self.variant)
    }

    /// Switch to the other vehicle variant and persist the choice
    pub fn toggle_variant(&mut self) -> GameTuning {
        self.variant = self.variant.toggled();
        self.save();
        self.tuning()
    }

    /// Parse persisted JSON, falling back to defaults on bad input
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str::<Settings>(json) {
            Ok(mut settings) => {
                if !(settings.joystick_radius.is_finite() && settings.joystick_radius > 0.0) {
                    log::warn!(
                        "Invalid joystick radius {}, using default",
                        settings.joystick_radius
                    );
                    settings.joystick_radius = DEFAULT_JOYSTICK_RADIUS;
                }
                settings
            }
            Err(e) => {
                log::warn!("Ignoring unreadable settings: {}", e);
                Self::default()
            }
        }
    }

    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "dash_courier_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                log::info!("Loaded settings from LocalStorage");
                return Self::from_json(&json);
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            match serde_json::to_string(self) {
                Ok(json) => {
                    if storage.set_item(Self::STORAGE_KEY, &json).is_err() {
                        log::warn!("Failed to write settings");
                    } else {
                        log::info!("Settings saved");
                    }
                }
                Err(e) => log::warn!("Failed to serialize settings: {}", e),
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}
