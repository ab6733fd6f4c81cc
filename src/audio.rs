//! Cue playback through the page's `<audio>` elements
//!
//! Mobile browsers only allow playback started from a user gesture, so every
//! clip is loaded once from the first tap (see [`AudioManager::preload`]).

use wasm_bindgen::JsCast;
use web_sys::HtmlMediaElement;

use crate::Settings;
use crate::sim::Cue;

/// Sound clips, one `<audio>` element each
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Short meow
    Meow,
    /// Long slowed-down meow
    SlowMeow,
    /// Looping song of the infinite section
    NyanSong,
}

impl SoundEffect {
    pub const ALL: [SoundEffect; 3] = [
        SoundEffect::Meow,
        SoundEffect::SlowMeow,
        SoundEffect::NyanSong,
    ];

    /// DOM id of the backing `<audio>` element
    pub fn element_id(&self) -> &'static str {
        match self {
            SoundEffect::Meow => "meow1",
            SoundEffect::SlowMeow => "slowmeow",
            SoundEffect::NyanSong => "nyansong",
        }
    }
}

/// Audio manager for the game
pub struct AudioManager {
    volume: f64,
    muted: bool,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioManager {
    pub fn new() -> Self {
        let settings = Settings::default();
        Self {
            volume: settings.effective_volume(),
            muted: settings.muted,
        }
    }

    /// Take volume and mute from the player's settings, including clips
    /// that are already playing
    pub fn apply_settings(&mut self, settings: &Settings) {
        self.volume = settings.effective_volume();
        self.muted = settings.muted;
        for effect in SoundEffect::ALL {
            if let Some(el) = Self::element(effect) {
                self.configure(&el);
            }
        }
    }

    fn configure(&self, el: &HtmlMediaElement) {
        el.set_volume(self.volume);
        // iOS ignores the volume property
        el.set_muted(self.muted);
    }

    fn element(effect: SoundEffect) -> Option<HtmlMediaElement> {
        web_sys::window()?
            .document()?
            .get_element_by_id(effect.element_id())?
            .dyn_into::<HtmlMediaElement>()
            .ok()
    }

    /// Load every clip; must run inside a user gesture handler
    pub fn preload(&self) {
        for effect in SoundEffect::ALL {
            match Self::element(effect) {
                Some(el) => el.load(),
                None => log::warn!("Missing <audio id=\"{}\">", effect.element_id()),
            }
        }
    }

    /// Play a sound effect from the start
    pub fn play(&self, effect: SoundEffect) {
        if self.muted {
            return;
        }
        if let Some(el) = Self::element(effect) {
            self.configure(&el);
            // Some browsers return undefined instead of a promise here
            let _ = el.play();
        }
    }

    /// Stop a sound and rewind it
    pub fn stop(&self, effect: SoundEffect) {
        if let Some(el) = Self::element(effect) {
            let _ = el.pause();
            el.set_current_time(0.0);
        }
    }

    /// Play or stop whatever a simulation cue calls for
    pub fn on_cue(&self, cue: Cue) {
        match cue {
            Cue::Meow => self.play(SoundEffect::Meow),
            Cue::SlowMeow => self.play(SoundEffect::SlowMeow),
            Cue::NyanStart => self.play(SoundEffect::NyanSong),
            Cue::NyanStop => self.stop(SoundEffect::NyanSong),
        }
    }
}
