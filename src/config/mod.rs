//! Configuration module for ytdata.
//!
//! Handles loading settings from TOML, `.env` and the environment.

mod settings;

pub use settings::{
    GeneralSettings, ServerSettings, Settings, TranscriptSettings, YoutubeSettings, API_KEY_ENV,
};
