//! Audio hooks
//!
//! The core owns no audio state. It emits fire-and-forget commands to an
//! `AudioSink` at session start, item pickup, game over and restart; loading
//! and playback belong to whoever implements the sink.

use serde::{Deserialize, Serialize};

/// Audio tracks used by the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Track {
    /// Looping stage background music
    StageBgm,
    /// Item pickup
    ItemSe,
    /// Game over jingle
    GameOverSe,
}

impl Track {
    /// Asset file the presentation layer is expected to load
    pub fn file_name(&self) -> &'static str {
        match self {
            Track::StageBgm => "wood_note.mp3",
            Track::ItemSe => "SE_item.mp3",
            Track::GameOverSe => "SE_gameover.mp3",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AudioCommand {
    PlayLoop(Track),
    PlayOnce(Track),
    Stop(Track),
    /// Seek back to the start
    Rewind(Track),
}

/// Receiver for audio commands. Failures are the sink's business.
pub trait AudioSink {
    fn dispatch(&mut self, command: AudioCommand);
}

/// Discards everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NullAudio;

impl AudioSink for NullAudio {
    fn dispatch(&mut self, _command: AudioCommand) {}
}

/// Logs commands at debug level; useful for headless runs
#[derive(Debug, Clone, Default)]
pub struct LogAudio {
    muted: bool,
}

impl LogAudio {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }
}

impl AudioSink for LogAudio {
    fn dispatch(&mut self, command: AudioCommand) {
        if self.muted {
            return;
        }
        match command {
            AudioCommand::PlayLoop(track) => log::debug!("audio: loop {}", track.file_name()),
            AudioCommand::PlayOnce(track) => log::debug!("audio: play {}", track.file_name()),
            AudioCommand::Stop(track) => log::debug!("audio: stop {}", track.file_name()),
            AudioCommand::Rewind(track) => log::debug!("audio: rewind {}", track.file_name()),
        }
    }
}

/// Keeps every command (tests, replays)
#[derive(Debug, Clone, Default)]
pub struct RecordingAudio {
    pub commands: Vec<AudioCommand>,
}

impl AudioSink for RecordingAudio {
    fn dispatch(&mut self, command: AudioCommand) {
        self.commands.push(command);
    }
}
