//! `rodio`-backed audio engine.
//!
//! The output device is opened on first use so a machine without audio can
//! still start the player; the failure shows up on `play` instead.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::time::Duration;

use rodio::{Decoder, OutputStream, OutputStreamBuilder, Sink, Source};
use tracing::debug;

use super::engine::{AudioEngine, EngineError};

pub struct RodioEngine {
    stream: Option<OutputStream>,
    sink: Option<Sink>,
    volume: f32,
}

impl RodioEngine {
    pub fn new() -> Self {
        Self {
            stream: None,
            sink: None,
            volume: 1.0,
        }
    }

    fn stream(&mut self) -> Result<&OutputStream, EngineError> {
        let stream = match self.stream.take() {
            Some(s) => s,
            None => {
                let mut s = OutputStreamBuilder::open_default_stream()
                    .map_err(|e| EngineError::NoOutputDevice(e.to_string()))?;
                // rodio logs to stderr when the stream is dropped, which would
                // scribble over the TUI.
                s.log_on_drop(false);
                s
            }
        };
        Ok(self.stream.insert(stream))
    }
}

impl Default for RodioEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioEngine for RodioEngine {
    fn load_and_play(&mut self, path: &Path, start: Duration) -> Result<(), EngineError> {
        if let Some(old) = self.sink.take() {
            old.stop();
        }

        let file = File::open(path).map_err(|source| EngineError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        let source = Decoder::new(BufReader::new(file))
            .map_err(|e| EngineError::Decode {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?
            // `skip_duration` is the only repositioning primitive we use.
            .skip_duration(start);

        let sink = Sink::connect_new(self.stream()?.mixer());
        sink.set_volume(self.volume);
        sink.append(source);
        sink.play();
        self.sink = Some(sink);

        debug!(path = %path.display(), ?start, "rodio sink started");
        Ok(())
    }

    fn pause(&mut self) {
        if let Some(ref s) = self.sink {
            s.pause();
        }
    }

    fn unpause(&mut self) -> Result<(), EngineError> {
        match self.sink {
            Some(ref s) => {
                s.play();
                Ok(())
            }
            None => Err(EngineError::NothingToResume),
        }
    }

    fn stop(&mut self) {
        if let Some(s) = self.sink.take() {
            s.stop();
        }
    }

    fn set_volume(&mut self, level: f32) {
        self.volume = level;
        if let Some(ref s) = self.sink {
            s.set_volume(level);
        }
    }
}
