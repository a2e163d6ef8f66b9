//! # Frame sequences
//!
//! Loading numbered frame files and stepping through them. The caller owns the clock
//! and calls [`FramePlayer::tick`] every [`FRAME_INTERVAL`].

use std::path::{Path, PathBuf};
use std::time::Duration;

use log::warn;

use crate::data::input::Frame;
use crate::error::Result;

/// Playback rate of the stock player, about 2 fps.
pub const FRAME_INTERVAL: Duration = Duration::from_millis(500);

/// Sort key: numeric stems first, in numeric order, then everything else by name.
fn frame_order(path: &Path) -> (u8, u64, String) {
    let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or_default().to_string();
    match stem.parse::<u64>() {
        Ok(n) => (0, n, stem),
        Err(_) => (1, 0, stem),
    }
}

/// Loads every `*.json` file in `dir` as a frame, `1.json`, `2.json`, ... in order.
/// Files that fail to load are skipped.
pub fn load_frames<P: AsRef<Path>>(dir: P) -> Result<Vec<Frame>> {
    let mut paths = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.extension().map_or(false, |ext| ext == "json") {
            paths.push(path);
        }
    }
    paths.sort_by_cached_key(|p: &PathBuf| frame_order(p));

    Ok(paths
        .into_iter()
        .filter_map(|path| match Frame::from_path(&path) {
            Ok(frame) => Some(frame),
            Err(e) => {
                warn!("skipping frame {}: {}", path.display(), e);
                None
            }
        })
        .collect())
}

/// Wrap-around stepping and play/pause state over a frame sequence.
#[derive(Clone, Debug, Default)]
pub struct FramePlayer {
    frames: Vec<Frame>,
    index: usize,
    playing: bool,
}

impl FramePlayer {
    pub fn new(frames: Vec<Frame>) -> Self {
        Self {
            frames,
            index: 0,
            playing: false,
        }
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn current(&self) -> Option<&Frame> {
        self.frames.get(self.index)
    }

    pub fn next(&mut self) {
        if !self.is_empty() {
            self.index = (self.index + 1) % self.len();
        }
    }

    pub fn prev(&mut self) {
        if !self.is_empty() {
            self.index = (self.index + self.len() - 1) % self.len();
        }
    }

    /// Jumps to `index`; out-of-range indices are ignored.
    pub fn select(&mut self, index: usize) -> bool {
        if index < self.len() {
            self.index = index;
            true
        } else {
            false
        }
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn toggle_play(&mut self) -> bool {
        self.playing = !self.playing;
        self.playing
    }

    pub fn pause(&mut self) {
        self.playing = false;
    }

    /// Timer callback: advances one frame while playing. Returns whether it moved.
    pub fn tick(&mut self) -> bool {
        if self.playing && !self.is_empty() {
            self.next();
            true
        } else {
            false
        }
    }
}
