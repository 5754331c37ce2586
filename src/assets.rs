use std::path::{Path, PathBuf};
use std::sync::mpsc::{channel, Receiver, Sender};
use std::thread;

use anyhow::{Context, Result};

use crate::font::Font;

/// Slot index into the cache's texture table. Valid as soon as the load is
/// requested; the pixels arrive later.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextureHandle(pub usize);

/// Decoded RGBA8 pixels ready for GPU upload
pub struct TextureData {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

/// A finished load, delivered on the main thread by `poll`
pub enum AssetEvent {
    Texture(TextureHandle, TextureData),
    Font(Font),
}

enum Loaded {
    Texture(TextureHandle, Result<TextureData>),
    Font(Result<Font>),
}

/// Decodes textures and fonts on background threads. Completions are
/// drained with `poll` from the main thread only, so everything
/// downstream stays single-writer. Failed loads are logged and dropped;
/// whatever depended on them simply stays absent.
pub struct AssetCache {
    tx: Sender<Loaded>,
    rx: Receiver<Loaded>,
    slots: usize,
}

impl AssetCache {
    pub fn new() -> Self {
        let (tx, rx) = channel();
        Self { tx, rx, slots: 0 }
    }

    /// Fire-and-forget texture load; the handle is usable immediately and
    /// the renderer samples a placeholder until the pixels arrive
    pub fn load_texture(&mut self, path: impl Into<PathBuf>) -> TextureHandle {
        let handle = TextureHandle(self.slots);
        self.slots += 1;

        let path = path.into();
        let tx = self.tx.clone();
        thread::spawn(move || {
            let _ = tx.send(Loaded::Texture(handle, decode_texture(&path)));
        });

        handle
    }

    /// Asynchronous font load; the parsed font comes back through `poll`
    /// exactly once and gates scene population
    pub fn load_font(&self, path: impl Into<PathBuf>) {
        let path = path.into();
        let tx = self.tx.clone();
        thread::spawn(move || {
            let _ = tx.send(Loaded::Font(read_font(&path)));
        });
    }

    /// Number of texture loads requested so far
    pub fn texture_slots(&self) -> usize {
        self.slots
    }

    /// Drain every load that completed since the last call
    pub fn poll(&mut self) -> Vec<AssetEvent> {
        let mut events = Vec::new();
        while let Ok(loaded) = self.rx.try_recv() {
            match loaded {
                Loaded::Texture(handle, Ok(data)) => {
                    events.push(AssetEvent::Texture(handle, data));
                }
                Loaded::Texture(handle, Err(e)) => {
                    log::warn!("texture load for slot {} failed: {e:#}", handle.0);
                }
                Loaded::Font(Ok(font)) => events.push(AssetEvent::Font(font)),
                Loaded::Font(Err(e)) => log::warn!("font load failed: {e:#}"),
            }
        }
        events
    }
}

impl Default for AssetCache {
    fn default() -> Self {
        Self::new()
    }
}

fn decode_texture(path: &Path) -> Result<TextureData> {
    let img = image::open(path)
        .with_context(|| format!("failed to open texture {}", path.display()))?
        .to_rgba8();
    Ok(TextureData {
        width: img.width(),
        height: img.height(),
        pixels: img.into_raw(),
    })
}

fn read_font(path: &Path) -> Result<Font> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read font {}", path.display()))?;
    Font::parse(&json)
}
