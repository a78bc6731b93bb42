//! Test doubles shared by the session, browser and shell tests.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::io;

use crankgb_core::{
    CartridgeBus, CoreErrorSink, CoreInitError, EmulationCore, FrameStatus, JoypadState,
    ScanlineSink, Vfs, LCD_HEIGHT, LCD_WIDTH,
};

/// Scripted stand-in for the emulation core.
pub(crate) struct StubCore {
    pub save_size: usize,
    pub fail_init: Option<CoreInitError>,
    /// Save-RAM writes performed during each `run_frame`.
    pub ram_writes: Vec<(usize, u8)>,
    /// Shade painted across the whole frame.
    pub frame_shade: u8,
    pub display_updated: bool,
    pub resets: u32,
    pub frames_run: u32,
    pub last_joypad: JoypadState,
}

impl StubCore {
    pub fn with_save_size(save_size: usize) -> Self {
        Self {
            save_size,
            fail_init: None,
            ram_writes: Vec::new(),
            frame_shade: 0,
            display_updated: true,
            resets: 0,
            frames_run: 0,
            last_joypad: JoypadState::empty(),
        }
    }

    pub fn failing(err: CoreInitError) -> Self {
        Self {
            fail_init: Some(err),
            ..Self::with_save_size(0)
        }
    }
}

impl EmulationCore for StubCore {
    fn init(&mut self, _rom: &[u8]) -> Result<(), CoreInitError> {
        match self.fail_init {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn reset(&mut self) {
        self.resets += 1;
    }

    fn save_size(&self) -> usize {
        self.save_size
    }

    fn run_frame(
        &mut self,
        cart: &mut dyn CartridgeBus,
        joypad: JoypadState,
        video: &mut dyn ScanlineSink,
        _errors: &mut dyn CoreErrorSink,
    ) -> FrameStatus {
        self.frames_run += 1;
        self.last_joypad = joypad;
        for &(addr, value) in &self.ram_writes {
            cart.ram_write(addr, value);
        }
        let pixels = [self.frame_shade; LCD_WIDTH];
        for line in 0..LCD_HEIGHT {
            video.on_scanline(line, &pixels);
        }
        FrameStatus {
            display_updated: self.display_updated,
        }
    }
}

/// Scanline sink that discards everything.
pub(crate) struct NullSink;

impl ScanlineSink for NullSink {
    fn on_scanline(&mut self, _line: usize, _pixels: &[u8; LCD_WIDTH]) {}
}

/// In-memory storage with a flat namespace.
pub(crate) struct MemoryVfs {
    files: RefCell<BTreeMap<String, Vec<u8>>>,
}

impl MemoryVfs {
    pub fn new() -> Self {
        Self {
            files: RefCell::new(BTreeMap::new()),
        }
    }

    pub fn insert(&self, path: &str, bytes: Vec<u8>) {
        self.files.borrow_mut().insert(path.to_string(), bytes);
    }

    pub fn get(&self, path: &str) -> Option<Vec<u8>> {
        self.files.borrow().get(path).cloned()
    }
}

impl Vfs for MemoryVfs {
    fn read(&self, path: &str) -> io::Result<Vec<u8>> {
        self.files
            .borrow()
            .get(path)
            .cloned()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, path.to_string()))
    }

    fn write(&self, path: &str, bytes: &[u8]) -> io::Result<()> {
        self.insert(path, bytes.to_vec());
        Ok(())
    }

    fn list(&self, _dir: &str) -> io::Result<Vec<String>> {
        Ok(self.files.borrow().keys().cloned().collect())
    }
}
