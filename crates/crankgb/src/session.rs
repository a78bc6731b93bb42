use std::io;

use anyhow::{Context, Result};
use crankgb_core::{
    CartridgeBus, CoreError, CoreErrorSink, EmulationCore, FrameStatus, JoypadState,
    ScanlineSink, Vfs,
};

/// Extension given to derived save file names.
const SAVE_EXTENSION: &str = ".sav";

/// An active cartridge: the ROM image, its battery-backed save region and
/// the paths they came from. Buffers drop with the struct; nothing else
/// ever owns them.
pub struct CartridgeSession {
    rom: Vec<u8>,
    save_ram: Vec<u8>,
    rom_path: String,
    save_path: String,
}

impl CartridgeSession {
    pub fn rom_path(&self) -> &str {
        &self.rom_path
    }

    pub fn save_path(&self) -> &str {
        &self.save_path
    }

    pub fn save_ram(&self) -> &[u8] {
        &self.save_ram
    }
}

impl CartridgeBus for CartridgeSession {
    fn rom_read(&self, addr: usize) -> u8 {
        self.rom[addr]
    }

    fn ram_read(&self, addr: usize) -> u8 {
        self.save_ram[addr]
    }

    fn ram_write(&mut self, addr: usize, value: u8) {
        self.save_ram[addr] = value;
    }
}

/// Routes core runtime faults per the error policy: invalid memory access
/// is ignored, undefined opcodes are logged and execution continues.
struct LogErrorSink;

impl CoreErrorSink for LogErrorSink {
    fn on_error(&mut self, error: CoreError) {
        match error {
            CoreError::InvalidOpcode(op) => log::warn!("invalid opcode {op:#06x}"),
            CoreError::InvalidRead(_) | CoreError::InvalidWrite(_) => {}
        }
    }
}

/// Owns the emulation core and the cartridge lifecycle: load, reset, save
/// flush and unload. `session` is `None` whenever no cartridge is loaded;
/// every transition in and out happens inside one method call.
pub struct SessionController<C: EmulationCore, V: Vfs> {
    core: C,
    vfs: V,
    session: Option<CartridgeSession>,
}

impl<C: EmulationCore, V: Vfs> SessionController<C, V> {
    pub fn new(core: C, vfs: V) -> Self {
        Self {
            core,
            vfs,
            session: None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    pub fn session(&self) -> Option<&CartridgeSession> {
        self.session.as_ref()
    }

    pub fn vfs(&self) -> &V {
        &self.vfs
    }

    pub fn core(&self) -> &C {
        &self.core
    }

    /// Loads a cartridge: reads the ROM image, validates it with the core,
    /// then sizes and populates save-RAM. Any failure leaves the controller
    /// unloaded; the caller reports it and returns to ROM selection.
    pub fn load(&mut self, rom_path: &str) -> Result<()> {
        let rom = self
            .vfs
            .read(rom_path)
            .with_context(|| format!("failed to read ROM '{rom_path}'"))?;
        let save_path = save_path_for(rom_path);

        self.core
            .init(&rom)
            .with_context(|| format!("failed to initialise core for '{rom_path}'"))?;

        let save_size = self.core.save_size();
        let mut save_ram = vec![0u8; save_size];
        if save_size > 0 {
            match self.vfs.read(&save_path) {
                Ok(bytes) => {
                    let n = bytes.len().min(save_size);
                    save_ram[..n].copy_from_slice(&bytes[..n]);
                    if bytes.len() != save_size {
                        log::warn!(
                            "save file '{save_path}' is {} bytes, expected {save_size}",
                            bytes.len()
                        );
                    }
                }
                // A missing save file is the normal first-run case: the
                // zeroed buffer stands in and the file is created on flush.
                Err(err) if err.kind() == io::ErrorKind::NotFound => {
                    log::info!("no save file at '{save_path}', starting fresh");
                }
                Err(err) => {
                    log::warn!("failed to read save file '{save_path}': {err}");
                }
            }
        }

        log::info!(
            "loaded '{rom_path}' ({} bytes, {save_size} byte save region)",
            rom.len()
        );
        self.session = Some(CartridgeSession {
            rom,
            save_ram,
            rom_path: rom_path.to_string(),
            save_path,
        });
        Ok(())
    }

    /// Flushes save-RAM to storage. A no-op without an active session or a
    /// save region; storage failures are logged and the flush is skipped.
    pub fn save(&self) {
        let Some(session) = &self.session else {
            return;
        };
        if session.save_ram.is_empty() {
            return;
        }
        if let Err(err) = self.vfs.write(&session.save_path, &session.save_ram) {
            log::error!("unable to write save file '{}': {err}", session.save_path);
        }
    }

    /// Re-initialises core state, keeping the loaded image and save-RAM.
    pub fn reset(&mut self) {
        if self.session.is_some() {
            self.core.reset();
        }
    }

    /// Flushes the save and releases the cartridge, returning to Unloaded.
    pub fn unload(&mut self) {
        self.save();
        if let Some(session) = self.session.take() {
            log::info!("unloaded '{}'", session.rom_path);
        }
    }

    /// Runs the core for one frame against the active cartridge. Without a
    /// session this does nothing and reports an unchanged display.
    pub fn run_frame(&mut self, joypad: JoypadState, video: &mut dyn ScanlineSink) -> FrameStatus {
        let Some(cart) = self.session.as_mut() else {
            return FrameStatus::default();
        };
        self.core.run_frame(cart, joypad, video, &mut LogErrorSink)
    }
}

/// Derives the save file path from a ROM path: `.sav` replaces the final
/// dot segment, or is appended when there is no extension to replace (no
/// dot, or only a leading one).
pub fn save_path_for(rom_path: &str) -> String {
    match rom_path.rfind('.') {
        Some(i) if i > 0 => format!("{}{SAVE_EXTENSION}", &rom_path[..i]),
        _ => format!("{rom_path}{SAVE_EXTENSION}"),
    }
}
