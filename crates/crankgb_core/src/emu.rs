use std::error::Error;
use std::fmt;

use crate::joypad::JoypadState;
use crate::LCD_WIDTH;

/// Receives one decoded scanline per callback while the core executes a
/// frame. The core holds the sink only for the duration of one
/// [`EmulationCore::run_frame`] call.
pub trait ScanlineSink {
    /// `line` is always in `0..LCD_HEIGHT`; rows may arrive in any order but
    /// each row arrives exactly once per frame.
    fn on_scanline(&mut self, line: usize, pixels: &[u8; LCD_WIDTH]);
}

/// Cartridge memory as seen from the emulation core.
///
/// These are the core's three accessor callbacks: ROM byte read, save-RAM
/// byte read and save-RAM byte write.
pub trait CartridgeBus {
    fn rom_read(&self, addr: usize) -> u8;
    fn ram_read(&self, addr: usize) -> u8;
    fn ram_write(&mut self, addr: usize, value: u8);
}

/// Non-fatal runtime faults reported by the core while executing a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoreError {
    /// The core hit an undefined opcode. It has already advanced past the
    /// faulting instruction.
    InvalidOpcode(u16),
    InvalidRead(u16),
    InvalidWrite(u16),
}

/// Receives runtime faults from the core. Like the scanline sink, the core
/// only borrows this for one `run_frame` call.
pub trait CoreErrorSink {
    fn on_error(&mut self, error: CoreError);
}

/// Result of one `run_frame` call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStatus {
    /// False when the core signals frame-skip: the frame produced no visual
    /// change and does not need to be re-encoded.
    pub display_updated: bool,
}

/// Fatal cartridge validation errors from [`EmulationCore::init`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoreInitError {
    UnsupportedCartridge,
    InvalidChecksum,
}

impl fmt::Display for CoreInitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoreInitError::UnsupportedCartridge => write!(f, "unsupported cartridge"),
            CoreInitError::InvalidChecksum => write!(f, "invalid ROM checksum"),
        }
    }
}

impl Error for CoreInitError {}

/// The cycle-stepped Game Boy core, consumed through a narrow interface.
///
/// The core owns no cartridge memory: ROM and save-RAM bytes are served by
/// the [`CartridgeBus`] passed into `run_frame`, so buffer ownership stays
/// with the session.
pub trait EmulationCore {
    /// Validates the cartridge header and prepares the core for execution.
    fn init(&mut self, rom: &[u8]) -> Result<(), CoreInitError>;

    /// Re-initialises core state, keeping the loaded image and save-RAM.
    fn reset(&mut self);

    /// Size in bytes of the cartridge's declared save region. Zero when the
    /// cartridge has no battery-backed RAM. Valid after `init`.
    fn save_size(&self) -> usize;

    /// Executes CPU cycles until one displayable frame has been produced or
    /// the core decides the display did not change.
    fn run_frame(
        &mut self,
        cart: &mut dyn CartridgeBus,
        joypad: JoypadState,
        video: &mut dyn ScanlineSink,
        errors: &mut dyn CoreErrorSink,
    ) -> FrameStatus;
}
