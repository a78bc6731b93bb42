pub mod emu;
pub mod joypad;
pub mod vfs;

pub use emu::{
    CartridgeBus, CoreError, CoreErrorSink, CoreInitError, EmulationCore, FrameStatus,
    ScanlineSink,
};
pub use joypad::JoypadState;
pub use vfs::{StdVfs, Vfs};

/// Logical screen width in pixels for the Game Boy DMG.
pub const LCD_WIDTH: usize = 160;
/// Logical screen height in pixels.
pub const LCD_HEIGHT: usize = 144;
