pub mod browser;
pub mod display;
pub mod input;
pub mod session;
pub mod shell;

#[cfg(test)]
pub(crate) mod testutil;

pub use browser::{MenuView, RomBrowser};
pub use display::{PackedFrame, ShadeBuffer, DISPLAY_HEIGHT, DISPLAY_WIDTH, ROW_BYTES};
pub use input::GestureMapper;
pub use session::SessionController;
pub use shell::{HostInput, Shell, TickReport};

pub use crankgb_core::{JoypadState, LCD_HEIGHT, LCD_WIDTH};
