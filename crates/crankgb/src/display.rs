//! The display pipeline: scanlines from the core accumulate into a
//! [`ShadeBuffer`], and once per displayed frame the encoder squeezes the
//! 160x144 4-shade image into the host's packed 1-bit framebuffer.

mod encoder;
mod shade;

pub use encoder::{encode, PackedFrame, DISPLAY_HEIGHT, DISPLAY_WIDTH, ROW_BYTES};
pub use shade::ShadeBuffer;
