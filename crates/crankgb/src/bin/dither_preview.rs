use std::path::PathBuf;

use crankgb::{
    display::{encode, PackedFrame, ShadeBuffer, DISPLAY_HEIGHT, DISPLAY_WIDTH, ROW_BYTES},
    LCD_HEIGHT, LCD_WIDTH,
};
use crankgb_core::ScanlineSink;

/// Renders a synthetic shade gradient through the downscale-dither encoder
/// and writes the packed frame as a PBM image for eyeballing the output.
fn main() {
    env_logger::init();

    let out_path: PathBuf = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| {
            eprintln!("Usage: dither_preview <out_pbm_path>");
            std::process::exit(2);
        });

    let mut shades = ShadeBuffer::new();
    for line in 0..LCD_HEIGHT {
        let mut pixels = [0u8; LCD_WIDTH];
        for (x, px) in pixels.iter_mut().enumerate() {
            // Four vertical bands, white through black.
            *px = (x * 4 / LCD_WIDTH) as u8;
        }
        shades.on_scanline(line, &pixels);
    }

    let mut frame = PackedFrame::new();
    encode(&shades, &mut frame);

    // PBM P4: packed 1-bit rows, MSB first, 1 = black. Our frame is 1 = lit,
    // so bytes invert, and the two hardware pad bytes per row are dropped.
    let data_bytes = DISPLAY_WIDTH / 8;
    let mut pbm = format!("P4\n{DISPLAY_WIDTH} {DISPLAY_HEIGHT}\n").into_bytes();
    for row in frame.as_bytes().chunks(ROW_BYTES) {
        pbm.extend(row[..data_bytes].iter().map(|&b| !b));
    }

    std::fs::write(&out_path, &pbm).unwrap_or_else(|err| {
        eprintln!("Failed to write '{}': {err}", out_path.display());
        std::process::exit(1);
    });

    println!(
        "Wrote {}x{} PBM gradient preview to '{}'",
        DISPLAY_WIDTH,
        DISPLAY_HEIGHT,
        out_path.display()
    );
}
