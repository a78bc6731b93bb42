use anyhow::Result;
use crankgb_core::{JoypadState, Vfs};

/// Cartridge file extensions the browser lists.
pub const ROM_EXTENSIONS: [&str; 2] = [".gb", ".gbc"];
/// Marker dropped in the data directory when no ROMs are found, so users
/// browsing it see where files belong.
pub const EMPTY_MARKER_FILE: &str = "place_roms_here.txt";

/// The menu/text rendering service, external to this layer. Implementations
/// draw the list however the host likes; the browser only says when.
pub trait MenuView {
    fn redraw(&mut self, files: &[String], selected: usize);
    fn show_empty_hint(&mut self);
}

/// ROM selection list driven by d-pad input: Up/Down move the cursor with
/// wraparound, A confirms.
pub struct RomBrowser {
    files: Vec<String>,
    selected: usize,
}

impl RomBrowser {
    /// Scans the data directory for cartridge files. Finding none is not an
    /// error; the marker file is dropped instead and the list stays empty.
    pub fn scan(vfs: &dyn Vfs, dir: &str) -> Result<Self> {
        let mut files: Vec<String> = vfs
            .list(dir)?
            .into_iter()
            .filter(|name| is_rom_file(name))
            .collect();
        files.sort();

        if files.is_empty() {
            log::info!("no ROMs found in '{dir}'");
            if let Err(err) = vfs.write(EMPTY_MARKER_FILE, b"") {
                log::warn!("could not create '{EMPTY_MARKER_FILE}': {err}");
            }
        } else {
            log::info!("found {} ROM(s):", files.len());
            for file in &files {
                log::info!("  {file}");
            }
        }

        Ok(Self { files, selected: 0 })
    }

    pub fn files(&self) -> &[String] {
        &self.files
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Repaints the current state through the view.
    pub fn redraw(&self, view: &mut dyn MenuView) {
        if self.files.is_empty() {
            view.show_empty_hint();
        } else {
            view.redraw(&self.files, self.selected);
        }
    }

    /// Applies this tick's freshly pushed buttons. Returns the chosen ROM
    /// path when A confirms a selection.
    pub fn update(&mut self, pushed: JoypadState, view: &mut dyn MenuView) -> Option<String> {
        if self.files.is_empty() {
            return None;
        }
        if pushed.contains(JoypadState::A) {
            return Some(self.files[self.selected].clone());
        }
        if pushed.contains(JoypadState::UP) {
            self.selected = self
                .selected
                .checked_sub(1)
                .unwrap_or(self.files.len() - 1);
            view.redraw(&self.files, self.selected);
        }
        if pushed.contains(JoypadState::DOWN) {
            self.selected = (self.selected + 1) % self.files.len();
            view.redraw(&self.files, self.selected);
        }
        None
    }
}

fn is_rom_file(name: &str) -> bool {
    ROM_EXTENSIONS.iter().any(|ext| name.ends_with(ext))
}
