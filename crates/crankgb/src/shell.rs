use std::ops::Range;

use anyhow::Result;
use crankgb_core::{EmulationCore, JoypadState, Vfs};

use crate::browser::{MenuView, RomBrowser};
use crate::display::{encode, PackedFrame, ShadeBuffer};
use crate::input::GestureMapper;
use crate::session::SessionController;

/// Everything the host hands us on one tick.
#[derive(Debug, Clone, Copy)]
pub struct HostInput {
    /// Buttons currently held down.
    pub held: JoypadState,
    /// Buttons freshly pushed this tick (used for menu navigation).
    pub pushed: JoypadState,
    /// Crank rotation since the previous tick, in degrees.
    pub crank_delta: f32,
}

/// What the host should do after a tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickReport {
    /// False once the shell wants the host to stop ticking.
    pub keep_running: bool,
    /// Destination rows to present, when a frame was (re-)encoded this tick.
    pub dirty_rows: Option<Range<usize>>,
}

impl TickReport {
    fn idle() -> Self {
        Self {
            keep_running: true,
            dirty_rows: None,
        }
    }
}

/// The host-facing entry point. Owns the session, the ROM browser, the
/// gesture mapper and both framebuffers; the host drives it with
/// [`Shell::update`] once per refresh and wires the menu actions and the
/// terminate hook to the matching methods.
pub struct Shell<C: EmulationCore, V: Vfs, M: MenuView> {
    session: SessionController<C, V>,
    browser: RomBrowser,
    mapper: GestureMapper,
    shades: ShadeBuffer,
    frame: PackedFrame,
    view: M,
}

impl<C: EmulationCore, V: Vfs, M: MenuView> Shell<C, V, M> {
    /// Startup hook: scans for ROMs and paints the selection menu.
    pub fn startup(core: C, vfs: V, mut view: M) -> Result<Self> {
        let browser = RomBrowser::scan(&vfs, ".")?;
        browser.redraw(&mut view);
        Ok(Self {
            session: SessionController::new(core, vfs),
            browser,
            mapper: GestureMapper::new(),
            shades: ShadeBuffer::new(),
            frame: PackedFrame::new(),
            view,
        })
    }

    /// One cooperative tick: menu navigation while no cartridge is loaded,
    /// otherwise input mapping, one core frame and (unless the core flags
    /// frame-skip) re-encoding the display.
    pub fn update(&mut self, input: HostInput) -> TickReport {
        if !self.session.is_active() {
            self.choose_rom_tick(input);
            return TickReport::idle();
        }

        let joypad = self.mapper.update(input.held, input.crank_delta);
        let status = self.session.run_frame(joypad, &mut self.shades);
        let dirty_rows = status
            .display_updated
            .then(|| encode(&self.shades, &mut self.frame));
        TickReport {
            keep_running: true,
            dirty_rows,
        }
    }

    fn choose_rom_tick(&mut self, input: HostInput) {
        let Some(path) = self.browser.update(input.pushed, &mut self.view) else {
            return;
        };
        // A fatal load error abandons the attempt and returns to the menu;
        // the host process keeps running.
        if let Err(err) = self.session.load(&path) {
            log::error!("{err:#}");
            self.browser.redraw(&mut self.view);
        }
    }

    /// Menu action: flush save-RAM to storage.
    pub fn save(&self) {
        self.session.save();
    }

    /// Menu action: reset the emulation core, keeping the cartridge.
    pub fn reset(&mut self) {
        self.session.reset();
    }

    /// Menu action: save, drop the cartridge and go back to ROM selection.
    pub fn choose_new_rom(&mut self) {
        if !self.session.is_active() {
            return;
        }
        self.session.unload();
        self.browser.redraw(&mut self.view);
    }

    /// Termination hook: flush the save before the process goes away.
    pub fn terminate(&mut self) {
        self.session.unload();
    }

    /// The packed frame the host presents.
    pub fn frame(&self) -> &PackedFrame {
        &self.frame
    }

    pub fn is_rom_loaded(&self) -> bool {
        self.session.is_active()
    }
}
