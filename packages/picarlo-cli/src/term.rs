//! ANSI terminal rendering of the cell-grid surface.

use picarlo_core::{Cell, GridSurface, Surface};
use std::io::{self, Write};

const HIDE_CURSOR: &str = "\x1b[?25l";
const SHOW_CURSOR: &str = "\x1b[?25h";
const CLEAR_SCREEN: &str = "\x1b[2J";
const CURSOR_HOME: &str = "\x1b[H";
const COLOR_RESET: &str = "\x1b[0m";
const COLOR_FRAME: &str = "\x1b[2m";
const COLOR_INSIDE: &str = "\x1b[34m";
const COLOR_OUTSIDE: &str = "\x1b[31m";

/// Grid surface presented on the terminal.
///
/// Cells are two columns wide to roughly square the aspect ratio. Each flush
/// repaints the whole grid from the cursor-home position; write errors on
/// stdout are ignored.
pub struct TermSurface {
    grid: GridSurface,
}

impl TermSurface {
    pub fn new(size: u32) -> Self {
        Self {
            grid: GridSurface::new(size),
        }
    }

    /// Escape sequence that parks the cursor on the first line below a canvas
    /// of the given size.
    pub fn cursor_below(size: u32) -> String {
        format!("\x1b[{};1H", size + 1)
    }

    fn repaint(&self) -> io::Result<()> {
        let size = self.grid.size();
        let mut frame = String::with_capacity((size * size * 12) as usize);
        frame.push_str(CURSOR_HOME);
        for py in 0..size {
            for cell in self.grid.row(py) {
                match cell {
                    Cell::Blank => frame.push_str("  "),
                    Cell::Frame => {
                        frame.push_str(COLOR_FRAME);
                        frame.push_str("##");
                        frame.push_str(COLOR_RESET);
                    }
                    Cell::Inside => {
                        frame.push_str(COLOR_INSIDE);
                        frame.push_str("• ");
                        frame.push_str(COLOR_RESET);
                    }
                    Cell::Outside => {
                        frame.push_str(COLOR_OUTSIDE);
                        frame.push_str("• ");
                        frame.push_str(COLOR_RESET);
                    }
                }
            }
            frame.push_str("\r\n");
        }

        let stdout = io::stdout();
        let mut handle = stdout.lock();
        handle.write_all(frame.as_bytes())?;
        handle.flush()
    }
}

impl Surface for TermSurface {
    fn size(&self) -> u32 {
        self.grid.size()
    }

    fn reset(&mut self) {
        self.grid.reset();
        print!("{}{}", CLEAR_SCREEN, HIDE_CURSOR);
        let _ = self.repaint();
    }

    fn plot(&mut self, x: f64, y: f64, inside: bool) {
        self.grid.plot(x, y, inside);
    }

    fn flush(&mut self) {
        let _ = self.repaint();
    }
}

impl Drop for TermSurface {
    fn drop(&mut self) {
        print!("{}", SHOW_CURSOR);
        let _ = io::stdout().flush();
    }
}
