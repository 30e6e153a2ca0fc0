//! Console rendering of a universe

use crate::config::{GlyphConfig, ViewportConfig, MAX_VIEWPORT_AREA};
use crate::controller::UniverseView;
use crate::error::ConwayError;
use crate::game_of_life::Universe;
use std::io::{self, Write};

/// Render the part of the universe inside `viewport`, one line per row.
///
/// Cells outside the viewport are clipped. The viewport is expected to pass
/// [`ViewportConfig::fits_screen`]; the board is allocated in full.
pub fn render_board(universe: &Universe, viewport: &ViewportConfig, glyphs: &GlyphConfig) -> String {
    let width = viewport.width();
    let height = viewport.height();
    let mut rows = vec![vec![glyphs.dead; width]; height];

    for cell in universe.live_cells() {
        if viewport.contains(cell) {
            let col = cell.x().abs_diff(viewport.min_x) as usize;
            let row = cell.y().abs_diff(viewport.min_y) as usize;
            rows[row][col] = glyphs.live;
        }
    }

    let mut output = String::with_capacity(height * (width + 1));
    for row in rows {
        output.extend(row);
        output.push('\n');
    }
    output
}

/// Header block shown above the board
pub fn render_header(universe: &Universe, viewport: &ViewportConfig, glyphs: &GlyphConfig) -> String {
    let rule: String = std::iter::repeat(glyphs.header).take(viewport.width()).collect();
    format!(
        "\n{}\nConway's Game of Life\nGeneration {:0>10}   Live cells: {}\n{}\n",
        rule,
        universe.generation(),
        universe.population(),
        rule
    )
}

/// Prints a header and the board on every refresh
pub struct ConsoleView<W: Write> {
    out: W,
    viewport: ViewportConfig,
    glyphs: GlyphConfig,
}

impl<W: Write> ConsoleView<W> {
    pub fn new(out: W, viewport: ViewportConfig, glyphs: GlyphConfig) -> Self {
        Self { out, viewport, glyphs }
    }

    /// Consume the view and hand back its writer
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> UniverseView for ConsoleView<W> {
    fn refresh(&mut self, universe: &Universe) -> Result<(), ConwayError> {
        if !self.viewport.fits_screen() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("viewport exceeds {} cells", MAX_VIEWPORT_AREA),
            )
            .into());
        }
        write!(self.out, "{}", render_header(universe, &self.viewport, &self.glyphs))?;
        write!(self.out, "{}", render_board(universe, &self.viewport, &self.glyphs))?;
        self.out.flush()?;
        Ok(())
    }
}
