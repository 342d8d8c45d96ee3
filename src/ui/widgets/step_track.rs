//! Step progress track for the planning form

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};

/// Cell drawn for completed and active steps
const FILLED: char = '█';
/// Cell drawn for steps not reached yet
const EMPTY: char = '░';
/// Marker drawn at the boundary between two steps
const DIVIDER: char = '│';

/// A one-row bar split into equal segments, one per step
pub struct StepTrack {
    /// Active step (1-based)
    active: u8,
    /// Number of steps
    total: u8,
    /// Style for reached segments
    filled_style: Style,
    /// Style for segments not reached yet
    empty_style: Style,
}

impl StepTrack {
    pub fn new(active: u8, total: u8) -> Self {
        Self {
            active,
            total: total.max(1),
            filled_style: Style::default().fg(Color::Cyan),
            empty_style: Style::default().fg(Color::DarkGray),
        }
    }

    pub fn filled_style(mut self, style: Style) -> Self {
        self.filled_style = style;
        self
    }

    pub fn empty_style(mut self, style: Style) -> Self {
        self.empty_style = style;
        self
    }

    /// Number of cells filled for a track `width` cells wide
    fn filled_cells(&self, width: u16) -> u16 {
        let active = u32::from(self.active.min(self.total));
        (u32::from(width) * active / u32::from(self.total)) as u16
    }

    /// Whether column `x` sits on a step boundary
    fn is_boundary(&self, x: u16, width: u16) -> bool {
        (1..self.total).any(|step| u32::from(width) * u32::from(step) / u32::from(self.total) == u32::from(x))
    }
}

impl Widget for StepTrack {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        let filled = self.filled_cells(area.width);

        for x in 0..area.width {
            let (symbol, style) = if x < filled {
                (FILLED, self.filled_style)
            } else if self.is_boundary(x, area.width) {
                (DIVIDER, self.empty_style)
            } else {
                (EMPTY, self.empty_style)
            };

            if let Some(cell) = buf.cell_mut((area.x + x, area.y)) {
                cell.set_char(symbol).set_style(style);
            }
        }
    }
}
