use ratatui::layout::{Constraint, Direction, Layout, Margin, Position, Rect};

pub const SIDEBAR_WIDTH: u16 = 30;
const DETAIL_WIDTH: u16 = 46;

/// Screen regions, shared by rendering and mouse hit testing so both agree
/// on where the map is.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScreenLayout {
    pub tabs: Rect,
    /// Everything between the tabs and the status bar
    pub body: Rect,
    pub sidebar: Rect,
    /// Bordered map block
    pub map: Rect,
    /// Detail panel drawn over the right edge of the map
    pub detail: Rect,
    pub status: Rect,
}

impl ScreenLayout {
    pub fn new(area: Rect) -> Self {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Tabs
                Constraint::Min(3),    // Body
                Constraint::Length(1), // Status bar
            ])
            .split(area);
        let body = rows[1];

        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(10)])
            .split(body);
        let map = cols[1];

        let detail_width = DETAIL_WIDTH.min(map.width / 2);
        let detail = Rect::new(map.right() - detail_width, map.y, detail_width, map.height);

        Self {
            tabs: rows[0],
            body,
            sidebar: cols[0],
            map,
            detail,
            status: rows[2],
        }
    }

    /// Drawable map area inside the border
    pub fn map_inner(&self) -> Rect {
        self.map.inner(Margin::new(1, 1))
    }

    /// Map-relative character cell under a terminal position
    pub fn map_cell(&self, col: u16, row: u16) -> Option<(u16, u16)> {
        let inner = self.map_inner();
        inner
            .contains(Position::new(col, row))
            .then(|| (col - inner.x, row - inner.y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_regions_tile_the_screen() {
        let layout = ScreenLayout::new(Rect::new(0, 0, 120, 40));
        assert_eq!(layout.tabs, Rect::new(0, 0, 120, 1));
        assert_eq!(layout.status, Rect::new(0, 39, 120, 1));
        assert_eq!(layout.sidebar, Rect::new(0, 1, SIDEBAR_WIDTH, 38));
        assert_eq!(layout.map, Rect::new(SIDEBAR_WIDTH, 1, 90, 38));
        assert_eq!(layout.detail.right(), layout.map.right());
        assert_eq!(layout.detail.width, 45);
    }

    #[test]
    fn test_map_cell_is_relative_to_inner_area() {
        let layout = ScreenLayout::new(Rect::new(0, 0, 120, 40));
        assert_eq!(layout.map_cell(SIDEBAR_WIDTH + 1, 2), Some((0, 0)));
        assert_eq!(layout.map_cell(SIDEBAR_WIDTH, 2), None);
        assert_eq!(layout.map_cell(5, 5), None);
    }
}
