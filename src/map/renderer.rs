use crate::braille::BrailleCanvas;
use crate::map::geometry::draw_line;
use crate::map::projection::Viewport;

/// A geographic line as (lon, lat) pairs
pub type LineString = Vec<(f64, f64)>;

/// Level of detail for basemap data
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Lod {
    Low,    // 110m - world view
    Medium, // 50m - continental
    High,   // 10m - regional
}

impl Lod {
    pub fn from_zoom(zoom: f64) -> Self {
        if zoom < 2.0 {
            Lod::Low
        } else if zoom < 8.0 {
            Lod::Medium
        } else {
            Lod::High
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Lod::Low => "110m",
            Lod::Medium => "50m",
            Lod::High => "10m",
        }
    }
}

/// Basemap lines at three resolutions
#[derive(Default)]
struct LodSet {
    low: Vec<LineString>,
    medium: Vec<LineString>,
    high: Vec<LineString>,
}

impl LodSet {
    fn push(&mut self, line: LineString, lod: Lod) {
        match lod {
            Lod::Low => self.low.push(line),
            Lod::Medium => self.medium.push(line),
            Lod::High => self.high.push(line),
        }
    }

    /// Best available set at or below the requested detail
    fn get(&self, lod: Lod) -> &[LineString] {
        let candidates = match lod {
            Lod::High => [&self.high, &self.medium, &self.low],
            Lod::Medium => [&self.medium, &self.low, &self.low],
            Lod::Low => [&self.low, &self.medium, &self.medium],
        };
        candidates
            .into_iter()
            .find(|set| !set.is_empty())
            .map(|set| set.as_slice())
            .unwrap_or(&[])
    }

    fn is_empty(&self) -> bool {
        self.low.is_empty() && self.medium.is_empty() && self.high.is_empty()
    }
}

/// Basemap layers drawn into separate canvases so the UI can colour them
pub struct MapLayers {
    pub coastlines: BrailleCanvas,
    pub borders: BrailleCanvas,
}

/// Coastline and border renderer
pub struct MapRenderer {
    coastlines: LodSet,
    borders: LodSet,
    pub show_borders: bool,
}

impl MapRenderer {
    pub fn new() -> Self {
        Self {
            coastlines: LodSet::default(),
            borders: LodSet::default(),
            show_borders: true,
        }
    }

    pub fn add_coastline(&mut self, line: LineString, lod: Lod) {
        self.coastlines.push(line, lod);
    }

    pub fn add_border(&mut self, line: LineString, lod: Lod) {
        self.borders.push(line, lod);
    }

    pub fn has_data(&self) -> bool {
        !self.coastlines.is_empty()
    }

    pub fn toggle_borders(&mut self) {
        self.show_borders = !self.show_borders;
    }

    /// Draw the basemap for a `width` x `height` character area
    pub fn render(&self, width: usize, height: usize, viewport: &Viewport) -> MapLayers {
        let lod = Lod::from_zoom(viewport.zoom);
        let mut coastlines = BrailleCanvas::new(width, height);
        let mut borders = BrailleCanvas::new(width, height);

        for line in self.coastlines.get(lod) {
            draw_linestring(&mut coastlines, line, viewport);
        }
        if self.show_borders {
            for line in self.borders.get(lod) {
                draw_linestring(&mut borders, line, viewport);
            }
        }

        MapLayers { coastlines, borders }
    }
}

impl Default for MapRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Draw a linestring, skipping off-screen segments and antimeridian jumps
fn draw_linestring(canvas: &mut BrailleCanvas, line: &LineString, viewport: &Viewport) {
    let mut prev: Option<(i32, i32)> = None;
    for &(lon, lat) in line {
        let p = viewport.project(lon, lat);
        if let Some(q) = prev {
            let jump = ((p.0 - q.0).abs() + (p.1 - q.1).abs()) as usize;
            if jump < viewport.width && viewport.line_might_be_visible(q, p) {
                draw_line(canvas, q, p);
            }
        }
        prev = Some(p);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lod_falls_back_to_coarser_data() {
        let mut renderer = MapRenderer::new();
        renderer.add_coastline(vec![(-10.0, 0.0), (10.0, 0.0)], Lod::Low);
        assert_eq!(renderer.coastlines.get(Lod::High).len(), 1);
        assert_eq!(Lod::from_zoom(1.0), Lod::Low);
        assert_eq!(Lod::from_zoom(10.0), Lod::High);
    }

    #[test]
    fn test_render_draws_visible_coastline() {
        let mut renderer = MapRenderer::new();
        renderer.add_coastline(vec![(-20.0, 0.0), (20.0, 0.0)], Lod::Low);
        let viewport = Viewport::new(0.0, 0.0, 1.0, 80, 40);
        let layers = renderer.render(40, 10, &viewport);
        let drawn: usize = (0..40).filter(|&cx| layers.coastlines.glyph(cx, 5).is_some()).count();
        assert!(drawn > 0);
        assert!((0..10).all(|cy| (0..40).all(|cx| layers.borders.glyph(cx, cy).is_none())));
    }

    #[test]
    fn test_hidden_borders_are_not_drawn() {
        let mut renderer = MapRenderer::new();
        renderer.add_border(vec![(-20.0, 0.0), (20.0, 0.0)], Lod::Medium);
        renderer.toggle_borders();
        let viewport = Viewport::new(0.0, 0.0, 1.0, 80, 40);
        let layers = renderer.render(40, 10, &viewport);
        assert!((0..40).all(|cx| layers.borders.glyph(cx, 5).is_none()));
    }
}
