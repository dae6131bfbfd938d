use std::f64::consts::PI;

const MIN_ZOOM: f64 = 0.5;
const MAX_ZOOM: f64 = 64.0;
const ZOOM_STEP: f64 = 1.5;

/// Web Mercator y in [0, 1] for a latitude in degrees
#[inline(always)]
fn mercator_y(lat: f64) -> f64 {
    let lat_rad = lat.clamp(-85.0511, 85.0511).to_radians();
    (1.0 - (lat_rad.tan() + 1.0 / lat_rad.cos()).ln() / PI) / 2.0
}

/// Inverse of [`mercator_y`]
#[inline(always)]
fn mercator_lat(y: f64) -> f64 {
    (PI * (1.0 - 2.0 * y)).sinh().atan().to_degrees()
}

/// Visible map area in Braille dot coordinates
#[derive(Clone, Debug, PartialEq)]
pub struct Viewport {
    /// Center longitude (-180 to 180)
    pub center_lon: f64,
    /// Center latitude (-85 to 85)
    pub center_lat: f64,
    pub zoom: f64,
    /// Canvas width in dots
    pub width: usize,
    /// Canvas height in dots
    pub height: usize,
}

impl Viewport {
    pub fn new(center_lon: f64, center_lat: f64, zoom: f64, width: usize, height: usize) -> Self {
        Self {
            center_lon,
            center_lat,
            zoom,
            width,
            height,
        }
    }

    /// Whole-world view, nudged north where most land is
    pub fn world(width: usize, height: usize) -> Self {
        Self::new(10.0, 20.0, 1.0, width, height)
    }

    pub fn resize(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
    }

    fn scale(&self) -> f64 {
        self.zoom * self.width.max(1) as f64
    }

    /// Pan by a dot delta
    pub fn pan(&mut self, dx: i32, dy: i32) {
        let scale = self.scale();
        let x = (self.center_lon + 180.0) / 360.0 + dx as f64 / scale;
        let y = mercator_y(self.center_lat) + dy as f64 / scale;
        self.center_lon = (x * 360.0).rem_euclid(360.0) - 180.0;
        self.center_lat = mercator_lat(y.clamp(0.0, 1.0)).clamp(-85.0, 85.0);
    }

    /// Move the center onto a coordinate without changing zoom
    pub fn center_on(&mut self, lon: f64, lat: f64) {
        self.center_lon = lon.clamp(-180.0, 180.0);
        self.center_lat = lat.clamp(-85.0, 85.0);
    }

    pub fn zoom_in(&mut self) {
        self.zoom = (self.zoom * ZOOM_STEP).min(MAX_ZOOM);
    }

    pub fn zoom_out(&mut self) {
        self.zoom = (self.zoom / ZOOM_STEP).max(MIN_ZOOM);
    }

    /// Zoom in keeping the point under (px, py) fixed
    pub fn zoom_in_at(&mut self, px: i32, py: i32) {
        self.zoom_at(px, py, ZOOM_STEP);
    }

    /// Zoom out keeping the point under (px, py) fixed
    pub fn zoom_out_at(&mut self, px: i32, py: i32) {
        self.zoom_at(px, py, 1.0 / ZOOM_STEP);
    }

    fn zoom_at(&mut self, px: i32, py: i32, factor: f64) {
        let (lon, lat) = self.unproject(px, py);
        self.zoom = (self.zoom * factor).clamp(MIN_ZOOM, MAX_ZOOM);
        let (new_px, new_py) = self.project(lon, lat);
        self.pan(new_px - px, new_py - py);
    }

    /// Dot coordinates back to (lon, lat)
    pub fn unproject(&self, px: i32, py: i32) -> (f64, f64) {
        let scale = self.scale();
        let center_x = (self.center_lon + 180.0) / 360.0;
        let x = (px as f64 - self.width as f64 / 2.0) / scale + center_x;
        let y = (py as f64 - self.height as f64 / 2.0) / scale + mercator_y(self.center_lat);
        (x * 360.0 - 180.0, mercator_lat(y))
    }

    /// (lon, lat) to dot coordinates
    pub fn project(&self, lon: f64, lat: f64) -> (i32, i32) {
        let scale = self.scale();
        let x = (lon + 180.0) / 360.0;
        let center_x = (self.center_lon + 180.0) / 360.0;
        let px = (x - center_x) * scale + self.width as f64 / 2.0;
        let py = (mercator_y(lat) - mercator_y(self.center_lat)) * scale + self.height as f64 / 2.0;
        (px as i32, py as i32)
    }

    /// Character cell holding (lon, lat), if it falls on the canvas
    pub fn cell_of(&self, lon: f64, lat: f64) -> Option<(u16, u16)> {
        let (px, py) = self.project(lon, lat);
        if px < 0 || py < 0 || px >= self.width as i32 || py >= self.height as i32 {
            return None;
        }
        Some(((px / 2) as u16, (py / 4) as u16))
    }

    /// Rough bounding-box test for a segment
    pub fn line_might_be_visible(&self, p1: (i32, i32), p2: (i32, i32)) -> bool {
        p1.0.max(p2.0) >= 0
            && p1.0.min(p2.0) < self.width as i32
            && p1.1.max(p2.1) >= 0
            && p1.1.min(p2.1) < self.height as i32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_center() {
        let vp = Viewport::new(0.0, 0.0, 1.0, 100, 100);
        assert_eq!(vp.project(0.0, 0.0), (50, 50));
    }

    #[test]
    fn test_unproject_inverts_project() {
        let vp = Viewport::new(30.0, 40.0, 3.0, 400, 200);
        let (px, py) = vp.project(35.2, 31.7);
        let (lon, lat) = vp.unproject(px, py);
        assert!((lon - 35.2).abs() < 0.5);
        assert!((lat - 31.7).abs() < 0.5);
    }

    #[test]
    fn test_pan_moves_center_east() {
        let mut vp = Viewport::new(0.0, 0.0, 1.0, 100, 100);
        vp.pan(10, 0);
        assert!(vp.center_lon > 0.0);
        vp.pan(0, -10);
        assert!(vp.center_lat > 0.0);
    }

    #[test]
    fn test_zoom_is_clamped() {
        let mut vp = Viewport::world(100, 100);
        for _ in 0..50 {
            vp.zoom_in();
        }
        assert_eq!(vp.zoom, MAX_ZOOM);
        for _ in 0..50 {
            vp.zoom_out();
        }
        assert_eq!(vp.zoom, MIN_ZOOM);
    }

    #[test]
    fn test_zoom_at_keeps_point_fixed() {
        let mut vp = Viewport::new(0.0, 0.0, 2.0, 400, 200);
        let before = vp.unproject(300, 60);
        vp.zoom_in_at(300, 60);
        let after = vp.unproject(300, 60);
        assert!((before.0 - after.0).abs() < 1.0);
        assert!((before.1 - after.1).abs() < 1.0);
    }

    #[test]
    fn test_cell_of_center_and_offscreen() {
        let mut vp = Viewport::new(0.0, 0.0, 1.0, 100, 100);
        assert_eq!(vp.cell_of(0.0, 0.0), Some((25, 12)));
        vp.center_on(170.0, 0.0);
        vp.zoom = 8.0;
        assert_eq!(vp.cell_of(-60.0, 0.0), None);
    }
}
