use crate::map::{Lod, MapRenderer};

/// Very coarse continent outlines as (lon, lat), used when no Natural Earth
/// files are available. Enough to place markers in context, nothing more.
const OUTLINES: &[&[(f64, f64)]] = &[
    // North America
    &[
        (-166.0, 68.0), (-162.0, 60.0), (-152.0, 58.0), (-136.0, 58.0), (-124.0, 48.0),
        (-124.0, 40.0), (-117.0, 32.0), (-110.0, 23.0), (-105.0, 20.0), (-95.0, 16.0),
        (-88.0, 14.0), (-83.0, 9.0), (-78.0, 8.0), (-83.0, 15.0), (-88.0, 21.0),
        (-97.0, 22.0), (-97.0, 28.0), (-90.0, 29.5), (-83.0, 29.0), (-80.0, 25.5),
        (-81.0, 31.0), (-76.0, 35.0), (-70.0, 42.0), (-66.0, 44.5), (-60.0, 46.0),
        (-56.0, 52.0), (-62.0, 58.0), (-78.0, 62.0), (-94.0, 60.0), (-96.0, 68.0),
        (-115.0, 69.0), (-140.0, 70.0), (-166.0, 68.0),
    ],
    // South America
    &[
        (-78.0, 8.0), (-72.0, 12.0), (-62.0, 10.5), (-52.0, 5.0), (-50.0, 0.0),
        (-44.0, -2.5), (-35.0, -6.0), (-39.0, -13.0), (-41.0, -22.0), (-48.0, -26.0),
        (-53.0, -34.0), (-58.0, -38.5), (-65.0, -41.0), (-68.0, -52.0), (-74.0, -52.0),
        (-73.0, -42.0), (-71.5, -30.0), (-70.0, -18.0), (-76.0, -14.0), (-81.0, -5.0),
        (-80.0, 1.0), (-78.0, 8.0),
    ],
    // Europe
    &[
        (-9.5, 37.0), (-6.0, 36.0), (-2.0, 36.8), (3.0, 42.5), (7.5, 43.8),
        (12.5, 44.0), (15.5, 38.0), (18.5, 40.0), (19.5, 42.0), (23.0, 37.0),
        (26.5, 40.5), (29.0, 41.2), (28.0, 44.0), (30.0, 46.0), (34.0, 44.5),
        (38.0, 47.0), (40.0, 43.5), (42.0, 42.0), (50.0, 46.0), (60.0, 55.0),
        (60.0, 68.0), (44.0, 68.0), (33.0, 69.5), (25.0, 71.0), (15.0, 68.5),
        (5.0, 62.0), (5.5, 58.0), (8.0, 57.0), (8.5, 54.0), (4.0, 52.0),
        (-1.5, 49.0), (-4.5, 48.0), (-1.5, 46.0), (-2.0, 43.5), (-9.0, 43.0),
        (-9.5, 37.0),
    ],
    // Africa
    &[
        (-17.0, 21.0), (-16.5, 14.0), (-13.0, 9.0), (-8.0, 4.5), (-2.0, 5.0),
        (5.0, 6.0), (9.5, 4.0), (9.0, -1.0), (12.0, -6.0), (13.5, -12.0),
        (11.5, -17.0), (15.0, -27.0), (18.0, -34.5), (22.0, -34.0), (27.0, -33.5),
        (32.5, -28.5), (35.5, -24.0), (35.0, -17.0), (40.5, -15.0), (39.5, -6.0),
        (42.0, -1.0), (51.0, 11.5), (43.0, 12.0), (39.0, 16.5), (34.0, 27.0),
        (32.5, 30.5), (25.0, 31.8), (20.0, 30.5), (19.0, 32.5), (11.0, 33.0),
        (10.5, 37.0), (3.0, 36.8), (-5.5, 35.8), (-10.0, 29.0), (-17.0, 21.0),
    ],
    // Asia
    &[
        (26.5, 40.5), (36.0, 36.5), (35.0, 32.5), (34.3, 31.2), (32.5, 30.5),
        (34.0, 27.0), (39.0, 21.0), (43.0, 12.8), (52.0, 16.0), (57.0, 19.0),
        (59.8, 22.5), (56.0, 26.5), (51.0, 24.5), (48.0, 30.0), (57.0, 25.5),
        (66.0, 25.0), (72.5, 21.0), (77.0, 8.0), (80.5, 15.5), (87.0, 21.5),
        (92.0, 22.0), (98.0, 16.0), (100.5, 13.5), (103.5, 1.5), (104.5, 10.5),
        (109.0, 12.0), (106.5, 20.5), (111.0, 21.5), (121.0, 28.0), (122.0, 31.0),
        (119.0, 35.0), (122.0, 40.0), (129.5, 42.5), (140.5, 48.5), (141.0, 53.5),
        (156.0, 59.5), (163.0, 60.0), (180.0, 65.0), (180.0, 69.5), (160.0, 70.0),
        (140.0, 72.5), (113.0, 73.5), (104.0, 77.5), (80.0, 72.0), (68.0, 69.0),
        (60.0, 68.0), (60.0, 55.0), (50.0, 46.0), (42.0, 42.0), (40.0, 41.0),
        (30.0, 41.2), (26.5, 40.5),
    ],
    // Australia
    &[
        (114.0, -22.0), (115.0, -34.0), (118.0, -35.0), (124.0, -33.5), (131.0, -31.5),
        (138.0, -35.0), (141.0, -38.0), (146.5, -39.0), (150.0, -37.5), (153.5, -28.0),
        (153.0, -25.0), (146.0, -19.0), (142.5, -10.7), (141.0, -17.0), (136.5, -15.0),
        (137.0, -12.0), (131.0, -11.5), (126.0, -14.0), (122.0, -18.0), (114.0, -22.0),
    ],
];

/// Register the built-in outlines as the low-detail coastline layer
pub fn generate_simple_world(renderer: &mut MapRenderer) {
    for outline in OUTLINES {
        renderer.add_coastline(outline.to_vec(), Lod::Low);
    }
}
