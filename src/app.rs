use crate::config::AppConfig;
use crate::contribute::{ContributionForm, IdeaSink, SimulatedSink};
use crate::data::{Catalog, CatalogLoader, LoadState};
use crate::map::{hit_test, place_markers, Lod, MapRenderer, Viewport};
use crate::ui::layout::ScreenLayout;
use crate::zones::{
    compute_visible, CaseStudy, ConflictZone, FilterCriteria, FilterDimension, FilterUpdate,
    FilterValue, Selection, SelectionPolicy, ZoneSummary,
};
use ratatui::layout::Rect;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// How long a status notice stays up
const NOTICE_TTL: Duration = Duration::from_secs(4);

/// Top-level screens
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum View {
    Map,
    CaseStudies,
    Contribute,
}

impl View {
    pub const ALL: [View; 3] = [View::Map, View::CaseStudies, View::Contribute];

    pub fn title(self) -> &'static str {
        match self {
            View::Map => "Map",
            View::CaseStudies => "Case Studies",
            View::Contribute => "Contribute",
        }
    }
}

/// Where keystrokes go while the map view is showing
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Focus {
    Map,
    Search,
    Sidebar,
}

/// Transient one-line message in the status bar
#[derive(Clone, Debug)]
pub struct Notice {
    pub text: String,
    since: Instant,
}

/// Application state
pub struct App {
    pub viewport: Viewport,
    pub map_renderer: MapRenderer,
    pub load_state: LoadState,
    loader: Option<CatalogLoader>,
    pub criteria: FilterCriteria,
    pub selection: Selection,
    pub policy: SelectionPolicy,
    pub view: View,
    pub focus: Focus,
    /// Row in the flattened filter list
    pub sidebar_cursor: usize,
    /// Row in the case study list
    pub case_cursor: usize,
    /// Case study being read, if any
    pub open_case: Option<String>,
    pub case_scroll: u16,
    pub form: ContributionForm,
    sink: Arc<dyn IdeaSink>,
    pub notice: Option<Notice>,
    pub should_quit: bool,
    /// Last mouse position for drag tracking
    pub last_mouse: Option<(u16, u16)>,
    /// Set once a press has moved, so release doesn't count as a click
    dragged: bool,
    area: Rect,
}

impl App {
    /// Start with an empty map and the dataset loading in the background
    pub fn new(width: u16, height: u16, config: &AppConfig) -> Self {
        let loader = CatalogLoader::spawn(config.dataset.clone(), config.load_delay);
        let sink: Arc<dyn IdeaSink> = Arc::new(SimulatedSink::new(config.submit_delay));
        let mut app = Self::with_state(
            width,
            height,
            LoadState::Loading {
                since: Instant::now(),
            },
            sink,
        );
        app.loader = Some(loader);
        app.policy = config.selection_policy;
        app
    }

    /// Start with an already loaded catalog
    pub fn with_catalog(
        width: u16,
        height: u16,
        catalog: Catalog,
        sink: Arc<dyn IdeaSink>,
    ) -> Self {
        Self::with_state(width, height, LoadState::Ready(catalog), sink)
    }

    fn with_state(width: u16, height: u16, load_state: LoadState, sink: Arc<dyn IdeaSink>) -> Self {
        let area = Rect::new(0, 0, width, height);
        let inner = ScreenLayout::new(area).map_inner();
        Self {
            // Braille gives 2x4 resolution per character
            viewport: Viewport::world(inner.width as usize * 2, inner.height as usize * 4),
            map_renderer: MapRenderer::new(),
            load_state,
            loader: None,
            criteria: FilterCriteria::default(),
            selection: Selection::new(),
            policy: SelectionPolicy::default(),
            view: View::Map,
            focus: Focus::Map,
            sidebar_cursor: 0,
            case_cursor: 0,
            open_case: None,
            case_scroll: 0,
            form: ContributionForm::new(),
            sink,
            notice: None,
            should_quit: false,
            last_mouse: None,
            dragged: false,
            area,
        }
    }

    pub fn layout(&self) -> ScreenLayout {
        ScreenLayout::new(self.area)
    }

    /// Update viewport size when terminal resizes
    pub fn resize(&mut self, width: u16, height: u16) {
        self.area = Rect::new(0, 0, width, height);
        let inner = self.layout().map_inner();
        self.viewport
            .resize(inner.width as usize * 2, inner.height as usize * 4);
    }

    /// Per-frame housekeeping: collect finished background work, expire notices
    pub fn tick(&mut self) {
        if let Some(loader) = &self.loader {
            if let Some(result) = loader.try_finish() {
                self.loader = None;
                self.load_state = match result {
                    Ok(catalog) => LoadState::Ready(catalog),
                    Err(e) => {
                        warn!(error = %e, "Dataset unavailable");
                        LoadState::Failed(e.to_string())
                    }
                };
            }
        }
        self.form.poll();
        if self
            .notice
            .as_ref()
            .is_some_and(|n| n.since.elapsed() >= NOTICE_TTL)
        {
            self.notice = None;
        }
    }

    pub fn catalog(&self) -> Option<&Catalog> {
        self.load_state.catalog()
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    pub fn notify(&mut self, text: impl Into<String>) {
        self.notice = Some(Notice {
            text: text.into(),
            since: Instant::now(),
        });
    }

    /// Zones passing the current criteria, in dataset order
    pub fn visible_zones(&self) -> Vec<&ConflictZone> {
        match self.catalog() {
            Some(catalog) => compute_visible(&catalog.zones, &self.criteria),
            None => Vec::new(),
        }
    }

    pub fn result_count(&self) -> usize {
        self.visible_zones().len()
    }

    pub fn summary(&self) -> ZoneSummary {
        ZoneSummary::of(&self.visible_zones())
    }

    pub fn search(&mut self, text: impl Into<String>) {
        self.criteria.update(FilterUpdate::search(text));
        self.after_filter_change();
    }

    pub fn push_search_char(&mut self, c: char) {
        let mut text = self.criteria.search.clone();
        text.push(c);
        self.search(text);
    }

    pub fn pop_search_char(&mut self) {
        let mut text = self.criteria.search.clone();
        text.pop();
        self.search(text);
    }

    pub fn toggle_filter(&mut self, value: FilterValue) {
        self.criteria.toggle(value);
        debug!(filter = value.label(), active = self.criteria.contains(value), "Filter toggled");
        self.after_filter_change();
    }

    pub fn clear_filters(&mut self) {
        self.criteria.clear();
        self.after_filter_change();
    }

    fn after_filter_change(&mut self) {
        let Some(catalog) = self.load_state.catalog() else {
            return;
        };
        let visible = compute_visible(&catalog.zones, &self.criteria);
        if self.selection.reconcile(&visible, self.policy) {
            debug!("Selected zone hidden by filters, selection cleared");
        }
    }

    /// Every sidebar row in display order
    pub fn sidebar_items() -> Vec<FilterValue> {
        FilterDimension::ALL
            .iter()
            .flat_map(|dim| dim.values())
            .collect()
    }

    pub fn sidebar_move(&mut self, delta: isize) {
        let len = Self::sidebar_items().len() as isize;
        self.sidebar_cursor = (self.sidebar_cursor as isize + delta).rem_euclid(len) as usize;
    }

    pub fn toggle_sidebar_item(&mut self) {
        if let Some(value) = Self::sidebar_items().get(self.sidebar_cursor).copied() {
            self.toggle_filter(value);
        }
    }

    pub fn selected_zone(&self) -> Option<&ConflictZone> {
        self.selection.selected_zone(&self.catalog()?.zones)
    }

    /// Select a zone from the full dataset by id. Unknown ids are ignored.
    pub fn select_zone(&mut self, id: &str) -> bool {
        let Some(catalog) = self.load_state.catalog() else {
            return false;
        };
        match catalog.zone(id) {
            Some(zone) => {
                self.selection.select(zone);
                info!(zone = %zone.id, "Zone selected");
                true
            }
            None => false,
        }
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    pub fn select_next(&mut self) {
        self.cycle_selection(1);
    }

    pub fn select_prev(&mut self) {
        self.cycle_selection(-1);
    }

    fn cycle_selection(&mut self, offset: isize) {
        let Some(catalog) = self.load_state.catalog() else {
            return;
        };
        let visible = compute_visible(&catalog.zones, &self.criteria);
        if self.selection.cycle(&visible, offset).is_some() {
            if let Some(zone) = self.selection.selected_zone(&catalog.zones) {
                self.viewport
                    .center_on(zone.coordinates.lon, zone.coordinates.lat);
            }
        }
    }

    /// Select the marker under a map click, or clear the selection on a miss
    pub fn handle_click(&mut self, col: u16, row: u16) {
        if self.view != View::Map {
            return;
        }
        let layout = self.layout();
        if self.selection.selected().is_some() && layout.detail.contains((col, row).into()) {
            return;
        }
        let Some(cell) = layout.map_cell(col, row) else {
            return;
        };
        let hit = {
            let visible = self.visible_zones();
            let markers = place_markers(&visible, &self.selection, &self.viewport);
            hit_test(&markers, cell).map(|m| m.zone_id.clone())
        };
        match hit {
            Some(id) => {
                self.select_zone(&id);
            }
            None => self.clear_selection(),
        }
    }

    /// Switch screens; leaving the map drops the selection
    pub fn switch_view(&mut self, view: View) {
        if self.view == View::Map && view != View::Map {
            self.clear_selection();
        }
        self.view = view;
        self.focus = Focus::Map;
    }

    /// Open the case study written about the selected zone
    pub fn open_case_study_for_selection(&mut self) {
        let Some(zone) = self.selected_zone() else {
            return;
        };
        let (zone_name, study) = {
            let study = self
                .catalog()
                .and_then(|c| c.case_study_for_zone(&zone.id))
                .map(|s| s.id.clone());
            (zone.name.clone(), study)
        };
        match study {
            Some(id) => {
                self.switch_view(View::CaseStudies);
                self.open_case_study(&id);
            }
            None => self.notify(format!("No case study for {zone_name} yet")),
        }
    }

    pub fn case_studies(&self) -> &[CaseStudy] {
        self.catalog().map(|c| c.case_studies.as_slice()).unwrap_or(&[])
    }

    pub fn open_case(&self) -> Option<&CaseStudy> {
        let id = self.open_case.as_deref()?;
        self.catalog()?.case_study(id)
    }

    pub fn open_case_study(&mut self, id: &str) {
        if let Some(idx) = self.case_studies().iter().position(|s| s.id == id) {
            self.case_cursor = idx;
            self.open_case = Some(id.to_string());
            self.case_scroll = 0;
        }
    }

    pub fn open_case_at_cursor(&mut self) {
        if let Some(id) = self.case_studies().get(self.case_cursor).map(|s| s.id.clone()) {
            self.open_case_study(&id);
        }
    }

    pub fn close_case_study(&mut self) {
        self.open_case = None;
    }

    pub fn case_cursor_move(&mut self, delta: isize) {
        let len = self.case_studies().len() as isize;
        if len > 0 {
            self.case_cursor = (self.case_cursor as isize + delta).rem_euclid(len) as usize;
        }
    }

    pub fn scroll_case(&mut self, delta: i32) {
        self.case_scroll = (self.case_scroll as i32 + delta).max(0) as u16;
    }

    pub fn submit_idea(&mut self) {
        if !self.form.submit(Arc::clone(&self.sink)) {
            let count = self.form.errors.len();
            if count > 0 {
                self.notify(format!("Please fix {count} field(s)"));
            }
        }
    }

    pub fn pan(&mut self, dx: i32, dy: i32) {
        self.viewport.pan(dx, dy);
    }

    pub fn zoom_in(&mut self) {
        self.viewport.zoom_in();
    }

    pub fn zoom_out(&mut self) {
        self.viewport.zoom_out();
    }

    /// Terminal position to map dot coordinates
    fn map_pixel(&self, col: u16, row: u16) -> Option<(i32, i32)> {
        let (cx, cy) = self.layout().map_cell(col, row)?;
        Some((cx as i32 * 2, cy as i32 * 4))
    }

    /// Zoom in towards a screen position (terminal column/row)
    pub fn zoom_in_at(&mut self, col: u16, row: u16) {
        if let Some((px, py)) = self.map_pixel(col, row) {
            self.viewport.zoom_in_at(px, py);
        }
    }

    /// Zoom out from a screen position (terminal column/row)
    pub fn zoom_out_at(&mut self, col: u16, row: u16) {
        if let Some((px, py)) = self.map_pixel(col, row) {
            self.viewport.zoom_out_at(px, py);
        }
    }

    pub fn reset_view(&mut self) {
        self.viewport = Viewport::world(self.viewport.width, self.viewport.height);
    }

    pub fn begin_press(&mut self, col: u16, row: u16) {
        self.last_mouse = Some((col, row));
        self.dragged = false;
    }

    /// Pan by the distance moved since the last drag event
    pub fn handle_drag(&mut self, x: u16, y: u16) {
        if let Some((last_x, last_y)) = self.last_mouse {
            let dx = last_x as i32 - x as i32;
            let dy = last_y as i32 - y as i32;
            // Less sensitive when zoomed out
            let scale = if self.viewport.zoom < 2.0 {
                2
            } else if self.viewport.zoom < 4.0 {
                3
            } else {
                4
            };
            if dx != 0 || dy != 0 {
                self.dragged = true;
            }
            self.pan(dx * scale, dy * scale);
        }
        self.last_mouse = Some((x, y));
    }

    /// Button released: a press that never moved is a click
    pub fn end_press(&mut self, col: u16, row: u16) {
        let was_click = self.last_mouse.is_some() && !self.dragged;
        self.last_mouse = None;
        self.dragged = false;
        if was_click {
            self.handle_click(col, row);
        }
    }

    pub fn zoom_level(&self) -> String {
        format!("{:.1}x", self.viewport.zoom)
    }

    pub fn center_coords(&self) -> String {
        format!(
            "{:.1}°{}, {:.1}°{}",
            self.viewport.center_lat.abs(),
            if self.viewport.center_lat >= 0.0 { "N" } else { "S" },
            self.viewport.center_lon.abs(),
            if self.viewport.center_lon >= 0.0 { "E" } else { "W" }
        )
    }

    pub fn lod_level(&self) -> &'static str {
        Lod::from_zoom(self.viewport.zoom).label()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::contribute::{FormField, SubmissionState};
    use crate::zones::{Continent, Severity};

    pub(crate) fn loaded_app() -> App {
        let catalog = Catalog::bundled().unwrap();
        App::with_catalog(160, 48, catalog, Arc::new(SimulatedSink::new(Duration::ZERO)))
    }

    fn visible_ids(app: &App) -> Vec<String> {
        app.visible_zones().iter().map(|z| z.id.clone()).collect()
    }

    /// Terminal position of a zone's marker under the current viewport
    fn marker_position(app: &App, id: &str) -> (u16, u16) {
        let zone = app.catalog().unwrap().zone(id).unwrap();
        let (cx, cy) = app
            .viewport
            .cell_of(zone.coordinates.lon, zone.coordinates.lat)
            .unwrap();
        let inner = app.layout().map_inner();
        (inner.x + cx, inner.y + cy)
    }

    #[test]
    fn test_starts_loading_then_ready() {
        let config = AppConfig {
            load_delay: Duration::ZERO,
            ..AppConfig::default()
        };
        let mut app = App::new(120, 40, &config);
        assert!(app.load_state.is_loading());
        assert_eq!(app.result_count(), 0);

        let deadline = Instant::now() + Duration::from_secs(5);
        while app.load_state.is_loading() && Instant::now() < deadline {
            std::thread::sleep(Duration::from_millis(5));
            app.tick();
        }
        assert_eq!(app.result_count(), 6);
    }

    #[test]
    fn test_filter_operations_drive_result_count() {
        let mut app = loaded_app();
        app.toggle_filter(FilterValue::Continent(Continent::Europe));
        assert_eq!(visible_ids(&app), vec!["ukraine-russia"]);

        app.toggle_filter(FilterValue::Severity(Severity::Critical));
        app.toggle_filter(FilterValue::Continent(Continent::Europe));
        assert_eq!(visible_ids(&app), vec!["ukraine-russia", "israel-palestine"]);

        app.clear_filters();
        app.search("SUDAN");
        assert_eq!(visible_ids(&app), vec!["south-sudan"]);
        assert_eq!(app.summary().zones, 1);
    }

    #[test]
    fn test_selection_retained_when_filtered_out_by_default() {
        let mut app = loaded_app();
        assert!(app.select_zone("colombia-farc"));
        app.toggle_filter(FilterValue::Continent(Continent::Europe));
        assert_eq!(app.selection.selected(), Some("colombia-farc"));
        assert_eq!(app.selected_zone().unwrap().name, "Colombian Peace Process");
    }

    #[test]
    fn test_evict_policy_clears_hidden_selection() {
        let mut app = loaded_app();
        app.policy = SelectionPolicy::EvictHidden;
        app.select_zone("colombia-farc");
        app.toggle_filter(FilterValue::Continent(Continent::Europe));
        assert_eq!(app.selection.selected(), None);
    }

    #[test]
    fn test_unknown_zone_id_ignored() {
        let mut app = loaded_app();
        assert!(!app.select_zone("atlantis"));
        assert_eq!(app.selection.selected(), None);
    }

    #[test]
    fn test_cycling_walks_visible_zones_and_centers() {
        let mut app = loaded_app();
        app.select_next();
        assert_eq!(app.selection.selected(), Some("ukraine-russia"));
        let zone = app.selected_zone().unwrap();
        assert!((app.viewport.center_lat - zone.coordinates.lat).abs() < 1e-9);

        app.select_prev();
        app.select_prev();
        let last = visible_ids(&app).last().cloned();
        assert_eq!(app.selection.selected(), last.as_deref());
    }

    #[test]
    fn test_click_on_marker_selects_and_background_clears() {
        let mut app = loaded_app();
        let (col, row) = marker_position(&app, "colombia-farc");
        app.begin_press(col, row);
        app.end_press(col, row);
        assert_eq!(app.selection.selected(), Some("colombia-farc"));

        // Top-left corner of the map is open ocean
        let inner = app.layout().map_inner();
        app.handle_click(inner.x, inner.y);
        assert_eq!(app.selection.selected(), None);
    }

    #[test]
    fn test_click_on_shared_cell_selects_zone_drawn_on_top() {
        let catalog = Catalog::bundled().unwrap();
        let sink = Arc::new(SimulatedSink::new(Duration::ZERO));
        let mut app = App::with_catalog(80, 24, catalog, sink);
        app.zoom_out();
        app.zoom_out();

        let markers = {
            let visible = app.visible_zones();
            place_markers(&visible, &app.selection, &app.viewport)
        };
        let shared = markers
            .iter()
            .find(|m| markers.iter().filter(|o| o.cell == m.cell).count() > 1)
            .map(|m| m.cell)
            .expect("two zones share a cell when zoomed out");
        let on_top = markers.iter().rev().find(|m| m.cell == shared).unwrap();

        let inner = app.layout().map_inner();
        app.handle_click(inner.x + shared.0, inner.y + shared.1);
        assert_eq!(app.selection.selected(), Some(on_top.zone_id.as_str()));
    }

    #[test]
    fn test_drag_is_not_a_click() {
        let mut app = loaded_app();
        app.select_zone("ukraine-russia");
        let inner = app.layout().map_inner();
        let start = (inner.x + 4, inner.y + 4);
        let lon_before = app.viewport.center_lon;
        app.begin_press(start.0, start.1);
        app.handle_drag(start.0 + 5, start.1);
        app.end_press(start.0 + 5, start.1);
        assert_ne!(app.viewport.center_lon, lon_before);
        assert_eq!(app.selection.selected(), Some("ukraine-russia"));
    }

    #[test]
    fn test_leaving_map_clears_selection() {
        let mut app = loaded_app();
        app.select_zone("syria-civil-war");
        app.switch_view(View::Contribute);
        assert_eq!(app.selection.selected(), None);
    }

    #[test]
    fn test_open_case_study_from_zone() {
        let mut app = loaded_app();
        app.select_zone("colombia-farc");
        app.open_case_study_for_selection();
        assert_eq!(app.view, View::CaseStudies);
        assert_eq!(app.open_case().unwrap().id, "colombia-peace-model");
        assert_eq!(app.selection.selected(), None);
    }

    #[test]
    fn test_zone_without_case_study_shows_notice() {
        let mut app = loaded_app();
        app.select_zone("syria-civil-war");
        app.open_case_study_for_selection();
        assert_eq!(app.view, View::Map);
        assert!(app.notice.as_ref().unwrap().text.contains("Syria"));
    }

    #[test]
    fn test_sidebar_toggle_and_wrap() {
        let mut app = loaded_app();
        app.sidebar_move(-1);
        assert_eq!(app.sidebar_cursor, App::sidebar_items().len() - 1);
        app.sidebar_move(1);
        app.toggle_sidebar_item();
        assert!(app.criteria.contains(App::sidebar_items()[0]));
    }

    #[test]
    fn test_invalid_idea_sets_notice() {
        let mut app = loaded_app();
        app.switch_view(View::Contribute);
        app.submit_idea();
        assert_eq!(app.form.state, SubmissionState::Idle);
        assert!(app.form.errors.get(FormField::Title).is_some());
        assert!(app.notice.is_some());
    }
}
