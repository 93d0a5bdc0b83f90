use crate::domain::entities::{LocationLevel, LocationScope, LocationSelection};
use crate::domain::errors::ApiError;

pub const ALL_LABEL: &str = "All";
pub const LOADING_LABEL: &str = "Loading…";
pub const ERROR_LABEL: &str = "Error loading data";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placeholder {
    All,
    Loading,
    Error,
}

impl Placeholder {
    pub fn label(&self) -> &'static str {
        match self {
            Placeholder::All => ALL_LABEL,
            Placeholder::Loading => LOADING_LABEL,
            Placeholder::Error => ERROR_LABEL,
        }
    }
}

/// State of one single-select location control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectControl {
    options: Vec<String>,
    selected: Option<String>,
    enabled: bool,
    placeholder: Placeholder,
}

impl SelectControl {
    pub fn new() -> Self {
        Self {
            options: Vec::new(),
            selected: None,
            enabled: false,
            placeholder: Placeholder::All,
        }
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn placeholder(&self) -> Placeholder {
        self.placeholder
    }

    /// Disabled, no options, no selection, only the "All" entry.
    pub fn is_parentless(&self) -> bool {
        !self.enabled
            && self.options.is_empty()
            && self.selected.is_none()
            && self.placeholder == Placeholder::All
    }

    fn reset(&mut self) {
        *self = Self::new();
    }

    fn loading(&mut self) {
        self.options.clear();
        self.selected = None;
        self.enabled = false;
        self.placeholder = Placeholder::Loading;
    }

    fn fill(&mut self, options: Vec<String>) {
        self.enabled = !options.is_empty();
        if let Some(selected) = &self.selected {
            if !options.contains(selected) {
                self.selected = None;
            }
        }
        self.options = options;
        self.placeholder = Placeholder::All;
    }

    fn fail(&mut self) {
        self.options.clear();
        self.selected = None;
        self.enabled = false;
        self.placeholder = Placeholder::Error;
    }

    fn select(&mut self, value: Option<String>) -> bool {
        match value {
            None => {
                self.selected = None;
                true
            }
            Some(value) if self.enabled && self.options.contains(&value) => {
                self.selected = Some(value);
                true
            }
            Some(value) => {
                tracing::debug!("Ignoring selection of unavailable option {}", value);
                false
            }
        }
    }
}

impl Default for SelectControl {
    fn default() -> Self {
        Self::new()
    }
}

/// A pending lookup. `seq` identifies the request so that a response which
/// arrives after a newer request or a reset can be discarded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CascadeRequest {
    pub scope: LocationScope,
    pub level: LocationLevel,
    pub parent: Option<String>,
    pub seq: u64,
}

/// Province → city → barangay selects for one scope.
pub struct LocationCascade {
    scope: LocationScope,
    controls: [SelectControl; 3],
    current_seq: [u64; 3],
    next_seq: u64,
    /// Selection being restored level by level as child lookups arrive.
    pending: Option<LocationSelection>,
}

impl LocationCascade {
    pub fn new(scope: LocationScope) -> Self {
        Self {
            scope,
            controls: Default::default(),
            current_seq: [0; 3],
            next_seq: 1,
            pending: None,
        }
    }

    pub fn scope(&self) -> LocationScope {
        self.scope
    }

    pub fn control(&self, level: LocationLevel) -> &SelectControl {
        &self.controls[index(level)]
    }

    pub fn selected(&self, level: LocationLevel) -> Option<&str> {
        self.control(level).selected()
    }

    pub fn selection(&self) -> LocationSelection {
        let mut selection = LocationSelection::default();
        for level in LocationLevel::ALL {
            selection.set(level, self.selected(level).map(str::to_string));
        }
        selection
    }

    pub fn populate_provinces(&mut self) -> CascadeRequest {
        self.begin(LocationLevel::Province, None)
    }

    /// Always resets the barangay select first: a new city list invalidates
    /// any barangay chosen under the previous one.
    pub fn populate_cities(&mut self, province: &str) -> CascadeRequest {
        self.reset_level(LocationLevel::Barangay);
        self.begin(LocationLevel::City, Some(province.to_string()))
    }

    pub fn populate_barangays(&mut self, city: &str) -> CascadeRequest {
        self.begin(LocationLevel::Barangay, Some(city.to_string()))
    }

    /// User picked `value` (or "All") in the `level` select. Dependent selects
    /// are reset; the returned request loads the next level when a parent was
    /// chosen.
    pub fn select(&mut self, level: LocationLevel, value: Option<String>) -> Option<CascadeRequest> {
        self.pending = None;
        self.change(level, value)
    }

    fn change(&mut self, level: LocationLevel, value: Option<String>) -> Option<CascadeRequest> {
        if self.selected(level) == value.as_deref() {
            return None;
        }
        if !self.controls[index(level)].select(value) {
            return None;
        }
        let chosen = self.selected(level).map(str::to_string);

        match level {
            LocationLevel::Province => {
                self.reset_level(LocationLevel::City);
                self.reset_level(LocationLevel::Barangay);
                chosen.map(|province| self.populate_cities(&province))
            }
            LocationLevel::City => {
                self.reset_level(LocationLevel::Barangay);
                chosen.map(|city| self.populate_barangays(&city))
            }
            LocationLevel::Barangay => None,
        }
    }

    /// Applies a lookup response. Returns false when the response is stale
    /// and was dropped.
    pub fn apply(&mut self, request: &CascadeRequest, result: Result<Vec<String>, ApiError>) -> bool {
        let slot = index(request.level);
        if request.scope != self.scope || self.current_seq[slot] != request.seq {
            tracing::debug!(
                "Discarding stale {} {} options for {:?}",
                request.scope,
                request.level,
                request.parent
            );
            return false;
        }
        self.current_seq[slot] = 0;

        let control = &mut self.controls[slot];
        match result {
            Ok(options) => control.fill(options),
            Err(e) => {
                tracing::error!(
                    "Could not load {} {} options: {}",
                    request.scope,
                    request.level,
                    e
                );
                control.fail();
            }
        }
        true
    }

    pub fn is_loading(&self, level: LocationLevel) -> bool {
        self.current_seq[index(level)] != 0
    }

    /// Returns every level below the province to its disabled parent-less
    /// state and clears the province choice. Province options stay loaded.
    pub fn clear(&mut self) {
        self.pending = None;
        self.controls[index(LocationLevel::Province)].select(None);
        self.reset_level(LocationLevel::City);
        self.reset_level(LocationLevel::Barangay);
    }

    /// Brings the selects in line with a selection that changed outside the
    /// UI, e.g. after a chip was removed. Levels whose options still have to
    /// be loaded are restored by [`Self::resume`] once the lookup lands.
    pub fn sync_to(&mut self, selection: &LocationSelection) -> Option<CascadeRequest> {
        self.pending = Some(selection.clone());
        self.resume()
    }

    /// Continues a pending [`Self::sync_to`]. Returns the next lookup to run,
    /// if any.
    pub fn resume(&mut self) -> Option<CascadeRequest> {
        let target = self.pending.clone()?;
        for level in LocationLevel::ALL {
            let wanted = target.get(level);
            if self.selected(level) == wanted {
                continue;
            }
            if self.is_loading(level) {
                return None;
            }
            if let Some(value) = wanted {
                let control = self.control(level);
                if !control.is_enabled() || !control.options().iter().any(|o| o == value) {
                    tracing::debug!("{} {} {} is not among the loaded options", self.scope, level, value);
                    self.pending = None;
                    return None;
                }
            }
            if let Some(request) = self.change(level, wanted.map(str::to_string)) {
                return Some(request);
            }
        }
        self.pending = None;
        None
    }

    pub fn is_restoring(&self) -> bool {
        self.pending.is_some()
    }

    fn begin(&mut self, level: LocationLevel, parent: Option<String>) -> CascadeRequest {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.current_seq[index(level)] = seq;
        self.controls[index(level)].loading();

        CascadeRequest {
            scope: self.scope,
            level,
            parent,
            seq,
        }
    }

    fn reset_level(&mut self, level: LocationLevel) {
        self.current_seq[index(level)] = 0;
        self.controls[index(level)].reset();
    }
}

fn index(level: LocationLevel) -> usize {
    match level {
        LocationLevel::Province => 0,
        LocationLevel::City => 1,
        LocationLevel::Barangay => 2,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(names: &[&str]) -> Result<Vec<String>, ApiError> {
        Ok(names.iter().map(|n| n.to_string()).collect())
    }

    fn loaded_cascade() -> LocationCascade {
        let mut cascade = LocationCascade::new(LocationScope::Applicant);
        let request = cascade.populate_provinces();
        assert!(cascade.apply(&request, options(&["Batangas", "Cavite", "Laguna"])));
        cascade
    }

    #[test]
    fn populate_shows_loading_then_options() {
        let mut cascade = LocationCascade::new(LocationScope::Employer);
        let request = cascade.populate_provinces();

        let province = cascade.control(LocationLevel::Province);
        assert_eq!(province.placeholder(), Placeholder::Loading);
        assert!(!province.is_enabled());
        assert!(cascade.is_loading(LocationLevel::Province));

        cascade.apply(&request, options(&["Cavite"]));
        let province = cascade.control(LocationLevel::Province);
        assert!(province.is_enabled());
        assert_eq!(province.options(), ["Cavite"]);
        assert_eq!(province.placeholder(), Placeholder::All);
        assert!(!cascade.is_loading(LocationLevel::Province));
    }

    #[test]
    fn failure_shows_error_and_stays_disabled() {
        let mut cascade = loaded_cascade();
        let request = cascade
            .select(LocationLevel::Province, Some("Batangas".into()))
            .unwrap();

        cascade.apply(&request, Err(ApiError::Transport("offline".into())));
        let city = cascade.control(LocationLevel::City);
        assert_eq!(city.placeholder(), Placeholder::Error);
        assert_eq!(city.placeholder().label(), "Error loading data");
        assert!(!city.is_enabled());
        assert!(city.options().is_empty());
    }

    #[test]
    fn empty_child_list_leaves_select_disabled() {
        let mut cascade = loaded_cascade();
        let request = cascade
            .select(LocationLevel::Province, Some("Laguna".into()))
            .unwrap();
        cascade.apply(&request, options(&[]));

        assert!(cascade.control(LocationLevel::City).is_parentless());
    }

    #[test]
    fn populate_cities_resets_barangays_first() {
        let mut cascade = loaded_cascade();
        let cities = cascade
            .select(LocationLevel::Province, Some("Batangas".into()))
            .unwrap();
        cascade.apply(&cities, options(&["Lipa", "Tanauan"]));
        let barangays = cascade.select(LocationLevel::City, Some("Lipa".into())).unwrap();
        cascade.apply(&barangays, options(&["Sabang", "Marawoy"]));
        cascade.select(LocationLevel::Barangay, Some("Sabang".into()));

        cascade.populate_cities("Batangas");
        assert!(cascade.control(LocationLevel::Barangay).is_parentless());
        assert_eq!(cascade.selected(LocationLevel::City), None);
    }

    #[test]
    fn switching_province_resets_city_and_barangay() {
        let mut cascade = loaded_cascade();
        let first_cities = cascade
            .select(LocationLevel::Province, Some("Batangas".into()))
            .unwrap();
        cascade.apply(&first_cities, options(&["Lipa"]));
        let barangays = cascade.select(LocationLevel::City, Some("Lipa".into())).unwrap();

        let cavite_cities = cascade
            .select(LocationLevel::Province, Some("Cavite".into()))
            .unwrap();

        let city = cascade.control(LocationLevel::City);
        assert_eq!(city.selected(), None);
        assert!(city.options().is_empty());
        assert!(!city.is_enabled());
        assert!(cascade.control(LocationLevel::Barangay).is_parentless());

        // The barangay lookup for Lipa lands after the switch and is dropped.
        assert!(!cascade.apply(&barangays, options(&["Sabang"])));
        assert!(cascade.control(LocationLevel::Barangay).is_parentless());

        assert!(cascade.apply(&cavite_cities, options(&["Imus", "Bacoor"])));
        assert_eq!(cascade.control(LocationLevel::City).options(), ["Imus", "Bacoor"]);
    }

    #[test]
    fn out_of_order_city_responses_keep_newest() {
        let mut cascade = loaded_cascade();
        let batangas = cascade
            .select(LocationLevel::Province, Some("Batangas".into()))
            .unwrap();
        let laguna = cascade
            .select(LocationLevel::Province, Some("Laguna".into()))
            .unwrap();

        assert!(cascade.apply(&laguna, options(&["Calamba"])));
        assert!(!cascade.apply(&batangas, options(&["Lipa"])));
        assert_eq!(cascade.control(LocationLevel::City).options(), ["Calamba"]);
    }

    #[test]
    fn selecting_all_clears_children_without_request() {
        let mut cascade = loaded_cascade();
        let cities = cascade
            .select(LocationLevel::Province, Some("Batangas".into()))
            .unwrap();
        cascade.apply(&cities, options(&["Lipa"]));

        assert!(cascade.select(LocationLevel::Province, None).is_none());
        assert!(cascade.control(LocationLevel::City).is_parentless());
        assert!(!cascade.apply(&cities, options(&["Lipa"])));
    }

    #[test]
    fn unavailable_option_is_ignored() {
        let mut cascade = loaded_cascade();
        assert!(cascade.select(LocationLevel::Province, Some("Atlantis".into())).is_none());
        assert_eq!(cascade.selected(LocationLevel::Province), None);
    }

    #[test]
    fn sync_to_follows_removed_city() {
        let mut cascade = loaded_cascade();
        let cities = cascade
            .select(LocationLevel::Province, Some("Batangas".into()))
            .unwrap();
        cascade.apply(&cities, options(&["Lipa"]));
        let barangays = cascade.select(LocationLevel::City, Some("Lipa".into())).unwrap();
        cascade.apply(&barangays, options(&["Sabang"]));

        let mut selection = cascade.selection();
        selection.set(LocationLevel::City, None);

        assert!(cascade.sync_to(&selection).is_none());
        assert_eq!(cascade.selected(LocationLevel::Province), Some("Batangas"));
        assert_eq!(cascade.selected(LocationLevel::City), None);
        assert!(cascade.control(LocationLevel::Barangay).is_parentless());
        assert_eq!(cascade.control(LocationLevel::City).options(), ["Lipa"]);
    }

    #[test]
    fn sync_to_restores_city_and_barangay_after_lookups() {
        let mut cascade = loaded_cascade();
        let mut target = LocationSelection::default();
        target.set(LocationLevel::Province, Some("Batangas".into()));
        target.set(LocationLevel::City, Some("Lipa".into()));
        target.set(LocationLevel::Barangay, Some("Sabang".into()));

        cascade.select(LocationLevel::Province, Some("Cavite".into()));
        let cities = cascade.sync_to(&target).unwrap();
        assert_eq!(cities.parent.as_deref(), Some("Batangas"));
        assert!(cascade.is_restoring());

        assert!(cascade.apply(&cities, options(&["Lipa", "Tanauan"])));
        let barangays = cascade.resume().unwrap();
        assert_eq!(barangays.parent.as_deref(), Some("Lipa"));
        assert_eq!(cascade.selected(LocationLevel::City), Some("Lipa"));

        assert!(cascade.apply(&barangays, options(&["Sabang"])));
        assert!(cascade.resume().is_none());
        assert_eq!(cascade.selection(), target);
        assert!(!cascade.is_restoring());
    }

    #[test]
    fn manual_selection_abandons_restore() {
        let mut cascade = loaded_cascade();
        let mut target = LocationSelection::default();
        target.set(LocationLevel::Province, Some("Batangas".into()));
        target.set(LocationLevel::City, Some("Lipa".into()));

        let cities = cascade.sync_to(&target).unwrap();
        cascade.select(LocationLevel::Province, Some("Laguna".into()));
        assert!(!cascade.is_restoring());
        assert!(!cascade.apply(&cities, options(&["Lipa"])));
    }

    #[test]
    fn restore_stops_when_value_is_gone() {
        let mut cascade = loaded_cascade();
        let mut target = LocationSelection::default();
        target.set(LocationLevel::Province, Some("Batangas".into()));
        target.set(LocationLevel::City, Some("Lipa".into()));

        let cities = cascade.sync_to(&target).unwrap();
        cascade.apply(&cities, options(&["Tanauan"]));
        assert!(cascade.resume().is_none());
        assert!(!cascade.is_restoring());
        assert_eq!(cascade.selected(LocationLevel::City), None);
    }

    #[test]
    fn clear_keeps_provinces_loaded() {
        let mut cascade = loaded_cascade();
        let cities = cascade
            .select(LocationLevel::Province, Some("Cavite".into()))
            .unwrap();
        cascade.apply(&cities, options(&["Imus"]));

        cascade.clear();
        assert_eq!(cascade.selected(LocationLevel::Province), None);
        assert!(cascade.control(LocationLevel::Province).is_enabled());
        assert!(cascade.control(LocationLevel::City).is_parentless());
        assert!(cascade.control(LocationLevel::Barangay).is_parentless());
    }
}
