use super::location_cascade::{CascadeRequest, LocationCascade};
use crate::domain::entities::{
    FilterChip, FilterKey, FilterState, LocationLevel, LocationScope, QuickRange,
};
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Uncommitted values of the filter controls. Editing the form never touches
/// the applied [`FilterState`] until it is read by
/// [`FilterStateStore::read_from_ui`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterForm {
    date_from: String,
    date_to: String,
    quick_range: Option<QuickRange>,
    checked: BTreeMap<FilterKey, Vec<String>>,
}

impl FilterForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn date_from_mut(&mut self) -> &mut String {
        &mut self.date_from
    }

    pub fn date_to_mut(&mut self) -> &mut String {
        &mut self.date_to
    }

    pub fn quick_range(&self) -> Option<QuickRange> {
        self.quick_range
    }

    pub fn set_quick_range(&mut self, range: Option<QuickRange>) {
        self.quick_range = range;
    }

    pub fn is_checked(&self, key: FilterKey, value: &str) -> bool {
        self.checked
            .get(&key)
            .is_some_and(|values| values.iter().any(|v| v == value))
    }

    /// Checking appends, so values keep the order they were ticked in.
    pub fn set_checked(&mut self, key: FilterKey, value: &str, checked: bool) {
        let values = self.checked.entry(key).or_default();
        values.retain(|v| v != value);
        if checked {
            values.push(value.to_string());
        }
        if values.is_empty() {
            self.checked.remove(&key);
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Drops whatever `chip` stands for from the controls. Other unapplied
    /// edits stay.
    fn forget(&mut self, chip: &FilterChip) {
        match chip {
            FilterChip::Time => {
                self.date_from.clear();
                self.date_to.clear();
                self.quick_range = None;
            }
            FilterChip::Category { key, value } => self.set_checked(*key, value, false),
            FilterChip::Location { .. } => {}
        }
    }

    fn parse_date(input: &str, field: &str) -> Option<NaiveDate> {
        let input = input.trim();
        if input.is_empty() {
            return None;
        }
        match NaiveDate::parse_from_str(input, "%Y-%m-%d") {
            Ok(date) => Some(date),
            Err(e) => {
                tracing::warn!("Ignoring invalid {} '{}': {}", field, input, e);
                None
            }
        }
    }
}

/// Owner of the applied filter state together with the controls it is read
/// from: the filter form and the two location cascades.
pub struct FilterStateStore {
    state: FilterState,
    form: FilterForm,
    applicant_locations: LocationCascade,
    employer_locations: LocationCascade,
}

impl FilterStateStore {
    pub fn new() -> Self {
        Self {
            state: FilterState::new(),
            form: FilterForm::new(),
            applicant_locations: LocationCascade::new(LocationScope::Applicant),
            employer_locations: LocationCascade::new(LocationScope::Employer),
        }
    }

    pub fn state(&self) -> &FilterState {
        &self.state
    }

    pub fn form(&self) -> &FilterForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut FilterForm {
        &mut self.form
    }

    pub fn cascade(&self, scope: LocationScope) -> &LocationCascade {
        match scope {
            LocationScope::Applicant => &self.applicant_locations,
            LocationScope::Employer => &self.employer_locations,
        }
    }

    pub fn cascade_mut(&mut self, scope: LocationScope) -> &mut LocationCascade {
        match scope {
            LocationScope::Applicant => &mut self.applicant_locations,
            LocationScope::Employer => &mut self.employer_locations,
        }
    }

    /// Startup lookups for both scopes.
    pub fn populate_provinces(&mut self) -> Vec<CascadeRequest> {
        LocationScope::ALL
            .into_iter()
            .map(|scope| self.cascade_mut(scope).populate_provinces())
            .collect()
    }

    /// Snapshots every control into a fresh state, replacing each key
    /// wholesale.
    pub fn read_from_ui(&mut self) -> &FilterState {
        let mut state = FilterState::new();
        state.set_dates(
            FilterForm::parse_date(&self.form.date_from, "start date"),
            FilterForm::parse_date(&self.form.date_to, "end date"),
        );
        state.set_quick_range(self.form.quick_range);
        for key in FilterKey::ALL {
            let values = self.form.checked.get(&key).cloned().unwrap_or_default();
            state.set_values(key, values);
        }
        for scope in LocationScope::ALL {
            let cascade = self.cascade(scope);
            let selected: Vec<(LocationLevel, Option<String>)> = LocationLevel::ALL
                .into_iter()
                .map(|level| (level, cascade.selected(level).map(str::to_string)))
                .collect();
            for (level, value) in selected {
                state.set_location(scope, level, value);
            }
        }

        tracing::debug!("Applied {} filter chips", state.chips().len());
        self.state = state;
        &self.state
    }

    /// Empties the applied state and returns every control to its initial
    /// state, including the dependent location selects.
    pub fn clear_all(&mut self) {
        self.state.clear_all();
        self.form.reset();
        self.applicant_locations.clear();
        self.employer_locations.clear();
    }

    /// Removes the value behind one chip and resynchronizes the controls.
    /// Returns any lookup the location selects need as a result.
    pub fn remove_value(&mut self, chip: &FilterChip) -> Vec<CascadeRequest> {
        if !self.state.remove_chip(chip) {
            tracing::debug!("Chip {:?} no longer matches the applied filters", chip);
            return Vec::new();
        }
        self.form.forget(chip);

        let mut requests = Vec::new();
        for scope in LocationScope::ALL {
            let selection = self.state.location(scope).clone();
            if let Some(request) = self.cascade_mut(scope).sync_to(&selection) {
                requests.push(request);
            }
        }
        requests
    }

    /// Applies a lookup response and returns the follow-up lookup when a
    /// selection restored by [`Self::remove_value`] needs the next level.
    pub fn apply_lookup(
        &mut self,
        request: &CascadeRequest,
        result: Result<Vec<String>, crate::domain::errors::ApiError>,
    ) -> Option<CascadeRequest> {
        let cascade = self.cascade_mut(request.scope);
        if !cascade.apply(request, result) {
            return None;
        }
        cascade.resume()
    }
}

impl Default for FilterStateStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Result<Vec<String>, crate::domain::errors::ApiError> {
        Ok(list.iter().map(|s| s.to_string()).collect())
    }

    /// Store with Batangas > Lipa > Sabang selected on the applicant side.
    fn store_with_location() -> FilterStateStore {
        let mut store = FilterStateStore::new();
        for request in store.populate_provinces() {
            store.apply_lookup(&request, names(&["Batangas", "Cavite"]));
        }
        let cascade = store.cascade_mut(LocationScope::Applicant);
        let cities = cascade
            .select(LocationLevel::Province, Some("Batangas".into()))
            .unwrap();
        cascade.apply(&cities, names(&["Lipa"]));
        let barangays = cascade.select(LocationLevel::City, Some("Lipa".into())).unwrap();
        cascade.apply(&barangays, names(&["Sabang"]));
        cascade.select(LocationLevel::Barangay, Some("Sabang".into()));
        store
    }

    #[test]
    fn clear_all_then_read_yields_empty_state() {
        let mut store = store_with_location();
        store.form_mut().set_checked(FilterKey::Sex, "Male", true);
        store.form_mut().set_quick_range(Some(QuickRange::Last7Days));
        *store.form_mut().date_from_mut() = "2026-01-01".to_string();
        store.read_from_ui();
        assert!(!store.state().is_empty());

        store.clear_all();
        assert!(store.state().is_empty());
        assert!(store.read_from_ui().is_empty());

        let cascade = store.cascade(LocationScope::Applicant);
        assert!(cascade.control(LocationLevel::City).is_parentless());
        assert!(cascade.control(LocationLevel::Barangay).is_parentless());
    }

    #[test]
    fn editing_the_form_does_not_apply_until_read() {
        let mut store = FilterStateStore::new();
        store.form_mut().set_checked(FilterKey::Industry, "Retail", true);
        assert!(store.state().is_empty());

        store.read_from_ui();
        assert_eq!(store.state().values(FilterKey::Industry), ["Retail"]);
    }

    #[test]
    fn read_from_ui_overwrites_previous_values() {
        let mut store = FilterStateStore::new();
        store.form_mut().set_checked(FilterKey::Education, "College", true);
        store.read_from_ui();

        store.form_mut().set_checked(FilterKey::Education, "College", false);
        store.form_mut().set_checked(FilterKey::Education, "Vocational", true);
        store.read_from_ui();

        assert_eq!(store.state().values(FilterKey::Education), ["Vocational"]);
    }

    #[test]
    fn read_from_ui_picks_up_locations_and_dates() {
        let mut store = store_with_location();
        *store.form_mut().date_to_mut() = "2026-06-30".to_string();
        *store.form_mut().date_from_mut() = "not a date".to_string();

        let state = store.read_from_ui().clone();
        let selection = state.location(LocationScope::Applicant);
        assert_eq!(selection.get(LocationLevel::Province), Some("Batangas"));
        assert_eq!(selection.get(LocationLevel::City), Some("Lipa"));
        assert_eq!(selection.get(LocationLevel::Barangay), Some("Sabang"));
        assert_eq!(state.date_from(), None);
        assert_eq!(state.date_to(), NaiveDate::from_ymd_opt(2026, 6, 30));
    }

    #[test]
    fn removing_time_chip_resets_form_time_controls() {
        let mut store = FilterStateStore::new();
        store.form_mut().set_quick_range(Some(QuickRange::Last30Days));
        *store.form_mut().date_from_mut() = "2026-01-01".to_string();
        store.read_from_ui();

        store.remove_value(&FilterChip::Time);
        assert!(!store.state().has_time());
        assert_eq!(store.form().quick_range(), None);
        assert!(store.read_from_ui().is_empty());
    }

    #[test]
    fn removing_province_chip_resets_dependent_selects() {
        let mut store = store_with_location();
        store.form_mut().set_checked(FilterKey::Sex, "Female", true);
        store.read_from_ui();

        let requests = store.remove_value(&FilterChip::Location {
            scope: LocationScope::Applicant,
            level: LocationLevel::Province,
            value: "Batangas".into(),
        });

        assert!(requests.is_empty());
        let state = store.state();
        assert!(state.location(LocationScope::Applicant).is_empty());
        assert_eq!(state.values(FilterKey::Sex), ["Female"]);

        let cascade = store.cascade(LocationScope::Applicant);
        assert_eq!(cascade.selected(LocationLevel::Province), None);
        assert!(cascade.control(LocationLevel::City).is_parentless());
        assert!(cascade.control(LocationLevel::Barangay).is_parentless());
    }

    #[test]
    fn removing_category_chip_keeps_siblings_checked() {
        let mut store = FilterStateStore::new();
        store.form_mut().set_checked(FilterKey::JobStatus, "Open", true);
        store.form_mut().set_checked(FilterKey::JobStatus, "Filled", true);
        store.read_from_ui();

        store.remove_value(&FilterChip::Category {
            key: FilterKey::JobStatus,
            value: "Open".into(),
        });
        assert_eq!(store.state().values(FilterKey::JobStatus), ["Filled"]);
        assert!(store.form().is_checked(FilterKey::JobStatus, "Filled"));
        assert!(!store.form().is_checked(FilterKey::JobStatus, "Open"));
    }

    #[test]
    fn removing_unrelated_chip_restores_applied_city_and_barangay() {
        let mut store = store_with_location();
        store.form_mut().set_checked(FilterKey::Sex, "Female", true);
        store.read_from_ui();

        // Province changed in the UI but never applied.
        store
            .cascade_mut(LocationScope::Applicant)
            .select(LocationLevel::Province, Some("Cavite".into()));

        let requests = store.remove_value(&FilterChip::Category {
            key: FilterKey::Sex,
            value: "Female".into(),
        });
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].parent.as_deref(), Some("Batangas"));

        let barangays = store.apply_lookup(&requests[0], names(&["Lipa", "Tanauan"])).unwrap();
        assert_eq!(barangays.parent.as_deref(), Some("Lipa"));
        assert!(store.apply_lookup(&barangays, names(&["Sabang"])).is_none());

        let cascade = store.cascade(LocationScope::Applicant);
        assert_eq!(cascade.selected(LocationLevel::Province), Some("Batangas"));
        assert_eq!(cascade.selected(LocationLevel::City), Some("Lipa"));
        assert_eq!(cascade.selected(LocationLevel::Barangay), Some("Sabang"));

        let selection = store.read_from_ui().location(LocationScope::Applicant).clone();
        assert_eq!(selection.get(LocationLevel::City), Some("Lipa"));
        assert_eq!(selection.get(LocationLevel::Barangay), Some("Sabang"));
    }

    #[test]
    fn removing_chip_keeps_unapplied_form_edits() {
        let mut store = FilterStateStore::new();
        store.form_mut().set_checked(FilterKey::Sex, "Male", true);
        store.read_from_ui();

        store.form_mut().set_checked(FilterKey::Industry, "Retail", true);
        *store.form_mut().date_to_mut() = "2026-06-30".to_string();
        store.remove_value(&FilterChip::Category {
            key: FilterKey::Sex,
            value: "Male".into(),
        });

        assert!(!store.form().is_checked(FilterKey::Sex, "Male"));
        assert!(store.form().is_checked(FilterKey::Industry, "Retail"));
        assert_eq!(store.read_from_ui().date_to(), NaiveDate::from_ymd_opt(2026, 6, 30));
    }
}
