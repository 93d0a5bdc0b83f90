use super::Module;
use chrono::NaiveDate;
use serde_json::{Map, Value, json};
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QuickRange {
    Today,
    Last7Days,
    Last30Days,
    Last90Days,
    ThisYear,
}

impl QuickRange {
    pub const ALL: [QuickRange; 5] = [
        QuickRange::Today,
        QuickRange::Last7Days,
        QuickRange::Last30Days,
        QuickRange::Last90Days,
        QuickRange::ThisYear,
    ];

    pub fn token(&self) -> &'static str {
        match self {
            QuickRange::Today => "today",
            QuickRange::Last7Days => "7d",
            QuickRange::Last30Days => "30d",
            QuickRange::Last90Days => "90d",
            QuickRange::ThisYear => "year",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            QuickRange::Today => "Today",
            QuickRange::Last7Days => "Last 7 days",
            QuickRange::Last30Days => "Last 30 days",
            QuickRange::Last90Days => "Last 90 days",
            QuickRange::ThisYear => "This year",
        }
    }

    pub fn from_token(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|range| range.token() == token)
    }
}

/// Category filter keys. The declaration order is the chip display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FilterKey {
    Sex,
    Education,
    AgeBracket,
    Pwd,
    PwdType,
    WorkExperience,
    ExperienceYears,
    RegistrationReason,
    ApplicantStatus,
    ApplicantActive,
    EmployerStatus,
    EmployerActive,
    Industry,
    RecruitmentType,
    JobStatus,
    WorkSchedule,
    ApplicationStatus,
}

impl FilterKey {
    pub const ALL: [FilterKey; 17] = [
        FilterKey::Sex,
        FilterKey::Education,
        FilterKey::AgeBracket,
        FilterKey::Pwd,
        FilterKey::PwdType,
        FilterKey::WorkExperience,
        FilterKey::ExperienceYears,
        FilterKey::RegistrationReason,
        FilterKey::ApplicantStatus,
        FilterKey::ApplicantActive,
        FilterKey::EmployerStatus,
        FilterKey::EmployerActive,
        FilterKey::Industry,
        FilterKey::RecruitmentType,
        FilterKey::JobStatus,
        FilterKey::WorkSchedule,
        FilterKey::ApplicationStatus,
    ];

    pub fn param_name(&self) -> &'static str {
        match self {
            FilterKey::Sex => "sex",
            FilterKey::Education => "education",
            FilterKey::AgeBracket => "age_bracket",
            FilterKey::Pwd => "pwd",
            FilterKey::PwdType => "pwd_type",
            FilterKey::WorkExperience => "work_experience",
            FilterKey::ExperienceYears => "experience_years",
            FilterKey::RegistrationReason => "registration_reason",
            FilterKey::ApplicantStatus => "applicant_status",
            FilterKey::ApplicantActive => "applicant_active",
            FilterKey::EmployerStatus => "employer_status",
            FilterKey::EmployerActive => "employer_active",
            FilterKey::Industry => "industry",
            FilterKey::RecruitmentType => "recruitment_type",
            FilterKey::JobStatus => "job_status",
            FilterKey::WorkSchedule => "work_schedule",
            FilterKey::ApplicationStatus => "application_status",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FilterKey::Sex => "Sex",
            FilterKey::Education => "Education",
            FilterKey::AgeBracket => "Age",
            FilterKey::Pwd => "PWD",
            FilterKey::PwdType => "Disability",
            FilterKey::WorkExperience => "Work experience",
            FilterKey::ExperienceYears => "Years of experience",
            FilterKey::RegistrationReason => "Registration reason",
            FilterKey::ApplicantStatus => "Applicant status",
            FilterKey::ApplicantActive => "Applicant account",
            FilterKey::EmployerStatus => "Employer status",
            FilterKey::EmployerActive => "Employer account",
            FilterKey::Industry => "Industry",
            FilterKey::RecruitmentType => "Recruitment",
            FilterKey::JobStatus => "Job status",
            FilterKey::WorkSchedule => "Work schedule",
            FilterKey::ApplicationStatus => "Application status",
        }
    }

    pub fn module(&self) -> Module {
        match self {
            FilterKey::Sex
            | FilterKey::Education
            | FilterKey::AgeBracket
            | FilterKey::Pwd
            | FilterKey::PwdType
            | FilterKey::WorkExperience
            | FilterKey::ExperienceYears
            | FilterKey::RegistrationReason
            | FilterKey::ApplicantStatus
            | FilterKey::ApplicantActive => Module::Applicants,
            FilterKey::EmployerStatus
            | FilterKey::EmployerActive
            | FilterKey::Industry
            | FilterKey::RecruitmentType => Module::Employers,
            FilterKey::JobStatus | FilterKey::WorkSchedule | FilterKey::ApplicationStatus => {
                Module::Jobs
            }
        }
    }

    /// Choices offered by the checkbox group for this key.
    pub fn choices(&self) -> &'static [&'static str] {
        match self {
            FilterKey::Sex => &["Male", "Female"],
            FilterKey::Education => &[
                "Elementary",
                "High School",
                "Senior High School",
                "Vocational",
                "College",
                "Post Graduate",
            ],
            FilterKey::AgeBracket => &["15-24", "25-34", "35-44", "45-54", "55+"],
            FilterKey::Pwd => &["Yes", "No"],
            FilterKey::PwdType => &["Visual", "Hearing", "Speech", "Physical", "Mental", "Others"],
            FilterKey::WorkExperience => &["With experience", "Without experience"],
            FilterKey::ExperienceYears => &["0-1", "1-3", "3-5", "5-10", "10+"],
            FilterKey::RegistrationReason => &[
                "Wage Employment",
                "Self Employment",
                "Overseas Employment",
                "Training",
            ],
            FilterKey::ApplicantStatus | FilterKey::EmployerStatus => {
                &["Pending", "Approved", "Rejected"]
            }
            FilterKey::ApplicantActive | FilterKey::EmployerActive => &["Active", "Inactive"],
            FilterKey::Industry => &[
                "Agriculture",
                "Manufacturing",
                "Construction",
                "Retail",
                "IT-BPM",
                "Hospitality",
                "Healthcare",
                "Education",
                "Others",
            ],
            FilterKey::RecruitmentType => &["Local", "Overseas"],
            FilterKey::JobStatus => &["Open", "Closed", "Filled", "Draft"],
            FilterKey::WorkSchedule => &["Full-time", "Part-time", "Contractual", "Project-based"],
            FilterKey::ApplicationStatus => {
                &["Pending", "Shortlisted", "Interview", "Hired", "Rejected"]
            }
        }
    }

    pub fn for_module(module: Module) -> impl Iterator<Item = FilterKey> {
        Self::ALL.into_iter().filter(move |key| key.module() == module)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LocationScope {
    Applicant,
    Employer,
}

impl LocationScope {
    pub const ALL: [LocationScope; 2] = [LocationScope::Applicant, LocationScope::Employer];

    /// Entity segment of the location lookup endpoint.
    pub fn entity(&self) -> &'static str {
        match self {
            LocationScope::Applicant => "applicants",
            LocationScope::Employer => "employers",
        }
    }

    pub fn prefix(&self) -> &'static str {
        match self {
            LocationScope::Applicant => "applicant",
            LocationScope::Employer => "employer",
        }
    }

    pub fn module(&self) -> Module {
        match self {
            LocationScope::Applicant => Module::Applicants,
            LocationScope::Employer => Module::Employers,
        }
    }
}

impl fmt::Display for LocationScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.prefix())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LocationLevel {
    Province,
    City,
    Barangay,
}

impl LocationLevel {
    pub const ALL: [LocationLevel; 3] = [
        LocationLevel::Province,
        LocationLevel::City,
        LocationLevel::Barangay,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LocationLevel::Province => "province",
            LocationLevel::City => "city",
            LocationLevel::Barangay => "barangay",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            LocationLevel::Province => "Province",
            LocationLevel::City => "City / Municipality",
            LocationLevel::Barangay => "Barangay",
        }
    }

    pub fn child(&self) -> Option<LocationLevel> {
        match self {
            LocationLevel::Province => Some(LocationLevel::City),
            LocationLevel::City => Some(LocationLevel::Barangay),
            LocationLevel::Barangay => None,
        }
    }

    /// Query parameter name, e.g. `applicant_province`.
    pub fn param_name(&self, scope: LocationScope) -> String {
        format!("{}_{}", scope.prefix(), self.as_str())
    }
}

impl fmt::Display for LocationLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Province/city/barangay selection for one scope. A child level is only
/// held while its parent is set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocationSelection {
    province: Option<String>,
    city: Option<String>,
    barangay: Option<String>,
}

impl LocationSelection {
    pub fn get(&self, level: LocationLevel) -> Option<&str> {
        match level {
            LocationLevel::Province => self.province.as_deref(),
            LocationLevel::City => self.city.as_deref(),
            LocationLevel::Barangay => self.barangay.as_deref(),
        }
    }

    /// Sets one level and clears every level below it. Returns false when the
    /// parent level is unset and the value was therefore dropped.
    pub fn set(&mut self, level: LocationLevel, value: Option<String>) -> bool {
        let value = value.filter(|v| !v.trim().is_empty());
        match level {
            LocationLevel::Province => {
                self.province = value;
                self.city = None;
                self.barangay = None;
                true
            }
            LocationLevel::City => {
                self.barangay = None;
                if self.province.is_none() {
                    self.city = None;
                    return false;
                }
                self.city = value;
                true
            }
            LocationLevel::Barangay => {
                if self.city.is_none() {
                    self.barangay = None;
                    return false;
                }
                self.barangay = value;
                true
            }
        }
    }

    /// Array form used by query strings and the export payload.
    pub fn values(&self, level: LocationLevel) -> Vec<String> {
        self.get(level).map(|v| vec![v.to_string()]).unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.province.is_none() && self.city.is_none() && self.barangay.is_none()
    }
}

/// One removable token shown in the active filter bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterChip {
    Time,
    Category { key: FilterKey, value: String },
    Location {
        scope: LocationScope,
        level: LocationLevel,
        value: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeWindow {
    Quick(QuickRange),
    Between {
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    date_from: Option<NaiveDate>,
    date_to: Option<NaiveDate>,
    quick_range: Option<QuickRange>,
    categories: BTreeMap<FilterKey, Vec<String>>,
    applicant_location: LocationSelection,
    employer_location: LocationSelection,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn date_from(&self) -> Option<NaiveDate> {
        self.date_from
    }

    pub fn date_to(&self) -> Option<NaiveDate> {
        self.date_to
    }

    pub fn quick_range(&self) -> Option<QuickRange> {
        self.quick_range
    }

    pub fn set_dates(&mut self, from: Option<NaiveDate>, to: Option<NaiveDate>) {
        self.date_from = from;
        self.date_to = to;
    }

    /// Does not touch the explicit dates; both may be held at once.
    pub fn set_quick_range(&mut self, range: Option<QuickRange>) {
        self.quick_range = range;
    }

    pub fn clear_time(&mut self) {
        self.date_from = None;
        self.date_to = None;
        self.quick_range = None;
    }

    /// The window queries use: a quick range wins over explicit dates.
    pub fn time_window(&self) -> TimeWindow {
        match self.quick_range {
            Some(range) => TimeWindow::Quick(range),
            None => TimeWindow::Between {
                from: self.date_from,
                to: self.date_to,
            },
        }
    }

    pub fn has_time(&self) -> bool {
        self.date_from.is_some() || self.date_to.is_some() || self.quick_range.is_some()
    }

    pub fn values(&self, key: FilterKey) -> &[String] {
        self.categories.get(&key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Replaces every value of `key`. Duplicates keep their first position.
    pub fn set_values(&mut self, key: FilterKey, values: Vec<String>) {
        let mut unique: Vec<String> = Vec::with_capacity(values.len());
        for value in values {
            if !value.is_empty() && !unique.contains(&value) {
                unique.push(value);
            }
        }
        if unique.is_empty() {
            self.categories.remove(&key);
        } else {
            self.categories.insert(key, unique);
        }
    }

    pub fn remove_value(&mut self, key: FilterKey, value: &str) -> bool {
        let Some(values) = self.categories.get_mut(&key) else {
            return false;
        };
        let before = values.len();
        values.retain(|v| v != value);
        let removed = values.len() != before;
        if values.is_empty() {
            self.categories.remove(&key);
        }
        removed
    }

    pub fn location(&self, scope: LocationScope) -> &LocationSelection {
        match scope {
            LocationScope::Applicant => &self.applicant_location,
            LocationScope::Employer => &self.employer_location,
        }
    }

    pub fn set_location(
        &mut self,
        scope: LocationScope,
        level: LocationLevel,
        value: Option<String>,
    ) -> bool {
        let selection = match scope {
            LocationScope::Applicant => &mut self.applicant_location,
            LocationScope::Employer => &mut self.employer_location,
        };
        selection.set(level, value)
    }

    pub fn clear_all(&mut self) {
        *self = Self::default();
    }

    /// Point mutation behind chip removal. The time chip clears both the
    /// explicit dates and the quick range together.
    pub fn remove_chip(&mut self, chip: &FilterChip) -> bool {
        match chip {
            FilterChip::Time => {
                let had_time = self.has_time();
                self.clear_time();
                had_time
            }
            FilterChip::Category { key, value } => self.remove_value(*key, value),
            FilterChip::Location {
                scope,
                level,
                value,
            } => {
                if self.location(*scope).get(*level) != Some(value.as_str()) {
                    return false;
                }
                self.set_location(*scope, *level, None);
                true
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        !self.has_time()
            && self.categories.is_empty()
            && self.applicant_location.is_empty()
            && self.employer_location.is_empty()
    }

    /// Active filters in display order: time, categories, then locations.
    pub fn chips(&self) -> Vec<FilterChip> {
        let mut chips = Vec::new();
        if self.has_time() {
            chips.push(FilterChip::Time);
        }
        for (key, values) in &self.categories {
            for value in values {
                chips.push(FilterChip::Category {
                    key: *key,
                    value: value.clone(),
                });
            }
        }
        for scope in LocationScope::ALL {
            for level in LocationLevel::ALL {
                if let Some(value) = self.location(scope).get(level) {
                    chips.push(FilterChip::Location {
                        scope,
                        level,
                        value: value.to_string(),
                    });
                }
            }
        }
        chips
    }

    /// Full state as the `filters` object of an export request. Location
    /// levels are emitted as arrays like the category keys.
    pub fn to_export_json(&self) -> Value {
        let mut filters = Map::new();
        filters.insert(
            "date_from".to_string(),
            json!(self.date_from.map(|d| d.to_string())),
        );
        filters.insert(
            "date_to".to_string(),
            json!(self.date_to.map(|d| d.to_string())),
        );
        filters.insert(
            "quick_range".to_string(),
            json!(self.quick_range.map(|r| r.token())),
        );
        for key in FilterKey::ALL {
            filters.insert(key.param_name().to_string(), json!(self.values(key)));
        }
        for scope in LocationScope::ALL {
            for level in LocationLevel::ALL {
                filters.insert(
                    level.param_name(scope),
                    json!(self.location(scope).values(level)),
                );
            }
        }
        Value::Object(filters)
    }
}

impl FilterChip {
    pub fn label(&self, state: &FilterState) -> String {
        match self {
            FilterChip::Time => match state.time_window() {
                TimeWindow::Quick(range) => format!("Time: {}", range.label()),
                TimeWindow::Between { from, to } => {
                    let from = from.map(|d| d.to_string()).unwrap_or_else(|| "…".to_string());
                    let to = to.map(|d| d.to_string()).unwrap_or_else(|| "…".to_string());
                    format!("Time: {} to {}", from, to)
                }
            },
            FilterChip::Category { key, value } => format!("{}: {}", key.label(), value),
            FilterChip::Location {
                scope,
                level,
                value,
            } => {
                let owner = match scope {
                    LocationScope::Applicant => "Applicant",
                    LocationScope::Employer => "Employer",
                };
                format!("{} {}: {}", owner, level.as_str(), value)
            }
        }
    }
}
