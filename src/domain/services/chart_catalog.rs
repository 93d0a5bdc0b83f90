//! Charts and metrics shown per module, and which filters each one sends.
//!
//! Parameter subsets are deliberately not shared between charts of the same
//! module: summaries carry status and account flags, trends do not, and a
//! distribution never filters on the dimension it plots.

use super::query_builder::QueryParams;
use crate::domain::entities::{
    ChartKind, FilterKey, FilterState, LocationLevel, LocationScope, Module, TimeWindow,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamField {
    Time,
    Location(LocationScope),
    Category(FilterKey),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presentation {
    /// Headline figures rendered as metric cards.
    Summary,
    Chart(ChartKind),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartSpec {
    /// Canvas id, unique across modules.
    pub id: &'static str,
    pub module: Module,
    pub metric: &'static str,
    pub title: &'static str,
    pub presentation: Presentation,
    pub fields: &'static [ParamField],
}

impl ChartSpec {
    pub fn is_summary(&self) -> bool {
        matches!(self.presentation, Presentation::Summary)
    }

    pub fn default_kind(&self) -> ChartKind {
        match self.presentation {
            Presentation::Chart(kind) => kind,
            Presentation::Summary => ChartKind::Bar,
        }
    }

    pub fn query(&self, state: &FilterState) -> QueryParams {
        build_query(self.fields, state)
    }
}

use FilterKey::*;
use ParamField::{Category as C, Location as L, Time as T};

const APPLICANT: LocationScope = LocationScope::Applicant;
const EMPLOYER: LocationScope = LocationScope::Employer;

const APPLICANT_CHARTS: &[ChartSpec] = &[
    ChartSpec {
        id: "applicants-summary",
        module: Module::Applicants,
        metric: "summary",
        title: "Overview",
        presentation: Presentation::Summary,
        fields: &[
            T,
            L(APPLICANT),
            C(Sex),
            C(Education),
            C(AgeBracket),
            C(Pwd),
            C(PwdType),
            C(WorkExperience),
            C(ExperienceYears),
            C(RegistrationReason),
            C(ApplicantStatus),
            C(ApplicantActive),
        ],
    },
    ChartSpec {
        id: "applicants-registrations",
        module: Module::Applicants,
        metric: "registrations",
        title: "Registrations over time",
        presentation: Presentation::Chart(ChartKind::Line),
        fields: &[T, L(APPLICANT), C(Sex), C(Education), C(AgeBracket)],
    },
    ChartSpec {
        id: "applicants-sex",
        module: Module::Applicants,
        metric: "sex",
        title: "Sex distribution",
        presentation: Presentation::Chart(ChartKind::Doughnut),
        fields: &[T, L(APPLICANT), C(Education), C(AgeBracket), C(Pwd), C(ApplicantStatus)],
    },
    ChartSpec {
        id: "applicants-education",
        module: Module::Applicants,
        metric: "education",
        title: "Educational attainment",
        presentation: Presentation::Chart(ChartKind::Bar),
        fields: &[T, L(APPLICANT), C(Sex), C(AgeBracket), C(WorkExperience), C(ApplicantStatus)],
    },
    ChartSpec {
        id: "applicants-age",
        module: Module::Applicants,
        metric: "age",
        title: "Age brackets",
        presentation: Presentation::Chart(ChartKind::Bar),
        fields: &[T, L(APPLICANT), C(Sex), C(Education), C(ApplicantStatus)],
    },
    ChartSpec {
        id: "applicants-pwd",
        module: Module::Applicants,
        metric: "pwd",
        title: "Persons with disability",
        presentation: Presentation::Chart(ChartKind::Doughnut),
        fields: &[T, L(APPLICANT), C(Sex), C(PwdType)],
    },
    ChartSpec {
        id: "applicants-experience",
        module: Module::Applicants,
        metric: "experience",
        title: "Years of experience",
        presentation: Presentation::Chart(ChartKind::Bar),
        fields: &[T, L(APPLICANT), C(Sex), C(Education), C(WorkExperience), C(RegistrationReason)],
    },
    ChartSpec {
        id: "applicants-location",
        module: Module::Applicants,
        metric: "location",
        title: "Applicants by location",
        presentation: Presentation::Chart(ChartKind::Bar),
        fields: &[T, L(APPLICANT), C(Sex), C(Education), C(RegistrationReason)],
    },
];

const EMPLOYER_CHARTS: &[ChartSpec] = &[
    ChartSpec {
        id: "employers-summary",
        module: Module::Employers,
        metric: "summary",
        title: "Overview",
        presentation: Presentation::Summary,
        fields: &[
            T,
            L(EMPLOYER),
            C(EmployerStatus),
            C(EmployerActive),
            C(Industry),
            C(RecruitmentType),
        ],
    },
    ChartSpec {
        id: "employers-registrations",
        module: Module::Employers,
        metric: "registrations",
        title: "Registrations over time",
        presentation: Presentation::Chart(ChartKind::Line),
        fields: &[T, L(EMPLOYER), C(Industry), C(RecruitmentType)],
    },
    ChartSpec {
        id: "employers-industry",
        module: Module::Employers,
        metric: "industry",
        title: "Employers by industry",
        presentation: Presentation::Chart(ChartKind::Bar),
        fields: &[T, L(EMPLOYER), C(RecruitmentType), C(EmployerStatus)],
    },
    ChartSpec {
        id: "employers-recruitment",
        module: Module::Employers,
        metric: "recruitment_type",
        title: "Recruitment type",
        presentation: Presentation::Chart(ChartKind::Doughnut),
        fields: &[T, L(EMPLOYER), C(Industry), C(EmployerStatus)],
    },
    ChartSpec {
        id: "employers-location",
        module: Module::Employers,
        metric: "location",
        title: "Employers by location",
        presentation: Presentation::Chart(ChartKind::Bar),
        fields: &[T, L(EMPLOYER), C(Industry)],
    },
];

const JOB_CHARTS: &[ChartSpec] = &[
    ChartSpec {
        id: "jobs-summary",
        module: Module::Jobs,
        metric: "summary",
        title: "Overview",
        presentation: Presentation::Summary,
        fields: &[T, C(JobStatus), C(WorkSchedule), C(ApplicationStatus)],
    },
    ChartSpec {
        id: "jobs-postings",
        module: Module::Jobs,
        metric: "postings",
        title: "Job postings over time",
        presentation: Presentation::Chart(ChartKind::Line),
        fields: &[T, C(JobStatus), C(WorkSchedule)],
    },
    ChartSpec {
        id: "jobs-status",
        module: Module::Jobs,
        metric: "job_status",
        title: "Job status",
        presentation: Presentation::Chart(ChartKind::Doughnut),
        fields: &[T, C(WorkSchedule)],
    },
    ChartSpec {
        id: "jobs-schedule",
        module: Module::Jobs,
        metric: "work_schedule",
        title: "Work schedule",
        presentation: Presentation::Chart(ChartKind::Bar),
        fields: &[T, C(JobStatus)],
    },
    ChartSpec {
        id: "jobs-applications",
        module: Module::Jobs,
        metric: "applications",
        title: "Application status",
        presentation: Presentation::Chart(ChartKind::Bar),
        fields: &[T, C(JobStatus), C(ApplicationStatus)],
    },
];

pub fn charts_for(module: Module) -> &'static [ChartSpec] {
    match module {
        Module::Applicants => APPLICANT_CHARTS,
        Module::Employers => EMPLOYER_CHARTS,
        Module::Jobs => JOB_CHARTS,
    }
}

pub fn find_chart(id: &str) -> Option<&'static ChartSpec> {
    Module::ALL
        .into_iter()
        .flat_map(charts_for)
        .find(|spec| spec.id == id)
}

fn build_query(fields: &[ParamField], state: &FilterState) -> QueryParams {
    let mut query = QueryParams::new();
    for field in fields {
        query = match field {
            ParamField::Time => match state.time_window() {
                TimeWindow::Quick(range) => query.scalar("range", Some(range.token())),
                TimeWindow::Between { from, to } => query
                    .scalar("date_from", from.map(|d| d.to_string()))
                    .scalar("date_to", to.map(|d| d.to_string())),
            },
            ParamField::Location(scope) => {
                let selection = state.location(*scope);
                LocationLevel::ALL.into_iter().fold(query, |query, level| {
                    query.list(level.param_name(*scope), selection.values(level))
                })
            }
            ParamField::Category(key) => {
                query.list(key.param_name(), state.values(*key).to_vec())
            }
        };
    }
    query
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::QuickRange;
    use chrono::NaiveDate;
    use std::collections::HashSet;

    fn applied_state() -> FilterState {
        let mut state = FilterState::new();
        state.set_values(Sex, vec!["Male".into()]);
        state.set_values(JobStatus, vec!["Open".into()]);
        state.set_values(WorkSchedule, vec!["Full-time".into(), "Part-time".into()]);
        state.set_location(APPLICANT, LocationLevel::Province, Some("Batangas".into()));
        state
    }

    #[test]
    fn jobs_queries_never_carry_applicant_filters() {
        let state = applied_state();
        for spec in charts_for(Module::Jobs) {
            let query = spec.query(&state).build();
            assert!(!query.contains("sex="), "{}: {}", spec.id, query);
            assert!(!query.contains("applicant_province"), "{}: {}", spec.id, query);
        }

        let summary = charts_for(Module::Jobs)[0].query(&state).build();
        assert_eq!(summary, "job_status=Open&work_schedule=Full-time%2CPart-time");
    }

    #[test]
    fn summary_and_trend_use_different_subsets() {
        let mut state = FilterState::new();
        state.set_values(ApplicantStatus, vec!["Approved".into()]);
        state.set_values(ApplicantActive, vec!["Active".into()]);

        let charts = charts_for(Module::Applicants);
        let summary = charts.iter().find(|c| c.is_summary()).unwrap();
        let trend = charts.iter().find(|c| c.metric == "registrations").unwrap();

        assert_eq!(
            summary.query(&state).names(),
            vec!["applicant_status", "applicant_active"]
        );
        assert!(trend.query(&state).names().is_empty());
    }

    #[test]
    fn quick_range_replaces_explicit_dates() {
        let mut state = FilterState::new();
        state.set_dates(NaiveDate::from_ymd_opt(2026, 1, 1), None);
        state.set_quick_range(Some(QuickRange::Last30Days));

        let query = charts_for(Module::Employers)[0].query(&state).build();
        assert_eq!(query, "range=30d");

        state.set_quick_range(None);
        let query = charts_for(Module::Employers)[0].query(&state).build();
        assert_eq!(query, "date_from=2026-01-01");
    }

    #[test]
    fn location_levels_are_sent_as_separate_params() {
        let mut state = FilterState::new();
        state.set_location(EMPLOYER, LocationLevel::Province, Some("Cavite".into()));
        state.set_location(EMPLOYER, LocationLevel::City, Some("Imus".into()));

        let location = find_chart("employers-location").unwrap();
        assert_eq!(
            location.query(&state).build(),
            "employer_province=Cavite&employer_city=Imus"
        );
    }

    #[test]
    fn chart_ids_are_unique_and_each_module_has_one_summary() {
        let mut ids = HashSet::new();
        for module in Module::ALL {
            let charts = charts_for(module);
            assert_eq!(charts.iter().filter(|c| c.is_summary()).count(), 1);
            for chart in charts {
                assert_eq!(chart.module, module);
                assert!(ids.insert(chart.id), "duplicate id {}", chart.id);
            }
        }
    }
}
