use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Module {
    Applicants,
    Employers,
    Jobs,
}

impl Module {
    pub const ALL: [Module; 3] = [Module::Applicants, Module::Employers, Module::Jobs];

    /// Path segment used by the analytics and export endpoints.
    pub fn slug(&self) -> &'static str {
        match self {
            Module::Applicants => "applicants",
            Module::Employers => "employers",
            Module::Jobs => "jobs",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Module::Applicants => "Applicants",
            Module::Employers => "Employers",
            Module::Jobs => "Jobs & Applications",
        }
    }
}

impl fmt::Display for Module {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.slug())
    }
}
