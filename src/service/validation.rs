//! Course invariant checks. Advisory on the read path: violations are reported, records are kept.

use crate::model::Course;
use serde_json::Number;
use std::fmt;

#[derive(Clone, Debug, PartialEq)]
pub enum Violation {
    EmptyCode,
    EmptyDescription,
    InvalidUnits(Number),
    MissingTags,
    EmptyTags,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::EmptyCode => write!(f, "code is required"),
            Violation::EmptyDescription => write!(f, "description is required"),
            Violation::InvalidUnits(u) => write!(f, "units must be a non-negative number, got {}", u),
            Violation::MissingTags => write!(f, "tags must be an array of strings"),
            Violation::EmptyTags => write!(f, "tags must not be empty"),
        }
    }
}

/// How loudly to report bad documents: once at startup as warnings, per request only at debug.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Audit {
    Startup,
    Request,
}

impl Audit {
    pub fn note(self, message: fmt::Arguments<'_>) {
        match self {
            Audit::Startup => tracing::warn!("{}", message),
            Audit::Request => tracing::debug!("{}", message),
        }
    }
}

pub struct CourseValidator;

impl CourseValidator {
    pub fn validate(course: &Course) -> Vec<Violation> {
        let mut out = Vec::new();
        if course.code.trim().is_empty() {
            out.push(Violation::EmptyCode);
        }
        if course.description.trim().is_empty() {
            out.push(Violation::EmptyDescription);
        }
        let units_ok = course.units.as_f64().map(|u| u.is_finite() && u >= 0.0).unwrap_or(false);
        if !units_ok {
            out.push(Violation::InvalidUnits(course.units.clone()));
        }
        match course.tags.as_deref() {
            None => out.push(Violation::MissingTags),
            Some([]) => out.push(Violation::EmptyTags),
            Some(_) => {}
        }
        out
    }

    /// Log each violation at the `audit` level, keyed by the course code. Returns whether the course was clean.
    pub fn report(course: &Course, audit: Audit) -> bool {
        let violations = Self::validate(course);
        for v in &violations {
            audit.note(format_args!("invalid course document {}: {}", course.code, v));
        }
        violations.is_empty()
    }
}
