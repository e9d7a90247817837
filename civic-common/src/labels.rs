//! Label catalog for civic issue classification
//!
//! Fixed enumerations of severity tiers and responsible departments, their
//! classifier prompt labels, and the short external codes used on the wire
//! and in persisted reports. Everything downstream of the model backends
//! works in these enums; raw model strings never travel past the classifier
//! boundary.

use serde::{Deserialize, Serialize};

/// Issue severity tier, totally ordered from least to most urgent
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Minor,
    Moderate,
    Severe,
}

impl Severity {
    /// All severities in ascending order
    pub const ALL: [Severity; 3] = [Severity::Minor, Severity::Moderate, Severity::Severe];

    /// Prompt label submitted to the classifier backends
    pub fn label(&self) -> &'static str {
        match self {
            Severity::Minor => "Minor issue",
            Severity::Moderate => "Moderate issue",
            Severity::Severe => "Severe issue",
        }
    }

    /// External short code (LOW/MEDIUM/HIGH)
    pub fn code(&self) -> SeverityCode {
        match self {
            Severity::Minor => SeverityCode::Low,
            Severity::Moderate => SeverityCode::Medium,
            Severity::Severe => SeverityCode::High,
        }
    }

    /// Look up a severity by its prompt label
    pub fn from_label(label: &str) -> Option<Severity> {
        Severity::ALL.iter().copied().find(|s| s.label() == label)
    }
}

/// External severity code used in responses and persisted reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SeverityCode {
    Low,
    Medium,
    High,
}

impl SeverityCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            SeverityCode::Low => "LOW",
            SeverityCode::Medium => "MEDIUM",
            SeverityCode::High => "HIGH",
        }
    }
}

/// Responsible municipal department
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Department {
    Sanitation,
    Roads,
    Electricity,
    Water,
    Health,
    Environment,
    Safety,
}

impl Department {
    /// All departments in catalog order
    pub const ALL: [Department; 7] = [
        Department::Sanitation,
        Department::Roads,
        Department::Electricity,
        Department::Water,
        Department::Health,
        Department::Environment,
        Department::Safety,
    ];

    /// Canonical full name, also the classifier prompt label
    pub fn label(&self) -> &'static str {
        match self {
            Department::Sanitation => "Sanitation and Waste Management",
            Department::Roads => "Roads and Transport",
            Department::Electricity => "Electricity and Streetlights",
            Department::Water => "Water Supply and Drainage",
            Department::Health => "Public Health",
            Department::Environment => "Environment",
            Department::Safety => "Public Safety",
        }
    }

    /// External short code
    pub fn code(&self) -> DepartmentCode {
        match self {
            Department::Sanitation => DepartmentCode::Sanitation,
            Department::Roads => DepartmentCode::Roads,
            Department::Electricity => DepartmentCode::Electricity,
            Department::Water => DepartmentCode::Water,
            Department::Health => DepartmentCode::Health,
            Department::Environment => DepartmentCode::Environment,
            Department::Safety => DepartmentCode::Safety,
        }
    }

    /// Look up a department by its canonical full name
    pub fn from_label(label: &str) -> Option<Department> {
        Department::ALL.iter().copied().find(|d| d.label() == label)
    }
}

/// External department short code; `Other` covers anything unmapped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DepartmentCode {
    Sanitation,
    Roads,
    Electricity,
    Water,
    Health,
    Environment,
    Safety,
    Other,
}

impl DepartmentCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            DepartmentCode::Sanitation => "Sanitation",
            DepartmentCode::Roads => "Roads",
            DepartmentCode::Electricity => "Electricity",
            DepartmentCode::Water => "Water",
            DepartmentCode::Health => "Health",
            DepartmentCode::Environment => "Environment",
            DepartmentCode::Safety => "Safety",
            DepartmentCode::Other => "Other",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::Minor < Severity::Moderate);
        assert!(Severity::Moderate < Severity::Severe);
        assert_eq!(Severity::ALL.iter().max(), Some(&Severity::Severe));
    }

    #[test]
    fn test_severity_codes() {
        assert_eq!(Severity::Minor.code().as_str(), "LOW");
        assert_eq!(Severity::Moderate.code().as_str(), "MEDIUM");
        assert_eq!(Severity::Severe.code().as_str(), "HIGH");
    }

    #[test]
    fn test_severity_label_roundtrip() {
        for severity in Severity::ALL {
            assert_eq!(Severity::from_label(severity.label()), Some(severity));
        }
        assert_eq!(Severity::from_label("Catastrophic issue"), None);
    }

    #[test]
    fn test_department_label_roundtrip() {
        for department in Department::ALL {
            assert_eq!(Department::from_label(department.label()), Some(department));
        }
        assert_eq!(Department::from_label("Parks"), None);
    }

    #[test]
    fn test_department_codes() {
        assert_eq!(Department::Sanitation.code().as_str(), "Sanitation");
        assert_eq!(Department::Water.code().as_str(), "Water");
        assert_eq!(DepartmentCode::Other.as_str(), "Other");
    }

    #[test]
    fn test_severity_code_serde() {
        let json = serde_json::to_string(&SeverityCode::High).unwrap();
        assert_eq!(json, "\"HIGH\"");
        let parsed: SeverityCode = serde_json::from_str("\"LOW\"").unwrap();
        assert_eq!(parsed, SeverityCode::Low);
    }

    #[test]
    fn test_department_code_serde() {
        let json = serde_json::to_string(&DepartmentCode::Sanitation).unwrap();
        assert_eq!(json, "\"Sanitation\"");
        let parsed: DepartmentCode = serde_json::from_str("\"Other\"").unwrap();
        assert_eq!(parsed, DepartmentCode::Other);
    }
}
