use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum DocumentStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl std::fmt::Display for DocumentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Approved => write!(f, "approved"),
            Self::Rejected => write!(f, "rejected"),
        }
    }
}

impl std::str::FromStr for DocumentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            _ => Err(format!("Unknown document status: {s}")),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Department {
    Engineering,
    Operations,
    #[serde(rename = "HR")]
    Hr,
    Compliance,
    Procurement,
    Safety,
}

impl Department {
    pub const ALL: [Department; 6] = [
        Department::Engineering,
        Department::Operations,
        Department::Hr,
        Department::Compliance,
        Department::Procurement,
        Department::Safety,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Engineering => "Engineering",
            Self::Operations => "Operations",
            Self::Hr => "HR",
            Self::Compliance => "Compliance",
            Self::Procurement => "Procurement",
            Self::Safety => "Safety",
        }
    }
}

impl std::fmt::Display for Department {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Department {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Department::ALL
            .into_iter()
            .find(|d| d.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Unknown department: {s}"))
    }
}

/// Display label for a priority level (1 = Low .. 5 = Critical).
pub fn priority_label(level: u8) -> Option<&'static str> {
    match level {
        1 => Some("Low"),
        2 => Some("Medium"),
        3 => Some("High"),
        4 => Some("Urgent"),
        5 => Some("Critical"),
        _ => None,
    }
}
