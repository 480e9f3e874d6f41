use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::foundation::ValidationError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Country {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct State {
    pub id: String,
    pub name: String,
    pub country_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Zone {
    pub id: String,
    pub name: String,
    pub state_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct District {
    pub id: String,
    pub name: String,
    pub zone_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Department {
    pub id: String,
    pub title: String,
}

/// Area of interest a user can follow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InterestGroup {
    pub id: String,
    pub name: String,
}

/// Kind of organization a user can belong to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrgType {
    College,
    Company,
    Community,
}

impl OrgType {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrgType::College => "College",
            OrgType::Company => "Company",
            OrgType::Community => "Community",
        }
    }
}

impl fmt::Display for OrgType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrgType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "College" => Ok(OrgType::College),
            "Company" => Ok(OrgType::Company),
            "Community" => Ok(OrgType::Community),
            other => Err(ValidationError::invalid_format(
                "org_type",
                format!("unknown organization type '{}'", other),
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Organization {
    pub id: String,
    pub title: String,
    pub code: String,
    pub org_type: OrgType,
    pub district_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn org_type_parses_its_own_labels() {
        for org_type in [OrgType::College, OrgType::Company, OrgType::Community] {
            assert_eq!(org_type.as_str().parse::<OrgType>().unwrap(), org_type);
        }
    }

    #[test]
    fn org_type_rejects_unknown_label() {
        assert!("college".parse::<OrgType>().is_err());
    }
}
