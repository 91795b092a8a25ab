use std::collections::BTreeSet;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

const DEFAULT_TEAMS: [&str; 8] = [
    "Sunrisers Hyderabad",
    "Mumbai Indians",
    "Royal Challengers Bangalore",
    "Kolkata Knight Riders",
    "Kings XI Punjab",
    "Chennai Super Kings",
    "Rajasthan Royals",
    "Delhi Capitals",
];

const DEFAULT_CITIES: [&str; 29] = [
    "Hyderabad",
    "Bangalore",
    "Mumbai",
    "Indore",
    "Kolkata",
    "Delhi",
    "Chandigarh",
    "Jaipur",
    "Chennai",
    "Cape Town",
    "Port Elizabeth",
    "Durban",
    "Centurion",
    "East London",
    "Johannesburg",
    "Kimberley",
    "Bloemfontein",
    "Ahmedabad",
    "Cuttack",
    "Nagpur",
    "Dharamsala",
    "Visakhapatnam",
    "Pune",
    "Raipur",
    "Ranchi",
    "Abu Dhabi",
    "Sharjah",
    "Mohali",
    "Bengaluru",
];

/// Teams and host cities a user may pick from. Read-only after startup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roster {
    teams: BTreeSet<String>,
    cities: BTreeSet<String>,
}

impl Default for Roster {
    fn default() -> Self {
        Roster::new(DEFAULT_TEAMS, DEFAULT_CITIES)
    }
}

impl Roster {
    pub fn new<T, C>(teams: T, cities: C) -> Self
    where
        T: IntoIterator,
        T::Item: Into<String>,
        C: IntoIterator,
        C::Item: Into<String>,
    {
        Roster {
            teams: teams.into_iter().map(Into::into).collect(),
            cities: cities.into_iter().map(Into::into).collect(),
        }
    }

    /// Load `{"teams": [...], "cities": [...]}` from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read roster {}", path.display()))?;
        let roster: Roster = serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse roster {}", path.display()))?;
        if roster.teams.len() < 2 {
            anyhow::bail!("roster {} must list at least two teams", path.display());
        }
        if roster.cities.is_empty() {
            anyhow::bail!("roster {} must list at least one city", path.display());
        }
        Ok(roster)
    }

    pub fn has_team(&self, team: &str) -> bool {
        self.teams.contains(team)
    }

    pub fn has_city(&self, city: &str) -> bool {
        self.cities.contains(city)
    }

    /// Teams in sorted order.
    pub fn teams(&self) -> Vec<String> {
        self.teams.iter().cloned().collect()
    }

    /// Cities in sorted order.
    pub fn cities(&self) -> Vec<String> {
        self.cities.iter().cloned().collect()
    }
}
