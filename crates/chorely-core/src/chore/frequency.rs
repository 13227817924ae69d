//! Named recurrence intervals offered when editing a chore.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FrequencyPreset {
    Daily,
    Weekly,
    Biweekly,
    Triweekly,
    Monthly,
    Quarterly,
    HalfYearly,
    Yearly,
}

impl FrequencyPreset {
    pub const ALL: [FrequencyPreset; 8] = [
        FrequencyPreset::Daily,
        FrequencyPreset::Weekly,
        FrequencyPreset::Biweekly,
        FrequencyPreset::Triweekly,
        FrequencyPreset::Monthly,
        FrequencyPreset::Quarterly,
        FrequencyPreset::HalfYearly,
        FrequencyPreset::Yearly,
    ];

    pub fn days(self) -> u32 {
        match self {
            FrequencyPreset::Daily => 1,
            FrequencyPreset::Weekly => 7,
            FrequencyPreset::Biweekly => 14,
            FrequencyPreset::Triweekly => 21,
            FrequencyPreset::Monthly => 30,
            FrequencyPreset::Quarterly => 90,
            FrequencyPreset::HalfYearly => 182,
            FrequencyPreset::Yearly => 365,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FrequencyPreset::Daily => "daily",
            FrequencyPreset::Weekly => "weekly",
            FrequencyPreset::Biweekly => "biweekly",
            FrequencyPreset::Triweekly => "triweekly",
            FrequencyPreset::Monthly => "monthly",
            FrequencyPreset::Quarterly => "quarterly",
            FrequencyPreset::HalfYearly => "half-yearly",
            FrequencyPreset::Yearly => "yearly",
        }
    }

    /// Preset matching an interval exactly, if any.
    pub fn for_days(days: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|preset| preset.days() == days)
    }
}

/// Human label for an interval: the preset name or "every N days".
pub fn describe_days(days: u32) -> String {
    match FrequencyPreset::for_days(days) {
        Some(preset) => preset.label().to_string(),
        None => format!("every {days} days"),
    }
}

impl fmt::Display for FrequencyPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for FrequencyPreset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|preset| preset.label() == wanted)
            .ok_or_else(|| {
                let known: Vec<_> = Self::ALL.iter().map(|p| p.label()).collect();
                format!("unknown frequency '{s}' (expected one of: {})", known.join(", "))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_labels_case_insensitively() {
        assert_eq!("Weekly".parse::<FrequencyPreset>().unwrap().days(), 7);
        assert_eq!("half-yearly".parse::<FrequencyPreset>().unwrap().days(), 182);
        assert!("fortnightly".parse::<FrequencyPreset>().is_err());
    }

    #[test]
    fn describe_falls_back_to_custom_interval() {
        assert_eq!(describe_days(30), "monthly");
        assert_eq!(describe_days(10), "every 10 days");
    }
}
