use chrono::NaiveDate;
use serde::Serialize;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Holiday {
    pub date: NaiveDate,
    pub name: String,
}

/// Static market-holiday list, looked up by ISO date string. Decoration only;
/// holidays never change which events land in a cell.
#[derive(Debug, Clone, Default)]
pub struct HolidayCalendar {
    by_date: HashMap<String, String>,
}

impl HolidayCalendar {
    /// Parse a JSON array of `{ "date": "YYYY-MM-DD", "name": "..." }`.
    /// Entries missing either field, or with an unparseable date, are skipped.
    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        let raw: Vec<serde_json::Value> = serde_json::from_str(text)?;

        let mut by_date = HashMap::new();
        let mut skipped = 0usize;
        for entry in &raw {
            let date = entry
                .get("date")
                .and_then(|v| v.as_str())
                .and_then(|s| NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok());
            let name = entry.get("name").and_then(|v| v.as_str());

            match (date, name) {
                (Some(date), Some(name)) => {
                    by_date.insert(date.format("%Y-%m-%d").to_string(), name.to_string());
                }
                _ => skipped += 1,
            }
        }

        if skipped > 0 {
            tracing::debug!(skipped, "Skipped malformed holiday entries");
        }

        Ok(Self { by_date })
    }

    pub fn from_entries(entries: impl IntoIterator<Item = Holiday>) -> Self {
        Self {
            by_date: entries
                .into_iter()
                .map(|h| (h.date.format("%Y-%m-%d").to_string(), h.name))
                .collect(),
        }
    }

    pub fn name_for(&self, date: NaiveDate) -> Option<&str> {
        self.by_date
            .get(&date.format("%Y-%m-%d").to_string())
            .map(String::as_str)
    }

    pub fn is_holiday(&self, date: NaiveDate) -> bool {
        self.name_for(date).is_some()
    }

    pub fn len(&self) -> usize {
        self.by_date.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_date.is_empty()
    }

    /// All holidays, ordered by date.
    pub fn entries(&self) -> Vec<Holiday> {
        let mut out: Vec<Holiday> = self
            .by_date
            .iter()
            .filter_map(|(date, name)| {
                NaiveDate::parse_from_str(date, "%Y-%m-%d")
                    .ok()
                    .map(|date| Holiday {
                        date,
                        name: name.clone(),
                    })
            })
            .collect();
        out.sort_by_key(|h| h.date);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skips_malformed_entries() {
        let json = r#"[
            {"date": "2025-12-25", "name": "Christmas Day"},
            {"date": "2025-13-01", "name": "Nonsense"},
            {"name": "No date"},
            {"date": "2025-07-04"},
            42,
            {"date": "2025-01-01", "name": "New Year's Day"}
        ]"#;
        let cal = HolidayCalendar::from_json(json).unwrap();
        assert_eq!(cal.len(), 2);

        let entries = cal.entries();
        assert_eq!(entries[0].name, "New Year's Day");
        assert_eq!(entries[1].name, "Christmas Day");
    }

    #[test]
    fn test_lookup_by_date() {
        let cal = HolidayCalendar::from_entries(vec![Holiday {
            date: NaiveDate::from_ymd_opt(2025, 11, 27).unwrap(),
            name: "Thanksgiving".into(),
        }]);
        assert!(cal.is_holiday(NaiveDate::from_ymd_opt(2025, 11, 27).unwrap()));
        assert!(!cal.is_holiday(NaiveDate::from_ymd_opt(2025, 11, 28).unwrap()));
    }

    #[test]
    fn test_rejects_non_array() {
        assert!(HolidayCalendar::from_json(r#"{"date": "2025-01-01"}"#).is_err());
    }
}
