//! Achievement badges and the trekker leaderboard.

use serde::{Deserialize, Serialize};

use crate::trek_log::TrekLog;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BadgeKind {
    TrailExplorer,
    SafetyChamp,
    AltitudeAce,
    StreakMaster,
    DistanceDominator,
    EnduranceExpert,
}

impl BadgeKind {
    pub const ALL: [BadgeKind; 6] = [
        BadgeKind::TrailExplorer,
        BadgeKind::SafetyChamp,
        BadgeKind::AltitudeAce,
        BadgeKind::StreakMaster,
        BadgeKind::DistanceDominator,
        BadgeKind::EnduranceExpert,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            BadgeKind::TrailExplorer => "Trail Explorer",
            BadgeKind::SafetyChamp => "Safety Champ",
            BadgeKind::AltitudeAce => "Altitude Ace",
            BadgeKind::StreakMaster => "Streak Master",
            BadgeKind::DistanceDominator => "Distance Dominator",
            BadgeKind::EnduranceExpert => "Endurance Expert",
        }
    }

    pub fn category(&self) -> &'static str {
        match self {
            BadgeKind::TrailExplorer => "Experience",
            BadgeKind::SafetyChamp => "Safety",
            BadgeKind::AltitudeAce => "Altitude",
            BadgeKind::StreakMaster => "Streaks",
            BadgeKind::DistanceDominator => "Distance",
            BadgeKind::EnduranceExpert => "Endurance",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            BadgeKind::TrailExplorer => "Complete 5 treks",
            BadgeKind::SafetyChamp => "Fill emergency info",
            BadgeKind::AltitudeAce => "Hike above 3000m",
            BadgeKind::StreakMaster => "Trek 3 weekends in a row",
            BadgeKind::DistanceDominator => "Hike 100km total",
            BadgeKind::EnduranceExpert => "Complete a 10-hour trek",
        }
    }

    /// Progress needed to earn the badge.
    pub fn target(&self) -> u32 {
        match self {
            BadgeKind::TrailExplorer => 5,
            BadgeKind::SafetyChamp => 1,
            BadgeKind::AltitudeAce => 3000,
            BadgeKind::StreakMaster => 3,
            BadgeKind::DistanceDominator => 100,
            BadgeKind::EnduranceExpert => 10,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BadgeProgress {
    pub kind: BadgeKind,
    pub current: u32,
    pub max: u32,
    pub earned: bool,
}

impl BadgeProgress {
    fn new(kind: BadgeKind, current: u32) -> Self {
        let max = kind.target();
        Self {
            kind,
            current,
            max,
            earned: current >= max,
        }
    }

    /// Fraction complete, capped at 1.
    pub fn progress(&self) -> f64 {
        if self.max == 0 {
            return 1.0;
        }
        (self.current as f64 / self.max as f64).min(1.0)
    }
}

/// Progress on every badge for a trekker's log.
pub fn evaluate(log: &TrekLog, has_emergency_info: bool) -> Vec<BadgeProgress> {
    BadgeKind::ALL
        .into_iter()
        .map(|kind| {
            let current = match kind {
                BadgeKind::TrailExplorer => log.count() as u32,
                BadgeKind::SafetyChamp => u32::from(has_emergency_info),
                BadgeKind::AltitudeAce => log.max_elevation_m(),
                BadgeKind::StreakMaster => log.weekend_streak(),
                BadgeKind::DistanceDominator => log.total_distance_km().floor() as u32,
                BadgeKind::EnduranceExpert => log.longest_duration_hours().floor() as u32,
            };
            BadgeProgress::new(kind, current)
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub name: String,
    pub treks: u32,
}

impl LeaderboardEntry {
    pub fn new(name: impl Into<String>, treks: u32) -> Self {
        Self {
            name: name.into(),
            treks,
        }
    }
}

/// Most treks first; ties by name.
pub fn leaderboard(mut entries: Vec<LeaderboardEntry>) -> Vec<LeaderboardEntry> {
    entries.sort_by(|a, b| b.treks.cmp(&a.treks).then_with(|| a.name.cmp(&b.name)));
    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trek_log::TrekEntry;
    use chrono::NaiveDate;

    fn d(m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, m, day).unwrap()
    }

    #[test]
    fn test_empty_log() {
        let badges = evaluate(&TrekLog::default(), false);
        assert_eq!(badges.len(), 6);
        assert!(badges.iter().all(|b| !b.earned && b.current == 0));
    }

    #[test]
    fn test_progress_from_log() {
        let log = TrekLog::new(vec![
            TrekEntry::new("Poon Hill", d(6, 1)).with_distance(40.5).with_elevation(3210).with_duration(6.0),
            TrekEntry::new("Chisapani", d(6, 8)).with_distance(23.9).with_elevation(2300).with_duration(10.5),
        ]);
        let badges = evaluate(&log, true);
        let get = |k: BadgeKind| badges.iter().find(|b| b.kind == k).unwrap().clone();

        assert!(get(BadgeKind::SafetyChamp).earned);
        assert!(get(BadgeKind::AltitudeAce).earned);
        assert!(get(BadgeKind::EnduranceExpert).earned);

        let distance = get(BadgeKind::DistanceDominator);
        assert_eq!(distance.current, 64);
        assert!(!distance.earned);

        let explorer = get(BadgeKind::TrailExplorer);
        assert_eq!((explorer.current, explorer.max), (2, 5));
        assert_eq!(explorer.progress(), 0.4);

        assert_eq!(get(BadgeKind::StreakMaster).current, 2);
    }

    #[test]
    fn test_progress_is_capped() {
        let log = TrekLog::new(vec![TrekEntry::new("Yala Peak", d(5, 1)).with_elevation(5500)]);
        let altitude = evaluate(&log, false)
            .into_iter()
            .find(|b| b.kind == BadgeKind::AltitudeAce)
            .unwrap();
        assert_eq!(altitude.progress(), 1.0);
    }

    #[test]
    fn test_leaderboard_order() {
        let board = leaderboard(vec![
            LeaderboardEntry::new("Riya", 10),
            LeaderboardEntry::new("Aayush", 14),
            LeaderboardEntry::new("Sairaa", 12),
            LeaderboardEntry::new("Bina", 12),
        ]);
        let names: Vec<_> = board.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Aayush", "Bina", "Sairaa", "Riya"]);
    }
}
