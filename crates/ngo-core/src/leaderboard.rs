//! Points leaderboard
//!
//! Combines two independent point sources per e-mail address:
//! - approved volunteer participations (points fixed at signup)
//! - donations, one point per whole currency unit of the donor's total
//!
//! Ranking is strictly positional: ties on total points are broken by event
//! count, then by most recent activity, and never share a rank.

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDateTime;
use serde::Serialize;

/// Approved volunteering aggregated per e-mail
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VolunteerTally {
    pub email: String,
    pub points: i64,
    pub event_count: i64,
    pub last_shift: Option<NaiveDateTime>,
}

/// Donations aggregated per donor e-mail
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DonationTally {
    pub email: String,
    pub total_cents: i64,
    pub donation_count: i64,
    pub last_donation: Option<NaiveDateTime>,
}

impl DonationTally {
    /// Points for the donor's total, truncated to whole currency units
    pub fn points(&self) -> i64 {
        self.total_cents / 100
    }
}

/// One ranked row of the leaderboard
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LeaderboardEntry {
    pub rank: usize,
    pub email: String,
    pub display_name: String,
    pub has_account: bool,
    pub volunteer_points: i64,
    pub donation_points: i64,
    pub total_points: i64,
    pub event_count: i64,
    pub donation_count: i64,
    pub last_activity: Option<NaiveDateTime>,
}

/// Merge both tallies, sort, and assign positional ranks.
///
/// `names` maps e-mail to the account display name; addresses without an
/// account show the e-mail itself. `top` truncates after ranking.
pub fn rank_leaderboard(
    volunteers: Vec<VolunteerTally>,
    donations: Vec<DonationTally>,
    names: &HashMap<String, String>,
    top: Option<usize>,
) -> Vec<LeaderboardEntry> {
    let mut merged: BTreeMap<String, LeaderboardEntry> = BTreeMap::new();

    let blank = |email: &str| LeaderboardEntry {
        rank: 0,
        email: email.to_string(),
        display_name: names.get(email).cloned().unwrap_or_else(|| email.to_string()),
        has_account: names.contains_key(email),
        volunteer_points: 0,
        donation_points: 0,
        total_points: 0,
        event_count: 0,
        donation_count: 0,
        last_activity: None,
    };

    for tally in volunteers {
        let entry = merged
            .entry(tally.email.clone())
            .or_insert_with(|| blank(&tally.email));
        entry.volunteer_points = entry.volunteer_points.saturating_add(tally.points);
        entry.event_count += tally.event_count;
        entry.last_activity = entry.last_activity.max(tally.last_shift);
    }

    for tally in donations {
        let points = tally.points();
        let entry = merged
            .entry(tally.email.clone())
            .or_insert_with(|| blank(&tally.email));
        entry.donation_points = entry.donation_points.saturating_add(points);
        entry.donation_count += tally.donation_count;
        entry.last_activity = entry.last_activity.max(tally.last_donation);
    }

    let mut entries: Vec<LeaderboardEntry> = merged
        .into_values()
        .map(|mut e| {
            e.total_points = e.volunteer_points.saturating_add(e.donation_points);
            e
        })
        .collect();

    // `None` sorts before `Some`, so reversing puts the most recent activity first.
    // The email key only makes equal rows deterministic.
    entries.sort_by(|a, b| {
        b.total_points
            .cmp(&a.total_points)
            .then_with(|| b.event_count.cmp(&a.event_count))
            .then_with(|| b.last_activity.cmp(&a.last_activity))
            .then_with(|| a.email.cmp(&b.email))
    });

    if let Some(n) = top {
        entries.truncate(n);
    }
    for (index, entry) in entries.iter_mut().enumerate() {
        entry.rank = index + 1;
    }
    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(day: u32) -> Option<NaiveDateTime> {
        NaiveDate::from_ymd_opt(2026, 4, day)
            .and_then(|d| d.and_hms_opt(10, 0, 0))
    }

    fn vol(email: &str, points: i64, events: i64, day: u32) -> VolunteerTally {
        VolunteerTally {
            email: email.to_string(),
            points,
            event_count: events,
            last_shift: at(day),
        }
    }

    fn don(email: &str, cents: i64, count: i64, day: u32) -> DonationTally {
        DonationTally {
            email: email.to_string(),
            total_cents: cents,
            donation_count: count,
            last_donation: at(day),
        }
    }

    #[test]
    fn test_ties_broken_by_event_count() {
        let board = rank_leaderboard(
            vec![vol("c@x.com", 150, 2, 1), vol("b@x.com", 200, 1, 1), vol("a@x.com", 200, 3, 1)],
            vec![],
            &HashMap::new(),
            None,
        );
        let order: Vec<_> = board.iter().map(|e| (e.email.as_str(), e.rank)).collect();
        assert_eq!(order, vec![("a@x.com", 1), ("b@x.com", 2), ("c@x.com", 3)]);
    }

    #[test]
    fn test_ties_then_broken_by_recent_activity() {
        let board = rank_leaderboard(
            vec![vol("old@x.com", 100, 1, 2), vol("new@x.com", 100, 1, 9)],
            vec![],
            &HashMap::new(),
            None,
        );
        assert_eq!(board[0].email, "new@x.com");
        assert_eq!(board[1].rank, 2);
    }

    #[test]
    fn test_donation_only_user_truncated_points() {
        let donations = vec![don("user@x.com", 7550, 1, 3)];
        let board = rank_leaderboard(vec![], donations, &HashMap::new(), None);
        assert_eq!(board.len(), 1);
        assert_eq!(board[0].donation_points, 75);
        assert_eq!(board[0].total_points, 75);
        assert_eq!(board[0].event_count, 0);
        assert_eq!(board[0].display_name, "user@x.com");
        assert!(!board[0].has_account);
    }

    #[test]
    fn test_totals_saturate_at_capped_sums() {
        let board = rank_leaderboard(
            vec![vol("big@x.com", i64::MAX - 5, 3, 1)],
            vec![don("big@x.com", i64::MAX, 92_233_721, 2)],
            &HashMap::new(),
            None,
        );
        assert_eq!(board[0].volunteer_points, i64::MAX - 5);
        assert_eq!(board[0].donation_points, i64::MAX / 100);
        assert_eq!(board[0].total_points, i64::MAX);
    }

    #[test]
    fn test_sources_merge_on_email() {
        let mut names = HashMap::new();
        names.insert("a@x.com".to_string(), "Aisyah".to_string());
        let board = rank_leaderboard(
            vec![vol("a@x.com", 40, 1, 2)],
            vec![don("a@x.com", 1099, 2, 5)],
            &names,
            None,
        );
        let a = &board[0];
        assert_eq!(a.volunteer_points, 40);
        assert_eq!(a.donation_points, 10);
        assert_eq!(a.total_points, 50);
        assert_eq!(a.donation_count, 2);
        assert_eq!(a.last_activity, at(5));
        assert_eq!(a.display_name, "Aisyah");
        assert!(a.has_account);
    }

    #[test]
    fn test_donation_total_truncated_after_summing() {
        // 0.60 + 0.60 = 1.20 -> 1 point, not 0 + 0
        let donations = vec![don("d@x.com", 120, 2, 1)];
        let board = rank_leaderboard(vec![], donations, &HashMap::new(), None);
        assert_eq!(board[0].donation_points, 1);
    }

    #[test]
    fn test_top_n() {
        let board = rank_leaderboard(
            vec![vol("a@x.com", 30, 1, 1), vol("b@x.com", 20, 1, 1), vol("c@x.com", 10, 1, 1)],
            vec![],
            &HashMap::new(),
            Some(2),
        );
        assert_eq!(board.len(), 2);
        assert_eq!(board[1].email, "b@x.com");
        assert_eq!(board[1].rank, 2);
    }
}
