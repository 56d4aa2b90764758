use std::collections::BTreeMap;

use tracing::debug;

use super::calculator::{is_btts, is_over_line};
use crate::data_fetcher::models::{MatchSummary, Qualifier};

/// Per-team scoring record over a set of finished matches
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TeamStats {
    pub name: String,
    pub matches: u32,
    pub goals_for: u32,
    pub goals_against: u32,
    pub btts_percentage: f64,
    pub over25_percentage: f64,
    pub avg_goals_for: f64,
    pub avg_goals_against: f64,
}

impl TeamStats {
    pub fn goal_difference(&self) -> i64 {
        i64::from(self.goals_for) - i64::from(self.goals_against)
    }
}

#[derive(Default)]
struct Tally {
    name: String,
    matches: u32,
    goals_for: u32,
    goals_against: u32,
    btts: u32,
    over25: u32,
}

impl Tally {
    fn record(&mut self, scored: u32, conceded: u32) {
        self.matches += 1;
        self.goals_for += scored;
        self.goals_against += conceded;
        if is_btts(scored, conceded) {
            self.btts += 1;
        }
        if is_over_line(scored + conceded) {
            self.over25 += 1;
        }
    }

    fn finish(self) -> TeamStats {
        if self.matches == 0 {
            return TeamStats {
                name: self.name,
                ..Default::default()
            };
        }
        let n = f64::from(self.matches);
        TeamStats {
            name: self.name,
            matches: self.matches,
            goals_for: self.goals_for,
            goals_against: self.goals_against,
            btts_percentage: f64::from(self.btts) / n * 100.0,
            over25_percentage: f64::from(self.over25) / n * 100.0,
            avg_goals_for: f64::from(self.goals_for) / n,
            avg_goals_against: f64::from(self.goals_against) / n,
        }
    }
}

/// Builds a record for every team seen in `matches`, keyed by competitor id.
///
/// Teams that only appear in unfinished matches get an all-zero record.
pub fn generate_team_stats(matches: &[MatchSummary]) -> BTreeMap<String, TeamStats> {
    let mut tallies: BTreeMap<String, Tally> = BTreeMap::new();

    for summary in matches {
        for competitor in &summary.sport_event.competitors {
            tallies
                .entry(competitor.id.clone())
                .or_insert_with(|| Tally {
                    name: competitor.name.clone(),
                    ..Default::default()
                });
        }

        let Some((home_score, away_score)) = summary.final_score() else {
            continue;
        };

        for competitor in &summary.sport_event.competitors {
            let (scored, conceded) = match competitor.qualifier {
                Some(Qualifier::Home) => (home_score, away_score),
                Some(Qualifier::Away) => (away_score, home_score),
                None => continue,
            };
            if let Some(tally) = tallies.get_mut(&competitor.id) {
                tally.record(scored, conceded);
            }
        }
    }

    debug!(
        "Generated team stats for {} teams from {} summaries",
        tallies.len(),
        matches.len()
    );

    tallies
        .into_iter()
        .map(|(id, tally)| (id, tally.finish()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing_utils::TestDataBuilder;

    #[test]
    fn test_goals_attributed_by_side() {
        let matches = vec![
            TestDataBuilder::finished_match("1", "a", "b", 2, 1, "2024-01-10T15:00:00+00:00"),
            TestDataBuilder::finished_match("2", "b", "a", 3, 0, "2024-01-17T15:00:00+00:00"),
        ];
        let stats = generate_team_stats(&matches);

        let a = &stats["a"];
        assert_eq!(a.name, "A");
        assert_eq!(a.matches, 2);
        assert_eq!(a.goals_for, 2);
        assert_eq!(a.goals_against, 4);
        assert_eq!(a.goal_difference(), -2);
        assert_eq!(a.avg_goals_for, 1.0);
        assert_eq!(a.avg_goals_against, 2.0);
        assert_eq!(a.btts_percentage, 50.0);
        assert_eq!(a.over25_percentage, 100.0);

        let b = &stats["b"];
        assert_eq!(b.goals_for, 4);
        assert_eq!(b.goals_against, 2);
        assert_eq!(b.goal_difference(), 2);
    }

    #[test]
    fn test_team_without_finished_matches_gets_zeroes() {
        let matches = vec![
            TestDataBuilder::finished_match("1", "a", "b", 1, 1, "2024-01-10T15:00:00+00:00"),
            TestDataBuilder::unfinished_match("2", "c", "d"),
        ];
        let stats = generate_team_stats(&matches);
        assert_eq!(stats.len(), 4);

        let c = &stats["c"];
        assert_eq!(c.matches, 0);
        assert_eq!(c.avg_goals_for, 0.0);
        assert_eq!(c.btts_percentage, 0.0);
        assert_eq!(c.name, "C");
    }

    #[test]
    fn test_live_scores_do_not_count() {
        let matches = vec![TestDataBuilder::live_match("1", "a", "b", 3, 2)];
        let stats = generate_team_stats(&matches);
        assert_eq!(stats["a"].matches, 0);
        assert_eq!(stats["b"].goals_for, 0);
    }

    #[test]
    fn test_empty_input() {
        assert!(generate_team_stats(&[]).is_empty());
    }
}
