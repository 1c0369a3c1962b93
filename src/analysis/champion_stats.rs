use std::collections::HashMap;

use crate::api::models::MatchDto;

/// Aggregated performance on one champion across the analyzed matches.
#[derive(Debug, Clone)]
pub struct ChampionPerformance {
    pub champion_name: String,
    pub champion_id: i32,
    pub games: usize,
    pub wins: usize,
    pub kills: u32,
    pub deaths: u32,
    pub assists: u32,
    pub total_cs: u32,
    pub total_gold: u64,
    pub total_game_seconds: i64,
}

impl ChampionPerformance {
    fn new(champion_name: String, champion_id: i32) -> Self {
        ChampionPerformance {
            champion_name,
            champion_id,
            games: 0,
            wins: 0,
            kills: 0,
            deaths: 0,
            assists: 0,
            total_cs: 0,
            total_gold: 0,
            total_game_seconds: 0,
        }
    }

    pub fn win_rate(&self) -> f64 {
        if self.games == 0 {
            0.0
        } else {
            (self.wins as f64 / self.games as f64) * 100.0
        }
    }

    pub fn kda(&self) -> f64 {
        if self.deaths == 0 {
            (self.kills + self.assists) as f64
        } else {
            (self.kills + self.assists) as f64 / self.deaths as f64
        }
    }

    pub fn avg_kills(&self) -> f64 {
        self.kills as f64 / self.games.max(1) as f64
    }

    pub fn avg_deaths(&self) -> f64 {
        self.deaths as f64 / self.games.max(1) as f64
    }

    pub fn avg_assists(&self) -> f64 {
        self.assists as f64 / self.games.max(1) as f64
    }

    pub fn cs_per_min(&self) -> f64 {
        if self.total_game_seconds == 0 {
            0.0
        } else {
            self.total_cs as f64 / (self.total_game_seconds as f64 / 60.0)
        }
    }
}

/// Accumulates per-champion stats for one player over whatever matches the
/// fetch phase managed to produce. Matches where the player does not appear
/// are skipped, never an error — partial data is the normal case here.
pub struct PerformanceTracker {
    stats: HashMap<String, ChampionPerformance>,
    games_counted: usize,
    wins_counted: usize,
    earliest_game_creation: Option<i64>,
}

impl PerformanceTracker {
    pub fn new() -> Self {
        PerformanceTracker {
            stats: HashMap::new(),
            games_counted: 0,
            wins_counted: 0,
            earliest_game_creation: None,
        }
    }

    pub fn add_match(&mut self, m: &MatchDto, puuid: &str) {
        let Some(player) = m.info.participants.iter().find(|p| p.puuid == puuid) else {
            return;
        };

        let entry = self
            .stats
            .entry(player.champion_name.clone())
            .or_insert_with(|| {
                ChampionPerformance::new(player.champion_name.clone(), player.champion_id)
            });

        entry.games += 1;
        if player.win {
            entry.wins += 1;
        }
        entry.kills += player.kills;
        entry.deaths += player.deaths;
        entry.assists += player.assists;
        entry.total_cs += player.total_minions_killed + player.neutral_minions_killed;
        entry.total_gold += player.gold_earned;
        entry.total_game_seconds += m.info.game_duration;

        self.games_counted += 1;
        if player.win {
            self.wins_counted += 1;
        }
        if m.info.game_creation > 0 {
            self.earliest_game_creation = Some(match self.earliest_game_creation {
                Some(earliest) => earliest.min(m.info.game_creation),
                None => m.info.game_creation,
            });
        }
    }

    /// Per-champion stats, most-played first.
    pub fn ranked(&self) -> Vec<ChampionPerformance> {
        let mut all: Vec<ChampionPerformance> = self.stats.values().cloned().collect();
        all.sort_by(|a, b| b.games.cmp(&a.games).then(a.champion_name.cmp(&b.champion_name)));
        all
    }

    pub fn games_counted(&self) -> usize {
        self.games_counted
    }

    pub fn wins_counted(&self) -> usize {
        self.wins_counted
    }

    /// Unix millis of the oldest analyzed match, if any carried a timestamp.
    pub fn earliest_game_creation(&self) -> Option<i64> {
        self.earliest_game_creation
    }
}

impl Default for PerformanceTracker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::models::{MatchInfo, MatchMetadata, ParticipantDto};

    fn participant(puuid: &str, champion: &str, win: bool, k: u32, d: u32, a: u32) -> ParticipantDto {
        ParticipantDto {
            puuid: puuid.to_string(),
            champion_id: 1,
            champion_name: champion.to_string(),
            team_id: 100,
            win,
            kills: k,
            deaths: d,
            assists: a,
            total_minions_killed: 150,
            neutral_minions_killed: 30,
            gold_earned: 12000,
        }
    }

    fn match_with(participants: Vec<ParticipantDto>) -> MatchDto {
        MatchDto {
            metadata: MatchMetadata {
                match_id: "EUW1_1".to_string(),
            },
            info: MatchInfo {
                game_creation: 1_700_000_000_000,
                game_duration: 1800,
                queue_id: 420,
                participants,
            },
        }
    }

    #[test]
    fn aggregates_games_per_champion() {
        let mut tracker = PerformanceTracker::new();
        tracker.add_match(&match_with(vec![participant("me", "Ahri", true, 8, 2, 6)]), "me");
        tracker.add_match(&match_with(vec![participant("me", "Ahri", false, 2, 5, 3)]), "me");
        tracker.add_match(&match_with(vec![participant("me", "Jinx", true, 12, 1, 4)]), "me");

        let ranked = tracker.ranked();
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].champion_name, "Ahri");
        assert_eq!(ranked[0].games, 2);
        assert_eq!(ranked[0].wins, 1);
        assert_eq!(ranked[0].win_rate(), 50.0);
        assert_eq!(ranked[1].champion_name, "Jinx");
        assert_eq!(tracker.games_counted(), 3);
        assert_eq!(tracker.wins_counted(), 2);
    }

    #[test]
    fn skips_matches_without_the_player() {
        let mut tracker = PerformanceTracker::new();
        tracker.add_match(
            &match_with(vec![participant("someone-else", "Zed", true, 1, 1, 1)]),
            "me",
        );

        assert!(tracker.ranked().is_empty());
        assert_eq!(tracker.games_counted(), 0);
    }

    #[test]
    fn kda_handles_zero_deaths() {
        let mut tracker = PerformanceTracker::new();
        tracker.add_match(&match_with(vec![participant("me", "Sona", true, 3, 0, 15)]), "me");

        let ranked = tracker.ranked();
        assert_eq!(ranked[0].kda(), 18.0);
        assert!(ranked[0].cs_per_min() > 0.0);
    }
}
