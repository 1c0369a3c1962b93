use serde::Deserialize;

// Account V1 response
#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct AccountDto {
    pub puuid: String,
    pub game_name: String,
    pub tag_line: String,
}

// Summoner V4 response
#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct SummonerDto {
    #[serde(default)]
    pub id: String,
    pub puuid: String,
    pub summoner_level: i32,
    #[serde(default)]
    pub profile_icon_id: i32,
}

// League V4 response (one entry per ranked queue)
#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct LeagueEntryDto {
    #[serde(default)]
    pub queue_type: String,
    pub tier: String,
    pub rank: String,
    pub league_points: i32,
    pub wins: i32,
    pub losses: i32,
}

// Match V5 response
#[derive(Debug, Deserialize, Clone)]
pub struct MatchDto {
    pub metadata: MatchMetadata,
    pub info: MatchInfo,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct MatchMetadata {
    pub match_id: String,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct MatchInfo {
    #[serde(default)]
    pub game_creation: i64, // unix millis
    pub game_duration: i64, // seconds
    #[serde(default)]
    pub queue_id: i32,
    pub participants: Vec<ParticipantDto>,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantDto {
    pub puuid: String,
    pub champion_id: i32,
    pub champion_name: String,
    pub team_id: i32,
    pub win: bool,
    #[serde(default)]
    pub kills: u32,
    #[serde(default)]
    pub deaths: u32,
    #[serde(default)]
    pub assists: u32,
    #[serde(default)]
    pub total_minions_killed: u32,
    #[serde(default)]
    pub neutral_minions_killed: u32,
    #[serde(default)]
    pub gold_earned: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_match_with_missing_optional_fields() {
        let body = r#"{
            "metadata": { "matchId": "EUW1_123", "participants": ["p-1"] },
            "info": {
                "gameDuration": 1800,
                "participants": [{
                    "puuid": "p-1",
                    "championId": 157,
                    "championName": "Yasuo",
                    "teamId": 100,
                    "win": true,
                    "kills": 7,
                    "deaths": 3,
                    "assists": 9
                }]
            }
        }"#;

        let m: MatchDto = serde_json::from_str(body).unwrap();
        assert_eq!(m.metadata.match_id, "EUW1_123");
        assert_eq!(m.info.game_creation, 0);
        assert_eq!(m.info.queue_id, 0);
        let p = &m.info.participants[0];
        assert_eq!(p.champion_name, "Yasuo");
        assert_eq!(p.total_minions_killed, 0);
        assert_eq!(p.gold_earned, 0);
    }

    #[test]
    fn parses_league_entries_array() {
        let body = r#"[{
            "queueType": "RANKED_SOLO_5x5",
            "tier": "DIAMOND",
            "rank": "II",
            "leaguePoints": 54,
            "wins": 120,
            "losses": 98
        }]"#;

        let entries: Vec<LeagueEntryDto> = serde_json::from_str(body).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].tier, "DIAMOND");
        assert_eq!(entries[0].league_points, 54);
    }
}
