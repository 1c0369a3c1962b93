use chrono::{DateTime, Utc};
use colored::*;
use tabled::{settings::Style, Table, Tabled};

use crate::analysis::champion_stats::{ChampionPerformance, PerformanceTracker};
use crate::api::models::LeagueEntryDto;

#[derive(Tabled)]
struct ChampionRow {
    champion: String,
    games: String,
    #[tabled(rename = "win rate")]
    win_rate: String,
    kda: String,
    #[tabled(rename = "avg K/D/A")]
    avg_kda: String,
    #[tabled(rename = "CS/min")]
    cs_per_min: String,
}

#[derive(Tabled)]
struct RankRow {
    queue: String,
    tier: String,
    lp: String,
    record: String,
    #[tabled(rename = "win rate")]
    win_rate: String,
}

pub fn display_error(error: &str) {
    eprintln!("{} {}", "❌ Error:".red().bold(), error);
}

pub fn display_info(message: &str) {
    println!("{} {}", "ℹ️".cyan(), message);
}

pub fn display_success(message: &str) {
    println!("{} {}", "✓".green(), message);
}

pub fn display_partial_warning(fetched: usize, requested: usize) {
    println!(
        "{} Only {}/{} matches could be fetched; stats below cover what we got",
        "⚠️".yellow(),
        fetched,
        requested
    );
}

pub fn display_rank(entries: &[LeagueEntryDto], player_name: &str) {
    println!(
        "\n{}",
        format!("🏆 Ranked Queues for {}", player_name).bold().cyan()
    );
    println!("{}\n", "=".repeat(60).cyan());

    if entries.is_empty() {
        println!("{}", "No ranked entries this season".yellow());
        return;
    }

    let rows: Vec<RankRow> = entries
        .iter()
        .map(|entry| {
            let total = entry.wins + entry.losses;
            let win_rate = if total > 0 {
                format!("{:.1}%", entry.wins as f64 / total as f64 * 100.0)
            } else {
                "-".to_string()
            };
            RankRow {
                queue: queue_label(&entry.queue_type),
                tier: format!("{} {}", entry.tier, entry.rank),
                lp: format!("{} LP", entry.league_points),
                record: format!("{}W / {}L", entry.wins, entry.losses),
                win_rate,
            }
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{}", table);
}

pub fn display_champion_performance(tracker: &PerformanceTracker, player_name: &str) {
    let games = tracker.games_counted();
    let wins = tracker.wins_counted();
    let losses = games - wins;

    println!(
        "\n{}",
        format!("📊 Champion Performance for {} (last {} games)", player_name, games)
            .bold()
            .cyan()
    );
    println!("{}\n", "=".repeat(80).cyan());

    if games == 0 {
        println!("{}", "No match data available".yellow());
        return;
    }

    let win_rate = wins as f64 / games as f64 * 100.0;
    print!(
        "{} {} W / {} L ({:.1}% WR)",
        "📈 Overall:".bold(),
        wins.to_string().green(),
        losses.to_string().red(),
        win_rate
    );
    if let Some(since) = tracker
        .earliest_game_creation()
        .and_then(DateTime::<Utc>::from_timestamp_millis)
    {
        print!(" since {}", since.format("%Y-%m-%d"));
    }
    println!("\n");

    let rows: Vec<ChampionRow> = tracker.ranked().iter().map(champion_row).collect();

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{}\n", table);
}

fn champion_row(perf: &ChampionPerformance) -> ChampionRow {
    ChampionRow {
        champion: perf.champion_name.clone(),
        games: format!("{}", perf.games),
        win_rate: format!("{:.1}%", perf.win_rate()),
        kda: format!("{:.2}", perf.kda()),
        avg_kda: format!(
            "{:.1}/{:.1}/{:.1}",
            perf.avg_kills(),
            perf.avg_deaths(),
            perf.avg_assists()
        ),
        cs_per_min: format!("{:.1}", perf.cs_per_min()),
    }
}

fn queue_label(queue_type: &str) -> String {
    match queue_type {
        "RANKED_SOLO_5x5" => "Solo/Duo".to_string(),
        "RANKED_FLEX_SR" => "Flex".to_string(),
        other => other.to_string(),
    }
}
