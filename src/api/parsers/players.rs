use log::warn;
use serde_json::Value;

use super::result_set::{ResultSet, Row};
use crate::domain::Player;

pub const ALL_PLAYERS_SET: &str = "CommonAllPlayers";

/// Player index entry with its activity flags resolved
#[derive(Debug, Clone, PartialEq)]
pub struct IndexedPlayer {
    pub player: Player,
    pub last_comma_first: String,
    pub active: bool,
}

impl IndexedPlayer {
    /// Case-insensitive substring match on the whole name (either form) or any single token
    pub fn matches(&self, query: &str) -> bool {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return false;
        }

        let first_last = self.player.full_name().to_lowercase();
        let last_first = self.last_comma_first.to_lowercase();

        first_last.contains(&query)
            || last_first.contains(&query)
            || name_tokens(&first_last)
                .chain(name_tokens(&last_first))
                .any(|token| token.contains(&query))
    }
}

struct Columns {
    id: usize,
    first_last: usize,
    last_first: usize,
    roster_status: usize,
    games_played: usize,
}

impl Columns {
    fn locate(set: &ResultSet) -> Option<Self> {
        Some(Self {
            id: set.column("PERSON_ID")?,
            first_last: set.column("DISPLAY_FIRST_LAST")?,
            last_first: set.column("DISPLAY_LAST_COMMA_FIRST")?,
            roster_status: set.column("ROSTERSTATUS")?,
            games_played: set.column("GAMES_PLAYED_FLAG")?,
        })
    }
}

/// Parse the player index; malformed rows are skipped
pub fn parse_player_index(data: &Value) -> Vec<IndexedPlayer> {
    let Some(set) = ResultSet::find(data, ALL_PLAYERS_SET) else {
        return Vec::new();
    };
    let Some(columns) = Columns::locate(&set) else {
        return Vec::new();
    };

    set.rows()
        .filter_map(|row| {
            let parsed = parse_row(&row, &columns);
            if parsed.is_none() {
                warn!("Skipping malformed {} row", ALL_PLAYERS_SET);
            }
            parsed
        })
        .collect()
}

/// Active players matching `query`, in index order, capped at `limit`
pub fn filter_players(index: Vec<IndexedPlayer>, query: &str, limit: usize) -> Vec<Player> {
    index
        .into_iter()
        .filter(|p| p.active && p.matches(query))
        .take(limit)
        .map(|p| p.player)
        .collect()
}

fn parse_row(row: &Row, columns: &Columns) -> Option<IndexedPlayer> {
    let id = row.i64(columns.id)?;
    let first_last = row.str(columns.first_last).unwrap_or_default().trim();
    let last_first = row.str(columns.last_first).unwrap_or_default().trim();
    if first_last.is_empty() && last_first.is_empty() {
        return None;
    }

    let (first_name, last_name) = split_name(last_first, first_last);
    let mut player = Player::new(id, first_name, last_name);
    if !first_last.is_empty() {
        player = player.with_display_name(first_last);
    }

    Some(IndexedPlayer {
        player,
        last_comma_first: last_first.to_string(),
        active: is_on_roster(row, columns.roster_status)
            || has_played(row, columns.games_played),
    })
}

/// First and last name from "Last, First", falling back to "First Last"
fn split_name(last_first: &str, first_last: &str) -> (String, String) {
    if let Some((last, first)) = last_first.split_once(',') {
        return (first.trim().to_string(), last.trim().to_string());
    }
    match first_last.split_once(' ') {
        Some((first, last)) => (first.trim().to_string(), last.trim().to_string()),
        None if !first_last.is_empty() => (String::new(), first_last.to_string()),
        None => (String::new(), last_first.to_string()),
    }
}

fn is_on_roster(row: &Row, index: usize) -> bool {
    row.i64(index) == Some(1)
}

fn has_played(row: &Row, index: usize) -> bool {
    row.str(index)
        .is_some_and(|flag| flag.eq_ignore_ascii_case("Y"))
}

fn name_tokens(name: &str) -> impl Iterator<Item = &str> {
    name.split([' ', ','])
        .filter(|token| !token.is_empty())
}
