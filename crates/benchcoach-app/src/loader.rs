// Snapshot and free-agent file loading.

use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

use benchcoach_core::lineup::{Player, Position};
use benchcoach_core::snapshot::WeekSnapshot;
use benchcoach_core::LineupError;
use serde::Deserialize;
use tracing::info;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to read file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("invalid snapshot JSON in {path}: {source}")]
    Json {
        path: String,
        source: serde_json::Error,
    },

    #[error("CSV error in {path}: {source}")]
    Csv { path: String, source: csv::Error },

    #[error("invalid player data in {path}: {source}")]
    Invalid { path: String, source: LineupError },
}

// ---------------------------------------------------------------------------
// Raw CSV serde struct (private)
// ---------------------------------------------------------------------------

/// Free-agent CSV row. Columns beyond these are ignored.
#[derive(Debug, Deserialize)]
struct RawFreeAgent {
    name: String,
    position: String,
    #[serde(default)]
    team: String,
    projected_points: f64,
    #[serde(default)]
    actual_points: Option<f64>,
    #[serde(default)]
    id: Option<String>,
}

// ---------------------------------------------------------------------------
// Reader-based loaders (enable testing without temp files)
// ---------------------------------------------------------------------------

fn snapshot_from_reader<R: Read>(rdr: R) -> Result<WeekSnapshot, serde_json::Error> {
    serde_json::from_reader(rdr)
}

/// Parse free agents from CSV. Rows without an `id` get `fa-<row>`, counting
/// data rows from 1. Ids must be unique within the file.
fn free_agents_from_reader<R: Read>(rdr: R, path: &str) -> Result<Vec<Player>, LoadError> {
    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(rdr);
    let mut players = Vec::new();
    let mut seen = HashSet::new();
    let invalid = |source: LineupError| LoadError::Invalid {
        path: path.to_string(),
        source,
    };

    for (idx, result) in reader.deserialize::<RawFreeAgent>().enumerate() {
        let raw = result.map_err(|e| LoadError::Csv {
            path: path.to_string(),
            source: e,
        })?;
        let id = raw
            .id
            .filter(|id| !id.is_empty())
            .unwrap_or_else(|| format!("fa-{}", idx + 1));

        if !seen.insert(id.clone()) {
            return Err(invalid(LineupError::DuplicatePlayer { player_id: id }));
        }

        let position = Position::from_str_pos(&raw.position).ok_or_else(|| {
            invalid(LineupError::UnknownPosition {
                player_id: id.clone(),
                value: raw.position.clone(),
            })
        })?;

        let player = Player::new(id, raw.name, position, raw.team, raw.projected_points)
            .with_actual(raw.actual_points.unwrap_or(0.0));
        player.validate().map_err(invalid)?;
        players.push(player);
    }

    Ok(players)
}

// ---------------------------------------------------------------------------
// Public path-based loaders
// ---------------------------------------------------------------------------

/// Load a normalized week snapshot.
pub fn load_snapshot(path: &Path) -> Result<WeekSnapshot, LoadError> {
    let file = std::fs::File::open(path).map_err(|e| LoadError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    let snapshot = snapshot_from_reader(std::io::BufReader::new(file)).map_err(|e| {
        LoadError::Json {
            path: path.display().to_string(),
            source: e,
        }
    })?;
    info!(
        path = %path.display(),
        team = %snapshot.team_name,
        week = ?snapshot.week,
        "snapshot loaded"
    );
    Ok(snapshot)
}

/// Load a free-agent pool from CSV.
pub fn load_free_agents(path: &Path) -> Result<Vec<Player>, LoadError> {
    let file = std::fs::File::open(path).map_err(|e| LoadError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    let players = free_agents_from_reader(file, &path.display().to_string())?;
    info!(path = %path.display(), count = players.len(), "free agents loaded");
    Ok(players)
}

#[cfg(test)]
mod tests {
    use super::*;
    use benchcoach_core::lineup::Metric;

    #[test]
    fn csv_with_and_without_ids() {
        let csv_data = "\
name,position,team,projected_points,actual_points,id
Jake Moody,K,SF,8.4,,
Tyler Conklin,TE,NYJ,6.1,3.2,nfl.p.31000";

        let players = free_agents_from_reader(csv_data.as_bytes(), "fa.csv").unwrap();
        assert_eq!(players.len(), 2);
        assert_eq!(players[0].id, "fa-1");
        assert_eq!(players[0].position, Position::Kicker);
        assert_eq!(players[0].points(Metric::Actual), 0.0);
        assert_eq!(players[1].id, "nfl.p.31000");
        assert_eq!(players[1].points(Metric::Actual), 3.2);
    }

    #[test]
    fn csv_minimal_headers_and_extra_columns() {
        let csv_data = "\
name,position,team,projected_points,ownership
Gus Edwards, RB ,LAC,9.0,12%";

        let players = free_agents_from_reader(csv_data.as_bytes(), "fa.csv").unwrap();
        assert_eq!(players.len(), 1);
        assert_eq!(players[0].position, Position::RunningBack);
        assert_eq!(players[0].id, "fa-1");
    }

    #[test]
    fn csv_unknown_position_is_invalid() {
        let csv_data = "\
name,position,team,projected_points
Some Linebacker,LB,DAL,4.0";

        match free_agents_from_reader(csv_data.as_bytes(), "fa.csv").unwrap_err() {
            LoadError::Invalid { source, .. } => assert_eq!(
                source,
                LineupError::UnknownPosition {
                    player_id: "fa-1".into(),
                    value: "LB".into()
                }
            ),
            other => panic!("expected Invalid, got: {other}"),
        }
    }

    #[test]
    fn csv_negative_points_are_invalid() {
        let csv_data = "\
name,position,team,projected_points
Bad Data,WR,DAL,-1.5";

        let err = free_agents_from_reader(csv_data.as_bytes(), "fa.csv").unwrap_err();
        assert!(matches!(
            err,
            LoadError::Invalid {
                source: LineupError::InvalidPoints { .. },
                ..
            }
        ));
    }

    #[test]
    fn csv_duplicate_ids_are_invalid() {
        let csv_data = "\
name,position,team,projected_points,id
Jake Moody,K,SF,8.4,nfl.p.1
Jake Moody,K,SF,8.4,nfl.p.1";

        match free_agents_from_reader(csv_data.as_bytes(), "fa.csv").unwrap_err() {
            LoadError::Invalid { source, .. } => assert_eq!(
                source,
                LineupError::DuplicatePlayer {
                    player_id: "nfl.p.1".into()
                }
            ),
            other => panic!("expected Invalid, got: {other}"),
        }
    }

    #[test]
    fn csv_missing_required_column_is_csv_error() {
        let csv_data = "\
name,team
Nobody,DAL";

        assert!(matches!(
            free_agents_from_reader(csv_data.as_bytes(), "fa.csv"),
            Err(LoadError::Csv { .. })
        ));
    }

    #[test]
    fn snapshot_json_parses() {
        let json = r#"{"week": 2, "team_name": "T", "lineup": [{"slot": "QB", "player": null}]}"#;
        let snapshot = snapshot_from_reader(json.as_bytes()).unwrap();
        assert_eq!(snapshot.week, Some(2));
        assert_eq!(snapshot.lineup.len(), 1);
        assert!(snapshot.free_agents.is_empty());
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = load_free_agents(Path::new("/definitely/not/here.csv")).unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }
}
