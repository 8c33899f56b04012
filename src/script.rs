use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::DEFAULT_PLAYER_ID;
use crate::direction::Direction;
use crate::player::{Player, PlayerError, Segment};

/// One scripted player operation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "lowercase")]
pub enum Step {
    /// Calls `segment_add` with whatever fields are present.
    Add {
        #[serde(default)]
        x: Option<f64>,
        #[serde(default)]
        y: Option<f64>,
        #[serde(default)]
        direction: Option<Direction>,
    },
    /// Rewrites the last segment's direction in place.
    Turn { direction: Direction },
    Kill,
}

/// A player setup plus the steps to replay against it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Script {
    #[serde(default)]
    pub player_id: Option<String>,
    #[serde(default)]
    pub start: Option<[f64; 2]>,
    #[serde(default)]
    pub steps: Vec<Step>,
}

#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("failed to read script: {0}")]
    Io(#[from] io::Error),
    #[error("malformed script: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("cannot create player: {0}")]
    Player(#[source] PlayerError),
    #[error("step {index}: {source}")]
    Step {
        index: usize,
        #[source]
        source: PlayerError,
    },
    #[error("step {index}: player has no segment to turn")]
    NoSegment { index: usize },
}

/// Serializable view of a player's state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerSnapshot {
    pub id: String,
    pub alive: bool,
    pub segments: Vec<Segment>,
}

impl From<&Player> for PlayerSnapshot {
    fn from(player: &Player) -> Self {
        Self {
            id: player.id().to_owned(),
            alive: player.is_alive(),
            segments: player.segments().to_vec(),
        }
    }
}

/// Reads and parses a script file.
pub fn load_script(path: &Path) -> Result<Script, ScriptError> {
    let raw = fs::read_to_string(path)?;
    Script::from_json(&raw)
}

impl Script {
    pub fn from_json(raw: &str) -> Result<Self, ScriptError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Builds the player and applies every step in order.
    ///
    /// Stops at the first failing step.
    pub fn run(&self) -> Result<Player, ScriptError> {
        let id = self.player_id.as_deref().unwrap_or(DEFAULT_PLAYER_ID);
        let (x, y) = match self.start {
            Some([x, y]) => (Some(x), Some(y)),
            None => (None, None),
        };
        let mut player = Player::new(Some(id), x, y).map_err(ScriptError::Player)?;

        for (index, step) in self.steps.iter().enumerate() {
            apply_step(&mut player, *step, index)?;
        }

        tracing::info!(
            player_id = player.id(),
            steps = self.steps.len(),
            segments = player.len(),
            alive = player.is_alive(),
            "script replayed"
        );
        Ok(player)
    }
}

fn apply_step(player: &mut Player, step: Step, index: usize) -> Result<(), ScriptError> {
    match step {
        Step::Add { x, y, direction } => player
            .segment_add(x, y, direction)
            .map_err(|source| ScriptError::Step { index, source }),
        Step::Turn { direction } => {
            let last = player
                .last_segment_mut()
                .ok_or(ScriptError::NoSegment { index })?;
            last.direction = Some(direction);
            Ok(())
        }
        Step::Kill => {
            player.kill();
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;

    use crate::direction::Direction;
    use crate::player::PlayerError;

    use super::{PlayerSnapshot, Script, ScriptError, Step, load_script};

    #[test]
    fn parses_tagged_steps() {
        let script = Script::from_json(
            r#"{
                "player_id": "p1",
                "start": [2, 3],
                "steps": [
                    {"op": "add", "x": 3, "y": 3, "direction": "east"},
                    {"op": "add"},
                    {"op": "turn", "direction": "north"},
                    {"op": "kill"}
                ]
            }"#,
        )
        .expect("script should parse");

        assert_eq!(script.player_id.as_deref(), Some("p1"));
        assert_eq!(script.start, Some([2.0, 3.0]));
        assert_eq!(
            script.steps,
            vec![
                Step::Add {
                    x: Some(3.0),
                    y: Some(3.0),
                    direction: Some(Direction::East),
                },
                Step::Add {
                    x: None,
                    y: None,
                    direction: None,
                },
                Step::Turn {
                    direction: Direction::North,
                },
                Step::Kill,
            ]
        );
    }

    #[test]
    fn accepts_capitalised_direction_names() {
        let script = Script::from_json(
            r#"{"start": [0, 0], "steps": [
                {"op": "add", "x": 0, "y": 1, "direction": "North"},
                {"op": "turn", "direction": "West"}
            ]}"#,
        )
        .expect("capitalised names should parse");

        let player = script.run().expect("script should replay");

        assert_eq!(
            player.last_segment().and_then(|segment| segment.direction),
            Some(Direction::West)
        );
        assert!(matches!(
            Script::from_json(r#"{"steps": [{"op": "turn", "direction": "Up"}]}"#),
            Err(ScriptError::Parse(_))
        ));
    }

    #[test]
    fn run_applies_steps_in_order() {
        let script = Script::from_json(
            r#"{"start": [1, 1], "steps": [
                {"op": "add", "x": 2, "y": 1, "direction": "east"},
                {"op": "turn", "direction": "south"},
                {"op": "add"},
                {"op": "kill"}
            ]}"#,
        )
        .expect("script should parse");

        let player = script.run().expect("script should replay");
        let snapshot = PlayerSnapshot::from(&player);

        assert_eq!(snapshot.id, crate::config::DEFAULT_PLAYER_ID);
        assert!(!snapshot.alive);
        assert_eq!(snapshot.segments.len(), 3);
        assert_eq!(snapshot.segments[2].direction, Some(Direction::South));
    }

    #[test]
    fn run_reports_failing_step_index() {
        let script = Script {
            player_id: Some("p".to_owned()),
            start: None,
            steps: vec![
                Step::Add {
                    x: Some(0.0),
                    y: Some(0.0),
                    direction: Some(Direction::West),
                },
                Step::Add {
                    x: Some(1.0),
                    y: Some(0.0),
                    direction: Some(Direction::East),
                },
            ],
        };

        let error = script.run().expect_err("reversal should fail");

        assert!(matches!(
            error,
            ScriptError::Step {
                index: 1,
                source: PlayerError::ReversedDirection
            }
        ));
    }

    #[test]
    fn turn_without_segments_fails() {
        let script = Script {
            steps: vec![Step::Turn {
                direction: Direction::North,
            }],
            ..Script::default()
        };

        assert!(matches!(
            script.run(),
            Err(ScriptError::NoSegment { index: 0 })
        ));
    }

    #[test]
    fn empty_player_id_fails() {
        let script = Script {
            player_id: Some(String::new()),
            ..Script::default()
        };

        assert!(matches!(
            script.run(),
            Err(ScriptError::Player(PlayerError::InvalidId))
        ));
    }

    #[test]
    fn load_script_reads_file() {
        let path = script_path("load");
        fs::write(&path, r#"{"start": [4, 4]}"#).expect("test file write should succeed");

        let loaded = load_script(&path);
        let _ = fs::remove_file(&path);

        assert_eq!(loaded.expect("load should succeed").start, Some([4.0, 4.0]));
    }

    #[test]
    fn missing_script_file_returns_io_error() {
        let path = script_path("missing");

        assert!(matches!(load_script(&path), Err(ScriptError::Io(_))));
    }

    #[test]
    fn malformed_script_returns_parse_error() {
        assert!(matches!(
            Script::from_json("not-json"),
            Err(ScriptError::Parse(_))
        ));
        assert!(matches!(
            Script::from_json(r#"{"steps": [{"op": "jump"}]}"#),
            Err(ScriptError::Parse(_))
        ));
    }

    fn script_path(label: &str) -> PathBuf {
        std::env::temp_dir().join(format!(
            "snake-player-script-{label}-{}.json",
            std::process::id()
        ))
    }
}
