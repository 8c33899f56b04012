use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::direction::{Direction, direction_change_is_valid};

/// One unit of a player's body, in grid coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub x: f64,
    pub y: f64,
    pub direction: Option<Direction>,
}

/// Precondition failures for player construction and growth.
///
/// A failed call never changes the player.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Error)]
pub enum PlayerError {
    #[error("Parameter 'id' required of type string")]
    InvalidId,
    #[error("Valid X, Y required together")]
    CoordinatesRequiredTogether,
    #[error("First segment must provide x and y")]
    FirstSegmentRequiresPosition,
    #[error("Direction must not be reverse previous segment")]
    ReversedDirection,
}

/// A player: identity, alive flag, and ordered body segments (origin first).
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    id: String,
    is_alive: bool,
    segments: Vec<Segment>,
}

impl Player {
    /// Creates a live player, optionally placing a first segment at `x`, `y`.
    ///
    /// The initial position follows the same rules as [`Player::segment_add`],
    /// so supplying only one coordinate fails.
    pub fn new(id: Option<&str>, x: Option<f64>, y: Option<f64>) -> Result<Self, PlayerError> {
        let id = match id {
            Some(id) if !id.is_empty() => id.to_owned(),
            _ => return Err(PlayerError::InvalidId),
        };

        let mut player = Self {
            id,
            is_alive: true,
            segments: Vec::new(),
        };

        if x.is_some() || y.is_some() {
            player.segment_add(x, y, None)?;
        }

        Ok(player)
    }

    /// Creates a live player with no segments.
    pub fn with_id(id: &str) -> Result<Self, PlayerError> {
        Self::new(Some(id), None, None)
    }

    /// Appends one segment.
    ///
    /// With coordinates, the segment is placed there and takes `direction`,
    /// falling back to the previous segment's direction. Without coordinates,
    /// the last segment is extended in place: its position and direction are
    /// read now, so edits made to it since it was appended are inherited.
    pub fn segment_add(
        &mut self,
        x: Option<f64>,
        y: Option<f64>,
        direction: Option<Direction>,
    ) -> Result<(), PlayerError> {
        let position = match (x, y) {
            (None, None) => None,
            (Some(x), Some(y)) if x.is_finite() && y.is_finite() => Some((x, y)),
            _ => return self.reject(PlayerError::CoordinatesRequiredTogether),
        };

        let previous = self.segments.last().copied();
        let segment = match (position, previous) {
            (None, None) => return self.reject(PlayerError::FirstSegmentRequiresPosition),
            (None, Some(previous)) => Segment {
                direction: direction.or(previous.direction),
                ..previous
            },
            (Some((x, y)), previous) => Segment {
                x,
                y,
                direction: direction.or_else(|| previous.and_then(|segment| segment.direction)),
            },
        };

        let previous_direction = previous.and_then(|segment| segment.direction);
        if !direction_change_is_valid(previous_direction, segment.direction) {
            return self.reject(PlayerError::ReversedDirection);
        }

        tracing::trace!(
            player_id = %self.id,
            index = self.segments.len(),
            x = segment.x,
            y = segment.y,
            direction = segment.direction.map(tracing::field::display),
            "segment added"
        );
        self.segments.push(segment);
        Ok(())
    }

    fn reject(&self, error: PlayerError) -> Result<(), PlayerError> {
        tracing::debug!(player_id = %self.id, %error, "segment rejected");
        Err(error)
    }

    /// Marks the player dead. Calling it again has no effect.
    pub fn kill(&mut self) {
        if self.is_alive {
            tracing::debug!(player_id = %self.id, segments = self.segments.len(), "player killed");
        }
        self.is_alive = false;
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.is_alive
    }

    /// Segments from origin outward.
    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    #[must_use]
    pub fn last_segment(&self) -> Option<&Segment> {
        self.segments.last()
    }

    pub fn last_segment_mut(&mut self) -> Option<&mut Segment> {
        self.segments.last_mut()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}
