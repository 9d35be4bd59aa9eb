//! Polyline path enemies walk along.

use glam::Vec2;
use math_defence_core::DEFAULT_ROUTE;

/// Ordered waypoints addressed through a continuous progress scalar.
///
/// The integer part of the progress scalar selects a segment and the
/// fractional part interpolates inside it.
#[derive(Clone, Debug, PartialEq)]
pub struct Path {
    waypoints: Vec<Vec2>,
}

impl Path {
    /// Creates a path from the provided waypoints.
    ///
    /// Returns `None` when fewer than two waypoints are supplied.
    #[must_use]
    pub fn from_waypoints(waypoints: Vec<Vec2>) -> Option<Self> {
        if waypoints.len() < 2 {
            return None;
        }
        Some(Self { waypoints })
    }

    /// Route used by the opening level.
    #[must_use]
    pub fn default_route() -> Self {
        Self {
            waypoints: DEFAULT_ROUTE.to_vec(),
        }
    }

    /// Waypoints in travel order.
    #[must_use]
    pub fn waypoints(&self) -> &[Vec2] {
        &self.waypoints
    }

    /// Number of segments joining consecutive waypoints.
    #[must_use]
    pub fn segment_count(&self) -> usize {
        self.waypoints.len() - 1
    }

    /// Progress scalar at which an enemy leaves the path.
    #[must_use]
    pub fn end_progress(&self) -> f32 {
        self.segment_count() as f32
    }

    /// Length of the segment containing `progress`.
    ///
    /// Progress at or beyond the end reports a unit length so callers never
    /// divide by zero.
    #[must_use]
    pub fn segment_length_at(&self, progress: f32) -> f32 {
        let index = segment_index(progress);
        match (self.waypoints.get(index), self.waypoints.get(index + 1)) {
            (Some(start), Some(end)) => start.distance(*end),
            _ => 1.0,
        }
    }

    /// Interpolated position for the provided progress scalar.
    ///
    /// Negative progress clamps to the first waypoint and progress on or past
    /// the final segment clamps to the last waypoint.
    #[must_use]
    pub fn position_at(&self, progress: f32) -> Vec2 {
        let index = segment_index(progress);
        if index >= self.segment_count() {
            return self.waypoints[self.waypoints.len() - 1];
        }
        let start = self.waypoints[index];
        let end = self.waypoints[index + 1];
        let fraction = (progress.max(0.0) - index as f32).clamp(0.0, 1.0);
        start.lerp(end, fraction)
    }
}

fn segment_index(progress: f32) -> usize {
    if progress.is_nan() || progress <= 0.0 {
        return 0;
    }
    progress.floor() as usize
}

#[cfg(test)]
mod tests {
    use super::*;
    use math_defence_core::PLAY_AREA_WIDTH;

    fn square() -> Path {
        Path::from_waypoints(vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(100.0, 0.0),
            Vec2::new(100.0, 50.0),
        ])
        .expect("valid path")
    }

    #[test]
    fn rejects_single_waypoint() {
        assert!(Path::from_waypoints(vec![Vec2::ZERO]).is_none());
        assert!(Path::from_waypoints(Vec::new()).is_none());
    }

    #[test]
    fn interpolates_inside_segments() {
        let path = square();
        assert_eq!(path.position_at(0.0), Vec2::new(0.0, 0.0));
        assert_eq!(path.position_at(0.25), Vec2::new(25.0, 0.0));
        assert_eq!(path.position_at(1.5), Vec2::new(100.0, 25.0));
    }

    #[test]
    fn clamps_progress_outside_the_path() {
        let path = square();
        assert_eq!(path.position_at(2.0), Vec2::new(100.0, 50.0));
        assert_eq!(path.position_at(17.3), Vec2::new(100.0, 50.0));
        assert_eq!(path.position_at(-3.0), Vec2::new(0.0, 0.0));
    }

    #[test]
    fn segment_lengths_follow_progress() {
        let path = square();
        assert_eq!(path.segment_count(), 2);
        assert_eq!(path.segment_length_at(0.9), 100.0);
        assert_eq!(path.segment_length_at(1.1), 50.0);
        assert_eq!(path.segment_length_at(2.0), 1.0);
    }

    #[test]
    fn default_route_spans_the_play_area() {
        let path = Path::default_route();
        let waypoints = path.waypoints();
        assert_eq!(waypoints.first().map(|point| point.x), Some(0.0));
        assert_eq!(waypoints.last().map(|point| point.x), Some(PLAY_AREA_WIDTH));
        assert_eq!(path.segment_count(), 5);
    }
}
