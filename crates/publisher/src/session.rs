//! VehicleSession - per-run mutable vehicle state

use motion::MotionModel;

/// Mutable state of one simulated vehicle
///
/// Created once per process run and owned exclusively by the agent task;
/// it is never persisted across restarts.
#[derive(Debug)]
pub struct VehicleSession {
    /// Logical index of the waypoint the vehicle currently sits on
    current_index: usize,
    /// Next sequence number to hand out
    sequence: u32,
    /// Per-session sampling state
    motion: MotionModel,
}

impl VehicleSession {
    /// Create a fresh session starting at index 0, sequence 0
    pub fn new(motion: MotionModel) -> Self {
        Self {
            current_index: 0,
            sequence: 0,
            motion,
        }
    }

    /// Current waypoint index
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// Move the vehicle to the given waypoint index
    pub fn advance_to(&mut self, index: usize) {
        self.current_index = index;
    }

    /// Sequence number the next report will carry
    pub fn sequence(&self) -> u32 {
        self.sequence
    }

    /// Consume and return the next sequence number
    ///
    /// Post-increment with wrap-around at `u32::MAX`. A number handed out
    /// here stays consumed even if the publish that carries it fails, so
    /// subscribers see a gap for every lost report.
    pub fn next_sequence(&mut self) -> u32 {
        let sequence = self.sequence;
        self.sequence = self.sequence.wrapping_add(1);
        sequence
    }

    /// Mutable access to the motion model
    pub fn motion(&mut self) -> &mut MotionModel {
        &mut self.motion
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_sequence_post_increments() {
        let mut session = VehicleSession::new(MotionModel::seeded(1));
        assert_eq!(session.next_sequence(), 0);
        assert_eq!(session.next_sequence(), 1);
        assert_eq!(session.sequence(), 2);
    }

    #[test]
    fn test_sequence_wraps_at_u32_max() {
        let mut session = VehicleSession::new(MotionModel::seeded(1));
        session.sequence = u32::MAX;
        assert_eq!(session.next_sequence(), u32::MAX);
        assert_eq!(session.next_sequence(), 0);
    }

    #[test]
    fn test_advance_to_moves_index() {
        let mut session = VehicleSession::new(MotionModel::seeded(1));
        assert_eq!(session.current_index(), 0);
        session.advance_to(2);
        assert_eq!(session.current_index(), 2);
    }
}
