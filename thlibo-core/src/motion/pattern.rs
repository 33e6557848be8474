//! Coil phase pattern for the 28BYJ-48 loader stepper
//!
//! The half-step table drives a 4-wire unipolar stepper through one
//! electrical cycle. It is fixed, immutable and shared by all sequencing
//! operations; nothing in the firmware ever mutates it.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Number of phase vectors in one electrical cycle
pub const PHASE_COUNT: usize = 8;

/// Half-step energization table
///
/// Each entry energizes one or two adjacent coils and differs from its
/// neighbors by exactly one coil edge, so any walk through the table in
/// either direction is a valid phase overlap sequence. Order matches the
/// ULN2003 IN1..IN4 wiring.
pub const HALF_STEP: [[bool; 4]; PHASE_COUNT] = [
    [false, false, false, true],
    [false, false, true, true],
    [false, false, true, false],
    [false, true, true, false],
    [false, true, false, false],
    [true, true, false, false],
    [true, false, false, false],
    [true, false, false, true],
];

/// Steps per output-shaft revolution
///
/// One step is a full sweep of [`HALF_STEP`]. 509 is the empirically
/// calibrated value for this geared unit; the nameplate gear ratio gives
/// a slightly different number that drifts over a full turn.
pub const FULL_ROTATION: u32 = 509;

/// Rotation direction of the loader shaft
///
/// Forward advances the paddle wheel toward the crusher; backward is the
/// homing search direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Direction {
    /// Toward the crusher
    Forward,
    /// Away from the crusher
    Backward,
}

impl Direction {
    /// Get the opposite direction
    pub fn opposite(self) -> Self {
        match self {
            Direction::Forward => Direction::Backward,
            Direction::Backward => Direction::Forward,
        }
    }
}

/// Convert an angle in degrees to whole steps, truncating
pub fn steps_for_angle(degrees: u32) -> u32 {
    FULL_ROTATION * degrees / 360
}

/// Advance a phase index one entry through the table
pub(crate) fn next_phase(phase: u8, direction: Direction) -> u8 {
    match direction {
        Direction::Forward => (phase + 1) % PHASE_COUNT as u8,
        Direction::Backward => phase.checked_sub(1).unwrap_or(PHASE_COUNT as u8 - 1),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_rotation_step_count() {
        assert_eq!(steps_for_angle(360), FULL_ROTATION);
        // Truncation, not rounding
        assert_eq!(steps_for_angle(5), 7); // 509 * 5 / 360 = 7.06..
        assert_eq!(steps_for_angle(10), 14);
        assert_eq!(steps_for_angle(0), 0);
    }

    #[test]
    fn test_every_entry_energizes_one_or_two_adjacent_coils() {
        for entry in HALF_STEP {
            let count = entry.iter().filter(|&&b| b).count();
            assert!(count == 1 || count == 2, "invalid energization {:?}", entry);
        }
    }

    #[test]
    fn test_adjacent_entries_differ_by_one_edge() {
        for i in 0..PHASE_COUNT {
            let a = HALF_STEP[i];
            let b = HALF_STEP[(i + 1) % PHASE_COUNT];
            let diff = a.iter().zip(b.iter()).filter(|(x, y)| x != y).count();
            assert_eq!(diff, 1, "entries {} and {} differ by {}", i, i + 1, diff);
        }
    }

    #[test]
    fn test_phase_walk_wraps_both_ways() {
        let mut phase = 0u8;
        for _ in 0..PHASE_COUNT {
            phase = next_phase(phase, Direction::Forward);
        }
        assert_eq!(phase, 0);
        for _ in 0..PHASE_COUNT {
            phase = next_phase(phase, Direction::Backward);
        }
        assert_eq!(phase, 0);
    }

    #[test]
    fn test_direction_opposite() {
        assert_eq!(Direction::Forward.opposite(), Direction::Backward);
        assert_eq!(Direction::Backward.opposite(), Direction::Forward);
    }
}
