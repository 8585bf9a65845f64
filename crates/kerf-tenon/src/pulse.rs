//! Pulse patterns along an edge.

/// Whether a pulse interval carries material or removes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PulseKind {
    /// Material present: the interval protrudes past the edge baseline.
    Finger,
    /// Material absent: the interval is recessed into the piece.
    Slot,
}

impl PulseKind {
    /// The complementary kind.
    pub fn flipped(self) -> Self {
        match self {
            PulseKind::Finger => PulseKind::Slot,
            PulseKind::Slot => PulseKind::Finger,
        }
    }
}

/// One finger or slot interval along an edge, in edge-length units.
///
/// A tenon's pulses partition `[0, edge_length)` without gaps or overlaps.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pulse {
    /// Distance from the edge's start vertex to the interval's start.
    pub start: f64,
    /// Length of the interval.
    pub width: f64,
    /// Finger or slot.
    pub kind: PulseKind,
}

impl Pulse {
    /// Create a pulse.
    pub fn new(start: f64, width: f64, kind: PulseKind) -> Self {
        Self { start, width, kind }
    }

    /// End coordinate of the interval.
    pub fn end(&self) -> f64 {
        self.start + self.width
    }

    /// The same interval with the complementary kind.
    pub fn flipped(self) -> Self {
        Self {
            kind: self.kind.flipped(),
            ..self
        }
    }

    /// The interval mirrored end-to-end along an edge of the given length.
    pub fn mirrored(self, edge_length: f64) -> Self {
        Self {
            start: edge_length - self.end(),
            ..self
        }
    }
}
