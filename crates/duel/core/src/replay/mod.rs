//! Replay log: the ordered, append-only event stream a match produces.
//!
//! Every [`ReplayStep`] carries its log lines plus an HP/shield snapshot of
//! both sides taken when the step closes. Field names and line markers are an
//! external contract consumed by replay viewers.

mod digest;
pub mod messages;

use core::fmt;

/// One side of a match. Serialized as `1` / `2`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(into = "u8", try_from = "u8"))]
pub enum Side {
    P1,
    P2,
}

impl Side {
    pub const BOTH: [Side; 2] = [Side::P1, Side::P2];

    pub const fn index(self) -> usize {
        match self {
            Self::P1 => 0,
            Self::P2 => 1,
        }
    }

    pub const fn number(self) -> u8 {
        match self {
            Self::P1 => 1,
            Self::P2 => 2,
        }
    }

    pub const fn opponent(self) -> Self {
        match self {
            Self::P1 => Self::P2,
            Self::P2 => Self::P1,
        }
    }

    /// Log line prefix, trailing space included.
    pub const fn tag(self) -> &'static str {
        match self {
            Self::P1 => "[P1] ",
            Self::P2 => "[P2] ",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P{}", self.number())
    }
}

impl From<Side> for u8 {
    fn from(side: Side) -> Self {
        side.number()
    }
}

impl TryFrom<u8> for Side {
    type Error = InvalidSide;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::P1),
            2 => Ok(Self::P2),
            other => Err(InvalidSide(other)),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[error("side must be 1 or 2, got {0}")]
pub struct InvalidSide(pub u8);

/// What a step records.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Phase {
    Intro,
    TurnStart,
    Action,
    Victory,
}

impl Phase {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Intro => "intro",
            Self::TurnStart => "turn_start",
            Self::Action => "action",
            Self::Victory => "victory",
        }
    }
}

/// HP and shield of one side when a step closes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Snapshot {
    /// Clamped to `[0, maxHP]`.
    pub hp: u32,
    pub shield: u32,
}

/// One ordered unit of the replay.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReplayStep {
    pub phase: Phase,
    pub actor: Side,
    pub logs: Vec<String>,
    #[cfg_attr(feature = "serde", serde(rename = "p1HP"))]
    pub p1_hp: u32,
    #[cfg_attr(feature = "serde", serde(rename = "p2HP"))]
    pub p2_hp: u32,
    #[cfg_attr(
        feature = "serde",
        serde(rename = "p1Shield", default, skip_serializing_if = "Option::is_none")
    )]
    pub p1_shield: Option<u32>,
    #[cfg_attr(
        feature = "serde",
        serde(rename = "p2Shield", default, skip_serializing_if = "Option::is_none")
    )]
    pub p2_shield: Option<u32>,
}

impl ReplayStep {
    /// Builds a step, dropping zero shields from the snapshot.
    pub fn new(phase: Phase, actor: Side, logs: Vec<String>, snapshots: [Snapshot; 2]) -> Self {
        let [p1, p2] = snapshots;
        Self {
            phase,
            actor,
            logs,
            p1_hp: p1.hp,
            p2_hp: p2.hp,
            p1_shield: (p1.shield > 0).then_some(p1.shield),
            p2_shield: (p2.shield > 0).then_some(p2.shield),
        }
    }

    pub fn hp(&self, side: Side) -> u32 {
        match side {
            Side::P1 => self.p1_hp,
            Side::P2 => self.p2_hp,
        }
    }

    pub fn shield(&self, side: Side) -> Option<u32> {
        match side {
            Side::P1 => self.p1_shield,
            Side::P2 => self.p2_shield,
        }
    }
}

/// Append-only sequence of replay steps.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ReplayLog {
    steps: Vec<ReplayStep>,
}

impl ReplayLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, step: ReplayStep) {
        self.steps.push(step);
    }

    pub fn steps(&self) -> &[ReplayStep] {
        &self.steps
    }

    pub fn into_steps(self) -> Vec<ReplayStep> {
        self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Every log line in order, as a viewer would print them.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.steps
            .iter()
            .flat_map(|step| step.logs.iter().map(String::as_str))
    }

    /// SHA-256 over the canonical step encoding.
    pub fn digest(&self) -> [u8; 32] {
        digest::digest_steps(&self.steps)
    }
}

impl From<Vec<ReplayStep>> for ReplayLog {
    fn from(steps: Vec<ReplayStep>) -> Self {
        Self { steps }
    }
}
