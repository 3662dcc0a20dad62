//! Session data models
//!
//! Defines turns, the SOLVE rubric snapshot, and the conversation that owns them.

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Who spoke a turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Speaker {
    /// Coaching guidance shown to the trainee
    Coach,
    /// The simulated buyer played by the model
    Prospect,
    /// The trainee
    User,
}

/// A single message in a conversation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Turn {
    /// Who spoke
    pub speaker: Speaker,
    /// What was said
    pub text: String,
}

impl Turn {
    /// Create a new turn
    pub fn new(speaker: Speaker, text: impl Into<String>) -> Self {
        Self {
            speaker,
            text: text.into(),
        }
    }
}

/// One of the five SOLVE checkpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RubricStage {
    /// S: surface the prospect's pain
    SpotPain,
    /// O: describe the outcome they want
    OutlineOutcome,
    /// L: address the risk of changing
    LimitRisk,
    /// V: present the value package
    ValuePack,
    /// E: ask for a concrete next step
    ExecuteCallToAction,
}

impl RubricStage {
    /// All stages in rubric order
    pub const ALL: [RubricStage; 5] = [
        RubricStage::SpotPain,
        RubricStage::OutlineOutcome,
        RubricStage::LimitRisk,
        RubricStage::ValuePack,
        RubricStage::ExecuteCallToAction,
    ];

    /// Single-letter key used on the wire
    pub fn key(&self) -> &'static str {
        match self {
            RubricStage::SpotPain => "S",
            RubricStage::OutlineOutcome => "O",
            RubricStage::LimitRisk => "L",
            RubricStage::ValuePack => "V",
            RubricStage::ExecuteCallToAction => "E",
        }
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            RubricStage::SpotPain => "Spot pain",
            RubricStage::OutlineOutcome => "Outline outcome",
            RubricStage::LimitRisk => "Limit risk",
            RubricStage::ValuePack => "Value pack",
            RubricStage::ExecuteCallToAction => "Execute call-to-action",
        }
    }
}

/// Completion flags for the five rubric stages
///
/// Serializes with exactly the keys `S`, `O`, `L`, `V`, `E`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RubricState {
    #[serde(rename = "S", default)]
    spot_pain: bool,
    #[serde(rename = "O", default)]
    outline_outcome: bool,
    #[serde(rename = "L", default)]
    limit_risk: bool,
    #[serde(rename = "V", default)]
    value_pack: bool,
    #[serde(rename = "E", default)]
    execute_call_to_action: bool,
}

impl RubricState {
    /// A snapshot with every stage complete
    pub fn all_complete() -> Self {
        Self {
            spot_pain: true,
            outline_outcome: true,
            limit_risk: true,
            value_pack: true,
            execute_call_to_action: true,
        }
    }

    /// Whether a stage is complete
    pub fn get(&self, stage: RubricStage) -> bool {
        match stage {
            RubricStage::SpotPain => self.spot_pain,
            RubricStage::OutlineOutcome => self.outline_outcome,
            RubricStage::LimitRisk => self.limit_risk,
            RubricStage::ValuePack => self.value_pack,
            RubricStage::ExecuteCallToAction => self.execute_call_to_action,
        }
    }

    /// Set a stage's flag
    pub fn set(&mut self, stage: RubricStage, complete: bool) {
        let slot = match stage {
            RubricStage::SpotPain => &mut self.spot_pain,
            RubricStage::OutlineOutcome => &mut self.outline_outcome,
            RubricStage::LimitRisk => &mut self.limit_risk,
            RubricStage::ValuePack => &mut self.value_pack,
            RubricStage::ExecuteCallToAction => &mut self.execute_call_to_action,
        };
        *slot = complete;
    }

    /// Builder-style variant of [`RubricState::set`]
    pub fn with(mut self, stage: RubricStage, complete: bool) -> Self {
        self.set(stage, complete);
        self
    }

    /// Union of two snapshots: a stage is complete if either side has it
    pub fn merge(self, other: RubricState) -> Self {
        let mut merged = self;
        for stage in RubricStage::ALL {
            if other.get(stage) {
                merged.set(stage, true);
            }
        }
        merged
    }

    /// Number of completed stages
    pub fn completed_count(&self) -> usize {
        RubricStage::ALL.iter().filter(|s| self.get(**s)).count()
    }

    /// True when all five stages are complete
    pub fn is_complete(&self) -> bool {
        self.completed_count() == RubricStage::ALL.len()
    }
}

/// A practice session's conversation
///
/// The caller owns this value and threads it through the session operations;
/// nothing is stored server-side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conversation {
    /// Opaque session identifier
    pub id: String,
    /// Catalog id of the prospect persona
    pub persona: String,
    /// Catalog id of the industry
    pub industry: String,
    /// Turns, oldest first
    pub turns: Vec<Turn>,
    /// Rubric progress as of the latest model turn
    #[serde(default)]
    pub rubric: RubricState,
    /// Set once the closing turn has been produced
    #[serde(default)]
    pub finished: bool,
    /// When the conversation was created (Unix timestamp)
    pub created_at: i64,
    /// When the conversation was last updated (Unix timestamp)
    pub updated_at: i64,
}

impl Conversation {
    /// Create an empty conversation
    pub fn new(id: String, persona: String, industry: String) -> Self {
        let now = Utc::now().timestamp();
        Self {
            id,
            persona,
            industry,
            turns: Vec::new(),
            rubric: RubricState::default(),
            finished: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Append a turn
    pub fn push_turn(&mut self, turn: Turn) {
        self.updated_at = Utc::now().timestamp().max(self.updated_at);
        self.turns.push(turn);
    }

    /// Fold a model-reported rubric snapshot into the session.
    ///
    /// Stages never regress: once complete they stay complete.
    pub fn apply_rubric(&mut self, observed: RubricState) {
        self.rubric = self.rubric.merge(observed);
    }

    /// The most recent turn, if any
    pub fn last_turn(&self) -> Option<&Turn> {
        self.turns.last()
    }
}
