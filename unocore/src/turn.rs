use crate::card::{Card, CardColor, PlayedCard};

/// Why a controller is being asked for a play.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DecisionContext {
    /// Nothing is owed; any legal card or group may be played.
    FreeTurn,
    /// Draw cards are owed; only an escalation avoids drawing them.
    Penalty,
    /// The single extra chance after drawing. `drawn` is the hand position of
    /// the freshly drawn card when only that card was drawn.
    FollowUp { drawn: Option<usize> },
}

/// What a controller wants to do at a decision point.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Decision {
    pub declare_uno: bool,
    /// Hand positions of the cards to play, or `None` to draw (or decline).
    pub cards: Option<Vec<usize>>,
}

impl Decision {
    pub fn play(cards: Vec<usize>) -> Self {
        Self {
            declare_uno: false,
            cards: Some(cards),
        }
    }

    pub fn pass() -> Self {
        Self::default()
    }

    pub fn with_declaration(mut self, declare_uno: bool) -> Self {
        self.declare_uno = declare_uno;
        self
    }
}

/// Where the engine stands before the next call to `play_turn`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    AwaitingDecision(u64),
    ResolvingPenalty(u64),
    ApplyingSkip(u64),
    GameOver(u64),
}

/// Something that happened during a turn, in order. The frontend renders
/// these instead of reading message fields off the game.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TurnEvent {
    UnoPenalty { player_id: u64, cards: usize },
    Skipped(u64),
    UnoDeclared(u64),
    Played { player_id: u64, cards: Vec<PlayedCard> },
    /// With two seats a reverse skips the opponent instead of turning.
    Reversed { as_skip: bool },
    PenaltyRaised { total: u32 },
    ColorChosen { player_id: u64, color: CardColor },
    DrewPenalty { player_id: u64, cards: usize },
    Drew { player_id: u64, card: Card },
    KeptDrawnCard(u64),
    DrewUnplayable(u64),
    ForgotUno(u64),
    SelectionRejected { player_id: u64, reason: String },
    TurnAborted { player_id: u64, reason: String },
    Won { player_id: u64, score: u32 },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlayTurnResult {
    pub events: Vec<TurnEvent>,
    pub won: bool,
}
