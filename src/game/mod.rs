//! Matching game core: shuffled columns, the single active selection and the
//! click state machine. Nothing in here touches the DOM; the `ui` module feeds
//! [`ClickInput`]s in and applies the returned [`ClickOutcome`]s to the page.
//!
//! States: Idle -> Selecting -> (Matched | Mismatched) -> Idle ... -> Complete.
//! A word's partner is decided purely by membership in the fetched pair list;
//! the two columns are shuffled independently so row positions carry no meaning.

use rand::Rng;
use rand::seq::SliceRandom;

use crate::pairs::WordPair;

pub mod gate;
pub mod timer;

pub const CORRECT_MESSAGE: &str = "Correct! Keep going.";
pub const INCORRECT_MESSAGE: &str = "Incorrect match. Try again.";

// --- Identity ----------------------------------------------------------------

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    L1,
    L2,
}

impl Side {
    pub fn as_str(self) -> &'static str {
        match self {
            Side::L1 => "L1",
            Side::L2 => "L2",
        }
    }

    pub fn parse(s: &str) -> Option<Side> {
        match s {
            "L1" => Some(Side::L1),
            "L2" => Some(Side::L2),
            _ => None,
        }
    }
}

/// A button is addressed by column and row, so a word appearing twice in one
/// column still yields two distinct buttons.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ButtonId {
    pub side: Side,
    pub index: usize,
}

impl ButtonId {
    pub fn new(side: Side, index: usize) -> Self {
        Self { side, index }
    }

    /// DOM id, e.g. `L1-0`.
    pub fn dom_id(&self) -> String {
        format!("{}-{}", self.side.as_str(), self.index)
    }

    pub fn parse(id: &str) -> Option<ButtonId> {
        let (side, index) = id.split_once('-')?;
        Some(ButtonId { side: Side::parse(side)?, index: index.parse().ok()? })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ButtonState {
    #[default]
    Idle,
    Active,
    Matched,
}

/// The highlighted, not yet confirmed first pick of an attempt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActiveSelection {
    pub side: Side,
    pub word: String,
    pub element: ButtonId,
}

/// One click, as delivered by the UI layer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClickInput {
    pub side: Side,
    pub word: String,
    pub element: ButtonId,
}

impl ClickInput {
    pub fn new(side: Side, word: impl Into<String>, index: usize) -> Self {
        Self { side, word: word.into(), element: ButtonId::new(side, index) }
    }
}

// --- Outcomes ----------------------------------------------------------------

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tone {
    Success,
    Error,
}

impl Tone {
    pub fn color(self) -> &'static str {
        match self {
            Tone::Success => "green",
            Tone::Error => "red",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub tone: Tone,
}

impl StatusMessage {
    pub fn success(text: impl Into<String>) -> Self {
        Self { text: text.into(), tone: Tone::Success }
    }
    pub fn error(text: impl Into<String>) -> Self {
        Self { text: text.into(), tone: Tone::Error }
    }
}

/// Result of feeding one click into a [`GameSession`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ClickOutcome {
    /// First pick of an attempt.
    Selected { element: ButtonId },
    /// Same-side click replaced the active pick (`from` may equal `to`).
    Switched { from: ButtonId, to: ButtonId },
    Matched { first: ButtonId, second: ButtonId, correct: usize },
    /// The final pair was matched; the session is now complete.
    Completed { first: ButtonId, second: ButtonId },
    /// `first` drops its active flag, both stay enabled.
    Mismatched { first: ButtonId, second: ButtonId },
    /// Click on a matched button or after completion.
    Ignored,
}

impl ClickOutcome {
    /// Status line for this outcome. `Completed` returns `None` because its
    /// message needs the elapsed time; see [`completion_message`].
    pub fn status(&self) -> Option<StatusMessage> {
        match self {
            ClickOutcome::Matched { .. } => Some(StatusMessage::success(CORRECT_MESSAGE)),
            ClickOutcome::Mismatched { .. } => Some(StatusMessage::error(INCORRECT_MESSAGE)),
            _ => None,
        }
    }
}

pub fn completion_message(elapsed_secs: u64) -> StatusMessage {
    StatusMessage::success(format!("All pairs matched in {}.", timer::format_time(elapsed_secs)))
}

// --- Matching ----------------------------------------------------------------

/// True iff `{a, b}` equals some pair's `{L1, L2}`, in either orientation.
/// Exact, case-sensitive comparison.
pub fn is_match(pairs: &[WordPair], a: &str, b: &str) -> bool {
    pairs
        .iter()
        .any(|p| (p.l1 == a && p.l2 == b) || (p.l2 == a && p.l1 == b))
}

/// Fisher-Yates in place.
pub fn shuffle<T, R: Rng + ?Sized>(items: &mut [T], rng: &mut R) {
    items.shuffle(rng);
}

// --- Session -----------------------------------------------------------------

/// One game instance built from a fetched pair list.
#[derive(Clone, Debug)]
pub struct GameSession {
    pairs: Vec<WordPair>,
    l1_words: Vec<String>,
    l2_words: Vec<String>,
    l1_states: Vec<ButtonState>,
    l2_states: Vec<ButtonState>,
    correct: usize,
    active: Option<ActiveSelection>,
}

impl GameSession {
    pub fn new(pairs: Vec<WordPair>) -> Self {
        Self::with_rng(pairs, &mut rand::thread_rng())
    }

    pub fn with_rng<R: Rng + ?Sized>(pairs: Vec<WordPair>, rng: &mut R) -> Self {
        let mut l1_words: Vec<String> = pairs.iter().map(|p| p.l1.clone()).collect();
        let mut l2_words: Vec<String> = pairs.iter().map(|p| p.l2.clone()).collect();
        shuffle(&mut l1_words, rng);
        shuffle(&mut l2_words, rng);
        Self::from_columns(pairs, l1_words, l2_words)
    }

    /// Build a session with a fixed presentation order (no shuffling).
    pub fn from_columns(pairs: Vec<WordPair>, l1_words: Vec<String>, l2_words: Vec<String>) -> Self {
        let l1_states = vec![ButtonState::Idle; l1_words.len()];
        let l2_states = vec![ButtonState::Idle; l2_words.len()];
        Self { pairs, l1_words, l2_words, l1_states, l2_states, correct: 0, active: None }
    }

    pub fn pairs(&self) -> &[WordPair] {
        &self.pairs
    }

    pub fn column(&self, side: Side) -> &[String] {
        match side {
            Side::L1 => &self.l1_words,
            Side::L2 => &self.l2_words,
        }
    }

    pub fn total_pairs(&self) -> usize {
        self.pairs.len()
    }

    pub fn correct_matches(&self) -> usize {
        self.correct
    }

    pub fn is_complete(&self) -> bool {
        self.correct == self.pairs.len()
    }

    /// Whether finishing this session should trigger a fresh round. An empty
    /// board is complete from the start and never restarts.
    pub fn restarts_on_completion(&self, auto_refresh: bool) -> bool {
        auto_refresh && self.total_pairs() > 0
    }

    pub fn active(&self) -> Option<&ActiveSelection> {
        self.active.as_ref()
    }

    /// Unknown ids report `None`.
    pub fn button_state(&self, id: ButtonId) -> Option<ButtonState> {
        self.states(id.side).get(id.index).copied()
    }

    fn states(&self, side: Side) -> &[ButtonState] {
        match side {
            Side::L1 => &self.l1_states,
            Side::L2 => &self.l2_states,
        }
    }

    fn set_state(&mut self, id: ButtonId, state: ButtonState) {
        let states = match id.side {
            Side::L1 => &mut self.l1_states,
            Side::L2 => &mut self.l2_states,
        };
        if let Some(slot) = states.get_mut(id.index) {
            *slot = state;
        }
    }

    /// Advance the state machine by one click.
    pub fn handle_click(&mut self, input: ClickInput) -> ClickOutcome {
        if self.is_complete() {
            return ClickOutcome::Ignored;
        }
        match self.button_state(input.element) {
            None | Some(ButtonState::Matched) => return ClickOutcome::Ignored,
            Some(_) => {}
        }

        let Some(active) = self.active.take() else {
            let element = input.element;
            self.activate(input);
            return ClickOutcome::Selected { element };
        };

        if active.side == input.side {
            let (from, to) = (active.element, input.element);
            self.set_state(from, ButtonState::Idle);
            self.activate(input);
            return ClickOutcome::Switched { from, to };
        }

        let (first, second) = (active.element, input.element);
        if is_match(&self.pairs, &active.word, &input.word) {
            self.set_state(first, ButtonState::Matched);
            self.set_state(second, ButtonState::Matched);
            self.correct += 1;
            if self.is_complete() {
                ClickOutcome::Completed { first, second }
            } else {
                ClickOutcome::Matched { first, second, correct: self.correct }
            }
        } else {
            self.set_state(first, ButtonState::Idle);
            ClickOutcome::Mismatched { first, second }
        }
    }

    fn activate(&mut self, input: ClickInput) {
        self.set_state(input.element, ButtonState::Active);
        self.active = Some(ActiveSelection { side: input.side, word: input.word, element: input.element });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs() -> Vec<WordPair> {
        vec![
            WordPair::new("cat", "gato"),
            WordPair::new("dog", "perro"),
            WordPair::new("bird", "pajaro"),
        ]
    }

    // Unshuffled layout so row index == pair index.
    fn session() -> GameSession {
        let p = pairs();
        let l1 = p.iter().map(|p| p.l1.clone()).collect();
        let l2 = p.iter().map(|p| p.l2.clone()).collect();
        GameSession::from_columns(p, l1, l2)
    }

    fn click(s: &mut GameSession, side: Side, index: usize) -> ClickOutcome {
        let word = s.column(side)[index].clone();
        s.handle_click(ClickInput::new(side, word, index))
    }

    #[test]
    fn test_first_click_selects() {
        let mut s = session();
        let out = click(&mut s, Side::L2, 1);
        assert_eq!(out, ClickOutcome::Selected { element: ButtonId::new(Side::L2, 1) });
        assert_eq!(s.button_state(ButtonId::new(Side::L2, 1)), Some(ButtonState::Active));
        assert_eq!(s.active().map(|a| a.word.as_str()), Some("perro"));
    }

    #[test]
    fn test_same_side_click_switches_active() {
        let mut s = session();
        click(&mut s, Side::L1, 0);
        let out = click(&mut s, Side::L1, 2);
        assert_eq!(
            out,
            ClickOutcome::Switched { from: ButtonId::new(Side::L1, 0), to: ButtonId::new(Side::L1, 2) }
        );
        assert_eq!(s.button_state(ButtonId::new(Side::L1, 0)), Some(ButtonState::Idle));
        assert_eq!(s.button_state(ButtonId::new(Side::L1, 2)), Some(ButtonState::Active));
        assert_eq!(s.active().map(|a| a.word.as_str()), Some("bird"));
    }

    #[test]
    fn test_reclicking_active_keeps_it_active() {
        let mut s = session();
        click(&mut s, Side::L1, 0);
        let out = click(&mut s, Side::L1, 0);
        let id = ButtonId::new(Side::L1, 0);
        assert_eq!(out, ClickOutcome::Switched { from: id, to: id });
        assert_eq!(s.button_state(id), Some(ButtonState::Active));
    }

    #[test]
    fn test_mismatch_clears_only_active_flag() {
        let mut s = session();
        click(&mut s, Side::L1, 1);
        let out = click(&mut s, Side::L2, 2);
        assert!(matches!(out, ClickOutcome::Mismatched { .. }));
        assert_eq!(out.status(), Some(StatusMessage::error(INCORRECT_MESSAGE)));
        assert_eq!(s.button_state(ButtonId::new(Side::L1, 1)), Some(ButtonState::Idle));
        assert_eq!(s.button_state(ButtonId::new(Side::L2, 2)), Some(ButtonState::Idle));
        assert!(s.active().is_none());
        assert_eq!(s.correct_matches(), 0);
    }

    #[test]
    fn test_match_works_from_either_column_first() {
        let mut s = session();
        click(&mut s, Side::L2, 0);
        let out = click(&mut s, Side::L1, 0);
        assert_eq!(
            out,
            ClickOutcome::Matched {
                first: ButtonId::new(Side::L2, 0),
                second: ButtonId::new(Side::L1, 0),
                correct: 1
            }
        );
        assert_eq!(out.status(), Some(StatusMessage::success(CORRECT_MESSAGE)));
    }

    #[test]
    fn test_matched_buttons_are_ignored() {
        let mut s = session();
        click(&mut s, Side::L1, 0);
        click(&mut s, Side::L2, 0);
        assert_eq!(click(&mut s, Side::L1, 0), ClickOutcome::Ignored);
        assert!(s.active().is_none());
        assert_eq!(s.button_state(ButtonId::new(Side::L1, 0)), Some(ButtonState::Matched));
    }

    #[test]
    fn test_completion_is_terminal() {
        let mut s = session();
        for i in 0..3 {
            click(&mut s, Side::L1, i);
            let out = click(&mut s, Side::L2, i);
            if i == 2 {
                assert!(matches!(out, ClickOutcome::Completed { .. }));
                assert_eq!(out.status(), None);
            }
        }
        assert!(s.is_complete());
        assert_eq!(click(&mut s, Side::L1, 1), ClickOutcome::Ignored);
    }

    #[test]
    fn test_unknown_button_is_ignored() {
        let mut s = session();
        let out = s.handle_click(ClickInput::new(Side::L1, "cat", 99));
        assert_eq!(out, ClickOutcome::Ignored);
    }

    #[test]
    fn test_duplicate_words_are_distinct_buttons() {
        let p = vec![WordPair::new("bank", "banco"), WordPair::new("bank", "orilla")];
        let mut s = GameSession::from_columns(
            p,
            vec!["bank".into(), "bank".into()],
            vec!["banco".into(), "orilla".into()],
        );
        click(&mut s, Side::L1, 0);
        assert!(matches!(click(&mut s, Side::L2, 1), ClickOutcome::Matched { .. }));
        click(&mut s, Side::L1, 1);
        assert!(matches!(click(&mut s, Side::L2, 0), ClickOutcome::Completed { .. }));
    }

    #[test]
    fn test_matching_is_exact() {
        let p = pairs();
        assert!(is_match(&p, "cat", "gato"));
        assert!(is_match(&p, "gato", "cat"));
        assert!(!is_match(&p, "Cat", "gato"));
        assert!(!is_match(&p, "cat ", "gato"));
        assert!(!is_match(&p, "cat", "perro"));
    }

    #[test]
    fn test_button_ids_round_trip_through_dom() {
        let id = ButtonId::new(Side::L2, 12);
        assert_eq!(id.dom_id(), "L2-12");
        assert_eq!(ButtonId::parse("L2-12"), Some(id));
        assert_eq!(ButtonId::parse("L3-1"), None);
        assert_eq!(ButtonId::parse("L1"), None);
    }

    #[test]
    fn test_empty_session_never_restarts() {
        let empty = GameSession::from_columns(Vec::new(), Vec::new(), Vec::new());
        assert!(empty.is_complete());
        assert!(!empty.restarts_on_completion(true));
        assert!(session().restarts_on_completion(true));
        assert!(!session().restarts_on_completion(false));
    }

    #[test]
    fn test_completion_message_formats_time() {
        assert_eq!(completion_message(125).text, "All pairs matched in 2:05.");
    }
}
