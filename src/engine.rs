use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;

use crate::wordbank::WordBank;
use crate::{debug_log, info_log};

/// Wrong guesses allowed before a round is lost.
pub const MAX_MISTAKES: u8 = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    InProgress,
    Won,
    Lost,
}

impl Outcome {
    /// Won and Lost are terminal: the round accepts no further actions.
    pub fn is_terminal(self) -> bool {
        !matches!(self, Outcome::InProgress)
    }
}

/// Snapshot handed to the presentation layer after every operation.
/// `revealed_word` is populated exactly when the round is lost.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundView {
    pub category: String,
    pub masked_word: String,
    pub guessed_letters: Vec<char>,
    pub mistakes: u8,
    pub max_mistakes: u8,
    pub score: u32,
    pub outcome: Outcome,
    pub revealed_word: Option<String>,
}

#[derive(Debug, Clone)]
struct Round {
    category: String,
    word: String,
    guessed: Vec<char>,
    mistakes: u8,
    outcome: Outcome,
}

impl Round {
    fn new(category: String, word: String) -> Self {
        Self {
            category,
            word: word.to_uppercase(),
            guessed: Vec::new(),
            mistakes: 0,
            outcome: Outcome::InProgress,
        }
    }

    fn is_covered(&self) -> bool {
        self.word.chars().all(|c| self.guessed.contains(&c))
    }

    fn masked_word(&self) -> String {
        self.word
            .chars()
            .map(|c| {
                if self.guessed.contains(&c) {
                    c.to_string()
                } else {
                    "_".to_string()
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    // Word letters not yet guessed, deduplicated, in word order.
    fn unguessed_letters(&self) -> Vec<char> {
        let mut letters = Vec::new();
        for c in self.word.chars() {
            if !self.guessed.contains(&c) && !letters.contains(&c) {
                letters.push(c);
            }
        }
        letters
    }
}

/// The game state machine: owns the live round and the session score.
///
/// Presentation layers call `start_round`, `submit_guess` and
/// `request_hint` and render the returned `RoundView`; they never reach
/// into the state directly. Construction starts the first round.
pub struct GameEngine {
    bank: WordBank,
    rng: StdRng,
    round: Round,
    score: u32,
}

impl GameEngine {
    /// Returns `None` when the bank holds no words.
    pub fn new(bank: WordBank) -> Option<Self> {
        Self::with_rng(bank, StdRng::from_os_rng())
    }

    /// Seeded construction for reproducible rounds.
    pub fn with_seed(bank: WordBank, seed: u64) -> Option<Self> {
        Self::with_rng(bank, StdRng::seed_from_u64(seed))
    }

    fn with_rng(bank: WordBank, mut rng: StdRng) -> Option<Self> {
        let round = pick_round(&bank, &mut rng)?;
        info_log!(
            "first round: category='{}', {} letters",
            round.category,
            round.word.len()
        );
        Some(Self {
            bank,
            rng,
            round,
            score: 0,
        })
    }

    /// Replaces the live round with a fresh one: random category, random
    /// word within it. The session score carries over.
    pub fn start_round(&mut self) -> RoundView {
        // The bank is non-empty by construction, so the pick cannot fail.
        if let Some(round) = pick_round(&self.bank, &mut self.rng) {
            info_log!(
                "new round: category='{}', {} letters",
                round.category,
                round.word.len()
            );
            self.round = round;
        }
        self.view()
    }

    /// Submits one letter guess. Non-alphabetic input, guesses into a
    /// finished round and repeated letters are no-ops returning the
    /// current view unchanged.
    pub fn submit_guess(&mut self, letter: char) -> RoundView {
        if !letter.is_ascii_alphabetic() {
            debug_log!("rejecting non-alphabetic guess: {:?}", letter);
            return self.view();
        }
        let letter = letter.to_ascii_uppercase();
        if self.round.outcome.is_terminal() || self.round.guessed.contains(&letter) {
            return self.view();
        }
        self.apply_guess(letter);
        self.view()
    }

    /// Reveals one unguessed word letter at a cost of 5 points (floored
    /// at 0). The letter runs through the normal guess path, so a hint
    /// that completes the word wins the round before the deduction.
    /// No-op on a finished round or a fully revealed word.
    pub fn request_hint(&mut self) -> RoundView {
        if self.round.outcome.is_terminal() {
            return self.view();
        }
        let unguessed = self.round.unguessed_letters();
        let Some(&letter) = unguessed.choose(&mut self.rng) else {
            return self.view();
        };
        debug_log!("hint reveals: {}", letter);
        self.apply_guess(letter);
        self.score = self.score.saturating_sub(5);
        self.view()
    }

    /// Pure projection of the current round and score.
    pub fn view(&self) -> RoundView {
        let round = &self.round;
        RoundView {
            category: round.category.clone(),
            masked_word: round.masked_word(),
            guessed_letters: round.guessed.clone(),
            mistakes: round.mistakes,
            max_mistakes: MAX_MISTAKES,
            score: self.score,
            outcome: round.outcome,
            revealed_word: (round.outcome == Outcome::Lost).then(|| round.word.clone()),
        }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    // Caller has checked: round in progress, letter uppercase, not yet
    // guessed. A hit can only win, a miss can only lose.
    fn apply_guess(&mut self, letter: char) {
        self.round.guessed.push(letter);
        if self.round.word.contains(letter) {
            debug_log!("hit: {}", letter);
            if self.round.is_covered() {
                self.round.outcome = Outcome::Won;
                self.score += 10;
                info_log!("round won, score now {}", self.score);
            }
        } else {
            debug_log!("miss: {}", letter);
            self.round.mistakes += 1;
            if self.round.mistakes == MAX_MISTAKES {
                self.round.outcome = Outcome::Lost;
                info_log!("round lost, word was '{}'", self.round.word);
            }
        }
    }
}

fn pick_round(bank: &WordBank, rng: &mut StdRng) -> Option<Round> {
    let category = bank.categories().choose(rng)?;
    let word = category.words.choose(rng)?;
    Some(Round::new(category.name.clone(), word.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wordbank::load_wordbank_from_str;

    fn engine_with_word(word: &str) -> GameEngine {
        let bank = load_wordbank_from_str(&format!("Test: {word}"));
        GameEngine::with_seed(bank, 7).unwrap()
    }

    #[test]
    fn test_new_engine_starts_a_round() {
        let engine = engine_with_word("cat");
        let view = engine.view();
        assert_eq!(view.category, "Test");
        assert_eq!(view.masked_word, "_ _ _");
        assert_eq!(view.mistakes, 0);
        assert_eq!(view.max_mistakes, 6);
        assert_eq!(view.score, 0);
        assert_eq!(view.outcome, Outcome::InProgress);
        assert_eq!(view.revealed_word, None);
        assert!(view.guessed_letters.is_empty());
    }

    #[test]
    fn test_empty_bank_yields_no_engine() {
        let bank = load_wordbank_from_str("# nothing usable\nNumbers: 123 456");
        assert!(GameEngine::new(bank).is_none());
    }

    #[test]
    fn test_hit_reveals_positions_without_penalty() {
        let mut engine = engine_with_word("cat");
        let view = engine.submit_guess('c');
        assert_eq!(view.masked_word, "C _ _");
        assert_eq!(view.mistakes, 0);
        assert_eq!(view.guessed_letters, vec!['C']);
    }

    #[test]
    fn test_lowercase_and_uppercase_guesses_are_equivalent() {
        let mut engine = engine_with_word("cat");
        engine.submit_guess('c');
        let view = engine.submit_guess('C');
        // The second submission is a repeat, not a new guess
        assert_eq!(view.guessed_letters, vec!['C']);
        assert_eq!(view.mistakes, 0);
    }

    #[test]
    fn test_miss_increments_mistakes() {
        let mut engine = engine_with_word("cat");
        let view = engine.submit_guess('z');
        assert_eq!(view.mistakes, 1);
        assert_eq!(view.masked_word, "_ _ _");
        assert_eq!(view.outcome, Outcome::InProgress);
    }

    #[test]
    fn test_repeated_guess_is_a_noop() {
        let mut engine = engine_with_word("dog");
        let first = engine.submit_guess('z');
        let second = engine.submit_guess('z');
        assert_eq!(first, second);
        assert_eq!(second.mistakes, 1);
    }

    #[test]
    fn test_invalid_input_never_mutates_state() {
        let mut engine = engine_with_word("dog");
        let before = engine.view();
        for c in ['3', '?', ' ', 'é'] {
            assert_eq!(engine.submit_guess(c), before);
        }
    }

    #[test]
    fn test_win_on_third_unique_correct_guess_and_never_before() {
        let mut engine = engine_with_word("cat");
        assert_eq!(engine.submit_guess('c').outcome, Outcome::InProgress);
        assert_eq!(engine.submit_guess('a').outcome, Outcome::InProgress);
        let view = engine.submit_guess('t');
        assert_eq!(view.outcome, Outcome::Won);
        assert_eq!(view.masked_word, "C A T");
        assert_eq!(view.score, 10);
    }

    #[test]
    fn test_win_order_does_not_matter() {
        let mut engine = engine_with_word("cat");
        engine.submit_guess('t');
        engine.submit_guess('c');
        let view = engine.submit_guess('a');
        assert_eq!(view.outcome, Outcome::Won);
    }

    #[test]
    fn test_win_with_repeated_letters_in_word() {
        // BERRY has two Rs; one R guess must cover both positions
        let mut engine = engine_with_word("berry");
        engine.submit_guess('b');
        engine.submit_guess('e');
        engine.submit_guess('r');
        assert_eq!(engine.view().masked_word, "B E R R _");
        let view = engine.submit_guess('y');
        assert_eq!(view.outcome, Outcome::Won);
        assert_eq!(view.masked_word, "B E R R Y");
    }

    #[test]
    fn test_loss_after_six_misses_reveals_word() {
        let mut engine = engine_with_word("dog");
        for c in ['q', 'x', 'z', 'b', 'f'] {
            let view = engine.submit_guess(c);
            assert_eq!(view.outcome, Outcome::InProgress);
            assert_eq!(view.revealed_word, None);
        }
        let view = engine.submit_guess('j');
        assert_eq!(view.outcome, Outcome::Lost);
        assert_eq!(view.mistakes, 6);
        assert_eq!(view.revealed_word, Some("DOG".to_string()));
    }

    #[test]
    fn test_mistakes_never_exceed_max() {
        let mut engine = engine_with_word("dog");
        for c in 'a'..='z' {
            engine.submit_guess(c);
        }
        assert!(engine.view().mistakes <= MAX_MISTAKES);
        assert_eq!(engine.view().mistakes, MAX_MISTAKES);
    }

    #[test]
    fn test_terminal_round_ignores_guesses_and_hints() {
        let mut engine = engine_with_word("cat");
        for c in ['c', 'a', 't'] {
            engine.submit_guess(c);
        }
        let won = engine.view();
        assert_eq!(won.outcome, Outcome::Won);
        engine.submit_guess('z');
        engine.request_hint();
        assert_eq!(engine.view(), won);
    }

    #[test]
    fn test_lost_round_ignores_further_actions() {
        let mut engine = engine_with_word("dog");
        for c in ['q', 'x', 'z', 'b', 'f', 'j'] {
            engine.submit_guess(c);
        }
        let lost = engine.view();
        assert_eq!(lost.outcome, Outcome::Lost);
        engine.submit_guess('d');
        engine.request_hint();
        assert_eq!(engine.view(), lost);
    }

    #[test]
    fn test_hint_reveals_an_unguessed_word_letter() {
        let mut engine = engine_with_word("dog");
        let before = engine.view();
        let after = engine.request_hint();
        assert_eq!(after.guessed_letters.len(), 1);
        let revealed = after.guessed_letters[0];
        assert!("DOG".contains(revealed));
        assert!(!before.guessed_letters.contains(&revealed));
        assert_eq!(after.mistakes, 0);
    }

    #[test]
    fn test_hint_never_repeats_a_guessed_letter() {
        let mut engine = engine_with_word("mango");
        let mut seen = Vec::new();
        for _ in 0..5 {
            let before: Vec<char> = engine.view().guessed_letters;
            let after = engine.request_hint();
            let new = after
                .guessed_letters
                .iter()
                .copied()
                .find(|c| !before.contains(c))
                .unwrap();
            assert!(!seen.contains(&new));
            seen.push(new);
        }
        assert_eq!(engine.view().outcome, Outcome::Won);
    }

    #[test]
    fn test_winning_hint_nets_win_award_minus_hint_cost() {
        let mut engine = engine_with_word("cat");
        engine.submit_guess('c');
        engine.submit_guess('a');
        // Only T remains, so the hint completes the word: +10, then -5
        let view = engine.request_hint();
        assert_eq!(view.outcome, Outcome::Won);
        assert_eq!(view.score, 5);
    }

    #[test]
    fn test_hint_cost_is_floored_at_zero() {
        let mut engine = engine_with_word("mango");
        engine.request_hint();
        let view = engine.request_hint();
        assert_eq!(view.score, 0);
        assert_eq!(view.mistakes, 0);
    }

    #[test]
    fn test_plain_win_scores_ten() {
        let mut engine = engine_with_word("cat");
        engine.submit_guess('c');
        engine.submit_guess('a');
        let view = engine.submit_guess('t');
        assert_eq!(view.score, 10);
    }

    #[test]
    fn test_score_deducts_from_previous_winnings() {
        let mut engine = engine_with_word("cat");
        for c in ['c', 'a', 't'] {
            engine.submit_guess(c);
        }
        assert_eq!(engine.score(), 10);
        engine.start_round();
        let view = engine.request_hint();
        assert_eq!(view.score, 5);
    }

    #[test]
    fn test_score_survives_new_round_but_round_state_resets() {
        let mut engine = engine_with_word("cat");
        engine.submit_guess('z');
        for c in ['c', 'a', 't'] {
            engine.submit_guess(c);
        }
        assert_eq!(engine.view().outcome, Outcome::Won);
        let view = engine.start_round();
        assert_eq!(view.outcome, Outcome::InProgress);
        assert_eq!(view.mistakes, 0);
        assert!(view.guessed_letters.is_empty());
        assert_eq!(view.masked_word, "_ _ _");
        assert_eq!(view.score, 10);
    }

    #[test]
    fn test_masked_word_roundtrip_when_fully_guessed() {
        let mut engine = engine_with_word("peach");
        for c in ['p', 'e', 'a', 'c', 'h'] {
            engine.submit_guess(c);
        }
        let view = engine.view();
        assert_eq!(view.masked_word, "P E A C H");
        assert!(!view.masked_word.contains('_'));
    }

    #[test]
    fn test_seeded_engines_pick_identical_rounds() {
        let data = "Animals: cat dog bird fish\nColors: red blue green";
        let a = GameEngine::with_seed(load_wordbank_from_str(data), 99).unwrap();
        let b = GameEngine::with_seed(load_wordbank_from_str(data), 99).unwrap();
        assert_eq!(a.view(), b.view());
    }
}
