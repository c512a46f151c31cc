use crate::debug_log;
use crate::engine::{GameEngine, Outcome, RoundView};

/// Player intent, as translated from raw input by an interface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerAction {
    Guess(char),
    Hint,
    NewGame,
    Exit,
}

/// Contract between the game loop and a presentation surface.
///
/// Implementations render views and translate raw input into actions;
/// they never mutate game state themselves. `CliInterface` and
/// `TuiInterface` are the two implementations shipped with the binary.
pub trait GameInterface {
    /// Show the current round. Called after every applied action.
    fn display_round(&mut self, view: &RoundView);

    /// Read the next player action. `None` means the input was invalid
    /// or unmapped; the loop polls again.
    fn read_action(&mut self) -> Option<PlayerAction>;

    /// The round was just won. Called once per round, before the
    /// accompanying `display_round`.
    fn display_win(&mut self, view: &RoundView);

    /// The round was just lost; `view.revealed_word` carries the answer.
    fn display_loss(&mut self, view: &RoundView);

    /// A fresh round replaced the live one (also the opening round).
    fn display_new_round(&mut self, view: &RoundView);

    fn display_exit_message(&mut self);
}

/// Drives one engine against one interface until the player exits.
///
/// Guesses and hints into a finished round are engine no-ops, so the
/// loop keeps polling after a win or loss; the player starts a new
/// round or exits.
pub fn game_loop<I: GameInterface>(engine: &mut GameEngine, interface: &mut I) {
    interface.display_new_round(&engine.view());

    loop {
        let Some(action) = interface.read_action() else {
            continue;
        };
        debug_log!("player action: {:?}", action);

        match action {
            PlayerAction::Exit => {
                interface.display_exit_message();
                break;
            }
            PlayerAction::NewGame => {
                let view = engine.start_round();
                interface.display_new_round(&view);
            }
            PlayerAction::Guess(letter) => {
                let before = engine.view().outcome;
                let view = engine.submit_guess(letter);
                report(interface, before, &view);
            }
            PlayerAction::Hint => {
                let before = engine.view().outcome;
                let view = engine.request_hint();
                report(interface, before, &view);
            }
        }
    }
}

// Surface a terminal outcome exactly once, on the transition into it.
fn report<I: GameInterface>(interface: &mut I, before: Outcome, view: &RoundView) {
    match view.outcome {
        Outcome::Won if before == Outcome::InProgress => interface.display_win(view),
        Outcome::Lost if before == Outcome::InProgress => interface.display_loss(view),
        _ => {}
    }
    interface.display_round(view);
}
