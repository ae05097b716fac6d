//! Property tests for the game state machine: arbitrary command sequences,
//! legal or not, never break the bookkeeping.

use proptest::prelude::*;

use yahtzee_engine::core::{default_player_names, ROLLS_PER_TURN, TURNS_PER_PLAYER};
use yahtzee_engine::{
    Category, Command, DieSource, Game, GameBuilder, GameResult, GreedyPolicy, PlayerId,
};

/// One step of a generated script.
#[derive(Clone, Copy, Debug)]
enum Step {
    /// Index into `legal_commands()`, wrapped to its length.
    Legal(usize),
    /// Any command at all, usually illegal.
    Raw(Command),
}

fn raw_command(selector: u8) -> Command {
    let arg = usize::from(selector / 4);
    match selector % 4 {
        0 => Command::ToggleHold(arg % 8),
        1 => Command::Roll,
        2 => Command::StopRolling,
        _ => Command::CommitScore(Category::ALL[arg % Category::COUNT]),
    }
}

fn step_strategy() -> impl Strategy<Value = Step> {
    prop_oneof![
        3 => any::<usize>().prop_map(Step::Legal),
        1 => any::<u8>().prop_map(|s| Step::Raw(raw_command(s))),
    ]
}

fn seeded(seed: u64, players: usize) -> Game {
    GameBuilder::new()
        .players(default_player_names(players))
        .seed(seed)
        .build()
        .unwrap()
}

/// Panics with a description of the first broken invariant.
fn check_invariants<R: DieSource>(game: &Game<R>) {
    let dice = game.dice_state();
    assert!(dice.rolls_left <= ROLLS_PER_TURN);
    assert!(dice.dice.values().iter().all(|v| (1..=6).contains(v)));

    let mut all_done = true;
    for player in PlayerId::all(game.player_count()) {
        let card = game.scorecard(player).unwrap();
        let available = game.available_categories(player).unwrap();
        assert_eq!(available, card.unscored().collect::<Vec<_>>());

        let used = game.turns_used(player).unwrap();
        assert!(used <= TURNS_PER_PLAYER);
        assert_eq!(usize::from(used), card.scored_count());

        let totals = game.totals(player).unwrap();
        assert_eq!(totals.grand, totals.upper + totals.bonus + totals.lower);

        all_done &= used == TURNS_PER_PLAYER;
    }
    assert_eq!(game.is_game_over(), all_done);
    assert_eq!(game.winner().is_some(), all_done);
    if !all_done {
        assert!(game.turns_used(game.current_player()).unwrap() < TURNS_PER_PLAYER);
    }
}

proptest! {
    // A command is accepted exactly when it is listed as legal; rejected
    // commands leave the game untouched, and every step keeps the books.
    #[test]
    fn random_commands_keep_invariants(
        seed in any::<u64>(),
        players in 1..=3usize,
        steps in prop::collection::vec(step_strategy(), 1..400),
    ) {
        let mut game = seeded(seed, players);
        check_invariants(&game);

        for step in steps {
            let legal = game.legal_commands();
            let command = match step {
                Step::Legal(_) if legal.is_empty() => raw_command(1),
                Step::Legal(i) => legal[i % legal.len()],
                Step::Raw(command) => command,
            };

            let before = game.snapshot();
            let history = game.history().len();
            let consumed = game.state().rng().state();

            match game.apply(command) {
                Ok(_) => {
                    prop_assert!(
                        legal.contains(&command),
                        "{:?} accepted but not legal",
                        command
                    );
                    prop_assert_eq!(game.history().len(), history + 1);
                }
                Err(_) => {
                    prop_assert!(
                        !legal.contains(&command),
                        "{:?} legal but rejected",
                        command
                    );
                    prop_assert_eq!(game.snapshot(), before);
                    prop_assert_eq!(game.history().len(), history);
                    prop_assert_eq!(game.state().rng().state(), consumed);
                }
            }
            check_invariants(&game);
        }
    }

    // The greedy policy finishes any seeded game, whatever the seat count,
    // and the top grand totals win (a full tie is a draw with no winner).
    #[test]
    fn greedy_games_finish_with_full_cards(seed in any::<u64>(), players in 1..=4usize) {
        let mut game = seeded(seed, players);
        let policy = GreedyPolicy::default();

        while !game.is_game_over() {
            policy.play_turn(&mut game).unwrap();
            check_invariants(&game);
        }

        let result = game.winner().unwrap();
        let best = PlayerId::all(players)
            .map(|p| game.totals(p).unwrap().grand)
            .max()
            .unwrap();
        for player in PlayerId::all(players) {
            prop_assert!(game.scorecard(player).unwrap().is_complete());
            let grand = game.totals(player).unwrap().grand;
            let expected = grand == best && result != GameResult::Draw;
            prop_assert_eq!(result.is_winner(player), expected);
        }
    }
}
