use std::time::{Duration, Instant};

use pairs::game::{
    CountdownPoll, Game, GameConfig, GameError, IntroAction, Resolution, Status, TapOutcome,
};
use rand::SeedableRng;
use rand::rngs::StdRng;

fn game_with(symbols: &[&str], seed: u64) -> (Game, StdRng) {
    let mut rng = StdRng::seed_from_u64(seed);
    let config = GameConfig {
        symbols: symbols.iter().map(|s| s.to_string()).collect(),
        ..GameConfig::default()
    };
    let game = Game::new(config, &mut rng).expect("valid config");
    (game, rng)
}

/// Plays every intro step at its scheduled time and returns the clock.
fn play_intro(game: &mut Game, rng: &mut StdRng, start: Instant) -> Instant {
    let generation = game.generation();
    let mut clock = start;
    for step in game.intro_script().steps().to_vec() {
        clock += step.delay;
        game.apply_intro(generation, step.action, clock, rng)
            .expect("intro step applies");
        if step.action == IntroAction::RevealAll {
            assert!(game.deck().cards().iter().all(|c| !c.face_down));
        }
    }
    clock
}

fn positions_of(game: &Game, symbol: &str) -> Vec<usize> {
    game.deck()
        .symbols()
        .iter()
        .enumerate()
        .filter(|(_, s)| s.as_str() == symbol)
        .map(|(index, _)| index)
        .collect()
}

fn play_pair(game: &mut Game, first: usize, second: usize) -> Resolution {
    assert!(matches!(game.tap(first), Ok(TapOutcome::Flipped(_))));
    assert!(matches!(game.tap(second), Ok(TapOutcome::PairSelected(_))));
    assert_eq!(game.status(), Status::Checking);
    game.resolve_pair(game.generation()).expect("pending pair")
}

#[test]
fn three_symbol_board_first_match() {
    let (mut game, mut rng) = game_with(&["A", "B", "C"], 5);
    assert_eq!(game.deck().len(), 6);

    let start = Instant::now();
    let opened_at = play_intro(&mut game, &mut rng, start);
    assert_eq!(opened_at - start, Duration::from_millis(8800));
    assert_eq!(game.status(), Status::Ready);
    assert_eq!(game.deadline(), Some(opened_at + Duration::from_secs(59)));

    let a = positions_of(&game, "A");
    let before = game.deck().clone();
    play_pair(&mut game, a[0], a[1]);

    assert_eq!(game.attempts(), 1);
    assert_eq!(game.status(), Status::Ready);
    for (index, card) in game.deck().cards().iter().enumerate() {
        if a.contains(&index) {
            assert!(card.matched && !card.face_down);
        } else {
            assert_eq!(card, before.get(index).unwrap());
        }
    }
}

#[test]
fn taps_ignored_while_intro_runs() {
    let (mut game, mut rng) = game_with(&["A", "B"], 9);
    let generation = game.generation();
    game.apply_intro(generation, IntroAction::RevealAll, Instant::now(), &mut rng)
        .unwrap();
    assert!(matches!(game.tap(0), Ok(TapOutcome::Ignored(_))));
    assert!(game.selection().is_empty());
}

#[test]
fn clearing_the_board_wins() {
    let (mut game, mut rng) = game_with(&["A", "B", "C"], 21);
    let opened_at = play_intro(&mut game, &mut rng, Instant::now());

    let a = positions_of(&game, "A");
    let b = positions_of(&game, "B");
    let c = positions_of(&game, "C");

    assert!(matches!(
        play_pair(&mut game, a[0], b[0]),
        Resolution::Mismatched { .. }
    ));
    play_pair(&mut game, a[0], a[1]);
    play_pair(&mut game, b[1], b[0]);
    let last = play_pair(&mut game, c[0], c[1]);

    assert!(matches!(last, Resolution::Matched { won: true, .. }));
    assert_eq!(game.status(), Status::Success);
    assert_eq!(game.attempts(), 4);
    assert!(game.deck().all_matched());

    // The expiry that would have fired at the same moment changes nothing.
    let generation = game.generation();
    assert_eq!(
        game.tick(generation, opened_at + Duration::from_secs(59)),
        Ok(CountdownPoll::Finished)
    );
    assert_eq!(game.time_expired(generation), Ok(false));
    assert_eq!(game.status(), Status::Success);
}

#[test]
fn running_out_of_time_fails() {
    let (mut game, mut rng) = game_with(&["A", "B", "C"], 2);
    let opened_at = play_intro(&mut game, &mut rng, Instant::now());
    let a = positions_of(&game, "A");
    play_pair(&mut game, a[0], a[1]);

    let generation = game.generation();
    assert!(matches!(
        game.tick(generation, opened_at + Duration::from_secs(30)),
        Ok(CountdownPoll::Running(_))
    ));
    assert_eq!(
        game.tick(generation, opened_at + Duration::from_secs(59)),
        Ok(CountdownPoll::Expired)
    );
    assert_eq!(game.status(), Status::Failed);
    assert!(matches!(game.tap(0), Ok(TapOutcome::Ignored(_))));
}

#[test]
fn restart_mid_intro_cancels_old_script() {
    let (mut game, mut rng) = game_with(&["A", "B", "C"], 13);
    let old = game.generation();
    let start = Instant::now();
    game.apply_intro(old, IntroAction::RevealAll, start, &mut rng)
        .unwrap();

    game.restart(&mut rng);
    let fresh = game.deck().clone();

    for action in [IntroAction::Shuffle, IntroAction::Finish] {
        let err = game
            .apply_intro(old, action, start, &mut rng)
            .unwrap_err();
        assert!(matches!(err, GameError::StaleCallback { .. }));
        assert!(err.is_stale());
    }
    assert_eq!(game.deck(), &fresh);
    assert_eq!(game.status(), Status::Init);

    play_intro(&mut game, &mut rng, start);
    assert_eq!(game.status(), Status::Ready);
}

#[test]
fn restart_from_every_status_resets() {
    for stop_at in [
        Status::Init,
        Status::Ready,
        Status::Checking,
        Status::Success,
        Status::Failed,
    ] {
        let (mut game, mut rng) = game_with(&["A", "B"], 31);
        if stop_at != Status::Init {
            let opened_at = play_intro(&mut game, &mut rng, Instant::now());
            let a = positions_of(&game, "A");
            match stop_at {
                Status::Checking => {
                    game.tap(a[0]).unwrap();
                    game.tap(a[1]).unwrap();
                }
                Status::Success => {
                    let b = positions_of(&game, "B");
                    play_pair(&mut game, a[0], a[1]);
                    play_pair(&mut game, b[0], b[1]);
                }
                Status::Failed => {
                    play_pair(&mut game, a[0], a[1]);
                    game.tick(game.generation(), opened_at + Duration::from_secs(60))
                        .unwrap();
                }
                _ => {}
            }
        }
        assert_eq!(game.status(), stop_at);

        game.restart(&mut rng);
        assert_eq!(game.status(), Status::Init);
        assert_eq!(game.attempts(), 0);
        assert!(game.selection().is_empty());
        assert_eq!(game.deck().len(), 4);
        assert!(
            game.deck()
                .cards()
                .iter()
                .all(|c| c.face_down && !c.matched)
        );
    }
}
