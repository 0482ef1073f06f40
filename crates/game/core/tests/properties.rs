//! Whole-match properties checked over long scripted runs.

use bout_core::{
    ActionType, MatchConfig, MatchEngine, MatchEnv, MatchId, MatchState, MatchStatus,
    PcgRng, RngOracle, new_match, submit_action,
};

const ROSTER: [ActionType; 6] = [
    ActionType::Jab,
    ActionType::Hook,
    ActionType::Uppercut,
    ActionType::Block,
    ActionType::Dodge,
    ActionType::Rest,
];

/// Plays a match to the end (or `max_ticks`) with a seeded action script.
/// Returns every state visited, the initial one included.
fn play(
    config: &MatchConfig,
    match_seed: u64,
    script_seed: u64,
    max_ticks: u64,
) -> Vec<MatchState> {
    let rng = PcgRng;
    let engine = MatchEngine::new(MatchEnv::new(config, &rng));
    let mut state = new_match(MatchId(1), 3, config, match_seed).expect("valid match");
    let mut history = vec![state.clone()];

    for i in 0..max_ticks {
        if state.is_over() {
            break;
        }
        // Roughly one tick in seven passes without input.
        let pick = rng.range(script_seed.wrapping_add(i), 0, 6) as usize;
        let pending = ROSTER
            .get(pick)
            .map(|action| submit_action(&state, action.name()).expect("known action"));
        let elapsed = 0.5 + f64::from(rng.range(script_seed ^ i, 0, 30)) / 10.0;

        state = engine
            .tick(&state, pending, elapsed)
            .expect("tick should succeed")
            .state;
        history.push(state.clone());
    }
    history
}

#[test]
fn health_and_stamina_stay_in_bounds() {
    let config = MatchConfig::default();
    for seed in 0..20 {
        for state in play(&config, seed, seed * 31 + 7, 2_000) {
            assert_eq!(state.check_invariants(), Ok(()), "seed {seed}");
            for fighter in [&state.primary, &state.opponent] {
                assert!(fighter.health <= fighter.max_health);
                assert!((0.0..=fighter.max_stamina).contains(&fighter.stamina));
            }
        }
    }
}

#[test]
fn knockdown_totals_never_decrease() {
    let config = MatchConfig::default();
    for seed in 0..20 {
        let history = play(&config, seed, seed + 1_000, 2_000);
        for pair in history.windows(2) {
            for (before, after) in [
                (&pair[0].primary, &pair[1].primary),
                (&pair[0].opponent, &pair[1].opponent),
            ] {
                assert!(after.total_knockdowns >= before.total_knockdowns);
            }
        }
    }
}

#[test]
fn status_only_follows_legal_edges() {
    let config = MatchConfig::default();
    for seed in 0..20 {
        let history = play(&config, seed, seed + 77, 2_000);
        for pair in history.windows(2) {
            let (from, to) = (pair[0].status, pair[1].status);
            let legal = matches!(
                (from, to),
                (MatchStatus::RoundActive, _)
                    | (MatchStatus::BetweenRounds, MatchStatus::BetweenRounds)
                    | (MatchStatus::BetweenRounds, MatchStatus::RoundActive)
                    | (MatchStatus::MatchOver, MatchStatus::MatchOver)
            );
            assert!(legal, "{from} -> {to}");
            if from == MatchStatus::BetweenRounds && to == MatchStatus::RoundActive {
                assert_eq!(pair[1].round_timer, config.round_duration);
            }
        }
    }
}

#[test]
fn round_timer_only_runs_while_standing() {
    let config = MatchConfig::default();
    for seed in 0..20 {
        let history = play(&config, seed, seed + 4_242, 2_000);
        for pair in history.windows(2) {
            let (before, after) = (&pair[0], &pair[1]);
            let same_round = after.status == MatchStatus::RoundActive
                && after.current_round == before.current_round;
            if before.status != MatchStatus::RoundActive || !same_round {
                continue;
            }
            if before.knockdown.is_down {
                assert_eq!(after.round_timer, before.round_timer, "clock runs during count");
            } else {
                assert!(after.round_timer < before.round_timer);
                assert!(after.round_timer >= 0.0);
            }
        }
    }
}

#[test]
fn finished_matches_stay_finished() {
    let config = MatchConfig::default();
    let rng = PcgRng;
    let engine = MatchEngine::new(MatchEnv::new(&config, &rng));

    let finished = (0..50)
        .map(|seed| play(&config, seed, seed, 5_000))
        .filter_map(|history| history.last().cloned())
        .find(MatchState::is_over)
        .expect("some scripted match should finish");

    let mut state = finished.clone();
    for _ in 0..10 {
        state = engine.tick(&state, None, 3.0).expect("tick").state;
    }
    assert_eq!(state, finished);
}

#[test]
fn identical_inputs_replay_identically() {
    let config = MatchConfig::default();
    for seed in [1, 2, 3, 0xdead_beef] {
        let a = play(&config, seed, seed, 500);
        let b = play(&config, seed, seed, 500);
        assert_eq!(a, b);

        let last_a = a.last().expect("history").digest().expect("digest");
        let last_b = b.last().expect("history").digest().expect("digest");
        assert_eq!(hex::encode(last_a), hex::encode(last_b));
    }
}

#[test]
fn match_seed_drives_the_rolls() {
    let mut config = MatchConfig::default();
    config.dodge_success_percent = 50;
    // Same script, different match seed: some dodge must roll differently.
    let a = play(&config, 1, 9, 300);
    let b = play(&config, 2, 9, 300);
    let logs = |h: &[MatchState]| h.iter().map(|s| s.event_log.clone()).collect::<Vec<_>>();
    assert_ne!(logs(&a), logs(&b));
}
