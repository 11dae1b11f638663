//! Head-to-head engine match harness for local testing.
//!
//! Runs two `Engine` implementations against each other on any variant, with
//! a seeded deal (Banqi) and an optional seeded random opening prefix.

use rand::{prelude::IndexedRandom, rngs::StdRng, Rng, SeedableRng};
use std::time::Instant;
use tracing::info;

use crate::engines::engine_trait::Engine;
use crate::game_errors::GameErrors;
use crate::game_state::game_state::GameState;
use crate::game_state::game_types::{Side, Variant};
use crate::move_generation::legal_move_apply::{apply_action, apply_ai_move};
use crate::move_generation::legal_move_generator::legal_actions;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchOutcome {
    Win(Side),
    DrawMaxPlies,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerId {
    Player1,
    Player2,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesOutcome {
    PlayerWin { player: PlayerId, side: Side },
    DrawMaxPlies,
}

#[derive(Debug, Clone)]
pub struct MatchConfig {
    pub max_plies: u16,
    pub opening_min_plies: u8,
    pub opening_max_plies: u8,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            max_plies: 400,
            opening_min_plies: 0,
            opening_max_plies: 2,
        }
    }
}

#[derive(Debug, Clone)]
pub struct MatchResult {
    pub outcome: MatchOutcome,
    pub final_state: GameState,
    pub opening_moves: Vec<String>,
    pub played_moves: Vec<String>,
    /// Indexed by seat: 0 is the variant's first mover.
    pub move_counts: [u32; 2],
    pub total_time_ns: [u128; 2],
}

#[derive(Debug, Clone)]
pub struct MatchSeriesConfig {
    pub variant: Variant,
    pub games: u16,
    pub base_seed: u64,
    pub per_game: MatchConfig,
    pub verbose: bool,
}

impl Default for MatchSeriesConfig {
    fn default() -> Self {
        Self {
            variant: Variant::Xiangqi,
            games: 9,
            base_seed: 0,
            per_game: MatchConfig::default(),
            verbose: false,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct MatchSeriesStats {
    pub games: u16,
    pub player1_wins: u16,
    pub player2_wins: u16,
    pub draws: u16,
    pub outcomes: Vec<SeriesOutcome>,
    pub player1_moves: u32,
    pub player2_moves: u32,
    pub player1_total_time_ns: u128,
    pub player2_total_time_ns: u128,
    pub player1_avg_move_time_ms: f64,
    pub player2_avg_move_time_ms: f64,
    pub overall_avg_move_time_ms: f64,
}

impl MatchSeriesStats {
    pub fn report(&self) -> String {
        format!(
            "games={} player1_wins={} player2_wins={} draws={} p1_avg_ms={:.3} p2_avg_ms={:.3} overall_avg_ms={:.3}",
            self.games,
            self.player1_wins,
            self.player2_wins,
            self.draws,
            self.player1_avg_move_time_ms,
            self.player2_avg_move_time_ms,
            self.overall_avg_move_time_ms
        )
    }
}

/// Play a single seeded engine-vs-engine match.
///
/// `engine_first` takes the variant's first seat (Red, White or Black for the
/// stone games), `engine_second` the other.
pub fn play_engine_match(
    variant: Variant,
    mut engine_first: Box<dyn Engine>,
    mut engine_second: Box<dyn Engine>,
    seed: u64,
    config: MatchConfig,
) -> Result<MatchResult, GameErrors> {
    let mut rng = StdRng::seed_from_u64(seed);
    let start = GameState::new_with_rng(variant, &mut rng);
    play_engine_match_from_state(
        start,
        engine_first.as_mut(),
        engine_second.as_mut(),
        &mut rng,
        config,
    )
}

/// Play from a caller-provided state, for curated positions.
pub fn play_engine_match_from_state<R: Rng + ?Sized>(
    start: GameState,
    engine_first: &mut dyn Engine,
    engine_second: &mut dyn Engine,
    rng: &mut R,
    config: MatchConfig,
) -> Result<MatchResult, GameErrors> {
    engine_first.new_game();
    engine_second.new_game();

    let first_side = start.variant().first_to_move();
    let (mut state, opening_moves) = apply_seeded_random_opening(
        &start,
        rng,
        config.opening_min_plies,
        config.opening_max_plies,
    )?;

    let mut played_moves = Vec::<String>::new();
    let mut move_counts = [0u32; 2];
    let mut total_time_ns = [0u128; 2];

    for _ in 0..config.max_plies {
        if let Some(winner) = state.winner {
            return Ok(MatchResult {
                outcome: MatchOutcome::Win(winner),
                final_state: state,
                opening_moves,
                played_moves,
                move_counts,
                total_time_ns,
            });
        }

        let seat = usize::from(state.side_to_move != first_side);
        let engine: &mut dyn Engine = if seat == 0 {
            &mut *engine_first
        } else {
            &mut *engine_second
        };

        let started = Instant::now();
        let next = apply_ai_move(&state, engine)?;
        let elapsed_ns = started.elapsed().as_nanos();

        move_counts[seat] = move_counts[seat].saturating_add(1);
        total_time_ns[seat] = total_time_ns[seat].saturating_add(elapsed_ns);
        if let Some(record) = next.history.get(state.history.len()) {
            played_moves.push(record.to_string());
        }
        state = next;
    }

    let outcome = match state.winner {
        Some(winner) => MatchOutcome::Win(winner),
        None => MatchOutcome::DrawMaxPlies,
    };
    Ok(MatchResult {
        outcome,
        final_state: state,
        opening_moves,
        played_moves,
        move_counts,
        total_time_ns,
    })
}

/// Play a series of matches and aggregate win/loss/draw statistics.
///
/// Seats are randomized each game (deterministic from `base_seed`).
pub fn play_engine_match_series<F1, F2>(
    player1_factory: F1,
    player2_factory: F2,
    config: MatchSeriesConfig,
) -> Result<MatchSeriesStats, GameErrors>
where
    F1: Fn() -> Box<dyn Engine>,
    F2: Fn() -> Box<dyn Engine>,
{
    let mut stats = MatchSeriesStats {
        games: config.games,
        ..MatchSeriesStats::default()
    };
    let mut seat_rng = StdRng::seed_from_u64(config.base_seed ^ 0xA5A5_5A5A_0123_4567);
    let [first_side, _] = config.variant.sides();

    for i in 0..config.games {
        let player1_first = seat_rng.random_bool(0.5);
        let seed = config.base_seed.wrapping_add(u64::from(i));
        if config.verbose {
            let (first, second) = if player1_first {
                ("Player1", "Player2")
            } else {
                ("Player2", "Player1")
            };
            info!(
                "[series] game {}/{} variant={} seed={} {}={} other={}",
                i + 1,
                config.games,
                config.variant,
                seed,
                first_side,
                first,
                second
            );
        }

        let result = if player1_first {
            play_engine_match(
                config.variant,
                player1_factory(),
                player2_factory(),
                seed,
                config.per_game.clone(),
            )?
        } else {
            play_engine_match(
                config.variant,
                player2_factory(),
                player1_factory(),
                seed,
                config.per_game.clone(),
            )?
        };

        let (p1_seat, p2_seat) = if player1_first { (0, 1) } else { (1, 0) };
        stats.player1_moves = stats.player1_moves.saturating_add(result.move_counts[p1_seat]);
        stats.player2_moves = stats.player2_moves.saturating_add(result.move_counts[p2_seat]);
        stats.player1_total_time_ns = stats
            .player1_total_time_ns
            .saturating_add(result.total_time_ns[p1_seat]);
        stats.player2_total_time_ns = stats
            .player2_total_time_ns
            .saturating_add(result.total_time_ns[p2_seat]);

        let mapped = match result.outcome {
            MatchOutcome::Win(side) => {
                let winner_is_first = side == first_side;
                if winner_is_first == player1_first {
                    stats.player1_wins += 1;
                    SeriesOutcome::PlayerWin {
                        player: PlayerId::Player1,
                        side,
                    }
                } else {
                    stats.player2_wins += 1;
                    SeriesOutcome::PlayerWin {
                        player: PlayerId::Player2,
                        side,
                    }
                }
            }
            MatchOutcome::DrawMaxPlies => {
                stats.draws += 1;
                SeriesOutcome::DrawMaxPlies
            }
        };
        stats.outcomes.push(mapped);

        if config.verbose {
            info!(
                "[series] game {}/{} result={:?} plies={} p1_wins={} p2_wins={} draws={}",
                i + 1,
                config.games,
                mapped,
                result.final_state.history.len(),
                stats.player1_wins,
                stats.player2_wins,
                stats.draws
            );
        }
    }

    stats.player1_avg_move_time_ms =
        avg_ns_per_move_ms(stats.player1_total_time_ns, stats.player1_moves);
    stats.player2_avg_move_time_ms =
        avg_ns_per_move_ms(stats.player2_total_time_ns, stats.player2_moves);

    let total_ns = stats
        .player1_total_time_ns
        .saturating_add(stats.player2_total_time_ns);
    let total_moves = stats.player1_moves.saturating_add(stats.player2_moves);
    stats.overall_avg_move_time_ms = avg_ns_per_move_ms(total_ns, total_moves);

    Ok(stats)
}

#[inline]
fn avg_ns_per_move_ms(total_ns: u128, moves: u32) -> f64 {
    if moves == 0 {
        0.0
    } else {
        (total_ns as f64) / (moves as f64) / 1_000_000.0
    }
}

fn apply_seeded_random_opening<R: Rng + ?Sized>(
    initial: &GameState,
    rng: &mut R,
    min_plies: u8,
    max_plies: u8,
) -> Result<(GameState, Vec<String>), GameErrors> {
    let mut state = initial.clone();
    let mut opening_moves = Vec::<String>::new();

    let low = min_plies.min(max_plies);
    let high = max_plies.max(min_plies);
    let target_plies = if low == high {
        low
    } else {
        rng.random_range(low..=high)
    };

    for _ in 0..target_plies {
        if state.is_terminal() {
            break;
        }
        let actions = legal_actions(&state);
        let Some(&chosen) = actions.choose(rng) else {
            break;
        };
        state = apply_action(&state, chosen)?;
        if let Some(record) = state.history.last() {
            opening_moves.push(record.to_string());
        }
    }

    Ok((state, opening_moves))
}
