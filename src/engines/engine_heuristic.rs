//! One-ply heuristic move selector.
//!
//! Stone games score every empty cell with the Gomoku line heuristic for both
//! sides and keep the first best cell. Piece games score every legal step (and
//! every Banqi flip) and pick uniformly among the best. Nothing looks further
//! ahead than the move being scored.

use rand::prelude::IndexedRandom;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::trace;

use crate::engines::engine_config::HeuristicConfig;
use crate::engines::engine_trait::{Engine, EngineOutput};
use crate::game_errors::GameErrors;
use crate::game_state::game_state::GameState;
use crate::game_state::game_types::{GameMove, Piece, PieceKind, Position, Variant};
use crate::move_generation::legal_move_generator::{enumerate_moves, legal_flips};
use crate::rules::banqi_moves::captures_by_rank;
use crate::rules::gomoku_lines;
use crate::rules::legal_move_shared::ORTHOGONAL_STEPS;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredMove {
    pub game_move: GameMove,
    pub score: f64,
}

/// Material value of a captured Xiangqi or Chess piece.
#[inline]
pub fn capture_value(kind: PieceKind) -> i32 {
    match kind {
        PieceKind::Pawn | PieceKind::Soldier => 10,
        PieceKind::Advisor | PieceKind::Elephant => 20,
        PieceKind::Knight | PieceKind::Bishop => 30,
        PieceKind::Horse => 40,
        PieceKind::Cannon => 45,
        PieceKind::Rook => 50,
        PieceKind::Queen | PieceKind::Chariot => 90,
        PieceKind::King | PieceKind::General => 1000,
        PieceKind::Stone => 0,
    }
}

/// Pick the action for the side to move, or `None` when it has none.
pub fn select_ai_move<R: Rng + ?Sized>(
    state: &GameState,
    config: &HeuristicConfig,
    rng: &mut R,
) -> Option<ScoredMove> {
    if state.is_terminal() {
        return None;
    }
    if state.variant().is_placement() {
        select_placement(state, config, rng)
    } else {
        select_piece_move(state, config, rng)
    }
}

fn select_placement<R: Rng + ?Sized>(
    state: &GameState,
    config: &HeuristicConfig,
    rng: &mut R,
) -> Option<ScoredMove> {
    let board = &state.board;
    let empties: Vec<Position> = board
        .positions()
        .filter(|&pos| state.ruleset.is_legal_placement(pos, board))
        .collect();
    trace!(variant = %state.variant(), candidates = empties.len(), "scoring placements");

    if board.is_empty_board() {
        let at = *empties.choose(rng)?;
        return Some(ScoredMove {
            game_move: GameMove::Place { at },
            score: 0.0,
        });
    }

    let me = state.side_to_move;
    let them = state.opponent();
    let mut best: Option<ScoredMove> = None;
    for at in empties {
        let attack = f64::from(gomoku_lines::score(board, at, me));
        let defend = f64::from(gomoku_lines::score(board, at, them));
        let score = attack + config.defense_weight * defend;
        if best.is_none_or(|b| score > b.score) {
            best = Some(ScoredMove {
                game_move: GameMove::Place { at },
                score,
            });
        }
    }
    best
}

fn select_piece_move<R: Rng + ?Sized>(
    state: &GameState,
    config: &HeuristicConfig,
    rng: &mut R,
) -> Option<ScoredMove> {
    let board = &state.board;
    let me = state.side_to_move;
    let mut candidates: Vec<(GameMove, i32)> = Vec::new();

    if state.variant() == Variant::Banqi {
        let revealed_own = board.pieces_of(me).filter(|p| p.revealed).count();
        let flip_score = config.flip_base_score - revealed_own as i32;
        candidates.extend(
            legal_flips(state)
                .into_iter()
                .map(|at| (GameMove::Flip { at }, flip_score)),
        );
    }

    for piece in board.pieces_of(me) {
        for to in enumerate_moves(piece, board, state.ruleset) {
            let score = score_step(state, config, piece, to);
            candidates.push((
                GameMove::Step {
                    from: piece.position,
                    to,
                },
                score,
            ));
        }
    }
    trace!(variant = %state.variant(), %me, candidates = candidates.len(), "scoring piece moves");

    let top = candidates.iter().map(|&(_, score)| score).max()?;
    let best: Vec<GameMove> = candidates
        .into_iter()
        .filter(|&(_, score)| score == top)
        .map(|(game_move, _)| game_move)
        .collect();
    let game_move = *best.choose(rng)?;
    Some(ScoredMove {
        game_move,
        score: f64::from(top),
    })
}

fn score_step(state: &GameState, config: &HeuristicConfig, piece: &Piece, to: Position) -> i32 {
    let target = state.board.get(to);
    if state.variant() != Variant::Banqi {
        return config.move_base_score + target.map_or(0, |t| capture_value(t.kind));
    }

    let mover_rank = i32::from(piece.kind.banqi_rank());
    let mut score = target.map_or(config.move_base_score, |t| {
        i32::from(t.kind.banqi_rank()) * config.banqi_capture_multiplier
    });

    // Revealed enemies next to the landing cell that could take the mover back.
    let threats = ORTHOGONAL_STEPS
        .iter()
        .filter_map(|&(dx, dy)| to.offset(dx, dy))
        .filter_map(|n| state.board.get(n))
        .filter(|enemy| enemy.side != piece.side && enemy.revealed)
        .filter(|enemy| {
            enemy.kind.banqi_rank() >= piece.kind.banqi_rank()
                && captures_by_rank(enemy.kind, piece.kind)
        })
        .count();
    score -= threats as i32 * config.banqi_exposure_penalty * mover_rank;
    score
}

/// `Engine` wrapper around `select_ai_move` owning its configuration and
/// random source.
pub struct HeuristicEngine {
    config: HeuristicConfig,
    rng: StdRng,
}

impl HeuristicEngine {
    pub fn new(config: HeuristicConfig) -> Self {
        Self {
            config,
            rng: StdRng::from_os_rng(),
        }
    }

    pub fn with_seed(config: HeuristicConfig, seed: u64) -> Self {
        Self {
            config,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn config(&self) -> &HeuristicConfig {
        &self.config
    }
}

impl Default for HeuristicEngine {
    fn default() -> Self {
        Self::new(HeuristicConfig::default())
    }
}

impl Engine for HeuristicEngine {
    fn name(&self) -> &str {
        "PlumGames Heuristic"
    }

    fn set_option(&mut self, name: &str, value: &str) -> Result<(), GameErrors> {
        match name {
            "DefenseWeight" => {
                let weight: f64 = value.trim().parse().map_err(|_| {
                    GameErrors::InvalidOption(format!(
                        "DefenseWeight expects a number, got {value}"
                    ))
                })?;
                self.config.defense_weight = weight;
                Ok(())
            }
            "Seed" => {
                let seed: u64 = value.trim().parse().map_err(|_| {
                    GameErrors::InvalidOption(format!("Seed expects an integer, got {value}"))
                })?;
                self.rng = StdRng::seed_from_u64(seed);
                Ok(())
            }
            _ => Err(GameErrors::InvalidOption(format!("unknown option {name}"))),
        }
    }

    fn choose_move(&mut self, game_state: &GameState) -> Result<EngineOutput, GameErrors> {
        let mut out = EngineOutput::default();
        let Some(picked) = select_ai_move(game_state, &self.config, &mut self.rng) else {
            out.info_lines
                .push("info string heuristic_engine no_legal_moves".to_owned());
            return Ok(out);
        };

        out.info_lines.push(format!(
            "info string heuristic_engine {} score {}",
            picked.game_move, picked.score
        ));
        out.best_move = Some(picked.game_move);
        out.score = Some(picked.score);
        Ok(out)
    }
}
