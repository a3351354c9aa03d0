//! State transitions of a [`Game`].
//!
//! These are the only functions that write a game's participants, status,
//! winner, turn and moves. They are synchronous and perform no I/O; callers
//! persist the result and must serialize concurrent transitions on one game.

use tracing::debug;

use crate::models::game::{Game, GameStatus, Move, Position, Side, Winner};
use crate::services::errors::game_service_errors::GameServiceError;
use crate::services::grid::{Grid, Outcome};

/// Binds the creator of a freshly created, empty game to `side`.
pub fn assign_creator(
    game: &mut Game,
    participant: &str,
    side: Side,
) -> Result<(), GameServiceError> {
    if game.player_one().is_some()
        || game.player_two().is_some()
        || game.status() != GameStatus::NotStarted
    {
        return Err(GameServiceError::InvariantViolation(
            "creator can only be assigned to a new, empty game".to_string(),
        ));
    }

    game.bind(side, participant);
    debug!("Assigned creator {} to {:?} in game {}", participant, side, game.id());
    Ok(())
}

/// Binds `participant` to the open side and starts the game.
pub fn join(game: &mut Game, participant: &str) -> Result<Side, GameServiceError> {
    if game.status() == GameStatus::Finished {
        return Err(GameServiceError::AlreadyFinished);
    }
    if game.is_participant(participant) {
        return Err(GameServiceError::AlreadyJoined);
    }
    if game.is_full() {
        return Err(GameServiceError::GameFull);
    }

    let side = if game.player_one().is_none() {
        Side::PlayerOne
    } else {
        Side::PlayerTwo
    };
    game.bind(side, participant);
    game.advance_status(GameStatus::InProgress);
    Ok(side)
}

/// Records a move for `participant` at `(row, column)` and settles the outcome.
pub fn play(
    game: &mut Game,
    participant: &str,
    row: u8,
    column: u8,
) -> Result<Move, GameServiceError> {
    let acting_side = game
        .side_of(participant)
        .ok_or(GameServiceError::NotAParticipant)?;

    match game.status() {
        GameStatus::Finished => return Err(GameServiceError::GameFinished),
        GameStatus::NotStarted => return Err(GameServiceError::GameNotStarted),
        GameStatus::InProgress => {}
    }

    let turn = resolve_turn(game)?;
    if turn != acting_side {
        return Err(GameServiceError::NotYourTurn);
    }

    let position = Position::new(row, column).ok_or(GameServiceError::InvalidMove)?;
    if game.has_move_at(row, column) {
        return Err(GameServiceError::InvalidMove);
    }

    let game_move = Move::new(game.id(), participant, position, turn.mark());
    game.push_move(game_move.clone());
    recompute_outcome(game)?;

    Ok(game_move)
}

/// Clears every slot bound to `participant`. The game record and its moves stay.
///
/// A participant with moves in this game keeps its slot; moves must reference a
/// bound participant.
pub fn release_participant(
    game: &mut Game,
    participant: &str,
) -> Result<bool, GameServiceError> {
    if game.moves_by(participant).next().is_some() {
        return Err(GameServiceError::ParticipantHasMoves);
    }
    let mut released = false;
    for side in [Side::PlayerOne, Side::PlayerTwo] {
        if game.participant(side) == Some(participant) {
            game.unbind(side);
            released = true;
        }
    }
    Ok(released)
}

/// Side to move. Before the first move the turn defaults to player one.
fn resolve_turn(game: &mut Game) -> Result<Side, GameServiceError> {
    if let Some(side) = game.next_turn() {
        return Ok(side);
    }
    if game.player_one().is_none() {
        return Err(GameServiceError::InvariantViolation(
            "turn requested before player one was assigned".to_string(),
        ));
    }
    game.set_next_turn(Some(Side::PlayerOne));
    Ok(Side::PlayerOne)
}

fn recompute_outcome(game: &mut Game) -> Result<(), GameServiceError> {
    match Grid::from_moves(game.moves()).outcome() {
        Outcome::NoWinnerYet => {
            let next = game.next_turn().map(Side::other).unwrap_or(Side::PlayerTwo);
            game.set_next_turn(Some(next));
        }
        Outcome::Draw => game.finish(Winner::Draw),
        Outcome::Winner(mark) => {
            let side = Side::for_mark(mark);
            let winner = game
                .participant(side)
                .map(str::to_string)
                .ok_or_else(|| {
                    GameServiceError::InvariantViolation(format!(
                        "winning mark {:?} belongs to unbound side {:?}",
                        mark, side
                    ))
                })?;
            game.finish(Winner::Player(winner));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::game::Mark;
    use proptest::prelude::*;

    /// alice is player one (noughts), bob is player two (crosses).
    fn started_game() -> Game {
        let mut game = Game::new();
        assign_creator(&mut game, "alice", Side::PlayerOne).unwrap();
        join(&mut game, "bob").unwrap();
        game
    }

    fn play_all(game: &mut Game, moves: &[(&str, u8, u8)]) {
        for (player, row, column) in moves {
            play(game, player, *row, *column).unwrap();
        }
    }

    #[test]
    fn test_assign_creator_binds_requested_side() {
        let mut game = Game::new();
        assign_creator(&mut game, "alice", Side::PlayerTwo).unwrap();

        assert_eq!(game.player_one(), None);
        assert_eq!(game.player_two(), Some("alice"));
        assert_eq!(game.status(), GameStatus::NotStarted);
    }

    #[test]
    fn test_assign_creator_twice_is_an_invariant_violation() {
        let mut game = Game::new();
        assign_creator(&mut game, "alice", Side::PlayerOne).unwrap();

        let result = assign_creator(&mut game, "bob", Side::PlayerTwo);
        assert!(matches!(result, Err(GameServiceError::InvariantViolation(_))));
    }

    #[test]
    fn test_join_fills_open_side_and_starts_game() {
        let mut game = Game::new();
        assign_creator(&mut game, "alice", Side::PlayerTwo).unwrap();

        let side = join(&mut game, "bob").unwrap();

        assert_eq!(side, Side::PlayerOne);
        assert_eq!(game.player_one(), Some("bob"));
        assert_eq!(game.status(), GameStatus::InProgress);
        assert!(game.is_full());
    }

    #[test]
    fn test_join_rejections() {
        let mut game = started_game();

        assert!(matches!(
            join(&mut game, "alice"),
            Err(GameServiceError::AlreadyJoined)
        ));
        assert!(matches!(
            join(&mut game, "bob"),
            Err(GameServiceError::AlreadyJoined)
        ));
        assert!(matches!(
            join(&mut game, "carol"),
            Err(GameServiceError::GameFull)
        ));
        assert!(!game.is_participant("carol"));
    }

    #[test]
    fn test_join_finished_game_is_checked_first() {
        let mut game = started_game();
        play_all(
            &mut game,
            &[("alice", 0, 0), ("bob", 1, 0), ("alice", 0, 1), ("bob", 1, 1), ("alice", 0, 2)],
        );

        assert!(matches!(
            join(&mut game, "alice"),
            Err(GameServiceError::AlreadyFinished)
        ));
        assert!(matches!(
            join(&mut game, "carol"),
            Err(GameServiceError::AlreadyFinished)
        ));
    }

    #[test]
    fn test_first_move_defaults_turn_to_player_one() {
        let mut game = started_game();
        assert_eq!(game.next_turn(), None);

        let game_move = play(&mut game, "alice", 0, 0).unwrap();

        assert_eq!(game_move.mark, Mark::Nought);
        assert_eq!(game_move.player_id, "alice");
        assert_eq!(game.next_turn(), Some(Side::PlayerTwo));
        assert_eq!(game.next_player(), Some("bob"));
    }

    #[test]
    fn test_move_out_of_turn() {
        let mut game = started_game();
        play(&mut game, "alice", 0, 0).unwrap();

        assert!(matches!(
            play(&mut game, "alice", 1, 1),
            Err(GameServiceError::NotYourTurn)
        ));
        assert_eq!(game.moves().len(), 1);
    }

    #[test]
    fn test_player_two_cannot_open_the_game() {
        let mut game = started_game();
        assert!(matches!(
            play(&mut game, "bob", 0, 0),
            Err(GameServiceError::NotYourTurn)
        ));
    }

    #[test]
    fn test_move_rejection_order() {
        let mut game = Game::new();
        assign_creator(&mut game, "alice", Side::PlayerOne).unwrap();

        assert!(matches!(
            play(&mut game, "carol", 0, 0),
            Err(GameServiceError::NotAParticipant)
        ));
        assert!(matches!(
            play(&mut game, "alice", 0, 0),
            Err(GameServiceError::GameNotStarted)
        ));

        join(&mut game, "bob").unwrap();
        // turn is checked before the coordinates
        assert!(matches!(
            play(&mut game, "bob", 9, 9),
            Err(GameServiceError::NotYourTurn)
        ));
    }

    #[test]
    fn test_occupied_and_out_of_range_cells() {
        let mut game = started_game();
        play(&mut game, "alice", 1, 1).unwrap();

        assert!(matches!(
            play(&mut game, "bob", 1, 1),
            Err(GameServiceError::InvalidMove)
        ));
        assert!(matches!(
            play(&mut game, "bob", 3, 0),
            Err(GameServiceError::InvalidMove)
        ));
        assert_eq!(game.next_turn(), Some(Side::PlayerTwo));
    }

    #[test]
    fn test_row_win() {
        let mut game = started_game();
        play_all(
            &mut game,
            &[("alice", 0, 0), ("bob", 1, 0), ("alice", 0, 1), ("bob", 1, 1), ("alice", 0, 2)],
        );

        assert_eq!(game.status(), GameStatus::Finished);
        assert_eq!(game.winner_id(), Some("alice"));
        assert_eq!(game.next_turn(), None);
    }

    #[test]
    fn test_column_win_for_player_two() {
        let mut game = started_game();
        play_all(
            &mut game,
            &[
                ("alice", 0, 0),
                ("bob", 0, 2),
                ("alice", 1, 0),
                ("bob", 1, 2),
                ("alice", 2, 1),
                ("bob", 2, 2),
            ],
        );

        assert_eq!(game.status(), GameStatus::Finished);
        assert_eq!(game.winner(), Some(&Winner::Player("bob".to_string())));
    }

    #[test]
    fn test_draw() {
        let mut game = started_game();
        // o x o
        // o x x
        // x o o
        play_all(
            &mut game,
            &[
                ("alice", 0, 0),
                ("bob", 0, 1),
                ("alice", 0, 2),
                ("bob", 1, 1),
                ("alice", 1, 0),
                ("bob", 2, 0),
                ("alice", 2, 1),
                ("bob", 1, 2),
                ("alice", 2, 2),
            ],
        );

        assert_eq!(game.status(), GameStatus::Finished);
        assert_eq!(game.winner(), Some(&Winner::Draw));
        assert_eq!(game.winner_id(), None);
        assert_eq!(game.next_turn(), None);
    }

    #[test]
    fn test_finished_game_rejects_moves_and_stays_settled() {
        let mut game = started_game();
        play_all(
            &mut game,
            &[("alice", 0, 0), ("bob", 1, 0), ("alice", 0, 1), ("bob", 1, 1), ("alice", 0, 2)],
        );
        let winner = game.winner().cloned();

        for (player, row, column) in [("bob", 2, 2), ("alice", 2, 0), ("carol", 2, 1)] {
            let result = play(&mut game, player, row, column);
            if player == "carol" {
                assert!(matches!(result, Err(GameServiceError::NotAParticipant)));
            } else {
                assert!(matches!(result, Err(GameServiceError::GameFinished)));
            }
        }

        assert_eq!(game.winner().cloned(), winner);
        assert_eq!(game.next_turn(), None);
        assert_eq!(game.moves().len(), 5);
    }

    #[test]
    fn test_turn_without_player_one_is_an_invariant_violation() {
        let mut game = started_game();
        release_participant(&mut game, "alice").unwrap();

        let result = play(&mut game, "bob", 0, 0);
        assert!(matches!(result, Err(GameServiceError::InvariantViolation(_))));
    }

    #[test]
    fn test_release_participant_reopens_slot() {
        let mut game = started_game();

        assert!(release_participant(&mut game, "bob").unwrap());
        assert!(!release_participant(&mut game, "carol").unwrap());
        assert!(!game.is_full());
        assert_eq!(game.status(), GameStatus::InProgress);

        assert_eq!(join(&mut game, "carol").unwrap(), Side::PlayerTwo);
    }

    #[test]
    fn test_release_refuses_participant_with_moves() {
        let mut game = started_game();
        play_all(&mut game, &[("alice", 1, 1)]);

        let result = release_participant(&mut game, "alice");

        assert!(matches!(result, Err(GameServiceError::ParticipantHasMoves)));
        assert_eq!(game.player_one(), Some("alice"));
        assert!(release_participant(&mut game, "bob").unwrap());
    }

    proptest! {
        #[test]
        fn prop_turns_alternate_and_marks_follow_sides(
            cells in Just((0u8..9).collect::<Vec<_>>()).prop_shuffle()
        ) {
            let mut game = started_game();
            let mut previous: Option<String> = None;

            for cell in cells {
                if game.status() == GameStatus::Finished {
                    if let Some(winner) = game.winner_id() {
                        let last_mover = game.moves().last().map(|m| m.player_id.as_str());
                        prop_assert_eq!(Some(winner), last_mover);
                    }
                    break;
                }

                let player = game.next_player().unwrap_or("alice").to_string();
                let game_move = play(&mut game, &player, cell / 3, cell % 3).unwrap();

                prop_assert_ne!(Some(player.clone()), previous);
                let expected_mark = if player == "alice" { Mark::Nought } else { Mark::Cross };
                prop_assert_eq!(game_move.mark, expected_mark);
                if game.status() == GameStatus::InProgress {
                    prop_assert_ne!(game.next_player(), Some(player.as_str()));
                }
                previous = Some(player);
            }

            prop_assert!(game.moves().len() <= 9);
        }
    }
}
