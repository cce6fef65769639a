#[cfg(test)]
pub mod test {
    use anyhow::Result;

    use crate::board::{Board, GameState};
    use crate::line_handler::LineTotals;
    use crate::piece::{Piece, PieceKind};
    use crate::search::{search, search_from, search_parallel, PLAYER_ONE_WIN, PLAYER_TWO_WIN};

    fn totals_consistent(board: &Board) -> bool {
        board.lines().totals() == board.lines().recount()
    }

    #[test]
    pub fn initial_board() {
        let board = Board::default();
        let expected = "__ __ __ __ __ __ __ \n".repeat(6);

        assert_eq!(board.to_string(), expected);
        assert_eq!(board.pieces_played(), 0);
        assert!(!board.game_won());
        assert!(!board.full_board());
        assert_eq!(board.state(), GameState::Playing);
        assert_eq!(board.evaluate(), 0);
        // the side to move first is player one
        assert_eq!(board.last_piece(), Piece::player_two());
        assert_eq!(board.last_piece().next(), Piece::player_one());
    }

    #[test]
    pub fn place_one() {
        let mut board = Board::default();
        assert!(board.place(Piece::player_one(), 1));

        let expected = "__ __ __ __ __ __ __ \n".repeat(5) + "__ P1 __ __ __ __ __ \n";
        assert_eq!(board.to_string(), expected);

        let piece = board.piece_at(1, 0);
        assert_eq!(piece.kind(), PieceKind::PlayerOne);
        assert_eq!(piece.position(), Some((1, 0)));
        assert_eq!(board.last_piece(), piece);
        assert_eq!(board.piece_at(1, 1).kind(), PieceKind::Empty);
        assert_eq!(board.piece_at(1, 1).position(), Some((1, 1)));
    }

    #[test]
    pub fn place_two_at_same_column() {
        let mut board = Board::default();
        board.place(Piece::player_one(), 1);
        board.place(Piece::player_two(), 1);

        let expected = "__ __ __ __ __ __ __ \n".repeat(4)
            + "__ P2 __ __ __ __ __ \n"
            + "__ P1 __ __ __ __ __ \n";
        assert_eq!(board.to_string(), expected);
    }

    #[test]
    pub fn place_in_full_column() {
        let mut board = Board::default();
        let mut piece = Piece::player_one();
        for _ in 0..6 {
            assert!(board.place(piece, 1));
            piece = piece.next();
        }
        let before = board.clone();

        assert!(board.is_full(1));
        assert!(!board.place(Piece::player_one(), 1));
        assert_eq!(board, before);

        let expected = "__ P2 __ __ __ __ __ \n__ P1 __ __ __ __ __ \n".repeat(3);
        assert_eq!(board.to_string(), expected);
    }

    #[test]
    pub fn place_rejects_bad_input() {
        let mut board = Board::default();
        let before = board.clone();

        assert!(!board.place(Piece::player_one(), 7));
        assert!(!board.place(Piece::empty(), 0));
        assert!(!board.place(Piece::out_of_bounds(), 0));
        assert!(board.is_full(7));
        assert_eq!(board, before);
    }

    #[test]
    pub fn undo_once() {
        let mut b1 = Board::default();
        let mut b2 = Board::default();
        b1.place(Piece::player_one(), 1);
        b1.place(Piece::player_two(), 1);
        b1.place(Piece::player_one(), 1);
        let undone = b1.undo();

        b2.place(Piece::player_one(), 1);
        b2.place(Piece::player_two(), 1);

        assert_eq!(undone.map(|p| p.kind()), Some(PieceKind::PlayerOne));
        assert_eq!(b1.to_string(), b2.to_string());
        assert_eq!(b1, b2);
    }

    #[test]
    pub fn undo_restores_single_move_board() {
        let mut board = Board::default();
        board.place(Piece::player_one(), 3);
        board.place(Piece::player_two(), 3);
        board.undo();

        let mut expected = Board::default();
        expected.place(Piece::player_one(), 3);

        assert_eq!(board, expected);
    }

    #[test]
    pub fn undo_with_no_moves() {
        let mut board = Board::default();
        assert_eq!(board.undo(), None);
        assert_eq!(board, Board::default());

        board.place(Piece::player_one(), 0);
        assert!(board.undo().is_some());
        assert_eq!(board.undo(), None);
        assert_eq!(board, Board::default());
    }

    #[test]
    pub fn piece_at_outside_board() {
        let board = Board::default();
        for &(column, row) in [(-1, 0), (0, -1), (7, 0), (0, 6), (100, 100)].iter() {
            let piece = board.piece_at(column, row);
            assert_eq!(piece.kind(), PieceKind::OutOfBounds);
            assert_eq!(piece.position(), None);
        }
        assert_eq!(board.piece_at(6, 5).kind(), PieceKind::Empty);
    }

    #[test]
    pub fn pieces_and_turn_order() {
        assert_eq!(PieceKind::PlayerOne.next(), PieceKind::PlayerTwo);
        assert_eq!(PieceKind::PlayerTwo.next(), PieceKind::PlayerOne);
        assert_eq!(PieceKind::Empty.next(), PieceKind::Empty);
        assert_eq!(PieceKind::OutOfBounds.next(), PieceKind::OutOfBounds);

        let mut placed = Piece::player_one();
        placed.set_position(2, 3);
        assert_eq!(placed.column(), Some(2));
        assert_eq!(placed.row(), Some(3));
        // the successor has not been placed anywhere yet
        assert_eq!(placed.next(), Piece::player_two());

        let mut outside = Piece::out_of_bounds();
        outside.set_position(1, 1);
        assert_eq!(outside.position(), None);
        assert_eq!(outside.next(), outside);
        assert_eq!(outside.to_string(), "OB");
    }

    #[test]
    pub fn horizontal_win() {
        let mut board = Board::default();
        for column in 0..3 {
            assert!(board.place(Piece::player_one(), column));
            assert!(!board.game_won());
        }
        assert!(board.place(Piece::player_one(), 3));
        assert!(board.game_won());
        assert_eq!(board.state(), GameState::PlayerOneWin);
        assert_eq!(board.evaluate(), PLAYER_ONE_WIN);
    }

    #[test]
    pub fn vertical_win() {
        let mut board = Board::default();
        for _ in 0..3 {
            board.place(Piece::player_two(), 6);
        }
        assert!(!board.game_won());
        board.place(Piece::player_two(), 6);
        assert!(board.game_won());
        assert_eq!(board.state(), GameState::PlayerTwoWin);
        assert_eq!(board.evaluate(), PLAYER_TWO_WIN);
    }

    #[test]
    pub fn diagonal_wins() {
        // diagonal /
        let mut board = Board::default();
        for column in 0..4 {
            for _ in 0..column {
                board.place(Piece::player_two(), column);
            }
            assert!(!board.game_won());
            board.place(Piece::player_one(), column);
        }
        assert_eq!(board.piece_at(3, 3).kind(), PieceKind::PlayerOne);
        assert!(board.game_won());

        // diagonal \
        let mut board = Board::default();
        for column in (0..4).rev() {
            for _ in 0..(3 - column) {
                board.place(Piece::player_one(), column);
            }
            assert!(!board.game_won());
            board.place(Piece::player_two(), column);
        }
        assert_eq!(board.piece_at(0, 3).kind(), PieceKind::PlayerTwo);
        assert!(board.game_won());
        assert_eq!(board.state(), GameState::PlayerTwoWin);
    }

    #[test]
    pub fn broken_line_is_not_a_win() {
        let mut board = Board::default();
        board.place(Piece::player_one(), 0);
        board.place(Piece::player_one(), 1);
        board.place(Piece::player_two(), 2);
        board.place(Piece::player_one(), 3);
        board.place(Piece::player_one(), 4);
        assert!(!board.game_won());
        assert_eq!(board.state(), GameState::Playing);
    }

    #[test]
    pub fn undo_after_win() {
        let mut board = Board::default();
        let mut before = None;
        for column in 0..4 {
            if column == 3 {
                before = Some(board.clone());
            }
            board.place(Piece::player_one(), column);
        }
        assert!(board.game_won());

        board.undo();
        assert!(!board.game_won());
        assert!(totals_consistent(&board));
        assert_eq!(Some(board), before);
    }

    #[test]
    pub fn evaluation() {
        let mut board = Board::default();
        board.place(Piece::player_one(), 3);
        // player two loses the 7 lines through the bottom centre
        assert_eq!(board.lines().open_for(PieceKind::PlayerTwo), 62);
        assert_eq!(board.evaluate(), 7 * 10000 + 7);

        board.place(Piece::player_two(), 3);
        let totals = board.lines().totals();
        assert_eq!(
            totals,
            LineTotals {
                value_one: 6,
                value_two: 9,
                open_one: 59,
                open_two: 62,
            }
        );
        assert_eq!(board.evaluate(), -3 * 10000 - 3);
    }

    #[test]
    pub fn round_trip() {
        let mut board = Board::default();
        board.place(Piece::player_one(), 2);
        let start = board.clone();

        let columns = [3, 3, 2, 4, 4, 2, 1, 5, 5, 0, 6, 6, 3, 3];
        let mut piece = board.last_piece().next();
        for &column in columns.iter() {
            assert!(board.place(piece, column));
            piece = piece.next();
        }
        assert_eq!(board.pieces_played(), start.pieces_played() + columns.len());

        for _ in columns.iter() {
            assert!(board.undo().is_some());
        }
        assert_eq!(board, start);
    }

    #[test]
    pub fn incremental_totals_match_recount() {
        let mut board = Board::default();
        let mut piece = Piece::player_one();
        for i in 0..60 {
            let column = (i * 5 + 3) % 7;
            if board.place(piece, column) {
                piece = piece.next();
            }
            assert!(totals_consistent(&board));
            if i % 3 == 2 {
                board.undo();
                piece = piece.next();
                assert!(totals_consistent(&board));
            }
        }
    }

    #[test]
    pub fn from_moves() -> Result<()> {
        let board = Board::from_moves("4453")?;
        assert_eq!(board.pieces_played(), 4);
        assert_eq!(board.piece_at(3, 0).kind(), PieceKind::PlayerOne);
        assert_eq!(board.piece_at(3, 1).kind(), PieceKind::PlayerTwo);
        assert_eq!(board.piece_at(4, 0).kind(), PieceKind::PlayerOne);
        assert_eq!(board.piece_at(2, 0).kind(), PieceKind::PlayerTwo);

        assert!(Board::from_moves("0").is_err());
        assert!(Board::from_moves("8").is_err());
        assert!(Board::from_moves("4a").is_err());
        assert!(Board::from_moves("1111111").is_err());
        // player one wins with the seventh move
        assert!(Board::from_moves("1212121").is_ok());
        assert!(Board::from_moves("12121212").is_err());
        Ok(())
    }

    #[test]
    pub fn search_at_max_depth_is_static() -> Result<()> {
        let mut board = Board::from_moves("445")?;
        let result = search(&mut board, 0);

        assert_eq!(result.best_move, None);
        assert_eq!(result.value, board.evaluate());
        assert_eq!(result.nodes, 1);

        let result = search_from(&mut board, 3, 3);
        assert_eq!(result.best_move, None);
        assert_eq!(result.value, board.evaluate());
        Ok(())
    }

    #[test]
    pub fn search_on_won_board() -> Result<()> {
        let mut board = Board::from_moves("1212121")?;
        assert!(board.game_won());
        let before = board.clone();

        let result = search(&mut board, 6);
        assert_eq!(result.best_move, None);
        assert_eq!(result.value, PLAYER_ONE_WIN);
        assert_eq!(board, before);
        Ok(())
    }

    #[test]
    pub fn search_on_full_board() {
        // too small for any line, so the board fills without a win
        let mut board = Board::new(3, 3);
        let mut piece = Piece::player_one();
        for column in 0..3 {
            for _ in 0..3 {
                assert!(board.place(piece, column));
                piece = piece.next();
            }
        }
        assert!(board.full_board());
        assert_eq!(board.state(), GameState::Draw);

        let result = search(&mut board, 4);
        assert_eq!(result.best_move, None);
        assert_eq!(result.value, 0);
    }

    #[test]
    pub fn search_one_ply() -> Result<()> {
        let mut board = Board::from_moves("4")?;
        let result = search(&mut board, 1);

        // stacking on the centre closes the most lines for player one
        assert_eq!(result.best_move, Some(3));
        assert_eq!(result.value, -30003);
        assert_eq!(result.nodes, 8);

        let result = search(&mut board, 2);
        assert_eq!(result.nodes, 1 + 7 + 7 * 7);
        Ok(())
    }

    #[test]
    pub fn search_takes_immediate_win() -> Result<()> {
        // player two holds columns 2-4 on the bottom row
        let mut board = Board::from_moves("7273646")?;
        let before = board.clone();

        for &depth in [1, 2, 4].iter() {
            let result = search(&mut board, depth);
            assert_eq!(result.best_move, Some(0));
            assert_eq!(result.value, PLAYER_TWO_WIN);
            assert_eq!(board, before);
        }
        Ok(())
    }

    #[test]
    pub fn search_blocks_threat() -> Result<()> {
        // player one holds columns 1-3 on the bottom row
        let mut board = Board::from_moves("17273")?;
        let before = board.clone();

        let result = search(&mut board, 2);
        assert_eq!(result.best_move, Some(3));
        assert_ne!(result.value, PLAYER_ONE_WIN);
        assert_eq!(board, before);
        Ok(())
    }

    #[test]
    pub fn search_restores_board() -> Result<()> {
        let mut board = Board::from_moves("4443352")?;
        let before = board.clone();

        let result = search(&mut board, 5);
        assert!(result.best_move.is_some());
        assert_eq!(board, before);
        assert!(totals_consistent(&board));
        Ok(())
    }

    #[test]
    pub fn search_ties_pick_later_column() {
        // no lines fit, so every position scores 0
        let mut board = Board::new(2, 2);
        board.place(Piece::player_one(), 0);
        let result = search(&mut board, 1);
        assert_eq!(result.best_move, Some(1));
        assert_eq!(result.value, 0);

        // odd plies pick for player one, also preferring later columns
        let mut board = Board::new(3, 1);
        let result = search_from(&mut board, 1, 2);
        assert_eq!(result.best_move, Some(2));
        assert_eq!(result.value, 0);
    }

    #[test]
    pub fn search_expects_player_one_to_have_moved() {
        // at ply 0 the search picks for player two, so a fresh board where
        // player one is to move yields no improvement over the sentinel
        let mut board = Board::default();
        let result = search(&mut board, 2);
        assert_eq!(result.best_move, None);
        assert_eq!(result.value, PLAYER_TWO_WIN);
        assert_eq!(board, Board::default());
    }

    #[test]
    pub fn parallel_search_matches_sequential() -> Result<()> {
        for moves in ["", "4", "445", "7273646", "17273", "4443352"].iter() {
            let mut board = Board::from_moves(moves)?;
            let before = board.clone();

            let parallel = search_parallel(&board, 4);
            let sequential = search(&mut board, 4);

            assert_eq!(parallel.best_move, sequential.best_move, "moves {}", moves);
            assert_eq!(parallel.value, sequential.value, "moves {}", moves);
            assert!(parallel.nodes >= sequential.nodes);
            assert_eq!(board, before);
        }
        Ok(())
    }
}
