use chess_rules::Game;

fn perft(game: &Game, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }
    let moves = game.all_valid_moves(game.team_turn());
    if depth == 1 {
        return moves.len() as u64;
    }
    moves
        .into_iter()
        .map(|movement| {
            let mut next = game.clone();
            next.make_move(&movement).unwrap();
            perft(&next, depth - 1)
        })
        .sum()
}

#[test]
fn starting_position_counts() {
    let game = Game::new();
    assert_eq!(perft(&game, 1), 20);
    assert_eq!(perft(&game, 2), 400);
    assert_eq!(perft(&game, 3), 8902);
}
#[test]
fn counts_after_king_pawn_opening() {
    let mut game = Game::new();
    game.make_move(&"e2e4".parse().unwrap()).unwrap();
    assert_eq!(perft(&game, 1), 20);
    assert_eq!(perft(&game, 2), 600);
}
