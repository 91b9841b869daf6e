//! Tic-Tac-Toe smoke tests

use crate::config::ApiConfig;
use crate::models::{Mark, Status, BOARD_SIZE};
use crate::operations::TicTacToeClient;
use crate::runner::TestCase;
use crate::verify::ResponseVerifier;

pub fn smoke_suite(client: TicTacToeClient, _config: &ApiConfig) -> Vec<TestCase> {
    vec![
        get_board_returns_status(client.clone()),
        place_mark_updates_square(client.clone()),
        square_outside_board_is_rejected(client),
    ]
}

fn get_board_returns_status(client: TicTacToeClient) -> TestCase {
    TestCase::new("get_board_returns_status", move || {
        let client = client.clone();
        async move {
            let response = client.get_board().await?;
            ResponseVerifier::verify_status(&response, 200)?;
            ResponseVerifier::verify_json_path_exists(&response.body, "winner")?;
            ResponseVerifier::verify_json_path_exists(&response.body, "board[2][2]")?;
            let status: Status = response.parse()?;
            anyhow::ensure!(
                status.board.len() == usize::from(BOARD_SIZE),
                "board has {} rows",
                status.board.len()
            );
            Ok(())
        }
    })
}

fn place_mark_updates_square(client: TicTacToeClient) -> TestCase {
    TestCase::new("place_mark_updates_square", move || {
        let client = client.clone();
        async move {
            let placed = client.place_mark(1, 1, Mark::X).await?;
            ResponseVerifier::verify_status(&placed, 200)?;
            let status: Status = placed.parse()?;
            anyhow::ensure!(
                status.square(1, 1) == Some(Mark::X),
                "square (1,1) holds {:?} after placing X",
                status.square(1, 1)
            );

            let square = client.get_square(1, 1).await?;
            ResponseVerifier::verify_status(&square, 200)?;
            let mark: Mark = square.parse()?;
            anyhow::ensure!(mark == Mark::X, "GET returned {mark} instead of X");
            Ok(())
        }
    })
}

fn square_outside_board_is_rejected(client: TicTacToeClient) -> TestCase {
    TestCase::new("square_outside_board_is_rejected", move || {
        let client = client.clone();
        async move {
            let response = client.get_square(BOARD_SIZE + 1, 1).await?;
            ResponseVerifier::verify_status(&response, 400)?;
            Ok(())
        }
    })
}
