// Short random identifiers for new tasks
use rand::Rng;

use crate::app::models::Board;

const ID_LENGTH: usize = 8;
const ID_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

// 8 lowercase base-36 chars; collisions are negligible for a personal board
pub fn generate_id() -> String {
    let mut rng = rand::rng();
    (0..ID_LENGTH)
        .map(|_| ID_ALPHABET[rng.random_range(0..ID_ALPHABET.len())] as char)
        .collect()
}

// Draws until the id is not used anywhere on the board
pub fn generate_unique_id(board: &Board) -> String {
    loop {
        let id = generate_id();
        if !board.contains_task(&id) {
            return id;
        }
    }
}
