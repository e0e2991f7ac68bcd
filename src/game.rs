use std::cmp::Ordering;
use std::fmt;

/// Pair sums are compared against this value on every move.
const TARGET_SUM: u32 = 7;

/// One of the two players.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Player {
    One,
    Two,
}

impl Player {
    /// The opponent of this player.
    #[inline]
    pub fn other(self) -> Player {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }
}

/// Outcome of a finished game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Winner {
    PlayerOne,
    PlayerTwo,
    Draw,
}

impl Winner {
    /// Numeric code used in the JSON output: `1`/`2` for the players, `0` for
    /// a draw (and for states that are not terminal).
    #[inline]
    pub fn code(self) -> u8 {
        match self {
            Winner::PlayerOne => 1,
            Winner::PlayerTwo => 2,
            Winner::Draw => 0,
        }
    }
}

/// A full game snapshot: the remaining tokens, both scores and the side to
/// move. Immutable once constructed; the transition model only ever produces
/// new values.
///
/// Equality and hashing cover all four fields, so two states are
/// interchangeable for deduplication only when the sequence, both scores and
/// the turn all match exactly.
///
/// ```
/// use sevens::game::GameState;
///
/// let state = GameState::new(vec![3, 4]);
/// assert!(!state.is_terminal());
/// assert_eq!(state.next_states().len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GameState {
    sequence: Vec<u32>,
    score_one: i32,
    score_two: i32,
    to_move: Player,
}

impl GameState {
    /// Starting position for the given token sequence: both scores at zero,
    /// player one to move.
    ///
    /// Panics on an empty sequence; a game needs at least one token.
    pub fn new(sequence: Vec<u32>) -> Self {
        assert!(!sequence.is_empty(), "a game needs at least one token");
        GameState {
            sequence,
            score_one: 0,
            score_two: 0,
            to_move: Player::One,
        }
    }

    /// The remaining tokens, in play order.
    #[inline]
    pub fn sequence(&self) -> &[u32] {
        &self.sequence
    }

    #[inline]
    pub fn score_one(&self) -> i32 {
        self.score_one
    }

    #[inline]
    pub fn score_two(&self) -> i32 {
        self.score_two
    }

    /// Whose move produces the next transition.
    #[inline]
    pub fn to_move(&self) -> Player {
        self.to_move
    }

    /// True once the sequence has collapsed to a single token.
    #[inline]
    pub fn is_terminal(&self) -> bool {
        self.sequence.len() == 1
    }

    /// Outcome of the game, defined only on terminal states.
    ///
    /// ```
    /// use sevens::game::{GameState, Winner};
    ///
    /// let running = GameState::new(vec![3, 4]);
    /// assert_eq!(running.winner(), None);
    ///
    /// let over = running.next_states().remove(0);
    /// assert_eq!(over.winner(), Some(Winner::PlayerTwo));
    /// ```
    pub fn winner(&self) -> Option<Winner> {
        if !self.is_terminal() {
            return None;
        }
        Some(match self.score_one.cmp(&self.score_two) {
            Ordering::Greater => Winner::PlayerOne,
            Ordering::Less => Winner::PlayerTwo,
            Ordering::Equal => Winner::Draw,
        })
    }

    /// Enumerate every successor state, one per adjacent pair of tokens.
    ///
    /// For a sequence of length `n` this returns exactly `n - 1` states, in
    /// pair index order (left to right). Each move removes the pair at
    /// `i, i + 1` and inserts a replacement token at `i` based on the pair
    /// sum: above seven a `1` (mover gains 2 points), exactly seven a `2`
    /// (mover loses a point), below seven a `3` (opponent loses a point).
    /// The turn flips in every case.
    ///
    /// Panics when called on a terminal state; that is a scheduling defect,
    /// not a recoverable condition.
    pub fn next_states(&self) -> Vec<GameState> {
        assert!(
            self.sequence.len() >= 2,
            "attempted to expand a finished game: {:?}",
            self.sequence
        );
        let mut next = Vec::with_capacity(self.sequence.len() - 1);
        for i in 0..self.sequence.len() - 1 {
            let sum = self.sequence[i] + self.sequence[i + 1];
            let (replacement, own_delta, other_delta) = match sum.cmp(&TARGET_SUM) {
                Ordering::Greater => (1, 2, 0),
                Ordering::Equal => (2, -1, 0),
                Ordering::Less => (3, 0, -1),
            };
            let mut sequence = Vec::with_capacity(self.sequence.len() - 1);
            sequence.extend_from_slice(&self.sequence[..i]);
            sequence.push(replacement);
            sequence.extend_from_slice(&self.sequence[i + 2..]);
            let (score_one, score_two) = match self.to_move {
                Player::One => (self.score_one + own_delta, self.score_two + other_delta),
                Player::Two => (self.score_one + other_delta, self.score_two + own_delta),
            };
            next.push(GameState {
                sequence,
                score_one,
                score_two,
                to_move: self.to_move.other(),
            });
        }
        next
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, token) in self.sequence.iter().enumerate() {
            if i != 0 {
                write!(f, " ")?;
            }
            write!(f, "{token}")?;
        }
        write!(
            f,
            "] {}:{} ({:?} to move)",
            self.score_one, self.score_two, self.to_move
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mid_game(sequence: Vec<u32>, score_one: i32, score_two: i32, to_move: Player) -> GameState {
        GameState {
            sequence,
            score_one,
            score_two,
            to_move,
        }
    }

    #[test]
    fn successor_count_is_pairs() {
        for len in 2..8 {
            let state = GameState::new(vec![1; len]);
            let next = state.next_states();
            assert_eq!(next.len(), len - 1);
            for succ in &next {
                assert_eq!(succ.sequence().len(), len - 1);
            }
        }
    }

    #[test]
    fn sum_above_seven_inserts_one_and_rewards_mover() {
        let next = GameState::new(vec![5, 6]).next_states();
        assert_eq!(next[0].sequence(), &[1]);
        assert_eq!(next[0].score_one(), 2);
        assert_eq!(next[0].score_two(), 0);
        assert_eq!(next[0].to_move(), Player::Two);
    }

    #[test]
    fn sum_of_seven_inserts_two_and_penalizes_mover() {
        let next = GameState::new(vec![3, 4]).next_states();
        assert_eq!(next[0].sequence(), &[2]);
        assert_eq!(next[0].score_one(), -1);
        assert_eq!(next[0].score_two(), 0);
    }

    #[test]
    fn sum_below_seven_inserts_three_and_penalizes_opponent() {
        let next = GameState::new(vec![1, 2]).next_states();
        assert_eq!(next[0].sequence(), &[3]);
        assert_eq!(next[0].score_one(), 0);
        assert_eq!(next[0].score_two(), -1);
    }

    #[test]
    fn deltas_follow_the_mover_on_player_two_turns() {
        let state = mid_game(vec![5, 6], 0, 0, Player::Two);
        let next = state.next_states();
        assert_eq!(next[0].score_one(), 0);
        assert_eq!(next[0].score_two(), 2);
        assert_eq!(next[0].to_move(), Player::One);

        let state = mid_game(vec![1, 2], 0, 0, Player::Two);
        let next = state.next_states();
        assert_eq!(next[0].score_one(), -1);
        assert_eq!(next[0].score_two(), 0);
    }

    #[test]
    fn replacement_lands_at_the_pair_position() {
        let next = GameState::new(vec![9, 9, 1, 1]).next_states();
        assert_eq!(next[0].sequence(), &[1, 1, 1]);
        assert_eq!(next[1].sequence(), &[9, 1, 1]);
        assert_eq!(next[2].sequence(), &[9, 9, 3]);
    }

    #[test]
    fn terminal_iff_single_token() {
        assert!(GameState::new(vec![4]).is_terminal());
        assert!(!GameState::new(vec![4, 4]).is_terminal());
        assert!(!GameState::new(vec![4, 4, 4]).is_terminal());
    }

    #[test]
    fn winner_compares_final_scores() {
        assert_eq!(
            mid_game(vec![2], 3, 1, Player::One).winner(),
            Some(Winner::PlayerOne)
        );
        assert_eq!(
            mid_game(vec![2], -2, -1, Player::One).winner(),
            Some(Winner::PlayerTwo)
        );
        assert_eq!(
            mid_game(vec![2], 2, 2, Player::Two).winner(),
            Some(Winner::Draw)
        );
        assert_eq!(mid_game(vec![2, 2], 9, 0, Player::One).winner(), None);
    }

    #[test]
    fn three_four_example() {
        // [3,4] sums to seven: one successor, mover penalized, player two wins.
        let root = GameState::new(vec![3, 4]);
        let next = root.next_states();
        assert_eq!(next.len(), 1);
        let end = &next[0];
        assert!(end.is_terminal());
        assert_eq!(end.sequence(), &[2]);
        assert_eq!(end.score_one(), -1);
        assert_eq!(end.winner(), Some(Winner::PlayerTwo));
    }

    #[test]
    fn one_nine_one_twins_coincide() {
        // Both pairs of [1,9,1] sum to ten, so the two successors are the
        // same state: same sequence, same scores, same side to move.
        let next = GameState::new(vec![1, 9, 1]).next_states();
        assert_eq!(next.len(), 2);
        assert_eq!(next[0], next[1]);
        assert_eq!(next[0].sequence(), &[1, 1]);
        assert_eq!(next[0].score_one(), 2);
    }

    #[test]
    #[should_panic(expected = "finished game")]
    fn expanding_a_terminal_state_is_a_defect() {
        GameState::new(vec![5]).next_states();
    }
}
