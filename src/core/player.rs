//! Player identification and per-player data storage.
//!
//! ## Player
//!
//! The game is strictly two-player. `Player::One` starts on row 4 and moves
//! toward row 0; `Player::Two` starts on row 0 and moves toward row 4.
//!
//! ## PlayerMap
//!
//! Fixed two-slot storage indexed by `Player`.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

use super::coord::Coord;

/// One of the two seats at the table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Player {
    One,
    Two,
}

impl Player {
    /// Both players, in seat order.
    pub const ALL: [Player; 2] = [Player::One, Player::Two];

    /// Create from the 1-based seat number used by hosts.
    #[must_use]
    pub const fn from_number(number: u8) -> Option<Self> {
        match number {
            1 => Some(Player::One),
            2 => Some(Player::Two),
            _ => None,
        }
    }

    /// 1-based seat number.
    #[must_use]
    pub const fn number(self) -> u8 {
        match self {
            Player::One => 1,
            Player::Two => 2,
        }
    }

    /// 0-based index.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Player::One => 0,
            Player::Two => 1,
        }
    }

    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    /// Row on which this player's pieces start.
    #[must_use]
    pub const fn home_row(self) -> i8 {
        match self {
            Player::One => 4,
            Player::Two => 0,
        }
    }

    /// This player's own temple square (the Master's starting square).
    #[must_use]
    pub const fn home_temple(self) -> Coord {
        Coord::new(self.home_row(), 2)
    }
}

impl std::fmt::Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.number())
    }
}

/// Per-player data storage with O(1) access.
///
/// ## Example
///
/// ```
/// use temple_cards::core::{Player, PlayerMap};
///
/// let mut wins: PlayerMap<u32> = PlayerMap::with_value(0);
/// wins[Player::Two] += 1;
/// assert_eq!(wins[Player::One], 0);
/// assert_eq!(wins[Player::Two], 1);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerMap<T> {
    data: [T; 2],
}

impl<T> PlayerMap<T> {
    /// Create with values from a factory function.
    pub fn new(factory: impl Fn(Player) -> T) -> Self {
        Self {
            data: [factory(Player::One), factory(Player::Two)],
        }
    }

    /// Create with both entries set to the same value.
    pub fn with_value(value: T) -> Self
    where
        T: Clone,
    {
        Self {
            data: [value.clone(), value],
        }
    }

    #[must_use]
    pub fn get(&self, player: Player) -> &T {
        &self.data[player.index()]
    }

    pub fn get_mut(&mut self, player: Player) -> &mut T {
        &mut self.data[player.index()]
    }

    /// Iterate over (Player, &T) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (Player, &T)> {
        Player::ALL.into_iter().zip(self.data.iter())
    }
}

impl<T> Index<Player> for PlayerMap<T> {
    type Output = T;

    fn index(&self, player: Player) -> &Self::Output {
        self.get(player)
    }
}

impl<T> IndexMut<Player> for PlayerMap<T> {
    fn index_mut(&mut self, player: Player) -> &mut Self::Output {
        self.get_mut(player)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_basics() {
        assert_eq!(Player::One.opponent(), Player::Two);
        assert_eq!(Player::Two.opponent(), Player::One);
        assert_eq!(Player::One.number(), 1);
        assert_eq!(Player::Two.index(), 1);
        assert_eq!(format!("{}", Player::Two), "Player 2");
    }

    #[test]
    fn test_from_number() {
        assert_eq!(Player::from_number(1), Some(Player::One));
        assert_eq!(Player::from_number(2), Some(Player::Two));
        assert_eq!(Player::from_number(0), None);
        assert_eq!(Player::from_number(3), None);
    }

    #[test]
    fn test_home_temples() {
        assert_eq!(Player::One.home_temple(), Coord::new(4, 2));
        assert_eq!(Player::Two.home_temple(), Coord::new(0, 2));
        assert_eq!(Player::One.home_temple().rotated(), Player::Two.home_temple());
    }

    #[test]
    fn test_player_map_new() {
        let map = PlayerMap::new(|p| p.number() * 10);
        assert_eq!(map[Player::One], 10);
        assert_eq!(map[Player::Two], 20);
    }

    #[test]
    fn test_player_map_mutation() {
        let mut map: PlayerMap<Vec<i32>> = PlayerMap::default();
        map[Player::One].push(1);
        map[Player::Two].push(2);
        map[Player::Two].push(3);

        assert_eq!(map[Player::One], vec![1]);
        assert_eq!(map[Player::Two], vec![2, 3]);
    }

    #[test]
    fn test_player_map_iter() {
        let map = PlayerMap::new(|p| p.index());
        let pairs: Vec<_> = map.iter().collect();
        assert_eq!(pairs, vec![(Player::One, &0), (Player::Two, &1)]);
    }

    #[test]
    fn test_player_map_serialization() {
        let map = PlayerMap::new(|p| p.number());
        let json = serde_json::to_string(&map).unwrap();
        let deserialized: PlayerMap<u8> = serde_json::from_str(&json).unwrap();
        assert_eq!(map, deserialized);
    }
}
