//! Entity definitions: teams, directions, move capabilities, and the
//! three fixed vehicles that sit just off the grid.

use std::fmt;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

/// The number of move directions.
pub const DIRECTION_COUNT: usize = 4;

/// The team an entity belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Team {
    Good,
    Bad,
    Vehicle,
}

impl Team {
    /// Returns the lowercase name used in catalogs and on the command line.
    pub const fn name(self) -> &'static str {
        match self {
            Team::Good => "good",
            Team::Bad => "bad",
            Team::Vehicle => "vehicle",
        }
    }

    /// Parses a team from its lowercase name.
    pub fn from_name(s: &str) -> Option<Team> {
        match s {
            "good" => Some(Team::Good),
            "bad" => Some(Team::Bad),
            "vehicle" => Some(Team::Vehicle),
            _ => None,
        }
    }
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A direction an entity can move (or look, listen, point) in.
///
/// The `#[repr(u8)]` discriminant indexes [`Moves`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum Direction {
    Left = 0,
    Up = 1,
    Down = 2,
    Right = 3,
}

impl Direction {
    /// All directions, in scan order.
    pub const ALL: [Direction; DIRECTION_COUNT] =
        [Direction::Left, Direction::Up, Direction::Down, Direction::Right];

    /// Returns the opposite direction.
    pub const fn inverse(self) -> Direction {
        match self {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
        }
    }

    /// Returns the `(dx, dy)` grid offset; y grows downward.
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Direction::Left => (-1, 0),
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Right => (1, 0),
        }
    }

    /// Right and Down are forward; Left and Up look back at cells already scanned.
    pub const fn is_forward(self) -> bool {
        matches!(self, Direction::Right | Direction::Down)
    }
}

/// What an entity does in a supported direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoveKind {
    Look,
    Listen,
    Point,
}

/// Per-direction move capabilities. `None` means the entity cannot act that way.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Moves([Option<MoveKind>; DIRECTION_COUNT]);

impl Moves {
    /// No capability in any direction.
    pub const NONE: Moves = Moves([None; DIRECTION_COUNT]);

    /// Builds a move set from `(direction, kind)` pairs; later pairs win.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (Direction, MoveKind)>,
    {
        let mut moves = Moves::NONE;
        for (dir, kind) in pairs {
            moves.0[dir as usize] = Some(kind);
        }
        moves
    }

    /// Returns the move kind for a direction, if supported.
    #[inline]
    pub const fn get(&self, dir: Direction) -> Option<MoveKind> {
        self.0[dir as usize]
    }

    #[inline]
    pub const fn supports(&self, dir: Direction) -> bool {
        self.0[dir as usize].is_some()
    }

    /// Number of supported directions.
    pub fn count(&self) -> u32 {
        self.0.iter().filter(|m| m.is_some()).count() as u32
    }

    /// Iterates over the supported directions and their kinds.
    pub fn iter(&self) -> impl Iterator<Item = (Direction, MoveKind)> + '_ {
        Direction::ALL
            .into_iter()
            .filter_map(move |d| self.get(d).map(|k| (d, k)))
    }
}

/// A placeable character or one of the fixed vehicles.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Entity {
    pub name: String,
    pub team: Team,
    pub bounty: u32,
    pub moves: Moves,
}

impl Entity {
    pub fn new(name: impl Into<String>, team: Team, moves: Moves) -> Self {
        Entity {
            name: name.into(),
            team,
            bounty: 0,
            moves,
        }
    }

    pub fn with_bounty(mut self, bounty: u32) -> Self {
        self.bounty = bounty;
        self
    }

    pub fn is_vehicle(&self) -> bool {
        self.team == Team::Vehicle
    }
}

/// The three vehicles parked around the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum Vehicle {
    Boat = 0,
    Car = 1,
    Plane = 2,
}

/// The number of vehicles.
pub const VEHICLE_COUNT: usize = 3;

static VEHICLES: LazyLock<[Entity; VEHICLE_COUNT]> = LazyLock::new(|| {
    [
        Entity::new("boat", Team::Vehicle, Moves::NONE),
        Entity::new("car", Team::Vehicle, Moves::NONE),
        Entity::new("plane", Team::Vehicle, Moves::NONE),
    ]
});

impl Vehicle {
    pub const ALL: [Vehicle; VEHICLE_COUNT] = [Vehicle::Boat, Vehicle::Car, Vehicle::Plane];

    /// Off-grid coordinate the vehicle occupies: the boat sits right of the
    /// bottom-right cell, the car left of the top-left cell, and the plane
    /// above the top-right cell.
    pub const fn coord(self) -> (i32, i32) {
        match self {
            Vehicle::Boat => (3, 2),
            Vehicle::Car => (-1, 0),
            Vehicle::Plane => (2, -1),
        }
    }

    /// Returns the vehicle parked at an off-grid coordinate, if any.
    pub const fn at(x: i32, y: i32) -> Option<Vehicle> {
        match (x, y) {
            (3, 2) => Some(Vehicle::Boat),
            (-1, 0) => Some(Vehicle::Car),
            (2, -1) => Some(Vehicle::Plane),
            _ => None,
        }
    }

    /// The shared entity constant for this vehicle.
    pub fn entity(self) -> &'static Entity {
        &VEHICLES[self as usize]
    }
}
