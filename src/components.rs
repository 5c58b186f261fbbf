use specs::{Component, storage::*};
use ggez::graphics::Rect;

/// Where a block is painted. Set once at spawn; the simulation never moves it.
#[derive(Copy, Clone, Debug, PartialEq, Component)]
#[storage(VecStorage)]
pub struct Tile {
    pub slot: usize,
    pub rect: Rect,
}

/// Marks a block that has been taken out of the flock. Dormant blocks are
/// neither peers nor integrated.
#[derive(Copy, Clone, Default, Component)]
#[storage(NullStorage)]
pub struct Dormant;
