use ggez::{Context, GameResult, graphics::*};
use log::trace;
use specs::prelude::*;
use crate::block::Block;
use crate::color::ColorVectorExt;
use crate::components::*;
use crate::flock::Gains;
use crate::globals::*;
use crate::neighborhood::Neighborhood;

pub struct SnapshotSystem;
impl<'a> System<'a> for SnapshotSystem {
	type SystemData = (
		Entities<'a>,
		ReadStorage<'a, Block>,
		ReadStorage<'a, Dormant>,
		Write<'a, Neighborhood>,
	);

	fn run(&mut self, (entities, blocks, dormant, mut nh): Self::SystemData) {
		nh.clear();
		for (ent, block, ()) in (&entities, &blocks, !&dormant).join() {
			nh.insert(block.as_peer(ent.id()));
		}
		trace!("snapshot of {} live blocks", nh.len());
	}
}

pub struct SteeringSystem;
impl<'a> System<'a> for SteeringSystem {
	type SystemData = (
		Entities<'a>,
		Read<'a, Gains>,
		Read<'a, Neighborhood>,
		ReadStorage<'a, Dormant>,
		WriteStorage<'a, Block>,
	);

	fn run(&mut self, (entities, gains, nh, dormant, mut blocks): Self::SystemData) {
		let gains = *gains;
		(&entities, &mut blocks, !&dormant).par_join()
			.for_each(|(ent, block, ())| {
				block.flock(nh.around(ent.id()), &gains);
			});
	}
}

pub struct IntegrateSystem;
impl<'a> System<'a> for IntegrateSystem {
	type SystemData = (
		ReadStorage<'a, Dormant>,
		WriteStorage<'a, Block>,
	);

	fn run(&mut self, (dormant, mut blocks): Self::SystemData) {
		(&mut blocks, !&dormant).par_join()
			.for_each(|(block, ())| block.update());
	}
}

/// Paints every tile with its block's color. Dormant tiles are dimmed.
pub fn draw_blocks(ctx: &mut Context, world: &mut World) -> GameResult {
	world.exec(|(tiles, blocks, dormant): (ReadStorage<Tile>, ReadStorage<Block>, ReadStorage<Dormant>)| {
		let mut mesh = MeshBuilder::new();
		let mut painted = 0;
		for (tile, block, asleep) in (&tiles, &blocks, (&dormant).maybe()).join() {
			let [r, g, b] = block.color.to_rgb8();
			let mut color = Color::from_rgb(r, g, b);
			if asleep.is_some() {
				color.r *= DORMANT_DIM;
				color.g *= DORMANT_DIM;
				color.b *= DORMANT_DIM;
			}
			mesh.rectangle(DrawMode::fill(), tile.rect, color);
			painted += 1;
		}
		if painted == 0 {
			return Ok(());
		}
		let mesh = mesh.build(ctx)?;
		draw(ctx, &mesh, DrawParam::default())
	})
}
