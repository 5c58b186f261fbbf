use std::sync::Arc;
use ggez::{Context, GameResult};
use log::{debug, info};
use rand::Rng;
use specs::prelude::*;
use crate::block::Block;
use crate::components::*;
use crate::config::FlockConfig;
use crate::error::FlockError;
use crate::globals::*;
use crate::grid::Grid;
use crate::systems::{self, IntegrateSystem, SnapshotSystem, SteeringSystem};

/// Weights of the three steering rules. Read fresh by every block each frame.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Gains {
	pub separation: f32,
	pub alignment: f32,
	pub cohesion: f32,
}

impl Gains {
	/// Heavier weights used by the per-pixel variant of this simulation.
	pub const DENSE: Gains = Gains { separation: 1.5, alignment: 2.3, cohesion: 4.0 };

	pub fn new(separation: f32, alignment: f32, cohesion: f32) -> Self {
		Self { separation, alignment, cohesion }
	}

	/// Any finite weight is accepted; negative weights invert their rule.
	pub fn validate(&self) -> Result<(), FlockError> {
		for &(rule, value) in &[
			("separation", self.separation),
			("alignment", self.alignment),
			("cohesion", self.cohesion),
		] {
			if !value.is_finite() {
				return Err(FlockError::NonFiniteGain { rule, value });
			}
		}
		Ok(())
	}
}

impl Default for Gains {
	fn default() -> Self {
		Self::new(SEPARATION_WEIGHT, ALIGNMENT_WEIGHT, COHESION_WEIGHT)
	}
}

pub struct Flock {
	world: World,
	updater: Dispatcher<'static, 'static>,
	grid: Grid,
	max_speed: f32,
	max_force: f32,
}

impl Flock {
	pub fn new(config: &FlockConfig) -> Result<Self, FlockError> {
		config.validate()?;

		let mut world = World::new();
		world.register::<Tile>();
		world.insert(config.gains);

		let mut builder = DispatcherBuilder::new();
		if let Some(threads) = config.worker_threads {
			let pool = rayon::ThreadPoolBuilder::new()
				.num_threads(threads)
				.build()?;
			builder = builder.with_pool(Arc::new(pool));
		}
		let mut updater = builder
			.with(
				SnapshotSystem,
				"SnapshotSystem",
				&[]
			)
			.with(
				SteeringSystem,
				"SteeringSystem",
				&["SnapshotSystem"]
			)
			.with(
				IntegrateSystem,
				"IntegrateSystem",
				&["SteeringSystem"]
			)
			.build();
		updater.setup(&mut world);

		Ok(Self {
			world,
			updater,
			grid: config.grid,
			max_speed: config.max_speed,
			max_force: config.max_force,
		})
	}

	/// Fills every grid slot with a randomly colored block.
	pub fn populate<R: Rng + ?Sized>(&mut self, rng: &mut R) {
		for slot in 0..self.grid.len() {
			let block = Block::random(rng, self.max_speed, self.max_force);
			let tile = Tile { slot, rect: self.grid.rect(slot) };
			self.spawn(block, tile);
		}
		info!("populated {} blocks on a {}x{} grid", self.grid.len(), self.grid.cols, self.grid.rows);
	}

	pub fn spawn(&mut self, block: Block, tile: Tile) -> Entity {
		self.world.create_entity()
			.with(block)
			.with(tile)
			.build()
	}

	/// One frame: snapshot, steer every block, then integrate every block.
	pub fn step(&mut self) {
		self.updater.dispatch(&self.world);
	}

	/// Runs only the steering half of a frame, leaving forces in each block's
	/// acceleration. A following `step` steers again on top of them.
	pub fn accumulate(&mut self) {
		SnapshotSystem.run_now(&self.world);
		SteeringSystem.run_now(&self.world);
	}

	pub fn gains(&self) -> Gains {
		*self.world.read_resource::<Gains>()
	}

	/// Rejected gains leave the current ones in place.
	pub fn set_gains(&mut self, gains: Gains) -> Result<(), FlockError> {
		gains.validate()?;
		*self.world.write_resource::<Gains>() = gains;
		debug!("gains set to {:?}", gains);
		Ok(())
	}

	/// Returns whether the block is dormant afterwards.
	pub fn toggle_dormant(&mut self, entity: Entity) -> Result<bool, FlockError> {
		let mut dormant = self.world.write_storage::<Dormant>();
		let asleep = if dormant.remove(entity).is_some() {
			false
		} else {
			dormant.insert(entity, Dormant)?;
			true
		};
		info!("block {} is {}", entity.id(), if asleep { "dormant" } else { "awake" });
		Ok(asleep)
	}

	pub fn block_at(&self, x: f32, y: f32) -> Option<Entity> {
		let slot = self.grid.slot_at(x, y)?;
		let entities = self.world.entities();
		let tiles = self.world.read_storage::<Tile>();
		let found = (&entities, &tiles).join()
			.find(|(_, tile)| tile.slot == slot)
			.map(|(ent, _)| ent);
		found
	}

	pub fn block(&self, entity: Entity) -> Option<Block> {
		self.world.read_storage::<Block>().get(entity).copied()
	}

	/// Every block with its tile, ordered by slot.
	pub fn blocks(&self) -> Vec<(Tile, Block)> {
		let tiles = self.world.read_storage::<Tile>();
		let blocks = self.world.read_storage::<Block>();
		let mut all: Vec<(Tile, Block)> = (&tiles, &blocks).join()
			.map(|(tile, block)| (*tile, *block))
			.collect();
		all.sort_by_key(|(tile, _)| tile.slot);
		all
	}

	pub fn live_count(&self) -> usize {
		let blocks = self.world.read_storage::<Block>();
		let dormant = self.world.read_storage::<Dormant>();
		let count = (&blocks, !&dormant).join().count();
		count
	}

	pub fn render(&mut self, ctx: &mut Context) -> GameResult {
		systems::draw_blocks(ctx, &mut self.world)
	}
}
