use specs::world::Index;
use crate::block::Peer;

/// Every live block as it stood at the start of the frame. Steering reads only
/// from here, so blocks integrated earlier in a frame never leak into the
/// forces of blocks integrated later.
#[derive(Default)]
pub struct Neighborhood {
	peers: Vec<Peer>,
}

impl Neighborhood {
	pub fn clear(&mut self) {
		self.peers.clear();
	}

	pub fn insert(&mut self, peer: Peer) {
		self.peers.push(peer);
	}

	pub fn len(&self) -> usize {
		self.peers.len()
	}

	/// All peers except `id`.
	pub fn around(&self, id: Index) -> impl Iterator<Item = &Peer> + Clone {
		self.peers.iter().filter(move |p| p.id != id)
	}
}
