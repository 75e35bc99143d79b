//------------------------------------------------------------------------------
//
// Copyright 2025 Jiri Bobek. All rights reserved.
// License: GPL 3.0 or later. See LICENSE.txt for details.
//
//------------------------------------------------------------------------------

// State initialization constant ("expand 32-byte k")
const CONST: [u32; 4] = [0x_6170_7865, 0x_3320_646e, 0x_7962_2d32, 0x_6b20_6574];

const STATE_WORDS: usize = 16;

/// ChaCha based generator. The same seed always gives the same sequence.
pub struct Rng {
	state: [u32; STATE_WORDS],
	block: [u32; STATE_WORDS],
	used: usize,
}

impl Default for Rng {
	fn default() -> Self {
		Self::from_seed(54_643_613)
	}
}

#[allow(clippy::indexing_slicing)]
impl Rng {
	pub fn new(seed: &[u8; 48]) -> Self {
		let word = |i: usize| u32::from_le_bytes([seed[i], seed[i + 1], seed[i + 2], seed[i + 3]]);
		let mut state = [0; STATE_WORDS];
		state[..4].copy_from_slice(&CONST);
		for (i, s) in state[4..].iter_mut().enumerate() {
			*s = word(4 * i);
		}
		Self { state, block: [0; STATE_WORDS], used: STATE_WORDS }
	}

	/// Expands a 64-bit seed into the key. The nonce and counter start at zero.
	pub fn from_seed(seed: u64) -> Self {
		let mut key = [0_u8; 48];
		let mut x = seed;
		for chunk in key[..32].chunks_exact_mut(8) {
			// splitmix64
			x = x.wrapping_add(0x_9e37_79b9_7f4a_7c15);
			let mut z = x;
			z = (z ^ (z >> 30)).wrapping_mul(0x_bf58_476d_1ce4_e5b9);
			z = (z ^ (z >> 27)).wrapping_mul(0x_94d0_49bb_1331_11eb);
			z ^= z >> 31;
			chunk.copy_from_slice(&z.to_le_bytes());
		}
		Self::new(&key)
	}

	// generates a block of random numbers
	#[inline(never)]
	fn get_block(&mut self) -> [u32; STATE_WORDS] {
		let mut result = self.state;

		// do 7 double rounds, i.e. 14 rounds
		for _ in 0..7 {
			Self::quarter_round(0, 4, 8, 12, &mut result);
			Self::quarter_round(1, 5, 9, 13, &mut result);
			Self::quarter_round(2, 6, 10, 14, &mut result);
			Self::quarter_round(3, 7, 11, 15, &mut result);

			Self::quarter_round(0, 5, 10, 15, &mut result);
			Self::quarter_round(1, 6, 11, 12, &mut result);
			Self::quarter_round(2, 7, 8, 13, &mut result);
			Self::quarter_round(3, 4, 9, 14, &mut result);
		}

		// add original state
		for (r, s) in result.iter_mut().zip(self.state.iter()) {
			*r = r.wrapping_add(*s);
		}

		// increment counter
		let (t, c) = self.state[12].overflowing_add(1);
		self.state[12] = t;
		self.state[13] = self.state[13].wrapping_add(u32::from(c));

		result
	}

	#[inline(always)]
	fn quarter_round(a: usize, b: usize, c: usize, d: usize, state: &mut [u32; STATE_WORDS]) {
		state[a] = state[a].wrapping_add(state[b]);
		state[d] ^= state[a];
		state[d] = state[d].rotate_left(16);

		state[c] = state[c].wrapping_add(state[d]);
		state[b] ^= state[c];
		state[b] = state[b].rotate_left(12);

		state[a] = state[a].wrapping_add(state[b]);
		state[d] ^= state[a];
		state[d] = state[d].rotate_left(8);

		state[c] = state[c].wrapping_add(state[d]);
		state[b] ^= state[c];
		state[b] = state[b].rotate_left(7);
	}

	pub fn next_u32(&mut self) -> u32 {
		if self.used >= STATE_WORDS {
			self.block = self.get_block();
			self.used = 0;
		}
		let result = self.block[self.used];
		self.used += 1;
		result
	}

	/// Uniform in `[0.0, 1.0)`.
	pub fn get_uniform(&mut self) -> f64 {
		f64::from(self.next_u32()) * (1.0 / 4_294_967_296.0)
	}

	pub fn rand(&mut self, out: &mut [f64]) {
		for v in out.iter_mut() {
			*v = self.get_uniform();
		}
	}
}

//--------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_same_seed_same_sequence() {
		let mut a = Rng::from_seed(1234);
		let mut b = Rng::from_seed(1234);
		for _ in 0..40 {
			assert_eq!(a.next_u32(), b.next_u32());
		}
	}

	#[test]
	fn test_different_seeds_differ() {
		let mut a = Rng::from_seed(1);
		let mut b = Rng::from_seed(2);
		let a = (0..8).map(|_| a.next_u32()).collect::<Vec<_>>();
		let b = (0..8).map(|_| b.next_u32()).collect::<Vec<_>>();
		assert_ne!(a, b);
	}

	#[test]
	fn test_uniform_range() {
		let mut rng = Rng::default();
		let mut values = [0.0; 100];
		rng.rand(&mut values);
		assert!(values.iter().all(|&v| (0.0..1.0).contains(&v)));
		let mean = values.iter().sum::<f64>() / 100.0;
		assert!(mean > 0.3 && mean < 0.7);
	}
}
