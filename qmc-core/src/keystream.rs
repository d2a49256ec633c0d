//! Mask generators for the QMC XOR cipher.
//!
//! A [`Keystream`] hands out one mask byte per call and can never be rewound.
//! XOR is self-inverse, so the same sequence both obfuscates and restores a
//! file as long as every byte gets the mask produced for its offset.

/// A source of mask bytes, consumed strictly in order.
pub trait Keystream {
    fn next_mask(&mut self) -> u8;
}

impl<K: Keystream + ?Sized> Keystream for &mut K {
    fn next_mask(&mut self) -> u8 {
        (**self).next_mask()
    }
}

impl<K: Keystream + ?Sized> Keystream for Box<K> {
    fn next_mask(&mut self) -> u8 {
        (**self).next_mask()
    }
}

/// XOR `data` in place with the next `data.len()` masks of `ks`.
pub fn apply_keystream<K: Keystream + ?Sized>(ks: &mut K, data: &mut [u8]) {
    for b in data.iter_mut() {
        *b ^= ks.next_mask();
    }
}

const SEED_MAP: [[u8; 7]; 8] = [
    [0x4a, 0xd6, 0xca, 0x90, 0x67, 0xf7, 0x52],
    [0x5e, 0x95, 0x23, 0x9f, 0x13, 0x11, 0x7e],
    [0x47, 0x74, 0x3d, 0x90, 0xaa, 0x3f, 0x51],
    [0xc6, 0x09, 0xd5, 0x9f, 0xfa, 0x66, 0xf9],
    [0xf3, 0xd6, 0xa1, 0x90, 0xa0, 0xf7, 0xf0],
    [0x1d, 0x95, 0xde, 0x9f, 0x84, 0x11, 0xf4],
    [0x0e, 0x74, 0xbb, 0x90, 0xbc, 0x3f, 0x92],
    [0x00, 0x09, 0x5b, 0x9f, 0x62, 0x66, 0xa1],
];

/// Masks emitted when the walk bounces off the left / right table edge.
const LEFT_EDGE: u8 = 0xc3;
const RIGHT_EDGE: u8 = 0xd8;

/// Every 0x8000-byte block drops one mask at its boundary.
const SEGMENT: i64 = 0x8000;

/// QMC v1 static seed: a zig-zag walk over an 8x7 table.
#[derive(Clone, Debug)]
pub struct QmcSeed {
    x: i32,
    y: i32,
    dx: i32,
    index: i64,
}

impl QmcSeed {
    pub fn new() -> Self {
        Self {
            x: -1,
            y: 8,
            dx: 1,
            index: -1,
        }
    }

    fn step(&mut self) -> u8 {
        self.index += 1;
        let mask = if self.x < 0 {
            self.dx = 1;
            self.y = (8 - self.y) % 8;
            LEFT_EDGE
        } else if self.x > 6 {
            self.dx = -1;
            self.y = 7 - self.y;
            RIGHT_EDGE
        } else {
            SEED_MAP[self.y as usize][self.x as usize]
        };
        self.x += self.dx;
        mask
    }

    fn skips(&self) -> bool {
        self.index == SEGMENT || (self.index > SEGMENT && (self.index + 1) % SEGMENT == 0)
    }
}

impl Default for QmcSeed {
    fn default() -> Self {
        Self::new()
    }
}

impl Keystream for QmcSeed {
    fn next_mask(&mut self) -> u8 {
        loop {
            let mask = self.step();
            if !self.skips() {
                return mask;
            }
        }
    }
}
