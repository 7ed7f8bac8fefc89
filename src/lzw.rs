// lzw.rs
//
// Copyright (c) 2020-2025  Douglas Lau
//
//! Lempel-Ziv-Welch decompression for GIF

/// Code Bits
#[derive(Clone, Copy, Debug, PartialEq)]
struct Bits(u8);

impl From<u8> for Bits {
    fn from(bits: u8) -> Self {
        Bits(bits.min(Self::MAX.0))
    }
}

impl From<Bits> for u8 {
    fn from(bits: Bits) -> Self {
        bits.0
    }
}

impl Bits {
    /// Maximum code bits allowed for GIF
    const MAX: Self = Bits(12);

    /// Get the number of entries
    const fn entries(self) -> usize {
        1 << self.0
    }

    /// Get the bit mask
    fn mask(self) -> u32 {
        (1 << (self.0 as u32)) - 1
    }
}

/// Code type
type Code = u16;

/// Size of code dictionary
const TABLE_SZ: usize = Bits::MAX.entries();

/// Largest minimum code size which leaves room for clear and end codes
pub const MAX_MIN_CODE_BITS: u8 = Bits::MAX.0 - 1;

/// LZW Data Decompressor
///
/// Dictionary entries are stored in a fixed-size table, linked to their
/// prefix by code.  Entries are only appended until a clear code resets the
/// next available code.
pub struct Decompressor {
    /// Prefix code of each entry
    prefix: [Code; TABLE_SZ],
    /// Last byte of each entry
    suffix: [u8; TABLE_SZ],
    /// Decoded bytes of the current code (reversed)
    stack: Vec<u8>,
    /// Minimum code bits
    min_code_bits: u8,
    /// Current code bits
    code_bits: Bits,
    /// Next available code
    next_code: Code,
    /// Last code
    last: Option<Code>,
    /// First byte of last decoded string
    first: u8,
    /// Accumulated code bits (LSB first)
    datum: u32,
    /// Number of bits in datum
    n_bits: u8,
}

impl Decompressor {
    /// Create a new decompressor
    ///
    /// # Panics
    ///
    /// If `min_code_bits` is greater than `MAX_MIN_CODE_BITS`.
    pub fn new(min_code_bits: u8) -> Self {
        assert!(min_code_bits <= MAX_MIN_CODE_BITS);
        let mut suffix = [0; TABLE_SZ];
        for (i, s) in suffix.iter_mut().enumerate().take(1 << min_code_bits) {
            *s = i as u8;
        }
        let mut dec = Decompressor {
            prefix: [0; TABLE_SZ],
            suffix,
            stack: Vec::with_capacity(TABLE_SZ),
            min_code_bits,
            code_bits: Bits::from(min_code_bits + 1),
            next_code: 0,
            last: None,
            first: 0,
            datum: 0,
            n_bits: 0,
        };
        dec.reset();
        dec
    }

    /// Get the clear code
    fn clear_code(&self) -> Code {
        1 << self.min_code_bits
    }

    /// Get the end code
    fn end_code(&self) -> Code {
        self.clear_code() + 1
    }

    /// Reset the dictionary
    fn reset(&mut self) {
        self.code_bits = Bits::from(self.min_code_bits + 1);
        self.next_code = self.end_code() + 1;
        self.last = None;
    }

    /// Unpack one code from the input bytes
    fn unpack<'a, I>(&mut self, bytes: &mut I) -> Option<Code>
    where
        I: Iterator<Item = &'a u8>,
    {
        let bits = u8::from(self.code_bits);
        while self.n_bits < bits {
            let byte = bytes.next()?;
            self.datum |= (*byte as u32) << self.n_bits;
            self.n_bits += 8;
        }
        let code = (self.datum & self.code_bits.mask()) as Code;
        self.datum >>= bits;
        self.n_bits -= bits;
        Some(code)
    }

    /// Decompress a buffer into exactly `n_pixels` indices.
    ///
    /// Decoding stops at an end code, an invalid code or the end of input;
    /// any indices not yet produced are left as zero.
    pub fn decompress(&mut self, bytes: &[u8], n_pixels: usize) -> Vec<u8> {
        let mut indices = Vec::with_capacity(n_pixels);
        let mut bytes = bytes.iter();
        while indices.len() < n_pixels {
            if self.stack.is_empty() {
                let code = match self.unpack(&mut bytes) {
                    Some(code) => code,
                    None => {
                        warn!("LZW data ended at {} of {}", indices.len(),
                            n_pixels);
                        break;
                    }
                };
                if !self.decompress_code(code) {
                    break;
                }
            }
            // drain in reverse, restoring forward order
            if let Some(idx) = self.stack.pop() {
                indices.push(idx);
            }
        }
        self.stack.clear();
        indices.resize(n_pixels, 0);
        indices
    }

    /// Decompress one code onto the stack (reversed).
    ///
    /// Returns `false` when decoding must stop.
    fn decompress_code(&mut self, code: Code) -> bool {
        if code == self.clear_code() {
            self.reset();
            return true;
        }
        if code > self.next_code || code == self.end_code() {
            return false;
        }
        let last = match self.last {
            Some(last) => last,
            None => {
                if code >= self.clear_code() {
                    // a string code with no dictionary behind it
                    return false;
                }
                self.first = self.suffix[code as usize];
                self.stack.push(self.first);
                self.last = Some(code);
                return true;
            }
        };
        let mut c = code;
        if c == self.next_code {
            self.stack.push(self.first);
            c = last;
        }
        while c > self.clear_code() {
            self.stack.push(self.suffix[c as usize]);
            c = self.prefix[c as usize];
        }
        self.first = self.suffix[c as usize];
        self.stack.push(self.first);
        self.push_entry(last);
        self.last = Some(code);
        true
    }

    /// Push a new dictionary entry
    fn push_entry(&mut self, prefix: Code) {
        let next = self.next_code as usize;
        if next < TABLE_SZ {
            self.prefix[next] = prefix;
            self.suffix[next] = self.first;
            self.next_code += 1;
            let next = self.next_code as usize;
            if next == self.code_bits.entries() && next < TABLE_SZ {
                self.code_bits = Bits::from(u8::from(self.code_bits) + 1);
            }
        }
    }
}

/// Decode LZW compressed data into exactly `n_pixels` color indices.
///
/// Never fails: a code size too large for the 12-bit code space, or data
/// which runs out early, yields zero-filled indices.
pub fn decode(min_code_bits: u8, bytes: &[u8], n_pixels: usize) -> Vec<u8> {
    if min_code_bits > MAX_MIN_CODE_BITS {
        warn!("LZW minimum code size too large: {}", min_code_bits);
        return vec![0; n_pixels];
    }
    Decompressor::new(min_code_bits).decompress(bytes, n_pixels)
}
