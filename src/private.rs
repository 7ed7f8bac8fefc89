// private.rs
//
// Copyright (c) 2019-2025  Douglas Lau
//
//! Private module for top-level items
use crate::block::Gif;
use crate::decode::Parser;
use crate::Result;

/// GIF decoder
///
/// Decodes an entire in-memory GIF file into a [Gif], with every image
/// block resolved to RGBA colors.
///
/// ## Example
/// ```
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// # let bytes = &[
/// #   0x47, 0x49, 0x46, 0x38, 0x39, 0x61, 0x02, 0x00,
/// #   0x01, 0x00, 0x80, 0x00, 0x00, 0xFF, 0x00, 0x00,
/// #   0x00, 0xFF, 0x00, 0x2C, 0x00, 0x00, 0x00, 0x00,
/// #   0x02, 0x00, 0x01, 0x00, 0x00, 0x02, 0x02, 0x44,
/// #   0x0A, 0x00, 0x3B,
/// # ][..];
/// // ... read a file into "bytes"
/// let gif = gifdec::Decoder::new().max_image_sz(Some(1 << 20)).decode(bytes)?;
/// for block in &gif.image_blocks {
///     println!("{}x{} @ {},{}", block.width, block.height, block.left,
///         block.top);
/// }
/// # assert_eq!(gif.image_blocks[0].colors, [255, 0, 0, 255, 0, 255, 0, 255]);
/// # Ok(())
/// # }
/// ```
///
/// [Gif]: block/struct.Gif.html
#[derive(Clone, Debug)]
pub struct Decoder {
    /// Maximum image size, in pixels
    max_image_sz: Option<usize>,
}

impl Default for Decoder {
    fn default() -> Self {
        Self::new()
    }
}

impl Decoder {
    /// Create a new GIF decoder.
    pub fn new() -> Self {
        Decoder {
            max_image_sz: Some(1 << 25),
        }
    }

    /// Set the maximum image block size (in pixels) to allow for decoding.
    pub fn max_image_sz(mut self, max_image_sz: Option<usize>) -> Self {
        self.max_image_sz = max_image_sz;
        self
    }

    /// Decode a GIF file from a buffer.
    pub fn decode(&self, bytes: &[u8]) -> Result<Gif> {
        Parser::new(bytes, self.max_image_sz).parse()
    }
}

/// Parse a GIF file with default settings.
///
/// Equivalent to `Decoder::new().decode(bytes)`.
pub fn parse(bytes: &[u8]) -> Result<Gif> {
    Decoder::new().decode(bytes)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::Error;

    const TINY: &[u8] = &[
        0x47, 0x49, 0x46, 0x38, 0x39, 0x61, 0x02, 0x00, 0x01, 0x00, 0x80,
        0x00, 0x00, 0xFF, 0x00, 0x00, 0x00, 0xFF, 0x00, 0x2C, 0x00, 0x00,
        0x00, 0x00, 0x02, 0x00, 0x01, 0x00, 0x00, 0x02, 0x02, 0x44, 0x0A,
        0x00, 0x3B,
    ];

    #[test]
    fn defaults() -> Result<()> {
        let gif = parse(TINY)?;
        assert_eq!((gif.width, gif.height), (2, 1));
        assert_eq!(gif, Decoder::default().decode(TINY)?);
        Ok(())
    }

    #[test]
    fn max_image_sz() -> Result<()> {
        let dec = Decoder::new().max_image_sz(Some(1));
        assert!(matches!(dec.decode(TINY), Err(Error::TooLargeImage)));
        let gif = Decoder::new().max_image_sz(None).decode(TINY)?;
        assert_eq!(gif.image_blocks.len(), 1);
        Ok(())
    }

    #[test]
    fn threads() {
        let handles: Vec<_> = (0..4)
            .map(|_| std::thread::spawn(|| parse(TINY).map(|g| g.image_blocks)))
            .collect();
        for h in handles {
            let blocks = h.join().unwrap().unwrap();
            assert_eq!(blocks[0].colors, [255, 0, 0, 255, 0, 255, 0, 255]);
        }
    }
}
