// block.rs
//
// Copyright (c) 2019-2025  Douglas Lau
//
//! GIF blocks and decoded frames
use crate::cursor::{bit_field, Cursor};
use crate::error::Result;
use pix::rgb::{SRgb8, SRgba8};
use pix::Raster;

/// Number of channels in a color table entry
const CHANNELS: usize = 3;

/// Block code (signature byte)
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) enum BlockCode {
    ImageDesc_,
    Extension_,
    Trailer_,
}

impl BlockCode {
    pub fn from_u8(t: u8) -> Option<Self> {
        use self::BlockCode::*;
        match t {
            b',' => Some(ImageDesc_), // (0x2C) Image separator
            b'!' => Some(Extension_), // (0x21) Extension introducer
            b';' => Some(Trailer_),   // (0x3B) GIF trailer
            _ => None,
        }
    }
}

/// Extension label
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) enum ExtensionCode {
    PlainText_,
    GraphicControl_,
    Comment_,
    Application_,
    Unknown_(u8),
}

impl From<u8> for ExtensionCode {
    fn from(n: u8) -> Self {
        use self::ExtensionCode::*;
        match n {
            0x01 => PlainText_,
            0xF9 => GraphicControl_,
            0xFE => Comment_,
            0xFF => Application_,
            _ => Unknown_(n),
        }
    }
}

/// Color table (palette of RGB entries)
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ColorTable {
    colors: Vec<SRgb8>,
}

impl ColorTable {
    /// Get the number of entries for a packed table size field
    pub fn table_len(size_bits: u8) -> usize {
        2 << (size_bits & 0b0111)
    }

    /// Create a color table from RGB triples
    pub fn with_colors(colors: &[u8]) -> Self {
        assert_eq!(colors.len() % CHANNELS, 0);
        let colors = colors
            .chunks_exact(CHANNELS)
            .map(|c| SRgb8::new(c[0], c[1], c[2]))
            .collect();
        ColorTable { colors }
    }

    /// Read a color table with a packed table size field
    pub(crate) fn read(cursor: &mut Cursor, size_bits: u8) -> Result<Self> {
        let len = Self::table_len(size_bits);
        Ok(Self::with_colors(cursor.read_bytes(len * CHANNELS)?))
    }

    /// Get the number of entries
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Check if the table is empty
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Get an entry
    pub fn entry(&self, idx: usize) -> Option<SRgb8> {
        self.colors.get(idx).copied()
    }

    /// Get all entries
    pub fn colors(&self) -> &[SRgb8] {
        &self.colors
    }
}

/// Logical screen descriptor
#[derive(Debug, Default)]
pub(crate) struct LogicalScreenDesc {
    pub screen_width: u16,
    pub screen_height: u16,
    flags: u8,
}

impl LogicalScreenDesc {
    /// Read a logical screen descriptor
    pub fn read(cursor: &mut Cursor) -> Result<Self> {
        let screen_width = cursor.read_le16()?;
        let screen_height = cursor.read_le16()?;
        let flags = cursor.read_u8()?;
        let _bg_color = cursor.read_u8()?;
        let _aspect = cursor.read_u8()?;
        Ok(LogicalScreenDesc {
            screen_width,
            screen_height,
            flags,
        })
    }

    /// Check if a global color table follows
    pub fn has_color_table(&self) -> bool {
        bit_field(self.flags, 8, 1) != 0
    }

    /// Get the color table size field
    pub fn color_table_size(&self) -> u8 {
        bit_field(self.flags, 3, 3)
    }
}

/// Graphic control extension
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GraphicControl {
    flags: u8,
    delay_time_cs: u16, // delay in centiseconds (hundredths of a second)
    transparent_color_idx: u8,
}

impl GraphicControl {
    /// Block size of graphic control extension
    pub(crate) const BLOCK_SZ: u8 = 4;

    /// Create a graphic control extension
    pub fn new(
        transparent_color: Option<u8>,
        delay_time_cs: u16,
    ) -> Self {
        GraphicControl {
            flags: transparent_color.is_some() as u8,
            delay_time_cs,
            transparent_color_idx: transparent_color.unwrap_or_default(),
        }
    }

    /// Decode from the fixed fields of a graphic control extension
    pub(crate) fn from_buf(buf: &[u8]) -> Self {
        debug_assert_eq!(buf.len(), Self::BLOCK_SZ as usize);
        GraphicControl {
            flags: buf[0],
            delay_time_cs: (buf[2] as u16) << 8 | buf[1] as u16,
            transparent_color_idx: buf[3],
        }
    }

    /// Get the delay time in centiseconds
    pub fn delay_time_cs(&self) -> u16 {
        self.delay_time_cs
    }

    /// Get the transparent color index
    pub fn transparent_color(&self) -> Option<u8> {
        match bit_field(self.flags, 1, 1) {
            0 => None,
            _ => Some(self.transparent_color_idx),
        }
    }
}

/// Image descriptor
#[derive(Debug, Default)]
pub(crate) struct ImageDesc {
    pub left: u16,
    pub top: u16,
    pub width: u16,
    pub height: u16,
    flags: u8,
}

impl ImageDesc {
    /// Read an image descriptor (after the image separator)
    pub fn read(cursor: &mut Cursor) -> Result<Self> {
        let left = cursor.read_le16()?;
        let top = cursor.read_le16()?;
        let width = cursor.read_le16()?;
        let height = cursor.read_le16()?;
        let flags = cursor.read_u8()?;
        Ok(ImageDesc {
            left,
            top,
            width,
            height,
            flags,
        })
    }

    /// Check if a local color table follows
    pub fn has_color_table(&self) -> bool {
        bit_field(self.flags, 8, 1) != 0
    }

    /// Check if the image is interlaced (rows are not reordered)
    pub fn interlaced(&self) -> bool {
        bit_field(self.flags, 7, 1) != 0
    }

    /// Get the color table size field
    pub fn color_table_size(&self) -> u8 {
        bit_field(self.flags, 3, 3)
    }

    /// Get the image size in pixels
    pub fn image_sz(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

/// One decoded image block (frame)
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ImageBlock {
    /// Left position on logical screen
    pub left: u16,
    /// Top position on logical screen
    pub top: u16,
    /// Width in pixels
    pub width: u16,
    /// Height in pixels
    pub height: u16,
    /// RGBA colors, row-major (`width * height * 4` bytes)
    pub colors: Vec<u8>,
    /// Delay from preceding graphic control extension
    pub delay_time_cs: Option<u16>,
}

impl ImageBlock {
    /// Get the number of pixels
    pub fn len(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Check if the block has no pixels
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Get the RGBA color of one pixel
    pub fn pixel(&self, x: u16, y: u16) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        let c = self.colors.get(i..i + 4)?;
        Some([c[0], c[1], c[2], c[3]])
    }

    /// Make a raster of the block colors
    pub fn to_raster(&self) -> Raster<SRgba8> {
        Raster::with_u8_buffer(
            self.width.into(),
            self.height.into(),
            self.colors.clone(),
        )
    }
}

/// Decoded GIF animation
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Gif {
    /// Logical screen width
    pub width: u16,
    /// Logical screen height
    pub height: u16,
    /// Image blocks, in animation order
    pub image_blocks: Vec<ImageBlock>,
    /// Animation loop count (zero means loop forever)
    pub loop_count: Option<u16>,
    /// Comment extension text
    pub comments: Vec<String>,
}

#[cfg(test)]
mod test {
    use super::*;
    use pix::rgb::Rgb;

    #[test]
    fn color_table_len() {
        let lens: Vec<usize> = (0..8).map(ColorTable::table_len).collect();
        assert_eq!(lens, [2, 4, 8, 16, 32, 64, 128, 256]);
    }

    #[test]
    fn read_color_table() -> Result<()> {
        let buf = [255, 0, 0, 0, 255, 0, 7];
        let mut c = Cursor::new(&buf);
        let tbl = ColorTable::read(&mut c, 0)?;
        assert_eq!(tbl.len(), 2);
        assert_eq!(tbl.entry(1), Some(SRgb8::new(0, 255, 0)));
        assert_eq!(tbl.entry(2), None);
        assert_eq!(u8::from(Rgb::red(tbl.colors()[0])), 255);
        assert_eq!(c.pos(), 6);
        let mut c = Cursor::new(&buf);
        assert!(ColorTable::read(&mut c, 1).is_err());
        Ok(())
    }

    #[test]
    fn screen_desc_flags() -> Result<()> {
        let buf = [0x0A, 0x00, 0x0B, 0x00, 0b1111_0010, 0, 0];
        let desc = LogicalScreenDesc::read(&mut Cursor::new(&buf))?;
        assert_eq!(desc.screen_width, 10);
        assert_eq!(desc.screen_height, 11);
        assert!(desc.has_color_table());
        assert_eq!(desc.color_table_size(), 2);
        Ok(())
    }

    #[test]
    fn image_desc_flags() -> Result<()> {
        let buf = [1, 0, 2, 0, 3, 0, 4, 0, 0b0100_0101];
        let desc = ImageDesc::read(&mut Cursor::new(&buf))?;
        assert_eq!((desc.left, desc.top), (1, 2));
        assert_eq!(desc.image_sz(), 12);
        assert!(!desc.has_color_table());
        assert!(desc.interlaced());
        assert_eq!(desc.color_table_size(), 5);
        Ok(())
    }

    #[test]
    fn transparent_color() {
        let gc = GraphicControl::from_buf(&[0b0000_1001, 10, 0, 3]);
        assert_eq!(gc.transparent_color(), Some(3));
        assert_eq!(gc.delay_time_cs(), 10);
        let gc = GraphicControl::from_buf(&[0b0000_1000, 0, 1, 3]);
        assert_eq!(gc.transparent_color(), None);
        assert_eq!(gc.delay_time_cs(), 256);
        assert_eq!(GraphicControl::new(Some(5), 0).transparent_color(), Some(5));
    }

    #[test]
    fn block_pixel() {
        let block = ImageBlock {
            width: 2,
            height: 1,
            colors: vec![1, 2, 3, 255, 4, 5, 6, 0],
            ..Default::default()
        };
        assert_eq!(block.pixel(1, 0), Some([4, 5, 6, 0]));
        assert_eq!(block.pixel(2, 0), None);
        let raster = block.to_raster();
        assert_eq!(raster.width(), 2);
        assert_eq!(u8::from(Rgb::green(raster.pixel(0, 0))), 2);
    }
}
