// decode.rs
//
// Copyright (c) 2019-2025  Douglas Lau
//
//! GIF file decoding
use crate::block::*;
use crate::cursor::Cursor;
use crate::error::{Error, Result};
use crate::lzw;
use pix::rgb::Rgb;

/// Length of signature + version
const HEADER_SZ: usize = 6;

/// Length of fixed plain text extension fields
const PLAIN_TEXT_SZ: usize = 12;

/// Length of application identifier + authentication code
const APPLICATION_SZ: usize = 11;

/// State of one parse of a GIF buffer
pub(crate) struct Parser<'a> {
    /// Read cursor
    cursor: Cursor<'a>,
    /// Maximum image size, in pixels
    max_image_sz: Option<usize>,
    /// Global color table
    global_color_table: Option<ColorTable>,
    /// Graphic control for the next image block
    graphic_control_ext: Option<GraphicControl>,
    /// Decoded file
    gif: Gif,
}

impl<'a> Parser<'a> {
    /// Create a parser for a buffer
    pub fn new(buf: &'a [u8], max_image_sz: Option<usize>) -> Self {
        Parser {
            cursor: Cursor::new(buf),
            max_image_sz,
            global_color_table: None,
            graphic_control_ext: None,
            gif: Gif::default(),
        }
    }

    /// Parse the entire buffer
    pub fn parse(mut self) -> Result<Gif> {
        self.parse_header()?;
        loop {
            let pos = self.cursor.pos();
            let t = self.cursor.read_u8()?;
            let bc = BlockCode::from_u8(t).ok_or(Error::InvalidBlockCode(t))?;
            debug!("  block  : {:?} @ {}", bc, pos);
            match bc {
                BlockCode::Trailer_ => break,
                BlockCode::ImageDesc_ => {
                    let block = self.decode_image_block()?;
                    self.gif.image_blocks.push(block);
                }
                BlockCode::Extension_ => self.decode_extension()?,
            }
        }
        Ok(self.gif)
    }

    /// Parse header, logical screen descriptor and global color table
    fn parse_header(&mut self) -> Result<()> {
        let header = self.cursor.read_bytes(HEADER_SZ)?;
        debug!("header: {:?}", String::from_utf8_lossy(header));
        let desc = LogicalScreenDesc::read(&mut self.cursor)?;
        self.gif.width = desc.screen_width;
        self.gif.height = desc.screen_height;
        if desc.has_color_table() {
            let tbl =
                ColorTable::read(&mut self.cursor, desc.color_table_size())?;
            debug!("global color table: {}", tbl.len());
            self.global_color_table = Some(tbl);
        }
        Ok(())
    }

    /// Decode an extension block (after the introducer)
    fn decode_extension(&mut self) -> Result<()> {
        use crate::block::ExtensionCode::*;
        let et: ExtensionCode = self.cursor.read_u8()?.into();
        debug!("extension: {:?}", et);
        match et {
            GraphicControl_ => self.decode_graphic_control(),
            Comment_ => self.decode_comment(),
            PlainText_ => self.decode_plain_text(),
            Application_ => self.decode_application(),
            Unknown_(n) => {
                let sz = self.cursor.skip_sub_blocks()?;
                warn!("Unknown extension {:#04X}: {} bytes skipped", n, sz);
                Ok(())
            }
        }
    }

    /// Decode a graphic control extension
    fn decode_graphic_control(&mut self) -> Result<()> {
        let sz = self.cursor.read_u8()?;
        if sz != GraphicControl::BLOCK_SZ {
            return Err(Error::MalformedGraphicControlExtension);
        }
        let buf = self.cursor.read_bytes(sz.into())?;
        let gc = GraphicControl::from_buf(buf);
        if self.cursor.read_u8()? != 0 {
            return Err(Error::MalformedGraphicControlExtension);
        }
        if self.graphic_control_ext.is_some() {
            warn!("Graphic control extension replaced before use");
        }
        self.graphic_control_ext = Some(gc);
        Ok(())
    }

    /// Decode a comment extension
    fn decode_comment(&mut self) -> Result<()> {
        let mut comment = vec![];
        self.cursor
            .read_sub_blocks(|b| comment.extend_from_slice(b))?;
        self.gif
            .comments
            .push(String::from_utf8_lossy(&comment).into_owned());
        Ok(())
    }

    /// Decode a plain text extension
    fn decode_plain_text(&mut self) -> Result<()> {
        let _sz = self.cursor.read_u8()?;
        let _grid_cell_colors = self.cursor.read_bytes(PLAIN_TEXT_SZ)?;
        let sz = self.cursor.skip_sub_blocks()?;
        debug!("plain text: {} bytes", sz);
        Ok(())
    }

    /// Decode an application extension
    fn decode_application(&mut self) -> Result<()> {
        let _sz = self.cursor.read_u8()?;
        let app_id = self.cursor.read_bytes(APPLICATION_SZ)?;
        let mut sub_blocks: Vec<&[u8]> = vec![];
        self.cursor.read_sub_blocks(|b| sub_blocks.push(b))?;
        if is_looping(app_id) {
            if let &[&[1, lo, hi]] = sub_blocks.as_slice() {
                let count = (hi as u16) << 8 | lo as u16;
                debug!("loop count: {}", count);
                self.gif.loop_count = Some(count);
            }
        }
        Ok(())
    }

    /// Decode an image block (after the image separator)
    fn decode_image_block(&mut self) -> Result<ImageBlock> {
        let desc = ImageDesc::read(&mut self.cursor)?;
        let image_sz = desc.image_sz();
        if let Some(sz) = self.max_image_sz {
            if image_sz > sz {
                return Err(Error::TooLargeImage);
            }
        }
        let local_color_table = if desc.has_color_table() {
            let sz = desc.color_table_size();
            Some(ColorTable::read(&mut self.cursor, sz)?)
        } else {
            None
        };
        if desc.interlaced() {
            debug!("interlaced image: rows kept in stream order");
        }
        let min_code_size = self.cursor.read_u8()?;
        if min_code_size > lzw::MAX_MIN_CODE_BITS {
            return Err(Error::InvalidCodeSize(min_code_size));
        }
        let mut data = vec![];
        self.cursor.read_sub_blocks(|b| data.extend_from_slice(b))?;
        debug!(
            "image: {}x{} @ {},{}, {} bytes",
            desc.width,
            desc.height,
            desc.left,
            desc.top,
            data.len()
        );
        let indices = lzw::decode(min_code_size, &data, image_sz);
        let table = local_color_table
            .as_ref()
            .or(self.global_color_table.as_ref());
        let graphic_control_ext = self.graphic_control_ext.take();
        let transparent_color =
            graphic_control_ext.and_then(|gc| gc.transparent_color());
        let colors = resolve_colors(&indices, table, transparent_color)?;
        Ok(ImageBlock {
            left: desc.left,
            top: desc.top,
            width: desc.width,
            height: desc.height,
            colors,
            delay_time_cs: graphic_control_ext.map(|gc| gc.delay_time_cs()),
        })
    }
}

/// Check if an application ID / auth code is for a looping extension
fn is_looping(app_id: &[u8]) -> bool {
    app_id == b"NETSCAPE2.0" || app_id == b"ANIMEXTS1.0"
}

/// Resolve color indices to RGBA colors
fn resolve_colors(
    indices: &[u8],
    table: Option<&ColorTable>,
    transparent_color: Option<u8>,
) -> Result<Vec<u8>> {
    let mut colors = Vec::with_capacity(indices.len() * 4);
    for &idx in indices {
        let table = table.ok_or(Error::MissingColorTable)?;
        let clr = table.entry(idx.into()).ok_or(Error::IndexOutOfRange {
            index: idx,
            len: table.len(),
        })?;
        let alpha = if transparent_color == Some(idx) { 0 } else { 255 };
        colors.push(u8::from(Rgb::red(clr)));
        colors.push(u8::from(Rgb::green(clr)));
        colors.push(u8::from(Rgb::blue(clr)));
        colors.push(alpha);
    }
    Ok(colors)
}
