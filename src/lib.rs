// lib.rs      gifdec crate.
//
// Copyright (c) 2019-2025  Douglas Lau
//
//! GIF decoding into RGBA frames.
//!
//! An entire GIF file is decoded in a single pass over an in-memory buffer.
//! Each image block is decompressed and resolved against its color table,
//! producing one [ImageBlock] per frame in file order.
//!
//! [ImageBlock]: block/struct.ImageBlock.html
#![forbid(unsafe_code)]

#[macro_use]
extern crate log;

pub mod block;
mod cursor;
mod decode;
mod error;
pub mod lzw;
mod private;

pub use crate::block::{Gif, ImageBlock};
pub use crate::error::{Error, Result};
pub use crate::private::{parse, Decoder};
