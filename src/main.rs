// main.rs      gifdec command
//
// Copyright (c) 2019-2025  Douglas Lau
//
#![forbid(unsafe_code)]

use clap::{App, Arg};
use gifdec::{Gif, ImageBlock};
use std::error::Error;
use std::io::Write;
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::builder().format_timestamp(None).init();
    let matches = App::new("gifdec")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Decode GIF files into RGBA frames")
        .arg(
            Arg::with_name("max")
                .short("m")
                .long("max-image-sz")
                .takes_value(true)
                .help("Maximum pixels per image block"),
        )
        .arg(
            Arg::with_name("file")
                .required(true)
                .multiple(true)
                .help("GIF file(s) to decode"),
        )
        .get_matches();
    let max_image_sz = match matches.value_of("max") {
        Some(m) => Some(m.parse::<usize>()?),
        None => Some(1 << 25),
    };
    let dec = gifdec::Decoder::new().max_image_sz(max_image_sz);
    let mut out = StandardStream::stdout(ColorChoice::Auto);
    let mut red = ColorSpec::new();
    red.set_fg(Some(Color::Red)).set_intense(true);
    if let Some(paths) = matches.values_of("file") {
        for path in paths {
            match load(&dec, path) {
                Ok(gif) => show(&mut out, path, &gif)?,
                Err(e) => {
                    out.set_color(&red)?;
                    writeln!(out, "{}: {}", path, e)?;
                }
            }
        }
    }
    out.reset()?;
    Ok(())
}

/// Load and decode a GIF file
fn load(dec: &gifdec::Decoder, path: &str) -> gifdec::Result<Gif> {
    let bytes = std::fs::read(path)?;
    dec.decode(&bytes)
}

fn show(
    out: &mut StandardStream,
    path: &str,
    gif: &Gif,
) -> Result<(), Box<dyn Error>> {
    let mut magenta = ColorSpec::new();
    magenta.set_fg(Some(Color::Magenta));
    let mut yellow = ColorSpec::new();
    yellow.set_fg(Some(Color::Yellow)).set_intense(true);
    let mut cyan = ColorSpec::new();
    cyan.set_fg(Some(Color::Cyan)).set_intense(true);
    let mut bold = ColorSpec::new();
    bold.set_fg(Some(Color::White))
        .set_intense(true)
        .set_bold(true);
    let frame_digits = digits(gif.image_blocks.len()).max(3);
    let size_digits =
        4.max(1 + digits(gif.width as usize) + digits(gif.height as usize));
    out.set_color(&magenta)?;
    writeln!(out, "{}", path)?;
    out.set_color(&bold)?;
    write!(
        out,
        "{}x{}, frames: {}",
        gif.width,
        gif.height,
        gif.image_blocks.len()
    )?;
    if let Some(c) = gif.loop_count {
        write!(out, ", repeat: ")?;
        if c == 0 {
            write!(out, "∞")?;
        } else {
            write!(out, "{}", c)?;
        }
    }
    writeln!(out)?;
    out.set_color(&cyan)?;
    for cmt in &gif.comments {
        for l in cmt.split('\n') {
            let l = l.trim();
            if !l.is_empty() {
                writeln!(out, "  # {}", l)?;
            }
        }
    }
    out.set_color(&yellow)?;
    write!(out, "{:>w$}", "Fr#", w = frame_digits)?;
    write!(out, "  Delay")?;
    write!(out, " {:>w$}", "Size", w = size_digits)?;
    write!(out, " {:>w$}", "X,Y", w = size_digits)?;
    writeln!(out, "    Trn")?;
    for (n, block) in gif.image_blocks.iter().enumerate() {
        write_block(out, gif, block, n, frame_digits, size_digits)?;
    }
    Ok(())
}

fn write_block(
    out: &mut StandardStream,
    gif: &Gif,
    block: &ImageBlock,
    number: usize,
    frame_digits: usize,
    size_digits: usize,
) -> Result<(), Box<dyn Error>> {
    let mut dflt = ColorSpec::new();
    dflt.set_fg(Some(Color::White));
    let mut bold = ColorSpec::new();
    bold.set_fg(Some(Color::White))
        .set_intense(true)
        .set_bold(true);
    out.set_color(&bold)?;
    write!(out, "{:>w$}", number, w = frame_digits)?;
    let d = block.delay_time_cs.unwrap_or_default();
    if d == 0 {
        out.set_color(&dflt)?;
    }
    write!(out, " {:6.2}", d as f32 / 100f32)?;
    if gif.width == block.width && gif.height == block.height {
        out.set_color(&dflt)?;
    } else {
        out.set_color(&bold)?;
    }
    write!(
        out,
        " {:>w$}",
        &format!("{}x{}", block.width, block.height),
        w = size_digits
    )?;
    if block.left == 0 && block.top == 0 {
        out.set_color(&dflt)?;
    } else {
        out.set_color(&bold)?;
    }
    write!(
        out,
        " {:>w$}",
        &format!("{},{}", block.left, block.top),
        w = size_digits
    )?;
    // count fully transparent pixels
    let trn = block.colors.chunks_exact(4).filter(|c| c[3] == 0).count();
    if trn == 0 {
        out.set_color(&dflt)?;
    } else {
        out.set_color(&bold)?;
    }
    writeln!(out, " {:>6}", trn)?;
    Ok(())
}

fn digits(v: usize) -> usize {
    match v {
        0..=9 => 1,
        10..=99 => 2,
        100..=999 => 3,
        1000..=9999 => 4,
        _ => 5,
    }
}
