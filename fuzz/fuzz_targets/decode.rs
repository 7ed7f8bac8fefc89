// cargo fuzz run decode corpus/decode -- -timeout=30

#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let dec = gifdec::Decoder::new().max_image_sz(Some(1 << 16));
    if let Ok(gif) = dec.decode(data) {
        for block in gif.image_blocks {
            assert_eq!(block.colors.len(), block.len() * 4);
        }
    }
});
