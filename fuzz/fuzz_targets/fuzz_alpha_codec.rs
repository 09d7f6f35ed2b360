#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use quickpick::utils::{from_alpha, to_alpha, AlphaCodec};

#[derive(Debug, Arbitrary)]
struct Input {
    capacity: u16,
    min_width: u8,
    row: u16,
    code: String,
}

fuzz_target!(|input: Input| {
    // Arbitrary strings must decode or be rejected, never panic
    let _ = from_alpha(&input.code);

    let value = input.row as usize;
    if value > 0 {
        assert_eq!(from_alpha(&to_alpha(value)), Some(value));
    }

    let capacity = input.capacity as usize;
    let codec = AlphaCodec::with_min_width(capacity, (input.min_width % 4) as usize);
    let _ = codec.decode(&input.code);

    if (1..=capacity).contains(&value) {
        let code = codec.encode(value).expect("row within capacity has a code");
        assert_eq!(code.len(), codec.width());
        assert_eq!(codec.decode(&code), Some(value));
    }
});
