#![no_main]

use libfuzzer_sys::fuzz_target;
use quickpick::command::{parse_command, PickCommand};

fuzz_target!(|data: &str| {
    // Parsing never fails; segment access past the end must not panic
    let command = parse_command(data);
    for k in 0..=command.filters().len() {
        let _ = command.column_filter(k);
    }

    assert!(command.is_filter_equal(&command));

    if let Some(code) = command.fast_select_code() {
        assert!(command.is_fast_select());
        assert!(!code.is_empty());
        assert_eq!(code, code.to_ascii_uppercase());
    }
});
