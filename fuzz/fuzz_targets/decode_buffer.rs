#![no_main]

use bif_decoder::{BifDecoder, ParseProcess};
use bif_driver::{DriverError, IncrementalParser};
use libfuzzer_sys::fuzz_target;

// Fuzz target: whole-buffer decoding through every synchronous driver.
//
// Catches bugs in:
// - Blob lengths that overrun or overflow the cursor
// - Unterminated names and int values at end of input
// - Drivers disagreeing on the same input
// - Offsets moving backwards between steps
fuzz_target!(|data: &[u8]| {
    let complete = BifDecoder::decode(data);

    let mut process = ParseProcess::new(data.to_vec());
    let mut last_offset = 0;
    while !process.step() {
        assert!(process.offset() > last_offset, "cursor did not advance");
        last_offset = process.offset();
    }
    assert_eq!(process.finish(), complete);

    let mut parser = IncrementalParser::new(data.to_vec());
    while !parser.tick().is_final() {}
    assert_eq!(
        parser.current_result(),
        Some(complete.map_err(DriverError::from))
    );
});
