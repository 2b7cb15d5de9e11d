#![no_main]

use bif_wire::{ByteCursor, FieldHeader};
use libfuzzer_sys::fuzz_target;

// Fuzz target: FieldHeader::read_from.
//
// A header that parses must have consumed the marker, type byte, both
// separators and a non-empty name, and the reported offsets must line up.
fuzz_target!(|data: &[u8]| {
    let mut cursor = ByteCursor::new(data);
    match FieldHeader::read_from(&mut cursor) {
        Ok(header) => {
            assert!(!header.name.is_empty());
            assert_eq!(header.name_offset, header.start + 3);
            assert_eq!(header.payload_offset, header.name_offset + header.name.len() + 1);
            assert_eq!(cursor.position(), header.payload_offset);
        }
        Err(error) => assert!(error.offset() <= data.len()),
    }
});
