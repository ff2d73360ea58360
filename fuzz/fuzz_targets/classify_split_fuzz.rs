#![no_main]
use libfuzzer_sys::fuzz_target;
use rasterdelta::config::{CodecConfig, MCGA};
use rasterdelta::frame::FramePair;
use rasterdelta::io::build_priority_list;

fuzz_target!(|data: &[u8]| {
    if data.len() < 4 {
        return;
    }

    // First byte picks the min run length, the rest is the next frame.
    let min_run_length = usize::from(data[0] % 16);
    let next = &data[1..];
    let size = next.len();
    let prev = vec![0u8; size];
    let config = CodecConfig {
        buffer_size: size,
        min_run_length,
        interlace_compensation: data[0] & 0x80 != 0,
        ..MCGA
    };
    let frames = FramePair::new(&prev, next, size).unwrap();

    // Derive ranges from the frame bytes themselves.
    let ranges: Vec<(usize, usize)> = next
        .chunks(2)
        .filter(|c| c.len() == 2)
        .map(|c| {
            let start = usize::from(c[0]) % size;
            let end = (start + usize::from(c[1])).min(size - 1);
            (start, end)
        })
        .collect();

    let mut list = build_priority_list(&frames, &ranges, &config).unwrap();
    let bytes = list.total_bytes();
    let before = list.len();
    let multi = list.iter().filter(|d| d.byte_len() > 1).count();

    let split = list.split_all(&frames, &config).unwrap();
    assert_eq!(split, multi);
    assert_eq!(list.len(), before + multi);
    assert_eq!(list.total_bytes(), bytes);
});
