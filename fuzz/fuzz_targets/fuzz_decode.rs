#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Must never panic, with or without limits
    let _ = zenbmp::decode(data);

    let limits = zenbmp::Limits {
        max_memory_bytes: Some(64 << 20),
        ..Default::default()
    };
    let _ = zenbmp::DecodeRequest::new(data).with_limits(&limits).decode();
});
