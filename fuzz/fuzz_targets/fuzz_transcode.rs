#![no_main]
use std::cell::RefCell;

use arbitrary::Unstructured;
use libfuzzer_sys::{fuzz_mutator, fuzz_target, fuzzer_mutate};
use rand::rngs::SmallRng; // faster than StdRng
use rand::{Rng, SeedableRng};
use unibridge::{Validation, fuzzing, utf8_to_utf16, utf16_to_utf8};

const HEADER: usize = 1; // 1 flag byte

thread_local! {
    // One SmallRng per thread, seeded once from the host OS
    static RNG: RefCell<SmallRng> =
        RefCell::new(SmallRng::from_os_rng());
}

/// Pieces that sit on encoding-width boundaries, plus ASCII runs long enough
/// to trigger the fast paths.
static EDGE_TABLE: &[&str] = &[
    "\u{0}",
    "\u{7F}",
    "\u{80}",
    "\u{7FF}",
    "\u{800}",
    "\u{D7FF}",
    "\u{E000}",
    "\u{FFFD}",
    "\u{FFFF}",
    "\u{10000}",
    "\u{1F4A1}",
    "\u{10FFFF}",
    "abcd",
    "name=",
];

/// Helper: borrow the thread-local RNG and run a closure with it.
fn with_rng<F, R>(f: F) -> R
where
    F: FnOnce(&mut SmallRng) -> R,
{
    RNG.with(|cell| f(&mut cell.borrow_mut()))
}

fn mutator(data: &mut [u8], size: usize, max_size: usize, seed: u32) -> usize {
    if max_size <= HEADER || (size >= HEADER && seed % 10 != 0) {
        return fuzzer_mutate(data, size, max_size);
    }

    data[0] = with_rng(|rng| rng.random::<u8>());
    let mut len = HEADER;

    loop {
        let piece = with_rng(|rng| EDGE_TABLE[rng.random_range(0..EDGE_TABLE.len())]);
        // Stop if this piece would overflow the caller's slice.
        if len + piece.len() > max_size {
            break;
        }
        data[len..len + piece.len()].copy_from_slice(piece.as_bytes());
        len += piece.len();
    }

    // Occasionally break a sequence so strict mode has something to reject.
    if data[0] & 0x80 != 0 && len > HEADER {
        let (at, byte) = with_rng(|rng| (rng.random_range(HEADER..len), rng.random::<u8>()));
        data[at] = byte;
    }

    len
}

fuzz_mutator!(|data: &mut [u8], size: usize, max_size: usize, seed: u32| {
    mutator(data, size, max_size, seed)
});

fn check_decode(bytes: &[u8], validation: Validation) {
    let decoded = utf8_to_utf16(bytes, validation);
    assert_eq!(
        decoded,
        fuzzing::utf8_to_utf16_scalar_path(bytes, validation),
        "fast path diverged"
    );

    match (std::str::from_utf8(bytes), &decoded) {
        (Ok(s), _) => assert_eq!(decoded, Ok(s.encode_utf16().collect())),
        (Err(_), Ok(units)) => {
            assert!(!validation.is_strict(), "strict accepted invalid UTF-8");
            assert!(units.len() <= bytes.len());
        }
        (Err(_), Err(_)) => assert!(validation.is_strict()),
    }
}

fn check_encode(units: &[u16], validation: Validation) {
    let encoded = utf16_to_utf8(units, validation);
    assert_eq!(
        encoded,
        fuzzing::utf16_to_utf8_scalar_path(units, validation),
        "fast path diverged"
    );

    match (String::from_utf16(units), &encoded) {
        (Ok(s), _) => assert_eq!(encoded, Ok(s.into_bytes())),
        (Err(_), Ok(bytes)) => {
            assert!(!validation.is_strict(), "strict accepted unpaired surrogate");
            // Trusted output is generalized UTF-8 and must come back unchanged.
            assert_eq!(utf8_to_utf16(bytes, Validation::Trusted).as_deref(), Ok(units));
        }
        (Err(_), Err(_)) => assert!(validation.is_strict()),
    }
}

fn transcode(data: &[u8]) {
    let Some((&flags, bytes)) = data.split_first() else {
        return;
    };
    let validation = Validation::from_strict(flags & 1 != 0);

    check_decode(bytes, validation);

    // The same bytes seen as UTF-16: raw units, and the units of the
    // (lossily) decoded text so that valid surrogate pairs are common.
    let raw: Vec<u16> = Unstructured::new(bytes).arbitrary().unwrap_or_default();
    check_encode(&raw, validation);
    let text: Vec<u16> = String::from_utf8_lossy(bytes).encode_utf16().collect();
    check_encode(&text, validation);
}

fuzz_target!(|data: &[u8]| transcode(data));
