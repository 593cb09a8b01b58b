mod boundaries;

/// Number of generated cases per quickcheck property.
pub(crate) fn property_test_count() -> u64 {
    if cfg!(miri) {
        10
    } else if cfg!(feature = "test-fast") {
        100
    } else if is_ci::cached() {
        10_000
    } else {
        1_000
    }
}
