//! Property-based tests for the byte transform and the collision resolver.

use proptest::prelude::*;
use std::collections::HashSet;

use xor_sweep::engine::{next_candidate, transform_with_chunk_size, xor_in_place};
use xor_sweep::{CollisionPolicy, resolve_output_name, transform};

fn any_data() -> impl Strategy<Value = Vec<u8>> {
    proptest::collection::vec(any::<u8>(), 0..8192)
}

/// Names shaped like real files: stem, optional digit run, optional extension.
fn any_file_name() -> impl Strategy<Value = String> {
    "[a-z]{1,6}[0-9]{0,3}(\\.[a-z]{1,3})?"
}

proptest! {
    #[test]
    fn xor_twice_is_identity(data in any_data(), mask in any::<u8>()) {
        let mut once = Vec::new();
        transform(data.as_slice(), &mut once, mask).unwrap();
        let mut twice = Vec::new();
        transform(once.as_slice(), &mut twice, mask).unwrap();
        prop_assert_eq!(twice, data);
    }

    #[test]
    fn output_length_and_bytes_follow_input(
        data in any_data(),
        mask in any::<u8>(),
        chunk in 1usize..300,
    ) {
        let mut out = Vec::new();
        let n = transform_with_chunk_size(data.as_slice(), &mut out, mask, chunk).unwrap();
        prop_assert_eq!(n, data.len() as u64);
        prop_assert_eq!(out.len(), data.len());
        for (o, i) in out.iter().zip(&data) {
            prop_assert_eq!(*o, *i ^ mask);
        }
    }

    #[test]
    fn in_place_matches_streaming(data in any_data(), mask in any::<u8>()) {
        let mut streamed = Vec::new();
        transform(data.as_slice(), &mut streamed, mask).unwrap();
        let mut buf = data.clone();
        xor_in_place(&mut buf, mask);
        prop_assert_eq!(buf, streamed);
    }

    #[test]
    fn counter_result_is_never_taken(
        desired in any_file_name(),
        steps in 0usize..6,
        extra in proptest::collection::hash_set(any_file_name(), 0..8),
    ) {
        // Occupy the first few names the counter would walk through, plus noise.
        let mut existing: HashSet<String> = extra;
        let mut name = desired.clone();
        for _ in 0..steps {
            existing.insert(name.clone());
            name = next_candidate(&name);
        }

        let got = resolve_output_name(&desired, &existing, CollisionPolicy::AppendCounter);
        prop_assert!(!existing.contains(&got));
        if !existing.contains(&desired) {
            prop_assert_eq!(&got, &desired);
        }
        // A free name resolves to itself.
        prop_assert_eq!(
            resolve_output_name(&got, &existing, CollisionPolicy::AppendCounter),
            got.clone()
        );
    }

    #[test]
    fn counter_keeps_the_extension(desired in "[a-z]{1,6}[0-9]{0,3}\\.[a-z]{1,3}") {
        let ext = desired.rsplit('.').next().unwrap().to_string();
        let next = next_candidate(&desired);
        prop_assert_ne!(&next, &desired);
        let suffix = format!(".{ext}");
        prop_assert!(next.ends_with(&suffix));
    }

    #[test]
    fn overwrite_always_keeps_the_name(
        desired in any_file_name(),
        extra in proptest::collection::hash_set(any_file_name(), 0..8),
    ) {
        let mut existing = extra;
        existing.insert(desired.clone());
        prop_assert_eq!(
            resolve_output_name(&desired, &existing, CollisionPolicy::Overwrite),
            desired
        );
    }
}
