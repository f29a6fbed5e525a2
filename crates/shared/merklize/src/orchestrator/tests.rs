use crate::{
    MerklizeError, Merklizer, MerklizerOptions, NODE_WORDS, Node, TreeLayout, merklize_sequential,
};
use std::num::NonZeroUsize;

fn leaves_words(leaf_count: usize) -> Vec<u32> {
    (0..leaf_count * NODE_WORDS)
        .map(|index| (index as u32).wrapping_mul(0x9e37_79b9))
        .collect()
}

fn merklizer(num_workers: usize, channel_capacity: usize) -> Merklizer {
    Merklizer::new(MerklizerOptions {
        num_workers: NonZeroUsize::new(num_workers).unwrap(),
        channel_capacity,
    })
}

#[test]
fn matches_sequential_construction() {
    for leaf_count in [2, 4, 8, 16, 64, 512] {
        let layout = TreeLayout::new(leaf_count).unwrap();
        let leaves = leaves_words(leaf_count);

        let mut expected = vec![0; layout.intermediates_words()];
        merklize_sequential(leaf_count, &leaves, &mut expected).unwrap();

        for num_workers in [1, 2, 3, 4, 8] {
            for channel_capacity in [0, 1, 16] {
                let mut intermediates = vec![0; layout.intermediates_words()];
                merklizer(num_workers, channel_capacity)
                    .construct(leaf_count, &leaves, &mut intermediates)
                    .unwrap();

                assert_eq!(
                    intermediates, expected,
                    "leaf_count {leaf_count} num_workers {num_workers} capacity {channel_capacity}"
                );
            }
        }
    }
}

#[test]
fn more_workers_than_pairs() {
    let leaves = leaves_words(4);
    let mut expected = vec![0; 3 * NODE_WORDS];
    merklize_sequential(4, &leaves, &mut expected).unwrap();

    let mut intermediates = vec![0; 3 * NODE_WORDS];
    merklizer(64, 1)
        .construct(4, &leaves, &mut intermediates)
        .unwrap();

    assert_eq!(intermediates, expected);
}

#[test]
fn build_matches_construct() {
    let leaf_count = 32;
    let leaves = leaves_words(leaf_count);
    let leaf_nodes = leaves.as_chunks::<NODE_WORDS>().0.to_vec();

    let mut intermediates = vec![0; TreeLayout::new(leaf_count).unwrap().intermediates_words()];
    let merklizer = merklizer(4, 2);
    merklizer
        .construct(leaf_count, &leaves, &mut intermediates)
        .unwrap();

    let tree = merklizer.build(&leaf_nodes).unwrap();
    assert_eq!(tree.as_words(), intermediates.as_slice());
    assert_eq!(tree.leaf_count(), leaf_count);
}

#[test]
fn build_rejects_invalid_leaf_count() {
    let leaves = vec![Node::default(); 6];

    assert_eq!(
        Merklizer::default().build(&leaves),
        Err(MerklizeError::InvalidLeafCount { leaf_count: 6 })
    );
    assert_eq!(
        Merklizer::default().build(&[]),
        Err(MerklizeError::InvalidLeafCount { leaf_count: 0 })
    );
}

#[test]
fn sequential_rejects_invalid_input_without_writing() {
    let leaves = leaves_words(3);
    let mut intermediates = vec![u32::MAX; 2 * NODE_WORDS];

    assert_eq!(
        merklize_sequential(3, &leaves, &mut intermediates),
        Err(MerklizeError::InvalidLeafCount { leaf_count: 3 })
    );
    assert!(intermediates.iter().all(|&word| word == u32::MAX));
}
