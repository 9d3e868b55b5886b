use playblast_lib::{
    models::chunk::Frame,
    services::chunker::{chunk_frames, display_range},
};
use proptest::prelude::*;

// A frame range string plus the frames it should expand to.
fn frame_range() -> impl Strategy<Value = (String, Vec<Frame>)> {
    let group = (0..500i32, 0..40i32).prop_map(|(start, len)| (start, start + len));
    prop::collection::vec(group, 1..6).prop_map(|groups| {
        let text = groups
            .iter()
            .map(|(start, end)| {
                if start == end {
                    start.to_string()
                } else {
                    format!("{start}-{end}")
                }
            })
            .collect::<Vec<_>>()
            .join(", ");
        let frames = groups.iter().flat_map(|(start, end)| *start..=*end).collect();
        (text, frames)
    })
}

proptest! {
    #[test]
    fn chunks_reproduce_the_frame_list((range, frames) in frame_range(), size in 1i64..20) {
        let chunks = chunk_frames(&range, size).unwrap();
        let expanded: Vec<Frame> = chunks.iter().flat_map(|c| c.frames()).collect();
        prop_assert_eq!(expanded, frames);
    }

    #[test]
    fn chunks_respect_the_size((range, _) in frame_range(), size in 1i64..20) {
        for chunk in chunk_frames(&range, size).unwrap() {
            prop_assert!(chunk.frame_count() as i64 <= size);
        }
    }

    #[test]
    fn display_range_spans_min_to_max((range, frames) in frame_range()) {
        let min = *frames.iter().min().unwrap();
        let max = *frames.iter().max().unwrap();
        let expected = if min == max { min.to_string() } else { format!("{min}-{max}") };
        prop_assert_eq!(display_range(&range).unwrap(), expected);
    }

    #[test]
    fn non_positive_chunk_size_always_fails((range, _) in frame_range(), size in -50i64..=0) {
        prop_assert!(chunk_frames(&range, size).is_err());
    }
}
