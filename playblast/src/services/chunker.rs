/*
    Frame range handling for render tasks.
    Input looks like `1-250` or `3, 5-10, 47`. Each comma separated group is
    chunked on its own, so `1-5,6-10` with a large chunk size still yields two
    chunks even though the frames are adjacent.
*/
use crate::models::{
    chunk::{Frame, FrameChunk},
    error::CompileError,
};

/// Parse a frame range into its comma separated groups, in input order.
pub fn parse_groups(range: &str) -> Result<Vec<FrameChunk>, CompileError> {
    if range.trim().is_empty() {
        return Err(CompileError::invalid_range(range, "no frames given"));
    }

    range
        .split(',')
        .map(|group| parse_group(range, group))
        .collect()
}

fn parse_group(range: &str, group: &str) -> Result<FrameChunk, CompileError> {
    let group = group.trim();
    if group.is_empty() {
        return Err(CompileError::invalid_range(range, "empty frame group"));
    }

    let (start, end) = match group.split_once('-') {
        Some((start, end)) => (parse_frame(range, start)?, parse_frame(range, end)?),
        None => {
            let frame = parse_frame(range, group)?;
            (frame, frame)
        }
    };

    if start > end {
        return Err(CompileError::invalid_range(
            range,
            format!("{group} ends before it starts"),
        ));
    }
    Ok(FrameChunk::new(start, end))
}

fn parse_frame(range: &str, token: &str) -> Result<Frame, CompileError> {
    let token = token.trim();
    if token.is_empty() || !token.bytes().all(|b| b.is_ascii_digit()) {
        return Err(CompileError::invalid_range(
            range,
            format!("{token:?} is not a frame number"),
        ));
    }
    token
        .parse::<Frame>()
        .map_err(|_| CompileError::invalid_range(range, format!("frame {token} is too large")))
}

/// Split a frame range into chunks of at most `chunk_size` consecutive frames.
pub fn chunk_frames(range: &str, chunk_size: i64) -> Result<Vec<FrameChunk>, CompileError> {
    if chunk_size < 1 {
        return Err(CompileError::InvalidChunkSize(chunk_size));
    }

    let mut chunks = Vec::new();
    for group in parse_groups(range)? {
        // i64 so the last chunk near Frame::MAX cannot overflow
        let mut start = group.start as i64;
        let end = group.end as i64;
        while start <= end {
            let last = start.saturating_add(chunk_size - 1).min(end);
            chunks.push(FrameChunk::new(start as Frame, last as Frame));
            start = last + 1;
        }
    }
    Ok(chunks)
}

/// First and last frame of the whole range, as `3-47` (or `3` for one frame).
///
/// Same result as taking the lowest and highest frame of a size 1 chunking,
/// without expanding every frame.
pub fn display_range(range: &str) -> Result<String, CompileError> {
    let groups = parse_groups(range)?;
    let first = groups.iter().map(|g| g.start).min();
    let last = groups.iter().map(|g| g.end).max();
    match (first, last) {
        (Some(first), Some(last)) => Ok(FrameChunk::new(first, last).to_string()),
        _ => Err(CompileError::invalid_range(range, "no frames given")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(range: &str, chunk_size: i64) -> Vec<String> {
        chunk_frames(range, chunk_size)
            .unwrap()
            .iter()
            .map(|c| c.to_string())
            .collect()
    }

    #[test]
    fn splits_range_evenly() {
        assert_eq!(tokens("1-10", 5), vec!["1-5", "6-10"]);
    }

    #[test]
    fn last_chunk_may_be_short() {
        assert_eq!(tokens("1-11", 5), vec!["1-5", "6-10", "11"]);
    }

    #[test]
    fn scattered_list_with_size_one() {
        assert_eq!(
            tokens("3, 5-10, 47", 1),
            vec!["3", "5", "6", "7", "8", "9", "10", "47"]
        );
        assert_eq!(display_range("3, 5-10, 47").unwrap(), "3-47");
    }

    #[test]
    fn groups_are_never_merged() {
        assert_eq!(tokens("1-5,6-10", 100), vec!["1-5", "6-10"]);
    }

    #[test]
    fn display_range_uses_extremes_not_input_order() {
        assert_eq!(display_range("40-47, 3").unwrap(), "3-47");
        assert_eq!(display_range("12").unwrap(), "12");
    }

    #[test]
    fn rejects_bad_chunk_size() {
        assert_eq!(
            chunk_frames("1-10", 0),
            Err(CompileError::InvalidChunkSize(0))
        );
        assert_eq!(
            chunk_frames("1-10", -3),
            Err(CompileError::InvalidChunkSize(-3))
        );
    }

    #[test]
    fn rejects_malformed_ranges() {
        for range in ["", "   ", "abc", "1,,3", "1-", "-5", "10-5", "1-2-3", "1.5", "1,"] {
            assert!(
                matches!(
                    chunk_frames(range, 1),
                    Err(CompileError::InvalidRange { .. })
                ),
                "{range:?} should be rejected"
            );
        }
    }

    #[test]
    fn huge_chunk_size_does_not_overflow() {
        let max = Frame::MAX;
        let range = format!("{}-{}", max - 2, max);
        assert_eq!(
            chunk_frames(&range, i64::MAX).unwrap(),
            vec![FrameChunk::new(max - 2, max)]
        );
    }
}
