use std::ops::Range;

use crate::error::{QuizError, Result};
use crate::span::Span;

/// Placeholder for a masked term. Its width does not depend on the term.
pub const BLANK_MARKER: &str = "____";

/// Replaces each range of `items` with `replacement`, highest start first so
/// that ranges not yet processed keep their offsets. Ranges must not overlap.
pub fn replace_ranges<T: Clone>(
    items: &mut Vec<T>,
    mut ranges: Vec<Range<usize>>,
    replacement: &[T],
) -> Result<()> {
    ranges.sort_by(|a, b| b.start.cmp(&a.start));
    let len = items.len();
    if let Some(bad) = ranges
        .iter()
        .find(|range| range.start > range.end || range.end > len)
    {
        return Err(QuizError::SpanOutOfBounds {
            start: bad.start,
            end: bad.end,
            len,
        });
    }
    debug_assert!(
        ranges.windows(2).all(|w| w[1].end <= w[0].start),
        "overlapping ranges"
    );

    for range in ranges {
        items.splice(range, replacement.iter().cloned());
    }
    Ok(())
}

/// The quiz text: `text` with every span replaced by [`BLANK_MARKER`].
pub fn mask_spans(text: &str, spans: &[Span]) -> Result<String> {
    if spans.is_empty() {
        return Ok(text.to_string());
    }
    let mut chars: Vec<char> = text.chars().collect();
    let marker: Vec<char> = BLANK_MARKER.chars().collect();
    let ranges = spans.iter().map(|span| span.start..span.end).collect();
    replace_ranges(&mut chars, ranges, &marker)?;
    Ok(chars.into_iter().collect())
}
