use super::ports::SampleId;

/// Reduce a `KeyboardEvent.key` value to the single character it types.
///
/// Named keys such as `"Shift"` or `"ArrowUp"` yield `None`.
#[inline]
pub fn key_char(key: &str) -> Option<char> {
    let mut chars = key.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}

/// Drum pads live on `b` (kick) and `p` (snare).
#[inline]
pub fn drum_for_key(key: char) -> Option<SampleId> {
    match key {
        'b' | 'B' => Some(SampleId::Kick),
        'p' | 'P' => Some(SampleId::Snare),
        _ => None,
    }
}
