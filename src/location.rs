/// Convert a byte offset into a (line, column) pair, both 1-indexed.
///
/// Used to turn the byte offsets carried by [`crate::imports::ParseError`]
/// into human-readable positions for skipped-file warnings.
pub fn line_col(source: &str, offset: usize) -> (usize, usize) {
    let upto = &source.as_bytes()[..offset.min(source.len())];
    let line = 1 + upto.iter().filter(|&&b| b == b'\n').count();
    let line_start = upto
        .iter()
        .rposition(|&b| b == b'\n')
        .map(|i| i + 1)
        .unwrap_or(0);
    (line, upto.len() - line_start + 1)
}
