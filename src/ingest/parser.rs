/// Delimiter separating entries inside a fortune file.
pub const DELIMITER: char = '%';

/// Splits a fortune file's contents on the delimiter and returns the
/// segments strictly between the first and the last, verbatim. The leading
/// segment (usually a header) and the trailing segment (usually empty or
/// whitespace) are discarded. Fewer than two delimiters means no entries.
pub fn extract_entries(data: &str) -> Vec<&str> {
    let segments: Vec<&str> = data.split(DELIMITER).collect();
    if segments.len() < 3 {
        return Vec::new();
    }
    segments[1..segments.len() - 1].to_vec()
}
