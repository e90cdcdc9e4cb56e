/// Split `text` into consecutive chunks of at most `limit` characters each.
///
/// Chunk boundaries fall at fixed character offsets (`limit`, `2 * limit`, ...), with no regard for words or lines.
/// Characters are Unicode scalar values, so a multibyte character is never cut in half. A message of `L` characters
/// yields `ceil(L / limit)` chunks, and concatenating them gives back `text`. An empty message yields no chunks.
///
/// A `limit` of zero is treated as one.
pub fn split_message(text: &str, limit: usize) -> Vec<&str> {
    let limit = limit.max(1);
    let mut chunks = Vec::with_capacity(text.len() / limit + 1);
    let mut rest = text;
    while !rest.is_empty() {
        let split_at = rest.char_indices().nth(limit).map(|(i, _)| i).unwrap_or(rest.len());
        let (chunk, tail) = rest.split_at(split_at);
        chunks.push(chunk);
        rest = tail;
    }
    chunks
}
