/// Splits `secret` into consecutive pieces of `max_len` bytes; the last piece
/// holds the remainder, if any. Callers pass ASCII, so byte offsets are char
/// boundaries.
pub fn split_chunks(secret: &str, max_len: usize) -> Vec<&str> {
    assert!(max_len >= 1, "chunk length must be at least 1");
    let mut chunks = Vec::with_capacity(secret.len().div_ceil(max_len));
    let mut rest = secret;
    while !rest.is_empty() {
        let (head, tail) = rest.split_at(rest.len().min(max_len));
        chunks.push(head);
        rest = tail;
    }
    chunks
}

/// Concatenates chunks in order.
pub fn join_chunks<S: AsRef<[u8]>>(chunks: &[S]) -> Vec<u8> {
    chunks.iter().flat_map(|c| c.as_ref().iter().copied()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck_macros::quickcheck;

    #[test]
    fn remainder_becomes_short_last_chunk() {
        assert_eq!(
            split_chunks("Hello, World!", 3),
            vec!["Hel", "lo,", " Wo", "rld", "!"]
        );
    }

    #[test]
    fn exact_multiple_has_no_extra_chunk() {
        let secret = "a".repeat(45);
        let chunks = split_chunks(&secret, 15);
        assert_eq!(chunks.len(), 3);
        assert!(chunks.iter().all(|c| c.len() == 15));
    }

    #[test]
    fn shorter_than_bound() {
        assert_eq!(split_chunks("hi", 15), vec!["hi"]);
        assert!(split_chunks("", 15).is_empty());
    }

    #[quickcheck]
    fn join_inverts_split(secret: String, len: u8) -> bool {
        let len = usize::from(len % 20) + 1;
        let secret: String = secret.chars().filter(char::is_ascii).collect();
        let chunks = split_chunks(&secret, len);
        let expected = secret.len() / len + usize::from(secret.len() % len != 0);
        chunks.len() == expected && join_chunks(&chunks) == secret.as_bytes()
    }
}
