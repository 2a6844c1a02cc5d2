use std::error::Error;

/// Splits a stream of bytes into delimited datagrams (lines of JSON for the API). A datagram
/// may arrive across any number of reads, and one read may carry several datagrams.
pub struct DatagramSplitter {
    pending_data: Vec<u8>,
    delimiter: u8,
    max_len: usize,
    /// Set while skipping the remainder of an oversized datagram
    discarding: bool,
}

impl DatagramSplitter {
    pub fn new(delimiter: u8, max_len: usize) -> Self {
        Self {
            pending_data: Vec::new(),
            delimiter,
            max_len,
            discarding: false,
        }
    }

    /// Returns every datagram completed by this data in order, with surrounding whitespace
    /// (including a trailing '\r') stripped and blank datagrams dropped. Leftover bytes are kept
    /// as the start of the next datagram. A datagram that grows past max_len is discarded and
    /// shows up as a single error in its place; datagrams around it are unaffected.
    pub fn data(&mut self, data: &[u8]) -> Vec<Result<Vec<u8>, Box<dyn Error>>> {
        let mut datagrams = Vec::new();
        let delimiter = self.delimiter;
        for chunk in data.split_inclusive(|b| *b == delimiter) {
            let complete = chunk.last() == Some(&delimiter);
            let body = if complete {
                &chunk[..chunk.len() - 1]
            } else {
                chunk
            };
            if self.discarding {
                self.discarding = !complete;
                continue;
            }
            if self.pending_data.len() + body.len() > self.max_len {
                datagrams.push(Err(format!("datagram longer than {} bytes", self.max_len).into()));
                self.pending_data.clear();
                self.discarding = !complete;
                continue;
            }
            self.pending_data.extend_from_slice(body);
            if complete {
                let datagram = std::mem::take(&mut self.pending_data);
                let trimmed = trim_ascii_whitespace(&datagram);
                if !trimmed.is_empty() {
                    datagrams.push(Ok(trimmed.to_vec()));
                }
            }
        }
        datagrams
    }
}

fn trim_ascii_whitespace(bytes: &[u8]) -> &[u8] {
    let start = bytes
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .unwrap_or(bytes.len());
    let end = bytes
        .iter()
        .rposition(|b| !b.is_ascii_whitespace())
        .map(|i| i + 1)
        .unwrap_or(start);
    &bytes[start..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Asserts each call with the strings returns the vecs
    fn assert_splits_to(io: Vec<(&str, Vec<&str>)>) {
        let mut splitter = DatagramSplitter::new(b'\n', usize::MAX);
        for (packet, expected) in io {
            let result: Vec<Vec<u8>> = splitter
                .data(packet.as_bytes())
                .into_iter()
                .map(|datagram| datagram.unwrap())
                .collect();
            let result: Vec<&str> = result
                .iter()
                .map(|s| std::str::from_utf8(s).expect("failed to convert to UTF-8 string"))
                .collect();
            assert_eq!(result, expected);
        }
    }

    #[test]
    fn single_line() {
        assert_splits_to(vec![("{}\n", vec!["{}"])]);
    }

    #[test]
    fn keeps_unterminated_tail_for_later() {
        assert_splits_to(vec![
            ("{\"a\":1}\n{\"b\"", vec!["{\"a\":1}"]),
            (":2}\n", vec!["{\"b\":2}"]),
        ]);
    }

    #[test]
    fn multiple_lines_in_one_read() {
        assert_splits_to(vec![("abc\nxyz\n", vec!["abc", "xyz"])]);
    }

    #[test]
    fn strips_carriage_returns_and_blank_lines() {
        assert_splits_to(vec![("abc\r\n\r\n  \nxyz\n", vec!["abc", "xyz"])]);
    }

    #[test]
    fn handles_empty_read() {
        assert_splits_to(vec![("ab", vec![]), ("", vec![]), ("c\n", vec!["abc"])]);
    }

    #[test]
    fn rejects_oversized_datagram_then_recovers() {
        let mut splitter = DatagramSplitter::new(b'\n', 4);
        let result = splitter.data(b"0123456789");
        assert_eq!(result.len(), 1);
        assert!(result[0].is_err());
        assert!(splitter.data(b"abc").is_empty());
        let recovered = splitter.data(b"\nok\n");
        assert_eq!(recovered.len(), 1);
        assert_eq!(recovered[0].as_ref().unwrap(), b"ok");
    }

    #[test]
    fn keeps_good_datagrams_around_oversized_one() {
        let mut splitter = DatagramSplitter::new(b'\n', 4);
        let result = splitter.data(b"ab\n0123456789\ncd\n");
        assert_eq!(result.len(), 3);
        assert_eq!(result[0].as_ref().unwrap(), b"ab");
        assert!(result[1].is_err());
        assert_eq!(result[2].as_ref().unwrap(), b"cd");
    }
}
