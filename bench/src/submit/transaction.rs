use crate::config::defaults::MIN_TRANSACTION_SIZE;
use crate::config::validate_transaction_size;
use crate::error::Error;
use bytes::{BufMut, Bytes, BytesMut};

/// Tag carried in the first byte of every benchmark transaction.
pub const BENCHMARK_TAG: u8 = 0;

const COUNTER_OFFSET: usize = 1;

/// Synthetic zero-padded payload used to exercise the submission path.
///
/// Layout: `[tag: u8][counter: u64 little-endian][zero padding...]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    payload: Bytes,
}

impl Transaction {
    pub fn benchmark(size: usize, counter: u64) -> Result<Self, Error> {
        validate_transaction_size(size)?;
        let mut payload = BytesMut::with_capacity(size);
        payload.put_u8(BENCHMARK_TAG);
        payload.put_u64_le(counter);
        payload.resize(size, 0u8);
        Ok(Transaction {
            payload: payload.freeze(),
        })
    }

    pub fn len(&self) -> usize {
        self.payload.len()
    }

    pub fn is_empty(&self) -> bool {
        self.payload.is_empty()
    }

    pub fn is_benchmark(&self) -> bool {
        self.payload[0] == BENCHMARK_TAG
    }

    pub fn counter(&self) -> u64 {
        let mut counter = [0u8; 8];
        counter.copy_from_slice(&self.payload[COUNTER_OFFSET..MIN_TRANSACTION_SIZE]);
        u64::from_le_bytes(counter)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.payload
    }

    pub fn into_bytes(self) -> Bytes {
        self.payload
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_build_minimal_transaction() {
        let transaction = Transaction::benchmark(9, 0).unwrap();
        assert_eq!(transaction.len(), 9);
        assert_eq!(transaction.as_bytes(), &[0u8; 9]);
        assert!(transaction.is_benchmark());
        assert_eq!(transaction.counter(), 0);
    }

    #[test]
    fn should_fail_for_transaction_smaller_than_header() {
        let result = Transaction::benchmark(8, 0);
        assert!(matches!(result, Err(Error::InvalidConfiguration(_))));
    }

    #[test]
    fn should_encode_counter_as_little_endian_and_pad_with_zeros() {
        let transaction = Transaction::benchmark(100, 0x0102).unwrap();
        let bytes = transaction.as_bytes();
        assert_eq!(bytes.len(), 100);
        assert_eq!(bytes[0], BENCHMARK_TAG);
        assert_eq!(&bytes[1..9], &[0x02_u8, 0x01, 0, 0, 0, 0, 0, 0]);
        assert!(bytes[9..].iter().all(|byte| *byte == 0));
        assert_eq!(transaction.counter(), 0x0102);
    }
}
