use std::io::Read;

use sha2::{Digest, Sha256};

use super::CryptoError;

const BUFFER_SIZE: usize = 4096;

/// Computes the SHA-256 digest of everything `reader` yields.
pub fn sha256<R: Read>(mut reader: R) -> Result<[u8; 32], CryptoError> {
    let mut hasher = Sha256::new();
    let mut buf = [0u8; BUFFER_SIZE];

    loop {
        let read = reader.read(&mut buf)?;
        if read == 0 {
            break;
        }
        hasher.update(&buf[..read]);
    }

    Ok(hasher.finalize().into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_sha256_of_empty_input() {
        let digest = sha256(Cursor::new(b"")).unwrap();
        assert_eq!(
            hex::encode(digest),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn test_sha256_of_abc() {
        let digest = sha256(Cursor::new(b"abc")).unwrap();
        assert_eq!(
            hex::encode(digest),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_sha256_spans_buffer_boundaries() {
        // One hasher fed in 4096-byte slices must agree with one-shot input.
        let input: Vec<u8> = (0..BUFFER_SIZE * 2 + 77).map(|i| (i % 253) as u8).collect();
        let streamed = sha256(Cursor::new(&input)).unwrap();

        let mut hasher = Sha256::new();
        hasher.update(&input);
        let oneshot: [u8; 32] = hasher.finalize().into();

        assert_eq!(streamed, oneshot);
    }
}
