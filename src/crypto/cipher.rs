use std::io::{Read, Write};

use aes::cipher::{
    block_padding::Pkcs7, generic_array::GenericArray, BlockDecryptMut, BlockEncryptMut,
    KeyIvInit,
};
use aes::Aes128;

use super::CryptoError;

type Aes128CbcEnc = cbc::Encryptor<Aes128>;
type Aes128CbcDec = cbc::Decryptor<Aes128>;

pub const BLOCK_SIZE: usize = 16;
const BUFFER_SIZE: usize = 4096;

/// Streams `reader` through AES-128-CBC with PKCS#7 padding into `writer`.
pub fn encrypt<R: Read, W: Write>(
    mut reader: R,
    mut writer: W,
    key: &[u8; 16],
    iv: &[u8; 16],
) -> Result<(), CryptoError> {
    let mut cipher = Aes128CbcEnc::new(GenericArray::from_slice(key), GenericArray::from_slice(iv));

    let mut buf = [0u8; BUFFER_SIZE];
    let mut pending: Vec<u8> = Vec::with_capacity(BUFFER_SIZE + BLOCK_SIZE);

    loop {
        let read = reader.read(&mut buf)?;
        if read == 0 {
            break;
        }
        pending.extend_from_slice(&buf[..read]);

        let full = pending.len() - pending.len() % BLOCK_SIZE;
        for block in pending[..full].chunks_exact_mut(BLOCK_SIZE) {
            cipher.encrypt_block_mut(GenericArray::from_mut_slice(block));
        }
        writer.write_all(&pending[..full])?;
        pending.drain(..full);
    }

    // Whatever is left is shorter than one block; padding fills it out to
    // exactly one (a full padding block when the input was block-aligned).
    let mut last = [0u8; BLOCK_SIZE];
    last[..pending.len()].copy_from_slice(&pending);
    let padded = cipher
        .encrypt_padded_mut::<Pkcs7>(&mut last, pending.len())
        .map_err(|_| CryptoError::Padding)?;
    writer.write_all(padded)?;
    writer.flush()?;

    Ok(())
}

/// Streams AES-128-CBC ciphertext from `reader` into `writer`, removing the
/// PKCS#7 padding from the final block.
pub fn decrypt<R: Read, W: Write>(
    mut reader: R,
    mut writer: W,
    key: &[u8; 16],
    iv: &[u8; 16],
) -> Result<(), CryptoError> {
    let mut cipher = Aes128CbcDec::new(GenericArray::from_slice(key), GenericArray::from_slice(iv));

    let mut buf = [0u8; BUFFER_SIZE];
    let mut pending: Vec<u8> = Vec::with_capacity(BUFFER_SIZE + BLOCK_SIZE);

    loop {
        let read = reader.read(&mut buf)?;
        if read == 0 {
            break;
        }
        pending.extend_from_slice(&buf[..read]);

        // The final block carries the padding and must wait for end of
        // input, so at least one block's worth of bytes always stays back.
        if pending.len() > BLOCK_SIZE {
            let keep = match pending.len() % BLOCK_SIZE {
                0 => BLOCK_SIZE,
                partial => partial,
            };
            let full = pending.len() - keep;
            for block in pending[..full].chunks_exact_mut(BLOCK_SIZE) {
                cipher.decrypt_block_mut(GenericArray::from_mut_slice(block));
            }
            writer.write_all(&pending[..full])?;
            pending.drain(..full);
        }
    }

    if pending.len() != BLOCK_SIZE {
        return Err(CryptoError::TruncatedCiphertext);
    }
    let mut last = [0u8; BLOCK_SIZE];
    last.copy_from_slice(&pending);
    let plain = cipher
        .decrypt_padded_mut::<Pkcs7>(&mut last)
        .map_err(|_| CryptoError::Padding)?;
    writer.write_all(plain)?;
    writer.flush()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const KEY: [u8; 16] = [
        0x2b, 0x7e, 0x15, 0x16, 0x28, 0xae, 0xd2, 0xa6, 0xab, 0xf7, 0x15, 0x88, 0x09, 0xcf,
        0x4f, 0x3c,
    ];
    const IV: [u8; 16] = [
        0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09, 0x0a, 0x0b, 0x0c, 0x0d,
        0x0e, 0x0f,
    ];

    fn encrypt_bytes(input: &[u8]) -> Vec<u8> {
        let mut out = Vec::new();
        encrypt(Cursor::new(input), &mut out, &KEY, &IV).unwrap();
        out
    }

    fn decrypt_bytes(input: &[u8]) -> Result<Vec<u8>, CryptoError> {
        let mut out = Vec::new();
        decrypt(Cursor::new(input), &mut out, &KEY, &IV)?;
        Ok(out)
    }

    #[test]
    fn test_nist_cbc_vector_first_block() {
        // NIST SP 800-38A, F.2.1 CBC-AES128.Encrypt, first block.
        let plaintext = [
            0x6b, 0xc1, 0xbe, 0xe2, 0x2e, 0x40, 0x9f, 0x96, 0xe9, 0x3d, 0x7e, 0x11, 0x73, 0x93,
            0x17, 0x2a,
        ];
        let expected = [
            0x76, 0x49, 0xab, 0xac, 0x81, 0x19, 0xb2, 0x46, 0xce, 0xe9, 0x8e, 0x9b, 0x12, 0xe9,
            0x19, 0x7d,
        ];

        let ciphertext = encrypt_bytes(&plaintext);
        // One data block plus one full padding block.
        assert_eq!(ciphertext.len(), 2 * BLOCK_SIZE);
        assert_eq!(&ciphertext[..BLOCK_SIZE], &expected);
    }

    #[test]
    fn test_round_trip_short_input() {
        let ciphertext = encrypt_bytes(b"hello");
        assert_eq!(ciphertext.len(), BLOCK_SIZE);
        assert_eq!(decrypt_bytes(&ciphertext).unwrap(), b"hello");
    }

    #[test]
    fn test_round_trip_empty_input() {
        let ciphertext = encrypt_bytes(b"");
        assert_eq!(ciphertext.len(), BLOCK_SIZE);
        assert_eq!(decrypt_bytes(&ciphertext).unwrap(), b"");
    }

    #[test]
    fn test_round_trip_spans_buffer_boundaries() {
        // Longer than one read buffer and not block-aligned.
        let input: Vec<u8> = (0..BUFFER_SIZE + 21).map(|i| (i % 251) as u8).collect();
        let ciphertext = encrypt_bytes(&input);
        assert_eq!(ciphertext.len() % BLOCK_SIZE, 0);
        assert_eq!(decrypt_bytes(&ciphertext).unwrap(), input);
    }

    #[test]
    fn test_truncated_ciphertext_is_rejected() {
        assert!(matches!(
            decrypt_bytes(&[0u8; 8]),
            Err(CryptoError::TruncatedCiphertext)
        ));
        assert!(matches!(
            decrypt_bytes(&[0u8; 40]),
            Err(CryptoError::TruncatedCiphertext)
        ));
        assert!(matches!(
            decrypt_bytes(&[]),
            Err(CryptoError::TruncatedCiphertext)
        ));
    }

    #[test]
    fn test_wrong_key_never_recovers_the_plaintext() {
        let ciphertext = encrypt_bytes(b"sensitive payload");
        let wrong_key = [0u8; 16];
        let mut out = Vec::new();
        // Almost always a padding error; on the off chance the garbage ends
        // in valid padding, the output still cannot match.
        match decrypt(Cursor::new(&ciphertext), &mut out, &wrong_key, &IV) {
            Err(CryptoError::Padding) => {}
            Ok(()) => assert_ne!(out, b"sensitive payload"),
            Err(e) => panic!("unexpected error: {:?}", e),
        }
    }
}
