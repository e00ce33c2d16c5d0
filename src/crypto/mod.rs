pub mod cipher;
pub mod digest;

#[derive(Debug)]
pub enum CryptoError {
    MalformedKey,
    MalformedIv,
    MalformedDigest,
    TruncatedCiphertext,
    Padding,
    Io(std::io::Error),
}

impl From<std::io::Error> for CryptoError {
    fn from(err: std::io::Error) -> Self {
        CryptoError::Io(err)
    }
}

impl std::fmt::Display for CryptoError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CryptoError::MalformedKey => {
                write!(f, "Given password is not of right format!")
            }
            CryptoError::MalformedIv => {
                write!(f, "Given initial vector is not of right format!")
            }
            CryptoError::MalformedDigest => {
                write!(f, "Digestion error. Given digest is not of right format!")
            }
            CryptoError::TruncatedCiphertext => {
                write!(f, "Ciphertext length is not a multiple of the cipher block size")
            }
            CryptoError::Padding => {
                write!(f, "Cipher padding failure (wrong key or corrupted input)")
            }
            CryptoError::Io(e) => write!(f, "IO exception: {}", e),
        }
    }
}

impl std::error::Error for CryptoError {}

/// 16-byte AES key from 32 hex digits.
pub fn parse_key(text: &str) -> Result<[u8; 16], CryptoError> {
    parse_hex::<16>(text).ok_or(CryptoError::MalformedKey)
}

/// 16-byte CBC initialization vector from 32 hex digits.
pub fn parse_iv(text: &str) -> Result<[u8; 16], CryptoError> {
    parse_hex::<16>(text).ok_or(CryptoError::MalformedIv)
}

/// 32-byte SHA-256 digest from 64 hex digits, either case.
pub fn parse_digest(text: &str) -> Result<[u8; 32], CryptoError> {
    parse_hex::<32>(text).ok_or(CryptoError::MalformedDigest)
}

fn parse_hex<const N: usize>(text: &str) -> Option<[u8; N]> {
    let text = text.trim();
    if text.len() != 2 * N || !text.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    hex::decode(text).ok()?.try_into().ok()
}
