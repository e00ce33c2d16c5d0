use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::process::exit;

use atrium::crypto::{self, cipher, digest, CryptoError};

const USAGE: &str = "You need to give arguments:
\t- checksha <filepath>
\t- encrypt <filepath> <encrypted_filepath>
\t- decrypt <encrypted_filepath> <filepath>";

// One distinct code per failure class.
const EXIT_BAD_ARG_COUNT: i32 = -1;
const EXIT_UNKNOWN_VERB: i32 = -2;
const EXIT_EMPTY_PATH: i32 = -3;
const EXIT_BAD_KEY_MATERIAL: i32 = -4;
const EXIT_IO_OR_CRYPTO: i32 = -5;

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    match args.as_slice() {
        [verb, src, dest] => match verb.as_str() {
            "encrypt" => run_cipher(src, dest, true),
            "decrypt" => run_cipher(src, dest, false),
            _ => unknown_verb(verb),
        },
        [verb, file] => match verb.as_str() {
            "checksha" => run_checksha(file),
            _ => unknown_verb(verb),
        },
        _ => {
            eprintln!("{}", USAGE);
            exit(EXIT_BAD_ARG_COUNT);
        }
    }
}

fn unknown_verb(verb: &str) -> ! {
    eprintln!("Unrecognized command '{}'", verb);
    eprintln!("{}", USAGE);
    exit(EXIT_UNKNOWN_VERB);
}

fn run_cipher(src: &str, dest: &str, encrypting: bool) {
    require_path(src);
    require_path(dest);

    println!("Please provide password as hex-encoded text (16 bytes, i.e. 32 hex-digits):");
    let key = match crypto::parse_key(&prompt_line()) {
        Ok(key) => key,
        Err(e) => {
            eprintln!("{}", e);
            exit(EXIT_BAD_KEY_MATERIAL);
        }
    };

    println!("Please provide initialization vector as hex-encoded text (32 hex-digits):");
    let iv = match crypto::parse_iv(&prompt_line()) {
        Ok(iv) => iv,
        Err(e) => {
            eprintln!("{}", e);
            exit(EXIT_BAD_KEY_MATERIAL);
        }
    };

    if let Err(e) = stream_file(src, dest, &key, &iv, encrypting) {
        eprintln!("{}", e);
        exit(EXIT_IO_OR_CRYPTO);
    }

    let verb = if encrypting { "Encryption" } else { "Decryption" };
    println!(
        "{} completed. Generated file {} based on file {}.",
        verb, dest, src
    );
}

fn stream_file(
    src: &str,
    dest: &str,
    key: &[u8; 16],
    iv: &[u8; 16],
    encrypting: bool,
) -> Result<(), CryptoError> {
    let reader = BufReader::new(File::open(src)?);
    let writer = BufWriter::new(File::create(dest)?);
    if encrypting {
        cipher::encrypt(reader, writer, key, iv)
    } else {
        cipher::decrypt(reader, writer, key, iv)
    }
}

fn run_checksha(file: &str) {
    require_path(file);

    println!("Please provide expected sha-256 digest for {}:", file);
    let expected = match crypto::parse_digest(&prompt_line()) {
        Ok(digest) => digest,
        Err(e) => {
            eprintln!("{}", e);
            exit(EXIT_BAD_KEY_MATERIAL);
        }
    };

    let actual = File::open(file)
        .map_err(CryptoError::from)
        .and_then(|f| digest::sha256(BufReader::new(f)));
    let actual = match actual {
        Ok(digest) => digest,
        Err(e) => {
            eprintln!("{}", e);
            exit(EXIT_IO_OR_CRYPTO);
        }
    };

    if actual == expected {
        println!(
            "Digesting completed. Digest of {} matches expected digest.",
            file
        );
    } else {
        println!(
            "Digesting completed. Digest of {} does not match the expected digest. Digest was: {}",
            file,
            hex::encode(actual)
        );
    }
}

fn prompt_line() -> String {
    print!("> ");
    if io::stdout().flush().is_err() {
        exit(EXIT_IO_OR_CRYPTO);
    }

    let mut line = String::new();
    if io::stdin().read_line(&mut line).is_err() {
        exit(EXIT_IO_OR_CRYPTO);
    }
    line.trim().to_string()
}

fn require_path(path: &str) {
    if path.is_empty() {
        eprintln!("File path cannot be an empty string!");
        exit(EXIT_EMPTY_PATH);
    }
}
