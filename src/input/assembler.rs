use super::console::{Console, ConsoleError};
use crate::shell::environment::Environment;

/// Where the assembler is in the continuation protocol. The state decides
/// which symbol prompts the next physical read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ReadState {
    AwaitingFirstLine,
    AwaitingContinuation,
}

/// Reads physical lines until one logical command line is complete: as long
/// as the trimmed accumulated text ends with the environment's continuation
/// symbol, another line is requested under the continuation-prefix symbol.
/// The returned line has every continuation symbol stripped and surrounding
/// whitespace trimmed.
pub fn assemble_line(
    env: &Environment,
    console: &mut dyn Console,
) -> Result<String, ConsoleError> {
    let mut state = ReadState::AwaitingFirstLine;
    let mut buffer = String::new();

    loop {
        let prompt = match state {
            ReadState::AwaitingFirstLine => format!("{} ", env.prompt()),
            ReadState::AwaitingContinuation => format!("{} ", env.prefix()),
        };

        buffer.push_str(&console.read_line(&prompt)?);

        if buffer.trim().ends_with(env.continuation()) {
            state = ReadState::AwaitingContinuation;
        } else {
            break;
        }
    }

    let assembled = buffer.replace(env.continuation(), "");
    Ok(assembled.trim().to_string())
}
