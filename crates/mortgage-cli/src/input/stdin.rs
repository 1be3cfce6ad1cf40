use mortgage_core::MortgageConfig;
use std::io::{self, Read};
use tracing::warn;

/// Read a configuration layer from stdin if data is being piped.
/// Returns None if stdin is a TTY (interactive), empty, or not a valid layer.
pub fn read_stdin() -> Option<MortgageConfig> {
    if atty::is(atty::Stream::Stdin) {
        return None;
    }

    let mut buffer = String::new();
    if let Err(e) = io::stdin().read_to_string(&mut buffer) {
        warn!(error = %e, "failed to read stdin");
        return None;
    }
    parse_piped(&buffer)
}

fn parse_piped(buffer: &str) -> Option<MortgageConfig> {
    let trimmed = buffer.trim();
    if trimmed.is_empty() {
        return None;
    }

    match serde_json::from_str(trimmed) {
        Ok(layer) => Some(layer),
        Err(e) => {
            warn!(error = %e, "ignoring malformed JSON on stdin");
            None
        }
    }
}
