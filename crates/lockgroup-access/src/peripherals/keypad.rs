//! Credential capture from a keystroke stream

use lockgroup_core::config::KeypadConfig;

/// Raw keystrokes from the entry keypad, already debounced
pub trait KeystrokeSource {
    /// Next key, or `None` once the stream is closed
    fn next_key(&mut self) -> Option<char>;
}

impl<I: Iterator<Item = char>> KeystrokeSource for I {
    fn next_key(&mut self) -> Option<char> {
        self.next()
    }
}

/// Collect keys up to the terminator
///
/// Keys beyond `max_length` are dropped, as the entry field on the terminal
/// screen stops accepting input. Returns `None` when the stream closes before
/// the terminator arrives.
pub fn capture_credential<S: KeystrokeSource + ?Sized>(
    source: &mut S,
    config: &KeypadConfig,
) -> Option<String> {
    let mut credential = String::new();
    let mut length = 0usize;
    while let Some(key) = source.next_key() {
        if key == config.terminator {
            tracing::debug!(length, "Credential entry terminated");
            return Some(credential);
        }
        if length < config.max_length {
            credential.push(key);
            length += 1;
        }
    }
    tracing::debug!(length, "Keystroke stream closed before terminator");
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(max_length: usize) -> KeypadConfig {
        KeypadConfig {
            terminator: '#',
            max_length,
        }
    }

    #[test]
    fn stops_at_terminator() {
        let mut keys = "1234#99".chars();
        assert_eq!(
            capture_credential(&mut keys, &config(15)),
            Some("1234".to_string())
        );
        // Remaining keys are left for the next entry
        assert_eq!(keys.collect::<String>(), "99");
    }

    #[test]
    fn drops_overflow_keys() {
        let mut keys = "123456#".chars();
        assert_eq!(
            capture_credential(&mut keys, &config(4)),
            Some("1234".to_string())
        );
    }

    #[test]
    fn closed_stream_yields_none() {
        let mut keys = "1234".chars();
        assert_eq!(capture_credential(&mut keys, &config(15)), None);
    }

    #[test]
    fn immediate_terminator_is_empty_credential() {
        let mut keys = "#".chars();
        assert_eq!(capture_credential(&mut keys, &config(15)), Some(String::new()));
    }
}
