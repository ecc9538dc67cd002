//! CLI subcommand implementations.

pub mod data;
pub mod dataset;
pub mod daterange;
pub mod dimension;
pub mod status;
pub mod upload;
pub mod verify;

use knoema_api::types::Key;

/// Reads a member or submit key as typed on the command line: all digits is
/// numeric, anything else is text.
pub fn parse_key(raw: &str) -> Key {
    let raw = raw.trim();
    match raw.parse::<i64>() {
        Ok(v) => Key::Int(v),
        Err(_) => Key::from(raw),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_key() {
        assert_eq!(parse_key("1000010"), Key::Int(1000010));
        assert_eq!(parse_key(" 42 "), Key::Int(42));
        assert_eq!(parse_key("NGDPD"), Key::Text("NGDPD".to_string()));
        assert_eq!(parse_key("2010-2015"), Key::Text("2010-2015".to_string()));
    }
}
