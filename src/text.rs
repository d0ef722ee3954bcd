pub fn shorten_hex(hex: &str) -> String {
    if hex.len() <= 11 {
        return hex.to_string();
    }
    let heading = &hex[0..5];
    let trail = &hex[(hex.len() - 5)..];
    format!("{heading}:{trail}")
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_shorten_hex() {
        assert_eq!(
            shorten_hex("4d39c23b3b03bf99494df5f3a149c7908ae1bc7416807fdd6b34a31886eaae25"),
            "4d39c:aae25"
        );
    }

    #[test]
    fn test_shorten_hex_short_input_is_unchanged() {
        assert_eq!(shorten_hex("feedface"), "feedface");
    }
}
