use ratatui::prelude::*;

use crate::domain::AuthorityKey;
use crate::text::shorten_hex;

pub struct Authority {
    key: AuthorityKey,
}

impl Authority {
    pub fn new(key: AuthorityKey) -> Self {
        Self { key }
    }

    pub fn shortened(&self) -> String {
        shorten_hex(self.key.as_str())
    }
}

impl From<Authority> for Text<'_> {
    fn from(value: Authority) -> Self {
        Text::from(value.shortened())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_shortened() {
        let key = AuthorityKey::new("4d39c23b3b03bf99494df5f3a149c7908ae1bc7416807fdd6b34a31886eaae25");
        let authority = Authority::new(key);
        assert_eq!(authority.shortened(), "4d39c:aae25");
    }
}
