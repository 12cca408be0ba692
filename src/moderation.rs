//! Content moderation for outbound chat messages.
//!
//! A message flagged here is neither persisted nor broadcast; the sender
//! gets a private rejection and nothing else happens. Matching is
//! word-boundary based on lowercased tokens, so "class" is fine while
//! "you ASS" is not.

/// Words rejected by the default policy.
const DEFAULT_BLOCKLIST: &[&str] = &[
    "arse", "ass", "asshole", "bastard", "bitch", "bollocks", "crap", "cunt", "damn", "dick",
    "fuck", "fucker", "fucking", "piss", "prick", "shit", "slut", "twat", "wanker",
];

/// Profanity policy applied to chat text before persistence and broadcast.
///
/// Location shares bypass this policy; their text is generated by the
/// server, not the client.
#[derive(Debug, Clone)]
pub struct ProfanityPolicy {
    blocklist: Vec<String>,
}

impl Default for ProfanityPolicy {
    fn default() -> Self {
        Self {
            blocklist: DEFAULT_BLOCKLIST.iter().map(|w| w.to_string()).collect(),
        }
    }
}

impl ProfanityPolicy {
    /// Build a policy with a custom blocklist (entries are lowercased).
    pub fn with_blocklist<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            blocklist: words
                .into_iter()
                .map(|w| w.as_ref().to_lowercase())
                .collect(),
        }
    }

    /// Whether the text contains a blocked word.
    pub fn is_profane(&self, text: &str) -> bool {
        text.split(|c: char| !c.is_alphanumeric())
            .filter(|token| !token.is_empty())
            .any(|token| {
                let token = token.to_lowercase();
                self.blocklist.iter().any(|blocked| *blocked == token)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_text_passes() {
        // given:
        let policy = ProfanityPolicy::default();

        // when / then:
        assert!(!policy.is_profane("hello everyone, nice to meet you"));
    }

    #[test]
    fn test_blocked_word_is_flagged() {
        // given:
        let policy = ProfanityPolicy::default();

        // when / then:
        assert!(policy.is_profane("well, shit"));
    }

    #[test]
    fn test_matching_is_case_insensitive() {
        // given:
        let policy = ProfanityPolicy::default();

        // when / then:
        assert!(policy.is_profane("SHIT happens"));
    }

    #[test]
    fn test_word_boundaries_are_respected() {
        // given: "class" and "assist" contain a blocked word as a substring
        let policy = ProfanityPolicy::default();

        // when / then:
        assert!(!policy.is_profane("the class will assist you"));
    }

    #[test]
    fn test_punctuation_does_not_hide_words() {
        // given:
        let policy = ProfanityPolicy::default();

        // when / then:
        assert!(policy.is_profane("damn!"));
    }

    #[test]
    fn test_custom_blocklist() {
        // given:
        let policy = ProfanityPolicy::with_blocklist(["Voldemort"]);

        // when / then:
        assert!(policy.is_profane("he said voldemort out loud"));
        assert!(!policy.is_profane("well, shit"));
    }
}
