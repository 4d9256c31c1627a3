// attributes.rs - Attribute tokenizer for an opening tag.
//
// The raw attribute text is split on whitespace and then repaired: words
// that belong to a double-quoted value containing spaces are glued back
// onto the token that opened the quote.

use std::borrow::Cow;

use smallvec::SmallVec;

/// One `name=value` pair. Bare attributes carry their name as the value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute<'t> {
    pub name: &'t str,
    pub value: Cow<'t, str>,
}

/// Attributes of one tag, in first-seen order. Names are unique; a repeated
/// name overwrites the earlier value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes<'t> {
    entries: SmallVec<[Attribute<'t>; 4]>,
}

// Whitespace-separated words making up one attribute.
struct Token<'t> {
    words: SmallVec<[&'t str; 2]>,
}

impl<'t> Token<'t> {
    fn new(word: &'t str) -> Self {
        let mut words = SmallVec::new();
        words.push(word);
        Token { words }
    }

    // A `name="...` token whose closing quote has not been seen yet.
    fn has_open_quote(&self) -> bool {
        let head = self.words[0];
        let Some(eq) = head.find('=') else {
            return false;
        };
        let value = &head[eq + 1..];
        if !value.starts_with('"') {
            return false;
        }
        match self.words[1..].last() {
            Some(last) => !last.ends_with('"'),
            None => value.len() < 2 || !value.ends_with('"'),
        }
    }

    fn into_attribute(self) -> Attribute<'t> {
        let head = self.words[0];
        match head.find('=') {
            Some(eq) if eq > 0 => {
                let value = if self.words.len() == 1 {
                    Cow::Borrowed(head[eq + 1..].trim_matches('"'))
                } else {
                    let mut joined = String::from(&head[eq + 1..]);
                    for word in &self.words[1..] {
                        joined.push(' ');
                        joined.push_str(word);
                    }
                    Cow::Owned(joined.trim_matches('"').to_owned())
                };
                Attribute {
                    name: &head[..eq],
                    value,
                }
            }
            _ => Attribute {
                name: head,
                value: Cow::Borrowed(head),
            },
        }
    }
}

impl<'t> Attributes<'t> {
    pub fn new() -> Self {
        Attributes::default()
    }

    /// Tokenize the attribute text of an opening tag (everything between the
    /// tag name and its closing `>`).
    ///
    /// # Examples
    ///
    /// ```
    /// use linkscan::attributes::Attributes;
    ///
    /// let attrs = Attributes::parse(r#"href="/a" title="two words" hidden"#);
    /// assert_eq!(attrs.get("href"), Some("/a"));
    /// assert_eq!(attrs.get("title"), Some("two words"));
    /// assert_eq!(attrs.get("hidden"), Some("hidden"));
    /// ```
    pub fn parse(raw: &'t str) -> Self {
        let mut tokens: SmallVec<[Token<'t>; 8]> = SmallVec::new();
        for word in raw.split_ascii_whitespace() {
            match tokens.last_mut() {
                Some(previous) if !word.contains('=') && previous.has_open_quote() => {
                    previous.words.push(word);
                }
                _ => tokens.push(Token::new(word)),
            }
        }

        let mut attributes = Attributes::new();
        for token in tokens {
            // Trailing slash of a self-closing tag.
            if token.words.len() == 1 && token.words[0] == "/" {
                continue;
            }
            attributes.insert(token.into_attribute());
        }
        attributes
    }

    /// Add `attribute`, replacing the value of an attribute with the same name.
    pub fn insert(&mut self, attribute: Attribute<'t>) {
        match self.entries.iter_mut().find(|entry| entry.name == attribute.name) {
            Some(entry) => entry.value = attribute.value,
            None => self.entries.push(attribute),
        }
    }

    /// Value of the attribute called exactly `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|entry| entry.name == name)
            .map(|entry| entry.value.as_ref())
    }

    /// Value of the last attribute whose name matches `name` ignoring ASCII
    /// case.
    pub fn get_ignore_ascii_case(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .rev()
            .find(|entry| entry.name.eq_ignore_ascii_case(name))
            .map(|entry| entry.value.as_ref())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Attribute<'t>> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
