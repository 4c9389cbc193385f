/// Input to one analysis call: already-decoded text plus a display name.
#[derive(Debug, Clone, Copy)]
pub struct RawDocument<'a> {
    text: &'a str,
    name: &'a str,
    word_count: usize,
    character_count: usize,
}

impl<'a> RawDocument<'a> {
    pub fn new(text: &'a str, name: &'a str) -> Self {
        RawDocument {
            text,
            name,
            word_count: text.split_whitespace().count(),
            character_count: text.chars().count(),
        }
    }

    pub fn text(&self) -> &'a str {
        self.text
    }

    pub fn name(&self) -> &'a str {
        self.name
    }

    pub fn word_count(&self) -> usize {
        self.word_count
    }

    pub fn character_count(&self) -> usize {
        self.character_count
    }
}
