//! Byte-level decoding of uploaded measurement files.

/// One line of the uploaded file, without its terminator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLine {
    pub number: usize,
    pub text: String,
}

/// The uploaded file as an ordered sequence of lines.
///
/// Decoding maps every byte to the code point of the same value (ISO-8859-1),
/// so construction never fails whatever the instrument wrote.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RawDocument {
    lines: Vec<SourceLine>,
}

impl RawDocument {
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self::from_text(&decode_latin1(bytes))
    }

    pub fn from_text(text: &str) -> Self {
        let normalized = text.replace("\r\n", "\n").replace('\r', "\n");
        if normalized.is_empty() {
            return Self::default();
        }

        let body = normalized.strip_suffix('\n').unwrap_or(&normalized);
        let lines = body
            .split('\n')
            .enumerate()
            .map(|(index, text)| SourceLine {
                number: index + 1,
                text: text.to_string(),
            })
            .collect();
        Self { lines }
    }

    pub fn lines(&self) -> &[SourceLine] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

pub fn decode_latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&byte| char::from(byte)).collect()
}
