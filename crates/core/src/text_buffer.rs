use std::fmt::Display;

use crate::EncodingError;

const UTF8_BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];
const UTF16_LE_BOM: [u8; 2] = [0xFF, 0xFE];
const UTF16_BE_BOM: [u8; 2] = [0xFE, 0xFF];

/// Text encoding detected when a file is loaded and reused when it is written back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEncoding {
    Utf8 { bom: bool },
    Utf16Le { bom: bool },
    Utf16Be { bom: bool },
    /// Single-byte fallback; maps every byte to the char of the same value, so legacy
    /// code pages survive a round trip untouched.
    Latin1,
}

impl TextEncoding {
    /// Sniff the encoding from a byte-order mark, falling back to content heuristics.
    #[must_use]
    pub fn detect(bytes: &[u8]) -> Self {
        if bytes.starts_with(&UTF8_BOM) {
            return Self::Utf8 { bom: true };
        }
        if bytes.starts_with(&UTF16_LE_BOM) {
            return Self::Utf16Le { bom: true };
        }
        if bytes.starts_with(&UTF16_BE_BOM) {
            return Self::Utf16Be { bom: true };
        }
        if bytes.len() % 2 == 0 && bytes.contains(&0) {
            let odd_nuls = bytes.iter().skip(1).step_by(2).filter(|b| **b == 0).count();
            let even_nuls = bytes.iter().step_by(2).filter(|b| **b == 0).count();
            let quarter = bytes.len() / 4;
            if odd_nuls > quarter && odd_nuls > even_nuls {
                return Self::Utf16Le { bom: false };
            }
            if even_nuls > quarter && even_nuls > odd_nuls {
                return Self::Utf16Be { bom: false };
            }
        }
        if std::str::from_utf8(bytes).is_ok() {
            Self::Utf8 { bom: false }
        } else {
            Self::Latin1
        }
    }

    const fn bom_len(self) -> usize {
        match self {
            Self::Utf8 { bom: true } => UTF8_BOM.len(),
            Self::Utf16Le { bom: true } | Self::Utf16Be { bom: true } => UTF16_LE_BOM.len(),
            _ => 0,
        }
    }
}

impl Display for TextEncoding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (name, bom) = match self {
            Self::Utf8 { bom } => ("UTF-8", *bom),
            Self::Utf16Le { bom } => ("UTF-16LE", *bom),
            Self::Utf16Be { bom } => ("UTF-16BE", *bom),
            Self::Latin1 => ("ISO-8859-1", false),
        };
        if bom {
            write!(f, "{name} (BOM)")
        } else {
            write!(f, "{name}")
        }
    }
}

/// Decoded file content together with the encoding it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextBuffer {
    text: String,
    encoding: TextEncoding,
}

impl TextBuffer {
    #[must_use]
    pub fn new(text: impl Into<String>, encoding: TextEncoding) -> Self {
        Self {
            text: text.into(),
            encoding,
        }
    }

    /// # Errors
    /// Returns [`EncodingError::Undecodable`] if the content does not match the encoding
    /// its byte-order mark announces.
    pub fn decode(bytes: &[u8]) -> Result<Self, EncodingError> {
        let encoding = TextEncoding::detect(bytes);
        let body = &bytes[encoding.bom_len()..];
        let text = match encoding {
            TextEncoding::Utf8 { .. } => String::from_utf8(body.to_vec())
                .map_err(|_| EncodingError::Undecodable { encoding })?,
            TextEncoding::Utf16Le { .. } => decode_utf16(body, u16::from_le_bytes, encoding)?,
            TextEncoding::Utf16Be { .. } => decode_utf16(body, u16::from_be_bytes, encoding)?,
            TextEncoding::Latin1 => body.iter().map(|b| char::from(*b)).collect(),
        };
        Ok(Self { text, encoding })
    }

    /// # Errors
    /// Returns [`EncodingError::Unencodable`] if the text holds a character the
    /// encoding cannot represent.
    pub fn encode(&self) -> Result<Vec<u8>, EncodingError> {
        let mut bytes = Vec::with_capacity(self.text.len() + 3);
        match self.encoding {
            TextEncoding::Utf8 { bom } => {
                if bom {
                    bytes.extend_from_slice(&UTF8_BOM);
                }
                bytes.extend_from_slice(self.text.as_bytes());
            }
            TextEncoding::Utf16Le { bom } => {
                if bom {
                    bytes.extend_from_slice(&UTF16_LE_BOM);
                }
                bytes.extend(self.text.encode_utf16().flat_map(u16::to_le_bytes));
            }
            TextEncoding::Utf16Be { bom } => {
                if bom {
                    bytes.extend_from_slice(&UTF16_BE_BOM);
                }
                bytes.extend(self.text.encode_utf16().flat_map(u16::to_be_bytes));
            }
            TextEncoding::Latin1 => {
                for character in self.text.chars() {
                    let byte = u8::try_from(u32::from(character)).map_err(|_| {
                        EncodingError::Unencodable {
                            character,
                            encoding: self.encoding,
                        }
                    })?;
                    bytes.push(byte);
                }
            }
        }
        Ok(bytes)
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub const fn encoding(&self) -> TextEncoding {
        self.encoding
    }

    /// Replace the content, keeping the encoding.
    pub fn set_text(&mut self, text: String) {
        self.text = text;
    }

    /// Same content, explicitly re-targeted to another encoding.
    #[must_use]
    pub fn with_encoding(self, encoding: TextEncoding) -> Self {
        Self { encoding, ..self }
    }
}

fn decode_utf16(
    body: &[u8],
    to_unit: fn([u8; 2]) -> u16,
    encoding: TextEncoding,
) -> Result<String, EncodingError> {
    if body.len() % 2 != 0 {
        return Err(EncodingError::Undecodable { encoding });
    }
    let units = body
        .chunks_exact(2)
        .map(|pair| to_unit([pair[0], pair[1]]))
        .collect::<Vec<_>>();
    String::from_utf16(&units).map_err(|_| EncodingError::Undecodable { encoding })
}
