use std::string::{FromUtf8Error, FromUtf16Error};
use thiserror::Error;

/// Specific error details regarding `UTF` decoding of container entries.
#[derive(Error, Debug)]
pub enum UtfError {
    /// UTF-16 data with a byte order mark but an odd amount of bytes.
    #[error("UTF-16 data needs to contain an even amount of bytes")]
    UnevenByteCount,
    /// Data without a UTF-16 byte order mark is not valid UTF-8.
    #[error(transparent)]
    InvalidUtf8(FromUtf8Error),
    /// Data with a UTF-16 byte order mark is not valid UTF-16.
    #[error(transparent)]
    InvalidUtf16(FromUtf16Error),
}

/// Decodes container data as text, converting UTF-16 (with a BOM) into UTF-8
/// and dropping a UTF-8 BOM if present.
pub(crate) fn into_utf8_str(data: Vec<u8>) -> Result<String, UtfError> {
    if is_utf16(&data) {
        from_utf16(&data)
    } else {
        let mut string = String::from_utf8(data).map_err(UtfError::InvalidUtf8)?;
        if string.starts_with('\u{FEFF}') {
            string.drain(..'\u{FEFF}'.len_utf8());
        }
        Ok(string)
    }
}

/// Checks if a UTF-16 byte order mark (BOM) exists
fn is_utf16(data: &[u8]) -> bool {
    data.starts_with(b"\xFF\xFE") || data.starts_with(b"\xFE\xFF")
}

fn from_utf16(data: &[u8]) -> Result<String, UtfError> {
    // Determine byte order for little endian (le) and big endian (be)
    let endian = if data.starts_with(b"\xFF") {
        u16::from_le_bytes
    } else {
        u16::from_be_bytes
    };

    let utf16 = data[2..]
        .chunks(2)
        .map(|chunk| chunk.try_into().map(endian))
        .collect::<Result<Vec<_>, _>>()
        .map_err(|_| UtfError::UnevenByteCount)?;

    String::from_utf16(utf16.as_ref()).map_err(UtfError::InvalidUtf16)
}
