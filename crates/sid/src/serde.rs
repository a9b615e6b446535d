use serde::{Serialize, Serializer};

use crate::{ENCODED_LEN, Sid};

/// Serializes as the 32-character text form.
impl Serialize for Sid {
    fn serialize<S>(&self, s: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut buf = [0_u8; ENCODED_LEN];
        s.serialize_str(self.encode_to_buf(&mut buf))
    }
}

/// Serializes a [`Sid`] as its 24 raw bytes instead of text, for compact
/// binary formats.
///
/// ```
/// #[derive(serde::Serialize)]
/// struct Row {
///     #[serde(serialize_with = "sid::as_sid_bytes::serialize")]
///     id: sid::Sid,
/// }
/// ```
pub mod as_sid_bytes {
    use super::*;

    pub fn serialize<S>(id: &Sid, s: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        s.serialize_bytes(id.as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct Row {
        id: Sid,
        #[serde(serialize_with = "as_sid_bytes::serialize")]
        raw: Sid,
    }

    #[test]
    fn serializes_text_and_bytes() {
        let id = Sid::from_bytes([0xFF; 24]);
        let json = serde_json::to_value(Row { id, raw: id }).unwrap();

        assert_eq!(json["id"], "_".repeat(ENCODED_LEN));
        assert_eq!(json["raw"].as_array().unwrap().len(), 24);
        assert!(json["raw"].as_array().unwrap().iter().all(|b| b == 255));
    }
}
