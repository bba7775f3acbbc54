use vledger_types::Record;

use crate::error::{ContractError, ContractResult};

/// Decode a stored value, surfacing corrupt data instead of defaulting.
pub(crate) fn decode_record(key: &str, bytes: &[u8]) -> ContractResult<Record> {
    Record::from_json_slice(bytes).map_err(|e| ContractError::Decode {
        key: key.to_owned(),
        reason: e.to_string(),
    })
}

/// Encode a record for storage.
///
/// The failure taxonomy has no separate encode class, so a serialization
/// failure is reported as [`ContractError::Decode`] for `key`: the record
/// could not be brought to or from its stored form.
pub(crate) fn encode_record(key: &str, record: &Record) -> ContractResult<Vec<u8>> {
    record.to_json_bytes().map_err(|e| ContractError::Decode {
        key: key.to_owned(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corrupt_value_reports_key() {
        match decode_record("7", b"{\"holdername\":") {
            Err(ContractError::Decode { key, .. }) => assert_eq!(key, "7"),
            other => panic!("expected decode error, got {other:?}"),
        }
    }

    #[test]
    fn encode_then_decode() {
        let record = Record {
            holder: "Kapil".into(),
            ..Record::default()
        };
        let bytes = encode_record("1", &record).unwrap();
        assert_eq!(decode_record("1", &bytes).unwrap(), record);
    }
}
