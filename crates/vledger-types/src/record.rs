use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// The versioned business object stored under each ledger key.
///
/// Every field is an opaque string; the contract only checks presence.
/// The serde names are the persisted encoding of existing ledger data and
/// must never be renamed. Missing fields decode as empty strings.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct Record {
    pub clarity: String,
    pub color: String,
    pub cut: String,
    pub carat: String,
    #[serde(rename = "cert")]
    pub certification: String,
    pub name: String,
    #[serde(rename = "transid")]
    pub trans_id: String,
    #[serde(rename = "holdername")]
    pub holder: String,
    #[serde(rename = "timeStamp")]
    pub timestamp: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub image: String,
    pub latitude: String,
    pub longitude: String,
}

impl Record {
    /// Number of positional fields a record is built from.
    pub const FIELD_COUNT: usize = 13;

    /// Build a record from its 13 positional field values.
    ///
    /// Order: clarity, color, cut, carat, cert, name, transid, holder,
    /// timestamp, type, image, latitude, longitude.
    pub fn from_fields<S: AsRef<str>>(fields: &[S]) -> Result<Self, TypeError> {
        let [clarity, color, cut, carat, certification, name, trans_id, holder, timestamp, kind, image, latitude, longitude] =
            fields
        else {
            return Err(TypeError::FieldCount {
                expected: Self::FIELD_COUNT,
                actual: fields.len(),
            });
        };

        Ok(Self {
            clarity: clarity.as_ref().to_owned(),
            color: color.as_ref().to_owned(),
            cut: cut.as_ref().to_owned(),
            carat: carat.as_ref().to_owned(),
            certification: certification.as_ref().to_owned(),
            name: name.as_ref().to_owned(),
            trans_id: trans_id.as_ref().to_owned(),
            holder: holder.as_ref().to_owned(),
            timestamp: timestamp.as_ref().to_owned(),
            kind: kind.as_ref().to_owned(),
            image: image.as_ref().to_owned(),
            latitude: latitude.as_ref().to_owned(),
            longitude: longitude.as_ref().to_owned(),
        })
    }

    /// The record's fields in positional order.
    pub fn to_fields(&self) -> Vec<String> {
        vec![
            self.clarity.clone(),
            self.color.clone(),
            self.cut.clone(),
            self.carat.clone(),
            self.certification.clone(),
            self.name.clone(),
            self.trans_id.clone(),
            self.holder.clone(),
            self.timestamp.clone(),
            self.kind.clone(),
            self.image.clone(),
            self.latitude.clone(),
            self.longitude.clone(),
        ]
    }

    /// Canonical JSON encoding as stored in the ledger.
    pub fn to_json_bytes(&self) -> Result<Vec<u8>, TypeError> {
        serde_json::to_vec(self).map_err(|e| TypeError::Serialization(e.to_string()))
    }

    /// Decode a stored value.
    pub fn from_json_slice(bytes: &[u8]) -> Result<Self, TypeError> {
        serde_json::from_slice(bytes).map_err(|e| TypeError::Serialization(e.to_string()))
    }

    /// Set the geolocation pair.
    pub fn set_location(&mut self, latitude: impl Into<String>, longitude: impl Into<String>) {
        self.latitude = latitude.into();
        self.longitude = longitude.into();
    }
}
