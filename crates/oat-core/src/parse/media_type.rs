use serde::{Deserialize, Serialize};

use super::schema::Schema;

/// A media type object. Encodings and examples are not consumed.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MediaType {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<Schema>,
}
