use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Customer {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub api_key_hash: String,
    pub created_at: i64,
}

#[derive(Debug, Deserialize)]
pub struct CreateCustomer {
    pub name: String,
    pub email: String,
}

/// A freshly created customer together with the plaintext API key.
/// The key is only ever returned here; the database keeps its hash.
#[derive(Debug, Serialize)]
pub struct CustomerWithApiKey {
    pub customer: Customer,
    pub api_key: String,
}
