use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeliveryAck {
    pub status: String,
}

impl DeliveryAck {
    pub fn received() -> Self {
        Self {
            status: "received".to_string(),
        }
    }
}
