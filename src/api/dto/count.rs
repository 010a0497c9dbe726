//! Response for the count endpoints.

use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct CountResponse {
    pub count: i64,
}
