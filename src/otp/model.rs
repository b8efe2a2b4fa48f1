use chrono::{DateTime, Utc};
use serde::Deserialize;

/// One issued code. Lives only in process memory; replaced on re-issue,
/// removed on successful verification or explicit clearance.
#[derive(Debug, Clone)]
pub struct OtpEntry {
    pub code: String,
    pub issued_at: DateTime<Utc>,
}

#[derive(Deserialize)]
pub struct SendOtpRequest {
    pub email: String,
}

#[derive(Deserialize)]
pub struct VerifyOtpRequest {
    pub email: String,
    pub code: String,
}

#[derive(Deserialize)]
pub struct EmailQuery {
    pub email: String,
}
