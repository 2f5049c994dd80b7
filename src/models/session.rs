//! Login session models

/// A Discord user's stored backend session (token already decrypted)
#[derive(Debug, Clone)]
pub struct Session {
    pub student_id: String,
    pub token: String,
}
