//! Application error carrying the process exit code.
//!
//! Exit codes:
//! - `2`: filesystem, input file, or usage errors ([`AppError::io`])
//! - `3`: the API answered with a non-zero `RESULT.STATUS` ([`AppError::api`])
//! - `4`: transport failures or undecodable API responses ([`AppError::transport`])

#[derive(Debug, Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn io(message: impl Into<String>) -> Self {
        Self::new(2, message)
    }

    pub fn api(message: impl Into<String>) -> Self {
        Self::new(3, message)
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::new(4, message)
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for AppError {}
