use serde::{Deserialize, Deserializer, Serialize};
use validator::Validate;

use crate::models::user::User;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: User,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminLoginResponse {
    pub token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SendOtpRequest {
    #[validate(length(min = 6, max = 15, message = "phone number must be 6-15 characters"))]
    pub phone_number: String,
}

fn deserialize_otp_flexible<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum StringOrInt {
        String(String),
        Int(u64),
    }

    Ok(Option::<StringOrInt>::deserialize(deserializer)?.map(|code| match code {
        StringOrInt::String(s) => s,
        StringOrInt::Int(n) => n.to_string(),
    }))
}

/// Development backends echo the generated code, as a string or a bare
/// number; production ones do not.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SendOtpResponse {
    #[serde(default, deserialize_with = "deserialize_otp_flexible")]
    pub otp: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct VerifyOtpRequest {
    #[validate(length(min = 6, max = 15, message = "phone number must be 6-15 characters"))]
    pub phone_number: String,
    #[validate(length(min = 4, max = 8, message = "OTP must be 4-8 digits"))]
    pub otp: String,
}
