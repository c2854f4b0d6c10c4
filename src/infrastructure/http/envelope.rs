use crate::domain::error::DomainError;
use serde::Deserialize;

/// Uniform response envelope on most endpoints:
/// `{code, success, message, data, error}`.
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    #[serde(default)]
    pub code: Option<u16>,
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default = "Option::default")]
    pub data: Option<T>,
    #[serde(default)]
    pub error: Option<serde_json::Value>,
}

impl<T> Envelope<T> {
    /// Unwrap the payload; a 2xx response with `success: false` is still
    /// a remote error.
    pub fn into_data(self) -> Result<T, DomainError> {
        if !self.success {
            return Err(DomainError::Remote {
                status: self.code.unwrap_or(200),
                message: self
                    .message
                    .or_else(|| self.error.as_ref().and_then(|e| e.as_str().map(String::from)))
                    .unwrap_or_else(|| "An error occurred".into()),
            });
        }
        self.data
            .ok_or_else(|| DomainError::Parse("Response envelope had no data".into()))
    }
}

/// Error body shape on non-2xx responses: `{error?, message?, success?}`.
#[derive(Debug, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unwraps_successful_envelope() {
        let env: Envelope<Vec<i32>> =
            serde_json::from_str(r#"{"code":200,"success":true,"message":"ok","data":[1,2],"error":{}}"#)
                .unwrap();
        assert_eq!(env.into_data().unwrap(), vec![1, 2]);
    }

    #[test]
    fn failed_envelope_is_remote_error() {
        let env: Envelope<Vec<i32>> =
            serde_json::from_str(r#"{"code":422,"success":false,"message":"bad sku","data":null,"error":{}}"#)
                .unwrap();
        match env.into_data() {
            Err(DomainError::Remote { status, message }) => {
                assert_eq!(status, 422);
                assert_eq!(message, "bad sku");
            }
            other => panic!("expected remote error, got {other:?}"),
        }
    }

    #[test]
    fn missing_data_is_parse_error() {
        let env: Envelope<Vec<i32>> =
            serde_json::from_str(r#"{"success":true}"#).unwrap();
        assert!(matches!(env.into_data(), Err(DomainError::Parse(_))));
    }
}
