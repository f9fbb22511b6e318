use crate::lister::Lister;

/// Result type alias for toolkit operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for listing operations.
///
/// Limit and sort validation never produce errors; these cover decoding
/// request parameters and reading typed values out of filters and meta.
#[derive(Debug, thiserror::Error)]
pub enum Error {
   /// Parameters were not valid JSON, or did not match the expected shape.
   #[error("json decode failed: {0}")]
   Json(#[from] serde_json::Error),

   /// Parameters were not valid URL-safe Base64.
   #[error("base64 decode failed: {0}")]
   Base64(#[from] base64::DecodeError),

   /// Base64 payload decoded to bytes that are not UTF-8.
   #[error("decoded parameters are not valid utf-8: {0}")]
   Utf8(#[from] std::string::FromUtf8Error),

   /// A filter or meta value could not be converted to the requested type.
   #[error("cannot cast {found} value to {expected}")]
   InvalidCast {
      expected: &'static str,
      found: &'static str,
   },
}

impl Error {
   /// Extract a structured error code from the error type.
   ///
   /// This provides machine-readable error codes for error handling.
   pub fn error_code(&self) -> String {
      match self {
         Error::Json(_) => "JSON_DECODE_ERROR".to_string(),
         Error::Base64(_) => "BASE64_DECODE_ERROR".to_string(),
         Error::Utf8(_) => "UTF8_DECODE_ERROR".to_string(),
         Error::InvalidCast { .. } => "INVALID_CAST".to_string(),
      }
   }

   /// Whether this error came from decoding request parameters.
   pub fn is_decode(&self) -> bool {
      matches!(self, Error::Json(_) | Error::Base64(_) | Error::Utf8(_))
   }
}

/// Parameters could not be decoded.
///
/// Carries a default-initialized [`Lister`] built from the same policy, so
/// callers can either abort or carry on with defaults.
#[derive(Debug, thiserror::Error)]
#[error("{error}")]
pub struct DecodeFailure {
   #[source]
   error: Error,
   lister: Box<Lister>,
}

impl DecodeFailure {
   pub(crate) fn new(error: Error, lister: Lister) -> Self {
      Self {
         error,
         lister: Box::new(lister),
      }
   }

   /// The underlying decode error.
   pub fn error(&self) -> &Error {
      &self.error
   }

   /// Take the default-initialized lister, dropping the error.
   pub fn into_lister(self) -> Lister {
      *self.lister
   }

   /// Split into the error and the default-initialized lister.
   pub fn into_parts(self) -> (Error, Lister) {
      (self.error, *self.lister)
   }
}
