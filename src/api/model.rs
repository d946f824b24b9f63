use crate::error::Error;
use serde::{Deserialize, Serialize};

/// The record a client asks us to publish: the lego `httpreq` provider request body.
#[derive(Deserialize, Debug, Clone, Default, Ord, PartialOrd, Eq, PartialEq)]
pub(super) struct PresentRequest {
    pub fqdn: String,
    pub value: String,
}

impl PresentRequest {
    /// The whole boundary validation: both fields must be non-empty. Anything further
    /// (trailing dot, token shape) is the ACME client's business.
    pub fn validate(&self) -> Result<(), Error> {
        if self.fqdn.is_empty() || self.value.is_empty() {
            return Err(Error::InvalidPresentRequest);
        }
        Ok(())
    }
}

#[derive(Serialize, Debug, Clone, Default, Ord, PartialOrd, Eq, PartialEq)]
pub(super) struct PresentResult {
    pub fqdn: String,
    pub value: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_fqdn_or_value_is_invalid() {
        let missing_fqdn = PresentRequest {
            fqdn: String::new(),
            value: "token".to_string(),
        };
        assert!(missing_fqdn.validate().is_err());

        let missing_value = PresentRequest {
            fqdn: "_acme-challenge.domain.".to_string(),
            value: String::new(),
        };
        assert!(missing_value.validate().is_err());
    }

    #[test]
    fn populated_request_is_valid() {
        let request = PresentRequest {
            fqdn: "_acme-challenge.domain.".to_string(),
            value: "token".to_string(),
        };
        assert!(request.validate().is_ok());
    }
}
