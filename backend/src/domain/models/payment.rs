//! Payment details captured at checkout.
//!
//! Each payment method carries exactly the fields it needs, so validation is
//! a per-variant check rather than a switch over a method string.
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use shared::MobileMoneyProvider;

static PHONE_NUMBER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\+?[1-9]\d{8,14}$").expect("phone number pattern is valid")
});

static EMAIL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid")
});

/// Shortest wallet address accepted for crypto payments
pub const MIN_CRYPTO_ADDRESS_LEN: usize = 26;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "kebab-case")]
pub enum PaymentDetails {
    MobileMoney {
        provider: MobileMoneyProvider,
        phone_number: String,
    },
    #[serde(rename = "paypal")]
    PayPal { email: String },
    Crypto { address: String },
}

impl PaymentDetails {
    pub fn validate(&self) -> Result<(), PaymentValidationError> {
        match self {
            PaymentDetails::MobileMoney { phone_number, .. } => {
                // Operators accept numbers typed with spaces, the gateway does not
                let compact: String = phone_number.chars().filter(|c| !c.is_whitespace()).collect();
                if !PHONE_NUMBER.is_match(&compact) {
                    return Err(PaymentValidationError::InvalidPhoneNumber);
                }
            }
            PaymentDetails::PayPal { email } => {
                if !is_valid_email(email) {
                    return Err(PaymentValidationError::InvalidEmail);
                }
            }
            PaymentDetails::Crypto { address } => {
                if address.trim().len() < MIN_CRYPTO_ADDRESS_LEN {
                    return Err(PaymentValidationError::InvalidCryptoAddress);
                }
            }
        }
        Ok(())
    }

    /// Label shown on receipts and in logs
    pub fn method_name(&self) -> String {
        match self {
            PaymentDetails::MobileMoney { provider, .. } => provider.to_string(),
            PaymentDetails::PayPal { .. } => "PayPal".to_string(),
            PaymentDetails::Crypto { .. } => "Bitcoin".to_string(),
        }
    }
}

/// Loose shape check shared by PayPal payments and user registration
pub fn is_valid_email(email: &str) -> bool {
    EMAIL.is_match(email.trim())
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum PaymentValidationError {
    #[error("Valid phone number is required")]
    InvalidPhoneNumber,
    #[error("Valid email is required")]
    InvalidEmail,
    #[error("Valid Bitcoin address is required")]
    InvalidCryptoAddress,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mobile(phone: &str) -> PaymentDetails {
        PaymentDetails::MobileMoney {
            provider: MobileMoneyProvider::OrangeMoney,
            phone_number: phone.to_string(),
        }
    }

    #[test]
    fn test_mobile_money_phone_numbers() {
        assert!(mobile("+237690000000").validate().is_ok());
        assert!(mobile("237690000000").validate().is_ok());
        assert!(mobile("+237 6 90 00 00 00").validate().is_ok());

        assert_eq!(mobile("").validate(), Err(PaymentValidationError::InvalidPhoneNumber));
        assert_eq!(mobile("12345").validate(), Err(PaymentValidationError::InvalidPhoneNumber));
        assert_eq!(mobile("0690000000").validate(), Err(PaymentValidationError::InvalidPhoneNumber));
        assert_eq!(mobile("+2376900abc00").validate(), Err(PaymentValidationError::InvalidPhoneNumber));
    }

    #[test]
    fn test_paypal_email() {
        let ok = PaymentDetails::PayPal { email: "buyer@example.com".to_string() };
        assert!(ok.validate().is_ok());

        for bad in ["", "buyer", "buyer@example", "buyer @example.com"] {
            let details = PaymentDetails::PayPal { email: bad.to_string() };
            assert_eq!(details.validate(), Err(PaymentValidationError::InvalidEmail), "{}", bad);
        }
    }

    #[test]
    fn test_crypto_address_length() {
        let ok = PaymentDetails::Crypto { address: "1BvBMSEYstWetqTFn5Au4m4GFg7xJaNVN2".to_string() };
        assert!(ok.validate().is_ok());

        let short = PaymentDetails::Crypto { address: "1BvBMSEYstWetqTFn5Au4m4".to_string() };
        assert_eq!(short.validate(), Err(PaymentValidationError::InvalidCryptoAddress));
    }

    #[test]
    fn test_method_names() {
        let mtn = PaymentDetails::MobileMoney {
            provider: MobileMoneyProvider::MtnMomo,
            phone_number: "+237670000000".to_string(),
        };
        assert_eq!(mtn.method_name(), "MTN MoMo");
        assert_eq!(PaymentDetails::PayPal { email: String::new() }.method_name(), "PayPal");
        assert_eq!(PaymentDetails::Crypto { address: String::new() }.method_name(), "Bitcoin");
    }
}
