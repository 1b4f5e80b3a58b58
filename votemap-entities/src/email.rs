use std::{fmt, str::FromStr};
use thiserror::Error;

#[derive(Debug, Clone, Eq, PartialEq, Ord, PartialOrd)]
pub struct EmailAddress {
    address: String,
    display_name: Option<String>,
}

impl EmailAddress {
    pub const fn new_unchecked(address: String) -> Self {
        Self {
            address,
            display_name: None,
        }
    }
    pub fn into_string(self) -> String {
        self.address
    }
    pub fn as_str(&self) -> &str {
        self.address.as_str()
    }
}

#[derive(Debug, Clone, Error)]
#[error("Invalid E-Mail address")]
pub struct EmailAddressParseError;

// `local@domain.tld`
fn has_mailbox_and_domain(addr: &str) -> bool {
    let Some((local, domain)) = addr.rsplit_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && domain.contains('.')
        && !domain.chars().any(char::is_whitespace)
}

impl FromStr for EmailAddress {
    type Err = EmailAddressParseError;
    fn from_str(s: &str) -> Result<EmailAddress, Self::Err> {
        let info = mailparse::addrparse(s.trim())
            .ok()
            .and_then(|list| list.extract_single_info())
            .ok_or(EmailAddressParseError)?;
        if !has_mailbox_and_domain(&info.addr) {
            return Err(EmailAddressParseError);
        }
        Ok(Self {
            address: info.addr,
            display_name: info.display_name,
        })
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.address)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_plain_address() {
        let addr: EmailAddress = "alice@example.com".parse().unwrap();
        assert_eq!(addr.as_str(), "alice@example.com");
    }

    #[test]
    fn parse_address_with_display_name() {
        let addr: EmailAddress = "Alice <alice@example.com>".parse().unwrap();
        assert_eq!(addr.to_string(), "alice@example.com");
    }

    #[test]
    fn reject_garbage() {
        assert!("".parse::<EmailAddress>().is_err());
        assert!("foo".parse::<EmailAddress>().is_err());
        assert!("foo@bar".parse::<EmailAddress>().is_err());
        assert!("@bar.tld".parse::<EmailAddress>().is_err());
        assert!("foo@.tld".parse::<EmailAddress>().is_err());
        assert!("foo@bar.tld".parse::<EmailAddress>().is_ok());
    }
}
