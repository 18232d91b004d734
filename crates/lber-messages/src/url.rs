//! Minimal LDAP URL parsing for referrals.
//!
//! Covers the RFC 4516 subset referrals actually carry:
//! `scheme://[host[:port]][/dn]`. Attributes, scope, filter, and
//! extensions after the DN are out of scope and rejected.

use std::fmt;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum LdapUrlError {
    #[error("missing scheme separator \"://\"")]
    MissingScheme,

    #[error("unsupported scheme {0:?}, expected ldap or ldaps")]
    UnsupportedScheme(String),

    #[error("invalid port {0:?}")]
    InvalidPort(String),

    #[error("unsupported URL components after the DN: {0:?}")]
    TrailingComponents(String),
}

/// A parsed LDAP URL.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LdapUrl {
    /// True for `ldaps`.
    pub secure: bool,
    pub host: Option<String>,
    pub port: Option<u16>,
    pub dn: Option<String>,
}

impl LdapUrl {
    /// The sentinel for a referral whose URL could not be kept. All
    /// fields empty; renders as `ldap://`.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        !self.secure && self.host.is_none() && self.port.is_none() && self.dn.is_none()
    }

    /// Parse `scheme://[host[:port]][/dn]`.
    ///
    /// # Errors
    ///
    /// See [`LdapUrlError`].
    pub fn parse(input: &str) -> Result<Self, LdapUrlError> {
        let (scheme, rest) = input.split_once("://").ok_or(LdapUrlError::MissingScheme)?;
        let secure = match scheme {
            "ldap" => false,
            "ldaps" => true,
            other => return Err(LdapUrlError::UnsupportedScheme(other.to_owned())),
        };

        let (authority, dn) = match rest.split_once('/') {
            Some((authority, dn)) => (authority, Some(dn)),
            None => (rest, None),
        };

        if let Some(dn) = dn {
            if dn.contains('?') {
                return Err(LdapUrlError::TrailingComponents(dn.to_owned()));
            }
        }

        let (host, port) = match authority.split_once(':') {
            Some((host, port)) => {
                let port = port
                    .parse::<u16>()
                    .map_err(|_| LdapUrlError::InvalidPort(port.to_owned()))?;
                (host, Some(port))
            }
            None => (authority, None),
        };

        Ok(Self {
            secure,
            host: (!host.is_empty()).then(|| host.to_owned()),
            port,
            dn: dn.filter(|dn| !dn.is_empty()).map(str::to_owned),
        })
    }
}

impl fmt::Display for LdapUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(if self.secure { "ldaps://" } else { "ldap://" })?;
        if let Some(host) = &self.host {
            f.write_str(host)?;
        }
        if let Some(port) = self.port {
            write!(f, ":{port}")?;
        }
        if let Some(dn) = &self.dn {
            write!(f, "/{dn}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_url() {
        let url = LdapUrl::parse("ldap://ldap.example.com:10389/dc=example,dc=com").unwrap();
        assert!(!url.secure);
        assert_eq!(url.host.as_deref(), Some("ldap.example.com"));
        assert_eq!(url.port, Some(10389));
        assert_eq!(url.dn.as_deref(), Some("dc=example,dc=com"));
        assert_eq!(
            url.to_string(),
            "ldap://ldap.example.com:10389/dc=example,dc=com"
        );
    }

    #[test]
    fn scheme_only_is_the_empty_sentinel() {
        let url = LdapUrl::parse("ldap://").unwrap();
        assert!(url.is_empty());
        assert_eq!(url, LdapUrl::empty());
    }

    #[test]
    fn ldaps_without_port_or_dn() {
        let url = LdapUrl::parse("ldaps://directory").unwrap();
        assert!(url.secure);
        assert_eq!(url.host.as_deref(), Some("directory"));
        assert_eq!(url.port, None);
        assert_eq!(url.dn, None);
    }

    #[test]
    fn rejects_bad_inputs() {
        assert_eq!(
            LdapUrl::parse("example.com").unwrap_err(),
            LdapUrlError::MissingScheme
        );
        assert_eq!(
            LdapUrl::parse("http://example.com").unwrap_err(),
            LdapUrlError::UnsupportedScheme("http".to_owned())
        );
        assert_eq!(
            LdapUrl::parse("ldap://host:99999").unwrap_err(),
            LdapUrlError::InvalidPort("99999".to_owned())
        );
        assert!(matches!(
            LdapUrl::parse("ldap://host/dc=x?cn?sub").unwrap_err(),
            LdapUrlError::TrailingComponents(_)
        ));
    }
}
