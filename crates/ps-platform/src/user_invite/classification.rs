//! Email classification for invite batches
//!
//! Format is checked first, then the host: a free mail host is rejected
//! before the tenant's allowed domain list is consulted.

use std::collections::HashSet;

use regex::Regex;

use super::entity::{InviteRequest, InviteStatus};

/// Bulk-upload email pattern. Stricter than single-user entry: no quoted
/// local parts and a restricted character set.
pub fn bulk_email_pattern() -> &'static Regex {
    static PATTERN: std::sync::OnceLock<Regex> = std::sync::OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").unwrap()
    })
}

/// Lower-cased host part of an email address
pub fn email_host(email: &str) -> Option<String> {
    email
        .rsplit_once('@')
        .map(|(_, host)| host.trim().to_lowercase())
        .filter(|host| !host.is_empty())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    Valid,
    FormatInvalid,
    DomainFree,
    DomainNotAllowed,
}

impl Classification {
    /// Rejection status, `None` for valid emails
    pub fn status(self) -> Option<InviteStatus> {
        match self {
            Classification::Valid => None,
            Classification::FormatInvalid => Some(InviteStatus::UserEmailFormatInvalid),
            Classification::DomainFree => Some(InviteStatus::UserEmailDomainFree),
            Classification::DomainNotAllowed => Some(InviteStatus::UserEmailNotDomainAllowed),
        }
    }
}

/// A batch split by classification, each part in input order
#[derive(Debug, Default)]
pub struct PartitionedBatch {
    pub valid: Vec<InviteRequest>,
    pub format_invalid: Vec<InviteRequest>,
    pub domain_invalid: Vec<(InviteRequest, InviteStatus)>,
}

/// Classifies invite emails against the free-domain deny-list and a
/// tenant's allowed domains.
#[derive(Debug, Clone, Default)]
pub struct EmailClassifier {
    free_domains: HashSet<String>,
}

impl EmailClassifier {
    pub fn new<I, S>(free_domains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            free_domains: free_domains
                .into_iter()
                .map(|d| d.as_ref().trim().to_lowercase())
                .filter(|d| !d.is_empty())
                .collect(),
        }
    }

    /// `allowed_domains` must be lower-cased.
    pub fn classify(&self, email: &str, allowed_domains: &HashSet<String>) -> Classification {
        if !bulk_email_pattern().is_match(email) {
            return Classification::FormatInvalid;
        }
        let Some(host) = email_host(email) else {
            return Classification::FormatInvalid;
        };
        if self.free_domains.contains(&host) {
            Classification::DomainFree
        } else if !allowed_domains.contains(&host) {
            Classification::DomainNotAllowed
        } else {
            Classification::Valid
        }
    }

    pub fn partition(
        &self,
        requests: Vec<InviteRequest>,
        allowed_domains: &HashSet<String>,
    ) -> PartitionedBatch {
        let mut batch = PartitionedBatch::default();
        for request in requests {
            match self.classify(&request.email, allowed_domains) {
                Classification::Valid => batch.valid.push(request),
                Classification::FormatInvalid => batch.format_invalid.push(request),
                other => {
                    if let Some(status) = other.status() {
                        batch.domain_invalid.push((request, status));
                    }
                }
            }
        }
        batch
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn allowed(domains: &[&str]) -> HashSet<String> {
        domains.iter().map(|d| d.to_string()).collect()
    }

    fn classifier() -> EmailClassifier {
        EmailClassifier::new(["gmail.com", "Hotmail.com", "aol.com"])
    }

    #[test]
    fn test_bulk_pattern_rejects_quoted_local_part() {
        assert!(bulk_email_pattern().is_match("first.last+tag@contoso.com"));
        assert!(!bulk_email_pattern().is_match(r#""john smith"@contoso.com"#));
        assert!(!bulk_email_pattern().is_match("john!@contoso.com"));
        assert!(!bulk_email_pattern().is_match("john@contoso"));
    }

    #[test]
    fn test_free_domain_wins_over_allowed() {
        let allowed = allowed(&["gmail.com", "contoso.com"]);
        assert_eq!(classifier().classify("a@gmail.com", &allowed), Classification::DomainFree);
        assert_eq!(classifier().classify("a@HOTMAIL.COM", &allowed), Classification::DomainFree);
    }

    #[test]
    fn test_host_comparison_ignores_case() {
        let allowed = allowed(&["contoso.com"]);
        assert_eq!(classifier().classify("Ann@Contoso.COM", &allowed), Classification::Valid);
        assert_eq!(
            classifier().classify("ann@fabrikam.com", &allowed),
            Classification::DomainNotAllowed
        );
    }

    #[test]
    fn test_format_checked_before_domain() {
        let allowed = allowed(&["contoso.com"]);
        assert_eq!(classifier().classify("not an email", &allowed), Classification::FormatInvalid);
        assert_eq!(classifier().classify("x y@gmail.com", &allowed), Classification::FormatInvalid);
    }

    #[test]
    fn test_partition_keeps_input_order() {
        let allowed = allowed(&["contoso.com"]);
        let requests = vec![
            InviteRequest::new("A", "A", "a@aol.com"),
            InviteRequest::new("B", "B", "bad"),
            InviteRequest::new("C", "C", "c@contoso.com"),
            InviteRequest::new("D", "D", "d@fabrikam.com"),
            InviteRequest::new("E", "E", "e@contoso.com"),
        ];

        let batch = classifier().partition(requests, &allowed);

        let valid: Vec<&str> = batch.valid.iter().map(|r| r.email.as_str()).collect();
        assert_eq!(valid, vec!["c@contoso.com", "e@contoso.com"]);
        assert_eq!(batch.format_invalid.len(), 1);
        let domain: Vec<InviteStatus> = batch.domain_invalid.iter().map(|(_, s)| *s).collect();
        assert_eq!(
            domain,
            vec![InviteStatus::UserEmailDomainFree, InviteStatus::UserEmailNotDomainAllowed]
        );
    }
}
