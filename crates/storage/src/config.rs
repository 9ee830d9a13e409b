use std::collections::HashSet;

use crate::models::NormalizedEmail;

/// Static privilege lists. Membership is decided by email, never persisted.
#[derive(Debug, Clone, Default)]
pub struct AccessConfig {
    /// Emails that may sign up without an allowlist entry and become admins.
    pub admin_emails: HashSet<NormalizedEmail>,
    /// Emails allowed to manage other users' admin flag. Cannot be granted or revoked at runtime.
    pub super_admin_emails: HashSet<NormalizedEmail>,
}

impl AccessConfig {
    pub fn new<A, S>(admin_emails: A, super_admin_emails: S) -> Self
    where
        A: IntoIterator,
        A::Item: AsRef<str>,
        S: IntoIterator,
        S::Item: AsRef<str>,
    {
        Self {
            admin_emails: normalize_all(admin_emails),
            super_admin_emails: normalize_all(super_admin_emails),
        }
    }

    pub fn from_comma_separated(admin_emails: &str, super_admin_emails: &str) -> Self {
        Self::new(
            admin_emails.split(','),
            super_admin_emails.split(','),
        )
    }
}

fn normalize_all<I>(emails: I) -> HashSet<NormalizedEmail>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    emails
        .into_iter()
        .map(NormalizedEmail::new)
        .filter(|email| !email.as_str().is_empty())
        .collect()
}
