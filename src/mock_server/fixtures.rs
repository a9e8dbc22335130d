//! Test data fixtures for the mock server.
//!
//! Provides factory functions for creating realistic test data.

use serde_json::{json, Value};

use crate::Breach;

/// SHA-1 of the string `password`.
pub const PASSWORD_SHA1: &str = "5BAA61E4C9B93F3F0682250B6CF8331B7EE68FD8";

/// Collection of fixture factories for test data.
pub struct Fixtures;

impl Fixtures {
    // =========================================================================
    // Breach Fixtures
    // =========================================================================

    /// Create a breach record with the fields HIBP always returns.
    pub fn breach(
        name: &str,
        domain: &str,
        breach_date: &str,
        added_date: &str,
        pwn_count: u64,
        data_classes: &[&str],
    ) -> Breach {
        let record = json!({
            "Name": name,
            "Title": name,
            "Domain": domain,
            "BreachDate": breach_date,
            "AddedDate": added_date,
            "ModifiedDate": added_date,
            "PwnCount": pwn_count,
            "Description": format!("In {breach_date}, {name} suffered a data breach."),
            "LogoPath": format!("https://haveibeenpwned.com/Content/Images/PwnedLogos/{name}.png"),
            "DataClasses": data_classes,
            "IsVerified": true,
            "IsFabricated": false,
            "IsSensitive": false,
            "IsRetired": false,
            "IsSpamList": false,
            "IsMalware": false,
            "IsSubscriptionFree": false,
            "IsStealerLog": false
        });

        Breach::try_from(record).unwrap_or_default()
    }

    pub fn adobe() -> Breach {
        Self::breach(
            "Adobe",
            "adobe.com",
            "2013-10-04",
            "2013-12-04T00:00:00Z",
            152_445_165,
            &["Email addresses", "Password hints", "Passwords", "Usernames"],
        )
    }

    pub fn dropbox() -> Breach {
        Self::breach(
            "Dropbox",
            "dropbox.com",
            "2012-07-01",
            "2016-08-31T00:19:19Z",
            68_648_009,
            &["Email addresses", "Passwords"],
        )
    }

    pub fn linkedin() -> Breach {
        Self::breach(
            "LinkedIn",
            "linkedin.com",
            "2012-05-05",
            "2016-05-21T21:35:40Z",
            164_611_595,
            &["Email addresses", "Passwords"],
        )
    }

    // =========================================================================
    // Account Fixtures
    // =========================================================================

    /// Create a paste record.
    pub fn paste(source: &str, id: &str, title: &str, date: &str, email_count: u64) -> Value {
        json!({
            "Source": source,
            "Id": id,
            "Title": title,
            "Date": date,
            "EmailCount": email_count
        })
    }

    // =========================================================================
    // Subscriber Fixtures
    // =========================================================================

    /// Create a verified domain entry.
    pub fn subscribed_domain(domain: &str, pwn_count: u64) -> Value {
        json!({
            "DomainName": domain,
            "PwnCount": pwn_count,
            "PwnCountExcludingSpamLists": pwn_count,
            "PwnCountExcludingSpamListsAtLastSubscriptionRenewal": pwn_count,
            "NextSubscriptionRenewal": "2027-01-01T00:00:00"
        })
    }

    /// Create a subscription status payload.
    pub fn subscription() -> Value {
        json!({
            "SubscriptionName": "Pwned 1",
            "Description": "Mock subscription",
            "SubscribedUntil": "2027-01-01T00:00:00",
            "Rpm": 10,
            "DomainSearchMaxBreachedAccounts": 25,
            "IncludesStealerLogs": false
        })
    }

    /// The data classes known to the mock service.
    pub fn data_classes() -> Vec<String> {
        [
            "Account balances",
            "Email addresses",
            "Password hints",
            "Passwords",
            "Usernames",
        ]
        .iter()
        .map(|c| c.to_string())
        .collect()
    }

    // =========================================================================
    // Scenario Builders
    // =========================================================================

    /// Create a complete test scenario.
    ///
    /// `test@example.com` appears in Adobe and Dropbox and has one paste.
    /// `example.com` is a verified domain with one breached alias.
    pub fn default_scenario() -> DefaultScenario {
        DefaultScenario {
            breaches: vec![Self::adobe(), Self::dropbox(), Self::linkedin()],
            accounts: vec![(
                "test@example.com".to_string(),
                vec!["Adobe".to_string(), "Dropbox".to_string()],
            )],
            pastes: vec![(
                "test@example.com".to_string(),
                Self::paste("Pastebin", "8Q0BvKD8", "syslog", "2014-03-04T19:14:54Z", 139),
            )],
            domain_aliases: vec![(
                "example.com".to_string(),
                "test".to_string(),
                vec!["Adobe".to_string(), "Dropbox".to_string()],
            )],
            subscribed_domains: vec![Self::subscribed_domain("example.com", 1)],
            data_classes: Self::data_classes(),
            subscription: Self::subscription(),
            passwords: vec![(PASSWORD_SHA1.to_string(), 10_434_004)],
        }
    }
}

/// A complete test scenario with related data.
pub struct DefaultScenario {
    pub breaches: Vec<Breach>,
    pub accounts: Vec<(String, Vec<String>)>,
    pub pastes: Vec<(String, Value)>,
    pub domain_aliases: Vec<(String, String, Vec<String>)>,
    pub subscribed_domains: Vec<Value>,
    pub data_classes: Vec<String>,
    pub subscription: Value,
    pub passwords: Vec<(String, u64)>,
}
