use tracing::warn;
use url::Url;

use crate::domain::food_safety::entities::FoodSafetyRecord;

/// Allow-list of medical-information domains accepted as a record's source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrustedDomains {
    domains: Vec<String>,
}

impl TrustedDomains {
    pub fn new<I, S>(domains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            domains: domains
                .into_iter()
                .map(|d| d.as_ref().trim().trim_start_matches('.').to_ascii_lowercase())
                .filter(|d| !d.is_empty())
                .collect(),
        }
    }

    pub fn as_slice(&self) -> &[String] {
        &self.domains
    }

    /// A host matches when it is a trusted domain or one of its subdomains.
    /// `notmayoclinic.org` therefore does not match `mayoclinic.org`.
    pub fn is_trusted_host(&self, host: &str) -> bool {
        self.domains.iter().any(|domain| {
            host == domain
                || host
                    .strip_suffix(domain.as_str())
                    .is_some_and(|prefix| prefix.ends_with('.'))
        })
    }

    pub fn is_trusted_url(&self, raw: &str) -> bool {
        let Ok(url) = Url::parse(raw) else {
            return false;
        };

        if !matches!(url.scheme(), "http" | "https") {
            return false;
        }

        url.host_str()
            .is_some_and(|host| self.is_trusted_host(host))
    }

    /// Clears an untrusted `source_url`. The rest of the record is kept.
    pub fn sanitize(&self, mut record: FoodSafetyRecord) -> FoodSafetyRecord {
        if let Some(source_url) = record.source_url.as_deref()
            && !self.is_trusted_url(source_url)
        {
            warn!(source_url, food = %record.name, "dropping untrusted source URL");
            record.source_url = None;
        }

        record
    }
}
