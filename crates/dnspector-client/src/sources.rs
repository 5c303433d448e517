//! Built-in passive subdomain sources.

use dnspector_core::SourceDescriptor;

/// The default source table.
///
/// Each entry is queried once per run; the `{domain}` placeholder is replaced
/// by the target.
#[must_use]
pub fn default_sources() -> Vec<SourceDescriptor> {
    vec![
        SourceDescriptor::new("RapidDNS", "https://rapiddns.io/subdomain/{domain}?full=1"),
        SourceDescriptor::new(
            "Wayback Machine",
            "http://web.archive.org/cdx/search/cdx?url=*.{domain}/*&output=text&fl=original&collapse=urlkey",
        ),
        SourceDescriptor::new("crt.sh", "https://crt.sh/?q=%25.{domain}"),
        SourceDescriptor::new(
            "AlienVault OTX",
            "https://otx.alienvault.com/api/v1/indicators/domain/{domain}/passive_dns",
        ),
        SourceDescriptor::new("urlscan.io", "https://urlscan.io/api/v1/search/?q=domain:{domain}"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn five_sources_all_templated_and_parseable() {
        let sources = default_sources();
        assert_eq!(sources.len(), 5);
        for source in &sources {
            assert!(source.url_template.contains("{domain}"), "{}", source.name);
            let url = source.url_for("example.com");
            assert!(url::Url::parse(&url).is_ok(), "{url}");
        }
    }
}
