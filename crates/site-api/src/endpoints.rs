//! Endpoint derivation from the configured registration URL.

use worldbuilder_protocol::constants::{
    CHECK_SEGMENT, REGISTER_SEGMENT, UPLOAD_URLS_SEGMENT, USER_SUBDOMAINS_SEGMENT,
};

/// Resolved URLs of the registration service.
///
/// The default value has no routes; a client built with it can only reach
/// absolute URLs (presigned targets, published sites).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Endpoints {
    pub register: String,
    pub check: String,
    pub upload_urls: String,
    pub user_subdomains: String,
}

impl Endpoints {
    /// Derives every endpoint from one configured URL.
    ///
    /// A URL naming the `register-subdomain` route has its siblings found by
    /// swapping that segment. Anything else is treated as the API base.
    pub fn from_register_url(url: &str) -> Self {
        let url = url.trim();
        if url.contains(REGISTER_SEGMENT) {
            return Self {
                register: url.to_string(),
                check: url.replace(REGISTER_SEGMENT, CHECK_SEGMENT),
                upload_urls: url.replace(REGISTER_SEGMENT, UPLOAD_URLS_SEGMENT),
                user_subdomains: url.replace(REGISTER_SEGMENT, USER_SUBDOMAINS_SEGMENT),
            };
        }

        let base = url.trim_end_matches('/');
        Self {
            register: format!("{base}/{REGISTER_SEGMENT}"),
            check: format!("{base}/{CHECK_SEGMENT}"),
            upload_urls: format!("{base}/{UPLOAD_URLS_SEGMENT}"),
            user_subdomains: format!("{base}/{USER_SUBDOMAINS_SEGMENT}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn swaps_register_segment() {
        let ep = Endpoints::from_register_url(
            "https://abc.execute-api.us-west-2.amazonaws.com/prod/register-subdomain",
        );
        assert_eq!(
            ep.check,
            "https://abc.execute-api.us-west-2.amazonaws.com/prod/check-subdomain"
        );
        assert_eq!(
            ep.upload_urls,
            "https://abc.execute-api.us-west-2.amazonaws.com/prod/generate-upload-urls"
        );
        assert!(ep.register.ends_with("/prod/register-subdomain"));
        assert_eq!(
            ep.user_subdomains,
            "https://abc.execute-api.us-west-2.amazonaws.com/prod/user-subdomains"
        );
    }

    #[test]
    fn base_url_gets_segments_appended() {
        let ep = Endpoints::from_register_url("http://127.0.0.1:9000/prod/");
        assert_eq!(ep.register, "http://127.0.0.1:9000/prod/register-subdomain");
        assert_eq!(ep.check, "http://127.0.0.1:9000/prod/check-subdomain");
        assert_eq!(ep.upload_urls, "http://127.0.0.1:9000/prod/generate-upload-urls");
        assert_eq!(ep.user_subdomains, "http://127.0.0.1:9000/prod/user-subdomains");
    }
}
