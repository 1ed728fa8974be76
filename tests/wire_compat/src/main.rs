fn main() {
    println!("Run `cargo test -p wire-compat` to execute wire compatibility tests.");
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;

    use worldbuilder_protocol::messages::*;
    use worldbuilder_protocol::types::*;

    /// Returns the path to the fixtures directory.
    fn fixtures_dir() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("fixtures")
    }

    /// Loads a fixture JSON file and returns it as a `serde_json::Value`.
    fn load_fixture(name: &str) -> serde_json::Value {
        let path = fixtures_dir().join(name);
        let data = fs::read_to_string(&path)
            .unwrap_or_else(|e| panic!("failed to read fixture {}: {e}", path.display()));
        serde_json::from_str(&data)
            .unwrap_or_else(|e| panic!("failed to parse fixture {}: {e}", path.display()))
    }

    /// Deserializes a fixture into a Rust type, re-serializes it, and compares
    /// the JSON values (order-independent).
    fn roundtrip_test<T>(name: &str) -> T
    where
        T: serde::de::DeserializeOwned + serde::Serialize,
    {
        let fixture = load_fixture(name);
        let parsed: T = serde_json::from_value(fixture.clone())
            .unwrap_or_else(|e| panic!("failed to deserialize {name}: {e}"));
        let reserialized = serde_json::to_value(&parsed)
            .unwrap_or_else(|e| panic!("failed to re-serialize {name}: {e}"));

        assert_eq!(
            fixture, reserialized,
            "roundtrip mismatch for {name}:\n  wire: {fixture}\n  Rust: {reserialized}"
        );
        parsed
    }

    // --- Registry payloads ---

    #[test]
    fn fixture_register_subdomain_request() {
        let req: RegisterSubdomainRequest = roundtrip_test("register_subdomain_request.json");
        let built = RegisterSubdomainRequest::index_page(
            "space-game",
            "anonymous",
            "<!DOCTYPE html><html><body></body></html>".into(),
        );
        assert_eq!(req, built);
    }

    #[test]
    fn fixture_check_subdomain_request() {
        roundtrip_test::<CheckSubdomainRequest>("check_subdomain_request.json");
    }

    #[test]
    fn fixture_check_subdomain_response() {
        let resp: CheckSubdomainResponse = roundtrip_test("check_subdomain_response.json");
        assert!(!resp.is_available());
    }

    #[test]
    fn fixture_upload_urls_request() {
        let req: UploadUrlsRequest = roundtrip_test("upload_urls_request.json");
        assert_eq!(req.files.len(), 2);
        assert_eq!(req.files[1].content_type, "audio/mpeg");
    }

    #[test]
    fn fixture_upload_urls_response() {
        let resp: UploadUrlsResponse = roundtrip_test("upload_urls_response.json");
        assert!(resp.upload_urls.contains_key("assets/ship.png"));
    }

    #[test]
    fn fixture_api_error() {
        let body: ApiErrorBody = roundtrip_test("api_error.json");
        assert_eq!(
            body.text(),
            Some("You do not have permission to update this subdomain")
        );
    }

    #[test]
    fn fixture_user_subdomains_response() {
        let resp: UserSubdomainsResponse = roundtrip_test("user_subdomains_response.json");
        assert_eq!(resp.subdomains.len(), 2);
        assert_eq!(resp.subdomains[1].subdomain, "alice-maze");
        assert_eq!(resp.subdomains[1].created_at, 1_767_225_600);
    }

    // --- Deploy action payloads ---

    #[test]
    fn fixture_deploy_game_request() {
        let req: DeployGameRequest = roundtrip_test("deploy_game_request.json");
        let request = worldbuilder_deploy::into_deployment_request(req);
        assert_eq!(request.custom_label.as_deref(), Some("alice-space"));
        assert_eq!(
            request.assets["ship.png"],
            vec![0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a]
        );
    }

    #[test]
    fn fixture_deploy_game_response() {
        let resp: DeployGameResponse = roundtrip_test("deploy_game_response.json");
        assert!(resp.success);
    }

    #[test]
    fn fixture_deploy_game_response_failed() {
        let resp: DeployGameResponse = roundtrip_test("deploy_game_response_failed.json");
        assert!(resp.deployment_id.is_none());
        assert_eq!(resp.deployment_url, "");
    }

    #[test]
    fn fixture_verify_deployment_response() {
        let resp: VerifyDeploymentResponse = roundtrip_test("verify_deployment_response.json");
        assert_eq!(resp.status, VerificationStatus::Pending);
    }

    #[test]
    fn deployment_result_serializes_camel_case() {
        use worldbuilder_deploy::{DeploymentResult, VerificationOutcome};

        let result = DeploymentResult {
            succeeded: true,
            url: Some("https://space-game.app.worldbuilder.space".into()),
            message: "Game deployed successfully".into(),
            label: Some("space-game".into()),
            verification: Some(VerificationOutcome {
                reached: false,
                attempts_used: 3,
            }),
            assets_failed: Vec::new(),
            deployed_at: "2026-01-02T03:04:05Z".parse().unwrap(),
        };

        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["verification"]["attemptsUsed"], 3);
        assert_eq!(value["deployedAt"], "2026-01-02T03:04:05Z");
        assert!(value.get("assetsFailed").is_none());

        let resp = DeployGameResponse::from(&result);
        assert_eq!(resp.deployment_id.as_deref(), Some("space-game"));
    }
}
