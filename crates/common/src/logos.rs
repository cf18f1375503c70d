use std::collections::HashMap;

/// Asset reference used when no protocol logo can be resolved.
pub const PLACEHOLDER_PROTOCOL_LOGO: &str = "/placeholder-protocol.png";

/// Read-only protocol-id → logo-URL mapping, built once at startup and
/// passed into the normalizer. Replaces what used to be a module-level
/// mutable table.
#[derive(Debug, Clone, Default)]
pub struct ProtocolLogos {
    logos: HashMap<String, String>,
}

impl ProtocolLogos {
    pub fn new(logos: HashMap<String, String>) -> Self {
        Self { logos }
    }

    /// The known protocols the stats page renders logos for.
    pub fn default_set() -> Self {
        let mut logos = HashMap::new();
        logos.insert(
            "base_aerodrome".to_string(),
            "https://static.debank.com/image/project/logo_url/base_aerodrome/f02d753bc321dc8ba480f0424a686482.png".to_string(),
        );
        logos.insert(
            "base_uniswapv2".to_string(),
            "https://static.debank.com/image/project/logo_url/uniswap2/4aa676fd3d1766899f1725c4c41d434a.png".to_string(),
        );
        logos.insert(
            "morpho".to_string(),
            "https://static.debank.com/image/project/logo_url/morpho/d75d8d2d05653b7c7f1eda7bc27e2838.png".to_string(),
        );
        logos.insert(
            "kyberswap".to_string(),
            "https://static.debank.com/image/project/logo_url/kyberswap/1bfad05d72c9921c8e8cde4c0e52a1e0.png".to_string(),
        );
        Self { logos }
    }

    /// Look up a project's logo, falling back to the placeholder asset.
    pub fn logo_for(&self, project_id: Option<&str>) -> &str {
        project_id
            .and_then(|id| self.logos.get(id))
            .map(String::as_str)
            .unwrap_or(PLACEHOLDER_PROTOCOL_LOGO)
    }
}
