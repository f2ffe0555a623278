use serde::Deserialize;

/// Response envelope for /defi/price
#[derive(Debug, Clone, Deserialize)]
pub struct BirdeyePriceResponse {
    #[serde(default)]
    pub success: bool,
    pub data: Option<BirdeyePriceData>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BirdeyePriceData {
    pub value: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_response_parsing() {
        let body = r#"{"success": true, "data": {"value": 0.0421}}"#;
        let parsed: BirdeyePriceResponse = serde_json::from_str(body).unwrap();
        assert!(parsed.success);
        assert_eq!(parsed.data.unwrap().value, Some(0.0421));
    }

    #[test]
    fn test_price_response_missing_value() {
        let body = r#"{"success": false}"#;
        let parsed: BirdeyePriceResponse = serde_json::from_str(body).unwrap();
        assert!(!parsed.success);
        assert!(parsed.data.is_none());
    }
}
