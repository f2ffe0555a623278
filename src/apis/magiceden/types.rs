use serde::Deserialize;

/// Collection stats from /v2/collections/{symbol}/stats
///
/// floorPrice is denominated in lamports.
#[derive(Debug, Clone, Deserialize)]
pub struct CollectionStats {
    #[serde(rename = "floorPrice")]
    pub floor_price: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collection_stats_parsing() {
        let body = r#"{"symbol": "defi_dungeons", "floorPrice": 500000000, "listedCount": 42}"#;
        let parsed: CollectionStats = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.floor_price, Some(500_000_000.0));
    }

    #[test]
    fn test_collection_stats_missing_floor() {
        let body = r#"{"symbol": "defi_dungeons"}"#;
        let parsed: CollectionStats = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.floor_price, None);
    }
}
