//! 費率表查找

use parcel_core::{CostError, RateComponents, RateTable};

/// 費率查找結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateQuote {
    /// 套用上限後的重量級距
    pub bracket: u32,
    pub components: RateComponents,
}

/// 費率查找器
pub struct RateLookup;

impl RateLookup {
    /// 以重量級距與費率區域查基本運費
    ///
    /// 服務不提供的區域為不可服務（單筆）；提供的區域缺少費率列則為配置錯誤。
    pub fn lookup(
        rates: &RateTable,
        service: &str,
        bracket: u32,
        rate_zone: u8,
        shipment_id: &str,
    ) -> parcel_core::Result<RateQuote> {
        let service_rates = rates
            .service(service)
            .ok_or_else(|| CostError::UnknownService(service.to_string()))?;

        if !service_rates.prices_zone(rate_zone) {
            return Err(CostError::NonServiceable {
                shipment_id: shipment_id.to_string(),
                zone: rate_zone.to_string(),
            });
        }

        let bracket = bracket.clamp(1, service_rates.max_weight().max(1));

        let row = service_rates
            .get(bracket, rate_zone)
            .ok_or_else(|| CostError::MissingRate {
                service: service.to_string(),
                bracket,
                zone: rate_zone,
            })?;

        Ok(RateQuote {
            bracket,
            components: row.components.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parcel_core::ServiceRates;
    use rust_decimal_macros::dec;

    fn rates() -> RateTable {
        let mut ground = ServiceRates::new("GROUND".to_string(), 3);
        for bracket in 1..=3 {
            for zone in 2..=8 {
                if (bracket, zone) == (2, 7) {
                    continue;
                }
                ground = ground.with_net_rate(bracket, zone, dec!(5) + rust_decimal::Decimal::from(bracket));
            }
        }
        RateTable::new().with_service(ground)
    }

    #[test]
    fn test_lookup() {
        let quote = RateLookup::lookup(&rates(), "GROUND", 2, 5, "R-1").unwrap();
        assert_eq!(quote.bracket, 2);
        assert_eq!(quote.components.net(), dec!(7));
    }

    #[test]
    fn test_bracket_capped_at_service_maximum() {
        let quote = RateLookup::lookup(&rates(), "GROUND", 150, 5, "R-1").unwrap();
        assert_eq!(quote.bracket, 3);
        assert_eq!(quote.components.net(), dec!(8));
    }

    #[test]
    fn test_unpriced_zone_is_non_serviceable() {
        let err = RateLookup::lookup(&rates(), "GROUND", 1, 9, "R-1").unwrap_err();
        assert!(err.is_non_serviceable());
    }

    #[test]
    fn test_missing_row_is_config_error() {
        let err = RateLookup::lookup(&rates(), "GROUND", 2, 7, "R-1").unwrap_err();
        assert_eq!(
            err,
            CostError::MissingRate {
                service: "GROUND".to_string(),
                bracket: 2,
                zone: 7
            }
        );
        assert!(err.is_config_error());
    }

    #[test]
    fn test_unknown_service() {
        let err = RateLookup::lookup(&rates(), "EXPRESS", 1, 5, "R-1").unwrap_err();
        assert_eq!(err, CostError::UnknownService("EXPRESS".to_string()));
    }
}
