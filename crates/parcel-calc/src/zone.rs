//! 區域解析
//!
//! 三層查找：郵遞區號（完整，再依序嘗試前綴）→ 區域內最常見區域 → 承運商預設區域。
//! 查得的區域再標準化為查費率用的數字區域。

use parcel_core::{
    Anomaly, CostError, Shipment, ZoneAssignment, ZoneCode, ZoneRules, ZoneSource, ZoneTable,
};

/// 區域解析器
pub struct ZoneResolver;

impl ZoneResolver {
    /// 解析貨件區域並回傳過程中的資料品質異常
    pub fn resolve(
        shipment: &Shipment,
        table: &ZoneTable,
        rules: &ZoneRules,
    ) -> parcel_core::Result<(ZoneAssignment, Vec<Anomaly>)> {
        let mut anomalies = Vec::new();
        let (shipping_zone, source) = Self::lookup(shipment, table, rules, &mut anomalies);
        let rate_zone = Self::normalize(shipment, shipping_zone.as_ref(), rules, &mut anomalies)?;

        tracing::debug!(
            "貨件 {} 區域 {:?} -> 費率區域 {} ({:?})",
            shipment.tracking_number,
            shipping_zone,
            rate_zone,
            source
        );

        Ok((
            ZoneAssignment {
                shipping_zone,
                rate_zone: Some(rate_zone),
                source,
            },
            anomalies,
        ))
    }

    fn lookup(
        shipment: &Shipment,
        table: &ZoneTable,
        rules: &ZoneRules,
        anomalies: &mut Vec<Anomaly>,
    ) -> (Option<ZoneCode>, ZoneSource) {
        let origin = shipment.origin.as_deref();
        let postal_code = shipment.normalized_postal_code();

        if !postal_code.is_empty() {
            if let Some(entry) = table.find(origin, &postal_code) {
                return (entry.zone.clone(), ZoneSource::Exact);
            }

            for &length in &rules.prefix_lengths {
                let Some(prefix) = postal_prefix(&postal_code, length) else {
                    continue;
                };
                if let Some(entry) = table.find(origin, prefix) {
                    return (entry.zone.clone(), ZoneSource::Prefix);
                }
            }
        }

        if let Some(region) = shipment.destination_region.as_deref() {
            let region = region.trim().to_ascii_uppercase();
            if let Some(zone) = table.modal_zone_for_region(origin, &region) {
                anomalies.push(Anomaly::ZoneFromRegion { region });
                return (Some(zone.clone()), ZoneSource::RegionMode);
            }
        }

        anomalies.push(Anomaly::ZoneDefaulted);
        (Some(rules.default_zone.clone()), ZoneSource::Default)
    }

    /// 標準化為查費率用的數字區域
    pub fn normalize(
        shipment: &Shipment,
        zone: Option<&ZoneCode>,
        rules: &ZoneRules,
        anomalies: &mut Vec<Anomaly>,
    ) -> parcel_core::Result<u8> {
        match zone {
            None => {
                anomalies.push(Anomaly::NullZoneDefaulted);
                Ok(rules.null_zone_default)
            }
            Some(ZoneCode::Numeric(number)) => Ok(*number),
            Some(ZoneCode::Letter(code)) => match rules.letter_zone_substitute {
                Some(substitute) => {
                    anomalies.push(Anomaly::LetterZoneSubstituted { zone: code.clone() });
                    Ok(substitute)
                }
                None => Err(CostError::NonServiceable {
                    shipment_id: shipment.tracking_number.clone(),
                    zone: code.clone(),
                }),
            },
        }
    }
}

/// 郵遞區號前綴；長度不足或與完整區號相同時不嘗試
fn postal_prefix(postal_code: &str, length: usize) -> Option<&str> {
    if length == 0 || postal_code.chars().count() <= length {
        return None;
    }
    postal_code
        .char_indices()
        .nth(length)
        .map(|(index, _)| &postal_code[..index])
}
