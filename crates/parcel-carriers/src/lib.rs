//! # Parcel Carriers
//!
//! 內建承運商配置與價格覆寫

pub mod dpd_uk;
pub mod fedex;
pub mod maersk;
pub mod ontrac;
pub mod overrides;
pub mod p2p;
pub mod usps;

pub use overrides::{FuelOverride, PricingOverrides, RuleOverride};

use parcel_core::{Carrier, CarrierConfig};

/// 內建承運商配置目錄
pub struct CarrierCatalog;

impl CarrierCatalog {
    /// 承運商預設配置
    pub fn default_config(carrier: Carrier) -> CarrierConfig {
        match carrier {
            Carrier::OnTrac => ontrac::config(),
            Carrier::Usps => usps::config(),
            Carrier::FedEx => fedex::config(),
            Carrier::P2p => p2p::config(),
            Carrier::Maersk => maersk::config(),
            Carrier::DpdUk => dpd_uk::config(),
        }
    }

    /// 所有承運商預設配置
    pub fn all() -> Vec<CarrierConfig> {
        Carrier::ALL.iter().map(|&carrier| Self::default_config(carrier)).collect()
    }

    /// 預設配置套用覆寫
    pub fn with_overrides(carrier: Carrier, overrides: &PricingOverrides) -> parcel_core::Result<CarrierConfig> {
        overrides.apply(Self::default_config(carrier))
    }

    /// 依代碼查找承運商
    pub fn parse_carrier(code: &str) -> Option<Carrier> {
        let code = code.trim().to_ascii_lowercase();
        Carrier::ALL.iter().copied().find(|carrier| carrier.code() == code)
    }
}
