//! # Parcel Cost
//!
//! 包裹運費估算引擎：依承運商的費率表與附加費規則，估算每筆貨件應收的運費，用於與帳單對帳。
//!
//! ```no_run
//! use parcel_cost::{CarrierCatalog, Carrier, CostCalculator, RateTable, ZoneTable};
//!
//! let config = CarrierCatalog::default_config(Carrier::Maersk);
//! # let zones = ZoneTable::new(Vec::new());
//! # let rates = RateTable::new();
//! let calculator = CostCalculator::new(config, zones, rates)?;
//! # Ok::<(), parcel_cost::CostError>(())
//! ```

pub mod logging;

pub use parcel_calc::{
    BatchReport, BatchSummary, BatchWarning, CostCalculator, RecordFailure, WarningSeverity,
};
pub use parcel_carriers::{CarrierCatalog, PricingOverrides};
pub use parcel_core::{
    Anomaly, Carrier, CarrierConfig, CostError, EnrichedShipment, Period, PipelineStage,
    RateComponents, RateRow, RateTable, Result, ServiceRates, Shipment, SurchargeLine, ZoneCode,
    ZoneEntry, ZoneSource, ZoneTable,
};
