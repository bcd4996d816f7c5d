//! 日誌初始化
//!
//! 批次開始與完成摘要、跳過的貨件記在 `parcel_calc` 的 info/warn；
//! 每筆貨件的尺寸、計費重量與區域後備記在 `parcel_calc` 的 debug；
//! 價格覆寫套用記在 `parcel_carriers` 的 info。
//!
//! ```text
//! RUST_LOG=parcel_calc=debug cargo run --example ontrac_scenario
//! RUST_LOG=warn,parcel_carriers=info cargo run --example multi_carrier_batch
//! ```

use tracing_subscriber::{fmt, EnvFilter};

/// 預設過濾：只看本專案 crate
const DEFAULT_FILTER: &str = "warn,parcel_core=info,parcel_calc=info,parcel_carriers=info,parcel_cost=info";

/// 測試過濾：逐筆計算步驟
const TEST_FILTER: &str = "warn,parcel_calc=debug,parcel_carriers=debug";

/// 初始化日誌
///
/// 未設定 `RUST_LOG` 時使用預設過濾。
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_line_number(true)
        .init();
}

/// 測試用日誌：可重複呼叫，輸出交給測試框架擷取
pub fn init_test() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(TEST_FILTER));

    let _ = fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}
