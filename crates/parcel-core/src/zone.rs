//! 區域表模型

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// 區域代碼
///
/// 多數承運商使用數字區域；部分承運商對偏遠屬地使用字母代碼。
///
/// 參考資料常以字串輸出區域（`"8"`），反序列化一律經過 [`ZoneCode::parse`]。
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged, try_from = "RawZoneCode")]
pub enum ZoneCode {
    Numeric(u8),
    Letter(String),
}

/// 參考資料中的原始區域值（數字或字串）
#[derive(Deserialize)]
#[serde(untagged)]
enum RawZoneCode {
    Number(u64),
    Text(String),
}

impl TryFrom<RawZoneCode> for ZoneCode {
    type Error = String;

    fn try_from(raw: RawZoneCode) -> Result<Self, Self::Error> {
        match raw {
            RawZoneCode::Number(number) => u8::try_from(number)
                .map(ZoneCode::Numeric)
                .map_err(|_| format!("區域超出範圍: {}", number)),
            RawZoneCode::Text(text) => {
                ZoneCode::parse(&text).ok_or_else(|| "區域代碼為空".to_string())
            }
        }
    }
}

impl ZoneCode {
    /// 解析區域代碼：純數字視為數字區域，其餘視為字母區域
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }
        match trimmed.parse::<u8>() {
            Ok(number) => Some(ZoneCode::Numeric(number)),
            Err(_) => Some(ZoneCode::Letter(trimmed.to_ascii_uppercase())),
        }
    }

    /// 數字區域值
    pub fn as_number(&self) -> Option<u8> {
        match self {
            ZoneCode::Numeric(number) => Some(*number),
            ZoneCode::Letter(_) => None,
        }
    }
}

impl fmt::Display for ZoneCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ZoneCode::Numeric(number) => write!(f, "{}", number),
            ZoneCode::Letter(code) => write!(f, "{}", code),
        }
    }
}

/// 區域表項目
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneEntry {
    /// 出貨站點（空值表示適用所有站點）
    #[serde(default)]
    pub origin: Option<String>,

    /// 郵遞區號或其前綴
    pub postal_key: String,

    /// 所屬區域（州/地區）
    #[serde(default)]
    pub region: Option<String>,

    /// 區域（空值或空字串表示參考資料中的空區域）
    #[serde(default, deserialize_with = "deserialize_zone")]
    pub zone: Option<ZoneCode>,
}

fn deserialize_zone<'de, D>(deserializer: D) -> Result<Option<ZoneCode>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<RawZoneCode>::deserialize(deserializer)? {
        None => Ok(None),
        Some(RawZoneCode::Text(text)) if text.trim().is_empty() => Ok(None),
        Some(raw) => ZoneCode::try_from(raw).map(Some).map_err(de::Error::custom),
    }
}

impl ZoneEntry {
    /// 創建區域表項目
    pub fn new(postal_key: String, zone: Option<ZoneCode>) -> Self {
        Self {
            origin: None,
            postal_key: postal_key.to_ascii_uppercase(),
            region: None,
            zone,
        }
    }

    /// 建構器模式：設置出貨站點
    pub fn with_origin(mut self, origin: String) -> Self {
        self.origin = Some(origin);
        self
    }

    /// 建構器模式：設置所屬區域
    pub fn with_region(mut self, region: String) -> Self {
        self.region = Some(region);
        self
    }
}

/// 區域表（每次執行載入一次，唯讀）
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "Vec<ZoneEntry>", into = "Vec<ZoneEntry>")]
pub struct ZoneTable {
    entries: Vec<ZoneEntry>,
    by_key: HashMap<(Option<String>, String), usize>,
    /// 各 (站點, 區域) 出現最多次的區域
    region_modes: HashMap<(Option<String>, String), ZoneCode>,
    /// 不分站點時各區域出現最多次的區域
    region_modes_any_origin: HashMap<String, ZoneCode>,
}

impl ZoneTable {
    /// 由項目建立區域表；重複鍵以最後一筆為準
    pub fn new(entries: Vec<ZoneEntry>) -> Self {
        let mut by_key = HashMap::new();
        let mut scoped_counts: HashMap<(Option<String>, String), BTreeMap<ZoneCode, usize>> =
            HashMap::new();
        let mut any_counts: HashMap<String, BTreeMap<ZoneCode, usize>> = HashMap::new();

        for (index, entry) in entries.iter().enumerate() {
            by_key.insert(
                (entry.origin.clone(), entry.postal_key.to_ascii_uppercase()),
                index,
            );

            if let (Some(region), Some(zone)) = (&entry.region, &entry.zone) {
                let region = region.to_ascii_uppercase();
                *scoped_counts
                    .entry((entry.origin.clone(), region.clone()))
                    .or_default()
                    .entry(zone.clone())
                    .or_insert(0) += 1;
                *any_counts
                    .entry(region)
                    .or_default()
                    .entry(zone.clone())
                    .or_insert(0) += 1;
            }
        }

        let region_modes = scoped_counts
            .into_iter()
            .filter_map(|(key, counts)| modal_zone(&counts).map(|zone| (key, zone)))
            .collect();
        let region_modes_any_origin = any_counts
            .into_iter()
            .filter_map(|(key, counts)| modal_zone(&counts).map(|zone| (key, zone)))
            .collect();

        Self {
            entries,
            by_key,
            region_modes,
            region_modes_any_origin,
        }
    }

    /// 精確查找：先查指定站點，再查通用項目
    pub fn find(&self, origin: Option<&str>, postal_key: &str) -> Option<&ZoneEntry> {
        let key = postal_key.to_ascii_uppercase();
        if let Some(origin) = origin {
            if let Some(&index) = self.by_key.get(&(Some(origin.to_string()), key.clone())) {
                return self.entries.get(index);
            }
        }
        self.by_key
            .get(&(None, key))
            .and_then(|&index| self.entries.get(index))
    }

    /// 區域內最常出現的區域：先查指定站點，再查通用項目，最後不分站點
    pub fn modal_zone_for_region(&self, origin: Option<&str>, region: &str) -> Option<&ZoneCode> {
        let region = region.trim().to_ascii_uppercase();
        if let Some(origin) = origin {
            if let Some(zone) = self
                .region_modes
                .get(&(Some(origin.to_string()), region.clone()))
            {
                return Some(zone);
            }
        }
        self.region_modes
            .get(&(None, region.clone()))
            .or_else(|| self.region_modes_any_origin.get(&region))
    }

    /// 項目數量
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl From<Vec<ZoneEntry>> for ZoneTable {
    fn from(entries: Vec<ZoneEntry>) -> Self {
        Self::new(entries)
    }
}

impl From<ZoneTable> for Vec<ZoneEntry> {
    fn from(table: ZoneTable) -> Self {
        table.entries
    }
}

/// 出現次數最多的區域；同票時取排序最小者（數字區域優先於字母區域）
fn modal_zone(counts: &BTreeMap<ZoneCode, usize>) -> Option<ZoneCode> {
    let mut best: Option<(&ZoneCode, usize)> = None;
    for (zone, &count) in counts {
        match best {
            Some((_, best_count)) if count <= best_count => {}
            _ => best = Some((zone, count)),
        }
    }
    best.map(|(zone, _)| zone.clone())
}
