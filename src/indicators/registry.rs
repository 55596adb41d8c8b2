use once_cell::sync::Lazy;
use serde::Serialize;
use std::collections::HashMap;

use crate::indicators::exchange::ExchangeRateAdapter;
use crate::indicators::lpr::LprAdapter;
use crate::indicators::money_supply::MoneySupplyAdapter;
use crate::indicators::period_label::PeriodLabelAdapter;
use crate::indicators::IndicatorAdapter;

// ============================================================================
// ENUMS
// ============================================================================

/// Every indicator the fetcher knows how to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndicatorKind {
    Gdp,
    Cpi,
    Pmi,
    Ppi,
    M2,
    Rate,
    Exchange,
}

impl IndicatorKind {
    pub const ALL: [IndicatorKind; 7] = [
        IndicatorKind::Gdp,
        IndicatorKind::Cpi,
        IndicatorKind::Pmi,
        IndicatorKind::Ppi,
        IndicatorKind::M2,
        IndicatorKind::Rate,
        IndicatorKind::Exchange,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            IndicatorKind::Gdp => "gdp",
            IndicatorKind::Cpi => "cpi",
            IndicatorKind::Pmi => "pmi",
            IndicatorKind::Ppi => "ppi",
            IndicatorKind::M2 => "m2",
            IndicatorKind::Rate => "rate",
            IndicatorKind::Exchange => "exchange",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.code() == code)
    }

    /// The adapter that fetches and normalizes this indicator.
    pub fn adapter(&self) -> Box<dyn IndicatorAdapter> {
        match self {
            IndicatorKind::Gdp => Box::new(PeriodLabelAdapter::new(
                "gdp", "macro_china_gdp", "季度", "国内生产总值-同比增长",
            )),
            IndicatorKind::Cpi => Box::new(PeriodLabelAdapter::new(
                "cpi", "macro_china_cpi", "月份", "全国-同比增长",
            )),
            IndicatorKind::Pmi => Box::new(PeriodLabelAdapter::new(
                "pmi", "macro_china_pmi", "月份", "制造业-指数",
            )),
            IndicatorKind::Ppi => Box::new(PeriodLabelAdapter::new(
                "ppi", "macro_china_ppi", "月份", "当月同比增长",
            )),
            IndicatorKind::M2 => Box::new(MoneySupplyAdapter),
            IndicatorKind::Rate => Box::new(LprAdapter),
            IndicatorKind::Exchange => Box::new(ExchangeRateAdapter),
        }
    }
}

// ============================================================================
// METADATA STRUCT
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndicatorDescriptor {
    pub code: String,
    pub name: String,
    pub category: String,
    pub unit: String,
    pub description: String,
    pub update_frequency: String,
}

macro_rules! ind {
    ($code:expr, $name:expr, $cat:expr, $unit:expr, $desc:expr, $freq:expr) => {
        IndicatorDescriptor {
            code: $code.to_string(),
            name: $name.to_string(),
            category: $cat.to_string(),
            unit: $unit.to_string(),
            description: $desc.to_string(),
            update_frequency: $freq.to_string(),
        }
    };
}

// ============================================================================
// STATIC INDICATOR CATALOG
// ============================================================================

static INDICATORS: Lazy<Vec<IndicatorDescriptor>> = Lazy::new(|| {
    vec![
        ind!("gdp", "国内生产总值(GDP)", "经济增长", "%", "季度GDP同比增长率", "季度"),
        ind!("cpi", "居民消费价格指数(CPI)", "物价水平", "%", "同比 CPI 涨跌幅", "月度"),
        ind!("pmi", "采购经理指数(PMI)", "经济景气", "", "制造业PMI指数", "月度"),
        ind!("ppi", "工业生产者出厂价格指数(PPI)", "物价水平", "%", "同比 PPI 涨跌幅", "月度"),
        ind!("m2", "广义货币(M2)", "货币金融", "万亿元", "M2货币供应量", "月度"),
        ind!("rate", "贷款市场报价利率(LPR)", "货币金融", "%", "一年期LPR", "月度"),
        ind!("exchange", "人民币汇率", "外汇", "", "人民币即期汇率报价", "实时"),
    ]
});

static INDICATOR_MAP: Lazy<HashMap<String, usize>> = Lazy::new(|| {
    INDICATORS
        .iter()
        .enumerate()
        .map(|(i, d)| (d.code.clone(), i))
        .collect()
});

pub struct Registry;

impl Registry {
    /// The full catalog, in display order.
    pub fn get_available_indicators() -> &'static [IndicatorDescriptor] {
        &INDICATORS
    }

    pub fn get_metadata(code: &str) -> Option<&'static IndicatorDescriptor> {
        INDICATOR_MAP.get(code).map(|&i| &INDICATORS[i])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_codes_match_kinds() {
        let codes: Vec<&str> = Registry::get_available_indicators()
            .iter()
            .map(|d| d.code.as_str())
            .collect();
        let kinds: Vec<&str> = IndicatorKind::ALL.iter().map(|k| k.code()).collect();
        assert_eq!(codes, kinds);
    }

    #[test]
    fn test_lookup() {
        assert_eq!(IndicatorKind::from_code("m2"), Some(IndicatorKind::M2));
        assert_eq!(IndicatorKind::from_code("GDP"), None);
        assert_eq!(Registry::get_metadata("cpi").unwrap().unit, "%");
        assert!(Registry::get_metadata("unknown_code").is_none());
    }

    #[test]
    fn test_adapter_endpoints() {
        assert_eq!(IndicatorKind::Gdp.adapter().endpoint(), "macro_china_gdp");
        assert_eq!(IndicatorKind::Rate.adapter().endpoint(), "macro_china_lpr");
        assert_eq!(IndicatorKind::Exchange.adapter().endpoint(), "fx_spot_quote");
    }
}
