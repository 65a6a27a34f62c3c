/*
[INPUT]:  Endpoint names published by Tushare Pro
[OUTPUT]: ApiName enum with wire names
[POS]:    Data layer - typed shortcuts for well-known endpoints
[UPDATE]: When adding shortcuts for more endpoints
*/

use serde::{Deserialize, Serialize};
use std::fmt;

/// Well-known Tushare Pro endpoints.
///
/// Any endpoint name the server recognizes can still be queried by string;
/// this enum only covers the commonly used ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApiName {
    StockBasic,
    TradeCal,
    #[serde(rename = "namechange")]
    NameChange,
    StockCompany,
    Daily,
    Weekly,
    Monthly,
    AdjFactor,
    DailyBasic,
    Moneyflow,
    Income,
    Balancesheet,
    Cashflow,
    FinaIndicator,
    IndexBasic,
    IndexDaily,
    FundBasic,
    FundNav,
    FutBasic,
    FutDaily,
}

impl ApiName {
    /// Name sent in the `api_name` field of the request envelope.
    pub fn as_str(&self) -> &'static str {
        match self {
            ApiName::StockBasic => "stock_basic",
            ApiName::TradeCal => "trade_cal",
            ApiName::NameChange => "namechange",
            ApiName::StockCompany => "stock_company",
            ApiName::Daily => "daily",
            ApiName::Weekly => "weekly",
            ApiName::Monthly => "monthly",
            ApiName::AdjFactor => "adj_factor",
            ApiName::DailyBasic => "daily_basic",
            ApiName::Moneyflow => "moneyflow",
            ApiName::Income => "income",
            ApiName::Balancesheet => "balancesheet",
            ApiName::Cashflow => "cashflow",
            ApiName::FinaIndicator => "fina_indicator",
            ApiName::IndexBasic => "index_basic",
            ApiName::IndexDaily => "index_daily",
            ApiName::FundBasic => "fund_basic",
            ApiName::FundNav => "fund_nav",
            ApiName::FutBasic => "fut_basic",
            ApiName::FutDaily => "fut_daily",
        }
    }
}

impl fmt::Display for ApiName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AsRef<str> for ApiName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}
