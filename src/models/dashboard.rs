use rust_decimal::Decimal;
use serde::Serialize;

/// Everything the administration overview renders, computed in one pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSnapshot {
    #[serde(with = "rust_decimal::serde::float")]
    pub revenue: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub expenses: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub balance: Decimal,
    pub expenses_by_category: Vec<CategorySlice>,
    pub monthly_data: Vec<MonthPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategorySlice {
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub value: Decimal,
    pub color_tag: String,
}

/// One point of the month-by-month chart. The amount keys are capitalized on
/// the wire because the chart uses them verbatim as series names.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthPoint {
    pub month: String,
    #[serde(rename = "Revenue", with = "rust_decimal::serde::float")]
    pub revenue: Decimal,
    #[serde(rename = "Expense", with = "rust_decimal::serde::float")]
    pub expense: Decimal,
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    fn sample() -> DashboardSnapshot {
        DashboardSnapshot {
            revenue: Decimal::from_str("1000").unwrap(),
            expenses: Decimal::from_str("400.50").unwrap(),
            balance: Decimal::from_str("599.50").unwrap(),
            expenses_by_category: vec![CategorySlice {
                name: "Utilities".to_string(),
                value: Decimal::from_str("400.50").unwrap(),
                color_tag: "#ef4444".to_string(),
            }],
            monthly_data: vec![MonthPoint {
                month: "Jan/24".to_string(),
                revenue: Decimal::from_str("1000").unwrap(),
                expense: Decimal::from_str("400.50").unwrap(),
            }],
        }
    }

    #[test]
    fn snapshot_serializes_with_chart_friendly_keys() {
        let value = serde_json::to_value(sample()).unwrap();

        assert_eq!(value["revenue"].as_f64(), Some(1000.0));
        assert_eq!(value["expenses"].as_f64(), Some(400.5));
        assert_eq!(value["balance"].as_f64(), Some(599.5));

        assert_eq!(value["expensesByCategory"][0]["name"], "Utilities");
        assert_eq!(value["expensesByCategory"][0]["colorTag"], "#ef4444");

        assert_eq!(value["monthlyData"][0]["month"], "Jan/24");
        assert_eq!(value["monthlyData"][0]["Revenue"].as_f64(), Some(1000.0));
        assert_eq!(value["monthlyData"][0]["Expense"].as_f64(), Some(400.5));
    }

    #[test]
    fn amounts_serialize_as_json_numbers_not_strings() {
        let value = serde_json::to_value(sample()).unwrap();

        assert!(value["balance"].is_number());
        assert!(value["expensesByCategory"][0]["value"].is_number());
        assert!(value["monthlyData"][0]["Expense"].is_number());
    }
}
