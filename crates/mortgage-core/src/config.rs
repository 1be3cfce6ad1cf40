use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::MortgageError;
use crate::loan::{LoanInput, LoanTerms};
use crate::rental::{RentInput, RentTerms};
use crate::types::{Money, Percent, Rate};
use crate::MortgageResult;

/// One configuration layer. Every key is optional so that a later layer
/// only overrides what it names.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct MortgageConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interest: Option<Percent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Whole months; fractional terms are truncated at validation
    pub months: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Money>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub down: Option<Money>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub down_fraction: Option<Rate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rent: Option<Money>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rent_per_sq_feet: Option<Money>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sqft: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub insurance: Option<Money>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub taxrate: Option<Percent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hoa: Option<Money>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expense: Option<Money>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rent_increase_percent: Option<Percent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tax_increase_percent: Option<Percent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub idle_months: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub appreciation_percent: Option<Percent>,
}

/// Validated parameter set handed to the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameters {
    pub loan: LoanInput,
    pub rent: RentInput,
}

impl MortgageConfig {
    /// Overlay `over` on `base`.
    ///
    /// Keys override one by one, except the `down`/`down-fraction` and
    /// `rent`/`rent-per-sq-feet` pairs: naming either member of a pair
    /// replaces both.
    pub fn merge(base: MortgageConfig, over: MortgageConfig) -> MortgageConfig {
        let (down, down_fraction) = if over.down.is_some() || over.down_fraction.is_some() {
            (over.down, over.down_fraction)
        } else {
            (base.down, base.down_fraction)
        };
        let (rent, rent_per_sq_feet) = if over.rent.is_some() || over.rent_per_sq_feet.is_some() {
            (over.rent, over.rent_per_sq_feet)
        } else {
            (base.rent, base.rent_per_sq_feet)
        };

        MortgageConfig {
            interest: over.interest.or(base.interest),
            months: over.months.or(base.months),
            value: over.value.or(base.value),
            down,
            down_fraction,
            rent,
            rent_per_sq_feet,
            sqft: over.sqft.or(base.sqft),
            insurance: over.insurance.or(base.insurance),
            taxrate: over.taxrate.or(base.taxrate),
            hoa: over.hoa.or(base.hoa),
            expense: over.expense.or(base.expense),
            rent_increase_percent: over.rent_increase_percent.or(base.rent_increase_percent),
            tax_increase_percent: over.tax_increase_percent.or(base.tax_increase_percent),
            idle_months: over.idle_months.or(base.idle_months),
            appreciation_percent: over.appreciation_percent.or(base.appreciation_percent),
        }
    }

    /// Fold layers left to right; later layers win.
    pub fn layered<I>(layers: I) -> MortgageConfig
    where
        I: IntoIterator<Item = MortgageConfig>,
    {
        layers
            .into_iter()
            .fold(MortgageConfig::default(), MortgageConfig::merge)
    }

    /// Check the merged configuration and resolve it into engine inputs.
    pub fn validate(&self) -> MortgageResult<Parameters> {
        if self.down.is_some() && self.down_fraction.is_some() {
            return Err(MortgageError::invalid(
                "down",
                "Both down-fraction and down not allowed",
            ));
        }
        if self.rent.is_some() && self.rent_per_sq_feet.is_some() {
            return Err(MortgageError::invalid(
                "rent",
                "Both rent-per-sq-feet and rent are not allowed",
            ));
        }
        if self.interest.map_or(true, |v| v <= Decimal::ZERO) {
            return Err(MortgageError::invalid("interest", "Invalid interest"));
        }
        let months = self
            .months
            .filter(|v| *v > Decimal::ZERO)
            .and_then(|v| v.trunc().to_u32())
            .filter(|v| *v > 0)
            .ok_or_else(|| MortgageError::invalid("months", "Invalid months"))?;

        let zero = Decimal::ZERO;
        let params = Parameters {
            loan: LoanInput {
                interest: self.interest.unwrap_or(zero),
                months,
                value: self.value.unwrap_or(zero),
                down: self.down.unwrap_or(zero),
                down_fraction: self.down_fraction.unwrap_or(zero),
                tax_rate: self.taxrate.unwrap_or(zero),
                tax_increase_percent: self.tax_increase_percent.unwrap_or(zero),
                appreciation_percent: self.appreciation_percent.unwrap_or(zero),
            },
            rent: RentInput {
                rent: self.rent.unwrap_or(zero),
                rent_per_sq_feet: self.rent_per_sq_feet.unwrap_or(zero),
                sqft: self.sqft.unwrap_or(zero),
                insurance: self.insurance.unwrap_or(zero),
                expense: self.expense.unwrap_or(zero),
                hoa: self.hoa.unwrap_or(zero),
                rent_increase_percent: self.rent_increase_percent.unwrap_or(zero),
                idle_months: self.idle_months.unwrap_or(zero),
            },
        };

        LoanTerms::new(&params.loan)?;
        RentTerms::new(&params.rent)?;

        Ok(params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn complete() -> MortgageConfig {
        MortgageConfig {
            interest: Some(dec!(6)),
            months: Some(dec!(360)),
            value: Some(dec!(200000)),
            down: Some(dec!(40000)),
            rent: Some(dec!(1500)),
            ..MortgageConfig::default()
        }
    }

    #[test]
    fn test_merge_overrides_per_key() {
        let base = complete();
        let over = MortgageConfig {
            interest: Some(dec!(7)),
            hoa: Some(dec!(25)),
            ..MortgageConfig::default()
        };
        let merged = MortgageConfig::merge(base, over);
        assert_eq!(merged.interest, Some(dec!(7)));
        assert_eq!(merged.hoa, Some(dec!(25)));
        assert_eq!(merged.months, Some(dec!(360)));
        assert_eq!(merged.down, Some(dec!(40000)));
    }

    #[test]
    fn test_merge_replaces_down_pair_as_unit() {
        let base = MortgageConfig {
            down_fraction: Some(dec!(0.2)),
            ..complete()
        };
        let base = MortgageConfig { down: None, ..base };
        let over = MortgageConfig {
            down: Some(dec!(50000)),
            ..MortgageConfig::default()
        };
        let merged = MortgageConfig::merge(base, over);
        assert_eq!(merged.down, Some(dec!(50000)));
        assert_eq!(merged.down_fraction, None);
    }

    #[test]
    fn test_merge_replaces_rent_pair_as_unit() {
        let over = MortgageConfig {
            rent_per_sq_feet: Some(dec!(1.1)),
            sqft: Some(dec!(1400)),
            ..MortgageConfig::default()
        };
        let merged = MortgageConfig::merge(complete(), over);
        assert_eq!(merged.rent, None);
        assert_eq!(merged.rent_per_sq_feet, Some(dec!(1.1)));
        let params = merged.validate().unwrap();
        assert_eq!(params.rent.sqft, dec!(1400));
    }

    #[test]
    fn test_layered_later_wins() {
        let global = MortgageConfig {
            taxrate: Some(dec!(1.0)),
            ..complete()
        };
        let area = MortgageConfig {
            taxrate: Some(dec!(1.8)),
            ..MortgageConfig::default()
        };
        let specific = MortgageConfig {
            value: Some(dec!(250000)),
            ..MortgageConfig::default()
        };
        let merged = MortgageConfig::layered([global, area, specific]);
        assert_eq!(merged.taxrate, Some(dec!(1.8)));
        assert_eq!(merged.value, Some(dec!(250000)));
        assert_eq!(merged.interest, Some(dec!(6)));
    }

    #[test]
    fn test_validate_defaults_unset_to_zero() {
        let params = complete().validate().unwrap();
        assert_eq!(params.loan.down_fraction, Decimal::ZERO);
        assert_eq!(params.rent.hoa, Decimal::ZERO);
        assert_eq!(params.rent.idle_months, Decimal::ZERO);
    }

    #[test]
    fn test_validate_both_rent_sources() {
        let cfg = MortgageConfig {
            rent_per_sq_feet: Some(dec!(1.2)),
            ..complete()
        };
        let err = cfg.validate().unwrap_err();
        assert!(matches!(err, MortgageError::InvalidParameter { .. }));
    }

    #[test]
    fn test_validate_both_down_sources() {
        let cfg = MortgageConfig {
            down_fraction: Some(dec!(0.2)),
            ..complete()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_validate_missing_interest() {
        let cfg = MortgageConfig {
            interest: None,
            ..complete()
        };
        let err = cfg.validate().unwrap_err();
        assert!(err.to_string().contains("Invalid interest"));
    }

    #[test]
    fn test_validate_non_positive_months() {
        for months in [dec!(0), dec!(-12), dec!(0.5)] {
            let cfg = MortgageConfig {
                months: Some(months),
                ..complete()
            };
            let err = cfg.validate().unwrap_err();
            assert!(err.to_string().contains("Invalid months"), "{months}");
        }
    }

    #[test]
    fn test_validate_truncates_fractional_months() {
        let cfg = MortgageConfig {
            months: Some(dec!(360.7)),
            ..complete()
        };
        assert_eq!(cfg.validate().unwrap().loan.months, 360);
    }

    #[test]
    fn test_validate_zero_down() {
        let cfg = MortgageConfig {
            down: Some(Decimal::ZERO),
            ..complete()
        };
        let err = cfg.validate().unwrap_err();
        assert!(err.to_string().contains("Invalid down or down-fraction"));
    }

    #[test]
    fn test_validate_down_exceeds_value() {
        let cfg = MortgageConfig {
            down: Some(dec!(250000)),
            ..complete()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_validate_missing_rent() {
        let cfg = MortgageConfig {
            rent: None,
            ..complete()
        };
        let err = cfg.validate().unwrap_err();
        assert!(err.to_string().contains("Invalid rent or rent-per-sq-feet"));
    }

    #[test]
    fn test_kebab_case_keys() {
        let cfg: MortgageConfig = serde_json::from_str(
            r#"{"interest": 6, "down-fraction": 0.2, "rent-per-sq-feet": 1.25,
                "idle-months": 0.5, "appreciation-percent": 3, "unknown": true}"#,
        )
        .unwrap();
        assert_eq!(cfg.interest, Some(dec!(6)));
        assert_eq!(cfg.down_fraction, Some(dec!(0.2)));
        assert_eq!(cfg.rent_per_sq_feet, Some(dec!(1.25)));
        assert_eq!(cfg.idle_months, Some(dec!(0.5)));
        assert_eq!(cfg.appreciation_percent, Some(dec!(3)));
    }
}
