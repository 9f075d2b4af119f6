//! Pricing oracle backed by rate and price tables in a config file.
//!
//! Conversion rates live under `[rates]` as `<from>_to_<to> = <factor>`,
//! sell prices under `[prices]` as `<id>_<currency> = <price>`. The
//! tables are time-invariant, so the as-of date is accepted and ignored.

use crate::domain::currency::Currency;
use crate::ports::config_port::ConfigPort;
use crate::ports::pricing_port::{PricingError, PricingPort};
use chrono::NaiveDate;

pub struct ConfigPricingAdapter<'a> {
    config: &'a dyn ConfigPort,
}

impl<'a> ConfigPricingAdapter<'a> {
    pub fn new(config: &'a dyn ConfigPort) -> Self {
        Self { config }
    }

    fn table_value(&self, section: &str, key: &str) -> Result<Option<f64>, PricingError> {
        match self.config.get_string(section, key) {
            None => Ok(None),
            Some(raw) => {
                raw.trim()
                    .parse::<f64>()
                    .map(Some)
                    .map_err(|_| PricingError::InvalidEntry {
                        key: format!("[{}] {}", section, key),
                        value: raw,
                    })
            }
        }
    }

    fn rate(&self, from: Currency, to: Currency) -> Result<f64, PricingError> {
        let direct = format!("{}_to_{}", from, to).to_lowercase();
        if let Some(rate) = self.table_value("rates", &direct)? {
            return Ok(rate);
        }

        // Fall back to the reciprocal of the reverse direction.
        let reverse = format!("{}_to_{}", to, from).to_lowercase();
        if let Some(rate) = self.table_value("rates", &reverse)? {
            if rate != 0.0 {
                return Ok(1.0 / rate);
            }
        }

        Err(PricingError::MissingRate { from, to })
    }
}

impl PricingPort for ConfigPricingAdapter<'_> {
    fn convert_value(
        &self,
        value: f64,
        from: Currency,
        to: Currency,
        _as_of: Option<NaiveDate>,
    ) -> Result<f64, PricingError> {
        if from == to {
            return Ok(value);
        }
        Ok(value * self.rate(from, to)?)
    }

    fn sell_price(
        &self,
        instrument_id: &str,
        currency: Currency,
        _as_of: Option<NaiveDate>,
    ) -> Result<f64, PricingError> {
        let key = format!("{}_{}", instrument_id, currency).to_lowercase();
        match self.table_value("prices", &key)? {
            Some(price) => Ok(price),
            None => Err(PricingError::UnknownInstrument {
                id: instrument_id.to_string(),
                currency,
            }),
        }
    }
}
