use std::fmt;

use crate::error::AmountError;

pub const MIN_AMOUNT: f64 = 1.0;
pub const MAX_AMOUNT: f64 = 10_000.0;

/// Valor de recarga já validado (R$ 1,00 ..= R$ 10.000,00)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Amount(f64);

impl Amount {
    pub fn value(self) -> f64 {
        self.0
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "R$ {:.2}", self.0)
    }
}

/// Interpreta o valor digitado no formulário de recarga.
///
/// Aceita vírgula como separador decimal ("10,50"). Somente a primeira
/// vírgula é trocada, então "1,000,00" é rejeitado.
pub fn parse_amount(input: &str) -> Result<Amount, AmountError> {
    let raw = input.trim();
    if raw.is_empty() {
        return Err(AmountError::Empty);
    }

    let normalized = raw.replacen(',', ".", 1);
    let value: f64 = normalized.parse().map_err(|_| AmountError::Invalid)?;

    if !value.is_finite() || value <= 0.0 {
        return Err(AmountError::Invalid);
    }
    if value < MIN_AMOUNT {
        return Err(AmountError::BelowMinimum);
    }
    if value > MAX_AMOUNT {
        return Err(AmountError::AboveMaximum);
    }
    Ok(Amount(value))
}
