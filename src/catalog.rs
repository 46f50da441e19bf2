use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{InputField, RawEstimateParams, Venue};

pub const DEXES: [&str; 6] = [
    "Uniswap v3",
    "SushiSwap",
    "PancakeSwap",
    "Curve",
    "Balancer",
    "Raydium",
];

pub const PAIRS: [&str; 6] = [
    "ETH/USDC",
    "ETH/USDT",
    "BTC/USDC",
    "ARB/ETH",
    "SOL/USDC",
    "MATIC/USDT",
];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PairParseError {
    #[error("token pair must look like BASE/QUOTE, got {0:?}")]
    Malformed(String),
}

/// A token pair such as ETH/USDC: base asset priced in the quote asset.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TokenPair {
    pub base: String,
    pub quote: String,
}

impl FromStr for TokenPair {
    type Err = PairParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once('/') {
            Some((base, quote))
                if !base.trim().is_empty() && !quote.trim().is_empty() && !quote.contains('/') =>
            {
                Ok(TokenPair {
                    base: base.trim().to_string(),
                    quote: quote.trim().to_string(),
                })
            }
            _ => Err(PairParseError::Malformed(s.to_string())),
        }
    }
}

impl fmt::Display for TokenPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.base, self.quote)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    #[error("unknown exchange: {0}")]
    UnknownDex(String),
    #[error("unknown token pair: {0}")]
    UnknownPair(String),
    #[error(transparent)]
    Pair(#[from] PairParseError),
}

/// Which two venues and which pair the calculator is pointed at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteSetup {
    pub dex_a: String,
    pub dex_b: String,
    pub pair: String,
}

impl Default for RouteSetup {
    fn default() -> Self {
        Self {
            dex_a: "Uniswap v3".to_string(),
            dex_b: "SushiSwap".to_string(),
            pair: "ETH/USDC".to_string(),
        }
    }
}

impl RouteSetup {
    /// Check both exchanges and the pair against the catalog.
    /// The same exchange on both sides is allowed.
    pub fn validate(&self) -> Result<TokenPair, RouteError> {
        for dex in [&self.dex_a, &self.dex_b] {
            if !DEXES.contains(&dex.as_str()) {
                return Err(RouteError::UnknownDex(dex.clone()));
            }
        }
        if !PAIRS.contains(&self.pair.as_str()) {
            return Err(RouteError::UnknownPair(self.pair.clone()));
        }
        Ok(self.pair.parse()?)
    }

    pub fn swapped(&self) -> Self {
        Self {
            dex_a: self.dex_b.clone(),
            dex_b: self.dex_a.clone(),
            pair: self.pair.clone(),
        }
    }

    pub fn venue_name(&self, venue: Venue) -> &str {
        match venue {
            Venue::A => &self.dex_a,
            Venue::B => &self.dex_b,
        }
    }

    /// Pair split into base/quote; falls back to the whole string for both
    /// halves if it does not parse.
    pub fn token_pair(&self) -> TokenPair {
        self.pair.parse().unwrap_or_else(|_| TokenPair {
            base: self.pair.clone(),
            quote: self.pair.clone(),
        })
    }
}

/// One labelled input of the calculator form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormField {
    pub field: InputField,
    pub label: String,
    pub value: String,
}

pub fn form_fields(route: &RouteSetup, values: &RawEstimateParams) -> Vec<FormField> {
    let quote = route.token_pair().quote;
    InputField::ALL
        .into_iter()
        .map(|field| {
            let label = match field {
                InputField::PriceA => format!("{} price ({})", route.dex_a, quote),
                InputField::PriceB => format!("{} price ({})", route.dex_b, quote),
                InputField::TradeSize => format!("Trade size ({})", quote),
                InputField::FeeBpsA => format!("{} taker fee (bps)", route.dex_a),
                InputField::FeeBpsB => format!("{} taker fee (bps)", route.dex_b),
                InputField::SlippagePct => "Slippage (%)".to_string(),
                InputField::GasCost => "Gas/network cost (USD)".to_string(),
            };
            FormField {
                field,
                label,
                value: values.get(field).to_string(),
            }
        })
        .collect()
}
