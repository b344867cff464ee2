//! `paper-calc`: quantity, price and discount conversions from the shell.
//!
//! ```text
//! paper-calc quantity --grammage 80 --size-x 636 --size-y 939 --packaging ream --pack-a 250 --unit SHEET --value 1000
//! paper-calc price    --grammage 100 --size-x 500 --size-y 700 --packaging box --pack-a 2 --pack-b 250 --from WON_PER_TON --to WON_PER_BOX --price 1000000
//! paper-calc discount --grammage 100 --size-x 500 --size-y 700 --packaging box --pack-a 2 --pack-b 250 --official 1000000 --official-unit WON_PER_TON --rate 10 --unit WON_PER_BOX
//! ```
//!
//! Results are printed as JSON on stdout; logs go to stderr.

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand, ValueEnum};
use paper_trade::domain::services::price_conversion::{
    Discount, OfficialQuote, discount_rate_for, discounted_unit_price,
};
use paper_trade::domain::services::quantity_conversion::{
    convert_raw_quantity_with, supported_units,
};
use paper_trade::domain::services::{convert_raw_price, supported_price_units};
use paper_trade::domain::value_objects::{
    DiscountRateUnit, Packaging, PaperSpec, PriceUnit, QuantityUnit, finite_or_zero,
};
use paper_trade::infrastructure::config::AppConfig;
use paper_trade::infrastructure::telemetry::init_tracing;
use serde_json::json;
use tracing::debug;

#[derive(Debug, Parser)]
#[command(name = "paper-calc", version, about = "Paper quantity and price conversions")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Show a quantity in every unit its packaging supports.
    Quantity {
        #[command(flatten)]
        paper: PaperArgs,
        /// Unit the value is given in.
        #[arg(long)]
        unit: QuantityUnit,
        /// Value in `unit`.
        #[arg(long)]
        value: f64,
    },
    /// Convert a unit price to another basis.
    Price {
        #[command(flatten)]
        paper: PaperArgs,
        /// Basis of the given price.
        #[arg(long)]
        from: PriceUnit,
        /// Basis to convert to.
        #[arg(long)]
        to: PriceUnit,
        /// Price in `from`.
        #[arg(long)]
        price: f64,
    },
    /// Apply a discount to an official price, or recover one from a unit price.
    Discount {
        #[command(flatten)]
        paper: PaperArgs,
        /// Official price.
        #[arg(long)]
        official: f64,
        /// Basis of the official price.
        #[arg(long)]
        official_unit: PriceUnit,
        /// Discount rate; mutually exclusive with `--unit-price`.
        #[arg(long, conflicts_with = "unit_price")]
        rate: Option<f64>,
        /// Unit price to recover the discount from.
        #[arg(long)]
        unit_price: Option<f64>,
        /// Unit of the discount rate.
        #[arg(long, value_enum, default_value_t = RateUnit::Percent)]
        rate_unit: RateUnit,
        /// Basis of the unit price.
        #[arg(long)]
        unit: PriceUnit,
    },
}

#[derive(Debug, Args)]
struct PaperArgs {
    /// Grammage in g/m².
    #[arg(long)]
    grammage: f64,
    /// Width in mm.
    #[arg(long)]
    size_x: f64,
    /// Length in mm; omit for rolls.
    #[arg(long, default_value_t = 0.0)]
    size_y: f64,
    /// Packaging type.
    #[arg(long, value_enum)]
    packaging: PackagingKind,
    /// First pack figure (sheets per bundle for boxes).
    #[arg(long, default_value_t = 0)]
    pack_a: u32,
    /// Second pack figure (bundles per box for boxes).
    #[arg(long, default_value_t = 0)]
    pack_b: u32,
}

impl PaperArgs {
    fn spec(&self) -> PaperSpec {
        let packaging = match self.packaging {
            PackagingKind::Roll => Packaging::Roll {
                pack_a: self.pack_a,
                pack_b: self.pack_b,
            },
            PackagingKind::Ream => Packaging::Ream {
                pack_a: self.pack_a,
            },
            PackagingKind::Skid => Packaging::Skid {
                pack_a: self.pack_a,
                pack_b: self.pack_b,
            },
            PackagingKind::Box => Packaging::Box {
                pack_a: self.pack_a,
                pack_b: self.pack_b,
            },
        };
        PaperSpec::from_input(
            Some(self.grammage),
            Some(self.size_x),
            Some(self.size_y),
            packaging,
        )
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum PackagingKind {
    Roll,
    Ream,
    Skid,
    Box,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum RateUnit {
    Percent,
    WonPerTon,
    WonPerBox,
    WonPerReam,
}

impl From<RateUnit> for DiscountRateUnit {
    fn from(unit: RateUnit) -> Self {
        match unit {
            RateUnit::Percent => Self::Percent,
            RateUnit::WonPerTon => Self::WonPerTon,
            RateUnit::WonPerBox => Self::WonPerBox,
            RateUnit::WonPerReam => Self::WonPerReam,
        }
    }
}

fn main() -> Result<()> {
    let config = AppConfig::load().context("loading configuration")?;
    init_tracing(&config.logging).context("installing tracing subscriber")?;

    let cli = Cli::parse();
    let output = run(cli.command)?;
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn run(command: Command) -> Result<serde_json::Value> {
    match command {
        Command::Quantity { paper, unit, value } => {
            let spec = paper.spec();
            debug!(%spec, %unit, value, "converting quantity");
            let Some(quantity) = convert_raw_quantity_with(&spec, unit, Some(value)) else {
                bail!(
                    "{unit} is not supported for {} packaging (use one of {:?})",
                    spec.packaging_type(),
                    supported_units(spec.packaging())
                );
            };
            Ok(json!({
                "spec": spec,
                "quantity": quantity,
                "tons": quantity.tons(),
            }))
        }
        Command::Price {
            paper,
            from,
            to,
            price,
        } => {
            let spec = paper.spec();
            ensure_price_unit(&spec, from)?;
            ensure_price_unit(&spec, to)?;
            debug!(%spec, %from, %to, price, "converting price");
            Ok(json!({
                "from": from,
                "to": to,
                "price": convert_raw_price(&spec, from, to, Some(price)),
            }))
        }
        Command::Discount {
            paper,
            official,
            official_unit,
            rate,
            unit_price,
            rate_unit,
            unit,
        } => {
            let spec = paper.spec();
            ensure_price_unit(&spec, official_unit)?;
            ensure_price_unit(&spec, unit)?;
            let official = OfficialQuote {
                price: finite_or_zero(official),
                unit: official_unit,
            };
            let rate_unit = DiscountRateUnit::from(rate_unit);

            match (rate, unit_price) {
                (Some(rate), _) => {
                    let discount = Discount {
                        rate: finite_or_zero(rate),
                        unit: rate_unit,
                    };
                    debug!(%spec, ?official, ?discount, "applying discount");
                    Ok(json!({
                        "discount_rate": discount.rate,
                        "discount_rate_unit": rate_unit,
                        "unit_price": discounted_unit_price(&spec, official, discount, unit),
                        "unit_price_unit": unit,
                    }))
                }
                (None, Some(unit_price)) => {
                    let unit_price = finite_or_zero(unit_price);
                    debug!(%spec, ?official, %unit_price, "recovering discount");
                    Ok(json!({
                        "discount_rate": discount_rate_for(&spec, official, unit_price, unit, rate_unit),
                        "discount_rate_unit": rate_unit,
                        "unit_price": unit_price,
                        "unit_price_unit": unit,
                    }))
                }
                (None, None) => bail!("either --rate or --unit-price is required"),
            }
        }
    }
}

fn ensure_price_unit(spec: &PaperSpec, unit: PriceUnit) -> Result<()> {
    let supported = supported_price_units(spec.packaging());
    if !supported.contains(&unit) {
        bail!(
            "{unit} does not apply to {} packaging (use one of {supported:?})",
            spec.packaging_type()
        );
    }
    Ok(())
}
