use clap::Args;
use mortgage_core::{MortgageConfig, Parameters};
use rust_decimal::Decimal;
use tracing::debug;

use crate::input;

/// Where the configuration layers come from, lowest priority first.
#[derive(Args, Debug, Clone)]
pub struct LayerArgs {
    /// Global defaults shared by every property
    #[arg(short = 'g', long = "gfile", default_value = "../global.json", global = true)]
    pub gfile: Option<String>,

    /// Area file: tax rate, HOA and other local figures
    #[arg(short = 'a', long = "afile", default_value = "./area.json", global = true)]
    pub afile: Option<String>,

    /// Property-specific file
    #[arg(short = 'f', long = "cfile", global = true)]
    pub cfile: Option<String>,
}

/// Individual overrides applied on top of every file and stdin layer.
#[derive(Args, Debug, Clone, Default)]
pub struct ParamArgs {
    /// Annual interest percent (6 = 6%)
    #[arg(long, global = true)]
    pub interest: Option<Decimal>,
    /// Loan term in months
    #[arg(long, global = true, allow_hyphen_values = true)]
    pub months: Option<Decimal>,
    /// Property value
    #[arg(long, global = true)]
    pub value: Option<Decimal>,
    /// Absolute down payment
    #[arg(long, global = true)]
    pub down: Option<Decimal>,
    /// Down payment as a fraction of value
    #[arg(long, global = true)]
    pub down_fraction: Option<Decimal>,
    /// Flat monthly rent
    #[arg(long, global = true)]
    pub rent: Option<Decimal>,
    /// Monthly rent per square foot
    #[arg(long, global = true)]
    pub rent_per_sq_feet: Option<Decimal>,
    /// Square footage
    #[arg(long, global = true)]
    pub sqft: Option<Decimal>,
    /// Monthly insurance
    #[arg(long, global = true)]
    pub insurance: Option<Decimal>,
    /// Annual property tax percent of value
    #[arg(long, global = true)]
    pub taxrate: Option<Decimal>,
    /// Monthly HOA dues
    #[arg(long, global = true)]
    pub hoa: Option<Decimal>,
    /// Other monthly expense
    #[arg(long, global = true)]
    pub expense: Option<Decimal>,
    /// Annual rent increase percent
    #[arg(long, global = true, allow_hyphen_values = true)]
    pub rent_increase_percent: Option<Decimal>,
    /// Annual tax increase percent (capped at appreciation)
    #[arg(long, global = true, allow_hyphen_values = true)]
    pub tax_increase_percent: Option<Decimal>,
    /// Vacant months per year
    #[arg(long, global = true)]
    pub idle_months: Option<Decimal>,
    /// Annual appreciation percent
    #[arg(long, global = true, allow_hyphen_values = true)]
    pub appreciation_percent: Option<Decimal>,
}

impl From<&ParamArgs> for MortgageConfig {
    fn from(args: &ParamArgs) -> Self {
        MortgageConfig {
            interest: args.interest,
            months: args.months,
            value: args.value,
            down: args.down,
            down_fraction: args.down_fraction,
            rent: args.rent,
            rent_per_sq_feet: args.rent_per_sq_feet,
            sqft: args.sqft,
            insurance: args.insurance,
            taxrate: args.taxrate,
            hoa: args.hoa,
            expense: args.expense,
            rent_increase_percent: args.rent_increase_percent,
            tax_increase_percent: args.tax_increase_percent,
            idle_months: args.idle_months,
            appreciation_percent: args.appreciation_percent,
        }
    }
}

/// Merge global, area, specific, stdin and flag layers, then validate once.
pub fn resolve(
    layers: &LayerArgs,
    params: &ParamArgs,
) -> Result<Parameters, Box<dyn std::error::Error>> {
    let files = [&layers.gfile, &layers.afile, &layers.cfile];
    let mut stack: Vec<MortgageConfig> = files
        .into_iter()
        .flatten()
        .filter_map(|path| input::file::read_layer(path))
        .collect();
    if let Some(piped) = input::stdin::read_stdin() {
        stack.push(piped);
    }
    stack.push(MortgageConfig::from(params));

    debug!(layers = stack.len(), "merging configuration layers");
    Ok(MortgageConfig::layered(stack).validate()?)
}
