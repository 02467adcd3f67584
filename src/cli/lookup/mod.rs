//! Lookup command - one comps request from the command line

use clap::Args;

use crate::api::types::ApiError;
use crate::config::AppConfig;
use crate::infrastructure::logging::init_logging;
use crate::infrastructure::services::CompsLookup;

/// Subject property and filters for a single lookup
#[derive(Debug, Args)]
pub struct LookupArgs {
    /// US street address; ignored when both coordinates are given
    #[arg(long)]
    pub address: Option<String>,

    #[arg(long, allow_negative_numbers = true)]
    pub latitude: Option<f64>,

    #[arg(long, allow_negative_numbers = true)]
    pub longitude: Option<f64>,

    #[arg(long)]
    pub bedrooms: Option<u32>,

    /// Whole or half baths, e.g. 1.5
    #[arg(long)]
    pub bathrooms: Option<f64>,

    /// Search radius in miles
    #[arg(long)]
    pub radius: Option<f64>,

    /// Recency window such as `*:270`
    #[arg(long)]
    pub days_old: Option<String>,
}

impl From<LookupArgs> for CompsLookup {
    fn from(args: LookupArgs) -> Self {
        Self {
            address: args.address,
            latitude: args.latitude,
            longitude: args.longitude,
            bedrooms: args.bedrooms,
            bathrooms: args.bathrooms,
            radius_miles: args.radius,
            days_old: args.days_old,
        }
    }
}

/// Print the success envelope, or the error envelope and a failing exit
pub async fn run(args: LookupArgs) -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load()?;
    init_logging(&config.logging);

    let state = crate::create_app_state(&config)?;

    match state.comps_service.find_comps(args.into()).await {
        Ok(response) => {
            println!("{}", serde_json::to_string_pretty(&response)?);
            Ok(())
        }
        Err(e) => {
            let error = ApiError::from(e);
            println!("{}", serde_json::to_string_pretty(&error.response)?);
            Err(anyhow::anyhow!("lookup failed with {}", error.code()))
        }
    }
}
