//! # Ocean CLI
//!
//! Read-only inspection of pools, router fees and indexed assets.
//!
//! ## Usage
//!
//! ```bash
//! cargo run --bin ocean_cli -- pool-info --pool 0x...
//! cargo run --bin ocean_cli -- quote --pool 0x... --token-in 0x... --token-out 0x... --amount 10
//! cargo run --bin ocean_cli -- resolve did:op:...
//! ```
//!
//! Connection and index URLs come from `Config.toml` and `OCEAN_SDK_*`
//! environment variables (a `.env` file is loaded first).

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use ethers::types::Address;
use ocean_sdk::{
    aquarius::{AquariusClient, AssetIndex, ValidationOutcome},
    connection::{connect_with_settings, HttpClient},
    ddo::Ddo,
    fees::{SwapFeeRates, Slippage},
    models::{BPool, Erc20Token, FactoryRouter},
    settings::Settings,
    types::conversions::{format_units, from_wei, parse_units_str},
    ContractAddresses,
};
use rust_decimal::Decimal;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "ocean_cli", about = "Inspect data-exchange pools and assets")]
struct Cli {
    /// Config file (defaults to Config.toml)
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Tokens, balances and fees of a pool
    PoolInfo {
        #[arg(long)]
        pool: Address,
    },
    /// Spot price of token_out in token_in
    SpotPrice {
        #[arg(long)]
        pool: Address,
        #[arg(long)]
        token_in: Address,
        #[arg(long)]
        token_out: Address,
        /// Consume-market swap fee as a fraction (0.001 = 0.1%)
        #[arg(long, default_value = "0")]
        consume_fee: String,
    },
    /// Quote a swap and the fees it will pay
    Quote {
        #[arg(long)]
        pool: Address,
        #[arg(long)]
        token_in: Address,
        #[arg(long)]
        token_out: Address,
        /// Human amount: in for exact-in quotes, out with --exact-out
        #[arg(long)]
        amount: String,
        #[arg(long)]
        exact_out: bool,
        #[arg(long, default_value = "0")]
        consume_fee: String,
        /// Slippage tolerance as a fraction
        #[arg(long, default_value = "0.01")]
        slippage: String,
    },
    /// Protocol fees configured on the router
    RouterFees {
        /// Router address; read from the address file when omitted
        #[arg(long)]
        router: Option<Address>,
        /// Base token to query the community fee for
        #[arg(long)]
        base_token: Option<Address>,
    },
    /// Fetch an indexed asset document
    Resolve { did: String },
    /// Full-text search over indexed assets
    Search {
        text: String,
        #[arg(long, default_value_t = 10)]
        size: usize,
    },
    /// Validate a DDO file against the index
    Validate { file: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    env_logger::init();

    let cli = Cli::parse();
    let settings = match &cli.config {
        Some(path) => Settings::from_file(path)?,
        None => Settings::new()?,
    };

    match cli.command {
        Command::PoolInfo { pool } => pool_info(&settings, pool).await,
        Command::SpotPrice {
            pool,
            token_in,
            token_out,
            consume_fee,
        } => spot_price(&settings, pool, token_in, token_out, &consume_fee).await,
        Command::Quote {
            pool,
            token_in,
            token_out,
            amount,
            exact_out,
            consume_fee,
            slippage,
        } => {
            let request = QuoteRequest {
                pool,
                token_in,
                token_out,
                amount,
                exact_out,
                consume_fee,
                slippage,
            };
            quote(&settings, request).await
        }
        Command::RouterFees { router, base_token } => {
            router_fees(&settings, router, base_token).await
        }
        Command::Resolve { did } => resolve(&settings, &did).await,
        Command::Search { text, size } => search(&settings, &text, size).await,
        Command::Validate { file } => validate(&settings, &file).await,
    }
}

fn provider(settings: &Settings) -> Result<Arc<HttpClient>> {
    Ok(Arc::new(connect_with_settings(settings)?))
}

fn index(settings: &Settings) -> Result<AquariusClient> {
    Ok(AquariusClient::new(
        &settings.metadata.aquarius_url,
        Duration::from_secs(settings.metadata.request_timeout_seconds),
    )?)
}

async fn decimals_of(client: &Arc<HttpClient>, token: Address) -> Result<u32> {
    let decimals = Erc20Token::new(token, client.clone()).decimals().await?;
    Ok(decimals as u32)
}

async fn pool_info(settings: &Settings, pool: Address) -> Result<()> {
    let client = provider(settings)?;
    let snapshot = BPool::new(pool, client.clone()).snapshot().await?;
    let base_decimals = decimals_of(&client, snapshot.base_token).await?;

    println!("🏊 Pool {:?}", snapshot.address);
    println!("   Finalized:  {}", snapshot.finalized);
    println!(
        "   Datatoken:  {:?} (balance {})",
        snapshot.datatoken,
        from_wei(snapshot.datatoken_balance)?
    );
    println!(
        "   Base token: {:?} (balance {})",
        snapshot.base_token,
        format_units(snapshot.base_token_balance, base_decimals)?
    );
    println!("   LP fee:     {}", from_wei(snapshot.swap_fee)?);
    println!("   Market fee: {}", from_wei(snapshot.market_fee)?);
    println!("   OPC fee:    {}", from_wei(snapshot.opc_fee)?);
    Ok(())
}

async fn spot_price(
    settings: &Settings,
    pool: Address,
    token_in: Address,
    token_out: Address,
    consume_fee: &str,
) -> Result<()> {
    let client = provider(settings)?;
    let fee = parse_units_str(consume_fee, 18)?;
    let price = BPool::new(pool, client.clone())
        .get_spot_price(token_in, token_out, fee)
        .await?;
    let decimals = decimals_of(&client, token_in).await?;
    println!("💱 Spot price: {}", format_units(price, decimals)?);
    Ok(())
}

struct QuoteRequest {
    pool: Address,
    token_in: Address,
    token_out: Address,
    amount: String,
    exact_out: bool,
    consume_fee: String,
    slippage: String,
}

async fn quote(settings: &Settings, req: QuoteRequest) -> Result<()> {
    let client = provider(settings)?;
    let bpool = BPool::new(req.pool, client.clone());
    let decimals_in = decimals_of(&client, req.token_in).await?;
    let decimals_out = decimals_of(&client, req.token_out).await?;
    let consume_fee = parse_units_str(&req.consume_fee, 18)?;
    let slippage = Slippage::new(
        Decimal::from_str(&req.slippage).context("slippage must be a decimal fraction")?,
    )?;

    let (amount_in, amount_out, quote) = if req.exact_out {
        let out = parse_units_str(&req.amount, decimals_out)?;
        let q = bpool
            .get_amount_in_exact_out(req.token_in, req.token_out, out, consume_fee)
            .await?;
        (q.amount, out, q)
    } else {
        let amount_in = parse_units_str(&req.amount, decimals_in)?;
        let q = bpool
            .get_amount_out_exact_in(req.token_in, req.token_out, amount_in, consume_fee)
            .await?;
        (amount_in, q.amount, q)
    };

    println!("📊 Quote");
    println!("   In:  {}", format_units(amount_in, decimals_in)?);
    println!("   Out: {}", format_units(amount_out, decimals_out)?);
    println!("   LP fee:             {}", format_units(quote.lp_fee, decimals_in)?);
    println!("   OPC fee:            {}", format_units(quote.opc_fee, decimals_in)?);
    println!(
        "   Publish market fee: {}",
        format_units(quote.publish_market_fee, decimals_in)?
    );
    println!(
        "   Consume market fee: {}",
        format_units(quote.consume_market_fee, decimals_in)?
    );

    let (lp, opc, publish_market) =
        futures::try_join!(bpool.get_swap_fee(), bpool.opc_fee(), bpool.get_market_fee())?;
    let rates = SwapFeeRates {
        lp,
        opc,
        publish_market,
        consume_market: consume_fee,
    };
    let expected = rates.expected(amount_in)?;
    let tolerance = Decimal::new(1, 4);
    if expected.matches(&quote, decimals_in, tolerance)? {
        println!("✅ Fees match the pool's configured rates");
    } else {
        println!(
            "⚠️ Fees differ from configured rates (expected total {})",
            format_units(expected.total(), decimals_in)?
        );
    }

    if req.exact_out {
        println!(
            "   Max in with slippage:  {}",
            format_units(slippage.max_amount_in(amount_in)?, decimals_in)?
        );
    } else {
        println!(
            "   Min out with slippage: {}",
            format_units(slippage.min_amount_out(amount_out)?, decimals_out)?
        );
    }
    Ok(())
}

fn router_address(settings: &Settings, router: Option<Address>) -> Result<Address> {
    if let Some(address) = router {
        return Ok(address);
    }
    let file = settings
        .contracts
        .address_file
        .as_ref()
        .ok_or_else(|| anyhow!("no --router given and no contracts.address_file configured"))?;
    let addresses = ContractAddresses::from_file(file)?;
    Ok(addresses.address_of(&settings.network.name, "Router")?)
}

async fn router_fees(
    settings: &Settings,
    router: Option<Address>,
    base_token: Option<Address>,
) -> Result<()> {
    let client = provider(settings)?;
    let router = FactoryRouter::new(router_address(settings, router)?, client);

    let (ocean_fee, non_ocean_fee, consume_fee, provider_fee, collector) = futures::try_join!(
        router.swap_ocean_fee(),
        router.swap_non_ocean_fee(),
        router.get_opc_consume_fee(),
        router.get_opc_provider_fee(),
        router.opc_collector()
    )?;

    println!("🏛️ Router {:?}", router.address());
    println!("   Swap fee (approved tokens): {}", from_wei(ocean_fee)?);
    println!("   Swap fee (other tokens):    {}", from_wei(non_ocean_fee)?);
    println!("   OPC consume fee:            {}", from_wei(consume_fee)?);
    println!("   OPC provider fee:           {}", from_wei(provider_fee)?);
    println!("   OPC collector:              {:?}", collector);

    if let Some(token) = base_token {
        let (approved, fee) =
            futures::try_join!(router.is_approved_token(token), router.get_opc_fee(token))?;
        println!(
            "   {:?}: approved={} opc fee={}",
            token,
            approved,
            from_wei(fee)?
        );
    }
    Ok(())
}

fn print_asset(ddo: &Ddo) {
    println!("📦 {} ({})", ddo.metadata.name, ddo.id);
    println!("   Type:   {}", ddo.metadata.asset_type);
    println!("   Author: {}", ddo.metadata.author);
    println!("   NFT:    {}", ddo.nft_address);
    for service in &ddo.services {
        println!(
            "   Service {} [{}] datatoken {}",
            service.id, service.service_type, service.datatoken_address
        );
    }
}

async fn resolve(settings: &Settings, did: &str) -> Result<()> {
    let ddo = index(settings)?.resolve(did).await?;
    print_asset(&ddo);
    if ddo.is_disabled() {
        println!("⚠️ Ordering is disabled for this asset");
    }
    Ok(())
}

async fn search(settings: &Settings, text: &str, size: usize) -> Result<()> {
    let assets = index(settings)?.text_search(text, size).await?;
    println!("🔍 {} result(s) for {:?}", assets.len(), text);
    for ddo in &assets {
        print_asset(ddo);
    }
    Ok(())
}

async fn validate(settings: &Settings, file: &str) -> Result<()> {
    let ddo = Ddo::from_file(file).with_context(|| format!("reading {}", file))?;
    match index(settings)?.validate(&ddo).await? {
        ValidationOutcome::Valid { hash, .. } => {
            println!("✅ {} is valid (hash {})", ddo.id, hash);
        }
        ValidationOutcome::Invalid(errors) => {
            println!("❌ {} is invalid:", ddo.id);
            println!("{}", serde_json::to_string_pretty(&errors)?);
        }
    }
    Ok(())
}
