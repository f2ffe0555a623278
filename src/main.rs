use std::path::PathBuf;
use std::sync::Arc;

use dungeontracker::{
    apis::{birdeye::BirdeyeClient, game::GameApiClient, magiceden::MagicEdenClient},
    arguments,
    config::Config,
    database::Database,
    fetcher::DataFetcher,
    logger::{self, LogTag},
    prices::{LivePriceSource, PriceCache, SystemClock},
    roi::{EstimatorStrategy, RoiEstimator},
    webserver::{self, AppState},
};

/// Main entry point for dungeontracker
///
/// Runs the webserver by default; --fetch-once runs a single game API
/// snapshot sweep and exits.
#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();
    logger::init();

    if arguments::is_help_requested() {
        arguments::print_help();
        std::process::exit(0);
    }

    logger::info(LogTag::System, "dungeontracker starting up...");

    let config_path = arguments::get_config_path().unwrap_or_else(|| "config.json".to_string());
    let mut config = match Config::load(&config_path) {
        Ok(config) => config,
        Err(e) => {
            logger::error(LogTag::System, &format!("Failed to load config: {}", e));
            std::process::exit(1);
        }
    };
    if let Some(port) = arguments::get_port_override() {
        config.webserver.port = port;
    }

    let db = match Database::open(&config.database.path) {
        Ok(db) => Arc::new(db),
        Err(e) => {
            logger::error(LogTag::System, &format!("Failed to open database: {}", e));
            std::process::exit(1);
        }
    };

    let birdeye = match BirdeyeClient::new(config.birdeye_api_key.clone()) {
        Ok(client) => client,
        Err(e) => {
            logger::error(LogTag::System, &e);
            std::process::exit(1);
        }
    };
    if !birdeye.is_enabled() {
        logger::warning(
            LogTag::System,
            "No Birdeye API key configured; gold and SOL prices will degrade to stored or default values",
        );
    }

    let magiceden = match MagicEdenClient::new() {
        Ok(client) => client,
        Err(e) => {
            logger::error(LogTag::System, &e);
            std::process::exit(1);
        }
    };

    let source = Arc::new(LivePriceSource::new(
        birdeye,
        magiceden,
        config.collection_symbol.clone(),
    ));
    let prices = Arc::new(PriceCache::new(
        source,
        db.clone(),
        Arc::new(SystemClock),
    ));

    let strategy = EstimatorStrategy::from_name(&config.roi.strategy).unwrap_or_else(|| {
        logger::warning(
            LogTag::System,
            &format!(
                "Unknown ROI strategy {:?}, defaulting to lifetime-average",
                config.roi.strategy
            ),
        );
        EstimatorStrategy::LifetimeAverage
    });
    let roi = Arc::new(RoiEstimator::new(
        db.clone(),
        prices.clone(),
        strategy,
        config.roi.total_investment,
    ));

    let game = match GameApiClient::new(
        config.game.bearer_token.clone(),
        config.game.wallet_address.clone(),
    ) {
        Ok(client) => Arc::new(client),
        Err(e) => {
            logger::error(LogTag::System, &e);
            std::process::exit(1);
        }
    };

    let fetcher = DataFetcher::new(game.clone(), PathBuf::from(&config.fetcher.data_dir));

    if arguments::is_fetch_once_enabled() {
        fetcher.fetch_all().await;
        return;
    }

    if config.fetcher.enabled {
        if game.is_enabled() {
            let interval = config.fetcher.interval_seconds;
            tokio::spawn(async move {
                fetcher.run_loop(interval).await;
            });
        } else {
            logger::warning(
                LogTag::System,
                "Fetcher enabled but game API credentials are missing; skipping snapshot loop",
            );
        }
    }

    if let Err(e) = ctrlc::set_handler(|| {
        webserver::shutdown();
    }) {
        logger::warning(
            LogTag::System,
            &format!("Failed to install Ctrl-C handler: {}", e),
        );
    }

    let state = AppState::new(Arc::new(config), db, prices, roi, game);
    if let Err(e) = webserver::start_server(state).await {
        logger::error(LogTag::System, &e);
        std::process::exit(1);
    }
}
