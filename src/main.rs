use app_lib::infra::{logging, Settings};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    logging::init_logging();

    let result = match Settings::from_env() {
        Ok(settings) => app_lib::run(settings).await,
        Err(e) => Err(e),
    };
    if let Err(e) = result {
        log::error!("{}", e);
        std::process::exit(1);
    }
}
