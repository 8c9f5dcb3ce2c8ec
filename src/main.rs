#![allow(non_snake_case)]
use ekf_localization::{plotting, simulator as sim};
use log::info;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cfg = sim::SimConfig::default();
    let history = sim::run_ekf(&cfg)?;

    history.save_csv("fout.csv")?;
    info!("wrote fout.csv ({} rows)", history.len());

    if std::env::args().any(|arg| arg == "--plot") {
        plotting::plot_history(&history);
    }

    Ok(())
}
