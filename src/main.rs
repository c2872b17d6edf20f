use KiRate::cli::cli_main::run_cli;
use KiRate::settings::SettingsManager;
use log::error;
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};

pub fn main() {
    let args: Vec<String> = std::env::args().collect();
    let manager = match args.get(2) {
        Some(config_file) => SettingsManager::with_config_file(config_file),
        None => SettingsManager::new(),
    };
    let settings = manager.get_settings();
    if let Err(e) = TermLogger::init(
        settings.level_filter(),
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    ) {
        eprintln!("logger initialization failed: {}", e);
    }

    if let Err(e) = run_cli(&args, settings) {
        error!("{}", e);
        std::process::exit(1);
    }
}
