use anyhow::Result;
use clap::Parser;
use winit::event_loop::EventLoop;

use gridpaint::cli::CliArgs;
use gridpaint::config::AppConfig;
use gridpaint::messages::Msg;

mod runtime;

use runtime::App;

fn main() -> Result<()> {
    let startup = match CliArgs::parse().into_config() {
        Ok(startup) => startup,
        Err(e) => {
            eprintln!("gridpaint: {}", e);
            std::process::exit(2);
        }
    };

    gridpaint::tracing::init();

    let config = AppConfig::load();
    if gridpaint::config_paths::config_file().is_some_and(|path| !path.exists()) {
        if let Err(e) = config.save() {
            tracing::warn!("Could not write default config: {}", e);
        }
    }

    let event_loop = EventLoop::<Msg>::with_user_event().build()?;
    let mut app = App::new(startup, config, event_loop.create_proxy());

    event_loop.run_app(&mut app)?;

    Ok(())
}
