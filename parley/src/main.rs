mod app;
mod error;
mod logging;
mod options;
mod storage;
mod style;
mod term;
mod util;

use app::App;
use error::AppError;
use options::Options;
use storage::TomlFileStore;

fn run_app() -> Result<(), AppError> {
    let options = Options::load(std::env::args())?;
    let store = TomlFileStore::open(options.settings_path()?)?;

    App::new(options.palette, Box::new(store))?.run(options.view)
}

fn main() {
    logging::init();

    if let Err(e) = run_app() {
        eprintln!("ERROR: {e}");
        std::process::exit(1);
    }
}
